use anyhow::Result;
use bump_versions::{arguments::Arguments, bumper, error::BumpError};
use clap::CommandFactory;
use log::{LevelFilter, debug};
use std::path::Path;

fn main() -> Result<()> {
    let Some(args) = Arguments::from_legacy_args(std::env::args_os()).unwrap_or_else(|e| e.exit())
    else {
        Arguments::command().print_help()?;
        return Ok(());
    };
    pretty_env_logger::env_logger::builder()
        .filter_level(if args.verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .format_timestamp(None)
        .init();

    let path: &Path = args.path.trim().as_ref();
    let flags = args.flags();
    debug!("Bumping versions under '{}' with {:?}", path.display(), flags);

    match bumper::bump(path, &flags) {
        Ok(report) => {
            debug!(
                "Scanned {} file(s), updated {}, failed {}",
                report.scanned.len(),
                report.updated.len(),
                report.failed.len()
            );
        }
        Err(e @ BumpError::DirectoryNotFound(_)) => println!("{e}"),
        Err(e) => println!(" FAILED with error {e}"),
    }

    Ok(())
}
