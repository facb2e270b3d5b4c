use crate::version::BumpFlags;
use clap::Parser;
use std::ffi::{OsStr, OsString};

const HELP_TEMPLATE: &str = concat!(
    "{name}, v{version}\n",
    "License: ",
    env!("CARGO_PKG_LICENSE"),
    ". Source and docs: README.md in the ",
    env!("CARGO_PKG_NAME"),
    " package.\n",
    "{about}\n",
    "\n",
    "{usage-heading} {usage}\n",
    "\n",
    "{all-args}{after-help}"
);

const EXAMPLE: &str = "\
Example:
  bumpversions C:\\repo\\MyApp\\ -build -reset";

/// Fewer user supplied arguments than this is treated as a request for help.
pub const MIN_ARGUMENTS: usize = 2;

const HELP_TOKENS: [&str; 3] = ["-?", "-h", "--help"];

#[derive(Debug, Parser)]
#[command(
    name = "bumpversions",
    bin_name = "bumpversions",
    version,
    about = "Bumps four-part version numbers in AssemblyInfo.* and *.csproj files.",
    override_usage = "bumpversions <PATH> [-major] [-minor] [-build] [-revision] [-reset]\n       bumpversions [-?|-h|--help]",
    help_template = HELP_TEMPLATE,
    after_help = EXAMPLE
)]
pub struct Arguments {
    /// Directory to search recursively
    pub path: String,
    /// Bump the major component
    #[arg(long)]
    pub major: bool,
    /// Bump the minor component
    #[arg(long)]
    pub minor: bool,
    /// Bump the build component
    #[arg(long)]
    pub build: bool,
    /// Bump the revision component
    #[arg(long)]
    pub revision: bool,
    /// Zero every component below the bumped one
    #[arg(long)]
    pub reset: bool,
    /// Print debug logging
    #[arg(long, short)]
    pub verbose: bool,
    /// Unrecognised arguments, accepted and ignored
    #[arg(hide = true)]
    pub ignored: Vec<String>,
}

impl Arguments {
    /// Parses `<path> [flags...]` where the flags are the single dash
    /// switches (`-build`, `-reset`) or their `--` forms.
    ///
    /// The first argument is always the path. Unrecognised arguments are
    /// collected in `ignored` rather than rejected. Returns `Ok(None)` when
    /// help was asked for anywhere on the line, or when too few arguments were
    /// given to do anything; the caller then shows the help text.
    pub fn from_legacy_args<I, T>(args: I) -> Result<Option<Self>, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        if args.len() <= MIN_ARGUMENTS || args.iter().skip(1).any(|arg| is_help(arg)) {
            return Ok(None);
        }

        let mut args = args.into_iter();
        let program = args.next().unwrap_or_default();
        let path = args.next().unwrap_or_default();
        let mut command_line = vec![program];
        let mut ignored = vec![];
        for arg in args {
            match known_flag(&arg) {
                Some(flag) => command_line.push(OsString::from(flag)),
                None => ignored.push(arg),
            }
        }
        // everything after `--` is positional
        command_line.push(OsString::from("--"));
        command_line.push(path);
        command_line.extend(ignored);

        Self::try_parse_from(command_line).map(Some)
    }

    pub fn flags(&self) -> BumpFlags {
        BumpFlags {
            major: self.major,
            minor: self.minor,
            build: self.build,
            revision: self.revision,
            reset: self.reset,
        }
    }
}

fn is_help(arg: &OsStr) -> bool {
    arg.to_str().is_some_and(|arg| HELP_TOKENS.contains(&arg))
}

fn known_flag(arg: &OsStr) -> Option<&'static str> {
    match arg.to_str()? {
        "-major" | "--major" => Some("--major"),
        "-minor" | "--minor" => Some("--minor"),
        "-build" | "--build" => Some("--build"),
        "-revision" | "--revision" => Some("--revision"),
        "-reset" | "--reset" => Some("--reset"),
        "-v" | "--verbose" => Some("--verbose"),
        "-V" | "--version" => Some("--version"),
        _ => None,
    }
}
