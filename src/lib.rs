pub mod arguments;
pub mod bumper;
pub mod encoding;
pub mod error;
pub mod locator;
pub mod markers;
pub mod rewriter;
pub mod version;
