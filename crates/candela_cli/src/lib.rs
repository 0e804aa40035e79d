//! Shared plumbing for the candela binaries: argument parsing helpers,
//! logging setup, image writers, and the demo scenes.

pub mod logger;
pub mod output;
pub mod scenes;

use clap::error::ErrorKind;
use clap::Parser;

/// Parse command-line arguments.
///
/// Help and version requests exit 0; any malformed argument prints the
/// clap diagnostic and exits 1.
pub fn parse_args<T: Parser>() -> T {
    T::try_parse().unwrap_or_else(|error| {
        let _ = error.print();
        match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => std::process::exit(0),
            _ => std::process::exit(1),
        }
    })
}
