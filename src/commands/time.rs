//! Time command handler

use anyhow::Result;

use tubekeys::format::format_duration;
use tubekeys::player::parse_timestamp;

/// Parse a timestamp and print its value in seconds and as a clock time.
///
/// Malformed input is reported on stderr with exit code 1.
#[cfg(not(tarpaulin_include))]
pub fn handle(spec: &str) -> Result<()> {
    match parse_timestamp(spec) {
        Ok(seconds) => {
            println!("{}\t{}", seconds, format_duration(seconds));
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
