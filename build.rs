//! Build script for tubekeys - embeds build info into the version string
//!
//! Always emits `TUBEKEYS_BUILD_DATE` with the build date.
//!
//! When the `release` feature is NOT set (default dev builds) it also emits
//! `VERGEN_GIT_SHA` with the commit hash, or `unknown` outside a git checkout.

use std::process::Command;

/// Get the current date in YYYY-MM-DD format
fn build_date() -> String {
    if let Ok(output) = Command::new("date").args(["+%Y-%m-%d"]).output() {
        if output.status.success() {
            let date = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if !date.is_empty() {
                return date;
            }
        }
    }
    "unknown".to_string()
}

fn main() {
    println!("cargo:rustc-env=TUBEKEYS_BUILD_DATE={}", build_date());

    // Release builds carry the date only
    #[cfg(not(feature = "release"))]
    {
        use vergen_gitcl::{Emitter, GitclBuilder};

        let emit_result = match GitclBuilder::default().sha(true).build() {
            Ok(git) => Emitter::default()
                .add_instructions(&git)
                .and_then(|emitter| emitter.emit()),
            Err(e) => {
                println!("cargo:warning=Failed to configure git info: {}", e);
                println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
                return;
            }
        };

        if let Err(e) = emit_result {
            println!("cargo:warning=Failed to get git info: {}", e);
            println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
        }
    }
}
