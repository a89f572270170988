//! dmgcast - release packager for macOS applications.
//!
//! This binary archives a built .app bundle into a signed DMG disk image
//! and renders the Sparkle appcast feed consumed by the auto-updater.

mod appcast;
mod cli;
mod command;
mod error;
mod settings;

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
