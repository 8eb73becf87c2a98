//! srassets bundler - asset bundle builder for speech-recognition firmware.
//!
//! This binary packs model directories and a derived manifest into a
//! single flash-mountable assets.bin, with proper error handling and
//! artifact verification.

use std::process;

fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match srassets_bundler::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    };

    process::exit(exit_code);
}
