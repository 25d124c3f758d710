//! # Kassa Register
//!
//! Entry point for the `kassa` binary. All wiring lives in the library so it
//! can be exercised from tests; see [`kassa_cli::run`].
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  main.rs        kassa_cli::run()                                │
//! │     │                                                           │
//! │     ├── Ok(())          exit 0                                  │
//! │     └── Err(Startup)    message on stderr, exit 1               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    match kassa_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("kassa: {e}");
            ExitCode::FAILURE
        }
    }
}
