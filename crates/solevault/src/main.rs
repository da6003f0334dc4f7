//! # SoleVault CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this file only
//! invokes `cli::run()` and handles process termination.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/solevault/src/cli/)                      │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Terminal rendering with colored (render.rs)              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/solevaultapp/src/api.rs)                 │
//! │  - Resolves id prefixes, applies config defaults            │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI layer owns argument
//! parsing, reading image and backup files, the tracing subscriber, rendering and
//! exit codes.
//!
//! ## Logging
//!
//! Diagnostics go to stderr through `tracing`. The filter comes from `RUST_LOG`
//! when set, otherwise `warn` (or `debug` for the SoleVault crates with `--verbose`).
//! Stdout carries only command output, so `solevault export -` can be piped.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
