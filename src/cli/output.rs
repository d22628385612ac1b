//! Output-mode helpers shared by all subcommands.
//!
//! The binary exports the global `--json`/`--quiet`/`--verbose` flags as
//! environment variables so every module can check them without passing
//! flags through each call chain.

/// True when `--json` was passed: machine-readable output only.
pub fn is_json() -> bool {
    std::env::var("PORTSIDE_JSON").is_ok()
}

/// True when `--quiet` was passed: suppress non-essential output.
pub fn is_quiet() -> bool {
    std::env::var("PORTSIDE_QUIET").is_ok()
}

/// True when `--verbose` was passed.
pub fn is_verbose() -> bool {
    std::env::var("PORTSIDE_VERBOSE").is_ok()
}

/// Print a JSON value to stdout.
pub fn print_json(value: &serde_json::Value) {
    println!("{value}");
}
