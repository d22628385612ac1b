//! CLI subcommand implementations for the portside binary.

pub mod output;
pub mod query_cmd;
pub mod recall;
