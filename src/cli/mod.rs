//! Command-line front end: argument parsing and summary output

pub mod args;
pub mod output;
