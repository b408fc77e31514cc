//! Core services: rule tables, skip decisions, walking, copying and counters

pub mod copy;
pub mod count;
pub mod filter;
pub mod format;
pub mod gitignore;
pub mod rules;
pub mod stats;
pub mod walk;
