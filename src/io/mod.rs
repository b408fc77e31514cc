//! Persistence of run results

pub mod manifest;
