// src/widget/mod.rs
mod status;

pub use status::{FetchOutcome, StatusWidget};
