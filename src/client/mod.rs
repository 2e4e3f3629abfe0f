// src/client/mod.rs
mod health;

pub use health::{HealthClient, HealthError};
