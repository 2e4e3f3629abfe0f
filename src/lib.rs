// src/lib.rs
pub mod client;
pub mod config;
pub mod model;
pub mod render;
pub mod widget;
