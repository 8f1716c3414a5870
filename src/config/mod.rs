// src/config/mod.rs

pub mod client_config;

// Re-export main types for convenience
pub use client_config::{ClientConfig, BufferConfig};
