// src/core/mod.rs

pub mod integer_buffer;
pub mod rescale;
