// src/config/mod.rs
pub mod analyzers;
