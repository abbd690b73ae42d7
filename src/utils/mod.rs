// src/utils/mod.rs

pub mod time;
pub mod validation;
