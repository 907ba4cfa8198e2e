// src/extractors/mod.rs
pub mod text;

pub use text::{extract_all_text, to_plaintext};
