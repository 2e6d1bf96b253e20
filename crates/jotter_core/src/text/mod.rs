//! Text normalization for note fields.
//!
//! # Responsibility
//! - Reduce free text to a space-joined sequence of lemmas.
//! - Keep the linguistic backend swappable behind `LemmaTagger`.

pub mod lemmatizer;
pub mod normalizer;
