//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate normalization and persistence into note use-cases.
//! - Keep CLI/UI layers decoupled from storage details.

pub mod note_store;
