//! LinguaLink - auto-detecting text translation
//!
//! Detects the language of a text and translates it into a chosen target
//! language, using a hosted language model for both steps.

pub mod catalog;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod debounce;
pub mod detect;
pub mod error;
pub mod oracle;
pub mod orchestrator;
pub mod repl;
pub mod session;
pub mod translate;
