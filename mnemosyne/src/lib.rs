//! Mnemosyne: a personal, append-only memory log.
//!
//! Raw text is split into typed memories (beliefs, decisions, reflections,
//! facts), linked to the memories they revise, checked for contradictions,
//! and queried with time-aware questions.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod intelligence;
pub mod models;
pub mod processing;
pub mod query;
pub mod services;
pub mod store;

pub use error::{MnemosyneError, Result};
