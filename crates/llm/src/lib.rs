//! Natural-language commentary for sales metrics.
//!
//! Metrics are rendered into a deterministic prompt and sent to a
//! [`LanguageModel`]. [`InsightGenerator`] never fails: any backend error is
//! logged and replaced with static fallback text.

pub mod client;
pub mod config;
pub mod error;
pub mod generator;
pub mod prompt;

pub use client::{GeminiClient, LanguageModel};
pub use config::LlmConfig;
pub use error::LlmError;
pub use generator::{fallback_text, InsightGenerator, InsightKind, InsightRequest};
