//! LLM provider implementations for tidydesk.
//!
//! All providers implement the `tidydesk_core::Provider` trait, so the
//! control loop and the LLM-backed tools never see a concrete backend.

pub mod anthropic;

pub use anthropic::AnthropicProvider;
