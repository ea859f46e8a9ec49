//! Core components of the `nepse-sentiment` crate.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The HTTP [`NepseClient`] and its builder.
//! - The primary [`NepseError`] type.
//! - Bounded retry policies shared by fetchers and the translation step.
//! - Date and URL conversions used across stages.

/// The HTTP client (`NepseClient`), builder, and retry configuration.
pub mod client;
/// Date parsing, timestamp and source-domain helpers.
pub mod conversions;
/// The primary error type (`NepseError`) for the crate.
pub mod error;
pub(crate) mod net;
pub(crate) mod wire;

// convenient re-exports so most code can just `use crate::core::NepseClient`
pub use client::{Backoff, NepseClient, NepseClientBuilder, RetryConfig};
pub use error::NepseError;
