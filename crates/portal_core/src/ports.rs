//! crates/portal_core/src/ports.rs
//!
//! Defines the service contracts (traits) the portal core depends on.
//! The only outbound dependency is the generative-AI completion service; the
//! concrete client lives in the `portal` service crate.

use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external providers.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// No credential is configured, so the provider was never contacted.
    #[error("Service unavailable: no API credential configured")]
    Unavailable,
    /// The provider or the transport failed.
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait ChatCompletionService: Send + Sync {
    /// Produces a single full reply to `prompt` under the given system instruction.
    /// An empty string means the provider answered without any text.
    async fn complete(&self, system_instruction: &str, prompt: &str) -> PortResult<String>;
}
