/*!
 * Client implementations for the remote verification service.
 *
 * This module contains the `EmailVerifier` trait that the batch dispatcher
 * and the tool layer depend on, plus the Truelist HTTP client implementing it:
 * - `providers::truelist`: Truelist API client
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;
use crate::verification::EmailValidation;

/// Capability interface over the remote verification service
///
/// The dispatcher only needs "validate one address" and "fetch account info";
/// abstracting them behind a trait lets tests substitute a scripted verifier
/// for the HTTP client.
#[async_trait]
pub trait EmailVerifier: Send + Sync + Debug {
    /// Verify a single address
    ///
    /// # Arguments
    /// * `email` - The address to verify; callers must have checked its syntax
    ///
    /// # Returns
    /// * `Result<EmailValidation, ProviderError>` - The normalized verification
    ///   record or a provider failure
    async fn validate(&self, email: &str) -> Result<EmailValidation, ProviderError>;

    /// Fetch account information for the configured API key
    ///
    /// The response is passed through untransformed.
    async fn account(&self) -> Result<serde_json::Value, ProviderError>;
}

pub mod truelist;

pub use truelist::Truelist;
