/*!
 * Batch validation processing.
 *
 * This module contains the dispatcher that validates an ordered list of
 * addresses in fixed-size groups: members of a group run concurrently, groups
 * run strictly one after another with a fixed delay in between to stay under
 * the Truelist API's rate ceiling.
 */

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use log::{debug, warn};
use tokio::time::sleep;

use crate::email_utils::is_valid_email;
use crate::errors::ValidationError;
use crate::providers::EmailVerifier;

use super::outcome::ValidationOutcome;

/// Hard ceiling on addresses per batch call
pub const MAX_BATCH_EMAILS: usize = 50;

/// Batch validator for processing address lists in rate-limited groups
pub struct BatchValidator {
    /// The verification client to use
    verifier: Arc<dyn EmailVerifier>,

    /// Number of addresses verified concurrently per group
    batch_size: usize,

    /// Pause inserted before every group except the first
    batch_delay: Duration,
}

impl BatchValidator {
    /// Create a new batch validator
    pub fn new(verifier: Arc<dyn EmailVerifier>, batch_size: usize, batch_delay: Duration) -> Self {
        Self {
            verifier,
            // A zero group size would make no progress
            batch_size: batch_size.max(1),
            batch_delay,
        }
    }

    /// Validate a list of addresses, preserving input order
    ///
    /// Rejects the whole call before any remote request when the list is
    /// empty, exceeds [`MAX_BATCH_EMAILS`], or contains a syntactically
    /// malformed address. After dispatch starts, a failed remote call only
    /// affects its own slot in the result.
    ///
    /// # Returns
    /// * `Result<Vec<ValidationOutcome>, ValidationError>` - One outcome per
    ///   input address, in input order
    pub async fn validate_batch(
        &self,
        emails: &[String],
    ) -> Result<Vec<ValidationOutcome>, ValidationError> {
        Self::check_batch_input(emails)?;

        let total_groups = emails.len().div_ceil(self.batch_size);
        let mut indexed: Vec<(usize, ValidationOutcome)> = Vec::with_capacity(emails.len());

        for (group_idx, group) in emails.chunks(self.batch_size).enumerate() {
            // The delay between groups is the sole rate-limiting mechanism
            if group_idx > 0 && !self.batch_delay.is_zero() {
                sleep(self.batch_delay).await;
            }

            debug!(
                "Validating group {} of {} ({} addresses)",
                group_idx + 1,
                total_groups,
                group.len()
            );

            let base_index = group_idx * self.batch_size;
            let group_results = join_all(group.iter().enumerate().map(|(offset, email)| {
                let verifier = Arc::clone(&self.verifier);
                async move {
                    let outcome = match verifier.validate(email).await {
                        Ok(validation) => {
                            ValidationOutcome::from_validation(email.as_str(), &validation)
                        }
                        Err(e) => {
                            warn!("Validation of {} failed: {}", email, e);
                            ValidationOutcome::failed(email.as_str(), e.to_string())
                        }
                    };
                    (base_index + offset, outcome)
                }
            }))
            .await;

            indexed.extend(group_results);
        }

        // Reassemble by original position, not completion order
        indexed.sort_by_key(|(index, _)| *index);
        Ok(indexed.into_iter().map(|(_, outcome)| outcome).collect())
    }

    /// Reject schema violations before any remote call is made
    fn check_batch_input(emails: &[String]) -> Result<(), ValidationError> {
        if emails.is_empty() {
            return Err(ValidationError::EmptyBatch);
        }

        if emails.len() > MAX_BATCH_EMAILS {
            return Err(ValidationError::BatchTooLarge {
                count: emails.len(),
                max: MAX_BATCH_EMAILS,
            });
        }

        if let Some(bad) = emails.iter().find(|email| !is_valid_email(email)) {
            return Err(ValidationError::InvalidEmail(bad.clone()));
        }

        Ok(())
    }
}
