/*!
 * Email verification domain.
 *
 * This module contains the normalized result types returned by the Truelist
 * API and the batch dispatcher that validates lists of addresses under the
 * remote service's rate ceiling:
 * - `verification::outcome`: normalized states and per-address outcomes
 * - `verification::batch`: grouped, concurrent batch validation
 */

pub mod batch;
pub mod outcome;

pub use batch::BatchValidator;
pub use outcome::{EmailState, EmailValidation, ValidationOutcome};
