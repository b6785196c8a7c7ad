/*!
 * # truelist-mcp
 *
 * A Rust MCP server exposing the Truelist email verification API.
 *
 * ## Features
 *
 * - Validate a single email address for deliverability
 * - Validate up to 50 addresses in one batch, dispatched in concurrent
 *   groups with a fixed delay between groups to respect the API rate ceiling
 * - Order-preserving, partial-failure-tolerant batch results
 * - Account info lookup
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `email_utils`: Syntactic email-format checking at the tool boundary
 * - `verification`: Normalized outcomes and the batch dispatcher:
 *   - `verification::outcome`: state normalization and per-address results
 *   - `verification::batch`: grouped concurrent validation
 * - `providers`: Client implementations for the verification service:
 *   - `providers::truelist`: Truelist API client
 * - `mcp`: The JSON-RPC 2.0 stdio protocol layer and tool surface
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod email_utils;
pub mod errors;
pub mod mcp;
pub mod providers;
pub mod verification;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ProviderError, ValidationError};
pub use mcp::{McpServer, ToolRouter};
pub use providers::{EmailVerifier, Truelist};
pub use verification::{BatchValidator, EmailState, EmailValidation, ValidationOutcome};
