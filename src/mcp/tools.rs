//! Tool definitions and call routing.
//!
//! The three tools exposed by this server are thin surfaces over the
//! verification domain: `validate_email` and `check_account` pass through to
//! the Truelist client, `validate_emails` runs the batch dispatcher. Input
//! schema violations surface as protocol errors; remote failures surface as
//! tool-result errors (single tool) or in-band outcome slots (batch tool).

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::app_config::Config;
use crate::email_utils::is_valid_email;
use crate::errors::ValidationError;
use crate::providers::EmailVerifier;
use crate::verification::{BatchValidator, EmailValidation};

use super::protocol::{CallToolResult, ToolDefinition};

/// Errors that abort a `tools/call` request before or instead of a tool result
#[derive(Error, Debug)]
pub enum ToolCallError {
    /// The requested tool is not registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The arguments did not match the tool's input schema
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// The server failed to serialize its own result
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for ToolCallError {
    fn from(error: ValidationError) -> Self {
        Self::InvalidParams(error.to_string())
    }
}

/// Arguments of the `validate_email` tool
#[derive(Debug, Deserialize)]
struct ValidateEmailParams {
    email: String,
}

/// Arguments of the `validate_emails` tool
#[derive(Debug, Deserialize)]
struct ValidateEmailsParams {
    emails: Vec<String>,
}

/// Routes `tools/call` requests to the verification domain
pub struct ToolRouter {
    /// Truelist client handle, shared with the dispatcher
    verifier: Arc<dyn EmailVerifier>,

    /// Batch dispatcher for `validate_emails`
    batch: BatchValidator,
}

impl ToolRouter {
    /// Create a router over a verifier handle, tuned from the configuration
    pub fn new(verifier: Arc<dyn EmailVerifier>, config: &Config) -> Self {
        let batch = BatchValidator::new(
            Arc::clone(&verifier),
            config.batch.batch_size,
            config.batch.batch_delay(),
        );
        Self { verifier, batch }
    }

    /// The tools advertised by `tools/list`
    pub fn definitions() -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                name: "validate_email",
                description: "Validate an email address for deliverability using Truelist. \
                    Returns state (ok/email_invalid/risky/accept_all/unknown), sub_state, and \
                    metadata like domain, canonical, mx_record, first_name, last_name, and \
                    verified_at.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "email": {
                            "type": "string",
                            "description": "The email address to validate"
                        }
                    },
                    "required": ["email"]
                }),
            },
            ToolDefinition {
                name: "validate_emails",
                description: "Validate multiple email addresses for deliverability in a single \
                    batch. Returns an array of results with state and sub_state for each email. \
                    Maximum 50 emails per request.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "emails": {
                            "type": "array",
                            "items": { "type": "string" },
                            "minItems": 1,
                            "maxItems": 50,
                            "description": "The email addresses to validate"
                        }
                    },
                    "required": ["emails"]
                }),
            },
            ToolDefinition {
                name: "check_account",
                description: "Check your Truelist account info including name, email, plan, and \
                    admin status.",
                input_schema: json!({
                    "type": "object",
                    "properties": {}
                }),
            },
        ]
    }

    /// Execute a tool by name
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<&Value>,
    ) -> Result<CallToolResult, ToolCallError> {
        match name {
            "validate_email" => self.validate_email(arguments).await,
            "validate_emails" => self.validate_emails(arguments).await,
            "check_account" => self.check_account().await,
            other => Err(ToolCallError::UnknownTool(other.to_string())),
        }
    }

    /// Single-address passthrough to the Truelist client
    async fn validate_email(&self, arguments: Option<&Value>) -> Result<CallToolResult, ToolCallError> {
        let params: ValidateEmailParams = parse_arguments(arguments)?;

        if !is_valid_email(&params.email) {
            return Err(ToolCallError::InvalidParams(format!(
                "Invalid email address: {}",
                params.email
            )));
        }

        match self.verifier.validate(&params.email).await {
            Ok(validation) => {
                let report = single_report(&params.email, &validation);
                Ok(CallToolResult::text(pretty(&report)?))
            }
            Err(e) => Ok(CallToolResult::error_text(e.to_string())),
        }
    }

    /// Batch validation through the dispatcher
    async fn validate_emails(&self, arguments: Option<&Value>) -> Result<CallToolResult, ToolCallError> {
        let params: ValidateEmailsParams = parse_arguments(arguments)?;

        let outcomes = self.batch.validate_batch(&params.emails).await?;
        Ok(CallToolResult::text(pretty(&outcomes)?))
    }

    /// Account info passthrough
    async fn check_account(&self) -> Result<CallToolResult, ToolCallError> {
        match self.verifier.account().await {
            Ok(account) => Ok(CallToolResult::text(pretty(&account)?)),
            Err(e) => Ok(CallToolResult::error_text(e.to_string())),
        }
    }
}

/// Deserialize tool arguments, treating absence as an empty object
fn parse_arguments<T: serde::de::DeserializeOwned>(
    arguments: Option<&Value>,
) -> Result<T, ToolCallError> {
    let value = arguments.cloned().unwrap_or_else(|| json!({}));
    serde_json::from_value(value).map_err(|e| ToolCallError::InvalidParams(e.to_string()))
}

/// Serialize a tool result the way hosts display it
fn pretty<T: serde::Serialize>(value: &T) -> Result<String, ToolCallError> {
    serde_json::to_string_pretty(value).map_err(|e| ToolCallError::Internal(e.to_string()))
}

/// Full report for a single verified address, including the derived flags
fn single_report(email: &str, validation: &EmailValidation) -> Value {
    json!({
        "email": email,
        "state": validation.email_state,
        "sub_state": validation.email_sub_state,
        "suggestion": validation.suggestion,
        "domain": validation.domain,
        "canonical": validation.canonical,
        "mx_record": validation.mx_record,
        "first_name": validation.first_name,
        "last_name": validation.last_name,
        "verified_at": validation.verified_at,
        "is_valid": validation.email_state.is_valid(),
        "is_deliverable": validation.email_state.is_deliverable(),
    })
}
