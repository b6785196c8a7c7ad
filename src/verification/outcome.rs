use serde::{Deserialize, Serialize};

/// Sub-state recorded on outcomes that carry a transport or API failure
pub const UNKNOWN_ERROR_SUB_STATE: &str = "unknown_error";

/// Verification state of an email address
///
/// The Truelist API has shipped two state vocabularies over time
/// (`ok`/`email_invalid` and `valid`/`invalid`). Both are normalized to this
/// enum on deserialization; anything unrecognized becomes `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum EmailState {
    /// The mailbox exists and accepts mail
    Ok,
    /// The address is undeliverable
    EmailInvalid,
    /// The mailbox exists but delivery is uncertain (e.g. full inbox)
    Risky,
    /// The domain accepts mail for any address, so existence is unproven
    AcceptAll,
    /// Verification did not produce a usable answer
    Unknown,
}

impl From<String> for EmailState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ok" | "valid" => Self::Ok,
            "email_invalid" | "invalid" => Self::EmailInvalid,
            "risky" => Self::Risky,
            "accept_all" => Self::AcceptAll,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for EmailState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Ok => "ok",
            Self::EmailInvalid => "email_invalid",
            Self::Risky => "risky",
            Self::AcceptAll => "accept_all",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

impl EmailState {
    /// Whether the address is confirmed deliverable
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Whether mail sent to the address is likely to arrive
    ///
    /// Includes the uncertain-but-acceptable states alongside the fully
    /// confirmed one.
    pub fn is_deliverable(&self) -> bool {
        matches!(self, Self::Ok | Self::Risky | Self::AcceptAll)
    }
}

/// One verified address as returned by the Truelist API
///
/// Field aliases reconcile the two API variants so the rest of the crate
/// only ever sees one shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailValidation {
    /// The address that was verified
    #[serde(alias = "email")]
    pub address: String,

    /// Verification state
    #[serde(alias = "state")]
    pub email_state: EmailState,

    /// Detail under the state (e.g. "email_ok", "mailbox_full")
    #[serde(alias = "sub_state", default)]
    pub email_sub_state: String,

    /// Suggested correction for a likely typo
    #[serde(default)]
    pub suggestion: Option<String>,

    /// Domain part of the address
    #[serde(default)]
    pub domain: Option<String>,

    /// Canonical (normalized) form of the address
    #[serde(default)]
    pub canonical: Option<String>,

    /// Best MX record found for the domain
    #[serde(default)]
    pub mx_record: Option<String>,

    /// First name inferred from the local part
    #[serde(default)]
    pub first_name: Option<String>,

    /// Last name inferred from the local part
    #[serde(default)]
    pub last_name: Option<String>,

    /// Timestamp of the verification
    #[serde(default)]
    pub verified_at: Option<String>,

    /// Whether the domain is a free mail provider
    #[serde(default)]
    pub free_email: Option<bool>,

    /// Whether the local part looks like a role account (info@, sales@)
    #[serde(default)]
    pub role: Option<bool>,

    /// Whether the domain is a disposable-mail provider
    #[serde(default)]
    pub disposable: Option<bool>,
}

/// Normalized per-address result of a batch validation
///
/// The batch dispatcher guarantees one outcome per input address, in input
/// order. A failed remote call is recorded in `error` instead of aborting
/// the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// The address this outcome belongs to
    pub email: String,

    /// Verification state
    pub state: EmailState,

    /// Detail under the state
    pub sub_state: String,

    /// Whether the address is confirmed deliverable
    pub is_valid: bool,

    /// Human-readable cause when the remote call for this address failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationOutcome {
    /// Build an outcome from a successful verification
    pub fn from_validation(email: impl Into<String>, validation: &EmailValidation) -> Self {
        Self {
            email: email.into(),
            state: validation.email_state,
            sub_state: validation.email_sub_state.clone(),
            is_valid: validation.email_state.is_valid(),
            error: None,
        }
    }

    /// Build the sentinel outcome for an address whose remote call failed
    pub fn failed(email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            state: EmailState::Unknown,
            sub_state: UNKNOWN_ERROR_SUB_STATE.to_string(),
            is_valid: false,
            error: Some(message.into()),
        }
    }
}
