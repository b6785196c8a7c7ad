use once_cell::sync::Lazy;
use regex::Regex;

/// Email address utilities
///
/// This module provides the syntactic email-format check applied at the tool
/// boundary. Addresses that fail here are rejected before any request is sent
/// to the Truelist API.
/// Maximum length of the local part per RFC 5321
const MAX_LOCAL_PART_LEN: usize = 64;

/// Maximum length of a full address per RFC 5321
const MAX_ADDRESS_LEN: usize = 254;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // Pragmatic subset of RFC 5322: dot-atom local part, dotted domain with
    // an alphabetic TLD. Quoted local parts and domain literals are not
    // accepted; the remote service rejects them as well.
    Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$")
        .expect("email pattern is valid")
});

/// Check whether an address is syntactically acceptable for verification
pub fn is_valid_email(address: &str) -> bool {
    if address.len() > MAX_ADDRESS_LEN {
        return false;
    }

    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > MAX_LOCAL_PART_LEN {
        return false;
    }

    // Each domain label is capped at 63 octets
    if domain.split('.').any(|label| label.len() > 63) {
        return false;
    }

    EMAIL_PATTERN.is_match(address)
}

/// Return the domain part of an address, if present
pub fn email_domain(address: &str) -> Option<&str> {
    address.rsplit_once('@').map(|(_, domain)| domain)
}
