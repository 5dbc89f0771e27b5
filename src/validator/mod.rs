//! Address format checking.
//!
//! The grammar is a deliberately small subset of RFC 5322: an ASCII local
//! part, dotted domain labels, and an alphabetic TLD of at least two
//! characters. Anything fancier (quoted locals, IDN, address literals) is
//! rejected up front so the network stages only ever see plain addresses.

mod types;

pub use types::EmailParts;

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// Returns `true` when `email` matches the supported address grammar.
pub fn is_valid_format(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Splits a well-formed address into its local part and lower-cased domain.
///
/// Returns `None` when the address does not match the grammar, so callers
/// never have to handle a half-parsed address.
pub fn parse_email(email: &str) -> Option<EmailParts> {
    if !is_valid_format(email) {
        return None;
    }
    // The grammar guarantees exactly one '@'.
    let (local, domain) = email.split_once('@')?;
    Some(EmailParts {
        local: local.to_string(),
        domain: domain.to_ascii_lowercase(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_basic() {
        assert!(is_valid_format("alice@example.com"));
    }

    #[test]
    fn accepts_plus_and_dots() {
        assert!(is_valid_format("first.last+tag@mail.example.org"));
        assert!(is_valid_format("user_name%x@sub.example.co"));
    }

    #[test]
    fn rejects_not_an_email() {
        assert!(!is_valid_format("not-an-email"));
    }

    #[test]
    fn rejects_missing_tld() {
        assert!(!is_valid_format("user@localhost"));
        assert!(!is_valid_format("user@example.c"));
    }

    #[test]
    fn rejects_empty_local_and_spaces() {
        assert!(!is_valid_format("@example.com"));
        assert!(!is_valid_format("us er@example.com"));
        assert!(!is_valid_format(""));
    }

    #[test]
    fn rejects_unicode_local() {
        assert!(!is_valid_format("péché@example.com"));
    }

    #[test]
    fn parse_lowercases_domain() {
        let parts = parse_email("Alice@EXAMPLE.Com").expect("valid address");
        assert_eq!(parts.local, "Alice");
        assert_eq!(parts.domain, "example.com");
    }

    #[test]
    fn parse_rejects_invalid() {
        assert!(parse_email("nope").is_none());
        assert!(parse_email("a@b@example.com").is_none());
    }
}
