//! Full address checks: format → MX resolution → SMTP probe → one
//! [`ValidationResult`] per address, plus a bounded worker pool for batches.
//!
//! [`validate`] is total: every failure mode, including resolver setup
//! errors and worker panics, ends up as a status on the result instead of
//! an `Err`. A batch of N addresses always yields exactly N results.

mod batch;
mod types;

pub use batch::validate_batch;
pub use types::{CheckOptions, CheckStatus, ValidationResult};

use std::io;

use tracing::warn;
use trust_dns_resolver::Resolver;
use trust_dns_resolver::error::ResolveErrorKind;
use trust_dns_resolver::proto::op::ResponseCode;

use crate::mx::{self, MxRecord, MxStatus};
use crate::smtp::{MailboxSignal, probe_mailbox};
use crate::validator::parse_email;

/// Checks a single address end to end against the system resolver.
pub fn validate(email: &str, options: &CheckOptions) -> ValidationResult {
    validate_with(email, options, Resolver::from_system_conf)
}

pub(crate) fn validate_with<R, F>(email: &str, options: &CheckOptions, make_resolver: F) -> ValidationResult
where
    R: mx::LookupMx,
    F: FnOnce() -> io::Result<R>,
{
    let Some(parts) = parse_email(email) else {
        return ValidationResult::new(email, CheckStatus::InvalidFormat, "malformed email address");
    };

    let resolver = match make_resolver() {
        Ok(resolver) => resolver,
        Err(err) => {
            warn!(error = %err, "resolver initialization failed");
            return ValidationResult::new(
                email,
                CheckStatus::CheckError,
                format!("resolver initialization failed: {err}"),
            );
        }
    };

    let records = match mx::resolve_with(&resolver, &parts.domain) {
        Ok(MxStatus::Records(records)) => records,
        Ok(MxStatus::NoRecords) => {
            return ValidationResult::new(
                email,
                CheckStatus::NoMx,
                format!("no MX records for domain {}", parts.domain),
            );
        }
        Err(err) => return classify_lookup_failure(email, &parts.domain, &err),
    };

    probe_and_aggregate(email, &parts.domain, &records, options)
}

fn probe_and_aggregate(
    email: &str,
    domain: &str,
    records: &[MxRecord],
    options: &CheckOptions,
) -> ValidationResult {
    let hosts = records
        .iter()
        .map(|record| record.exchange.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    match probe_mailbox(email, records, &options.probe) {
        MailboxSignal::Accepted { exchange, .. } => ValidationResult::new(
            email,
            CheckStatus::UserExists,
            format!("domain {domain} has MX records: {hosts}; mailbox accepted by {exchange}"),
        ),
        MailboxSignal::Inconclusive => ValidationResult::new(
            email,
            CheckStatus::DomainValid,
            format!(
                "domain {domain} has MX records: {hosts}; mailbox existence could not be confirmed"
            ),
        ),
    }
}

/// Maps an MX lookup failure onto a status.
///
/// The resolver's response code is the only signal separating "domain does
/// not exist" (NXDOMAIN) from "domain exists but publishes no MX"; anything
/// transient lands in the same "unavailable" family after being logged.
fn classify_lookup_failure(email: &str, domain: &str, err: &mx::Error) -> ValidationResult {
    if let mx::Error::Lookup { source } = err {
        if let ResolveErrorKind::NoRecordsFound { response_code, .. } = source.kind() {
            return classify_empty_answer(email, domain, *response_code);
        }
    }
    warn!(domain, error = %err, "MX lookup failed");
    ValidationResult::new(
        email,
        CheckStatus::NoMx,
        format!("MX lookup for {domain} failed: {err}"),
    )
}

fn classify_empty_answer(email: &str, domain: &str, response_code: ResponseCode) -> ValidationResult {
    if response_code == ResponseCode::NXDomain {
        ValidationResult::new(
            email,
            CheckStatus::NoDomain,
            format!("domain {domain} does not exist (no MX records)"),
        )
    } else {
        ValidationResult::new(
            email,
            CheckStatus::NoMx,
            format!("no MX records for domain {domain}"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mx::MxRecord;
    use trust_dns_resolver::error::ResolveError;

    struct Stub(Box<dyn Fn(&str) -> Result<Vec<MxRecord>, ResolveError>>);

    impl mx::LookupMx for Stub {
        fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError> {
            (self.0)(domain)
        }
    }

    fn check_with_stub<F>(email: &str, lookup: F) -> ValidationResult
    where
        F: Fn(&str) -> Result<Vec<MxRecord>, ResolveError> + 'static,
    {
        validate_with(email, &CheckOptions::default(), || Ok(Stub(Box::new(lookup))))
    }

    #[test]
    fn invalid_format_short_circuits() {
        // The stub panics on use: an invalid address must never reach DNS.
        let result = check_with_stub("not-an-email", |_| panic!("lookup must not run"));
        assert_eq!(result.status, CheckStatus::InvalidFormat);
        assert_eq!(result.email, "not-an-email");
    }

    #[test]
    fn empty_answer_maps_to_no_mx() {
        let result = check_with_stub("user@example.com", |_| Ok(Vec::new()));
        assert_eq!(result.status, CheckStatus::NoMx);
        assert!(result.details.contains("example.com"));
    }

    #[test]
    fn nxdomain_maps_to_no_domain() {
        let result =
            classify_empty_answer("user@no-such.example", "no-such.example", ResponseCode::NXDomain);
        assert_eq!(result.status, CheckStatus::NoDomain);
        assert!(result.details.contains("does not exist"));
        assert!(result.details.contains("no MX records"));
    }

    #[test]
    fn empty_no_records_answer_maps_to_no_mx() {
        let result =
            classify_empty_answer("user@example.com", "example.com", ResponseCode::NoError);
        assert_eq!(result.status, CheckStatus::NoMx);
        assert!(result.details.contains("no MX records for domain example.com"));
    }

    #[test]
    fn transient_resolver_error_maps_to_no_mx() {
        let result =
            check_with_stub("user@example.com", |_| Err(ResolveError::from("timeout")));
        assert_eq!(result.status, CheckStatus::NoMx);
        assert!(result.details.contains("failed"));
    }

    #[test]
    fn lowercased_domain_reaches_the_resolver() {
        let result = check_with_stub("user@EXAMPLE.com", |domain| {
            assert_eq!(domain, "example.com");
            Ok(Vec::new())
        });
        assert_eq!(result.status, CheckStatus::NoMx);
    }
}
