#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailParts {
    pub local: String,
    /// Lower-cased domain, as used for DNS lookups.
    pub domain: String,
}
