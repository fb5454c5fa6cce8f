//! Checks run on typed values once they were deserialized.

/// A value that can verify its own consistency after decoding.
///
/// Typed configuration ([`ConfigValue::parse_validated`](crate::ConfigValue::parse_validated))
/// and typed service requests are validated before use. The default method
/// accepts everything, so `impl Validate for Foo {}` is enough for a type
/// without extra rules.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
