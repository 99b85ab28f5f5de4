use std::fmt;

use serde::Serialize;

use crate::domain::validation::ValidationError;

const RESERVED_PATH_CHARS: [char; 3] = ['/', '?', '#'];

fn non_empty_trimmed(value: String, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}

/// Identifiers end up as a single URL path segment, so dot-segments are
/// rejected too.
fn path_segment(value: String, field: &'static str) -> Result<String, ValidationError> {
    let value = non_empty_trimmed(value, field)?;
    if value.contains(RESERVED_PATH_CHARS) || value == "." || value == ".." {
        return Err(ValidationError::InvalidIdentifier { field, input: value });
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Esendex login, usually the account e-mail address.
///
/// Invariant: non-empty after trimming.
pub struct Username(String);

impl Username {
    pub const FIELD: &'static str = "username";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        non_empty_trimmed(value.into(), Self::FIELD).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Esendex password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
/// Account reference (for example `EX0000000`) scoping operations to one account.
///
/// Invariant: non-empty after trimming and usable as a URL path segment.
pub struct AccountReference(String);

impl AccountReference {
    pub const FIELD: &'static str = "account reference";

    /// Create a validated [`AccountReference`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        path_segment(value.into(), Self::FIELD).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Message header id, as returned by listings and by the dispatcher.
///
/// Invariant: non-empty after trimming and usable as a URL path segment.
pub struct MessageId(String);

impl MessageId {
    pub const FIELD: &'static str = "message id";

    /// Create a validated [`MessageId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        path_segment(value.into(), Self::FIELD).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Message batch id.
///
/// Invariant: non-empty after trimming and usable as a URL path segment.
pub struct BatchId(String);

impl BatchId {
    pub const FIELD: &'static str = "batch id";

    /// Create a validated [`BatchId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        path_segment(value.into(), Self::FIELD).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Recipient address as sent to Esendex (`to`).
///
/// Invariant: non-empty after trimming. No phone number normalisation is done;
/// Esendex accepts national and international formats.
pub struct Recipient(String);

impl Recipient {
    pub const FIELD: &'static str = "to";

    /// Create a validated (non-empty) recipient.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        non_empty_trimmed(value.into(), Self::FIELD).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Message text (`body`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    pub const FIELD: &'static str = "body";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
