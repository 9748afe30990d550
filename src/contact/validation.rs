//! Field constraints shared by every store backend.

use std::fmt;

use super::{ContactInput, NewContact};

pub const MIN_NAME_LEN: usize = 3;
pub const MIN_NUMBER_LEN: usize = 8;

/// A single failed constraint on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn too_short(field: &'static str, value: &str, min: usize) -> Self {
        Self {
            field,
            message: format!(
                "Path `{}` (`{}`) is shorter than the minimum allowed length ({}).",
                field, value, min
            ),
        }
    }

    pub fn not_unique(field: &'static str, value: &str) -> Self {
        Self {
            field,
            message: format!(
                "Error, expected `{}` to be unique. Value: `{}`",
                field, value
            ),
        }
    }
}

/// One or more constraint violations on a contact write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn single(error: FieldError) -> Self {
        Self::new(vec![error])
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// True if any violation concerns `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Person validation failed: ")?;
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Check the minimum lengths of `name` and `number`.
///
/// Lengths count characters, not bytes. Uniqueness is checked by the store.
pub fn validate(contact: &NewContact) -> Result<(), ValidationError> {
    check_lengths(Some(contact.name.as_str()), Some(contact.number.as_str()))
}

/// Check an update body. Absent fields carry no length to check.
pub fn validate_replacement(input: &ContactInput) -> Result<(), ValidationError> {
    check_lengths(input.name.as_deref(), input.number.as_deref())
}

fn check_lengths(name: Option<&str>, number: Option<&str>) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    if let Some(name) = name.filter(|n| n.chars().count() < MIN_NAME_LEN) {
        errors.push(FieldError::too_short("name", name, MIN_NAME_LEN));
    }
    if let Some(number) = number.filter(|n| n.chars().count() < MIN_NUMBER_LEN) {
        errors.push(FieldError::too_short("number", number, MIN_NUMBER_LEN));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(errors))
    }
}
