//! Per-field validation rules.
//!
//! Each field has exactly one rule: whether it is required, and a predicate
//! over its non-empty value. Lengths are counted in characters.

use serde::Serialize;
use thiserror::Error;

use super::{Field, ResponseType};

pub const PHONE_MIN_LEN: usize = 10;
pub const PHONE_MAX_LEN: usize = 20;
pub const CREDENTIAL_LEN: usize = 51;
pub const OFFER_MIN_LEN: usize = 150;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldError {
    #[error("required")]
    Required,

    #[error("pattern mismatch")]
    PatternMismatch,

    #[error("shorter than {min} characters")]
    TooShort { min: usize },

    #[error("longer than {max} characters")]
    TooLong { max: usize },

    #[error("must be exactly {expected} characters")]
    WrongLength { expected: usize },

    #[error("unknown choice")]
    UnknownChoice,
}

/// Derived state of one field, as exposed through `aria-invalid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "error", rename_all = "snake_case")]
pub enum Validity {
    /// Empty and not flagged yet.
    Pristine,
    Valid,
    Invalid(FieldError),
}

impl Validity {
    pub fn aria_invalid(&self) -> &'static str {
        match self {
            Validity::Pristine => "",
            Validity::Valid => "false",
            Validity::Invalid(_) => "true",
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Validity::Invalid(_))
    }
}

pub struct FieldRule {
    pub field: Field,
    pub required: bool,
    check: fn(&str) -> Result<(), FieldError>,
}

impl FieldRule {
    /// Applies the rule to a raw value. Empty optional values always pass.
    pub fn check(&self, value: &str) -> Result<(), FieldError> {
        if is_blank(self.field, value) {
            return if self.required {
                Err(FieldError::Required)
            } else {
                Ok(())
            };
        }
        (self.check)(value)
    }
}

pub static RULES: [FieldRule; 5] = [
    FieldRule {
        field: Field::Name,
        required: true,
        check: accept,
    },
    FieldRule {
        field: Field::Phone,
        required: false,
        check: check_phone,
    },
    FieldRule {
        field: Field::Credential,
        required: true,
        check: check_credential,
    },
    FieldRule {
        field: Field::OfferText,
        required: true,
        check: check_offer_text,
    },
    FieldRule {
        field: Field::ResponseType,
        required: true,
        check: check_response_type,
    },
];

pub fn rule(field: Field) -> &'static FieldRule {
    match field {
        Field::Name => &RULES[0],
        Field::Phone => &RULES[1],
        Field::Credential => &RULES[2],
        Field::OfferText => &RULES[3],
        Field::ResponseType => &RULES[4],
    }
}

pub fn check(field: Field, value: &str) -> Result<(), FieldError> {
    rule(field).check(value)
}

/// Validity of a field after a change.
///
/// A required field left empty only turns invalid once a submission was attempted.
pub fn evaluate(field: Field, value: &str, submitted: bool) -> Validity {
    if is_blank(field, value) && !(submitted && rule(field).required) {
        return Validity::Pristine;
    }
    match check(field, value) {
        Ok(()) => Validity::Valid,
        Err(e) => Validity::Invalid(e),
    }
}

// A name of only spaces is as good as no name.
fn is_blank(field: Field, value: &str) -> bool {
    match field {
        Field::Name => value.trim().is_empty(),
        _ => value.is_empty(),
    }
}

fn accept(_: &str) -> Result<(), FieldError> {
    Ok(())
}

fn check_phone(value: &str) -> Result<(), FieldError> {
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(FieldError::PatternMismatch);
    }
    let len = value.chars().count();
    if len < PHONE_MIN_LEN {
        return Err(FieldError::TooShort { min: PHONE_MIN_LEN });
    }
    if len > PHONE_MAX_LEN {
        return Err(FieldError::TooLong { max: PHONE_MAX_LEN });
    }
    Ok(())
}

fn check_credential(value: &str) -> Result<(), FieldError> {
    if value.chars().count() != CREDENTIAL_LEN {
        return Err(FieldError::WrongLength {
            expected: CREDENTIAL_LEN,
        });
    }
    Ok(())
}

fn check_offer_text(value: &str) -> Result<(), FieldError> {
    if value.chars().count() < OFFER_MIN_LEN {
        return Err(FieldError::TooShort { min: OFFER_MIN_LEN });
    }
    Ok(())
}

fn check_response_type(value: &str) -> Result<(), FieldError> {
    value.parse::<ResponseType>().map(|_| ())
}
