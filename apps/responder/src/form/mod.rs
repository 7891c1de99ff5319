//! Form State Holder — field values, one validation rule per field, derived validity.

pub mod rules;
pub mod state;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use rules::{FieldError, Validity};
pub use state::FormState;

/// The five inputs of the offer form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Phone,
    Credential,
    OfferText,
    ResponseType,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Phone,
        Field::Credential,
        Field::OfferText,
        Field::ResponseType,
    ];

    /// Key used by the HTML form and the JSON API.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Phone => "tel",
            Field::Credential => "api_key",
            Field::OfferText => "offer",
            Field::ResponseType => "offer_type",
        }
    }

    /// Inline message shown under the field when it is invalid.
    pub fn error_message(self) -> &'static str {
        match self {
            Field::Name => "Veuillez saisir votre nom",
            Field::Phone => "Numéro invalide (10 à 20 chiffres)",
            Field::Credential => "API Key invalide",
            Field::OfferText => "Veuillez saisir un appel d'offre (150 caractères minimum)",
            Field::ResponseType => "Veuillez choisir un type de réponse",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.key() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// How the sender wants to follow up on the offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseType {
    #[serde(rename = "Devis")]
    Quote,
    #[serde(rename = "Appel")]
    Call,
}

impl FromStr for ResponseType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Devis" => Ok(ResponseType::Quote),
            "Appel" => Ok(ResponseType::Call),
            _ => Err(FieldError::UnknownChoice),
        }
    }
}

/// Raw form values exactly as typed.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormData {
    pub name: String,
    #[serde(rename = "tel")]
    pub phone: String,
    #[serde(rename = "api_key")]
    pub credential: String,
    #[serde(rename = "offer")]
    pub offer_text: String,
    #[serde(rename = "offer_type")]
    pub response_type: String,
}

impl FormData {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Phone => &self.phone,
            Field::Credential => &self.credential,
            Field::OfferText => &self.offer_text,
            Field::ResponseType => &self.response_type,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Phone => &mut self.phone,
            Field::Credential => &mut self.credential,
            Field::OfferText => &mut self.offer_text,
            Field::ResponseType => &mut self.response_type,
        }
    }

    /// Checks every field and returns the typed form, or every violation found.
    pub fn validate(&self) -> Result<ValidForm, FormErrors> {
        let errors: Vec<FieldViolation> = Field::ALL
            .into_iter()
            .filter_map(|field| {
                rules::check(field, self.get(field))
                    .err()
                    .map(|error| FieldViolation { field, error })
            })
            .collect();

        if !errors.is_empty() {
            return Err(FormErrors(errors));
        }

        // Every rule passed, so the choice parses.
        let response_type = self
            .response_type
            .parse::<ResponseType>()
            .map_err(|error| {
                FormErrors(vec![FieldViolation {
                    field: Field::ResponseType,
                    error,
                }])
            })?;

        Ok(ValidForm {
            name: self.name.clone(),
            phone: (!self.phone.is_empty()).then(|| self.phone.clone()),
            credential: self.credential.clone(),
            offer_text: self.offer_text.clone(),
            response_type,
        })
    }
}

// The credential is a bearer secret; keep it out of logs.
impl fmt::Debug for FormData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormData")
            .field("name", &self.name)
            .field("phone", &self.phone)
            .field("credential", &mask(&self.credential))
            .field("offer_text", &self.offer_text)
            .field("response_type", &self.response_type)
            .finish()
    }
}

/// A form that passed every rule. Only this type can be turned into a prompt.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidForm {
    pub name: String,
    pub phone: Option<String>,
    pub credential: String,
    pub offer_text: String,
    pub response_type: ResponseType,
}

impl fmt::Debug for ValidForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidForm")
            .field("name", &self.name)
            .field("phone", &self.phone)
            .field("credential", &mask(&self.credential))
            .field("offer_text", &self.offer_text)
            .field("response_type", &self.response_type)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: Field,
    pub error: FieldError,
}

/// Every rule violation found in one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(pub Vec<FieldViolation>);

impl FormErrors {
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.iter().find(|v| v.field == field).map(|v| &v.error)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.iter().map(|v| v.field)
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|v| format!("{}: {}", v.field, v.error))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

/// Bullets of the same length as the secret, for display and logs.
pub fn mask(secret: &str) -> String {
    "•".repeat(secret.chars().count())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::FormData;

    pub fn credential() -> String {
        "x".repeat(51)
    }

    pub fn offer_text() -> String {
        "Nous recherchons un développeur Rust pour une mission de six mois sur une plateforme \
         de paiement. Télétravail possible, démarrage rapide, équipe de cinq personnes."
            .to_string()
    }

    pub fn call_form() -> FormData {
        FormData {
            name: "Alice".to_string(),
            phone: String::new(),
            credential: credential(),
            offer_text: offer_text(),
            response_type: "Appel".to_string(),
        }
    }
}
