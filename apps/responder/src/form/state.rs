use std::collections::BTreeMap;

use super::rules::{self, Validity};
use super::{Field, FormData, FormErrors, ValidForm};

/// Current field values plus their derived validity.
///
/// Validity is recomputed on every change; nothing else happens on a change.
#[derive(Debug, Clone)]
pub struct FormState {
    data: FormData,
    validity: BTreeMap<Field, Validity>,
    submitted: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        let mut state = Self {
            data: FormData::default(),
            validity: BTreeMap::new(),
            submitted: false,
        };
        state.recompute_all();
        state
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn value(&self, field: Field) -> &str {
        self.data.get(field)
    }

    pub fn validity(&self, field: Field) -> &Validity {
        // Every field is populated by recompute_all.
        self.validity.get(&field).unwrap_or(&Validity::Pristine)
    }

    pub fn validities(&self) -> &BTreeMap<Field, Validity> {
        &self.validity
    }

    pub fn submitted(&self) -> bool {
        self.submitted
    }

    /// Sets one field and returns its recomputed validity.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> &Validity {
        *self.data.get_mut(field) = normalize_line_breaks(value.into());
        self.recompute(field);
        self.validity(field)
    }

    /// Replaces every value at once, as a full form post does.
    pub fn apply(&mut self, mut data: FormData) {
        for field in Field::ALL {
            let value = data.get_mut(field);
            *value = normalize_line_breaks(std::mem::take(value));
        }
        self.data = data;
        self.recompute_all();
    }

    /// Records a submission attempt so empty required fields start showing as invalid.
    pub fn mark_submitted(&mut self) {
        self.submitted = true;
        self.recompute_all();
    }

    pub fn validate(&self) -> Result<ValidForm, FormErrors> {
        self.data.validate()
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    fn recompute(&mut self, field: Field) {
        let validity = rules::evaluate(field, self.data.get(field), self.submitted);
        self.validity.insert(field, validity);
    }

    fn recompute_all(&mut self) {
        for field in Field::ALL {
            self.recompute(field);
        }
    }
}

/// Form posts send textarea line breaks as CRLF while scripts read them as LF.
/// Both must count the same.
fn normalize_line_breaks(value: String) -> String {
    if value.contains('\r') {
        value.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        value
    }
}
