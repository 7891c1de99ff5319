//! Prompt assembly.
//!
//! Structure, in order: preamble and offer, sender identity, reply
//! instructions, then exactly one closing clause picked by the response type.
//! User text is appended as-is; no placeholder substitution ever runs over it.

use crate::form::{ResponseType, ValidForm};
use crate::generation::prompts::{
    CALL_CLAUSE, IDENTITY_HEADER, NAME_LABEL, OFFER_LABEL, PHONE_LABEL, PHONE_PLACEHOLDER,
    PREAMBLE, QUOTE_CLAUSE, REPLY_INSTRUCTIONS,
};

/// Builds the completion prompt for a validated form.
pub fn build_prompt(form: &ValidForm) -> String {
    let phone = form.phone.as_deref().unwrap_or(PHONE_PLACEHOLDER);

    let mut prompt = String::with_capacity(
        PREAMBLE.len() + REPLY_INSTRUCTIONS.len() + form.offer_text.len() + 512,
    );

    prompt.push_str(PREAMBLE);
    prompt.push_str("\n\n");
    prompt.push_str(OFFER_LABEL);
    prompt.push_str(&form.offer_text);
    prompt.push_str("\n\n");

    prompt.push_str(IDENTITY_HEADER);
    prompt.push('\n');
    prompt.push_str(NAME_LABEL);
    prompt.push_str(&form.name);
    prompt.push('\n');
    prompt.push_str(PHONE_LABEL);
    prompt.push_str(phone);
    prompt.push_str("\n\n");

    prompt.push_str(REPLY_INSTRUCTIONS);
    prompt.push_str(closing_clause(form.response_type));

    prompt
}

fn closing_clause(response_type: ResponseType) -> &'static str {
    match response_type {
        ResponseType::Quote => QUOTE_CLAUSE,
        ResponseType::Call => CALL_CLAUSE,
    }
}
