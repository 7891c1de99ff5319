// Prompt Builder: turns a validated offer form into the completion prompt.
// Pure and deterministic; no I/O happens here.

pub mod builder;
pub mod prompts;

pub use builder::build_prompt;
