//! Record-grounded chat assistant.
//!
//! Answers patient and physician questions about one patient's record by
//! formatting the record into a context block, assembling a role-specific
//! prompt, and running it through a local Ollama model. Replies are
//! flattened to plain prose before they reach the UI.

pub mod client;
pub mod context;
pub mod prompt;

pub use client::OllamaClient;
pub use context::format_patient_context;

use thiserror::Error;

use crate::config::Settings;
use crate::models::enums::Role;
use crate::models::PatientRecord;
use crate::prose::markdown_to_prose;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Cannot reach Ollama at {0} — is it running?")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("Ollama returned status {0}")]
    BadStatus(u16),
}

/// Answer one question about a patient, in the asker's register.
///
/// The doctor model sees the clinical framing, the patient model the
/// plain-language one; both get the same formatted record as context.
pub async fn answer_question(
    client: &OllamaClient,
    settings: &Settings,
    record: &PatientRecord,
    role: Role,
    question: &str,
) -> Result<String, AssistantError> {
    let context = format_patient_context(record);
    let full_prompt = prompt::build_prompt(role, &context, question);
    let model = match role {
        Role::Doctor => settings.doctor_model.as_str(),
        Role::Patient => settings.patient_model.as_str(),
    };

    let raw = client
        .generate(model, prompt::system_prompt(role), &full_prompt)
        .await?;
    Ok(markdown_to_prose(&raw))
}
