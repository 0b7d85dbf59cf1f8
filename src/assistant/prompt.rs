//! Role-specific prompt assembly for the chat models.

use crate::models::enums::Role;

pub const PATIENT_SYSTEM_PROMPT: &str = r#"You are Flareline, a warm health companion for a patient living with a rare condition. You are NOT a doctor.

RULES:
1. Ground every statement in the provided record; never invent clinical facts.
2. Never diagnose, prescribe, or recommend changing treatment — suggest discussing with the care team instead.
3. Use short, plain-language answers. Explain any medical term you use.
4. If the record does not answer the question, say so clearly."#;

pub const DOCTOR_SYSTEM_PROMPT: &str = r#"You are Flareline, a clinical assistant for the treating physician. Answer in a concise clinical register.

RULES:
1. Ground every statement in the provided patient record; flag gaps explicitly.
2. Quantify where the record allows (severity scores, adherence rates, date ranges).
3. Surface trends the physician should act on (flare patterns, missed doses, upcoming visits).
4. State uncertainty plainly; do not speculate beyond the record."#;

pub fn system_prompt(role: Role) -> &'static str {
    match role {
        Role::Patient => PATIENT_SYSTEM_PROMPT,
        Role::Doctor => DOCTOR_SYSTEM_PROMPT,
    }
}

/// Assemble the user-turn prompt: context block, separator, question.
pub fn build_prompt(role: Role, context: &str, question: &str) -> String {
    let preamble = match role {
        Role::Patient => "Here is information from your health record:",
        Role::Doctor => "Retrieved context (patient record):",
    };
    format!("{preamble}\n\n{context}\n\n---\n{question}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_context_and_question() {
        let prompt = build_prompt(Role::Doctor, "## Patient: Alex Chen", "Any flare risk?");
        assert!(prompt.starts_with("Retrieved context (patient record):"));
        assert!(prompt.contains("## Patient: Alex Chen"));
        assert!(prompt.ends_with("---\nAny flare risk?"));
    }

    #[test]
    fn registers_differ_by_role() {
        assert_ne!(system_prompt(Role::Patient), system_prompt(Role::Doctor));
        assert!(build_prompt(Role::Patient, "ctx", "q").contains("your health record"));
    }
}
