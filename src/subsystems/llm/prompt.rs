//! Fixed prompt template for the generator tier.

pub const SYSTEM_INSTRUCTION: &str = "You are HealthAI Pro+, a concise professional medical assistant. \
Answer only about medical topics: causes, symptoms, prevention, and general treatments. \
Do NOT provide prescriptions or emergency instructions. \
Always include a short disclaimer at the end: '⚕️ Disclaimer: This information is for educational purposes only.'";

const RESPONSE_STYLE: &str = "Provide a clear paragraph-style response with short paragraphs (no lists).";

/// System instruction, then the user's verbatim message and the style rule.
pub fn build(user_message: &str) -> String {
    format!("{SYSTEM_INSTRUCTION}\n\nUser question: {user_message}\n\n{RESPONSE_STYLE}")
}
