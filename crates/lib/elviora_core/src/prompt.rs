// @zen-component: PRM-PromptAssembler
//
//! Prompt assembly: store facts + product context + user message.
//!
//! Pure transformation, no I/O.

use serde::Serialize;

/// Sampling temperature for every request.
pub const TEMPERATURE: f32 = 0.4;

/// Output token cap for every request.
pub const MAX_TOKENS: u32 = 350;

/// Assistant persona and grounding rules.
pub const SYSTEM_PROMPT: &str = "\
You are the Elviora jewelry store assistant.
Reply in the same language as the user (Arabic or English).
Be concise, friendly, and helpful.
Answer only from the facts and products supplied to you.
Never invent information, and never invent shipping, payment, or policy details that are not listed.
If you are unsure, say so and offer the support contact.";

/// Literal store metadata.
pub const SYSTEM_FACTS: &str = "\
Store name: Elviora Jewelry
Location: Damascus, Syria
Phone/WhatsApp: 09998841365
Email: info@ElvioraJewelry.com
Categories: necklaces, earrings, bracelets, rings, sets, diversified
Shipping: inside Damascus 2-4 days, other Syrian cities 3-7 days
Exchange: within 48 hours if unused
Payment: cash on delivery inside Syria";

/// Sent instead of the catalog when no product text is available
/// ("no product data at the moment").
pub const NO_PRODUCTS_PLACEHOLDER: &str = "لا توجد بيانات منتجات حالياً.";

/// Chat message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One role-tagged message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Request body for the chat completions endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatPayload {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Builds [`ChatPayload`]s for a fixed model.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    model: String,
}

impl PromptAssembler {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    /// Messages in order: system facts, system products, user.
    ///
    /// `user_message` is expected to be trimmed already and is passed through
    /// verbatim.
    pub fn build_payload(&self, user_message: &str, products_text: &str) -> ChatPayload {
        let products = if products_text.is_empty() {
            NO_PRODUCTS_PLACEHOLDER
        } else {
            products_text
        };

        ChatPayload {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: format!("{SYSTEM_PROMPT}\n\nSYSTEM_FACTS:\n{SYSTEM_FACTS}"),
                },
                ChatMessage {
                    role: Role::System,
                    content: format!("KNOWN_PRODUCTS:\n{products}"),
                },
                ChatMessage {
                    role: Role::User,
                    content: user_message.to_string(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn assembler() -> PromptAssembler {
        PromptAssembler::new("deepseek/deepseek-r1-0528:free")
    }

    #[test]
    fn messages_are_facts_products_user() {
        let payload = assembler().build_payload("hello", "- X | Y | Z | 10$");

        let roles: Vec<Role> = payload.messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::System, Role::System, Role::User]);
        assert!(payload.messages[0].content.contains("SYSTEM_FACTS:"));
        assert!(payload.messages[0].content.contains("Store name: Elviora Jewelry"));
        assert_eq!(payload.messages[1].content, "KNOWN_PRODUCTS:\n- X | Y | Z | 10$");
        assert_eq!(payload.messages[2].content, "hello");
    }

    #[test]
    fn empty_products_use_placeholder() {
        let payload = assembler().build_payload("hello", "");
        assert_eq!(
            payload.messages[1].content,
            format!("KNOWN_PRODUCTS:\n{NO_PRODUCTS_PLACEHOLDER}")
        );
    }

    #[test]
    fn persona_carries_grounding_rules() {
        let payload = assembler().build_payload("hi", "");
        let system = &payload.messages[0].content;
        assert!(system.starts_with(SYSTEM_PROMPT));
        assert!(system.contains("same language as the user"));
        assert!(system.contains("Never invent"));
        assert!(system.contains("offer the support contact"));
    }

    #[test]
    fn user_message_is_not_altered() {
        let message = "كم سعر الخاتم؟  ";
        let payload = assembler().build_payload(message, "");
        assert_eq!(payload.messages[2].content, message);
    }

    #[test]
    fn generation_parameters_are_fixed() {
        let payload = assembler().build_payload("hello", "");
        assert_eq!(payload.model, "deepseek/deepseek-r1-0528:free");
        assert_eq!(payload.temperature, TEMPERATURE);
        assert_eq!(payload.max_tokens, MAX_TOKENS);
    }

    #[test]
    fn serializes_to_completion_request_shape() {
        let payload = assembler().build_payload("hello", "- X | Y | Z | 10$");
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["model"], "deepseek/deepseek-r1-0528:free");
        assert_eq!(value["max_tokens"], json!(350));
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][2], json!({ "role": "user", "content": "hello" }));
        assert!(value["temperature"].as_f64().unwrap() > 0.39);
    }
}
