//! Reply extraction across provider response shapes.
//!
//! Providers behind OpenRouter do not agree on where the generated text
//! lives. Reasoning models sometimes leave `content` empty and put the answer
//! in `reasoning`; legacy completion shapes use `text`. The lookup order is
//! [`REPLY_FALLBACK_ORDER`].

use serde_json::Value;

/// A place in `choices[0]` where reply text may be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyField {
    /// `choices[0].message.content`
    MessageContent,
    /// `choices[0].message.reasoning`
    MessageReasoning,
    /// `choices[0].text`
    ChoiceText,
}

/// Fields tried, in order, until one holds non-blank text.
pub const REPLY_FALLBACK_ORDER: [ReplyField; 3] = [
    ReplyField::MessageContent,
    ReplyField::MessageReasoning,
    ReplyField::ChoiceText,
];

impl ReplyField {
    /// Non-blank text at this field of `choice`, trimmed.
    pub fn extract(self, choice: &Value) -> Option<String> {
        let value = match self {
            ReplyField::MessageContent => choice.get("message")?.get("content")?,
            ReplyField::MessageReasoning => choice.get("message")?.get("reasoning")?,
            ReplyField::ChoiceText => choice.get("text")?,
        };
        let text = value.as_str()?.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// Reply text from a parsed provider response, following
/// [`REPLY_FALLBACK_ORDER`] over the first choice.
pub fn extract_reply(response: &Value) -> Option<(ReplyField, String)> {
    let choice = response.get("choices")?.get(0)?;
    REPLY_FALLBACK_ORDER
        .iter()
        .find_map(|field| field.extract(choice).map(|text| (*field, text)))
}
