use log::debug;
use serde::{Deserialize, Serialize};

use crate::Document;
use crate::error::Error;

/// Default completion model.
pub const DEFAULT_MODEL: &str = "gemma2-9b-it";

const COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Instruction wrapped around every document; the document text is appended
/// after the final line.
const PROMPT_TEMPLATE: &str = "If you see a code just explain the code briefly.\n\
Provide the answer in a well-structured way.\n\
The answer should be in bullet form.\n\
Provide a summary of the following content:\n\
Content: ";

/// Issues the single "stuff"-style completion request against Groq's
/// OpenAI-compatible chat API.
///
/// The credential and model are injected at construction; nothing here reads
/// the process environment. The whole document goes into one prompt instance,
/// so inputs beyond the model's context window fail rather than degrade.
#[derive(Debug, Clone)]
pub struct Summarizer {
    api_key: String,
    model: String,
}

impl Summarizer {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Whether a non-blank credential was supplied.
    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Send one completion request for the document and return the model's
    /// reply unmodified.
    pub async fn summarize(&self, client: &reqwest::Client, doc: &Document) -> Result<String, Error> {
        debug!(
            "requesting summary from {} ({} chars of content)",
            self.model,
            doc.text.chars().count()
        );

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: build_prompt(doc),
            }],
        };

        let resp = client
            .post(COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Summarization(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Summarization(format!("Groq API returned {status}: {body}")));
        }

        let reply: ChatResponse = resp
            .json()
            .await
            .map_err(|e| Error::Summarization(e.to_string()))?;
        extract_reply(reply)
    }
}

/// Wrap the document in the fixed summarization instruction.
fn build_prompt(doc: &Document) -> String {
    format!("{PROMPT_TEMPLATE}{}", doc.text)
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

fn extract_reply(resp: ChatResponse) -> Result<String, Error> {
    resp.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| Error::Summarization("empty completion response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_embeds_text() {
        let prompt = build_prompt(&Document {
            text: "Hello world".to_string(),
        });
        assert!(prompt.starts_with("If you see a code just explain the code briefly."));
        assert!(prompt.contains("The answer should be in bullet form."));
        assert!(prompt.ends_with("Content: Hello world"));
        assert_eq!(prompt.matches("Hello world").count(), 1);
    }

    #[test]
    fn test_request_serialization_shape() {
        let request = ChatRequest {
            model: "gemma2-9b-it",
            messages: vec![ChatMessage {
                role: "user",
                content: "prompt text".to_string(),
            }],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gemma2-9b-it");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "prompt text");
        assert_eq!(value["messages"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_extract_reply() {
        let resp: ChatResponse = serde_json::from_value(serde_json::json!({
            "choices": [
                {
                    "message": {
                        "role": "assistant",
                        "content": "- point one\n- point two"
                    }
                }
            ]
        }))
        .unwrap();
        assert_eq!(extract_reply(resp).unwrap(), "- point one\n- point two");
    }

    #[test]
    fn test_extract_reply_empty_choices() {
        let resp: ChatResponse = serde_json::from_value(serde_json::json!({ "choices": [] })).unwrap();
        assert!(extract_reply(resp).is_err());
    }

    #[test]
    fn test_has_credential() {
        assert!(Summarizer::new("gsk_abc", DEFAULT_MODEL).has_credential());
        assert!(!Summarizer::new("", DEFAULT_MODEL).has_credential());
        assert!(!Summarizer::new("   ", DEFAULT_MODEL).has_credential());
    }
}
