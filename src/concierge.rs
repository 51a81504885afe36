//! Generative-AI collaborator seam (chat and document analysis)
//!
//! The chat concierge and the mock document-check screen call out to a
//! text/vision model behind [`GenerativeClient`]. The trait is the
//! whole integration surface: prompt in, text out, failures surfaced as
//! [`ParlorError::ExternalService`]. An offline implementation keeps
//! those screens drivable without any vendor SDK, and nothing in this
//! module can reach the ledger.

use crate::errors::{ParlorError, ParlorResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
    System,
}

/// One turn of chat history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// Text/vision generation client.
pub trait GenerativeClient {
    /// Continue a chat conversation with a new message.
    fn chat(&self, history: &[ChatTurn], message: &str) -> ParlorResult<String>;

    /// Describe an image (base64 payload) guided by a prompt.
    fn describe_image(&self, image_b64: &str, mime_type: &str, prompt: &str)
        -> ParlorResult<String>;
}

/// Canned offline client: deterministic responses, no network.
#[derive(Debug, Default)]
pub struct OfflineClient;

impl GenerativeClient for OfflineClient {
    fn chat(&self, history: &[ChatTurn], message: &str) -> ParlorResult<String> {
        if message.trim().is_empty() {
            return Err(ParlorError::ExternalService(
                "empty message".to_string(),
            ));
        }
        Ok(format!(
            "[offline concierge] I heard: \"{}\" ({} earlier turns)",
            message.trim(),
            history.len()
        ))
    }

    fn describe_image(
        &self,
        image_b64: &str,
        mime_type: &str,
        prompt: &str,
    ) -> ParlorResult<String> {
        if image_b64.is_empty() {
            return Err(ParlorError::ExternalService("empty image payload".to_string()));
        }
        let prompt = if prompt.is_empty() {
            "Describe this image in detail."
        } else {
            prompt
        };
        Ok(format!(
            "[offline vision] {} bytes of {} reviewed; prompt was: {}",
            image_b64.len(),
            mime_type,
            prompt
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_chat_echoes_message() {
        let client = OfflineClient;
        let reply = client.chat(&[], "is this rigged?").expect("chat");
        assert!(reply.contains("is this rigged?"));
    }

    #[test]
    fn test_empty_message_surfaces_service_error() {
        let client = OfflineClient;
        let err = client.chat(&[], "   ").unwrap_err();
        assert!(matches!(err, ParlorError::ExternalService(_)));
    }

    #[test]
    fn test_vision_requires_a_payload() {
        let client = OfflineClient;
        assert!(client.describe_image("", "image/png", "").is_err());
        let reply = client
            .describe_image("aGVsbG8=", "image/png", "")
            .expect("describe");
        assert!(reply.contains("image/png"));
    }
}
