//! Gemini payload types for `generateContent` requests and responses.

use serde::{Deserialize, Serialize};

/// Gemini content container used in both requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Untagged union of text and inline media content parts.
///
/// Variant order matters for `#[serde(untagged)]` decoding; `Other` absorbs
/// part kinds the studio does not use (thought signatures, function calls).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Other(serde_json::Value),
}

/// Base64 inline payload used for image requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// Top-level `generateContent` response envelope.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// Candidate completion item returned by Gemini.
#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_part_serializes_camel_case() {
        let part = Part::InlineData {
            inline_data: InlineData {
                mime_type: "image/png".to_string(),
                data: "AAAA".to_string(),
            },
        };
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "inlineData": { "mimeType": "image/png", "data": "AAAA" } })
        );
    }

    #[test]
    fn test_unknown_part_kinds_are_tolerated() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "thoughtSignature": "abc" },
                        { "text": "here you go", "thought": false },
                        { "inlineData": { "mimeType": "image/png", "data": "AAAA" } }
                    ]
                },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        let parts = &response.candidates[0].content.as_ref().unwrap().parts;
        assert!(matches!(parts[0], Part::Other(_)));
        assert!(matches!(parts[1], Part::Text { .. }));
        assert!(matches!(parts[2], Part::InlineData { .. }));
    }

    #[test]
    fn test_missing_candidates_defaults_to_empty() {
        let response: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({ "promptFeedback": {} })).unwrap();
        assert!(response.candidates.is_empty());
    }
}
