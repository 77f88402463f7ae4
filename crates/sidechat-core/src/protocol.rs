//! Wire types exchanged between the panel host and the embedded webview UI
//!
//! Both directions are JSON tagged unions discriminated by a `type` field,
//! so new message kinds cannot be silently mishandled on either side.
//! `content` fields that carry file bytes are base64 end to end.

use serde::{Deserialize, Serialize};

/// A message posted by the webview UI to the panel host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UiMessage {
    /// Free-form chat text to relay to the completion API
    Chat { content: String },
    /// Workspace file access: with `content` it is a write (upload),
    /// without it is a read
    FileRequest {
        filename: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },
}

/// A message posted by the panel host back to the webview UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum HostMessage {
    /// Reply to a `chat` message; adapter failures arrive here too, as
    /// error-prefixed text
    Response { content: String },
    /// Successful file read, or the echoed payload confirming a write
    FileResponse { filename: String, content: String },
    /// Failed file access, naming the file and the reason
    FileError { filename: String, error: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_envelope_wire_format() {
        let msg: UiMessage = serde_json::from_str(r#"{"type":"chat","content":"hi"}"#).unwrap();
        assert_eq!(msg, UiMessage::Chat { content: "hi".to_string() });

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "chat");
        assert_eq!(json["content"], "hi");
    }

    #[test]
    fn test_file_request_read_omits_content_field() {
        let msg = UiMessage::FileRequest {
            filename: "notes.txt".to_string(),
            content: None,
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"type":"file-request","filename":"notes.txt"}"#);
    }

    #[test]
    fn test_file_request_write_carries_payload() {
        let msg: UiMessage = serde_json::from_str(
            r#"{"type":"file-request","filename":"pic.png","content":"aGVsbG8="}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            UiMessage::FileRequest {
                filename: "pic.png".to_string(),
                content: Some("aGVsbG8=".to_string()),
            }
        );
    }

    #[test]
    fn test_host_message_tags() {
        let response = HostMessage::Response {
            content: "hello".to_string(),
        };
        assert_eq!(serde_json::to_value(&response).unwrap()["type"], "response");

        let file_response = HostMessage::FileResponse {
            filename: "a.txt".to_string(),
            content: "aGk=".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&file_response).unwrap()["type"],
            "file-response"
        );

        let file_error = HostMessage::FileError {
            filename: "a.txt".to_string(),
            error: "No workspace is open.".to_string(),
        };
        let json = serde_json::to_value(&file_error).unwrap();
        assert_eq!(json["type"], "file-error");
        assert_eq!(json["error"], "No workspace is open.");
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        assert!(serde_json::from_str::<UiMessage>(r#"{"type":"ping"}"#).is_err());
        assert!(serde_json::from_str::<HostMessage>(r#"{"type":"ack","content":"x"}"#).is_err());
    }
}
