//! Dispatches UI envelopes to the right adapter and shapes the reply
//!
//! Every incoming message produces exactly one outgoing envelope. Adapter
//! failures never escape: chat failures come back as an error-prefixed
//! `response`, file failures as a `file-error` naming the file.

use std::path::Path;

use crate::config::API_KEY_ENV;
use crate::protocol::{HostMessage, UiMessage};
use crate::transport::CompletionClient;
use crate::workspace;

/// Prefix distinguishing a failed chat reply; the envelope shape is the
/// same as a successful one
pub const CHAT_ERROR_PREFIX: &str = "❌ Error: ";

pub async fn route(
    client: Option<&CompletionClient>,
    workspace_root: Option<&Path>,
    message: UiMessage,
) -> HostMessage {
    match message {
        UiMessage::Chat { content } => {
            let reply = match client {
                Some(client) => client.complete(&content).await,
                None => Err(anyhow::anyhow!(
                    "API key not configured. Set {} or add api_key to the config file.",
                    API_KEY_ENV
                )),
            };

            match reply {
                Ok(content) => HostMessage::Response { content },
                Err(err) => {
                    log::warn!("chat request failed: {err:#}");
                    HostMessage::Response {
                        content: format!("{}{}", CHAT_ERROR_PREFIX, err),
                    }
                }
            }
        }
        UiMessage::FileRequest { filename, content } => {
            // Payload present means write (upload), absent means read
            let result = match &content {
                Some(payload) => workspace::write_file(workspace_root, &filename, payload).await,
                None => workspace::read_file(workspace_root, &filename).await,
            };

            match result {
                Ok(content) => HostMessage::FileResponse { filename, content },
                Err(err) => {
                    log::warn!("file request for {filename} failed: {err:#}");
                    HostMessage::FileError {
                        filename,
                        error: err.to_string(),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine as _;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_chat_without_client_yields_error_response() {
        let reply = route(
            None,
            None,
            UiMessage::Chat {
                content: "hello".to_string(),
            },
        )
        .await;

        match reply {
            HostMessage::Response { content } => {
                assert!(content.starts_with(CHAT_ERROR_PREFIX));
                assert!(content.contains("API key not configured"));
            }
            other => panic!("expected response envelope, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_file_request_without_workspace() {
        let reply = route(
            None,
            None,
            UiMessage::FileRequest {
                filename: "notes.txt".to_string(),
                content: None,
            },
        )
        .await;

        assert_eq!(
            reply,
            HostMessage::FileError {
                filename: "notes.txt".to_string(),
                error: "No workspace is open.".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_file_read_returns_encoded_bytes() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"remember the milk").unwrap();

        let reply = route(
            None,
            Some(dir.path()),
            UiMessage::FileRequest {
                filename: "notes.txt".to_string(),
                content: None,
            },
        )
        .await;

        assert_eq!(
            reply,
            HostMessage::FileResponse {
                filename: "notes.txt".to_string(),
                content: BASE64.encode(b"remember the milk"),
            }
        );
    }

    #[tokio::test]
    async fn test_file_write_echoes_payload() {
        let dir = TempDir::new().unwrap();
        let payload = BASE64.encode(b"uploaded");

        let reply = route(
            None,
            Some(dir.path()),
            UiMessage::FileRequest {
                filename: "upload.bin".to_string(),
                content: Some(payload.clone()),
            },
        )
        .await;

        assert_eq!(
            reply,
            HostMessage::FileResponse {
                filename: "upload.bin".to_string(),
                content: payload,
            }
        );
        assert_eq!(std::fs::read(dir.path().join("upload.bin")).unwrap(), b"uploaded");
    }

    #[tokio::test]
    async fn test_missing_file_surfaces_as_file_error() {
        let dir = TempDir::new().unwrap();

        let reply = route(
            None,
            Some(dir.path()),
            UiMessage::FileRequest {
                filename: "missing.txt".to_string(),
                content: None,
            },
        )
        .await;

        match reply {
            HostMessage::FileError { filename, error } => {
                assert_eq!(filename, "missing.txt");
                assert!(!error.is_empty());
            }
            other => panic!("expected file-error envelope, got {other:?}"),
        }
    }
}
