//! Chat session state machine for the panel UI
//!
//! Owns the ordered message history, the input buffer, and the loading
//! flag. Rendering is someone else's problem: outbound envelopes come out
//! of [`ChatSession::submit`] and [`ChatSession::upload`], inbound ones go
//! through [`ChatSession::apply`], and everything is testable without a UI.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::protocol::{HostMessage, UiMessage};

/// Leading marker selecting a file request over a chat message
pub const FILE_MARKER: char = '@';

/// Download name for an exported transcript
pub const EXPORT_FILENAME: &str = "chat.txt";

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// The sender of a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    File,
}

/// One entry in the chat history. Entries are append-only and never
/// mutated after creation; ids increase in generation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Default)]
pub struct ChatSession {
    pub messages: Vec<Message>,
    pub input: String,
    pub loading: bool,
    next_id: u64,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit the current input buffer.
    ///
    /// Non-empty input appends a user message, sets the loading flag,
    /// clears the buffer, and returns the envelope to post: a leading
    /// [`FILE_MARKER`] selects a file read for the trimmed remainder,
    /// anything else is a chat message. Blank input is a no-op.
    pub fn submit(&mut self) -> Option<UiMessage> {
        if self.input.trim().is_empty() {
            return None;
        }

        let input = std::mem::take(&mut self.input);
        self.push(Role::User, input.clone(), None);
        self.loading = true;

        let envelope = match input.strip_prefix(FILE_MARKER) {
            Some(rest) => UiMessage::FileRequest {
                filename: rest.trim().to_string(),
                content: None,
            },
            None => UiMessage::Chat { content: input },
        };

        Some(envelope)
    }

    /// Upload a local file to the workspace.
    ///
    /// Upload and save-to-workspace are the same operation: the bytes go
    /// out base64-encoded as a file write, and history gains its entry
    /// when the echoed `file-response` comes back through [`apply`].
    ///
    /// [`apply`]: ChatSession::apply
    pub fn upload(&self, filename: &str, bytes: &[u8]) -> UiMessage {
        UiMessage::FileRequest {
            filename: filename.to_string(),
            content: Some(BASE64.encode(bytes)),
        }
    }

    /// Fold one inbound envelope into the session.
    ///
    /// Any envelope clears the loading flag and appends exactly one
    /// message, so an error reply can never leave the UI stuck loading.
    pub fn apply(&mut self, message: HostMessage) {
        self.loading = false;

        match message {
            HostMessage::Response { content } => {
                self.push(Role::Assistant, content, None);
            }
            HostMessage::FileResponse { filename, content } => {
                let preview = render_file_preview(&filename, &content);
                self.push(Role::File, preview, Some(filename));
            }
            HostMessage::FileError { filename, error } => {
                self.push(
                    Role::Assistant,
                    format!("❌ Error reading file \"{}\": {}", filename, error),
                    None,
                );
            }
        }
    }

    /// Truncate the history to empty; emits nothing
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Render the full history as a timestamped plain-text transcript
    pub fn export(&self) -> String {
        self.messages
            .iter()
            .map(|message| {
                format!(
                    "[{}] {}: {}",
                    message.timestamp,
                    speaker(message.role),
                    message.content
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn push(&mut self, role: Role, content: String, filename: Option<String>) {
        self.next_id += 1;
        self.messages.push(Message {
            id: self.next_id,
            role,
            content,
            filename,
            timestamp: display_timestamp(),
        });
    }
}

fn speaker(role: Role) -> &'static str {
    match role {
        Role::User => "You",
        Role::Assistant | Role::File => "AI",
    }
}

fn display_timestamp() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

pub fn is_image(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Markdown preview for a file payload: an inline data-URI image for image
/// extensions, otherwise a fenced code block of the decoded text.
///
/// Image payloads are embedded without validation; a malformed one shows
/// up as a broken image in the renderer. A text payload that fails to
/// decode is shown raw.
fn render_file_preview(filename: &str, content: &str) -> String {
    if is_image(filename) {
        format!("![{}](data:image/*;base64,{})", filename, content)
    } else {
        let text = match BASE64.decode(content) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(_) => content.to_string(),
        };
        format!("```\n{}\n```", text)
    }
}
