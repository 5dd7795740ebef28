//! Conversation buffer and send state machine.

use caltodo_services::{ChatClient, ChatMessage, ChatRequest, ChatResponse, ChatRole, ServiceError};
use chrono::{Local, Utc};

/// Entries of trailing history sent with each message.
pub const HISTORY_WINDOW: usize = 20;

pub const WELCOME_MESSAGE: &str =
    "안녕하세요! 캘린더 & 할 일 도우미입니다. 오늘 일정 요약이나 할 일 관리를 도와드릴게요.";
pub const PLACEHOLDER: &str = "응답 준비 중...";
pub const EMPTY_REPLY: &str = "응답이 비었습니다.";
pub const HTTP_FAILURE: &str = "죄송합니다. 응답을 가져오지 못했습니다.";
pub const NETWORK_FAILURE: &str = "네트워크 오류가 발생했습니다. 다시 시도해 주세요.";

/// One rendered message in the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bubble {
    pub role: ChatRole,
    pub text: String,
    /// Local time, "HH:MM".
    pub time: String,
    /// True while this is the placeholder for an unanswered request.
    pub pending: bool,
}

impl Bubble {
    fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            time: Local::now().format("%H:%M").to_string(),
            pending: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Idle,
    Sending,
}

impl PanelState {
    pub fn can_send(self) -> bool {
        matches!(self, PanelState::Idle)
    }
}

/// An accepted send waiting for its reply.
#[must_use = "a pending reply must be completed to unlock the panel"]
#[derive(Debug)]
pub struct PendingReply {
    request: ChatRequest,
    bubble: usize,
}

impl PendingReply {
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }
}

#[derive(Debug)]
pub struct ChatPanel {
    history: Vec<ChatMessage>,
    bubbles: Vec<Bubble>,
    state: PanelState,
    open: bool,
}

impl Default for ChatPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatPanel {
    /// A closed panel holding the welcome message.
    pub fn new() -> Self {
        Self {
            history: vec![ChatMessage::assistant(WELCOME_MESSAGE, now_millis())],
            bubbles: vec![Bubble::new(ChatRole::Assistant, WELCOME_MESSAGE)],
            state: PanelState::Idle,
            open: false,
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Accept `input` for sending.
    ///
    /// Returns `None` for blank input or while a request is in flight; sends
    /// are never queued.
    pub fn begin_send(&mut self, input: &str) -> Option<PendingReply> {
        let message = input.trim();
        if message.is_empty() {
            return None;
        }
        if !self.state.can_send() {
            tracing::debug!("Chat request already in flight, dropping input");
            return None;
        }

        self.bubbles.push(Bubble::new(ChatRole::User, message));
        self.history.push(ChatMessage::user(message, now_millis()));

        let start = self.history.len().saturating_sub(HISTORY_WINDOW);
        let request = ChatRequest {
            message: message.to_string(),
            history: self.history[start..].to_vec(),
        };

        let mut placeholder = Bubble::new(ChatRole::Assistant, PLACEHOLDER);
        placeholder.pending = true;
        self.bubbles.push(placeholder);
        self.state = PanelState::Sending;

        Some(PendingReply {
            request,
            bubble: self.bubbles.len() - 1,
        })
    }

    /// Fill the placeholder with the reply or a failure message and unlock
    /// the panel. Returns the text shown.
    pub fn complete(
        &mut self,
        pending: PendingReply,
        result: Result<ChatResponse, ServiceError>,
    ) -> &str {
        let (text, timestamp) = match result {
            Ok(reply) => {
                if reply.success == Some(false) {
                    tracing::warn!("Chat reply marked as failed: {:?}", reply.message);
                }
                let text = reply.message.unwrap_or_else(|| EMPTY_REPLY.to_string());
                (text, reply.timestamp.unwrap_or_else(now_millis))
            }
            Err(ServiceError::Network(e)) => {
                tracing::error!("Network error while chatting: {}", e);
                (NETWORK_FAILURE.to_string(), now_millis())
            }
            // A 2xx body that is not a chat reply is treated like a dropped connection.
            Err(ServiceError::Decode(e)) => {
                tracing::error!("Unreadable chat reply: {}", e);
                (NETWORK_FAILURE.to_string(), now_millis())
            }
            Err(e) => {
                tracing::error!("Chat API error: {}", e);
                (HTTP_FAILURE.to_string(), now_millis())
            }
        };

        self.history.push(ChatMessage::assistant(text.clone(), timestamp));
        self.state = PanelState::Idle;

        let index = if pending.bubble < self.bubbles.len() {
            pending.bubble
        } else {
            self.bubbles.push(Bubble::new(ChatRole::Assistant, String::new()));
            self.bubbles.len() - 1
        };
        let bubble = &mut self.bubbles[index];
        bubble.text = text;
        bubble.pending = false;
        &bubble.text
    }

    /// Send `input` and wait for the reply. Returns the reply text, or `None`
    /// when the input was not accepted.
    pub async fn send(&mut self, client: &ChatClient, input: &str) -> Option<String> {
        let pending = self.begin_send(input)?;
        let result = client.send_message(pending.request()).await;
        Some(self.complete(pending, result).to_string())
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
