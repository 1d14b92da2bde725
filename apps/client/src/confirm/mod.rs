//! Confirmation: a modal yes/no gate that blocks a caller's next action.
//!
//! Callers hold a `ConfirmationBroker` handle and await `confirm(request)`. The broker
//! task presents one request at a time through a `ConfirmPresenter`; requests made while
//! another is open wait their turn in FIFO order.
#![allow(dead_code)]

use serde::{Deserialize, Serialize};

pub mod broker;
pub mod presenter;

pub use broker::ConfirmationBroker;
pub use presenter::{AssumeYes, ConfirmPresenter, TerminalPresenter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmTone {
    #[default]
    Default,
    Danger,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationRequest {
    pub title: Option<String>,
    pub message: String,
    pub confirm_text: Option<String>,
    pub cancel_text: Option<String>,
    #[serde(default)]
    pub tone: ConfirmTone,
}

impl ConfirmationRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Shorthand for a destructive action: danger tone, custom affirmative label.
    pub fn danger(title: &str, message: impl Into<String>, confirm_text: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            message: message.into(),
            confirm_text: Some(confirm_text.to_string()),
            cancel_text: None,
            tone: ConfirmTone::Danger,
        }
    }

    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("Confirm")
    }

    pub fn confirm_label(&self) -> &str {
        self.confirm_text.as_deref().unwrap_or("Confirm")
    }

    pub fn cancel_label(&self) -> &str {
        self.cancel_text.as_deref().unwrap_or("Cancel")
    }
}

/// What the user did with the presented request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Affirmative control.
    Confirmed,
    /// Negative control.
    Cancelled,
    /// Closed without choosing (backdrop click, EOF on the terminal).
    Dismissed,
}

impl Decision {
    pub fn accepted(self) -> bool {
        matches!(self, Decision::Confirmed)
    }
}

/// What a view needs to render the modal.
///
/// `open` drops to false the moment a request resolves; `current` lingers for a short
/// grace period so a quick follow-up request does not flash an empty dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmState {
    pub open: bool,
    pub current: Option<ConfirmationRequest>,
}
