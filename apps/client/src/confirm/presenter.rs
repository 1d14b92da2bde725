use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex;
use tracing::info;

use crate::confirm::{ConfirmTone, ConfirmationRequest, Decision};

/// The view side of the broker: shows one request and reports what the user did.
#[async_trait]
pub trait ConfirmPresenter: Send + Sync {
    async fn present(&self, request: &ConfirmationRequest) -> Decision;
}

/// Prompts on stderr and reads the answer from stdin.
pub struct TerminalPresenter {
    input: Mutex<BufReader<Stdin>>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self {
            input: Mutex::new(BufReader::new(tokio::io::stdin())),
        }
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfirmPresenter for TerminalPresenter {
    async fn present(&self, request: &ConfirmationRequest) -> Decision {
        let marker = match request.tone {
            ConfirmTone::Danger => "!! ",
            ConfirmTone::Default => "",
        };
        eprintln!("\n{marker}{}", request.title_or_default());
        eprintln!("{}", request.message);
        eprint!(
            "[y] {} / [n] {} > ",
            request.confirm_label(),
            request.cancel_label()
        );

        let mut line = String::new();
        let mut input = self.input.lock().await;
        match input.read_line(&mut line).await {
            Ok(0) | Err(_) => Decision::Dismissed,
            Ok(_) => parse_answer(&line),
        }
    }
}

/// Confirms everything. Installed by `--yes` for non-interactive use.
pub struct AssumeYes;

#[async_trait]
impl ConfirmPresenter for AssumeYes {
    async fn present(&self, request: &ConfirmationRequest) -> Decision {
        info!("Auto-confirming: {}", request.message);
        Decision::Confirmed
    }
}

/// Maps a typed answer to a decision. A blank line counts as closing the dialog.
fn parse_answer(line: &str) -> Decision {
    match line.trim().to_lowercase().as_str() {
        "y" | "yes" => Decision::Confirmed,
        "" => Decision::Dismissed,
        _ => Decision::Cancelled,
    }
}
