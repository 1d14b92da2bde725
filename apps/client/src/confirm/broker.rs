use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, warn};

use crate::confirm::{ConfirmPresenter, ConfirmState, ConfirmationRequest};

/// How long the last request stays in `ConfirmState::current` after it resolves.
pub const CONTENT_GRACE: Duration = Duration::from_millis(50);

struct Pending {
    request: ConfirmationRequest,
    reply: oneshot::Sender<bool>,
}

/// Handle onto the confirmation broker task.
///
/// Each `confirm` call gets its own one-shot reply, so it resolves exactly once.
/// Requests are presented strictly one at a time, oldest first.
#[derive(Clone)]
pub struct ConfirmationBroker {
    requests: mpsc::UnboundedSender<Pending>,
    state: watch::Receiver<ConfirmState>,
}

impl ConfirmationBroker {
    /// Starts the broker task on the current tokio runtime.
    /// The task exits once every handle has been dropped.
    pub fn spawn(presenter: Arc<dyn ConfirmPresenter>) -> Self {
        let (requests, inbox) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(ConfirmState::default());
        tokio::spawn(run(presenter, inbox, state_tx));
        Self { requests, state }
    }

    /// Resolves `true` only when the user activates the affirmative control.
    ///
    /// If the broker task is gone the request counts as declined.
    pub async fn confirm(&self, request: ConfirmationRequest) -> bool {
        let (reply, outcome) = oneshot::channel();
        if self.requests.send(Pending { request, reply }).is_err() {
            warn!("Confirmation broker is not running; treating request as declined");
            return false;
        }
        match outcome.await {
            Ok(accepted) => accepted,
            Err(_) => {
                warn!("Confirmation broker stopped before answering; treating request as declined");
                false
            }
        }
    }

    pub fn state(&self) -> ConfirmState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ConfirmState> {
        self.state.clone()
    }
}

async fn run(
    presenter: Arc<dyn ConfirmPresenter>,
    mut inbox: mpsc::UnboundedReceiver<Pending>,
    state: watch::Sender<ConfirmState>,
) {
    let mut carried: Option<Pending> = None;

    loop {
        let pending = match carried.take() {
            Some(p) => p,
            None => match inbox.recv().await {
                Some(p) => p,
                None => break,
            },
        };

        if pending.reply.is_closed() {
            debug!("Skipping confirmation whose caller went away");
            continue;
        }

        state.send_modify(|s| {
            s.open = true;
            s.current = Some(pending.request.clone());
        });

        let decision = presenter.present(&pending.request).await;

        state.send_modify(|s| s.open = false);
        debug!(?decision, "Confirmation resolved");
        let _ = pending.reply.send(decision.accepted());

        // Keep the old content around briefly; a follow-up request replaces it directly.
        tokio::select! {
            next = inbox.recv() => match next {
                Some(p) => carried = Some(p),
                None => {
                    state.send_modify(|s| s.current = None);
                    break;
                }
            },
            _ = tokio::time::sleep(CONTENT_GRACE) => {
                state.send_modify(|s| {
                    if !s.open {
                        s.current = None;
                    }
                });
            }
        }
    }

    debug!("Confirmation broker stopped");
}
