use std::collections::HashSet;

use serde::Serialize;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

use crate::notify::{Notification, NotificationId, NotificationQueue};

/// Prints each notification to stderr once, as it appears in the queue.
pub struct Renderer {
    stop: oneshot::Sender<()>,
    task: JoinHandle<usize>,
}

impl Renderer {
    pub fn spawn(queue: &NotificationQueue) -> Self {
        let (stop, stopped) = oneshot::channel();
        let task = tokio::spawn(render_loop(queue.subscribe(), stopped));
        Self { stop, task }
    }

    /// Prints anything still unseen and stops. Returns how many notifications were shown.
    pub async fn finish(self) -> usize {
        let _ = self.stop.send(());
        self.task.await.unwrap_or(0)
    }
}

async fn render_loop(
    mut visible: watch::Receiver<Vec<Notification>>,
    mut stopped: oneshot::Receiver<()>,
) -> usize {
    let mut seen = HashSet::new();
    loop {
        tokio::select! {
            changed = visible.changed() => {
                if changed.is_err() {
                    break;
                }
                print_unseen(&mut seen, &visible.borrow_and_update());
            }
            _ = &mut stopped => {
                print_unseen(&mut seen, &visible.borrow());
                break;
            }
        }
    }
    seen.len()
}

fn print_unseen(seen: &mut HashSet<NotificationId>, list: &[Notification]) {
    for line in unseen_lines(seen, list) {
        eprintln!("{line}");
    }
}

/// Lines for notifications not printed yet, oldest first.
fn unseen_lines(seen: &mut HashSet<NotificationId>, list: &[Notification]) -> Vec<String> {
    list.iter()
        .rev()
        .filter(|n| seen.insert(n.id))
        .map(format_notification)
        .collect()
}

pub fn format_notification(n: &Notification) -> String {
    match &n.title {
        Some(title) => format!("[{}] {}: {}", n.kind.label(), title, n.message),
        None => format!("[{}] {}", n.kind.label(), n.message),
    }
}

/// Pretty JSON on stdout: command results go to stdout, notifications to stderr.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => tracing::error!("Could not render result: {e}"),
    }
}
