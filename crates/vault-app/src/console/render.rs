//! Turns session events into console text.

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use vault_common::{Role, SessionEvent, Turn};

const SOURCE_INDENT: &str = "       ";

pub fn render_turn(turn: &Turn) -> String {
    match turn.role() {
        Role::User => format!("you> {}", turn.content()),
        Role::Assistant => match turn.source() {
            Some(source) => format!(
                "vault> {}\n{SOURCE_INDENT}Source: {source}",
                turn.content()
            ),
            None => format!("vault> {}", turn.content()),
        },
    }
}

/// Console text for an event, if it has any.
pub fn render_event(event: &SessionEvent) -> Option<String> {
    match event {
        SessionEvent::TurnAppended { turn, .. } => Some(render_turn(turn)),
        SessionEvent::PendingChanged(true) => Some("Thinking...".to_string()),
        _ => None,
    }
}

/// Print events until the session is dropped.
pub fn spawn_renderer(mut rx: broadcast::Receiver<SessionEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if let Some(text) = render_event(&event) {
                        println!("{text}");
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "renderer fell behind, events skipped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
