//! Button input. On the desktop the three panel buttons are typed on stdin.

use inky_core::ButtonEvent;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};

/// Delivers at most one button event per tick.
#[allow(async_fn_in_trait)]
pub trait ButtonSource {
    /// Wait up to `tick` for a press.
    async fn poll(&mut self, tick: Duration) -> Option<ButtonEvent>;
}

/// `a`/`p` previous, `b`/`n` next, `c`/`h` home, one per line.
pub fn parse_button(line: &str) -> Option<ButtonEvent> {
    match line.trim().to_ascii_lowercase().as_str() {
        "a" | "p" | "prev" | "previous" => Some(ButtonEvent::Previous),
        "b" | "n" | "next" => Some(ButtonEvent::Next),
        "c" | "h" | "home" => Some(ButtonEvent::Home),
        _ => None,
    }
}

pub struct StdinButtons {
    rx: mpsc::UnboundedReceiver<ButtonEvent>,
    closed: bool,
}

impl StdinButtons {
    /// Spawn the stdin reader. Must be called inside the runtime.
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => match parse_button(&line) {
                        Some(event) => {
                            if tx.send(event).is_err() {
                                break;
                            }
                        }
                        None => tracing::debug!("Ignoring input {:?}", line),
                    },
                    Ok(None) => break,
                    Err(e) => {
                        tracing::warn!("stdin read failed: {}", e);
                        break;
                    }
                }
            }
            tracing::debug!("Button input closed");
        });

        Self { rx, closed: false }
    }
}

impl ButtonSource for StdinButtons {
    async fn poll(&mut self, tick: Duration) -> Option<ButtonEvent> {
        if self.closed {
            sleep(tick).await;
            return None;
        }
        match timeout(tick, self.rx.recv()).await {
            Ok(Some(event)) => Some(event),
            Ok(None) => {
                self.closed = true;
                None
            }
            Err(_) => None,
        }
    }
}
