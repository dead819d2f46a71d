//! Network association: wait until the outside world is reachable.

use inky_core::NetworkError;
use inky_display::{render_error, render_splash, Panel};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout, Instant};

const RETRY_INTERVAL: Duration = Duration::from_millis(500);

#[allow(async_fn_in_trait)]
pub trait Link {
    /// Returns once the link is up, or fails when the deadline passes.
    async fn connect(&self) -> Result<(), NetworkError>;
}

/// Treats the link as up once a TCP connection to `host` succeeds.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    host: String,
    deadline: Duration,
}

impl TcpProbe {
    pub fn new(host: impl Into<String>, deadline: Duration) -> Self {
        Self {
            host: host.into(),
            deadline,
        }
    }
}

impl Link for TcpProbe {
    async fn connect(&self) -> Result<(), NetworkError> {
        let give_up = Instant::now() + self.deadline;
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            let left = give_up.saturating_duration_since(Instant::now());
            match timeout(left, TcpStream::connect(&self.host)).await {
                Ok(Ok(_)) => {
                    tracing::info!("Link up after {} attempt(s)", attempts);
                    return Ok(());
                }
                Ok(Err(e)) => tracing::debug!("Probe {} failed: {}", self.host, e),
                Err(_) => tracing::debug!("Probe {} timed out", self.host),
            }

            if Instant::now() + RETRY_INTERVAL >= give_up {
                return Err(NetworkError::LinkTimeout {
                    host: self.host.clone(),
                    secs: self.deadline.as_secs(),
                });
            }
            sleep(RETRY_INTERVAL).await;
        }
    }
}

/// Show the splash, bring the link up, and put the failure on the panel if it doesn't come up.
pub async fn connect_with_splash<L, P>(link: &L, panel: &mut P) -> anyhow::Result<()>
where
    L: Link,
    P: Panel,
{
    render_splash("Connecting...", panel).unwrap_or_else(|never| match never {});
    panel.update()?;

    if let Err(e) = link.connect().await {
        tracing::error!("{}", e);
        render_error(e.user_message(), panel).unwrap_or_else(|never| match never {});
        panel.update()?;
        return Err(e.into());
    }
    Ok(())
}
