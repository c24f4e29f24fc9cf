//! # LogWriter: renders controller events as tracing records
//!
//! A bus listener that turns every [`Event`] into a `tracing` record under the
//! `mvcbridge::events` target. Use it for debugging or demos; install any
//! `tracing` subscriber to see the output.
//!
//! ## Example output (fmt subscriber)
//! ```text
//! DEBUG mvcbridge::events: action submitted property="speed" pending=1
//! DEBUG mvcbridge::events: actions drained count=2
//! DEBUG mvcbridge::events: property changed property="temp" channels=2
//! INFO  mvcbridge::events: state replayed channel="settings" count=5
//! WARN  mvcbridge::events: channel panicked channel="gauge" property="temp" reason="..."
//! ```

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::events::{Bus, Event, EventKind};

const TARGET: &str = "mvcbridge::events";

/// Event writer bound to a controller bus.
pub struct LogWriter;

impl LogWriter {
    /// Spawns the listener on the current tokio runtime.
    ///
    /// Runs until `token` is cancelled or the bus is dropped.
    pub fn spawn(bus: &Bus, token: CancellationToken) -> JoinHandle<()> {
        let mut rx = bus.subscribe();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    msg = rx.recv() => match msg {
                        Ok(ev) => Self::write(&ev),
                        Err(RecvError::Closed) => break,
                        Err(RecvError::Lagged(n)) => {
                            tracing::warn!(target: TARGET, skipped = n, "log writer lagged");
                        }
                    }
                }
            }
        })
    }

    /// Writes a single event.
    pub fn write(e: &Event) {
        let property = e.property.as_deref().unwrap_or("");
        let channel = e.channel.as_deref().unwrap_or("unknown");
        let reason = e.reason.as_deref().unwrap_or("");
        let count = e.count.unwrap_or(0);

        match e.kind {
            EventKind::ActionSubmitted => {
                tracing::debug!(target: TARGET, seq = e.seq, property, pending = count, "action submitted");
            }
            EventKind::ActionsDrained => {
                tracing::debug!(target: TARGET, seq = e.seq, count, "actions drained");
            }
            EventKind::DrainRejected => {
                tracing::warn!(target: TARGET, seq = e.seq, reason, "drain rejected");
            }
            EventKind::ModelPanicked => {
                tracing::warn!(target: TARGET, seq = e.seq, property, reason, "model panicked");
            }
            EventKind::PropertyChanged => {
                tracing::debug!(target: TARGET, seq = e.seq, property, channels = count, "property changed");
            }
            EventKind::StateReplayed => {
                tracing::info!(target: TARGET, seq = e.seq, channel, count, "state replayed");
            }
            EventKind::ChannelRegistered => {
                tracing::info!(target: TARGET, seq = e.seq, channel, "channel registered");
            }
            EventKind::ChannelUnregistered => {
                tracing::info!(target: TARGET, seq = e.seq, channel, "channel unregistered");
            }
            EventKind::ChannelPanicked => {
                tracing::warn!(target: TARGET, seq = e.seq, channel, property, reason, "channel panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stops_on_cancel() {
        let bus = Bus::new(8);
        let token = CancellationToken::new();
        let handle = LogWriter::spawn(&bus, token.clone());

        bus.publish(Event::new(EventKind::ActionsDrained).with_count(2));
        token.cancel();
        handle.await.expect("log writer");
    }
}
