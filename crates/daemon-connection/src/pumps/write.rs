//! WebSocket write pump: outbound frames plus transport keepalive.

use std::time::Duration;

use futures_util::SinkExt;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite;
use tracing::error;

/// Ping interval while the outbound queue is idle.
const KEEPALIVE_PERIOD: Duration = Duration::from_secs(30);

/// Owns the sink half of the socket.
///
/// Frames from all producers pass through one queue, so concurrent
/// senders can never interleave bytes of a frame. While the queue is
/// idle the pump emits a ping every [`KEEPALIVE_PERIOD`] to keep
/// intermediaries from dropping the long-lived connection; liveness
/// detection stays with the read pump. Once every sender is gone the
/// pump flushes a close frame and ends. A sink error ends the pump at
/// once; the socket is already unusable, so no close frame is attempted.
pub(crate) async fn write_pump<S>(
    mut write: S,
    mut write_rx: mpsc::Receiver<tungstenite::Message>,
) where
    S: SinkExt<tungstenite::Message, Error = tungstenite::Error> + Unpin,
{
    let mut keepalive = tokio::time::interval(KEEPALIVE_PERIOD);
    keepalive.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    keepalive.tick().await; // first tick is immediate

    loop {
        let frame = tokio::select! {
            msg = write_rx.recv() => match msg {
                Some(frame) => frame,
                None => break,
            },
            _ = keepalive.tick() => tungstenite::Message::Ping(vec![].into()),
        };

        if let Err(e) = write.send(frame).await {
            error!("WebSocket write error: {e}");
            return;
        }
    }

    let _ = write.send(tungstenite::Message::Close(None)).await;
}
