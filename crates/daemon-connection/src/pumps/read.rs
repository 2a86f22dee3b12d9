//! WebSocket read pump: queues inbound text frames for the dispatcher.

use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// Reads frames from the WebSocket until the channel closes or errors.
///
/// Text frames are forwarded in order on `inbound_tx`; pings are answered
/// directly. When the pump exits it drops `inbound_tx`, closing the
/// dispatch queue; the agent treats that as transport-fatal.
pub(crate) async fn read_pump<S>(
    mut read: S,
    inbound_tx: mpsc::Sender<String>,
    write_tx: mpsc::Sender<tungstenite::Message>,
    cancel: CancellationToken,
) where
    S: StreamExt<Item = Result<tungstenite::Message, tungstenite::Error>> + Unpin,
{
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,

            msg = read.next() => {
                match msg {
                    Some(Ok(tungstenite::Message::Text(text))) => {
                        trace!(len = text.len(), "received frame");
                        if inbound_tx.send(text.to_string()).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(tungstenite::Message::Ping(data))) => {
                        trace!("received ping, sending pong");
                        let _ = write_tx.send(tungstenite::Message::Pong(data)).await;
                    }
                    Some(Ok(tungstenite::Message::Close(_))) => {
                        debug!("received close frame");
                        break;
                    }
                    Some(Ok(_)) => {} // Binary, Pong: ignore
                    Some(Err(e)) => {
                        warn!("WebSocket read error: {e}");
                        break;
                    }
                    None => {
                        debug!("WebSocket stream ended");
                        break;
                    }
                }
            }
        }
    }
}
