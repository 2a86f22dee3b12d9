//! WebSocket client connected to the sync daemon.

use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite;
use tokio_util::sync::CancellationToken;

use synctray_protocol::TrayAction;

/// Errors from the daemon connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("WebSocket error: {0}")]
    Ws(#[from] tungstenite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("client id is not a valid header value")]
    InvalidClientId,

    #[error("connection closed")]
    Closed,
}

/// The single shared channel endpoint.
///
/// Holds the write side and the pump tasks; dropping the client cancels
/// the pumps and closes the connection.
pub struct DaemonClient {
    write_tx: mpsc::Sender<tungstenite::Message>,
    cancel: CancellationToken,
    _read_handle: tokio::task::JoinHandle<()>,
    _write_handle: tokio::task::JoinHandle<()>,
}

impl DaemonClient {
    /// Opens the WebSocket to `url`, declaring the agent's identity with a
    /// static `client_id` header.
    ///
    /// Returns the client and the inbound frame queue. Frames arrive on
    /// the queue in receive order; the queue closing means the channel
    /// closed or errored.
    pub async fn connect(
        url: &str,
        client_id: &str,
    ) -> Result<(Self, mpsc::Receiver<String>), ConnectionError> {
        use futures_util::StreamExt;
        use tokio_tungstenite::tungstenite::client::IntoClientRequest;

        let mut request = url.into_client_request()?;
        request.headers_mut().insert(
            "client_id",
            tungstenite::http::HeaderValue::from_str(client_id)
                .map_err(|_| ConnectionError::InvalidClientId)?,
        );

        let (ws_stream, _) = tokio_tungstenite::connect_async(request).await?;
        let (write, read) = ws_stream.split();

        let (write_tx, write_rx) = mpsc::channel::<tungstenite::Message>(64);
        let (inbound_tx, inbound_rx) = mpsc::channel::<String>(64);
        let cancel = CancellationToken::new();

        let write_handle = tokio::spawn(crate::pumps::write::write_pump(write, write_rx));
        let read_handle = tokio::spawn(crate::pumps::read::read_pump(
            read,
            inbound_tx,
            write_tx.clone(),
            cancel.clone(),
        ));

        let client = Self {
            write_tx,
            cancel,
            _read_handle: read_handle,
            _write_handle: write_handle,
        };
        Ok((client, inbound_rx))
    }

    /// Returns a clonable sender for outbound actions.
    pub fn sender(&self) -> MessageSender {
        MessageSender {
            write_tx: self.write_tx.clone(),
        }
    }
}

impl Drop for DaemonClient {
    fn drop(&mut self) {
        self.cancel.cancel();
        self._read_handle.abort();
        self._write_handle.abort();
    }
}

/// Clonable outbound sender, shared by the dispatcher task and the
/// UI-event path. The underlying queue makes concurrent sends safe and
/// keeps each frame intact.
#[derive(Clone)]
pub struct MessageSender {
    write_tx: mpsc::Sender<tungstenite::Message>,
}

impl MessageSender {
    /// Serializes one action and enqueues it as a single text frame.
    pub async fn send_action(&self, action: &TrayAction) -> Result<(), ConnectionError> {
        let json = serde_json::to_string(action)?;
        self.write_tx
            .send(tungstenite::Message::Text(json.into()))
            .await
            .map_err(|_| ConnectionError::Closed)
    }
}
