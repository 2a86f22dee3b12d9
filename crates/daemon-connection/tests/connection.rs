//! End-to-end tests against a loopback WebSocket server.

use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite;

use synctray_daemon_connection::DaemonClient;
use synctray_protocol::TrayAction;

#[tokio::test]
async fn connect_sends_client_id_header_and_delivers_frames_in_order() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();

        let mut client_id = None;
        let callback = |req: &tungstenite::handshake::server::Request,
                        resp: tungstenite::handshake::server::Response| {
            client_id = req
                .headers()
                .get("client_id")
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            Ok(resp)
        };
        let mut ws = tokio_tungstenite::accept_hdr_async(stream, callback)
            .await
            .unwrap();

        ws.send(tungstenite::Message::Text(
            r#"{"action":"update_tray_status_text","text":"one"}"#.to_string().into(),
        ))
        .await
        .unwrap();
        ws.send(tungstenite::Message::Text(
            r#"{"action":"update_tray_status_text","text":"two"}"#.to_string().into(),
        ))
        .await
        .unwrap();
        ws.close(None).await.unwrap();

        client_id
    });

    let url = format!("ws://{addr}");
    let (_client, mut inbound) = DaemonClient::connect(&url, "tray-agent").await.unwrap();

    let first = inbound.recv().await.expect("first frame");
    assert!(first.contains("\"one\""));
    let second = inbound.recv().await.expect("second frame");
    assert!(second.contains("\"two\""));

    // Server closed the channel: the inbound queue ends.
    assert!(inbound.recv().await.is_none());

    let client_id = server.await.unwrap();
    assert_eq!(client_id.as_deref(), Some("tray-agent"));
}

#[tokio::test]
async fn send_action_reaches_the_daemon_as_one_text_frame() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();

        loop {
            match ws.next().await {
                Some(Ok(tungstenite::Message::Text(text))) => return Some(text.to_string()),
                Some(Ok(_)) => continue,
                _ => return None,
            }
        }
    });

    let url = format!("ws://{addr}");
    let (client, _inbound) = DaemonClient::connect(&url, "tray-agent").await.unwrap();

    client
        .sender()
        .send_action(&TrayAction::TrayMenuClickedFolder {
            folder: "/home/u/Docs".into(),
        })
        .await
        .unwrap();

    let frame = server.await.unwrap().expect("server received a frame");
    assert_eq!(
        frame,
        r#"{"action":"tray_menu_clicked_folder","folder":"/home/u/Docs"}"#
    );
}

#[tokio::test]
async fn concurrent_senders_each_produce_intact_frames() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();

        let mut frames = Vec::new();
        while frames.len() < 2 {
            match ws.next().await {
                Some(Ok(tungstenite::Message::Text(text))) => frames.push(text.to_string()),
                Some(Ok(_)) => continue,
                _ => break,
            }
        }
        frames
    });

    let url = format!("ws://{addr}");
    let (client, _inbound) = DaemonClient::connect(&url, "tray-agent").await.unwrap();

    let a = client.sender();
    let b = client.sender();
    let (ra, rb) = tokio::join!(
        tokio::spawn(async move { a.send_action(&TrayAction::TrayMenuClickedDonate).await }),
        tokio::spawn(async move { b.send_action(&TrayAction::TrayMenuClickedWebsite).await }),
    );
    ra.unwrap().unwrap();
    rb.unwrap().unwrap();

    let mut frames = server.await.unwrap();
    frames.sort();
    assert_eq!(
        frames,
        vec![
            r#"{"action":"tray_menu_clicked_donate"}"#.to_string(),
            r#"{"action":"tray_menu_clicked_website"}"#.to_string(),
        ]
    );
}
