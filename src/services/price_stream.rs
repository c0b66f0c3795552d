use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message as TMessage};

use crate::services::feed_controller::{FeedEvent, FeedSender};

pub fn spawn_price_stream(ws_url: String, tx: FeedSender) {
    tokio::spawn(run_price_stream(ws_url, tx));
}

/// Single connection attempt to the backend price stream. Every text frame is
/// forwarded untouched; the stream ending for any reason is reported once.
pub async fn run_price_stream(ws_url: String, tx: FeedSender) {
    if tx.send(FeedEvent::SocketConnecting).await.is_err() {
        return;
    }

    tracing::info!("Connecting to price stream {}...", ws_url);

    let (ws, _) = match connect_async(ws_url.as_str()).await {
        Ok(x) => x,
        Err(err) => {
            tracing::warn!("price stream connect failed: {}", err);
            let _ = tx.send(FeedEvent::SocketClosed(err.to_string())).await;
            return;
        }
    };

    if tx.send(FeedEvent::SocketOpened).await.is_err() {
        return;
    }

    let (mut write, mut read) = ws.split();

    let reason = loop {
        match read.next().await {
            Some(Ok(TMessage::Text(txt))) => {
                if tx.send(FeedEvent::SocketFrame(txt)).await.is_err() {
                    return;
                }
            }
            Some(Ok(TMessage::Ping(payload))) => {
                let _ = write.send(TMessage::Pong(payload)).await;
            }
            Some(Ok(TMessage::Close(_))) | None => break "closed by server".to_string(),
            Some(Ok(_)) => {}
            Some(Err(err)) => break err.to_string(),
        }
    };

    let _ = tx.send(FeedEvent::SocketClosed(reason)).await;
}
