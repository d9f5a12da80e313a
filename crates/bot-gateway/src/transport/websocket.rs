//! tokio-tungstenite transport

use super::{Connector, Frame, Transport, TransportError};
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// Connects over `ws://` or `wss://`
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSocketConnector;

#[async_trait]
impl Connector for WebSocketConnector {
    async fn connect(&self, url: &str) -> Result<Box<dyn Transport>, TransportError> {
        let (stream, response) = connect_async(url).await?;

        tracing::debug!(
            status = response.status().as_u16(),
            "WebSocket handshake completed"
        );

        Ok(Box::new(WebSocketTransport { stream }))
    }
}

/// An open WebSocket
pub struct WebSocketTransport {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl Transport for WebSocketTransport {
    async fn send(&mut self, text: String) -> Result<(), TransportError> {
        self.stream.send(Message::Text(text)).await?;
        Ok(())
    }

    async fn recv(&mut self) -> Result<Frame, TransportError> {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => return Ok(Frame::Text(text)),
                Some(Ok(Message::Binary(data))) => return Ok(decode_binary(data)),
                Some(Ok(Message::Close(frame))) => {
                    let (code, reason) = frame
                        .map(|f| (Some(u16::from(f.code)), f.reason.into_owned()))
                        .unwrap_or_default();
                    return Ok(Frame::Closed { code, reason });
                }
                // Pings are answered by tungstenite on the next write
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => {
                    return Ok(Frame::Closed {
                        code: None,
                        reason: String::new(),
                    })
                }
            }
        }
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        match self.stream.close(None).await {
            Ok(())
            | Err(
                tokio_tungstenite::tungstenite::Error::ConnectionClosed
                | tokio_tungstenite::tungstenite::Error::AlreadyClosed,
            ) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Binary frames carry the same JSON as text frames
fn decode_binary(data: Vec<u8>) -> Frame {
    String::from_utf8(data).map_or_else(
        |e| Frame::Invalid(format!("binary frame is not UTF-8: {}", e.utf8_error())),
        Frame::Text,
    )
}
