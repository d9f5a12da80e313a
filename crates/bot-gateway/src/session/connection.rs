//! Session task
//!
//! Reads frames, reacts to Hello/ACK/Dispatch, sends heartbeats on the timer,
//! and applies caller commands. Everything that writes to the socket runs on
//! this one task, so frames never interleave.

use super::{ConnectionState, StateHandle};
use crate::dispatch::EventHandlers;
use crate::error::{GatewayError, GatewayResult};
use crate::heartbeat::HeartbeatScheduler;
use crate::protocol::{
    CloseCode, GatewayEvent, IdentifyPayload, IdentifyProperties, OpCode, OutboundMessage,
};
use crate::transport::{Frame, Transport};
use bot_common::{BotConfig, BotToken};
use bot_core::{Intents, Presence, PresenceStatus};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// Requests from the client handle to the session task
#[derive(Debug)]
pub(crate) enum SessionCommand {
    /// Send a presence update and report the outcome
    UpdateStatus {
        status: PresenceStatus,
        reply: oneshot::Sender<GatewayResult<()>>,
    },
    /// Close the socket and stop
    Disconnect,
}

/// State owned by the session task
pub(crate) struct Session {
    token: BotToken,
    intents: Intents,
    properties: IdentifyProperties,
    presence: Presence,
    socket: Option<Box<dyn Transport>>,
    heartbeat: HeartbeatScheduler,
    handlers: Arc<EventHandlers>,
    state: StateHandle,
    last_sequence: Option<u64>,
}

impl Session {
    /// Wrap a freshly opened socket
    pub(crate) fn new(
        config: &BotConfig,
        socket: Box<dyn Transport>,
        handlers: Arc<EventHandlers>,
        state: StateHandle,
    ) -> Self {
        state.set(ConnectionState::AwaitingHello);

        Self {
            token: config.token.clone(),
            intents: config.intents,
            properties: IdentifyProperties::for_client(config.client_name.clone()),
            presence: Presence::default(),
            socket: Some(socket),
            heartbeat: HeartbeatScheduler::new(),
            handlers,
            state,
            last_sequence: None,
        }
    }

    /// Run until the socket closes, a fatal error occurs, or `Disconnect`
    pub(crate) async fn run(mut self, mut commands: mpsc::Receiver<SessionCommand>) -> GatewayResult<()> {
        let result = self.event_loop(&mut commands).await;

        match &result {
            Ok(()) => tracing::info!("Gateway session ended"),
            Err(e) => tracing::warn!(
                error = %e,
                last_sequence = ?self.last_sequence,
                "Gateway session terminated"
            ),
        }

        self.shutdown().await;
        result
    }

    async fn event_loop(&mut self, commands: &mut mpsc::Receiver<SessionCommand>) -> GatewayResult<()> {
        loop {
            let socket = self.socket.as_mut().ok_or(GatewayError::NotConnected)?;

            tokio::select! {
                command = commands.recv() => match command {
                    Some(SessionCommand::UpdateStatus { status, reply }) => {
                        let result = self.update_status(status).await;
                        // Caller may have stopped waiting
                        let _ = reply.send(result);
                    }
                    Some(SessionCommand::Disconnect) | None => return Ok(()),
                },
                frame = socket.recv() => match frame? {
                    Frame::Text(text) => match self.handle_event(&text).await {
                        Ok(()) => {}
                        Err(GatewayError::MalformedMessage(reason)) => self.discard(reason),
                        Err(err) => return Err(err),
                    },
                    Frame::Invalid(reason) => self.discard(reason),
                    Frame::Closed { code, reason } => {
                        let known = code.and_then(CloseCode::from_u16);
                        tracing::warn!(
                            code = ?code,
                            reason = %reason,
                            description = known.map(CloseCode::description),
                            resumable = known.map(CloseCode::should_reconnect),
                            "Gateway closed the connection"
                        );
                        return Err(GatewayError::Closed { code, reason });
                    }
                },
                () = self.heartbeat.tick() => self.send_heartbeat().await?,
            }
        }
    }

    /// React to one inbound text frame
    pub(crate) async fn handle_event(&mut self, raw: &str) -> GatewayResult<()> {
        match GatewayEvent::parse(raw)? {
            GatewayEvent::Hello(hello) => {
                if hello.heartbeat_interval == 0 {
                    return Err(GatewayError::MalformedMessage(
                        "heartbeat_interval must be positive".to_string(),
                    ));
                }

                tracing::info!(
                    heartbeat_interval_ms = hello.heartbeat_interval,
                    "Received Hello"
                );
                self.start_heartbeat(Duration::from_millis(hello.heartbeat_interval));
                self.identify().await
            }
            GatewayEvent::HeartbeatAck => {
                self.heartbeat.record_ack();
                tracing::trace!("Heartbeat acknowledged");
                Ok(())
            }
            GatewayEvent::Dispatch {
                event,
                sequence,
                data,
            } => {
                if sequence.is_some() {
                    self.last_sequence = sequence;
                }

                if self.state.get() == ConnectionState::Identifying {
                    self.state.set(ConnectionState::Connected);
                    tracing::info!(event = %event, "Gateway session established");
                }

                tracing::debug!(event = %event, sequence = ?sequence, "Dispatch received");
                self.handlers.dispatch(&event, data);
                Ok(())
            }
            GatewayEvent::Unknown { op } => {
                tracing::debug!(
                    op = op,
                    name = OpCode::from_raw(op).map(OpCode::name),
                    "Ignoring gateway opcode"
                );
                Ok(())
            }
        }
    }

    /// Report an unusable frame and keep the session going
    fn discard(&self, reason: String) {
        let err = GatewayError::MalformedMessage(reason);
        tracing::warn!(error = %err, "Discarding gateway frame");
        self.handlers.report_error(&err);
    }

    /// (Re)arm the heartbeat timer
    pub(crate) fn start_heartbeat(&mut self, interval: Duration) {
        self.heartbeat.start(interval);
    }

    /// Send Identify with the configured token, intents, and current presence
    async fn identify(&mut self) -> GatewayResult<()> {
        let payload = IdentifyPayload {
            token: self.token.expose().to_string(),
            intents: self.intents,
            properties: self.properties.clone(),
            presence: self.presence,
        };

        self.send(OutboundMessage::identify(&payload)?).await?;
        self.state.set(ConnectionState::Identifying);

        tracing::info!(intents = %self.intents, "Identify sent");
        Ok(())
    }

    async fn send_heartbeat(&mut self) -> GatewayResult<()> {
        if !self.heartbeat.record_sent() {
            tracing::warn!(
                sent = self.heartbeat.sent(),
                acked = self.heartbeat.acked(),
                "Previous heartbeat was not acknowledged"
            );
        }

        self.send(OutboundMessage::heartbeat()).await?;
        tracing::trace!(last_sequence = ?self.last_sequence, "Heartbeat sent");
        Ok(())
    }

    /// Send a presence update; later Identifies report the same presence
    pub(crate) async fn update_status(&mut self, status: PresenceStatus) -> GatewayResult<()> {
        let presence = Presence::new(status);
        self.send(OutboundMessage::presence_update(presence.into())?)
            .await?;
        self.presence = presence;

        tracing::info!(status = %status, "Presence updated");
        Ok(())
    }

    async fn send(&mut self, message: OutboundMessage) -> GatewayResult<()> {
        debug_assert!(message.op.is_client_op(), "{} is not sent by clients", message.op);

        let socket = self.socket.as_mut().ok_or(GatewayError::NotConnected)?;
        let text = message.to_json()?;

        tracing::trace!(op = %message.op, "Sending gateway message");
        socket.send(text).await?;
        Ok(())
    }

    async fn shutdown(&mut self) {
        self.heartbeat.stop();

        if let Some(mut socket) = self.socket.take() {
            if let Err(e) = socket.close().await {
                tracing::debug!(error = %e, "Error closing gateway socket");
            }
        }

        self.state.set(ConnectionState::Disconnected);
    }
}
