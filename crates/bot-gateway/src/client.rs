//! Gateway client
//!
//! The handle a bot holds: register handlers, log in, change status, and shut
//! the session down. The session itself runs on its own task.

use crate::discovery::{connect_url, GatewayDiscovery};
use crate::dispatch::EventHandlers;
use crate::error::{GatewayError, GatewayResult};
use crate::session::{ConnectionState, Session, SessionCommand, StateHandle};
use crate::transport::{Connector, WebSocketConnector};
use bot_common::BotConfig;
use bot_core::PresenceStatus;
use bot_rest::RestClient;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

/// Capacity of the command channel to the session task
const COMMAND_BUFFER: usize = 16;

struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
    task: JoinHandle<GatewayResult<()>>,
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        // Dropping the client must not leave a heartbeating orphan
        self.task.abort();
    }
}

/// Bot gateway client
pub struct GatewayClient {
    config: BotConfig,
    rest: RestClient,
    discovery: Arc<dyn GatewayDiscovery>,
    connector: Arc<dyn Connector>,
    handlers: Arc<EventHandlers>,
    state: StateHandle,
    session: Option<SessionHandle>,
}

impl GatewayClient {
    /// Create a client that discovers its gateway through the REST API
    pub fn new(config: BotConfig) -> GatewayResult<Self> {
        let rest = RestClient::new(&config).map_err(|e| GatewayError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            discovery: Arc::new(rest.clone()),
            connector: Arc::new(WebSocketConnector),
            rest,
            config,
            handlers: EventHandlers::new_shared(),
            state: StateHandle::new(),
            session: None,
        })
    }

    /// Replace the gateway URL source
    #[must_use]
    pub fn with_discovery(mut self, discovery: impl GatewayDiscovery + 'static) -> Self {
        self.discovery = Arc::new(discovery);
        self
    }

    /// Replace the socket connector
    #[must_use]
    pub fn with_connector(mut self, connector: impl Connector + 'static) -> Self {
        self.connector = Arc::new(connector);
        self
    }

    /// REST commands sharing this client's token
    pub fn rest(&self) -> &RestClient {
        &self.rest
    }

    /// Register a handler for a dispatch event, replacing any previous one
    ///
    /// Handlers run on the session task; long work should be spawned.
    pub fn on<F>(&self, event: impl AsRef<str>, handler: F)
    where
        F: Fn(Value) + Send + Sync + 'static,
    {
        if self.handlers.register(event.as_ref(), handler) {
            tracing::debug!(event = %event.as_ref(), "Replaced event handler");
        }
    }

    /// Remove the handler for a dispatch event
    ///
    /// Later dispatches of `event` are dropped. Returns whether a handler was
    /// registered.
    pub fn off(&self, event: impl AsRef<str>) -> bool {
        self.handlers.unregister(event.as_ref())
    }

    /// Register the hook for recoverable session errors
    pub fn on_error<F>(&self, handler: F)
    where
        F: Fn(&GatewayError) + Send + Sync + 'static,
    {
        self.handlers.set_error_handler(handler);
    }

    /// Check the token, then connect
    pub async fn login(&mut self) -> GatewayResult<()> {
        if self.config.token.is_empty() {
            return Err(GatewayError::MissingCredential);
        }
        self.connect().await
    }

    /// Discover the gateway and open the socket
    ///
    /// Returns once the socket is open; Hello and Identify happen afterwards
    /// on the session task.
    pub async fn connect(&mut self) -> GatewayResult<()> {
        if self.is_running() {
            return Err(GatewayError::AlreadyConnected);
        }

        if let Some(err) = self.reap_finished().await {
            tracing::warn!(error = %err, "Previous gateway session ended with an error");
        }

        self.state.set(ConnectionState::Connecting);

        let transport = match self.open_socket().await {
            Ok(transport) => transport,
            Err(e) => {
                self.state.set(ConnectionState::Disconnected);
                return Err(e);
            }
        };

        let session = Session::new(
            &self.config,
            transport,
            Arc::clone(&self.handlers),
            self.state.clone(),
        );
        let (commands, rx) = mpsc::channel(COMMAND_BUFFER);
        let task = tokio::spawn(session.run(rx));

        self.session = Some(SessionHandle { commands, task });
        Ok(())
    }

    async fn open_socket(&self) -> GatewayResult<Box<dyn crate::transport::Transport>> {
        let base = self.discovery.gateway_url().await?;
        let url = connect_url(&base, self.config.gateway_version);

        tracing::info!(url = %url, "Connecting to gateway");

        self.connector
            .connect(&url)
            .await
            .map_err(GatewayError::handshake)
    }

    /// Validate a status name and send a presence update
    ///
    /// Accepts `online`, `dnd`, `idle`, or `invisible`.
    pub async fn status(&self, status: &str) -> GatewayResult<()> {
        let status: PresenceStatus = status
            .parse()
            .map_err(|e: bot_core::PresenceParseError| GatewayError::InvalidArgument(e.to_string()))?;
        self.set_status(status).await
    }

    /// Send a presence update
    pub async fn set_status(&self, status: PresenceStatus) -> GatewayResult<()> {
        let session = self
            .session
            .as_ref()
            .filter(|s| !s.task.is_finished())
            .ok_or(GatewayError::NotConnected)?;

        let (reply, rx) = oneshot::channel();
        session
            .commands
            .send(SessionCommand::UpdateStatus { status, reply })
            .await
            .map_err(|_| GatewayError::NotConnected)?;

        rx.await.map_err(|_| GatewayError::NotConnected)?
    }

    /// Close the socket and wait for the session task
    ///
    /// Succeeds if there is no session.
    pub async fn disconnect(&mut self) -> GatewayResult<()> {
        let Some(session) = self.session.as_ref() else {
            return Ok(());
        };

        // The task may already be gone; its result is collected below
        let _ = session.commands.send(SessionCommand::Disconnect).await;
        self.wait().await
    }

    /// Wait until the session ends and return how it ended
    pub async fn wait(&mut self) -> GatewayResult<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };

        let result = join(session).await;

        self.session = None;
        self.state.set(ConnectionState::Disconnected);
        result
    }

    /// Current connection state
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.state.get()
    }

    /// Receiver notified on every state change
    #[must_use]
    pub fn subscribe_state(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    fn is_running(&self) -> bool {
        self.session.as_ref().is_some_and(|s| !s.task.is_finished())
    }

    /// Collect the outcome of a session that ended without `wait()`
    async fn reap_finished(&mut self) -> Option<GatewayError> {
        if !self.session.as_ref().is_some_and(|s| s.task.is_finished()) {
            return None;
        }

        let mut session = self.session.take()?;
        join(&mut session).await.err()
    }
}

async fn join(session: &mut SessionHandle) -> GatewayResult<()> {
    match (&mut session.task).await {
        Ok(result) => result,
        Err(e) => Err(GatewayError::Internal(e.to_string())),
    }
}

impl std::fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient")
            .field("state", &self.state.get())
            .field("handlers", &self.handlers)
            .finish_non_exhaustive()
    }
}
