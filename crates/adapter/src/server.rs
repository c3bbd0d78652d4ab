//! TCP server for the control adapter
//!
//! Handles incoming connections and manages client lifecycle.
//! Uses tokio for async networking.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, RwLock};
use tracing::{debug, info, warn};

use crate::protocol::*;
use crate::runtime::{ClientCommand, InboundCommand, InboundPayload, OutboundMessage};
use crate::types::{Direction, GridPos};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub protocol_version: String,
    pub max_pending_commands: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7788,
            protocol_version: PROTOCOL_VERSION.to_string(),
            max_pending_commands: 10,
        }
    }
}

impl ServerConfig {
    /// `FOLD_AI_HOST`, `FOLD_AI_PORT` and `FOLD_AI_MAX_PENDING`, falling back
    /// to the defaults when unset or unparsable.
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let host = env::var("FOLD_AI_HOST").unwrap_or(defaults.host);
        let port = env::var("FOLD_AI_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);
        let max_pending_commands = env::var("FOLD_AI_MAX_PENDING")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_pending_commands);

        Self {
            host,
            port,
            protocol_version: defaults.protocol_version,
            max_pending_commands,
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid adapter address {}:{}", self.host, self.port))
    }
}

/// Shared server state
pub struct ServerState {
    config: ServerConfig,
    clients: RwLock<Vec<ClientHandle>>,
    controller: RwLock<Option<usize>>,
}

impl ServerState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            clients: RwLock::new(Vec::new()),
            controller: RwLock::new(None),
        }
    }

    /// `FOLD_AI_DISABLED=1` (or `true`) turns the adapter off.
    pub fn is_disabled() -> bool {
        std::env::var("FOLD_AI_DISABLED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    async fn is_handshaken(&self, client_id: usize) -> bool {
        let clients = self.clients.read().await;
        clients
            .iter()
            .find(|c| c.id == client_id)
            .map(|c| c.handshaken)
            .unwrap_or(false)
    }

    async fn is_controller(&self, client_id: usize) -> bool {
        *self.controller.read().await == Some(client_id)
    }

    /// Record `seq` if it is strictly greater than the last one seen.
    async fn check_and_update_seq(&self, client_id: usize, seq: u64) -> bool {
        let mut clients = self.clients.write().await;
        let Some(client) = clients.iter_mut().find(|c| c.id == client_id) else {
            return true;
        };
        match client.last_seq {
            Some(prev) if seq <= prev => false,
            _ => {
                client.last_seq = Some(seq);
                true
            }
        }
    }

    async fn send_to(&self, client_id: usize, msg: ClientOutbound) {
        let clients = self.clients.read().await;
        if let Some(c) = clients.iter().find(|c| c.id == client_id) {
            let _ = c.tx.send(msg);
        }
    }
}

/// Handle to a connected client
pub struct ClientHandle {
    pub id: usize,
    pub stream_observations: bool,
    pub handshaken: bool,
    pub last_seq: Option<u64>,
    pub tx: mpsc::UnboundedSender<ClientOutbound>,
}

#[derive(Debug, Clone)]
pub enum ClientOutbound {
    Welcome(WelcomeMessage),
    Ack(AckMessage),
    Error(ErrorMessage),
    Observation(ObservationMessage),
}

impl ClientOutbound {
    fn write_json(&self, buf: &mut Vec<u8>) -> serde_json::Result<()> {
        match self {
            ClientOutbound::Welcome(m) => serde_json::to_writer(buf, m),
            ClientOutbound::Ack(m) => serde_json::to_writer(buf, m),
            ClientOutbound::Error(m) => serde_json::to_writer(buf, m),
            ClientOutbound::Observation(m) => serde_json::to_writer(buf, m),
        }
    }
}

/// Run the TCP server until the listener fails.
///
/// `ready_tx` receives the bound address once the listener is up, which is
/// how callers binding port 0 learn the real port.
pub async fn run_server(
    config: ServerConfig,
    command_tx: mpsc::Sender<InboundCommand>,
    mut out_rx: mpsc::UnboundedReceiver<OutboundMessage>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind adapter on {}", addr))?;
    let bound = listener.local_addr()?;
    info!(%bound, "adapter listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let state = Arc::new(ServerState::new(config));
    let mut client_id_counter = 0usize;

    // Outbound dispatcher.
    {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                match msg {
                    OutboundMessage::ToClientAck { client_id, ack } => {
                        state.send_to(client_id, ClientOutbound::Ack(ack)).await;
                    }
                    OutboundMessage::ToClientObservation { client_id, obs } => {
                        state.send_to(client_id, ClientOutbound::Observation(obs)).await;
                    }
                    OutboundMessage::BroadcastObservation { obs } => {
                        let clients = state.clients.read().await;
                        for c in clients.iter().filter(|c| c.handshaken && c.stream_observations) {
                            let _ = c.tx.send(ClientOutbound::Observation(obs.clone()));
                        }
                    }
                }
            }
        });
    }

    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;
        info!(client_id, %addr, "client connected");

        let state = Arc::clone(&state);
        let command_tx = command_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, client_id, state, command_tx).await {
                warn!(client_id, error = %e, "client error");
            }
            info!(client_id, "client disconnected");
        });
    }
}

/// Handle a single client connection
async fn handle_client(
    socket: TcpStream,
    client_id: usize,
    state: Arc<ServerState>,
    command_tx: mpsc::Sender<InboundCommand>,
) -> anyhow::Result<()> {
    let (reader, mut writer) = tokio::io::split(socket);
    let mut reader = BufReader::new(reader);
    let (tx, mut rx) = mpsc::unbounded_channel::<ClientOutbound>();

    state.clients.write().await.push(ClientHandle {
        id: client_id,
        stream_observations: false,
        handshaken: false,
        last_seq: None,
        tx: tx.clone(),
    });

    let write_task = tokio::spawn(async move {
        let mut buf: Vec<u8> = Vec::with_capacity(1024);
        while let Some(msg) = rx.recv().await {
            buf.clear();
            if msg.write_json(&mut buf).is_err() {
                continue;
            }
            buf.push(b'\n');
            if writer.write_all(&buf).await.is_err() || writer.flush().await.is_err() {
                break;
            }
        }
    });

    let send_error = |seq: u64, code: ErrorCode, message: &str| {
        let _ = tx.send(ClientOutbound::Error(create_error(seq, code, message)));
    };

    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match parse_message(trimmed) {
            Ok(ParsedMessage::Hello(hello)) => {
                if state.is_handshaken(client_id).await
                    && !state.check_and_update_seq(client_id, hello.seq).await
                {
                    send_error(hello.seq, ErrorCode::InvalidCommand, "seq must be strictly increasing");
                    continue;
                }

                if !same_major(&hello.protocol_version, &state.config.protocol_version) {
                    send_error(
                        hello.seq,
                        ErrorCode::ProtocolMismatch,
                        &format!("protocol version {} not supported", hello.protocol_version),
                    );
                    break;
                }

                let role = {
                    let mut controller = state.controller.write().await;
                    let mut clients = state.clients.write().await;
                    if let Some(client) = clients.iter_mut().find(|c| c.id == client_id) {
                        client.handshaken = true;
                        client.last_seq = Some(hello.seq);
                        client.stream_observations = hello.requested.stream_observations;
                    }
                    if controller.is_none() {
                        *controller = Some(client_id);
                        info!(client_id, name = %hello.client.name, "client is now controller");
                    }
                    if *controller == Some(client_id) {
                        AssignedRole::Controller
                    } else {
                        AssignedRole::Observer
                    }
                };

                let controller_id = state.controller.read().await.map(|id| id as u64);
                let welcome = create_welcome(
                    hello.seq,
                    &state.config.protocol_version,
                    client_id as u64,
                    role,
                    controller_id,
                );
                let _ = tx.send(ClientOutbound::Welcome(welcome));

                if hello.requested.stream_observations
                    && command_tx
                        .try_send(InboundCommand {
                            client_id,
                            seq: hello.seq,
                            payload: InboundPayload::SnapshotRequest,
                        })
                        .is_err()
                {
                    send_error(hello.seq, ErrorCode::Backpressure, ErrorCode::Backpressure.message());
                }
            }

            Ok(ParsedMessage::Command(cmd)) => {
                if !state.is_handshaken(client_id).await {
                    send_error(cmd.seq, ErrorCode::HandshakeRequired, ErrorCode::HandshakeRequired.message());
                    continue;
                }
                if !state.check_and_update_seq(client_id, cmd.seq).await {
                    send_error(cmd.seq, ErrorCode::InvalidCommand, "seq must be strictly increasing");
                    continue;
                }
                if !state.is_controller(client_id).await {
                    send_error(cmd.seq, ErrorCode::NotController, ErrorCode::NotController.message());
                    continue;
                }

                let command = match map_command(&cmd) {
                    Ok(c) => c,
                    Err(message) => {
                        send_error(cmd.seq, ErrorCode::InvalidCommand, &message);
                        continue;
                    }
                };
                debug!(client_id, seq = cmd.seq, ?command, "command queued");

                // Ack is sent by the game loop once the command is applied.
                if command_tx
                    .try_send(InboundCommand {
                        client_id,
                        seq: cmd.seq,
                        payload: InboundPayload::Command(command),
                    })
                    .is_err()
                {
                    send_error(cmd.seq, ErrorCode::Backpressure, ErrorCode::Backpressure.message());
                }
            }

            Ok(ParsedMessage::Unknown(unknown)) => {
                if state.is_handshaken(client_id).await
                    && !state.check_and_update_seq(client_id, unknown.seq).await
                {
                    send_error(unknown.seq, ErrorCode::InvalidCommand, "seq must be strictly increasing");
                    continue;
                }
                send_error(unknown.seq, ErrorCode::InvalidCommand, "unknown message type");
            }

            Err(e) => {
                let seq = extract_seq_best_effort(trimmed).unwrap_or(0);
                send_error(seq, ErrorCode::InvalidCommand, &format!("JSON parse error: {}", e));
            }
        }
    }

    // Remove the client and hand control to the oldest remaining one.
    {
        let mut controller = state.controller.write().await;
        let mut clients = state.clients.write().await;
        clients.retain(|c| c.id != client_id);

        if *controller == Some(client_id) {
            *controller = clients.iter().filter(|c| c.handshaken).map(|c| c.id).min();
            match *controller {
                Some(next) => info!(client_id = next, "controller promoted"),
                None => info!(client_id, "controller released"),
            }
        }
    }

    drop(tx);
    let _ = write_task.await;
    Ok(())
}

fn same_major(requested: &str, supported: &str) -> bool {
    requested.split('.').next() == supported.split('.').next()
}

/// Map a protocol command into a game-loop command.
fn map_command(cmd: &CommandMessage) -> Result<ClientCommand, String> {
    match cmd.action {
        CommandAction::Swipe => {
            let (Some(x), Some(z)) = (cmd.x, cmd.z) else {
                return Err("swipe requires x and z".to_string());
            };
            let Some(ref dir) = cmd.direction else {
                return Err("swipe requires a direction".to_string());
            };
            let direction =
                Direction::from_str(dir).ok_or_else(|| format!("unknown direction: {}", dir))?;
            Ok(ClientCommand::Swipe {
                pos: GridPos::new(x, z),
                direction,
            })
        }
        CommandAction::Rewind => Ok(ClientCommand::Rewind),
        CommandAction::Snapshot => Ok(ClientCommand::Snapshot),
    }
}
