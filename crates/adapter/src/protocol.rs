//! Protocol module - JSON message types for the control adapter
//!
//! Every message is one JSON object per line and carries `type` and `seq`.
//! `ts` (milliseconds) is optional on inbound messages.

use serde::{Deserialize, Serialize};

use crate::core::{BlockSnapshot, LevelSnapshot};

pub const PROTOCOL_VERSION: &str = "1.0.0";
pub const GAME_ID: &str = "fold-puzzle";

// ============== Client -> Game Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HelloType {
    #[default]
    #[serde(rename = "hello")]
    Hello,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CommandType {
    #[default]
    #[serde(rename = "command")]
    Command,
}

/// Client hello message (first message on a connection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloMessage {
    #[serde(rename = "type", default)]
    pub msg_type: HelloType,
    pub seq: u64,
    #[serde(default)]
    pub ts: u64,
    pub client: ClientInfo,
    pub protocol_version: String,
    #[serde(default)]
    pub requested: RequestedCapabilities,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestedCapabilities {
    #[serde(default = "default_true")]
    pub stream_observations: bool,
}

impl Default for RequestedCapabilities {
    fn default() -> Self {
        Self {
            stream_observations: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandAction {
    Swipe,
    Rewind,
    Snapshot,
}

/// Command message; `x`, `z` and `direction` are required for `swipe`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandMessage {
    #[serde(rename = "type", default)]
    pub msg_type: CommandType,
    pub seq: u64,
    #[serde(default)]
    pub ts: u64,
    pub action: CommandAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

// ============== Game -> Client Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WelcomeType {
    #[serde(rename = "welcome")]
    Welcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckType {
    #[serde(rename = "ack")]
    Ack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AckStatus {
    #[serde(rename = "ok")]
    Ok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    HandshakeRequired,
    ProtocolMismatch,
    NotController,
    InvalidCommand,
    Backpressure,
}

impl ErrorCode {
    pub fn code(self) -> &'static str {
        match self {
            ErrorCode::HandshakeRequired => "handshake_required",
            ErrorCode::ProtocolMismatch => "protocol_mismatch",
            ErrorCode::NotController => "not_controller",
            ErrorCode::InvalidCommand => "invalid_command",
            ErrorCode::Backpressure => "backpressure",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::HandshakeRequired => "send hello before command",
            ErrorCode::ProtocolMismatch => "protocol version not supported",
            ErrorCode::NotController => "only the controller may send commands",
            ErrorCode::InvalidCommand => "invalid command",
            ErrorCode::Backpressure => "command queue is full",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignedRole {
    Controller,
    Observer,
}

/// Welcome message (response to hello)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeMessage {
    #[serde(rename = "type")]
    pub msg_type: WelcomeType,
    pub seq: u64,
    pub ts: u64,
    pub protocol_version: String,
    pub client_id: u64,
    pub role: AssignedRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller_id: Option<u64>,
    pub game_id: String,
}

/// Acknowledgment for an applied command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckMessage {
    #[serde(rename = "type")]
    pub msg_type: AckType,
    pub seq: u64,
    pub ts: u64,
    pub status: AckStatus,
    /// `fold`, `unfold`, `noop`, `rewind` or `snapshot`.
    pub outcome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub seq: u64,
    pub ts: u64,
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObservationType {
    #[serde(rename = "observation")]
    Observation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockObservation {
    pub id: u32,
    pub x: i32,
    pub z: i32,
    pub initial_x: i32,
    pub initial_z: i32,
    pub layer: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<u32>,
    pub interactive: bool,
}

impl From<&BlockSnapshot> for BlockObservation {
    fn from(b: &BlockSnapshot) -> Self {
        Self {
            id: b.id.0,
            x: b.position.x,
            z: b.position.z,
            initial_x: b.initial_position.x,
            initial_z: b.initial_position.z,
            layer: b.layer,
            parent: b.parent.map(|p| p.0),
            interactive: b.interactive,
        }
    }
}

/// Level state observation (streamed to observing clients)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: ObservationType,
    pub seq: u64,
    pub ts: u64,
    pub level_index: usize,
    pub level_name: String,
    pub busy: bool,
    pub rewinding: bool,
    pub won: bool,
    /// Levels won since the runner started.
    pub levels_completed: u64,
    pub blocks: Vec<BlockObservation>,
    pub rewind_stack: Vec<u32>,
}

// ============== Message Parsing ==============

/// Parsed incoming message
#[derive(Debug, Clone)]
pub enum ParsedMessage {
    Hello(HelloMessage),
    Command(CommandMessage),
    Unknown(UnknownMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownMessage {
    pub seq: u64,
}

/// Parse one inbound line.
///
/// A well-formed object with an unrecognized `type` is not a parse error; it
/// comes back as [`ParsedMessage::Unknown`].
pub fn parse_message(json: &str) -> Result<ParsedMessage, serde_json::Error> {
    #[derive(Debug, Deserialize)]
    #[serde(tag = "type")]
    enum InboundMessage {
        #[serde(rename = "hello")]
        Hello(HelloMessage),
        #[serde(rename = "command")]
        Command(CommandMessage),
    }

    match serde_json::from_str::<InboundMessage>(json) {
        Ok(InboundMessage::Hello(m)) => Ok(ParsedMessage::Hello(m)),
        Ok(InboundMessage::Command(m)) => Ok(ParsedMessage::Command(m)),
        Err(e) => {
            #[derive(Debug, Deserialize)]
            struct Envelope {
                #[serde(rename = "type")]
                msg_type: Option<String>,
                seq: Option<u64>,
            }
            let env = serde_json::from_str::<Envelope>(json)?;
            match env.msg_type.as_deref() {
                Some("hello") | Some("command") => Err(e),
                _ => Ok(ParsedMessage::Unknown(UnknownMessage {
                    seq: env.seq.unwrap_or(0),
                })),
            }
        }
    }
}

/// Best-effort `seq` from a line that failed to parse.
pub fn extract_seq_best_effort(s: &str) -> Option<u64> {
    let start = s.find("\"seq\"")?;
    let rest = &s[start + 5..];
    let rest = rest[rest.find(':')? + 1..].trim_start();
    let end = rest.bytes().take_while(u8::is_ascii_digit).count();
    rest[..end].parse().ok()
}

// ============== Utility Functions ==============

pub fn create_hello(seq: u64, client_name: &str, protocol_version: &str) -> HelloMessage {
    HelloMessage {
        msg_type: HelloType::Hello,
        seq,
        ts: current_timestamp_ms(),
        client: ClientInfo {
            name: client_name.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        protocol_version: protocol_version.to_string(),
        requested: RequestedCapabilities::default(),
    }
}

pub fn create_welcome(
    seq: u64,
    protocol_version: &str,
    client_id: u64,
    role: AssignedRole,
    controller_id: Option<u64>,
) -> WelcomeMessage {
    WelcomeMessage {
        msg_type: WelcomeType::Welcome,
        seq,
        ts: current_timestamp_ms(),
        protocol_version: protocol_version.to_string(),
        client_id,
        role,
        controller_id,
        game_id: GAME_ID.to_string(),
    }
}

pub fn create_ack(seq: u64, outcome: &str, reason: Option<&str>) -> AckMessage {
    AckMessage {
        msg_type: AckType::Ack,
        seq,
        ts: current_timestamp_ms(),
        status: AckStatus::Ok,
        outcome: outcome.to_string(),
        reason: reason.map(str::to_string),
    }
}

pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        seq,
        ts: current_timestamp_ms(),
        code,
        message: message.to_string(),
    }
}

/// Build an observation from a level snapshot.
pub fn build_observation(
    snapshot: &LevelSnapshot,
    seq: u64,
    level_index: usize,
    level_name: &str,
    busy: bool,
    rewinding: bool,
    levels_completed: u64,
) -> ObservationMessage {
    ObservationMessage {
        msg_type: ObservationType::Observation,
        seq,
        ts: current_timestamp_ms(),
        level_index,
        level_name: level_name.to_string(),
        busy,
        rewinding,
        won: snapshot.won,
        levels_completed,
        blocks: snapshot.blocks.iter().map(BlockObservation::from).collect(),
        rewind_stack: snapshot.rewind_stack.iter().map(|b| b.0).collect(),
    }
}

pub(crate) fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
