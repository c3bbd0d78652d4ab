//! Adapter - external control of the puzzle over TCP
//!
//! External agents drive the puzzle with discrete swipe and rewind events
//! and receive the level state back as observations.
//!
//! # Protocol Overview
//!
//! The adapter speaks **line-delimited JSON** over TCP:
//!
//! 1. **Connection**: client connects (default `127.0.0.1:7788`)
//! 2. **Handshake**: client sends `hello`, server answers `welcome`
//! 3. **Controller assignment**: the first client to hello becomes the controller;
//!    later clients observe. When the controller leaves, the oldest remaining
//!    client takes over.
//! 4. **Commanding**: the controller sends `command` with action `swipe`,
//!    `rewind` or `snapshot`; the game loop answers with `ack` once applied.
//! 5. **Observation streaming**: after each settled transition the level state
//!    is broadcast as an `observation`. A won level gets one last observation
//!    with `won: true` before the next level replaces it.
//!
//! `seq` must strictly increase per client. Malformed lines, unknown message
//! types and bad commands get an `error` reply; only a protocol version
//! mismatch closes the connection. A full command queue replies with
//! `error { code: "backpressure" }`.
//!
//! # Environment Variables
//!
//! - `FOLD_AI_HOST`: bind address (default `127.0.0.1`)
//! - `FOLD_AI_PORT`: port (default `7788`)
//! - `FOLD_AI_MAX_PENDING`: command queue bound (default `10`)
//! - `FOLD_AI_DISABLED`: `1` or `true` disables the adapter
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"hello","seq":1,"client":{"name":"bot","version":"0.1"},"protocol_version":"1.0.0"}
//! Server -> Client: {"type":"welcome","seq":1,"ts":...,"protocol_version":"1.0.0","client_id":1,"role":"controller","controller_id":1,"game_id":"fold-puzzle"}
//! Server -> Client: {"type":"observation","seq":1,"ts":...,"level_index":0,"level_name":"pair","busy":false,...}
//! Client -> Server: {"type":"command","seq":2,"action":"swipe","x":1,"z":0,"direction":"left"}
//! Server -> Client: {"type":"ack","seq":2,"ts":...,"status":"ok","outcome":"fold"}
//! ```

pub mod protocol;
pub mod runtime;
pub mod server;

pub use fold_puzzle_core as core;
pub use fold_puzzle_types as types;

pub use protocol::*;
pub use runtime::{Adapter, ClientCommand, InboundCommand, InboundPayload, OutboundMessage};
pub use server::{run_server, ServerConfig, ServerState};
