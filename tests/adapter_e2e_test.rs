use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use fold_puzzle::adapter::protocol::{build_observation, create_ack, create_hello, PROTOCOL_VERSION};
use fold_puzzle::adapter::server::{run_server, ServerConfig};
use fold_puzzle::adapter::{ClientCommand, InboundCommand, InboundPayload, OutboundMessage};
use fold_puzzle::core::Level;
use fold_puzzle::types::{Direction, GridPos};

struct Harness {
    addr: SocketAddr,
    cmd_rx: mpsc::Receiver<InboundCommand>,
    out_tx: mpsc::UnboundedSender<OutboundMessage>,
    server: JoinHandle<()>,
}

async fn start(max_pending: usize) -> Harness {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        protocol_version: PROTOCOL_VERSION.to_string(),
        max_pending_commands: max_pending,
    };
    let (cmd_tx, cmd_rx) = mpsc::channel::<InboundCommand>(max_pending);
    let (out_tx, out_rx) = mpsc::unbounded_channel::<OutboundMessage>();
    let (ready_tx, ready_rx) = oneshot::channel();

    let server = tokio::spawn(async move {
        let _ = run_server(config, cmd_tx, out_rx, Some(ready_tx)).await;
    });
    let addr = tokio::time::timeout(Duration::from_secs(2), ready_rx)
        .await
        .expect("server did not signal ready")
        .expect("ready channel dropped");

    Harness {
        addr,
        cmd_rx,
        out_tx,
        server,
    }
}

struct Client {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl Client {
    async fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.expect("connect failed");
        let (read_half, writer) = stream.into_split();
        Self {
            lines: BufReader::new(read_half).lines(),
            writer,
        }
    }

    async fn send(&mut self, line: &str) {
        self.writer.write_all(line.as_bytes()).await.unwrap();
        self.writer.write_all(b"\n").await.unwrap();
        self.writer.flush().await.unwrap();
    }

    async fn hello(&mut self, seq: u64) -> serde_json::Value {
        let hello = serde_json::to_string(&create_hello(seq, "e2e-test", PROTOCOL_VERSION)).unwrap();
        self.send(&hello).await;
        self.recv().await.expect("expected welcome")
    }

    async fn recv(&mut self) -> Option<serde_json::Value> {
        let line = tokio::time::timeout(Duration::from_secs(2), self.lines.next_line())
            .await
            .expect("timed out waiting for a line")
            .expect("read failed")?;
        Some(serde_json::from_str(&line).unwrap())
    }
}

async fn next_inbound(rx: &mut mpsc::Receiver<InboundCommand>) -> InboundCommand {
    tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .unwrap()
        .expect("expected inbound command")
}

#[tokio::test]
async fn hello_swipe_ack_and_observation() {
    let mut h = start(8).await;
    let mut client = Client::connect(h.addr).await;

    let welcome = client.hello(1).await;
    assert_eq!(welcome["type"], "welcome");
    assert_eq!(welcome["seq"], 1);
    assert_eq!(welcome["role"], "controller");
    assert_eq!(welcome["game_id"], "fold-puzzle");

    // Handshake asks the game loop for an initial snapshot.
    let inbound = next_inbound(&mut h.cmd_rx).await;
    assert!(matches!(inbound.payload, InboundPayload::SnapshotRequest));

    client
        .send(r#"{"type":"command","seq":2,"action":"swipe","x":1,"z":0,"direction":"left"}"#)
        .await;
    let inbound = next_inbound(&mut h.cmd_rx).await;
    assert_eq!(inbound.seq, 2);
    match inbound.payload {
        InboundPayload::Command(ClientCommand::Swipe { pos, direction }) => {
            assert_eq!(pos, GridPos::new(1, 0));
            assert_eq!(direction, Direction::Left);
        }
        other => panic!("unexpected payload {:?}", other),
    }

    h.out_tx
        .send(OutboundMessage::ToClientAck {
            client_id: inbound.client_id,
            ack: create_ack(2, "fold", None),
        })
        .unwrap();
    let ack = client.recv().await.unwrap();
    assert_eq!(ack["type"], "ack");
    assert_eq!(ack["seq"], 2);
    assert_eq!(ack["outcome"], "fold");

    let level = Level::from_cells([(0, 0), (1, 0)]).unwrap();
    let obs = build_observation(&level.snapshot(), 10, 0, "pair", false, false, 0);
    h.out_tx.send(OutboundMessage::BroadcastObservation { obs }).unwrap();
    let obs = client.recv().await.unwrap();
    assert_eq!(obs["type"], "observation");
    assert_eq!(obs["seq"], 10);
    assert_eq!(obs["blocks"].as_array().unwrap().len(), 2);

    h.server.abort();
}

#[tokio::test]
async fn second_client_observes_only() {
    let h = start(8).await;
    let mut first = Client::connect(h.addr).await;
    first.hello(1).await;

    let mut second = Client::connect(h.addr).await;
    let welcome = second.hello(1).await;
    assert_eq!(welcome["role"], "observer");
    assert_eq!(welcome["controller_id"], 1);

    second.send(r#"{"type":"command","seq":2,"action":"rewind"}"#).await;
    let err = second.recv().await.unwrap();
    assert_eq!(err["type"], "error");
    assert_eq!(err["code"], "not_controller");

    h.server.abort();
}

#[tokio::test]
async fn controller_role_passes_on_disconnect() {
    let mut h = start(8).await;
    let mut first = Client::connect(h.addr).await;
    first.hello(1).await;
    let mut second = Client::connect(h.addr).await;
    second.hello(1).await;
    drop(first);

    // Poll until the server has noticed the disconnect.
    let mut promoted = false;
    for seq in 2..50u64 {
        second
            .send(&format!(r#"{{"type":"command","seq":{},"action":"snapshot"}}"#, seq))
            .await;
        if let Ok(Some(cmd)) = tokio::time::timeout(Duration::from_millis(50), async {
            loop {
                match h.cmd_rx.recv().await {
                    Some(InboundCommand {
                        payload: InboundPayload::SnapshotRequest,
                        ..
                    }) => continue,
                    other => return other,
                }
            }
        })
        .await
        {
            assert!(matches!(cmd.payload, InboundPayload::Command(ClientCommand::Snapshot)));
            promoted = true;
            break;
        }
        let err = second.recv().await.unwrap();
        assert_eq!(err["code"], "not_controller");
    }
    assert!(promoted, "second client never became controller");

    h.server.abort();
}

#[tokio::test]
async fn errors_do_not_disconnect() {
    let mut h = start(8).await;
    let mut client = Client::connect(h.addr).await;

    client.send(r#"{"type":"command","seq":1,"action":"rewind"}"#).await;
    assert_eq!(client.recv().await.unwrap()["code"], "handshake_required");

    client
        .send(r#"{"type":"hello","seq":2,"client":{"name":"t","version":"0"},"protocol_version":"1.0.0","requested":{"stream_observations":false}}"#)
        .await;
    assert_eq!(client.recv().await.unwrap()["type"], "welcome");

    client.send("{ this is not json").await;
    assert_eq!(client.recv().await.unwrap()["code"], "invalid_command");

    client.send(r#"{"type":"dance","seq":3}"#).await;
    let err = client.recv().await.unwrap();
    assert_eq!(err["code"], "invalid_command");
    assert_eq!(err["seq"], 3);

    client.send(r#"{"type":"command","seq":3,"action":"rewind"}"#).await;
    let err = client.recv().await.unwrap();
    assert_eq!(err["code"], "invalid_command");
    assert!(err["message"].as_str().unwrap().contains("seq"));

    client
        .send(r#"{"type":"command","seq":4,"action":"swipe","x":0,"z":0,"direction":"sideways"}"#)
        .await;
    assert_eq!(client.recv().await.unwrap()["code"], "invalid_command");

    client.send(r#"{"type":"command","seq":5,"action":"rewind"}"#).await;
    let inbound = next_inbound(&mut h.cmd_rx).await;
    assert_eq!(inbound.seq, 5);
    assert!(matches!(inbound.payload, InboundPayload::Command(ClientCommand::Rewind)));

    h.server.abort();
}

#[tokio::test]
async fn protocol_mismatch_closes_connection() {
    let h = start(8).await;
    let mut client = Client::connect(h.addr).await;
    let hello = serde_json::to_string(&create_hello(1, "old", "0.9.0")).unwrap();
    client.send(&hello).await;

    let err = client.recv().await.unwrap();
    assert_eq!(err["code"], "protocol_mismatch");
    assert!(client.recv().await.is_none());

    h.server.abort();
}

#[tokio::test]
async fn full_queue_reports_backpressure() {
    let h = start(1).await;
    let mut client = Client::connect(h.addr).await;
    client
        .send(r#"{"type":"hello","seq":1,"client":{"name":"t","version":"0"},"protocol_version":"1.0.0","requested":{"stream_observations":false}}"#)
        .await;
    assert_eq!(client.recv().await.unwrap()["type"], "welcome");

    // Nobody drains the queue: the first command fills it.
    client.send(r#"{"type":"command","seq":2,"action":"snapshot"}"#).await;
    client.send(r#"{"type":"command","seq":3,"action":"snapshot"}"#).await;
    let err = client.recv().await.unwrap();
    assert_eq!(err["code"], "backpressure");
    assert_eq!(err["seq"], 3);

    h.server.abort();
}

#[tokio::test]
async fn hello_on_full_queue_reports_backpressure() {
    let h = start(1).await;
    let mut first = Client::connect(h.addr).await;
    first
        .send(r#"{"type":"hello","seq":1,"client":{"name":"t","version":"0"},"protocol_version":"1.0.0","requested":{"stream_observations":false}}"#)
        .await;
    assert_eq!(first.recv().await.unwrap()["type"], "welcome");
    first.send(r#"{"type":"command","seq":2,"action":"snapshot"}"#).await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    // The streaming client's initial snapshot request cannot be queued.
    let mut second = Client::connect(h.addr).await;
    let welcome = second.hello(1).await;
    assert_eq!(welcome["type"], "welcome");
    let err = second.recv().await.unwrap();
    assert_eq!(err["code"], "backpressure");
    assert_eq!(err["seq"], 1);

    h.server.abort();
}
