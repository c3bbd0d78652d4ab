//! Headless fold puzzle runner (default binary).
//!
//! Loads the level catalog, resumes saved progress and lets an external
//! agent play through the TCP adapter. Transitions settle on a fixed
//! `TICK_MS` clock.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use fold_puzzle::adapter::{
    create_ack, Adapter, InboundCommand, InboundPayload, OutboundMessage,
};
use fold_puzzle::campaign::{Campaign, JsonFileProgress, LevelCatalog};
use fold_puzzle::types::TICK_MS;
use fold_puzzle::{ReplyOutcome, Runner, RunnerConfig};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let config = RunnerConfig::from_env().with_args(std::env::args().skip(1));
    let catalog = LevelCatalog::load(&config.levels_path)
        .with_context(|| format!("loading levels from {}", config.levels_path.display()))?;
    let store = JsonFileProgress::new(&config.progress_path);
    let campaign = Campaign::open(catalog, store)?.with_engine_config(config.engine_config());
    let mut runner = Runner::new(campaign)?;
    info!(
        levels = runner.campaign().level_count(),
        level = runner.level_index(),
        "campaign opened"
    );

    let Some(mut adapter) = Adapter::start_from_env()? else {
        warn!("adapter disabled, nothing can drive the puzzle");
        return Ok(());
    };
    info!(addr = %adapter.local_addr(), "waiting for a controller");

    run(&mut runner, &mut adapter)
}

fn run(runner: &mut Runner<JsonFileProgress>, adapter: &mut Adapter) -> Result<()> {
    let tick = Duration::from_millis(TICK_MS as u64);
    let mut obs_seq = 0u64;
    let mut next_tick = Instant::now() + tick;

    loop {
        let mut changed = false;
        while let Some(InboundCommand {
            client_id,
            seq,
            payload,
        }) = adapter.try_recv()
        {
            match payload {
                InboundPayload::SnapshotRequest => {
                    obs_seq += 1;
                    let obs = runner.observation(obs_seq);
                    adapter.send(OutboundMessage::ToClientObservation { client_id, obs });
                }
                InboundPayload::Command(command) => {
                    let reply = runner.apply(command);
                    let ack = create_ack(
                        seq,
                        reply.outcome.as_str(),
                        reply.reason.map(|r| r.as_str()),
                    );
                    adapter.send(OutboundMessage::ToClientAck { client_id, ack });
                    if reply.outcome == ReplyOutcome::Snapshot {
                        obs_seq += 1;
                        let obs = runner.observation(obs_seq);
                        adapter.send(OutboundMessage::ToClientObservation { client_id, obs });
                    }
                    changed |= reply.started();
                }
            }
        }

        if runner.tick(TICK_MS)?.is_some() {
            changed = true;
        }

        if let Some(obs) = runner.take_won_observation(obs_seq + 1) {
            obs_seq += 1;
            info!(level = obs.level_index, name = %obs.level_name, "level completed");
            adapter.send(OutboundMessage::BroadcastObservation { obs });
        }

        if changed {
            obs_seq += 1;
            let obs = runner.observation(obs_seq);
            adapter.send(OutboundMessage::BroadcastObservation { obs });
        }

        let now = Instant::now();
        if next_tick > now {
            thread::sleep(next_tick - now);
        }
        next_tick += tick;
    }
}
