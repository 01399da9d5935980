#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::process;

use anyhow::Error;
use anyhow::Result;
use tokio::signal;
use tokio::sync::mpsc;
use tokio::task;
use tracing_subscriber::EnvFilter;

use crate::application::cli;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::services::bridge::BridgeService;

fn handle_error(err: Error) {
    eprintln!(
        "mosart-bridge has failed with the following app version and error.\n\nVersion: {}\nError: {}",
        env!("CARGO_PKG_VERSION"),
        err
    );

    process::exit(1);
}

/// The consumer half of the state publication channel. A UI layer would map
/// these to button feedback and display variables; the bare binary logs
/// them.
async fn publish_events(rx: &mut mpsc::UnboundedReceiver<Event>) -> Result<()> {
    while let Some(event) = rx.recv().await {
        match event {
            Event::ConnectionChanged(state) => {
                tracing::info!(state = %state, "Connection state changed");
            }
            Event::SessionChanged(session) => {
                tracing::debug!(
                    active = session.is_active(),
                    timeline_running = session.timeline_running(),
                    auto_take = session.auto_take,
                    rehearsal_mode = session.rehearsal_mode,
                    crossover_client = session.crossover_client,
                    server_description = session.server_description,
                    "Session updated"
                );
            }
            Event::OverlaysChanged(projection) => {
                tracing::info!(
                    stories = projection.stories.len(),
                    current_story = projection.current_story_id,
                    last_taken = projection.last_taken_overlay_id,
                    "Overlay index updated"
                );
            }
        }
    }

    return Ok(());
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli::parse().await {
        handle_error(err);
        return;
    }

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let mut background_futures = task::JoinSet::new();
    background_futures.spawn(async move {
        return BridgeService::start(event_tx, &mut action_rx).await;
    });
    background_futures.spawn(async move {
        return publish_events(&mut event_rx).await;
    });

    let shutdown_tx = action_tx.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            shutdown_tx.send(Action::Shutdown()).ok();
        }
    });

    let res = background_futures.join_next().await.unwrap().unwrap();
    if res.is_err() {
        handle_error(res.unwrap_err());
    }

    process::exit(0);
}
