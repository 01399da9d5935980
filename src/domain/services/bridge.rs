use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time;
use tokio::time::MissedTickBehavior;

use super::fetch_status;
use super::ConnectionSupervisor;
use super::OverlayIndex;
use super::OverlayService;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::infrastructure::remote::RemoteManager;

fn poll_interval() -> time::Interval {
    let millis = Config::get(ConfigKey::PollInterval)
        .parse::<u64>()
        .unwrap_or(1000);

    let mut interval = time::interval(Duration::from_millis(millis.max(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    return interval;
}

fn overlay_tracking() -> bool {
    return Config::get(ConfigKey::EnableOverlayList) == "true";
}

pub struct BridgeService {}

impl BridgeService {
    /// Runs the bridge until a `Shutdown` action arrives or the action
    /// channel closes. One loop owns the supervisor and the overlay index;
    /// status polls and overlay fetches run as spawned tasks so a slow
    /// server never stalls the timer, and their results are folded back in
    /// here on completion.
    pub async fn start(
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let mut client = RemoteManager::get()?;
        let mut supervisor = ConnectionSupervisor::new(tx.clone());
        supervisor.configure(&Config::get(ConfigKey::Host))?;

        let mut index = OverlayIndex::default();
        let mut tracking = overlay_tracking();
        let mut interval = poll_interval();
        let mut polls = JoinSet::new();
        let mut refreshes = JoinSet::new();

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let ticket = supervisor.begin_poll();
                    let poll_client = client.clone();
                    polls.spawn(async move {
                        return (ticket, fetch_status(poll_client).await);
                    });
                }
                Some(Ok((ticket, outcome))) = polls.join_next() => {
                    let reconnected = supervisor.apply_poll(ticket, outcome);
                    if reconnected && tracking {
                        refreshes.spawn(OverlayService::fetch(client.clone()));
                    } else if reconnected {
                        tracing::debug!("Reconnected, overlay tracking is disabled");
                    }
                }
                Some(Ok(outcome)) = refreshes.join_next() => {
                    if index.apply_refresh(outcome) {
                        tx.send(Event::OverlaysChanged(index.projection()))?;
                    }
                }
                action = rx.recv() => {
                    let action = match action {
                        None => {
                            supervisor.teardown();
                            return Ok(());
                        }
                        Some(action) => action,
                    };

                    match action {
                        Action::Configure() => {
                            polls.abort_all();
                            refreshes.abort_all();

                            match supervisor.configure(&Config::get(ConfigKey::Host)) {
                                Ok(()) => {
                                    client = RemoteManager::get()?;
                                    tracking = overlay_tracking();
                                    // A fresh interval ticks immediately,
                                    // which doubles as the immediate poll
                                    // after a configuration change.
                                    interval = poll_interval();
                                }
                                Err(err) => {
                                    tracing::error!(error = %err, "Cannot apply configuration");
                                }
                            }
                        }
                        Action::RefreshOverlays() => {
                            refreshes.spawn(OverlayService::fetch(client.clone()));
                        }
                        Action::SelectStory(story_id) => {
                            index.select_story(&story_id);
                            tx.send(Event::OverlaysChanged(index.projection()))?;
                        }
                        Action::NextStory() => {
                            index.next_story();
                            tx.send(Event::OverlaysChanged(index.projection()))?;
                        }
                        Action::PreviousStory() => {
                            index.previous_story();
                            tx.send(Event::OverlaysChanged(index.projection()))?;
                        }
                        Action::TakeOverlayIn(id, name) => {
                            match OverlayService::take_in(&client, &mut index, &id, &name).await {
                                Ok(()) => {
                                    tx.send(Event::OverlaysChanged(index.projection()))?;
                                }
                                Err(err) => {
                                    tracing::warn!(error = %err, "Take overlay in rejected");
                                }
                            }
                        }
                        Action::TakeOverlayOut(id, name) => {
                            if let Err(err) = OverlayService::take_out(&client, &id, &name).await {
                                tracing::warn!(error = %err, "Take overlay out rejected");
                            }
                        }
                        Action::TakeLastOut() => {
                            if let Err(err) = OverlayService::take_last_out(&client, &index).await {
                                tracing::warn!(error = %err, "Take last overlay out rejected");
                            }
                        }
                        Action::Shutdown() => {
                            polls.abort_all();
                            refreshes.abort_all();
                            supervisor.teardown();
                            tracing::debug!(state = %supervisor.state(), "Bridge stopped");

                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}
