#[cfg(test)]
#[path = "supervisor_test.rs"]
mod tests;

use tokio::sync::mpsc;

use crate::domain::models::BridgeError;
use crate::domain::models::ConnectionState;
use crate::domain::models::Event;
use crate::domain::models::RemoteBox;
use crate::domain::models::SessionSnapshot;

const STATUS_PATH: &str = "status";

/// Identifies one in-flight poll. Results are only applied when the ticket
/// still belongs to the current configuration epoch and has not been
/// superseded by a newer applied result.
#[derive(Clone, Copy, Debug)]
pub struct PollTicket {
    generation: u64,
    epoch: u64,
}

pub async fn fetch_status(client: RemoteBox) -> Result<SessionSnapshot, BridgeError> {
    let body = client.get(STATUS_PATH, &[]).await?;
    let snapshot = serde_json::from_str::<SessionSnapshot>(&body)?;

    return Ok(snapshot);
}

/// Owns connectivity state and the session snapshot. Poll latency can exceed
/// the poll interval, so a second poll may be issued while the first is
/// still in flight; [`ConnectionSupervisor::apply_poll`] discards any result
/// that arrives after a newer one has already been applied, and any result
/// issued before the latest `configure`/`teardown`.
pub struct ConnectionSupervisor {
    state: ConnectionState,
    session: SessionSnapshot,
    issued: u64,
    applied: u64,
    epoch: u64,
    tx: mpsc::UnboundedSender<Event>,
}

impl ConnectionSupervisor {
    pub fn new(tx: mpsc::UnboundedSender<Event>) -> ConnectionSupervisor {
        return ConnectionSupervisor {
            state: ConnectionState::Disconnected,
            session: SessionSnapshot::default(),
            issued: 0,
            applied: 0,
            epoch: 0,
            tx,
        };
    }

    pub fn is_connected(&self) -> bool {
        return self.state.is_connected();
    }

    pub fn state(&self) -> ConnectionState {
        return self.state;
    }

    pub fn session(&self) -> &SessionSnapshot {
        return &self.session;
    }

    /// Validates the target host and resets the supervisor for a fresh
    /// polling run. Any poll still in flight is invalidated through the
    /// epoch bump.
    pub fn configure(&mut self, host: &str) -> Result<(), BridgeError> {
        if host.is_empty() {
            return Err(BridgeError::Config(
                "Target host is not specified".to_string(),
            ));
        }

        self.epoch += 1;
        self.clear_session();
        self.set_state(ConnectionState::Disconnected);

        return Ok(());
    }

    /// Issues a ticket for the next poll. The first poll after a reset also
    /// moves the supervisor out of `Disconnected`.
    pub fn begin_poll(&mut self) -> PollTicket {
        if self.state == ConnectionState::Disconnected {
            self.set_state(ConnectionState::Connecting);
        }

        self.issued += 1;

        return PollTicket {
            generation: self.issued,
            epoch: self.epoch,
        };
    }

    /// Folds a completed poll into the connection state. Failures are fully
    /// absorbed here, the polling loop cannot be killed by a bad response.
    ///
    /// Returns true exactly when this poll moved the supervisor into
    /// `Connected` from a non-connected state, the reconnect edge that
    /// drives an overlay refresh.
    pub fn apply_poll(
        &mut self,
        ticket: PollTicket,
        outcome: Result<SessionSnapshot, BridgeError>,
    ) -> bool {
        if ticket.epoch != self.epoch {
            tracing::debug!(
                generation = ticket.generation,
                "Discarding poll result from a previous configuration"
            );
            return false;
        }

        if ticket.generation <= self.applied {
            tracing::debug!(
                generation = ticket.generation,
                applied = self.applied,
                "Discarding superseded poll result"
            );
            return false;
        }

        self.applied = ticket.generation;

        match outcome {
            Ok(snapshot) => {
                let was_connected = self.state.is_connected();
                self.set_state(ConnectionState::Connected);
                self.session = snapshot;
                self.publish(Event::SessionChanged(self.session.clone()));

                return !was_connected;
            }
            Err(err) => {
                tracing::debug!(error = %err, "Status poll failed");
                self.set_state(ConnectionState::Connecting);
                self.clear_session();

                return false;
            }
        }
    }

    pub fn teardown(&mut self) {
        self.epoch += 1;
        self.clear_session();
        self.set_state(ConnectionState::Disconnected);
    }

    fn set_state(&mut self, state: ConnectionState) {
        if self.state == state {
            return;
        }

        self.state = state;
        self.publish(Event::ConnectionChanged(state));
    }

    fn clear_session(&mut self) {
        self.session = SessionSnapshot::default();
        self.publish(Event::SessionChanged(self.session.clone()));
    }

    fn publish(&self, event: Event) {
        // A closed channel means the consumer is gone and the bridge is
        // shutting down; there is nothing left to notify.
        self.tx.send(event).ok();
    }
}
