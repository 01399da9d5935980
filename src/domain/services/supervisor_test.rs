use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use super::fetch_status;
use super::ConnectionSupervisor;
use crate::domain::models::BridgeError;
use crate::domain::models::ConnectionState;
use crate::domain::models::Event;
use crate::domain::models::RemoteClient;
use crate::domain::models::SessionSnapshot;

struct StubClient {
    body: Result<String, ()>,
}

#[async_trait]
impl RemoteClient for StubClient {
    async fn get(&self, path: &str, _query: &[(String, String)]) -> Result<String, BridgeError> {
        return match &self.body {
            Ok(body) => Ok(body.to_string()),
            Err(_) => Err(BridgeError::Transport {
                path: path.to_string(),
                message: "connection refused".to_string(),
            }),
        };
    }
}

fn supervisor() -> (ConnectionSupervisor, mpsc::UnboundedReceiver<Event>) {
    let (tx, rx) = mpsc::unbounded_channel::<Event>();
    return (ConnectionSupervisor::new(tx), rx);
}

fn transport_err() -> BridgeError {
    return BridgeError::Transport {
        path: "status".to_string(),
        message: "connection refused".to_string(),
    };
}

fn active_snapshot() -> SessionSnapshot {
    return SessionSnapshot {
        state: "Active".to_string(),
        timeline: "Running".to_string(),
        ..SessionSnapshot::default()
    };
}

fn connection_changes(rx: &mut mpsc::UnboundedReceiver<Event>) -> Vec<ConnectionState> {
    let mut states = vec![];
    while let Ok(event) = rx.try_recv() {
        if let Event::ConnectionChanged(state) = event {
            states.push(state);
        }
    }

    return states;
}

#[test]
fn it_rejects_an_empty_host() {
    let (mut supervisor, _rx) = supervisor();
    let res = supervisor.configure("");

    assert!(matches!(res, Err(BridgeError::Config(_))));
}

#[test]
fn it_connects_when_a_poll_succeeds() -> Result<()> {
    let (mut supervisor, mut rx) = supervisor();
    supervisor.configure("mosart.example")?;

    let ticket = supervisor.begin_poll();
    let reconnected = supervisor.apply_poll(ticket, Ok(active_snapshot()));

    assert!(reconnected);
    assert!(supervisor.is_connected());
    assert!(supervisor.session().is_active());
    assert!(supervisor.session().timeline_running());
    assert_eq!(
        connection_changes(&mut rx),
        vec![ConnectionState::Connecting, ConnectionState::Connected]
    );

    return Ok(());
}

#[test]
fn it_signals_reconnect_once_per_edge() -> Result<()> {
    let (mut supervisor, _rx) = supervisor();
    supervisor.configure("mosart.example")?;

    let mut edges = vec![];
    for outcome in [
        Err(transport_err()),
        Err(transport_err()),
        Ok(active_snapshot()),
        Ok(active_snapshot()),
    ] {
        let ticket = supervisor.begin_poll();
        edges.push(supervisor.apply_poll(ticket, outcome));
    }

    assert_eq!(edges, vec![false, false, true, false]);

    return Ok(());
}

#[test]
fn it_downgrades_to_connecting_and_clears_the_session_on_failure() -> Result<()> {
    let (mut supervisor, _rx) = supervisor();
    supervisor.configure("mosart.example")?;

    let ticket = supervisor.begin_poll();
    supervisor.apply_poll(ticket, Ok(active_snapshot()));

    let ticket = supervisor.begin_poll();
    supervisor.apply_poll(ticket, Err(transport_err()));

    assert_eq!(supervisor.state(), ConnectionState::Connecting);
    assert_eq!(supervisor.session(), &SessionSnapshot::default());

    return Ok(());
}

#[test]
fn it_discards_a_slow_result_that_arrives_after_a_newer_one() -> Result<()> {
    let (mut supervisor, _rx) = supervisor();
    supervisor.configure("mosart.example")?;

    let slow = supervisor.begin_poll();
    let fast = supervisor.begin_poll();

    assert!(supervisor.apply_poll(fast, Ok(active_snapshot())));

    // The slow failure finally lands, but a fresher result already won.
    assert!(!supervisor.apply_poll(slow, Err(transport_err())));
    assert!(supervisor.is_connected());
    assert!(supervisor.session().is_active());

    return Ok(());
}

#[test]
fn it_discards_results_issued_before_a_reconfigure() -> Result<()> {
    let (mut supervisor, _rx) = supervisor();
    supervisor.configure("mosart.example")?;

    let stale = supervisor.begin_poll();
    supervisor.configure("other.example")?;

    assert!(!supervisor.apply_poll(stale, Ok(active_snapshot())));
    assert_eq!(supervisor.state(), ConnectionState::Disconnected);

    return Ok(());
}

#[test]
fn it_disconnects_on_teardown() -> Result<()> {
    let (mut supervisor, _rx) = supervisor();
    supervisor.configure("mosart.example")?;

    let ticket = supervisor.begin_poll();
    supervisor.apply_poll(ticket, Ok(active_snapshot()));
    supervisor.teardown();

    assert!(!supervisor.is_connected());
    assert_eq!(supervisor.state(), ConnectionState::Disconnected);
    assert_eq!(supervisor.session(), &SessionSnapshot::default());

    return Ok(());
}

#[test]
fn it_publishes_connection_changes_only_on_edges() -> Result<()> {
    let (mut supervisor, mut rx) = supervisor();
    supervisor.configure("mosart.example")?;

    for _ in 0..3 {
        let ticket = supervisor.begin_poll();
        supervisor.apply_poll(ticket, Ok(active_snapshot()));
    }

    assert_eq!(
        connection_changes(&mut rx),
        vec![ConnectionState::Connecting, ConnectionState::Connected]
    );

    return Ok(());
}

#[tokio::test]
async fn it_fetches_and_decodes_a_partial_status_body() -> Result<()> {
    let client = StubClient {
        body: Ok(r#"{"state": "Active", "rehearsalMode": true}"#.to_string()),
    };

    let snapshot = fetch_status(std::sync::Arc::new(client)).await?;

    assert!(snapshot.is_active());
    assert!(snapshot.rehearsal_mode);
    assert!(!snapshot.timeline_running());
    assert_eq!(snapshot.server_description, "");

    return Ok(());
}

#[tokio::test]
async fn it_surfaces_a_malformed_status_body_as_a_parse_error() {
    let client = StubClient {
        body: Ok("not json".to_string()),
    };

    let res = fetch_status(std::sync::Arc::new(client)).await;

    assert!(matches!(res, Err(BridgeError::Parse(_))));
}

#[tokio::test]
async fn it_surfaces_transport_failures() {
    let client = StubClient { body: Err(()) };

    let res = fetch_status(std::sync::Arc::new(client)).await;

    assert!(matches!(res, Err(BridgeError::Transport { .. })));
}
