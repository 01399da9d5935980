use super::ConnectionState;
use super::OverlayProjection;
use super::SessionSnapshot;

/// One-directional state publication towards the UI layer. The core only
/// pushes; nothing on the other end ever reaches back into its state.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    ConnectionChanged(ConnectionState),
    SessionChanged(SessionSnapshot),
    OverlaysChanged(OverlayProjection),
}
