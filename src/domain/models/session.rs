use serde::Deserialize;
use serde::Serialize;

/// The status endpoint returns every field as optional. Anything the server
/// leaves out decodes to an empty string or false rather than failing the
/// poll.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub state: String,
    pub timeline: String,
    pub auto_take: bool,
    pub rehearsal_mode: bool,
    pub crossover_client: bool,
    pub server_description: String,
}

impl SessionSnapshot {
    pub fn is_active(&self) -> bool {
        return self.state == "Active";
    }

    pub fn timeline_running(&self) -> bool {
        return self.timeline == "Running";
    }
}
