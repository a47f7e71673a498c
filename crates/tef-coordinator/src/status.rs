use serde::Serialize;

/// Snapshot of the coordinator's connection state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub connected: bool,
    pub port: Option<String>,
    pub baud: Option<u32>,
}
