use serde::Deserialize;

/// Action string the registry sends when a manifest or tag has been deleted.
pub const DELETE_ACTION: &str = "delete";

/// Envelope the registry POSTs to its notification endpoints. Only the first
/// event is ever consulted; the producer emits one event per webhook call.
#[derive(Debug, Default, Deserialize)]
pub struct Notification {
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub target: EventTarget,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventTarget {
    #[serde(default)]
    pub repository: String,
}

impl Event {
    pub fn is_delete(&self) -> bool {
        self.action == DELETE_ACTION
    }
}
