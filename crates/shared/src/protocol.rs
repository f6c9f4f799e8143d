use serde::{Deserialize, Serialize};

use crate::domain::ControlId;

pub const EXIT_EVENT: &str = "exit";

pub const WINDOW_IDENTITY: &str = "window";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMessage {
    pub identity: ControlId,
    pub event: String,
    pub value: String,
}

impl EventMessage {
    pub fn new(
        identity: impl Into<ControlId>,
        event: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            identity: identity.into(),
            event: event.into(),
            value: value.into(),
        }
    }

    pub fn is_exit(&self) -> bool {
        self.event == EXIT_EVENT
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMessage {
    pub identity: ControlId,
    pub function: String,
    pub value: String,
}

impl UpdateMessage {
    pub fn new(
        identity: impl Into<ControlId>,
        function: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            identity: identity.into(),
            function: function.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
