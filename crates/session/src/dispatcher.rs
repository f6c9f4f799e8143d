use shared::{domain::ControlId, protocol::UpdateMessage};
use tokio::sync::mpsc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Outbound {
    tx: Option<mpsc::UnboundedSender<UpdateMessage>>,
}

impl Outbound {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<UpdateMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    pub fn detached() -> Self {
        Self { tx: None }
    }

    pub fn is_attached(&self) -> bool {
        self.tx.is_some()
    }

    pub fn enqueue(
        &self,
        identity: &ControlId,
        function: impl Into<String>,
        value: impl Into<String>,
    ) {
        let Some(tx) = &self.tx else {
            return;
        };
        let message = UpdateMessage {
            identity: identity.clone(),
            function: function.into(),
            value: value.into(),
        };
        if let Err(err) = tx.send(message) {
            debug!(
                identity = %err.0.identity,
                function = %err.0.function,
                "outbound queue closed; update dropped"
            );
        }
    }
}

impl Default for Outbound {
    fn default() -> Self {
        Self::detached()
    }
}

#[cfg(test)]
#[path = "tests/dispatcher_tests.rs"]
mod tests;
