use std::{fmt, sync::Arc};

use shared::{
    error::{Fault, FaultKind},
    protocol::EventMessage,
};
use tracing::{debug, info};

use crate::registry::Registry;

pub type ExitVeto = Arc<dyn Fn() -> bool + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Delivered,
    Exit,
    ExitVetoed,
}

pub struct EventRouter {
    registry: Arc<Registry>,
    exit_veto: Option<ExitVeto>,
}

impl EventRouter {
    pub fn new(registry: Arc<Registry>, exit_veto: Option<ExitVeto>) -> Self {
        Self {
            registry,
            exit_veto,
        }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn dispatch(&self, message: &EventMessage) -> Result<Dispatch, Fault> {
        if message.is_exit() {
            return Ok(self.exit_requested());
        }

        let Some(callback) = self
            .registry
            .route(message.identity.as_str(), &message.event)
        else {
            return Err(Fault::new(
                FaultKind::UnroutedEvent,
                format!(
                    "no callback for event '{}' on control '{}'",
                    message.event, message.identity
                ),
            ));
        };

        debug!(identity = %message.identity, event = %message.event, "dispatching event");
        callback(&message.value);
        Ok(Dispatch::Delivered)
    }

    fn exit_requested(&self) -> Dispatch {
        match &self.exit_veto {
            Some(veto) if !veto() => {
                info!("exit request vetoed");
                Dispatch::ExitVetoed
            }
            _ => Dispatch::Exit,
        }
    }
}

impl fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRouter")
            .field("registry", &self.registry)
            .field("exit_veto", &self.exit_veto.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/router_tests.rs"]
mod tests;
