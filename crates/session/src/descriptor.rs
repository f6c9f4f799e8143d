use std::{any::Any, collections::HashMap, fmt, sync::Arc};

use shared::domain::ControlId;

use crate::{error::BuildError, kind::KindBundle, registry::RegistryBuilder};

pub type EventCallback = Arc<dyn Fn(&str) + Send + Sync>;

pub struct ControlDescriptor {
    pub identity: ControlId,
    pub fragment: String,
    pub script: String,
    pub kind: Arc<KindBundle>,
    pub events: HashMap<String, EventCallback>,
}

impl ControlDescriptor {
    pub fn new(
        identity: ControlId,
        kind: Arc<KindBundle>,
        fragment: impl Into<String>,
    ) -> Self {
        Self {
            identity,
            fragment: fragment.into(),
            script: String::new(),
            kind,
            events: HashMap::new(),
        }
    }

    pub fn script(mut self, script: impl Into<String>) -> Self {
        self.script = script.into();
        self
    }

    pub fn on<F>(mut self, event: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.events.insert(event.into(), Arc::new(callback));
        self
    }
}

impl fmt::Debug for ControlDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut events: Vec<_> = self.events.keys().collect();
        events.sort();
        f.debug_struct("ControlDescriptor")
            .field("identity", &self.identity)
            .field("kind", &self.kind.name)
            .field("fragment", &self.fragment)
            .field("events", &events)
            .finish()
    }
}

/// The capability every control implements to take part in a session.
///
/// `register` is called once while the registry is built. Composite controls
/// register their children through [`RegistryBuilder::nest`] and embed the
/// returned fragments in their own markup. Controls keep the
/// [`RegistryBuilder::outbound`] handle for their mutators.
pub trait Control: Send + Sync + 'static {
    fn register(&self, scope: &mut RegistryBuilder) -> Result<ControlDescriptor, BuildError>;

    fn as_any(&self) -> &dyn Any;
}
