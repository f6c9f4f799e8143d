use std::{collections::HashMap, fmt, sync::Arc};

use shared::domain::ControlId;
use tracing::debug;

use crate::{
    descriptor::{Control, ControlDescriptor, EventCallback},
    dispatcher::Outbound,
    error::BuildError,
    kind::{push_block, KindAssets, KindBundle},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderPayload {
    pub body: String,
    pub script: String,
    pub style: String,
}

pub struct RegisteredControl {
    pub identity: ControlId,
    pub kind: Arc<KindBundle>,
    pub fragment: String,
    handle: Arc<dyn Control>,
}

impl RegisteredControl {
    pub fn handle(&self) -> Arc<dyn Control> {
        Arc::clone(&self.handle)
    }

    pub fn control(&self) -> &dyn Control {
        self.handle.as_ref()
    }
}

impl fmt::Debug for RegisteredControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredControl")
            .field("identity", &self.identity)
            .field("kind", &self.kind.name)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct Registry {
    order: Vec<ControlId>,
    controls: HashMap<ControlId, RegisteredControl>,
    routes: HashMap<ControlId, HashMap<String, EventCallback>>,
}

impl Registry {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn identities(&self) -> impl Iterator<Item = &ControlId> {
        self.order.iter()
    }

    pub fn get(&self, identity: &str) -> Option<&RegisteredControl> {
        self.controls.get(identity)
    }

    pub fn lookup(&self, identity: &str) -> Option<Arc<dyn Control>> {
        self.controls.get(identity).map(RegisteredControl::handle)
    }

    pub fn route(&self, identity: &str, event: &str) -> Option<&EventCallback> {
        self.routes.get(identity)?.get(event)
    }

    pub fn route_count(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("controls", &self.order)
            .field("routes", &self.route_count())
            .finish()
    }
}

/// Walks a control tree into a [`Registry`] and a [`RenderPayload`].
///
/// Handed to [`Control::register`] so composites can nest their children.
pub struct RegistryBuilder {
    outbound: Outbound,
    registry: Registry,
    kinds: KindAssets,
    scripts: String,
    body: String,
}

impl RegistryBuilder {
    pub fn new(outbound: Outbound) -> Self {
        Self {
            outbound,
            registry: Registry::default(),
            kinds: KindAssets::new(),
            scripts: String::new(),
            body: String::new(),
        }
    }

    pub fn outbound(&self) -> &Outbound {
        &self.outbound
    }

    pub fn add(&mut self, control: &Arc<dyn Control>) -> Result<(), BuildError> {
        let fragment = self.insert(control)?;
        push_block(&mut self.body, &fragment);
        Ok(())
    }

    pub fn nest(&mut self, control: &Arc<dyn Control>) -> Result<String, BuildError> {
        self.insert(control)
    }

    fn insert(&mut self, control: &Arc<dyn Control>) -> Result<String, BuildError> {
        let ControlDescriptor {
            identity,
            fragment,
            script,
            kind,
            events,
        } = control.register(self)?;

        if self.registry.controls.contains_key(&identity) {
            return Err(BuildError::DuplicateIdentity(identity));
        }
        if self.kinds.emit_once(&kind) {
            debug!(kind = %kind.name, "kind assets emitted");
        }
        push_block(&mut self.scripts, &script);
        if !events.is_empty() {
            self.registry.routes.insert(identity.clone(), events);
        }
        self.registry.order.push(identity.clone());
        self.registry.controls.insert(
            identity.clone(),
            RegisteredControl {
                identity,
                kind,
                fragment: fragment.clone(),
                handle: Arc::clone(control),
            },
        );
        Ok(fragment)
    }

    pub fn finish(self) -> (Registry, RenderPayload) {
        let (mut script, style) = self.kinds.into_parts();
        push_block(&mut script, &self.scripts);
        let payload = RenderPayload {
            body: self.body,
            script,
            style,
        };
        (self.registry, payload)
    }
}

pub fn build(
    tree: &[Arc<dyn Control>],
    outbound: Outbound,
) -> Result<(Registry, RenderPayload), BuildError> {
    let mut builder = RegistryBuilder::new(outbound);
    for control in tree {
        builder.add(control)?;
    }
    Ok(builder.finish())
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
