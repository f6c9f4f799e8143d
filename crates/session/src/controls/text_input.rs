use std::{
    any::Any,
    fmt,
    sync::{Arc, OnceLock},
};

use parking_lot::Mutex;
use shared::domain::ControlId;

use super::{escape_html, js_string};
use crate::{
    descriptor::{Control, ControlDescriptor},
    dispatcher::Outbound,
    error::BuildError,
    identity,
    kind::KindBundle,
    registry::RegistryBuilder,
};

pub const KIND: &str = "TextInput";
pub const ON_CHANGE: &str = "TextInputOnChange";
pub const SET_VALUE: &str = "TextInputSetValue";

const BEHAVIOR: &str = r#"
function TextInputSetValue(identity, value) {
    var input = document.getElementById(identity);
    if (input) {
        input.value = value;
    }
}"#;

const STYLE: &str = r#"
input.text-input {
    border: 2px solid #304ffe;
    padding: 6px;
}"#;

fn kind() -> Arc<KindBundle> {
    static BUNDLE: OnceLock<Arc<KindBundle>> = OnceLock::new();
    Arc::clone(BUNDLE.get_or_init(|| KindBundle::new(KIND, BEHAVIOR, STYLE)))
}

type ChangeHandler = Arc<dyn Fn(&TextInput, &str) + Send + Sync>;

struct TextInputState {
    value: String,
    outbound: Outbound,
}

#[derive(Clone)]
pub struct TextInput {
    id: ControlId,
    state: Arc<Mutex<TextInputState>>,
    on_change: Option<ChangeHandler>,
}

impl TextInput {
    pub fn new(value: impl Into<String>) -> Self {
        Self::with_id(identity::allocate(), value)
    }

    pub fn with_id(id: impl Into<ControlId>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: Arc::new(Mutex::new(TextInputState {
                value: value.into(),
                outbound: Outbound::detached(),
            })),
            on_change: None,
        }
    }

    pub fn on_change<F>(mut self, handler: F) -> Self
    where
        F: Fn(&TextInput, &str) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(handler));
        self
    }

    pub fn id(&self) -> &ControlId {
        &self.id
    }

    pub fn value(&self) -> String {
        self.state.lock().value.clone()
    }

    pub fn set_value(&self, value: impl Into<String>) {
        let value = value.into();
        let outbound = {
            let mut state = self.state.lock();
            state.value.clone_from(&value);
            state.outbound.clone()
        };
        outbound.enqueue(&self.id, SET_VALUE, value);
    }

    fn changed(&self, value: &str) {
        self.state.lock().value = value.to_string();
        if let Some(handler) = &self.on_change {
            handler(self, value);
        }
    }
}

impl Control for TextInput {
    fn register(&self, scope: &mut RegistryBuilder) -> Result<ControlDescriptor, BuildError> {
        let value = {
            let mut state = self.state.lock();
            state.outbound = scope.outbound().clone();
            state.value.clone()
        };
        let fragment = format!(
            r#"<input id="{}" class="text-input" type="text" value="{}">"#,
            escape_html(self.id.as_str()),
            escape_html(&value)
        );
        let input = self.clone();
        Ok(ControlDescriptor::new(self.id.clone(), kind(), fragment)
            .script(format!(
                "loomBind({}, \"change\", {});",
                js_string(self.id.as_str()),
                js_string(ON_CHANGE)
            ))
            .on(ON_CHANGE, move |value| input.changed(value)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Debug for TextInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextInput")
            .field("id", &self.id)
            .field("value", &self.value())
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}
