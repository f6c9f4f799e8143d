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

pub const KIND: &str = "Button";
pub const ON_CLICK: &str = "ButtonOnClick";
pub const SET_TEXT: &str = "ButtonSetText";

const BEHAVIOR: &str = r#"
function ButtonSetText(identity, text) {
    var button = document.getElementById(identity);
    if (button) {
        button.textContent = text;
    }
}"#;

const STYLE: &str = r#"
button {
    border: 4px solid #304ffe;
    color: white;
    background: #304ffe;
    padding: 6px 12px;
}
button:hover {
    background: white;
    color: #304ffe;
}
button:active {
    color: #fff;
    background: #304ffe;
    box-shadow: 1px 2px 7px rgba(0, 0, 0, 0.3) inset;
}"#;

fn kind() -> Arc<KindBundle> {
    static BUNDLE: OnceLock<Arc<KindBundle>> = OnceLock::new();
    Arc::clone(BUNDLE.get_or_init(|| KindBundle::new(KIND, BEHAVIOR, STYLE)))
}

type ClickHandler = Arc<dyn Fn(&Button) + Send + Sync>;

struct ButtonState {
    text: String,
    outbound: Outbound,
}

#[derive(Clone)]
pub struct Button {
    id: ControlId,
    state: Arc<Mutex<ButtonState>>,
    on_click: Option<ClickHandler>,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_id(identity::allocate(), text)
    }

    pub fn with_id(id: impl Into<ControlId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: Arc::new(Mutex::new(ButtonState {
                text: text.into(),
                outbound: Outbound::detached(),
            })),
            on_click: None,
        }
    }

    pub fn on_click<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Button) + Send + Sync + 'static,
    {
        self.on_click = Some(Arc::new(handler));
        self
    }

    pub fn id(&self) -> &ControlId {
        &self.id
    }

    pub fn text(&self) -> String {
        self.state.lock().text.clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        let outbound = {
            let mut state = self.state.lock();
            state.text.clone_from(&text);
            state.outbound.clone()
        };
        outbound.enqueue(&self.id, SET_TEXT, text);
    }
}

impl Control for Button {
    fn register(&self, scope: &mut RegistryBuilder) -> Result<ControlDescriptor, BuildError> {
        let text = {
            let mut state = self.state.lock();
            state.outbound = scope.outbound().clone();
            state.text.clone()
        };
        let fragment = format!(
            r#"<button id="{}">{}</button>"#,
            escape_html(self.id.as_str()),
            escape_html(&text)
        );
        let descriptor = ControlDescriptor::new(self.id.clone(), kind(), fragment);

        let Some(handler) = &self.on_click else {
            return Ok(descriptor);
        };
        let handler = Arc::clone(handler);
        let button = self.clone();
        Ok(descriptor
            .script(format!(
                "loomBind({}, \"click\", {});",
                js_string(self.id.as_str()),
                js_string(ON_CLICK)
            ))
            .on(ON_CLICK, move |_| handler(&button)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("id", &self.id)
            .field("text", &self.text())
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}
