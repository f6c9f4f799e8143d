use std::{
    any::Any,
    fmt,
    sync::{Arc, OnceLock},
};

use parking_lot::Mutex;
use shared::domain::ControlId;

use super::escape_html;
use crate::{
    descriptor::{Control, ControlDescriptor},
    dispatcher::Outbound,
    error::BuildError,
    identity,
    kind::KindBundle,
    registry::RegistryBuilder,
};

pub const KIND: &str = "Label";
pub const SET_TEXT: &str = "LabelSetText";

const BEHAVIOR: &str = r#"
function LabelSetText(identity, text) {
    var label = document.getElementById(identity);
    if (label) {
        label.textContent = text;
    }
}"#;

const STYLE: &str = r#"
.label {
    display: inline-block;
    padding: 6px 0;
}"#;

fn kind() -> Arc<KindBundle> {
    static BUNDLE: OnceLock<Arc<KindBundle>> = OnceLock::new();
    Arc::clone(BUNDLE.get_or_init(|| KindBundle::new(KIND, BEHAVIOR, STYLE)))
}

struct LabelState {
    text: String,
    outbound: Outbound,
}

#[derive(Clone)]
pub struct Label {
    id: ControlId,
    state: Arc<Mutex<LabelState>>,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_id(identity::allocate(), text)
    }

    pub fn with_id(id: impl Into<ControlId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: Arc::new(Mutex::new(LabelState {
                text: text.into(),
                outbound: Outbound::detached(),
            })),
        }
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

impl Control for Label {
    fn register(&self, scope: &mut RegistryBuilder) -> Result<ControlDescriptor, BuildError> {
        let text = {
            let mut state = self.state.lock();
            state.outbound = scope.outbound().clone();
            state.text.clone()
        };
        let fragment = format!(
            r#"<span id="{}" class="label">{}</span>"#,
            escape_html(self.id.as_str()),
            escape_html(&text)
        );
        Ok(ControlDescriptor::new(self.id.clone(), kind(), fragment))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Label")
            .field("id", &self.id)
            .field("text", &self.text())
            .finish()
    }
}
