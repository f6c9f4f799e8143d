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

pub const KIND: &str = "Frame";
pub const SET_TITLE: &str = "FrameSetTitle";

const BEHAVIOR: &str = r#"
function FrameSetTitle(identity, title) {
    var host = document.getElementById(identity);
    var label = host && host.querySelector(".frame .title");
    if (label) {
        label.textContent = title;
    }
}
function FrameBindClose(identity) {
    var host = document.getElementById(identity);
    var close = host && host.querySelector(".frame button.close");
    if (close) {
        close.onclick = function() {
            window.open("", "_self").close();
        };
    }
}"#;

const STYLE: &str = r#"
.frame {
    position: absolute;
    left: 0px;
    top: 0px;
    width: 100%;
    height: 32px;
    background-color: #424242;
    -webkit-app-region: drag;
}
.frame .title {
    color: white;
    position: absolute;
    left: 12px;
    width: 80%;
    margin-top: 6px;
    margin-bottom: 6px;
    font-size: 11pt;
}
.frame button.close {
    position: absolute;
    left: auto;
    right: 12px;
    width: auto;
    font-size: 11pt;
    -webkit-app-region: no-drag;
}
.main {
    margin-top: 40px;
}"#;

fn kind() -> Arc<KindBundle> {
    static BUNDLE: OnceLock<Arc<KindBundle>> = OnceLock::new();
    Arc::clone(BUNDLE.get_or_init(|| KindBundle::new(KIND, BEHAVIOR, STYLE)))
}

struct FrameState {
    title: String,
    outbound: Outbound,
}

/// Window chrome pinned to the top of the page: a draggable title bar with a
/// close button above the nested controls. Use at most one per window; a
/// second frame's title bar renders over the first.
#[derive(Clone)]
pub struct Frame {
    id: ControlId,
    state: Arc<Mutex<FrameState>>,
    children: Vec<Arc<dyn Control>>,
}

impl Frame {
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(identity::allocate(), title)
    }

    pub fn with_id(id: impl Into<ControlId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: Arc::new(Mutex::new(FrameState {
                title: title.into(),
                outbound: Outbound::detached(),
            })),
            children: Vec::new(),
        }
    }

    pub fn child(mut self, control: impl Control) -> Self {
        self.children.push(Arc::new(control));
        self
    }

    pub fn children(&self) -> &[Arc<dyn Control>] {
        &self.children
    }

    pub fn id(&self) -> &ControlId {
        &self.id
    }

    pub fn title(&self) -> String {
        self.state.lock().title.clone()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        let title = title.into();
        let outbound = {
            let mut state = self.state.lock();
            state.title.clone_from(&title);
            state.outbound.clone()
        };
        outbound.enqueue(&self.id, SET_TITLE, title);
    }
}

impl Control for Frame {
    fn register(&self, scope: &mut RegistryBuilder) -> Result<ControlDescriptor, BuildError> {
        let mut main = String::new();
        for child in &self.children {
            let fragment = scope.nest(child)?;
            if !main.is_empty() {
                main.push('\n');
            }
            main.push_str(&fragment);
        }

        let title = {
            let mut state = self.state.lock();
            state.outbound = scope.outbound().clone();
            state.title.clone()
        };
        let fragment = format!(
            "<section id=\"{id}\" class=\"frame-host\">\n\
             <div class=\"frame\">\n\
             <a class=\"title\">{title}</a>\n\
             <button class=\"close\">x</button>\n\
             </div>\n\
             <div class=\"main\">\n{main}\n</div>\n\
             </section>",
            id = escape_html(self.id.as_str()),
            title = escape_html(&title),
        );
        Ok(ControlDescriptor::new(self.id.clone(), kind(), fragment)
            .script(format!("FrameBindClose({});", js_string(self.id.as_str()))))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("id", &self.id)
            .field("title", &self.title())
            .field("children", &self.children.len())
            .finish()
    }
}
