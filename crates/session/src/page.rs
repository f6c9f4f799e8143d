use std::borrow::Cow;

use shared::protocol::{EXIT_EVENT, WINDOW_IDENTITY};

use crate::{
    controls::{escape_html, js_string},
    kind::push_block,
    registry::RenderPayload,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub css: Cow<'static, str>,
    pub script: Cow<'static, str>,
}

impl Theme {
    pub fn new(css: impl Into<Cow<'static, str>>, script: impl Into<Cow<'static, str>>) -> Self {
        Self {
            css: css.into(),
            script: script.into(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(DEFAULT_CSS, "")
    }
}

const DEFAULT_CSS: &str = r#"
body {
    margin: 0;
    padding: 8px;
    font-family: sans-serif;
    font-size: 11pt;
}"#;

const RUNTIME: &str = r#"
var loomSocket = new WebSocket("ws://" + location.host + "/ws");
function loomSend(identity, event, value) {
    if (loomSocket.readyState === WebSocket.OPEN) {
        loomSocket.send(JSON.stringify({"identity": identity, "event": event, "value": value === undefined ? "" : String(value)}));
    }
}
function loomBind(identity, domEvent, event) {
    var element = document.getElementById(identity);
    if (!element) {
        return;
    }
    element.addEventListener(domEvent, function() {
        loomSend(identity, event, element.value === undefined ? "" : String(element.value));
    });
}
loomSocket.onmessage = function(evt) {
    var data = JSON.parse(evt.data);
    var hook = window[data["function"]];
    if (typeof hook === "function") {
        hook(data["identity"], data["value"]);
    }
};"#;

#[derive(Debug, Clone, Copy)]
pub(crate) struct PageGeometry {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

pub(crate) fn render_document(
    title: &str,
    geometry: PageGeometry,
    theme: &Theme,
    payload: &RenderPayload,
) -> String {
    let mut style = String::new();
    push_block(&mut style, &theme.css);
    push_block(&mut style, &payload.style);

    let mut script = String::new();
    push_block(&mut script, RUNTIME);
    push_block(
        &mut script,
        &format!(
            "window.addEventListener(\"unload\", function() {{\n    loomSend({}, {}, \"\");\n}});",
            js_string(WINDOW_IDENTITY),
            js_string(EXIT_EVENT)
        ),
    );
    if let (Some(width), Some(height)) = (geometry.width, geometry.height) {
        push_block(&mut script, &format!("window.resizeTo({width}, {height});"));
    }
    push_block(&mut script, &theme.script);
    push_block(&mut script, &payload.script);

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <style>\n{style}\n</style>\n\
         </head>\n\
         <body>\n{body}\n\
         <script>\n{script}\n</script>\n\
         </body>\n\
         </html>\n",
        title = escape_html(title),
        body = payload.body,
    )
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
