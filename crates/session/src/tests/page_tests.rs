use super::*;

fn payload() -> RenderPayload {
    RenderPayload {
        body: "<button id=\"btn0\">Go</button>".into(),
        script: "function ButtonSetText(identity, text) {}".into(),
        style: "button { color: red; }".into(),
    }
}

#[test]
fn document_contains_every_payload_part_in_place() {
    let page = render_document(
        "Demo <1>",
        PageGeometry {
            width: None,
            height: None,
        },
        &Theme::default(),
        &payload(),
    );

    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("<title>Demo &lt;1&gt;</title>"));
    let style_start = page.find("<style>").expect("style");
    let style_end = page.find("</style>").expect("style end");
    assert!(page[style_start..style_end].contains("font-family: sans-serif"));
    assert!(page[style_start..style_end].contains("button { color: red; }"));

    let body = page.find("<body>").expect("body");
    let script = page.find("<script>").expect("script");
    assert!(page[body..script].contains("<button id=\"btn0\">Go</button>"));
    assert!(page[script..].contains("function ButtonSetText"));
    assert!(!page.contains("resizeTo"));
}

#[test]
fn runtime_precedes_control_scripts_and_reports_exit() {
    let page = render_document(
        "t",
        PageGeometry {
            width: Some(800),
            height: Some(600),
        },
        &Theme::new("", "/* theme script */"),
        &payload(),
    );

    let socket = page.find("new WebSocket(").expect("socket");
    let exit = page.find(r#"loomSend("window", "exit", "")"#).expect("exit");
    let resize = page.find("window.resizeTo(800, 600);").expect("resize");
    let theme = page.find("/* theme script */").expect("theme");
    let controls = page.find("function ButtonSetText").expect("controls");
    assert!(socket < exit && exit < resize && resize < theme && theme < controls);
    assert!(page.contains(r#"hook(data["identity"], data["value"]);"#));
}
