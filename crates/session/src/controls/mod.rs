mod button;
mod frame;
mod label;
mod text_input;

pub use button::Button;
pub use frame::Frame;
pub use label::Label;
pub use text_input::TextInput;

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn js_string(text: &str) -> String {
    serde_json::Value::String(text.to_owned())
        .to_string()
        .replace('<', "\\u003c")
}

#[cfg(test)]
#[path = "../tests/controls_tests.rs"]
mod tests;
