use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use anyhow::Result;
use host::config::load_settings;
use session::{Button, Frame, Label, TextInput, Window};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = load_settings();
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();

    let status = Label::new("Nothing clicked yet");
    let echo = Label::new("");
    let clicks = Arc::new(AtomicU32::new(0));

    let counter = {
        let status = status.clone();
        let clicks = Arc::clone(&clicks);
        Button::new("Click me").on_click(move |button| {
            let count = clicks.fetch_add(1, Ordering::Relaxed) + 1;
            status.set_text(format!("Clicked {count} times"));
            if count == 3 {
                button.set_text("Keep going");
            }
        })
    };
    let input = {
        let echo = echo.clone();
        TextInput::new("").on_change(move |_, value| echo.set_text(format!("You typed: {value}")))
    };

    let window = Window::new("Demo")
        .size(480, 320)
        .control(
            Frame::new("Demo")
                .child(status)
                .child(counter)
                .child(input)
                .child(echo),
        )
        .on_exit(move || {
            info!(clicks = clicks.load(Ordering::Relaxed), "window closing");
            true
        });

    host::show(window, &settings).await?;
    Ok(())
}
