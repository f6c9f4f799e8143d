use std::{
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

use super::*;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn defaults_apply_without_file_or_env() {
    let settings = load_settings_from(Path::new("/nonexistent/loom.toml"), no_env);
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.port_start, 7072);
    assert_eq!(
        settings.session_options().drain_timeout,
        Duration::from_millis(500)
    );
}

#[test]
fn file_values_accept_strings_and_integers() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
bind_host = "0.0.0.0"
port_start = 9000
port_end = "9010"
drain_timeout_ms = 50
log_filter = "debug"
"#,
    );
    assert_eq!(settings.bind_host, "0.0.0.0");
    assert_eq!(settings.port_start, 9000);
    assert_eq!(settings.port_end, 9010);
    assert_eq!(settings.drain_timeout_ms, 50);
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn unparseable_values_are_ignored() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "port_start = \"soon\"\nport_end = 70000\n");
    apply_file(&mut settings, "this is not toml");
    apply_env(&mut settings, |key| {
        (key == "APP__DRAIN_TIMEOUT_MS").then(|| "fast".to_string())
    });
    assert_eq!(settings, Settings::default());
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("loom_host_settings_{suffix}.toml"));
    fs::write(&path, "bind_host = \"10.0.0.1\"\nport_start = 8000\n").expect("write");

    let settings = load_settings_from(&path, |key| match key {
        "LOOM_BIND_HOST" => Some("192.168.0.1".into()),
        "APP__BIND_HOST" => Some("127.0.0.2".into()),
        "APP__PORT_END" => Some("8005".into()),
        "RUST_LOG" => Some("warn".into()),
        _ => None,
    });
    assert_eq!(settings.bind_host, "127.0.0.2");
    assert_eq!(settings.port_start, 8000);
    assert_eq!(settings.port_end, 8005);
    assert_eq!(settings.log_filter, "warn");

    fs::remove_file(path).expect("cleanup");
}
