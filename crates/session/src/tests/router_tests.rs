use std::{
    any::Any,
    sync::atomic::{AtomicUsize, Ordering},
};

use parking_lot::Mutex;
use shared::{domain::ControlId, protocol::EXIT_EVENT};

use super::*;
use crate::{
    descriptor::{Control, ControlDescriptor},
    dispatcher::Outbound,
    error::BuildError,
    kind::KindBundle,
    registry::{self, RegistryBuilder},
};

struct Recorder {
    id: &'static str,
    seen: Arc<Mutex<Vec<(String, String)>>>,
}

impl Control for Recorder {
    fn register(&self, _scope: &mut RegistryBuilder) -> Result<ControlDescriptor, BuildError> {
        let on_click = Arc::clone(&self.seen);
        let on_change = Arc::clone(&self.seen);
        Ok(
            ControlDescriptor::new(ControlId::from(self.id), KindBundle::new("Rec", "", ""), "")
                .on("RecOnClick", move |value| {
                    on_click.lock().push(("click".into(), value.into()))
                })
                .on("RecOnChange", move |value| {
                    on_change.lock().push(("change".into(), value.into()))
                }),
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn router_with(
    veto: Option<ExitVeto>,
) -> (EventRouter, Arc<Mutex<Vec<(String, String)>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let tree: Vec<Arc<dyn Control>> = vec![Arc::new(Recorder {
        id: "rec",
        seen: Arc::clone(&seen),
    })];
    let (registry, _payload) = registry::build(&tree, Outbound::detached()).expect("build");
    (EventRouter::new(Arc::new(registry), veto), seen)
}

#[test]
fn routed_events_run_once_with_the_value_unchanged() {
    let (router, seen) = router_with(None);
    let value = "  spaced \"quoted\" ✓ ";

    assert_eq!(
        router.dispatch(&EventMessage::new("rec", "RecOnChange", value)),
        Ok(Dispatch::Delivered)
    );
    assert_eq!(
        router.dispatch(&EventMessage::new("rec", "RecOnClick", "")),
        Ok(Dispatch::Delivered)
    );
    assert_eq!(
        seen.lock().as_slice(),
        &[
            ("change".to_string(), value.to_string()),
            ("click".to_string(), String::new()),
        ]
    );
}

#[test]
fn unrouted_events_report_and_run_nothing() {
    let (router, seen) = router_with(None);

    let unknown_event = router
        .dispatch(&EventMessage::new("rec", "RecOnHover", ""))
        .expect_err("unrouted");
    assert_eq!(unknown_event.kind, FaultKind::UnroutedEvent);
    assert!(unknown_event.message.contains("RecOnHover"));

    let unknown_control = router
        .dispatch(&EventMessage::new("nobody", "RecOnClick", ""))
        .expect_err("unrouted");
    assert_eq!(unknown_control.kind, FaultKind::UnroutedEvent);
    assert!(!unknown_control.is_terminal());
    assert!(seen.lock().is_empty());
}

#[test]
fn exit_without_veto_is_allowed() {
    let (router, seen) = router_with(None);
    assert_eq!(
        router.dispatch(&EventMessage::new("window", EXIT_EVENT, "")),
        Ok(Dispatch::Exit)
    );
    assert!(seen.lock().is_empty());
}

#[test]
fn vetoed_exit_asks_again_next_time() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let veto: ExitVeto = Arc::new(move || counter.fetch_add(1, Ordering::SeqCst) >= 1);
    let (router, _seen) = router_with(Some(veto));

    let exit = EventMessage::new("window", EXIT_EVENT, "");
    assert_eq!(router.dispatch(&exit), Ok(Dispatch::ExitVetoed));
    assert_eq!(router.dispatch(&exit), Ok(Dispatch::Exit));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}
