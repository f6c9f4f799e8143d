use std::{fmt::Display, pin::Pin, sync::Arc, time::Duration};

use futures::{Sink, SinkExt, Stream, StreamExt};
use parking_lot::Mutex;
use shared::{
    error::{Fault, FaultKind},
    protocol::{EventMessage, UpdateMessage},
};
use tokio::{
    sync::{broadcast, mpsc, oneshot, watch},
    task::AbortHandle,
};
use tracing::{debug, info, warn};

use crate::{
    descriptor::Control,
    dispatcher::Outbound,
    error::{BuildError, SessionError},
    page::{render_document, PageGeometry},
    registry::{self, Registry, RenderPayload},
    router::{Dispatch, EventRouter},
    window::Window,
};

const FAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Building,
    Active,
    Closing,
    Closed,
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub drain_timeout: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            drain_timeout: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    Text(String),
    Binary(Vec<u8>),
    Heartbeat,
    Close,
}

#[derive(Debug, Clone)]
pub struct ExitSignal {
    rx: watch::Receiver<SessionState>,
}

impl ExitSignal {
    pub fn is_fired(&self) -> bool {
        // A dropped session can never reopen, so treat it as closed.
        *self.rx.borrow() == SessionState::Closed || self.rx.has_changed().is_err()
    }

    pub async fn wait(&mut self) {
        let _ = self
            .rx
            .wait_for(|state| *state == SessionState::Closed)
            .await;
    }
}

pub struct Session {
    router: EventRouter,
    payload: RenderPayload,
    page: String,
    outbound: Outbound,
    queue: Mutex<Option<mpsc::UnboundedReceiver<UpdateMessage>>>,
    state: watch::Sender<SessionState>,
    faults: broadcast::Sender<Fault>,
    options: SessionOptions,
}

impl Session {
    pub fn build(window: Window, options: SessionOptions) -> Result<Self, BuildError> {
        let Window {
            title,
            width,
            height,
            controls,
            theme,
            on_exit,
        } = window;

        let (outbound, queue) = Outbound::channel();
        let (registry, payload) = registry::build(&controls, outbound.clone())?;
        let page = render_document(&title, PageGeometry { width, height }, &theme, &payload);
        info!(
            %title,
            controls = registry.len(),
            routes = registry.route_count(),
            "session built"
        );

        let (state, _) = watch::channel(SessionState::Building);
        let (faults, _) = broadcast::channel(FAULT_CAPACITY);
        Ok(Self {
            router: EventRouter::new(Arc::new(registry), on_exit),
            payload,
            page,
            outbound,
            queue: Mutex::new(Some(queue)),
            state,
            faults,
            options,
        })
    }

    pub fn page(&self) -> &str {
        &self.page
    }

    pub fn payload(&self) -> &RenderPayload {
        &self.payload
    }

    pub fn registry(&self) -> &Registry {
        self.router.registry()
    }

    pub fn outbound(&self) -> Outbound {
        self.outbound.clone()
    }

    pub fn lookup(&self, identity: &str) -> Option<Arc<dyn Control>> {
        self.registry().lookup(identity)
    }

    pub fn lookup_as<T: Control + Clone>(&self, identity: &str) -> Option<T> {
        self.registry()
            .get(identity)?
            .control()
            .as_any()
            .downcast_ref::<T>()
            .cloned()
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    pub fn exit_signal(&self) -> ExitSignal {
        ExitSignal {
            rx: self.state.subscribe(),
        }
    }

    pub fn faults(&self) -> broadcast::Receiver<Fault> {
        self.faults.subscribe()
    }

    /// Drives the renderer connection until exit or connection loss.
    ///
    /// Inbound frames are dispatched on this task one at a time; updates are
    /// written by a spawned task in enqueue order. Only one connection is
    /// ever served.
    pub async fn serve<R, E, W>(&self, reader: R, writer: W) -> Result<(), SessionError>
    where
        R: Stream<Item = Result<InboundFrame, E>> + Send,
        E: Display + Send,
        W: Sink<String> + Send + 'static,
        W::Error: Display + Send,
    {
        let Some(queue) = self.queue.lock().take() else {
            return Err(SessionError::AlreadyConnected);
        };

        self.transition(SessionState::Active);
        let (stop_tx, stop_rx) = oneshot::channel();
        let writer_task = tokio::spawn(write_loop(queue, writer, stop_rx, self.faults.clone()));
        let mut guard = ServeGuard {
            session: self,
            writer: writer_task.abort_handle(),
            finished: false,
        };

        self.read_loop(reader).await;

        self.transition(SessionState::Closing);
        let _ = stop_tx.send(());
        match tokio::time::timeout(self.options.drain_timeout, writer_task).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => warn!(%err, "outbound writer failed"),
            Err(_) => {
                guard.writer.abort();
                warn!(
                    timeout_ms = self.options.drain_timeout.as_millis() as u64,
                    "outbound drain timed out; remaining updates dropped"
                );
            }
        }
        guard.finished = true;
        Ok(())
    }

    async fn read_loop<R, E>(&self, reader: R)
    where
        R: Stream<Item = Result<InboundFrame, E>> + Send,
        E: Display + Send,
    {
        let mut reader = Box::pin(reader);
        loop {
            let frame = match reader.next().await {
                Some(Ok(frame)) => frame,
                Some(Err(err)) => {
                    report(&self.faults, Fault::new(FaultKind::ConnectionLost, err.to_string()));
                    return;
                }
                None => {
                    report(
                        &self.faults,
                        Fault::new(FaultKind::ConnectionLost, "renderer connection ended"),
                    );
                    return;
                }
            };

            let text = match frame {
                InboundFrame::Text(text) => text,
                InboundFrame::Binary(bytes) => {
                    report(
                        &self.faults,
                        Fault::new(
                            FaultKind::MalformedMessage,
                            format!("unexpected binary frame of {} bytes", bytes.len()),
                        ),
                    );
                    continue;
                }
                InboundFrame::Heartbeat => continue,
                InboundFrame::Close => {
                    report(
                        &self.faults,
                        Fault::new(FaultKind::ConnectionLost, "renderer closed the connection"),
                    );
                    return;
                }
            };

            let message = match serde_json::from_str::<EventMessage>(&text) {
                Ok(message) => message,
                Err(err) => {
                    report(
                        &self.faults,
                        Fault::new(FaultKind::MalformedMessage, format!("{err}: {text}")),
                    );
                    continue;
                }
            };

            match self.router.dispatch(&message) {
                Ok(Dispatch::Exit) => {
                    info!(identity = %message.identity, "exit requested by renderer");
                    return;
                }
                Ok(Dispatch::Delivered | Dispatch::ExitVetoed) => {}
                Err(fault) => report(&self.faults, fault),
            }
        }
    }

    fn transition(&self, next: SessionState) {
        let previous = self.state.send_replace(next);
        debug!(?previous, ?next, "session state changed");
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state())
            .field("router", &self.router)
            .finish_non_exhaustive()
    }
}

// Closes the session however `serve` ends, including when its future is
// dropped mid-read.
struct ServeGuard<'a> {
    session: &'a Session,
    writer: AbortHandle,
    finished: bool,
}

impl Drop for ServeGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.writer.abort();
            warn!("serve dropped before the connection ended; writer aborted");
        }
        self.session.transition(SessionState::Closed);
    }
}

async fn write_loop<W>(
    mut queue: mpsc::UnboundedReceiver<UpdateMessage>,
    writer: W,
    mut stop: oneshot::Receiver<()>,
    faults: broadcast::Sender<Fault>,
) where
    W: Sink<String> + Send + 'static,
    W::Error: Display + Send,
{
    let mut writer = Box::pin(writer);
    loop {
        tokio::select! {
            biased;
            message = queue.recv() => match message {
                Some(message) => deliver(&mut writer, &message, &faults).await,
                None => break,
            },
            _ = &mut stop => {
                while let Ok(message) = queue.try_recv() {
                    deliver(&mut writer, &message, &faults).await;
                }
                break;
            }
        }
    }
    if let Err(err) = writer.close().await {
        debug!(%err, "closing renderer connection failed");
    }
}

async fn deliver<W>(
    writer: &mut Pin<Box<W>>,
    message: &UpdateMessage,
    faults: &broadcast::Sender<Fault>,
) where
    W: Sink<String>,
    W::Error: Display,
{
    let text = match serde_json::to_string(message) {
        Ok(text) => text,
        Err(err) => {
            report(faults, Fault::new(FaultKind::DeliveryFailure, err.to_string()));
            return;
        }
    };
    if let Err(err) = writer.send(text).await {
        report(
            faults,
            Fault::new(
                FaultKind::DeliveryFailure,
                format!("{} to {}: {err}", message.function, message.identity),
            ),
        );
    }
}

fn report(faults: &broadcast::Sender<Fault>, fault: Fault) {
    warn!(kind = ?fault.kind, message = %fault.message, "session fault");
    let _ = faults.send(fault);
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
