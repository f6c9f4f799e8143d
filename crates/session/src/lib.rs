pub mod controls;
pub mod descriptor;
pub mod dispatcher;
pub mod error;
pub mod identity;
pub mod kind;
pub mod page;
pub mod registry;
pub mod router;
pub mod session;
pub mod window;

pub use controls::{Button, Frame, Label, TextInput};
pub use descriptor::{Control, ControlDescriptor, EventCallback};
pub use dispatcher::Outbound;
pub use error::{BuildError, SessionError};
pub use kind::{KindAssets, KindBundle};
pub use page::Theme;
pub use registry::{Registry, RegistryBuilder, RenderPayload};
pub use router::{Dispatch, EventRouter, ExitVeto};
pub use session::{ExitSignal, InboundFrame, Session, SessionOptions, SessionState};
pub use shared::{
    domain::ControlId,
    error::{Fault, FaultKind},
    protocol::{EventMessage, UpdateMessage, EXIT_EVENT, WINDOW_IDENTITY},
};
pub use window::Window;
