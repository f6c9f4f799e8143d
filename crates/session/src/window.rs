use std::{fmt, sync::Arc};

use crate::{descriptor::Control, page::Theme, router::ExitVeto};

pub struct Window {
    pub(crate) title: String,
    pub(crate) width: Option<u32>,
    pub(crate) height: Option<u32>,
    pub(crate) controls: Vec<Arc<dyn Control>>,
    pub(crate) theme: Theme,
    pub(crate) on_exit: Option<ExitVeto>,
}

impl Window {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: None,
            height: None,
            controls: Vec::new(),
            theme: Theme::default(),
            on_exit: None,
        }
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn control(mut self, control: impl Control) -> Self {
        self.controls.push(Arc::new(control));
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn on_exit<F>(mut self, veto: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.on_exit = Some(Arc::new(veto));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn controls(&self) -> &[Arc<dyn Control>] {
        &self.controls
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("title", &self.title)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("controls", &self.controls.len())
            .field("on_exit", &self.on_exit.is_some())
            .finish()
    }
}
