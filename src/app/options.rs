use std::{sync::Arc, time::Duration};

use crate::domain::RenderMode;

use super::keymap::{self, Keymap, KeymapError};

#[derive(Debug, Clone)]
pub struct UiOptions {
    /// How long a submission stays cancellable and how often the screen
    /// polls for input.
    pub tick_rate: Duration,
    pub confirm_exit: bool,
    pub show_help: bool,
    pub style: Option<RenderMode>,
    pub(crate) keymap: Arc<Keymap>,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
            confirm_exit: true,
            show_help: true,
            style: None,
            keymap: keymap::default_keymap(),
        }
    }
}

impl UiOptions {
    pub fn with_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }

    pub fn with_confirm_exit(mut self, confirm: bool) -> Self {
        self.confirm_exit = confirm;
        self
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_style(mut self, style: RenderMode) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = Arc::new(keymap);
        self
    }

    pub fn with_keymap_json(self, source: &str) -> Result<Self, KeymapError> {
        Ok(self.with_keymap(Keymap::from_json(source)?))
    }
}
