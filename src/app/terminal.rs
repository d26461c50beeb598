use std::{
    io::{self, Stdout},
    sync::{
        Once,
        atomic::{AtomicBool, Ordering},
    },
};

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};

type Backend = CrosstermBackend<Stdout>;

static PANIC_HOOK: Once = Once::new();
static SCREEN_ACTIVE: AtomicBool = AtomicBool::new(false);

/// The full-screen surface a fill session draws on. Raw mode and the
/// alternate screen are left on drop and when a panic unwinds through the
/// event loop.
pub struct FillTerminal {
    inner: Terminal<Backend>,
}

impl FillTerminal {
    pub fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        SCREEN_ACTIVE.store(true, Ordering::SeqCst);
        match Self::open_backend() {
            Ok(inner) => {
                install_panic_hook();
                Ok(Self { inner })
            }
            Err(err) => {
                leave_screen();
                Err(err)
            }
        }
    }

    fn open_backend() -> Result<Terminal<Backend>> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        Terminal::new(CrosstermBackend::new(stdout)).context("failed to initialize terminal")
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame<'_>)) -> Result<()> {
        self.inner
            .draw(render)
            .context("failed to draw fill screen")?;
        Ok(())
    }

    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        self.inner
            .resize(Rect::new(0, 0, width, height))
            .context("failed to resize terminal")
    }
}

impl Drop for FillTerminal {
    fn drop(&mut self) {
        let _ = self.inner.show_cursor();
        leave_screen();
    }
}

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            leave_screen();
            previous(info);
        }));
    });
}

/// Only the first call after `enter` touches the terminal.
fn leave_screen() {
    if !SCREEN_ACTIVE.swap(false, Ordering::SeqCst) {
        return;
    }
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}
