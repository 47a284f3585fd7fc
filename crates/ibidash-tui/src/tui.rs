//! The dashboard's full-screen terminal session.
//!
//! `Tui::enter` takes over the terminal for the lifetime of the value;
//! dropping it, a panic, or an eyre report all hand the shell back in a
//! usable state.

use std::io::{Stdout, stdout};

use color_eyre::eyre::Result;
use crossterm::{
    ExecutableCommand, cursor,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};

type Backend = CrosstermBackend<Stdout>;

/// An entered terminal session. Only one should exist at a time.
pub struct Tui {
    terminal: Terminal<Backend>,
}

impl Tui {
    /// Switch to raw mode on the alternate screen and hide the cursor.
    pub fn enter() -> Result<Self> {
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        terminal::enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?.execute(cursor::Hide)?;
        terminal.clear()?;
        Ok(Self { terminal })
    }

    /// Paint one dashboard frame.
    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        leave();
    }
}

// Errors are ignored: this also runs from the panic hook.
fn leave() {
    let _ = terminal::disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = stdout().execute(cursor::Show);
}

/// Install color-eyre's report hook and a panic hook that leaves the
/// dashboard screen before the report is printed.
///
/// Call this before [`Tui::enter`] so startup failures print cleanly too.
pub fn install_hooks() -> Result<()> {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .into_hooks();
    eyre_hook.install()?;

    let panic_hook = panic_hook.into_panic_hook();
    std::panic::set_hook(Box::new(move |info| {
        leave();
        panic_hook(info);
    }));
    Ok(())
}
