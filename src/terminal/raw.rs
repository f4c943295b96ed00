use std::sync::atomic::{AtomicBool, Ordering};

static TERMINAL_INITIALIZED: AtomicBool = AtomicBool::new(false);

type PanicHook = Box<dyn Fn(&std::panic::PanicHookInfo<'_>) + Sync + Send + 'static>;

/// RAII wrapper for raw mode and alternate screen.
/// Enables raw mode, focus reporting and the alternate screen on creation.
/// Restores terminal state on drop.
pub struct RawMode {
    original_hook: Option<PanicHook>,
}

impl RawMode {
    /// Enter raw mode and alternate screen
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        crossterm::terminal::enable_raw_mode()?;

        let mut stdout = std::io::stdout();
        crossterm::execute!(
            stdout,
            crossterm::terminal::EnterAlternateScreen,
            crossterm::event::EnableFocusChange,
            crossterm::terminal::Clear(crossterm::terminal::ClearType::All)
        )?;

        TERMINAL_INITIALIZED.store(true, Ordering::SeqCst);

        // Restore the terminal before the panic message is printed
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(|info| {
            restore_terminal();
            eprintln!("{}", info);
        }));

        Ok(Self {
            original_hook: Some(original_hook),
        })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        restore_terminal();

        if let Some(hook) = self.original_hook.take() {
            std::panic::set_hook(hook);
        }
    }
}

fn restore_terminal() {
    if TERMINAL_INITIALIZED.swap(false, Ordering::SeqCst) {
        let mut stdout = std::io::stdout();

        // Clear before leaving so terminals without an alternate screen
        // are not left with prompt artifacts
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
            crossterm::cursor::MoveTo(0, 0),
            crossterm::cursor::Show,
            crossterm::event::DisableFocusChange,
            crossterm::terminal::LeaveAlternateScreen
        );

        let _ = crossterm::terminal::disable_raw_mode();
    }
}
