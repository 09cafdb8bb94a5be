/// Terminal front end: a pixel canvas presented on the terminal grid
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::io::{self, stdout, Stdout, Write};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use wirecube_core::{Platform, PlatformEvent, SceneConfig};

pub mod logging;
pub mod renderer;

pub use renderer::PixelCanvas;

/// Rows kept free at the top for the status line
const STATUS_ROWS: u16 = 1;

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("failed to take over the terminal")]
    Acquire(#[source] io::Error),
    #[error("failed to read terminal events")]
    Events(#[source] io::Error),
    #[error("failed to present a frame")]
    Present(#[source] io::Error),
    #[error("failed to restore the terminal")]
    Restore(#[source] io::Error),
}

/// Translate a terminal event into what the frame loop cares about.
///
/// `q`, `Esc` and `Ctrl-C` quit; raw mode swallows the usual SIGINT so
/// `Ctrl-C` has to be handled here.
pub fn map_event(event: &Event) -> PlatformEvent {
    match event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => PlatformEvent::Quit,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => PlatformEvent::Quit,
            _ => PlatformEvent::Other,
        },
        _ => PlatformEvent::Other,
    }
}

/// Raw-mode switching and size queries for the controlling terminal.
///
/// Raw mode is process-wide state rather than part of the writer, so the
/// platform reaches it through this trait.
pub trait TerminalModes {
    fn size(&self) -> io::Result<(u16, u16)>;
    fn enable_raw_mode(&self) -> io::Result<()>;
    fn disable_raw_mode(&self) -> io::Result<()>;
}

/// The real terminal, via crossterm
#[derive(Debug, Clone, Copy, Default)]
pub struct CrosstermModes;

impl TerminalModes for CrosstermModes {
    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn enable_raw_mode(&self) -> io::Result<()> {
        terminal::enable_raw_mode()
    }

    fn disable_raw_mode(&self) -> io::Result<()> {
        terminal::disable_raw_mode()
    }
}

/// A terminal acting as window, drawing surface and event source.
///
/// The terminal is put into raw mode on the alternate screen for the
/// platform's lifetime and restored exactly once, by `shutdown` or on drop.
pub struct TerminalPlatform<W: Write = Stdout, M: TerminalModes = CrosstermModes> {
    out: W,
    modes: M,
    canvas: PixelCanvas,
    title: &'static str,
    cols: u16,
    rows: u16,
    attached: bool,
}

impl TerminalPlatform<Stdout, CrosstermModes> {
    /// Take over the controlling terminal. Failure here is fatal to the caller.
    pub fn acquire(config: &SceneConfig) -> Result<Self, TerminalError> {
        Self::acquire_with(stdout(), CrosstermModes, config)
    }
}

impl<W: Write, M: TerminalModes> TerminalPlatform<W, M> {
    /// Switch `modes` to raw mode and enter the alternate screen on `out`.
    ///
    /// Nothing is written and raw mode is left alone if the size query
    /// fails. If entering the alternate screen fails, both are rolled back
    /// as far as possible before the error is returned.
    pub fn acquire_with(mut out: W, modes: M, config: &SceneConfig) -> Result<Self, TerminalError> {
        let (cols, rows) = modes.size().map_err(TerminalError::Acquire)?;

        modes.enable_raw_mode().map_err(TerminalError::Acquire)?;
        if let Err(e) = execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::SetTitle(config.title)
        ) {
            if let Err(leave) = execute!(out, terminal::LeaveAlternateScreen, cursor::Show) {
                warn!(error = %leave, "could not leave the alternate screen");
            }
            if let Err(raw) = modes.disable_raw_mode() {
                warn!(error = %raw, "could not disable raw mode");
            }
            return Err(TerminalError::Acquire(e));
        }

        info!(cols, rows, width = config.width, height = config.height, "terminal acquired");

        let mut platform = Self::detached(out, modes, config, cols, rows);
        platform.attached = true;
        Ok(platform)
    }

    /// A platform writing to `out` without touching terminal modes
    pub fn with_writer(out: W, config: &SceneConfig, cols: u16, rows: u16) -> Self
    where
        M: Default,
    {
        Self::detached(out, M::default(), config, cols, rows)
    }

    fn detached(out: W, modes: M, config: &SceneConfig, cols: u16, rows: u16) -> Self {
        let canvas_size = (config.width as usize, config.height as usize);
        Self {
            out,
            modes,
            canvas: PixelCanvas::new(canvas_size.0, canvas_size.1, config.background),
            title: config.title,
            cols,
            rows,
            attached: false,
        }
    }

    pub fn canvas(&self) -> &PixelCanvas {
        &self.canvas
    }

    pub fn grid_size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Handle an event the platform reacts to itself, then classify it
    pub fn handle_event(&mut self, event: &Event) -> PlatformEvent {
        if let Event::Resize(cols, rows) = *event {
            self.cols = cols;
            self.rows = rows;
            if let Err(e) = queue!(self.out, terminal::Clear(terminal::ClearType::All)) {
                warn!(error = %e, cols, rows, "failed to clear after resize");
            }
        }
        map_event(event)
    }

    fn draw_status(&mut self) -> io::Result<()> {
        let status = format!("{} | Q/Esc to quit", self.title);
        let visible: String = status.chars().take(self.cols as usize).collect();
        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            SetForegroundColor(TermColor::Yellow),
            Print(visible),
            ResetColor
        )
    }

    fn present_frame(&mut self) -> io::Result<()> {
        let canvas_rows = self.rows.saturating_sub(STATUS_ROWS);
        self.canvas
            .draw(&mut self.out, STATUS_ROWS, self.cols, canvas_rows)?;
        self.draw_status()?;
        self.out.flush()
    }

    fn restore(&mut self) -> Result<(), TerminalError> {
        if !self.attached {
            return Ok(());
        }
        self.attached = false;

        let screen = execute!(self.out, terminal::LeaveAlternateScreen, cursor::Show);
        let raw = self.modes.disable_raw_mode();
        screen.and(raw).map_err(TerminalError::Restore)?;
        info!("terminal restored");
        Ok(())
    }
}

impl<W: Write, M: TerminalModes> Platform for TerminalPlatform<W, M> {
    type Surface = PixelCanvas;
    type Error = TerminalError;

    fn next_event(&mut self) -> Result<Option<PlatformEvent>, TerminalError> {
        if !event::poll(Duration::ZERO).map_err(TerminalError::Events)? {
            return Ok(None);
        }
        let event = event::read().map_err(TerminalError::Events)?;
        Ok(Some(self.handle_event(&event)))
    }

    fn surface(&mut self) -> &mut PixelCanvas {
        &mut self.canvas
    }

    fn present(&mut self) -> Result<(), TerminalError> {
        self.present_frame().map_err(TerminalError::Present)
    }

    fn shutdown(&mut self) -> Result<(), TerminalError> {
        self.restore()
    }
}

impl<W: Write, M: TerminalModes> Drop for TerminalPlatform<W, M> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!(error = %e, "terminal left in raw mode");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use std::cell::Cell;
    use std::rc::Rc;
    use wirecube_core::{Color, CubeWireframe, Projection, RotationAngles, Surface};

    const ENTER_ALTERNATE_SCREEN: &str = "\x1b[?1049h";
    const LEAVE_ALTERNATE_SCREEN: &str = "\x1b[?1049l";

    /// Terminal modes with scripted failures; `raw` tracks raw mode
    #[derive(Default)]
    struct FakeModes {
        size_fails: bool,
        enable_fails: bool,
        raw: Rc<Cell<bool>>,
        enabled_count: Rc<Cell<u32>>,
    }

    impl TerminalModes for FakeModes {
        fn size(&self) -> io::Result<(u16, u16)> {
            if self.size_fails {
                return Err(io::Error::new(io::ErrorKind::NotFound, "no tty"));
            }
            Ok((80, 24))
        }

        fn enable_raw_mode(&self) -> io::Result<()> {
            if self.enable_fails {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "tcsetattr"));
            }
            self.raw.set(true);
            self.enabled_count.set(self.enabled_count.get() + 1);
            Ok(())
        }

        fn disable_raw_mode(&self) -> io::Result<()> {
            self.raw.set(false);
            Ok(())
        }
    }

    /// Accepts `budget` bytes, then fails every write
    struct FailingWriter {
        written: Vec<u8>,
        budget: usize,
    }

    impl FailingWriter {
        fn new(budget: usize) -> Self {
            Self {
                written: Vec::new(),
                budget,
            }
        }
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written.len() + buf.len() > self.budget {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn press(code: KeyCode) -> Event {
        key(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn test_platform() -> TerminalPlatform<Vec<u8>> {
        TerminalPlatform::with_writer(Vec::new(), &SceneConfig::default(), 80, 24)
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_event(&press(KeyCode::Char('q'))), PlatformEvent::Quit);
        assert_eq!(map_event(&press(KeyCode::Esc)), PlatformEvent::Quit);
        assert_eq!(
            map_event(&key(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press)),
            PlatformEvent::Quit
        );
    }

    #[test]
    fn test_other_input_is_ignored() {
        assert_eq!(map_event(&press(KeyCode::Char('w'))), PlatformEvent::Other);
        assert_eq!(map_event(&press(KeyCode::Char('c'))), PlatformEvent::Other);
        assert_eq!(
            map_event(&key(KeyCode::Char('q'), KeyModifiers::NONE, KeyEventKind::Release)),
            PlatformEvent::Other
        );
        assert_eq!(map_event(&Event::FocusLost), PlatformEvent::Other);
    }

    #[test]
    fn test_resize_updates_grid() {
        let mut platform = test_platform();
        assert_eq!(platform.handle_event(&Event::Resize(120, 40)), PlatformEvent::Other);
        assert_eq!(platform.grid_size(), (120, 40));
    }

    #[test]
    fn test_surface_matches_config() {
        let mut platform = test_platform();
        let surface = platform.surface();
        assert_eq!((surface.width(), surface.height()), (800, 600));
    }

    #[test]
    fn test_present_writes_status_and_cube() {
        let mut platform = test_platform();
        let cube = CubeWireframe::cube();
        let points = Projection::default().project_wireframe(&cube, &RotationAngles::zero());
        SceneConfig::default()
            .renderer()
            .draw_frame(platform.surface(), &cube, &points);
        assert!(platform.canvas().lit_pixels() > 0);

        platform.present().unwrap();

        let text = String::from_utf8_lossy(platform.writer()).into_owned();
        assert!(text.contains("3D Rotating Cube"));
        assert!(text.contains("38;2;0;0;255"));
    }

    #[test]
    fn test_present_after_clear_shows_no_lines() {
        let mut platform = test_platform();
        platform.surface().clear(Color::BLACK);
        platform.present().unwrap();

        let text = String::from_utf8_lossy(platform.writer()).into_owned();
        assert!(!text.contains('@'));
        assert!(!text.contains("38;2;0;0;255"));
    }

    #[test]
    fn test_shutdown_without_acquire_is_noop() {
        let mut platform = test_platform();
        assert!(platform.shutdown().is_ok());
        assert!(platform.shutdown().is_ok());
        assert!(platform.writer().is_empty());
    }

    #[test]
    fn test_acquire_fails_cleanly_without_a_terminal() {
        let modes = FakeModes {
            size_fails: true,
            ..FakeModes::default()
        };
        let enabled = modes.enabled_count.clone();
        let mut out = Vec::new();

        let result = TerminalPlatform::acquire_with(&mut out, modes, &SceneConfig::default());

        assert!(matches!(result, Err(TerminalError::Acquire(_))));
        drop(result);
        assert!(out.is_empty());
        assert!(!String::from_utf8_lossy(&out).contains(ENTER_ALTERNATE_SCREEN));
        assert_eq!(enabled.get(), 0);
    }

    #[test]
    fn test_acquire_fails_when_raw_mode_is_refused() {
        let modes = FakeModes {
            enable_fails: true,
            ..FakeModes::default()
        };
        let raw = modes.raw.clone();
        let mut out = Vec::new();

        let result = TerminalPlatform::acquire_with(&mut out, modes, &SceneConfig::default());

        assert!(matches!(result, Err(TerminalError::Acquire(_))));
        drop(result);
        assert!(out.is_empty());
        assert!(!raw.get());
    }

    #[test]
    fn test_acquire_rolls_back_when_alternate_screen_fails() {
        let modes = FakeModes::default();
        let raw = modes.raw.clone();
        let enabled = modes.enabled_count.clone();

        let result =
            TerminalPlatform::acquire_with(FailingWriter::new(0), modes, &SceneConfig::default());

        assert!(matches!(result, Err(TerminalError::Acquire(_))));
        assert_eq!(enabled.get(), 1);
        assert!(!raw.get());
    }

    #[test]
    fn test_acquire_then_shutdown_restores_once() {
        let modes = FakeModes::default();
        let raw = modes.raw.clone();
        let mut out = Vec::new();

        {
            let mut platform =
                TerminalPlatform::acquire_with(&mut out, modes, &SceneConfig::default()).unwrap();
            assert!(raw.get());
            assert_eq!(platform.grid_size(), (80, 24));

            platform.shutdown().unwrap();
            assert!(!raw.get());
            platform.shutdown().unwrap();
        }

        let text = String::from_utf8_lossy(&out).into_owned();
        assert!(text.contains(ENTER_ALTERNATE_SCREEN));
        assert_eq!(text.matches(LEAVE_ALTERNATE_SCREEN).count(), 1);
    }

    #[test]
    fn test_drop_restores_an_attached_terminal() {
        let modes = FakeModes::default();
        let raw = modes.raw.clone();
        let mut out = Vec::new();

        let platform =
            TerminalPlatform::acquire_with(&mut out, modes, &SceneConfig::default()).unwrap();
        drop(platform);

        assert!(!raw.get());
        assert!(String::from_utf8_lossy(&out).contains(LEAVE_ALTERNATE_SCREEN));
    }

    #[test]
    fn test_resize_survives_a_failed_clear() {
        let mut platform: TerminalPlatform<FailingWriter> =
            TerminalPlatform::with_writer(FailingWriter::new(0), &SceneConfig::default(), 80, 24);

        assert_eq!(platform.handle_event(&Event::Resize(100, 30)), PlatformEvent::Other);
        assert_eq!(platform.grid_size(), (100, 30));
    }
}
