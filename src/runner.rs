//! Drives a [`Desktop`] from a terminal: input in, frames and paint out.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use tracing::debug;

use crate::config::ShellConfig;
use crate::desktop::Desktop;
use crate::drivers::mouse::{PointerAction, pointer_action};
use crate::drivers::{InputDriver, OutputDriver};
use crate::error::ShellError;
use crate::event_loop::{ControlFlow, EventLoop};
use crate::geometry::{Bounds, Viewport};
use crate::host::{GeometryProvider, ShellHost};
use crate::view::render_desktop;
use crate::window::decorator::TitleBarDecorator;

/// Run until Ctrl-Q. Every gesture still in flight is torn down on the way
/// out, including when the loop ends with an error.
pub fn run_desktop<O, D>(
    output: &mut O,
    input: D,
    desktop: &mut Desktop,
    host: &mut ShellHost,
    config: &ShellConfig,
) -> Result<(), ShellError>
where
    O: OutputDriver,
    D: InputDriver,
{
    let decorator = TitleBarDecorator;
    let mut event_loop = EventLoop::new(input, config.frame_interval);
    event_loop.driver().set_mouse_capture(true)?;

    let result = event_loop.run(|_, event| {
        let Some(event) = event else {
            let (width, height) = output.size()?;
            sync_viewport(desktop, host, width, height, config.chrome_height);
            for token in host.frames.take_due() {
                desktop.on_frame(token);
            }
            output.draw(|mut ui| render_desktop(&mut ui, &*desktop, &*host, &decorator))?;
            return Ok(ControlFlow::Continue);
        };
        Ok(handle_event(desktop, host, &event, config.chrome_height))
    });

    desktop.teardown(host);
    result.map_err(ShellError::from)
}

fn handle_event(
    desktop: &mut Desktop,
    host: &mut ShellHost,
    event: &Event,
    chrome_height: i32,
) -> ControlFlow {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return ControlFlow::Quit;
            }
            if key.code == KeyCode::Esc {
                desktop.dismiss_notice();
            }
        }
        Event::Mouse(mouse) => match pointer_action(mouse) {
            Some(PointerAction::Down { position, shift }) => {
                let hit = desktop.pointer_down(host, position, shift, Instant::now());
                debug!(?hit, x = position.x, y = position.y, "pointer down");
            }
            Some(PointerAction::Move(position)) => desktop.pointer_move(host, position),
            Some(PointerAction::Up(position)) => {
                desktop.pointer_move(host, position);
                desktop.pointer_up(host, Instant::now());
            }
            None => {}
        },
        Event::Resize(width, height) => {
            sync_viewport(desktop, host, *width, *height, chrome_height);
        }
        // the release will never reach us
        Event::FocusLost => desktop.teardown(host),
        _ => {}
    }
    ControlFlow::Continue
}

fn sync_viewport(
    desktop: &mut Desktop,
    host: &mut ShellHost,
    width: u16,
    height: u16,
    chrome_height: i32,
) {
    let viewport = Viewport::new(i32::from(width), i32::from(height), chrome_height);
    if host.viewport() == Some(viewport) {
        return;
    }
    debug!(width, height, "viewport changed");
    host.set_viewport(Some(viewport));
    host.set_container(Some(Bounds::new(
        0,
        0,
        viewport.width,
        viewport.usable_height(),
    )));
    desktop.resize(viewport);
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io;
    use std::time::Duration;

    use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::ui::UiFrame;
    use crate::window::WindowContent;

    struct TestOutput {
        terminal: Terminal<TestBackend>,
        width: u16,
        height: u16,
    }

    impl TestOutput {
        fn new(width: u16, height: u16) -> Self {
            Self {
                terminal: Terminal::new(TestBackend::new(width, height)).unwrap(),
                width,
                height,
            }
        }

        fn row(&self, y: u16) -> String {
            let buf = self.terminal.backend().buffer();
            (0..self.width)
                .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
                .collect()
        }
    }

    impl OutputDriver for TestOutput {
        type Backend = TestBackend;

        fn enter(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn exit(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn size(&self) -> io::Result<(u16, u16)> {
            Ok((self.width, self.height))
        }

        fn draw<F>(&mut self, f: F) -> io::Result<()>
        where
            F: FnOnce(UiFrame<'_>),
        {
            self.terminal
                .draw(|frame| f(UiFrame::new(frame)))
                .map(|_| ())
                .map_err(|err| io::Error::other(err.to_string()))
        }
    }

    // `None` is an idle tick; an exhausted script quits.
    struct Script(VecDeque<Option<Event>>);

    impl InputDriver for Script {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            if matches!(self.0.front(), Some(None)) {
                self.0.pop_front();
                return Ok(false);
            }
            Ok(true)
        }

        fn read(&mut self) -> io::Result<Event> {
            Ok(self.0.pop_front().flatten().unwrap_or_else(|| {
                Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL))
            }))
        }
    }

    fn mouse(kind: MouseEventKind, x: u16, y: u16) -> Option<Event> {
        Some(Event::Mouse(MouseEvent {
            kind,
            column: x,
            row: y,
            modifiers: KeyModifiers::NONE,
        }))
    }

    fn click(x: u16, y: u16) -> [Option<Event>; 2] {
        [
            mouse(MouseEventKind::Down(MouseButton::Left), x, y),
            mouse(MouseEventKind::Up(MouseButton::Left), x, y),
        ]
    }

    fn desktop() -> (Desktop, ShellHost) {
        let mut desktop = Desktop::default();
        desktop.add_app("calc", "Calculator", WindowContent::App("calc".into()));
        (desktop, ShellHost::new())
    }

    #[test]
    fn double_click_opens_and_paints_a_window() {
        let (mut desktop, mut host) = desktop();
        let mut output = TestOutput::new(80, 24);
        let mut script = VecDeque::new();
        script.extend(click(2, 1));
        script.extend(click(2, 1));
        script.push_back(None);
        run_desktop(
            &mut output,
            Script(script),
            &mut desktop,
            &mut host,
            &ShellConfig::default(),
        )
        .unwrap();

        assert!(desktop.windows().is_window_open(&"calc".to_string()));
        assert_eq!(host.viewport(), Some(Viewport::new(80, 24, 1)));
        assert!(output.row(4).contains("Calculator"));
        assert!(output.row(23).starts_with(" Calculator"));
    }

    #[test]
    fn drag_through_terminal_events_moves_the_window() {
        let (mut desktop, mut host) = desktop();
        let viewport = Viewport::new(80, 24, 1);
        host.set_viewport(Some(viewport));
        desktop.resize(viewport);
        desktop.open_app(&host, "calc");

        let mut output = TestOutput::new(80, 24);
        let script = VecDeque::from([
            None,
            mouse(MouseEventKind::Down(MouseButton::Left), 30, 4),
            mouse(MouseEventKind::Drag(MouseButton::Left), 25, 6),
            None,
            mouse(MouseEventKind::Drag(MouseButton::Left), 20, 8),
            mouse(MouseEventKind::Up(MouseButton::Left), 20, 8),
        ]);
        run_desktop(
            &mut output,
            Script(script),
            &mut desktop,
            &mut host,
            &ShellConfig::default(),
        )
        .unwrap();

        let window = desktop.windows().get(&"calc".to_string()).unwrap();
        assert_eq!(window.bounds(), Bounds::new(6, 8, 48, 14));
        assert_eq!(host.listeners.active(), 0);
        assert_eq!(host.frames.pending(), 0);
    }

    #[test]
    fn escape_dismisses_the_notice() {
        let (mut desktop, mut host) = desktop();
        let viewport = Viewport::new(80, 24, 1);
        host.set_viewport(Some(viewport));
        desktop.resize(viewport);
        desktop.open_app(&host, "calc");
        desktop.open_app(&host, "calc");
        assert!(desktop.notice().is_some());

        let script = VecDeque::from([Some(Event::Key(KeyEvent::new(
            KeyCode::Esc,
            KeyModifiers::NONE,
        )))]);
        run_desktop(
            &mut TestOutput::new(80, 24),
            Script(script),
            &mut desktop,
            &mut host,
            &ShellConfig::default(),
        )
        .unwrap();
        assert!(desktop.notice().is_none());
    }
}
