//! The desktop: one object owning windows, icons and the icon selection,
//! and deciding which of them a pointer gesture belongs to.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use crate::config::ShellConfig;
use crate::constants::{DEFAULT_WINDOW_POSITION, DEFAULT_WINDOW_SIZE, TASKBAR_BUTTON_WIDTH};
use crate::geometry::{Bounds, Point, Viewport};
use crate::host::{FrameToken, GeometryProvider, InteractionHost};
use crate::icons::IconGrid;
use crate::input::{ClickTracker, PointerEvent, PointerTarget};
use crate::layout::floating::{ResizeEdge, edge_at};
use crate::selection::SelectionController;
use crate::window::decorator::{HeaderAction, header_action};
use crate::window::{OpenOutcome, WindowContent, WindowRegistry, WindowSpec};

/// An application reachable from a desktop icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEntry {
    pub title: String,
    pub content: WindowContent,
}

/// What lies under a point, topmost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    TaskbarButton(String),
    Taskbar,
    WindowHeader(String, HeaderAction),
    WindowEdge(String, ResizeEdge),
    WindowBody(String),
    Icon(String),
    Background,
}

impl Hit {
    fn target(&self) -> PointerTarget {
        match self {
            Hit::TaskbarButton(_) | Hit::Taskbar => PointerTarget::Taskbar,
            Hit::WindowHeader(id, _) | Hit::WindowEdge(id, _) | Hit::WindowBody(id) => {
                PointerTarget::Window(id.clone())
            }
            Hit::Icon(id) => PointerTarget::Icon(id.clone()),
            Hit::Background => PointerTarget::Background,
        }
    }
}

// whoever received the last pointer-down and gets the moves until release
#[derive(Debug, Clone, PartialEq, Eq)]
enum Active {
    Window(String),
    Icons,
    Selection,
}

#[derive(Debug)]
pub struct Desktop {
    windows: WindowRegistry<String>,
    icons: IconGrid,
    apps: HashMap<String, AppEntry>,
    selection: SelectionController,
    selected: HashSet<String>,
    clicks: ClickTracker,
    active: Option<Active>,
    notice: Option<String>,
}

impl Default for Desktop {
    fn default() -> Self {
        Self::new(&ShellConfig::default())
    }
}

impl Desktop {
    pub fn new(config: &ShellConfig) -> Self {
        Self {
            windows: WindowRegistry::with_min_size(config.min_window_size),
            icons: IconGrid::new(config.cell_width, config.cell_height, config.gap),
            apps: HashMap::new(),
            selection: SelectionController::new(config.selection_threshold),
            selected: HashSet::new(),
            clicks: ClickTracker::new(config.double_click_delay, config.double_click_distance),
            active: None,
            notice: None,
        }
    }

    pub fn windows(&self) -> &WindowRegistry<String> {
        &self.windows
    }

    pub fn windows_mut(&mut self) -> &mut WindowRegistry<String> {
        &mut self.windows
    }

    pub fn icons(&self) -> &IconGrid {
        &self.icons
    }

    pub fn icons_mut(&mut self) -> &mut IconGrid {
        &mut self.icons
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn selected(&self) -> &HashSet<String> {
        &self.selected
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn app(&self, id: &str) -> Option<&AppEntry> {
        self.apps.get(id)
    }

    /// Latest user-facing message, e.g. that an app is already running.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Register an application and give it an icon.
    pub fn add_app(
        &mut self,
        id: impl Into<String>,
        title: impl Into<String>,
        content: WindowContent,
    ) -> bool {
        let id = id.into();
        if !self.icons.add_icon(id.clone()) {
            return false;
        }
        self.apps.insert(
            id,
            AppEntry {
                title: title.into(),
                content,
            },
        );
        true
    }

    pub fn remove_app<H: InteractionHost + ?Sized>(&mut self, host: &mut H, id: &str) {
        if self.icons.is_dragging() {
            self.icons.teardown(host);
            if self.active == Some(Active::Icons) {
                self.active = None;
            }
        }
        self.icons.remove_icon(id);
        self.apps.remove(id);
        self.selected.remove(id);
        self.close_window(host, id);
    }

    /// The viewport changed size.
    pub fn resize(&mut self, viewport: Viewport) {
        self.windows.reflow(viewport);
        self.icons.set_container(viewport.width, viewport.usable_height());
    }

    /// Open the window for an app, or bring the running one forward.
    pub fn open_app<H: GeometryProvider + ?Sized>(
        &mut self,
        host: &H,
        id: &str,
    ) -> Option<OpenOutcome> {
        let app = self.apps.get(id)?;
        let origin = host
            .viewport()
            .map(|vp| {
                Point::new(
                    ((vp.width - DEFAULT_WINDOW_SIZE.width) / 2).max(0),
                    ((vp.usable_height() - DEFAULT_WINDOW_SIZE.height) / 2).max(0),
                )
            })
            .unwrap_or(DEFAULT_WINDOW_POSITION);
        let spec = WindowSpec::new(id.to_string())
            .title(app.title.clone())
            .content(app.content.clone())
            .bounds(Bounds::from_parts(origin, DEFAULT_WINDOW_SIZE));
        let outcome = self.windows.open_window(spec);
        if outcome == OpenOutcome::AlreadyOpen {
            self.notice = Some(format!("{} is already running", app.title));
        }
        Some(outcome)
    }

    pub fn close_window<H: InteractionHost + ?Sized>(&mut self, host: &mut H, id: &str) {
        if self.active == Some(Active::Window(id.to_string())) {
            self.active = None;
        }
        self.windows.close_window(host, &id.to_string());
    }

    /// Taskbar buttons in open order, on the chrome row.
    pub fn taskbar_buttons(&self, viewport: Viewport) -> Vec<(String, Bounds)> {
        (0..)
            .zip(self.windows.windows())
            .map(|(slot, window)| {
                let bounds = Bounds::new(
                    slot * TASKBAR_BUTTON_WIDTH,
                    viewport.usable_height(),
                    TASKBAR_BUTTON_WIDTH - 1,
                    viewport.chrome_height.max(1),
                );
                (window.id().clone(), bounds)
            })
            .collect()
    }

    pub fn hit_test<H: GeometryProvider + ?Sized>(&self, host: &H, point: Point) -> Hit {
        if let Some(viewport) = host.viewport()
            && point.y >= viewport.usable_height()
        {
            return self
                .taskbar_buttons(viewport)
                .into_iter()
                .find(|(_, bounds)| bounds.contains(point))
                .map(|(id, _)| Hit::TaskbarButton(id))
                .unwrap_or(Hit::Taskbar);
        }
        if let Some(window) = self.windows.topmost_at(point) {
            let id = window.id().clone();
            let bounds = window.bounds();
            let header = header_action(bounds, point);
            if let Some(action) = header.filter(|a| *a != HeaderAction::Drag) {
                return Hit::WindowHeader(id, action);
            }
            if let Some(edge) = edge_at(bounds, point) {
                return Hit::WindowEdge(id, edge);
            }
            return match header {
                Some(action) => Hit::WindowHeader(id, action),
                None => Hit::WindowBody(id),
            };
        }
        if let Some(container) = host.container()
            && let Some(id) = self.icons.icon_at(point.offset_from(container.position()))
        {
            return Hit::Icon(id.to_string());
        }
        Hit::Background
    }

    pub fn pointer_down<H: InteractionHost + ?Sized>(
        &mut self,
        host: &mut H,
        point: Point,
        shift: bool,
        now: Instant,
    ) -> Hit {
        // a release we never saw still ends the previous gesture
        if self.active.is_some() {
            self.pointer_up(host, now);
        }
        let hit = self.hit_test(&*host, point);
        let event = PointerEvent {
            position: point,
            target: hit.target(),
        };
        // a double click needs both presses on the same icon
        if !matches!(hit, Hit::Icon(_)) {
            self.clicks.reset();
        }
        match &hit {
            Hit::TaskbarButton(id) => self.windows.toggle_taskbar(id),
            Hit::Taskbar => {}
            Hit::WindowHeader(id, action) => match action {
                HeaderAction::Minimize => self.windows.minimize_window(id),
                HeaderAction::Maximize => {
                    if let Some(viewport) = host.viewport() {
                        self.windows.focus_window(id);
                        self.windows.toggle_maximize(id, viewport);
                    }
                }
                HeaderAction::Close => self.close_window(host, id),
                HeaderAction::Drag => {
                    self.windows.focus_window(id);
                    if self.windows.begin_drag(host, id, &event) {
                        self.active = Some(Active::Window(id.clone()));
                    }
                }
            },
            Hit::WindowEdge(id, edge) => {
                self.windows.focus_window(id);
                if self.windows.begin_resize(host, id, &event, *edge) {
                    self.active = Some(Active::Window(id.clone()));
                }
            }
            Hit::WindowBody(id) => self.windows.focus_window(id),
            Hit::Icon(id) => {
                if shift {
                    if !self.selected.remove(id) {
                        self.selected.insert(id.clone());
                    }
                } else if !self.selected.contains(id) {
                    self.selected = HashSet::from([id.clone()]);
                }
                if self.clicks.click(id, point, now) {
                    self.open_app(&*host, id);
                } else if self.icons.drag_start(host, id, &self.selected) {
                    self.active = Some(Active::Icons);
                }
            }
            Hit::Background => {
                if self.selection.start_selection(host, &event, now) {
                    self.active = Some(Active::Selection);
                }
            }
        }
        hit
    }

    pub fn pointer_move<H: InteractionHost + ?Sized>(&mut self, host: &mut H, point: Point) {
        let event = PointerEvent::at(point.x, point.y);
        match self.active {
            Some(Active::Window(_)) => self.windows.pointer_move(host, &event),
            Some(Active::Icons) => self.icons.drag_over(host, &event),
            Some(Active::Selection) => {
                self.selection.update_selection(&*host, &event);
                self.refresh_selection_hits();
            }
            None => {}
        }
    }

    fn refresh_selection_hits(&mut self) {
        for item in self.icons.items() {
            self.selection
                .update_hit(&item.id, self.icons.cell_bounds(item.position));
        }
    }

    pub fn pointer_up<H: InteractionHost + ?Sized>(&mut self, host: &mut H, now: Instant) {
        match self.active.take() {
            Some(Active::Window(_)) => {
                self.windows.pointer_up(host);
            }
            Some(Active::Icons) => {
                self.icons.drag_end(host);
            }
            Some(Active::Selection) => match self.selection.end_selection(host, now) {
                Some(ids) => self.selected = ids.into_iter().collect(),
                // a plain click on the background clears the selection
                None => self.selected.clear(),
            },
            None => {}
        }
    }

    /// Deliver a fired frame. Returns `true` when something visible moved.
    pub fn on_frame(&mut self, token: FrameToken) -> bool {
        let window_moved = self.windows.on_frame(token).is_some();
        let icons_moved = self.icons.on_frame(token);
        window_moved || icons_moved
    }

    pub fn is_interacting(&self) -> bool {
        self.active.is_some()
    }

    /// Release every gesture without committing it.
    pub fn teardown<H: InteractionHost + ?Sized>(&mut self, host: &mut H) {
        self.windows.teardown_gestures(host);
        self.icons.teardown(host);
        self.selection.teardown(host);
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::host::ShellHost;

    fn setup() -> (ShellHost, Desktop) {
        let viewport = Viewport::new(80, 24, 1);
        let host = ShellHost::with_geometry(viewport, viewport.fill_bounds());
        let mut desktop = Desktop::default();
        desktop.resize(viewport);
        desktop.add_app("calc", "Calculator", WindowContent::App("calc".into()));
        desktop.add_app("notes", "Notes", WindowContent::Text("hello".into()));
        (host, desktop)
    }

    #[test]
    fn hit_test_layers() {
        let (host, mut desktop) = setup();
        desktop.open_app(&host, "calc");
        let w = desktop.windows().get(&"calc".to_string()).unwrap().bounds();
        assert_eq!(w, Bounds::new(16, 4, 48, 14));
        assert_eq!(desktop.hit_test(&host, Point::new(1, 1)), Hit::Icon("calc".into()));
        assert_eq!(desktop.hit_test(&host, Point::new(1, 12)), Hit::Background);
        assert_eq!(
            desktop.hit_test(&host, Point::new(30, 4)),
            Hit::WindowHeader("calc".into(), HeaderAction::Drag)
        );
        assert_eq!(
            desktop.hit_test(&host, Point::new(61, 4)),
            Hit::WindowHeader("calc".into(), HeaderAction::Close)
        );
        assert_eq!(
            desktop.hit_test(&host, Point::new(63, 17)),
            Hit::WindowEdge("calc".into(), ResizeEdge::BottomRight)
        );
        assert_eq!(
            desktop.hit_test(&host, Point::new(30, 10)),
            Hit::WindowBody("calc".into())
        );
        assert_eq!(
            desktop.hit_test(&host, Point::new(3, 23)),
            Hit::TaskbarButton("calc".into())
        );
        assert_eq!(desktop.hit_test(&host, Point::new(70, 23)), Hit::Taskbar);
    }

    #[test]
    fn double_click_on_icon_opens_once() {
        let (mut host, mut desktop) = setup();
        let t0 = Instant::now();
        desktop.pointer_down(&mut host, Point::new(2, 1), false, t0);
        desktop.pointer_up(&mut host, t0);
        desktop.pointer_down(&mut host, Point::new(2, 1), false, t0 + Duration::from_millis(100));
        desktop.pointer_up(&mut host, t0 + Duration::from_millis(100));
        assert!(desktop.windows().is_window_open(&"calc".to_string()));
        assert!(desktop.notice().is_none());

        let t1 = t0 + Duration::from_secs(2);
        desktop.pointer_down(&mut host, Point::new(2, 1), false, t1);
        desktop.pointer_up(&mut host, t1);
        desktop.pointer_down(&mut host, Point::new(2, 1), false, t1 + Duration::from_millis(50));
        desktop.pointer_up(&mut host, t1 + Duration::from_millis(50));
        assert_eq!(desktop.windows().len(), 1);
        assert_eq!(desktop.notice(), Some("Calculator is already running"));
        assert_eq!(host.listeners.active(), 0);
    }

    #[test]
    fn quick_clicks_on_neighbouring_icons_open_nothing() {
        let (mut host, mut desktop) = setup();
        desktop.add_app("clock", "Clock", WindowContent::App("clock".into()));
        // calc at (0,0), notes at (0,1), clock at (1,0)
        let t0 = Instant::now();
        assert_eq!(
            desktop.pointer_down(&mut host, Point::new(9, 1), false, t0),
            Hit::Icon("calc".into())
        );
        desktop.pointer_up(&mut host, t0);
        let t1 = t0 + Duration::from_millis(100);
        assert_eq!(
            desktop.pointer_down(&mut host, Point::new(11, 1), false, t1),
            Hit::Icon("clock".into())
        );
        desktop.pointer_up(&mut host, t1);
        assert!(desktop.windows().is_empty());
    }

    #[test]
    fn a_press_elsewhere_breaks_a_double_click() {
        let (mut host, mut desktop) = setup();
        let t0 = Instant::now();
        desktop.pointer_down(&mut host, Point::new(2, 1), false, t0);
        desktop.pointer_up(&mut host, t0);
        // taskbar press in between
        desktop.pointer_down(&mut host, Point::new(70, 23), false, t0 + Duration::from_millis(50));
        desktop.pointer_up(&mut host, t0 + Duration::from_millis(50));
        desktop.pointer_down(&mut host, Point::new(2, 1), false, t0 + Duration::from_millis(100));
        desktop.pointer_up(&mut host, t0 + Duration::from_millis(100));
        assert!(desktop.windows().is_empty());
    }

    #[test]
    fn header_drag_moves_window_at_frame_boundary() {
        let (mut host, mut desktop) = setup();
        desktop.open_app(&host, "notes");
        let now = Instant::now();
        desktop.pointer_down(&mut host, Point::new(30, 4), false, now);
        assert!(desktop.is_interacting());
        desktop.pointer_move(&mut host, Point::new(25, 6));
        desktop.pointer_move(&mut host, Point::new(20, 8));
        let moved: Vec<bool> = host
            .frames
            .take_due()
            .into_iter()
            .map(|t| desktop.on_frame(t))
            .collect();
        assert_eq!(moved, vec![true]);
        desktop.pointer_up(&mut host, now);
        let w = desktop.windows().get(&"notes".to_string()).unwrap();
        assert_eq!(w.bounds(), Bounds::new(6, 8, 48, 14));
        assert_eq!(host.listeners.active(), 0);
    }

    #[test]
    fn header_buttons_minimize_maximize_close() {
        let (mut host, mut desktop) = setup();
        desktop.open_app(&host, "notes");
        let id = "notes".to_string();
        let now = Instant::now();
        // maximize, then the button sits at the right of the full-width header
        desktop.pointer_down(&mut host, Point::new(58, 4), false, now);
        assert!(desktop.windows().get(&id).unwrap().is_maximized());
        desktop.pointer_down(&mut host, Point::new(73, 0), false, now);
        assert!(!desktop.windows().get(&id).unwrap().is_maximized());
        desktop.pointer_down(&mut host, Point::new(55, 4), false, now);
        assert!(desktop.windows().get(&id).unwrap().is_minimized());
        desktop.pointer_down(&mut host, Point::new(3, 23), false, now);
        assert!(!desktop.windows().get(&id).unwrap().is_minimized());
        desktop.pointer_down(&mut host, Point::new(61, 4), false, now);
        assert!(!desktop.windows().is_window_open(&id));
    }

    #[test]
    fn marquee_selects_icons_and_short_click_clears() {
        let (mut host, mut desktop) = setup();
        let t0 = Instant::now();
        desktop.pointer_down(&mut host, Point::new(30, 10), false, t0);
        desktop.pointer_move(&mut host, Point::new(5, 5));
        desktop.pointer_up(&mut host, t0 + Duration::from_millis(400));
        // calc at (0,0) lies outside, notes at (0,1) spans rows 4..7
        assert_eq!(desktop.selected(), &HashSet::from(["notes".to_string()]));

        desktop.pointer_down(&mut host, Point::new(30, 10), false, t0 + Duration::from_secs(1));
        desktop.pointer_up(&mut host, t0 + Duration::from_secs(1));
        assert!(desktop.selected().is_empty());
    }

    #[test]
    fn shift_click_extends_selection_and_drag_carries_it() {
        let (mut host, mut desktop) = setup();
        let t0 = Instant::now();
        desktop.pointer_down(&mut host, Point::new(2, 1), false, t0);
        desktop.pointer_up(&mut host, t0);
        let t1 = t0 + Duration::from_secs(1);
        desktop.pointer_down(&mut host, Point::new(2, 5), true, t1);
        desktop.pointer_up(&mut host, t1);
        assert_eq!(desktop.selected().len(), 2);

        let t2 = t1 + Duration::from_secs(1);
        desktop.pointer_down(&mut host, Point::new(2, 1), false, t2);
        // three columns right
        desktop.pointer_move(&mut host, Point::new(35, 1));
        desktop.pointer_up(&mut host, t2);
        let cell = |id: &str| desktop.icons().get(id).map(|i| i.position);
        assert_eq!(cell("calc"), Some(crate::layout::GridPosition::new(3, 0)));
        assert_eq!(cell("notes"), Some(crate::layout::GridPosition::new(3, 1)));
        assert_eq!(host.frames.pending(), 0);
    }

    #[test]
    fn teardown_releases_everything() {
        let (mut host, mut desktop) = setup();
        desktop.pointer_down(&mut host, Point::new(30, 10), false, Instant::now());
        desktop.pointer_move(&mut host, Point::new(40, 12));
        desktop.teardown(&mut host);
        assert_eq!(host.listeners.active(), 0);
        assert!(!desktop.selection().is_selecting());
    }
}
