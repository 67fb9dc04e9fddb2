use desk_wm::geometry::{Bounds, Size, Viewport};
use desk_wm::host::ShellHost;
use desk_wm::input::{PointerEvent, PointerTarget};
use desk_wm::layout::ResizeEdge;
use desk_wm::window::{OpenOutcome, WindowPatch, WindowRegistry, WindowSpec};

fn host() -> ShellHost {
    let viewport = Viewport::new(100, 40, 1);
    ShellHost::with_geometry(viewport, viewport.fill_bounds())
}

fn z_of(registry: &WindowRegistry<&'static str>, id: &'static str) -> u64 {
    registry.get(&id).map(|w| w.z_index()).unwrap_or_default()
}

#[test]
fn focusing_raises_with_a_fresh_z_index() {
    let mut registry = WindowRegistry::new();
    for id in ["a", "b", "c"] {
        registry.open_window(WindowSpec::new(id));
    }
    assert_eq!(
        (z_of(&registry, "a"), z_of(&registry, "b"), z_of(&registry, "c")),
        (1, 2, 3)
    );
    assert_eq!(registry.focused().map(|w| *w.id()), Some("c"));

    registry.focus_window(&"a");
    assert_eq!(
        (z_of(&registry, "a"), z_of(&registry, "b"), z_of(&registry, "c")),
        (4, 2, 3)
    );
    let focused: Vec<_> = registry
        .windows()
        .filter(|w| w.is_focused())
        .map(|w| *w.id())
        .collect();
    assert_eq!(focused, vec!["a"]);
}

#[test]
fn opening_twice_keeps_one_window() {
    let mut registry = WindowRegistry::new();
    assert_eq!(
        registry.open_window(WindowSpec::new("calc").title("Calculator")),
        OpenOutcome::Opened
    );
    registry.open_window(WindowSpec::new("notes"));
    assert_eq!(
        registry.open_window(WindowSpec::new("calc").title("Calculator")),
        OpenOutcome::AlreadyOpen
    );
    assert_eq!(registry.len(), 2);
    assert!(registry.get(&"calc").unwrap().is_focused());
    assert!(!registry.get(&"notes").unwrap().is_focused());
}

#[test]
fn unknown_ids_are_ignored() {
    let mut host = host();
    let mut registry: WindowRegistry<&'static str> = WindowRegistry::new();
    registry.focus_window(&"ghost");
    registry.minimize_window(&"ghost");
    registry.update_window(&"ghost", WindowPatch::bounds(Bounds::new(0, 0, 1, 1)));
    assert!(!registry.close_window(&mut host, &"ghost"));
    assert!(registry.is_empty());
}

#[test]
fn minimize_from_maximized_restores_the_normal_bounds() {
    let viewport = Viewport::new(100, 40, 1);
    let mut registry = WindowRegistry::new();
    registry.open_window(WindowSpec::new("w").bounds(Bounds::new(5, 5, 30, 10)));
    registry.toggle_maximize(&"w", viewport);
    assert_eq!(registry.get(&"w").unwrap().bounds(), Bounds::new(0, 0, 100, 39));

    registry.minimize_window(&"w");
    let w = registry.get(&"w").unwrap();
    assert!(w.is_minimized());
    assert!(!w.is_maximized());
    assert_eq!(w.snapshot(), Some(Bounds::new(5, 5, 30, 10)));

    registry.restore_window(&"w");
    let w = registry.get(&"w").unwrap();
    assert!(!w.is_minimized());
    assert_eq!(w.bounds(), Bounds::new(5, 5, 30, 10));
    assert_eq!(w.snapshot(), None);
}

#[test]
fn moves_within_one_frame_coalesce() {
    let mut host = host();
    let mut registry = WindowRegistry::new();
    registry.open_window(WindowSpec::new("w").bounds(Bounds::new(10, 10, 30, 10)));
    let down = PointerEvent::new(20, 10, PointerTarget::Window("w".into()));
    assert!(registry.begin_drag(&mut host, &"w", &down));
    assert!(registry.get(&"w").unwrap().controller().is_dragging());

    registry.pointer_move(&mut host, &PointerEvent::at(21, 11));
    registry.pointer_move(&mut host, &PointerEvent::at(25, 13));
    assert_eq!(registry.get(&"w").unwrap().bounds(), Bounds::new(10, 10, 30, 10));

    let committed: Vec<_> = host
        .frames
        .take_due()
        .into_iter()
        .filter_map(|token| registry.on_frame(token))
        .collect();
    assert_eq!(committed, vec![("w", Bounds::new(15, 13, 30, 10))]);

    assert_eq!(
        registry.pointer_up(&mut host),
        Some(("w", Bounds::new(15, 13, 30, 10)))
    );
    assert_eq!(host.listeners.active(), 0);
}

#[test]
fn drags_stay_inside_the_viewport() {
    let mut host = host();
    let mut registry = WindowRegistry::new();
    registry.open_window(WindowSpec::new("w").bounds(Bounds::new(10, 10, 30, 10)));
    let down = PointerEvent::new(20, 10, PointerTarget::Window("w".into()));
    registry.begin_drag(&mut host, &"w", &down);
    registry.pointer_move(&mut host, &PointerEvent::at(500, -50));
    registry.pointer_up(&mut host);
    assert_eq!(registry.get(&"w").unwrap().bounds(), Bounds::new(70, 0, 30, 10));
}

#[test]
fn resize_stops_at_the_minimum_size() {
    let mut host = host();
    let mut registry = WindowRegistry::with_min_size(Size::new(20, 6));
    registry.open_window(WindowSpec::new("w").bounds(Bounds::new(10, 5, 30, 10)));
    let down = PointerEvent::new(39, 14, PointerTarget::Window("w".into()));
    assert!(registry.begin_resize(&mut host, &"w", &down, ResizeEdge::BottomRight));
    registry.pointer_move(&mut host, &PointerEvent::at(0, 0));
    registry.pointer_up(&mut host);
    assert_eq!(registry.get(&"w").unwrap().bounds(), Bounds::new(10, 5, 20, 6));
}

#[test]
fn closing_mid_drag_releases_listeners_and_frames() {
    let mut host = host();
    let mut registry = WindowRegistry::new();
    registry.open_window(WindowSpec::new("w").bounds(Bounds::new(10, 10, 30, 10)));
    registry.open_window(WindowSpec::new("other"));
    let down = PointerEvent::new(20, 10, PointerTarget::Window("w".into()));
    registry.begin_drag(&mut host, &"w", &down);
    registry.pointer_move(&mut host, &PointerEvent::at(30, 12));
    assert_eq!(host.listeners.active(), 2);
    assert_eq!(host.frames.pending(), 1);

    assert!(registry.close_window(&mut host, &"w"));
    assert_eq!(host.listeners.active(), 0);
    assert!(host.frames.take_due().is_empty());
    assert_eq!(registry.active_gesture(), None);
}
