//! Rubber-band selection over the icon plane.
//!
//! Coordinates inside the controller are relative to the icon container,
//! so hit tests take container-relative rectangles as produced by
//! [`crate::icons::IconGrid::icon_bounds`].

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use crate::constants::SELECTION_MIN_DURATION;
use crate::geometry::{Bounds, Point};
use crate::host::{GeometryProvider, GestureListeners, InteractionHost};
use crate::input::{PointerEvent, PointerTarget};

/// Corners of the marquee, container-relative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionBox {
    pub start: Point,
    pub current: Point,
}

impl SelectionBox {
    pub fn rect(&self) -> Bounds {
        Bounds::spanning(self.start, self.current)
    }
}

#[derive(Debug)]
struct Session {
    marquee: SelectionBox,
    started_at: Instant,
    listeners: GestureListeners,
}

#[derive(Debug)]
pub struct SelectionController {
    min_duration: Duration,
    session: Option<Session>,
    // ids currently under the marquee
    hits: BTreeSet<String>,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(SELECTION_MIN_DURATION)
    }
}

impl SelectionController {
    /// `min_duration` is how long a gesture must last before it counts as a
    /// selection rather than a click.
    pub fn new(min_duration: Duration) -> Self {
        Self {
            min_duration,
            session: None,
            hits: BTreeSet::new(),
        }
    }

    pub fn is_selecting(&self) -> bool {
        self.session.is_some()
    }

    pub fn selection_box(&self) -> Option<SelectionBox> {
        self.session.as_ref().map(|s| s.marquee)
    }

    pub fn selection_rect(&self) -> Option<Bounds> {
        self.selection_box().map(|m| m.rect())
    }

    pub fn hits(&self) -> impl Iterator<Item = &str> {
        self.hits.iter().map(String::as_str)
    }

    fn relative<H: GeometryProvider + ?Sized>(host: &H, position: Point) -> Option<Point> {
        host.container().map(|c| position.offset_from(c.position()))
    }

    /// Begin a marquee. Only presses on the bare background qualify.
    pub fn start_selection<H: InteractionHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &PointerEvent,
        now: Instant,
    ) -> bool {
        if event.target != PointerTarget::Background {
            return false;
        }
        let Some(start) = Self::relative(host, event.position) else {
            return false;
        };
        self.teardown(host);
        self.hits.clear();
        tracing::debug!(?start, "selection start");
        self.session = Some(Session {
            marquee: SelectionBox {
                start,
                current: start,
            },
            started_at: now,
            listeners: GestureListeners::attach(host),
        });
        true
    }

    pub fn update_selection<H: GeometryProvider + ?Sized>(&mut self, host: &H, event: &PointerEvent) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Some(current) = Self::relative(host, event.position) {
            session.marquee.current = current;
        }
    }

    /// Whether `icon_rect` touches the marquee at all.
    pub fn is_intersecting(&self, icon_rect: Bounds) -> bool {
        self.selection_rect()
            .is_some_and(|marquee| marquee.overlaps(&icon_rect))
    }

    /// Re-test one icon against the current marquee.
    pub fn update_hit(&mut self, id: &str, icon_rect: Bounds) {
        if self.session.is_none() {
            return;
        }
        if self.is_intersecting(icon_rect) {
            if !self.hits.contains(id) {
                self.hits.insert(id.to_string());
            }
        } else {
            self.hits.remove(id);
        }
    }

    /// Finish the gesture. Returns the selected ids when it lasted long
    /// enough to count, `None` for a click or when nothing was running.
    pub fn end_selection<H: InteractionHost + ?Sized>(
        &mut self,
        host: &mut H,
        now: Instant,
    ) -> Option<Vec<String>> {
        let session = self.session.take()?;
        session.listeners.detach(host);
        let elapsed = now.saturating_duration_since(session.started_at);
        if elapsed < self.min_duration {
            tracing::debug!(?elapsed, "selection too short, treated as click");
            return None;
        }
        let ids: Vec<String> = self.hits.iter().cloned().collect();
        tracing::debug!(count = ids.len(), "selection committed");
        Some(ids)
    }

    /// Drop the gesture without committing.
    pub fn teardown<H: InteractionHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(session) = self.session.take() {
            session.listeners.detach(host);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Viewport;
    use crate::host::ShellHost;

    fn host_at(origin: Point) -> ShellHost {
        ShellHost::with_geometry(
            Viewport::new(400, 300, 20),
            Bounds::from_parts(origin, crate::geometry::Size::new(400, 280)),
        )
    }

    fn icons() -> Vec<(&'static str, Bounds)> {
        vec![
            ("inside", Bounds::new(40, 40, 20, 20)),
            ("touching", Bounds::new(0, 0, 10, 10)),
            ("outside", Bounds::new(200, 200, 10, 10)),
        ]
    }

    fn sweep(ctl: &mut SelectionController) {
        for (id, rect) in icons() {
            ctl.update_hit(id, rect);
        }
    }

    #[test]
    fn short_marquee_is_a_click() {
        let mut host = host_at(Point::new(0, 0));
        let mut ctl = SelectionController::default();
        let t0 = Instant::now();
        assert!(ctl.start_selection(&mut host, &PointerEvent::at(10, 10), t0));
        ctl.update_selection(&host, &PointerEvent::at(100, 100));
        sweep(&mut ctl);
        assert_eq!(ctl.hits().collect::<Vec<_>>(), vec!["inside", "touching"]);
        let result = ctl.end_selection(&mut host, t0 + Duration::from_millis(50));
        assert_eq!(result, None);
        assert!(!ctl.is_selecting());
        assert_eq!(host.listeners.active(), 0);
    }

    #[test]
    fn long_marquee_commits_overlapping_icons() {
        let mut host = host_at(Point::new(0, 0));
        let mut ctl = SelectionController::default();
        let t0 = Instant::now();
        ctl.start_selection(&mut host, &PointerEvent::at(10, 10), t0);
        ctl.update_selection(&host, &PointerEvent::at(100, 100));
        sweep(&mut ctl);
        let result = ctl.end_selection(&mut host, t0 + Duration::from_millis(150));
        assert_eq!(
            result,
            Some(vec!["inside".to_string(), "touching".to_string()])
        );
    }

    #[test]
    fn shrinking_the_marquee_drops_hits() {
        let mut host = host_at(Point::new(0, 0));
        let mut ctl = SelectionController::default();
        ctl.start_selection(&mut host, &PointerEvent::at(10, 10), Instant::now());
        ctl.update_selection(&host, &PointerEvent::at(100, 100));
        sweep(&mut ctl);
        // dragging back up-left past the start flips the corners
        ctl.update_selection(&host, &PointerEvent::at(5, 5));
        sweep(&mut ctl);
        assert_eq!(ctl.selection_rect(), Some(Bounds::new(5, 5, 5, 5)));
        assert_eq!(ctl.hits().collect::<Vec<_>>(), vec!["touching"]);
    }

    #[test]
    fn coordinates_are_container_relative() {
        let mut host = host_at(Point::new(30, 20));
        let mut ctl = SelectionController::default();
        ctl.start_selection(&mut host, &PointerEvent::at(40, 30), Instant::now());
        ctl.update_selection(&host, &PointerEvent::at(80, 70));
        assert_eq!(ctl.selection_rect(), Some(Bounds::new(10, 10, 40, 40)));
    }

    #[test]
    fn presses_on_icons_or_without_container_do_nothing() {
        let mut host = host_at(Point::new(0, 0));
        let mut ctl = SelectionController::default();
        let on_icon = PointerEvent::new(5, 5, PointerTarget::Icon("a".into()));
        assert!(!ctl.start_selection(&mut host, &on_icon, Instant::now()));
        let mut unmounted = ShellHost::new();
        assert!(!ctl.start_selection(&mut unmounted, &PointerEvent::at(5, 5), Instant::now()));
        assert!(!ctl.is_selecting());
        assert!(!ctl.is_intersecting(Bounds::new(0, 0, 100, 100)));
    }

    #[test]
    fn restarting_clears_previous_hits_and_listeners() {
        let mut host = host_at(Point::new(0, 0));
        let mut ctl = SelectionController::default();
        ctl.start_selection(&mut host, &PointerEvent::at(10, 10), Instant::now());
        ctl.update_selection(&host, &PointerEvent::at(100, 100));
        sweep(&mut ctl);
        ctl.start_selection(&mut host, &PointerEvent::at(300, 300), Instant::now());
        assert_eq!(ctl.hits().count(), 0);
        assert_eq!(host.listeners.active(), 2);
        ctl.teardown(&mut host);
        assert_eq!(host.listeners.active(), 0);
    }
}
