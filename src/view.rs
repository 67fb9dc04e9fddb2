//! Paints a [`Desktop`] into a terminal frame, one cell per desktop pixel.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::desktop::Desktop;
use crate::geometry::{Bounds, Point, Viewport};
use crate::host::GeometryProvider;
use crate::ui::{UiFrame, truncate_to_width};
use crate::window::WindowContent;
use crate::window::decorator::WindowDecorator;

pub fn render_desktop<H: GeometryProvider + ?Sized>(
    ui: &mut UiFrame<'_>,
    desktop: &Desktop,
    host: &H,
    decorator: &dyn WindowDecorator,
) {
    let origin = host
        .container()
        .map(|c| c.position())
        .unwrap_or_default();
    render_icons(ui, desktop, origin);
    render_marquee(ui, desktop, origin);
    render_windows(ui, desktop, decorator);
    if let Some(viewport) = host.viewport() {
        render_taskbar(ui, desktop, viewport);
    }
}

fn render_icons(ui: &mut UiFrame<'_>, desktop: &Desktop, origin: Point) {
    let icons = desktop.icons();
    let dragged = icons.dragged_ids();
    for item in icons.items() {
        let cell = icons.cell_bounds(item.position);
        let bounds = cell.with_position(cell.position().translate(origin));
        let mut style = Style::default().fg(Color::White);
        if desktop.is_selected(&item.id) {
            style = style.bg(Color::Blue);
        }
        if dragged.contains(item.id.as_str()) {
            style = style.add_modifier(Modifier::DIM);
        }
        ui.fill(bounds, " ", style);
        let label = desktop
            .app(&item.id)
            .map(|app| app.title.as_str())
            .unwrap_or(item.id.as_str());
        let glyph_x = bounds.x + (bounds.width - 1) / 2;
        ui.put(glyph_x, bounds.y, "▣", style);
        let width = bounds.width.max(0) as usize;
        let label = truncate_to_width(label, width);
        let pad = (bounds.width - label.chars().count() as i32) / 2;
        ui.put_str(bounds.x + pad, bounds.y + 1, &label, style);
    }
}

fn render_marquee(ui: &mut UiFrame<'_>, desktop: &Desktop, origin: Point) {
    let Some(rect) = desktop.selection().selection_rect() else {
        return;
    };
    // the marquee covers its right and bottom edges too
    let screen = Bounds::new(
        rect.x + origin.x,
        rect.y + origin.y,
        rect.width + 1,
        rect.height + 1,
    );
    if let Some(area) = ui.clip_bounds(screen) {
        ui.render_widget(
            Block::bordered().border_style(Style::default().fg(Color::Cyan)),
            area,
        );
    }
}

fn render_windows(ui: &mut UiFrame<'_>, desktop: &Desktop, decorator: &dyn WindowDecorator) {
    for window in desktop.windows().stack() {
        if window.is_minimized() {
            continue;
        }
        let bounds = window.bounds();
        decorator.render_window(ui, bounds, window.title(), window.is_focused());
        let inner = Bounds::new(bounds.x + 1, bounds.y + 1, bounds.width - 2, bounds.height - 2);
        let Some(area) = ui.clip_bounds(inner) else {
            continue;
        };
        let body = match window.content() {
            WindowContent::Empty => continue,
            WindowContent::App(key) => format!("[{key}]"),
            WindowContent::Text(text) => text.clone(),
        };
        ui.render_widget(Paragraph::new(body).wrap(Wrap { trim: false }), area);
    }
}

fn render_taskbar(ui: &mut UiFrame<'_>, desktop: &Desktop, viewport: Viewport) {
    let bar_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let bar = Bounds::new(
        0,
        viewport.usable_height(),
        viewport.width,
        viewport.chrome_height,
    );
    ui.fill(bar, " ", bar_style);
    for (id, button) in desktop.taskbar_buttons(viewport) {
        let Some(window) = desktop.windows().get(&id) else {
            continue;
        };
        let style = if window.is_minimized() {
            bar_style.add_modifier(Modifier::DIM)
        } else if window.is_focused() {
            bar_style.bg(Color::Blue).add_modifier(Modifier::BOLD)
        } else {
            bar_style
        };
        ui.fill(button, " ", style);
        let title = truncate_to_width(window.title(), (button.width - 1).max(0) as usize);
        ui.put_str(button.x + 1, button.y, &title, style);
    }
    if let Some(notice) = desktop.notice() {
        let len = notice.chars().count() as i32;
        ui.put_str(viewport.width - len - 1, bar.y, notice, bar_style);
    }
}
