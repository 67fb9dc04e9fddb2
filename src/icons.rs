//! Desktop icon store: where every icon sits and the drag that moves them.

use std::collections::{HashMap, HashSet};

use crate::geometry::{Bounds, Point};
use crate::host::{FrameToken, GestureListeners, InteractionHost};
use crate::input::PointerEvent;
use crate::layout::grid::{
    GridDimensions, GridItem, GridPosition, calculate_grid_dimensions, calculate_grid_position,
    find_nearest_empty_position, occupied_positions, resolve_drop,
};

#[derive(Debug)]
struct DragSession {
    grasped_start: GridPosition,
    // every dragged id mapped to the cell it started in
    start_positions: HashMap<String, GridPosition>,
    pointer_cell: GridPosition,
    listeners: GestureListeners,
}

#[derive(Debug)]
pub struct IconGrid {
    items: Vec<GridItem>,
    cell_width: i32,
    cell_height: i32,
    gap: i32,
    dims: Option<GridDimensions>,
    session: Option<DragSession>,
    frame: Option<FrameToken>,
}

impl IconGrid {
    pub fn new(cell_width: i32, cell_height: i32, gap: i32) -> Self {
        Self {
            items: Vec::new(),
            cell_width,
            cell_height,
            gap,
            dims: None,
            session: None,
            frame: None,
        }
    }

    pub fn items(&self) -> &[GridItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&GridItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Grid size for the last measured container, if any.
    pub fn dimensions(&self) -> Option<GridDimensions> {
        self.dims
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn dragged_ids(&self) -> HashSet<&str> {
        self.session
            .iter()
            .flat_map(|s| s.start_positions.keys())
            .map(String::as_str)
            .collect()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.frame.is_some()
    }

    /// Re-measure after the container changed size.
    pub fn set_container(&mut self, width: i32, height: i32) {
        let dims =
            calculate_grid_dimensions(width, height, self.cell_width, self.cell_height, self.gap);
        tracing::debug!(columns = dims.columns, rows = dims.rows, "icon grid measured");
        self.dims = Some(dims);
    }

    // before the first measurement icons stack in a single column
    fn placement_dims(&self) -> GridDimensions {
        self.dims.unwrap_or(GridDimensions {
            cell_width: self.cell_width,
            cell_height: self.cell_height,
            gap: self.gap,
            columns: 1,
            rows: self.items.len() as i32 + 1,
        })
    }

    /// Place a new icon on the first free cell. Returns `false` for a
    /// duplicate id.
    pub fn add_icon(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.get(&id).is_some() {
            return false;
        }
        let dims = self.placement_dims();
        let occupied = occupied_positions(&self.items);
        let position = find_nearest_empty_position(GridPosition::default(), &occupied, &dims);
        tracing::debug!(icon = %id, ?position, "icon added");
        self.items.push(GridItem { id, position });
        true
    }

    pub fn remove_icon(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        before != self.items.len()
    }

    /// Rename in place; refused when `new` is already taken. A running drag
    /// keeps carrying the icon under its new id.
    pub fn rename_icon(&mut self, old: &str, new: impl Into<String>) -> bool {
        let new = new.into();
        if self.get(&new).is_some() {
            return false;
        }
        let Some(item) = self.items.iter_mut().find(|item| item.id == old) else {
            return false;
        };
        item.id = new.clone();
        if let Some(session) = self.session.as_mut()
            && let Some(start) = session.start_positions.remove(old)
        {
            session.start_positions.insert(new, start);
        }
        true
    }

    /// Apply saved positions. Unknown ids are skipped; collisions are
    /// settled in insertion order.
    pub fn restore(&mut self, saved: &[GridItem]) {
        for item in &mut self.items {
            if let Some(entry) = saved.iter().find(|s| s.id == item.id) {
                item.position = entry.position;
            }
        }
        let dims = self.placement_dims();
        let mut occupied = HashSet::new();
        for item in &mut self.items {
            item.position = find_nearest_empty_position(item.position, &occupied, &dims);
            occupied.insert(item.position);
        }
    }

    /// Container-relative rectangle of a cell.
    pub fn cell_bounds(&self, position: GridPosition) -> Bounds {
        self.placement_dims().cell_bounds(position)
    }

    pub fn icon_bounds(&self, id: &str) -> Option<Bounds> {
        self.get(id).map(|item| self.cell_bounds(item.position))
    }

    /// Icon drawn at a container-relative point, later items on top.
    pub fn icon_at(&self, point: Point) -> Option<&str> {
        self.items
            .iter()
            .rev()
            .find(|item| self.cell_bounds(item.position).contains(point))
            .map(|item| item.id.as_str())
    }

    /// Begin dragging `grasped`, carrying the whole selection along when
    /// the grasped icon is part of it.
    pub fn drag_start<H: InteractionHost + ?Sized>(
        &mut self,
        host: &mut H,
        grasped: &str,
        selection: &HashSet<String>,
    ) -> bool {
        if self.get(grasped).is_none() {
            return false;
        }
        // an unfinished drag is abandoned, not dropped
        self.teardown(host);
        let Some(grasped_start) = self.get(grasped).map(|item| item.position) else {
            return false;
        };
        let carry_selection = selection.contains(grasped);
        let start_positions: HashMap<String, GridPosition> = self
            .items
            .iter()
            .filter(|item| {
                if carry_selection {
                    selection.contains(&item.id)
                } else {
                    item.id == grasped
                }
            })
            .map(|item| (item.id.clone(), item.position))
            .collect();
        tracing::debug!(icon = grasped, count = start_positions.len(), "icon drag start");
        self.session = Some(DragSession {
            grasped_start,
            start_positions,
            pointer_cell: grasped_start,
            listeners: GestureListeners::attach(host),
        });
        true
    }

    /// Track the cell under the pointer and ask for a preview frame.
    pub fn drag_over<H: InteractionHost + ?Sized>(&mut self, host: &mut H, event: &PointerEvent) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let (Some(dims), Some(container)) = (self.dims, host.container()) else {
            return;
        };
        session.pointer_cell = calculate_grid_position(event.position, &dims, container.position());
        if self.frame.is_none() {
            self.frame = Some(host.request_frame());
        }
    }

    /// Move dragged icons to their unresolved preview cells.
    pub fn on_frame(&mut self, token: FrameToken) -> bool {
        if self.frame != Some(token) {
            return false;
        }
        self.frame = None;
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        let delta = session.pointer_cell.offset_from(session.grasped_start);
        for item in &mut self.items {
            if let Some(start) = session.start_positions.get(&item.id) {
                item.position = start.translate(delta);
            }
        }
        true
    }

    /// Drop: settle every dragged icon on a free cell and return the
    /// resulting layout.
    pub fn drag_end<H: InteractionHost + ?Sized>(&mut self, host: &mut H) -> Option<&[GridItem]> {
        let session = self.session.as_ref()?;
        let dims = self.placement_dims();
        resolve_drop(
            &mut self.items,
            &session.start_positions,
            session.grasped_start,
            session.pointer_cell,
            &dims,
        );
        tracing::debug!(
            count = session.start_positions.len(),
            cell = ?session.pointer_cell,
            "icon drop resolved"
        );
        self.end_session(host);
        Some(&self.items)
    }

    /// Abandon a drag without resolving it.
    pub fn teardown<H: InteractionHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(session) = self.session.as_ref() {
            for item in &mut self.items {
                if let Some(start) = session.start_positions.get(&item.id) {
                    item.position = *start;
                }
            }
        }
        self.end_session(host);
    }

    fn end_session<H: InteractionHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(token) = self.frame.take() {
            host.cancel_frame(token);
        }
        if let Some(session) = self.session.take() {
            session.listeners.detach(host);
        }
    }
}
