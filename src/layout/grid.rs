//! Pixel/cell conversions and collision-free placement for the icon grid.
//!
//! Everything here is a pure function; the icon store in `crate::icons`
//! owns the items and the drag session.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::constants::NEIGHBOR_OFFSETS;
use crate::geometry::{Bounds, Point};

/// A cell address on the icon grid (column, row).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset_from(self, origin: GridPosition) -> GridPosition {
        GridPosition::new(self.x - origin.x, self.y - origin.y)
    }

    pub fn translate(self, delta: GridPosition) -> GridPosition {
        GridPosition::new(self.x + delta.x, self.y + delta.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridItem {
    pub id: String,
    pub position: GridPosition,
}

impl GridItem {
    pub fn new(id: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            id: id.into(),
            position: GridPosition::new(x, y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDimensions {
    pub cell_width: i32,
    pub cell_height: i32,
    pub gap: i32,
    pub columns: i32,
    pub rows: i32,
}

impl GridDimensions {
    pub fn contains(&self, position: GridPosition) -> bool {
        position.x >= 0 && position.x < self.columns && position.y >= 0 && position.y < self.rows
    }

    pub fn capacity(&self) -> usize {
        (self.columns.max(0) as usize).saturating_mul(self.rows.max(0) as usize)
    }

    /// Container-relative pixel rectangle of a cell.
    pub fn cell_bounds(&self, position: GridPosition) -> Bounds {
        Bounds::new(
            position.x * (self.cell_width + self.gap),
            position.y * (self.cell_height + self.gap),
            self.cell_width,
            self.cell_height,
        )
    }
}

pub fn calculate_grid_dimensions(
    container_width: i32,
    container_height: i32,
    cell_width: i32,
    cell_height: i32,
    gap: i32,
) -> GridDimensions {
    let fit = |extent: i32, cell: i32| {
        let pitch = cell + gap;
        if pitch <= 0 {
            0
        } else {
            (extent + gap).div_euclid(pitch).max(0)
        }
    };
    GridDimensions {
        cell_width,
        cell_height,
        gap,
        columns: fit(container_width, cell_width),
        rows: fit(container_height, cell_height),
    }
}

/// Cell under a screen-space pointer. Floors toward negative infinity, so a
/// pointer left of the container lands on column -1 rather than 0.
pub fn calculate_grid_position(
    pointer: Point,
    dims: &GridDimensions,
    container_origin: Point,
) -> GridPosition {
    let rel = pointer.offset_from(container_origin);
    let pitch_x = (dims.cell_width + dims.gap).max(1);
    let pitch_y = (dims.cell_height + dims.gap).max(1);
    GridPosition::new(rel.x.div_euclid(pitch_x), rel.y.div_euclid(pitch_y))
}

pub fn occupied_positions<'a, I>(items: I) -> HashSet<GridPosition>
where
    I: IntoIterator<Item = &'a GridItem>,
{
    items.into_iter().map(|item| item.position).collect()
}

/// Breadth-first search for the closest free in-bounds cell.
///
/// Neighbours are expanded in [`NEIGHBOR_OFFSETS`] order and each cell is
/// visited once. The walk is confined to the grid extended just far enough
/// to include `desired`, so a drop past the edge still reaches the grid and
/// a saturated grid terminates. When nothing is free the desired cell is
/// returned unchanged and the caller accepts the overlap.
pub fn find_nearest_empty_position(
    desired: GridPosition,
    occupied: &HashSet<GridPosition>,
    dims: &GridDimensions,
) -> GridPosition {
    if dims.columns <= 0 || dims.rows <= 0 {
        return desired;
    }
    let min_x = desired.x.min(0);
    let max_x = desired.x.max(dims.columns - 1);
    let min_y = desired.y.min(0);
    let max_y = desired.y.max(dims.rows - 1);
    let in_search_area =
        |p: GridPosition| p.x >= min_x && p.x <= max_x && p.y >= min_y && p.y <= max_y;

    let mut visited = HashSet::from([desired]);
    let mut queue = VecDeque::from([desired]);
    while let Some(current) = queue.pop_front() {
        if dims.contains(current) && !occupied.contains(&current) {
            return current;
        }
        for (dx, dy) in NEIGHBOR_OFFSETS {
            let next = GridPosition::new(current.x + dx, current.y + dy);
            if in_search_area(next) && visited.insert(next) {
                queue.push_back(next);
            }
        }
    }
    desired
}

/// Place every dragged item after a multi-item drop.
///
/// The dragged set is the key set of `start_positions`, which records where
/// each member was when the drag began. All members move by the same cell
/// offset: the distance from the grasped item's start cell to
/// `pointer_cell`. Members are resolved in `items` order against the cells
/// held by everything not being dragged, and each resolved cell is claimed
/// before the next member is placed.
pub fn resolve_drop(
    items: &mut [GridItem],
    start_positions: &HashMap<String, GridPosition>,
    grasped_start: GridPosition,
    pointer_cell: GridPosition,
    dims: &GridDimensions,
) {
    let delta = pointer_cell.offset_from(grasped_start);
    let mut occupied = occupied_positions(
        items
            .iter()
            .filter(|item| !start_positions.contains_key(&item.id)),
    );
    for item in items.iter_mut() {
        let Some(start) = start_positions.get(&item.id) else {
            continue;
        };
        let resolved = find_nearest_empty_position(start.translate(delta), &occupied, dims);
        occupied.insert(resolved);
        item.position = resolved;
    }
}
