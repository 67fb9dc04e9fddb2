pub mod floating;
pub mod grid;

pub use floating::{ResizeEdge, apply_resize, apply_resize_clamped, edge_at};
pub use grid::{
    GridDimensions, GridItem, GridPosition, calculate_grid_dimensions, calculate_grid_position,
    find_nearest_empty_position, occupied_positions, resolve_drop,
};
