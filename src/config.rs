use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    CHROME_HEIGHT, DOUBLE_CLICK_MAX_DELAY, DOUBLE_CLICK_MAX_DISTANCE, FRAME_INTERVAL,
    ICON_CELL_HEIGHT, ICON_CELL_WIDTH, ICON_GAP, MIN_WINDOW_SIZE, SELECTION_MIN_DURATION,
};
use crate::error::ShellError;
use crate::geometry::Size;

/// Tunables for one desktop session.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellConfig {
    pub cell_width: i32,
    pub cell_height: i32,
    pub gap: i32,
    pub chrome_height: i32,
    pub min_window_size: Size,
    pub frame_interval: Duration,
    pub selection_threshold: Duration,
    pub double_click_delay: Duration,
    pub double_click_distance: f64,
    pub log_file: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            cell_width: ICON_CELL_WIDTH,
            cell_height: ICON_CELL_HEIGHT,
            gap: ICON_GAP,
            chrome_height: CHROME_HEIGHT,
            min_window_size: MIN_WINDOW_SIZE,
            frame_interval: FRAME_INTERVAL,
            selection_threshold: SELECTION_MIN_DURATION,
            double_click_delay: DOUBLE_CLICK_MAX_DELAY,
            double_click_distance: DOUBLE_CLICK_MAX_DISTANCE,
            log_file: None,
        }
    }
}

impl ShellConfig {
    /// Frame interval for a target frame rate.
    pub fn with_fps(mut self, fps: f64) -> Result<Self, ShellError> {
        if !(1.0..=240.0).contains(&fps) {
            return Err(ShellError::InvalidConfig(
                "fps must be between 1 and 240".to_string(),
            ));
        }
        self.frame_interval = Duration::from_secs_f64(1.0 / fps);
        Ok(self)
    }

    pub fn validate(self) -> Result<Self, ShellError> {
        if self.cell_width <= 0 || self.cell_height <= 0 {
            return Err(ShellError::InvalidConfig(
                "icon cells need a positive width and height".to_string(),
            ));
        }
        if self.gap < 0 {
            return Err(ShellError::InvalidConfig(
                "icon gap cannot be negative".to_string(),
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_come_from_constants() {
        let cfg = ShellConfig::default();
        assert_eq!(cfg.cell_width, ICON_CELL_WIDTH);
        assert_eq!(cfg.selection_threshold, Duration::from_millis(150));
        assert!(cfg.log_file.is_none());
    }

    #[test]
    fn fps_maps_to_frame_interval() {
        let cfg = ShellConfig::default().with_fps(50.0).unwrap();
        assert_eq!(cfg.frame_interval.as_micros(), 20_000);
        assert!(ShellConfig::default().with_fps(0.0).is_err());
    }

    #[test]
    fn rejects_degenerate_cells() {
        let cfg = ShellConfig {
            cell_width: 0,
            ..ShellConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ShellError::InvalidConfig(_))));
        let cfg = ShellConfig {
            gap: -1,
            ..ShellConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
