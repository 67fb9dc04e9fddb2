pub mod config;
pub mod constants;
pub mod desktop;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod geometry;
pub mod host;
pub mod icons;
pub mod input;
pub mod layout;
pub mod runner;
pub mod selection;
pub mod tracing_sub;
pub mod ui;
pub mod view;
pub mod window;
