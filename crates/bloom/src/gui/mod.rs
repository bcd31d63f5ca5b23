pub mod app;
pub mod dial;
pub mod listener;
pub mod theme;
