pub mod model;
pub mod view;

pub use model::{ChildButton, ClickAction, Dial};
pub use view::draw;

pub const ICON_SIZE: i32 = 64;
pub const ICON_FILL: f64 = 0.5; // icon width relative to the child diameter
pub const LABEL_FONT_SIZE: f64 = 10.0;
pub const GLYPH_LENGTH: f64 = 0.32; // cross arm relative to the hub diameter
pub const GLYPH_WIDTH: f64 = 4.0;
