//! Geometry, spring physics and staggered choreography for a speed-dial
//! menu. Nothing in here depends on a GUI toolkit.

pub mod geometry;
pub mod icon;
pub mod macros;
pub mod menu;
pub mod spring;
pub mod stagger;
pub mod style;

pub use geometry::{ChildIndex, FanConfig, Offset, Point, resting_offset};
pub use icon::{ChildIcon, IconSet};
pub use menu::{Controller, MenuState, Propagation};
pub use spring::SpringConfig;
pub use style::{ButtonStyle, FrameStyleSet, Layout, LayoutError};
