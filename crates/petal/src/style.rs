use crate::geometry::{ChildIndex, FanConfig, Point, resting_offset};
use derive_more::Deref;
use thiserror::Error;

pub const MAX_CHILDREN: usize = 8;

pub const CLOSED_ROTATION: f64 = -180.0;
pub const OPEN_ROTATION: f64 = 0.0;
pub const CLOSED_SCALE: f64 = 0.5;
pub const OPEN_SCALE: f64 = 1.0;

/// Number of animated scalar fields in a [`ButtonStyle`].
pub const FIELD_COUNT: usize = 6;

/// Visual state of one button. Rotation is in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ButtonStyle {
    pub width: f64,
    pub height: f64,
    pub top: f64,
    pub left: f64,
    pub rotation: f64,
    pub scale: f64,
}

impl ButtonStyle {
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Radius of the button as drawn, after scaling.
    pub fn visual_radius(&self) -> f64 {
        self.width.min(self.height) / 2.0 * self.scale
    }

    pub fn contains(&self, point: Point) -> bool {
        self.center().distance(point) <= self.visual_radius()
    }

    pub fn with_rotation(self, rotation: f64) -> Self {
        Self { rotation, ..self }
    }

    pub fn to_fields(self) -> [f64; FIELD_COUNT] {
        [
            self.width,
            self.height,
            self.top,
            self.left,
            self.rotation,
            self.scale,
        ]
    }

    pub fn from_fields(fields: [f64; FIELD_COUNT]) -> Self {
        let [width, height, top, left, rotation, scale] = fields;
        Self {
            width,
            height,
            top,
            left,
            rotation,
            scale,
        }
    }
}

/// Per-child styles for one frame, indexed by [`ChildIndex`]. The length is
/// fixed at construction.
#[derive(Debug, Clone, PartialEq, Deref)]
pub struct FrameStyleSet(Vec<ButtonStyle>);

impl FrameStyleSet {
    pub fn new(styles: Vec<ButtonStyle>) -> Self {
        Self(styles)
    }

    pub fn get(&self, index: ChildIndex) -> Option<&ButtonStyle> {
        self.0.get(*index)
    }

    pub fn into_inner(self) -> Vec<ButtonStyle> {
        self.0
    }
}

impl FromIterator<ButtonStyle> for FrameStyleSet {
    fn from_iter<I: IntoIterator<Item = ButtonStyle>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FrameStyleSet {
    type Item = &'a ButtonStyle;
    type IntoIter = std::slice::Iter<'a, ButtonStyle>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("child count must be between 1 and {max}, got {count}")]
    ChildCount { count: usize, max: usize },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("separation angle must be finite and non-negative, got {0}")]
    SeparationAngle(f64),
}

/// Fixed placement of the hub and its children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    fan: FanConfig,
    hub: Point,
    hub_diameter: f64,
}

impl Layout {
    pub fn new(fan: FanConfig, hub: Point, hub_diameter: f64) -> Result<Self, LayoutError> {
        if !(1..=MAX_CHILDREN).contains(&fan.child_count) {
            return Err(LayoutError::ChildCount {
                count: fan.child_count,
                max: MAX_CHILDREN,
            });
        }
        for (field, value) in [
            ("fly_out_radius", fan.fly_out_radius),
            ("child_diameter", fan.child_diameter),
            ("hub_diameter", hub_diameter),
        ] {
            // also rejects NaN
            if !(value > 0.0) {
                return Err(LayoutError::NonPositive { field, value });
            }
        }
        if !fan.separation_angle.is_finite() || fan.separation_angle < 0.0 {
            return Err(LayoutError::SeparationAngle(fan.separation_angle));
        }

        Ok(Self {
            fan,
            hub,
            hub_diameter,
        })
    }

    pub fn fan(&self) -> &FanConfig {
        &self.fan
    }

    pub fn hub(&self) -> Point {
        self.hub
    }

    pub fn child_count(&self) -> usize {
        self.fan.child_count
    }

    pub fn hub_style(&self) -> ButtonStyle {
        let half = self.hub_diameter / 2.0;
        ButtonStyle {
            width: self.hub_diameter,
            height: self.hub_diameter,
            top: self.hub.y - half,
            left: self.hub.x - half,
            rotation: 0.0,
            scale: 1.0,
        }
    }

    /// Collapsed child: centred under the hub, turned back and shrunk.
    pub fn closed_child_style(&self) -> ButtonStyle {
        let d = self.fan.child_diameter;
        ButtonStyle {
            width: d,
            height: d,
            top: self.hub.y - d / 2.0,
            left: self.hub.x - d / 2.0,
            rotation: CLOSED_ROTATION,
            scale: CLOSED_SCALE,
        }
    }

    pub fn open_child_style(&self, index: ChildIndex) -> ButtonStyle {
        let d = self.fan.child_diameter;
        let offset = resting_offset(index, &self.fan);
        ButtonStyle {
            width: d,
            height: d,
            top: self.hub.y - offset.dy,
            left: self.hub.x + offset.dx,
            rotation: OPEN_ROTATION,
            scale: OPEN_SCALE,
        }
    }

    /// Styles every child settles on for the given menu state.
    pub fn final_targets(&self, is_open: bool) -> FrameStyleSet {
        (0..self.child_count())
            .map(|i| {
                if is_open {
                    self.open_child_style(ChildIndex::from(i))
                } else {
                    self.closed_child_style()
                }
            })
            .collect()
    }
}
