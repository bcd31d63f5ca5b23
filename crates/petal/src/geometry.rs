use derive_more::{Deref, Display, From, Into};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Position of a child in the fan-out ordering. Index 0 moves first when opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Deref, From, Into)]
pub struct ChildIndex(usize);

/// Offset of a child's top-left corner from the hub centre, in screen space
/// with `dy` pointing up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

/// Arc parameters shared by every child of one dial. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FanConfig {
    pub child_count: usize,
    pub fly_out_radius: f64,
    pub separation_angle: f64,
    pub child_diameter: f64,
}

impl FanConfig {
    /// Total angular span of the arc. Zero for a single child.
    pub fn fan_angle(&self) -> f64 {
        self.child_count.saturating_sub(1) as f64 * self.separation_angle
    }

    /// Angle of child 0, chosen so the arc is symmetric about 90 degrees.
    pub fn base_angle(&self) -> f64 {
        (180.0 - self.fan_angle()) / 2.0
    }

    pub fn angle(&self, index: ChildIndex) -> f64 {
        self.base_angle() + *index as f64 * self.separation_angle
    }
}

/// Resting offset of a child on the arc. The half-diameter correction makes
/// the child's centre, not its top-left corner, land on the circle.
pub fn resting_offset(index: ChildIndex, config: &FanConfig) -> Offset {
    let angle = config.angle(index).to_radians();
    let half = config.child_diameter / 2.0;
    Offset {
        dx: config.fly_out_radius * angle.cos() - half,
        dy: config.fly_out_radius * angle.sin() + half,
    }
}
