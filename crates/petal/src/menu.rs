use crate::geometry::{ChildIndex, Point};
use crate::spring::{Motion, SpringConfig, StaggeredMotion};
use crate::stagger;
use crate::style::{ButtonStyle, FrameStyleSet, Layout};
use std::time::Duration;

pub const HUB_CLOSED_ROTATION: f64 = -45.0;
pub const HUB_OPEN_ROTATION: f64 = 0.0;

pub const CHILD_SPRING: SpringConfig = SpringConfig::new(400.0, 28.0);
pub const HUB_SPRING: SpringConfig = SpringConfig::new(500.0, 30.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    pub is_open: bool,
}

/// Whether a click handled by the dial should still reach the
/// document-level handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Stop,
    Proceed,
}

/// Owns the open/closed state of one dial and drives its animation. The
/// child count is fixed for the lifetime of the controller.
#[derive(Debug, Clone)]
pub struct Controller {
    state: MenuState,
    layout: Layout,
    children: StaggeredMotion,
    hub: Motion,
}

impl Controller {
    pub fn new(layout: Layout, child_spring: SpringConfig, hub_spring: SpringConfig) -> Self {
        Self {
            state: MenuState::default(),
            children: StaggeredMotion::new(layout.final_targets(false), child_spring),
            hub: Motion::new(HUB_CLOSED_ROTATION, hub_spring),
            layout,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Hub click. The click must not also reach the document-level handler,
    /// which would immediately close the menu again.
    pub fn toggle(&mut self) -> Propagation {
        self.set_open(!self.state.is_open);
        Propagation::Stop
    }

    /// Document-level click.
    pub fn close_if_open(&mut self) {
        if self.state.is_open {
            self.set_open(false);
        }
    }

    fn set_open(&mut self, is_open: bool) {
        log::debug!("Dial {}", if is_open { "opening" } else { "closing" });
        self.state.is_open = is_open;
        self.hub.set_target(self.hub_rotation_target());
    }

    /// Routes a click at `point`: hub hits toggle and stop there, anything
    /// else is left for the document-level handler.
    pub fn handle_click(&mut self, point: Point) -> Propagation {
        if self.hub_contains(point) {
            self.toggle()
        } else {
            Propagation::Proceed
        }
    }

    pub fn hub_contains(&self, point: Point) -> bool {
        self.layout.hub_style().contains(point)
    }

    /// Topmost child under `point`, only while the menu is open.
    pub fn child_at(&self, point: Point) -> Option<ChildIndex> {
        if !self.state.is_open {
            return None;
        }
        self.children
            .current()
            .iter()
            .rposition(|style| style.contains(point))
            .map(ChildIndex::from)
    }

    pub fn hub_rotation_target(&self) -> f64 {
        if self.state.is_open {
            HUB_OPEN_ROTATION
        } else {
            HUB_CLOSED_ROTATION
        }
    }

    pub fn final_targets(&self) -> FrameStyleSet {
        self.layout.final_targets(self.state.is_open)
    }

    pub fn is_animating(&self) -> bool {
        !self.hub.is_at_rest() || !self.children.is_at_rest(&self.final_targets())
    }

    /// Advances the animation by `elapsed`. Returns true if anything was in
    /// motion and the dial needs to be redrawn.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        if !self.is_animating() {
            return false;
        }

        self.hub.tick(elapsed);

        let final_targets = self.final_targets();
        let is_open = self.state.is_open;
        if let Err(e) = self.children.tick(elapsed, |previous| {
            stagger::next_targets(&final_targets, previous, is_open)
        }) {
            log::error!("Stagger error: {}", e);
        }
        true
    }

    pub fn hub_style(&self) -> ButtonStyle {
        self.layout.hub_style().with_rotation(self.hub.value())
    }

    pub fn hub_rotation(&self) -> f64 {
        self.hub.value()
    }

    pub fn child_styles(&self) -> &FrameStyleSet {
        self.children.current()
    }
}
