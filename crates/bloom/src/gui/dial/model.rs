use crate::config::{Config, ConfigError};
use crate::gui::dial::ICON_SIZE;
use gdk_pixbuf::Pixbuf;
use petal::icon::{self, ChildIcon};
use petal::{ButtonStyle, ChildIndex, Controller, Point, Propagation};
use std::time::Duration;

#[derive(Clone)]
pub struct ChildButton {
    pub icon: ChildIcon,
    pub pixbuf: Option<Pixbuf>,
}

impl ChildButton {
    pub fn new(icon: ChildIcon) -> Self {
        let pixbuf = Self::load_icon(icon);
        Self { icon, pixbuf }
    }

    /// A button drawn with its text label only.
    pub fn unthemed(icon: ChildIcon) -> Self {
        Self { icon, pixbuf: None }
    }

    fn load_icon(icon: ChildIcon) -> Option<Pixbuf> {
        let path = icon::find_icon_path(&icon.theme_name())?;
        Pixbuf::from_file_at_scale(&path, ICON_SIZE, ICON_SIZE, true)
            .inspect_err(|e| log::warn!("Failed to load icon {}: {}", path.display(), e))
            .ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickAction {
    pub propagation: Propagation,
    pub activated: Option<ChildIcon>,
}

/// One speed dial: its controller plus what each child shows.
pub struct Dial {
    controller: Controller,
    buttons: Vec<ChildButton>,
}

impl Dial {
    pub fn new(controller: Controller, buttons: Vec<ChildButton>) -> Self {
        debug_assert_eq!(controller.layout().child_count(), buttons.len());
        Self {
            controller,
            buttons,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let layout = config.layout()?;
        let icons = config.icon_set()?;
        let buttons = (0..layout.child_count())
            .map(|i| ChildButton::new(icons.get(ChildIndex::from(i))))
            .collect();
        let controller = Controller::new(layout, config.child_spring, config.hub_spring);
        Ok(Self::new(controller, buttons))
    }

    /// Click on the drawing area. A child hit is reported but still
    /// propagates, so the document-level handler closes the menu after it.
    pub fn click(&mut self, point: Point) -> ClickAction {
        let activated = self
            .controller
            .child_at(point)
            .and_then(|i| self.buttons.get(*i))
            .map(|b| b.icon);
        ClickAction {
            propagation: self.controller.handle_click(point),
            activated,
        }
    }

    pub fn close_if_open(&mut self) {
        self.controller.close_if_open();
    }

    pub fn is_open(&self) -> bool {
        self.controller.is_open()
    }

    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.controller.tick(elapsed)
    }

    pub fn hub_style(&self) -> ButtonStyle {
        self.controller.hub_style()
    }

    pub fn children(&self) -> impl Iterator<Item = (&ChildButton, &ButtonStyle)> {
        self.buttons.iter().zip(self.controller.child_styles().iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_micros(16_667);

    fn dial() -> Dial {
        let config = Config {
            child_count: 3,
            icons: vec![ChildIcon::Camera, ChildIcon::Bell],
            ..Config::default()
        };
        let controller =
            Controller::new(config.layout().unwrap(), config.child_spring, config.hub_spring);
        let icons = config.icon_set().unwrap();
        let buttons = (0..3)
            .map(|i| ChildButton::unthemed(icons.get(ChildIndex::from(i))))
            .collect();
        Dial::new(controller, buttons)
    }

    fn hub(dial: &Dial) -> Point {
        dial.hub_style().center()
    }

    #[test]
    fn test_hub_click_claims_event() {
        let mut dial = dial();
        let action = dial.click(hub(&dial));
        assert_eq!(action.propagation, Propagation::Stop);
        assert_eq!(action.activated, None);
        assert!(dial.is_open());
    }

    #[test]
    fn test_outside_click_then_document_close() {
        let mut dial = dial();
        dial.click(hub(&dial));
        let action = dial.click(Point::new(0.0, 0.0));
        assert_eq!(action.propagation, Propagation::Proceed);
        dial.close_if_open();
        assert!(!dial.is_open());
    }

    #[test]
    fn test_child_click_reports_cycled_icon() {
        let mut dial = dial();
        dial.click(hub(&dial));
        for _ in 0..600 {
            dial.tick(FRAME);
        }

        let third = dial.children().nth(2).map(|(_, s)| s.center()).unwrap();
        let action = dial.click(third);
        assert_eq!(action.activated, Some(ChildIcon::Camera));
        assert_eq!(action.propagation, Propagation::Proceed);
    }

    #[test]
    fn test_children_pair_buttons_with_styles() {
        let dial = dial();
        let icons: Vec<_> = dial.children().map(|(b, _)| b.icon).collect();
        assert_eq!(
            icons,
            vec![ChildIcon::Camera, ChildIcon::Bell, ChildIcon::Camera]
        );
    }
}
