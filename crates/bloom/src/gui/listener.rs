use gtk::prelude::*;
use gtk4 as gtk;

/// Keeps an event controller attached to a widget for as long as the guard
/// is alive. Dropping the guard detaches it.
pub struct ListenerGuard {
    widget: gtk::Widget,
    controller: gtk::EventController,
}

impl ListenerGuard {
    pub fn attach(
        widget: &impl IsA<gtk::Widget>,
        controller: impl IsA<gtk::EventController>,
    ) -> Self {
        let widget: gtk::Widget = widget.as_ref().clone();
        let controller = controller.upcast::<gtk::EventController>();
        widget.add_controller(controller.clone());
        log::debug!("Attached {} listener", controller.type_().name());
        Self { widget, controller }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        log::debug!("Detaching {} listener", self.controller.type_().name());
        self.widget.remove_controller(&self.controller);
    }
}
