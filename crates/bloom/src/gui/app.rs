use crate::config;
use crate::events::AppEvent;
use crate::gui::dial::{self, Dial};
use crate::gui::listener::ListenerGuard;
use crate::gui::theme::{self, ThemeColors};
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use petal::icon::{self, ChildIcon};
use petal::{Point, Propagation};
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

pub struct AppModel {
    pub dial: Rc<RefCell<Dial>>,
    pub drawing_area: gtk::DrawingArea,
    /// Held only so that dropping the model removes the window-level handler.
    #[allow(dead_code)]
    document_click: Option<ListenerGuard>,
}

#[derive(Debug)]
pub enum AppMsg {
    DocumentClick,
    Escape,
    Activate(ChildIcon),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl AppModel {
    fn install_frame_clock(&self) {
        let dial = self.dial.clone();
        let last_frame = Cell::new(None::<i64>);
        self.drawing_area.add_tick_callback(move |area, clock| {
            let now = clock.frame_time();
            let elapsed = last_frame
                .replace(Some(now))
                .map(|prev| Duration::from_micros(now.saturating_sub(prev).max(0) as u64))
                .unwrap_or_default();
            if dial.borrow_mut().tick(elapsed) {
                area.queue_draw();
            }
            glib::ControlFlow::Continue
        });
    }

    /// Clicks on the drawing area. A hub hit claims the event sequence so the
    /// window-level handler never sees it.
    fn install_dial_click(&self, sender: &ComponentSender<Self>) {
        let gesture = primary_click();

        let dial = self.dial.clone();
        let sender = sender.clone();
        gesture.connect_pressed(move |gesture, _, x, y| {
            let action = dial.borrow_mut().click(Point::new(x, y));
            if let Some(icon) = action.activated {
                sender.input(AppMsg::Activate(icon));
            }
            if action.propagation == Propagation::Stop {
                gesture.set_state(gtk::EventSequenceState::Claimed);
            }
        });
        self.drawing_area.add_controller(gesture);
    }
}

/// Both click handlers listen to the same button, so a secondary click on the
/// hub can never reach the window-level handler alone.
fn primary_click() -> gtk::GestureClick {
    let gesture = gtk::GestureClick::new();
    gesture.set_button(gdk::BUTTON_PRIMARY);
    gesture
}

/// Window-level click handler, the equivalent of a document listener.
fn document_click(
    root: &gtk::ApplicationWindow,
    sender: &ComponentSender<AppModel>,
) -> ListenerGuard {
    let gesture = primary_click();
    gesture.set_propagation_phase(gtk::PropagationPhase::Bubble);
    let sender = sender.clone();
    gesture.connect_pressed(move |_, _, _, _| {
        sender.input(AppMsg::DocumentClick);
    });
    ListenerGuard::attach(root, gesture)
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Dial, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Bloom"),
            set_default_width: 980,
            set_default_height: 640,
            add_css_class: "bloom-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Escape);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "bloom-drawing-area",
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (dial, rx) = init;

        theme::load_css();

        let model = AppModel {
            dial: Rc::new(RefCell::new(dial)),
            drawing_area: gtk::DrawingArea::default(),
            document_click: None,
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let dial_draw = model.dial.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = dial::draw(cr, &dial_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        model.install_frame_clock();
        model.install_dial_click(&sender);
        model.document_click = Some(document_click(&root, &sender));

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::DocumentClick | AppMsg::Escape => {
                self.dial.borrow_mut().close_if_open();
            }
            AppMsg::Activate(icon) => {
                log::info!("Activated '{}'", icon);
            }
            AppMsg::ConfigReload => {
                icon::clear_cache();
                match config::load_config().and_then(|c| Dial::from_config(&c)) {
                    Ok(dial) => {
                        *self.dial.borrow_mut() = dial;
                        self.drawing_area.queue_draw();
                        log::info!("Configuration reloaded");
                    }
                    Err(e) => log::error!("Failed to reload config: {}", e),
                }
            }
        }
    }
}
