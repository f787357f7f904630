use crate::config;
use crate::events::AppEvent;
use crate::gui::stage::{self, FAST_CLICK_MS, Stage};
use crate::gui::theme::{self, ThemeColors};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;
use turntable::Release;
use turntable::control::ControlCommand;
use turntable::input::Point;
use turntable::selector::SelectionSink;

pub struct AppModel {
    pub stage: Rc<RefCell<Stage>>,
    pub config_dir: PathBuf,
    pub drawing_area: gtk::DrawingArea,
    pub caption: gtk::Label,
    pub button_row: gtk::Box,
    pub buttons: Vec<gtk::Button>,
}

#[derive(Debug)]
pub enum AppMsg {
    PointerDown(Point, u32),
    PointerMove(Point),
    PointerUp(Point),
    PointerLeave,
    Select(usize),
    Step(i64),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Control(ControlCommand::Select(i)) => AppMsg::Select(i),
            AppEvent::Control(cmd) => AppMsg::Step(cmd.step().unwrap_or_default()),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

/// Slide buttons as the carousel's selection markers.
struct ButtonMarkers<'a> {
    buttons: &'a [gtk::Button],
}

impl SelectionSink for ButtonMarkers<'_> {
    fn clear_active(&mut self) {
        for button in self.buttons {
            button.remove_css_class("active");
        }
    }

    fn set_active(&mut self, index: usize) {
        if let Some(button) = self.buttons.get(index) {
            button.add_css_class("active");
        }
    }

    fn pulse(&mut self, index: usize) {
        let Some(button) = self.buttons.get(index) else {
            return;
        };
        button.add_css_class("fast-click");
        let button = button.clone();
        glib::timeout_add_local_once(Duration::from_millis(FAST_CLICK_MS), move || {
            button.remove_css_class("fast-click");
        });
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Stage, PathBuf, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Carousel"),
            add_css_class: "carousel-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match key {
                        gtk::gdk::Key::Left => sender.input(AppMsg::Step(-1)),
                        gtk::gdk::Key::Right => sender.input(AppMsg::Step(1)),
                        _ => return glib::Propagation::Proceed,
                    }
                    glib::Propagation::Stop
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "carousel-drawing-area",

                    add_controller = gtk::GestureDrag {
                        set_button: 0, // engine ignores all but the primary button
                        connect_drag_begin[sender] => move |gesture, x, y| {
                            sender.input(AppMsg::PointerDown(Point::new(x, y), gesture.current_button()));
                        },
                        connect_drag_update[sender] => move |gesture, dx, dy| {
                            if let Some((x, y)) = gesture.start_point() {
                                sender.input(AppMsg::PointerMove(Point::new(x + dx, y + dy)));
                            }
                        },
                        connect_drag_end[sender] => move |gesture, dx, dy| {
                            if let Some((x, y)) = gesture.start_point() {
                                sender.input(AppMsg::PointerUp(Point::new(x + dx, y + dy)));
                            }
                        }
                    },

                    add_controller = gtk::EventControllerMotion {
                        connect_leave[sender] => move |_| {
                            sender.input(AppMsg::PointerLeave);
                        }
                    }
                },

                #[name = "caption"]
                gtk::Label {
                    add_css_class: "slide-caption",
                    set_margin_top: 8,
                },

                #[name = "button_row"]
                gtk::Box {
                    set_orientation: gtk::Orientation::Horizontal,
                    set_halign: gtk::Align::Center,
                    set_spacing: 8,
                    set_margin_top: 12,
                    set_margin_bottom: 16,
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (stage, config_dir, rx) = init;

        theme::load_css();
        root.set_default_size(stage.window.width, stage.window.height);

        let stage = Rc::new(RefCell::new(stage));

        let model = AppModel {
            stage: stage.clone(),
            config_dir,
            drawing_area: gtk::DrawingArea::default(),
            caption: gtk::Label::default(),
            button_row: gtk::Box::default(),
            buttons: Vec::new(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();
        model.caption = widgets.caption.clone();
        model.button_row = widgets.button_row.clone();
        model.rebuild_buttons(&sender);

        let stage_draw = model.stage.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = stage::draw(cr, &stage_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let stage_resize = model.stage.clone();
        widgets.drawing_area.connect_resize(move |_, width, height| {
            stage_resize
                .borrow_mut()
                .resize(width as f64, height as f64);
        });

        let stage_tick = model.stage.clone();
        widgets.drawing_area.add_tick_callback(move |area, _| {
            if stage_tick.borrow_mut().tick().is_some() {
                area.queue_draw();
            }
            glib::ControlFlow::Continue
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::PointerDown(at, button) => self.stage.borrow_mut().pointer_down(at, button),
            AppMsg::PointerMove(at) => self.stage.borrow_mut().pointer_move(at),
            AppMsg::PointerUp(at) => {
                let mut markers = ButtonMarkers {
                    buttons: &self.buttons,
                };
                let release = self.stage.borrow_mut().pointer_up(at, &mut markers);
                if let Release::Clicked(Some(_)) = release {
                    self.refresh_caption();
                }
            }
            AppMsg::PointerLeave => self.stage.borrow_mut().pointer_leave(),
            AppMsg::Select(index) => {
                let mut markers = ButtonMarkers {
                    buttons: &self.buttons,
                };
                self.stage.borrow_mut().select(index, &mut markers);
                self.refresh_caption();
            }
            AppMsg::Step(delta) => {
                let mut markers = ButtonMarkers {
                    buttons: &self.buttons,
                };
                self.stage.borrow_mut().step(delta, &mut markers);
                self.refresh_caption();
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    let resized = self
                        .stage
                        .borrow_mut()
                        .reload(&new_config, &self.config_dir);
                    if resized {
                        self.rebuild_buttons(&sender);
                    } else {
                        self.refresh_tooltips();
                    }
                    self.refresh_caption();
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    fn rebuild_buttons(&mut self, sender: &ComponentSender<Self>) {
        while let Some(child) = self.button_row.first_child() {
            self.button_row.remove(&child);
        }

        let count = self.stage.borrow().len();
        self.buttons = (0..count)
            .map(|i| {
                let button = gtk::Button::new();
                button.add_css_class("slider-btn");
                let sender = sender.clone();
                button.connect_clicked(move |_| sender.input(AppMsg::Select(i)));
                self.button_row.append(&button);
                button
            })
            .collect();
        self.refresh_tooltips();
    }

    fn refresh_tooltips(&self) {
        let stage = self.stage.borrow();
        for (button, title) in self.buttons.iter().zip(&stage.titles) {
            button.set_tooltip_text(title.as_ref().map(|t| t.as_str()));
        }
    }

    fn refresh_caption(&self) {
        let stage = self.stage.borrow();
        let title = stage.active_title().map(|t| t.as_str()).unwrap_or_default();
        self.caption.set_label(title);
    }
}
