use crate::config::{AppConfig, SlideTitle, WindowConfig};
use crate::textures::PixbufTextures;
use gdk_pixbuf::Pixbuf;
use std::path::Path;
use std::time::Instant;
use turntable::clock::{Clock, SystemClock};
use turntable::input::{Point, PointerButton};
use turntable::ring::{Camera, Viewport};
use turntable::selector::SelectionSink;
use turntable::{Carousel, CarouselError, Frame, Release, RingPicker};

/// Everything the window draws and feeds input into.
///
/// `carousel` is `None` when the slide set failed to load or is empty; every
/// handler is then a no-op.
pub struct Stage {
    pub carousel: Option<Carousel<Pixbuf>>,
    pub titles: Vec<Option<SlideTitle>>,
    pub window: WindowConfig,
    pub viewport: Viewport,
    clock: SystemClock,
}

impl Stage {
    pub fn from_config(config: &AppConfig, base: &Path) -> Self {
        let carousel = Self::build(config, base)
            .inspect_err(|e| log::error!("Carousel not created: {}", e))
            .ok();
        let window = config.window.clone();
        Self {
            carousel,
            titles: config.titles(),
            viewport: Viewport {
                width: window.width as f64,
                height: window.height as f64,
            },
            window,
            clock: SystemClock,
        }
    }

    fn build(config: &AppConfig, base: &Path) -> Result<Carousel<Pixbuf>, CarouselError> {
        let (fronts, backs) = config.image_paths(base);
        Carousel::load(config.carousel.clone(), &PixbufTextures, &fronts, &backs)
    }

    /// Applies a new config. Keeps the running ring (angle, selection) when
    /// only the images changed; otherwise rebuilds it. Returns whether the
    /// slide count changed.
    pub fn reload(&mut self, config: &AppConfig, base: &Path) -> bool {
        let old_len = self.len();
        self.titles = config.titles();
        self.window = config.window.clone();

        let same_tuning = self
            .carousel
            .as_ref()
            .is_some_and(|c| c.config() == &config.carousel);
        if same_tuning && config.slides.len() == old_len {
            let (fronts, backs) = config.image_paths(base);
            let swapped = turntable::texture::load_face_batch(&PixbufTextures, &fronts, &backs)
                .and_then(|faces| match self.carousel.as_mut() {
                    Some(c) => c.replace_faces(faces),
                    None => Ok(()),
                });
            if let Err(e) = swapped {
                log::error!("Keeping previous slides: {}", e);
            }
        } else {
            self.carousel = Self::build(config, base)
                .inspect_err(|e| log::error!("Carousel not created: {}", e))
                .ok();
        }
        self.len() != old_len
    }

    pub fn len(&self) -> usize {
        self.carousel.as_ref().map_or(0, |c| c.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = Viewport { width, height };
    }

    /// Camera for the current viewport; the ring keeps its share of the window height.
    pub fn camera(&self) -> Camera {
        let reference = self.window.reference_height.max(1.0);
        Camera {
            pitch: self.window.pitch,
            zoom: self.window.zoom * self.viewport.height / reference,
        }
    }

    pub fn picker(&self) -> Option<RingPicker> {
        self.carousel
            .as_ref()
            .map(|c| c.picker(self.camera(), self.viewport))
    }

    pub fn active_title(&self) -> Option<&SlideTitle> {
        let active = self.carousel.as_ref()?.active()?;
        self.titles.get(active)?.as_ref()
    }

    pub fn tick(&mut self) -> Option<Frame> {
        let now = self.now();
        self.carousel.as_mut().map(|c| c.tick(now))
    }

    pub fn pointer_down(&mut self, at: Point, button: u32) {
        if let Some(c) = self.carousel.as_mut() {
            c.on_pointer_down(at, PointerButton::from_code(button));
        }
    }

    pub fn pointer_move(&mut self, at: Point) {
        let now = self.now();
        if let Some(c) = self.carousel.as_mut() {
            c.on_pointer_move(at, now);
        }
    }

    pub fn pointer_up(&mut self, at: Point, sink: &mut dyn SelectionSink) -> Release {
        let now = self.now();
        let Some(picker) = self.picker() else {
            return Release::Ignored;
        };
        let Some(c) = self.carousel.as_mut() else {
            return Release::Ignored;
        };
        c.on_pointer_up(at, now, &picker, sink)
            .inspect_err(|e| log::warn!("Click ignored: {}", e))
            .unwrap_or(Release::Ignored)
    }

    pub fn pointer_leave(&mut self) {
        let now = self.now();
        if let Some(c) = self.carousel.as_mut() {
            c.on_pointer_leave(now);
        }
    }

    pub fn select(&mut self, index: usize, sink: &mut dyn SelectionSink) {
        let now = self.now();
        if let Some(c) = self.carousel.as_mut()
            && let Err(e) = c.select_by_index(index, now, sink)
        {
            log::warn!("Select {} ignored: {}", index, e);
        }
    }

    pub fn step(&mut self, delta: i64, sink: &mut dyn SelectionSink) {
        let now = self.now();
        if let Some(c) = self.carousel.as_mut()
            && let Err(e) = c.step(delta, now, sink)
        {
            log::warn!("Step {} ignored: {}", delta, e);
        }
    }
}
