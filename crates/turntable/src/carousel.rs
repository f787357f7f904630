use crate::config::CarouselConfig;
use crate::error::CarouselError;
use crate::geometry::Geometry;
use crate::input::{Point, PointerButton, PointerEvent};
use crate::panel::{FacePair, Panel};
use crate::pulse::ScalePulse;
use crate::ring::{Camera, RingView, Viewport, ring_radius};
use crate::rotation::{DragRelease, Mode, Rotor};
use crate::selector::{PanelPicker, SelectionSink, SlideSelector};
use crate::style::{self, OpacityRange};
use crate::texture::{ImagePath, TextureProvider, load_face_batch};
use std::sync::Arc;
use std::time::Instant;

/// What the renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Ring rotation about the vertical axis, in `[0, 360)`.
    pub angle: f64,
    pub scale: f64,
}

/// Result of a pointer release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// No drag was in progress.
    Ignored,
    /// The pointer moved too far for the release to count as a click.
    Dragged(DragRelease),
    /// A clean click; carries the selected button if a panel was hit.
    Clicked(Option<usize>),
}

pub struct Carousel<T> {
    config: CarouselConfig,
    geometry: Arc<Geometry>,
    radius: f64,
    panels: Vec<Panel<T>>,
    rotor: Rotor,
    pulse: ScalePulse,
    selector: SlideSelector,
    opacity: OpacityRange,
}

impl<T> Carousel<T> {
    pub fn new(config: CarouselConfig, faces: Vec<FacePair<T>>) -> Result<Self, CarouselError> {
        config.validate()?;
        if faces.is_empty() {
            return Err(CarouselError::NoPanels);
        }

        let count = faces.len();
        let geometry = Arc::new(Geometry::from_config(&config.geometry));
        let radius = ring_radius(count, config.geometry.width, config.geometry.spacing);
        let panels = faces
            .into_iter()
            .enumerate()
            .map(|(i, pair)| {
                Panel::new(i, count, pair).with_opacities(config.max_opacity, config.edge_opacity)
            })
            .collect();

        let mut carousel = Self {
            rotor: Rotor::new(&config),
            pulse: ScalePulse::new(&config),
            selector: SlideSelector::new(count, &config),
            opacity: OpacityRange::from_config(&config),
            geometry,
            radius,
            panels,
            config,
        };
        carousel.restyle();

        log::info!(
            "Carousel ready: {} panels, ring radius {:.1}, {} triangles per card",
            count,
            carousel.radius,
            carousel.geometry.triangle_count()
        );
        Ok(carousel)
    }

    /// Loads all textures first and builds the carousel only if every one resolved.
    pub fn load<P>(
        config: CarouselConfig,
        provider: &P,
        fronts: &[ImagePath],
        backs: &[ImagePath],
    ) -> Result<Self, CarouselError>
    where
        P: TextureProvider<Texture = T>,
    {
        let faces = load_face_batch(provider, fronts, backs)?;
        Self::new(config, faces)
    }

    /// Swaps every panel's textures in place, keeping angle and selection.
    pub fn replace_faces(&mut self, faces: Vec<FacePair<T>>) -> Result<(), CarouselError> {
        if faces.len() != self.panels.len() {
            return Err(CarouselError::PanelCountMismatch {
                textures: faces.len(),
                panels: self.panels.len(),
            });
        }
        for (panel, pair) in self.panels.iter_mut().zip(faces) {
            panel.faces = pair;
        }
        Ok(())
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn geometry(&self) -> &Arc<Geometry> {
        &self.geometry
    }

    pub fn panels(&self) -> &[Panel<T>] {
        &self.panels
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn angle(&self) -> f64 {
        self.rotor.angle()
    }

    pub fn scale(&self) -> f64 {
        self.pulse.scale()
    }

    pub fn mode(&self) -> Mode {
        self.rotor.mode()
    }

    pub fn rotor(&self) -> &Rotor {
        &self.rotor
    }

    pub fn selector(&self) -> &SlideSelector {
        &self.selector
    }

    pub fn active(&self) -> Option<usize> {
        self.selector.active()
    }

    fn restyle(&mut self) {
        style::update(&mut self.panels, self.rotor.angle(), self.opacity);
    }

    /// Returns whether the press started a drag.
    pub fn on_pointer_down(&mut self, at: Point, button: PointerButton) -> bool {
        if button != PointerButton::Primary {
            return false;
        }
        self.rotor.begin_drag(at.x);
        self.pulse.press();
        true
    }

    pub fn on_pointer_move(&mut self, at: Point, now: Instant) {
        if self.rotor.drag_to(at.x, now).is_some() {
            self.restyle();
        }
    }

    /// Ends a drag. A release that did not travel past the click threshold is
    /// treated as a click and resolved through `picker`.
    pub fn on_pointer_up(
        &mut self,
        at: Point,
        now: Instant,
        picker: &dyn PanelPicker,
        sink: &mut dyn SelectionSink,
    ) -> Result<Release, CarouselError> {
        let Some(release) = self.end_drag(now) else {
            return Ok(Release::Ignored);
        };
        if release.did_drag {
            return Ok(Release::Dragged(release));
        }
        let picked = self.select_by_pick(at, picker, now, sink)?;
        Ok(Release::Clicked(picked))
    }

    /// The pointer left the surface; ends a drag without a click.
    pub fn on_pointer_leave(&mut self, now: Instant) -> Option<DragRelease> {
        self.end_drag(now)
    }

    fn end_drag(&mut self, now: Instant) -> Option<DragRelease> {
        let release = self.rotor.end_drag(now)?;
        self.pulse.release();
        Some(release)
    }

    /// Dispatches a toolkit-neutral pointer event.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        now: Instant,
        picker: &dyn PanelPicker,
        sink: &mut dyn SelectionSink,
    ) -> Result<Release, CarouselError> {
        match event {
            PointerEvent::Down { at, button } => {
                self.on_pointer_down(at, button);
                Ok(Release::Ignored)
            }
            PointerEvent::Move { at } => {
                self.on_pointer_move(at, now);
                Ok(Release::Ignored)
            }
            PointerEvent::Up { at } => self.on_pointer_up(at, now, picker, sink),
            PointerEvent::Leave => Ok(self
                .on_pointer_leave(now)
                .map_or(Release::Ignored, Release::Dragged)),
        }
    }

    pub fn select_by_index(
        &mut self,
        index: usize,
        now: Instant,
        sink: &mut dyn SelectionSink,
    ) -> Result<(), CarouselError> {
        if self.rotor.is_dragging() {
            self.end_drag(now);
        }
        self.selector
            .select_by_index(index, &mut self.rotor, now, sink)
    }

    pub fn select_by_pick(
        &mut self,
        point: Point,
        picker: &dyn PanelPicker,
        now: Instant,
        sink: &mut dyn SelectionSink,
    ) -> Result<Option<usize>, CarouselError> {
        self.selector
            .select_by_pick(point, picker, &mut self.rotor, now, sink)
    }

    /// Next/previous slide relative to the active one.
    pub fn step(
        &mut self,
        delta: i64,
        now: Instant,
        sink: &mut dyn SelectionSink,
    ) -> Result<usize, CarouselError> {
        if self.rotor.is_dragging() {
            self.end_drag(now);
        }
        self.selector.step_by(delta, &mut self.rotor, now, sink)
    }

    /// Advances one frame: rotation, then scale, then opacities.
    pub fn tick(&mut self, now: Instant) -> Frame {
        let angle = self.rotor.advance(now);
        let scale = self.pulse.advance();
        self.restyle();
        Frame { angle, scale }
    }

    /// Projection of the ring as it currently stands.
    pub fn view(&self, camera: Camera, viewport: Viewport) -> RingView {
        RingView {
            count: self.panels.len(),
            radius: self.radius,
            angle: self.rotor.angle(),
            scale: self.pulse.scale(),
            camera,
            viewport,
        }
    }

    /// Screen-space picker detached from `self`, so it can be passed back into
    /// the `&mut self` handlers.
    pub fn picker(&self, camera: Camera, viewport: Viewport) -> RingPicker {
        RingPicker {
            view: self.view(camera, viewport),
            geometry: Arc::clone(&self.geometry),
        }
    }
}

/// Picks panels by hit-testing their projected faces.
#[derive(Debug, Clone)]
pub struct RingPicker {
    view: RingView,
    geometry: Arc<Geometry>,
}

impl PanelPicker for RingPicker {
    fn pick(&self, point: Point) -> Option<usize> {
        self.view.pick(&self.geometry, point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::NoMarkers;

    fn carousel(count: usize) -> Carousel<usize> {
        let faces = (0..count).map(|i| FacePair::new(i, i)).collect();
        Carousel::new(CarouselConfig::default(), faces).unwrap()
    }

    #[test]
    fn test_empty_carousel_rejected() {
        let result = Carousel::<usize>::new(CarouselConfig::default(), Vec::new());
        assert!(matches!(result, Err(CarouselError::NoPanels)));
    }

    #[test]
    fn test_invalid_geometry_aborts_construction() {
        let mut cfg = CarouselConfig::default();
        cfg.geometry.corner_radius = 500.0;
        let faces = vec![FacePair::new(0, 0)];
        assert!(matches!(
            Carousel::new(cfg, faces),
            Err(CarouselError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_opacities_ready_before_first_tick() {
        let c = carousel(8);
        assert!((c.panels()[0].front_opacity - 0.9).abs() < 1e-12);
        assert_eq!(c.panels()[4].front_opacity, 0.4);
        assert_eq!(c.panels()[4].back_opacity, 0.9);
        assert_eq!(c.panels()[4].edge_opacity, 0.2);
    }

    #[test]
    fn test_secondary_button_does_not_drag() {
        let mut c = carousel(8);
        assert!(!c.on_pointer_down(Point::default(), PointerButton::Secondary));
        assert_eq!(c.mode(), Mode::AutoRotating);
    }

    #[test]
    fn test_release_without_drag_is_ignored() {
        let mut c = carousel(8);
        let picker = |_p: Point| -> Option<usize> { Some(0) };
        let release = c
            .on_pointer_up(Point::default(), Instant::now(), &picker, &mut NoMarkers)
            .unwrap();
        assert_eq!(release, Release::Ignored);
        assert_eq!(c.active(), None);
    }

    #[test]
    fn test_button_during_drag_ends_drag() {
        let mut c = carousel(8);
        let now = Instant::now();
        c.on_pointer_down(Point::default(), PointerButton::Primary);
        c.select_by_index(2, now, &mut NoMarkers).unwrap();
        assert_eq!(c.mode(), Mode::TransitioningToTarget);
        assert_eq!(c.pulse.target(), 1.0);
    }

    #[test]
    fn test_replace_faces_requires_same_count() {
        let mut c = carousel(3);
        let err = c.replace_faces(vec![FacePair::new(9, 9)]).unwrap_err();
        assert!(matches!(
            err,
            CarouselError::PanelCountMismatch { textures: 1, panels: 3 }
        ));
        c.replace_faces((0..3).map(|i| FacePair::new(i + 10, i + 20)).collect())
            .unwrap();
        assert_eq!(c.panels()[2].faces, FacePair::new(12, 22));
    }

    #[test]
    fn test_shared_geometry() {
        let c = carousel(3);
        let picker = c.picker(Camera::default(), Viewport { width: 640.0, height: 480.0 });
        assert_eq!(Arc::strong_count(c.geometry()), 2);
        drop(picker);
        assert_eq!(Arc::strong_count(c.geometry()), 1);
    }
}
