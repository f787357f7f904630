use crate::angle::{normalize, step};
use crate::config::CarouselConfig;
use crate::error::CarouselError;
use crate::input::Point;
use crate::rotation::Rotor;
use std::time::Instant;

/// Receiver of active-slide changes: buttons, captions and the like.
pub trait SelectionSink {
    fn clear_active(&mut self);
    fn set_active(&mut self, index: usize);
    /// Short press flash on a button.
    fn pulse(&mut self, _index: usize) {}
}

/// Sink for callers that keep no visible markers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMarkers;

impl SelectionSink for NoMarkers {
    fn clear_active(&mut self) {}
    fn set_active(&mut self, _index: usize) {}
}

/// Hit test from a screen point to a panel index.
pub trait PanelPicker {
    fn pick(&self, point: Point) -> Option<usize>;
}

impl<F: Fn(Point) -> Option<usize>> PanelPicker for F {
    fn pick(&self, point: Point) -> Option<usize> {
        self(point)
    }
}

#[derive(Debug, Clone)]
pub struct SlideSelector {
    count: usize,
    facing_offset: f64,
    active: Option<usize>,
}

impl SlideSelector {
    pub fn new(count: usize, cfg: &CarouselConfig) -> Self {
        Self {
            count,
            facing_offset: cfg.facing_offset,
            active: None,
        }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Ring angle that presents button `index`.
    pub fn target_angle(&self, index: usize) -> f64 {
        self.facing_offset - step(self.count) * index as f64
    }

    /// Whole slots between button and panel numbering.
    fn slot_shift(&self) -> i64 {
        (self.facing_offset / step(self.count)).round() as i64
    }

    fn wrap(&self, i: i64) -> usize {
        i.rem_euclid(self.count as i64) as usize
    }

    /// Button whose transition brings panel `panel` to the front.
    pub fn button_for_panel(&self, panel: usize) -> usize {
        self.wrap(panel as i64 + self.slot_shift())
    }

    /// Panel brought to the front by button `button`.
    pub fn panel_for_button(&self, button: usize) -> usize {
        self.wrap(button as i64 - self.slot_shift())
    }

    /// Button whose target is nearest to `angle_deg`.
    pub fn nearest_button(&self, angle_deg: f64) -> usize {
        let slots = normalize(self.facing_offset - angle_deg) / step(self.count);
        self.wrap(slots.round() as i64)
    }

    pub fn select_by_index(
        &mut self,
        index: usize,
        rotor: &mut Rotor,
        now: Instant,
        sink: &mut dyn SelectionSink,
    ) -> Result<(), CarouselError> {
        if index >= self.count {
            log::warn!("Rejected slide {} of {}", index, self.count);
            return Err(CarouselError::IndexOutOfRange {
                index,
                count: self.count,
            });
        }

        rotor.slide_to(self.target_angle(index), now);
        self.active = Some(index);

        sink.clear_active();
        sink.set_active(index);
        sink.pulse(index);
        log::debug!("Slide {} selected", index);
        Ok(())
    }

    /// Resolves `point` through `picker` and selects the matching button.
    /// Returns the selected button, or `None` when nothing was hit.
    pub fn select_by_pick(
        &mut self,
        point: Point,
        picker: &dyn PanelPicker,
        rotor: &mut Rotor,
        now: Instant,
        sink: &mut dyn SelectionSink,
    ) -> Result<Option<usize>, CarouselError> {
        let Some(panel) = picker.pick(point) else {
            return Ok(None);
        };
        if panel >= self.count {
            return Err(CarouselError::IndexOutOfRange {
                index: panel,
                count: self.count,
            });
        }
        let button = self.button_for_panel(panel);
        self.select_by_index(button, rotor, now, sink)?;
        Ok(Some(button))
    }

    /// Selects the slide `delta` positions from the current one.
    pub fn step_by(
        &mut self,
        delta: i64,
        rotor: &mut Rotor,
        now: Instant,
        sink: &mut dyn SelectionSink,
    ) -> Result<usize, CarouselError> {
        if self.count == 0 {
            return Err(CarouselError::NoPanels);
        }
        let base = self
            .active
            .unwrap_or_else(|| self.nearest_button(rotor.angle()));
        let next = self.wrap(base as i64 + delta);
        self.select_by_index(next, rotor, now, sink)?;
        Ok(next)
    }
}
