//! The rotation state machine.

use crate::angle::{normalize, shortest_diff};
use crate::config::CarouselConfig;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::time::{Duration, Instant};
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// A release later than this after the last applied drag sample carries no fling.
pub const FLING_WINDOW: Duration = Duration::from_millis(100);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Spin {
    #[strum(serialize = "Forward", serialize = "cw", serialize = "+1", serialize = "1")]
    Forward,
    #[strum(serialize = "Backward", serialize = "ccw", serialize = "-1")]
    Backward,
}

impl Spin {
    pub fn sign(self) -> f64 {
        match self {
            Spin::Forward => 1.0,
            Spin::Backward => -1.0,
        }
    }

    /// Direction of a signed angular delta; `None` for zero.
    pub fn from_delta(delta: f64) -> Option<Self> {
        if delta > 0.0 {
            Some(Spin::Forward)
        } else if delta < 0.0 {
            Some(Spin::Backward)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum Mode {
    AutoRotating,
    Dragging,
    TransitioningToTarget,
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    start_angle: f64,
    end_angle: f64,
    started: Instant,
    duration: Duration,
}

impl Transition {
    fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    /// Pointer x of the last sample that moved the angle.
    anchor_x: f64,
    /// Pointer x of the last event, applied or not.
    last_x: f64,
    /// Total pointer travel since the press.
    travelled: f64,
    last_sample: Option<Instant>,
}

#[derive(Debug, Clone, Copy)]
enum Motion {
    Auto,
    Dragging(Drag),
    Transitioning(Transition),
}

/// What a pointer release left behind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRelease {
    pub travelled: f64,
    /// True when the drag moved far enough that the release is not a click.
    pub did_drag: bool,
}

#[derive(Debug, Clone)]
struct Tuning {
    auto_speed: f64,
    drag_speed: f64,
    max_drag_step: f64,
    drag_threshold_px: f64,
    click_threshold_px: f64,
    friction: f64,
    velocity_epsilon: f64,
    resume_delay: Duration,
    transition: Duration,
}

impl From<&CarouselConfig> for Tuning {
    fn from(cfg: &CarouselConfig) -> Self {
        Self {
            auto_speed: cfg.auto_speed,
            drag_speed: cfg.drag_speed,
            max_drag_step: cfg.max_drag_step.abs(),
            drag_threshold_px: cfg.drag_threshold_px,
            click_threshold_px: cfg.click_threshold_px,
            friction: cfg.friction,
            velocity_epsilon: cfg.velocity_epsilon,
            resume_delay: cfg.resume_delay(),
            transition: cfg.transition_duration(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rotor {
    angle: f64,
    spin: Spin,
    velocity: f64,
    motion: Motion,
    /// Auto-rotation is withheld until this instant after a drag release.
    resume_at: Option<Instant>,
    tuning: Tuning,
}

impl Rotor {
    pub fn new(cfg: &CarouselConfig) -> Self {
        Self {
            angle: 0.0,
            spin: cfg.spin,
            velocity: 0.0,
            motion: Motion::Auto,
            resume_at: None,
            tuning: Tuning::from(cfg),
        }
    }

    /// Current angle in `[0, 360)`.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn mode(&self) -> Mode {
        match self.motion {
            Motion::Auto => Mode::AutoRotating,
            Motion::Dragging(_) => Mode::Dragging,
            Motion::Transitioning(_) => Mode::TransitioningToTarget,
        }
    }

    pub fn spin(&self) -> Spin {
        self.spin
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Target of the running transition, if any.
    pub fn target(&self) -> Option<f64> {
        match self.motion {
            Motion::Transitioning(t) => Some(normalize(t.end_angle)),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.motion, Motion::Dragging(_))
    }

    /// Primary press. Abandons any running transition.
    pub fn begin_drag(&mut self, x: f64) {
        if let Motion::Transitioning(t) = self.motion {
            log::debug!(
                "Drag cancels transition toward {:.2}",
                normalize(t.end_angle)
            );
        }
        self.velocity = 0.0;
        self.resume_at = None;
        self.motion = Motion::Dragging(Drag {
            anchor_x: x,
            last_x: x,
            travelled: 0.0,
            last_sample: None,
        });
    }

    /// Pointer motion during a drag. Returns the angle applied by this sample.
    pub fn drag_to(&mut self, x: f64, now: Instant) -> Option<f64> {
        let Motion::Dragging(ref mut drag) = self.motion else {
            return None;
        };

        drag.travelled += (x - drag.last_x).abs();
        drag.last_x = x;

        let dx = x - drag.anchor_x;
        if dx.abs() <= self.tuning.drag_threshold_px {
            return None;
        }

        let max = self.tuning.max_drag_step;
        let delta = (dx * self.tuning.drag_speed).clamp(-max, max);
        drag.anchor_x = x;
        drag.last_sample = Some(now);

        if let Some(spin) = Spin::from_delta(delta) {
            self.spin = spin;
        }
        self.velocity = delta;
        self.angle = normalize(self.angle + delta);
        Some(delta)
    }

    /// Pointer up or leave. `None` when no drag was active.
    pub fn end_drag(&mut self, now: Instant) -> Option<DragRelease> {
        let Motion::Dragging(drag) = self.motion else {
            return None;
        };

        let fresh = drag
            .last_sample
            .is_some_and(|t| now.saturating_duration_since(t) <= FLING_WINDOW);
        if !fresh {
            self.velocity = 0.0;
        }

        self.motion = Motion::Auto;
        self.resume_at = Some(now + self.tuning.resume_delay);

        let release = DragRelease {
            travelled: drag.travelled,
            did_drag: drag.travelled > self.tuning.click_threshold_px,
        };
        log::debug!(
            "Drag released at {:.2} (travel {:.1}px, fling {:.3})",
            self.angle,
            release.travelled,
            self.velocity
        );
        Some(release)
    }

    /// Starts an eased transition along the short way to `desired_deg`.
    pub fn slide_to(&mut self, desired_deg: f64, now: Instant) {
        let start_angle = self.angle;
        let diff = shortest_diff(start_angle, desired_deg);
        if let Some(spin) = Spin::from_delta(diff) {
            self.spin = spin;
        }

        self.velocity = 0.0;
        self.resume_at = None;
        self.motion = Motion::Transitioning(Transition {
            start_angle,
            end_angle: start_angle + diff,
            started: now,
            duration: self.tuning.transition,
        });
        log::debug!(
            "Transition {:.2} -> {:.2} over {:?}",
            start_angle,
            normalize(desired_deg),
            self.tuning.transition
        );
    }

    /// Advances one tick and returns the angle to render, in `[0, 360)`.
    pub fn advance(&mut self, now: Instant) -> f64 {
        match self.motion {
            Motion::Transitioning(t) => {
                let progress = t.progress(now);
                let eased = ease_in_out_quad(progress);
                self.angle = t.start_angle + (t.end_angle - t.start_angle) * eased;
                if progress >= 1.0 {
                    self.angle = t.end_angle;
                    self.motion = Motion::Auto;
                    log::debug!("Transition settled at {:.2}", normalize(t.end_angle));
                }
            }
            Motion::Dragging(_) => {}
            Motion::Auto => {
                let mut step = self.velocity;
                self.velocity *= self.tuning.friction;
                if self.velocity.abs() < self.tuning.velocity_epsilon {
                    self.velocity = 0.0;
                }

                let resumed = match self.resume_at {
                    Some(at) if now < at => false,
                    Some(_) => {
                        self.resume_at = None;
                        true
                    }
                    None => true,
                };
                if resumed {
                    step += self.tuning.auto_speed * self.spin.sign();
                }
                self.angle += step;
            }
        }

        self.angle = normalize(self.angle);
        self.angle
    }
}

/// Quadratic ease-in-out on `[0, 1]`.
pub fn ease_in_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}
