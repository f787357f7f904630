use crate::angle::distance_to_facing;
use crate::config::CarouselConfig;
use crate::panel::Panel;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpacityRange {
    pub min: f64,
    pub max: f64,
}

impl OpacityRange {
    pub fn from_config(cfg: &CarouselConfig) -> Self {
        Self {
            min: cfg.min_opacity,
            max: cfg.max_opacity,
        }
    }

    pub fn at_distance(&self, distance_deg: f64) -> f64 {
        (self.max - distance_deg / 180.0).max(self.min)
    }
}

impl Default for OpacityRange {
    fn default() -> Self {
        Self { min: 0.4, max: 0.9 }
    }
}

/// Opacity of a panel at `angular_offset` when the ring sits at `angle_deg`.
pub fn front_opacity(angular_offset: f64, angle_deg: f64, range: OpacityRange) -> f64 {
    range.at_distance(distance_to_facing(angular_offset + angle_deg))
}

/// Rewrites every panel's front opacity for the given ring angle.
pub fn update<T>(panels: &mut [Panel<T>], angle_deg: f64, range: OpacityRange) {
    for panel in panels.iter_mut() {
        panel.front_opacity = front_opacity(panel.angular_offset, angle_deg, range);
    }
}
