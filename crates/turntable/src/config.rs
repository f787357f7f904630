use crate::error::CarouselError;
use crate::rotation::Spin;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub corner_radius: f64,
    pub corner_segments: u32,
    /// Gap between neighbouring cards along the ring.
    pub spacing: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            width: 356.0,
            height: 210.0,
            depth: 10.0,
            corner_radius: 5.0,
            corner_segments: 8,
            spacing: 10.0,
        }
    }
}

impl GeometryConfig {
    pub fn validate(&self) -> Result<(), CarouselError> {
        let dims = [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
            ("corner_radius", self.corner_radius),
        ];
        if let Some((name, value)) = dims.iter().find(|(_, v)| !v.is_finite() || *v <= 0.0) {
            return Err(CarouselError::InvalidGeometry(format!(
                "{name} must be positive, got {value}"
            )));
        }
        if self.corner_radius >= self.width.min(self.height) / 2.0 {
            return Err(CarouselError::InvalidGeometry(format!(
                "corner_radius {} must be below half of min(width, height)",
                self.corner_radius
            )));
        }
        if self.corner_segments == 0 {
            return Err(CarouselError::InvalidGeometry(
                "corner_segments must be at least 1".to_string(),
            ));
        }
        if !self.spacing.is_finite() || self.spacing < 0.0 {
            return Err(CarouselError::InvalidGeometry(format!(
                "spacing must not be negative, got {}",
                self.spacing
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Degrees added per tick while auto-rotating.
    pub auto_speed: f64,
    pub spin: Spin,
    /// Degrees per pixel of horizontal drag.
    pub drag_speed: f64,
    /// Upper bound on the angle applied by one drag sample.
    pub max_drag_step: f64,
    pub drag_threshold_px: f64,
    /// Accumulated drag distance above which a release is not a click.
    pub click_threshold_px: f64,
    /// Per-tick multiplier applied to residual drag velocity.
    pub friction: f64,
    pub velocity_epsilon: f64,
    pub resume_delay_ms: u64,
    pub transition_ms: u64,
    pub facing_offset: f64,
    pub pressed_scale: f64,
    pub scale_easing: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
    pub edge_opacity: f64,
    pub geometry: GeometryConfig,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            auto_speed: 0.06,
            spin: Spin::Forward,
            drag_speed: 0.25,
            max_drag_step: 5.0,
            drag_threshold_px: 1.0,
            click_threshold_px: 5.0,
            friction: 0.92,
            velocity_epsilon: 1e-3,
            resume_delay_ms: 1000,
            transition_ms: 600,
            facing_offset: -90.0,
            pressed_scale: 0.95,
            scale_easing: 0.2,
            min_opacity: 0.4,
            max_opacity: 0.9,
            edge_opacity: 0.2,
            geometry: GeometryConfig::default(),
        }
    }
}

impl CarouselConfig {
    pub fn resume_delay(&self) -> Duration {
        Duration::from_millis(self.resume_delay_ms)
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn validate(&self) -> Result<(), CarouselError> {
        self.geometry.validate()?;

        let invalid = |msg: String| Err(CarouselError::InvalidConfig(msg));
        if !(0.0..1.0).contains(&self.friction) {
            return invalid(format!("friction must be in [0, 1), got {}", self.friction));
        }
        if !(self.scale_easing > 0.0 && self.scale_easing <= 1.0) {
            return invalid(format!(
                "scale_easing must be in (0, 1], got {}",
                self.scale_easing
            ));
        }
        if !(self.pressed_scale > 0.0 && self.pressed_scale.is_finite()) {
            return invalid(format!(
                "pressed_scale must be positive, got {}",
                self.pressed_scale
            ));
        }
        if !(0.0..=1.0).contains(&self.min_opacity)
            || !(0.0..=1.0).contains(&self.max_opacity)
            || self.min_opacity > self.max_opacity
        {
            return invalid(format!(
                "opacity bounds must satisfy 0 <= min <= max <= 1, got {}..{}",
                self.min_opacity, self.max_opacity
            ));
        }
        if self.max_drag_step < 0.0 || self.drag_threshold_px < 0.0 {
            return invalid("drag limits must not be negative".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(CarouselConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let json = r#"{ "auto_speed": 0.5, "spin": "ccw", "geometry": { "width": 200.0 } }"#;
        let cfg: CarouselConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.auto_speed, 0.5);
        assert_eq!(cfg.spin, Spin::Backward);
        assert_eq!(cfg.geometry.width, 200.0);
        assert_eq!(cfg.geometry.height, 210.0);
        assert_eq!(cfg.facing_offset, -90.0);
    }

    #[test]
    fn test_oversized_corner_radius_rejected() {
        let geometry = GeometryConfig {
            corner_radius: 105.0,
            ..GeometryConfig::default()
        };
        assert!(matches!(
            geometry.validate(),
            Err(CarouselError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_zero_segments_rejected() {
        let geometry = GeometryConfig {
            corner_segments: 0,
            ..GeometryConfig::default()
        };
        assert!(geometry.validate().is_err());
    }

    #[test]
    fn test_bad_friction_rejected() {
        let cfg = CarouselConfig {
            friction: 1.0,
            ..CarouselConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(CarouselError::InvalidConfig(_))));
    }
}
