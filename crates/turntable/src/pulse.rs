use crate::config::CarouselConfig;

const SNAP: f64 = 1e-4;

#[derive(Debug, Clone)]
pub struct ScalePulse {
    current: f64,
    target: f64,
    pressed: f64,
    rate: f64,
}

impl ScalePulse {
    pub fn new(cfg: &CarouselConfig) -> Self {
        Self {
            current: 1.0,
            target: 1.0,
            pressed: cfg.pressed_scale,
            rate: cfg.scale_easing.clamp(f64::EPSILON, 1.0),
        }
    }

    pub fn scale(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn press(&mut self) {
        self.target = self.pressed;
    }

    pub fn release(&mut self) {
        self.target = 1.0;
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Exponential approach toward the target. With a rate in `(0, 1]` each
    /// step covers a fraction of the remaining gap, so it never overshoots.
    pub fn advance(&mut self) -> f64 {
        let gap = self.target - self.current;
        if gap.abs() <= SNAP {
            self.current = self.target;
        } else {
            self.current += gap * self.rate;
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pulse() -> ScalePulse {
        ScalePulse::new(&CarouselConfig {
            pressed_scale: 0.9,
            scale_easing: 0.3,
            ..CarouselConfig::default()
        })
    }

    #[test]
    fn test_press_converges_monotonically() {
        let mut p = pulse();
        p.press();
        let mut prev = p.scale();
        for _ in 0..200 {
            let s = p.advance();
            assert!(s <= prev, "scale must only shrink while pressed");
            assert!((0.9..=1.0).contains(&s));
            prev = s;
        }
        assert!(p.is_settled());
        assert_eq!(p.scale(), 0.9);
    }

    #[test]
    fn test_release_springs_back_without_overshoot() {
        let mut p = pulse();
        p.press();
        for _ in 0..5 {
            p.advance();
        }
        p.release();
        let mut prev = p.scale();
        for _ in 0..200 {
            let s = p.advance();
            assert!(s >= prev && s <= 1.0);
            prev = s;
        }
        assert_eq!(p.scale(), 1.0);
    }

    #[test]
    fn test_full_rate_jumps_straight_to_target() {
        let mut p = ScalePulse::new(&CarouselConfig {
            pressed_scale: 0.8,
            scale_easing: 1.0,
            ..CarouselConfig::default()
        });
        p.press();
        assert_eq!(p.advance(), 0.8);
    }

    #[test]
    fn test_idle_pulse_stays_at_one() {
        let mut p = pulse();
        assert_eq!(p.advance(), 1.0);
        assert!(p.is_settled());
    }
}
