pub const FULL_TURN: f64 = 360.0;
pub const HALF_TURN: f64 = 180.0;

/// Folds any angle into `[0, 360)`.
pub fn normalize(angle_deg: f64) -> f64 {
    let folded = angle_deg.rem_euclid(FULL_TURN);
    // tiny negative inputs round up to exactly 360.0
    if folded >= FULL_TURN { 0.0 } else { folded }
}

/// Minimal signed rotation taking `from_deg` onto `to_deg`, in `(-180, 180]`.
pub fn shortest_diff(from_deg: f64, to_deg: f64) -> f64 {
    let diff = ((normalize(to_deg) - normalize(from_deg) + 540.0) % FULL_TURN) - HALF_TURN;
    if diff <= -HALF_TURN { HALF_TURN } else { diff }
}

/// Distance in `[0, 180]` from a normalized angle to the facing direction (0°).
pub fn distance_to_facing(angle_deg: f64) -> f64 {
    let a = normalize(angle_deg);
    if a > HALF_TURN { FULL_TURN - a } else { a }
}

/// Angular slot width for a ring of `count` panels.
pub fn step(count: usize) -> f64 {
    FULL_TURN / count.max(1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_normalize_examples() {
        assert!(close(normalize(-30.0), 330.0));
        assert!(close(normalize(720.0), 0.0));
        assert!(close(normalize(360.0), 0.0));
        assert!(close(normalize(-360.0), 0.0));
        assert!(close(normalize(725.5), 5.5));
        assert!(close(normalize(-1085.0), 355.0));
    }

    #[test]
    fn test_normalize_stays_in_range() {
        let samples = [-1e9, -12345.678, -1e-12, -0.0, 0.0, 1e-12, 359.999_999, 1e7 + 0.25];
        for a in samples {
            let n = normalize(a);
            assert!((0.0..FULL_TURN).contains(&n), "normalize({a}) = {n}");
        }
    }

    #[test]
    fn test_shortest_diff_range_and_landing() {
        let mut a = -725.0;
        while a < 725.0 {
            let mut b = -725.0;
            while b < 725.0 {
                let d = shortest_diff(a, b);
                assert!(d > -HALF_TURN && d <= HALF_TURN, "shortest_diff({a}, {b}) = {d}");
                let landed = normalize(a + d);
                let target = normalize(b);
                let err = (landed - target).abs();
                assert!(err < 1e-9 || (FULL_TURN - err) < 1e-9, "{a} -> {b}");
                b += 37.5;
            }
            a += 41.0;
        }
    }

    #[test]
    fn test_shortest_diff_takes_short_way() {
        assert!(close(shortest_diff(350.0, 10.0), 20.0));
        assert!(close(shortest_diff(10.0, 350.0), -20.0));
        assert!(close(shortest_diff(0.0, 180.0), 180.0));
        assert!(close(shortest_diff(180.0, 0.0), 180.0));
        assert!(close(shortest_diff(-90.0, 270.0), 0.0));
    }

    #[test]
    fn test_distance_to_facing() {
        assert!(close(distance_to_facing(0.0), 0.0));
        assert!(close(distance_to_facing(90.0), 90.0));
        assert!(close(distance_to_facing(270.0), 90.0));
        assert!(close(distance_to_facing(-45.0), 45.0));
        assert!(close(distance_to_facing(180.0), 180.0));
    }
}
