use crate::angle::step;
use crate::geometry::material;

/// Front and back images of one card. `back` is already mirrored.
#[derive(Debug, Clone, PartialEq)]
pub struct FacePair<T> {
    pub front: T,
    pub back: T,
}

impl<T> FacePair<T> {
    pub fn new(front: T, back: T) -> Self {
        Self { front, back }
    }
}

/// One card of the ring.
#[derive(Debug, Clone)]
pub struct Panel<T> {
    pub index: usize,
    /// `index * 360 / count`, fixed for the panel's lifetime.
    pub angular_offset: f64,
    pub faces: FacePair<T>,
    /// Written by the style pass every tick.
    pub front_opacity: f64,
    pub back_opacity: f64,
    pub edge_opacity: f64,
}

impl<T> Panel<T> {
    pub fn new(index: usize, count: usize, faces: FacePair<T>) -> Self {
        Self {
            index,
            angular_offset: index as f64 * step(count),
            faces,
            front_opacity: 1.0,
            back_opacity: 1.0,
            edge_opacity: 1.0,
        }
    }

    pub fn with_opacities(mut self, back: f64, edge: f64) -> Self {
        self.back_opacity = back;
        self.edge_opacity = edge;
        self
    }

    /// Opacity of a material slot; slots below the image slots are edges.
    pub fn opacity(&self, slot: usize) -> f64 {
        match slot {
            material::FRONT => self.front_opacity,
            material::BACK => self.back_opacity,
            _ => self.edge_opacity,
        }
    }

    /// Image bound to a material slot, if the slot carries one.
    pub fn texture(&self, slot: usize) -> Option<&T> {
        match slot {
            material::FRONT => Some(&self.faces.front),
            material::BACK => Some(&self.faces.back),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_follow_index() {
        let panels: Vec<_> = (0..8)
            .map(|i| Panel::new(i, 8, FacePair::new(i, i)))
            .collect();
        assert_eq!(panels[0].angular_offset, 0.0);
        assert_eq!(panels[3].angular_offset, 135.0);
        assert_eq!(panels[7].angular_offset, 315.0);
    }

    #[test]
    fn test_material_slots() {
        let mut panel = Panel::new(0, 4, FacePair::new("front", "back")).with_opacities(0.9, 0.2);
        panel.front_opacity = 0.5;
        assert_eq!(panel.opacity(material::FRONT), 0.5);
        assert_eq!(panel.opacity(material::BACK), 0.9);
        for slot in 0..4 {
            assert_eq!(panel.opacity(slot), 0.2);
            assert_eq!(panel.texture(slot), None);
        }
        assert_eq!(panel.texture(material::FRONT), Some(&"front"));
        assert_eq!(panel.texture(material::BACK), Some(&"back"));
    }
}
