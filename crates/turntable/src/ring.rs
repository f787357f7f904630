//! Ring layout and the screen-space view of it.

use crate::angle::step;
use crate::geometry::{Face, Geometry, material};
use crate::input::Point;
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Downward tilt in degrees.
    pub pitch: f64,
    /// World units to pixels.
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pitch: 12.0,
            zoom: 1.0,
        }
    }
}

/// Radius at which `count` cards of `width` with `spacing` gaps close a ring.
pub fn ring_radius(count: usize, width: f64, spacing: f64) -> f64 {
    if count < 2 {
        return 0.0;
    }
    let chord = width + spacing;
    chord / (2.0 * (PI / count as f64).sin())
}

#[derive(Debug, Clone, Copy)]
pub struct ProjectedVertex {
    pub screen: [f64; 2],
    /// Larger is closer to the viewer.
    pub depth: f64,
}

/// One panel of the ring, projected.
#[derive(Debug, Clone)]
pub struct PanelView {
    pub index: usize,
    pub vertices: Vec<ProjectedVertex>,
    /// Depth of the panel centre, for back to front ordering.
    pub depth: f64,
    /// Whether the front face points toward the viewer.
    pub front_visible: bool,
}

impl PanelView {
    pub fn outline(&self, geometry: &Geometry, face: Face) -> Vec<[f64; 2]> {
        geometry
            .rim(face)
            .map(|i| self.vertices[i].screen)
            .collect()
    }

    /// Screen positions of the face centre and the two in-plane axes,
    /// i.e. where model `(0,0)`, `(1,0)` and `(0,1)` of that face land.
    pub fn face_frame(&self, geometry: &Geometry, face: Face, ring: &RingView) -> [[f64; 2]; 3] {
        let c = self.vertices[geometry.center_vertex(face)].screen;
        let z = face.side() * geometry.size().2 / 2.0;
        let ex = ring.project_model(self.index, [1.0, 0.0, z]);
        let ey = ring.project_model(self.index, [0.0, 1.0, z]);
        [c, ex.screen, ey.screen]
    }

    pub fn contains(&self, geometry: &Geometry, point: Point) -> bool {
        let visible = if self.front_visible {
            Face::Front
        } else {
            Face::Back
        };
        let group = match geometry.group(visible.material()) {
            Some(g) => *g,
            None => return false,
        };
        geometry.triangles(&group).any(|[a, b, c]| {
            point_in_triangle(
                [point.x, point.y],
                self.vertices[a].screen,
                self.vertices[b].screen,
                self.vertices[c].screen,
            )
        })
    }
}

/// The ring at one instant: angle, scale and camera resolved into transforms.
#[derive(Debug, Clone)]
pub struct RingView {
    pub count: usize,
    pub radius: f64,
    pub angle: f64,
    pub scale: f64,
    pub camera: Camera,
    pub viewport: Viewport,
}

impl RingView {
    /// Ring angle of panel `index`, in radians.
    fn slot_angle(&self, index: usize) -> f64 {
        (index as f64 * step(self.count) + self.angle).to_radians()
    }

    /// World position of a model-space point of panel `index`.
    ///
    /// Model space: x across the card, y up, z out of the front face. The
    /// front face points away from the ring axis.
    pub fn world(&self, index: usize, p: [f64; 3]) -> [f64; 3] {
        let phi = self.slot_angle(index);
        let (s, c) = phi.sin_cos();
        let r = self.radius + p[2];
        [
            (r * s + p[0] * c) * self.scale,
            p[1] * self.scale,
            (r * c - p[0] * s) * self.scale,
        ]
    }

    pub fn project_world(&self, w: [f64; 3]) -> ProjectedVertex {
        let (sp, cp) = self.camera.pitch.to_radians().sin_cos();
        // tilt about x: looking slightly down on the ring
        let y = w[1] * cp - w[2] * sp;
        let depth = w[1] * sp + w[2] * cp;
        let zoom = self.camera.zoom;
        ProjectedVertex {
            screen: [
                self.viewport.width / 2.0 + w[0] * zoom,
                self.viewport.height / 2.0 - y * zoom,
            ],
            depth,
        }
    }

    pub fn project_model(&self, index: usize, p: [f64; 3]) -> ProjectedVertex {
        self.project_world(self.world(index, p))
    }

    pub fn panel(&self, index: usize, geometry: &Geometry) -> PanelView {
        let vertices = geometry
            .positions
            .iter()
            .map(|p| self.project_model(index, [p[0] as f64, p[1] as f64, p[2] as f64]))
            .collect();
        let center = self.project_model(index, [0.0, 0.0, 0.0]);
        let front = self.project_model(index, [0.0, 0.0, 1.0]);
        PanelView {
            index,
            vertices,
            depth: center.depth,
            front_visible: front.depth > center.depth,
        }
    }

    /// All panels ordered back to front.
    pub fn panels(&self, geometry: &Geometry) -> Vec<PanelView> {
        let mut views: Vec<_> = (0..self.count).map(|i| self.panel(i, geometry)).collect();
        views.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        views
    }

    /// Front-most panel under `point`.
    pub fn pick(&self, geometry: &Geometry, point: Point) -> Option<usize> {
        self.panels(geometry)
            .iter()
            .rev()
            .find(|view| view.contains(geometry, point))
            .map(|view| view.index)
    }
}

/// Edge-function containment test, either winding.
pub fn point_in_triangle(p: [f64; 2], a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> bool {
    let edge = |u: [f64; 2], v: [f64; 2]| (p[0] - u[0]) * (v[1] - u[1]) - (p[1] - u[1]) * (v[0] - u[0]);
    let (d0, d1, d2) = (edge(a, b), edge(b, c), edge(c, a));
    let has_neg = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
    let has_pos = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
    !(has_neg && has_pos)
}

/// Material slot drawn for the visible image face of a panel.
pub fn visible_image_slot(view: &PanelView) -> usize {
    if view.front_visible {
        material::FRONT
    } else {
        material::BACK
    }
}
