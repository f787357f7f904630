//! Flattened rounded box: two rounded-rectangle faces joined by a thin band.

use crate::config::GeometryConfig;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::ops::Range;

/// Material slots addressed by [`Group::material`].
pub mod material {
    pub const EDGE: usize = 0;
    pub const FRONT: usize = 4;
    pub const BACK: usize = 5;
    /// Slots a panel binds: four edge materials plus the two images.
    pub const SLOTS: usize = 6;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Front,
    Back,
}

impl Face {
    pub fn side(self) -> f64 {
        match self {
            Face::Front => 1.0,
            Face::Back => -1.0,
        }
    }

    pub fn material(self) -> usize {
        match self {
            Face::Front => material::FRONT,
            Face::Back => material::BACK,
        }
    }
}

/// A contiguous run of the index buffer drawn with one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group {
    /// Offset into the index buffer.
    pub start: usize,
    /// Number of indices (a multiple of three).
    pub count: usize,
    pub material: usize,
}

impl Group {
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.count
    }
}

#[derive(Debug, Clone)]
pub struct Geometry {
    pub positions: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub groups: Vec<Group>,
    rim_len: usize,
    width: f64,
    height: f64,
    depth: f64,
}

impl Geometry {
    /// Vertex 0 is the front centre, then the front rim, the back centre and the
    /// back rim in the same xy order. The band reuses the rim vertices.
    pub fn from_config(cfg: &GeometryConfig) -> Self {
        Self::build(
            cfg.width,
            cfg.height,
            cfg.depth,
            cfg.corner_radius,
            cfg.corner_segments,
        )
    }

    /// Builds the mesh. `radius < min(width, height) / 2` and `segments >= 1`
    /// are the caller's responsibility; see [`GeometryConfig::validate`].
    pub fn build(width: f64, height: f64, depth: f64, radius: f64, segments: u32) -> Self {
        let rim_len = (segments as usize + 1) * 4;
        let mut builder = Builder {
            positions: Vec::with_capacity(2 * rim_len + 2),
            uvs: Vec::with_capacity(2 * rim_len + 2),
            indices: Vec::with_capacity(rim_len * 12),
            groups: Vec::with_capacity(3),
        };

        let rim = rim_outline(width, height, radius, rim_len);

        let front = builder.face(&rim, width, height, depth, Face::Front);
        let back = builder.face(&rim, width, height, depth, Face::Back);
        builder.frame(front, back, rim_len);

        let normals = vertex_normals(&builder.positions, &builder.indices);

        Self {
            positions: builder.positions,
            uvs: builder.uvs,
            normals,
            indices: builder.indices,
            groups: builder.groups,
            rim_len,
            width,
            height,
            depth,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn rim_len(&self) -> usize {
        self.rim_len
    }

    pub fn size(&self) -> (f64, f64, f64) {
        (self.width, self.height, self.depth)
    }

    pub fn group(&self, material: usize) -> Option<&Group> {
        self.groups.iter().find(|g| g.material == material)
    }

    pub fn center_vertex(&self, face: Face) -> usize {
        match face {
            Face::Front => 0,
            Face::Back => self.rim_len + 1,
        }
    }

    /// Vertex indices of a face outline, in rim order.
    pub fn rim(&self, face: Face) -> Range<usize> {
        let first = self.center_vertex(face) + 1;
        first..first + self.rim_len
    }

    /// Triangles of one group as vertex index triples.
    pub fn triangles(&self, group: &Group) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices[group.range()]
            .chunks_exact(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
    }
}

struct Builder {
    positions: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    indices: Vec<u32>,
    groups: Vec<Group>,
}

impl Builder {
    /// Pushes one fan and returns the index of its first rim vertex.
    fn face(&mut self, rim: &[[f64; 2]], width: f64, height: f64, depth: f64, face: Face) -> u32 {
        let side = face.side();
        let z = (side * depth / 2.0) as f32;

        let center = self.positions.len() as u32;
        self.positions.push([0.0, 0.0, z]);
        self.uvs.push([0.5, 0.5]);

        for &[x, y] in rim {
            self.positions.push([x as f32, y as f32, z]);
            let u = (x + width / 2.0) / width;
            let v = (y + height / 2.0) / height;
            // back face is seen from behind, so its image is mirrored in U
            let u = if side > 0.0 { u } else { 1.0 - u };
            self.uvs.push([u as f32, v as f32]);
        }

        let first = center + 1;
        let n = rim.len() as u32;
        let start = self.indices.len();
        for j in 0..n {
            let a = first + j;
            let b = first + (j + 1) % n;
            if side > 0.0 {
                self.indices.extend_from_slice(&[center, a, b]);
            } else {
                self.indices.extend_from_slice(&[center, b, a]);
            }
        }
        self.groups.push(Group {
            start,
            count: self.indices.len() - start,
            material: face.material(),
        });

        first
    }

    fn frame(&mut self, front: u32, back: u32, rim_len: usize) {
        let n = rim_len as u32;
        let start = self.indices.len();
        for j in 0..n {
            let next = (j + 1) % n;
            let (f0, f1) = (front + j, front + next);
            let (b0, b1) = (back + j, back + next);
            self.indices.extend_from_slice(&[f0, b0, f1, f1, b0, b1]);
        }
        self.groups.push(Group {
            start,
            count: self.indices.len() - start,
            material: material::EDGE,
        });
    }
}

/// Rim points of a rounded rectangle centred on the origin.
///
/// `rim_len` is `(segments + 1) * 4`; every quadrant gets `segments + 1`
/// points on its quarter arc.
fn rim_outline(width: f64, height: f64, radius: f64, rim_len: usize) -> Vec<[f64; 2]> {
    let per_corner = rim_len / 4;
    let arc_steps = (rim_len - 4) as f64;
    let (hx, hy) = (width / 2.0 - radius, height / 2.0 - radius);

    (0..rim_len)
        .map(|j| {
            let qu = j / per_corner + 1;
            let (cx, cy) = match qu {
                1 => (hx, hy),
                2 => (-hx, hy),
                3 => (-hx, -hy),
                _ => (hx, -hy),
            };
            let theta = if arc_steps > 0.0 {
                TAU * (j + 1 - qu) as f64 / arc_steps
            } else {
                (qu - 1) as f64 * FRAC_PI_2
            };
            [cx + radius * theta.cos(), cy + radius * theta.sin()]
        })
        .collect()
}

/// Area-weighted vertex normals from the final triangle list.
pub fn vertex_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut acc = vec![[0.0f64; 3]; positions.len()];

    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let n = face_normal(positions[a], positions[b], positions[c]);
        for i in [a, b, c] {
            acc[i][0] += n[0];
            acc[i][1] += n[1];
            acc[i][2] += n[2];
        }
    }

    acc.into_iter()
        .map(|[x, y, z]| {
            let len = (x * x + y * y + z * z).sqrt();
            if len > f64::EPSILON {
                [(x / len) as f32, (y / len) as f32, (z / len) as f32]
            } else {
                [0.0, 0.0, 0.0]
            }
        })
        .collect()
}

/// Unnormalised normal; its length is twice the triangle area.
fn face_normal(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> [f64; 3] {
    let u = [
        (b[0] - a[0]) as f64,
        (b[1] - a[1]) as f64,
        (b[2] - a[2]) as f64,
    ];
    let v = [
        (c[0] - a[0]) as f64,
        (c[1] - a[1]) as f64,
        (c[2] - a[2]) as f64,
    ];
    [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Geometry {
        Geometry::build(356.0, 210.0, 10.0, 5.0, 8)
    }

    #[test]
    fn test_counts() {
        let g = sample();
        let n = (8 + 1) * 4;
        assert_eq!(g.rim_len(), n);
        assert_eq!(g.vertex_count(), 2 * n + 2);
        assert_eq!(g.uvs.len(), g.vertex_count());
        assert_eq!(g.normals.len(), g.vertex_count());
        // two fans plus two triangles per band quad
        assert_eq!(g.triangle_count(), 4 * n);
    }

    #[test]
    fn test_indices_in_bounds_and_groups_partition_buffer() {
        for &(w, h, r, s) in &[
            (356.0, 210.0, 5.0, 8),
            (10.0, 4.0, 1.99, 1),
            (1.0, 1.0, 0.49, 32),
            (50.0, 80.0, 0.1, 3),
        ] {
            let g = Geometry::build(w, h, 2.0, r, s);
            let len = g.vertex_count() as u32;
            assert!(g.indices.iter().all(|&i| i < len));
            assert_eq!(g.indices.len() % 3, 0);

            let mut groups = g.groups.clone();
            groups.sort_by_key(|grp| grp.start);
            let mut cursor = 0;
            for grp in &groups {
                assert_eq!(grp.start, cursor, "groups must be contiguous and disjoint");
                assert_eq!(grp.count % 3, 0);
                cursor += grp.count;
            }
            assert_eq!(cursor, g.indices.len());
        }
    }

    #[test]
    fn test_group_materials() {
        let g = sample();
        let n = g.rim_len();
        assert_eq!(g.group(material::FRONT).map(|x| x.count), Some(3 * n));
        assert_eq!(g.group(material::BACK).map(|x| x.count), Some(3 * n));
        assert_eq!(g.group(material::EDGE).map(|x| x.count), Some(6 * n));
        assert_eq!(g.groups.len(), 3);
    }

    #[test]
    fn test_rim_points_lie_on_corner_arcs() {
        let (w, h, r) = (40.0, 20.0, 4.0);
        let g = Geometry::build(w, h, 2.0, r, 6);
        let (hx, hy) = (w / 2.0 - r, h / 2.0 - r);
        for i in g.rim(Face::Front) {
            let [x, y, z] = g.positions[i];
            let (x, y) = (x as f64, y as f64);
            assert!((z as f64 - 1.0).abs() < 1e-6);
            assert!(x.abs() <= w / 2.0 + 1e-4 && y.abs() <= h / 2.0 + 1e-4);
            let (cx, cy) = (hx.copysign(x), hy.copysign(y));
            let dist = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
            assert!((dist - r).abs() < 1e-3, "rim point ({x}, {y}) off its arc");
        }
    }

    #[test]
    fn test_back_uvs_mirror_front() {
        let g = sample();
        for (f, b) in g.rim(Face::Front).zip(g.rim(Face::Back)) {
            let (uf, ub) = (g.uvs[f], g.uvs[b]);
            assert!((uf[0] + ub[0] - 1.0).abs() < 1e-6);
            assert!((uf[1] - ub[1]).abs() < 1e-6);
            assert!((0.0..=1.0).contains(&uf[0]) && (0.0..=1.0).contains(&uf[1]));
        }
        assert_eq!(g.uvs[g.center_vertex(Face::Front)], [0.5, 0.5]);
        assert_eq!(g.uvs[g.center_vertex(Face::Back)], [0.5, 0.5]);
    }

    #[test]
    fn test_faces_point_outward() {
        let g = sample();
        assert_eq!(g.normals[g.center_vertex(Face::Front)], [0.0, 0.0, 1.0]);
        assert_eq!(g.normals[g.center_vertex(Face::Back)], [0.0, 0.0, -1.0]);

        let edge = *g.group(material::EDGE).unwrap();
        for [a, b, c] in g.triangles(&edge) {
            let n = face_normal(g.positions[a], g.positions[b], g.positions[c]);
            let p = g.positions[a];
            let outward = n[0] * p[0] as f64 + n[1] * p[1] as f64;
            assert!(outward > 0.0, "band triangle faces inward");
            assert!(n[2].abs() < 1e-6);
        }
    }

    #[test]
    fn test_single_segment_corners() {
        let g = Geometry::build(10.0, 6.0, 1.0, 1.0, 1);
        assert_eq!(g.rim_len(), 8);
        let first = g.rim(Face::Front).start;
        // quadrant one starts at angle 0 on the right edge
        assert_eq!(g.positions[first][0], 5.0);
        assert!((g.positions[first][1] - 2.0).abs() < 1e-6);
    }
}
