//! Cube geometry: corners, faces, visibility and UV-mapped quads

use glam::{Vec2, Vec3};

use super::camera::{Camera, Projected};

/// One face of an axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    /// -z, toward a chase camera
    Front,
    /// +z
    Back,
    /// -x
    Left,
    /// +x
    Right,
    /// +y
    Top,
    /// -y
    Bottom,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
        Face::Top,
        Face::Bottom,
    ];

    /// Corner indices in UV order: (0,0), (1,0), (1,1), (0,1) as seen from outside
    ///
    /// Corner `i` has bit 0 = +x, bit 1 = +y, bit 2 = +z.
    pub const fn corner_indices(self) -> [usize; 4] {
        match self {
            Face::Front => [2, 3, 1, 0],
            Face::Back => [7, 6, 4, 5],
            Face::Left => [6, 2, 0, 4],
            Face::Right => [3, 7, 5, 1],
            Face::Top => [6, 7, 3, 2],
            Face::Bottom => [0, 1, 5, 4],
        }
    }
}

/// The eight corners of a box
pub fn cube_corners(center: Vec3, half: Vec3) -> [Vec3; 8] {
    std::array::from_fn(|i| {
        let sx = if i & 1 != 0 { 1.0 } else { -1.0 };
        let sy = if i & 2 != 0 { 1.0 } else { -1.0 };
        let sz = if i & 4 != 0 { 1.0 } else { -1.0 };
        center + half * Vec3::new(sx, sy, sz)
    })
}

/// Faces of an axis-aligned cube a camera at `eye` can see
///
/// Valid for unrotated boxes only; a face is visible when the eye lies on its
/// outer side along that face's axis.
pub fn visible_faces(center: Vec3, half: Vec3, eye: Vec3) -> Vec<Face> {
    let mut faces = Vec::with_capacity(3);
    if eye.z < center.z - half.z {
        faces.push(Face::Front);
    } else if eye.z > center.z + half.z {
        faces.push(Face::Back);
    }
    if eye.x < center.x - half.x {
        faces.push(Face::Left);
    } else if eye.x > center.x + half.x {
        faces.push(Face::Right);
    }
    if eye.y > center.y + half.y {
        faces.push(Face::Top);
    } else if eye.y < center.y - half.y {
        faces.push(Face::Bottom);
    }
    faces
}

/// Projected corners of a box; `None` entries are behind the view plane
pub fn project_corners(camera: &Camera, corners: &[Vec3; 8]) -> [Option<Projected>; 8] {
    std::array::from_fn(|i| camera.project(corners[i]))
}

/// A projected face, corners in UV order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad(pub [Vec2; 4]);

impl Quad {
    /// Build a face quad; `None` if any of its corners is behind the camera
    pub fn from_face(projected: &[Option<Projected>; 8], face: Face) -> Option<Quad> {
        let idx = face.corner_indices();
        let mut points = [Vec2::ZERO; 4];
        for (slot, &i) in points.iter_mut().zip(idx.iter()) {
            *slot = projected[i]?.screen();
        }
        Some(Quad(points))
    }

    /// Bilinear map of a unit-square UV onto the quad
    pub fn uv(&self, u: f32, v: f32) -> Vec2 {
        let [p00, p10, p11, p01] = self.0;
        let top = p00.lerp(p10, u);
        let bottom = p01.lerp(p11, u);
        top.lerp(bottom, v)
    }

    /// Sub-rectangle of the face in UV space
    pub fn sub(&self, u0: f32, v0: f32, u1: f32, v1: f32) -> Quad {
        Quad([
            self.uv(u0, v0),
            self.uv(u1, v0),
            self.uv(u1, v1),
            self.uv(u0, v1),
        ])
    }

    /// Twice the signed screen-space area; positive when facing the viewer
    pub fn signed_area(&self) -> f32 {
        let p = &self.0;
        (0..4)
            .map(|i| {
                let a = p[i];
                let b = p[(i + 1) % 4];
                a.perp_dot(b)
            })
            .sum()
    }

    pub fn is_front_facing(&self) -> bool {
        self.signed_area() > 0.0
    }

    pub fn center(&self) -> Vec2 {
        self.uv(0.5, 0.5)
    }

    pub fn points(&self) -> &[Vec2] {
        &self.0
    }
}
