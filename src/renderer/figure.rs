//! Six-box humanoid figures with a procedural run cycle
//!
//! Each limb is an independent rigid box: built from its own half extents,
//! swung about the lateral axis around its joint, then moved to its slot on
//! the body. There is no skeleton hierarchy.

use glam::{Mat3, Vec2, Vec3};

use super::camera::{Camera, apply_fog};
use super::color::Color;
use super::cube::{Face, Quad, cube_corners, project_corners};
use super::surface::Surface;

/// Radians per second of the run cycle
pub const RUN_FREQUENCY: f32 = 10.0;
/// Peak limb swing (radians)
pub const LEG_SWING: f32 = 0.7;
pub const ARM_SWING: f32 = 0.6;
/// Vertical bob while running on the ground
pub const BOB_HEIGHT: f32 = 0.05;

const LEG_HALF: Vec3 = Vec3::new(0.07, 0.175, 0.07);
const TORSO_HALF: Vec3 = Vec3::new(0.15, 0.18, 0.08);
const HEAD_HALF: Vec3 = Vec3::new(0.12, 0.12, 0.12);
const ARM_HALF: Vec3 = Vec3::new(0.06, 0.165, 0.06);

const HIP_HEIGHT: f32 = 0.35;
const SHOULDER_HEIGHT: f32 = 0.7;
const NECK_HEIGHT: f32 = 0.71;
/// Arms splay outward slightly
const ARM_SPLAY: f32 = 0.08;

/// Colors for one figure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureColors {
    pub skin: Color,
    pub hair: Color,
    pub shirt: Color,
    pub pants: Color,
    pub eyes: Color,
}

impl FigureColors {
    pub const PLAYER: FigureColors = FigureColors {
        skin: Color::rgb(0.78, 0.58, 0.45),
        hair: Color::rgb(0.27, 0.18, 0.1),
        shirt: Color::rgb(0.0, 0.68, 0.68),
        pants: Color::rgb(0.25, 0.22, 0.6),
        eyes: Color::rgb(0.3, 0.2, 0.55),
    };

    pub const COMPANION: FigureColors = FigureColors {
        skin: Color::rgb(0.8, 0.62, 0.5),
        hair: Color::rgb(0.85, 0.7, 0.3),
        shirt: Color::rgb(0.8, 0.25, 0.25),
        pants: Color::rgb(0.2, 0.2, 0.22),
        eyes: Color::rgb(0.1, 0.4, 0.2),
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    LeftLeg,
    RightLeg,
    Torso,
    Head,
    LeftArm,
    RightArm,
}

/// One rigid box of a figure, in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyBox {
    pub part: Part,
    pub half: Vec3,
    /// Joint position in world space
    pub joint: Vec3,
    /// Box center relative to the joint before rotation
    pub offset: Vec3,
    pub rotation: Mat3,
    pub color: Color,
}

impl BodyBox {
    pub fn corners(&self) -> [Vec3; 8] {
        let local = cube_corners(self.offset, self.half);
        local.map(|c| self.joint + self.rotation * c)
    }

    pub fn center(&self) -> Vec3 {
        self.joint + self.rotation * self.offset
    }
}

/// Limb swing angle at `time_s`
#[inline]
pub fn gait_phase(time_s: f32) -> f32 {
    (time_s * RUN_FREQUENCY).sin()
}

/// Body bob, zero while airborne so the run cycle keeps going mid-jump
#[inline]
pub fn bob_offset(time_s: f32, airborne: bool) -> f32 {
    if airborne {
        0.0
    } else {
        gait_phase(time_s).abs() * BOB_HEIGHT
    }
}

/// Lay out the six boxes for a figure whose feet are at `root`
pub fn pose(root: Vec3, time_s: f32, airborne: bool, colors: &FigureColors) -> [BodyBox; 6] {
    let swing = gait_phase(time_s);
    let base = root + Vec3::Y * bob_offset(time_s, airborne);
    let leg_x = LEG_HALF.x;
    let arm_x = TORSO_HALF.x + ARM_HALF.x;
    let hang = |half: Vec3| Vec3::new(0.0, -half.y, 0.0);

    [
        BodyBox {
            part: Part::LeftLeg,
            half: LEG_HALF,
            joint: base + Vec3::new(-leg_x, HIP_HEIGHT, 0.0),
            offset: hang(LEG_HALF),
            rotation: Mat3::from_rotation_x(swing * LEG_SWING),
            color: colors.pants,
        },
        BodyBox {
            part: Part::RightLeg,
            half: LEG_HALF,
            joint: base + Vec3::new(leg_x, HIP_HEIGHT, 0.0),
            offset: hang(LEG_HALF),
            rotation: Mat3::from_rotation_x(-swing * LEG_SWING),
            color: colors.pants,
        },
        BodyBox {
            part: Part::Torso,
            half: TORSO_HALF,
            joint: base + Vec3::new(0.0, HIP_HEIGHT + TORSO_HALF.y, 0.0),
            offset: Vec3::ZERO,
            rotation: Mat3::IDENTITY,
            color: colors.shirt,
        },
        BodyBox {
            part: Part::Head,
            half: HEAD_HALF,
            joint: base + Vec3::new(0.0, NECK_HEIGHT, 0.0),
            offset: Vec3::new(0.0, HEAD_HALF.y, 0.0),
            rotation: Mat3::IDENTITY,
            color: colors.skin,
        },
        BodyBox {
            part: Part::LeftArm,
            half: ARM_HALF,
            joint: base + Vec3::new(-arm_x, SHOULDER_HEIGHT, 0.0),
            offset: hang(ARM_HALF),
            rotation: Mat3::from_rotation_z(-ARM_SPLAY) * Mat3::from_rotation_x(-swing * ARM_SWING),
            color: colors.shirt,
        },
        BodyBox {
            part: Part::RightArm,
            half: ARM_HALF,
            joint: base + Vec3::new(arm_x, SHOULDER_HEIGHT, 0.0),
            offset: hang(ARM_HALF),
            rotation: Mat3::from_rotation_z(ARM_SPLAY) * Mat3::from_rotation_x(swing * ARM_SWING),
            color: colors.shirt,
        },
    ]
}

fn face_shade(face: Face) -> f32 {
    match face {
        Face::Top => 1.0,
        Face::Front | Face::Back => 0.9,
        Face::Left | Face::Right => 0.78,
        Face::Bottom => 0.6,
    }
}

/// Draw a posed figure back-to-front; returns the projected head top if visible
pub fn draw_figure(
    surface: &mut dyn Surface,
    camera: &Camera,
    boxes: &[BodyBox; 6],
    colors: &FigureColors,
) -> Option<Vec2> {
    let mut order: Vec<(f32, &BodyBox)> = boxes
        .iter()
        .map(|b| ((b.center() - camera.position).length(), b))
        .collect();
    order.sort_by(|a, b| b.0.total_cmp(&a.0));

    for (_, body) in order {
        draw_box(surface, camera, body, colors);
    }

    let head = boxes.iter().find(|b| b.part == Part::Head)?;
    let top = head.center() + Vec3::Y * (head.half.y + 0.1);
    camera.project(top).map(|p| p.screen())
}

fn draw_box(surface: &mut dyn Surface, camera: &Camera, body: &BodyBox, colors: &FigureColors) {
    let corners = body.corners();
    let projected = project_corners(camera, &corners);
    if projected.iter().any(Option::is_none) {
        return;
    }
    let depth = (body.center() - camera.position).length();

    for face in Face::ALL {
        let Some(quad) = Quad::from_face(&projected, face) else {
            continue;
        };
        // Boxes rotate, so cull by screen winding rather than by axis
        if !quad.is_front_facing() {
            continue;
        }
        let base = body.color.shade(face_shade(face));
        surface.fill_polygon(quad.points(), apply_fog(base, depth));
        if body.part == Part::Head {
            draw_head_detail(surface, &quad, face, colors, depth);
        }
    }
}

fn draw_head_detail(
    surface: &mut dyn Surface,
    quad: &Quad,
    face: Face,
    colors: &FigureColors,
    depth: f32,
) {
    let mut fill = |u0: f32, v0: f32, u1: f32, v1: f32, color: Color| {
        let sub = quad.sub(u0, v0, u1, v1);
        surface.fill_polygon(sub.points(), apply_fog(color, depth));
    };
    match face {
        // Facing the direction of travel
        Face::Back => {
            fill(0.0, 0.0, 1.0, 0.25, colors.hair);
            fill(0.15, 0.45, 0.35, 0.6, Color::WHITE);
            fill(0.25, 0.45, 0.35, 0.6, colors.eyes);
            fill(0.65, 0.45, 0.85, 0.6, Color::WHITE);
            fill(0.65, 0.45, 0.75, 0.6, colors.eyes);
            fill(0.35, 0.78, 0.65, 0.86, colors.skin.shade(0.6));
        }
        Face::Front | Face::Top => fill(0.0, 0.0, 1.0, 1.0, colors.hair),
        Face::Left | Face::Right => fill(0.0, 0.0, 1.0, 0.3, colors.hair),
        Face::Bottom => {}
    }
}
