//! Shape generation for 2D primitives
//!
//! All output is in screen pixels (origin top-left, y down); the pipeline
//! maps it to NDC.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::consts::PARTICLE_SIZE;
use crate::sim::RenderSnapshot;

/// Segments used for the orb
const ORB_SEGMENTS: u32 = 32;
/// Width of the orb's glow ring
const GLOW_WIDTH: f32 = 6.0;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let (sin1, cos1) = theta1.sin_cos();
        let (sin2, cos2) = theta2.sin_cos();
        let inner1 = center + Vec2::new(cos1, sin1) * inner_radius;
        let outer1 = center + Vec2::new(cos1, sin1) * outer_radius;
        let inner2 = center + Vec2::new(cos2, sin2) * inner_radius;
        let outer2 = center + Vec2::new(cos2, sin2) * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Append an axis-aligned rectangle (two triangles); empty rects are skipped
pub fn push_rect(out: &mut Vec<Vertex>, min: Vec2, size: Vec2, color: [f32; 4]) {
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    let max = min + size;
    out.push(Vertex::new(min.x, min.y, color));
    out.push(Vertex::new(max.x, min.y, color));
    out.push(Vertex::new(min.x, max.y, color));

    out.push(Vertex::new(min.x, max.y, color));
    out.push(Vertex::new(max.x, min.y, color));
    out.push(Vertex::new(max.x, max.y, color));
}

/// Triangle list for a whole frame: obstacles, particles, then the orb on top
pub fn build_frame(snapshot: &RenderSnapshot<'_>) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(
        snapshot.obstacles.len() * 12
            + snapshot.particles.len() * 6
            + (ORB_SEGMENTS * 9) as usize,
    );

    let width = snapshot.obstacle_width;
    for obstacle in snapshot.obstacles {
        // Top pipe
        push_rect(
            &mut vertices,
            Vec2::new(obstacle.x, 0.0),
            Vec2::new(width, obstacle.top_height),
            colors::OBSTACLE,
        );
        // Bottom pipe
        push_rect(
            &mut vertices,
            Vec2::new(obstacle.x, obstacle.gap_bottom_y),
            Vec2::new(width, snapshot.height - obstacle.gap_bottom_y),
            colors::OBSTACLE,
        );
    }

    for particle in snapshot.particles {
        let alpha = particle.life.clamp(0.0, 1.0);
        push_rect(
            &mut vertices,
            particle.pos,
            Vec2::splat(PARTICLE_SIZE),
            colors::with_alpha(colors::PARTICLE, alpha),
        );
    }

    let player = snapshot.player;
    vertices.extend(ring(
        player.pos,
        player.radius,
        player.radius + GLOW_WIDTH,
        colors::PLAYER_GLOW,
        ORB_SEGMENTS,
    ));
    vertices.extend(circle(player.pos, player.radius, colors::PLAYER, ORB_SEGMENTS));

    vertices
}
