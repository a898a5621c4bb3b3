//! Cosmetic thrust particles
//!
//! Never read by collision or scoring.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A short-lived spark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases every frame
    pub life: f32,
}

/// Push `count` fresh particles at `origin`, biased downward
pub fn emit<R: Rng>(particles: &mut Vec<Particle>, rng: &mut R, origin: Vec2, count: usize) {
    particles.reserve(count);
    for _ in 0..count {
        let vel = Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(1.5..2.5));
        particles.push(Particle {
            pos: origin,
            vel,
            life: 1.0,
        });
    }
}

/// Move every particle one frame and drop the expired ones
pub fn advance(particles: &mut Vec<Particle>, decay: f32) {
    particles.retain_mut(|p| {
        p.pos += p.vel;
        p.life -= decay;
        p.life > 0.0
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PARTICLE_DECAY;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_emit_ranges() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut particles = Vec::new();
        emit(&mut particles, &mut rng, Vec2::new(10.0, 20.0), 200);
        assert_eq!(particles.len(), 200);
        for p in &particles {
            assert_eq!(p.pos, Vec2::new(10.0, 20.0));
            assert_eq!(p.life, 1.0);
            assert!(p.vel.x >= -1.0 && p.vel.x < 1.0);
            assert!(p.vel.y >= 1.5 && p.vel.y < 2.5);
        }
    }

    #[test]
    fn test_particle_lives_twenty_frames() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        emit(&mut particles, &mut rng, Vec2::ZERO, 3);

        for _ in 0..19 {
            advance(&mut particles, PARTICLE_DECAY);
        }
        assert_eq!(particles.len(), 3);

        advance(&mut particles, PARTICLE_DECAY);
        assert!(particles.is_empty());
    }

    #[test]
    fn test_removal_does_not_skip_neighbors() {
        let mut particles: Vec<Particle> = [0.04, 0.5, 0.03, 0.02, 0.9]
            .iter()
            .map(|&life| Particle {
                pos: Vec2::ZERO,
                vel: Vec2::ONE,
                life,
            })
            .collect();

        advance(&mut particles, 0.05);

        assert_eq!(particles.len(), 2);
        // Survivors all moved exactly once
        assert!(particles.iter().all(|p| p.pos == Vec2::ONE));
    }
}
