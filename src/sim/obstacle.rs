//! Gap obstacles: spawning, scrolling and collision
//!
//! An obstacle is a pair of pipe sections sharing one x position, with an
//! open gap between `top_height` and `gap_bottom_y`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::player::Player;
use crate::settings::SpawnPolicy;

/// A scrolling pipe pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Bottom of the upper pipe
    pub top_height: f32,
    /// Top of the lower pipe (gap size is fixed at spawn)
    pub gap_bottom_y: f32,
}

impl Obstacle {
    pub fn new(x: f32, top_height: f32, gap_size: f32) -> Self {
        Self {
            x,
            top_height,
            gap_bottom_y: top_height + gap_size,
        }
    }

    #[inline]
    pub fn gap_size(&self) -> f32 {
        self.gap_bottom_y - self.top_height
    }

    /// Scroll left by one frame's worth of movement
    #[inline]
    pub fn advance(&mut self, scroll_speed: f32) {
        self.x -= scroll_speed;
    }

    /// Right edge has scrolled past the left side of the view
    #[inline]
    pub fn is_off_screen(&self, width: f32) -> bool {
        self.x + width < 0.0
    }

    /// Does the orb overlap either pipe section?
    pub fn collides(&self, player: &Player, width: f32) -> bool {
        let p = player.pos;
        let r = player.radius;

        let horizontal = p.x + r > self.x && p.x - r < self.x + width;
        let vertical = p.y - r < self.top_height || p.y + r > self.gap_bottom_y;

        horizontal && vertical
    }
}

/// Has a full spawn interval passed since the last spawn?
#[inline]
pub fn should_spawn(now: f64, last_spawn: f64, spawn_interval: f32) -> bool {
    now - last_spawn >= spawn_interval as f64
}

/// Geometry for a new obstacle entering at the right edge of the view
#[derive(Debug, Clone, Copy)]
pub struct SpawnArea {
    pub view_width: f32,
    pub view_height: f32,
    /// Smallest pipe section above and below the gap
    pub min_height: f32,
    pub policy: SpawnPolicy,
}

impl SpawnArea {
    /// Width of the range `top_height` is drawn from (may be <= 0)
    pub fn range_width(&self, gap_size: f32) -> f32 {
        self.view_height - gap_size - self.min_height * 2.0
    }

    /// Create an obstacle just off the right edge
    ///
    /// Returns `None` only under `SpawnPolicy::Skip` when the view cannot fit
    /// the gap plus both minimum sections.
    pub fn spawn<R: Rng>(&self, rng: &mut R, gap_size: f32) -> Option<Obstacle> {
        let span = self.range_width(gap_size);

        let offset = if span > 0.0 {
            rng.random_range(0.0..span).floor()
        } else {
            match self.policy {
                SpawnPolicy::Clamp => {
                    log::warn!(
                        "View height {} too short for gap {:.1}; clamping obstacle",
                        self.view_height,
                        gap_size
                    );
                    0.0
                }
                SpawnPolicy::Skip => {
                    log::warn!(
                        "View height {} too short for gap {:.1}; skipping spawn",
                        self.view_height,
                        gap_size
                    );
                    return None;
                }
            }
        };

        let top_height = self.min_height + offset;
        log::debug!("Spawn obstacle: top {top_height}, gap {gap_size:.1}");
        Some(Obstacle::new(self.view_width, top_height, gap_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn player_at(x: f32, y: f32) -> Player {
        let mut player = Player::new(15.0);
        player.pos = Vec2::new(x, y);
        player
    }

    fn area(policy: SpawnPolicy) -> SpawnArea {
        SpawnArea {
            view_width: 800.0,
            view_height: 600.0,
            min_height: 50.0,
            policy,
        }
    }

    #[test]
    fn test_collision_reference_cases() {
        let player = player_at(100.0, 100.0);

        let narrow = Obstacle {
            x: 90.0,
            top_height: 90.0,
            gap_bottom_y: 130.0,
        };
        assert!(narrow.collides(&player, 50.0));

        let wide = Obstacle {
            x: 90.0,
            top_height: 80.0,
            gap_bottom_y: 140.0,
        };
        assert!(!wide.collides(&player, 50.0));
    }

    #[test]
    fn test_no_collision_without_horizontal_overlap() {
        let player = player_at(100.0, 100.0);
        let ahead = Obstacle::new(115.0, 500.0, 10.0);
        assert!(!ahead.collides(&player, 50.0));
        let behind = Obstacle::new(35.0, 500.0, 10.0);
        assert!(!behind.collides(&player, 50.0));
        let overlapping = Obstacle::new(114.0, 500.0, 10.0);
        assert!(overlapping.collides(&player, 50.0));
    }

    #[test]
    fn test_advance_and_prune() {
        let mut obstacle = Obstacle::new(0.0, 100.0, 200.0);
        obstacle.advance(49.0);
        assert!(!obstacle.is_off_screen(50.0));
        obstacle.advance(1.0);
        assert!(!obstacle.is_off_screen(50.0));
        obstacle.advance(0.5);
        assert!(obstacle.is_off_screen(50.0));
    }

    #[test]
    fn test_should_spawn_threshold() {
        assert!(!should_spawn(1.999, 0.0, 2.0));
        assert!(should_spawn(2.0, 0.0, 2.0));
        assert!(should_spawn(10.0, 5.0, 2.0));
    }

    #[test]
    fn test_spawn_enters_at_right_edge() {
        let mut rng = Pcg32::seed_from_u64(7);
        let obstacle = area(SpawnPolicy::Clamp).spawn(&mut rng, 280.0).unwrap();
        assert_eq!(obstacle.x, 800.0);
        assert_eq!(obstacle.gap_size(), 280.0);
        assert_eq!(obstacle.top_height, obstacle.top_height.floor());
    }

    #[test]
    fn test_degenerate_view_policies() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut short = area(SpawnPolicy::Clamp);
        short.view_height = 300.0;
        assert!(short.range_width(280.0) <= 0.0);

        let clamped = short.spawn(&mut rng, 280.0).unwrap();
        assert_eq!(clamped.top_height, 50.0);
        assert_eq!(clamped.gap_bottom_y, 330.0);

        short.policy = SpawnPolicy::Skip;
        assert!(short.spawn(&mut rng, 280.0).is_none());
    }

    proptest! {
        #[test]
        fn prop_spawn_stays_in_range(seed in any::<u64>(), gap in 10.0f32..400.0) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let area = area(SpawnPolicy::Clamp);
            let obstacle = area.spawn(&mut rng, gap).unwrap();
            prop_assert!(obstacle.top_height >= 50.0);
            if area.range_width(gap) > 0.0 {
                prop_assert!(obstacle.top_height < 600.0 - gap - 50.0);
            }
            prop_assert!((obstacle.gap_size() - gap).abs() < 1e-3);
        }

        #[test]
        fn prop_player_inside_gap_never_collides(
            top in 0.0f32..300.0,
            slack in 0.0f32..100.0,
            dx in -80.0f32..80.0,
        ) {
            let gap = 32.0 + slack;
            let obstacle = Obstacle::new(100.0, top, gap);
            let player = player_at(100.0 + dx, top + gap / 2.0);
            prop_assert!(!obstacle.collides(&player, 50.0));
        }
    }
}
