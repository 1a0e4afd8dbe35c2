//! Player projectiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// A straight-flying shot in world space
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// World position
    pub pos: Vec2,
    /// Unit direction, or zero for a degenerate shot
    pub dir: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub damage: i32,
    /// Ticks since spawn
    pub age: u32,
    pub max_age: u32,
    /// Marked for removal this tick
    #[serde(skip)]
    pub spent: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, dir: Vec2) -> Self {
        Self {
            pos,
            dir,
            speed: PROJECTILE_SPEED,
            radius: PROJECTILE_RADIUS,
            damage: PROJECTILE_DAMAGE,
            age: 0,
            max_age: PROJECTILE_MAX_AGE,
            spent: false,
        }
    }

    /// Advance one tick along the direction vector
    pub fn update(&mut self) {
        self.pos += self.dir * self.speed;
        self.age += 1;
    }

    /// Box used against projectile-blocking obstacles. Anchored at the
    /// projectile position, not centered on it.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.radius * 2.0, self.radius * 2.0)
    }

    /// True once the shot is too old or well outside the viewport
    pub fn is_offscreen(&self, camera_x: f32, screen_width: f32, screen_height: f32) -> bool {
        self.age > self.max_age
            || self.pos.x < camera_x - OFFSCREEN_MARGIN
            || self.pos.x > camera_x + screen_width + OFFSCREEN_MARGIN
            || self.pos.y < -OFFSCREEN_MARGIN
            || self.pos.y > screen_height + OFFSCREEN_MARGIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_update_moves_along_direction() {
        let mut p = Projectile::new(Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0));
        p.update();
        assert_eq!(p.pos, Vec2::new(110.0, 100.0));
        assert_eq!(p.age, 1);
    }

    #[test]
    fn test_degenerate_shot_stays_put() {
        let mut p = Projectile::new(Vec2::new(50.0, 50.0), Vec2::ZERO);
        for _ in 0..10 {
            p.update();
        }
        assert_eq!(p.pos, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_expires_exactly_after_max_age() {
        let mut p = Projectile::new(Vec2::new(100.0, 100.0), Vec2::ZERO);
        for _ in 0..PROJECTILE_MAX_AGE {
            p.update();
            assert!(!p.is_offscreen(0.0, WIDTH, HEIGHT));
        }
        p.update();
        assert!(p.is_offscreen(0.0, WIDTH, HEIGHT));
    }

    #[test]
    fn test_offscreen_margin() {
        let camera = 500.0;
        let inside = Projectile::new(Vec2::new(camera - 99.0, 300.0), Vec2::ZERO);
        let outside = Projectile::new(Vec2::new(camera - 101.0, 300.0), Vec2::ZERO);
        assert!(!inside.is_offscreen(camera, WIDTH, HEIGHT));
        assert!(outside.is_offscreen(camera, WIDTH, HEIGHT));

        let right = Projectile::new(Vec2::new(camera + WIDTH + 101.0, 300.0), Vec2::ZERO);
        assert!(right.is_offscreen(camera, WIDTH, HEIGHT));
        let below = Projectile::new(Vec2::new(camera, HEIGHT + 101.0), Vec2::ZERO);
        assert!(below.is_offscreen(camera, WIDTH, HEIGHT));
        let above = Projectile::new(Vec2::new(camera, -101.0), Vec2::ZERO);
        assert!(above.is_offscreen(camera, WIDTH, HEIGHT));
    }

    proptest! {
        #[test]
        fn prop_offscreen_check_is_idempotent(
            x in -2000.0f32..4000.0,
            y in -500.0f32..1200.0,
            age in 0u32..200,
            camera in 0.0f32..3000.0,
        ) {
            let mut p = Projectile::new(Vec2::new(x, y), Vec2::new(1.0, 0.0));
            p.age = age;
            let first = p.is_offscreen(camera, WIDTH, HEIGHT);
            let second = p.is_offscreen(camera, WIDTH, HEIGHT);
            prop_assert_eq!(first, second);
        }
    }
}
