//! Collision tests and responses that involve more than one entity kind
//!
//! Box-vs-box overlap lives on [`Rect`]; this module holds the softened
//! projectile hit test and the push-out used for blocking obstacles.

use super::projectile::Projectile;
use super::rect::Rect;
use super::zombie::Zombie;

/// Projectile-vs-zombie hit test
///
/// Uses center distance against `radius + min(w, h) / 3`, which is more
/// forgiving than the zombie's box.
pub fn projectile_hits_zombie(projectile: &Projectile, zombie: &Zombie) -> bool {
    let hit_radius = projectile.radius + zombie.width().min(zombie.height()) / 3.0;
    projectile.pos.distance(zombie.center()) < hit_radius
}

/// Horizontal displacement that moves `body` out of `obstacle`
///
/// The side is chosen by comparing the body's left edge to the obstacle's
/// center: left of center pushes left, otherwise right.
pub fn push_out_x(body: &Rect, obstacle: &Rect) -> f32 {
    if body.x < obstacle.x + obstacle.w / 2.0 {
        obstacle.x - body.right()
    } else {
        obstacle.right() - body.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_projectile_hits_near_center() {
        let zombie = Zombie::new(100.0, 100.0);
        let center = zombie.center();
        let shot = Projectile::new(center + Vec2::new(20.0, 0.0), Vec2::ZERO);
        // 5 + 36/3 = 17 < 20
        assert!(!projectile_hits_zombie(&shot, &zombie));
        let shot = Projectile::new(center + Vec2::new(16.0, 0.0), Vec2::ZERO);
        assert!(projectile_hits_zombie(&shot, &zombie));
    }

    #[test]
    fn test_push_out_left() {
        let body = Rect::new(100.0, 0.0, 40.0, 60.0);
        let obstacle = Rect::new(100.0, 0.0, 100.0, 60.0);
        let dx = push_out_x(&body, &obstacle);
        assert_eq!(dx, -40.0);
        assert!(!body.shifted_x(dx).overlaps(&obstacle));
    }

    #[test]
    fn test_push_out_right() {
        let body = Rect::new(180.0, 0.0, 40.0, 60.0);
        let obstacle = Rect::new(100.0, 0.0, 100.0, 60.0);
        let dx = push_out_x(&body, &obstacle);
        assert_eq!(dx, 20.0);
        assert!(!body.shifted_x(dx).overlaps(&obstacle));
    }
}
