//! The player character

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::anim::{Animation, Facing};
use super::level::Platform;
use super::projectile::Projectile;
use super::rect::Rect;
use crate::consts::*;

/// Player animation states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAnim {
    Idle,
    Walking,
}

impl PlayerAnim {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerAnim::Idle => "idle",
            PlayerAnim::Walking => "walking",
        }
    }
}

/// The player
///
/// `pos.x` is kept in screen space: the camera offset absorbs world travel
/// once the player passes a third of the screen. `pos.y` is shared by both
/// spaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub vel_y: f32,
    pub health: i32,
    pub max_health: i32,
    pub on_ground: bool,
    pub facing: Facing,
    pub moving_left: bool,
    pub moving_right: bool,
    pub anim: Animation<PlayerAnim>,
    /// Ticks of damage flash remaining
    pub hit_flash: u32,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            speed: PLAYER_SPEED,
            vel_y: 0.0,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            on_ground: true,
            facing: Facing::Right,
            moving_left: false,
            moving_right: false,
            anim: Animation::new(PlayerAnim::Idle),
            hit_flash: 0,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Screen-space bounding box
    pub fn screen_rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// World-space bounding box for the given camera offset
    pub fn world_rect(&self, camera_x: f32) -> Rect {
        self.screen_rect().shifted_x(camera_x)
    }

    /// World-space x of the left edge
    #[inline]
    pub fn world_x(&self, camera_x: f32) -> f32 {
        crate::screen_to_world_x(self.pos.x, camera_x)
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Set the move-left intent; pressing turns the player around
    pub fn set_moving_left(&mut self, moving: bool) {
        self.moving_left = moving;
        if moving {
            self.facing = Facing::Left;
        }
    }

    /// Set the move-right intent; pressing turns the player around
    pub fn set_moving_right(&mut self, moving: bool) {
        self.moving_right = moving;
        if moving {
            self.facing = Facing::Right;
        }
    }

    /// Advance one tick: walk, fall, land on platforms, clamp to the floor
    pub fn move_step(&mut self, platforms: &[Platform], camera_x: f32) {
        let mut moved = false;
        if self.moving_left {
            self.pos.x -= self.speed;
            moved = true;
        }
        if self.moving_right {
            self.pos.x += self.speed;
            moved = true;
        }
        self.anim.set(if moved {
            PlayerAnim::Walking
        } else {
            PlayerAnim::Idle
        });

        self.vel_y += GRAVITY;
        self.pos.y += self.vel_y;

        self.on_ground = false;
        for platform in platforms {
            // Only land while falling
            if self.vel_y > 0.0 && platform.rect.overlaps(&self.world_rect(camera_x)) {
                self.pos.y = platform.top() - self.height();
                self.vel_y = 0.0;
                self.on_ground = true;
            }
        }

        if self.pos.y >= GROUND_LEVEL - self.height() {
            self.pos.y = GROUND_LEVEL - self.height();
            self.vel_y = 0.0;
            self.on_ground = true;
        }

        // Left boundary applies to the screen-space x
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
        }

        self.hit_flash = self.hit_flash.saturating_sub(1);
        self.anim.advance();
    }

    /// Start a jump. Returns false when airborne.
    pub fn jump(&mut self) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vel_y = PLAYER_JUMP_POWER;
        self.on_ground = false;
        true
    }

    /// Fire toward a screen-space target point
    ///
    /// The direction runs from the player's world center to the target's
    /// world position. A target exactly at the center yields a zero
    /// direction and the shot never moves.
    pub fn shoot(&self, target: Vec2, camera_x: f32) -> Projectile {
        let world_x = self.world_x(camera_x);
        let center = Vec2::new(world_x + self.width() / 2.0, self.pos.y + self.height() / 2.0);
        let target_world = Vec2::new(crate::screen_to_world_x(target.x, camera_x), target.y);
        let dir = (target_world - center).normalize_or_zero();
        Projectile::new(center, dir)
    }

    /// Subtract health and start the damage flash
    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
        self.hit_flash = HIT_FLASH_TICKS;
    }
}
