//! Zombie enemies: pursue the player, fall onto platforms, attack in melee

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::anim::{Animation, Facing};
use super::level::Platform;
use super::player::Player;
use super::rect::Rect;
use crate::consts::*;

/// Zombie animation states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZombieAnim {
    Run,
    Idle,
    Attack,
}

impl ZombieAnim {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZombieAnim::Run => "run",
            ZombieAnim::Idle => "idle",
            ZombieAnim::Attack => "attack",
        }
    }
}

/// A zombie, positioned in world space
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zombie {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub vel_y: f32,
    pub health: i32,
    pub max_health: i32,
    pub damage: i32,
    /// Ticks until the next attack may land
    pub attack_cooldown: u32,
    pub attack_cooldown_max: u32,
    pub on_ground: bool,
    pub facing: Facing,
    pub anim: Animation<ZombieAnim>,
    /// Mid-attack: horizontal pursuit is suspended
    pub attacking: bool,
    pub attack_frame: u32,
    pub hit_flash: u32,
    /// Killed this tick, awaiting compaction
    #[serde(skip)]
    pub removed: bool,
}

impl Zombie {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(ZOMBIE_WIDTH, ZOMBIE_HEIGHT),
            speed: ZOMBIE_SPEED,
            vel_y: 0.0,
            health: ZOMBIE_MAX_HEALTH,
            max_health: ZOMBIE_MAX_HEALTH,
            damage: ZOMBIE_DAMAGE,
            attack_cooldown: 0,
            attack_cooldown_max: ZOMBIE_ATTACK_COOLDOWN,
            on_ground: false,
            facing: Facing::Left,
            anim: Animation::new(ZombieAnim::Run),
            attacking: false,
            attack_frame: 0,
            hit_flash: 0,
            removed: false,
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

    /// World-space bounding box
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Screen-space bounding box for the given camera offset
    pub fn screen_rect(&self, camera_x: f32) -> Rect {
        self.rect().shifted_x(-camera_x)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Animation shown while not attacking: badly hurt zombies shamble
    fn pursuit_anim(&self) -> ZombieAnim {
        if self.health * 2 < self.max_health {
            ZombieAnim::Idle
        } else {
            ZombieAnim::Run
        }
    }

    fn begin_attack(&mut self) {
        self.attacking = true;
        self.attack_frame = 0;
        self.anim.set(ZombieAnim::Attack);
    }

    /// Advance one tick: pursue or attack, then fall and land
    pub fn update(&mut self, player_world_x: f32, platforms: &[Platform]) {
        if self.attacking {
            self.attack_frame += 1;
            if self.attack_frame >= ZOMBIE_ATTACK_TICKS {
                self.attacking = false;
                self.attack_frame = 0;
                self.anim.set(self.pursuit_anim());
            }
        } else {
            // Ties step left
            if self.pos.x < player_world_x {
                self.pos.x += self.speed;
                self.facing = Facing::Right;
            } else {
                self.pos.x -= self.speed;
                self.facing = Facing::Left;
            }
            self.anim.set(self.pursuit_anim());

            if (self.pos.x - player_world_x).abs() < ZOMBIE_ATTACK_RANGE {
                self.begin_attack();
            }
        }

        self.vel_y += GRAVITY;
        self.pos.y += self.vel_y;

        self.on_ground = false;
        for platform in platforms {
            if self.vel_y > 0.0 && platform.rect.overlaps(&self.rect()) {
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

        self.attack_cooldown = self.attack_cooldown.saturating_sub(1);
        self.hit_flash = self.hit_flash.saturating_sub(1);
        self.anim.advance();
    }

    /// Step back from an obstacle that blocks enemies. No clamping; a
    /// zombie pursuing into the obstacle will bounce repeatedly.
    pub fn repel_from(&mut self, obstacle: &Rect) {
        if self.pos.x < obstacle.x {
            self.pos.x -= self.speed * 2.0;
        } else {
            self.pos.x += self.speed * 2.0;
        }
    }

    /// Hit the player if the cooldown has elapsed. Returns true on a hit.
    pub fn attack_player(&mut self, player: &mut Player) -> bool {
        if self.attack_cooldown > 0 {
            return false;
        }
        player.take_damage(self.damage);
        self.attack_cooldown = self.attack_cooldown_max;
        self.begin_attack();
        true
    }

    /// Subtract health and flash; below half health the idle pose is shown
    /// unless an attack is playing
    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
        self.hit_flash = HIT_FLASH_TICKS;
        if !self.attacking {
            self.anim.set(self.pursuit_anim());
        }
    }
}
