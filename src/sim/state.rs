//! Gameplay session state
//!
//! One `GameSession` exists per run of a level. It owns the only enemy and
//! projectile collections; a restart replaces the whole session.

use std::fmt;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::level::Level;
use super::player::Player;
use super::projectile::Projectile;
use super::wave::{spawn_wave, wave_size};
use super::zombie::Zombie;
use crate::consts::*;

/// Something that happened during a tick or an input action, for the debug
/// feed. Drained by the driver every frame.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PlayerJumped,
    ProjectileFired { pos: Vec2 },
    PlayerHit { health: i32 },
    ObstacleHit { damage: i32 },
    ZombieKilled { score: u64 },
    WaveStarted { wave: u32, max_waves: u32, size: u32 },
    PlayerDied { score: u64 },
    AllWavesCleared { score: u64 },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::PlayerJumped => write!(f, "Player jumped"),
            GameEvent::ProjectileFired { pos } => {
                write!(f, "Projectile created at ({:.1}, {:.1})", pos.x, pos.y)
            }
            GameEvent::PlayerHit { health } => write!(f, "Player hit! Health: {}", health),
            GameEvent::ObstacleHit { damage } => {
                write!(f, "Player hit obstacle! Damage: {}", damage)
            }
            GameEvent::ZombieKilled { score } => write!(f, "Enemy killed! Score: {}", score),
            GameEvent::WaveStarted {
                wave,
                max_waves,
                size,
            } => write!(f, "Wave {}/{} started! Enemies: {}", wave, max_waves, size),
            GameEvent::PlayerDied { score } => write!(f, "Player died! Final score: {}", score),
            GameEvent::AllWavesCleared { .. } => write!(f, "Victory! All waves completed!"),
        }
    }
}

/// Complete state of one gameplay run
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Seed the wave RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub level: Level,
    pub player: Player,
    pub zombies: Vec<Zombie>,
    pub projectiles: Vec<Projectile>,
    pub score: u64,
    /// Current wave (1-indexed)
    pub wave: u32,
    pub max_waves: u32,
    /// Zombies of the current wave not yet killed
    pub wave_enemies_remaining: u32,
    /// World x of the left screen edge; never decreases
    pub camera_x: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Autopilot shot cadence counter
    pub(crate) idle_fire_cooldown: u32,
    pub(crate) events: Vec<GameEvent>,
}

impl GameSession {
    /// Start a run of `level`: fresh player at the spawn point, score 0,
    /// first wave already spawned
    pub fn new(level: Level, max_waves: u32, seed: u64) -> Self {
        let mut session = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level,
            player: Player::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            zombies: Vec::new(),
            projectiles: Vec::new(),
            score: 0,
            wave: 1,
            max_waves,
            wave_enemies_remaining: 0,
            camera_x: 0.0,
            time_ticks: 0,
            idle_fire_cooldown: 0,
            events: Vec::new(),
        };
        session.spawn_current_wave();
        session
    }

    /// Convenience constructor for one of the built-in levels
    pub fn with_builtin_level(level: u32, seed: u64) -> Self {
        Self::new(Level::builtin(level), MAX_WAVES, seed)
    }

    pub fn level_number(&self) -> u32 {
        self.level.number
    }

    /// Replace the enemy collection with a fresh wave sized for `self.wave`
    pub(crate) fn spawn_current_wave(&mut self) {
        let size = wave_size(self.wave);
        self.zombies = spawn_wave(self.player.pos.x, self.camera_x, size, &mut self.rng);
        self.wave_enemies_remaining = size;
        log::info!(
            "Level {} wave {}/{}: spawned {} zombies",
            self.level.number,
            self.wave,
            self.max_waves,
            size
        );
        self.events.push(GameEvent::WaveStarted {
            wave: self.wave,
            max_waves: self.max_waves,
            size,
        });
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Jump input; ignored while airborne
    pub fn jump(&mut self) {
        if self.player.jump() {
            self.events.push(GameEvent::PlayerJumped);
        }
    }

    /// Fire toward a screen-space point
    pub fn shoot(&mut self, target: Vec2) {
        let projectile = self.player.shoot(target, self.camera_x);
        self.events.push(GameEvent::ProjectileFired {
            pos: projectile.pos,
        });
        self.projectiles.push(projectile);
    }

    /// Player's world-space x (left edge)
    pub fn player_world_x(&self) -> f32 {
        self.player.world_x(self.camera_x)
    }
}
