//! Zombie Fighters - a side-scrolling zombie wave shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, waves, session state)
//! - `game`: Top-level screen state machine (menus, gameplay, pause, results)
//! - `renderer`: Screen-space draw commands and vertex tessellation
//! - `ui`: Builds the draw list for every screen
//! - `assets`: Sprite discovery with primitive-shape fallback
//! - `debug`: On-screen debug message history and optional log file
//! - `settings`: Runtime configuration

pub mod assets;
pub mod debug;
pub mod game;
pub mod parallax;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use debug::DebugLog;
pub use game::{Game, InputEvent, Key, Screen};
pub use settings::Settings;

/// Game configuration constants
///
/// All gameplay values are per fixed tick (60 Hz), not per second.
pub mod consts {
    /// Target tick rate of the frame loop
    pub const FPS: u32 = 60;

    /// Viewport dimensions
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 600.0;

    /// Downward acceleration added to vertical velocity each tick
    pub const GRAVITY: f32 = 0.5;
    /// World floor (top edge of the ground strip)
    pub const GROUND_LEVEL: f32 = HEIGHT - 100.0;

    /// Waves to clear before victory
    pub const MAX_WAVES: u32 = 10;
    /// Number of playable levels
    pub const LEVEL_COUNT: u32 = 2;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    pub const PLAYER_JUMP_POWER: f32 = -12.0; // Negative is up
    pub const PLAYER_SPAWN_X: f32 = 100.0;
    pub const PLAYER_SPAWN_Y: f32 = GROUND_LEVEL - PLAYER_HEIGHT;

    /// Zombie defaults - body is 90% of the player's
    pub const ZOMBIE_WIDTH: f32 = PLAYER_WIDTH * 0.9;
    pub const ZOMBIE_HEIGHT: f32 = PLAYER_HEIGHT * 0.9;
    pub const ZOMBIE_SPEED: f32 = 2.0;
    pub const ZOMBIE_MAX_HEALTH: i32 = 50;
    pub const ZOMBIE_DAMAGE: i32 = 10;
    pub const ZOMBIE_ATTACK_COOLDOWN: u32 = 30;
    /// Horizontal distance at which a zombie starts its attack
    pub const ZOMBIE_ATTACK_RANGE: f32 = 50.0;
    /// Length of the attack animation in ticks
    pub const ZOMBIE_ATTACK_TICKS: u32 = 30;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const PROJECTILE_DAMAGE: i32 = 25;
    pub const PROJECTILE_MAX_AGE: u32 = 120;
    /// Slack around the viewport before a projectile is culled
    pub const OFFSCREEN_MARGIN: f32 = 100.0;

    /// Ticks an entity stays flashed after taking damage
    pub const HIT_FLASH_TICKS: u32 = 10;

    /// Score per zombie killed
    pub const KILL_SCORE: u64 = 100;
    /// Wave size is WAVE_BASE_SIZE + wave number
    pub const WAVE_BASE_SIZE: u32 = 5;
    /// Spawn height for new zombies
    pub const SPAWN_Y: f32 = GROUND_LEVEL - 50.0;

    /// Animation frames per cycle and ticks each frame is held
    pub const ANIMATION_FRAMES: usize = 4;
    pub const TICKS_PER_ANIMATION_FRAME: u32 = 8;
}

/// Convert a world-space x to screen space for the given camera offset
#[inline]
pub fn world_to_screen_x(world_x: f32, camera_x: f32) -> f32 {
    world_x - camera_x
}

/// Convert a screen-space x to world space for the given camera offset
#[inline]
pub fn screen_to_world_x(screen_x: f32, camera_x: f32) -> f32 {
    screen_x + camera_x
}
