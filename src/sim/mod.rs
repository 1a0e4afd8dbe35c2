//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order, removals compacted once per tick)
//! - No rendering or platform dependencies

pub mod anim;
pub mod collision;
pub mod level;
pub mod player;
pub mod projectile;
pub mod rect;
pub mod state;
pub mod tick;
pub mod wave;
pub mod zombie;

pub use anim::{Animation, Facing};
pub use collision::{projectile_hits_zombie, push_out_x};
pub use level::{Level, LevelError, Obstacle, Platform};
pub use player::{Player, PlayerAnim};
pub use projectile::Projectile;
pub use rect::Rect;
pub use state::{GameEvent, GameSession};
pub use tick::{TickInput, TickOutcome, tick};
pub use wave::{spawn_points, spawn_wave, wave_size};
pub use zombie::{Zombie, ZombieAnim};
