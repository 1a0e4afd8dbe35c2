//! Zombie wave spawning

use rand::Rng;

use super::zombie::Zombie;
use crate::consts::{SPAWN_Y, WAVE_BASE_SIZE, WIDTH};

/// Number of zombies in a wave (1-indexed)
#[inline]
pub fn wave_size(wave: u32) -> u32 {
    WAVE_BASE_SIZE + wave
}

/// Candidate spawn points around the player, in world space: three ahead
/// beyond the right screen edge and two behind beyond the left
pub fn spawn_points(player_x: f32, camera_x: f32) -> [(f32, f32); 5] {
    let base = player_x + camera_x;
    [
        (base + WIDTH, SPAWN_Y),
        (base + WIDTH + 200.0, SPAWN_Y),
        (base + WIDTH + 400.0, SPAWN_Y),
        (base - WIDTH, SPAWN_Y),
        (base - WIDTH - 200.0, SPAWN_Y),
    ]
}

/// Spawn `count` zombies, each at a uniformly chosen candidate point
/// (with replacement, so several may stack on one point)
///
/// `player_x` is the player's screen-space x.
pub fn spawn_wave<R: Rng + ?Sized>(
    player_x: f32,
    camera_x: f32,
    count: u32,
    rng: &mut R,
) -> Vec<Zombie> {
    let points = spawn_points(player_x, camera_x);
    (0..count)
        .map(|_| {
            let (x, y) = points[rng.random_range(0..points.len())];
            Zombie::new(x, y)
        })
        .collect()
}
