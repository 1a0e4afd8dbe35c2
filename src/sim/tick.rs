//! Fixed timestep simulation tick
//!
//! Advances a gameplay session by one frame. Step order matters: the camera
//! follows the player before obstacles are resolved, enemies act before
//! projectiles fly, and the wave check sees the compacted enemy list.

use glam::Vec2;

use super::collision::{projectile_hits_zombie, push_out_x};
use super::rect::Rect;
use super::state::{GameEvent, GameSession};
use super::wave::wave_size;
use crate::consts::*;

/// Per-tick options that are not player input events
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// What the screen state machine should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    GameOver { score: u64 },
    Victory { score: u64, wave: u32, level: u32 },
}

/// Advance the session by one tick
pub fn tick(state: &mut GameSession, input: &TickInput) -> TickOutcome {
    let mut outcome = TickOutcome::Continue;
    state.time_ticks += 1;

    if input.idle_mode {
        drive_autopilot(state);
    }

    // 1. Player movement, then camera follow
    state.player.move_step(&state.level.platforms, state.camera_x);
    follow_camera(state);

    // 2. Player vs obstacles
    if resolve_player_obstacles(state) {
        player_died(state, &mut outcome);
    }

    // 3. Enemies
    if update_zombies(state) {
        player_died(state, &mut outcome);
    }

    // 4. Projectiles
    update_projectiles(state);

    // 5. Wave progression
    if state.zombies.is_empty() {
        state.wave += 1;
        if state.wave > state.max_waves {
            // Clearing the last wave overrides a death earlier in the tick
            state.push_event(GameEvent::AllWavesCleared { score: state.score });
            outcome = TickOutcome::Victory {
                score: state.score,
                wave: state.wave - 1,
                level: state.level.number,
            };
        } else {
            state.spawn_current_wave();
        }
    }

    outcome
}

/// Record the first death of the tick
fn player_died(state: &mut GameSession, outcome: &mut TickOutcome) {
    if *outcome == TickOutcome::Continue {
        state.push_event(GameEvent::PlayerDied { score: state.score });
        *outcome = TickOutcome::GameOver { score: state.score };
    }
}

/// Scroll once the player passes a third of the screen, pinning the player
/// there. The camera only moves right.
pub fn follow_camera(state: &mut GameSession) {
    let anchor = WIDTH / 3.0;
    if state.player.pos.x > anchor {
        state.camera_x += state.player.pos.x - anchor;
        state.player.pos.x = anchor;
    }
}

/// Push the player out of blocking obstacles and apply hazard damage.
/// Returns true if the player died.
pub fn resolve_player_obstacles(state: &mut GameSession) -> bool {
    let player_world_x = state.player_world_x();
    let mut died = false;

    for obstacle in &state.level.obstacles {
        let body = Rect::new(
            player_world_x,
            state.player.pos.y,
            state.player.width(),
            state.player.height(),
        );
        if !obstacle.rect.overlaps(&body) {
            continue;
        }

        if obstacle.blocks_player {
            state.player.pos.x += push_out_x(&body, &obstacle.rect);
        }

        if obstacle.damage > 0 {
            state.player.take_damage(obstacle.damage);
            state.events.push(GameEvent::ObstacleHit {
                damage: obstacle.damage,
            });
            if state.player.is_dead() {
                died = true;
            }
        }
    }

    died
}

/// Move every zombie, bounce them off obstacles and let them attack.
/// Returns true if the player died.
fn update_zombies(state: &mut GameSession) -> bool {
    let mut died = false;
    let camera_x = state.camera_x;

    for zombie in state.zombies.iter_mut() {
        let player_world_x = state.player.world_x(camera_x);
        zombie.update(player_world_x, &state.level.platforms);

        for obstacle in &state.level.obstacles {
            if obstacle.blocks_enemies && obstacle.rect.overlaps(&zombie.rect()) {
                zombie.repel_from(&obstacle.rect);
            }
        }

        if zombie
            .screen_rect(camera_x)
            .overlaps(&state.player.screen_rect())
            && zombie.attack_player(&mut state.player)
        {
            state.events.push(GameEvent::PlayerHit {
                health: state.player.health,
            });
            if state.player.is_dead() {
                died = true;
            }
        }
    }

    died
}

/// Fly projectiles and resolve hits. Spent projectiles and killed zombies
/// are marked during the sweep and compacted once at the end.
fn update_projectiles(state: &mut GameSession) {
    for projectile in state.projectiles.iter_mut() {
        projectile.update();

        let bounds = projectile.bounds();
        if state
            .level
            .obstacles
            .iter()
            .any(|o| o.blocks_projectiles && o.rect.overlaps(&bounds))
        {
            projectile.spent = true;
            continue;
        }

        if projectile.is_offscreen(state.camera_x, WIDTH, HEIGHT) {
            projectile.spent = true;
            continue;
        }

        for zombie in state.zombies.iter_mut().filter(|z| !z.removed) {
            if !projectile_hits_zombie(projectile, zombie) {
                continue;
            }
            zombie.take_damage(projectile.damage);
            projectile.spent = true;
            if zombie.is_dead() {
                zombie.removed = true;
                state.score += KILL_SCORE;
                state.wave_enemies_remaining = state.wave_enemies_remaining.saturating_sub(1);
                state.events.push(GameEvent::ZombieKilled { score: state.score });
            }
            break;
        }
    }

    state.projectiles.retain(|p| !p.spent);
    state.zombies.retain(|z| !z.removed);
}

/// Ticks between autopilot shots
const IDLE_FIRE_INTERVAL: u32 = 15;
/// Autopilot stops walking when a zombie is this close (world units)
const IDLE_HOLD_DISTANCE: f32 = 200.0;
/// Autopilot jumps when a blocking obstacle starts within this distance
const IDLE_JUMP_LOOKAHEAD: f32 = 60.0;

/// Idle/demo mode: walk right, hold ground near zombies, shoot the nearest
/// one on a fixed cadence, hop over obstacles ahead
fn drive_autopilot(state: &mut GameSession) {
    let player_world = state.player.world_rect(state.camera_x);
    let player_center = player_world.center();

    let nearest = state
        .zombies
        .iter()
        .map(|z| z.center())
        .min_by(|a, b| {
            a.distance(player_center)
                .partial_cmp(&b.distance(player_center))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let threatened = nearest
        .map(|c| (c.x - player_center.x).abs() < IDLE_HOLD_DISTANCE)
        .unwrap_or(false);
    state.player.set_moving_left(false);
    state.player.set_moving_right(!threatened);

    let obstacle_ahead = state.level.obstacles.iter().any(|o| {
        o.blocks_player
            && o.rect.x >= player_world.right()
            && o.rect.x - player_world.right() < IDLE_JUMP_LOOKAHEAD
    });
    if obstacle_ahead {
        state.jump();
    }

    state.idle_fire_cooldown = state.idle_fire_cooldown.saturating_sub(1);
    if let Some(target) = nearest
        && state.idle_fire_cooldown == 0
    {
        let screen_target = Vec2::new(crate::world_to_screen_x(target.x, state.camera_x), target.y);
        state.shoot(screen_target);
        state.idle_fire_cooldown = IDLE_FIRE_INTERVAL;
    }
}
