//! Screen drawing
//!
//! Every function here records into a [`DrawList`] and only reads game
//! state. Positions are screen space; world-space entities are shifted by the
//! session camera.

use glam::Vec2;

use crate::assets::{Appearance, SpriteLibrary};
use crate::consts::*;
use crate::debug::DebugLog;
use crate::renderer::{DrawList, colors, font};
use crate::sim::{Facing, GameSession, Obstacle, Player, Projectile, Rect, Zombie};
use crate::world_to_screen_x;

/// Width of a hazard spike
const SPIKE_WIDTH: f32 = 10.0;
/// Player health bar width in the HUD
const HUD_BAR_WIDTH: f32 = 200.0;

/// Fraction of a bar to fill; health below zero shows an empty bar
pub fn health_fraction(health: i32, max_health: i32) -> f32 {
    if max_health <= 0 {
        return 0.0;
    }
    (health as f32 / max_health as f32).clamp(0.0, 1.0)
}

/// Filled-proportion bar over a grey background
fn draw_bar(list: &mut DrawList, rect: Rect, fraction: f32, color: [f32; 4]) {
    list.rect(rect, colors::BAR_BACKGROUND);
    list.rect(
        Rect::new(rect.x, rect.y, (rect.w * fraction).floor(), rect.h),
        color,
    );
}

/// Vertical list of menu entries, highlighted entry in `highlight`.
/// Entries for which `disabled` is true are always drawn grey.
fn draw_options(
    list: &mut DrawList,
    labels: &[&str],
    selected: usize,
    top: f32,
    highlight: [f32; 4],
    disabled: impl Fn(usize) -> bool,
) {
    for (i, label) in labels.iter().enumerate() {
        let color = if disabled(i) {
            colors::LOCKED
        } else if i == selected {
            highlight
        } else {
            colors::WHITE
        };
        list.text_centered(*label, WIDTH / 2.0, top + i as f32 * 60.0, font::MENU, color);
    }
}

/// Parallax layers, or the primitive sky when there are none, then the ground
pub fn draw_background(list: &mut DrawList, sprites: &SpriteLibrary, camera_x: f32) {
    if sprites.background.is_empty() {
        list.fill(colors::SKY);

        let clouds = [
            (50.0, 50.0, 100.0, 40.0),
            (200.0, 80.0, 150.0, 50.0),
            (400.0, 40.0, 120.0, 30.0),
            (600.0, 90.0, 140.0, 45.0),
        ];
        for (x, y, w, h) in clouds {
            list.ellipse(Rect::new(x, y, w, h), colors::CLOUD);
            list.ellipse(Rect::new(x + w / 4.0, y - h / 2.0, w / 2.0, h), colors::CLOUD);
            list.ellipse(
                Rect::new(x + w / 3.0, y + h / 3.0, w / 2.0, h / 2.0),
                colors::CLOUD,
            );
        }

        // Mountain ridge down to a flat base at y=200
        let ridge = [
            Vec2::new(0.0, 200.0),
            Vec2::new(100.0, 120.0),
            Vec2::new(200.0, 180.0),
            Vec2::new(300.0, 100.0),
            Vec2::new(400.0, 160.0),
            Vec2::new(WIDTH, 200.0),
        ];
        for pair in ridge.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let (base_a, base_b) = (Vec2::new(a.x, 200.0), Vec2::new(b.x, 200.0));
            list.triangle(a, b, base_a, colors::MOUNTAIN);
            list.triangle(b, base_b, base_a, colors::MOUNTAIN);
        }
    } else {
        for layer in sprites.background.layers() {
            for x in layer.tile_positions(camera_x, WIDTH) {
                list.sprite(layer.handle, Rect::new(x, 0.0, layer.width, layer.height), false);
            }
        }
    }

    list.rect(
        Rect::new(0.0, GROUND_LEVEL, WIDTH, HEIGHT - GROUND_LEVEL),
        colors::DIRT,
    );
    list.rect(Rect::new(0.0, GROUND_LEVEL, WIDTH, 5.0), colors::GRASS);
}

pub fn draw_menu(list: &mut DrawList, sprites: &SpriteLibrary, options: &[&str], selected: usize) {
    draw_background(list, sprites, 0.0);
    list.text_centered("Zombie Fighters", WIDTH / 2.0, 100.0, font::TITLE, colors::YELLOW);
    draw_options(list, options, selected, 250.0, colors::RED, |_| false);
}

/// `locked[i]` greys out entry `i` regardless of selection
pub fn draw_level_select(
    list: &mut DrawList,
    sprites: &SpriteLibrary,
    options: &[&str],
    selected: usize,
    locked: &[bool],
) {
    draw_background(list, sprites, 0.0);
    list.text_centered("Select Level", WIDTH / 2.0, 100.0, font::TITLE, colors::YELLOW);
    draw_options(list, options, selected, 250.0, colors::RED, |i| {
        locked.get(i).copied().unwrap_or(false)
    });
}

pub fn draw_controls(list: &mut DrawList) {
    list.fill(colors::BLACK);
    list.text_centered("Controls", WIDTH / 2.0, 50.0, font::TITLE, colors::YELLOW);

    let controls = [
        "A - Move Left",
        "D - Move Right",
        "SPACE - Jump",
        "Left Click - Shoot",
        "ESC - Pause Game",
        "F3 - Toggle Debug Mode",
    ];
    for (i, line) in controls.iter().enumerate() {
        list.text_centered(*line, WIDTH / 2.0, 150.0 + i as f32 * 50.0, font::MENU, colors::WHITE);
    }

    list.text_centered("Press ESC to return", WIDTH / 2.0, 500.0, font::MENU, colors::RED);
}

fn draw_player(list: &mut DrawList, player: &Player, sprites: &SpriteLibrary, debug: bool) {
    let rect = player.screen_rect();
    draw_character(
        list,
        &sprites.player,
        rect,
        player.anim.state.as_str(),
        player.facing,
        player.anim.frame,
        player.hit_flash > 0,
        colors::PLAYER,
    );
    if debug {
        list.rect_outline(rect, 1.0, colors::DEBUG_OUTLINE);
    }
}

/// Sprite frame if the entity kind has art, otherwise a colored box with a
/// facing marker
#[allow(clippy::too_many_arguments)]
fn draw_character(
    list: &mut DrawList,
    appearance: &Appearance,
    rect: Rect,
    state: &str,
    facing: Facing,
    frame: usize,
    flashing: bool,
    body_color: [f32; 4],
) {
    let sprite = match appearance {
        Appearance::Sprites(set) => set.frame(state, facing, frame),
        Appearance::Primitive => None,
    };

    match sprite {
        Some((handle, flip_x)) => {
            list.sprite(handle, rect, flip_x);
            if flashing {
                list.rect(rect, colors::with_alpha(colors::HIT_FLASH, 0.4));
            }
        }
        None => {
            let color = if flashing { colors::HIT_FLASH } else { body_color };
            list.rect(rect, color);

            let eye_y = rect.y + rect.h * 0.25;
            let (edge, tip) = match facing {
                Facing::Right => (rect.right() - 8.0, rect.right() + 2.0),
                Facing::Left => (rect.x + 8.0, rect.x - 2.0),
            };
            list.triangle(
                Vec2::new(edge, eye_y - 5.0),
                Vec2::new(tip, eye_y),
                Vec2::new(edge, eye_y + 5.0),
                colors::BLACK,
            );
        }
    }
}

fn draw_zombie(
    list: &mut DrawList,
    zombie: &Zombie,
    camera_x: f32,
    sprites: &SpriteLibrary,
    debug: bool,
) {
    let rect = zombie.screen_rect(camera_x);
    if rect.x <= -rect.w || rect.x >= WIDTH + rect.w {
        return;
    }

    draw_character(
        list,
        &sprites.zombie,
        rect,
        zombie.anim.state.as_str(),
        zombie.facing,
        zombie.anim.frame,
        zombie.hit_flash > 0,
        colors::ZOMBIE,
    );

    draw_bar(
        list,
        Rect::new(rect.x, rect.y - 10.0, rect.w, 5.0),
        health_fraction(zombie.health, zombie.max_health),
        colors::RED,
    );

    if debug {
        list.rect_outline(rect, 1.0, colors::DEBUG_OUTLINE);
    }
}

fn draw_projectile(list: &mut DrawList, projectile: &Projectile, camera_x: f32, debug: bool) {
    let center = Vec2::new(world_to_screen_x(projectile.pos.x, camera_x), projectile.pos.y);
    list.circle(center, projectile.radius, colors::PROJECTILE);
    if debug {
        list.circle_outline(center, projectile.radius, 1.0, colors::DEBUG_OUTLINE);
    }
}

fn draw_obstacle(list: &mut DrawList, obstacle: &Obstacle, camera_x: f32) {
    let rect = obstacle.rect.shifted_x(-camera_x);
    if rect.right() <= 0.0 || rect.x >= WIDTH {
        return;
    }
    list.rect(rect, colors::OBSTACLE);

    if obstacle.damage > 0 {
        let spikes = (rect.w / SPIKE_WIDTH).floor() as usize;
        for i in 0..spikes {
            let x = rect.x + i as f32 * SPIKE_WIDTH;
            list.triangle(
                Vec2::new(x, rect.y),
                Vec2::new(x + SPIKE_WIDTH / 2.0, rect.y - 10.0),
                Vec2::new(x + SPIKE_WIDTH, rect.y),
                colors::SPIKE,
            );
        }
    }
}

/// Health, score, wave counter and wave progress
pub fn draw_hud(list: &mut DrawList, session: &GameSession) {
    let player = &session.player;
    draw_bar(
        list,
        Rect::new(10.0, 10.0, HUD_BAR_WIDTH, 20.0),
        health_fraction(player.health, player.max_health),
        colors::RED,
    );
    list.text(
        format!("Health: {}/{}", player.health.max(0), player.max_health),
        Vec2::new(10.0, 40.0),
        font::UI,
        colors::WHITE,
    );
    list.text(
        format!("Score: {}", session.score),
        Vec2::new(10.0, 70.0),
        font::UI,
        colors::WHITE,
    );
    list.text(
        format!("Wave: {}/{}", session.wave, session.max_waves),
        Vec2::new(10.0, 100.0),
        font::UI,
        colors::WHITE,
    );

    let progress = if session.max_waves == 0 {
        1.0
    } else {
        (session.wave as f32 / session.max_waves as f32).min(1.0)
    };
    draw_bar(
        list,
        Rect::new(10.0, 130.0, HUD_BAR_WIDTH, 10.0),
        progress,
        colors::GREEN,
    );

    list.text(
        format!("Enemies: {}", session.wave_enemies_remaining),
        Vec2::new(10.0, 150.0),
        font::DEBUG,
        colors::WHITE,
    );
}

/// State readout in the top right plus the recent debug messages
pub fn draw_debug_panel(list: &mut DrawList, session: &GameSession, log: &DebugLog) {
    let player = &session.player;
    list.rect(Rect::new(WIDTH - 300.0, 10.0, 290.0, 200.0), colors::OVERLAY);

    let lines = [
        format!("Player Pos: ({:.1}, {:.1})", player.pos.x, player.pos.y),
        format!(
            "World Pos: ({:.1}, {:.1})",
            session.player_world_x(),
            player.pos.y
        ),
        format!("Camera Offset: {:.1}", session.camera_x),
        format!("Enemies: {}", session.zombies.len()),
        format!("Projectiles: {}", session.projectiles.len()),
        format!("On Ground: {}", player.on_ground),
        format!("Health: {}", player.health.max(0)),
    ];
    for (i, line) in lines.into_iter().enumerate() {
        list.text(
            line,
            Vec2::new(WIDTH - 290.0, 15.0 + i as f32 * 20.0),
            font::DEBUG,
            colors::WHITE,
        );
    }

    let mut y = HEIGHT - 30.0 * log.len() as f32 - 10.0;
    for message in log.recent() {
        list.text(
            message.text.as_str(),
            Vec2::new(10.0, y),
            font::DEBUG,
            colors::WHITE,
        );
        y += 20.0;
    }
}

/// A full gameplay frame. `debug` enables collision outlines and the panel.
pub fn draw_gameplay(
    list: &mut DrawList,
    session: &GameSession,
    sprites: &SpriteLibrary,
    debug: Option<&DebugLog>,
) {
    let camera_x = session.camera_x;
    let debug_mode = debug.is_some();

    draw_background(list, sprites, camera_x);

    for platform in &session.level.platforms {
        list.rect(platform.rect.shifted_x(-camera_x), colors::PLATFORM);
    }
    for obstacle in &session.level.obstacles {
        draw_obstacle(list, obstacle, camera_x);
    }

    draw_player(list, &session.player, sprites, debug_mode);
    for zombie in &session.zombies {
        draw_zombie(list, zombie, camera_x, sprites, debug_mode);
    }
    for projectile in &session.projectiles {
        draw_projectile(list, projectile, camera_x, debug_mode);
    }

    draw_hud(list, session);

    if let Some(log) = debug {
        draw_debug_panel(list, session, log);
    }
}

/// Captured gameplay frame behind a dimming overlay and the pause menu
pub fn draw_pause(list: &mut DrawList, backdrop: &DrawList, options: &[&str], selected: usize) {
    list.extend_from(backdrop);
    list.fill(colors::OVERLAY);
    list.text_centered("Game Paused", WIDTH / 2.0, 100.0, font::TITLE, colors::YELLOW);
    draw_options(list, options, selected, 250.0, colors::RED, |_| false);
}

pub fn draw_game_over(list: &mut DrawList, score: u64, options: &[&str], selected: usize) {
    list.fill(colors::BLACK);
    list.text_centered("Game Over", WIDTH / 2.0, 100.0, font::TITLE, colors::RED);
    list.text_centered(
        format!("Final Score: {}", score),
        WIDTH / 2.0,
        180.0,
        font::MENU,
        colors::WHITE,
    );
    draw_options(list, options, selected, 300.0, colors::RED, |_| false);
}

pub fn draw_victory(
    list: &mut DrawList,
    score: u64,
    wave: u32,
    max_waves: u32,
    options: &[&str],
    selected: usize,
) {
    // Dark to light blue, top to bottom
    const BANDS: u32 = 60;
    let band_h = HEIGHT / BANDS as f32;
    for i in 0..BANDS {
        let y = i as f32 * band_h;
        let blue = (50.0 + (y / HEIGHT) * 150.0) / 255.0;
        list.rect(Rect::new(0.0, y, WIDTH, band_h), [0.0, 0.0, blue, 1.0]);
    }

    let banner = Rect::new(WIDTH / 2.0 - 300.0, 80.0, 600.0, 100.0);
    list.rect(banner, colors::BANNER);
    list.rect_outline(banner, 3.0, colors::YELLOW);
    list.text_centered("VICTORY!", WIDTH / 2.0, 100.0, font::TITLE, colors::YELLOW);

    list.rect(
        Rect::new(WIDTH / 2.0 - 200.0, 200.0, 400.0, 150.0),
        colors::OVERLAY,
    );
    list.text_centered(
        format!("Final Score: {}", score),
        WIDTH / 2.0,
        220.0,
        font::MENU,
        colors::WHITE,
    );
    list.text_centered(
        format!("Waves Completed: {}/{}", wave, max_waves),
        WIDTH / 2.0,
        270.0,
        font::MENU,
        colors::WHITE,
    );
    list.text_centered(
        "You have defeated all the zombie waves!",
        WIDTH / 2.0,
        320.0,
        font::UI,
        colors::WHITE,
    );

    draw_options(list, options, selected, 400.0, colors::YELLOW, |_| false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawCommand;
    use crate::sim::{Level, Obstacle};

    fn session() -> GameSession {
        let level = Level {
            number: 1,
            ..Default::default()
        };
        GameSession::new(level, MAX_WAVES, 5)
    }

    fn count_sprites(list: &DrawList) -> usize {
        list.commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { .. }))
            .count()
    }

    #[test]
    fn test_health_fraction_clamps() {
        assert_eq!(health_fraction(50, 100), 0.5);
        assert_eq!(health_fraction(-20, 100), 0.0);
        assert_eq!(health_fraction(150, 100), 1.0);
        assert_eq!(health_fraction(10, 0), 0.0);
    }

    #[test]
    fn test_hud_text() {
        let mut s = session();
        s.score = 300;
        s.player.health = -5;
        let mut list = DrawList::new();
        draw_hud(&mut list, &s);
        let texts: Vec<&str> = list.texts().collect();
        assert!(texts.contains(&"Health: 0/100"));
        assert!(texts.contains(&"Score: 300"));
        assert!(texts.contains(&"Wave: 1/10"));
        // Empty health bar fill
        assert!(list.commands().iter().any(|c| matches!(
            c,
            DrawCommand::Rect { rect, color } if *color == colors::RED && rect.w == 0.0
        )));
    }

    #[test]
    fn test_debug_panel_clamps_health() {
        let mut s = session();
        s.player.health = -15;
        let mut log = DebugLog::new(3);
        log.push("Player took 20 damage");
        let mut list = DrawList::new();
        draw_debug_panel(&mut list, &s, &log);
        let texts: Vec<&str> = list.texts().collect();
        assert!(texts.contains(&"Health: 0"));
        assert!(texts.iter().any(|t| t.contains("Player took 20 damage")));
    }

    #[test]
    fn test_offscreen_zombies_are_culled() {
        let mut s = session();
        s.zombies.clear();
        s.zombies.push(Zombie::new(400.0, 100.0));
        s.zombies.push(Zombie::new(5000.0, 100.0));
        s.zombies.push(Zombie::new(-500.0, 100.0));
        let mut list = DrawList::new();
        draw_gameplay(&mut list, &s, &SpriteLibrary::primitive(), None);
        let zombie_bodies = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { color, .. } if *color == colors::ZOMBIE))
            .count();
        assert_eq!(zombie_bodies, 1);
    }

    #[test]
    fn test_debug_outlines_only_in_debug_mode() {
        let s = session();
        let lib = SpriteLibrary::primitive();
        let outlines = |list: &DrawList| {
            list.commands()
                .iter()
                .filter(|c| matches!(c, DrawCommand::RectOutline { color, .. } if *color == colors::DEBUG_OUTLINE))
                .count()
        };

        let mut plain = DrawList::new();
        draw_gameplay(&mut plain, &s, &lib, None);
        assert_eq!(outlines(&plain), 0);

        let mut log = DebugLog::new(10);
        log.push("Player jumped");
        let mut debug = DrawList::new();
        draw_gameplay(&mut debug, &s, &lib, Some(&log));
        assert!(outlines(&debug) >= 1);
        assert!(debug.texts().any(|t| t == "Player jumped"));
        assert!(debug.texts().any(|t| t.starts_with("Camera Offset:")));
    }

    #[test]
    fn test_hazard_draws_spikes() {
        let mut list = DrawList::new();
        draw_obstacle(&mut list, &Obstacle::hazard(100.0, 480.0, 45.0, 20.0, 10), 0.0);
        let spikes = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Triangle { .. }))
            .count();
        assert_eq!(spikes, 4);

        let mut list = DrawList::new();
        draw_obstacle(&mut list, &Obstacle::wall(100.0, 480.0, 45.0, 20.0, false), 0.0);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_parallax_layers_drawn_as_sprites() {
        use crate::assets::SpriteHandle;
        use crate::parallax::ParallaxLayer;

        let mut lib = SpriteLibrary::primitive();
        lib.background.add_layer(ParallaxLayer {
            handle: SpriteHandle(1),
            width: 500.0,
            height: 600.0,
            scroll_speed: 0.2,
        });
        let mut list = DrawList::new();
        draw_background(&mut list, &lib, 1000.0);
        assert_eq!(count_sprites(&list), 2);
        assert!(!list.commands().iter().any(|c| matches!(c, DrawCommand::Fill { .. })));
    }

    #[test]
    fn test_locked_level_is_grey() {
        let mut list = DrawList::new();
        draw_level_select(
            &mut list,
            &SpriteLibrary::primitive(),
            &["Level 1", "Level 2 (Locked)", "Back"],
            1,
            &[false, true, false],
        );
        assert_eq!(list.text_color("Level 2 (Locked)"), Some(colors::LOCKED));
        assert_eq!(list.text_color("Level 1"), Some(colors::WHITE));
    }

    #[test]
    fn test_pause_draws_over_backdrop() {
        let mut backdrop = DrawList::new();
        backdrop.text("Score: 100", Vec2::ZERO, font::UI, colors::WHITE);
        let mut list = DrawList::new();
        draw_pause(&mut list, &backdrop, &["Resume", "Controls", "Quit to Menu"], 0);
        let texts: Vec<&str> = list.texts().collect();
        assert_eq!(texts[0], "Score: 100");
        assert!(texts.contains(&"Game Paused"));
        assert_eq!(list.text_color("Resume"), Some(colors::RED));
    }

    #[test]
    fn test_victory_text() {
        let mut list = DrawList::new();
        draw_victory(&mut list, 5000, 10, 10, &["Next Level", "Main Menu"], 0);
        assert!(list.texts().any(|t| t == "Waves Completed: 10/10"));
        assert_eq!(list.text_color("Next Level"), Some(colors::YELLOW));
    }
}
