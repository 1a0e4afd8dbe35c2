//! Zombie Fighters entry point
//!
//! Builds the presentation context, then runs the fixed-tick frame loop.
//! Without a window backend attached each frame is tessellated and dropped;
//! uncapped runs are always played by the autopilot.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use zombie_fighters::assets::{FsImageLoader, SpriteLibrary};
use zombie_fighters::renderer::{DrawList, Vertex, tessellate};
use zombie_fighters::{DebugLog, Game, InputEvent, Key, Screen, Settings};

fn open_debug_log(settings: &Settings) -> DebugLog {
    let Some(path) = &settings.debug_log_file else {
        return DebugLog::new(settings.debug_history);
    };
    DebugLog::with_file(settings.debug_history, path).unwrap_or_else(|e| {
        log::warn!(
            "Cannot open debug log {}: {}; file output disabled",
            path.display(),
            e
        );
        DebugLog::new(settings.debug_history)
    })
}

fn main() {
    env_logger::init();
    log::info!("Zombie Fighters (native) starting...");

    let mut settings = Settings::load(&Settings::config_path());
    settings.prepare_headless();

    // Display context first, then everything that depends on loaded art
    let debug_log = open_debug_log(&settings);
    let mut loader = FsImageLoader::new();
    let sprites = SpriteLibrary::load(&mut loader, &settings.asset_root);
    log::info!("{} images loaded", loader.len());

    let frame_budget = Duration::from_secs_f32(settings.frame_time());
    let max_frames = settings.max_frames;
    let report_every = u64::from(settings.target_fps.max(1)) * 5;
    let mut game = Game::new(settings, debug_log, sprites);

    // Menu -> Play
    let mut pending: VecDeque<InputEvent> = VecDeque::from([
        InputEvent::KeyDown(Key::Confirm),
        InputEvent::KeyUp(Key::Confirm),
    ]);

    let mut frame = DrawList::new();
    let mut frames: u64 = 0;

    loop {
        let started = Instant::now();

        while let Some(event) = pending.pop_front() {
            game.handle_event(event);
        }
        game.update();

        frame.clear();
        game.draw(&mut frame);
        let vertices = tessellate(&frame);
        frames += 1;

        if frames % report_every == 0 {
            if let Some(session) = game.screen().session() {
                log::info!(
                    "frame {}: wave {}/{}, score {}, health {}, camera {:.0}",
                    frames,
                    session.wave,
                    session.max_waves,
                    session.score,
                    session.player.health,
                    session.camera_x
                );
            }
            log::debug!(
                "{} draw commands, {} vertex bytes",
                frame.len(),
                Vertex::as_bytes(&vertices).len()
            );
        }

        match game.screen() {
            Screen::GameOver { score, level, .. } => {
                log::info!("Game over on level {} with score {}", level, score);
                break;
            }
            Screen::Victory { score, wave, level, .. } => {
                log::info!(
                    "Victory on level {} after {} waves with score {}",
                    level,
                    wave,
                    score
                );
                break;
            }
            _ => {}
        }
        if game.should_quit() {
            break;
        }
        if max_frames.is_some_and(|max| frames >= max) {
            log::info!("Frame limit {} reached", frames);
            break;
        }

        if let Some(rest) = frame_budget.checked_sub(started.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    log::info!("Exiting after {} frames", frames);
}
