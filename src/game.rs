//! Top-level screen state machine
//!
//! `Game` owns the active [`Screen`], the debug feed, and the sprite library.
//! Each frame the driver forwards input with [`Game::handle_event`], advances
//! with [`Game::update`] and records a frame with [`Game::draw`]. Drawing never
//! mutates anything.

use std::mem;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::assets::SpriteLibrary;
use crate::consts::LEVEL_COUNT;
use crate::debug::DebugLog;
use crate::renderer::DrawList;
use crate::settings::Settings;
use crate::sim::{GameSession, Level, TickInput, TickOutcome, tick};
use crate::ui;

/// Logical keys; the presenter maps physical keys onto these
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Jump,
    Confirm,
    /// Pause in gameplay, back out of menus
    Back,
    DebugToggle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Primary pointer button at a screen position
    PointerDown { pos: Vec2 },
    Quit,
}

/// A fixed list of menu entries
trait MenuItem: Copy + Sized + 'static {
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|o| o.label()).collect()
    }

    fn at(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Play,
    LevelSelect,
    Controls,
    Exit,
}

impl MenuItem for MenuOption {
    const ALL: &'static [Self] = &[Self::Play, Self::LevelSelect, Self::Controls, Self::Exit];

    fn label(self) -> &'static str {
        match self {
            Self::Play => "Play",
            Self::LevelSelect => "Level Select",
            Self::Controls => "Controls",
            Self::Exit => "Exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOption {
    Level1,
    Level2Locked,
    Back,
}

impl MenuItem for LevelOption {
    const ALL: &'static [Self] = &[Self::Level1, Self::Level2Locked, Self::Back];

    fn label(self) -> &'static str {
        match self {
            Self::Level1 => "Level 1",
            Self::Level2Locked => "Level 2 (Locked)",
            Self::Back => "Back",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseOption {
    Resume,
    Controls,
    QuitToMenu,
}

impl MenuItem for PauseOption {
    const ALL: &'static [Self] = &[Self::Resume, Self::Controls, Self::QuitToMenu];

    fn label(self) -> &'static str {
        match self {
            Self::Resume => "Resume",
            Self::Controls => "Controls",
            Self::QuitToMenu => "Quit to Menu",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverOption {
    TryAgain,
    MainMenu,
}

impl MenuItem for GameOverOption {
    const ALL: &'static [Self] = &[Self::TryAgain, Self::MainMenu];

    fn label(self) -> &'static str {
        match self {
            Self::TryAgain => "Try Again",
            Self::MainMenu => "Main Menu",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VictoryOption {
    NextLevel,
    MainMenu,
}

impl MenuItem for VictoryOption {
    const ALL: &'static [Self] = &[Self::NextLevel, Self::MainMenu];

    fn label(self) -> &'static str {
        match self {
            Self::NextLevel => "Next Level",
            Self::MainMenu => "Main Menu",
        }
    }
}

/// Move a menu cursor with wrap-around
fn step_selection(selected: usize, len: usize, key: Key) -> usize {
    if len == 0 {
        return 0;
    }
    match key {
        Key::Up => (selected + len - 1) % len,
        Key::Down => (selected + 1) % len,
        _ => selected,
    }
}

/// The active screen and the data it owns
#[derive(Debug, Clone)]
pub enum Screen {
    Menu {
        selected: usize,
    },
    LevelSelect {
        selected: usize,
    },
    Controls,
    Gameplay(Box<GameSession>),
    Pause {
        session: Box<GameSession>,
        /// Gameplay frame captured when pausing
        backdrop: DrawList,
        selected: usize,
    },
    GameOver {
        score: u64,
        level: u32,
        selected: usize,
    },
    Victory {
        score: u64,
        wave: u32,
        level: u32,
        selected: usize,
    },
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Menu { .. } => "Menu",
            Screen::LevelSelect { .. } => "LevelSelect",
            Screen::Controls => "Controls",
            Screen::Gameplay(_) => "Gameplay",
            Screen::Pause { .. } => "Pause",
            Screen::GameOver { .. } => "GameOver",
            Screen::Victory { .. } => "Victory",
        }
    }

    /// Active or paused session
    pub fn session(&self) -> Option<&GameSession> {
        match self {
            Screen::Gameplay(session) | Screen::Pause { session, .. } => Some(&**session),
            _ => None,
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Menu { selected: 0 }
    }
}

/// Application driver: screen state machine plus presentation context
pub struct Game {
    screen: Screen,
    settings: Settings,
    debug_mode: bool,
    debug_log: DebugLog,
    sprites: SpriteLibrary,
    /// Source of per-session seeds
    seeds: Pcg32,
    quit: bool,
}

impl Game {
    /// Build the driver once the sprite library exists. Starts on the menu.
    pub fn new(settings: Settings, debug_log: DebugLog, sprites: SpriteLibrary) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("Game seed: {}", seed);
        Self {
            screen: Screen::default(),
            debug_mode: settings.debug_mode,
            settings,
            debug_log,
            sprites,
            seeds: Pcg32::seed_from_u64(seed),
            quit: false,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn debug_log(&self) -> &DebugLog {
        &self.debug_log
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit => {
                log::info!("Quit requested");
                self.quit = true;
            }
            InputEvent::KeyDown(Key::DebugToggle) => {
                self.debug_mode = !self.debug_mode;
                let state = if self.debug_mode { "enabled" } else { "disabled" };
                self.debug_log.push(format!("Debug mode {}", state));
            }
            event => {
                let screen = mem::take(&mut self.screen);
                let from = screen.name();
                let next = self.screen_event(screen, event);
                self.set_screen(from, next);
            }
        }
    }

    /// Advance the active screen by one frame
    pub fn update(&mut self) {
        let mut session = match mem::take(&mut self.screen) {
            Screen::Gameplay(session) => session,
            other => {
                self.screen = other;
                return;
            }
        };

        let input = TickInput {
            idle_mode: self.settings.idle_mode,
        };
        let outcome = tick(&mut session, &input);
        self.forward_events(&mut session);

        let next = match outcome {
            TickOutcome::Continue => Screen::Gameplay(session),
            TickOutcome::GameOver { score } => Screen::GameOver {
                score,
                level: session.level_number(),
                selected: 0,
            },
            TickOutcome::Victory { score, wave, level } => Screen::Victory {
                score,
                wave,
                level,
                selected: 0,
            },
        };
        self.set_screen("Gameplay", next);
    }

    /// Record the current frame
    pub fn draw(&self, list: &mut DrawList) {
        match &self.screen {
            Screen::Menu { selected } => {
                ui::draw_menu(list, &self.sprites, &MenuOption::labels(), *selected);
            }
            Screen::LevelSelect { selected } => {
                let locked: Vec<bool> = LevelOption::ALL
                    .iter()
                    .map(|o| *o == LevelOption::Level2Locked)
                    .collect();
                ui::draw_level_select(
                    list,
                    &self.sprites,
                    &LevelOption::labels(),
                    *selected,
                    &locked,
                );
            }
            Screen::Controls => ui::draw_controls(list),
            Screen::Gameplay(session) => self.draw_session(list, session),
            Screen::Pause {
                backdrop, selected, ..
            } => ui::draw_pause(list, backdrop, &PauseOption::labels(), *selected),
            Screen::GameOver {
                score, selected, ..
            } => ui::draw_game_over(list, *score, &GameOverOption::labels(), *selected),
            Screen::Victory {
                score,
                wave,
                selected,
                ..
            } => ui::draw_victory(
                list,
                *score,
                *wave,
                self.settings.max_waves,
                &VictoryOption::labels(),
                *selected,
            ),
        }
    }

    fn draw_session(&self, list: &mut DrawList, session: &GameSession) {
        let debug = self.debug_mode.then_some(&self.debug_log);
        ui::draw_gameplay(list, session, &self.sprites, debug);
    }

    fn set_screen(&mut self, from: &'static str, next: Screen) {
        if from != next.name() {
            log::info!("Screen: {} -> {}", from, next.name());
        }
        self.screen = next;
    }

    fn forward_events(&mut self, session: &mut GameSession) {
        for event in session.drain_events() {
            self.debug_log.push(event.to_string());
        }
    }

    /// Fresh session for `level`; replaces any previous run entirely
    fn start_level(&mut self, level: u32) -> Screen {
        let seed = self.seeds.random::<u64>();
        log::info!("Starting level {} (seed {})", level, seed);
        self.debug_log.clear();
        let level = Level::load_or_builtin(self.settings.level_dir.as_deref(), level);
        let mut session = GameSession::new(level, self.settings.max_waves, seed);
        self.forward_events(&mut session);
        Screen::Gameplay(Box::new(session))
    }

    fn screen_event(&mut self, screen: Screen, event: InputEvent) -> Screen {
        match screen {
            Screen::Menu { selected } => self.menu_event(selected, event),
            Screen::LevelSelect { selected } => self.level_select_event(selected, event),
            Screen::Controls => match event {
                InputEvent::KeyDown(Key::Back) => Screen::Menu { selected: 0 },
                _ => Screen::Controls,
            },
            Screen::Gameplay(session) => self.gameplay_event(session, event),
            Screen::Pause {
                session,
                backdrop,
                selected,
            } => self.pause_event(session, backdrop, selected, event),
            Screen::GameOver {
                score,
                level,
                selected,
            } => match event {
                InputEvent::KeyDown(Key::Confirm) => match GameOverOption::at(selected) {
                    Some(GameOverOption::TryAgain) => self.start_level(level),
                    _ => Screen::Menu { selected: 0 },
                },
                InputEvent::KeyDown(key) => Screen::GameOver {
                    score,
                    level,
                    selected: step_selection(selected, GameOverOption::ALL.len(), key),
                },
                _ => Screen::GameOver {
                    score,
                    level,
                    selected,
                },
            },
            Screen::Victory {
                score,
                wave,
                level,
                selected,
            } => match event {
                InputEvent::KeyDown(Key::Confirm) => match VictoryOption::at(selected) {
                    Some(VictoryOption::NextLevel) if level < LEVEL_COUNT => {
                        self.start_level(level + 1)
                    }
                    _ => Screen::Menu { selected: 0 },
                },
                InputEvent::KeyDown(key) => Screen::Victory {
                    score,
                    wave,
                    level,
                    selected: step_selection(selected, VictoryOption::ALL.len(), key),
                },
                _ => Screen::Victory {
                    score,
                    wave,
                    level,
                    selected,
                },
            },
        }
    }

    fn menu_event(&mut self, selected: usize, event: InputEvent) -> Screen {
        match event {
            InputEvent::KeyDown(Key::Confirm) => match MenuOption::at(selected) {
                Some(MenuOption::Play) => self.start_level(1),
                Some(MenuOption::LevelSelect) => Screen::LevelSelect { selected: 0 },
                Some(MenuOption::Controls) => Screen::Controls,
                Some(MenuOption::Exit) | None => {
                    log::info!("Exit selected");
                    self.quit = true;
                    Screen::Menu { selected }
                }
            },
            InputEvent::KeyDown(key) => Screen::Menu {
                selected: step_selection(selected, MenuOption::ALL.len(), key),
            },
            _ => Screen::Menu { selected },
        }
    }

    fn level_select_event(&mut self, selected: usize, event: InputEvent) -> Screen {
        match event {
            InputEvent::KeyDown(Key::Confirm) => match LevelOption::at(selected) {
                Some(LevelOption::Level1) => self.start_level(1),
                Some(LevelOption::Level2Locked) => {
                    log::debug!("Level 2 is locked");
                    Screen::LevelSelect { selected }
                }
                Some(LevelOption::Back) | None => Screen::Menu { selected: 0 },
            },
            InputEvent::KeyDown(Key::Back) => Screen::Menu { selected: 0 },
            InputEvent::KeyDown(key) => Screen::LevelSelect {
                selected: step_selection(selected, LevelOption::ALL.len(), key),
            },
            _ => Screen::LevelSelect { selected },
        }
    }

    fn gameplay_event(&mut self, mut session: Box<GameSession>, event: InputEvent) -> Screen {
        match event {
            InputEvent::KeyDown(Key::Left) => session.player.set_moving_left(true),
            InputEvent::KeyUp(Key::Left) => session.player.set_moving_left(false),
            InputEvent::KeyDown(Key::Right) => session.player.set_moving_right(true),
            InputEvent::KeyUp(Key::Right) => session.player.set_moving_right(false),
            InputEvent::KeyDown(Key::Jump) => session.jump(),
            InputEvent::PointerDown { pos } => session.shoot(pos),
            InputEvent::KeyDown(Key::Back) => {
                // Keys released while paused never reach the session
                session.player.set_moving_left(false);
                session.player.set_moving_right(false);
                let mut backdrop = DrawList::new();
                self.draw_session(&mut backdrop, &session);
                return Screen::Pause {
                    session,
                    backdrop,
                    selected: 0,
                };
            }
            _ => {}
        }
        self.forward_events(&mut session);
        Screen::Gameplay(session)
    }

    fn pause_event(
        &mut self,
        session: Box<GameSession>,
        backdrop: DrawList,
        selected: usize,
        event: InputEvent,
    ) -> Screen {
        match event {
            InputEvent::KeyDown(Key::Back) => Screen::Gameplay(session),
            InputEvent::KeyDown(Key::Confirm) => match PauseOption::at(selected) {
                Some(PauseOption::Resume) => Screen::Gameplay(session),
                Some(PauseOption::Controls) => Screen::Controls,
                Some(PauseOption::QuitToMenu) | None => Screen::Menu { selected: 0 },
            },
            InputEvent::KeyDown(key) => Screen::Pause {
                session,
                backdrop,
                selected: step_selection(selected, PauseOption::ALL.len(), key),
            },
            _ => Screen::Pause {
                session,
                backdrop,
                selected,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn game() -> Game {
        let settings = Settings {
            seed: Some(7),
            ..Default::default()
        };
        Game::new(settings, DebugLog::new(10), SpriteLibrary::primitive())
    }

    fn press(game: &mut Game, key: Key) {
        game.handle_event(InputEvent::KeyDown(key));
        game.handle_event(InputEvent::KeyUp(key));
    }

    fn session_mut(game: &mut Game) -> &mut GameSession {
        match &mut game.screen {
            Screen::Gameplay(session) => session,
            other => panic!("not in gameplay: {}", other.name()),
        }
    }

    #[test]
    fn test_starts_on_menu() {
        let g = game();
        assert!(matches!(g.screen(), Screen::Menu { selected: 0 }));
        assert!(!g.should_quit());
    }

    #[test]
    fn test_menu_selection_wraps() {
        let mut g = game();
        press(&mut g, Key::Up);
        assert!(matches!(g.screen(), Screen::Menu { selected: 3 }));
        press(&mut g, Key::Down);
        assert!(matches!(g.screen(), Screen::Menu { selected: 0 }));
    }

    #[test]
    fn test_play_starts_level_one() {
        let mut g = game();
        press(&mut g, Key::Confirm);
        let session = g.screen().session().unwrap();
        assert_eq!(session.level_number(), 1);
        assert_eq!(session.wave, 1);
        assert!(g.debug_log().recent().any(|m| m.text.starts_with("Wave 1/10")));
    }

    #[test]
    fn test_exit_sets_quit() {
        let mut g = game();
        press(&mut g, Key::Up);
        press(&mut g, Key::Confirm);
        assert!(g.should_quit());
    }

    #[test]
    fn test_level_select_locked_and_back() {
        let mut g = game();
        press(&mut g, Key::Down);
        press(&mut g, Key::Confirm);
        assert!(matches!(g.screen(), Screen::LevelSelect { selected: 0 }));
        press(&mut g, Key::Down);
        press(&mut g, Key::Confirm);
        assert!(matches!(g.screen(), Screen::LevelSelect { selected: 1 }));
        press(&mut g, Key::Back);
        assert!(matches!(g.screen(), Screen::Menu { .. }));
    }

    #[test]
    fn test_controls_back_to_menu() {
        let mut g = game();
        press(&mut g, Key::Down);
        press(&mut g, Key::Down);
        press(&mut g, Key::Confirm);
        assert!(matches!(g.screen(), Screen::Controls));
        press(&mut g, Key::Confirm);
        assert!(matches!(g.screen(), Screen::Controls));
        press(&mut g, Key::Back);
        assert!(matches!(g.screen(), Screen::Menu { .. }));
    }

    #[test]
    fn test_movement_input_reaches_player() {
        let mut g = game();
        press(&mut g, Key::Confirm);
        g.handle_event(InputEvent::KeyDown(Key::Right));
        g.update();
        assert!(session_mut(&mut g).player.pos.x > PLAYER_SPAWN_X);
        g.handle_event(InputEvent::KeyUp(Key::Right));
        assert!(!session_mut(&mut g).player.moving_right);
    }

    #[test]
    fn test_pointer_shoots() {
        let mut g = game();
        press(&mut g, Key::Confirm);
        g.handle_event(InputEvent::PointerDown {
            pos: Vec2::new(600.0, 300.0),
        });
        assert_eq!(session_mut(&mut g).projectiles.len(), 1);
        assert!(
            g.debug_log()
                .recent()
                .any(|m| m.text.starts_with("Projectile created"))
        );
    }

    #[test]
    fn test_pause_keeps_session_and_freezes_it() {
        let mut g = game();
        press(&mut g, Key::Confirm);
        g.update();
        let ticks = g.screen().session().unwrap().time_ticks;

        press(&mut g, Key::Back);
        match g.screen() {
            Screen::Pause { backdrop, .. } => assert!(!backdrop.is_empty()),
            other => panic!("expected pause, got {}", other.name()),
        }
        g.update();
        assert_eq!(g.screen().session().unwrap().time_ticks, ticks);

        let mut frame = DrawList::new();
        g.draw(&mut frame);
        assert!(frame.texts().any(|t| t == "Game Paused"));

        press(&mut g, Key::Back);
        assert!(matches!(g.screen(), Screen::Gameplay(_)));
        assert_eq!(g.screen().session().unwrap().time_ticks, ticks);
    }

    #[test]
    fn test_pause_quit_to_menu_discards_session() {
        let mut g = game();
        press(&mut g, Key::Confirm);
        press(&mut g, Key::Back);
        press(&mut g, Key::Up);
        press(&mut g, Key::Confirm);
        assert!(matches!(g.screen(), Screen::Menu { .. }));
        assert!(g.screen().session().is_none());
    }

    #[test]
    fn test_death_goes_to_game_over_and_retry_restarts() {
        let mut g = game();
        press(&mut g, Key::Confirm);
        {
            let s = session_mut(&mut g);
            s.player.health = 1;
            s.score = 1200;
            s.level.obstacles.push(crate::sim::Obstacle::hazard(
                0.0,
                GROUND_LEVEL - 10.0,
                WIDTH,
                10.0,
                5,
            ));
        }
        g.update();
        assert!(matches!(
            g.screen(),
            Screen::GameOver {
                score: 1200,
                level: 1,
                ..
            }
        ));
        assert!(g.debug_log().recent().any(|m| m.text == "Player died! Final score: 1200"));

        press(&mut g, Key::Confirm);
        let session = g.screen().session().unwrap();
        assert_eq!(session.score, 0);
        assert_eq!(session.player.health, PLAYER_MAX_HEALTH);
        assert_eq!(session.wave, 1);
    }

    #[test]
    fn test_victory_then_next_level() {
        let mut g = game();
        press(&mut g, Key::Confirm);
        {
            let s = session_mut(&mut g);
            s.wave = s.max_waves;
            s.zombies.clear();
            s.score = 9000;
        }
        g.update();
        assert!(matches!(
            g.screen(),
            Screen::Victory {
                score: 9000,
                wave: 10,
                level: 1,
                ..
            }
        ));

        let mut frame = DrawList::new();
        g.draw(&mut frame);
        assert!(frame.texts().any(|t| t == "VICTORY!"));

        press(&mut g, Key::Confirm);
        assert_eq!(g.screen().session().unwrap().level_number(), 2);
    }

    #[test]
    fn test_victory_on_last_level_returns_to_menu() {
        let mut g = game();
        g.screen = Screen::Victory {
            score: 1,
            wave: 10,
            level: LEVEL_COUNT,
            selected: 0,
        };
        press(&mut g, Key::Confirm);
        assert!(matches!(g.screen(), Screen::Menu { .. }));
    }

    #[test]
    fn test_debug_toggle_everywhere() {
        let mut g = game();
        press(&mut g, Key::DebugToggle);
        assert!(g.debug_mode());
        assert!(g.debug_log().recent().any(|m| m.text == "Debug mode enabled"));
        press(&mut g, Key::Confirm);
        press(&mut g, Key::DebugToggle);
        assert!(!g.debug_mode());
        assert!(matches!(g.screen(), Screen::Gameplay(_)));
    }

    #[test]
    fn test_draw_is_read_only() {
        let mut g = game();
        press(&mut g, Key::Confirm);
        g.update();
        let before = g.screen().session().unwrap().clone();
        let mut a = DrawList::new();
        let mut b = DrawList::new();
        g.draw(&mut a);
        g.draw(&mut b);
        assert_eq!(a, b);
        let after = g.screen().session().unwrap();
        assert_eq!(before.time_ticks, after.time_ticks);
        assert_eq!(before.camera_x, after.camera_x);
    }

    #[test]
    fn test_quit_event() {
        let mut g = game();
        g.handle_event(InputEvent::Quit);
        assert!(g.should_quit());
    }
}
