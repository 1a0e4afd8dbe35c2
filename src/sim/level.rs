//! Level geometry: platforms to stand on and obstacles that block or hurt
//!
//! Levels are static once built. Two levels ship with the game; a level may
//! also be read from a JSON file with the same shape.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::{GROUND_LEVEL, HEIGHT, WIDTH};

/// A static surface that falling bodies land on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
}

impl Platform {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
        }
    }

    /// World-space y of the walkable top edge
    #[inline]
    pub fn top(&self) -> f32 {
        self.rect.y
    }
}

fn default_damage() -> i32 {
    10
}

fn default_true() -> bool {
    true
}

/// A static hazard or wall with per-entity-kind blocking flags
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
    /// Damage dealt to the player per tick of overlap (0 = harmless wall)
    #[serde(default = "default_damage")]
    pub damage: i32,
    #[serde(default = "default_true")]
    pub blocks_player: bool,
    #[serde(default = "default_true")]
    pub blocks_enemies: bool,
    #[serde(default)]
    pub blocks_projectiles: bool,
}

impl Obstacle {
    /// Ground hazard: damages, blocks player and enemies, lets shots through
    pub const fn hazard(x: f32, y: f32, w: f32, h: f32, damage: i32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            damage,
            blocks_player: true,
            blocks_enemies: true,
            blocks_projectiles: false,
        }
    }

    /// Harmless wall with explicit blocking flags
    pub const fn wall(x: f32, y: f32, w: f32, h: f32, blocks_projectiles: bool) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            damage: 0,
            blocks_player: true,
            blocks_enemies: true,
            blocks_projectiles,
        }
    }
}

/// Errors reading a level file
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("failed to read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse level file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Platforms and obstacles of one level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Level {
    pub number: u32,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
}

impl Level {
    /// Build one of the shipped levels. Unknown numbers give an empty level
    /// (the world floor still holds everything up).
    pub fn builtin(number: u32) -> Self {
        let mut platforms = Vec::new();
        let mut obstacles = Vec::new();
        let g = GROUND_LEVEL;

        match number {
            1 => {
                // Ground spans the whole level
                platforms.push(Platform::new(0.0, g, WIDTH * 4.0, HEIGHT - g));

                platforms.push(Platform::new(300.0, g - 120.0, 200.0, 20.0));
                platforms.push(Platform::new(600.0, g - 200.0, 200.0, 20.0));

                // Gap with a hazard
                obstacles.push(Obstacle::hazard(800.0, g - 10.0, 100.0, 10.0, 20));
                platforms.push(Platform::new(900.0, g - 150.0, 200.0, 20.0));

                // Elevated section, hazard underneath
                platforms.push(Platform::new(1200.0, g - 250.0, 300.0, 20.0));
                obstacles.push(Obstacle::hazard(1250.0, g - 50.0, 200.0, 10.0, 15));

                platforms.push(Platform::new(1600.0, g - 180.0, 100.0, 20.0));
                platforms.push(Platform::new(1800.0, g - 130.0, 100.0, 20.0));
                platforms.push(Platform::new(2000.0, g - 200.0, 150.0, 20.0));

                // Wall: stops bodies, not shots
                obstacles.push(Obstacle::wall(2300.0, g - 150.0, 20.0, 150.0, false));
                platforms.push(Platform::new(2400.0, g - 100.0, 300.0, 20.0));

                platforms.push(Platform::new(2800.0, g - 150.0, 100.0, 20.0));
                obstacles.push(Obstacle::hazard(2900.0, g - 10.0, 150.0, 10.0, 25));
                platforms.push(Platform::new(3050.0, g - 180.0, 100.0, 20.0));
                platforms.push(Platform::new(3250.0, g - 220.0, 150.0, 20.0));
            }
            2 => {
                platforms.push(Platform::new(0.0, g, WIDTH * 5.0, HEIGHT - g));

                // Lower path with hazards
                obstacles.push(Obstacle::hazard(300.0, g - 15.0, 80.0, 15.0, 10));
                obstacles.push(Obstacle::hazard(600.0, g - 15.0, 120.0, 15.0, 15));
                obstacles.push(Obstacle::hazard(900.0, g - 15.0, 150.0, 15.0, 20));

                // Upper path
                platforms.push(Platform::new(200.0, g - 150.0, 80.0, 20.0));
                platforms.push(Platform::new(400.0, g - 200.0, 80.0, 20.0));
                platforms.push(Platform::new(600.0, g - 250.0, 80.0, 20.0));
                platforms.push(Platform::new(800.0, g - 300.0, 120.0, 20.0));

                platforms.push(Platform::new(1000.0, g - 200.0, 300.0, 20.0));
                obstacles.push(Obstacle::hazard(1150.0, g - 240.0, 100.0, 20.0, 25));

                // Staircase
                for i in 0..5 {
                    let i = i as f32;
                    platforms.push(Platform::new(
                        1400.0 + i * 150.0,
                        g - 120.0 - i * 40.0,
                        80.0,
                        20.0,
                    ));
                }

                obstacles.push(Obstacle::wall(2300.0, g - 200.0, 30.0, 200.0, false));

                platforms.push(Platform::new(2400.0, g - 150.0, 100.0, 20.0));
                platforms.push(Platform::new(2600.0, g - 200.0, 100.0, 20.0));
                platforms.push(Platform::new(2800.0, g - 250.0, 100.0, 20.0));
                platforms.push(Platform::new(3000.0, g - 300.0, 150.0, 20.0));
                obstacles.push(Obstacle::hazard(3000.0, g - 50.0, 250.0, 20.0, 30));

                platforms.push(Platform::new(3300.0, g - 150.0, 300.0, 20.0));
            }
            _ => {
                log::warn!("No built-in layout for level {}, using an empty level", number);
            }
        }

        Self {
            number,
            platforms,
            obstacles,
        }
    }

    /// Parse a level from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read a level from a JSON file
    pub fn load(path: &Path) -> Result<Self, LevelError> {
        let json = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| LevelError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `level_<n>.json` from `dir` if given, falling back to the
    /// built-in layout on any error
    pub fn load_or_builtin(dir: Option<&Path>, number: u32) -> Self {
        let Some(dir) = dir else {
            return Self::builtin(number);
        };
        let path = dir.join(format!("level_{}.json", number));
        if !path.exists() {
            return Self::builtin(number);
        }
        match Self::load(&path) {
            Ok(mut level) => {
                log::info!("Loaded level {} from {}", number, path.display());
                level.number = number;
                level
            }
            Err(e) => {
                log::warn!("{}; using built-in level {}", e, number);
                Self::builtin(number)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_levels_have_ground() {
        for n in 1..=crate::consts::LEVEL_COUNT {
            let level = Level::builtin(n);
            assert_eq!(level.number, n);
            assert!(
                level
                    .platforms
                    .iter()
                    .any(|p| p.top() == GROUND_LEVEL && p.rect.x == 0.0),
                "level {} has no ground platform",
                n
            );
            assert!(!level.obstacles.is_empty());
        }
    }

    #[test]
    fn test_unknown_level_is_empty() {
        let level = Level::builtin(99);
        assert!(level.platforms.is_empty());
        assert!(level.obstacles.is_empty());
    }

    #[test]
    fn test_wall_lets_projectiles_through() {
        let level = Level::builtin(1);
        let wall = level
            .obstacles
            .iter()
            .find(|o| o.damage == 0)
            .expect("level 1 has a wall");
        assert!(wall.blocks_player && wall.blocks_enemies);
        assert!(!wall.blocks_projectiles);
    }

    #[test]
    fn test_from_json_defaults() {
        let json = r#"{
            "number": 3,
            "platforms": [ { "rect": { "x": 0, "y": 500, "w": 100, "h": 20 } } ],
            "obstacles": [ { "rect": { "x": 50, "y": 490, "width": 10, "height": 10 } } ]
        }"#;
        let level = Level::from_json(json).unwrap();
        assert_eq!(level.number, 3);
        assert_eq!(level.platforms.len(), 1);
        let o = level.obstacles[0];
        assert_eq!(o.damage, 10);
        assert!(o.blocks_player);
        assert!(o.blocks_enemies);
        assert!(!o.blocks_projectiles);
        assert_eq!(o.rect.w, 10.0);
    }

    #[test]
    fn test_load_or_builtin_falls_back() {
        let dir = std::env::temp_dir().join("zombie_fighters_level_test_missing");
        let level = Level::load_or_builtin(Some(&dir), 2);
        assert_eq!(level.platforms.len(), Level::builtin(2).platforms.len());
    }

    #[test]
    fn test_load_or_builtin_reads_file() {
        let dir = std::env::temp_dir().join(format!("zf_levels_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("level_1.json"),
            r#"{ "number": 7, "platforms": [], "obstacles": [] }"#,
        )
        .unwrap();
        let level = Level::load_or_builtin(Some(&dir), 1);
        assert_eq!(level.number, 1);
        assert!(level.platforms.is_empty());

        std::fs::write(dir.join("level_2.json"), "not json").unwrap();
        let level = Level::load_or_builtin(Some(&dir), 2);
        assert!(!level.platforms.is_empty());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
