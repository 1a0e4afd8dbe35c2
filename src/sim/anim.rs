//! Facing direction and animation clock shared by player and zombies
//!
//! The simulation only tracks which animation is playing and which frame of
//! a fixed-length cycle it is on. Sprite sets may have fewer frames than the
//! cycle; the presentation layer resolves that at draw time.

use serde::{Deserialize, Serialize};

use crate::consts::{ANIMATION_FRAMES, TICKS_PER_ANIMATION_FRAME};

/// Horizontal facing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Asset file-name fragment for this direction
    pub fn as_str(&self) -> &'static str {
        match self {
            Facing::Left => "left",
            Facing::Right => "right",
        }
    }

    /// Unit x direction (-1 or +1)
    pub fn sign(&self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Playing animation plus its frame position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Animation<S> {
    pub state: S,
    pub frame: usize,
    ticks: u32,
}

impl<S: Copy + PartialEq> Animation<S> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            frame: 0,
            ticks: 0,
        }
    }

    /// Switch animation; restarts the cycle only when the state changes
    pub fn set(&mut self, state: S) {
        if self.state != state {
            self.state = state;
            self.frame = 0;
            self.ticks = 0;
        }
    }

    /// Advance one simulation tick
    pub fn advance(&mut self) {
        self.ticks += 1;
        if self.ticks >= TICKS_PER_ANIMATION_FRAME {
            self.ticks = 0;
            self.frame = (self.frame + 1) % ANIMATION_FRAMES;
        }
    }
}
