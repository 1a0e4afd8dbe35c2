//! Sprite loading with a permanent primitive-shape fallback
//!
//! Character art lives in per-state, per-direction, per-frame files:
//!
//! ```text
//! assets/player/idle_right_0.png ... walking_left_3.png
//! assets/enemies/run_right_0.png ... attack_left_3.png
//! ```
//!
//! Missing left-facing frames are replaced by mirrored right-facing ones.
//! Whether an entity kind uses sprites or primitives is decided once, when the
//! [`SpriteLibrary`] is built, and never retried.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::consts::ANIMATION_FRAMES;
use crate::parallax::ParallaxBackground;
use crate::sim::{Facing, PlayerAnim, ZombieAnim};

/// Errors from the image loading collaborator
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Opaque reference to a loaded image, resolved by the presenter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedImage {
    pub handle: SpriteHandle,
    pub width: u32,
    pub height: u32,
}

/// Loads an image file and hands back a drawable handle
pub trait ImageLoader {
    fn load(&mut self, path: &Path) -> Result<LoadedImage, AssetError>;
}

/// Decodes PNG files from disk and keeps the RGBA pixels for upload
#[derive(Debug, Default)]
pub struct FsImageLoader {
    images: Vec<image::RgbaImage>,
}

impl FsImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pixels behind a handle
    pub fn image(&self, handle: SpriteHandle) -> Option<&image::RgbaImage> {
        self.images.get(handle.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ImageLoader for FsImageLoader {
    fn load(&mut self, path: &Path) -> Result<LoadedImage, AssetError> {
        if !path.is_file() {
            return Err(AssetError::NotFound(path.to_path_buf()));
        }
        let decoded = image::open(path).map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        let handle = SpriteHandle(self.images.len() as u32);
        self.images.push(rgba);
        Ok(LoadedImage {
            handle,
            width,
            height,
        })
    }
}

/// Frames of one animation state in both directions
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalFrames {
    pub right: Vec<SpriteHandle>,
    /// Empty when the left-facing art is mirrored from `right`
    pub left: Vec<SpriteHandle>,
}

impl DirectionalFrames {
    /// Frame for a facing and index, plus whether it must be drawn mirrored.
    /// Out-of-range indices fall back to frame 0.
    pub fn frame(&self, facing: Facing, index: usize) -> Option<(SpriteHandle, bool)> {
        let (frames, flip_x) = match facing {
            Facing::Right => (&self.right, false),
            Facing::Left if self.left.is_empty() => (&self.right, true),
            Facing::Left => (&self.left, false),
        };
        frames
            .get(index)
            .or_else(|| frames.first())
            .map(|&handle| (handle, flip_x))
    }
}

/// All animation states of one entity kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationSet {
    states: HashMap<&'static str, DirectionalFrames>,
}

impl AnimationSet {
    /// Load `{state}_{right|left}_{i}.png` for every state under `dir`.
    ///
    /// Frames are read in order until the first missing index. A state with
    /// no right-facing frame at all fails the whole set.
    pub fn discover(
        loader: &mut dyn ImageLoader,
        dir: &Path,
        states: &[&'static str],
        max_frames: usize,
    ) -> Result<Self, AssetError> {
        let mut set = Self::default();
        for &state in states {
            let right = load_frames(loader, dir, state, Facing::Right, max_frames)?;
            if right.is_empty() {
                return Err(AssetError::NotFound(frame_path(dir, state, Facing::Right, 0)));
            }
            let left = load_frames(loader, dir, state, Facing::Left, max_frames)?;
            if left.is_empty() {
                log::debug!("No left-facing {} frames in {}, mirroring", state, dir.display());
            }
            set.states.insert(state, DirectionalFrames { right, left });
        }
        Ok(set)
    }

    pub fn get(&self, state: &str) -> Option<&DirectionalFrames> {
        self.states.get(state)
    }

    /// Resolve a frame; unknown states fall back to frame 0 of nothing
    pub fn frame(&self, state: &str, facing: Facing, index: usize) -> Option<(SpriteHandle, bool)> {
        self.get(state).and_then(|f| f.frame(facing, index))
    }
}

fn frame_path(dir: &Path, state: &str, facing: Facing, index: usize) -> PathBuf {
    dir.join(format!("{}_{}_{}.png", state, facing.as_str(), index))
}

fn load_frames(
    loader: &mut dyn ImageLoader,
    dir: &Path,
    state: &str,
    facing: Facing,
    max_frames: usize,
) -> Result<Vec<SpriteHandle>, AssetError> {
    let mut frames = Vec::new();
    for i in 0..max_frames {
        match loader.load(&frame_path(dir, state, facing, i)) {
            Ok(image) => frames.push(image.handle),
            Err(AssetError::NotFound(_)) => break,
            Err(e) => return Err(e),
        }
    }
    Ok(frames)
}

/// How an entity kind is drawn for the whole run
#[derive(Debug, Clone, PartialEq)]
pub enum Appearance {
    Sprites(AnimationSet),
    /// Colored rectangle plus a facing indicator
    Primitive,
}

impl Appearance {
    /// Try the sprite set once; any failure means primitives for good
    pub fn load(
        loader: &mut dyn ImageLoader,
        dir: &Path,
        states: &[&'static str],
        what: &str,
    ) -> Self {
        match AnimationSet::discover(loader, dir, states, ANIMATION_FRAMES) {
            Ok(set) => {
                log::info!("Loaded {} sprites from {}", what, dir.display());
                Appearance::Sprites(set)
            }
            Err(e) => {
                log::warn!("{} sprites unavailable ({}), using primitive shapes", what, e);
                Appearance::Primitive
            }
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Appearance::Primitive)
    }
}

/// Every asset-dependent piece of presentation state, built once after the
/// loader exists
#[derive(Debug, Clone)]
pub struct SpriteLibrary {
    pub player: Appearance,
    pub zombie: Appearance,
    pub background: ParallaxBackground,
}

impl SpriteLibrary {
    pub fn load(loader: &mut dyn ImageLoader, asset_root: &Path) -> Self {
        let player_states = [PlayerAnim::Idle.as_str(), PlayerAnim::Walking.as_str()];
        let zombie_states = [
            ZombieAnim::Run.as_str(),
            ZombieAnim::Idle.as_str(),
            ZombieAnim::Attack.as_str(),
        ];
        Self {
            player: Appearance::load(loader, &asset_root.join("player"), &player_states, "Player"),
            zombie: Appearance::load(loader, &asset_root.join("enemies"), &zombie_states, "Zombie"),
            background: ParallaxBackground::discover(loader, &asset_root.join("background")),
        }
    }

    /// Everything drawn with primitives
    pub fn primitive() -> Self {
        Self {
            player: Appearance::Primitive,
            zombie: Appearance::Primitive,
            background: ParallaxBackground::default(),
        }
    }
}

impl Default for SpriteLibrary {
    fn default() -> Self {
        Self::primitive()
    }
}
