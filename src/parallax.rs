//! Parallax background layers
//!
//! Each layer scrolls at a fraction of the camera speed and is tiled
//! horizontally to cover the viewport. Layers whose image is missing are
//! skipped; with no layers at all the primitive sky is drawn instead.

use std::path::Path;

use crate::assets::{AssetError, ImageLoader, SpriteHandle};

/// Background art files and their scroll speeds, back to front. Entries in
/// the same group are alternatives: the first one found is used.
const LAYER_FILES: &[(&[&str], f32)] = &[
    (&["assetpack sky1.png", "assetpack sky2.png"], 0.0),
    (&["assetpack bg3.png"], 0.1),
    (&["assetpack bg2.png"], 0.2),
    (&["assetpack bg1.png"], 0.3),
    (&["assetpack smog large.png"], 0.4),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxLayer {
    pub handle: SpriteHandle,
    pub width: f32,
    pub height: f32,
    /// Fraction of camera travel applied to this layer (0 = fixed)
    pub scroll_speed: f32,
}

impl ParallaxLayer {
    /// Left edge of the first tile, in `(-width, 0]`
    pub fn offset(&self, camera_x: f32) -> f32 {
        if self.width <= 0.0 {
            return 0.0;
        }
        -(camera_x * self.scroll_speed).rem_euclid(self.width)
    }

    /// Screen x of every tile needed to cover `[0, screen_width)`
    pub fn tile_positions(&self, camera_x: f32, screen_width: f32) -> Vec<f32> {
        if self.width <= 0.0 {
            return Vec::new();
        }
        let mut xs = Vec::new();
        let mut x = self.offset(camera_x);
        while x < screen_width {
            xs.push(x);
            x += self.width;
        }
        xs
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParallaxBackground {
    layers: Vec<ParallaxLayer>,
}

impl ParallaxBackground {
    /// Load whichever of the known layer images exist under `dir`
    pub fn discover(loader: &mut dyn ImageLoader, dir: &Path) -> Self {
        let mut background = Self::default();
        for (candidates, speed) in LAYER_FILES {
            for name in candidates.iter() {
                match loader.load(&dir.join(name)) {
                    Ok(image) => {
                        background.add_layer(ParallaxLayer {
                            handle: image.handle,
                            width: image.width as f32,
                            height: image.height as f32,
                            scroll_speed: *speed,
                        });
                        break;
                    }
                    Err(AssetError::NotFound(_)) => {}
                    Err(e) => log::warn!("Skipping parallax layer: {}", e),
                }
            }
        }
        if background.is_empty() {
            log::warn!(
                "No parallax layers in {}, using primitive background",
                dir.display()
            );
        } else {
            log::info!("Loaded {} parallax layers", background.layers.len());
        }
        background
    }

    pub fn add_layer(&mut self, layer: ParallaxLayer) {
        self.layers.push(layer);
    }

    /// Layers back to front
    pub fn layers(&self) -> &[ParallaxLayer] {
        &self.layers
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::tests::FakeLoader;

    fn layer(width: f32, speed: f32) -> ParallaxLayer {
        ParallaxLayer {
            handle: SpriteHandle(0),
            width,
            height: 600.0,
            scroll_speed: speed,
        }
    }

    #[test]
    fn test_offset_scrolls_and_wraps() {
        let l = layer(1000.0, 0.5);
        assert_eq!(l.offset(0.0), 0.0);
        assert_eq!(l.offset(100.0), -50.0);
        // 2100 * 0.5 = 1050 wraps to 50
        assert_eq!(l.offset(2100.0), -50.0);
    }

    #[test]
    fn test_fixed_layer_never_moves() {
        let l = layer(800.0, 0.0);
        assert_eq!(l.offset(12345.0), 0.0);
    }

    #[test]
    fn test_tiles_cover_screen() {
        let l = layer(300.0, 1.0);
        let xs = l.tile_positions(100.0, 800.0);
        assert_eq!(xs, vec![-100.0, 200.0, 500.0]);
        assert!(xs[0] <= 0.0);
        assert!(xs.last().copied().unwrap_or(0.0) + 300.0 >= 800.0);
    }

    #[test]
    fn test_zero_width_layer_draws_nothing() {
        assert!(layer(0.0, 0.3).tile_positions(50.0, 800.0).is_empty());
    }

    #[test]
    fn test_discover_uses_present_files_only() {
        let mut loader = FakeLoader::with_files([
            "assets/background/assetpack sky2.png",
            "assets/background/assetpack bg1.png",
        ]);
        let bg = ParallaxBackground::discover(&mut loader, Path::new("assets/background"));
        let speeds: Vec<f32> = bg.layers().iter().map(|l| l.scroll_speed).collect();
        assert_eq!(speeds, vec![0.0, 0.3]);
    }

    #[test]
    fn test_sky_prefers_first_variant() {
        let mut loader = FakeLoader::with_files([
            "assets/background/assetpack sky1.png",
            "assets/background/assetpack sky2.png",
        ]);
        let bg = ParallaxBackground::discover(&mut loader, Path::new("assets/background"));
        assert_eq!(bg.layers().len(), 1);
        assert_eq!(loader.loads, 1);
    }
}
