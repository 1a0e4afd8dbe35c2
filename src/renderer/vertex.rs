//! Vertex type handed to the presenter

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with screen-space position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Raw bytes for a vertex buffer upload
    pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}

/// Colors for game elements
pub mod colors {
    /// 8-bit RGB to linear-ish float RGBA
    pub const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    pub const fn with_alpha(c: [f32; 4], a: f32) -> [f32; 4] {
        [c[0], c[1], c[2], a]
    }

    pub const WHITE: [f32; 4] = rgb(255, 255, 255);
    pub const BLACK: [f32; 4] = rgb(0, 0, 0);
    pub const RED: [f32; 4] = rgb(200, 0, 0);
    pub const YELLOW: [f32; 4] = rgb(255, 255, 0);
    pub const GREEN: [f32; 4] = rgb(0, 255, 0);
    pub const GRAY: [f32; 4] = rgb(150, 150, 150);
    pub const LOCKED: [f32; 4] = rgb(128, 128, 128);
    pub const BAR_BACKGROUND: [f32; 4] = rgb(100, 100, 100);

    pub const PLAYER: [f32; 4] = GREEN;
    pub const ZOMBIE: [f32; 4] = rgb(150, 75, 0);
    pub const HIT_FLASH: [f32; 4] = RED;
    pub const PROJECTILE: [f32; 4] = YELLOW;
    pub const PLATFORM: [f32; 4] = GRAY;
    pub const OBSTACLE: [f32; 4] = rgb(200, 0, 0);
    pub const SPIKE: [f32; 4] = rgb(255, 0, 0);
    pub const DEBUG_OUTLINE: [f32; 4] = rgb(255, 0, 255);

    pub const SKY: [f32; 4] = rgb(135, 206, 235);
    pub const CLOUD: [f32; 4] = WHITE;
    pub const MOUNTAIN: [f32; 4] = rgb(100, 100, 100);
    pub const DIRT: [f32; 4] = rgb(101, 67, 33);
    pub const GRASS: [f32; 4] = rgb(76, 153, 0);

    pub const OVERLAY: [f32; 4] = with_alpha(BLACK, 0.5);
    pub const BANNER: [f32; 4] = rgb(50, 50, 100);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_bytes() {
        let v = [Vertex::new(1.0, 2.0, colors::WHITE); 3];
        assert_eq!(Vertex::as_bytes(&v).len(), 3 * 6 * 4);
    }

    #[test]
    fn test_rgb_conversion() {
        assert_eq!(colors::rgb(255, 0, 255), [1.0, 0.0, 1.0, 1.0]);
        assert_eq!(colors::OVERLAY[3], 0.5);
    }
}
