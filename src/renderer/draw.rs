//! Screen-space draw commands
//!
//! The UI layer records what to draw into a [`DrawList`]; the presenter
//! turns shape commands into triangles with [`tessellate`](super::tessellate)
//! and blits sprites and text itself.

use glam::Vec2;

use crate::assets::SpriteHandle;
use crate::sim::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    /// `pos.x` is the horizontal center of the text
    Center,
}

/// Font sizes used by the screens
pub mod font {
    pub const TITLE: f32 = 80.0;
    pub const MENU: f32 = 50.0;
    pub const UI: f32 = 36.0;
    pub const DEBUG: f32 = 24.0;
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Cover the whole viewport
    Fill { color: [f32; 4] },
    Rect { rect: Rect, color: [f32; 4] },
    RectOutline { rect: Rect, thickness: f32, color: [f32; 4] },
    /// Ellipse inscribed in `rect`
    Ellipse { rect: Rect, color: [f32; 4] },
    Circle { center: Vec2, radius: f32, color: [f32; 4] },
    CircleOutline { center: Vec2, radius: f32, thickness: f32, color: [f32; 4] },
    Triangle { points: [Vec2; 3], color: [f32; 4] },
    Sprite { handle: SpriteHandle, rect: Rect, flip_x: bool },
    Text { text: String, pos: Vec2, size: f32, color: [f32; 4], align: TextAlign },
}

/// Ordered list of draw commands for one frame, back to front
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Append every command of another list (e.g. a captured frame)
    pub fn extend_from(&mut self, other: &DrawList) {
        self.commands.extend(other.commands.iter().cloned());
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn fill(&mut self, color: [f32; 4]) {
        self.push(DrawCommand::Fill { color });
    }

    pub fn rect(&mut self, rect: Rect, color: [f32; 4]) {
        self.push(DrawCommand::Rect { rect, color });
    }

    pub fn rect_outline(&mut self, rect: Rect, thickness: f32, color: [f32; 4]) {
        self.push(DrawCommand::RectOutline {
            rect,
            thickness,
            color,
        });
    }

    pub fn ellipse(&mut self, rect: Rect, color: [f32; 4]) {
        self.push(DrawCommand::Ellipse { rect, color });
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        self.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    pub fn circle_outline(&mut self, center: Vec2, radius: f32, thickness: f32, color: [f32; 4]) {
        self.push(DrawCommand::CircleOutline {
            center,
            radius,
            thickness,
            color,
        });
    }

    pub fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
        self.push(DrawCommand::Triangle {
            points: [a, b, c],
            color,
        });
    }

    pub fn sprite(&mut self, handle: SpriteHandle, rect: Rect, flip_x: bool) {
        self.push(DrawCommand::Sprite {
            handle,
            rect,
            flip_x,
        });
    }

    pub fn text(&mut self, text: impl Into<String>, pos: Vec2, size: f32, color: [f32; 4]) {
        self.push(DrawCommand::Text {
            text: text.into(),
            pos,
            size,
            color,
            align: TextAlign::Left,
        });
    }

    /// Text horizontally centered on `center_x`
    pub fn text_centered(&mut self, text: impl Into<String>, center_x: f32, y: f32, size: f32, color: [f32; 4]) {
        self.push(DrawCommand::Text {
            text: text.into(),
            pos: Vec2::new(center_x, y),
            size,
            color,
            align: TextAlign::Center,
        });
    }

    /// All text strings in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Text color of the first string equal to `needle`
    pub fn text_color(&self, needle: &str) -> Option<[f32; 4]> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::Text { text, color, .. } if text == needle => Some(*color),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut list = DrawList::new();
        list.fill([0.0; 4]);
        list.text("Score: 0", Vec2::new(10.0, 70.0), font::UI, [1.0; 4]);
        list.rect(Rect::new(0.0, 0.0, 1.0, 1.0), [1.0; 4]);
        assert_eq!(list.len(), 3);
        assert!(matches!(list.commands()[0], DrawCommand::Fill { .. }));
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["Score: 0"]);
        assert_eq!(list.text_color("Score: 0"), Some([1.0; 4]));
    }

    #[test]
    fn test_extend_from_copies_frame() {
        let mut frame = DrawList::new();
        frame.circle(Vec2::ZERO, 5.0, [1.0; 4]);
        let mut list = DrawList::new();
        list.extend_from(&frame);
        list.extend_from(&frame);
        assert_eq!(list.len(), 2);
        assert_eq!(frame.len(), 1);
    }
}
