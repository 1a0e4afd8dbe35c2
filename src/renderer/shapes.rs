//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::draw::{DrawCommand, DrawList};
use super::vertex::Vertex;
use crate::consts::{HEIGHT, WIDTH};
use crate::sim::Rect;

/// Segments used for circles and ellipses
const CURVE_SEGMENTS: u32 = 24;

/// Generate vertices for a filled rectangle (two triangles)
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    if r.w <= 0.0 || r.h <= 0.0 {
        return Vec::new();
    }
    let (x0, y0, x1, y1) = (r.x, r.y, r.right(), r.bottom());
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Rectangle border drawn inside `r`
pub fn rect_outline(r: &Rect, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness.min(r.w / 2.0).min(r.h / 2.0);
    if t <= 0.0 {
        return Vec::new();
    }
    let mut vertices = Vec::with_capacity(24);
    vertices.extend(rect(&Rect::new(r.x, r.y, r.w, t), color));
    vertices.extend(rect(&Rect::new(r.x, r.bottom() - t, r.w, t), color));
    vertices.extend(rect(&Rect::new(r.x, r.y + t, t, r.h - 2.0 * t), color));
    vertices.extend(rect(&Rect::new(r.right() - t, r.y + t, t, r.h - 2.0 * t), color));
    vertices
}

/// Generate vertices for a filled ellipse
pub fn ellipse(center: Vec2, radii: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse(center, Vec2::splat(radius), color, segments)
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);
    let at = |r: f32, theta: f32| Vec2::new(center.x + r * theta.cos(), center.y + r * theta.sin());

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = at(inner_radius, theta1);
        let outer1 = at(outer_radius, theta1);
        let inner2 = at(inner_radius, theta2);
        let outer2 = at(outer_radius, theta2);

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

pub fn triangle(points: &[Vec2; 3], color: [f32; 4]) -> Vec<Vertex> {
    points.iter().map(|p| Vertex::new(p.x, p.y, color)).collect()
}

/// Triangulate every shape command of a frame. Sprite and text commands
/// produce no vertices; the presenter blits those itself.
pub fn tessellate(list: &DrawList) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for command in list.commands() {
        match command {
            DrawCommand::Fill { color } => {
                vertices.extend(rect(&Rect::new(0.0, 0.0, WIDTH, HEIGHT), *color));
            }
            DrawCommand::Rect { rect: r, color } => vertices.extend(rect(r, *color)),
            DrawCommand::RectOutline {
                rect: r,
                thickness,
                color,
            } => vertices.extend(rect_outline(r, *thickness, *color)),
            DrawCommand::Ellipse { rect: r, color } => vertices.extend(ellipse(
                r.center(),
                Vec2::new(r.w / 2.0, r.h / 2.0),
                *color,
                CURVE_SEGMENTS,
            )),
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => vertices.extend(circle(*center, *radius, *color, CURVE_SEGMENTS)),
            DrawCommand::CircleOutline {
                center,
                radius,
                thickness,
                color,
            } => vertices.extend(ring(
                *center,
                (radius - thickness).max(0.0),
                *radius,
                *color,
                CURVE_SEGMENTS,
            )),
            DrawCommand::Triangle { points, color } => vertices.extend(triangle(points, *color)),
            DrawCommand::Sprite { .. } | DrawCommand::Text { .. } => {}
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_vertices() {
        let v = rect(&Rect::new(10.0, 20.0, 30.0, 40.0), [1.0; 4]);
        assert_eq!(v.len(), 6);
        assert_eq!(v[0].position, [10.0, 20.0]);
        assert_eq!(v[5].position, [40.0, 60.0]);
    }

    #[test]
    fn test_empty_rect_has_no_vertices() {
        assert!(rect(&Rect::new(10.0, 10.0, 0.0, 5.0), [1.0; 4]).is_empty());
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let center = Vec2::new(50.0, 50.0);
        for v in circle(center, 5.0, [1.0; 4], 16) {
            let p = Vec2::from(v.position);
            assert!(p.distance(center) <= 5.0 + 1e-4);
        }
    }

    #[test]
    fn test_tessellate_skips_sprites_and_text() {
        let mut list = DrawList::new();
        list.rect(Rect::new(0.0, 0.0, 5.0, 5.0), [1.0; 4]);
        list.text("hi", Vec2::ZERO, 12.0, [1.0; 4]);
        list.sprite(crate::assets::SpriteHandle(0), Rect::new(0.0, 0.0, 5.0, 5.0), false);
        list.triangle(Vec2::ZERO, Vec2::X, Vec2::Y, [1.0; 4]);
        assert_eq!(tessellate(&list).len(), 9);
    }

    #[test]
    fn test_outline_ring_and_box() {
        let mut list = DrawList::new();
        list.rect_outline(Rect::new(0.0, 0.0, 40.0, 60.0), 1.0, [1.0; 4]);
        list.circle_outline(Vec2::ZERO, 5.0, 1.0, [1.0; 4]);
        assert_eq!(tessellate(&list).len(), 24 + CURVE_SEGMENTS as usize * 6);
    }
}
