//! Presentation hand-off
//!
//! Screens are recorded as screen-space draw commands. Shape commands are
//! tessellated into colored triangles; sprites and text are left to the
//! presenter that owns the window.

pub mod draw;
pub mod shapes;
pub mod vertex;

pub use draw::{DrawCommand, DrawList, TextAlign, font};
pub use shapes::tessellate;
pub use vertex::{Vertex, colors};
