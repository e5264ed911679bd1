use bytemuck::{Pod, Zeroable};
use color::{AlphaColor, PremulColor, Srgb};
use euclid::default::{Box2D, Rect};
use lyon::math::Point;
use serde::{Deserialize, Serialize};

pub mod recording;
pub mod surface;
pub mod tessellate;

pub use recording::{DrawCommand, RecordingSurface};
pub use surface::{PaintState, Surface};
pub use tessellate::MeshSurface;

/// A straight (non-premultiplied) alpha sRGB color, used for every paint style.
pub type Color = AlphaColor<Srgb>;

/// Builds a color from its red, green, blue and alpha channels, each in `0..=1`.
pub const fn rgba(red: f32, green: f32, blue: f32, alpha: f32) -> Color {
    AlphaColor::new([red, green, blue, alpha])
}

/// Parses a CSS color string such as `"black"`, `"#305e6e"` or `"rgba(48, 94, 110, 1)"`.
pub fn parse_color(value: &str) -> Result<Color, color::ParseError> {
    Ok(color::parse_color(value)?.to_alpha_color::<Srgb>())
}

/// Indexed triangles, ready to be uploaded as a vertex and an index buffer.
#[derive(Deserialize, Serialize, Default, Clone, Debug)]
pub struct Mesh<V: Clone + Pod + Zeroable> {
    pub vertices: Vec<V>,
    pub indices: Vec<u32>,
}

impl<V> Mesh<V>
where
    V: Clone + Pod + Zeroable,
{
    pub const fn empty() -> Self {
        Self {
            vertices: vec![],
            indices: vec![],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn append(&mut self, indexed: &Mesh<V>) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend(&indexed.vertices);
        self.indices
            .extend(indexed.indices.iter().map(|i| offset + i))
    }
}

impl Mesh<Vertex> {
    pub fn new_color_quad(area: Box2D<f32>, kind: VertexKind) -> Self {
        let vertices = vec![
            Vertex::with_color(area.min, kind),
            Vertex::with_color(Point::new(area.max.x, area.min.y), kind),
            Vertex::with_color(area.max, kind),
            Vertex::with_color(Point::new(area.min.x, area.max.y), kind),
        ];
        let indices = vec![0, 1, 2, 0, 2, 3];

        Mesh { vertices, indices }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum VertexKind {
    /// Blended over whatever was drawn before.
    Color(PremulColor<Srgb>),
    /// Replaces whatever was drawn before with full transparency.
    Clear,
}

impl VertexKind {
    #[inline]
    pub const fn kind_id(&self) -> u32 {
        match self {
            VertexKind::Color(_) => 0,
            VertexKind::Clear => 1,
        }
    }
    #[inline]
    pub const fn color(&self) -> PremulColor<Srgb> {
        match self {
            VertexKind::Color(color) => *color,
            VertexKind::Clear => PremulColor::new([0., 0., 0., 0.]),
        }
    }
}

impl From<Color> for VertexKind {
    fn from(value: Color) -> Self {
        VertexKind::Color(value.premultiply())
    }
}

/// A generic vertex type for rendering.
#[repr(C)]
#[derive(Copy, Clone, Debug, Deserialize, Serialize, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
    pub kind: u32,
}

impl Vertex {
    pub const fn with_color(position: Point, kind: VertexKind) -> Self {
        Self {
            position: [position.x, position.y],
            color: kind.color().components,
            kind: kind.kind_id(),
        }
    }
}

pub const fn make_positive_box(mut area: Box2D<f32>) -> Box2D<f32> {
    if area.min.x > area.max.x {
        std::mem::swap(&mut area.min.x, &mut area.max.x);
    };
    if area.min.y > area.max.y {
        std::mem::swap(&mut area.min.y, &mut area.max.y);
    };
    area
}

/// Converts a rectangle that may have a negative width or height into a box spanning the same area.
pub fn positive_box(rect: &Rect<f32>) -> Box2D<f32> {
    make_positive_box(Box2D::new(
        rect.origin,
        rect.origin + rect.size.to_vector(),
    ))
}
