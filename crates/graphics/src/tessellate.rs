use euclid::Angle;
use euclid::default::{Point2D, Rect};
use lyon::math::{Point, Vector, vector};
use lyon::path::{Path, Winding};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, StrokeOptions,
    StrokeTessellator, StrokeVertex, VertexBuffers,
};
use tracing::{trace, warn};

use crate::surface::clockwise_sweep;
use crate::{Color, Mesh, PaintState, Surface, Vertex, VertexKind, positive_box};

#[derive(Clone, Copy, Debug, PartialEq)]
enum PathOp {
    MoveTo(Point),
    LineTo(Point),
    Arc {
        center: Point,
        radius: f32,
        start: Angle<f32>,
        sweep: Angle<f32>,
    },
    Close,
}

/// A surface that tessellates everything drawn on it into a single triangle mesh.
///
/// Fills and strokes become [`VertexKind::Color`] triangles, cleared areas become
/// [`VertexKind::Clear`] quads which the renderer is expected to draw with a replacing blend, in
/// submission order.
pub struct MeshSurface {
    mesh: Mesh<Vertex>,
    state: PaintState,
    saved: Vec<PaintState>,
    path: Vec<PathOp>,

    fill_tessellator: FillTessellator,
    stroke_tessellator: StrokeTessellator,
}

impl Default for MeshSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshSurface {
    pub fn new() -> Self {
        Self {
            mesh: Mesh::empty(),
            state: PaintState::DEFAULT,
            saved: vec![],
            path: vec![],

            fill_tessellator: FillTessellator::new(),
            stroke_tessellator: StrokeTessellator::new(),
        }
    }

    #[inline]
    pub fn mesh(&self) -> &Mesh<Vertex> {
        &self.mesh
    }
    #[inline]
    pub fn state(&self) -> &PaintState {
        &self.state
    }

    /// Hands out the mesh built so far and starts a fresh one, keeping the paint state.
    pub fn take_mesh(&mut self) -> Mesh<Vertex> {
        std::mem::replace(&mut self.mesh, Mesh::empty())
    }

    fn build_path(&self) -> Path {
        let mut builder = Path::svg_builder();
        let mut open = false;
        for op in &self.path {
            match *op {
                PathOp::MoveTo(point) => {
                    _ = builder.move_to(point);
                    open = true;
                }
                PathOp::LineTo(point) => {
                    if open {
                        _ = builder.line_to(point);
                    } else {
                        _ = builder.move_to(point);
                        open = true;
                    }
                }
                PathOp::Arc {
                    center,
                    radius,
                    start,
                    sweep,
                } => {
                    let from = center + Vector::from_angle_and_length(start, radius);
                    if open {
                        _ = builder.line_to(from);
                    } else {
                        _ = builder.move_to(from);
                        open = true;
                    }
                    builder.arc(center, vector(radius, radius), sweep, Angle::zero());
                }
                PathOp::Close => {
                    if open {
                        builder.close();
                        open = false;
                    }
                }
            }
        }
        builder.build()
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        let kind = VertexKind::from(color);
        let mut buffers = VertexBuffers::<Vertex, u32>::new();
        let mut builder = BuffersBuilder::new(&mut buffers, |vertex: FillVertex<'_>| {
            Vertex::with_color(vertex.position(), kind)
        });
        // Canvas `fill()` defaults to nonzero winding.
        let options = FillOptions::tolerance(0.1).with_fill_rule(FillRule::NonZero);
        if let Err(err) = self
            .fill_tessellator
            .tessellate_path(path, &options, &mut builder)
        {
            warn!("Error while tessellating a fill with color {color:?}: {err}");
            return;
        }
        self.append(buffers);
    }

    fn stroke_path(&mut self, path: &Path, color: Color, width: f32) {
        let kind = VertexKind::from(color);
        let mut buffers = VertexBuffers::<Vertex, u32>::new();
        let mut builder = BuffersBuilder::new(&mut buffers, |vertex: StrokeVertex<'_, '_>| {
            Vertex::with_color(vertex.position(), kind)
        });
        let options = StrokeOptions::tolerance(0.1).with_line_width(width);
        if let Err(err) = self
            .stroke_tessellator
            .tessellate_path(path, &options, &mut builder)
        {
            warn!("Error while tessellating a stroke of width {width}: {err}");
            return;
        }
        self.append(buffers);
    }

    fn append(&mut self, buffers: VertexBuffers<Vertex, u32>) {
        self.mesh.append(&Mesh {
            vertices: buffers.vertices,
            indices: buffers.indices,
        });
    }
}

impl Surface for MeshSurface {
    fn save(&mut self) {
        self.saved.push(self.state);
    }
    fn restore(&mut self) {
        match self.saved.pop() {
            Some(state) => self.state = state,
            None => trace!("restore called without a matching save"),
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill_color = color;
    }
    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke_color = color;
    }
    fn set_line_width(&mut self, width: f32) {
        // Canvas contexts ignore non-positive and non-finite widths.
        if width.is_finite() && width > 0. {
            self.state.line_width = width;
        }
    }

    fn fill_rect(&mut self, rect: Rect<f32>) {
        let area = positive_box(&rect);
        if area.is_empty() {
            return;
        }
        self.mesh.append(&Mesh::new_color_quad(
            area,
            VertexKind::from(self.state.fill_color),
        ));
    }
    fn stroke_rect(&mut self, rect: Rect<f32>) {
        let mut builder = Path::builder();
        builder.add_rectangle(&positive_box(&rect), Winding::Positive);
        let path = builder.build();
        self.stroke_path(&path, self.state.stroke_color, self.state.line_width);
    }
    fn clear_rect(&mut self, rect: Rect<f32>) {
        let area = positive_box(&rect);
        if area.is_empty() {
            return;
        }
        self.mesh
            .append(&Mesh::new_color_quad(area, VertexKind::Clear));
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }
    fn move_to(&mut self, point: Point2D<f32>) {
        self.path.push(PathOp::MoveTo(point));
    }
    fn line_to(&mut self, point: Point2D<f32>) {
        self.path.push(PathOp::LineTo(point));
    }
    fn arc(&mut self, center: Point2D<f32>, radius: f32, start: Angle<f32>, end: Angle<f32>) {
        self.path.push(PathOp::Arc {
            center,
            radius,
            start,
            sweep: clockwise_sweep(start, end),
        });
    }
    fn close_path(&mut self) {
        self.path.push(PathOp::Close);
    }
    fn fill(&mut self) {
        if self.path.is_empty() {
            return;
        }
        let path = self.build_path();
        self.fill_path(&path, self.state.fill_color);
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, TAU};

    use euclid::default::Size2D;

    use super::*;
    use crate::rgba;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect<f32> {
        Rect::new(Point2D::new(x, y), Size2D::new(w, h))
    }

    #[test]
    fn fill_rect_uses_the_current_fill_color() {
        let mut surface = MeshSurface::new();
        surface.set_fill_color(rgba(0., 1., 0., 1.));
        surface.fill_rect(rect(10., 10., -5., 5.));

        let mesh = surface.mesh();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        assert!(mesh.vertices.iter().all(|v| v.color == [0., 1., 0., 1.]));
        assert_eq!(mesh.vertices[0].position, [5., 10.]);
    }

    #[test]
    fn clear_rect_emits_clear_vertices() {
        let mut surface = MeshSurface::new();
        surface.clear_rect(rect(0., 0., 4., 4.));
        assert!(
            surface
                .mesh()
                .vertices
                .iter()
                .all(|v| v.kind == VertexKind::Clear.kind_id())
        );
    }

    #[test]
    fn empty_rectangles_produce_nothing() {
        let mut surface = MeshSurface::new();
        surface.fill_rect(rect(3., 3., 0., 8.));
        surface.clear_rect(rect(3., 3., 8., 0.));
        assert!(surface.mesh().is_empty());
    }

    #[test]
    fn restore_returns_to_the_saved_state() {
        let mut surface = MeshSurface::new();
        surface.save();
        surface.set_line_width(4.);
        surface.set_stroke_color(rgba(1., 0., 0., 1.));
        surface.restore();
        assert_eq!(*surface.state(), PaintState::DEFAULT);

        // Unbalanced restores are ignored.
        surface.restore();
        assert_eq!(*surface.state(), PaintState::DEFAULT);
    }

    #[test]
    fn invalid_line_widths_are_ignored() {
        let mut surface = MeshSurface::new();
        surface.set_line_width(0.);
        surface.set_line_width(f32::NAN);
        assert_eq!(surface.state().line_width, 1.);
    }

    #[test]
    fn filled_circles_stay_within_their_radius() {
        let mut surface = MeshSurface::new();
        surface.begin_path();
        surface.arc(
            Point2D::new(20., 20.),
            10.,
            Angle::radians(0.),
            Angle::radians(TAU),
        );
        surface.close_path();
        surface.fill();

        let mesh = surface.mesh();
        assert!(!mesh.is_empty());
        for vertex in &mesh.vertices {
            let [x, y] = vertex.position;
            let distance = ((x - 20.).powi(2) + (y - 20.).powi(2)).sqrt();
            assert!(distance <= 10.01, "vertex {vertex:?} is outside the circle");
        }
    }

    #[test]
    fn wedges_cover_a_single_quadrant() {
        let mut surface = MeshSurface::new();
        surface.begin_path();
        surface.arc(
            Point2D::new(0., 0.),
            8.,
            Angle::radians(0.),
            Angle::radians(FRAC_PI_2),
        );
        surface.line_to(Point2D::new(0., 0.));
        surface.fill();

        let mesh = surface.take_mesh();
        assert!(!mesh.is_empty());
        for vertex in &mesh.vertices {
            let [x, y] = vertex.position;
            assert!(x >= -0.01 && y >= -0.01, "vertex {vertex:?} left the quadrant");
        }
        assert!(surface.mesh().is_empty());
    }

    fn covers(mesh: &Mesh<Vertex>, point: [f32; 2]) -> bool {
        let cross = |a: [f32; 2], b: [f32; 2], p: [f32; 2]| {
            (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0])
        };
        mesh.indices.chunks_exact(3).any(|triangle| {
            let [a, b, c] = [0, 1, 2].map(|i| mesh.vertices[triangle[i] as usize].position);
            let signs = [cross(a, b, point), cross(b, c, point), cross(c, a, point)];
            signs.iter().all(|&s| s >= 0.) || signs.iter().all(|&s| s <= 0.)
        })
    }

    #[test]
    fn overlapping_subpaths_fill_with_nonzero_winding() {
        let mut surface = MeshSurface::new();
        surface.begin_path();
        for [x, y] in [[0., 0.], [5., 5.]] {
            surface.move_to(Point2D::new(x, y));
            surface.line_to(Point2D::new(x + 10., y));
            surface.line_to(Point2D::new(x + 10., y + 10.));
            surface.line_to(Point2D::new(x, y + 10.));
            surface.close_path();
        }
        surface.fill();

        let mesh = surface.mesh();
        assert!(covers(mesh, [7.5, 7.5]), "the overlap was left as a hole");
        assert!(covers(mesh, [2., 2.]));
        assert!(covers(mesh, [13., 13.]));
        assert!(!covers(mesh, [13., 2.]));
    }

    #[test]
    fn stroked_rectangles_are_tessellated() {
        let mut surface = MeshSurface::new();
        surface.set_line_width(2.);
        surface.stroke_rect(rect(0., 0., 10., 10.));
        let mesh = surface.mesh();
        assert!(!mesh.is_empty());
        for vertex in &mesh.vertices {
            let [x, y] = vertex.position;
            assert!((-1.01..=11.01).contains(&x) && (-1.01..=11.01).contains(&y));
        }
    }
}
