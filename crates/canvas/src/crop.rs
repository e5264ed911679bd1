use std::f32::consts::PI;

use euclid::Angle;
use euclid::default::Rect;

use graphics::Surface;

use crate::shape::Handle;
use crate::style::Style;

pub const CORNER_HANDLE_RADIUS: f32 = 8.;
pub const EDGE_HANDLE_RADIUS: f32 = 5.;
/// Crop handles are only drawn when both sides are longer than this.
pub const MIN_HANDLE_SIZE: f32 = 20.;

// (handle, start, end) in multiples of PI, swept clockwise.
const CORNER_WEDGES: [(Handle, f32, f32); 4] = [
    (Handle::TopLeft, 0., 0.5),
    (Handle::TopRight, 0.5, 1.),
    (Handle::BottomRight, 1., 1.5),
    (Handle::BottomLeft, 1.5, 2.),
];
const EDGE_ARCS: [(Handle, f32, f32); 4] = [
    (Handle::TopCenter, 0., 1.),
    (Handle::MiddleRight, 0.5, 1.5),
    (Handle::BottomCenter, 1., 2.),
    (Handle::MiddleLeft, 1.5, 0.5),
];

/// Draws the border of a crop selection: `rect` filled with the stroke color, with everything
/// more than `line_width` inside its edges cleared again.
pub fn draw_crop_rectangle(surface: &mut impl Surface, rect: Rect<f32>, style: &Style) {
    surface.set_fill_color(style.stroke_color);

    surface.fill_rect(rect);
    surface.clear_rect(rect.inflate(-style.line_width, -style.line_width));
}

/// Draws pie-slice corner handles and half-disc edge handles on a crop selection.
///
/// Nothing is drawn unless both sides are longer than [`MIN_HANDLE_SIZE`].
pub fn draw_crop_handles(surface: &mut impl Surface, rect: Rect<f32>, style: &Style) {
    surface.set_stroke_color(style.stroke_color);
    surface.set_fill_color(style.fill_color);

    if rect.size.width <= MIN_HANDLE_SIZE || rect.size.height <= MIN_HANDLE_SIZE {
        return;
    }

    for (handle, start, end) in CORNER_WEDGES {
        let corner = handle.position_on(&rect);
        surface.begin_path();
        surface.arc(
            corner,
            CORNER_HANDLE_RADIUS,
            Angle::radians(start * PI),
            Angle::radians(end * PI),
        );
        surface.line_to(corner);
        surface.fill();
    }

    for (handle, start, end) in EDGE_ARCS {
        surface.begin_path();
        surface.arc(
            handle.position_on(&rect),
            EDGE_HANDLE_RADIUS,
            Angle::radians(start * PI),
            Angle::radians(end * PI),
        );
        surface.fill();
    }
}

#[cfg(test)]
mod tests {
    use euclid::default::{Point2D, Size2D};
    use graphics::{DrawCommand, MeshSurface, RecordingSurface, rgba};

    use super::*;

    const STYLE: Style = Style::new(rgba(0., 0., 0., 0.5), rgba(1., 1., 1., 1.), 2.);

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect<f32> {
        Rect::new(Point2D::new(x, y), Size2D::new(w, h))
    }

    #[test]
    fn crop_rectangle_clears_an_inset() {
        let mut surface = RecordingSurface::new();
        draw_crop_rectangle(&mut surface, rect(10., 20., 100., 50.), &STYLE);
        assert_eq!(
            surface.commands(),
            &[
                DrawCommand::SetFillColor(STYLE.stroke_color),
                DrawCommand::FillRect(rect(10., 20., 100., 50.)),
                DrawCommand::ClearRect(rect(12., 22., 96., 46.)),
            ]
        );
    }

    #[test]
    fn small_crops_get_no_handles() {
        for (w, h) in [(15., 15.), (20., 100.), (100., 20.)] {
            let mut surface = RecordingSurface::new();
            draw_crop_handles(&mut surface, rect(0., 0., w, h), &STYLE);
            let painted = surface.commands().iter().any(|command| {
                matches!(command, DrawCommand::Arc { .. } | DrawCommand::Fill)
            });
            assert!(!painted, "{w}x{h} drew handles");
        }
    }

    #[test]
    fn corner_wedges_close_back_to_their_corner() {
        let mut surface = RecordingSurface::new();
        draw_crop_handles(&mut surface, rect(0., 0., 100., 60.), &STYLE);
        let commands = surface.commands();

        assert_eq!(commands[0], DrawCommand::SetStrokeColor(STYLE.stroke_color));
        assert_eq!(commands[1], DrawCommand::SetFillColor(STYLE.fill_color));

        let corners = [
            Point2D::new(0., 0.),
            Point2D::new(100., 0.),
            Point2D::new(100., 60.),
            Point2D::new(0., 60.),
        ];
        for (wedge, corner) in commands[2..18].chunks(4).zip(corners) {
            assert_eq!(wedge[0], DrawCommand::BeginPath);
            match wedge[1] {
                DrawCommand::Arc { center, radius, .. } => {
                    assert_eq!(center, corner);
                    assert_eq!(radius, CORNER_HANDLE_RADIUS);
                }
                ref other => panic!("expected an arc, got {other:?}"),
            }
            assert_eq!(wedge[2], DrawCommand::LineTo(corner));
            assert_eq!(wedge[3], DrawCommand::Fill);
        }
    }

    #[test]
    fn edge_handles_are_half_discs() {
        let mut surface = RecordingSurface::new();
        draw_crop_handles(&mut surface, rect(0., 0., 100., 60.), &STYLE);

        let edges: Vec<_> = surface.commands()[18..]
            .iter()
            .filter_map(|command| match *command {
                DrawCommand::Arc {
                    center,
                    radius,
                    start,
                    end,
                } => Some((center, radius, start.radians, end.radians)),
                _ => None,
            })
            .collect();
        assert_eq!(
            edges,
            vec![
                (Point2D::new(50., 0.), EDGE_HANDLE_RADIUS, 0., PI),
                (Point2D::new(100., 30.), EDGE_HANDLE_RADIUS, 0.5 * PI, 1.5 * PI),
                (Point2D::new(50., 60.), EDGE_HANDLE_RADIUS, PI, 2. * PI),
                (Point2D::new(0., 30.), EDGE_HANDLE_RADIUS, 1.5 * PI, 0.5 * PI),
            ]
        );
        assert!(
            !surface
                .commands()
                .iter()
                .any(|command| matches!(command, DrawCommand::ClosePath)),
            "crop handles are filled as open paths"
        );
    }

    #[test]
    fn handles_tessellate_near_the_selection_edges() {
        let crop = rect(0., 0., 100., 60.);
        let mut surface = MeshSurface::new();
        draw_crop_handles(&mut surface, crop, &STYLE);

        let mesh = surface.mesh();
        assert!(!mesh.is_empty());
        for vertex in &mesh.vertices {
            let [x, y] = vertex.position;
            assert!(
                (-5.01..=105.01).contains(&x) && (-5.01..=65.01).contains(&y),
                "vertex {vertex:?} strayed from the selection"
            );
        }
    }
}
