use super::model::Stage;
use crate::gui::theme::ThemeColors;
use cairo::{Context, Matrix};
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use turntable::geometry::{Face, Geometry, material};
use turntable::panel::Panel;
use turntable::ring::{PanelView, RingView, visible_image_slot};

const PLACEHOLDER_TEXT: &str = "No slides";

/// Maps image pixels onto a face given where the face centre and its unit
/// x/y axes land on screen. `None` when the face is edge-on.
pub fn texture_matrix(
    frame: [[f64; 2]; 3],
    face_size: (f64, f64),
    image_size: (f64, f64),
    face: Face,
) -> Option<Matrix> {
    let [c, ex, ey] = frame;
    let (ax, ay) = (ex[0] - c[0], ex[1] - c[1]);
    let (bx, by) = (ey[0] - c[0], ey[1] - c[1]);
    let (w, h) = face_size;
    let (iw, ih) = image_size;
    if iw <= 0.0 || ih <= 0.0 {
        return None;
    }

    // back UVs run right to left in model space
    let s = match face {
        Face::Front => 1.0,
        Face::Back => -1.0,
    };
    let (sx, sy) = (s * w / iw, -h / ih);
    let matrix = Matrix::new(
        sx * ax,
        sx * ay,
        sy * bx,
        sy * by,
        c[0] - s * w / 2.0 * ax + h / 2.0 * bx,
        c[1] - s * w / 2.0 * ay + h / 2.0 * by,
    );

    let det = matrix.xx() * matrix.yy() - matrix.xy() * matrix.yx();
    (det.abs() > 1e-9).then_some(matrix)
}

struct PanelRenderer<'a> {
    panel: &'a Panel<Pixbuf>,
    view: &'a PanelView,
    ring: &'a RingView,
    geometry: &'a Geometry,
}

impl<'a> PanelRenderer<'a> {
    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.draw_edge(cr, colors)?;
        self.draw_face(cr)
    }

    fn trace_group(&self, cr: &Context, material: usize) -> bool {
        let Some(group) = self.geometry.group(material) else {
            return false;
        };
        for [a, b, c] in self.geometry.triangles(group) {
            let [p, q, r] = [a, b, c].map(|i| self.view.vertices[i].screen);
            cr.move_to(p[0], p[1]);
            cr.line_to(q[0], q[1]);
            cr.line_to(r[0], r[1]);
            cr.close_path();
        }
        true
    }

    fn draw_edge(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        if !self.trace_group(cr, material::EDGE) {
            return Ok(());
        }
        let (r, g, b, a) = colors.edge.into_components();
        cr.set_source_rgba(r, g, b, a * self.panel.opacity(material::EDGE));
        cr.fill()
    }

    fn draw_face(&self, cr: &Context) -> Result<(), cairo::Error> {
        let slot = visible_image_slot(self.view);
        let face = if slot == material::FRONT {
            Face::Front
        } else {
            Face::Back
        };
        let Some(pixbuf) = self.panel.texture(slot) else {
            return Ok(());
        };

        let (w, h, _) = self.geometry.size();
        let frame = self.view.face_frame(self.geometry, face, self.ring);
        let image = (pixbuf.width() as f64, pixbuf.height() as f64);
        let Some(matrix) = texture_matrix(frame, (w, h), image, face) else {
            return Ok(());
        };

        cr.save()?;
        for (i, p) in self.view.outline(self.geometry, face).iter().enumerate() {
            if i == 0 {
                cr.move_to(p[0], p[1]);
            } else {
                cr.line_to(p[0], p[1]);
            }
        }
        cr.close_path();
        cr.clip();
        cr.transform(matrix);
        cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        cr.paint_with_alpha(self.panel.opacity(slot))?;
        cr.restore()
    }
}

pub fn draw(cr: &Context, stage: &Stage, colors: &ThemeColors) -> Result<(), cairo::Error> {
    fill_background(cr, colors.background)?;

    let Some(carousel) = stage.carousel.as_ref() else {
        return draw_placeholder(cr, stage, colors);
    };

    let ring = carousel.view(stage.camera(), stage.viewport);
    let geometry = carousel.geometry();
    for view in ring.panels(geometry) {
        let panel = &carousel.panels()[view.index];
        PanelRenderer {
            panel,
            view: &view,
            ring: &ring,
            geometry,
        }
        .draw(cr, colors)?;
    }
    Ok(())
}

fn fill_background(cr: &Context, color: Srgba<f64>) -> Result<(), cairo::Error> {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.paint()
}

fn draw_placeholder(cr: &Context, stage: &Stage, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let (r, g, b, a) = colors.placeholder.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(16.0);
    if let Ok(ext) = cr.text_extents(PLACEHOLDER_TEXT) {
        cr.move_to(
            stage.viewport.width / 2.0 - ext.width() / 2.0,
            stage.viewport.height / 2.0 + ext.height() / 2.0,
        );
        cr.show_text(PLACEHOLDER_TEXT)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    // face centred at (100, 50), one model unit per pixel, y up
    const FLAT: [[f64; 2]; 3] = [[100.0, 50.0], [101.0, 50.0], [100.0, 49.0]];

    #[test]
    fn test_front_image_fills_face_upright() {
        let m = texture_matrix(FLAT, (40.0, 20.0), (400.0, 200.0), Face::Front).unwrap();
        // image top-left lands on the face's top-left corner
        assert!(close(m.transform_point(0.0, 0.0), (80.0, 40.0)));
        assert!(close(m.transform_point(400.0, 200.0), (120.0, 60.0)));
    }

    #[test]
    fn test_back_image_runs_right_to_left() {
        let m = texture_matrix(FLAT, (40.0, 20.0), (400.0, 200.0), Face::Back).unwrap();
        assert!(close(m.transform_point(0.0, 0.0), (120.0, 40.0)));
        assert!(close(m.transform_point(400.0, 200.0), (80.0, 60.0)));
    }

    #[test]
    fn test_edge_on_face_is_skipped() {
        let edge_on = [[100.0, 50.0], [100.0, 50.0], [100.0, 49.0]];
        assert!(texture_matrix(edge_on, (40.0, 20.0), (400.0, 200.0), Face::Front).is_none());
        assert!(texture_matrix(FLAT, (40.0, 20.0), (0.0, 200.0), Face::Front).is_none());
    }
}
