use crate::config::{SizeLimits, ViewportConfig};
use crate::model::{Point, Size, Viewbox};
use crate::state::PanSession;

/// Pan/zoom state for one bound element. Every mutating call returns the new
/// viewbox when it changed, so the caller knows whether to write the attribute.
#[derive(Debug, Clone)]
pub struct Viewport {
    viewbox: Viewbox,
    session: PanSession,
    zoom_step: f64,
    limits: SizeLimits,
}

impl Viewport {
    pub fn new(viewbox: Viewbox, config: &ViewportConfig) -> Self {
        Self {
            viewbox,
            session: PanSession::Idle,
            zoom_step: config.zoom_step,
            limits: config.limits_for(&viewbox),
        }
    }

    pub fn viewbox(&self) -> Viewbox {
        self.viewbox
    }

    pub fn is_panning(&self) -> bool {
        self.session.is_panning()
    }

    pub fn begin_pan(&mut self, at: Point) {
        self.session.begin(at);
    }

    pub fn continue_pan(&mut self, at: Point, rendered: Size) -> Option<Viewbox> {
        let delta = self.session.advance(at)?;
        if !rendered.is_renderable() {
            return None;
        }
        let dx = delta.x * self.viewbox.width / rendered.width;
        let dy = delta.y * self.viewbox.height / rendered.height;
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        self.viewbox = self.viewbox.translated(-dx, -dy).ok()?;
        Some(self.viewbox)
    }

    pub fn end_pan(&mut self) {
        self.session.end();
    }

    /// `delta_y > 0` zooms out, `delta_y < 0` zooms in, about the pointer at
    /// `offset` pixels inside an element of size `rendered`.
    pub fn zoom(&mut self, delta_y: f64, offset: Point, rendered: Size) -> Option<Viewbox> {
        if delta_y == 0.0 || delta_y.is_nan() || !rendered.is_renderable() {
            return None;
        }
        let wanted = if delta_y > 0.0 {
            self.zoom_step
        } else {
            1.0 / self.zoom_step
        };
        let scale = self.limits.clamp_scale(self.viewbox.size(), wanted);
        if scale == 1.0 {
            return None;
        }
        let anchor = Point::new(offset.x / rendered.width, offset.y / rendered.height);
        self.viewbox = self.viewbox.scaled_about(scale, anchor).ok()?;
        Some(self.viewbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(vb: &str) -> Viewport {
        Viewport::new(vb.parse().unwrap(), &ViewportConfig::default())
    }

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn drag_example() {
        let mut vp = viewport("0 0 800 600");
        vp.begin_pan(Point::new(100.0, 100.0));
        let vb = vp
            .continue_pan(Point::new(150.0, 130.0), Size::new(800.0, 600.0))
            .unwrap();
        assert_eq!(vb.to_string(), "-50 -30 800 600");
    }

    #[test]
    fn pan_scales_by_viewbox_over_rendered() {
        let mut vp = viewport("10 20 400 150");
        vp.begin_pan(Point::new(0.0, 0.0));
        let rendered = Size::new(800.0, 600.0);
        let vb = vp.continue_pan(Point::new(40.0, -12.0), rendered).unwrap();
        assert!(close(vb.x, 10.0 - 40.0 * 400.0 / 800.0, 1e-12));
        assert!(close(vb.y, 20.0 + 12.0 * 150.0 / 600.0, 1e-12));
        assert_eq!((vb.width, vb.height), (400.0, 150.0));
    }

    #[test]
    fn pan_speed_tracks_zoom_level() {
        let rendered = Size::new(800.0, 600.0);
        let mut vp = viewport("0 0 800 600");
        vp.zoom(-1.0, Point::new(400.0, 300.0), rendered).unwrap();
        vp.zoom(-1.0, Point::new(400.0, 300.0), rendered).unwrap();
        let before = vp.viewbox();
        vp.begin_pan(Point::new(0.0, 0.0));
        let after = vp.continue_pan(Point::new(10.0, 20.0), rendered).unwrap();
        assert!(close(after.x, before.x - 10.0 * before.width / 800.0, 1e-12));
        assert!(close(after.y, before.y - 20.0 * before.height / 600.0, 1e-12));
    }

    #[test]
    fn move_without_session_is_noop() {
        let mut vp = viewport("0 0 800 600");
        let rendered = Size::new(800.0, 600.0);
        assert_eq!(vp.continue_pan(Point::new(50.0, 50.0), rendered), None);

        vp.begin_pan(Point::new(0.0, 0.0));
        vp.end_pan();
        assert_eq!(vp.continue_pan(Point::new(70.0, 90.0), rendered), None);
        assert_eq!(vp.viewbox().to_string(), "0 0 800 600");
    }

    #[test]
    fn leave_ends_session() {
        let mut vp = viewport("0 0 800 600");
        vp.begin_pan(Point::new(100.0, 100.0));
        // mouseleave goes through the same transition as mouseup
        vp.end_pan();
        assert!(!vp.is_panning());
        assert_eq!(
            vp.continue_pan(Point::new(300.0, 300.0), Size::new(800.0, 600.0)),
            None
        );
        assert_eq!(vp.viewbox().to_string(), "0 0 800 600");
    }

    #[test]
    fn unrendered_element_does_not_move_but_advances() {
        let mut vp = viewport("0 0 800 600");
        vp.begin_pan(Point::new(0.0, 0.0));
        assert_eq!(vp.continue_pan(Point::new(10.0, 10.0), Size::new(0.0, 600.0)), None);
        let vb = vp
            .continue_pan(Point::new(15.0, 10.0), Size::new(800.0, 600.0))
            .unwrap();
        assert_eq!(vb.to_string(), "-5 0 800 600");
    }

    #[test]
    fn zoom_in_example() {
        let mut vp = viewport("0 0 800 600");
        let vb = vp
            .zoom(-120.0, Point::new(400.0, 300.0), Size::new(800.0, 600.0))
            .unwrap();
        assert!(close(vb.width, 727.2727, 1e-5));
        assert!(close(vb.height, 545.4545, 1e-5));
        assert!(close(vb.x, 36.3636, 1e-5));
        assert!(close(vb.y, 27.2727, 1e-5));
    }

    #[test]
    fn zoom_out_grows_by_step() {
        let mut vp = viewport("0 0 800 600");
        let vb = vp
            .zoom(3.0, Point::new(0.0, 0.0), Size::new(800.0, 600.0))
            .unwrap();
        assert!(close(vb.width, 880.0, 1e-12));
        assert!(close(vb.height, 660.0, 1e-12));
        assert_eq!((vb.x, vb.y), (0.0, 0.0));
    }

    #[test]
    fn zoom_keeps_point_under_pointer() {
        let rendered = Size::new(640.0, 480.0);
        let mut vp = viewport("-120 35 1000 250");
        for (delta, off) in [
            (-1.0, Point::new(37.0, 401.0)),
            (1.0, Point::new(600.0, 12.0)),
            (-5.0, Point::new(320.0, 240.0)),
        ] {
            let frac = Point::new(off.x / rendered.width, off.y / rendered.height);
            let before = vp.viewbox().point_at(frac);
            let after = vp.zoom(delta, off, rendered).unwrap().point_at(frac);
            assert!(close(before.x, after.x, 1e-6), "{before:?} vs {after:?}");
            assert!(close(before.y, after.y, 1e-6), "{before:?} vs {after:?}");
        }
    }

    #[test]
    fn zoom_is_clamped_both_ways() {
        let rendered = Size::new(800.0, 600.0);
        let cfg = ViewportConfig {
            max_zoom_in: 4.0,
            max_zoom_out: 3.0,
            ..Default::default()
        };
        let mut vp = Viewport::new("0 0 800 600".parse().unwrap(), &cfg);
        for _ in 0..200 {
            vp.zoom(-1.0, Point::new(123.0, 456.0), rendered);
            let vb = vp.viewbox();
            assert!(vb.width >= 200.0 - 1e-9 && vb.height >= 150.0 - 1e-9);
        }
        assert_eq!(vp.zoom(-1.0, Point::new(0.0, 0.0), rendered), None);
        for _ in 0..200 {
            vp.zoom(1.0, Point::new(700.0, 10.0), rendered);
            let vb = vp.viewbox();
            assert!(vb.width <= 2400.0 + 1e-9 && vb.height <= 1800.0 + 1e-9);
            assert!(vb.width > 0.0 && vb.height > 0.0);
        }
        assert_eq!(vp.zoom(1.0, Point::new(0.0, 0.0), rendered), None);
    }

    #[test]
    fn huge_viewbox_stays_finite_when_zooming_out() {
        let rendered = Size::new(800.0, 600.0);
        let mut vp = viewport("0 0 1e307 1e307");
        for _ in 0..100 {
            if let Some(vb) = vp.zoom(1.0, Point::new(400.0, 300.0), rendered) {
                assert!(vb.x.is_finite() && vb.y.is_finite());
                assert!(vb.width.is_finite() && vb.height.is_finite());
            }
        }
        let vb = vp.viewbox();
        assert!([vb.x, vb.y, vb.width, vb.height].iter().all(|v| v.is_finite()));
        assert!(!vp.viewbox().to_string().contains("inf"));
    }

    #[test]
    fn huge_viewbox_pan_never_leaves_finite_range() {
        let mut vp = viewport("-1e308 -1e308 1e308 1e308");
        let before = vp.viewbox();
        vp.begin_pan(Point::new(0.0, 0.0));
        assert_eq!(vp.continue_pan(Point::new(800.0, 600.0), Size::new(800.0, 600.0)), None);
        assert_eq!(vp.viewbox(), before);
    }

    #[test]
    fn tiny_viewbox_stays_positive_when_zooming_in() {
        let rendered = Size::new(800.0, 600.0);
        let mut vp = viewport("0 0 1e-320 1e-320");
        for _ in 0..100 {
            vp.zoom(-1.0, Point::new(400.0, 300.0), rendered);
            let vb = vp.viewbox();
            assert!(vb.width > 0.0 && vb.height > 0.0);
            assert!(vb.x.is_finite() && vb.y.is_finite());
        }
    }

    #[test]
    fn horizontal_scroll_and_unrendered_zoom_are_noops() {
        let mut vp = viewport("0 0 800 600");
        assert_eq!(vp.zoom(0.0, Point::new(1.0, 1.0), Size::new(800.0, 600.0)), None);
        assert_eq!(vp.zoom(-1.0, Point::new(1.0, 1.0), Size::new(800.0, 0.0)), None);
        assert_eq!(vp.viewbox().to_string(), "0 0 800 600");
    }
}
