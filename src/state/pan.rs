use crate::model::Point;

// Drag gesture state; screen coordinates only.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PanSession {
    #[default]
    Idle,
    Panning { last: Point },
}

impl PanSession {
    pub fn is_panning(&self) -> bool {
        matches!(self, PanSession::Panning { .. })
    }

    pub fn begin(&mut self, at: Point) {
        *self = PanSession::Panning { last: at };
    }

    /// Move the reference point to `to` and return the screen delta since the
    /// previous one. `None` while idle.
    pub fn advance(&mut self, to: Point) -> Option<Point> {
        match self {
            PanSession::Idle => None,
            PanSession::Panning { last } => {
                let delta = Point::new(to.x - last.x, to.y - last.y);
                *last = to;
                Some(delta)
            }
        }
    }

    pub fn end(&mut self) {
        *self = PanSession::Idle;
    }
}
