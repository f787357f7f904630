#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
    Other(u32),
}

impl PointerButton {
    /// Maps X11/GDK style button numbers (1 = left).
    pub fn from_code(code: u32) -> Self {
        match code {
            0 | 1 => PointerButton::Primary,
            2 => PointerButton::Middle,
            3 => PointerButton::Secondary,
            other => PointerButton::Other(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { at: Point, button: PointerButton },
    Move { at: Point },
    Up { at: Point },
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
}

impl PointerEvent {
    /// Normalises a touch frame to a pointer event. Only single-finger
    /// gestures are understood; anything else yields `None`.
    pub fn from_touches(phase: TouchPhase, touches: &[Point]) -> Option<Self> {
        match (phase, touches) {
            (TouchPhase::Start, [at]) => Some(PointerEvent::Down {
                at: *at,
                button: PointerButton::Primary,
            }),
            (TouchPhase::Move, [at]) => Some(PointerEvent::Move { at: *at }),
            (TouchPhase::End, [at]) => Some(PointerEvent::Up { at: *at }),
            (TouchPhase::End, []) => Some(PointerEvent::Leave),
            _ => None,
        }
    }
}
