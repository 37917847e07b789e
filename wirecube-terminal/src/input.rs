use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

/// Approximate size of a terminal cell in pixels, so drag sensitivity can be
/// given per pixel like in a windowed front end.
pub const CELL_WIDTH_PX: f32 = 8.0;
pub const CELL_HEIGHT_PX: f32 = 16.0;

/// Tracks the left mouse button and per-frame drag motion.
#[derive(Debug, Default)]
pub struct MouseState {
    button_down: bool,
    position: Option<(u16, u16)>,
    delta: (f32, f32),
}

impl MouseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call at the start of each frame to reset per-frame state.
    pub fn begin_frame(&mut self) {
        self.delta = (0.0, 0.0);
    }

    /// Process a terminal mouse event and update input state.
    pub fn handle_event(&mut self, event: &MouseEvent) {
        let here = (event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.button_down = true;
                self.position = Some(here);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.button_down = false;
                self.position = Some(here);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                // A drag can arrive without a press if the press happened
                // before capture was enabled.
                self.button_down = true;
                if let Some((col, row)) = self.position {
                    self.delta.0 += (here.0 as f32 - col as f32) * CELL_WIDTH_PX;
                    self.delta.1 += (here.1 as f32 - row as f32) * CELL_HEIGHT_PX;
                }
                self.position = Some(here);
            }
            MouseEventKind::Moved => {
                self.position = Some(here);
            }
            _ => {}
        }
    }

    pub fn is_button_down(&self) -> bool {
        self.button_down
    }

    /// Motion since the last `begin_frame`, in pixels.
    pub fn delta(&self) -> (f32, f32) {
        self.delta
    }

    pub fn position(&self) -> Option<(u16, u16)> {
        self.position
    }
}
