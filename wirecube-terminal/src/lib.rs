/// Terminal front end for the wireframe cube demo
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue, terminal,
};
use log::{debug, info, trace};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use wirecube_core::{Color, Cube, RotationState};

pub mod camera;
pub mod config;
pub mod input;
pub mod renderer;

pub use camera::Camera;
pub use config::{ConfigError, Settings};
pub use input::MouseState;
pub use renderer::AsciiRenderer;

/// Rotation applied per arrow-key press (radians)
const KEY_STEP: f32 = 0.1;

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    cube: Cube,
    rotation: RotationState,
    camera: Camera,
    renderer: AsciiRenderer,
    mouse: MouseState,
    settings: Settings,
    running: bool,
    last_fps_sample: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(settings: Settings) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(settings, width, height))
    }

    /// Build the app for a grid of the given size without touching the terminal.
    pub fn with_size(settings: Settings, width: u16, height: u16) -> Self {
        let size = settings.cube_size;
        let camera = Camera::new(width as u32, height as u32)
            .with_position(settings.camera_position)
            .with_fov_degrees(settings.fov_degrees);

        Self {
            cube: Cube::new(size.x, size.y, size.z),
            rotation: RotationState::zero(),
            camera,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            mouse: MouseState::new(),
            settings,
            running: true,
            last_fps_sample: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    pub fn renderer(&self) -> &AsciiRenderer {
        &self.renderer
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        terminal_session(&mut out, terminal::disable_raw_mode, |_| self.main_loop())
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_secs_f64(1.0 / self.settings.fps as f64);
        info!(
            "starting frame loop at {} fps, sensitivity {} rad/px",
            self.settings.fps, self.settings.sensitivity
        );

        while self.running {
            let frame_start = Instant::now();

            self.mouse.begin_frame();
            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                self.handle_event(&event);
            }

            self.update();
            self.render_frame();
            self.present()?;

            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }
            self.tick_fps();
        }

        Ok(())
    }

    /// Apply one terminal event to the app state.
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => self.handle_key(*code),
            Event::Mouse(mouse) => self.mouse.handle_event(mouse),
            Event::Resize(width, height) => {
                debug!("terminal resized to {}x{}", width, height);
                self.camera.resize(*width as u32, *height as u32);
                self.renderer.resize(*width as usize, *height as usize);
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Up => self.rotation.rotate(-KEY_STEP, 0.0),
            KeyCode::Down => self.rotation.rotate(KEY_STEP, 0.0),
            KeyCode::Left => self.rotation.rotate(0.0, -KEY_STEP),
            KeyCode::Right => self.rotation.rotate(0.0, KEY_STEP),
            KeyCode::Char('r') => {
                self.rotation = RotationState::zero();
            }
            _ => {}
        }
    }

    /// Turn this frame's drag into rotation and refresh the cube.
    pub fn update(&mut self) {
        if self.mouse.is_button_down() {
            let (dx, dy) = self.mouse.delta();
            if dx != 0.0 || dy != 0.0 {
                self.rotation.apply_drag(dx, dy, self.settings.sensitivity);
                trace!(
                    "drag ({}, {}) -> rotation x {:.3} y {:.3}",
                    dx,
                    dy,
                    self.rotation.x,
                    self.rotation.y
                );
            }
        }

        self.cube.set_transform(self.rotation.matrix());
        self.cube.recompute_world_vertices();
    }

    /// Draw the current cube and HUD into the character buffer.
    pub fn render_frame(&mut self) {
        let hud = format!(
            "wirecube | FPS: {:.1} | pitch {:+.2} yaw {:+.2} | drag=rotate arrows=nudge r=reset q=quit",
            self.fps, self.rotation.x, self.rotation.y
        );
        let Self {
            cube,
            camera,
            renderer,
            settings,
            ..
        } = self;

        renderer.clear();
        cube.draw_edges(settings.edge_color, |start, end, color| {
            renderer.draw_line_3d(start, end, color, camera)
        });
        cube.draw_vertices(settings.vertex_color, |point, color| {
            renderer.draw_point_3d(point, 'o', color, camera)
        });

        renderer.draw_text(0, 0, &hud, Color::YELLOW);
    }

    fn present(&self) -> io::Result<()> {
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.renderer.draw(&mut stdout)?;
        stdout.flush()
    }

    fn tick_fps(&mut self) {
        self.frame_count += 1;
        let now = Instant::now();
        let window = now - self.last_fps_sample;
        if window.as_secs() >= 1 {
            self.fps = self.frame_count as f32 / window.as_secs_f32();
            self.frame_count = 0;
            self.last_fps_sample = now;
        }
    }
}

/// Run `body` inside the alternate screen with mouse capture.
///
/// Once raw mode is on, the screen is restored and `leave_raw_mode` runs no
/// matter which step failed. The earliest error is the one returned.
fn terminal_session<W, R, F>(out: &mut W, leave_raw_mode: R, body: F) -> io::Result<()>
where
    W: Write,
    R: FnOnce() -> io::Result<()>,
    F: FnOnce(&mut W) -> io::Result<()>,
{
    let result = execute!(
        out,
        terminal::EnterAlternateScreen,
        EnableMouseCapture,
        cursor::Hide
    )
    .and_then(|()| body(&mut *out));

    let restored = execute!(
        out,
        cursor::Show,
        DisableMouseCapture,
        terminal::LeaveAlternateScreen
    );

    result.and(restored).and(leave_raw_mode())
}
