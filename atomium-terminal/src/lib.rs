/// Terminal host for the animated Atomium lattice
use atomium_core::{AtomiumConfig, FrameLoop, SceneContext};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::{AsciiRenderer, Shading};

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: u32 = 2;

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    scene: SceneContext,
    frames: FrameLoop,
    renderer: AsciiRenderer,
    shading: Shading,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: AtomiumConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let scene = SceneContext::new(config, width as u32, height as u32 * CELL_ASPECT)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let shading = Shading::from_rig(scene.lights());

        Ok(Self {
            scene,
            frames: FrameLoop::new(),
            renderer: AsciiRenderer::new(width as usize, height as usize),
            shading,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide, EnableMouseCapture)?;

        let result = self.main_loop();

        // Cleanup
        execute!(stdout(), DisableMouseCapture, terminal::LeaveAlternateScreen, cursor::Show)?;
        terminal::disable_raw_mode()?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            // Update
            self.frames.step(&mut self.scene);

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        tracing::info!(ticks = self.frames.ticks(), "terminal session ended");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char(' ') => {
                    if self.frames.is_running() {
                        self.frames.stop();
                    } else {
                        self.frames.resume();
                    }
                }
                _ => {}
            },
            Event::Resize(width, height) => {
                self.scene.resize(width as u32, height as u32 * CELL_ASPECT);
                self.renderer.resize(width as usize, height as usize);
            }
            Event::Mouse(MouseEvent { kind, column, row, .. }) => {
                let (x, y) = (column as f32, (row as u32 * CELL_ASPECT) as f32);
                match kind {
                    MouseEventKind::Down(MouseButton::Left) => self.scene.pointer_down(x, y),
                    MouseEventKind::Up(MouseButton::Left) => self.scene.pointer_up(),
                    MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                        self.scene.pointer_move(x, y)
                    }
                    MouseEventKind::ScrollUp => self.scene.wheel(-1.0),
                    MouseEventKind::ScrollDown => self.scene.wheel(1.0),
                    _ => {}
                }
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let view_projection = self.scene.camera().view_projection();
        let appearance = self.scene.appearance().get();

        // Clear renderer
        self.renderer.clear();

        // Render one shared unit mesh per placement
        let mesh = self.scene.unit_mesh();
        for (_, world) in self.scene.placement_matrices() {
            self.renderer
                .render_mesh(mesh, &world, &view_projection, &self.shading, &appearance);
        }

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let status = if self.frames.is_running() { "" } else { " [paused]" };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Atomium | FPS: {:.1} | Units: {}{} | Drag=Orbit Wheel=Zoom Space=Pause Q=Quit",
                self.fps,
                self.scene.lattice().len(),
                status
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
