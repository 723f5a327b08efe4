use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use glyphswarm_config::Config;
use glyphswarm_core::{Behavior, Error, Scene, Surface};
use glyphswarm_particles::scenes::grapher::render_grapher;
use glyphswarm_particles::scenes::oscilloscope::{BarLevels, render_bars};
use glyphswarm_particles::{ParticleSwarm, TypingController};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::Stylize,
    text::Line,
};

mod canvas;
mod logging;
mod system_metrics;

use canvas::TerminalCanvas;
use system_metrics::CpuMonitor;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init();
    let config = Config::load()?;
    log::info!("starting in {} scene", config.scene.name());
    let app = App::new(&config)?;
    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Current foreground scene.
    scene: Scene,
    /// Poll timeout between frames.
    frame_interval: Duration,
    /// Start of the animation clock.
    started: Instant,
    canvas: TerminalCanvas,
    swarm: ParticleSwarm,
    typing: TypingController,
    cpu: CpuMonitor,
    bars: BarLevels,
    /// Engine error raised while rendering, surfaced after the frame.
    failure: Option<Error>,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: &Config) -> color_eyre::Result<Self> {
        Ok(Self {
            running: false,
            scene: config.scene,
            frame_interval: Duration::from_millis(config.frame_ms),
            started: Instant::now(),
            canvas: TerminalCanvas::new(),
            swarm: ParticleSwarm::new(config)?,
            typing: TypingController::new(config)?,
            cpu: CpuMonitor::new(),
            bars: BarLevels::new(),
            failure: None,
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        if self.scene == Scene::Oscilloscope {
            self.cpu.start();
        }
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            if let Some(err) = self.failure.take() {
                return Err(err.into());
            }
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Renders one animation frame.
    fn render(&mut self, frame: &mut Frame) {
        let [canvas_area, status_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

        if self.canvas.fit(canvas_area) {
            self.swarm.resize(self.canvas.bounds());
        }

        self.canvas.clear();
        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        match self.scene {
            Scene::Typer => {}
            Scene::Grapher => render_grapher(&mut self.canvas, elapsed_ms),
            Scene::Oscilloscope => {
                self.bars.update(&self.cpu.per_core());
                render_bars(&mut self.canvas, self.bars.levels());
            }
        }
        if let Err(err) = self.swarm.tick(&mut self.canvas) {
            self.failure = Some(err);
        }
        self.canvas.render(frame, canvas_area);

        let status = Line::from(vec![
            self.scene.name().bold().cyan(),
            format!(
                "  {} ambient  {} orbiting  {} traveling   ",
                self.swarm.count(Behavior::Ambient),
                self.swarm.count(Behavior::Orbiting),
                self.swarm.count(Behavior::Traveling),
            )
            .dark_gray(),
            "esc".bold().cyan(),
            " quit  ".dark_gray(),
            "tab".bold().cyan(),
            " next scene  ".dark_gray(),
            "⌫".bold().cyan(),
            " erase".dark_gray(),
        ])
        .centered();
        frame.render_widget(status, status_area);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls with the frame interval as timeout so the animation keeps running.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.frame_interval)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key)?,
                // Picked up by the next frame's fit check
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) -> color_eyre::Result<()> {
        let typing = self.scene == Scene::Typer;
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc)
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Tab) => self.cycle_scene(),
            (_, KeyCode::Backspace) if typing => {
                self.typing.handle_backspace(&mut self.swarm);
            }
            (modifiers, KeyCode::Char(ch)) if typing && !modifiers.contains(KeyModifiers::CONTROL) => {
                let mut buf = [0u8; 4];
                self.typing
                    .handle_character(ch.encode_utf8(&mut buf), &mut self.swarm)?;
            }
            (_, KeyCode::Char('q')) => self.quit(),
            _ => {}
        }
        Ok(())
    }

    /// Cycle through the scenes.
    fn cycle_scene(&mut self) {
        self.scene = self.scene.next();
        if self.scene == Scene::Oscilloscope {
            self.cpu.start();
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
