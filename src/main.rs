use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use orrery::cli::Cli;
use orrery::config::ViewerConfig;
use orrery::core::{FixedHz, WinitController};
use orrery::frame::FrameIterator;
use orrery::scene::SolarSystem;
use orrery::script::{self, Script};
use orrery::traits::{Controller, LatestCamera, ViewerInput};
use orrery::viewer::{FrameOutput, Viewer};

// === Constants ===

const INITIAL_WINDOW_WIDTH: u32 = 1280;
const INITIAL_WINDOW_HEIGHT: u32 = 720;
const TITLE_UPDATE_HZ: f32 = 4.0;

// === Application ===

struct App {
    no_ui: bool,
    window: Option<Arc<Window>>,
    viewer: Viewer,
    system: SolarSystem,
    controller: WinitController,
    frames: FrameIterator,
    camera: LatestCamera,
    title_timer: FixedHz,
}

impl App {
    fn new(cli: &Cli, config: &ViewerConfig) -> Self {
        Self {
            no_ui: cli.no_ui,
            window: None,
            viewer: Viewer::new(config),
            system: SolarSystem::from_config(&config.system),
            controller: WinitController::new(),
            frames: FrameIterator::new(),
            camera: LatestCamera::default(),
            title_timer: FixedHz::new(TITLE_UPDATE_HZ),
        }
    }

    fn redraw(&mut self) {
        let Some(frame) = self.frames.next() else {
            return;
        };

        self.viewer.extend_inputs(self.controller.drain_inputs());
        self.system.update(frame.delta);
        let output = self.viewer.tick(&frame, &self.system);
        if output.write_to(&mut self.camera) {
            log::trace!("camera {:?} by {:?}", output.pose, output.writer);
        }

        if self.no_ui {
            return;
        }
        for event in &output.events {
            log::info!("{:?}", event);
        }
        if self.title_timer.steps(frame.delta, 1) > 0 {
            self.update_title(&output);
        }
    }

    fn update_title(&self, output: &FrameOutput) {
        let Some(window) = &self.window else {
            return;
        };
        let p = output.pose.position;
        let focus = output
            .selection
            .as_ref()
            .or(output.hovered.as_ref())
            .map(|id| format!(" [{}]", id))
            .unwrap_or_default();
        window.set_title(&format!(
            "Orrery - {:?} ({:.1}, {:.1}, {:.1}) {:.0}%{}",
            output.mode,
            p.x,
            p.y,
            p.z,
            output.progress * 100.0,
            focus
        ));
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title("Orrery")
                    .with_inner_size(winit::dpi::PhysicalSize::new(
                        INITIAL_WINDOW_WIDTH,
                        INITIAL_WINDOW_HEIGHT,
                    )),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let size = window.inner_size();
            self.viewer.push_input(ViewerInput::Resize {
                width: size.width,
                height: size.height,
            });
            self.window = Some(window);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::RedrawRequested => self.redraw(),
            event => self.controller.process_event(&event),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Replay a script and print one JSON line per frame
fn run_script(cli: &Cli, config: &ViewerConfig, path: &Path) -> Result<()> {
    let script = Script::load(path)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut written: Result<()> = Ok(());

    let viewer = script::replay_with(&script, config, cli.fps, |record| {
        if cli.no_ui || written.is_err() {
            return;
        }
        written = serde_json::to_writer(&mut out, record)
            .map_err(anyhow::Error::from)
            .and_then(|_| writeln!(out).map_err(anyhow::Error::from));
    });
    written.context("Failed to write frame record")?;

    log::info!(
        "replay finished in {:?} at progress {:.3}",
        viewer.mode(),
        viewer.progress()
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };

    if let Some(path) = &cli.script {
        return run_script(&cli, &config, path);
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(&cli, &config);

    if !cli.no_ui {
        println!("Orrery - Controls: scroll to travel, click a body to orbit, Escape to return");
    }
    event_loop.run_app(&mut app)?;

    Ok(())
}
