mod clock;
mod config;
mod draw;
mod food;
mod game;
mod grid;
mod input;
mod scores;
mod snake;

use anyhow::{Context, Result};
use clock::FrameClock;
use config::GameConfig;
use draw::Renderer;
use game::{Flow, Game};
use pixels::{Pixels, SurfaceTexture};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use scores::ScoreStore;
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use winit::dpi::LogicalSize;
use winit::event::Event;
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    init_tracing();

    let config = GameConfig::from_env()?;
    info!(grid = config.grid().count(), tick_rate = config.tick_rate, "config loaded");

    let store = match ScoreStore::open(&config.score_file, config.score_limit) {
        Ok(store) => {
            info!(path = ?store.path(), "score table ready");
            Some(store)
        }
        Err(e) => {
            warn!("high scores disabled: {:#}", e);
            None
        }
    };

    let event_loop = EventLoop::new();
    let mut input = WinitInputHelper::new();

    let size = config.window_size;
    let window = WindowBuilder::new()
        .with_title("Snake Game")
        .with_inner_size(LogicalSize::new(size, size))
        .with_resizable(false)
        .build(&event_loop)
        .context("Failed to create window")?;

    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(size, size, surface_texture).context("Failed to create pixel surface")?
    };

    let renderer = Renderer::new(size, config.palette.clone());
    let mut game = Game::new(config.grid(), store, config.score_limit, SmallRng::from_entropy());
    let mut clock = FrameClock::new(config.tick_rate, Instant::now());

    event_loop.run(move |event, _, control_flow| {
        if let Event::RedrawRequested(_) = event {
            renderer.draw(pixels.frame_mut(), &game);
            if let Err(e) = pixels.render() {
                error!("render failed: {}", e);
                *control_flow = ControlFlow::Exit;
                return;
            }
        }

        if input.update(&event) {
            for command in input::poll(&input) {
                if game.handle(command) == Flow::Quit {
                    *control_flow = ControlFlow::Exit;
                    return;
                }
            }

            if clock.tick(Instant::now()) {
                game.tick();
                window.request_redraw();
            }
            *control_flow = ControlFlow::WaitUntil(clock.deadline());
        }
    });
}
