// src/app.rs
use crate::audio::NoteBank;
use crate::config;
use crate::game::session::Session;
use crate::game::speed::SpeedPolicy;
use crate::render;
use crate::traits::audio::{NotePlayer, NullPlayer};
use crate::traits::tick::TickHandle;
use log::{error, info, warn};
use pixels::{Pixels, SurfaceTexture};
use std::cell::Cell;
use std::error::Error;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Tick source backed by the redraw loop. The engine's `start`/`stop`
/// calls gate whether a redraw also advances the run; redraws themselves
/// keep coming so the menu stays painted.
#[derive(Clone, Default)]
pub struct RedrawTicker {
    active: Rc<Cell<bool>>,
}

impl RedrawTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

impl TickHandle for RedrawTicker {
    fn start(&mut self) {
        self.active.set(true);
    }

    fn stop(&mut self) {
        self.active.set(false);
    }
}

pub struct App {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels>,
    session: Session,
    ticker: RedrawTicker,
    last_title_update: Instant,
}

impl App {
    pub fn new() -> Self {
        let ticker = RedrawTicker::new();
        let audio: Box<dyn NotePlayer> = match NoteBank::load(Path::new(config::NOTE_DIR)) {
            Ok(bank) => Box::new(bank),
            Err(e) => {
                warn!("Audio unavailable, running silent: {}", e);
                Box::new(NullPlayer)
            }
        };
        let session = Session::new(SpeedPolicy::standard(), audio, Box::new(ticker.clone()));
        App {
            window: None,
            pixels: None,
            session,
            ticker,
            last_title_update: Instant::now(),
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Box<dyn Error>> {
        let attributes = Window::default_attributes()
            .with_title(config::WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(config::WINDOW_WIDTH, config::WINDOW_HEIGHT))
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(attributes)?);

        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, window.as_ref());
        let pixels = Pixels::new(config::WINDOW_WIDTH, config::WINDOW_HEIGHT, surface)?;

        self.window = Some(window);
        self.pixels = Some(pixels);
        info!("Starting event loop...");
        Ok(())
    }

    fn load_sheet_from_dialog(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Load note sheet")
            .pick_file()
        else {
            return;
        };
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match std::fs::read(&path) {
            Ok(data) => {
                if let Err(e) = self.session.load_sheet(&data, &name) {
                    warn!("Failed to parse sheet {:?}: {}", path, e);
                }
            }
            Err(e) => warn!("Failed to read sheet {:?}: {}", path, e),
        }
        self.refresh_title();
    }

    fn refresh_title(&mut self) {
        if let Some(window) = &self.window {
            let snapshot = self.session.snapshot();
            window.set_title(&format!(
                "{} | Score: {} (Lv {}) | Hiscore: {} | {}",
                config::WINDOW_TITLE,
                snapshot.score,
                snapshot.speed_level,
                snapshot.hi_score,
                snapshot.sheet_status
            ));
        }
        self.last_title_update = Instant::now();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                error!("Failed to initialize window: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.as_ref().cloned() else {
            return;
        };
        if window_id != window.id() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested. Shutting down.");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                let PhysicalKey::Code(code) = key_event.physical_key else {
                    return;
                };
                match key_event.state {
                    ElementState::Pressed => {
                        if !self.session.running {
                            // Menu controls; lane keys pass through below.
                            match code {
                                KeyCode::Enter | KeyCode::Space => {
                                    self.session.restart();
                                    self.refresh_title();
                                    return;
                                }
                                KeyCode::KeyL => {
                                    self.load_sheet_from_dialog();
                                    return;
                                }
                                KeyCode::Escape => {
                                    info!("Exit requested from menu.");
                                    event_loop.exit();
                                    return;
                                }
                                _ => {}
                            }
                        }
                        self.session.key_down(code);
                    }
                    ElementState::Released => {
                        self.session.key_up(code);
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                if self.ticker.is_active() {
                    self.session.tick();
                }
                if self.last_title_update.elapsed() >= config::TITLE_REFRESH_INTERVAL {
                    self.refresh_title();
                }
                if let Some(pixels) = &mut self.pixels {
                    render::draw(pixels.frame_mut(), &self.session.snapshot());
                    if let Err(e) = pixels.render() {
                        error!("Failed to present frame: {}", e);
                        event_loop.exit();
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
