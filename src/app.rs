//! App struct: lifecycle, async event loop, desktop wiring.
//!
//! [`App`] ties together the desktop, the terminal driver, key bindings, and
//! the message dispatcher. The `new_headless` constructor allows testing
//! without a terminal; the async [`App::run`] loop polls input and repaints
//! on a frame clock.

use std::io;
use std::time::Duration;

use tracing::{info, warn};

use crate::desktop::Desktop;
use crate::event::binding::{BindingAction, KeyBindingRegistry};
use crate::event::handler::EventDispatcher;
use crate::event::input::InputEvent;
use crate::event::message::{self, Envelope};
use crate::render::driver::Driver;
use crate::theme::Theme;

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Optional app title (informational).
    pub title: Option<String>,
    /// Optional user CSS string, applied above the chrome stylesheet.
    pub css: Option<String>,
    /// Target frames per second for the render loop.
    pub fps: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { title: None, css: None, fps: 30 }
    }
}

impl AppConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title (builder).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the user CSS string (builder).
    pub fn with_css(mut self, css: impl Into<String>) -> Self {
        self.css = Some(css.into());
        self
    }

    /// Set the target FPS (builder).
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps.max(1);
        self
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The main application struct.
///
/// Owns the desktop, driver, key bindings, event dispatcher, and config.
/// The driver is optional to support headless testing.
pub struct App {
    /// The desktop (DOM, styles, layout, compositor, window stack, focus).
    pub desktop: Desktop,
    /// Terminal output driver. `None` in headless mode.
    pub driver: Option<Driver>,
    /// Key binding registry.
    pub bindings: KeyBindingRegistry,
    /// Event dispatcher (message queue).
    pub dispatcher: EventDispatcher,
    /// Application configuration.
    pub config: AppConfig,
    /// Whether the app is still running.
    running: bool,
}

impl App {
    /// Create a new app with a real terminal driver.
    ///
    /// Queries the terminal size to set the initial surface dimensions.
    pub fn new(config: AppConfig) -> io::Result<Self> {
        let (width, height) = Driver::terminal_size()?;
        let driver = Driver::new()?;
        let mut app = Self {
            desktop: Desktop::new(width, height, Theme::retro()),
            driver: Some(driver),
            bindings: KeyBindingRegistry::with_defaults(),
            dispatcher: EventDispatcher::new(),
            config,
            running: true,
        };
        app.apply_config_css();
        Ok(app)
    }

    /// Create a headless app for testing (no terminal driver).
    pub fn new_headless(width: u16, height: u16) -> Self {
        Self {
            desktop: Desktop::new(width, height, Theme::retro()),
            driver: None,
            bindings: KeyBindingRegistry::with_defaults(),
            dispatcher: EventDispatcher::new(),
            config: AppConfig::default(),
            running: true,
        }
    }

    /// Apply the config's CSS, if present. Invalid CSS is reported and
    /// skipped, not fatal.
    pub fn apply_config_css(&mut self) {
        if let Some(css) = self.config.css.clone() {
            if let Err(err) = self.desktop.set_user_css(&css) {
                warn!(%err, "ignoring invalid user stylesheet");
            }
        }
    }

    /// Handle an input event.
    ///
    /// Key events resolve through the binding registry into messages; mouse
    /// events route through the desktop (whose interactions may raise
    /// messages of their own); resizes update the surface.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key(ke) => {
                if let Some(action) = self.bindings.resolve(&ke) {
                    let sender = self.desktop.root();
                    match action {
                        BindingAction::Quit => {
                            self.dispatcher.push(Envelope::new(message::Quit, sender));
                        }
                        BindingAction::FocusNext => {
                            self.dispatcher.push(Envelope::new(message::FocusNext, sender));
                        }
                        BindingAction::FocusPrevious => {
                            self.dispatcher
                                .push(Envelope::new(message::FocusPrevious, sender));
                        }
                        BindingAction::Custom(name) => {
                            self.dispatcher
                                .push(Envelope::new(message::Custom::new(name.clone()), sender));
                        }
                    }
                }
            }
            InputEvent::Mouse(me) => {
                for envelope in self.desktop.handle_mouse(me) {
                    self.dispatcher.push(envelope);
                }
            }
            InputEvent::Resize { width, height } => {
                self.desktop.resize(width, height);
            }
            // Focus and paste events are currently unhandled at the app level.
            _ => {}
        }
    }

    /// Process all pending messages in the dispatcher.
    pub fn handle_messages(&mut self) {
        for envelope in self.dispatcher.drain() {
            if envelope.downcast_ref::<message::Quit>().is_some() {
                info!("quit requested");
                self.running = false;
            } else if envelope.downcast_ref::<message::FocusNext>().is_some() {
                self.desktop.focus_next();
            } else if envelope.downcast_ref::<message::FocusPrevious>().is_some() {
                self.desktop.focus_previous();
            } else if envelope.downcast_ref::<message::Refresh>().is_some() {
                self.desktop.compositor.mark_dirty();
            } else if let Some(close) = envelope.downcast_ref::<message::CloseWindow>() {
                self.desktop.close_window(close.node);
            }
            // Custom messages are the embedding application's to interpret.
        }
    }

    /// One cooperative step: process messages, fold registry changes, and
    /// repaint if anything is dirty.
    pub fn tick(&mut self) -> io::Result<()> {
        self.handle_messages();
        self.desktop.absorb_registry_changes();

        if self.desktop.compositor.is_dirty() {
            self.desktop.render();
            let updates = self.desktop.compositor.finish_frame();
            if let Some(driver) = &mut self.driver {
                driver.apply_updates(&updates)?;
                driver.flush()?;
            }
        }
        Ok(())
    }

    /// Run the app until quit: poll input, process, repaint, at the
    /// configured frame rate.
    pub async fn run(&mut self) -> io::Result<()> {
        if let Some(driver) = &mut self.driver {
            driver.enter_alt_screen()?;
            driver.hide_cursor()?;
        }

        let frame = Duration::from_millis(1000 / self.config.fps.max(1) as u64);
        let mut clock = tokio::time::interval(frame);

        let result = loop {
            clock.tick().await;

            if self.driver.is_some() {
                // Drain everything the terminal has queued this frame.
                loop {
                    match crossterm::event::poll(Duration::ZERO) {
                        Ok(true) => match crossterm::event::read() {
                            Ok(event) => self.handle_input(event.into()),
                            Err(_) => break,
                        },
                        _ => break,
                    }
                }
            }

            if let Err(err) = self.tick() {
                break Err(err);
            }
            if self.should_quit() {
                break Ok(());
            }
        };

        if let Some(driver) = &mut self.driver {
            driver.show_cursor()?;
            driver.leave_alt_screen()?;
            driver.flush()?;
        }
        result
    }

    /// Whether the app should quit.
    pub fn should_quit(&self) -> bool {
        !self.running
    }

    /// Request the app to quit.
    pub fn request_quit(&mut self) {
        self.running = false;
    }

    /// Whether the app has a terminal driver (not headless).
    pub fn has_driver(&self) -> bool {
        self.driver.is_some()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
