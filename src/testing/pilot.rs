//! Pilot: programmatic interaction with a headless App.
//!
//! The `Pilot` wraps an [`App`](crate::app::App) in headless mode and
//! provides methods to simulate user input (mouse presses, drags, key
//! presses, resize), process messages, and flatten the rendered frame for
//! snapshot assertions.

use crate::app::{App, AppConfig};
use crate::css::styles::Styles;
use crate::event::input::{
    InputEvent, Key, KeyEvent, Modifiers, MouseAction, MouseButton, MouseEvent,
};
use crate::geometry::Region;
use crate::render::strip::Strip;
use crate::widget::traits::Widget;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless app driver for testing.
///
/// # Examples
///
/// ```ignore
/// use tui95::testing::Pilot;
/// use tui95::widgets::Modal;
///
/// let mut pilot = Pilot::new(80, 24);
/// pilot.app_mut().desktop.mount(Modal::new("Notepad").width(40));
/// pilot.click(5, 3);
/// pilot.process();
/// assert!(pilot.is_running());
/// ```
pub struct Pilot {
    app: App,
}

impl Pilot {
    /// Create a headless app with the given terminal size.
    pub fn new(width: u16, height: u16) -> Self {
        Self { app: App::new_headless(width, height) }
    }

    /// Apply a user CSS stylesheet.
    pub fn with_css(mut self, css: &str) -> Self {
        self.app.config.css = Some(css.to_owned());
        self.app.apply_config_css();
        self
    }

    /// Create a Pilot from an [`AppConfig`], forcing headless mode.
    pub fn with_config(config: AppConfig) -> Self {
        let mut app = App::new_headless(80, 24);
        app.config = config;
        app.apply_config_css();
        Self { app }
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Simulate a key press with no modifiers.
    pub fn press_key(&mut self, key: Key) {
        self.app
            .handle_input(InputEvent::Key(KeyEvent::new(key, Modifiers::NONE)));
    }

    /// Simulate a key press with the given modifiers.
    pub fn press_key_with(&mut self, key: Key, modifiers: Modifiers) {
        self.app
            .handle_input(InputEvent::Key(KeyEvent::new(key, modifiers)));
    }

    /// Simulate a left-button press at (x, y) — presses drive every
    /// window-manager transition.
    pub fn click(&mut self, x: i32, y: i32) {
        self.mouse(MouseAction::Down(MouseButton::Left), x, y);
    }

    /// Simulate a left-button release at (x, y).
    pub fn release(&mut self, x: i32, y: i32) {
        self.mouse(MouseAction::Up(MouseButton::Left), x, y);
    }

    /// Simulate a left-button drag step to (x, y).
    pub fn drag_to(&mut self, x: i32, y: i32) {
        self.mouse(MouseAction::Drag(MouseButton::Left), x, y);
    }

    /// Simulate an arbitrary mouse action at (x, y).
    pub fn mouse(&mut self, kind: MouseAction, x: i32, y: i32) {
        self.app.handle_input(InputEvent::Mouse(MouseEvent {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }));
    }

    /// Simulate a terminal resize.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.app.handle_input(InputEvent::Resize { width, height });
    }

    // ── Processing ───────────────────────────────────────────────────

    /// Process all pending messages in the app's dispatcher.
    pub fn process(&mut self) {
        self.app.handle_messages();
    }

    /// Simulate one frame: process messages, fold registry changes, and
    /// repaint into the headless compositor.
    pub fn tick(&mut self) {
        self.app.tick().expect("headless tick cannot fail");
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Borrow the underlying app immutably.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Borrow the underlying app mutably.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Whether the app is still running (has not quit).
    pub fn is_running(&self) -> bool {
        !self.app.should_quit()
    }

    // ── Render helpers ───────────────────────────────────────────────

    /// Render a widget into strips within a region of the given dimensions,
    /// using default (empty) styles.
    pub fn render_widget(&self, widget: &dyn Widget, width: i32, height: i32) -> Vec<Strip> {
        widget.render(Region::new(0, 0, width, height), &Styles::new())
    }

    /// Render a widget to a plain text string.
    pub fn render_to_text(&self, widget: &dyn Widget, width: i32, height: i32) -> String {
        super::snapshot::strips_to_string(&self.render_widget(widget, width, height), width, height)
    }

    /// Render the whole desktop and flatten the frame to text.
    pub fn screen_text(&mut self) -> String {
        self.app.desktop.render();
        super::snapshot::compositor_to_string(&self.app.desktop.compositor)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
