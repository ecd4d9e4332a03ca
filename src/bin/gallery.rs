//! Widget gallery: a desk of demo windows showing every widget.
//!
//! Run with mouse support in any ANSI terminal. Drag windows by their title
//! bars, open the menus, toggle the checkboxes, pick a path from the
//! dropdown. Ctrl+C quits.
//!
//! Set `TUI95_LOG=debug` to stream tracing output to stderr (pipe it to a
//! file — stderr fights the alternate screen otherwise).

use tui95::app::{App, AppConfig};
use tui95::layout::Alignment;
use tui95::widgets::{Checkbox, Dropdown, Label, List, Modal};

fn init_tracing() {
    if let Ok(filter) = std::env::var("TUI95_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let mut app = App::new(AppConfig::new().with_title("tui95 gallery"))?;

    app.desktop.mount(
        Modal::new("Notepad")
            .icon('▤')
            .default_position(4, 2)
            .width(46)
            .menu("File", List::new(["New", "Open...", "Save", "Exit"]))
            .menu("Edit", List::new(["Cut", "Copy", "Paste"]))
            .menu("Help", List::new(["About Notepad"]))
            .child(Label::new("A humble text editor."))
            .child(Checkbox::new("Word wrap"))
            .child(Checkbox::new("Status bar").checked(true)),
    );

    app.desktop.mount(
        Modal::new("Open file")
            .icon('▦')
            .default_position(30, 12)
            .width(54)
            .child(Label::new("Look in:"))
            .child(Dropdown::new())
            .child(Checkbox::new("Open as read-only"))
            .button("Open", || {})
            .button("Cancel", || {})
            .buttons_alignment(Alignment::End),
    );

    app.desktop.mount(
        Modal::new("About")
            .default_position(58, 3)
            .child(Label::new("tui95 widget gallery"))
            .child(Label::new("Drag me by the title bar."))
            .button("Ok", || {})
            .buttons_alignment(Alignment::Center),
    );

    app.run().await
}
