//! Resize input - Feeding the layout element's size into a registry.
//!
//! The registry only stores the last observed content rectangle. Hosts call
//! [`LayoutRegistry::set_layout_rect`] directly, or use the terminal helpers
//! here, where one cell is one unit.

use crossterm::event::Event;

use crate::engine::LayoutRegistry;
use crate::types::ContentRect;

/// Current terminal size as a content rectangle.
pub fn detect_terminal_rect() -> std::io::Result<ContentRect> {
    let (columns, rows) = crossterm::terminal::size()?;
    Ok(cell_rect(columns, rows))
}

/// Read the terminal size and store it in the registry.
pub fn observe_terminal(registry: &LayoutRegistry) -> std::io::Result<ContentRect> {
    let rect = detect_terminal_rect()?;
    registry.set_layout_rect(Some(rect));
    Ok(rect)
}

/// Apply a terminal event. Returns true if it was a resize.
pub fn apply_resize_event(registry: &LayoutRegistry, event: &Event) -> bool {
    match *event {
        Event::Resize(columns, rows) => {
            let rect = cell_rect(columns, rows);
            tracing::debug!(width = rect.width, height = rect.height, "layout resized");
            registry.set_layout_rect(Some(rect));
            true
        }
        _ => false,
    }
}

fn cell_rect(columns: u16, rows: u16) -> ContentRect {
    ContentRect::new(f64::from(columns), f64::from(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_resize_event_updates_rect() {
        let registry = LayoutRegistry::root();
        assert!(apply_resize_event(&registry, &Event::Resize(120, 40)));
        assert_eq!(registry.layout_rect(), Some(ContentRect::new(120.0, 40.0)));
    }

    #[test]
    fn test_other_events_ignored() {
        let registry = LayoutRegistry::root();
        let key = Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(!apply_resize_event(&registry, &key));
        assert_eq!(registry.layout_rect(), None);
    }
}
