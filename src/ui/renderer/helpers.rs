//! Shared rendering helpers: scrollbar, centered rect.

use ratatui::{
    layout::Rect,
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Render a vertical scrollbar on the right side of `area`.
///
/// Only renders if `total > visible_height`.
pub fn render_scrollbar(frame: &mut Frame, area: Rect, total: usize, position: usize) {
    let visible_height = area.height as usize;
    if area.is_empty() || total <= visible_height {
        return;
    }
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("▲"))
        .end_symbol(Some("▼"));
    let mut scrollbar_state =
        ScrollbarState::new(total.saturating_sub(visible_height)).position(position);
    frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
}

/// Return a `Rect` centered within `area` with the given dimensions.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits() {
        let r = centered_rect(20, 10, Rect::new(0, 0, 100, 50));
        assert_eq!(r, Rect::new(40, 20, 20, 10));
    }

    #[test]
    fn centered_rect_clamps_to_area() {
        let r = centered_rect(200, 100, Rect::new(5, 5, 40, 20));
        assert_eq!(r, Rect::new(5, 5, 40, 20));
    }
}
