use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub header: Rect,
    pub notice_bar: Rect,
    pub candidates: Rect,
    pub results: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    // Main vertical split: header | notice | content | status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(1), // Notice bar
            Constraint::Min(8),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    // Horizontal: candidate list | gap | results
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .spacing(1)
        .constraints([
            Constraint::Percentage(58), // Candidates
            Constraint::Min(30),        // Results
        ])
        .split(main_chunks[2]);

    AppLayout {
        header: main_chunks[0],
        notice_bar: main_chunks[1],
        candidates: h_chunks[0],
        results: h_chunks[1],
        status_bar: main_chunks[3],
    }
}

/// A rectangle of at most `width` x `height` centered in `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width.saturating_sub(2));
    let h = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_fills_area() {
        let area = Rect::new(0, 0, 120, 40);
        let l = compute_layout(area);
        assert_eq!(l.header.height, 3);
        assert_eq!(l.notice_bar.height, 1);
        assert_eq!(l.status_bar.y, 39);
        assert!(l.candidates.width > l.results.width);
    }

    #[test]
    fn test_centered_fits_inside() {
        let area = Rect::new(0, 0, 40, 10);
        let r = centered(area, 60, 20);
        assert!(r.width <= 38 && r.height <= 8);
        assert_eq!(centered(area, 20, 4), Rect::new(10, 3, 20, 4));
    }
}
