use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut parts: Vec<Span> = vec![Span::styled(
        format!(" {} ", state.status_line()),
        Theme::status_bar(),
    )];

    // Key hints for whatever currently has input
    let hints: &[(&str, &str)] = if state.alert.is_some() {
        &[("Enter", "dismiss")]
    } else if let Some(ref dialog) = state.dialog {
        match dialog {
            Dialog::AddCandidate(_) => &[("Tab", "next field"), ("Enter", "add"), ("Esc", "cancel")],
            _ => &[("Enter", "submit"), ("Esc", "cancel")],
        }
    } else if state.election.is_admin() {
        &[
            ("↑↓", "select"),
            ("v", "vote"),
            ("n", "add"),
            ("d", "remove"),
            ("x", "leave admin"),
            ("q", "quit"),
        ]
    } else if state.election.current_voter().is_some() {
        &[("↑↓", "select"), ("v", "vote"), ("o", "sign out"), ("a", "admin"), ("q", "quit")]
    } else {
        &[("↑↓", "select"), ("l", "sign in"), ("a", "admin"), ("q", "quit")]
    };

    let mut hint_spans: Vec<Span> = Vec::new();
    for (key, what) in hints {
        hint_spans.push(Span::styled(format!(" {}", key), Theme::key_hint().bg(Theme::BG_ELEVATED)));
        hint_spans.push(Span::styled(format!(" {} ", what), Theme::status_bar()));
    }

    // Pad to push hints to the right edge
    let used: usize = parts
        .iter()
        .chain(hint_spans.iter())
        .map(|s| s.width())
        .sum();
    let remaining = (area.width as usize).saturating_sub(used);
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.extend(hint_spans);

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
