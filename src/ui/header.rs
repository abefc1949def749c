use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border())
        .style(Theme::panel_bg());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", state.title),
            Style::default()
                .fg(Theme::ACCENT_TEAL)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(Theme::BORDER_DIM)),
        Span::styled(
            state.subtitle.as_str(),
            Style::default()
                .fg(Theme::TEXT_MUTED)
                .add_modifier(Modifier::ITALIC),
        ),
    ]);

    let mut badges: Vec<Span> = Vec::new();
    match state.election.current_voter() {
        Some(voter) => {
            badges.push(Span::styled(
                format!(" ☎ {} ", voter.phone),
                Style::default().fg(Theme::TEXT_PRIMARY).bg(Theme::BG_ELEVATED),
            ));
            if voter.has_voted {
                badges.push(Span::raw(" "));
                badges.push(Span::styled(
                    " ✓ Voted ",
                    Style::default().fg(Theme::BG_DARK).bg(Theme::ACCENT_GREEN),
                ));
            }
        }
        None => badges.push(Span::styled(
            " not signed in ",
            Style::default().fg(Theme::TEXT_MUTED),
        )),
    }
    if state.election.is_admin() {
        badges.push(Span::raw(" "));
        badges.push(Span::styled(
            " ADMIN ",
            Style::default()
                .fg(Theme::BG_DARK)
                .bg(Theme::ACCENT_AMBER)
                .add_modifier(Modifier::BOLD),
        ));
    }
    badges.push(Span::raw(" "));

    let badge_line = Line::from(badges);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(badge_line.width() as u16)])
        .split(inner);
    frame.render_widget(Paragraph::new(title), chunks[0]);
    frame.render_widget(
        Paragraph::new(badge_line).alignment(Alignment::Right),
        chunks[1],
    );
}

/// One-line strip under the header carrying the current notice, if any.
pub fn render_notice(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(ref notice) = state.notice else {
        return;
    };
    let line = Line::from(vec![
        Span::styled(" ✓ ", Theme::notice()),
        Span::styled(notice.text.as_str(), Theme::notice()),
    ]);
    frame.render_widget(Paragraph::new(line).style(Theme::notice()), area);
}
