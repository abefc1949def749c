use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, LineGauge, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Results ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border())
        .style(Theme::panel_bg());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 3 {
        return;
    }

    let election = &state.election;
    let total = election.total_votes();

    // Totals row
    let stats = [
        ("Total votes", total.to_string(), Theme::ACCENT_BLUE),
        ("Voted", election.voted_count().to_string(), Theme::ACCENT_GREEN),
        ("Not voted", election.not_voted_count().to_string(), Theme::ACCENT_AMBER),
    ];
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(Rect::new(inner.x, inner.y, inner.width, 2));
    for ((label, value, color), col) in stats.into_iter().zip(cols.iter()) {
        let text = vec![
            Line::from(Span::styled(
                value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(label, Style::default().fg(Theme::TEXT_SECONDARY))),
        ];
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), *col);
    }

    let body = Rect::new(
        inner.x,
        inner.y + 3,
        inner.width,
        inner.height.saturating_sub(3),
    );
    if total == 0 {
        let empty = Paragraph::new(Line::from(Span::styled(
            " No votes cast yet.",
            Style::default().fg(Theme::TEXT_MUTED),
        )));
        frame.render_widget(empty, body);
        return;
    }

    // Two rows per candidate: label, then bar
    let mut y = body.y;
    for candidate in election.candidates() {
        if y + 2 > body.bottom() {
            break;
        }
        let label = Line::from(vec![
            Span::styled(format!(" {}", candidate.name), Theme::candidate_name()),
            Span::styled(
                format!(
                    "  {} votes ({}%)",
                    candidate.votes,
                    election.share_percent(candidate)
                ),
                Theme::description(),
            ),
        ]);
        frame.render_widget(Paragraph::new(label), Rect::new(body.x, y, body.width, 1));

        let gauge = LineGauge::default()
            .ratio(election.vote_share(candidate))
            .label("")
            .line_set(symbols::line::THICK)
            .filled_style(Style::default().fg(Theme::ACCENT_TEAL))
            .unfilled_style(Style::default().fg(Theme::BORDER_DIM));
        frame.render_widget(
            gauge,
            Rect::new(body.x + 1, y + 1, body.width.saturating_sub(2), 1),
        );
        y += 2;
    }
}
