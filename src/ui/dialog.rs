//! Modal popups: sign-in prompts, the add-candidate form and blocking alerts.

use crate::app::state::*;
use crate::ui::layout::centered;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

pub fn render(frame: &mut Frame, state: &AppState) {
    let Some(ref dialog) = state.dialog else {
        return;
    };
    // The cursor belongs to the alert while one is up
    let show_cursor = state.alert.is_none();

    match dialog {
        Dialog::Login { phone } => {
            let area = popup(frame, " Sign in ", 50, 6);
            render_field(frame, area, 0, "Phone number", phone, true, false, show_cursor);
        }
        Dialog::AdminLogin { password } => {
            let area = popup(frame, " Administrator sign-in ", 50, 6);
            render_field(frame, area, 0, "Password", password, true, true, show_cursor);
        }
        Dialog::AddCandidate(form) => {
            let area = popup(frame, " Add candidate ", 64, 4 + 3 * CANDIDATE_FIELDS.len() as u16);
            for (i, label) in CANDIDATE_FIELDS.iter().enumerate() {
                let input = &form.fields[i];
                let focused = form.focus == i;
                render_field(
                    frame,
                    area,
                    i as u16 * 3,
                    label,
                    input,
                    focused,
                    false,
                    show_cursor && focused,
                );
            }
        }
    }
}

/// Draw a bordered popup and return its inner area.
fn popup(frame: &mut Frame, title: &str, width: u16, height: u16) -> Rect {
    let area = centered(frame.area(), width, height);
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title.to_string())
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Style::default().fg(Theme::ACCENT_LAVENDER))
        .style(Style::default().bg(Theme::BG_SURFACE));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let help_area = Rect::new(inner.x, inner.bottom().saturating_sub(1), inner.width, 1);
    let help = Line::from(vec![
        Span::styled(" Enter", Theme::key_hint()),
        Span::styled(" Submit  ", Style::default().fg(Theme::TEXT_SECONDARY)),
        Span::styled("Esc", Theme::key_hint()),
        Span::styled(" Cancel", Style::default().fg(Theme::TEXT_SECONDARY)),
    ]);
    frame.render_widget(Paragraph::new(help), help_area);
    inner
}

/// A label line followed by a single-line input at `offset` rows into `area`.
#[allow(clippy::too_many_arguments)]
fn render_field(
    frame: &mut Frame,
    area: Rect,
    offset: u16,
    label: &str,
    input: &InputState,
    focused: bool,
    masked: bool,
    show_cursor: bool,
) {
    if offset + 2 > area.height {
        return;
    }
    let label_style = if focused {
        Style::default()
            .fg(Theme::ACCENT_AMBER)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Theme::TEXT_SECONDARY)
    };
    let label_area = Rect::new(area.x, area.y + offset, area.width, 1);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(format!(" {}", label), label_style))),
        label_area,
    );

    let input_area = Rect::new(area.x, area.y + offset + 1, area.width, 1);
    let chevron = if focused { " ❯ " } else { "   " };
    let shown = if masked { input.masked() } else { input.text.clone() };
    let line = Line::from(vec![
        Span::styled(chevron, Style::default().fg(Theme::ACCENT_TEAL)),
        Span::styled(shown, Theme::input_text()),
    ]);
    frame.render_widget(Paragraph::new(line), input_area);

    if show_cursor {
        // Masked text shows one column per character
        let column = if masked {
            input.text[..input.cursor].chars().count()
        } else {
            input.cursor_column()
        };
        let x = input_area.x + 3 + column as u16;
        frame.set_cursor_position((x.min(input_area.right().saturating_sub(1)), input_area.y));
    }
}

/// Blocking alert drawn above everything else.
pub fn render_alert(frame: &mut Frame, state: &AppState) {
    let Some(ref text) = state.alert else {
        return;
    };
    let area = centered(frame.area(), 54, 7);
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(" Notice ")
        .title_style(Style::default().fg(Theme::ACCENT_RED).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Style::default().fg(Theme::ACCENT_RED))
        .style(Style::default().bg(Theme::BG_SURFACE));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let body = vec![
        Line::from(""),
        Line::from(Span::styled(text.as_str(), Theme::title())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Theme::key_hint()),
            Span::styled(" OK", Style::default().fg(Theme::TEXT_SECONDARY)),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}
