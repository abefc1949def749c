use crate::app::state::AppState;
use crate::election::{Candidate, Voter};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

/// State of the vote control for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteButton {
    Open,
    Chosen,
    Closed,
}

impl VoteButton {
    pub fn label(self) -> &'static str {
        match self {
            VoteButton::Open => "Vote",
            VoteButton::Chosen => "Your choice",
            VoteButton::Closed => "Voting closed",
        }
    }

    pub fn style(self) -> Style {
        match self {
            VoteButton::Open => Style::default().fg(Theme::BG_DARK).bg(Theme::ACCENT_BLUE),
            VoteButton::Chosen => Style::default().fg(Theme::BG_DARK).bg(Theme::ACCENT_GREEN),
            VoteButton::Closed => Style::default().fg(Theme::TEXT_MUTED).bg(Theme::BG_ELEVATED),
        }
    }
}

/// Vote control for `candidate`, as seen by `voter`.
pub fn vote_button(voter: Option<&Voter>, candidate: &Candidate) -> VoteButton {
    match voter {
        Some(v) if v.has_voted => {
            if v.voted_for.as_ref() == Some(&candidate.id) {
                VoteButton::Chosen
            } else {
                VoteButton::Closed
            }
        }
        _ => VoteButton::Open,
    }
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let election = &state.election;
    let voter = election.current_voter();

    let items: Vec<ListItem> = election
        .candidates()
        .iter()
        .map(|c| {
            let button = vote_button(voter, c);
            let mut stats = vec![
                Span::styled(format!("   {} votes", c.votes), Theme::votes()),
                Span::styled(format!("  {}%", election.share_percent(c)), Theme::share()),
                Span::raw("  "),
                Span::styled(format!(" {} ", button.label()), button.style()),
            ];
            if election.is_admin() {
                stats.push(Span::styled(
                    "  [d] remove",
                    Style::default().fg(Theme::ACCENT_RED),
                ));
            }
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!(" {}", c.name), Theme::candidate_name()),
                    Span::styled(format!("  {}", c.party), Theme::party()),
                ]),
                Line::from(Span::styled(format!("   {}", c.description), Theme::description())),
                Line::from(Span::styled(
                    format!("   {}", c.photo),
                    Style::default().fg(Theme::TEXT_MUTED),
                )),
                Line::from(stats),
                Line::from(""),
            ])
        })
        .collect();

    let title = format!(" Candidates ({}) ", items.len());
    let block = Block::default()
        .title(title)
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border_focused())
        .style(Theme::panel_bg());

    if items.is_empty() {
        let empty = List::new(vec![ListItem::new(Span::styled(
            " No candidates. An administrator can add one with n.",
            Style::default().fg(Theme::TEXT_MUTED),
        ))])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Theme::candidate_selected())
        .highlight_symbol("▌");
    let mut list_state = ListState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::election::model::seeded_candidates;

    #[test]
    fn test_vote_button() {
        let seeds = seeded_candidates();
        assert_eq!(vote_button(None, &seeds[0]), VoteButton::Open);

        let fresh = Voter::new("9991234567");
        assert_eq!(vote_button(Some(&fresh), &seeds[0]), VoteButton::Open);

        let voted = Voter {
            phone: "9991234567".into(),
            has_voted: true,
            voted_for: Some("2".into()),
        };
        assert_eq!(vote_button(Some(&voted), &seeds[1]), VoteButton::Chosen);
        assert_eq!(vote_button(Some(&voted), &seeds[0]), VoteButton::Closed);
        assert_eq!(VoteButton::Chosen.label(), "Your choice");
    }

    #[test]
    fn test_vote_button_styles_differ() {
        let styles = [VoteButton::Open, VoteButton::Chosen, VoteButton::Closed].map(VoteButton::style);
        assert_ne!(styles[0], styles[1]);
        assert_ne!(styles[1], styles[2]);
        assert_ne!(styles[0], styles[2]);
    }
}
