use crate::config::AppConfig;
use crate::election::{AdminAuthenticator, Candidate, Election, NewCandidate};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Default)]
pub struct InputState {
    pub text: String,
    pub cursor: usize,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        if self.cursor > 0 {
            let prev = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor < self.text.len() {
            let next = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
            self.text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = self.text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.text.len());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn take_text(&mut self) -> String {
        let text = std::mem::take(&mut self.text);
        self.cursor = 0;
        text
    }

    /// Terminal columns between the start of the text and the cursor.
    pub fn cursor_column(&self) -> usize {
        self.text[..self.cursor].width()
    }

    /// Same text with every character replaced by `*`.
    pub fn masked(&self) -> String {
        "*".repeat(self.text.chars().count())
    }
}

pub const CANDIDATE_FIELDS: [&str; 4] = ["Name", "Party", "Description", "Photo (URL)"];

/// The add-candidate dialog: one input per entry of [`CANDIDATE_FIELDS`].
#[derive(Debug, Default)]
pub struct CandidateForm {
    pub fields: [InputState; 4],
    pub focus: usize,
}

impl CandidateForm {
    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    pub fn to_new_candidate(&self) -> NewCandidate {
        let [name, party, description, photo] = &self.fields;
        NewCandidate {
            name: name.text.clone(),
            party: party.text.clone(),
            description: description.text.clone(),
            photo: photo.text.clone(),
        }
    }
}

#[derive(Debug)]
pub enum Dialog {
    Login { phone: InputState },
    AdminLogin { password: InputState },
    AddCandidate(CandidateForm),
}

impl Dialog {
    pub fn login() -> Self {
        Dialog::Login {
            phone: InputState::new(),
        }
    }

    pub fn admin_login() -> Self {
        Dialog::AdminLogin {
            password: InputState::new(),
        }
    }

    pub fn add_candidate() -> Self {
        Dialog::AddCandidate(CandidateForm::default())
    }

    /// The input that currently receives typed characters.
    pub fn active_input_mut(&mut self) -> &mut InputState {
        match self {
            Dialog::Login { phone } => phone,
            Dialog::AdminLogin { password } => password,
            Dialog::AddCandidate(form) => &mut form.fields[form.focus],
        }
    }
}

/// Transient confirmation shown under the header until `expires_at`.
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub expires_at: Instant,
}

pub struct AppState {
    pub election: Election,
    pub authenticator: Box<dyn AdminAuthenticator>,
    pub title: String,
    pub subtitle: String,
    pub notice_duration: Duration,
    /// Index into the candidate list.
    pub selected: usize,
    pub dialog: Option<Dialog>,
    /// Blocking alert; swallows all input until dismissed.
    pub alert: Option<String>,
    pub notice: Option<Notice>,
    pub should_quit: bool,
    pub dirty: bool,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        election: Election,
        authenticator: Box<dyn AdminAuthenticator>,
    ) -> Self {
        Self {
            election,
            authenticator,
            title: config.election.title.clone(),
            subtitle: config.election.subtitle.clone(),
            notice_duration: Duration::from_secs(config.ui.notice_secs),
            selected: 0,
            dialog: None,
            alert: None,
            notice: None,
            should_quit: false,
            dirty: true,
        }
    }

    pub fn selected_candidate(&self) -> Option<&Candidate> {
        self.election.candidates().get(self.selected)
    }

    pub fn select_next(&mut self) {
        let len = self.election.candidates().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
            self.dirty = true;
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.election.candidates().len();
        if len > 0 {
            self.selected = if self.selected == 0 { len - 1 } else { self.selected - 1 };
            self.dirty = true;
        }
    }

    /// Keep the selection inside the list after removals.
    pub fn clamp_selection(&mut self) {
        let len = self.election.candidates().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn show_alert(&mut self, text: String) {
        self.alert = Some(text);
        self.dirty = true;
    }

    pub fn set_notice(&mut self, text: String, now: Instant) {
        self.notice = Some(Notice {
            text,
            expires_at: now + self.notice_duration,
        });
        self.dirty = true;
    }

    /// Drop the notice once its time is up.
    pub fn expire_notice(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| now >= n.expires_at) {
            self.notice = None;
            self.dirty = true;
        }
    }

    pub fn status_line(&self) -> String {
        let e = &self.election;
        let mut s = format!(
            "Candidates: {} | Votes: {} | Voters: {}",
            e.candidates().len(),
            e.total_votes(),
            e.voters().len()
        );
        if e.is_admin() {
            s.push_str(" | admin");
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::election::{Argon2Authenticator, ElectionRules};

    fn app() -> AppState {
        AppState::new(
            &AppConfig::default(),
            Election::seeded(ElectionRules::default()),
            Box::new(Argon2Authenticator::default()),
        )
    }

    #[test]
    fn test_input_editing() {
        let mut input = InputState::new();
        for c in "99912".chars() {
            input.insert_char(c);
        }
        input.move_left();
        input.delete_back();
        assert_eq!(input.text, "9992");
        input.move_home();
        input.delete_forward();
        assert_eq!(input.text, "992");
        input.move_end();
        assert_eq!(input.cursor, 3);
        assert_eq!(input.masked(), "***");
        assert_eq!(input.take_text(), "992");
        assert!(input.text.is_empty());
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn test_cursor_column_counts_width() {
        let mut input = InputState::new();
        for c in "Мария".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.cursor, "Мария".len());
        assert_eq!(input.cursor_column(), 5);
        input.move_left();
        assert_eq!(input.cursor_column(), 4);
    }

    #[test]
    fn test_form_focus_wraps() {
        let mut form = CandidateForm::default();
        form.focus_prev();
        assert_eq!(form.focus, 3);
        form.focus_next();
        assert_eq!(form.focus, 0);
        form.fields[1].insert_char('G');
        let fields = form.to_new_candidate();
        assert_eq!(fields.party, "G");
        assert!(fields.name.is_empty());
    }

    #[test]
    fn test_selection_wraps_and_clamps() {
        let mut state = app();
        state.select_prev();
        assert_eq!(state.selected, 2);
        state.select_next();
        assert_eq!(state.selected, 0);
        state.selected = 7;
        state.clamp_selection();
        assert_eq!(state.selected, 2);
    }

    #[test]
    fn test_notice_expiry() {
        let mut state = app();
        let start = Instant::now();
        state.set_notice("counted".into(), start);
        state.expire_notice(start + Duration::from_secs(2));
        assert!(state.notice.is_some());
        state.expire_notice(start + Duration::from_secs(3));
        assert!(state.notice.is_none());
    }
}
