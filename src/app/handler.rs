use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::state::*;
use crate::election::ElectionError;
use chrono::Utc;
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Instant;

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(CEvent::Key(key)) if key.kind != KeyEventKind::Release => {
            state.dirty = true;
            handle_key(state, key)
        }
        AppEvent::Terminal(CEvent::Resize(..)) => {
            state.dirty = true;
            vec![]
        }
        AppEvent::Terminal(_) => vec![],
        AppEvent::Tick => {
            state.expire_notice(Instant::now());
            vec![]
        }
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }

    if state.alert.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            state.alert = None;
        }
        return vec![];
    }

    if state.dialog.is_some() {
        return handle_dialog_key(state, key);
    }

    handle_main_key(state, key)
}

fn handle_main_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            state.select_prev();
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.select_next();
            vec![]
        }
        KeyCode::Enter | KeyCode::Char('v') => vote_selected(state),
        KeyCode::Char('l') => {
            state.dialog = Some(Dialog::login());
            vec![]
        }
        KeyCode::Char('o') => {
            if state.election.current_voter().is_none() {
                return vec![];
            }
            state.election.sign_out();
            vec![Action::Persist]
        }
        KeyCode::Char('a') => {
            if !state.election.is_admin() {
                state.dialog = Some(Dialog::admin_login());
            }
            vec![]
        }
        KeyCode::Char('x') => {
            state.election.sign_out_admin();
            vec![]
        }
        KeyCode::Char('n') if state.election.is_admin() => {
            state.dialog = Some(Dialog::add_candidate());
            vec![]
        }
        KeyCode::Char('d') if state.election.is_admin() => remove_selected(state),
        KeyCode::Char('q') => vec![Action::Quit],
        _ => vec![],
    }
}

fn vote_selected(state: &mut AppState) -> Vec<Action> {
    let Some(id) = state.selected_candidate().map(|c| c.id.clone()) else {
        return vec![];
    };
    match state.election.vote(&id).map(|c| c.name.clone()) {
        Ok(name) => {
            state.set_notice(format!("Your vote for {} has been counted!", name), Instant::now());
            vec![Action::Persist]
        }
        Err(ElectionError::NotSignedIn) => {
            state.dialog = Some(Dialog::login());
            vec![]
        }
        Err(e) => {
            state.show_alert(e.to_string());
            vec![]
        }
    }
}

fn remove_selected(state: &mut AppState) -> Vec<Action> {
    let Some(id) = state.selected_candidate().map(|c| c.id.clone()) else {
        return vec![];
    };
    match state.election.remove_candidate(&id) {
        Ok(removed) => {
            state.clamp_selection();
            state.set_notice(format!("Removed {}", removed.name), Instant::now());
            vec![Action::Persist]
        }
        Err(e) => {
            state.show_alert(e.to_string());
            vec![]
        }
    }
}

fn handle_dialog_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Esc => {
            state.dialog = None;
            vec![]
        }
        KeyCode::Enter => submit_dialog(state),
        KeyCode::Tab | KeyCode::Down => {
            if let Some(Dialog::AddCandidate(form)) = state.dialog.as_mut() {
                form.focus_next();
            }
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(Dialog::AddCandidate(form)) = state.dialog.as_mut() {
                form.focus_prev();
            }
            vec![]
        }
        _ => {
            if let Some(dialog) = state.dialog.as_mut() {
                edit_input(dialog.active_input_mut(), key);
            }
            vec![]
        }
    }
}

fn edit_input(input: &mut InputState, key: KeyEvent) {
    match key.code {
        KeyCode::Backspace => input.delete_back(),
        KeyCode::Delete => input.delete_forward(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'a' => input.move_home(),
                    'e' => input.move_end(),
                    'u' => input.clear(),
                    _ => {}
                }
            } else {
                input.insert_char(c);
            }
        }
        _ => {}
    }
}

fn submit_dialog(state: &mut AppState) -> Vec<Action> {
    let Some(dialog) = state.dialog.as_mut() else {
        return vec![];
    };
    match dialog {
        Dialog::Login { phone } => {
            let result = state
                .election
                .authenticate_voter(&phone.text)
                .map(|v| v.phone.clone());
            match result {
                Ok(phone) => {
                    state.dialog = None;
                    state.set_notice(format!("Signed in as {}", phone), Instant::now());
                    vec![Action::Persist]
                }
                Err(e) => {
                    state.show_alert(e.to_string());
                    vec![]
                }
            }
        }
        Dialog::AdminLogin { password } => {
            let attempt = password.take_text();
            match state
                .election
                .authenticate_admin(state.authenticator.as_ref(), &attempt)
            {
                Ok(()) => {
                    state.dialog = None;
                    vec![]
                }
                Err(e) => {
                    state.show_alert(e.to_string());
                    vec![]
                }
            }
        }
        Dialog::AddCandidate(form) => {
            let fields = form.to_new_candidate();
            let result = state
                .election
                .add_candidate(fields, Utc::now())
                .map(|c| c.name.clone());
            match result {
                Ok(name) => {
                    state.dialog = None;
                    state.selected = state.election.candidates().len() - 1;
                    state.set_notice(format!("Added {}", name), Instant::now());
                    vec![Action::Persist]
                }
                Err(e) => {
                    state.show_alert(e.to_string());
                    vec![]
                }
            }
        }
    }
}
