mod candidate_list;
mod dialog;
mod header;
mod layout;
mod results;
mod status_bar;
mod theme;

use crate::app::state::AppState;
use ratatui::prelude::*;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    header::render(frame, app_layout.header, state);
    header::render_notice(frame, app_layout.notice_bar, state);
    candidate_list::render(frame, app_layout.candidates, state);
    results::render(frame, app_layout.results, state);
    status_bar::render(frame, app_layout.status_bar, state);

    // Popups last so they sit on top
    dialog::render(frame, state);
    dialog::render_alert(frame, state);
}
