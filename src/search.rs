use crate::api::User;
use crate::app::{AppState, InputMode};

/// Case-insensitive match on name, email or id.
pub fn matches(user: &User, query: &str) -> bool {
    let q = query.to_lowercase();
    user.name.to_lowercase().contains(&q)
        || user.email.to_lowercase().contains(&q)
        || user.id.map(|id| id.to_string().contains(&q)).unwrap_or(false)
}

/// Users matching `query`, in list order. An empty query keeps everything.
pub fn filter_users<'a>(users: &'a [User], query: &str) -> Vec<&'a User> {
    let q = query.trim();
    if q.is_empty() {
        return users.iter().collect();
    }
    users.iter().filter(|u| matches(u, q)).collect()
}

/// Leave search mode keeping the typed query and jump back to the first row.
pub fn apply_search(app: &mut AppState) {
    app.selected_index = 0;
    app.input_mode = InputMode::Normal;
    app.clamp_selection();
}

/// Leave search mode and show the full list again.
pub fn clear_search(app: &mut AppState) {
    app.search_query.clear();
    app.input_mode = InputMode::Normal;
    app.clamp_selection();
}
