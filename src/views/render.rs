use serde_json::{json, Value};

use crate::{models::Theme, AppState};

/// Wraps a rendered page body in the base layout.
pub fn render_full(
    state: &AppState,
    title: &str,
    body_html: String,
    theme: Theme,
) -> Result<String, String> {
    let ctx = json!({
        "title": title,
        "body": body_html,
        "theme": theme.as_str(),
        "theme_label": theme.button_label(),
    });

    state
        .hbs
        .render("layouts/base", &ctx)
        .map_err(|e| e.to_string())
}

pub fn render_partial(state: &AppState, tpl: &str, ctx: &Value) -> String {
    state
        .hbs
        .render(tpl, ctx)
        .unwrap_or_else(|e| format!("template error: {e}"))
}
