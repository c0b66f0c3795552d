use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::{models::Theme, AppState};

/// Theme stored in the preference cookie; dark when unset.
pub fn theme_from_jar(state: &AppState, jar: &CookieJar) -> Theme {
    Theme::parse(jar.get(&state.settings.theme_cookie_name).map(|c| c.value()))
}

fn theme_cookie(state: &AppState, theme: Theme) -> Cookie<'static> {
    let mut cookie = Cookie::new(state.settings.theme_cookie_name.clone(), theme.as_str());
    cookie.set_path("/");
    cookie.set_same_site(SameSite::Lax);
    cookie.make_permanent();
    cookie
}

// POST /theme/toggle
pub async fn post_toggle_theme(State(state): State<AppState>, jar: CookieJar) -> Response {
    let next = theme_from_jar(&state, &jar).toggled();
    let jar = jar.add(theme_cookie(&state, next));

    let mut res = (jar, (StatusCode::OK, Html(next.button_label().to_string()))).into_response();
    // the whole page reads the theme attribute, so reload it
    res.headers_mut().insert("HX-Refresh", HeaderValue::from_static("true"));
    res
}
