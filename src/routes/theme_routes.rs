use axum::{Router, routing::post};
use crate::{AppState, controllers::theme_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/theme/toggle", post(theme_controller::post_toggle_theme))
}
