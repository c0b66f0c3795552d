use axum::{Router, routing::get};
use crate::{AppState, controllers::alerts_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/alerts/recent", get(alerts_controller::get_recent_alerts))
        .route("/alerts/rules", get(alerts_controller::get_alert_rules))
}
