use axum::{Router, routing::{get, post}};
use crate::{AppState, controllers::stocks_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/stocks/table", get(stocks_controller::get_stocks_table))
        .route("/stocks/:symbol/select", post(stocks_controller::post_select_symbol))
        .route("/chart/series", get(stocks_controller::get_chart_series))
}
