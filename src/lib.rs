//! Library entrypoint for SmartStock Monitor.
//!
//! This file exists mainly to make controller tests easy (integration tests
//! under `tests/` can import the app state, routers, controllers, services).

pub mod config;
pub mod error;
pub mod models;

pub mod services;

#[path = "views/render.rs"]
pub mod render;
#[path = "views/templates.rs"]
pub mod templates;

pub mod controllers;
pub mod routes;

use services::{backend::BackendClient, dashboard::{Dashboard, SharedDashboard}};

#[derive(Clone)]
pub struct AppState {
    pub hbs: templates::Hbs,
    pub settings: config::Settings,
    pub backend: BackendClient,
    pub dashboard: SharedDashboard,
    pub events_tx: tokio::sync::broadcast::Sender<String>,
}

impl AppState {
    /// Fresh state with an empty dashboard; nothing is spawned.
    pub fn new(settings: config::Settings) -> Self {
        let dashboard = Dashboard::new(
            settings.tracked_symbols.clone(),
            settings.chart_symbol.clone(),
        )
        .shared();
        let (events_tx, _events_rx) = tokio::sync::broadcast::channel::<String>(64);

        AppState {
            hbs: templates::build_handlebars(),
            backend: BackendClient::from_settings(&settings),
            settings,
            dashboard,
            events_tx,
        }
    }
}
