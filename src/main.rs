use std::net::SocketAddr;

use smartstock::{config, routes, services::feed_controller, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = config::load();
    tracing::info!(
        "tracking {:?} (backend {}, stream {})",
        settings.tracked_symbols,
        settings.api_base_url,
        settings.ws_url
    );

    let state = AppState::new(settings.clone());
    feed_controller::spawn(&state);

    let app = routes::app(state);

    let ip = match settings.host.parse::<std::net::IpAddr>() {
        Ok(ip) => ip,
        Err(e) => {
            tracing::error!("invalid HOST {:?}: {}", settings.host, e);
            return;
        }
    };
    let addr = SocketAddr::from((ip, settings.port));
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listen address");
    axum::serve(listener, app).await.expect("server error");
}
