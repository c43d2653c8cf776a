use crate::{AppConfig, routes};
use axum::routing::get;
use axum::{Extension, Router};
use axum_prometheus::PrometheusMetricLayerBuilder;
use http::{HeaderValue, Method, header};
use sea_orm::DatabaseConnection;
use sentry_tower::NewSentryLayer;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;


fn parse_origins(origins: &[String]) -> anyhow::Result<Vec<HeaderValue>> {
    Ok(origins
        .iter()
        .map(|origin| origin.parse())
        .collect::<Result<Vec<_>, _>>()?)
}

/// All routes with their extensions, without the metric and sentry layers.
pub(crate) fn create_router(
    app_config: AppConfig,
    origins: &[String],
    seaorm_pool: DatabaseConnection,
) -> anyhow::Result<Router> {
    // CORS for login routes - users don't have credentials yet during authentication
    let login_cors = CorsLayer::new()
        .allow_origin(parse_origins(origins)?)
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE, header::ORIGIN])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .max_age(Duration::from_secs(3600));

    // CORS for API routes - users have credentials for authenticated endpoints
    let api_cors = CorsLayer::new()
        .allow_origin(parse_origins(origins)?)
        .allow_headers([
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ORIGIN,
        ])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .max_age(Duration::from_secs(3600));

    let app = Router::new()
        .merge(routes::swagger::create_router())
        .merge(routes::login::create_router().layer(login_cors))
        .nest(
            "/api/v0",
            Router::new()
                .nest("/status", routes::api::v0::status::create_router())
                .nest("/user", routes::api::v0::user::create_router())
                .nest("/quiz", routes::api::v0::quiz::create_router())
                .nest("/analytics", routes::api::v0::analytics::create_router())
                .nest("/assistant", routes::api::v0::assistant::create_router())
                .layer(api_cors),
        )
        .layer(
            ServiceBuilder::new()
                .layer(Extension(app_config))
                .layer(Extension(seaorm_pool)),
        )
        .with_state(());
    Ok(app)
}

pub(crate) fn create_app(
    app_config: AppConfig,
    origins: &[String],
    seaorm_pool: DatabaseConnection,
) -> anyhow::Result<Router> {
    let (prometheus_layer, metric_handle) = PrometheusMetricLayerBuilder::new()
        .with_prefix("api")
        .with_default_metrics()
        .build_pair();

    if origins.is_empty() {
        tracing::info!("no origins configured, cross origin requests are rejected");
    }

    let app = create_router(app_config, origins, seaorm_pool)?
        .route("/metrics", get(|| async move { metric_handle.render() }))
        .layer(
            // Router layers are called bottom to top
            // ServiceBuilder layers are called top to bottom
            ServiceBuilder::new()
                .layer(NewSentryLayer::new_from_top())
                .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
                .layer(prometheus_layer),
        );
    Ok(app)
}
