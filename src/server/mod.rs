mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, patch, post},
    Router,
};

use crate::api::{DynAPI, API};
use crate::server::handlers::{groups, routes, selections};

pub async fn serve<T: API + Sync + Send + 'static>(api: T) {
    tracing_subscriber::fmt::init();

    let api = Arc::new(api) as DynAPI;

    let app = Router::new()
        .route("/selections", post(selections::create))
        .route(
            "/selections/:token",
            get(selections::find).delete(selections::discard),
        )
        .route("/selections/:token/origin", patch(selections::set_origin))
        .route(
            "/selections/:token/origin/search",
            patch(selections::search_origin),
        )
        .route(
            "/selections/:token/destination",
            patch(selections::set_destination),
        )
        .route(
            "/selections/:token/destination/search",
            patch(selections::search_destination),
        )
        .route(
            "/selections/:token/location",
            patch(selections::use_current_location),
        )
        .route("/selections/:token/reset", patch(selections::reset))
        .route("/groups", post(groups::create).get(groups::list))
        .route("/groups/:id", get(groups::find).delete(groups::remove))
        .route("/groups/:id/routes", post(routes::create).get(routes::list))
        .route(
            "/groups/:id/routes/:route_id",
            get(routes::find).delete(routes::remove),
        )
        .layer(Extension(api));

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
