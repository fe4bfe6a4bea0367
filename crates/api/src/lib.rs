use async_graphql_axum::GraphQLRequest;
use axum::{
    extract::Extension,
    http::{header::HeaderMap, Method, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub mod schema;

use crate::schema::SchemaProvider;

async fn explorer(Extension(provider): Extension<SchemaProvider>) -> axum::response::Response {
    match provider.get().await {
        Ok((schema, _)) => Html(quill::server::explorer(&schema.sdl())).into_response(),
        Err(err) => internal_error(err),
    }
}

async fn graphql_handler(
    Extension(provider): Extension<SchemaProvider>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> axum::response::Response {
    match provider.get().await {
        Ok((schema, storage)) => {
            quill::server::execute_session_request(&schema, storage.codec(), &headers, req).await
        }
        Err(err) => internal_error(err),
    }
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}

fn internal_error(err: anyhow::Error) -> axum::response::Response {
    log::error!("{err:#?}");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

pub fn router(provider: SchemaProvider) -> Router {
    Router::new()
        .route("/", get(explorer).post(explorer))
        .route("/graphql", post(graphql_handler))
        .fallback(not_found)
        .layer(Extension(provider))
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::predicate(|_, _| true))
                .allow_methods([Method::GET, Method::POST]),
        )
}

pub async fn start() -> anyhow::Result<()> {
    let provider = SchemaProvider::default();
    // Resolves configuration up front, a missing AUTH_SECRET aborts here
    // instead of on the first request.
    let (_, storage) = provider.get().await?;
    let address = storage.server_config().address().to_string();
    let port = storage.server_config().port();
    println!("API explorer: http://localhost:{port}");
    let listener = tokio::net::TcpListener::bind(address).await?;
    axum::serve(listener, router(provider)).await?;
    Ok(())
}
