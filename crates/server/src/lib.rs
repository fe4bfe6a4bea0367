use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::http::header::{HeaderMap, HeaderValue, COOKIE, SET_COOKIE};
use axum::response::{IntoResponse, Response};
use quill_session::{Session, SessionCodec};

mod config;
mod explorer;

pub use config::Config as ServerConfig;
pub use explorer::explorer;

/// Executes a GraphQL request with the session resolved from the inbound
/// `Cookie` header, then copies every cookie directive emitted during
/// execution onto the response, one `set-cookie` header per directive in
/// emission order.
pub async fn execute_session_request<Q, M, S>(
    schema: &async_graphql::Schema<Q, M, S>,
    codec: &SessionCodec,
    headers: &HeaderMap,
    req: GraphQLRequest,
) -> Response
where
    Q: async_graphql::ObjectType + Send + Sync + 'static,
    M: async_graphql::ObjectType + Send + Sync + 'static,
    S: async_graphql::SubscriptionType + Send + Sync + 'static,
{
    let identity = headers
        .get(COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|header| codec.decode(header));
    let session = Session::new(identity);
    let cookies = session.cookies().clone();
    let req = req.into_inner().data(session);
    let mut response = GraphQLResponse::from(schema.execute(req).await).into_response();
    for directive in cookies.drain().await {
        match HeaderValue::from_str(directive.as_ref()) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(err) => log::error!("dropping malformed cookie directive: {err}"),
        }
    }
    response
}
