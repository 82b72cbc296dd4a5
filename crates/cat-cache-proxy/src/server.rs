//! HTTP server and request routing
//!
//! Every request goes through one handler: the path is validated first,
//! then the method picks the GET, PUT or DELETE flow.

use crate::config::ProxyConfig;
use crate::error::{RequestError, Result, TEXT_PLAIN};
use crate::resolver::{resolve, ResolvedPath};
use crate::upstream::Upstream;
use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use code_file_cache::{CacheError, FileCache};
use http_cat_client::HttpCatClient;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

pub const IMAGE_JPEG: &str = "image/jpeg";

/// Reports whether a GET was served from the cache
pub const X_CACHE: &str = "x-cache";

/// Shared state for the HTTP server
pub struct ServerState {
    pub cache: FileCache,
    pub upstream: Arc<dyn Upstream>,
    pub max_body_bytes: usize,
}

impl ServerState {
    pub fn new(cache: FileCache, upstream: Arc<dyn Upstream>, max_body_bytes: usize) -> Self {
        Self {
            cache,
            upstream,
            max_body_bytes,
        }
    }

    /// Build the state for a real deployment: the file cache in
    /// `cache_dir` in front of the configured image service
    pub fn from_config(config: &ProxyConfig) -> Result<Self> {
        let client =
            HttpCatClient::with_timeout(config.upstream_url.clone(), config.upstream_timeout)?;

        Ok(Self::new(
            FileCache::new(&config.cache_dir),
            Arc::new(client),
            config.max_body_bytes,
        ))
    }
}

pub type SharedState = Arc<ServerState>;

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .fallback(handle_request)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: SharedState, host: &str, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router).await
}

async fn handle_request(State(state): State<SharedState>, request: Request) -> Response {
    // A query string is part of the target and makes it invalid
    let target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| request.uri().path());

    let resolved = match resolve(target, &state.cache) {
        Ok(resolved) => resolved,
        Err(e) => {
            debug!(target = %target, "Rejected request target");
            return e.into_response();
        }
    };

    let method = request.method().clone();
    let result = match method {
        Method::GET => get_image(&state, &resolved).await,
        Method::PUT => put_image(&state, &resolved, request.into_body()).await,
        Method::DELETE => delete_image(&state, &resolved).await,
        _ => Err(RequestError::MethodNotAllowed),
    };

    result.unwrap_or_else(IntoResponse::into_response)
}

/// Serve from the cache, falling back to the upstream on a miss
async fn get_image(
    state: &ServerState,
    resolved: &ResolvedPath,
) -> std::result::Result<Response, RequestError> {
    let key = &resolved.key;

    match state.cache.read(&resolved.file_path).await {
        Ok(data) => {
            info!(key = %key, "Cache hit");
            Ok(image_response(data, "HIT"))
        }
        Err(CacheError::NotFound) => {
            info!(key = %key, "Cache miss, fetching from upstream");

            let data = state.upstream.fetch(key).await.map_err(|e| {
                warn!(key = %key, error = %e, "Upstream fetch failed");
                RequestError::UpstreamMiss
            })?;

            // The response does not depend on the write succeeding
            match state.cache.write(&resolved.file_path, &data).await {
                Ok(()) => info!(key = %key, size = data.len(), "Cached upstream image"),
                Err(e) => warn!(key = %key, error = %e, "Failed to cache upstream image"),
            }

            Ok(image_response(data, "MISS"))
        }
        Err(e) => Err(RequestError::Storage(e)),
    }
}

/// Store the request body as the entry for the key
async fn put_image(
    state: &ServerState,
    resolved: &ResolvedPath,
    body: Body,
) -> std::result::Result<Response, RequestError> {
    let data = axum::body::to_bytes(body, state.max_body_bytes)
        .await
        .map_err(|e| RequestError::Body(e.to_string()))?;

    state
        .cache
        .write(&resolved.file_path, &data)
        .await
        .map_err(RequestError::Storage)?;

    info!(key = %resolved.key, size = data.len(), "Stored image");
    Ok(text_response(StatusCode::CREATED, "201 Created"))
}

async fn delete_image(
    state: &ServerState,
    resolved: &ResolvedPath,
) -> std::result::Result<Response, RequestError> {
    match state.cache.delete(&resolved.file_path).await {
        Ok(()) => {
            info!(key = %resolved.key, "Deleted image");
            Ok(text_response(StatusCode::OK, "200 OK"))
        }
        Err(CacheError::NotFound) => Err(RequestError::NotFound),
        Err(e) => Err(RequestError::Storage(e)),
    }
}

fn image_response(data: Bytes, cache_status: &'static str) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, IMAGE_JPEG),
            (HeaderName::from_static(X_CACHE), cache_status),
        ],
        data,
    )
        .into_response()
}

fn text_response(status: StatusCode, body: &'static str) -> Response {
    (status, [(header::CONTENT_TYPE, TEXT_PLAIN)], body).into_response()
}
