//! Preview server.
//!
//! Every page is rendered once at startup into an immutable map keyed by
//! normalized path; handlers only read it. `/solid/srp` and `/solid/srp/`
//! serve the same page.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use solidbook_core::routes::normalize_path;
use solidbook_docs::page::{STYLESHEET, STYLESHEET_PATH};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::ServerError;
use crate::observability::metrics::{record_http_request, set_routes_served};
use crate::site::Site;

/// Health check path.
pub const HEALTH_PATH: &str = "/healthz";

/// Shared, read-only state behind the router.
#[derive(Debug)]
pub struct ServerState {
    pages: HashMap<&'static str, String>,
    site: Site,
}

impl ServerState {
    /// Pre-renders every page of `site`.
    #[must_use]
    pub fn new(site: Site) -> Self {
        let pages: HashMap<_, _> = site
            .render_all()
            .into_iter()
            .map(|page| (page.route.normalized_path(), page.html))
            .collect();
        set_routes_served(pages.len());

        Self { pages, site }
    }

    /// Number of pages being served.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Builds the router serving `state`.
pub fn build_router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(handle_health))
        .route(STYLESHEET_PATH, get(handle_stylesheet))
        .fallback(get(handle_page))
        .with_state(state)
}

async fn handle_health() -> &'static str {
    record_http_request(HEALTH_PATH, 200);
    "ok"
}

async fn handle_stylesheet() -> impl IntoResponse {
    record_http_request(STYLESHEET_PATH, 200);
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

async fn handle_page(
    State(state): State<Arc<ServerState>>,
    uri: Uri,
) -> Response {
    let path = uri.path();

    if let Some(html) = state.pages.get(normalize_path(path)) {
        record_http_request(path, 200);
        debug!(path, "served page");
        return Html(html.clone()).into_response();
    }

    record_http_request(path, 404);
    debug!(path, "no page");
    (StatusCode::NOT_FOUND, Html(state.site.not_found(path))).into_response()
}

/// A bound preview server, ready to run.
#[derive(Debug)]
pub struct PreviewServer {
    listener: TcpListener,
    state: Arc<ServerState>,
    local_addr: SocketAddr,
}

impl PreviewServer {
    /// Renders the site and binds `bind`.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::InvalidAddress`] if `bind` is not a socket
    /// address, or [`ServerError::Bind`] if the listener cannot bind.
    pub async fn bind(site: Site, bind: &str) -> Result<Self, ServerError> {
        let addr: SocketAddr = bind.parse().map_err(|source| ServerError::InvalidAddress {
            addr: bind.to_string(),
            source,
        })?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: bind.to_string(),
                source,
            })?;

        let local_addr = listener.local_addr().map_err(|source| ServerError::Bind {
            addr: bind.to_string(),
            source,
        })?;

        Ok(Self {
            listener,
            state: Arc::new(ServerState::new(site)),
            local_addr,
        })
    }

    /// Address actually bound (useful when binding to port 0).
    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serves until `cancel` fires.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Serve`] if the server loop fails.
    pub async fn run(self, cancel: CancellationToken) -> Result<(), ServerError> {
        let addr = self.local_addr;
        info!(%addr, pages = self.state.page_count(), "preview server listening");

        axum::serve(self.listener, build_router(self.state))
            .with_graceful_shutdown(async move {
                cancel.cancelled().await;
            })
            .await
            .map_err(ServerError::Serve)?;

        info!("preview server shut down");
        Ok(())
    }
}
