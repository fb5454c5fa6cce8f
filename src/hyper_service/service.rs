use super::envelope::Envelope;
use super::handler::{Handler, JsonHandler, QueryHandler};
use super::{BoxError, BoxFuture, Request, Response};
use crate::config::ServiceConfig;
use crate::mux::{Mux, MuxError, NodeRef};

use std::convert::Infallible;
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::task::{Context, Poll};

use hyper::service::{make_service_fn, Service};
use hyper::{Server, StatusCode};
use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, info, warn};

/// What a route of a [`MuxService`] resolves to.
#[derive(Clone)]
pub enum Action {
    Http(Arc<dyn Handler + Send + Sync>),
    Json(Arc<dyn JsonHandler + Send + Sync>),
    Query(Arc<dyn QueryHandler + Send + Sync>),
}

impl Action {
    pub fn http(h: impl Handler + Send + Sync + 'static) -> Self {
        Self::Http(Arc::new(h))
    }

    pub fn json(h: impl JsonHandler + Send + Sync + 'static) -> Self {
        Self::Json(Arc::new(h))
    }

    pub fn query(h: impl QueryHandler + Send + Sync + 'static) -> Self {
        Self::Query(Arc::new(h))
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(_) => f.write_str("Action::Http"),
            Self::Json(_) => f.write_str("Action::Json"),
            Self::Query(_) => f.write_str("Action::Query"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("invalid listen address {addr:?}: {source}")]
    Addr {
        addr: String,
        source: std::net::AddrParseError,
    },

    #[error("HTTP server failed: {0}")]
    Hyper(#[from] hyper::Error),
}

/// A hyper service dispatching requests through a shared [`Mux`].
///
/// Clones share one route table, so routes may still be registered after
/// the service started serving.
#[derive(Debug, Clone, Default)]
pub struct MuxService {
    mux: Arc<RwLock<Mux<Action>>>,
}

impl Service<Request> for MuxService {
    type Response = Response;
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<Response, BoxError>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let path = req.uri().path().to_owned();
        debug!(method = %req.method(), %path, "mux service request");

        let found = {
            let mux = self.mux.read();
            let found = mux
                .find(&path)
                .map(|(action, caps)| (action.clone(), caps.to_owned_captures()));
            found
        };

        match found {
            None => {
                warn!(%path, "no route matched");
                let res = Envelope::error(format!("unknown route {}", path))
                    .into_response(StatusCode::NOT_FOUND);
                Box::pin(async move { Ok::<_, BoxError>(res) })
            }
            Some((Action::Http(h), params)) => Handler::call(&*h, req, params),
            Some((Action::Json(h), params)) => {
                respond_json(path, JsonHandler::call(&*h, req, params))
            }
            Some((Action::Query(h), params)) => match QueryHandler::call(&*h, &req, params) {
                Ok(fut) => respond_json(path, fut),
                Err(e) => {
                    warn!(%path, error = %e, "invalid request");
                    let res = Envelope::error(format!("invalid request: {}", e))
                        .into_response(StatusCode::BAD_REQUEST);
                    Box::pin(async move { Ok::<_, BoxError>(res) })
                }
            },
        }
    }
}

fn respond_json(
    path: String,
    fut: BoxFuture<'static, Result<Value, BoxError>>,
) -> BoxFuture<'static, Result<Response, BoxError>> {
    Box::pin(async move {
        let res = match fut.await {
            Ok(data) => Envelope::success(data).into_response(StatusCode::OK),
            Err(e) => {
                warn!(%path, error = %e, "handler failed");
                Envelope::error(format!("handler failed: {}", e))
                    .into_response(StatusCode::INTERNAL_SERVER_ERROR)
            }
        };
        Ok::<_, BoxError>(res)
    })
}

impl MuxService {
    pub fn new() -> Self {
        Self::from_mux(Mux::new())
    }

    pub fn from_mux(mux: Mux<Action>) -> Self {
        Self {
            mux: Arc::new(RwLock::new(mux)),
        }
    }

    /// Snapshot of the current route table.
    pub fn to_mux(&self) -> Mux<Action> {
        self.mux.read().clone()
    }

    pub fn try_insert(&self, template: &str, action: Action) -> Result<&Self, MuxError> {
        self.mux.write().try_add(template, action)?;
        Ok(self)
    }

    /// Routes `template` to a handler answering with the JSON envelope.
    ///
    /// # Panics
    /// Panics on any route table conflict, see [`MuxError`].
    pub fn handle(&self, template: &str, h: impl JsonHandler + Send + Sync + 'static) -> &Self {
        self.insert_or_panic(template, Action::json(h))
    }

    pub fn try_handle(
        &self,
        template: &str,
        h: impl JsonHandler + Send + Sync + 'static,
    ) -> Result<&Self, MuxError> {
        self.try_insert(template, Action::json(h))
    }

    /// Routes `template` to a handler taking a typed request decoded from the
    /// query string, see [`Query`](super::Query). Undecodable or invalid
    /// requests are answered with status 400 and the error envelope.
    ///
    /// # Panics
    /// Panics on any route table conflict, see [`MuxError`].
    pub fn handle_query(&self, template: &str, h: impl QueryHandler + Send + Sync + 'static) -> &Self {
        self.insert_or_panic(template, Action::query(h))
    }

    pub fn try_handle_query(
        &self,
        template: &str,
        h: impl QueryHandler + Send + Sync + 'static,
    ) -> Result<&Self, MuxError> {
        self.try_insert(template, Action::query(h))
    }

    /// Routes `template` to a handler producing the raw HTTP response.
    ///
    /// # Panics
    /// Panics on any route table conflict, see [`MuxError`].
    pub fn handle_http(&self, template: &str, h: impl Handler + Send + Sync + 'static) -> &Self {
        self.insert_or_panic(template, Action::http(h))
    }

    pub fn try_handle_http(
        &self,
        template: &str,
        h: impl Handler + Send + Sync + 'static,
    ) -> Result<&Self, MuxError> {
        self.try_insert(template, Action::http(h))
    }

    /// Grafts a prepared route table below `prefix`.
    ///
    /// # Panics
    /// Panics on any route table conflict, see [`MuxError`].
    pub fn handle_mux(&self, prefix: &str, mux: Mux<Action>) -> &Self {
        if let Err(e) = self.try_handle_mux(prefix, mux) {
            panic!("{}: prefix = {:?}", e, prefix);
        }
        self
    }

    pub fn try_handle_mux(&self, prefix: &str, mux: Mux<Action>) -> Result<&Self, MuxError> {
        self.mux.write().try_graft(prefix, mux)?;
        Ok(self)
    }

    pub fn nest(&self, prefix: &str, f: impl FnOnce(&MuxService)) -> &Self {
        let sub = Self::new();
        f(&sub);
        self.handle_mux(prefix, sub.to_mux())
    }

    /// Templates of every route that has an action, sorted.
    pub fn routes(&self) -> Vec<String> {
        fn walk(node: NodeRef<'_, Action>, out: &mut Vec<String>) {
            if node.value().is_some() {
                out.push(node.to_string());
            }
            for child in node.children() {
                walk(child, out);
            }
        }

        let mux = self.mux.read();
        let mut out = Vec::new();
        walk(mux.root(), &mut out);
        out.sort();
        out
    }

    /// Serves HTTP on the configured address until the server fails.
    pub async fn run(self, config: &ServiceConfig) -> Result<(), ServiceError> {
        let addr: SocketAddr = config.addr.parse().map_err(|source| ServiceError::Addr {
            addr: config.addr.clone(),
            source,
        })?;

        for route in self.routes() {
            debug!(%route, "mux service route");
        }

        let make = make_service_fn(move |_| {
            let svc = self.clone();
            async move { Ok::<_, Infallible>(svc) }
        });

        let server = Server::try_bind(&addr)?.serve(make);
        info!(%addr, "mux service listening");
        server.await?;
        Ok(())
    }

    fn insert_or_panic(&self, template: &str, action: Action) -> &Self {
        if let Err(e) = self.try_insert(template, action) {
            panic!("{}: template = {:?}", e, template);
        }
        self
    }
}
