use super::{BoxError, BoxFuture, Future, Request, Response, StdError};
use crate::mux::OwnedCaptures;
use crate::validate::{Validate, ValidationError};

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A handler in full control of the HTTP response.
pub trait Handler {
    fn call(&self, req: Request, params: OwnedCaptures) -> BoxFuture<'static, Result<Response, BoxError>>;
}

impl<F, E, Fut> Handler for F
where
    F: Fn(Request, OwnedCaptures) -> Fut,
    E: StdError + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, E>> + Send + 'static,
{
    fn call(&self, req: Request, params: OwnedCaptures) -> BoxFuture<'static, Result<Response, BoxError>> {
        let fut = (self)(req, params);
        Box::pin(async move {
            match fut.await {
                Ok(r) => Ok(r),
                Err(e) => Err(Box::new(e) as BoxError),
            }
        })
    }
}

/// A handler whose result is serialized into the JSON envelope.
pub trait JsonHandler {
    fn call(&self, req: Request, params: OwnedCaptures) -> BoxFuture<'static, Result<Value, BoxError>>;
}

impl<F, E, Fut, R> JsonHandler for F
where
    F: Fn(Request, OwnedCaptures) -> Fut,
    E: StdError + Send + Sync + 'static,
    R: Serialize,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
{
    fn call(&self, req: Request, params: OwnedCaptures) -> BoxFuture<'static, Result<Value, BoxError>> {
        let fut = (self)(req, params);
        Box::pin(async move {
            match fut.await {
                Ok(r) => serde_json::to_value(r).map_err(|e| Box::new(e) as BoxError),
                Err(e) => Err(Box::new(e) as BoxError),
            }
        })
    }
}

/// Why a typed request could not be built from the query string.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("{0}")]
    Query(#[from] serde_urlencoded::de::Error),

    #[error("{0}")]
    Validation(#[from] ValidationError),
}

/// A handler taking a typed request decoded from the URL query string.
pub trait QueryHandler {
    /// Decodes and validates the request. The returned future runs the
    /// handler itself.
    fn call(
        &self,
        req: &Request,
        params: OwnedCaptures,
    ) -> Result<BoxFuture<'static, Result<Value, BoxError>>, RequestError>;
}

/// Adapts `async fn(Q, OwnedCaptures) -> Result<R, E>` into a
/// [`QueryHandler`], where `Q` is deserialized from the query string and
/// validated before the function runs.
///
/// ```
/// use treemux::{MuxService, OwnedCaptures, Query, Validate, ValidationError};
/// use serde::Deserialize;
/// use std::convert::Infallible;
///
/// #[derive(Deserialize)]
/// struct Page {
///     limit: u32,
/// }
///
/// impl Validate for Page {
///     fn validate(&self) -> Result<(), ValidationError> {
///         if self.limit == 0 {
///             return Err(ValidationError::new("limit must be positive"));
///         }
///         Ok(())
///     }
/// }
///
/// async fn list(page: Page, _: OwnedCaptures) -> Result<Vec<u32>, Infallible> {
///     Ok((0..page.limit).collect())
/// }
///
/// let svc = MuxService::new();
/// svc.handle_query("/items", Query::new(list));
/// ```
pub struct Query<Q, F> {
    f: F,
    _req: PhantomData<fn() -> Q>,
}

impl<Q, F> Query<Q, F> {
    pub fn new<Fut>(f: F) -> Self
    where
        F: Fn(Q, OwnedCaptures) -> Fut,
    {
        Self {
            f,
            _req: PhantomData,
        }
    }
}

impl<Q, F, E, Fut, R> QueryHandler for Query<Q, F>
where
    Q: DeserializeOwned + Validate,
    F: Fn(Q, OwnedCaptures) -> Fut,
    E: StdError + Send + Sync + 'static,
    R: Serialize,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
{
    fn call(
        &self,
        req: &Request,
        params: OwnedCaptures,
    ) -> Result<BoxFuture<'static, Result<Value, BoxError>>, RequestError> {
        let request: Q = serde_urlencoded::from_str(req.uri().query().unwrap_or(""))?;
        request.validate()?;

        let fut = (self.f)(request, params);
        Ok(Box::pin(async move {
            match fut.await {
                Ok(r) => serde_json::to_value(r).map_err(|e| Box::new(e) as BoxError),
                Err(e) => Err(Box::new(e) as BoxError),
            }
        }))
    }
}
