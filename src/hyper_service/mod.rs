#![forbid(unsafe_code)]

mod envelope;
mod handler;
mod service;
mod service_macro;

pub use self::envelope::{Envelope, Header};
pub use self::handler::{Handler, JsonHandler, Query, QueryHandler, RequestError};
pub use self::service::{Action, MuxService, ServiceError};

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;

pub type Request = hyper::Request<hyper::Body>;
pub type Response = hyper::Response<hyper::Body>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
pub type BoxError = Box<dyn StdError + Send + Sync>;
