#![deny(unsafe_code)]

pub mod config;
pub mod mux;
pub mod path;
pub mod validate;

mod strmap;

#[cfg(feature = "hyper-service")]
pub mod hyper_service;

pub use crate::config::{Config, ConfigError, ConfigValue, ServiceConfig};
pub use crate::mux::{Captures, Endpoint, Mux, MuxError, NodeId, NodeMut, NodeRef, OwnedCaptures};
pub use crate::validate::{Validate, ValidationError};

#[cfg(feature = "hyper-service")]
pub use crate::hyper_service::{
    Action, Envelope, Handler, JsonHandler, MuxService, Query, QueryHandler, Request, RequestError,
    Response, ServiceError,
};
