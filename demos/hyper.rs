use treemux::{mux_service, Config, OwnedCaptures, Request, Response, ServiceConfig};

use std::convert::Infallible as Never;

use hyper::Body;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

async fn hello(_: Request, params: OwnedCaptures) -> Result<Value, Never> {
    let name = params.get("name").unwrap_or("world");
    Ok(json!({ "greeting": format!("hello, {}!", name) }))
}

async fn item(_: Request, params: OwnedCaptures) -> Result<OwnedCaptures, Never> {
    Ok(params)
}

async fn file(req: Request, params: OwnedCaptures) -> Result<Response, Never> {
    let name = params.get("name").unwrap_or_default();
    let body = format!("{} file {}", req.method(), name);
    Ok(Response::new(Body::from(body)))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut config = Config::new();
    if let Some(file) = std::env::args().nth(1) {
        config.load_file(file)?;
    }
    let service_config = ServiceConfig::from_config(&config)?;

    let service = mux_service! {
        JSON "/hello/{name}" => hello,
        @ "/api/v1" => mux_service! {
            JSON "/items/{id}" => item,
            HTTP "/files/{name}" => file
        }
    };

    println!("Server is listening on: http://{}", service_config.addr);
    for route in service.routes() {
        println!("  {}", route);
    }
    println!();

    service.run(&service_config).await?;
    Ok(())
}
