/// Builds a [`MuxService`](crate::MuxService) from a route list.
///
/// `JSON` entries answer with the JSON envelope, `QUERY` entries do the same
/// for a handler taking a typed query string request, `HTTP` entries own the
/// whole response and `@` grafts another service below a prefix.
///
/// ```
/// use treemux::{mux_service, OwnedCaptures, Request};
/// use std::convert::Infallible;
///
/// async fn hello(_: Request, params: OwnedCaptures) -> Result<String, Infallible> {
///     Ok(format!("hello, {}!", params.get("name").unwrap_or("world")))
/// }
///
/// let svc = mux_service! {
///     JSON "/hello/{name}" => hello,
///     @ "/v1" => mux_service! {
///         JSON "/hello/{name}" => hello
///     }
/// };
/// assert_eq!(svc.routes(), ["/hello/{name}", "/v1/hello/{name}"]);
/// ```
#[macro_export]
macro_rules! mux_service {
    {@entry $svc:expr, @, $prefix:expr, $sub:expr} => {
        $svc.handle_mux($prefix, $sub.to_mux())
    };
    {@entry $svc:expr, JSON, $pattern:expr, $data:expr} => {
        $svc.handle($pattern, $data)
    };
    {@entry $svc:expr, HTTP, $pattern:expr, $data:expr} => {
        $svc.handle_http($pattern, $data)
    };
    {@entry $svc:expr, QUERY, $pattern:expr, $data:expr} => {
        $svc.handle_query($pattern, $crate::Query::new($data))
    };

    {$($kind:tt $pattern:expr => $data:expr),+ $(,)?} => {{
        let __svc = $crate::MuxService::new();
        $($crate::mux_service!(@entry __svc, $kind, $pattern, $data);)+
        __svc
    }};
}
