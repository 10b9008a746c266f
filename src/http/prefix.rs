//! Serving a router under a URL path prefix.
//!
//! # Responsibilities
//! - Canonicalize the configured root to `/` or `/segment[/segment...]`
//! - Redirect the bare root to root + `/` (307)
//! - Strip the root from paths under root + `/` and hand them to the inner router
//! - Answer everything else with 404
//!
//! # Design Decisions
//! - Implemented as a tower service installed as the router fallback, so no route
//!   pattern is derived from user-supplied text
//! - Query strings survive the prefix strip; the redirect drops them
//! - The root is matched against the percent-decoded request path and stripped from
//!   the raw one, so encoded spellings of the same root are served alike

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::{uri::PathAndQuery, Request, StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    Router,
};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use tower::{Service, ServiceExt};

/// Bytes escaped when the root is written into a `Location` header.
const LOCATION: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Canonical form of a root: leading slash, no trailing slash, `/` for none.
pub fn normalize_root(root: &str) -> String {
    let root = root.replace(std::path::MAIN_SEPARATOR, "/");
    format!("/{}", root.trim_matches('/'))
}

/// Serve `handler` under `root` (already normalized). `/` returns it unchanged.
pub fn mount(root: &str, handler: Router) -> Router {
    if root == "/" {
        return handler;
    }
    Router::new().fallback_service(RootPrefix::new(root, handler))
}

/// Dispatches requests under a fixed root to an inner service.
#[derive(Debug, Clone)]
pub struct RootPrefix<S> {
    root: Arc<str>,
    location: Arc<str>,
    inner: S,
}

impl<S> RootPrefix<S> {
    pub fn new(root: &str, inner: S) -> Self {
        let location = format!("{}/", utf8_percent_encode(root, LOCATION));
        Self {
            root: Arc::from(root),
            location: Arc::from(location),
            inner,
        }
    }

    /// Raw remainder of `path` after the root, when `path` decodes to start with it.
    fn remainder<'a>(&self, path: &'a str) -> Option<&'a str> {
        let end = raw_prefix_len(path, self.root.len())?;
        let head = path.get(..end)?;
        if !percent_decode_str(head).eq(self.root.bytes()) {
            return None;
        }
        path.get(end..)
    }

    /// Request target with the root removed, when the path lies under root + `/`.
    fn strip(&self, uri: &Uri) -> Option<Result<Uri, axum::http::Error>> {
        let rest = self.remainder(uri.path())?;
        if !rest.starts_with('/') {
            return None;
        }

        let target = match uri.query() {
            Some(query) => format!("{rest}?{query}"),
            None => rest.to_string(),
        };
        Some(rebuild(uri, target))
    }
}

/// Length of the raw prefix of `path` that decodes to `decoded` bytes.
fn raw_prefix_len(path: &str, decoded: usize) -> Option<usize> {
    let bytes = path.as_bytes();
    let mut raw = 0;
    for _ in 0..decoded {
        let escaped = bytes.get(raw) == Some(&b'%')
            && bytes.get(raw + 1).is_some_and(u8::is_ascii_hexdigit)
            && bytes.get(raw + 2).is_some_and(u8::is_ascii_hexdigit);
        raw += if escaped { 3 } else { 1 };
        if raw > bytes.len() {
            return None;
        }
    }
    Some(raw)
}

fn rebuild(uri: &Uri, path_and_query: String) -> Result<Uri, axum::http::Error> {
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query)?);
    Ok(Uri::from_parts(parts)?)
}

type ResponseFuture = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

fn respond(response: Response) -> ResponseFuture {
    Box::pin(std::future::ready(Ok::<_, Infallible>(response)))
}

impl<S> Service<Request<Body>> for RootPrefix<S>
where
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = ResponseFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        if self.remainder(req.uri().path()) == Some("") {
            return respond(Redirect::temporary(&self.location).into_response());
        }

        match self.strip(req.uri()) {
            Some(Ok(uri)) => {
                *req.uri_mut() = uri;
                let inner = self.inner.clone();
                Box::pin(async move {
                    let response = inner.oneshot(req).await.unwrap_or_else(|never| match never {});
                    Ok::<_, Infallible>(response.into_response())
                })
            }
            Some(Err(err)) => {
                tracing::debug!(error = %err, path = %req.uri().path(), "Unable to strip root");
                respond(StatusCode::BAD_REQUEST.into_response())
            }
            None => respond(StatusCode::NOT_FOUND.into_response()),
        }
    }
}
