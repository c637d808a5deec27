//! Request dispatch.
//!
//! # Responsibilities
//! - Derive a method key and arguments from the captured path
//! - Look the method up and check the argument count
//! - Convert arguments to the declared kinds and invoke the method
//! - Answer every failure with a 404 and stop
//!
//! # Design Decisions
//! - Stateless per request: only reads the shared [`HandlerTable`]
//! - Nothing is invoked until every argument converted
//! - Surplus segments after the fixed parameters of a non-variadic method
//!   are ignored

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use axum::routing::{any, MethodRouter};
use axum::RequestExt;
use futures_util::future::BoxFuture;

use crate::http::Context;
use crate::observability::metrics;
use crate::routing::error::DispatchError;
use crate::routing::introspect::{introspect, HandlerTable, Mode};
use crate::routing::kind::{convert, Value};
use crate::routing::method::{Method, Routes};
use crate::routing::path::PathStyle;

/// Name of the wildcard parameter the dispatcher reads its path from.
pub const WILDCARD_PARAM: &str = "path";

/// A method resolved for one request, with its converted arguments.
#[derive(Debug)]
pub struct Resolved<'a> {
    pub method: &'a Method,
    pub method_key: String,
    pub args: Vec<Value>,
}

/// Routes requests to the methods of one handler.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    table: Arc<HandlerTable>,
    style: PathStyle,
}

impl Dispatcher {
    pub fn new(table: HandlerTable, style: PathStyle) -> Self {
        Self {
            table: Arc::new(table),
            style,
        }
    }

    pub fn table(&self) -> &HandlerTable {
        &self.table
    }

    pub fn style(&self) -> PathStyle {
        self.style
    }

    /// Resolve a method and convert its arguments without invoking it.
    pub fn resolve(&self, verb: &str, captured: &str) -> Result<Resolved<'_>, DispatchError> {
        let parsed = self.style.parse(verb, captured);

        let method = self
            .table
            .get(&parsed.method_key)
            .ok_or_else(|| DispatchError::MethodNotFound(parsed.method_key.clone()))?;
        let signature = method.signature();

        if parsed.args.len() < signature.required() {
            return Err(DispatchError::ArgumentCount {
                method: method.name().to_string(),
                required: signature.required(),
                given: parsed.args.len(),
            });
        }

        let mut tokens = parsed.args.iter();
        let mut args = Vec::with_capacity(parsed.args.len());
        for (index, (kind, token)) in signature.params().iter().zip(&mut tokens).enumerate() {
            let value = convert(token, *kind).map_err(|source| DispatchError::Conversion {
                method: method.name().to_string(),
                index,
                source,
            })?;
            args.push(value);
        }

        if let Some(kind) = signature.variadic_kind() {
            let offset = signature.required();
            for (index, token) in tokens.enumerate() {
                let value = convert(token, kind).map_err(|source| DispatchError::Conversion {
                    method: method.name().to_string(),
                    index: offset + index,
                    source,
                })?;
                args.push(value);
            }
        }

        Ok(Resolved {
            method,
            method_key: parsed.method_key,
            args,
        })
    }

    /// Dispatch one request whose wildcard capture is `captured`.
    pub async fn dispatch_path(&self, request: Request<Body>, captured: String) -> Response {
        let verb = request.method().as_str().to_string();

        let resolved = match self.resolve(&verb, &captured) {
            Ok(resolved) => resolved,
            Err(e) => return abort(&verb, &captured, e),
        };

        let method_name = resolved.method.name().to_string();
        let ctx = Context::new(request, captured, resolved.method_key.clone());
        let fut = match bind(resolved, ctx) {
            Ok(fut) => fut,
            Err(e) => return abort(&verb, &method_name, e),
        };

        tracing::debug!(method = %method_name, "Dispatching");
        metrics::record_dispatch("invoked");
        fut.await
    }

    /// Dispatch one request, reading the capture from the `path` wildcard.
    pub async fn dispatch(&self, mut request: Request<Body>) -> Response {
        let captured = match request.extract_parts::<Path<HashMap<String, String>>>().await {
            Ok(Path(mut params)) => params.remove(WILDCARD_PARAM).unwrap_or_default(),
            // Mount roots carry no capture.
            Err(PathRejection::MissingPathParams(_)) => String::new(),
            Err(rejection) => {
                let verb = request.method().as_str().to_string();
                let raw = request.uri().path().to_string();
                return abort(
                    &verb,
                    &raw,
                    DispatchError::UndecodablePath(rejection.body_text()),
                );
            }
        };
        self.dispatch_path(request, captured).await
    }

    /// Wrap the dispatcher as an axum route accepting every verb.
    pub fn into_method_router<S>(self) -> MethodRouter<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        any(move |request: Request<Body>| {
            let dispatcher = self.clone();
            async move { dispatcher.dispatch(request).await }
        })
    }
}

/// Hand the converted values to the method.
fn bind(
    resolved: Resolved<'_>,
    ctx: Context,
) -> Result<BoxFuture<'static, Response>, DispatchError> {
    let method = resolved.method;
    method
        .invoke(ctx, resolved.args)
        .map_err(|source| DispatchError::Binding {
            method: method.name().to_string(),
            source,
        })
}

fn abort(verb: &str, path: &str, e: DispatchError) -> Response {
    tracing::debug!(
        method = %verb,
        path = %path,
        error = %e,
        "Dispatch aborted"
    );
    metrics::record_dispatch(e.outcome());
    e.into_response()
}

/// Registration-time builder for a dispatcher.
pub struct AutoRoute<H> {
    handler: Arc<H>,
    mode: Mode,
    style: PathStyle,
}

impl<H: Routes> AutoRoute<H> {
    pub fn new(handler: H) -> Self {
        Self::from_arc(Arc::new(handler))
    }

    pub fn from_arc(handler: Arc<H>) -> Self {
        Self {
            handler,
            mode: Mode::default(),
            style: PathStyle::default(),
        }
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn style(mut self, style: PathStyle) -> Self {
        self.style = style;
        self
    }

    pub fn build(self) -> Dispatcher {
        Dispatcher::new(introspect(self.handler, self.mode), self.style)
    }

    pub fn into_method_router<S>(self) -> MethodRouter<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        self.build().into_method_router()
    }
}

/// Context-only methods, named by the first path segment.
pub fn auto_route<H: Routes, S: Clone + Send + Sync + 'static>(handler: H) -> MethodRouter<S> {
    AutoRoute::new(handler).into_method_router()
}

/// Methods with typed parameters, named by the first path segment.
pub fn auto_route_any<H: Routes, S: Clone + Send + Sync + 'static>(
    handler: H,
) -> MethodRouter<S> {
    AutoRoute::new(handler)
        .mode(Mode::Extended)
        .into_method_router()
}

/// Context-only methods, named by the HTTP verb.
pub fn rest<H: Routes, S: Clone + Send + Sync + 'static>(handler: H) -> MethodRouter<S> {
    AutoRoute::new(handler)
        .style(PathStyle::Rest)
        .into_method_router()
}

/// Methods with typed parameters, named by the HTTP verb.
pub fn rest_any<H: Routes, S: Clone + Send + Sync + 'static>(handler: H) -> MethodRouter<S> {
    AutoRoute::new(handler)
        .mode(Mode::Extended)
        .style(PathStyle::Rest)
        .into_method_router()
}
