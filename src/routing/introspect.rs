//! Method table construction.
//!
//! # Responsibilities
//! - Collect a handler's declared method set once, at registration
//! - Filter it by [`Mode`]
//! - Index the survivors by lower-cased name
//!
//! # Design Decisions
//! - Immutable after construction (shared across requests without locks)
//! - Names colliding after lower-casing replace each other silently; which
//!   one wins is not part of the contract

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::routing::method::{Method, MethodSet, Routes};

/// Which methods of a handler are eligible routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Only methods taking nothing but the context.
    #[default]
    Strict,
    /// Any method taking the context first, followed by scalar parameters.
    Extended,
}

impl Mode {
    pub fn admits(&self, method: &Method) -> bool {
        match self {
            Mode::Strict => method.signature().is_context_only(),
            Mode::Extended => true,
        }
    }
}

/// Case-insensitive name → method lookup for one handler.
#[derive(Debug)]
pub struct HandlerTable {
    methods: HashMap<String, Method>,
    mode: Mode,
}

impl HandlerTable {
    /// Look up a method; `key` is matched case-insensitively.
    pub fn get(&self, key: &str) -> Option<&Method> {
        self.methods.get(&key.to_lowercase())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Lower-cased names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Build the method table of `handler` for the given mode.
pub fn introspect<H: Routes>(handler: Arc<H>, mode: Mode) -> HandlerTable {
    let mut set = MethodSet::new(handler);
    H::methods(&mut set);

    let mut methods = HashMap::new();
    for method in set.into_methods() {
        if !mode.admits(&method) {
            tracing::trace!(method = method.name(), ?mode, "Method skipped");
            continue;
        }
        let key = method.name().to_lowercase();
        if let Some(previous) = methods.insert(key, method) {
            tracing::debug!(method = previous.name(), "Method replaced by a name collision");
        }
    }

    tracing::info!(
        handler = std::any::type_name::<H>(),
        ?mode,
        methods = methods.len(),
        "Handler table built"
    );

    HandlerTable { methods, mode }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Context;

    struct T;

    impl T {
        async fn get(self: Arc<Self>, _ctx: Context) -> &'static str {
            "hello from T.Get"
        }

        async fn post(self: Arc<Self>, _ctx: Context) -> &'static str {
            "hello from T.Post"
        }

        async fn delete(self: Arc<Self>, _ctx: Context, _id: i64) -> &'static str {
            "hello from T.Delete"
        }

        async fn hello(self: Arc<Self>, _ctx: Context, name: String) -> String {
            format!("hello {}", name)
        }

        async fn add_int(self: Arc<Self>, _ctx: Context, nums: Vec<i64>) -> String {
            nums.iter().sum::<i64>().to_string()
        }
    }

    impl Routes for T {
        fn methods(set: &mut MethodSet<Self>) {
            set.method("Get", T::get)
                .method("Post", T::post)
                .method("Delete", T::delete)
                .method("Hello", T::hello)
                .variadic("AddInt", T::add_int);
        }
    }

    #[test]
    fn test_strict_keeps_context_only_methods() {
        let table = introspect(Arc::new(T), Mode::Strict);
        assert_eq!(table.len(), 2);
        assert_eq!(table.names(), ["get", "post"]);
        assert_eq!(table.mode(), Mode::Strict);
    }

    #[test]
    fn test_extended_keeps_everything() {
        let table = introspect(Arc::new(T), Mode::Extended);
        assert_eq!(table.len(), 5);
        assert_eq!(table.names(), ["addint", "delete", "get", "hello", "post"]);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = introspect(Arc::new(T), Mode::Extended);
        for key in ["get", "GET", "gEt", "Get"] {
            assert_eq!(table.get(key).map(Method::name), Some("Get"));
        }
        assert!(table.contains("ADDINT"));
        assert!(!table.contains("put"));
    }

    struct Twins;

    impl Twins {
        async fn lower(self: Arc<Self>, _ctx: Context) -> &'static str {
            "lower"
        }

        async fn upper(self: Arc<Self>, _ctx: Context) -> &'static str {
            "upper"
        }
    }

    impl Routes for Twins {
        fn methods(set: &mut MethodSet<Self>) {
            set.method("Ping", Twins::lower).method("PING", Twins::upper);
        }
    }

    #[test]
    fn test_colliding_names_keep_one_entry() {
        let table = introspect(Arc::new(Twins), Mode::Strict);
        assert_eq!(table.len(), 1);
        assert!(table.contains("ping"));
    }
}
