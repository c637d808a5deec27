//! Routable methods and their signatures.
//!
//! # Responsibilities
//! - Describe a method's parameters as a [`Signature`]
//! - Wrap typed async methods into type-erased [`Method`] invokers
//! - Collect a handler's method set through [`Routes`] and [`MethodSet`]
//!
//! # Design Decisions
//! - A method qualifies only if it takes `(Arc<H>, Context, ..)`; the
//!   compiler enforces the context-first shape through the trait bounds
//! - Each invoker binds its converted values back to concrete types itself
//! - Variadic methods take a trailing `Vec<V>` and register separately

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;

use crate::http::Context;
use crate::routing::error::ConvertError;
use crate::routing::kind::{Kind, Param, Value};

/// Parameter list of a method, excluding the receiver and the context.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    params: Vec<Kind>,
    variadic: Option<Kind>,
}

impl Signature {
    pub fn fixed(params: Vec<Kind>) -> Self {
        Self {
            params,
            variadic: None,
        }
    }

    pub fn variadic(params: Vec<Kind>, element: Kind) -> Self {
        Self {
            params,
            variadic: Some(element),
        }
    }

    /// Kinds of the fixed parameters, in order.
    pub fn params(&self) -> &[Kind] {
        &self.params
    }

    /// Element kind of the trailing variadic parameter, if any.
    pub fn variadic_kind(&self) -> Option<Kind> {
        self.variadic
    }

    /// Number of path segments needed before the variadic tail.
    pub fn required(&self) -> usize {
        self.params.len()
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic.is_some()
    }

    /// True when the method takes nothing but the context.
    pub fn is_context_only(&self) -> bool {
        self.params.is_empty() && self.variadic.is_none()
    }
}

type Invoker =
    dyn Fn(Context, Vec<Value>) -> Result<BoxFuture<'static, Response>, ConvertError> + Send + Sync;

/// A method bound to its handler instance.
#[derive(Clone)]
pub struct Method {
    name: String,
    signature: Signature,
    invoke: Arc<Invoker>,
}

impl Method {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Call the method with already converted arguments.
    ///
    /// Fails without calling anything when the values do not line up with
    /// the signature.
    pub fn invoke(
        &self,
        ctx: Context,
        args: Vec<Value>,
    ) -> Result<BoxFuture<'static, Response>, ConvertError> {
        (self.invoke)(ctx, args)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish()
    }
}

/// An async method taking the context and a fixed list of parameters.
pub trait MethodFn<H, Args>: Clone + Send + Sync + 'static {
    fn signature() -> Signature;

    fn call(
        &self,
        target: Arc<H>,
        ctx: Context,
        args: Vec<Value>,
    ) -> Result<BoxFuture<'static, Response>, ConvertError>;
}

/// An async method whose last parameter is a `Vec<V>` collecting every
/// remaining path segment.
pub trait VariadicMethodFn<H, Args>: Clone + Send + Sync + 'static {
    fn signature() -> Signature;

    fn call(
        &self,
        target: Arc<H>,
        ctx: Context,
        args: Vec<Value>,
    ) -> Result<BoxFuture<'static, Response>, ConvertError>;
}

fn take<T: Param>(args: &mut impl Iterator<Item = Value>) -> Result<T, ConvertError> {
    let value = args.next().ok_or(ConvertError::MissingValue(T::KIND))?;
    T::from_value(value)
}

macro_rules! impl_method_fn {
    ($($ty:ident),*) => {
        #[allow(non_snake_case, unused_mut, unused_variables)]
        impl<F, Fut, Res, H, $($ty,)*> MethodFn<H, ($($ty,)*)> for F
        where
            F: Fn(Arc<H>, Context, $($ty,)*) -> Fut + Clone + Send + Sync + 'static,
            Fut: Future<Output = Res> + Send + 'static,
            Res: IntoResponse,
            H: Send + Sync + 'static,
            $($ty: Param,)*
        {
            fn signature() -> Signature {
                Signature::fixed(vec![$(<$ty as Param>::KIND,)*])
            }

            fn call(
                &self,
                target: Arc<H>,
                ctx: Context,
                args: Vec<Value>,
            ) -> Result<BoxFuture<'static, Response>, ConvertError> {
                let mut args = args.into_iter();
                $(let $ty = take::<$ty>(&mut args)?;)*
                let fut = (self)(target, ctx, $($ty,)*);
                Ok(Box::pin(async move { fut.await.into_response() }))
            }
        }
    };
}

macro_rules! impl_variadic_method_fn {
    ($($ty:ident),*) => {
        #[allow(non_snake_case, unused_mut)]
        impl<F, Fut, Res, H, $($ty,)* V> VariadicMethodFn<H, ($($ty,)* V,)> for F
        where
            F: Fn(Arc<H>, Context, $($ty,)* Vec<V>) -> Fut + Clone + Send + Sync + 'static,
            Fut: Future<Output = Res> + Send + 'static,
            Res: IntoResponse,
            H: Send + Sync + 'static,
            $($ty: Param,)*
            V: Param,
        {
            fn signature() -> Signature {
                Signature::variadic(vec![$(<$ty as Param>::KIND,)*], V::KIND)
            }

            fn call(
                &self,
                target: Arc<H>,
                ctx: Context,
                args: Vec<Value>,
            ) -> Result<BoxFuture<'static, Response>, ConvertError> {
                let mut args = args.into_iter();
                $(let $ty = take::<$ty>(&mut args)?;)*
                let rest = args.map(V::from_value).collect::<Result<Vec<V>, _>>()?;
                let fut = (self)(target, ctx, $($ty,)* rest);
                Ok(Box::pin(async move { fut.await.into_response() }))
            }
        }
    };
}

impl_method_fn!();
impl_method_fn!(A1);
impl_method_fn!(A1, A2);
impl_method_fn!(A1, A2, A3);
impl_method_fn!(A1, A2, A3, A4);
impl_method_fn!(A1, A2, A3, A4, A5);
impl_method_fn!(A1, A2, A3, A4, A5, A6);

impl_variadic_method_fn!();
impl_variadic_method_fn!(A1);
impl_variadic_method_fn!(A1, A2);
impl_variadic_method_fn!(A1, A2, A3);
impl_variadic_method_fn!(A1, A2, A3, A4);
impl_variadic_method_fn!(A1, A2, A3, A4, A5);

/// A handler object whose methods are routable.
///
/// ```ignore
/// impl Routes for Article {
///     fn methods(set: &mut MethodSet<Self>) {
///         set.method("Get", Article::get)
///             .method("Delete", Article::delete)
///             .variadic("AddInt", Article::add_int);
///     }
/// }
/// ```
pub trait Routes: Send + Sync + Sized + 'static {
    /// Declare the handler's method set.
    fn methods(set: &mut MethodSet<Self>);
}

/// Builder collecting the methods of one handler instance.
pub struct MethodSet<H> {
    target: Arc<H>,
    methods: Vec<Method>,
}

impl<H: Send + Sync + 'static> MethodSet<H> {
    pub(crate) fn new(target: Arc<H>) -> Self {
        Self {
            target,
            methods: Vec::new(),
        }
    }

    /// Register a method with a fixed parameter list.
    pub fn method<F, Args>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: MethodFn<H, Args>,
        Args: 'static,
    {
        let target = self.target.clone();
        let signature = <F as MethodFn<H, Args>>::signature();
        self.push(name.into(), signature, move |ctx, args| {
            <F as MethodFn<H, Args>>::call(&f, target.clone(), ctx, args)
        })
    }

    /// Register a method with a trailing variadic parameter.
    pub fn variadic<F, Args>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: VariadicMethodFn<H, Args>,
        Args: 'static,
    {
        let target = self.target.clone();
        let signature = <F as VariadicMethodFn<H, Args>>::signature();
        self.push(name.into(), signature, move |ctx, args| {
            <F as VariadicMethodFn<H, Args>>::call(&f, target.clone(), ctx, args)
        })
    }

    fn push<I>(&mut self, name: String, signature: Signature, invoke: I) -> &mut Self
    where
        I: Fn(Context, Vec<Value>) -> Result<BoxFuture<'static, Response>, ConvertError>
            + Send
            + Sync
            + 'static,
    {
        self.methods.push(Method {
            name,
            signature,
            invoke: Arc::new(invoke),
        });
        self
    }

    pub(crate) fn into_methods(self) -> Vec<Method> {
        self.methods
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe;

    impl Probe {
        async fn bare(self: Arc<Self>, _ctx: Context) -> &'static str {
            "bare"
        }

        async fn pair(self: Arc<Self>, _ctx: Context, a: u8, b: String) -> String {
            format!("{}{}", a, b)
        }

        async fn tail(self: Arc<Self>, _ctx: Context, scale: f64, xs: Vec<i32>) -> String {
            format!("{}", xs.iter().map(|x| *x as f64 * scale).sum::<f64>())
        }
    }

    impl Routes for Probe {
        fn methods(set: &mut MethodSet<Self>) {
            set.method("Bare", Probe::bare)
                .method("Pair", Probe::pair)
                .variadic("Tail", Probe::tail);
        }
    }

    fn collect() -> Vec<Method> {
        let mut set = MethodSet::new(Arc::new(Probe));
        Probe::methods(&mut set);
        set.into_methods()
    }

    #[test]
    fn test_signatures() {
        let methods = collect();
        assert_eq!(methods.len(), 3);

        assert_eq!(methods[0].name(), "Bare");
        assert!(methods[0].signature().is_context_only());

        assert_eq!(methods[1].signature().params(), [Kind::U8, Kind::String]);
        assert!(!methods[1].signature().is_variadic());

        assert_eq!(methods[2].signature().params(), [Kind::F64]);
        assert_eq!(methods[2].signature().variadic_kind(), Some(Kind::I32));
        assert_eq!(methods[2].signature().required(), 1);
    }

    #[test]
    fn test_invoke_rejects_mismatched_values() {
        let methods = collect();
        let pair = &methods[1];

        let err = pair
            .invoke(Context::for_test("GET", ""), vec![Value::String("x".into())])
            .err()
            .unwrap();
        assert!(matches!(err, ConvertError::KindMismatch { .. }));

        let err = pair
            .invoke(Context::for_test("GET", ""), vec![Value::U8(1)])
            .err()
            .unwrap();
        assert_eq!(err, ConvertError::MissingValue(Kind::String));
    }

    #[tokio::test]
    async fn test_invoke_variadic() {
        let methods = collect();
        let tail = &methods[2];

        let fut = tail
            .invoke(
                Context::for_test("GET", ""),
                vec![Value::F64(0.5), Value::I32(2), Value::I32(4)],
            )
            .unwrap();
        let response = fut.await;
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"3");
    }
}
