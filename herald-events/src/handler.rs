//! Handler definitions and traits

use crate::signature::{Payload, Signature};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Outcome of a single handler invocation
pub type HandlerResult = std::result::Result<(), HandlerError>;

/// Error raised by a handler body
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("Handler failed: {0}")]
    Failed(String),

    #[error("Event processing error: {0}")]
    Processing(String),

    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl HandlerError {
    /// Shorthand for [`HandlerError::Failed`]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Wrap any error type
    pub fn other<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Other(Box::new(error))
    }
}

/// Return types a handler body may have: `()` or [`HandlerResult`].
pub trait HandlerOutput {
    fn into_result(self) -> HandlerResult;
}

impl HandlerOutput for () {
    fn into_result(self) -> HandlerResult {
        Ok(())
    }
}

impl HandlerOutput for HandlerResult {
    fn into_result(self) -> HandlerResult {
        self
    }
}

/// Identifier assigned to each registration, used in logs and errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerId(pub(crate) u64);

impl HandlerId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type Callback<P> = dyn Fn(&P) -> HandlerResult + Send + Sync;

/// A typed event handler.
///
/// Wraps a callback taking each payload value by reference. Cloning is cheap
/// and clones share identity: a handler compares equal only to itself and its
/// clones, never to a separately built handler with the same body. That
/// identity is what [`EventService::unregister`](crate::EventService::unregister)
/// matches on.
///
/// ```rust
/// use herald_events::{Handler, HandlerError};
///
/// let on_tap = Handler::new(|x: &f32, y: &f32| {
///     let _ = (x, y);
/// });
/// let on_save = Handler::new(|path: &String| -> Result<(), HandlerError> {
///     if path.is_empty() {
///         return Err(HandlerError::failed("empty path"));
///     }
///     Ok(())
/// });
///
/// assert_eq!(on_tap, on_tap.clone());
/// assert_eq!(on_save.signature().arity(), 1);
/// ```
pub struct Handler<P: Payload> {
    callback: Arc<Callback<P>>,
}

impl<P: Payload> Handler<P> {
    /// Build a handler from a closure or function of matching arity
    pub fn new<F, R>(f: F) -> Self
    where
        F: IntoHandler<P, R>,
    {
        f.into_handler()
    }

    /// Build a handler from a callback over the whole payload tuple
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&P) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(f),
        }
    }

    /// Payload signature this handler accepts
    pub fn signature(&self) -> Signature {
        P::signature()
    }

    /// Invoke the handler directly
    pub fn call(&self, payload: &P) -> HandlerResult {
        (self.callback)(payload)
    }

    /// Whether both values refer to the same handler
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }
}

impl<P: Payload> Clone for Handler<P> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<P: Payload> PartialEq for Handler<P> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<P: Payload> Eq for Handler<P> {}

impl<P: Payload> fmt::Debug for Handler<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("signature", &format_args!("{}", self.signature()))
            .field("callback", &Arc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}

/// Conversion from closures and functions into [`Handler`]s.
///
/// Implemented for every `Fn(&A, .., &D) -> R` of arity zero to four whose
/// return type implements [`HandlerOutput`].
pub trait IntoHandler<P: Payload, R>: Send + Sync + 'static {
    fn into_handler(self) -> Handler<P>;
}

macro_rules! impl_into_handler {
    ($($ty:ident),*) => {
        impl<F, R, $($ty),*> IntoHandler<($($ty,)*), R> for F
        where
            F: Fn($(&$ty),*) -> R + Send + Sync + 'static,
            R: HandlerOutput,
            $($ty: Send + Sync + 'static,)*
        {
            #[allow(non_snake_case)]
            fn into_handler(self) -> Handler<($($ty,)*)> {
                Handler::from_fn(move |($($ty,)*): &($($ty,)*)| (self)($($ty),*).into_result())
            }
        }
    };
}

impl_into_handler!();
impl_into_handler!(A);
impl_into_handler!(A, B);
impl_into_handler!(A, B, C);
impl_into_handler!(A, B, C, D);

/// A registration as stored in the registry.
///
/// The typed handler sits behind `dyn Any`; it is only recovered after the
/// caller's signature has been checked against the stored one.
pub(crate) struct HandlerEntry {
    pub(crate) id: HandlerId,
    pub(crate) signature: Signature,
    handler: Box<dyn Any + Send + Sync>,
}

impl HandlerEntry {
    pub(crate) fn new<P: Payload>(id: HandlerId, handler: &Handler<P>) -> Self {
        Self {
            id,
            signature: handler.signature(),
            handler: Box::new(handler.clone()),
        }
    }

    /// Typed view of the stored handler when `signature` matches
    pub(crate) fn typed<P: Payload>(&self, signature: &Signature) -> Option<&Handler<P>> {
        if self.signature != *signature {
            return None;
        }
        self.handler.downcast_ref::<Handler<P>>()
    }

    /// Whether this entry holds `handler` (or a clone of it)
    pub(crate) fn holds<P: Payload>(&self, handler: &Handler<P>) -> bool {
        self.handler
            .downcast_ref::<Handler<P>>()
            .is_some_and(|stored| stored.ptr_eq(handler))
    }
}
