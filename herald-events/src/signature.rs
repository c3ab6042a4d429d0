//! Payload signatures
//!
//! A [`Signature`] is the arity and ordered parameter types a handler was
//! registered with, or that a broadcast supplies. Handlers are stored
//! type-erased, so dispatch compares signatures before recovering the typed
//! handler.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Largest number of payload values a single event carries.
pub const MAX_ARITY: usize = 4;

/// A single payload position
#[derive(Debug, Clone, Copy)]
pub struct Param {
    id: TypeId,
    name: &'static str,
}

impl Param {
    /// Describe the parameter type `T`
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Type identifier used for matching
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Type name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for Param {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Param {}

impl Hash for Param {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Arity plus ordered parameter types.
///
/// Equality and hashing only look at the type identifiers; names are kept
/// for error messages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    params: Vec<Param>,
}

impl Signature {
    pub(crate) fn from_params(params: Vec<Param>) -> Self {
        debug_assert!(params.len() <= MAX_ARITY);
        Self { params }
    }

    /// Signature of the payload type `P`
    pub fn of<P: Payload>() -> Self {
        P::signature()
    }

    /// Number of payload values
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Ordered parameters
    pub fn params(&self) -> &[Param] {
        &self.params
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (index, param) in self.params.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(param.name)?;
        }
        f.write_str(")")
    }
}

/// Values carried by a broadcast.
///
/// Implemented for the tuples `()`, `(A,)`, `(A, B)`, `(A, B, C)` and
/// `(A, B, C, D)`. Every element must be `Send + Sync + 'static` so the
/// registry can be shared between threads.
pub trait Payload: Send + Sync + 'static {
    /// Arity and ordered element types of this payload
    fn signature() -> Signature;
}

macro_rules! impl_payload {
    ($($ty:ident),*) => {
        impl<$($ty: Send + Sync + 'static),*> Payload for ($($ty,)*) {
            fn signature() -> Signature {
                Signature::from_params(vec![$(Param::of::<$ty>()),*])
            }
        }
    };
}

impl_payload!();
impl_payload!(A);
impl_payload!(A, B);
impl_payload!(A, B, C);
impl_payload!(A, B, C, D);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity() {
        assert_eq!(Signature::of::<()>().arity(), 0);
        assert_eq!(Signature::of::<(String,)>().arity(), 1);
        assert_eq!(Signature::of::<(f32, f32)>().arity(), 2);
        assert_eq!(Signature::of::<(u8, u16, u32)>().arity(), 3);
        assert_eq!(Signature::of::<(u8, u16, u32, u64)>().arity(), MAX_ARITY);
    }

    #[test]
    fn test_order_matters() {
        assert_ne!(Signature::of::<(i32, String)>(), Signature::of::<(String, i32)>());
        assert_eq!(Signature::of::<(i32, String)>(), Signature::of::<(i32, String)>());
    }

    #[test]
    fn test_arity_discriminates() {
        assert_ne!(Signature::of::<(f32,)>(), Signature::of::<(f32, f32)>());
        assert_ne!(Signature::of::<()>(), Signature::of::<((),)>());
    }

    #[test]
    fn test_display() {
        assert_eq!(Signature::of::<()>().to_string(), "()");
        assert_eq!(Signature::of::<(f32, f32)>().to_string(), "(f32, f32)");
        assert!(Signature::of::<(String,)>().to_string().contains("String"));
    }

    #[test]
    fn test_param_accessors() {
        let signature = Signature::of::<(u64, bool)>();
        assert_eq!(signature.params()[0].type_id(), TypeId::of::<u64>());
        assert_eq!(signature.params()[1].type_name(), "bool");
    }
}
