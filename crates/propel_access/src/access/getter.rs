use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use crate::access::{AccessError, Accessor};

// -----------------------------------------------------------------------------
// Getter

/// Type-erased read access to one member.
///
/// Available for every compiled accessor whose member is readable, on any
/// category. Static members ignore the target argument; pass `&()`.
pub trait Getter: Accessor {
    /// Reads the member value of `target`, boxed.
    ///
    /// The target must be the member's declaring type (unchecked for static
    /// members, which have no target).
    fn get(&self, target: &dyn Any) -> Result<Box<dyn Any>, AccessError>;
}

impl fmt::Debug for dyn Getter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Getter({:?})", self.member())
    }
}

// -----------------------------------------------------------------------------
// TypedGetter

/// Value-typed read access: the caller has asserted `V` at lookup, the
/// target stays erased.
pub trait TypedGetter<V: Any>: Getter {
    /// Reads the member value of `target`.
    fn get_typed(&self, target: &dyn Any) -> Result<V, AccessError>;
}

impl<V: Any> fmt::Debug for dyn TypedGetter<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypedGetter({:?})", self.member())
    }
}

// -----------------------------------------------------------------------------
// RefGetter

/// Target-typed read access, target passed by reference.
///
/// Exists for instance members only. For value-semantics declaring types
/// this is the companion of [`RefSetter`](crate::access::RefSetter): it
/// reads the live instance without going through a boxed copy.
pub trait RefGetter<T: Any>: Accessor {
    /// Reads the member value of `target`, boxed.
    fn get_from(&self, target: &T) -> Result<Box<dyn Any>, AccessError>;
}

impl<T: Any> fmt::Debug for dyn RefGetter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RefGetter({:?})", self.member())
    }
}
