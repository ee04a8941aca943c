use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use crate::access::{AccessError, Accessor};

// -----------------------------------------------------------------------------
// Setter

/// Type-erased write access to one member.
///
/// Static members ignore the target argument; pass `&()`. On a
/// value-semantics declaring type this path fails with
/// [`AccessError::BoxedValueWrite`]: a shared borrow of a plain value can
/// never reach the live instance, and writing a copy would silently discard
/// the write.
pub trait Setter: Accessor {
    /// Writes the boxed `value` into the member of `target`.
    fn set(&self, target: &dyn Any, value: Box<dyn Any>) -> Result<(), AccessError>;
}

impl fmt::Debug for dyn Setter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Setter({:?})", self.member())
    }
}

// -----------------------------------------------------------------------------
// TypedSetter

/// Value-typed write access: the caller has asserted `V` at lookup, the
/// target stays erased. Fails like [`Setter`] on value-semantics targets.
pub trait TypedSetter<V: Any>: Setter {
    /// Writes `value` into the member of `target`.
    fn set_typed(&self, target: &dyn Any, value: V) -> Result<(), AccessError>;
}

// -----------------------------------------------------------------------------
// RefSetter

/// Target-typed write access, target passed by mutable reference.
///
/// Exists for instance members only. This is the only way to mutate a live
/// value-semantics instance; on reference-semantics targets it writes
/// through the same aliasing procedure as the erased path.
pub trait RefSetter<T: Any>: Accessor {
    /// Writes the boxed `value` into the member of `target`, in place.
    fn set_in(&self, target: &mut T, value: Box<dyn Any>) -> Result<(), AccessError>;
}

impl<T: Any> fmt::Debug for dyn RefSetter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RefSetter({:?})", self.member())
    }
}
