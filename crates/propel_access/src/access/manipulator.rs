use core::any::Any;
use core::fmt;

use crate::access::{AccessError, Getter, RefGetter, RefSetter, Setter, TypedGetter, TypedSetter};

// -----------------------------------------------------------------------------
// Manipulator

/// Read and write access to one member at the type-erased level, plus the
/// capability flags.
///
/// A manipulator always exposes both operations; an absent procedure makes
/// the corresponding call fail rather than the lookup, so the flags are the
/// way to probe before calling.
pub trait Manipulator: Getter + Setter {
    /// Whether the member can be read.
    fn can_read(&self) -> bool;
    /// Whether the member can be written.
    fn can_write(&self) -> bool;
}

// -----------------------------------------------------------------------------
// TypedManipulator

/// A [`Manipulator`] with both sides value-typed as `V`.
pub trait TypedManipulator<V: Any>: Manipulator + TypedGetter<V> + TypedSetter<V> {}

impl<V: Any, A> TypedManipulator<V> for A where A: Manipulator + TypedGetter<V> + TypedSetter<V> {}

// -----------------------------------------------------------------------------
// TargetManipulator

/// The fully typed surface of an instance member: target `T`, value `V`.
///
/// Next to the inherited erased and by-reference layers it adds the direct
/// call shapes with no downcast at all.
pub trait TargetManipulator<T: Any, V: Any>:
    TypedManipulator<V> + RefGetter<T> + RefSetter<T>
{
    /// Reads the member value of `target`.
    fn get_on(&self, target: &T) -> Result<V, AccessError>;

    /// Writes `value` into the member of `target` through a shared borrow.
    ///
    /// Works on reference-semantics targets, whose setters alias; on a
    /// value-semantics target the write could only reach a copy, so it
    /// fails with [`AccessError::BoxedValueWrite`]; use [`set_mut`].
    ///
    /// [`set_mut`]: TargetManipulator::set_mut
    fn set_on(&self, target: &T, value: V) -> Result<(), AccessError>;

    /// Writes `value` into the member of `target`, in place. Works on every
    /// instance category.
    fn set_mut(&self, target: &mut T, value: V) -> Result<(), AccessError>;
}

impl<T: Any, V: Any> fmt::Debug for dyn TargetManipulator<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetManipulator({:?})", self.member())
    }
}
