//! The capability contracts of a compiled accessor.
//!
//! Callers request exactly the capability and type-specificity they need:
//! the type-erased [`Getter`]/[`Setter`] pair, the value-typed
//! [`TypedGetter`]/[`TypedSetter`], the target-by-reference
//! [`RefGetter`]/[`RefSetter`], or a [`Manipulator`] union of both sides.
//! Static members expose the erased and value-typed layers only; instance
//! members expose the whole lattice, with the writes that cannot reach a
//! live value-semantics instance failing (see
//! [`AccessError::BoxedValueWrite`]).

mod error;
mod getter;
mod manipulator;
mod setter;

pub use error::{AccessError, TypeRole};
pub use getter::{Getter, RefGetter, TypedGetter};
pub use manipulator::{Manipulator, TargetManipulator, TypedManipulator};
pub use setter::{RefSetter, Setter, TypedSetter};

use crate::info::MemberHandle;

// -----------------------------------------------------------------------------
// Accessor

/// Root contract: anything that provides access to one member.
pub trait Accessor: Send + Sync {
    /// Returns the handle of the accessed member.
    fn member(&self) -> MemberHandle;
}
