//! Member metadata: type descriptions, member records, and the derived
//! descriptor view consumed by the accessor compiler.
//!
//! A type opts in by implementing [`Described`], building its [`TypeDesc`]
//! once in a `OnceLock` cell. Every member of the description is addressed
//! through a [`MemberHandle`], a stable, copyable identity that the rest of
//! the crate keys on.

mod descriptor;
mod member;
mod type_desc;

pub use descriptor::{Category, MemberDescriptor, TypeSemantics};
pub use member::{MemberHandle, MemberInfo, MemberKind, TypeRef};
pub use type_desc::{Described, ReferenceTypeBuilder, TypeDesc, ValueTypeBuilder};

pub(crate) use member::{SharedProcs, StaticProcs, ValueProcs};
