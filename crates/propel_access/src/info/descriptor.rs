use core::any::Any;
use core::fmt;

use crate::info::{MemberKind, TypeRef};

// -----------------------------------------------------------------------------
// TypeSemantics

/// How instances of a declaring type are handled.
///
/// Plain Rust structs have value semantics: they are moved, copied, and
/// mutated through `&mut`. Reference semantics marks handle-like types whose
/// registered setters write through a shared borrow (interior mutability,
/// shared-pointer payloads), so a write is visible to every alias of the
/// instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeSemantics {
    Value,
    Reference,
}

// -----------------------------------------------------------------------------
// Category

/// The specialization category of a member, derived from its descriptor and
/// fixed for the member's lifetime.
///
/// The category selects the compiler strategy and the physical call shape:
/// no target argument, a target that must be reached by reference, or an
/// aliased target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Static,
    ValueInstance,
    ReferenceInstance,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => f.write_str("static"),
            Self::ValueInstance => f.write_str("value-instance"),
            Self::ReferenceInstance => f.write_str("reference-instance"),
        }
    }
}

// -----------------------------------------------------------------------------
// MemberDescriptor

/// A uniform, copyable view over one member's metadata.
///
/// Pure projection of a [`MemberHandle`](crate::info::MemberHandle):
/// kind, declaring and value types, staticness, and the read/write
/// capabilities derived from which procedures were registered. A member may
/// be neither readable nor writable; its accessor still compiles and every
/// operation on it fails with the capability error.
#[derive(Clone, Copy, Debug)]
pub struct MemberDescriptor {
    kind: MemberKind,
    declaring: TypeRef,
    value: TypeRef,
    semantics: TypeSemantics,
    is_static: bool,
    can_read: bool,
    can_write: bool,
}

impl MemberDescriptor {
    pub(crate) fn new(
        kind: MemberKind,
        declaring: TypeRef,
        value: TypeRef,
        semantics: TypeSemantics,
        is_static: bool,
        can_read: bool,
        can_write: bool,
    ) -> Self {
        Self {
            kind,
            declaring,
            value,
            semantics,
            is_static,
            can_read,
            can_write,
        }
    }

    /// Returns the member kind.
    #[inline]
    pub const fn kind(self) -> MemberKind {
        self.kind
    }

    /// Returns the declaring type.
    #[inline]
    pub const fn declaring(self) -> TypeRef {
        self.declaring
    }

    /// Returns the value type.
    #[inline]
    pub const fn value(self) -> TypeRef {
        self.value
    }

    /// Returns the declaring type's semantics.
    #[inline]
    pub const fn semantics(self) -> TypeSemantics {
        self.semantics
    }

    /// Returns `true` for a static member.
    #[inline]
    pub const fn is_static(self) -> bool {
        self.is_static
    }

    /// Returns `true` if a get procedure is registered.
    #[inline]
    pub const fn can_read(self) -> bool {
        self.can_read
    }

    /// Returns `true` if a set procedure is registered.
    #[inline]
    pub const fn can_write(self) -> bool {
        self.can_write
    }

    /// Check if the member's value type is `V`.
    #[inline]
    pub fn value_is<V: Any>(self) -> bool {
        self.value.is::<V>()
    }

    /// Check if the member's declaring type is `T`.
    #[inline]
    pub fn declaring_is<T: Any>(self) -> bool {
        self.declaring.is::<T>()
    }

    /// Derives the specialization category:
    ///
    /// 1. static members are `Static`;
    /// 2. otherwise a value-semantics declaring type means `ValueInstance`;
    /// 3. otherwise `ReferenceInstance`.
    pub fn category(self) -> Category {
        if self.is_static {
            Category::Static
        } else if self.semantics == TypeSemantics::Value {
            Category::ValueInstance
        } else {
            Category::ReferenceInstance
        }
    }
}

// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::fixtures::{ReferenceTarget, ValueTarget};
    use crate::info::{Category, Described, MemberKind, TypeSemantics};

    #[test]
    fn value_field_descriptor() {
        let desc = ValueTarget::member("value").unwrap().descriptor();

        assert_eq!(desc.kind(), MemberKind::Field);
        assert_eq!(desc.semantics(), TypeSemantics::Value);
        assert_eq!(desc.category(), Category::ValueInstance);
        assert!(desc.declaring_is::<ValueTarget>());
        assert!(desc.value_is::<i32>());
        assert!(!desc.is_static());
        assert!(desc.can_read());
        assert!(desc.can_write());
    }

    #[test]
    fn reference_property_descriptor() {
        let desc = ReferenceTarget::member("value").unwrap().descriptor();

        assert_eq!(desc.kind(), MemberKind::Property);
        assert_eq!(desc.semantics(), TypeSemantics::Reference);
        assert_eq!(desc.category(), Category::ReferenceInstance);
        assert!(desc.declaring_is::<ReferenceTarget>());
    }

    #[test]
    fn static_member_descriptor() {
        let desc = ReferenceTarget::member("static_value").unwrap().descriptor();

        assert!(desc.is_static());
        assert_eq!(desc.category(), Category::Static);
        assert!(desc.value_is::<i32>());
    }

    #[test]
    fn read_only_member_descriptor() {
        let desc = ValueTarget::member("id").unwrap().descriptor();

        assert!(desc.can_read());
        assert!(!desc.can_write());
    }
}
