use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, type_name};
use core::marker::PhantomData;

use propel_utils::hash::HashMap;

use crate::info::{MemberHandle, MemberInfo, MemberKind, TypeRef, TypeSemantics};

// -----------------------------------------------------------------------------
// Described

/// A type with a member description.
///
/// The description is built once and lives for the process; the usual
/// implementation keeps it in a `OnceLock` cell:
///
/// ```
/// use std::sync::OnceLock;
///
/// use propel_access::info::{Described, TypeDesc};
///
/// struct Point {
///     x: f32,
///     y: f32,
/// }
///
/// impl Described for Point {
///     fn type_desc() -> &'static TypeDesc {
///         static CELL: OnceLock<TypeDesc> = OnceLock::new();
///         CELL.get_or_init(|| {
///             TypeDesc::of_value::<Self>()
///                 .field("x", |p: &Self| p.x, Some(|p: &mut Self, v| p.x = v))
///                 .field("y", |p: &Self| p.y, Some(|p: &mut Self, v| p.y = v))
///                 .build()
///         })
///     }
/// }
///
/// assert_eq!(Point::type_desc().len(), 2);
/// assert!(Point::member("x").is_some());
/// assert!(Point::member("z").is_none());
/// ```
pub trait Described: Any {
    /// Returns the type's member description.
    fn type_desc() -> &'static TypeDesc;

    /// Resolves a member of this type by name.
    #[inline]
    fn member(name: &str) -> Option<MemberHandle>
    where
        Self: Sized,
    {
        Self::type_desc().member(name)
    }
}

// -----------------------------------------------------------------------------
// TypeDesc

/// The member description of one type: its identity, semantics, and member
/// records, indexed by name.
///
/// Built through [`TypeDesc::of_value`] or [`TypeDesc::of_reference`];
/// immutable afterwards. Member handles borrow from the description, which
/// is why lookups require the `'static` description a [`Described`] impl
/// provides.
pub struct TypeDesc {
    ty: TypeRef,
    semantics: TypeSemantics,
    members: Box<[MemberInfo]>,
    by_name: HashMap<&'static str, usize>,
}

impl TypeDesc {
    /// Starts a description of a value-semantics type: a plain struct whose
    /// instances are mutated through `&mut`.
    #[inline]
    pub fn of_value<T: Any>() -> ValueTypeBuilder<T> {
        ValueTypeBuilder {
            set: MemberSet::new(type_name::<T>()),
            _target: PhantomData,
        }
    }

    /// Starts a description of a reference-semantics type: a handle-like
    /// type whose registered setters write through a shared borrow.
    #[inline]
    pub fn of_reference<T: Any>() -> ReferenceTypeBuilder<T> {
        ReferenceTypeBuilder {
            set: MemberSet::new(type_name::<T>()),
            _target: PhantomData,
        }
    }

    /// Returns the described type.
    #[inline]
    pub const fn ty(&self) -> TypeRef {
        self.ty
    }

    /// Returns the described type's semantics.
    #[inline]
    pub const fn semantics(&self) -> TypeSemantics {
        self.semantics
    }

    /// Resolves a member by name.
    pub fn member(&'static self, name: &str) -> Option<MemberHandle> {
        self.by_name
            .get(name)
            .map(|&index| MemberHandle::new(&self.members[index]))
    }

    /// An iterator over all members, in declaration order.
    pub fn members(&'static self) -> impl ExactSizeIterator<Item = MemberHandle> {
        self.members.iter().map(MemberHandle::new)
    }

    /// Returns the number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the type declares no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

// -----------------------------------------------------------------------------
// MemberSet

// Shared collection logic of both builders.
struct MemberSet {
    owner: &'static str,
    members: Vec<MemberInfo>,
    by_name: HashMap<&'static str, usize>,
}

impl MemberSet {
    fn new(owner: &'static str) -> Self {
        Self {
            owner,
            members: Vec::new(),
            by_name: HashMap::default(),
        }
    }

    fn push(&mut self, info: MemberInfo) {
        // Duplicate names are a registration programming error, caught here
        // rather than silently shadowing.
        if self.by_name.contains_key(info.name()) {
            panic!(
                "member `{}` is declared twice on `{}`",
                info.name(),
                self.owner
            );
        }
        self.by_name.insert(info.name(), self.members.len());
        self.members.push(info);
    }

    fn build(self, ty: TypeRef, semantics: TypeSemantics) -> TypeDesc {
        TypeDesc {
            ty,
            semantics,
            members: self.members.into_boxed_slice(),
            by_name: self.by_name,
        }
    }
}

// -----------------------------------------------------------------------------
// ValueTypeBuilder

/// Builder of a [`TypeDesc`] for a value-semantics declaring type `T`.
///
/// Instance setters take the target by `&mut T`; there is no other way to
/// reach a live value-typed instance.
pub struct ValueTypeBuilder<T: Any> {
    set: MemberSet,
    _target: PhantomData<fn() -> T>,
}

impl<T: Any> ValueTypeBuilder<T> {
    /// Declares a stored field. Fields can always be read; omit `set` for a
    /// read-only field.
    pub fn field<V: Any>(
        mut self,
        name: &'static str,
        get: fn(&T) -> V,
        set: Option<fn(&mut T, V)>,
    ) -> Self {
        self.set
            .push(MemberInfo::value_instance::<T, V>(
                MemberKind::Field,
                name,
                Some(get),
                set,
            ));
        self
    }

    /// Declares an accessor-backed property; either procedure may be absent.
    pub fn property<V: Any>(
        mut self,
        name: &'static str,
        get: Option<fn(&T) -> V>,
        set: Option<fn(&mut T, V)>,
    ) -> Self {
        self.set
            .push(MemberInfo::value_instance::<T, V>(
                MemberKind::Property,
                name,
                get,
                set,
            ));
        self
    }

    /// Declares a static field backed by a single process-wide slot.
    pub fn static_field<V: Any>(
        mut self,
        name: &'static str,
        get: fn() -> V,
        set: Option<fn(V)>,
    ) -> Self {
        self.set.push(MemberInfo::static_member::<T, V>(
            MemberKind::Field,
            TypeSemantics::Value,
            name,
            Some(get),
            set,
        ));
        self
    }

    /// Declares a static property; either procedure may be absent.
    pub fn static_property<V: Any>(
        mut self,
        name: &'static str,
        get: Option<fn() -> V>,
        set: Option<fn(V)>,
    ) -> Self {
        self.set.push(MemberInfo::static_member::<T, V>(
            MemberKind::Property,
            TypeSemantics::Value,
            name,
            get,
            set,
        ));
        self
    }

    /// Finishes the description.
    pub fn build(self) -> TypeDesc {
        self.set.build(TypeRef::of::<T>(), TypeSemantics::Value)
    }
}

// -----------------------------------------------------------------------------
// ReferenceTypeBuilder

/// Builder of a [`TypeDesc`] for a reference-semantics declaring type `T`.
///
/// Instance setters take the target by `&T` and write through the type's own
/// aliasing discipline, so a write is visible to every holder of the
/// instance.
pub struct ReferenceTypeBuilder<T: Any> {
    set: MemberSet,
    _target: PhantomData<fn() -> T>,
}

impl<T: Any> ReferenceTypeBuilder<T> {
    /// Declares a stored field. Fields can always be read; omit `set` for a
    /// read-only field.
    pub fn field<V: Any>(
        mut self,
        name: &'static str,
        get: fn(&T) -> V,
        set: Option<fn(&T, V)>,
    ) -> Self {
        self.set
            .push(MemberInfo::reference_instance::<T, V>(
                MemberKind::Field,
                name,
                Some(get),
                set,
            ));
        self
    }

    /// Declares an accessor-backed property; either procedure may be absent.
    pub fn property<V: Any>(
        mut self,
        name: &'static str,
        get: Option<fn(&T) -> V>,
        set: Option<fn(&T, V)>,
    ) -> Self {
        self.set
            .push(MemberInfo::reference_instance::<T, V>(
                MemberKind::Property,
                name,
                get,
                set,
            ));
        self
    }

    /// Declares a static field backed by a single process-wide slot.
    pub fn static_field<V: Any>(
        mut self,
        name: &'static str,
        get: fn() -> V,
        set: Option<fn(V)>,
    ) -> Self {
        self.set.push(MemberInfo::static_member::<T, V>(
            MemberKind::Field,
            TypeSemantics::Reference,
            name,
            Some(get),
            set,
        ));
        self
    }

    /// Declares a static property; either procedure may be absent.
    pub fn static_property<V: Any>(
        mut self,
        name: &'static str,
        get: Option<fn() -> V>,
        set: Option<fn(V)>,
    ) -> Self {
        self.set.push(MemberInfo::static_member::<T, V>(
            MemberKind::Property,
            TypeSemantics::Reference,
            name,
            get,
            set,
        ));
        self
    }

    /// Finishes the description.
    pub fn build(self) -> TypeDesc {
        self.set.build(TypeRef::of::<T>(), TypeSemantics::Reference)
    }
}

// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::fixtures::{ReferenceTarget, ValueTarget};
    use crate::info::{Described, TypeDesc, TypeSemantics};

    #[test]
    fn members_resolve_by_name_and_enumerate() {
        let desc = ValueTarget::type_desc();

        assert_eq!(desc.semantics(), TypeSemantics::Value);
        assert!(desc.ty().is::<ValueTarget>());
        assert!(desc.member("value").is_some());
        assert!(desc.member("missing").is_none());

        let names: Vec<_> = desc.members().map(|m| m.name()).collect();
        assert!(names.contains(&"value"));
        assert!(names.contains(&"name"));
        assert_eq!(names.len(), desc.len());
    }

    #[test]
    fn handles_of_one_member_are_identical() {
        let a = ReferenceTarget::member("value").unwrap();
        let b = ReferenceTarget::member("value").unwrap();
        let other = ReferenceTarget::member("label").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, other);
    }

    #[test]
    #[should_panic(expected = "declared twice")]
    fn duplicate_member_name_panics() {
        struct Twice {
            a: u8,
        }

        let _ = TypeDesc::of_value::<Twice>()
            .field("a", |t: &Twice| t.a, None)
            .field("a", |t: &Twice| t.a, None);
    }
}
