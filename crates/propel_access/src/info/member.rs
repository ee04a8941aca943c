use alloc::boxed::Box;
use core::any::{Any, TypeId, type_name};
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ptr;

use crate::access::AccessError;
use crate::compile::{CompiledAccessor, reference_instance, static_member, value_instance};
use crate::info::{MemberDescriptor, TypeSemantics};

// -----------------------------------------------------------------------------
// TypeRef

/// A named reference to a Rust type: its [`TypeId`] plus the full type path.
///
/// Used for the declaring and value types of a member; the name is only for
/// diagnostics, identity is the `TypeId`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeRef {
    id: TypeId,
    name: &'static str,
}

impl TypeRef {
    /// Creates a `TypeRef` for the type `T`.
    #[inline]
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Returns the `TypeId`.
    #[inline]
    pub fn id(self) -> TypeId {
        self.id
    }

    /// Returns the full type path.
    #[inline]
    pub const fn name(self) -> &'static str {
        self.name
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn is<T: Any>(self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

// -----------------------------------------------------------------------------
// MemberKind

/// The kind of a member: a plain stored field or an accessor-backed property.
///
/// Kinds only differ in which process-wide cache serves them; the compiled
/// call shapes are identical.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Property,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field => f.write_str("field"),
            Self::Property => f.write_str("property"),
        }
    }
}

// -----------------------------------------------------------------------------
// Registered procedures

/// Procedures of a static member: one storage slot, no target.
pub(crate) struct StaticProcs<V> {
    pub get: Option<fn() -> V>,
    pub set: Option<fn(V)>,
}

/// Procedures of an instance member on a value-semantics declaring type.
/// Writes need `&mut`; a shared borrow cannot reach the live value.
pub(crate) struct ValueProcs<T, V> {
    pub get: Option<fn(&T) -> V>,
    pub set: Option<fn(&mut T, V)>,
}

/// Procedures of an instance member on a reference-semantics declaring type.
/// The setter writes through a shared borrow; the declaring type's own
/// aliasing discipline makes the write visible to every holder.
pub(crate) struct SharedProcs<T, V> {
    pub get: Option<fn(&T) -> V>,
    pub set: Option<fn(&T, V)>,
}

// Function pointers are `Copy` for any `T`/`V`; the derives would demand
// `T: Copy`.
impl<V> Clone for StaticProcs<V> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<V> Copy for StaticProcs<V> {}

impl<T, V> Clone for ValueProcs<T, V> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T, V> Copy for ValueProcs<T, V> {}

impl<T, V> Clone for SharedProcs<T, V> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T, V> Copy for SharedProcs<T, V> {}

// -----------------------------------------------------------------------------
// MemberInfo

/// The metadata record of one member.
///
/// Created by the [`TypeDesc`](crate::info::TypeDesc) builders and stored in
/// the type's `'static` description; never cloned or duplicated afterwards,
/// so the record's address doubles as the member's identity (see
/// [`MemberHandle`]).
pub struct MemberInfo {
    name: &'static str,
    kind: MemberKind,
    declaring: TypeRef,
    value: TypeRef,
    semantics: TypeSemantics,
    is_static: bool,
    can_read: bool,
    can_write: bool,
    // The registered get/set procedures, shape-erased. Each constructor
    // pairs the box with the matching monomorphic compile entry point.
    procs: Box<dyn Any + Send + Sync>,
    compile: fn(MemberHandle) -> Result<CompiledAccessor, AccessError>,
}

impl MemberInfo {
    pub(crate) fn static_member<D: Any, V: Any>(
        kind: MemberKind,
        semantics: TypeSemantics,
        name: &'static str,
        get: Option<fn() -> V>,
        set: Option<fn(V)>,
    ) -> Self {
        Self {
            name,
            kind,
            declaring: TypeRef::of::<D>(),
            value: TypeRef::of::<V>(),
            semantics,
            is_static: true,
            can_read: get.is_some(),
            can_write: set.is_some(),
            procs: Box::new(StaticProcs { get, set }),
            compile: static_member::compile::<V>,
        }
    }

    pub(crate) fn value_instance<T: Any, V: Any>(
        kind: MemberKind,
        name: &'static str,
        get: Option<fn(&T) -> V>,
        set: Option<fn(&mut T, V)>,
    ) -> Self {
        Self {
            name,
            kind,
            declaring: TypeRef::of::<T>(),
            value: TypeRef::of::<V>(),
            semantics: TypeSemantics::Value,
            is_static: false,
            can_read: get.is_some(),
            can_write: set.is_some(),
            procs: Box::new(ValueProcs { get, set }),
            compile: value_instance::compile::<T, V>,
        }
    }

    pub(crate) fn reference_instance<T: Any, V: Any>(
        kind: MemberKind,
        name: &'static str,
        get: Option<fn(&T) -> V>,
        set: Option<fn(&T, V)>,
    ) -> Self {
        Self {
            name,
            kind,
            declaring: TypeRef::of::<T>(),
            value: TypeRef::of::<V>(),
            semantics: TypeSemantics::Reference,
            is_static: false,
            can_read: get.is_some(),
            can_write: set.is_some(),
            procs: Box::new(SharedProcs { get, set }),
            compile: reference_instance::compile::<T, V>,
        }
    }

    /// Returns the member name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the member kind.
    #[inline]
    pub const fn kind(&self) -> MemberKind {
        self.kind
    }

    /// Projects the descriptor view of this member.
    #[inline]
    pub fn descriptor(&self) -> MemberDescriptor {
        MemberDescriptor::new(
            self.kind,
            self.declaring,
            self.value,
            self.semantics,
            self.is_static,
            self.can_read,
            self.can_write,
        )
    }

    #[inline]
    pub(crate) fn procedures(&self) -> &(dyn Any + Send + Sync) {
        &*self.procs
    }

    #[inline]
    pub(crate) fn compile_fn(&self) -> fn(MemberHandle) -> Result<CompiledAccessor, AccessError> {
        self.compile
    }
}

impl fmt::Debug for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberInfo")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("declaring", &self.declaring)
            .field("value", &self.value)
            .field("is_static", &self.is_static)
            .field("can_read", &self.can_read)
            .field("can_write", &self.can_write)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// MemberHandle

/// Stable identity of one member.
///
/// A handle is a reference into the declaring type's `'static` description;
/// equality and hashing are by address, which is exactly "same underlying
/// member" because member records are never duplicated once built. Handles
/// are the key of the accessor caches.
///
/// # Examples
///
/// ```
/// use std::sync::OnceLock;
///
/// use propel_access::info::{Described, MemberKind, TypeDesc};
///
/// struct Pixel {
///     alpha: u8,
/// }
///
/// impl Described for Pixel {
///     fn type_desc() -> &'static TypeDesc {
///         static CELL: OnceLock<TypeDesc> = OnceLock::new();
///         CELL.get_or_init(|| {
///             TypeDesc::of_value::<Self>()
///                 .field("alpha", |p: &Self| p.alpha, Some(|p: &mut Self, v| p.alpha = v))
///                 .build()
///         })
///     }
/// }
///
/// let alpha = Pixel::member("alpha").unwrap();
/// assert_eq!(alpha.name(), "alpha");
/// assert_eq!(alpha.kind(), MemberKind::Field);
/// assert_eq!(alpha, Pixel::member("alpha").unwrap());
/// ```
#[derive(Clone, Copy)]
pub struct MemberHandle(&'static MemberInfo);

impl MemberHandle {
    #[inline]
    pub(crate) fn new(info: &'static MemberInfo) -> Self {
        Self(info)
    }

    /// Returns the member name.
    #[inline]
    pub fn name(self) -> &'static str {
        self.0.name()
    }

    /// Returns the member kind.
    #[inline]
    pub fn kind(self) -> MemberKind {
        self.0.kind()
    }

    /// Projects the descriptor view of this member. Pure; no side effects.
    #[inline]
    pub fn descriptor(self) -> MemberDescriptor {
        self.0.descriptor()
    }

    #[inline]
    pub(crate) fn info(self) -> &'static MemberInfo {
        self.0
    }
}

impl PartialEq for MemberHandle {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.0, other.0)
    }
}

impl Eq for MemberHandle {}

impl Hash for MemberHandle {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        ptr::hash(self.0, state);
    }
}

impl fmt::Display for MemberHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.0.declaring.name(), self.0.name())
    }
}

impl fmt::Debug for MemberHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemberHandle({self})")
    }
}
