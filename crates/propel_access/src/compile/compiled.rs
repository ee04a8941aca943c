use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::Any;
use core::fmt;

use propel_utils::TypeIdMap;

use crate::access::{Getter, Manipulator, Setter};
use crate::info::MemberHandle;

// -----------------------------------------------------------------------------
// CapabilityTable

/// The typed views of one compiled accessor, keyed by view type.
///
/// Every entry is an `Arc<dyn ...>` coercion of the same concrete accessor,
/// inserted once at compile time; a capability query is a map fetch plus a
/// downcast of the stored `Arc`, never a per-call cast.
pub(crate) struct CapabilityTable(TypeIdMap<Box<dyn Any + Send + Sync>>);

impl CapabilityTable {
    #[inline]
    pub(crate) fn new() -> Self {
        Self(TypeIdMap::new())
    }

    /// Stores the view `C`. One entry per view type; strategies only insert
    /// distinct views.
    pub(crate) fn insert<C: Any + Send + Sync>(&mut self, view: C) {
        self.0.insert_type::<C>(Box::new(view));
    }

    /// Fetches a clone of the stored view `C`, if this accessor has it.
    pub(crate) fn get<C: Any + Clone>(&self) -> Option<C> {
        self.0
            .get_type::<C>()
            .and_then(|view| view.downcast_ref::<C>())
            .cloned()
    }
}

// -----------------------------------------------------------------------------
// CompiledAccessor

/// The compiled access object of one member.
///
/// Holds the type-erased manipulator and the capability table of typed
/// views over the same underlying accessor. Immutable after construction;
/// the cache publishes at most one per member and never evicts, so every
/// caller shares this object for the life of the process.
pub(crate) struct CompiledAccessor {
    member: MemberHandle,
    erased: Arc<dyn Manipulator>,
    caps: CapabilityTable,
}

impl CompiledAccessor {
    pub(crate) fn new(
        member: MemberHandle,
        erased: Arc<dyn Manipulator>,
        caps: CapabilityTable,
    ) -> Self {
        Self {
            member,
            erased,
            caps,
        }
    }

    /// Returns the type-erased manipulator view.
    #[inline]
    pub(crate) fn manipulator(&self) -> Arc<dyn Manipulator> {
        Arc::clone(&self.erased)
    }

    /// Returns the type-erased getter view.
    #[inline]
    pub(crate) fn getter(&self) -> Arc<dyn Getter> {
        self.erased.clone()
    }

    /// Returns the type-erased setter view.
    #[inline]
    pub(crate) fn setter(&self) -> Arc<dyn Setter> {
        self.erased.clone()
    }

    /// Fetches the typed view `C`, if this accessor's category has it.
    #[inline]
    pub(crate) fn capability<C: Any + Clone>(&self) -> Option<C> {
        self.caps.get::<C>()
    }
}

impl fmt::Debug for CompiledAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompiledAccessor({})", self.member)
    }
}
