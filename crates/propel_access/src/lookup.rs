//! The typed lookup surface: inherent methods on
//! [`MemberHandle`](crate::info::MemberHandle).
//!
//! Every lookup validates the requested capability and types against the
//! member's descriptor *before* consulting the cache: a failed request
//! compiles nothing and returns nothing but the error. On success the
//! returned view shares the one compiled accessor the caches retain for the
//! member.

use alloc::sync::Arc;
use core::any::{Any, type_name};

use crate::access::{
    AccessError, Getter, Manipulator, RefGetter, RefSetter, Setter, TargetManipulator,
    TypedGetter, TypedManipulator, TypedSetter,
};
use crate::cache;
use crate::compile::CompiledAccessor;
use crate::info::{MemberDescriptor, MemberHandle};

impl MemberHandle {
    // -- type-erased ----------------------------------------------------------

    /// Returns the type-erased getter of this member.
    ///
    /// Fails with [`AccessError::NotReadable`] if the member has no get
    /// procedure.
    pub fn getter(self) -> Result<Arc<dyn Getter>, AccessError> {
        if !self.descriptor().can_read() {
            return Err(AccessError::not_readable(self));
        }
        Ok(self.compiled()?.getter())
    }

    /// Returns the type-erased setter of this member.
    ///
    /// Fails with [`AccessError::NotWritable`] if the member has no set
    /// procedure.
    pub fn setter(self) -> Result<Arc<dyn Setter>, AccessError> {
        if !self.descriptor().can_write() {
            return Err(AccessError::not_writable(self));
        }
        Ok(self.compiled()?.setter())
    }

    /// Returns the type-erased manipulator of this member.
    ///
    /// Never fails on capability: the manipulator exposes `can_read` /
    /// `can_write` flags and its calls fail individually.
    pub fn manipulator(self) -> Result<Arc<dyn Manipulator>, AccessError> {
        Ok(self.compiled()?.manipulator())
    }

    // -- value-typed ----------------------------------------------------------

    /// Returns the getter of this member with its value typed as `V`.
    ///
    /// `V` must be exactly the member's value type.
    pub fn getter_of<V: Any>(self) -> Result<Arc<dyn TypedGetter<V>>, AccessError> {
        let desc = self.descriptor();
        if !desc.can_read() {
            return Err(AccessError::not_readable(self));
        }
        self.expect_value::<V>(desc)?;
        let manipulator: Arc<dyn TypedManipulator<V>> = self.capability()?;
        Ok(manipulator)
    }

    /// Returns the setter of this member with its value typed as `V`.
    ///
    /// `V` must be exactly the member's value type.
    pub fn setter_of<V: Any>(self) -> Result<Arc<dyn TypedSetter<V>>, AccessError> {
        let desc = self.descriptor();
        if !desc.can_write() {
            return Err(AccessError::not_writable(self));
        }
        self.expect_value::<V>(desc)?;
        let manipulator: Arc<dyn TypedManipulator<V>> = self.capability()?;
        Ok(manipulator)
    }

    /// Returns the manipulator of this member with its value typed as `V`.
    ///
    /// `V` must be exactly the member's value type; readability and
    /// writability stay runtime flags on the result.
    pub fn manipulator_of<V: Any>(self) -> Result<Arc<dyn TypedManipulator<V>>, AccessError> {
        self.expect_value::<V>(self.descriptor())?;
        self.capability()
    }

    // -- target-typed ---------------------------------------------------------

    /// Returns the by-reference getter of this instance member, with the
    /// target typed as `T`.
    pub fn ref_getter<T: Any>(self) -> Result<Arc<dyn RefGetter<T>>, AccessError> {
        let desc = self.descriptor();
        if !desc.can_read() {
            return Err(AccessError::not_readable(self));
        }
        self.expect_target::<T>(desc)?;
        self.capability()
    }

    /// Returns the by-reference setter of this instance member, with the
    /// target typed as `T`.
    ///
    /// For a value-semantics declaring type this is the only writing path
    /// that reaches a live instance.
    pub fn ref_setter<T: Any>(self) -> Result<Arc<dyn RefSetter<T>>, AccessError> {
        let desc = self.descriptor();
        if !desc.can_write() {
            return Err(AccessError::not_writable(self));
        }
        self.expect_target::<T>(desc)?;
        self.capability()
    }

    /// Returns the fully typed manipulator of this instance member.
    ///
    /// `T` and `V` must be exactly the member's declaring and value types.
    pub fn manipulator_for<T: Any, V: Any>(
        self,
    ) -> Result<Arc<dyn TargetManipulator<T, V>>, AccessError> {
        let desc = self.descriptor();
        self.expect_target::<T>(desc)?;
        self.expect_value::<V>(desc)?;
        self.capability()
    }

    // -- internal -------------------------------------------------------------

    fn compiled(self) -> Result<Arc<CompiledAccessor>, AccessError> {
        cache::shared(self.kind()).get(self)
    }

    fn capability<C: Any + Clone>(self) -> Result<C, AccessError> {
        // Validation has already pinned the member's category and types;
        // a missing entry means the registered metadata is malformed.
        self.compiled()?
            .capability::<C>()
            .ok_or(AccessError::UnsupportedMemberKind { member: self })
    }

    fn expect_value<V: Any>(self, desc: MemberDescriptor) -> Result<(), AccessError> {
        if desc.value_is::<V>() {
            Ok(())
        } else {
            Err(AccessError::value_mismatch(self, type_name::<V>()))
        }
    }

    fn expect_target<T: Any>(self, desc: MemberDescriptor) -> Result<(), AccessError> {
        if desc.is_static() {
            return Err(AccessError::StaticTarget { member: self });
        }
        if desc.declaring_is::<T>() {
            Ok(())
        } else {
            Err(AccessError::target_mismatch(self, type_name::<T>()))
        }
    }
}

// -----------------------------------------------------------------------------
