use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::Any;

use crate::access::{
    AccessError, Accessor, Getter, Manipulator, Setter, TypedGetter, TypedManipulator, TypedSetter,
};
use crate::compile::{CapabilityTable, CompiledAccessor};
use crate::info::{Category, MemberHandle, StaticProcs};

// -----------------------------------------------------------------------------
// StaticAccessor

/// Accessor of a static member: a single process-wide storage slot, no
/// target. However many accessor views observe the member, they observe the
/// one slot, because the cache retains one compiled object.
pub(crate) struct StaticAccessor<V: Any> {
    member: MemberHandle,
    get: Option<fn() -> V>,
    set: Option<fn(V)>,
}

impl<V: Any> Accessor for StaticAccessor<V> {
    #[inline]
    fn member(&self) -> MemberHandle {
        self.member
    }
}

impl<V: Any> Getter for StaticAccessor<V> {
    fn get(&self, _target: &dyn Any) -> Result<Box<dyn Any>, AccessError> {
        let get = self.get.ok_or_else(|| AccessError::not_readable(self.member))?;
        Ok(Box::new(get()))
    }
}

impl<V: Any> TypedGetter<V> for StaticAccessor<V> {
    fn get_typed(&self, _target: &dyn Any) -> Result<V, AccessError> {
        let get = self.get.ok_or_else(|| AccessError::not_readable(self.member))?;
        Ok(get())
    }
}

impl<V: Any> Setter for StaticAccessor<V> {
    fn set(&self, _target: &dyn Any, value: Box<dyn Any>) -> Result<(), AccessError> {
        let set = self.set.ok_or_else(|| AccessError::not_writable(self.member))?;
        let value = value
            .downcast::<V>()
            .map_err(|_| AccessError::erased_value(self.member))?;
        set(*value);
        Ok(())
    }
}

impl<V: Any> TypedSetter<V> for StaticAccessor<V> {
    fn set_typed(&self, _target: &dyn Any, value: V) -> Result<(), AccessError> {
        let set = self.set.ok_or_else(|| AccessError::not_writable(self.member))?;
        set(value);
        Ok(())
    }
}

impl<V: Any> Manipulator for StaticAccessor<V> {
    #[inline]
    fn can_read(&self) -> bool {
        self.get.is_some()
    }

    #[inline]
    fn can_write(&self) -> bool {
        self.set.is_some()
    }
}

// -----------------------------------------------------------------------------
// Strategy entry point

/// Compiles a static member. The capability table carries the value-typed
/// views only: a static member has no instance target, so no target-typed
/// or by-reference views exist.
pub(crate) fn compile<V: Any>(member: MemberHandle) -> Result<CompiledAccessor, AccessError> {
    if member.descriptor().category() != Category::Static {
        return Err(AccessError::UnsupportedMemberKind { member });
    }
    let procs = member
        .info()
        .procedures()
        .downcast_ref::<StaticProcs<V>>()
        .copied()
        .ok_or(AccessError::UnsupportedMemberKind { member })?;

    let accessor = Arc::new(StaticAccessor {
        member,
        get: procs.get,
        set: procs.set,
    });

    let mut caps = CapabilityTable::new();
    caps.insert::<Arc<dyn TypedManipulator<V>>>(accessor.clone());

    Ok(CompiledAccessor::new(member, accessor, caps))
}
