use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::Any;

use crate::access::{
    AccessError, Accessor, Getter, Manipulator, RefGetter, RefSetter, Setter, TargetManipulator,
    TypedGetter, TypedManipulator, TypedSetter,
};
use crate::compile::{CapabilityTable, CompiledAccessor};
use crate::info::{Category, MemberHandle, SharedProcs};

// -----------------------------------------------------------------------------
// ReferenceInstanceAccessor

/// Accessor of an instance member on a reference-semantics declaring type.
///
/// The target is passed as an ordinary shared reference and the registered
/// procedures alias the live object, so a write through any view of this
/// accessor is visible to every holder of the same instance.
pub(crate) struct ReferenceInstanceAccessor<T: Any, V: Any> {
    member: MemberHandle,
    get: Option<fn(&T) -> V>,
    set: Option<fn(&T, V)>,
}

impl<T: Any, V: Any> ReferenceInstanceAccessor<T, V> {
    fn read(&self, target: &T) -> Result<V, AccessError> {
        let get = self.get.ok_or_else(|| AccessError::not_readable(self.member))?;
        Ok(get(target))
    }

    fn write(&self, target: &T, value: V) -> Result<(), AccessError> {
        let set = self.set.ok_or_else(|| AccessError::not_writable(self.member))?;
        set(target, value);
        Ok(())
    }

    fn downcast_target<'t>(&self, target: &'t dyn Any) -> Result<&'t T, AccessError> {
        target
            .downcast_ref::<T>()
            .ok_or_else(|| AccessError::erased_target(self.member))
    }
}

impl<T: Any, V: Any> Accessor for ReferenceInstanceAccessor<T, V> {
    #[inline]
    fn member(&self) -> MemberHandle {
        self.member
    }
}

impl<T: Any, V: Any> Getter for ReferenceInstanceAccessor<T, V> {
    fn get(&self, target: &dyn Any) -> Result<Box<dyn Any>, AccessError> {
        let target = self.downcast_target(target)?;
        Ok(Box::new(self.read(target)?))
    }
}

impl<T: Any, V: Any> TypedGetter<V> for ReferenceInstanceAccessor<T, V> {
    fn get_typed(&self, target: &dyn Any) -> Result<V, AccessError> {
        let target = self.downcast_target(target)?;
        self.read(target)
    }
}

impl<T: Any, V: Any> RefGetter<T> for ReferenceInstanceAccessor<T, V> {
    fn get_from(&self, target: &T) -> Result<Box<dyn Any>, AccessError> {
        Ok(Box::new(self.read(target)?))
    }
}

impl<T: Any, V: Any> Setter for ReferenceInstanceAccessor<T, V> {
    fn set(&self, target: &dyn Any, value: Box<dyn Any>) -> Result<(), AccessError> {
        let target = self.downcast_target(target)?;
        let value = value
            .downcast::<V>()
            .map_err(|_| AccessError::erased_value(self.member))?;
        self.write(target, *value)
    }
}

impl<T: Any, V: Any> TypedSetter<V> for ReferenceInstanceAccessor<T, V> {
    fn set_typed(&self, target: &dyn Any, value: V) -> Result<(), AccessError> {
        let target = self.downcast_target(target)?;
        self.write(target, value)
    }
}

impl<T: Any, V: Any> RefSetter<T> for ReferenceInstanceAccessor<T, V> {
    fn set_in(&self, target: &mut T, value: Box<dyn Any>) -> Result<(), AccessError> {
        let value = value
            .downcast::<V>()
            .map_err(|_| AccessError::erased_value(self.member))?;
        self.write(target, *value)
    }
}

impl<T: Any, V: Any> Manipulator for ReferenceInstanceAccessor<T, V> {
    #[inline]
    fn can_read(&self) -> bool {
        self.get.is_some()
    }

    #[inline]
    fn can_write(&self) -> bool {
        self.set.is_some()
    }
}

impl<T: Any, V: Any> TargetManipulator<T, V> for ReferenceInstanceAccessor<T, V> {
    fn get_on(&self, target: &T) -> Result<V, AccessError> {
        self.read(target)
    }

    fn set_on(&self, target: &T, value: V) -> Result<(), AccessError> {
        self.write(target, value)
    }

    fn set_mut(&self, target: &mut T, value: V) -> Result<(), AccessError> {
        self.write(target, value)
    }
}

// -----------------------------------------------------------------------------
// Strategy entry point

/// Compiles an instance member of a reference-semantics declaring type. The
/// capability table carries the full lattice; every write shape aliases the
/// live object.
pub(crate) fn compile<T: Any, V: Any>(
    member: MemberHandle,
) -> Result<CompiledAccessor, AccessError> {
    if member.descriptor().category() != Category::ReferenceInstance {
        return Err(AccessError::UnsupportedMemberKind { member });
    }
    let procs = member
        .info()
        .procedures()
        .downcast_ref::<SharedProcs<T, V>>()
        .copied()
        .ok_or(AccessError::UnsupportedMemberKind { member })?;

    let accessor = Arc::new(ReferenceInstanceAccessor {
        member,
        get: procs.get,
        set: procs.set,
    });

    let mut caps = CapabilityTable::new();
    caps.insert::<Arc<dyn TypedManipulator<V>>>(accessor.clone());
    caps.insert::<Arc<dyn RefGetter<T>>>(accessor.clone());
    caps.insert::<Arc<dyn RefSetter<T>>>(accessor.clone());
    caps.insert::<Arc<dyn TargetManipulator<T, V>>>(accessor.clone());

    Ok(CompiledAccessor::new(member, accessor, caps))
}

// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::{String, ToString};

    use crate::fixtures::ReferenceTarget;
    use crate::info::Described;

    #[test]
    fn erased_write_is_visible_through_every_alias() {
        let member = ReferenceTarget::member("value").unwrap();
        let setter = member.setter().unwrap();
        let getter = member.getter().unwrap();

        let target = ReferenceTarget::new(0, "a");
        let alias = &target;

        setter.set(&target, Box::new(42_i32)).unwrap();
        assert_eq!(alias.value(), 42);
        assert_eq!(*getter.get(alias).unwrap().downcast::<i32>().unwrap(), 42);
    }

    #[test]
    fn typed_shared_write_aliases_the_live_object() {
        let member = ReferenceTarget::member("label").unwrap();
        let manipulator = member
            .manipulator_for::<ReferenceTarget, String>()
            .unwrap();

        let target = ReferenceTarget::new(0, "before");
        manipulator.set_on(&target, "after".to_string()).unwrap();
        assert_eq!(manipulator.get_on(&target).unwrap(), "after");
    }

    #[test]
    fn in_place_write_works_too() {
        let member = ReferenceTarget::member("value").unwrap();
        let setter = member.ref_setter::<ReferenceTarget>().unwrap();

        let mut target = ReferenceTarget::new(1, "x");
        setter.set_in(&mut target, Box::new(8_i32)).unwrap();
        assert_eq!(target.value(), 8);
    }
}
