use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::Any;

use crate::access::{
    AccessError, Accessor, Getter, Manipulator, RefGetter, RefSetter, Setter, TargetManipulator,
    TypedGetter, TypedManipulator, TypedSetter,
};
use crate::compile::{CapabilityTable, CompiledAccessor};
use crate::info::{Category, MemberHandle, ValueProcs};

// -----------------------------------------------------------------------------
// ValueInstanceAccessor

/// Accessor of an instance member on a value-semantics declaring type.
///
/// Live instances are only reachable by reference: reads go through `&T`,
/// writes through `&mut T`. Every write shape that arrives with a shared
/// borrow is refused; through such a borrow the write could only be applied
/// to a copy, and a silently discarded write is worse than an error.
pub(crate) struct ValueInstanceAccessor<T: Any, V: Any> {
    member: MemberHandle,
    get: Option<fn(&T) -> V>,
    set: Option<fn(&mut T, V)>,
}

impl<T: Any, V: Any> ValueInstanceAccessor<T, V> {
    fn read(&self, target: &T) -> Result<V, AccessError> {
        let get = self.get.ok_or_else(|| AccessError::not_readable(self.member))?;
        Ok(get(target))
    }

    fn write(&self, target: &mut T, value: V) -> Result<(), AccessError> {
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

impl<T: Any, V: Any> Accessor for ValueInstanceAccessor<T, V> {
    #[inline]
    fn member(&self) -> MemberHandle {
        self.member
    }
}

impl<T: Any, V: Any> Getter for ValueInstanceAccessor<T, V> {
    fn get(&self, target: &dyn Any) -> Result<Box<dyn Any>, AccessError> {
        let target = self.downcast_target(target)?;
        Ok(Box::new(self.read(target)?))
    }
}

impl<T: Any, V: Any> TypedGetter<V> for ValueInstanceAccessor<T, V> {
    fn get_typed(&self, target: &dyn Any) -> Result<V, AccessError> {
        let target = self.downcast_target(target)?;
        self.read(target)
    }
}

impl<T: Any, V: Any> RefGetter<T> for ValueInstanceAccessor<T, V> {
    fn get_from(&self, target: &T) -> Result<Box<dyn Any>, AccessError> {
        Ok(Box::new(self.read(target)?))
    }
}

impl<T: Any, V: Any> Setter for ValueInstanceAccessor<T, V> {
    fn set(&self, _target: &dyn Any, _value: Box<dyn Any>) -> Result<(), AccessError> {
        Err(AccessError::BoxedValueWrite {
            member: self.member,
        })
    }
}

impl<T: Any, V: Any> TypedSetter<V> for ValueInstanceAccessor<T, V> {
    fn set_typed(&self, _target: &dyn Any, _value: V) -> Result<(), AccessError> {
        Err(AccessError::BoxedValueWrite {
            member: self.member,
        })
    }
}

impl<T: Any, V: Any> RefSetter<T> for ValueInstanceAccessor<T, V> {
    fn set_in(&self, target: &mut T, value: Box<dyn Any>) -> Result<(), AccessError> {
        let value = value
            .downcast::<V>()
            .map_err(|_| AccessError::erased_value(self.member))?;
        self.write(target, *value)
    }
}

impl<T: Any, V: Any> Manipulator for ValueInstanceAccessor<T, V> {
    #[inline]
    fn can_read(&self) -> bool {
        self.get.is_some()
    }

    #[inline]
    fn can_write(&self) -> bool {
        self.set.is_some()
    }
}

impl<T: Any, V: Any> TargetManipulator<T, V> for ValueInstanceAccessor<T, V> {
    fn get_on(&self, target: &T) -> Result<V, AccessError> {
        self.read(target)
    }

    fn set_on(&self, _target: &T, _value: V) -> Result<(), AccessError> {
        Err(AccessError::BoxedValueWrite {
            member: self.member,
        })
    }

    fn set_mut(&self, target: &mut T, value: V) -> Result<(), AccessError> {
        self.write(target, value)
    }
}

// -----------------------------------------------------------------------------
// Strategy entry point

/// Compiles an instance member of a value-semantics declaring type. The
/// capability table carries the full lattice; the write views that take a
/// shared target fail at call time per the boxed-write rule.
pub(crate) fn compile<T: Any, V: Any>(
    member: MemberHandle,
) -> Result<CompiledAccessor, AccessError> {
    if member.descriptor().category() != Category::ValueInstance {
        return Err(AccessError::UnsupportedMemberKind { member });
    }
    let procs = member
        .info()
        .procedures()
        .downcast_ref::<ValueProcs<T, V>>()
        .copied()
        .ok_or(AccessError::UnsupportedMemberKind { member })?;

    let accessor = Arc::new(ValueInstanceAccessor {
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

    use crate::access::AccessError;
    use crate::fixtures::ValueTarget;
    use crate::info::Described;

    #[test]
    fn ref_setter_mutates_the_live_local() {
        let member = ValueTarget::member("value").unwrap();
        let setter = member.ref_setter::<ValueTarget>().unwrap();

        let mut local = ValueTarget::new(0, "x");
        setter.set_in(&mut local, Box::new(5_i32)).unwrap();
        assert_eq!(local.value, 5);
    }

    #[test]
    fn erased_write_is_refused_and_leaves_the_value_untouched() {
        let member = ValueTarget::member("value").unwrap();
        let manipulator = member.manipulator().unwrap();

        let local = ValueTarget::new(3, "x");
        let err = manipulator.set(&local, Box::new(9_i32)).unwrap_err();
        assert_eq!(err, AccessError::BoxedValueWrite { member });
        assert_eq!(local.value, 3);
    }

    #[test]
    fn typed_shared_write_is_refused() {
        let member = ValueTarget::member("value").unwrap();
        let manipulator = member.manipulator_for::<ValueTarget, i32>().unwrap();

        let mut local = ValueTarget::new(0, "x");
        let err = manipulator.set_on(&local, 7).unwrap_err();
        assert_eq!(err, AccessError::BoxedValueWrite { member });

        manipulator.set_mut(&mut local, 7).unwrap();
        assert_eq!(manipulator.get_on(&local).unwrap(), 7);
    }

    #[test]
    fn erased_read_reaches_the_live_value() {
        let member = ValueTarget::member("name").unwrap();
        let getter = member.getter().unwrap();

        let local = ValueTarget::new(1, "live");
        let value = getter.get(&local).unwrap();
        assert_eq!(*value.downcast::<String>().unwrap(), "live".to_string());
    }

    #[test]
    fn wrong_erased_target_fails_with_type_mismatch() {
        let member = ValueTarget::member("value").unwrap();
        let getter = member.getter().unwrap();

        let err = getter.get(&17_u8).unwrap_err();
        assert!(matches!(err, AccessError::TypeMismatch { .. }));
    }

    #[test]
    fn read_only_field_refuses_in_place_writes() {
        let member = ValueTarget::member("id").unwrap();
        let manipulator = member.manipulator_for::<ValueTarget, u64>().unwrap();
        assert!(manipulator.can_read());
        assert!(!manipulator.can_write());

        let mut local = ValueTarget::new(0, "x");
        let err = manipulator.set_mut(&mut local, 1).unwrap_err();
        assert_eq!(err, AccessError::NotWritable { member });
    }
}
