use alloc::sync::Arc;
use std::sync::LazyLock;

use dashmap::DashMap;
use propel_utils::hash::FixedHashState;

use crate::access::AccessError;
use crate::compile::{self, CompiledAccessor};
use crate::info::{MemberHandle, MemberKind};

// -----------------------------------------------------------------------------
// AccessorCache

/// Process-wide memoization of compiled accessors, one entry per member.
///
/// Lazily populated, never evicted. Reads after population are plain sharded
/// map reads; a miss compiles outside any lock and publishes with
/// get-or-insert. Two first-time lookups racing on the same member may both
/// compile, but exactly one object is retained and handed to every racer;
/// the loser's work is dropped without ever being observed. Compilation is
/// cheap and idempotent, so this deliberately trades single-flight
/// strictness for never blocking lookups of unrelated members.
pub(crate) struct AccessorCache {
    map: DashMap<MemberHandle, Arc<CompiledAccessor>, FixedHashState>,
}

impl AccessorCache {
    fn new() -> Self {
        Self {
            map: DashMap::with_hasher(FixedHashState),
        }
    }

    /// Returns the compiled accessor of `member`, compiling it on the first
    /// call.
    pub(crate) fn get(&self, member: MemberHandle) -> Result<Arc<CompiledAccessor>, AccessError> {
        if let Some(hit) = self.map.get(&member) {
            return Ok(Arc::clone(hit.value()));
        }

        let compiled = Arc::new(compile::compile(member)?);
        Ok(Arc::clone(self.map.entry(member).or_insert(compiled).value()))
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, member: MemberHandle) -> bool {
        self.map.contains_key(&member)
    }
}

// -----------------------------------------------------------------------------
// Shared instances

// One cache per member-handle namespace; fields and properties never share
// keys, so the split only narrows contention.
static FIELD_ACCESSORS: LazyLock<AccessorCache> = LazyLock::new(AccessorCache::new);
static PROPERTY_ACCESSORS: LazyLock<AccessorCache> = LazyLock::new(AccessorCache::new);

/// Returns the process-wide cache serving the given member kind.
pub(crate) fn shared(kind: MemberKind) -> &'static AccessorCache {
    match kind {
        MemberKind::Field => &FIELD_ACCESSORS,
        MemberKind::Property => &PROPERTY_ACCESSORS,
    }
}

// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use std::thread;

    use crate::cache;
    use crate::fixtures::{CachePoint, ValueTarget};
    use crate::info::Described;

    #[test]
    fn repeated_lookups_share_one_compiled_object() {
        let member = ValueTarget::member("value").unwrap();
        let cache = cache::shared(member.kind());

        let first = cache.get(member).unwrap();
        let second = cache.get(member).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn concurrent_first_lookups_converge_on_one_accessor() {
        // A member no other test touches, so every thread races the miss.
        let member = CachePoint::member("contended").unwrap();
        let cache = cache::shared(member.kind());

        let accessors: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(move || cache.get(member).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let first = &accessors[0];
        for accessor in &accessors {
            assert!(Arc::ptr_eq(first, accessor));
        }
    }
}
