//! Hash containers, re-exporting *hashbrown* and *foldhash*.

use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

// Arbitrary, but must never change between runs of the same binary.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0xC3A5_9D41_7B06_E2F8);

/// Hasher produced by [`FixedHashState`], a type alias for
/// [`foldhash::fast::FoldHasher`].
pub type FixedHasher = FoldHasher<'static>;

/// Build-hasher state with a fixed seed, so hash results depend only on the
/// input.
///
/// # Examples
///
/// ```
/// use core::hash::{BuildHasher, Hash, Hasher};
/// use propel_utils::hash::FixedHashState;
///
/// let mut hasher = FixedHashState.build_hasher();
/// 3.hash(&mut hasher);
/// let _stable = hasher.finish();
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// NoOpHasher

/// Pass-through hasher for keys that already carry hash-quality entropy,
/// such as `TypeId`.
///
/// `write_u64` stores the value directly. The generic `write` folds bytes in
/// reverse order with a rotate so that a single `write_u32(n)` and
/// `write_u64(n)` agree.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(*byte as u64);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// Build-hasher state for [`NoOpHasher`].
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}

// -----------------------------------------------------------------------------
// Container aliases

/// [`hashbrown::HashMap`] with [`FixedHashState`] as the default hasher.
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

/// [`hashbrown::HashSet`] with [`FixedHashState`] as the default hasher.
pub type HashSet<T, S = FixedHashState> = hashbrown::HashSet<T, S>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;

// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use core::hash::{BuildHasher, Hash, Hasher};

    use super::{FixedHashState, NoOpHashState};

    #[test]
    fn fixed_state_is_stable() {
        let a = FixedHashState.build_hasher_one(|h| 17_u64.hash(h));
        let b = FixedHashState.build_hasher_one(|h| 17_u64.hash(h));
        assert_eq!(a, b);
    }

    #[test]
    fn noop_passes_u64_through() {
        let mut hasher = NoOpHashState.build_hasher();
        hasher.write_u64(42);
        assert_eq!(hasher.finish(), 42);
    }

    trait BuildHasherExt: BuildHasher {
        fn build_hasher_one(&self, f: impl FnOnce(&mut Self::Hasher)) -> u64 {
            let mut hasher = self.build_hasher();
            f(&mut hasher);
            hasher.finish()
        }
    }

    impl<S: BuildHasher> BuildHasherExt for S {}
}
