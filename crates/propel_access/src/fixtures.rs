//! Shared fixtures for the crate's tests: one described type per category
//! plus probes for cache and invocation observations.

use alloc::string::{String, ToString};
use core::cell::{Cell, RefCell};
use core::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::OnceLock;

use crate::info::{Described, TypeDesc};

// -----------------------------------------------------------------------------
// ReferenceTarget

/// A handle-like type: all mutation goes through `&self`, so every alias of
/// an instance observes a write.
pub(crate) struct ReferenceTarget {
    value: Cell<i32>,
    label: RefCell<String>,
}

impl ReferenceTarget {
    pub(crate) fn new(value: i32, label: &str) -> Self {
        Self {
            value: Cell::new(value),
            label: RefCell::new(label.to_string()),
        }
    }

    pub(crate) fn value(&self) -> i32 {
        self.value.get()
    }

    pub(crate) fn set_value(&self, value: i32) {
        self.value.set(value);
    }

    pub(crate) fn label(&self) -> String {
        self.label.borrow().clone()
    }

    pub(crate) fn set_label(&self, label: String) {
        *self.label.borrow_mut() = label;
    }
}

static REFERENCE_STATIC_VALUE: AtomicI32 = AtomicI32::new(0);

impl Described for ReferenceTarget {
    fn type_desc() -> &'static TypeDesc {
        static CELL: OnceLock<TypeDesc> = OnceLock::new();
        CELL.get_or_init(|| {
            TypeDesc::of_reference::<Self>()
                .property(
                    "value",
                    Some(|t: &Self| t.value()),
                    Some(|t: &Self, v| t.set_value(v)),
                )
                .property("label", Some(|t: &Self| t.label()), Some(Self::set_label))
                .static_property(
                    "static_value",
                    Some(|| REFERENCE_STATIC_VALUE.load(Ordering::SeqCst)),
                    Some(|v| REFERENCE_STATIC_VALUE.store(v, Ordering::SeqCst)),
                )
                .build()
        })
    }
}

// -----------------------------------------------------------------------------
// ValueTarget

/// A plain struct; live instances are only mutable through `&mut`.
pub(crate) struct ValueTarget {
    pub(crate) value: i32,
    pub(crate) name: String,
    pub(crate) id: u64,
}

impl ValueTarget {
    pub(crate) fn new(value: i32, name: &str) -> Self {
        Self {
            value,
            name: name.to_string(),
            id: 7,
        }
    }
}

impl Described for ValueTarget {
    fn type_desc() -> &'static TypeDesc {
        static CELL: OnceLock<TypeDesc> = OnceLock::new();
        CELL.get_or_init(|| {
            TypeDesc::of_value::<Self>()
                .field("value", |t: &Self| t.value, Some(|t: &mut Self, v| t.value = v))
                .field(
                    "name",
                    |t: &Self| t.name.clone(),
                    Some(|t: &mut Self, v| t.name = v),
                )
                .field("id", |t: &Self| t.id, None)
                .property("secret", None, Some(|t: &mut Self, v: i32| t.value = v))
                .build()
        })
    }
}

// -----------------------------------------------------------------------------
// Probe

static PROBE_READS: AtomicUsize = AtomicUsize::new(0);

/// Returns how many times any `Probe` getter has run.
pub(crate) fn probe_reads(order: Ordering) -> usize {
    PROBE_READS.load(order)
}

/// Counts getter invocations, to prove that failed lookups never call the
/// registered procedures.
pub(crate) struct Probe {
    pub(crate) value: i32,
}

impl Described for Probe {
    fn type_desc() -> &'static TypeDesc {
        static CELL: OnceLock<TypeDesc> = OnceLock::new();
        CELL.get_or_init(|| {
            TypeDesc::of_value::<Self>()
                .field(
                    "value",
                    |t: &Self| {
                        PROBE_READS.fetch_add(1, Ordering::SeqCst);
                        t.value
                    },
                    Some(|t: &mut Self, v| t.value = v),
                )
                .field("untouched", |t: &Self| t.value, None)
                .build()
        })
    }
}

// -----------------------------------------------------------------------------
// CachePoint

/// Reserved for the cache race test; nothing else may look its member up.
pub(crate) struct CachePoint {
    pub(crate) contended: i32,
}

impl Described for CachePoint {
    fn type_desc() -> &'static TypeDesc {
        static CELL: OnceLock<TypeDesc> = OnceLock::new();
        CELL.get_or_init(|| {
            TypeDesc::of_value::<Self>()
                .field(
                    "contended",
                    |t: &Self| t.contended,
                    Some(|t: &mut Self, v| t.contended = v),
                )
                .build()
        })
    }
}
