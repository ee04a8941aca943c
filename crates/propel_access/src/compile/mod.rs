//! The accessor compiler: three specialization strategies and the compiled
//! per-member object.
//!
//! Which strategy serves a member follows from its
//! [`Category`](crate::info::Category): static members compile with no
//! target parameter, members of value-semantics types compile with a
//! by-reference target, everything else with an aliased target. The
//! monomorphic entry point for a member is bound at declaration, where its
//! target and value types are statically known; each strategy re-asserts on
//! the miss path that the member's category and registered procedure shape
//! are the ones it serves.

mod compiled;

pub(crate) mod reference_instance;
pub(crate) mod static_member;
pub(crate) mod value_instance;

pub(crate) use compiled::{CapabilityTable, CompiledAccessor};

use crate::access::AccessError;
use crate::info::MemberHandle;

/// Compiles the accessor for one member. Called once per cache miss;
/// redundant racing calls are harmless (the cache retains one result).
#[inline]
pub(crate) fn compile(member: MemberHandle) -> Result<CompiledAccessor, AccessError> {
    (member.info().compile_fn())(member)
}
