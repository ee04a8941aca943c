use core::{error, fmt};

use crate::info::MemberHandle;

// -----------------------------------------------------------------------------
// TypeRole

/// Which side of a typed request failed to match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeRole {
    /// The declaring (target) type of the member.
    Target,
    /// The value type of the member.
    Value,
}

impl fmt::Display for TypeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Target => f.write_str("target"),
            Self::Value => f.write_str("value"),
        }
    }
}

// -----------------------------------------------------------------------------
// AccessError

/// Name used when a mismatching argument arrived through a type-erased path
/// and its concrete type cannot be recovered for the message.
const ERASED: &str = "<type-erased>";

/// Every failure a lookup or a compiled accessor call can produce.
///
/// All variants surface synchronously to the caller; nothing is retried and
/// nothing is logged. A failed lookup never returns a partially valid
/// accessor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessError {
    /// The member has no get procedure.
    NotReadable { member: MemberHandle },
    /// The member has no set procedure.
    NotWritable { member: MemberHandle },
    /// A requested or supplied type does not match the member's actual
    /// target or value type.
    TypeMismatch {
        member: MemberHandle,
        role: TypeRole,
        expected: &'static str,
        requested: &'static str,
    },
    /// A target-typed capability was requested for a static member, which
    /// has no instance target.
    StaticTarget { member: MemberHandle },
    /// The member's registered procedures match no modeled accessor shape.
    UnsupportedMemberKind { member: MemberHandle },
    /// A write was attempted through a path that can only reach a copy of a
    /// value-semantics target. Succeeding would mutate a discarded copy, so
    /// this is always refused; use the by-reference setter.
    BoxedValueWrite { member: MemberHandle },
}

impl AccessError {
    #[inline]
    pub(crate) fn not_readable(member: MemberHandle) -> Self {
        Self::NotReadable { member }
    }

    #[inline]
    pub(crate) fn not_writable(member: MemberHandle) -> Self {
        Self::NotWritable { member }
    }

    pub(crate) fn target_mismatch(member: MemberHandle, requested: &'static str) -> Self {
        Self::TypeMismatch {
            member,
            role: TypeRole::Target,
            expected: member.descriptor().declaring().name(),
            requested,
        }
    }

    pub(crate) fn value_mismatch(member: MemberHandle, requested: &'static str) -> Self {
        Self::TypeMismatch {
            member,
            role: TypeRole::Value,
            expected: member.descriptor().value().name(),
            requested,
        }
    }

    /// Target downcast failed on a type-erased call path.
    #[inline]
    pub(crate) fn erased_target(member: MemberHandle) -> Self {
        Self::target_mismatch(member, ERASED)
    }

    /// Value downcast failed on a type-erased call path.
    #[inline]
    pub(crate) fn erased_value(member: MemberHandle) -> Self {
        Self::value_mismatch(member, ERASED)
    }

    /// Returns the handle of the member the error refers to.
    pub fn member(&self) -> MemberHandle {
        match self {
            Self::NotReadable { member }
            | Self::NotWritable { member }
            | Self::TypeMismatch { member, .. }
            | Self::StaticTarget { member }
            | Self::UnsupportedMemberKind { member }
            | Self::BoxedValueWrite { member } => *member,
        }
    }
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReadable { member } => {
                write!(f, "{} `{member}` is not readable", member.kind())
            }
            Self::NotWritable { member } => {
                write!(f, "{} `{member}` is not writable", member.kind())
            }
            Self::TypeMismatch {
                member,
                role,
                expected,
                requested,
            } => {
                write!(
                    f,
                    "{role} type `{requested}` does not match `{expected}` of member `{member}`"
                )
            }
            Self::StaticTarget { member } => {
                write!(
                    f,
                    "member `{member}` is static and has no instance target"
                )
            }
            Self::UnsupportedMemberKind { member } => {
                write!(
                    f,
                    "member `{member}` has a shape this accessor system does not model"
                )
            }
            Self::BoxedValueWrite { member } => {
                write!(
                    f,
                    "cannot write member `{member}` through a path that only reaches \
                     a copy of the value-semantics target; use the by-reference setter"
                )
            }
        }
    }
}

impl error::Error for AccessError {}

// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::access::AccessError;
    use crate::fixtures::ValueTarget;
    use crate::info::Described;

    #[test]
    fn messages_name_the_member() {
        let member = ValueTarget::member("value").unwrap();

        let text = AccessError::not_readable(member).to_string();
        assert!(text.contains("value"), "{text}");
        assert!(text.contains("not readable"), "{text}");

        let text = AccessError::value_mismatch(member, "alloc::string::String").to_string();
        assert!(text.contains("alloc::string::String"), "{text}");
        assert!(text.contains("i32"), "{text}");
    }
}
