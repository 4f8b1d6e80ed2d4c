//! Built-in lints for descriptor validation.

mod duplicate_property;
mod duplicate_target;
mod empty_transfer;
mod invalid_name;
mod member_conflict;

pub use duplicate_property::DuplicatePropertyLint;
pub use duplicate_target::DuplicateTargetLint;
pub use empty_transfer::EmptyTransferLint;
pub use invalid_name::InvalidTargetNameLint;
pub use member_conflict::MemberConflictLint;
