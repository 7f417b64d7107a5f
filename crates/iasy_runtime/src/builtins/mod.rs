pub(super) mod common;
pub(super) mod control;
pub(super) mod iter;
pub(super) mod object;
pub(super) mod predicates;
pub(super) mod raw;

pub use control::*;
pub use iter::*;
pub use object::*;
pub use predicates::*;
pub use raw::*;
