//! Runtime configuration.

/// What `new` does when it is re-entered for a class whose descriptor is
/// still being built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReentrancyPolicy {
    /// Fail the nested call.
    #[default]
    Reject,
    /// Give the nested instance a one-off descriptor that is not cached.
    Uncached,
}

/// Runtime configuration options.
#[derive(Clone, Copy, Debug)]
pub struct RuntimeConfig {
    /// Longest `delegate` chain a lookup follows before giving up.
    pub max_delegate_depth: usize,
    pub reentrant_construction: ReentrancyPolicy,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_delegate_depth: 2000,
            reentrant_construction: ReentrancyPolicy::Reject,
        }
    }
}
