pub use fixed_map::Key as Term;
pub use fixed_map::Key;
use fixed_map::Map as FixedMap;

use crate::shape::MembershipFunction;

/// The labeled membership shapes of one linguistic variable, keyed by the
/// variable's term enum.
#[derive(Default)]
pub struct Terms<K: Term>(pub(crate) FixedMap<K, MembershipFunction>);

impl<K: Term> Terms<K> {
    pub fn new() -> Self {
        Self(FixedMap::new())
    }

    pub fn insert(&mut self, key: K, shape: MembershipFunction) {
        self.0.insert(key, shape);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
