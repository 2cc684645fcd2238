//! Shared, replaceable policy table.

use parking_lot::RwLock;
use shared_types::{Event, SecurityPolicy};
use std::sync::Arc;

/// Cloneable handle to the monitor's allow-list.
///
/// Clones share one table, so a replacement made through any handle is seen
/// by the running monitor on its next event.
#[derive(Debug, Clone, Default)]
pub struct PolicyStore {
    policies: Arc<RwLock<Vec<SecurityPolicy>>>,
}

impl PolicyStore {
    pub fn new(policies: Vec<SecurityPolicy>) -> Self {
        Self {
            policies: Arc::new(RwLock::new(policies)),
        }
    }

    /// Swaps the whole table. Returns the previous one.
    pub fn replace(&self, policies: Vec<SecurityPolicy>) -> Vec<SecurityPolicy> {
        std::mem::replace(&mut *self.policies.write(), policies)
    }

    pub fn snapshot(&self) -> Vec<SecurityPolicy> {
        self.policies.read().clone()
    }

    pub fn len(&self) -> usize {
        self.policies.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.read().is_empty()
    }

    /// Membership test; order and duplicates are irrelevant.
    pub fn permits(&self, event: &Event) -> bool {
        self.policies.read().iter().any(|p| p.permits(event))
    }
}
