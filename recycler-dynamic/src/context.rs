use alloc::sync::Arc;
use alloc::vec::Vec;

/// Events published by a scroller container to its item drivers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScrollEvent<K> {
    /// Sizes may be stale; items without a valid size (or all of them, when
    /// `force` is set) should schedule a remeasure.
    Update { force: bool },
    /// One specific item must recompute its size.
    Remeasure(K),
}

pub type SubscriptionId = u64;

type Listener<K> = Arc<dyn Fn(&ScrollEvent<K>) + Send + Sync>;

/// Shared state between a scroller container and its item components.
///
/// This replaces implicit cross-component sharing with an explicit object
/// passed by reference: an activity flag (a hidden or frozen container must
/// not be measured) plus a publish/subscribe channel for update and per-item
/// recompute events. Subscriptions are explicit and must be dropped with
/// [`Self::unsubscribe`] when an item driver goes away.
pub struct SharedContext<K> {
    active: bool,
    listeners: Vec<(SubscriptionId, Listener<K>)>,
    next_id: SubscriptionId,
}

impl<K> SharedContext<K> {
    pub fn new() -> Self {
        Self {
            active: true,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn subscribe(
        &mut self,
        listener: impl Fn(&ScrollEvent<K>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Returns `false` when the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn publish(&self, event: &ScrollEvent<K>) {
        for (_, listener) in &self.listeners {
            listener(event);
        }
    }

    pub fn listener_len(&self) -> usize {
        self.listeners.len()
    }
}

impl<K> Default for SharedContext<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> core::fmt::Debug for SharedContext<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedContext")
            .field("active", &self.active)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
