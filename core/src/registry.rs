use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::block::{BlockId, BlockLike};
use crate::geometry::{collides, CollisionMode};

/// Every id that takes part in at least one colliding pair, sorted ascending.
pub fn detect_all<B: BlockLike>(blocks: &[B], mode: CollisionMode) -> Vec<BlockId> {
    let mut hits = BTreeSet::new();
    for (i, a) in blocks.iter().enumerate() {
        for b in &blocks[i + 1..] {
            if collides(a, b, mode) {
                hits.insert(a.id());
                hits.insert(b.id());
            }
        }
    }
    hits.into_iter().collect()
}

pub type CollisionSubscriber = Rc<dyn Fn(&[BlockId])>;

/// Caller-owned set of colliding ids. Hosts create one and hand it to every
/// board that should share it.
pub struct CollisionRegistry {
    ids: RefCell<Vec<BlockId>>,
    subscribers: Rc<RefCell<Vec<CollisionSubscriber>>>,
}

pub type SharedCollisionRegistry = Rc<CollisionRegistry>;

impl CollisionRegistry {
    pub fn new() -> Self {
        Self {
            ids: RefCell::new(Vec::new()),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn shared() -> SharedCollisionRegistry {
        Rc::new(Self::new())
    }

    pub fn ids(&self) -> Vec<BlockId> {
        self.ids.borrow().clone()
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.ids.borrow().binary_search(&id).is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.borrow().is_empty()
    }

    /// Recomputes the set for `blocks` and publishes it. Returns the new set.
    pub fn recompute<B: BlockLike>(&self, blocks: &[B], mode: CollisionMode) -> Vec<BlockId> {
        let next = detect_all(blocks, mode);
        self.set_ids(next.clone());
        next
    }

    /// Replaces the set. Subscribers only hear about it when the set changed.
    /// Returns whether it changed.
    pub fn set_ids(&self, ids: Vec<BlockId>) -> bool {
        let mut ids = ids;
        ids.sort_unstable();
        ids.dedup();
        {
            let mut current = self.ids.borrow_mut();
            if *current == ids {
                return false;
            }
            *current = ids;
        }
        self.notify();
        true
    }

    pub fn clear(&self) -> bool {
        self.set_ids(Vec::new())
    }

    pub fn subscribe(&self, subscriber: CollisionSubscriber) -> CollisionSubscription {
        self.subscribers.borrow_mut().push(subscriber.clone());
        CollisionSubscription {
            subscriber,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    fn notify(&self) {
        let ids = self.ids.borrow().clone();
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            (subscriber)(&ids);
        }
    }
}

impl Default for CollisionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Unsubscribes on drop.
pub struct CollisionSubscription {
    subscriber: CollisionSubscriber,
    subscribers: Rc<RefCell<Vec<CollisionSubscriber>>>,
}

impl Drop for CollisionSubscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|item| !Rc::ptr_eq(item, &self.subscriber));
    }
}
