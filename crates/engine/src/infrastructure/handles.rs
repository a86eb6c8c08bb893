//! Lockable handles to shared world objects.
//!
//! Every mutable object that more than one session can touch lives behind its
//! own lock. Locks are taken right before a mutation and dropped right after;
//! there is no world-wide lock.

use std::fmt;
use std::sync::{Arc, Weak};

use homestead_domain::ObjectId;
use tokio::sync::{Mutex, MutexGuard};

/// Strong, lockable handle to a world object. The id is readable without locking.
pub struct Shared<T> {
    id: ObjectId,
    inner: Arc<Mutex<T>>,
}

impl<T> Shared<T> {
    pub fn new(id: ObjectId, value: T) -> Self {
        Self {
            id,
            inner: Arc::new(Mutex::new(value)),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub async fn lock(&self) -> MutexGuard<'_, T> {
        self.inner.lock().await
    }

    pub fn downgrade(&self) -> WeakShared<T> {
        WeakShared {
            id: self.id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    pub fn ptr_eq(&self, other: &Shared<T>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shared").field("id", &self.id).finish()
    }
}

/// Non-owning handle; resolves only while some owner keeps the object alive.
pub struct WeakShared<T> {
    id: ObjectId,
    inner: Weak<Mutex<T>>,
}

impl<T> WeakShared<T> {
    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn upgrade(&self) -> Option<Shared<T>> {
        self.inner.upgrade().map(|inner| Shared { id: self.id, inner })
    }
}

impl<T> Clone for WeakShared<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for WeakShared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakShared").field("id", &self.id).finish()
    }
}

/// Locks two objects together, always in ascending id order so that two tasks
/// locking the same pair can never wait on each other.
pub async fn lock_both<'a, A, B>(
    a: &'a Shared<A>,
    b: &'a Shared<B>,
) -> (MutexGuard<'a, A>, MutexGuard<'a, B>) {
    if a.id() <= b.id() {
        let guard_a = a.lock().await;
        let guard_b = b.lock().await;
        (guard_a, guard_b)
    } else {
        let guard_b = b.lock().await;
        let guard_a = a.lock().await;
        (guard_a, guard_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use uuid::Uuid;

    #[tokio::test]
    async fn weak_handle_stops_resolving_after_last_owner_drops() {
        let shared = Shared::new(ObjectId::new(), 7_u32);
        let weak = shared.downgrade();
        assert_eq!(weak.id(), shared.id());
        assert!(weak.upgrade().is_some());

        drop(shared);
        assert!(weak.upgrade().is_none());
    }

    #[tokio::test]
    async fn clones_share_the_same_value() {
        let shared = Shared::new(ObjectId::new(), String::from("a"));
        let clone = shared.clone();
        clone.lock().await.push('b');
        assert_eq!(shared.lock().await.as_str(), "ab");
        assert!(shared.ptr_eq(&clone));
    }

    #[tokio::test]
    async fn opposite_lock_orders_do_not_deadlock() {
        let low = Shared::new(ObjectId::from_uuid(Uuid::from_u128(1)), 0_u32);
        let high = Shared::new(ObjectId::from_uuid(Uuid::from_u128(2)), 0_u32);

        let mut tasks = Vec::new();
        for i in 0..50 {
            let low = low.clone();
            let high = high.clone();
            tasks.push(tokio::spawn(async move {
                if i % 2 == 0 {
                    let (mut a, mut b) = lock_both(&low, &high).await;
                    *a += 1;
                    tokio::task::yield_now().await;
                    *b += 1;
                } else {
                    let (mut b, mut a) = lock_both(&high, &low).await;
                    *b += 1;
                    tokio::task::yield_now().await;
                    *a += 1;
                }
            }));
        }

        let all = futures_util::future::join_all(tasks);
        let results = tokio::time::timeout(Duration::from_secs(5), all)
            .await
            .expect("lock_both deadlocked");
        assert!(results.iter().all(|r| r.is_ok()));
        assert_eq!(*low.lock().await, 50);
        assert_eq!(*high.lock().await, 50);
    }
}
