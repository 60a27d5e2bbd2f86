use med_reminder_domain::Entity;
use std::sync::{Mutex, MutexGuard};

/// Useful functions for creating inmemory repositories

fn lock<T>(collection: &Mutex<Vec<T>>) -> MutexGuard<'_, Vec<T>> {
    // A panicking writer cannot leave a `Vec` half pushed, so the data is
    // still usable after poisoning
    collection
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    lock(collection).push(val.clone());
}

pub fn find<K: PartialEq, T: Clone + Entity<K>>(
    val_id: &K,
    collection: &Mutex<Vec<T>>,
) -> Option<T> {
    lock(collection)
        .iter()
        .find(|item| item.id() == *val_id)
        .cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    mut compare: F,
) -> Vec<T> {
    lock(collection)
        .iter()
        .filter(|item| compare(item))
        .cloned()
        .collect()
}

pub fn delete<K: PartialEq, T: Clone + Entity<K>>(
    val_id: &K,
    collection: &Mutex<Vec<T>>,
) -> Option<T> {
    let mut collection = lock(collection);
    let index = collection.iter().position(|item| item.id() == *val_id)?;
    Some(collection.remove(index))
}

/// Runs `f` with exclusive access to the collection, useful when a check and
/// a write must happen atomically
pub fn with_collection<T, R, F: FnOnce(&mut Vec<T>) -> R>(
    collection: &Mutex<Vec<T>>,
    f: F,
) -> R {
    f(&mut lock(collection))
}
