#![allow(missing_docs)]

use injector::{Container, Injectable, Shared};

trait Store: Send + Sync {
    fn capacity(&self) -> usize;
}

trait Named: Send + Sync {
    fn name(&self) -> &str;
}

#[derive(Clone, Default, Injectable)]
#[provides(dyn Store, dyn Named)]
struct MemoryStore {
    #[inject("capacity")]
    capacity: usize,
}

impl Store for MemoryStore {
    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Named for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }
}

fn main() {
    let mut container = Container::new();
    container.register_named("capacity", 16_usize);
    container.register_named("store", Shared::new(MemoryStore::default()));

    let store: Shared<dyn Store> = container.resolve();
    let named: Shared<dyn Named> = container.get("store");

    assert_eq!(store.read().capacity(), 16);
    assert_eq!(named.read().name(), "memory");
}
