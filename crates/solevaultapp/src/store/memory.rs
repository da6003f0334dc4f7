use super::inventory::InventoryStore;
use super::mem_backend::MemBackend;
use crate::config::DEFAULT_STORAGE_KEY;

pub type InMemoryStore = InventoryStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl InMemoryStore {
    pub fn in_memory() -> Self {
        InventoryStore::new(MemBackend::new(), DEFAULT_STORAGE_KEY)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Sneaker;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::in_memory(),
            }
        }

        /// Adds `count` generic pairs, priced 100, 200, ...
        pub fn with_sneakers(mut self, count: usize) -> Self {
            for i in 0..count {
                let sneaker = Sneaker::new("Test Brand", format!("Model {}", i + 1))
                    .with_price(Some(100.0 * (i as f64 + 1.0)));
                self.store.add(sneaker).unwrap();
            }
            self
        }

        pub fn with_sneaker(mut self, brand: &str, model: &str, price: Option<f64>) -> Self {
            self.store
                .add(Sneaker::new(brand, model).with_price(price))
                .unwrap();
            self
        }

        pub fn build(self) -> InMemoryStore {
            self.store
        }
    }
}
