use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

use rust_decimal::Decimal;

use crate::errors::TransportError;
use crate::models::{ShoeDraft, ShoeInput, ShoeRecord};
use crate::remote::CatalogRemote;

/// A valid draft with the given name and brand.
pub fn draft(name: &str, brand: &str) -> ShoeDraft {
    ShoeDraft::new()
        .set("name", name)
        .set("brand", brand)
        .set("price", "299.99")
        .set("size", 41)
        .set("color", "#FF0000")
}

/// In-memory remote store for testing.
///
/// Counts every call and can simulate read or write failures.
#[derive(Debug, Default)]
pub struct MemRemote {
    shoes: Mutex<Vec<ShoeRecord>>,
    next_id: AtomicU64,
    calls: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remote holding an in-stock Nike followed by a sold-out Vans.
    pub fn seeded() -> Self {
        let remote = Self::new();
        remote.insert(ShoeInput {
            name: "Air Max 90".to_string(),
            brand: "Nike".to_string(),
            price: Decimal::new(49999, 2),
            size: Decimal::from(42),
            color: "#000000".to_string(),
            photo_url: None,
            in_stock: true,
        });
        remote.insert(ShoeInput {
            name: "Old Skool".to_string(),
            brand: "Vans".to_string(),
            price: Decimal::new(34999, 2),
            size: Decimal::from(39),
            color: "#000000".to_string(),
            photo_url: None,
            in_stock: false,
        });
        remote
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of remote calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The remote's copy of a record.
    pub fn stored(&self, id: &str) -> Option<ShoeRecord> {
        self.shoes.lock().unwrap().iter().find(|s| s.id == id).cloned()
    }

    /// Change a record behind the client's back.
    pub fn edit(&self, id: &str, f: impl FnOnce(&mut ShoeRecord)) {
        if let Some(shoe) = self.shoes.lock().unwrap().iter_mut().find(|s| s.id == id) {
            f(shoe);
        }
    }

    fn insert(&self, input: ShoeInput) -> ShoeRecord {
        let id = format!("shoe-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let record = ShoeRecord::from_input(id, input);
        self.shoes.lock().unwrap().push(record.clone());
        record
    }

    fn begin(&self, write: bool) -> Result<(), TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let failing = if write {
            &self.fail_writes
        } else {
            &self.fail_reads
        };
        if failing.load(Ordering::SeqCst) {
            return Err(TransportError::Status {
                status: 503,
                body: "simulated failure".to_string(),
            });
        }
        Ok(())
    }
}

impl CatalogRemote for MemRemote {
    async fn fetch_all(&self) -> Result<Vec<ShoeRecord>, TransportError> {
        self.begin(false)?;
        Ok(self.shoes.lock().unwrap().clone())
    }

    async fn fetch_one(&self, id: &str) -> Result<Option<ShoeRecord>, TransportError> {
        self.begin(false)?;
        Ok(self.stored(id))
    }

    async fn create(&self, input: &ShoeInput) -> Result<ShoeRecord, TransportError> {
        self.begin(true)?;
        Ok(self.insert(input.clone()))
    }

    async fn update(&self, id: &str, input: &ShoeInput) -> Result<(), TransportError> {
        self.begin(true)?;
        let mut shoes = self.shoes.lock().unwrap();
        let shoe = shoes
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| TransportError::Status {
                status: 404,
                body: String::new(),
            })?;
        shoe.apply(input.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), TransportError> {
        self.begin(true)?;
        let mut shoes = self.shoes.lock().unwrap();
        let before = shoes.len();
        shoes.retain(|s| s.id != id);
        if shoes.len() == before {
            return Err(TransportError::Status {
                status: 404,
                body: String::new(),
            });
        }
        Ok(())
    }
}
