//! Database initialization, table definitions and shared state
//!
//! The embedded redb database mirrors the property catalog so admin edits
//! survive a restart. The in-memory [`Catalog`] stays the source of truth
//! while the process runs; every mutation is written through before it
//! becomes visible.

use parking_lot::RwLock;
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::sync::Arc;

use crate::bookings::Bookings;
use crate::catalog::Catalog;
use crate::error::StoreError;
use crate::model::{Property, User};
use crate::users::UserDirectory;

/// Main table for storing property records
///
/// Key: property id
/// Value: JSON-serialized Property
///
/// Example:
/// - Key: "k2Jd9XqA"
/// - Value: '{"id":"k2Jd9XqA","title":"Sea View Villa",...}'
pub const TABLE_PROPERTIES: TableDefinition<&str, &str> = TableDefinition::new("properties_v1");

/// Catalog order index
///
/// Key: insertion sequence number
/// Value: property id
///
/// Iterating this table yields the catalog in the order listings were added.
pub const TABLE_CATALOG_ORDER: TableDefinition<u64, &str> = TableDefinition::new("catalog_order_v1");

/// Application state shared across all request handlers
///
/// The catalog, bookings and users sit behind `RwLock`s so handlers can read
/// concurrently. Locks are never held across an `.await`.
///
/// Catalog writes are serialized by `catalog_writer`, an async mutex held
/// while the redb commit runs on the blocking pool. Searches keep reading the
/// previous catalog during a commit; a second writer waits for the first
/// instead of blocking a runtime worker.
#[derive(Clone)]
pub struct AppState {
    /// Embedded database backing the catalog
    pub db: Arc<Database>,

    pub catalog: Arc<RwLock<Catalog>>,

    /// Held for the clone, persist and swap of one catalog write
    pub catalog_writer: Arc<tokio::sync::Mutex<()>>,

    pub bookings: Arc<RwLock<Bookings>>,

    pub users: Arc<RwLock<UserDirectory>>,
}

impl AppState {
    /// Builds the state, loading the catalog persisted in `db`
    pub fn new(db: Database) -> Result<Self, StoreError> {
        let catalog = Catalog::from_properties(load_properties(&db)?);
        tracing::debug!(properties = catalog.len(), "catalog loaded");

        Ok(Self {
            db: Arc::new(db),
            catalog: Arc::new(RwLock::new(catalog)),
            catalog_writer: Arc::new(tokio::sync::Mutex::new(())),
            bookings: Arc::new(RwLock::new(Bookings::new())),
            users: Arc::new(RwLock::new(UserDirectory::default())),
        })
    }

    /// Replaces the user directory
    pub fn with_users(self, users: Vec<User>) -> Self {
        *self.users.write() = UserDirectory::new(users);
        self
    }
}

/// Initializes the embedded database and creates required tables
///
/// # Arguments
///
/// * `db_path` - File path where the database should be stored (e.g., "rentals.db")
///
/// # Example
///
/// ```no_run
/// # use rentals::database::init_db;
/// let db = init_db("rentals.db").expect("Failed to initialize database");
/// ```
pub fn init_db(db_path: &str) -> Result<Database, StoreError> {
    let db = Database::create(db_path)?;

    let write_txn = db.begin_write()?;
    {
        write_txn.open_table(TABLE_PROPERTIES)?;
        write_txn.open_table(TABLE_CATALOG_ORDER)?;
    }
    write_txn.commit()?;

    Ok(db)
}

/// Reads every persisted property in catalog order
///
/// Order entries whose record is missing are skipped.
pub fn load_properties(db: &Database) -> Result<Vec<Property>, StoreError> {
    let read_txn = db.begin_read()?;
    let order = read_txn.open_table(TABLE_CATALOG_ORDER)?;
    let records = read_txn.open_table(TABLE_PROPERTIES)?;

    let mut properties = Vec::new();
    for entry in order.iter()? {
        let (_, id) = entry?;
        match records.get(id.value())? {
            Some(json) => properties.push(serde_json::from_str::<Property>(json.value())?),
            None => tracing::warn!(id = id.value(), "order entry without record"),
        }
    }

    Ok(properties)
}

/// Appends a property at the end of the persisted catalog
pub fn insert_property(db: &Database, property: &Property) -> Result<(), StoreError> {
    let record_json = serde_json::to_string(property)?;

    let write_txn = db.begin_write()?;
    {
        let mut order = write_txn.open_table(TABLE_CATALOG_ORDER)?;
        let next_seq = match order.last()? {
            Some((seq, _)) => seq.value() + 1,
            None => 0,
        };
        order.insert(next_seq, property.id.as_str())?;

        let mut records = write_txn.open_table(TABLE_PROPERTIES)?;
        records.insert(property.id.as_str(), record_json.as_str())?;
    }
    write_txn.commit()?;

    Ok(())
}

/// Overwrites a persisted property, keeping its position
pub fn update_property(db: &Database, property: &Property) -> Result<(), StoreError> {
    let record_json = serde_json::to_string(property)?;

    let write_txn = db.begin_write()?;
    {
        let mut records = write_txn.open_table(TABLE_PROPERTIES)?;
        records.insert(property.id.as_str(), record_json.as_str())?;
    }
    write_txn.commit()?;

    Ok(())
}

/// Removes a persisted property and its order entry
pub fn delete_property(db: &Database, id: &str) -> Result<(), StoreError> {
    let write_txn = db.begin_write()?;
    {
        let mut records = write_txn.open_table(TABLE_PROPERTIES)?;
        records.remove(id)?;

        let mut order = write_txn.open_table(TABLE_CATALOG_ORDER)?;
        let mut stale = Vec::new();
        for entry in order.iter()? {
            let (seq, entry_id) = entry?;
            if entry_id.value() == id {
                stale.push(seq.value());
            }
        }
        for seq in stale {
            order.remove(seq)?;
        }
    }
    write_txn.commit()?;

    Ok(())
}

/// Writes `properties` when the persisted catalog is empty
///
/// Returns the number of records written, zero when data already exists.
pub fn seed_if_empty(db: &Database, properties: &[Property]) -> Result<usize, StoreError> {
    let write_txn = db.begin_write()?;
    let written = {
        let mut order = write_txn.open_table(TABLE_CATALOG_ORDER)?;
        if !order.is_empty()? {
            0
        } else {
            let mut records = write_txn.open_table(TABLE_PROPERTIES)?;
            let mut written = 0;
            for property in properties {
                if records.get(property.id.as_str())?.is_some() {
                    tracing::warn!(id = %property.id, "skipping duplicate seed id");
                    continue;
                }
                let record_json = serde_json::to_string(property)?;
                records.insert(property.id.as_str(), record_json.as_str())?;
                order.insert(written as u64, property.id.as_str())?;
                written += 1;
            }
            written
        }
    };
    write_txn.commit()?;

    Ok(written)
}
