//! `QGateStorageEngine`: the SQLite implementation of every storage trait.
//!
//! Wraps `DatabaseManager` (read/write routing) and the injected clock.
//! Reads go through `with_reader()`, mutations through `with_transaction()`.
//! Nothing outside this crate should touch a raw `&Connection`.

use std::path::Path;
use std::sync::Arc;

use qgate_core::clock::{Clock, SystemClock};
use qgate_core::config::QGateConfig;
use qgate_core::errors::StorageError;
use qgate_core::traits::storage::{
    IConditionStorage, IMetricStorage, IQualityGateStorage, IUserStorage,
};
use qgate_core::types::{
    Condition, Metric, NewCondition, NewMetric, NewUser, QualityGate, User,
};
use tracing::info;
use uuid::Uuid;

use crate::cleanup::{self, CleanupReport};
use crate::connection::DatabaseManager;
use crate::migrations::{self, PopulateStats};
use crate::queries;

pub struct QGateStorageEngine {
    db: DatabaseManager,
    clock: Arc<dyn Clock>,
    batch_size: usize,
}

impl QGateStorageEngine {
    /// Open a file-backed engine and bring its schema up to date.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let db = DatabaseManager::open(path)?;
        Self::from_manager(db)
    }

    /// Open an in-memory engine (for testing). Schema is migrated.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let db = DatabaseManager::open_in_memory()?;
        Self::from_manager(db)
    }

    fn from_manager(db: DatabaseManager) -> Result<Self, StorageError> {
        let engine = Self {
            db,
            clock: Arc::new(SystemClock),
            batch_size: migrations::DEFAULT_BATCH_SIZE,
        };
        engine.migrate()?;
        Ok(engine)
    }

    /// Open according to `config`: migrations and the invalid-reference
    /// pass run only when the migration section asks for them.
    pub fn startup(config: &QGateConfig, clock: Arc<dyn Clock>) -> Result<Self, StorageError> {
        let db = DatabaseManager::open_with_config(&config.storage)?;
        let engine = Self {
            db,
            clock,
            batch_size: config.migration.batch_size,
        };
        if config.migration.run_on_startup {
            engine.migrate()?;
        }
        if config.migration.clean_invalid_references_on_startup {
            engine.clean_invalid_references()?;
        }
        info!(
            path = ?engine.path(),
            version = engine.schema_version()?,
            "storage engine ready"
        );
        Ok(engine)
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Apply pending migrations. Returns how many ran.
    pub fn migrate(&self) -> Result<u32, StorageError> {
        let batch_size = self.batch_size;
        self.db.with_writer(|conn| {
            migrations::run_migrations_to(conn, migrations::LATEST_VERSION, batch_size)
        })
    }

    pub fn schema_version(&self) -> Result<u32, StorageError> {
        self.db.with_writer(migrations::current_version)
    }

    /// Re-run the metric uuid backfill on demand.
    pub fn populate_metric_uuids(&self) -> Result<PopulateStats, StorageError> {
        let batch_size = self.batch_size;
        self.db
            .with_transaction(|tx| migrations::populate(tx, batch_size))
    }

    pub fn clean_invalid_references(&self) -> Result<CleanupReport, StorageError> {
        cleanup::clean_invalid_references(&self.db)
    }

    /// Raw read access, for callers that need queries no trait covers.
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&rusqlite::Connection) -> Result<T, StorageError>,
    {
        self.db.with_reader(f)
    }

    /// Raw write access.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&rusqlite::Connection) -> Result<T, StorageError>,
    {
        self.db.with_writer(f)
    }

    pub fn with_transaction<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&rusqlite::Transaction<'_>) -> Result<T, StorageError>,
    {
        self.db.with_transaction(f)
    }

    /// WAL checkpoint delegation.
    pub fn checkpoint(&self) -> Result<(), StorageError> {
        self.db.checkpoint()
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.db.path()
    }
}

fn new_uuid() -> String {
    Uuid::new_v4().to_string()
}

// ─── IConditionStorage ──────────────────────────────────────────────

impl IConditionStorage for QGateStorageEngine {
    fn insert(&self, condition: NewCondition) -> Result<Condition, StorageError> {
        let valid = condition.validated()?;
        let now = self.clock.now_millis();
        let row = Condition {
            uuid: new_uuid(),
            quality_gate_id: valid.quality_gate_id,
            metric: valid.metric,
            operator: valid.operator,
            error_threshold: valid.error_threshold,
            description: valid.description,
            updated_by: None,
            created_at: now,
            updated_at: now,
        };
        self.db
            .with_transaction(|tx| queries::conditions::insert_condition(tx, &row))?;
        Ok(row)
    }

    fn select_by_uuid(&self, uuid: &str) -> Result<Option<Condition>, StorageError> {
        self.db
            .with_reader(|conn| queries::conditions::get_condition(conn, uuid))
    }

    fn select_for_quality_gate(
        &self,
        quality_gate_id: i64,
    ) -> Result<Vec<Condition>, StorageError> {
        self.db
            .with_reader(|conn| queries::conditions::list_for_gate(conn, quality_gate_id))
    }

    fn count_for_quality_gate(&self, quality_gate_id: i64) -> Result<usize, StorageError> {
        self.db
            .with_reader(|conn| queries::conditions::count_for_gate(conn, quality_gate_id))
    }

    fn update(&self, condition: &Condition) -> Result<Condition, StorageError> {
        condition.check_mutable_fields()?;
        let now = self.clock.now_millis();
        self.db.with_transaction(|tx| {
            let not_found = || StorageError::NotFound {
                entity: "Condition",
                id: condition.uuid.clone(),
            };
            if queries::conditions::update_condition(tx, condition, now)? == 0 {
                return Err(not_found());
            }
            queries::conditions::get_condition(tx, &condition.uuid)?.ok_or_else(not_found)
        })
    }

    fn delete(&self, uuid: &str) -> Result<bool, StorageError> {
        let removed = self
            .db
            .with_transaction(|tx| queries::conditions::delete_condition(tx, uuid))?;
        Ok(removed > 0)
    }

    fn delete_conditions_with_invalid_metrics(&self) -> Result<usize, StorageError> {
        self.clean_invalid_references().map(|report| report.deleted)
    }
}

// ─── IMetricStorage ─────────────────────────────────────────────────

impl IMetricStorage for QGateStorageEngine {
    fn insert_metric(&self, metric: NewMetric) -> Result<Metric, StorageError> {
        let uuid = new_uuid();
        let id = self.db.with_transaction(|tx| {
            queries::metrics::insert_metric(tx, &uuid, &metric.key, metric.value_type, metric.enabled)
        })?;
        Ok(Metric {
            id,
            uuid,
            key: metric.key,
            value_type: metric.value_type,
            enabled: metric.enabled,
        })
    }

    fn select_metric_by_uuid(&self, uuid: &str) -> Result<Option<Metric>, StorageError> {
        self.db
            .with_reader(|conn| queries::metrics::get_metric_by_uuid(conn, uuid))
    }

    fn select_metric_by_id(&self, id: i64) -> Result<Option<Metric>, StorageError> {
        self.db
            .with_reader(|conn| queries::metrics::get_metric_by_id(conn, id))
    }

    fn set_metric_enabled(&self, uuid: &str, enabled: bool) -> Result<bool, StorageError> {
        let changed = self
            .db
            .with_transaction(|tx| queries::metrics::set_enabled(tx, uuid, enabled))?;
        Ok(changed > 0)
    }
}

// ─── IQualityGateStorage ────────────────────────────────────────────

impl IQualityGateStorage for QGateStorageEngine {
    fn insert_quality_gate(
        &self,
        name: &str,
        built_in: bool,
    ) -> Result<QualityGate, StorageError> {
        if name.trim().is_empty() {
            return Err(StorageError::ConstraintViolation { field: "name" });
        }
        let uuid = new_uuid();
        let created_at = self.clock.now_millis();
        let id = self.db.with_transaction(|tx| {
            queries::quality_gates::insert_quality_gate(tx, &uuid, name, built_in, created_at)
        })?;
        Ok(QualityGate {
            id,
            uuid,
            name: name.to_string(),
            built_in,
            created_at,
        })
    }

    fn select_quality_gate_by_id(&self, id: i64) -> Result<Option<QualityGate>, StorageError> {
        self.db
            .with_reader(|conn| queries::quality_gates::get_quality_gate(conn, id))
    }
}

// ─── IUserStorage ───────────────────────────────────────────────────

impl IUserStorage for QGateStorageEngine {
    fn insert_user(&self, user: NewUser) -> Result<User, StorageError> {
        if user.login.trim().is_empty() {
            return Err(StorageError::ConstraintViolation { field: "login" });
        }
        let row = User {
            uuid: new_uuid(),
            login: user.login,
            name: user.name,
            active: true,
        };
        self.db
            .with_transaction(|tx| queries::users::insert_user(tx, &row))?;
        Ok(row)
    }

    fn select_user_by_uuid(&self, uuid: &str) -> Result<Option<User>, StorageError> {
        self.db.with_reader(|conn| queries::users::get_user(conn, uuid))
    }
}
