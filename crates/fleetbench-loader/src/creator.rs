//! Benchmark table setup.
//!
//! QuestDB has a single database per instance, so "database" operations
//! reduce to table checks: `db_exists` asks whether any benchmark table is
//! present and `remove_old_db` does nothing.

use std::thread;
use std::time::Duration;

use fleetbench_types::{DIAGNOSTICS_TABLE, ExistingTablePolicy, READINGS_TABLE};
use tracing::{debug, info};

use crate::client::RestClient;
use crate::error::{LoaderError, Result};

/// Tables a previous benchmark load may have left behind.
pub const BENCHMARK_TABLES: [&str; 3] = ["cpu", READINGS_TABLE, DIAGNOSTICS_TABLE];

/// Default pause after `create_db`.
pub const DEFAULT_CREATE_DELAY: Duration = Duration::from_secs(1);

const CREATE_READINGS: &str = "CREATE TABLE IF NOT EXISTS readings (
    name SYMBOL,
    fleet SYMBOL,
    driver SYMBOL,
    model SYMBOL,
    device_version SYMBOL,
    load_capacity DOUBLE,
    fuel_capacity DOUBLE,
    nominal_fuel_consumption DOUBLE,
    latitude DOUBLE,
    longitude DOUBLE,
    elevation DOUBLE,
    velocity DOUBLE,
    heading DOUBLE,
    grade DOUBLE,
    fuel_consumption DOUBLE,
    timestamp TIMESTAMP
) timestamp(timestamp) PARTITION BY DAY";

const CREATE_DIAGNOSTICS: &str = "CREATE TABLE IF NOT EXISTS diagnostics (
    name SYMBOL,
    fleet SYMBOL,
    driver SYMBOL,
    model SYMBOL,
    device_version SYMBOL,
    load_capacity DOUBLE,
    fuel_capacity DOUBLE,
    nominal_fuel_consumption DOUBLE,
    fuel_state DOUBLE,
    current_load DOUBLE,
    status DOUBLE,
    timestamp TIMESTAMP
) timestamp(timestamp) PARTITION BY DAY";

/// Prepares a QuestDB instance for a benchmark load.
#[derive(Debug, Clone)]
pub struct DbCreator {
    client: RestClient,
    create_delay: Duration,
}

impl DbCreator {
    /// Binds a creator to `endpoint`.
    pub fn init(endpoint: &str) -> Result<Self> {
        let client = RestClient::new(endpoint)?;
        debug!(endpoint = client.root(), "db creator initialised");
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: RestClient) -> Self {
        Self {
            client,
            create_delay: DEFAULT_CREATE_DELAY,
        }
    }

    #[must_use]
    pub fn with_create_delay(mut self, delay: Duration) -> Self {
        self.create_delay = delay;
        self
    }

    pub fn client(&self) -> &RestClient {
        &self.client
    }

    /// Benchmark tables currently present, in `SHOW TABLES` order.
    pub fn existing_tables(&self) -> Result<Vec<String>> {
        let response = self.client.exec("SHOW TABLES")?;

        let mut found = Vec::new();
        for row in &response.dataset {
            let name = row
                .first()
                .and_then(serde_json::Value::as_str)
                .ok_or_else(|| LoaderError::UnexpectedShape(format!("SHOW TABLES row {row:?}")))?;
            if BENCHMARK_TABLES.contains(&name) {
                info!(table = name, "table already exists");
                found.push(name.to_string());
            }
        }
        Ok(found)
    }

    /// Whether any benchmark table is present.
    pub fn db_exists(&self, db_name: &str) -> Result<bool> {
        let exists = !self.existing_tables()?.is_empty();
        debug!(db_name, exists, "checked benchmark tables");
        Ok(exists)
    }

    /// Nothing to remove: existing tables are handled by
    /// [`ensure_schema`](Self::ensure_schema).
    pub fn remove_old_db(&self, db_name: &str) -> Result<()> {
        debug!(db_name, "remove_old_db is a no-op");
        Ok(())
    }

    /// Waits the configured delay. Tables are created on first write or by
    /// [`create_schema`](Self::create_schema).
    pub fn create_db(&self, db_name: &str) -> Result<()> {
        debug!(db_name, delay_ms = self.create_delay.as_millis(), "creating database");
        thread::sleep(self.create_delay);
        Ok(())
    }

    /// Creates `readings` and `diagnostics` if they are missing.
    pub fn create_schema(&self) -> Result<()> {
        for (table, ddl) in [
            (READINGS_TABLE, CREATE_READINGS),
            (DIAGNOSTICS_TABLE, CREATE_DIAGNOSTICS),
        ] {
            self.client.exec(ddl)?;
            info!(table, "table ready");
        }
        Ok(())
    }

    /// Applies `policy` to any existing benchmark tables, then creates the
    /// schema. Returns the tables that were already present.
    pub fn ensure_schema(&self, policy: ExistingTablePolicy) -> Result<Vec<String>> {
        let existing = self.existing_tables()?;
        if !existing.is_empty() && policy == ExistingTablePolicy::Fail {
            return Err(LoaderError::TablesExist(existing));
        }

        self.create_schema()?;
        Ok(existing)
    }
}
