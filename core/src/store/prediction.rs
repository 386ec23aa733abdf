use super::GuardStore;
use crate::{
    cache::InsertOutcome,
    error::{GuardError, GuardResult},
    profile::{ContractInfo, InternetServiceInfo, PhoneServiceInfo},
    types::Probability,
};
use rusqlite::{params, OptionalExtension};

impl GuardStore {
    // ── Predictions ───────────────────────────────────────────────

    pub fn get_prediction(&self, customer_id: &str) -> GuardResult<Option<Probability>> {
        self.conn
            .query_row(
                "SELECT churn_probability FROM prediction WHERE customer_id = ?1",
                params![customer_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Insert-only write used by the cache path. A row that already exists is
    /// left as is and reported back with its stored value.
    pub fn insert_prediction(
        &self,
        customer_id: &str,
        probability: Probability,
    ) -> GuardResult<InsertOutcome> {
        let inserted = self.conn.execute(
            "INSERT INTO prediction (customer_id, churn_probability) VALUES (?1, ?2)
             ON CONFLICT(customer_id) DO NOTHING",
            params![customer_id, probability],
        )?;
        if inserted > 0 {
            return Ok(InsertOutcome::Inserted);
        }
        // The conflicting row can only disappear through a customer delete.
        match self.get_prediction(customer_id)? {
            Some(existing) => Ok(InsertOutcome::AlreadyExists(existing)),
            None => Err(GuardError::CustomerNotFound {
                customer_id: customer_id.to_string(),
            }),
        }
    }

    /// Overwrite (or create) the single prediction row for a customer.
    pub fn upsert_prediction(&self, customer_id: &str, probability: Probability) -> GuardResult<()> {
        self.conn.execute(
            "INSERT INTO prediction (customer_id, churn_probability) VALUES (?1, ?2)
             ON CONFLICT(customer_id) DO UPDATE SET
                churn_probability = excluded.churn_probability",
            params![customer_id, probability],
        )?;
        Ok(())
    }

    /// Persist edited services and the score recomputed from them in one
    /// transaction, so a reader never sees new services with a stale score.
    pub fn replace_services_and_prediction(
        &self,
        contract: &ContractInfo,
        internet: &InternetServiceInfo,
        phone: &PhoneServiceInfo,
        probability: Probability,
    ) -> GuardResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        self.upsert_contract(contract)?;
        self.upsert_internet_service(internet)?;
        self.upsert_phone_service(phone)?;
        self.upsert_prediction(&contract.customer_id, probability)?;
        tx.commit()?;
        Ok(())
    }

    pub fn prediction_count(&self) -> GuardResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM prediction", [], |row| row.get(0))
            .map_err(Into::into)
    }

    pub fn prediction_count_for(&self, customer_id: &str) -> GuardResult<i64> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM prediction WHERE customer_id = ?1",
                params![customer_id],
                |row| row.get(0),
            )
            .map_err(Into::into)
    }
}
