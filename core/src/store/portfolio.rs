use super::{profile_from_row, GuardStore};
use crate::{error::GuardResult, profile::CustomerProfile, types::Probability};
use rusqlite::params;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: i64,
}

impl GuardStore {
    // ── Portfolio aggregates ──────────────────────────────────────

    /// Every customer with its cached score, if one has been computed.
    pub fn customers_with_predictions(
        &self,
    ) -> GuardResult<Vec<(CustomerProfile, Option<Probability>)>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.customer_id, c.gender, c.tenure, c.senior_citizen, c.partner,
                    c.dependents, p.churn_probability
             FROM customer c
             LEFT JOIN prediction p ON p.customer_id = c.customer_id
             ORDER BY c.customer_id ASC",
        )?;
        let rows = stmt.query_map([], |row| Ok((profile_from_row(row)?, row.get::<_, Option<f64>>(6)?)))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Customers whose cached score is above `threshold`, riskiest first.
    pub fn high_risk_customers(
        &self,
        threshold: Probability,
        limit: usize,
    ) -> GuardResult<Vec<(CustomerProfile, Probability)>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.customer_id, c.gender, c.tenure, c.senior_citizen, c.partner,
                    c.dependents, p.churn_probability
             FROM customer c
             JOIN prediction p ON p.customer_id = c.customer_id
             WHERE p.churn_probability > ?1
             ORDER BY p.churn_probability DESC, c.customer_id ASC
             LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![threshold, limit as i64], |row| {
            Ok((profile_from_row(row)?, row.get::<_, f64>(6)?))
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn high_risk_prediction_count(&self, threshold: Probability) -> GuardResult<i64> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM prediction WHERE churn_probability > ?1",
                params![threshold],
                |row| row.get(0),
            )
            .map_err(Into::into)
    }

    pub fn average_prediction(&self) -> GuardResult<Option<Probability>> {
        self.conn
            .query_row("SELECT AVG(churn_probability) FROM prediction", [], |row| row.get(0))
            .map_err(Into::into)
    }

    pub fn total_monthly_revenue(&self) -> GuardResult<f64> {
        self.conn
            .query_row(
                "SELECT COALESCE(SUM(monthly_charges), 0.0) FROM contract",
                [],
                |row| row.get(0),
            )
            .map_err(Into::into)
    }

    pub fn count_by_contract_mode(&self) -> GuardResult<Vec<CategoryCount>> {
        self.grouped_count("SELECT contract_mode, COUNT(*) FROM contract GROUP BY contract_mode ORDER BY contract_mode")
    }

    pub fn count_by_payment_method(&self) -> GuardResult<Vec<CategoryCount>> {
        self.grouped_count("SELECT payment_method, COUNT(*) FROM contract GROUP BY payment_method ORDER BY payment_method")
    }

    pub fn count_by_internet_type(&self) -> GuardResult<Vec<CategoryCount>> {
        self.grouped_count("SELECT internet_type, COUNT(*) FROM internet_service GROUP BY internet_type ORDER BY internet_type")
    }

    fn grouped_count(&self, sql: &str) -> GuardResult<Vec<CategoryCount>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(CategoryCount {
                label: row.get(0)?,
                count: row.get(1)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
