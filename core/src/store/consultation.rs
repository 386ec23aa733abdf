use super::GuardStore;
use crate::{
    audit::{ActivityEntry, ConsultationLogEntry},
    clock::{format_timestamp, parse_timestamp},
    error::{GuardError, GuardResult},
};
use chrono::NaiveDateTime;
use rusqlite::params;

fn decode_time(raw: String) -> GuardResult<NaiveDateTime> {
    parse_timestamp(&raw).ok_or(GuardError::InvalidAttribute {
        field: "consultation_time",
        value: raw,
    })
}

impl GuardStore {
    // ── Consultation log ──────────────────────────────────────────

    pub fn append_consultation(&self, entry: &ConsultationLogEntry) -> GuardResult<()> {
        self.conn.execute(
            "INSERT INTO consultation_log (log_id, consultation_time, employee_id, customer_id)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.log_id,
                format_timestamp(&entry.timestamp),
                entry.employee_id,
                entry.customer_id,
            ],
        )?;
        Ok(())
    }

    /// Most recent consultations first. Entries sharing a timestamp are
    /// ordered by insertion, newest first.
    pub fn recent_activity(&self, limit: usize) -> GuardResult<Vec<ActivityEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT l.consultation_time, e.employee_name, e.role, l.customer_id
             FROM consultation_log l
             JOIN employee e ON e.employee_id = l.employee_id
             JOIN customer c ON c.customer_id = l.customer_id
             ORDER BY l.consultation_time DESC, l.seq DESC
             LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit as i64], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(time, employee_name, employee_role, customer_id)| {
                Ok(ActivityEntry {
                    timestamp: decode_time(time)?,
                    employee_name,
                    employee_role,
                    customer_id,
                })
            })
            .collect()
    }

    /// A customer's consultations in the order they were recorded.
    pub fn consultations_for_customer(
        &self,
        customer_id: &str,
    ) -> GuardResult<Vec<ConsultationLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT log_id, consultation_time, employee_id, customer_id
             FROM consultation_log WHERE customer_id = ?1
             ORDER BY seq ASC",
        )?;
        let rows = stmt
            .query_map(params![customer_id], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(log_id, time, employee_id, customer_id)| {
                Ok(ConsultationLogEntry {
                    log_id,
                    timestamp: decode_time(time)?,
                    employee_id,
                    customer_id,
                })
            })
            .collect()
    }

    pub fn consultation_count(&self) -> GuardResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM consultation_log", [], |row| row.get(0))
            .map_err(Into::into)
    }
}
