//! Consultation audit trail: who looked at which customer's risk, and when.
//!
//! Entries are append-only. A failed append is logged and swallowed; it
//! never affects the analysis result it accompanies.

use crate::{
    clock::Clock,
    store::GuardStore,
    types::{CustomerId, EmployeeId, LogId},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationLogEntry {
    pub log_id:      LogId,
    pub timestamp:   NaiveDateTime,
    pub employee_id: EmployeeId,
    pub customer_id: CustomerId,
}

impl ConsultationLogEntry {
    pub fn new(timestamp: NaiveDateTime, employee_id: &str, customer_id: &str) -> Self {
        Self {
            log_id: format!("LOG-{}", uuid::Uuid::new_v4()),
            timestamp,
            employee_id: employee_id.to_string(),
            customer_id: customer_id.to_string(),
        }
    }
}

/// One row of the recent-activity view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp:     NaiveDateTime,
    pub employee_name: String,
    pub employee_role: String,
    pub customer_id:   CustomerId,
}

pub struct AuditTrail<'a> {
    store: &'a GuardStore,
    clock: &'a dyn Clock,
}

impl<'a> AuditTrail<'a> {
    pub fn new(store: &'a GuardStore, clock: &'a dyn Clock) -> Self {
        Self { store, clock }
    }

    /// Append a consultation stamped with the current time.
    /// Returns the new log id, or None if the write failed.
    pub fn record(&self, employee_id: &str, customer_id: &str) -> Option<LogId> {
        let entry = ConsultationLogEntry::new(self.clock.now(), employee_id, customer_id);
        match self.store.append_consultation(&entry) {
            Ok(()) => {
                log::debug!(
                    "audit: {} consulted {} ({})",
                    entry.employee_id, entry.customer_id, entry.log_id,
                );
                Some(entry.log_id)
            }
            Err(e) => {
                log::warn!("audit: failed to log consultation of {customer_id} by {employee_id}: {e}");
                None
            }
        }
    }
}
