use super::{flag, profile_from_row, GuardStore};
use crate::{
    error::GuardResult,
    profile::{
        ContractInfo, ContractMode, CustomerProfile, InternetServiceInfo, InternetType,
        PhoneServiceInfo,
    },
};
use rusqlite::{params, OptionalExtension};

impl GuardStore {
    // ── Customer profile ──────────────────────────────────────────

    pub fn get_customer(&self, customer_id: &str) -> GuardResult<Option<CustomerProfile>> {
        self.conn
            .query_row(
                "SELECT customer_id, gender, tenure, senior_citizen, partner, dependents
                 FROM customer WHERE customer_id = ?1",
                params![customer_id],
                profile_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn insert_customer(&self, c: &CustomerProfile) -> GuardResult<()> {
        self.conn.execute(
            "INSERT INTO customer (customer_id, gender, tenure, senior_citizen, partner, dependents)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                c.customer_id,
                c.gender,
                c.tenure as i64,
                flag(c.senior_citizen),
                flag(c.partner),
                flag(c.dependents),
            ],
        )?;
        Ok(())
    }

    /// Insert a customer together with default contract, internet and phone
    /// records. No prediction is created; the customer is pending analysis.
    pub fn register_customer(&self, c: &CustomerProfile) -> GuardResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        self.insert_customer(c)?;
        self.upsert_contract(&ContractInfo::default_for(&c.customer_id))?;
        self.upsert_internet_service(&InternetServiceInfo::default_for(&c.customer_id))?;
        self.upsert_phone_service(&PhoneServiceInfo::default_for(&c.customer_id))?;
        tx.commit()?;
        Ok(())
    }

    /// Overwrite demographic attributes. Returns false if the customer does not exist.
    /// Cached predictions are left untouched.
    pub fn update_customer_profile(&self, c: &CustomerProfile) -> GuardResult<bool> {
        let changed = self.conn.execute(
            "UPDATE customer
             SET gender = ?2, tenure = ?3, senior_citizen = ?4, partner = ?5, dependents = ?6
             WHERE customer_id = ?1",
            params![
                c.customer_id,
                c.gender,
                c.tenure as i64,
                flag(c.senior_citizen),
                flag(c.partner),
                flag(c.dependents),
            ],
        )?;
        Ok(changed > 0)
    }

    /// Delete a customer. Services, prediction and consultation history
    /// cascade. Returns false if the customer did not exist.
    pub fn delete_customer(&self, customer_id: &str) -> GuardResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM customer WHERE customer_id = ?1",
            params![customer_id],
        )?;
        Ok(changed > 0)
    }

    pub fn customer_count(&self) -> GuardResult<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM customer", [], |row| row.get(0))
            .map_err(Into::into)
    }

    // ── Contract ──────────────────────────────────────────────────

    pub fn get_contract(&self, customer_id: &str) -> GuardResult<Option<ContractInfo>> {
        let row = self
            .conn
            .query_row(
                "SELECT contract_mode, paperless_billing, payment_method,
                        monthly_charges, total_charges
                 FROM contract WHERE customer_id = ?1",
                params![customer_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, i64>(1)? != 0,
                        row.get::<_, String>(2)?,
                        row.get::<_, f64>(3)?,
                        row.get::<_, f64>(4)?,
                    ))
                },
            )
            .optional()?;

        match row {
            None => Ok(None),
            Some((mode, paperless_billing, payment_method, monthly_charges, total_charges)) => {
                Ok(Some(ContractInfo {
                    customer_id: customer_id.to_string(),
                    contract_mode: ContractMode::from(mode),
                    paperless_billing,
                    payment_method,
                    monthly_charges,
                    total_charges,
                }))
            }
        }
    }

    pub fn upsert_contract(&self, c: &ContractInfo) -> GuardResult<()> {
        self.conn.execute(
            "INSERT INTO contract (
                customer_id, contract_mode, paperless_billing, payment_method,
                monthly_charges, total_charges
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(customer_id) DO UPDATE SET
                contract_mode     = excluded.contract_mode,
                paperless_billing = excluded.paperless_billing,
                payment_method    = excluded.payment_method,
                monthly_charges   = excluded.monthly_charges,
                total_charges     = excluded.total_charges",
            params![
                c.customer_id,
                c.contract_mode.as_str(),
                flag(c.paperless_billing),
                c.payment_method,
                c.monthly_charges,
                c.total_charges,
            ],
        )?;
        Ok(())
    }

    // ── Internet service ──────────────────────────────────────────

    pub fn get_internet_service(
        &self,
        customer_id: &str,
    ) -> GuardResult<Option<InternetServiceInfo>> {
        let row = self
            .conn
            .query_row(
                "SELECT internet_type, online_security, online_backup,
                        device_protection, tech_support, streaming_movies
                 FROM internet_service WHERE customer_id = ?1",
                params![customer_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, i64>(1)? != 0,
                        row.get::<_, i64>(2)? != 0,
                        row.get::<_, i64>(3)? != 0,
                        row.get::<_, i64>(4)? != 0,
                        row.get::<_, i64>(5)? != 0,
                    ))
                },
            )
            .optional()?;

        let Some((kind, security, backup, protection, support, streaming)) = row else {
            return Ok(None);
        };

        Ok(Some(InternetServiceInfo {
            customer_id:       customer_id.to_string(),
            internet_type:     InternetType::from(kind),
            online_security:   security,
            online_backup:     backup,
            device_protection: protection,
            tech_support:      support,
            streaming_movies:  streaming,
        }))
    }

    pub fn upsert_internet_service(&self, i: &InternetServiceInfo) -> GuardResult<()> {
        self.conn.execute(
            "INSERT INTO internet_service (
                customer_id, internet_type, online_security, online_backup,
                device_protection, tech_support, streaming_movies
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(customer_id) DO UPDATE SET
                internet_type     = excluded.internet_type,
                online_security   = excluded.online_security,
                online_backup     = excluded.online_backup,
                device_protection = excluded.device_protection,
                tech_support      = excluded.tech_support,
                streaming_movies  = excluded.streaming_movies",
            params![
                i.customer_id,
                i.internet_type.as_str(),
                flag(i.online_security),
                flag(i.online_backup),
                flag(i.device_protection),
                flag(i.tech_support),
                flag(i.streaming_movies),
            ],
        )?;
        Ok(())
    }

    // ── Phone service ─────────────────────────────────────────────

    pub fn get_phone_service(&self, customer_id: &str) -> GuardResult<Option<PhoneServiceInfo>> {
        self.conn
            .query_row(
                "SELECT has_phone_service, multiple_lines
                 FROM phone_service WHERE customer_id = ?1",
                params![customer_id],
                |row| {
                    Ok(PhoneServiceInfo {
                        customer_id:       customer_id.to_string(),
                        has_phone_service: row.get::<_, i64>(0)? != 0,
                        multiple_lines:    row.get::<_, i64>(1)? != 0,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn upsert_phone_service(&self, p: &PhoneServiceInfo) -> GuardResult<()> {
        self.conn.execute(
            "INSERT INTO phone_service (customer_id, has_phone_service, multiple_lines)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(customer_id) DO UPDATE SET
                has_phone_service = excluded.has_phone_service,
                multiple_lines    = excluded.multiple_lines",
            params![p.customer_id, flag(p.has_phone_service), flag(p.multiple_lines)],
        )?;
        Ok(())
    }
}
