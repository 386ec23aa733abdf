use super::GuardStore;
use crate::{error::GuardResult, profile::Employee};
use rusqlite::{params, OptionalExtension};

impl GuardStore {
    // ── Employees ─────────────────────────────────────────────────

    pub fn insert_employee(&self, e: &Employee) -> GuardResult<()> {
        self.conn.execute(
            "INSERT INTO employee (employee_id, username, role, employee_name)
             VALUES (?1, ?2, ?3, ?4)",
            params![e.employee_id, e.username, e.role, e.employee_name],
        )?;
        Ok(())
    }

    pub fn get_employee(&self, employee_id: &str) -> GuardResult<Option<Employee>> {
        self.conn
            .query_row(
                "SELECT employee_id, username, role, employee_name
                 FROM employee WHERE employee_id = ?1",
                params![employee_id],
                |row| {
                    Ok(Employee {
                        employee_id:   row.get(0)?,
                        username:      row.get(1)?,
                        role:          row.get(2)?,
                        employee_name: row.get(3)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn all_employees(&self) -> GuardResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(
            "SELECT employee_id, username, role, employee_name
             FROM employee ORDER BY employee_id ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Employee {
                employee_id:   row.get(0)?,
                username:      row.get(1)?,
                role:          row.get(2)?,
                employee_name: row.get(3)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
