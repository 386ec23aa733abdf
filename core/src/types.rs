//! Shared primitive types used across the engine.

/// Stable customer identifier, owned by the profile store.
pub type CustomerId = String;

/// Identifier of the employee acting on a customer record.
pub type EmployeeId = String;

/// Generated identifier of a consultation log row (`LOG-<uuid>`).
pub type LogId = String;

/// Churn probability in [0, 1].
pub type Probability = f64;
