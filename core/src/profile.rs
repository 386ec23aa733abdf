//! Customer profile and service records as read from the profile store.
//!
//! The engine never mutates these; it only reads them through `GuardStore`.

use crate::types::CustomerId;
use serde::{Deserialize, Serialize};
use std::{convert::Infallible, fmt, str::FromStr};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub customer_id:    CustomerId,
    pub gender:         String,
    pub tenure:         u32,
    pub senior_citizen: bool,
    pub partner:        bool,
    pub dependents:     bool,
}

impl CustomerProfile {
    /// Neither partner nor dependents on record.
    pub fn is_isolated(&self) -> bool {
        !self.partner && !self.dependents
    }
}

// ── Contract ─────────────────────────────────────────────────────────────────

/// Contract term. Text the store holds that matches none of the known terms
/// is kept verbatim in `Other` and carries no scoring adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContractMode {
    MonthToMonth,
    OneYear,
    TwoYear,
    Other(String),
}

impl ContractMode {
    pub fn as_str(&self) -> &str {
        match self {
            ContractMode::MonthToMonth => "Month-to-month",
            ContractMode::OneYear      => "One year",
            ContractMode::TwoYear      => "Two year",
            ContractMode::Other(raw)   => raw,
        }
    }
}

impl fmt::Display for ContractMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ContractMode {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "month-to-month" | "month_to_month" => ContractMode::MonthToMonth,
            "one year" | "one_year"             => ContractMode::OneYear,
            "two year" | "two_year"             => ContractMode::TwoYear,
            _ => ContractMode::Other(s.to_string()),
        }
    }
}

impl From<String> for ContractMode {
    fn from(s: String) -> Self {
        ContractMode::from(s.as_str())
    }
}

impl From<ContractMode> for String {
    fn from(mode: ContractMode) -> Self {
        mode.as_str().to_string()
    }
}

impl FromStr for ContractMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ContractMode::from(s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractInfo {
    /// Filled in by the store; optional on the wire.
    #[serde(default)]
    pub customer_id:       CustomerId,
    pub contract_mode:     ContractMode,
    pub paperless_billing: bool,
    pub payment_method:    String,
    pub monthly_charges:   f64,
    pub total_charges:     f64,
}

impl ContractInfo {
    /// Contract given to a freshly registered customer.
    pub fn default_for(customer_id: &str) -> Self {
        Self {
            customer_id:       customer_id.to_string(),
            contract_mode:     ContractMode::MonthToMonth,
            paperless_billing: false,
            payment_method:    "Mailed check".into(),
            monthly_charges:   0.0,
            total_charges:     0.0,
        }
    }
}

// ── Internet service ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InternetType {
    Dsl,
    FiberOptic,
    NoService,
    /// Any other access technology, kept as entered.
    Other(String),
}

impl InternetType {
    pub fn as_str(&self) -> &str {
        match self {
            InternetType::Dsl        => "DSL",
            InternetType::FiberOptic => "Fiber optic",
            InternetType::NoService  => "No",
            InternetType::Other(raw) => raw,
        }
    }
}

impl fmt::Display for InternetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for InternetType {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "dsl"                         => InternetType::Dsl,
            "fiber optic" | "fiber_optic" => InternetType::FiberOptic,
            "no" | "none" | ""            => InternetType::NoService,
            _ => InternetType::Other(s.to_string()),
        }
    }
}

impl From<String> for InternetType {
    fn from(s: String) -> Self {
        InternetType::from(s.as_str())
    }
}

impl From<InternetType> for String {
    fn from(kind: InternetType) -> Self {
        kind.as_str().to_string()
    }
}

impl FromStr for InternetType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(InternetType::from(s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternetServiceInfo {
    #[serde(default)]
    pub customer_id:       CustomerId,
    pub internet_type:     InternetType,
    pub online_security:   bool,
    pub online_backup:     bool,
    pub device_protection: bool,
    pub tech_support:      bool,
    pub streaming_movies:  bool,
}

impl InternetServiceInfo {
    pub fn default_for(customer_id: &str) -> Self {
        Self {
            customer_id:       customer_id.to_string(),
            internet_type:     InternetType::NoService,
            online_security:   false,
            online_backup:     false,
            device_protection: false,
            tech_support:      false,
            streaming_movies:  false,
        }
    }
}

// ── Phone service ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneServiceInfo {
    #[serde(default)]
    pub customer_id:       CustomerId,
    pub has_phone_service: bool,
    pub multiple_lines:    bool,
}

impl PhoneServiceInfo {
    pub fn default_for(customer_id: &str) -> Self {
        Self {
            customer_id:       customer_id.to_string(),
            has_phone_service: false,
            multiple_lines:    false,
        }
    }
}

// ── Employee ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id:   String,
    pub username:      String,
    pub role:          String,
    pub employee_name: String,
}
