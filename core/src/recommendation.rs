//! Retention recommendations for high-risk customers.
//!
//! A fixed decision table, not a ranking. Rules fire independently and are
//! emitted in this order:
//!   1. Month-to-month contract  → Contract Stabilization
//!   2. Long tenure              → VIP Retention
//!      otherwise                → Onboarding Rescue
//!
//! Scores at or below the high-risk threshold never receive recommendations.

use crate::{
    config::RecommendationConfig,
    profile::{ContractInfo, ContractMode, CustomerProfile},
    types::Probability,
};
use serde::{Deserialize, Serialize};

pub const CONTRACT_STABILIZATION: &str = "Contract Stabilization";
pub const VIP_RETENTION: &str = "VIP Retention";
pub const ONBOARDING_RESCUE: &str = "Onboarding Rescue";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionStrategy {
    pub title:       String,
    pub description: String,
}

impl RetentionStrategy {
    fn new(title: &str, description: &str) -> Self {
        Self { title: title.to_string(), description: description.to_string() }
    }
}

pub fn is_high_risk(config: &RecommendationConfig, risk: Probability) -> bool {
    risk > config.high_risk_threshold
}

pub fn recommend(
    config: &RecommendationConfig,
    customer: &CustomerProfile,
    contract: Option<&ContractInfo>,
    risk: Probability,
) -> Vec<RetentionStrategy> {
    let mut strategies = Vec::new();

    if !is_high_risk(config, risk) {
        return strategies;
    }

    if contract.is_some_and(|c| c.contract_mode == ContractMode::MonthToMonth) {
        strategies.push(RetentionStrategy::new(
            CONTRACT_STABILIZATION,
            "Customer is on a volatile month-to-month plan. Offer 20% off for 6 months to switch to a one-year contract.",
        ));
    }

    if customer.tenure > config.vip_tenure_months {
        strategies.push(RetentionStrategy::new(
            VIP_RETENTION,
            "Long-term high-risk customer. Authorize a loyalty speed boost or a free equipment upgrade.",
        ));
    } else {
        strategies.push(RetentionStrategy::new(
            ONBOARDING_RESCUE,
            "New customer at risk. Schedule a call with a success manager immediately.",
        ));
    }

    strategies
}
