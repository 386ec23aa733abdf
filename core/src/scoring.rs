//! Churn-risk scoring: additive linear model over profile and service data.
//!
//! Every term is summed onto the base rate and only then clamped, so the
//! order of adjustments never matters. Absent contract or internet records
//! contribute zero. The functions here are pure.

use crate::{
    config::ScoringWeights,
    profile::{ContractInfo, ContractMode, CustomerProfile, InternetServiceInfo, InternetType},
    types::Probability,
};
use serde::{Deserialize, Serialize};

/// Per-component view of a score, useful for explaining a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base_rate:           f64,
    pub tenure_component:    f64,
    pub contract_component:  f64,
    pub internet_component:  f64,
    pub senior_component:    f64,
    pub isolation_component: f64,
    /// Sum of all components before clamping.
    pub raw:                 f64,
    pub clamped:             Probability,
}

pub fn score_breakdown(
    weights: &ScoringWeights,
    customer: &CustomerProfile,
    contract: Option<&ContractInfo>,
    internet: Option<&InternetServiceInfo>,
) -> ScoreBreakdown {
    let tenure_component = if customer.tenure < weights.short_tenure_months {
        weights.short_tenure_penalty
    } else if customer.tenure > weights.long_tenure_months {
        weights.long_tenure_credit
    } else {
        0.0
    };

    let contract_component = match contract.map(|c| &c.contract_mode) {
        Some(ContractMode::MonthToMonth) => weights.month_to_month_penalty,
        Some(ContractMode::TwoYear)      => weights.two_year_credit,
        Some(ContractMode::OneYear | ContractMode::Other(_)) | None => 0.0,
    };

    let internet_component = match internet.map(|i| &i.internet_type) {
        Some(InternetType::FiberOptic) => weights.fiber_optic_penalty,
        _ => 0.0,
    };

    let senior_component = if customer.senior_citizen { weights.senior_penalty } else { 0.0 };
    let isolation_component = if customer.is_isolated() { weights.isolation_penalty } else { 0.0 };

    let raw = weights.base_rate
        + tenure_component
        + contract_component
        + internet_component
        + senior_component
        + isolation_component;

    ScoreBreakdown {
        base_rate: weights.base_rate,
        tenure_component,
        contract_component,
        internet_component,
        senior_component,
        isolation_component,
        raw,
        clamped: raw.max(weights.floor).min(weights.ceiling),
    }
}

/// Churn probability in [floor, ceiling].
pub fn score(
    weights: &ScoringWeights,
    customer: &CustomerProfile,
    contract: Option<&ContractInfo>,
    internet: Option<&InternetServiceInfo>,
) -> Probability {
    score_breakdown(weights, customer, contract, internet).clamped
}
