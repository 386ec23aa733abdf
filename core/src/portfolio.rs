//! Portfolio-wide views: the customer overview and the executive summary.

use crate::{
    config::EngineConfig,
    engine::as_percent,
    error::GuardResult,
    profile::CustomerProfile,
    store::{CategoryCount, GuardStore},
    types::Probability,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRiskRow {
    pub customer: CustomerProfile,
    /// None until the customer is analyzed for the first time.
    pub churn_probability: Option<Probability>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioOverview {
    pub customers:       Vec<CustomerRiskRow>,
    pub internet_mix:    Vec<CategoryCount>,
    pub contract_mix:    Vec<CategoryCount>,
    pub payment_mix:     Vec<CategoryCount>,
}

impl PortfolioOverview {
    pub fn pending_analysis(&self) -> usize {
        self.customers.iter().filter(|r| r.churn_probability.is_none()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighRiskCustomer {
    pub customer_id:       String,
    pub tenure:            u32,
    pub churn_probability: Probability,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveReport {
    pub total_customers:       i64,
    pub total_monthly_revenue: f64,
    /// Mean cached probability as a percentage; 0.0 when nothing is scored.
    pub average_churn_percent: f64,
    pub high_risk_count:       i64,
    pub contract_mix:          Vec<CategoryCount>,
    pub high_risk_customers:   Vec<HighRiskCustomer>,
}

pub fn overview(store: &GuardStore) -> GuardResult<PortfolioOverview> {
    let customers = store
        .customers_with_predictions()?
        .into_iter()
        .map(|(customer, churn_probability)| CustomerRiskRow { customer, churn_probability })
        .collect();

    Ok(PortfolioOverview {
        customers,
        internet_mix: store.count_by_internet_type()?,
        contract_mix: store.count_by_contract_mode()?,
        payment_mix:  store.count_by_payment_method()?,
    })
}

pub fn executive_report(store: &GuardStore, config: &EngineConfig) -> GuardResult<ExecutiveReport> {
    let threshold = config.recommendation.high_risk_threshold;

    let high_risk_customers = store
        .high_risk_customers(threshold, config.reporting.report_high_risk_limit)?
        .into_iter()
        .map(|(c, p)| HighRiskCustomer {
            customer_id: c.customer_id,
            tenure: c.tenure,
            churn_probability: p,
        })
        .collect();

    let revenue = store.total_monthly_revenue()?;

    Ok(ExecutiveReport {
        total_customers:       store.customer_count()?,
        total_monthly_revenue: (revenue * 100.0).round() / 100.0,
        average_churn_percent: store.average_prediction()?.map(as_percent).unwrap_or(0.0),
        high_risk_count:       store.high_risk_prediction_count(threshold)?,
        contract_mix:          store.count_by_contract_mode()?,
        high_risk_customers,
    })
}
