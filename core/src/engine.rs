//! The retention engine: entry point for analysis requests.
//!
//! ANALYSIS FLOW (per request):
//!   1. Customer lookup: unknown id aborts with CustomerNotFound, nothing written
//!   2. Snapshot: contract and internet records loaded once
//!   3. Cache: stored score reused, otherwise computed and inserted
//!   4. Audit: consultation appended on every found customer
//!   5. Recommendations: only above the high-risk threshold
//!
//! Re-analysis bypasses the cache: the edited services are persisted and the
//! score recomputed from them overwrites the stored one.

use crate::{
    audit::{ActivityEntry, AuditTrail},
    cache::PredictionCache,
    clock::{Clock, SystemClock},
    config::EngineConfig,
    error::{GuardError, GuardResult},
    portfolio::{self, ExecutiveReport, PortfolioOverview},
    profile::{ContractInfo, CustomerProfile, InternetServiceInfo, PhoneServiceInfo},
    recommendation::{self, RetentionStrategy},
    scoring,
    store::GuardStore,
    types::{CustomerId, LogId, Probability},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Low,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "High",
            RiskLevel::Low  => "Low",
        }
    }
}

/// Everything one request needs, fetched once so scoring, recommendation and
/// logging all see the same records.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    pub customer: CustomerProfile,
    pub contract: Option<ContractInfo>,
    pub internet: Option<InternetServiceInfo>,
}

impl AnalysisContext {
    pub fn load(store: &GuardStore, customer_id: &str) -> GuardResult<Self> {
        let customer = store
            .get_customer(customer_id)?
            .ok_or_else(|| GuardError::CustomerNotFound {
                customer_id: customer_id.to_string(),
            })?;
        Ok(Self {
            contract: store.get_contract(customer_id)?,
            internet: store.get_internet_service(customer_id)?,
            customer,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub customer_id:     CustomerId,
    pub probability:     Probability,
    /// Probability as a percentage, one decimal.
    pub score:           f64,
    pub risk_level:      RiskLevel,
    pub recommendations: Vec<RetentionStrategy>,
    pub cache_hit:       bool,
    /// None when the consultation could not be logged.
    pub log_id:          Option<LogId>,
}

/// Edited service records submitted for forced re-analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceUpdate {
    pub contract: ContractInfo,
    pub internet: InternetServiceInfo,
    pub phone:    PhoneServiceInfo,
}

pub fn as_percent(probability: Probability) -> f64 {
    (probability * 1000.0).round() / 10.0
}

pub struct RetentionEngine {
    config: EngineConfig,
    store:  GuardStore,
    clock:  Box<dyn Clock>,
}

impl RetentionEngine {
    pub fn new(config: EngineConfig, store: GuardStore) -> GuardResult<Self> {
        Self::with_clock(config, store, Box::new(SystemClock))
    }

    /// Rejects configs that fail `EngineConfig::validate`.
    pub fn with_clock(
        config: EngineConfig,
        store: GuardStore,
        clock: Box<dyn Clock>,
    ) -> GuardResult<Self> {
        config.validate()?;
        Ok(Self { config, store, clock })
    }

    /// Fresh in-memory store with the schema applied and default config.
    pub fn build_test() -> GuardResult<Self> {
        let store = GuardStore::in_memory()?;
        store.migrate()?;
        Self::new(EngineConfig::default(), store)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &GuardStore {
        &self.store
    }

    pub fn risk_level(&self, probability: Probability) -> RiskLevel {
        if probability > self.config.reporting.risk_level_threshold {
            RiskLevel::High
        } else {
            RiskLevel::Low
        }
    }

    /// Score a customer (from cache when available), log the consultation
    /// and attach retention recommendations for high-risk results.
    pub fn analyze(&self, customer_id: &str, employee_id: &str) -> GuardResult<AnalysisReport> {
        let ctx = AnalysisContext::load(&self.store, customer_id)?;

        let cached = PredictionCache::new(&self.store).get_or_compute(customer_id, || {
            let score = scoring::score(
                &self.config.scoring,
                &ctx.customer,
                ctx.contract.as_ref(),
                ctx.internet.as_ref(),
            );
            log::info!("analyze: computed fresh score for {customer_id} (risk={score:.3})");
            Ok(score)
        })?;

        let log_id = AuditTrail::new(&self.store, self.clock.as_ref()).record(employee_id, customer_id);

        let recommendations = recommendation::recommend(
            &self.config.recommendation,
            &ctx.customer,
            ctx.contract.as_ref(),
            cached.score,
        );

        Ok(AnalysisReport {
            customer_id: customer_id.to_string(),
            probability: cached.score,
            score: as_percent(cached.score),
            risk_level: self.risk_level(cached.score),
            recommendations,
            cache_hit: cached.cache_hit,
            log_id,
        })
    }

    /// Persist edited services and overwrite the customer's score with one
    /// computed from them. The cache is not consulted.
    pub fn reanalyze(&self, customer_id: &str, update: ServiceUpdate) -> GuardResult<Probability> {
        let customer = self
            .store
            .get_customer(customer_id)?
            .ok_or_else(|| GuardError::CustomerNotFound {
                customer_id: customer_id.to_string(),
            })?;

        let contract = ContractInfo { customer_id: customer_id.to_string(), ..update.contract };
        let internet = InternetServiceInfo { customer_id: customer_id.to_string(), ..update.internet };
        let phone = PhoneServiceInfo { customer_id: customer_id.to_string(), ..update.phone };

        let score = scoring::score(&self.config.scoring, &customer, Some(&contract), Some(&internet));
        let previous = self.store.get_prediction(customer_id)?;

        self.store
            .replace_services_and_prediction(&contract, &internet, &phone, score)?;

        match previous {
            Some(old) => log::info!("reanalyze: {customer_id} risk {old:.3} -> {score:.3}"),
            None => log::info!("reanalyze: {customer_id} risk {score:.3} (no prior score)"),
        }
        Ok(score)
    }

    /// Latest consultations, newest first.
    pub fn recent_activity(&self, limit: usize) -> GuardResult<Vec<ActivityEntry>> {
        self.store.recent_activity(limit)
    }

    pub fn portfolio_overview(&self) -> GuardResult<PortfolioOverview> {
        portfolio::overview(&self.store)
    }

    pub fn executive_report(&self) -> GuardResult<ExecutiveReport> {
        portfolio::executive_report(&self.store, &self.config)
    }
}
