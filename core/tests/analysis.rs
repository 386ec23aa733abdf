use churnguard_core::{
    config::EngineConfig,
    engine::{RetentionEngine, RiskLevel},
    error::GuardError,
    profile::{ContractInfo, ContractMode, CustomerProfile, Employee, InternetServiceInfo, InternetType},
    recommendation::{CONTRACT_STABILIZATION, ONBOARDING_RESCUE, VIP_RETENTION},
    store::GuardStore,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn make_engine() -> RetentionEngine {
    let engine = RetentionEngine::build_test().unwrap();
    seed_employee(engine.store(), "EMP001", "Super Admin", "Manager");
    engine
}

fn make_engine_with(config: EngineConfig) -> RetentionEngine {
    let store = GuardStore::in_memory().unwrap();
    store.migrate().unwrap();
    seed_employee(&store, "EMP001", "Super Admin", "Manager");
    RetentionEngine::new(config, store).unwrap()
}

fn seed_employee(store: &GuardStore, id: &str, name: &str, role: &str) {
    store
        .insert_employee(&Employee {
            employee_id:   id.into(),
            username:      id.to_lowercase(),
            role:          role.into(),
            employee_name: name.into(),
        })
        .unwrap();
}

#[allow(clippy::too_many_arguments)]
fn seed_customer(
    store: &GuardStore,
    id: &str,
    tenure: u32,
    senior: bool,
    partner: bool,
    dependents: bool,
    mode: Option<ContractMode>,
    internet: Option<InternetType>,
) {
    store
        .insert_customer(&CustomerProfile {
            customer_id:    id.into(),
            gender:         "Female".into(),
            tenure,
            senior_citizen: senior,
            partner,
            dependents,
        })
        .unwrap();
    if let Some(mode) = mode {
        store
            .upsert_contract(&ContractInfo { contract_mode: mode, ..ContractInfo::default_for(id) })
            .unwrap();
    }
    if let Some(kind) = internet {
        store
            .upsert_internet_service(&InternetServiceInfo {
                internet_type: kind,
                ..InternetServiceInfo::default_for(id)
            })
            .unwrap();
    }
}

fn titles(report: &churnguard_core::engine::AnalysisReport) -> Vec<&str> {
    report.recommendations.iter().map(|r| r.title.as_str()).collect()
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// New, isolated, month-to-month fiber customer: 0.30+0.20+0.25+0.10+0.05 = 0.90.
#[test]
fn high_risk_newcomer_scores_90_with_two_recommendations() {
    let engine = make_engine();
    seed_customer(
        engine.store(), "CUST-001", 3, false, false, false,
        Some(ContractMode::MonthToMonth), Some(InternetType::FiberOptic),
    );

    let report = engine.analyze("CUST-001", "EMP001").unwrap();

    assert_eq!(report.score, 90.0);
    assert!((report.probability - 0.90).abs() < 1e-9, "probability={}", report.probability);
    assert_eq!(report.risk_level, RiskLevel::High);
    assert_eq!(titles(&report), vec![CONTRACT_STABILIZATION, ONBOARDING_RESCUE]);
    assert!(!report.cache_hit, "first analysis must compute");
    assert!(report.log_id.is_some(), "consultation must be logged");
}

/// Unknown customer aborts the request without writing anything.
#[test]
fn unknown_customer_writes_nothing() {
    let engine = make_engine();

    let err = engine.analyze("CUST-404", "EMP001").unwrap_err();

    assert!(matches!(err, GuardError::CustomerNotFound { ref customer_id } if customer_id == "CUST-404"));
    assert!(err.is_customer_not_found());
    assert_eq!(engine.store().consultation_count().unwrap(), 0);
    assert_eq!(engine.store().prediction_count().unwrap(), 0);
}

/// Two analyses of a fresh customer: same score, one prediction row, two log rows.
#[test]
fn repeated_analysis_hits_cache_and_logs_twice() {
    let engine = make_engine();
    seed_customer(
        engine.store(), "CUST-002", 12, false, true, false,
        Some(ContractMode::OneYear), Some(InternetType::Dsl),
    );

    let first = engine.analyze("CUST-002", "EMP001").unwrap();
    let second = engine.analyze("CUST-002", "EMP001").unwrap();

    assert_eq!(first.probability, second.probability);
    assert!(!first.cache_hit);
    assert!(second.cache_hit);
    assert_eq!(engine.store().prediction_count_for("CUST-002").unwrap(), 1);
    assert_eq!(engine.store().consultations_for_customer("CUST-002").unwrap().len(), 2);
}

/// Profile edits do not invalidate a cached score.
#[test]
fn profile_edit_keeps_cached_score() {
    let engine = make_engine();
    seed_customer(
        engine.store(), "CUST-003", 2, false, false, false,
        Some(ContractMode::MonthToMonth), None,
    );

    let before = engine.analyze("CUST-003", "EMP001").unwrap();

    let mut profile = engine.store().get_customer("CUST-003").unwrap().unwrap();
    profile.tenure = 48;
    profile.partner = true;
    assert!(engine.store().update_customer_profile(&profile).unwrap());

    let after = engine.analyze("CUST-003", "EMP001").unwrap();
    assert_eq!(before.probability, after.probability, "cached score must be served as stored");
    assert!(after.cache_hit);
}

/// Recommendations use the current profile even when the score is cached.
#[test]
fn cached_high_score_recommends_from_current_profile() {
    let engine = make_engine();
    seed_customer(
        engine.store(), "CUST-004", 1, true, false, false,
        Some(ContractMode::MonthToMonth), Some(InternetType::FiberOptic),
    );
    engine.analyze("CUST-004", "EMP001").unwrap();

    let mut profile = engine.store().get_customer("CUST-004").unwrap().unwrap();
    profile.tenure = 30;
    engine.store().update_customer_profile(&profile).unwrap();

    let report = engine.analyze("CUST-004", "EMP001").unwrap();
    assert_eq!(titles(&report), vec![CONTRACT_STABILIZATION, VIP_RETENTION]);
}

/// A customer without contract or internet records still scores.
#[test]
fn missing_services_are_neutral() {
    let engine = make_engine();
    seed_customer(engine.store(), "CUST-005", 10, false, true, true, None, None);

    let report = engine.analyze("CUST-005", "EMP001").unwrap();

    assert_eq!(report.score, 30.0);
    assert_eq!(report.risk_level, RiskLevel::Low);
    assert!(report.recommendations.is_empty());
}

/// Medium risk is labelled High but gets no recommendations below 0.80.
#[test]
fn medium_risk_is_high_label_without_recommendations() {
    let engine = make_engine();
    // 0.30 + 0.25 + 0.05 = 0.60
    seed_customer(
        engine.store(), "CUST-006", 12, false, false, false,
        Some(ContractMode::MonthToMonth), None,
    );

    let report = engine.analyze("CUST-006", "EMP001").unwrap();

    assert_eq!(report.score, 60.0);
    assert_eq!(report.risk_level, RiskLevel::High);
    assert!(report.recommendations.is_empty());
}

/// Logging failure (unknown employee) does not affect the score or its persistence.
#[test]
fn audit_failure_is_swallowed() {
    let engine = make_engine();
    seed_customer(
        engine.store(), "CUST-007", 3, false, false, false,
        Some(ContractMode::MonthToMonth), Some(InternetType::FiberOptic),
    );

    let report = engine.analyze("CUST-007", "EMP-GHOST").unwrap();

    assert_eq!(report.score, 90.0);
    assert!(report.log_id.is_none(), "log write should have failed");
    assert_eq!(engine.store().consultation_count().unwrap(), 0);
    assert!(engine.store().get_prediction("CUST-007").unwrap().is_some(),
        "computed score must survive a failed log write");
}

/// Tests can lower the recommendation threshold without touching engine logic.
#[test]
fn substituted_threshold_activates_recommendations() {
    let mut config = EngineConfig::default();
    config.recommendation.high_risk_threshold = 0.50;
    let engine = make_engine_with(config);
    seed_customer(
        engine.store(), "CUST-008", 30, false, false, false,
        Some(ContractMode::MonthToMonth), None,
    );
    // 0.30 - 0.15 + 0.25 + 0.05 = 0.45 → below even the lowered threshold
    let low = engine.analyze("CUST-008", "EMP001").unwrap();
    assert!(low.recommendations.is_empty());

    seed_customer(
        engine.store(), "CUST-009", 30, true, false, false,
        Some(ContractMode::MonthToMonth), Some(InternetType::FiberOptic),
    );
    // 0.45 + 0.05 + 0.10 = 0.60
    let high = engine.analyze("CUST-009", "EMP001").unwrap();
    assert_eq!(titles(&high), vec![CONTRACT_STABILIZATION, VIP_RETENTION]);
}

/// Contract and internet text outside the known values scores as no adjustment.
#[test]
fn unrecognised_service_text_scores_from_base_rate() {
    let engine = make_engine();
    seed_customer(
        engine.store(), "CUST-010", 12, false, true, true,
        Some(ContractMode::Other("Quarterly".into())), Some(InternetType::Other("Cable".into())),
    );

    let report = engine.analyze("CUST-010", "EMP001").unwrap();

    assert_eq!(report.score, 30.0);
    assert_eq!(report.risk_level, RiskLevel::Low);
    assert!(report.recommendations.is_empty());
    assert_eq!(engine.store().consultation_count().unwrap(), 1);

    let internet = engine.store().get_internet_service("CUST-010").unwrap().unwrap();
    assert_eq!(internet.internet_type.as_str(), "Cable");
    let contract = engine.store().get_contract("CUST-010").unwrap().unwrap();
    assert_eq!(contract.contract_mode.as_str(), "Quarterly");
}

#[test]
fn engine_rejects_inverted_bounds() {
    let store = GuardStore::in_memory().unwrap();
    store.migrate().unwrap();
    let mut config = EngineConfig::default();
    config.scoring.floor = 0.9;
    config.scoring.ceiling = 0.1;

    assert!(RetentionEngine::new(config, store).is_err());
}

#[test]
fn engine_rejects_nan_weight() {
    let store = GuardStore::in_memory().unwrap();
    store.migrate().unwrap();
    let mut config = EngineConfig::default();
    config.scoring.base_rate = f64::NAN;

    let err = RetentionEngine::new(config, store).err().unwrap();
    assert!(err.to_string().contains("base_rate"), "got: {err}");
}
