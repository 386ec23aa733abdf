use serde::{Deserialize, Serialize};

// ── Risk scoring ───────────────────────────────────────────────────

/// Additive weights of the churn-risk model. Every adjustment is summed
/// onto `base_rate` before the result is clamped to [floor, ceiling].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub base_rate: f64,
    /// Tenure strictly below this many months counts as short.
    pub short_tenure_months: u32,
    pub short_tenure_penalty: f64,
    /// Tenure strictly above this many months counts as long.
    pub long_tenure_months: u32,
    pub long_tenure_credit: f64,
    pub month_to_month_penalty: f64,
    pub two_year_credit: f64,
    pub fiber_optic_penalty: f64,
    pub senior_penalty: f64,
    /// Applied when the customer has neither partner nor dependents.
    pub isolation_penalty: f64,
    pub floor: f64,
    pub ceiling: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base_rate: 0.30,
            short_tenure_months: 6,
            short_tenure_penalty: 0.20,
            long_tenure_months: 24,
            long_tenure_credit: -0.15,
            month_to_month_penalty: 0.25,
            two_year_credit: -0.20,
            fiber_optic_penalty: 0.10,
            senior_penalty: 0.05,
            isolation_penalty: 0.05,
            floor: 0.01,
            ceiling: 0.99,
        }
    }
}

// ── Retention recommendations ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Recommendations are produced only for scores strictly above this.
    pub high_risk_threshold: f64,
    /// Tenure strictly above this selects the VIP branch.
    pub vip_tenure_months: u32,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            high_risk_threshold: 0.80,
            vip_tenure_months: 24,
        }
    }
}

// ── Reporting ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportingConfig {
    /// Scores strictly above this are labelled "High", others "Low".
    pub risk_level_threshold: f64,
    pub recent_activity_limit: usize,
    pub report_high_risk_limit: usize,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            risk_level_threshold: 0.50,
            recent_activity_limit: 10,
            report_high_risk_limit: 20,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub scoring: ScoringWeights,
    #[serde(default)]
    pub recommendation: RecommendationConfig,
    #[serde(default)]
    pub reporting: ReportingConfig,
}

impl EngineConfig {
    /// Load from the data/ directory.
    /// In tests, use EngineConfig::default().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/engine/engine_config.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: EngineConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject weight sets that would make the clamp or thresholds meaningless.
    pub fn validate(&self) -> anyhow::Result<()> {
        let s = &self.scoring;
        let finite = [
            ("base_rate", s.base_rate),
            ("short_tenure_penalty", s.short_tenure_penalty),
            ("long_tenure_credit", s.long_tenure_credit),
            ("month_to_month_penalty", s.month_to_month_penalty),
            ("two_year_credit", s.two_year_credit),
            ("fiber_optic_penalty", s.fiber_optic_penalty),
            ("senior_penalty", s.senior_penalty),
            ("isolation_penalty", s.isolation_penalty),
            ("high_risk_threshold", self.recommendation.high_risk_threshold),
            ("risk_level_threshold", self.reporting.risk_level_threshold),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            anyhow::bail!("{name} must be a finite number, got {value}");
        }
        if !(0.0..=1.0).contains(&s.floor) || !(0.0..=1.0).contains(&s.ceiling) {
            anyhow::bail!("scoring bounds must lie in [0, 1]: floor={} ceiling={}", s.floor, s.ceiling);
        }
        if s.floor > s.ceiling {
            anyhow::bail!("scoring floor {} exceeds ceiling {}", s.floor, s.ceiling);
        }
        if s.short_tenure_months > s.long_tenure_months {
            anyhow::bail!(
                "short tenure cutoff {} exceeds long tenure cutoff {}",
                s.short_tenure_months,
                s.long_tenure_months
            );
        }
        if self.reporting.recent_activity_limit == 0 {
            anyhow::bail!("recent_activity_limit must be positive");
        }
        Ok(())
    }
}
