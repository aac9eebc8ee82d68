use serde::Serialize;
use tracing::debug;

use super::calc;
use crate::logs::dto::DailyLog;
use crate::profile::Profile;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMetrics {
    pub bmi: Option<f64>,
    pub bmr: f64,
    pub tdee: f64,
    pub target_calories: f64,
    pub consumed_calories: f64,
    pub remaining_calories: f64,
    pub consumed_percent: Option<i64>,
}

impl BodyMetrics {
    pub fn compute(profile: &Profile, log: &DailyLog) -> Self {
        let target = calc::target_calories(profile);
        let consumed = calc::consumed_calories(&log.foods);
        Self {
            bmi: calc::bmi(profile.weight, profile.height),
            bmr: calc::bmr(profile),
            tdee: calc::tdee(profile),
            target_calories: target,
            consumed_calories: consumed,
            remaining_calories: calc::remaining_calories(target, consumed),
            consumed_percent: calc::consumed_percent(target, consumed),
        }
    }
}

/// Caches [`BodyMetrics`] against the (profile, consumed calories) pair it
/// was computed from. Water and food order do not invalidate it.
#[derive(Debug, Default)]
pub struct MetricsMemo {
    key: Option<(Profile, f64)>,
    value: Option<BodyMetrics>,
    computations: u64,
}

impl MetricsMemo {
    pub fn get(&mut self, profile: &Profile, log: &DailyLog) -> BodyMetrics {
        let consumed = calc::consumed_calories(&log.foods);
        if let (Some((p, c)), Some(v)) = (&self.key, self.value) {
            if p == profile && *c == consumed {
                return v;
            }
        }
        let v = BodyMetrics::compute(profile, log);
        self.key = Some((profile.clone(), consumed));
        self.value = Some(v);
        self.computations += 1;
        debug!(computations = self.computations, "metrics recomputed");
        v
    }

    #[cfg(test)]
    pub fn computations(&self) -> u64 {
        self.computations
    }
}
