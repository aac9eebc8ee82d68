use serde::Serialize;
use time::{Date, Duration};

use super::calc::{round1, DAILY_DEFICIT_KCAL};
use crate::logs::services::date_key;

/// Energy in one kilogram of body fat.
pub const KCAL_PER_KG: f64 = 7700.0;
/// Number of intervals in the sampled curve.
pub const PROJECTION_INTERVALS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionPoint {
    pub day: u64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum WeightProjection {
    /// Current weight is already at or below the target.
    GoalMet,
    InProgress {
        days_to_goal: u64,
        daily_deficit: f64,
        /// `YYYY-MM-DD`; `None` past the calendar's range.
        projected_date: Option<String>,
        points: Vec<ProjectionPoint>,
    },
}

/// Saturates at `u64::MAX` for absurd inputs.
pub fn days_to_goal(weight_to_lose: f64) -> u64 {
    (weight_to_lose * KCAL_PER_KG / DAILY_DEFICIT_KCAL).ceil() as u64
}

/// Linear loss at a fixed 500 kcal/day deficit, sampled at
/// `PROJECTION_INTERVALS + 1` days. The last sample lands on `days_to_goal`.
pub fn project_weight(weight: f64, target_weight: f64, today: Date) -> WeightProjection {
    let weight_to_lose = weight - target_weight;
    if weight_to_lose <= 0.0 {
        return WeightProjection::GoalMet;
    }

    let days = days_to_goal(weight_to_lose);
    let step = days.div_ceil(PROJECTION_INTERVALS);
    let points = (0..=PROJECTION_INTERVALS)
        .map(|i| {
            let day = i.saturating_mul(step).min(days);
            ProjectionPoint {
                day,
                weight: round1(weight - day as f64 * DAILY_DEFICIT_KCAL / KCAL_PER_KG),
            }
        })
        .collect();

    WeightProjection::InProgress {
        days_to_goal: days,
        daily_deficit: DAILY_DEFICIT_KCAL,
        projected_date: i64::try_from(days)
            .ok()
            .and_then(|d| d.checked_mul(86_400))
            .and_then(|secs| today.checked_add(Duration::seconds(secs)))
            .map(date_key),
        points,
    }
}

#[cfg(test)]
mod projection_tests {
    use super::*;
    use time::macros::date;

    fn points(p: &WeightProjection) -> &[ProjectionPoint] {
        match p {
            WeightProjection::InProgress { points, .. } => points,
            WeightProjection::GoalMet => panic!("expected a projection"),
        }
    }

    #[test]
    fn goal_met_is_distinct() {
        assert_eq!(project_weight(60.0, 60.0, date!(2026 - 10 - 15)), WeightProjection::GoalMet);
        assert_eq!(project_weight(55.0, 60.0, date!(2026 - 10 - 15)), WeightProjection::GoalMet);
    }

    #[test]
    fn seven_point_seven_kg_takes_119_days() {
        let p = project_weight(70.0, 62.3, date!(2026 - 10 - 15));
        let WeightProjection::InProgress {
            days_to_goal,
            projected_date,
            ..
        } = &p
        else {
            panic!("expected a projection");
        };
        assert_eq!(*days_to_goal, 119);
        assert_eq!(projected_date.as_deref(), Some("2027-02-11"));

        let pts = points(&p);
        assert_eq!(pts.len(), 11);
        assert_eq!(pts[0], ProjectionPoint { day: 0, weight: 70.0 });
        assert_eq!(pts[1].day, 12);
        assert_eq!(pts[9].day, 108);
        assert_eq!(pts[10].day, 119);
        assert_eq!(pts[10].weight, 62.3);
    }

    #[test]
    fn short_goals_clamp_every_late_sample() {
        // 1 kg → ceil(15.4) = 16 days, step 2
        let p = project_weight(61.0, 60.0, date!(2026 - 10 - 15));
        let days: Vec<u64> = points(&p).iter().map(|pt| pt.day).collect();
        assert_eq!(days, [0, 2, 4, 6, 8, 10, 12, 14, 16, 16, 16]);
        assert_eq!(points(&p).last().unwrap().weight, 60.0);
    }

    #[test]
    fn serializes_with_status_tag() {
        let v = serde_json::to_value(WeightProjection::GoalMet).unwrap();
        assert_eq!(v["status"], "goal_met");
        let v = serde_json::to_value(project_weight(61.0, 60.0, date!(2026 - 10 - 15))).unwrap();
        assert_eq!(v["status"], "in_progress");
        assert_eq!(v["daysToGoal"], 16);
        assert!(v.get("days_to_goal").is_none());
    }

    #[test]
    fn huge_weights_still_end_on_goal_day() {
        let p = project_weight(3.0e8, 0.0, date!(2026 - 10 - 15));
        let WeightProjection::InProgress {
            days_to_goal,
            projected_date,
            ..
        } = &p
        else {
            panic!("expected a projection");
        };
        assert_eq!(*days_to_goal, 4_620_000_000);
        assert_eq!(*projected_date, None);

        let pts = points(&p);
        assert_eq!(pts.len(), 11);
        assert!(pts.windows(2).all(|w| w[0].day <= w[1].day));
        assert_eq!(pts[10].day, *days_to_goal);

        let p = project_weight(f64::MAX, -f64::MAX, date!(2026 - 10 - 15));
        assert_eq!(points(&p)[10].day, u64::MAX);
    }
}
