use serde::{Deserialize, Serialize};

fn default_max_guards() -> u8 {
    5
}

fn default_guard_award_interval() -> u32 {
    7
}

fn default_points_per_work_hour() -> i64 {
    5
}

fn default_violation_penalty() -> i64 {
    50
}

fn default_points_per_streak_unit() -> i64 {
    100
}

fn default_max_write_attempts() -> u32 {
    4
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoyaltyPolicy {
    #[serde(default = "default_max_guards")]
    pub max_guards: u8,
    #[serde(default = "default_guard_award_interval")]
    pub guard_award_interval: u32,
    #[serde(default = "default_points_per_work_hour")]
    pub points_per_work_hour: i64,
    #[serde(default = "default_violation_penalty")]
    pub violation_penalty: i64,
    #[serde(default = "default_points_per_streak_unit")]
    pub points_per_streak_unit: i64,
    #[serde(default = "default_max_write_attempts")]
    pub max_write_attempts: u32,
}

impl Default for LoyaltyPolicy {
    fn default() -> Self {
        Self {
            max_guards: default_max_guards(),
            guard_award_interval: default_guard_award_interval(),
            points_per_work_hour: default_points_per_work_hour(),
            violation_penalty: default_violation_penalty(),
            points_per_streak_unit: default_points_per_streak_unit(),
            max_write_attempts: default_max_write_attempts(),
        }
    }
}
