//! Reward points awarded per check-in.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A one-off bonus for reaching a streak length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Streak length that triggers the bonus
    pub streak: u32,
    /// Points added on top of the base award
    pub bonus: u64,
}

/// Points policy for check-ins.
///
/// Serialized as the `[rewards]` section of `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardPolicy {
    #[serde(default = "default_base_points")]
    pub base_points: u64,
    #[serde(default = "default_milestones")]
    pub milestones: Vec<Milestone>,
}

fn default_base_points() -> u64 {
    10
}

fn default_milestones() -> Vec<Milestone> {
    vec![
        Milestone {
            streak: 7,
            bonus: 50,
        },
        Milestone {
            streak: 30,
            bonus: 200,
        },
    ]
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            base_points: default_base_points(),
            milestones: default_milestones(),
        }
    }
}

impl RewardPolicy {
    /// The milestone reached at exactly `streak`, if any.
    pub fn milestone_at(&self, streak: u32) -> Option<Milestone> {
        self.milestones.iter().copied().find(|m| m.streak == streak)
    }

    /// Points for extending a run to `new_streak`.
    ///
    /// Thresholds are unique, so at most one bonus applies per call.
    pub fn points_for(&self, new_streak: u32) -> (u64, Option<Milestone>) {
        match self.milestone_at(new_streak) {
            Some(milestone) => (self.base_points.saturating_add(milestone.bonus), Some(milestone)),
            None => (self.base_points, None),
        }
    }

    /// Reject thresholds that could never fire or would fire twice.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = Vec::with_capacity(self.milestones.len());
        for milestone in &self.milestones {
            if milestone.streak < 2 {
                return Err(ConfigError::InvalidValue {
                    key: "rewards.milestones".to_string(),
                    message: format!(
                        "milestone streak must be at least 2, got {}",
                        milestone.streak
                    ),
                });
            }
            if seen.contains(&milestone.streak) {
                return Err(ConfigError::InvalidValue {
                    key: "rewards.milestones".to_string(),
                    message: format!("duplicate milestone streak {}", milestone.streak),
                });
            }
            seen.push(milestone.streak);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RewardPolicy::default();
        assert_eq!(policy.points_for(1), (10, None));
        assert_eq!(policy.points_for(6), (10, None));
        assert_eq!(policy.points_for(7).0, 60);
        assert_eq!(policy.points_for(30).0, 210);
        assert_eq!(policy.points_for(31), (10, None));
    }

    #[test]
    fn test_milestone_is_reported() {
        let policy = RewardPolicy::default();
        let (_, milestone) = policy.points_for(30);
        assert_eq!(
            milestone,
            Some(Milestone {
                streak: 30,
                bonus: 200
            })
        );
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let policy = RewardPolicy {
            base_points: 10,
            milestones: vec![
                Milestone { streak: 7, bonus: 50 },
                Milestone { streak: 7, bonus: 80 },
            ],
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_first_day_milestone() {
        let policy = RewardPolicy {
            base_points: 10,
            milestones: vec![Milestone { streak: 1, bonus: 5 }],
        };
        assert!(policy.validate().is_err());
        assert!(RewardPolicy::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let policy: RewardPolicy = toml::from_str("base_points = 15").unwrap();
        assert_eq!(policy.base_points, 15);
        assert_eq!(policy.milestones.len(), 2);
    }
}
