//! Collaborators shared by every command.

use mindguard_core::{CheckInService, Clock, Config, Database, SystemClock};

pub struct Context {
    pub config: Config,
    pub db: Database,
    pub clock: SystemClock,
}

impl Context {
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load()?;
        let clock = SystemClock::new(config.checkin.offset()?);
        let db = Database::open()?;
        Ok(Self { config, db, clock })
    }

    /// The explicit user, or the configured default.
    pub fn user(&self, user: Option<String>) -> String {
        user.filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| self.config.checkin.default_user.clone())
    }

    pub fn service<C: Clock>(&self, clock: C) -> CheckInService<&Database, C> {
        CheckInService::new(&self.db, clock)
            .with_policy(self.config.rewards.clone())
            .with_max_attempts(self.config.checkin.max_attempts)
    }
}
