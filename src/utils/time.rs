use chrono::{DateTime, SubsecRound, Utc};

/// Current time truncated to microseconds, the precision Postgres keeps.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
