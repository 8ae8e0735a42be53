use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::models::application::ApplicationStatus;

/// Which status changes `update` accepts.
///
/// Recruiters may move an application between any two statuses unless a
/// table is installed. Re-applying the current status is always accepted.
/// The server always runs unrestricted; a table is installed only by library
/// callers through [`ApplicationService::with_policy`].
///
/// [`ApplicationService::with_policy`]: crate::services::application_service::ApplicationService::with_policy
#[derive(Debug, Clone, Default)]
pub enum TransitionPolicy {
    #[default]
    Unrestricted,
    Table(HashMap<ApplicationStatus, HashSet<ApplicationStatus>>),
}

impl TransitionPolicy {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (ApplicationStatus, ApplicationStatus)>,
    {
        let mut table: HashMap<ApplicationStatus, HashSet<ApplicationStatus>> = HashMap::new();
        for (from, to) in pairs {
            table.entry(from).or_default().insert(to);
        }
        TransitionPolicy::Table(table)
    }

    pub fn allows(&self, from: ApplicationStatus, to: ApplicationStatus) -> bool {
        if from == to {
            return true;
        }
        match self {
            TransitionPolicy::Unrestricted => true,
            TransitionPolicy::Table(table) => table.get(&from).is_some_and(|next| next.contains(&to)),
        }
    }

    pub fn check(&self, from: ApplicationStatus, to: ApplicationStatus) -> Result<()> {
        if self.allows(from, to) {
            Ok(())
        } else {
            Err(Error::Conflict(format!(
                "Cannot move application from {} to {}",
                from, to
            )))
        }
    }
}
