use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Duration;
use tokio::sync::RwLock;

use crate::database::{ApplicationStore, GreetingStore};
use crate::error::Result;
use crate::models::application::{
    Application, ApplicationChanges, ApplicationStatus, NewApplication,
};
use crate::models::hello_world::DEFAULT_GREETING;
use crate::utils::time::now;

#[derive(Default)]
struct MemoryState {
    last_id: i32,
    rows: BTreeMap<i32, Application>,
}

/// Process-local store with the same ordering and timestamp rules as the
/// Postgres tables. Contents are lost on restart.
pub struct MemoryStore {
    state: RwLock<MemoryState>,
    greeting: Option<String>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_greeting(Some(DEFAULT_GREETING.to_string()))
    }

    pub fn with_greeting(greeting: Option<String>) -> Self {
        Self {
            state: RwLock::new(MemoryState::default()),
            greeting,
        }
    }
}

fn newest_first(mut rows: Vec<Application>) -> Vec<Application> {
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    rows
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn insert(&self, application: NewApplication) -> Result<Application> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let created_at = now();
        let stored = Application {
            id: state.last_id,
            candidate_name: application.candidate_name,
            candidate_email: application.candidate_email,
            candidate_full_name: application.candidate_full_name,
            position: application.position,
            cv_filename: application.cv_filename,
            cover_letter: application.cover_letter,
            status: ApplicationStatus::default(),
            notes: None,
            created_at,
            updated_at: created_at,
        };
        state.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<Application>> {
        let state = self.state.read().await;
        Ok(newest_first(state.rows.values().cloned().collect()))
    }

    async fn list_by_email(&self, email: &str) -> Result<Vec<Application>> {
        let state = self.state.read().await;
        let rows = state
            .rows
            .values()
            .filter(|row| row.candidate_email == email)
            .cloned()
            .collect();
        Ok(newest_first(rows))
    }

    async fn find(&self, id: i32) -> Result<Option<Application>> {
        let state = self.state.read().await;
        Ok(state.rows.get(&id).cloned())
    }

    async fn update(&self, id: i32, changes: ApplicationChanges) -> Result<Option<Application>> {
        let mut state = self.state.write().await;
        let Some(row) = state.rows.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(status) = changes.status {
            row.status = status;
        }
        if let Some(notes) = changes.notes {
            row.notes = Some(notes);
        }
        row.updated_at = now().max(row.updated_at + Duration::microseconds(1));

        Ok(Some(row.clone()))
    }

    async fn count_by_status(&self) -> Result<Vec<(ApplicationStatus, i64)>> {
        let state = self.state.read().await;
        Ok(ApplicationStatus::ALL
            .into_iter()
            .map(|status| {
                let count = state.rows.values().filter(|row| row.status == status).count();
                (status, count as i64)
            })
            .collect())
    }
}

#[async_trait]
impl GreetingStore for MemoryStore {
    async fn greeting(&self) -> Result<Option<String>> {
        Ok(self.greeting.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_application(name: &str, email: &str) -> NewApplication {
        NewApplication {
            candidate_name: name.to_string(),
            candidate_email: email.to_string(),
            candidate_full_name: name.to_uppercase(),
            position: "Backend Developer".to_string(),
            cv_filename: None,
            cover_letter: None,
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_and_rows_list_newest_first() {
        let store = MemoryStore::new();
        let first = store.insert(new_application("a", "a@x.com")).await.unwrap();
        let second = store.insert(new_application("b", "b@x.com")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let ids: Vec<i32> = store.list_all().await.unwrap().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn email_filter_is_exact_and_case_sensitive() {
        let store = MemoryStore::new();
        store.insert(new_application("a", "john@x.com")).await.unwrap();
        store.insert(new_application("b", "John@x.com")).await.unwrap();
        store.insert(new_application("c", "john@x.com ")).await.unwrap();

        let matches = store.list_by_email("john@x.com").await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].candidate_name, "a");
        assert!(store.list_by_email("nobody@x.com").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_moves_updated_at_forward_and_keeps_omitted_fields() {
        let store = MemoryStore::new();
        let created = store.insert(new_application("a", "a@x.com")).await.unwrap();

        let noted = store
            .update(
                created.id,
                ApplicationChanges {
                    status: None,
                    notes: Some("call back".to_string()),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(noted.status, ApplicationStatus::Submitted);
        assert!(noted.updated_at > created.updated_at);

        let moved = store
            .update(
                created.id,
                ApplicationChanges {
                    status: Some(ApplicationStatus::Rejected),
                    notes: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(moved.notes.as_deref(), Some("call back"));
        assert!(moved.updated_at > noted.updated_at);
        assert_eq!(moved.created_at, created.created_at);
    }

    #[tokio::test]
    async fn update_of_unknown_id_inserts_nothing() {
        let store = MemoryStore::new();
        let result = store
            .update(7, ApplicationChanges::default())
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn greeting_can_be_absent() {
        assert_eq!(
            MemoryStore::new().greeting().await.unwrap().as_deref(),
            Some(DEFAULT_GREETING)
        );
        assert!(MemoryStore::with_greeting(None)
            .greeting()
            .await
            .unwrap()
            .is_none());
    }
}
