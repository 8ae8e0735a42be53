use std::sync::Arc;

use crate::database::GreetingStore;
use crate::error::Result;
use crate::models::hello_world::DEFAULT_GREETING;

#[derive(Clone)]
pub struct GreetingService {
    store: Arc<dyn GreetingStore>,
}

impl GreetingService {
    pub fn new(store: Arc<dyn GreetingStore>) -> Self {
        Self { store }
    }

    /// The seeded greeting, or the built-in one when the seed row is missing.
    pub async fn message(&self) -> Result<String> {
        let message = self.store.greeting().await?;
        Ok(message.unwrap_or_else(|| DEFAULT_GREETING.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MockGreetingStore;

    #[tokio::test]
    async fn seeded_message_is_returned() {
        let mut store = MockGreetingStore::new();
        store
            .expect_greeting()
            .returning(|| Ok(Some("Hi from the seed row".to_string())));
        let service = GreetingService::new(Arc::new(store));
        assert_eq!(service.message().await.unwrap(), "Hi from the seed row");
    }

    #[tokio::test]
    async fn missing_row_falls_back_to_default() {
        let mut store = MockGreetingStore::new();
        store.expect_greeting().returning(|| Ok(None));
        let service = GreetingService::new(Arc::new(store));
        assert_eq!(service.message().await.unwrap(), DEFAULT_GREETING);
    }
}
