use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_GREETING: &str = "Hello World from DevFest PTA 2025!";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HelloWorld {
    pub id: i32,
    pub message: String,
}
