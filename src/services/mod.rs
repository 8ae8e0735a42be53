pub mod application_service;
pub mod greeting_service;
pub mod transition_policy;
