pub mod application_dto;
pub mod system_dto;
