//! Data Transfer Objects: request bodies and page view models.
//!
//! View models carry both raw values and the display strings the pages
//! show (Portuguese labels, `R$` prices, `dd/mm/yyyy` dates).

pub mod admin_dto;
pub mod auth_dto;
pub mod common_dto;
pub mod format;
pub mod home_dto;
pub mod organizer_dto;
pub mod participant_dto;

pub use admin_dto::*;
pub use auth_dto::*;
pub use common_dto::*;
pub use home_dto::*;
pub use organizer_dto::*;
pub use participant_dto::*;
