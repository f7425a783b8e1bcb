//! Endpoint handlers organized by page.

pub mod admin;
pub mod auth;
pub mod home;
pub mod organizer;
pub mod participant;
pub mod system;

/// Past participle used in status-change toasts.
const fn status_word(active: bool) -> &'static str {
    if active { "ativado" } else { "desativado" }
}
