//! Client-held session: the logged-in user record under a single key.
//!
//! [`SessionStore`] serializes the whole [`User`](crate::domain::User) record
//! into the storage it wraps. Nothing signs or verifies it; whatever the
//! client presents is trusted as-is. Two storages exist: [`CookieStorage`]
//! (the `eventflow_user` cookie, used by the HTTP layer) and
//! [`MemoryStorage`] (a plain map).

pub mod cookie_storage;
pub mod store;

pub use cookie_storage::CookieStorage;
pub use store::{MemoryStorage, SESSION_KEY, SessionStorage, SessionStore};

/// Session backed by the request/response cookie pair.
pub type CookieSession = SessionStore<CookieStorage>;
