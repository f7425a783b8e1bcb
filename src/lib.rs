//! # eventflow
//!
//! Role-based event management service. Participants browse events and buy
//! tickets, organizers publish events within the limits of their plan, and
//! admins oversee users, plans, event types and every event.
//!
//! Pages are served as JSON views: each endpoint returns everything its
//! screen renders, and each mutation returns a toast plus the refetched
//! page. The logged-in user travels in a cookie.
//!
//! ## Architecture
//!
//! ```text
//! Browser (cookie session)
//!     │
//!     ├── Router + RouteGuard (api/)
//!     ├── Page handlers and views (api/handlers, api/dto)
//!     │
//!     ├── Page services (service/)
//!     │
//!     ├── Backend trait (backend/)
//!     │     ├── PostgresBackend (sqlx)
//!     │     └── MemoryBackend
//!     │
//!     └── PostgreSQL: tables + statistics functions (migrations/)
//! ```

pub mod api;
pub mod app_state;
pub mod backend;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod session;
