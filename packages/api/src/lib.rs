//! # API crate: session-aware client for the task backend
//!
//! Everything the frontends need to talk to the REST backend lives here. UI
//! code never builds requests itself: it holds a [`Gateway`] (or one of the
//! typed clients wrapping it) and reacts to [`ApiError`]s.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | [`ApiConfig`] and the ordered base-address resolution rules |
//! | [`gateway`] | Authenticated dispatch: bearer attachment, 401 teardown, connection errors |
//! | [`auth`] | Sign-up / sign-in writing the session store; client-side form checks |
//! | [`tasks`] | Typed task CRUD scoped to the signed-in user |
//! | [`models`] | Wire types (`Task`, `TaskDraft`, and the session's `User`) |
//! | [`response`] | Turning raw responses into typed results and `detail` messages |
//! | [`navigator`] | The navigation seam used for login redirects |
//! | [`error`] | The [`ApiError`] taxonomy |
//!
//! ## Wiring
//!
//! ```no_run
//! use std::sync::Arc;
//! use api::{ApiConfig, AuthClient, Gateway, HeadlessNavigator, TaskClient};
//! use store::{MemoryStore, SessionStore};
//!
//! let sessions = Arc::new(SessionStore::new(MemoryStore::new()));
//! let gateway = Gateway::new(ApiConfig::default(), sessions, HeadlessNavigator::localhost());
//! let auth = AuthClient::new(gateway.clone());
//! let tasks = TaskClient::new(gateway);
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod navigator;
pub mod response;
pub mod tasks;

pub use auth::AuthClient;
pub use config::{ApiConfig, BaseRule, ConfigError, ResolvedBase};
pub use error::ApiError;
pub use gateway::{Gateway, RequestOptions};
pub use models::{Session, Task, TaskDraft, User};
pub use navigator::{HeadlessNavigator, Navigator, LOGIN_PATH};
pub use tasks::TaskClient;
