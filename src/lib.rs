//! agentdir - Agent directory
//!
//! Browses catalogs of skills, MCP servers, tools and plugins, filters them by
//! query and facets, and keeps per-user favorites in sync with a profile store.

pub mod auth;
pub mod bootstrap;
pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod models;
pub mod paths;
pub mod session;
pub mod store;
pub mod submit;

pub use auth::{AuthProvider, LocalAuth, SignInProvider, Subscription};
pub use catalog::{Catalog, CatalogError};
pub use config::{set_config_value, Settings};
pub use error::{AuthError, StoreError, ToggleError, ValidationError};
pub use favorites::{FavoritesState, SetOp, ToggleOutcome};
pub use filter::{filter, FilterCriteria, SourceFacet};
pub use models::{CatalogItem, Domain, Identity, RemoteProfile, Source};
pub use paths::Paths;
pub use session::{AuthState, Session};
pub use store::{JsonProfileStore, MemoryProfileStore, ProfileStore};
pub use submit::{submit, JsonSubmissionStore, Submission, SubmissionStore};
