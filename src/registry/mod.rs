//! Routine Registry
//!
//! Users register preference profiles, the admin verifies experts, experts
//! publish routine templates, users receive recommendations and rate them.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐     ┌─────────────────┐
//! │ validation      │────►│ Registry         │◄────│ reputation      │
//! │ (ranges, roles) │     │ (operations)     │     │ (score updates) │
//! └─────────────────┘     └──────────────────┘     └─────────────────┘
//!                                  │
//!                                  ▼
//!                          ┌──────────────────┐
//!                          │ RegistryStore    │
//!                          │ (keyed maps,     │
//!                          │  ID counters)    │
//!                          └──────────────────┘
//! ```
//!
//! ## Recommendation lifecycle
//!
//! `generate_recommendation` creates a recommendation in the `Created` state.
//! The first valid `submit_feedback` from its target user moves it to
//! `Rated`, records the feedback and updates routine and expert reputation.
//! Every later attempt fails with `AlreadyRated`.

pub mod error;
pub mod matching;
pub mod operations;
pub mod snapshot;
pub mod store;
pub mod validation;

pub use error::{RegistryError, RegistryResult};
pub use matching::{MatchingStrategy, DEFAULT_FIXED_ROUTINE_ID};
pub use operations::{Registry, RegistryOptions};
pub use snapshot::{RegistrySnapshot, SNAPSHOT_VERSION};
pub use store::{MemoryStore, RegistryStore, StoreState};
