//! Reputation Engine
//!
//! Feedback on a recommendation moves two scores: the rated routine's running
//! average and the reputation of the expert who wrote it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐     ┌─────────────────┐
//! │ Feedback        │────►│ RoutineTemplate  │────►│ ExpertRecord    │
//! │ (rating 1-100)  │     │ (running mean)   │     │ (EMA, w = 0.9)  │
//! └─────────────────┘     └──────────────────┘     └─────────────────┘
//! ```
//!
//! ## Score Model
//!
//! - Experts start at 80 and stay within 0-100
//! - Each rating moves the expert score by an integer-truncated EMA:
//!   `9 * (old / 10) + rating / 10`
//! - Routines keep an integer-truncated mean of all ratings received
//! - Both updates are pure; the caller writes the returned record back

mod score;

pub use score::{
    next_expert_score, next_routine_rating, rate_expert, rate_routine, RoutineRating,
    INITIAL_EXPERT_SCORE, MAX_REPUTATION_SCORE,
};
