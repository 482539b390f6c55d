//! Recommendations and feedback
//!
//! A recommendation is created `Created` and moves to `Rated` exactly once,
//! when its target user submits feedback. There is no transition out of
//! `Rated`.

use serde::{Deserialize, Serialize};

use super::bounded::Comments;
use super::identity::Identity;
use super::routine::RoutineId;

pub type RecommendationId = u64;

/// Weather conditions snapshotted when a recommendation is made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherContext {
    /// Degrees, -50..=50
    pub temperature: i32,
    /// Percent, 0..=100
    pub humidity: u32,
    /// 0..=12
    pub uv_index: u32,
    pub timestamp: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationState {
    Created,
    Rated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub user: Identity,
    pub routine_id: RoutineId,
    pub weather: WeatherContext,
    pub recommended_at: u64,
    pub has_feedback: bool,
}

impl Recommendation {
    pub fn state(&self) -> RecommendationState {
        if self.has_feedback {
            RecommendationState::Rated
        } else {
            RecommendationState::Created
        }
    }
}

/// Feedback on a recommendation, keyed by the recommendation's ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub user: Identity,
    /// 1..=100
    pub rating: u32,
    pub comments: Option<Comments>,
    pub submitted_at: u64,
}
