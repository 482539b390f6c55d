//! Registry snapshots
//!
//! Whole-state export and restore for the in-memory store, with a JSON
//! encoding for hosts that persist state between runs.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::registry::operations::{Registry, RegistryOptions};
use crate::registry::store::{MemoryStore, StoreState};
use crate::registry::validation::validate_rating;
use crate::reputation::MAX_REPUTATION_SCORE;

/// Format version written into every snapshot
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub version: u32,
    /// Highest host clock value the registry had seen
    pub last_clock: u64,
    pub state: StoreState,
}

impl RegistrySnapshot {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to encode registry snapshot")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self =
            serde_json::from_str(json).context("Failed to decode registry snapshot")?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(anyhow::anyhow!(
                "Unsupported snapshot version {} (expected {})",
                snapshot.version,
                SNAPSHOT_VERSION
            ));
        }
        snapshot.check_counters()?;
        snapshot.check_records()?;

        Ok(snapshot)
    }

    /// Counters must lie past every stored ID, or IDs would be reused
    fn check_counters(&self) -> Result<()> {
        let state = &self.state;
        if state.next_routine_id == 0 || state.next_recommendation_id == 0 {
            return Err(anyhow::anyhow!("Snapshot ID counters must start at 1"));
        }
        if let Some((&last, _)) = state.routines.iter().next_back() {
            if last >= state.next_routine_id {
                return Err(anyhow::anyhow!(
                    "Snapshot routine counter {} does not exceed stored routine {}",
                    state.next_routine_id,
                    last
                ));
            }
        }
        if let Some((&last, _)) = state.recommendations.iter().next_back() {
            if last >= state.next_recommendation_id {
                return Err(anyhow::anyhow!(
                    "Snapshot recommendation counter {} does not exceed stored recommendation {}",
                    state.next_recommendation_id,
                    last
                ));
            }
        }
        Ok(())
    }

    /// Scores and averages in range; feedback exists exactly for rated recommendations
    fn check_records(&self) -> Result<()> {
        let state = &self.state;

        for (id, expert) in &state.experts {
            if expert.reputation_score > MAX_REPUTATION_SCORE {
                return Err(anyhow::anyhow!(
                    "Snapshot expert {} has reputation {} above {}",
                    id,
                    expert.reputation_score,
                    MAX_REPUTATION_SCORE
                ));
            }
        }

        for (id, routine) in &state.routines {
            if routine.average_rating > MAX_REPUTATION_SCORE {
                return Err(anyhow::anyhow!(
                    "Snapshot routine {} has average rating {} above {}",
                    id,
                    routine.average_rating,
                    MAX_REPUTATION_SCORE
                ));
            }
        }

        for (id, feedback) in &state.feedback {
            let recommendation = state.recommendations.get(id).ok_or_else(|| {
                anyhow::anyhow!("Snapshot feedback {} has no recommendation", id)
            })?;
            if !recommendation.has_feedback || recommendation.user != feedback.user {
                return Err(anyhow::anyhow!(
                    "Snapshot feedback {} does not match its recommendation",
                    id
                ));
            }
            validate_rating(feedback.rating)
                .with_context(|| format!("Snapshot feedback {} has an invalid rating", id))?;
        }

        for (id, recommendation) in &state.recommendations {
            if recommendation.has_feedback && !state.feedback.contains_key(id) {
                return Err(anyhow::anyhow!(
                    "Snapshot recommendation {} is marked rated but has no feedback",
                    id
                ));
            }
        }

        Ok(())
    }
}

impl Registry<MemoryStore> {
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            version: SNAPSHOT_VERSION,
            last_clock: self.last_clock(),
            state: self.store().to_state(),
        }
    }

    pub fn restore(snapshot: RegistrySnapshot, options: RegistryOptions) -> Self {
        info!(
            routines = snapshot.state.routines.len(),
            recommendations = snapshot.state.recommendations.len(),
            users = snapshot.state.users.len(),
            experts = snapshot.state.experts.len(),
            "Restoring registry from snapshot"
        );
        let last_clock = snapshot.last_clock;
        let mut registry = Self::with_store(MemoryStore::from_state(snapshot.state), options);
        registry.resume_clock(last_clock);
        registry
    }
}
