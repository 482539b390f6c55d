//! Registry Store
//!
//! Five keyed maps, two ID counters and the admin reference. Reads are point
//! lookups; the only scan is over routine templates in ID order. Writes are
//! infallible: operations finish all validation before calling any of them,
//! so a failed operation never reaches the store.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::models::{
    ExpertRecord, Feedback, Identity, Recommendation, RecommendationId, RoutineId,
    RoutineTemplate, UserProfile, ValidityLists,
};

/// Storage seam for the registry
pub trait RegistryStore {
    fn admin(&self) -> &Identity;
    fn set_admin(&mut self, admin: Identity);

    fn validity_lists(&self) -> &ValidityLists;

    fn user(&self, id: &Identity) -> Option<&UserProfile>;
    fn put_user(&mut self, id: Identity, profile: UserProfile);

    fn expert(&self, id: &Identity) -> Option<&ExpertRecord>;
    fn put_expert(&mut self, id: Identity, record: ExpertRecord);

    fn routine(&self, id: RoutineId) -> Option<&RoutineTemplate>;
    fn put_routine(&mut self, id: RoutineId, routine: RoutineTemplate);
    /// All templates in ascending ID order
    fn routines(&self) -> Box<dyn Iterator<Item = (RoutineId, &RoutineTemplate)> + '_>;

    fn recommendation(&self, id: RecommendationId) -> Option<&Recommendation>;
    fn put_recommendation(&mut self, id: RecommendationId, recommendation: Recommendation);

    fn feedback(&self, id: RecommendationId) -> Option<&Feedback>;
    fn put_feedback(&mut self, id: RecommendationId, feedback: Feedback);

    /// ID the next routine template will receive
    fn peek_routine_id(&self) -> RoutineId;
    /// Return the current routine ID and advance the counter
    fn take_routine_id(&mut self) -> RoutineId;

    fn peek_recommendation_id(&self) -> RecommendationId;
    fn take_recommendation_id(&mut self) -> RecommendationId;
}

/// Full store contents, used for snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreState {
    pub admin: Identity,
    pub validity_lists: ValidityLists,
    pub next_routine_id: RoutineId,
    pub next_recommendation_id: RecommendationId,
    pub users: BTreeMap<Identity, UserProfile>,
    pub experts: BTreeMap<Identity, ExpertRecord>,
    pub routines: BTreeMap<RoutineId, RoutineTemplate>,
    pub recommendations: BTreeMap<RecommendationId, Recommendation>,
    pub feedback: BTreeMap<RecommendationId, Feedback>,
}

/// In-memory store
pub struct MemoryStore {
    admin: Identity,
    validity_lists: ValidityLists,
    next_routine_id: RoutineId,
    next_recommendation_id: RecommendationId,
    users: HashMap<Identity, UserProfile>,
    experts: HashMap<Identity, ExpertRecord>,
    routines: BTreeMap<RoutineId, RoutineTemplate>,
    recommendations: HashMap<RecommendationId, Recommendation>,
    feedback: HashMap<RecommendationId, Feedback>,
}

impl MemoryStore {
    /// Empty store owned by `admin`, with counters starting at 1
    pub fn new(admin: Identity, validity_lists: ValidityLists) -> Self {
        Self {
            admin,
            validity_lists,
            next_routine_id: 1,
            next_recommendation_id: 1,
            users: HashMap::new(),
            experts: HashMap::new(),
            routines: BTreeMap::new(),
            recommendations: HashMap::new(),
            feedback: HashMap::new(),
        }
    }

    pub fn from_state(state: StoreState) -> Self {
        Self {
            admin: state.admin,
            validity_lists: state.validity_lists,
            next_routine_id: state.next_routine_id,
            next_recommendation_id: state.next_recommendation_id,
            users: state.users.into_iter().collect(),
            experts: state.experts.into_iter().collect(),
            routines: state.routines,
            recommendations: state.recommendations.into_iter().collect(),
            feedback: state.feedback.into_iter().collect(),
        }
    }

    pub fn to_state(&self) -> StoreState {
        StoreState {
            admin: self.admin.clone(),
            validity_lists: self.validity_lists.clone(),
            next_routine_id: self.next_routine_id,
            next_recommendation_id: self.next_recommendation_id,
            users: clone_sorted(&self.users),
            experts: clone_sorted(&self.experts),
            routines: self.routines.clone(),
            recommendations: clone_sorted(&self.recommendations),
            feedback: clone_sorted(&self.feedback),
        }
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn expert_count(&self) -> usize {
        self.experts.len()
    }
}

fn clone_sorted<K: Ord + Clone, V: Clone>(map: &HashMap<K, V>) -> BTreeMap<K, V> {
    map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

impl RegistryStore for MemoryStore {
    fn admin(&self) -> &Identity {
        &self.admin
    }

    fn set_admin(&mut self, admin: Identity) {
        self.admin = admin;
    }

    fn validity_lists(&self) -> &ValidityLists {
        &self.validity_lists
    }

    fn user(&self, id: &Identity) -> Option<&UserProfile> {
        self.users.get(id)
    }

    fn put_user(&mut self, id: Identity, profile: UserProfile) {
        self.users.insert(id, profile);
    }

    fn expert(&self, id: &Identity) -> Option<&ExpertRecord> {
        self.experts.get(id)
    }

    fn put_expert(&mut self, id: Identity, record: ExpertRecord) {
        self.experts.insert(id, record);
    }

    fn routine(&self, id: RoutineId) -> Option<&RoutineTemplate> {
        self.routines.get(&id)
    }

    fn put_routine(&mut self, id: RoutineId, routine: RoutineTemplate) {
        self.routines.insert(id, routine);
    }

    fn routines(&self) -> Box<dyn Iterator<Item = (RoutineId, &RoutineTemplate)> + '_> {
        Box::new(self.routines.iter().map(|(id, routine)| (*id, routine)))
    }

    fn recommendation(&self, id: RecommendationId) -> Option<&Recommendation> {
        self.recommendations.get(&id)
    }

    fn put_recommendation(&mut self, id: RecommendationId, recommendation: Recommendation) {
        self.recommendations.insert(id, recommendation);
    }

    fn feedback(&self, id: RecommendationId) -> Option<&Feedback> {
        self.feedback.get(&id)
    }

    fn put_feedback(&mut self, id: RecommendationId, feedback: Feedback) {
        self.feedback.insert(id, feedback);
    }

    fn peek_routine_id(&self) -> RoutineId {
        self.next_routine_id
    }

    fn take_routine_id(&mut self) -> RoutineId {
        let id = self.next_routine_id;
        self.next_routine_id += 1;
        id
    }

    fn peek_recommendation_id(&self) -> RecommendationId {
        self.next_recommendation_id
    }

    fn take_recommendation_id(&mut self) -> RecommendationId {
        let id = self.next_recommendation_id;
        self.next_recommendation_id += 1;
        id
    }
}
