// ABOUTME: Plan storage abstraction with an in-memory, concurrent default backend
// ABOUTME: Holds the latest plan per user and the user's appended progress entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use dashmap::DashMap;
use pierre_plan_core::models::{ProgressEntry, TrainingPlan};

/// Storage backend for generated plans
///
/// Implementations must tolerate concurrent access from batch generation.
pub trait PlanStore: Send + Sync {
    /// Store `plan` as the user's current plan, replacing any previous one
    fn put(&self, plan: TrainingPlan);

    /// Current plan of a user
    fn get(&self, user_id: &str) -> Option<TrainingPlan>;

    /// Remove and return the user's plan
    fn remove(&self, user_id: &str) -> Option<TrainingPlan>;

    /// Append a progress entry; returns `false` when the user has no plan
    fn append_progress(&self, user_id: &str, entry: ProgressEntry) -> bool;

    /// Progress entries of a user in insertion order
    fn progress(&self, user_id: &str) -> Vec<ProgressEntry>;

    /// Number of stored plans
    fn len(&self) -> usize;

    /// Whether no plan is stored
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `DashMap`-backed store; last writer wins per user
#[derive(Debug, Default)]
pub struct InMemoryPlanStore {
    plans: DashMap<String, TrainingPlan>,
    progress: DashMap<String, Vec<ProgressEntry>>,
}

impl InMemoryPlanStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlanStore for InMemoryPlanStore {
    fn put(&self, plan: TrainingPlan) {
        self.plans.insert(plan.user_id.clone(), plan);
    }

    fn get(&self, user_id: &str) -> Option<TrainingPlan> {
        self.plans.get(user_id).map(|entry| entry.value().clone())
    }

    fn remove(&self, user_id: &str) -> Option<TrainingPlan> {
        let plan = self.plans.remove(user_id).map(|(_, plan)| plan);
        self.progress.remove(user_id);
        plan
    }

    fn append_progress(&self, user_id: &str, entry: ProgressEntry) -> bool {
        // Hold the plan shard so a concurrent remove cannot interleave
        let Some(_plan) = self.plans.get(user_id) else {
            return false;
        };
        self.progress
            .entry(user_id.to_owned())
            .or_default()
            .push(entry);
        true
    }

    fn progress(&self, user_id: &str) -> Vec<ProgressEntry> {
        self.progress
            .get(user_id)
            .map(|entries| entries.value().clone())
            .unwrap_or_default()
    }

    fn len(&self) -> usize {
        self.plans.len()
    }
}
