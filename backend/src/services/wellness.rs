//! Wellness service
//!
//! Owns the read-modify-write cycle of a user's wellness document:
//! - load the document, or start a fresh day for a new user
//! - close the previous day if it is over
//! - apply the update
//! - persist when anything changed
//!
//! Each cycle holds the user's lock from load to save.

use crate::repositories::WellnessStore;
use crate::services::fitness::{DayWindow, FitnessProvider};
use crate::services::locks::UserLocks;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;
use wellness_coach_shared::types::LogMealRequest;
use wellness_coach_shared::{
    FitnessReading, HistoryEntry, MealAnalysis, MealIntake, MetricTargets, ServiceError,
    UserWellnessState,
};

/// State after an operation, with the history entry if the day rolled over
#[derive(Debug, Clone)]
pub struct WellnessUpdate {
    pub state: UserWellnessState,
    pub rolled_over: Option<HistoryEntry>,
}

/// Result of logging a meal
#[derive(Debug, Clone)]
pub struct MealLogged {
    pub update: WellnessUpdate,
    pub analysis: Option<MealAnalysis>,
}

#[derive(Clone)]
pub struct WellnessService {
    store: Arc<dyn WellnessStore>,
    fitness: Option<Arc<dyn FitnessProvider>>,
    locks: UserLocks,
    targets: MetricTargets,
}

impl WellnessService {
    pub fn new(
        store: Arc<dyn WellnessStore>,
        fitness: Option<Arc<dyn FitnessProvider>>,
        targets: MetricTargets,
    ) -> Self {
        Self {
            store,
            fitness,
            locks: UserLocks::new(),
            targets,
        }
    }

    /// Check the document store is reachable
    pub async fn ping_store(&self) -> Result<(), ServiceError> {
        self.store.ping().await
    }

    /// Current state, rolled over if the day is done
    pub async fn get_state(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<WellnessUpdate, ServiceError> {
        self.update(user_id, now, |_| false).await
    }

    /// Overwrite tracker-backed metrics with a reading
    pub async fn record_fitness(
        &self,
        user_id: Uuid,
        reading: FitnessReading,
        now: DateTime<Utc>,
    ) -> Result<WellnessUpdate, ServiceError> {
        if reading.is_empty() {
            debug!(%user_id, "Empty fitness reading, nothing to apply");
        }

        self.update(user_id, now, |state| {
            if reading.is_empty() {
                return false;
            }
            state.apply_external_metrics(&reading);
            true
        })
        .await
    }

    /// Pull today's reading from the fitness provider and apply it
    pub async fn sync_fitness(
        &self,
        user_id: Uuid,
        access_token: &str,
        now: DateTime<Utc>,
    ) -> Result<WellnessUpdate, ServiceError> {
        let provider = self
            .fitness
            .as_ref()
            .ok_or_else(|| ServiceError::Unavailable("Fitness provider is not configured".into()))?;

        if access_token.trim().is_empty() {
            return Err(ServiceError::Validation("accessToken must not be empty".into()));
        }

        // Fetched before taking the lock; the network call must not block
        // other writes for this user.
        let reading = provider
            .fetch_reading(access_token, DayWindow::containing(now))
            .await?;

        let update = self.record_fitness(user_id, reading, now).await?;
        metrics::counter!("wellness_fitness_syncs_total").increment(1);
        info!(
            %user_id,
            wellness_score = update.state.wellness_score(),
            "Synced fitness data"
        );
        Ok(update)
    }

    /// Add a meal to today's nutrition metrics
    pub async fn log_meal(
        &self,
        user_id: Uuid,
        request: LogMealRequest,
        now: DateTime<Utc>,
    ) -> Result<MealLogged, ServiceError> {
        let (intake, analysis) = match request {
            LogMealRequest::Analyzed { items } => {
                if items.is_empty() {
                    return Err(ServiceError::Validation(
                        "Meal must contain at least one item".into(),
                    ));
                }
                let analysis = MealAnalysis::from_items(items);
                (analysis.intake(), Some(analysis))
            }
            LogMealRequest::Intake(intake) => (intake, None),
        };

        let update = self
            .update(user_id, now, |state| {
                state.apply_meal(&intake);
                true
            })
            .await?;

        metrics::counter!("wellness_meals_logged_total").increment(1);
        log_meal_event(user_id, &intake, analysis.as_ref());

        Ok(MealLogged { update, analysis })
    }

    /// Add glasses of water
    pub async fn log_water(
        &self,
        user_id: Uuid,
        glasses: f64,
        now: DateTime<Utc>,
    ) -> Result<WellnessUpdate, ServiceError> {
        self.update(user_id, now, |state| {
            state.log_water(glasses);
            true
        })
        .await
    }

    async fn update<F>(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
        mutate: F,
    ) -> Result<WellnessUpdate, ServiceError>
    where
        F: FnOnce(&mut UserWellnessState) -> bool,
    {
        let now_ms = now.timestamp_millis();
        let _guard = self.locks.acquire(user_id).await;

        let (mut state, created) = match self.store.load(user_id).await? {
            Some(state) => (state, false),
            None => {
                debug!(%user_id, "Starting wellness document");
                (UserWellnessState::new(&self.targets, now_ms), true)
            }
        };

        let rolled_over = state.rollover_if_due(now_ms);
        if let Some(entry) = &rolled_over {
            metrics::counter!("wellness_rollovers_total").increment(1);
            info!(
                %user_id,
                day_start = entry.date,
                total_score = entry.total_score,
                history_len = state.score_history().len(),
                "Closed wellness day"
            );
        }

        let mutated = mutate(&mut state);

        if created || rolled_over.is_some() || mutated {
            self.store.save(user_id, &state).await?;
        }

        Ok(WellnessUpdate { state, rolled_over })
    }
}

fn log_meal_event(user_id: Uuid, intake: &MealIntake, analysis: Option<&MealAnalysis>) {
    match analysis {
        Some(analysis) => info!(
            %user_id,
            meal = %analysis.meal_name,
            calories = intake.calories,
            "Logged meal"
        ),
        None => info!(%user_id, calories = intake.calories, "Logged meal intake"),
    }
}
