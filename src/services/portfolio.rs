use crate::models::PortfolioSnapshot;
use crate::services::{CacheKey, CacheManager, SupabaseClient, SupabaseError};
use std::sync::Arc;
use uuid::Uuid;

/// Portfolio aggregator
///
/// Collects one user's raw records from the hosted backend into a single
/// [`PortfolioSnapshot`] and keeps it behind the cache until a mutation or
/// an explicit refresh invalidates it. The scoring engine only ever sees
/// snapshots produced here.
pub struct PortfolioService {
    supabase: Arc<SupabaseClient>,
    cache: Option<Arc<CacheManager>>,
}

impl PortfolioService {
    pub fn new(supabase: Arc<SupabaseClient>, cache: Option<Arc<CacheManager>>) -> Self {
        Self { supabase, cache }
    }

    /// Cached snapshot of a user's portfolio, assembling one on miss
    pub async fn snapshot(&self, user_id: Uuid) -> Result<PortfolioSnapshot, SupabaseError> {
        if let Some(cache) = &self.cache {
            match cache.get::<PortfolioSnapshot>(&CacheKey::portfolio(user_id)).await {
                Ok(Some(snapshot)) => return Ok(snapshot),
                Ok(None) => {}
                Err(e) => tracing::warn!("Cache read failed for {}: {}", user_id, e),
            }
        }

        let snapshot = self.assemble(user_id).await?;
        self.store(user_id, &snapshot).await;
        Ok(snapshot)
    }

    /// Re-aggregate a user's portfolio, bypassing any cached copy
    pub async fn refresh(&self, user_id: Uuid) -> Result<PortfolioSnapshot, SupabaseError> {
        self.invalidate(user_id).await;
        let snapshot = self.assemble(user_id).await?;
        self.store(user_id, &snapshot).await;
        Ok(snapshot)
    }

    /// Drop a user's cached snapshot; called after every mutation
    pub async fn invalidate(&self, user_id: Uuid) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.delete(&CacheKey::portfolio(user_id)).await {
                tracing::warn!("Failed to invalidate portfolio cache for {}: {}", user_id, e);
            }
        }
    }

    /// Fan out to every collection concurrently and assemble the snapshot.
    ///
    /// Profile, courses, scores and targets are required: a failure there
    /// fails the aggregation. The remaining collections degrade to empty
    /// with a warning so a single flaky table cannot take the dashboard down.
    async fn assemble(&self, user_id: Uuid) -> Result<PortfolioSnapshot, SupabaseError> {
        let (profile, courses, scores, targets, recommendations, extracurriculars, achievements) =
            tokio::join!(
                self.supabase.get_profile(user_id),
                self.supabase.list_courses(user_id),
                self.supabase.list_scores(user_id),
                self.supabase.list_targets(user_id),
                self.supabase.list_recommendations(user_id),
                self.supabase.list_extracurriculars(user_id),
                self.supabase.list_achievements(user_id),
            );

        let snapshot = PortfolioSnapshot {
            profile: profile?,
            courses: courses?,
            scores: scores?,
            targets: targets?,
            recommendations: degrade(recommendations, user_id, "recommendations"),
            extracurriculars: degrade(extracurriculars, user_id, "extracurriculars"),
            achievements: degrade(achievements, user_id, "achievements"),
            fetched_at: chrono::Utc::now(),
        };

        tracing::debug!(
            "Assembled portfolio for {}: {} courses, {} scores, {} targets",
            user_id,
            snapshot.courses.len(),
            snapshot.scores.len(),
            snapshot.targets.len()
        );

        Ok(snapshot)
    }

    async fn store(&self, user_id: Uuid, snapshot: &PortfolioSnapshot) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.set(&CacheKey::portfolio(user_id), snapshot).await {
                tracing::warn!("Failed to cache portfolio for {}: {}", user_id, e);
            }
        }
    }
}

fn degrade<T>(result: Result<Vec<T>, SupabaseError>, user_id: Uuid, collection: &str) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(
                "Failed to fetch {} for {}, proceeding without them: {}",
                collection,
                user_id,
                e
            );
            Vec::new()
        }
    }
}
