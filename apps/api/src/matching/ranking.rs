//! Ranking: scores one job against many candidates (or one candidate against
//! many jobs) and orders the results by `total_score`, descending.
//!
//! The sort is stable: equal scores keep the caller's input order. The
//! concurrent variants fan pairs out to tokio's blocking pool and put results
//! back in input order before sorting, so both paths return identical output.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::info;

use crate::matching::scoring::{MatchError, MatchResult, Matcher};
use crate::models::document::DocumentBundle;

/// One item to rank, tagged with a caller-chosen id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankEntry {
    pub id: String,
    pub document: DocumentBundle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranked {
    pub id: String,
    pub result: MatchResult,
}

#[derive(Debug, Error)]
pub enum RankError {
    #[error("item '{id}' could not be scored: {source}")]
    Item {
        id: String,
        #[source]
        source: MatchError,
    },

    #[error("scoring task failed: {0}")]
    Task(String),
}

/// Stable sort by `total_score`, highest first.
pub fn sort_ranked(ranked: &mut [Ranked]) {
    ranked.sort_by(|a, b| b.result.total_score.total_cmp(&a.result.total_score));
}

fn rank_with<F>(entries: &[RankEntry], score: F) -> Result<Vec<Ranked>, RankError>
where
    F: Fn(&DocumentBundle) -> Result<MatchResult, MatchError>,
{
    let mut ranked = entries
        .iter()
        .map(|entry| {
            score(&entry.document)
                .map(|result| Ranked {
                    id: entry.id.clone(),
                    result,
                })
                .map_err(|source| RankError::Item {
                    id: entry.id.clone(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    sort_ranked(&mut ranked);
    Ok(ranked)
}

/// Ranks candidates for a single job.
pub fn rank_candidates(
    matcher: &Matcher,
    job: &DocumentBundle,
    candidates: &[RankEntry],
) -> Result<Vec<Ranked>, RankError> {
    rank_with(candidates, |candidate| matcher.score(candidate, job))
}

/// Ranks jobs for a single candidate.
pub fn rank_jobs(
    matcher: &Matcher,
    candidate: &DocumentBundle,
    jobs: &[RankEntry],
) -> Result<Vec<Ranked>, RankError> {
    rank_with(jobs, |job| matcher.score(candidate, job))
}

async fn rank_concurrent<F>(entries: Vec<RankEntry>, score: F) -> Result<Vec<Ranked>, RankError>
where
    F: Fn(&DocumentBundle) -> Result<MatchResult, MatchError> + Send + Sync + 'static,
{
    let total = entries.len();
    let score = Arc::new(score);
    let mut tasks = JoinSet::new();

    for (index, entry) in entries.into_iter().enumerate() {
        let score = Arc::clone(&score);
        tasks.spawn_blocking(move || {
            let outcome = (*score)(&entry.document);
            (index, entry.id, outcome)
        });
    }

    let mut slots: Vec<Option<(String, Result<MatchResult, MatchError>)>> =
        (0..total).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        let (index, id, outcome) = joined.map_err(|e| RankError::Task(e.to_string()))?;
        slots[index] = Some((id, outcome));
    }

    // Walk in input order so the reported failure is the first one, not the fastest.
    let mut ranked = Vec::with_capacity(total);
    for slot in slots {
        let (id, outcome) =
            slot.ok_or_else(|| RankError::Task("scoring task produced no result".to_string()))?;
        match outcome {
            Ok(result) => ranked.push(Ranked { id, result }),
            Err(source) => return Err(RankError::Item { id, source }),
        }
    }

    sort_ranked(&mut ranked);
    info!("Ranked {total} documents concurrently");
    Ok(ranked)
}

/// Concurrent `rank_candidates`: each pair is scored on the blocking pool.
pub async fn rank_candidates_concurrent(
    matcher: Arc<Matcher>,
    job: Arc<DocumentBundle>,
    candidates: Vec<RankEntry>,
) -> Result<Vec<Ranked>, RankError> {
    rank_concurrent(candidates, move |candidate| matcher.score(candidate, &job)).await
}

/// Concurrent `rank_jobs`: each pair is scored on the blocking pool.
pub async fn rank_jobs_concurrent(
    matcher: Arc<Matcher>,
    candidate: Arc<DocumentBundle>,
    jobs: Vec<RankEntry>,
) -> Result<Vec<Ranked>, RankError> {
    rank_concurrent(jobs, move |job| matcher.score(&candidate, job)).await
}
