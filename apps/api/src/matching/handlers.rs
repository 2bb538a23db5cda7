//! Axum route handlers for document analysis, matching and ranking.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::ranking::{
    rank_candidates_concurrent, rank_jobs_concurrent, RankEntry, Ranked,
};
use crate::matching::scoring::MatchResult;
use crate::models::document::{AnalyzedDocument, DocumentBundle};
use crate::nlp::extraction::{analyze_document, analyze_job_posting};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    #[default]
    Resume,
    JobPosting,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    #[serde(default)]
    pub kind: DocumentKind,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub candidate: DocumentBundle,
    pub job: DocumentBundle,
}

#[derive(Debug, Deserialize)]
pub struct RankCandidatesRequest {
    pub job: DocumentBundle,
    pub candidates: Vec<RankEntry>,
}

#[derive(Debug, Deserialize)]
pub struct RankJobsRequest {
    pub candidate: DocumentBundle,
    pub jobs: Vec<RankEntry>,
}

fn check_batch_size(len: usize, max: usize) -> Result<(), AppError> {
    if len > max {
        return Err(AppError::Validation(format!(
            "batch of {len} documents exceeds the limit of {max}"
        )));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/documents/analyze
///
/// Normalizes raw text and extracts its FeatureSet. The response's
/// `cleaned_text` is what callers should store as the document's full text.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzedDocument>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    // Normalization and the per-keyword scan are CPU-bound.
    let dictionary = Arc::clone(&state.dictionary);
    let analyzed = tokio::task::spawn_blocking(move || match request.kind {
        DocumentKind::Resume => analyze_document(&request.text, &dictionary),
        DocumentKind::JobPosting => analyze_job_posting(&request.text, &dictionary),
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in analysis: {e}")))?;

    Ok(Json(analyzed))
}

/// POST /api/v1/match
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResult>, AppError> {
    let matcher = Arc::clone(&state.matcher);
    let result = tokio::task::spawn_blocking(move || {
        matcher.score(&request.candidate, &request.job)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in match: {e}")))??;

    Ok(Json(result))
}

/// POST /api/v1/rank/candidates
///
/// Scores every candidate against one job, best first. Ties keep request order.
pub async fn handle_rank_candidates(
    State(state): State<AppState>,
    Json(request): Json<RankCandidatesRequest>,
) -> Result<Json<Vec<Ranked>>, AppError> {
    check_batch_size(request.candidates.len(), state.config.max_rank_batch)?;

    let ranked = rank_candidates_concurrent(
        Arc::clone(&state.matcher),
        Arc::new(request.job),
        request.candidates,
    )
    .await?;

    Ok(Json(ranked))
}

/// POST /api/v1/rank/jobs
///
/// Scores every job against one candidate, best first. Ties keep request order.
pub async fn handle_rank_jobs(
    State(state): State<AppState>,
    Json(request): Json<RankJobsRequest>,
) -> Result<Json<Vec<Ranked>>, AppError> {
    check_batch_size(request.jobs.len(), state.config.max_rank_batch)?;

    let ranked = rank_jobs_concurrent(
        Arc::clone(&state.matcher),
        Arc::new(request.candidate),
        request.jobs,
    )
    .await?;

    Ok(Json(ranked))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_kind_defaults_to_resume() {
        let request: AnalyzeRequest = serde_json::from_str(r#"{"text": "python"}"#).unwrap();
        assert_eq!(request.kind, DocumentKind::Resume);
    }

    #[test]
    fn test_document_kind_job_posting_deserializes() {
        let request: AnalyzeRequest =
            serde_json::from_str(r#"{"text": "python", "kind": "job_posting"}"#).unwrap();
        assert_eq!(request.kind, DocumentKind::JobPosting);
    }

    #[test]
    fn test_match_request_full_text_is_optional() {
        let json = r#"{
            "candidate": {"features": {"skills": {"languages": ["python"]}}},
            "job": {"features": {"education": ["master"]}, "full_text": "python master"}
        }"#;
        let request: MatchRequest = serde_json::from_str(json).unwrap();
        assert!(request.candidate.full_text.is_empty());
        assert_eq!(request.job.full_text, "python master");
    }

    #[test]
    fn test_batch_size_limit() {
        assert!(check_batch_size(10, 10).is_ok());
        assert!(matches!(check_batch_size(11, 10), Err(AppError::Validation(_))));
    }
}
