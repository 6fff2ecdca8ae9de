//! Public entry for the paper-reviewer pipeline.
//!
//! Single high-level function to review a manuscript with one or two LLMs.
//!
//! 1) **Step 1: Validation**
//!    - Reject blank manuscripts before any model is called
//!
//! 2) **Step 2: Review**
//!    - Single model: prompt → generate → parse → rank
//!    - Both models: the two reviews run concurrently; if either fails the
//!      whole call fails (no partial comparison)
//!
//! 3) **Step 3: Comparison** (both models only)
//!    - Rank each issue list by severity
//!    - Greedily pair similar issues (`issue-matcher`)
//!
//! The pipeline uses `tracing` for debug logging and plain `async fn` with
//! enum dispatch over the provider clients.

pub mod errors;
pub mod review;

use std::time::Instant;

use ai_llm_service::{config::llm_provider::LlmProvider, service_profiles::LlmServiceProfiles};
use issue_matcher::Issue;
use serde::Serialize;
use tracing::{debug, info};

use errors::{Error, ReviewerResult};
use review::{ReviewModel, ReviewReport, compare::IssueComparison};

/// Result of [`run_review`].
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ReviewOutcome {
    /// One reviewer, issues ranked by severity.
    Single {
        model: ReviewModel,
        review: ReviewReport,
    },
    /// Both reviewers plus the issue pairing.
    Comparison {
        gemini: ReviewReport,
        qwen: ReviewReport,
        comparison: IssueComparison,
    },
}

/// Run steps **1–3** for one manuscript.
///
/// # Logging
/// - `step1: validated (chars=N)`
/// - `step2: reviews done`
/// - `step3: comparison built`
pub async fn run_review(
    profiles: &LlmServiceProfiles,
    model: ReviewModel,
    content: &str,
) -> ReviewerResult<ReviewOutcome> {
    // ---------------------------
    // Step 1: validation
    // ---------------------------
    if content.trim().is_empty() {
        return Err(Error::Validation("manuscript content is empty".into()));
    }
    debug!(%model, chars = content.chars().count(), "step1: validated");

    let t0 = Instant::now();
    let outcome = match model.provider() {
        // -------------------------------
        // Step 2: single reviewer
        // -------------------------------
        Some(provider) => {
            let report = review::review_with(profiles, provider, content).await?;
            ReviewOutcome::Single {
                model,
                review: report,
            }
        }
        // -------------------------------------------
        // Step 2 + 3: both reviewers, then compare
        // -------------------------------------------
        None => {
            let (gemini, qwen) = tokio::try_join!(
                review::review_with(profiles, LlmProvider::Gemini, content),
                review::review_with(profiles, LlmProvider::Qwen, content),
            )?;
            debug!("step2: reviews done ({} ms)", t0.elapsed().as_millis());

            // both reports are already ranked by `review_with`
            let comparison = review::compare::compare_ranked(&gemini.issues, &qwen.issues);
            debug!(matched = comparison.matched.len(), "step3: comparison built");

            ReviewOutcome::Comparison {
                gemini,
                qwen,
                comparison,
            }
        }
    };

    info!(%model, "review finished in {} ms", t0.elapsed().as_millis());
    Ok(outcome)
}

/// Asks `model` for detailed remediation advice on one issue.
///
/// # Errors
/// [`Error::Validation`] when `model` is [`ReviewModel::Both`].
pub async fn suggest_for_issue(
    profiles: &LlmServiceProfiles,
    model: ReviewModel,
    issue: &Issue,
    context: &str,
) -> ReviewerResult<String> {
    let provider = model
        .provider()
        .ok_or_else(|| Error::Validation("suggestions need a single model".into()))?;
    review::suggest_with(profiles, provider, issue, context).await
}

// -----------------------------------------------------------------------------
// Convenience re-exports for downstream users
// -----------------------------------------------------------------------------

pub use review::compare::{MatchedIssues, compare_issues, compare_ranked};

#[cfg(test)]
mod tests {
    use super::*;
    use ai_llm_service::config::llm_model_config::LlmModelConfig;
    use ai_llm_service::error_handler::{AiLlmError, ProviderError, ProviderErrorKind};

    fn profiles_without_keys() -> LlmServiceProfiles {
        let cfg = |provider: LlmProvider| LlmModelConfig {
            provider,
            model: "m".into(),
            endpoint: "http://127.0.0.1:9".into(),
            api_key: None,
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(1),
        };
        LlmServiceProfiles::new(cfg(LlmProvider::Gemini), cfg(LlmProvider::Qwen))
    }

    #[tokio::test]
    async fn blank_manuscript_is_rejected_before_any_call() {
        let p = profiles_without_keys();
        let err = run_review(&p, ReviewModel::Both, " \n\t").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn comparison_fails_when_a_reviewer_fails() {
        let p = profiles_without_keys();
        let err = run_review(&p, ReviewModel::Both, "Title: trial")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Llm(AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::MissingApiKey,
                ..
            }))
        ));
    }

    #[tokio::test]
    async fn suggestion_requires_single_model() {
        let p = profiles_without_keys();
        let issue = Issue::new("Ethics", "major", "", "", "");
        let err = suggest_for_issue(&p, ReviewModel::Both, &issue, "")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
