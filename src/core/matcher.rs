use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::core::{interests::InterestSet, scoring::calculate_match_score};
use crate::models::{MatchResult, UserProfile, UserSummary};

/// Errors raised by the ranking routine
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Ranked matches for one subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatches {
    pub user: UserSummary,
    pub matches: Vec<MatchResult>,
    pub total: usize,
}

/// Interest-based match ranker
///
/// # Pipeline Stages
/// 1. Interest set construction (deduplication)
/// 2. Jaccard scoring against the subject
/// 3. Zero-score exclusion
/// 4. Stable descending sort and truncation
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    default_limit: usize,
    max_limit: usize,
}

impl Matcher {
    pub fn new(default_limit: usize, max_limit: usize) -> Self {
        let max_limit = max_limit.max(1);
        Self {
            default_limit: default_limit.clamp(1, max_limit),
            max_limit,
        }
    }

    /// Resolve a requested limit against the configured default and cap
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit)
    }

    /// Rank candidates for a subject by shared interests
    ///
    /// `candidates` is expected to hold only active users other than the
    /// subject; no further filtering happens here. Ties keep the candidate
    /// input order.
    ///
    /// # Errors
    /// `MatchError::InvalidInput` when no subject is supplied.
    pub fn rank(
        &self,
        subject: Option<&UserProfile>,
        candidates: &[UserProfile],
        limit: usize,
    ) -> Result<RankedMatches, MatchError> {
        let subject = subject
            .ok_or_else(|| MatchError::InvalidInput("subject user is required".to_string()))?;

        let subject_interests = InterestSet::from(subject.interests.as_slice());

        let mut matches: Vec<MatchResult> = candidates
            .iter()
            .filter_map(|candidate| {
                let candidate_interests = InterestSet::from(candidate.interests.as_slice());
                let (score, common_interests) =
                    calculate_match_score(&subject_interests, &candidate_interests);

                if score > 0.0 {
                    Some(MatchResult {
                        id: candidate.id,
                        username: candidate.username.clone(),
                        age: Some(candidate.age),
                        bio: candidate.bio.clone(),
                        interests: candidate.interests.clone(),
                        match_score: score,
                        common_interests,
                    })
                } else {
                    None
                }
            })
            .collect();

        // sort_by is stable, so equal scores keep input order
        matches.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
        matches.truncate(limit);

        let total = matches.len();

        Ok(RankedMatches {
            user: subject.summary(),
            matches,
            total,
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(10, 100)
    }
}
