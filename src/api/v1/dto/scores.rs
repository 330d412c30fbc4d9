/*
 * Responsibility
 * - Scores の request DTO
 * - 形式チェックのみ。criterion の所属や max との比較は domain::scoring::check_score
 */
use std::collections::HashSet;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreInput {
    pub criterion_id: i64,
    pub value: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitScoresRequest {
    pub scores: Vec<ScoreInput>,
}

impl SubmitScoresRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.scores.is_empty() {
            return Err("scores must not be empty");
        }

        let mut seen = HashSet::with_capacity(self.scores.len());
        for score in &self.scores {
            if !seen.insert(score.criterion_id) {
                return Err("each criterion may be scored once");
            }
            if score.value < 0 {
                return Err("value must be >= 0");
            }
            if let Some(comment) = &score.comment
                && comment.len() > 2000
            {
                return Err("comment must be <= 2000 chars");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(criterion_id: i64, value: i32) -> ScoreInput {
        ScoreInput {
            criterion_id,
            value,
            comment: None,
        }
    }

    #[test]
    fn rejects_duplicate_criteria_and_negative_values() {
        let dup = SubmitScoresRequest {
            scores: vec![input(1, 3), input(1, 4)],
        };
        assert!(dup.validate().is_err());

        let negative = SubmitScoresRequest {
            scores: vec![input(1, -1)],
        };
        assert!(negative.validate().is_err());

        let empty = SubmitScoresRequest { scores: vec![] };
        assert!(empty.validate().is_err());

        let ok = SubmitScoresRequest {
            scores: vec![input(1, 3), input(2, 0)],
        };
        assert!(ok.validate().is_ok());
    }
}
