//! Per-value checks for a judge's score against the hackathon's criteria.

use super::hackathon::JudgingCriterion;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoreRejection {
    #[error("criterion {0} does not belong to this hackathon")]
    UnknownCriterion(i64),
    #[error("{name} accepts 0..={max}")]
    OutOfRange { name: String, max: i32 },
}

impl ScoreRejection {
    pub fn code(&self) -> &'static str {
        match self {
            ScoreRejection::UnknownCriterion(_) => "UNKNOWN_CRITERION",
            ScoreRejection::OutOfRange { .. } => "SCORE_OUT_OF_RANGE",
        }
    }
}

/// `criteria` must be the full criterion list of the submission's hackathon.
pub fn check_score(
    criteria: &[JudgingCriterion],
    criterion_id: i64,
    value: i32,
) -> Result<(), ScoreRejection> {
    let criterion = criteria
        .iter()
        .find(|c| c.id == criterion_id)
        .ok_or(ScoreRejection::UnknownCriterion(criterion_id))?;

    if !(0..=criterion.max_score).contains(&value) {
        return Err(ScoreRejection::OutOfRange {
            name: criterion.name.clone(),
            max: criterion.max_score,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criterion(id: i64, max_score: i32) -> JudgingCriterion {
        JudgingCriterion {
            id,
            hackathon_id: 1,
            name: format!("criterion-{id}"),
            description: None,
            weight: 1.0,
            max_score,
        }
    }

    #[test]
    fn value_within_range_is_accepted() {
        let criteria = [criterion(1, 10), criterion(2, 5)];
        assert_eq!(check_score(&criteria, 1, 0), Ok(()));
        assert_eq!(check_score(&criteria, 1, 10), Ok(()));
        assert_eq!(check_score(&criteria, 2, 5), Ok(()));
    }

    #[test]
    fn value_above_max_is_rejected() {
        let criteria = [criterion(1, 10)];
        let err = check_score(&criteria, 1, 11).unwrap_err();
        assert_eq!(
            err,
            ScoreRejection::OutOfRange {
                name: "criterion-1".into(),
                max: 10
            }
        );
        assert_eq!(err.code(), "SCORE_OUT_OF_RANGE");
        assert_eq!(err.to_string(), "criterion-1 accepts 0..=10");
    }

    #[test]
    fn negative_value_is_rejected() {
        let criteria = [criterion(1, 10)];
        assert!(matches!(
            check_score(&criteria, 1, -1),
            Err(ScoreRejection::OutOfRange { .. })
        ));
    }

    #[test]
    fn criterion_of_another_hackathon_is_rejected() {
        // 7 exists elsewhere but is not in this hackathon's list
        let criteria = [criterion(1, 10), criterion(2, 10)];
        let err = check_score(&criteria, 7, 3).unwrap_err();
        assert_eq!(err, ScoreRejection::UnknownCriterion(7));
        assert_eq!(err.code(), "UNKNOWN_CRITERION");
    }
}
