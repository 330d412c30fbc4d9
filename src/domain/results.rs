//! Weighted result aggregation.
//!
//! Per submission, every criterion contributes the mean of its judges' values
//! normalized by the criterion's `max_score`, multiplied by its weight. The sum
//! is divided by the total weight of all usable criteria, so a criterion nobody
//! scored counts as zero, and then scaled to 0..=100.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;
use uuid::Uuid;

use super::hackathon::{HackathonStatus, JudgingCriterion, Score};
use super::role::{Role, satisfies};

/// Who may read results: everyone once published, organizers and admins before.
pub fn can_view_results(status: HackathonStatus, role: Role) -> bool {
    status == HackathonStatus::Published || satisfies(role, &[Role::Organizer, Role::Admin])
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub submission_id: i64,
    pub rank: u32,
    pub total: f64,
    pub judge_count: usize,
}

#[derive(Default)]
struct Tally {
    // criterion_id -> (sum, count)
    per_criterion: HashMap<i64, (f64, u32)>,
    judges: BTreeSet<Uuid>,
}

pub fn aggregate_results(criteria: &[JudgingCriterion], scores: &[Score]) -> Vec<SubmissionResult> {
    let usable: HashMap<i64, &JudgingCriterion> = criteria
        .iter()
        .filter(|c| c.weight > 0.0 && c.max_score > 0)
        .map(|c| (c.id, c))
        .collect();

    let total_weight: f64 = usable.values().map(|c| c.weight).sum();
    if total_weight <= 0.0 {
        return Vec::new();
    }

    let mut tallies: BTreeMap<i64, Tally> = BTreeMap::new();
    for score in scores {
        if !usable.contains_key(&score.criterion_id) {
            continue;
        }
        let tally = tallies.entry(score.submission_id).or_default();
        let slot = tally
            .per_criterion
            .entry(score.criterion_id)
            .or_insert((0.0, 0));
        slot.0 += f64::from(score.value);
        slot.1 += 1;
        tally.judges.insert(score.judge_id);
    }

    let mut results: Vec<SubmissionResult> = tallies
        .into_iter()
        .map(|(submission_id, tally)| {
            let weighted: f64 = tally
                .per_criterion
                .iter()
                .filter_map(|(criterion_id, (sum, count))| {
                    let criterion = usable.get(criterion_id)?;
                    let mean = sum / f64::from(*count);
                    Some(mean / f64::from(criterion.max_score) * criterion.weight)
                })
                .sum();

            SubmissionResult {
                submission_id,
                rank: 0,
                total: round2(weighted / total_weight * 100.0),
                judge_count: tally.judges.len(),
            }
        })
        .collect();

    results.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then(a.submission_id.cmp(&b.submission_id))
    });

    // Competition ranking: equal totals share a rank, the next rank skips.
    let mut previous: Option<(f64, u32)> = None;
    for (idx, result) in results.iter_mut().enumerate() {
        let position = idx as u32 + 1;
        result.rank = match previous {
            Some((total, rank)) if total == result.total => rank,
            _ => position,
        };
        previous = Some((result.total, result.rank));
    }

    results
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criterion(id: i64, weight: f64, max_score: i32) -> JudgingCriterion {
        JudgingCriterion {
            id,
            hackathon_id: 1,
            name: format!("c{id}"),
            description: None,
            weight,
            max_score,
        }
    }

    fn score(submission_id: i64, judge: Uuid, criterion_id: i64, value: i32) -> Score {
        Score {
            submission_id,
            judge_id: judge,
            criterion_id,
            value,
            comment: None,
        }
    }

    #[test]
    fn weights_and_normalizes_per_criterion() {
        let criteria = [criterion(1, 3.0, 10), criterion(2, 1.0, 5)];
        let j = Uuid::new_v4();
        // (10/10)*3 + (0/5)*1 = 3 of 4 -> 75
        let scores = [score(7, j, 1, 10), score(7, j, 2, 0)];

        let results = aggregate_results(&criteria, &scores);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].total, 75.0);
        assert_eq!(results[0].rank, 1);
        assert_eq!(results[0].judge_count, 1);
    }

    #[test]
    fn averages_across_judges_and_counts_missing_criteria_as_zero() {
        let criteria = [criterion(1, 1.0, 10), criterion(2, 1.0, 10)];
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let scores = [score(1, a, 1, 10), score(1, b, 1, 6)];

        let results = aggregate_results(&criteria, &scores);
        // mean 8/10 on one of two equal criteria -> 40
        assert_eq!(results[0].total, 40.0);
        assert_eq!(results[0].judge_count, 2);
    }

    #[test]
    fn ranks_descending_with_shared_ranks_for_ties() {
        let criteria = [criterion(1, 1.0, 10)];
        let j = Uuid::new_v4();
        let scores = [
            score(3, j, 1, 5),
            score(1, j, 1, 9),
            score(2, j, 1, 9),
            score(4, j, 1, 2),
        ];

        let ranked: Vec<(i64, u32)> = aggregate_results(&criteria, &scores)
            .into_iter()
            .map(|r| (r.submission_id, r.rank))
            .collect();
        assert_eq!(ranked, vec![(1, 1), (2, 1), (3, 3), (4, 4)]);
    }

    #[test]
    fn ignores_unknown_and_weightless_criteria() {
        let criteria = [criterion(1, 1.0, 10), criterion(2, 0.0, 10)];
        let j = Uuid::new_v4();
        let scores = [score(1, j, 1, 5), score(1, j, 2, 10), score(1, j, 99, 10)];

        let results = aggregate_results(&criteria, &scores);
        assert_eq!(results[0].total, 50.0);
    }

    #[test]
    fn no_usable_criteria_yields_no_results() {
        let j = Uuid::new_v4();
        assert!(aggregate_results(&[criterion(1, 0.0, 10)], &[score(1, j, 1, 3)]).is_empty());
        assert!(aggregate_results(&[], &[]).is_empty());
    }

    #[test]
    fn published_results_are_visible_to_every_role() {
        for role in Role::ALL {
            assert!(can_view_results(HackathonStatus::Published, role), "{role}");
        }
    }

    #[test]
    fn unpublished_results_are_visible_to_organizers_and_admins_only() {
        for status in [
            HackathonStatus::Draft,
            HackathonStatus::Open,
            HackathonStatus::Judging,
        ] {
            for role in Role::ALL {
                let expected = matches!(role, Role::Organizer | Role::Admin);
                assert_eq!(can_view_results(status, role), expected, "{status} / {role}");
            }
        }
    }
}
