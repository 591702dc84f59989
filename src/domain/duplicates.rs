//! Duplicate-question consolidation state
//!
//! A [`DuplicateReview`] holds one server-computed duplicate check: the
//! candidate pool, the groups as the server returned them, the groups still
//! awaiting a keeper, and the questions kept so far. Transitions are pure: each returns the next state together with the
//! ids that must be rejected on the backend. Performing those rejects is left
//! to the caller.

use crate::api::models::{DuplicateCheckResult, Question, QuestionId};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DuplicateReview {
    questions: Vec<Question>,
    original_groups: Vec<Vec<QuestionId>>,
    groups: Vec<Vec<QuestionId>>,
    kept: Vec<Question>,
}

/// Outcome of a keep transition
#[derive(Debug, Clone, PartialEq)]
pub struct KeepDecision {
    pub next: DuplicateReview,
    /// Ids to reject, in group order, without repeats
    pub to_reject: Vec<QuestionId>,
}

impl DuplicateReview {
    /// Start a review from a fresh check result; nothing is kept yet
    pub fn from_result(result: DuplicateCheckResult) -> Self {
        let groups: Vec<Vec<QuestionId>> = result.duplicates.into_iter().filter(|g| !g.is_empty()).collect();
        Self {
            questions: result.questions,
            original_groups: groups.clone(),
            groups,
            kept: Vec::new(),
        }
    }

    pub fn groups(&self) -> &[Vec<QuestionId>] {
        &self.groups
    }

    /// Groups from the check result, unaffected by later transitions
    pub fn original_groups(&self) -> &[Vec<QuestionId>] {
        &self.original_groups
    }

    pub fn kept(&self) -> &[Question] {
        &self.kept
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn is_resolved(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Keep `selected_id` out of `group_ids` and reject the rest.
    ///
    /// Every remaining group containing `selected_id` is dropped. The kept
    /// question is appended when it is present in the candidate pool.
    pub fn keep(&self, selected_id: &str, group_ids: &[QuestionId]) -> KeepDecision {
        let to_reject = unique_ids(group_ids.iter().filter(|id| id.as_str() != selected_id));

        let groups = self
            .groups
            .iter()
            .filter(|group| !group.iter().any(|id| id == selected_id))
            .cloned()
            .collect();

        let mut kept = self.kept.clone();
        match self.question(selected_id) {
            Some(question) => kept.push(question.clone()),
            None => log::warn!("Kept question {} is not in the duplicate check pool", selected_id),
        }

        KeepDecision {
            next: Self {
                questions: self.questions.clone(),
                original_groups: self.original_groups.clone(),
                groups,
                kept,
            },
            to_reject,
        }
    }

    /// Take index 0 of every remaining group as its keeper and reject all
    /// other members in one batch. Keepers replace the kept list.
    pub fn keep_first_from_all(&self) -> KeepDecision {
        let keeper_ids: Vec<&QuestionId> = self.groups.iter().filter_map(|g| g.first()).collect();
        let keeper_set: HashSet<&str> = keeper_ids.iter().map(|id| id.as_str()).collect();

        // A keeper of one group never ends up in the batch through another group
        let to_reject = unique_ids(
            self.groups
                .iter()
                .flat_map(|g| g.iter().skip(1))
                .filter(|id| !keeper_set.contains(id.as_str())),
        );

        let mut seen = HashSet::new();
        let kept = keeper_ids
            .into_iter()
            .filter(|id| seen.insert(id.as_str()))
            .filter_map(|id| self.question(id).cloned())
            .collect();

        KeepDecision {
            next: Self {
                questions: self.questions.clone(),
                original_groups: self.original_groups.clone(),
                groups: Vec::new(),
                kept,
            },
            to_reject,
        }
    }

    /// Pool questions that were never in a duplicate group, then everything
    /// kept. Rejected members never show up. No id is listed twice.
    pub fn unique_questions(&self) -> Vec<&Question> {
        let grouped: HashSet<&str> = self.original_groups.iter().flatten().map(String::as_str).collect();
        let mut seen: HashSet<&str> = HashSet::new();

        self.questions
            .iter()
            .filter(|q| !grouped.contains(q.id.as_str()))
            .chain(self.kept.iter())
            .filter(|q| seen.insert(q.id.as_str()))
            .collect()
    }
}

fn unique_ids<'a>(ids: impl Iterator<Item = &'a QuestionId>) -> Vec<QuestionId> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(id.as_str())).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{QuestionStatus, QuestionType};

    fn question(id: &str) -> Question {
        Question {
            id: id.to_string(),
            category_id: "7".to_string(),
            status: QuestionStatus::Pending,
            question_type: QuestionType::Choice,
            difficulty: 1,
            locales: Vec::new(),
            tags: Vec::new(),
            required_languages: vec!["en".to_string()],
            is_valid: false,
            track: None,
            audio_id: None,
            image_id: None,
            author_id: None,
            source: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn ids(values: &[&str]) -> Vec<QuestionId> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn review() -> DuplicateReview {
        DuplicateReview::from_result(DuplicateCheckResult {
            duplicates: vec![ids(&["a", "b"]), ids(&["c", "d", "e"])],
            questions: ["a", "b", "c", "d", "e", "u"].iter().map(|id| question(id)).collect(),
        })
    }

    fn kept_ids(review: &DuplicateReview) -> Vec<&str> {
        review.kept().iter().map(|q| q.id.as_str()).collect()
    }

    #[test]
    fn test_keep_removes_group_and_records_keeper() {
        let start = review();
        let decision = start.keep("d", &ids(&["c", "d", "e"]));

        assert_eq!(decision.to_reject, ids(&["c", "e"]));
        assert_eq!(decision.next.groups(), &[ids(&["a", "b"])]);
        assert_eq!(kept_ids(&decision.next), vec!["d"]);
        // the original state is untouched
        assert_eq!(start.groups().len(), 2);
        assert!(start.kept().is_empty());
    }

    #[test]
    fn test_keep_first_from_all_groups() {
        let decision = review().keep_first_from_all();

        assert_eq!(decision.to_reject, ids(&["b", "d", "e"]));
        assert!(decision.next.is_resolved());
        assert_eq!(kept_ids(&decision.next), vec!["a", "c"]);
    }

    #[test]
    fn test_keep_first_replaces_previous_keepers() {
        let after_keep = review().keep("b", &ids(&["a", "b"])).next;
        assert_eq!(kept_ids(&after_keep), vec!["b"]);

        let decision = after_keep.keep_first_from_all();
        assert_eq!(kept_ids(&decision.next), vec!["c"]);
        assert_eq!(decision.to_reject, ids(&["d", "e"]));
    }

    #[test]
    fn test_unique_view_never_repeats_an_id() {
        let start = review();
        let unique: Vec<_> = start.unique_questions().iter().map(|q| q.id.clone()).collect();
        assert_eq!(unique, ids(&["u"]));

        let next = start.keep("a", &ids(&["a", "b"])).next;
        // rejected "b" stays out, kept "a" follows the never-grouped pool
        let unique: Vec<_> = next.unique_questions().iter().map(|q| q.id.clone()).collect();
        assert_eq!(unique, ids(&["u", "a"]));

        let done = next.keep_first_from_all().next;
        let unique: Vec<_> = done.unique_questions().iter().map(|q| q.id.clone()).collect();
        assert_eq!(unique, ids(&["u", "c"]));
        assert_eq!(done.original_groups().len(), 2);
    }

    #[test]
    fn test_unique_view_excludes_rejected_members() {
        let review = DuplicateReview::from_result(DuplicateCheckResult {
            duplicates: vec![ids(&["a", "b"])],
            questions: vec![question("a"), question("b"), question("u")],
        });
        let decision = review.keep("a", &ids(&["a", "b"]));
        assert_eq!(decision.to_reject, ids(&["b"]));

        let unique: Vec<_> = decision.next.unique_questions().iter().map(|q| q.id.clone()).collect();
        assert_eq!(unique, ids(&["u", "a"]));
    }

    #[test]
    fn test_keep_unknown_id_rejects_others_without_appending() {
        let decision = review().keep("zzz", &ids(&["a", "b"]));
        assert_eq!(decision.to_reject, ids(&["a", "b"]));
        assert!(decision.next.kept().is_empty());
        assert_eq!(decision.next.groups().len(), 2);
    }

    #[test]
    fn test_from_result_drops_empty_groups() {
        let review = DuplicateReview::from_result(DuplicateCheckResult {
            duplicates: vec![vec![], ids(&["x", "y"])],
            questions: vec![question("x"), question("y")],
        });
        assert_eq!(review.groups().len(), 1);
    }
}
