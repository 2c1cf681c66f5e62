//! Filter evaluation
//!
//!     Runs a parsed [AstFilter] against a task. A task is a meta block seen through a
//!     [TaskView]: its directive config plus its plain text. Fuzzy needles (`/needle/`) are
//!     scored through the [FuzzyScorer] seam so callers can plug in their own matcher;
//!     [SubsequenceScorer] is the built-in one.

use crate::tmark::ast::{AstBlock, AstFilter, FilterKind, MetaConfig};

/// Scores how well `needle` matches `haystack`. `None` means no match.
pub trait FuzzyScorer {
    fn score(&self, needle: &str, haystack: &str) -> Option<i64>;
}

/// Case-insensitive ordered subsequence matcher.
///
/// Every needle character must appear in the haystack in order. Consecutive matches score
/// higher than scattered ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubsequenceScorer;

impl FuzzyScorer for SubsequenceScorer {
    fn score(&self, needle: &str, haystack: &str) -> Option<i64> {
        let mut hay = haystack.chars().flat_map(char::to_lowercase);
        let mut score = 0i64;
        let mut streak = 0i64;
        for wanted in needle.chars().flat_map(char::to_lowercase) {
            let mut skipped = false;
            loop {
                let ch = hay.next()?;
                if ch == wanted {
                    break;
                }
                skipped = true;
            }
            streak = if skipped { 1 } else { streak + 1 };
            score += streak;
        }
        Some(score)
    }
}

/// What a filter sees of a task.
#[derive(Debug, Clone, Copy)]
pub struct TaskView<'a> {
    pub config: &'a MetaConfig,
    pub text: &'a str,
}

impl<'a> TaskView<'a> {
    pub fn new(config: &'a MetaConfig, text: &'a str) -> Self {
        Self { config, text }
    }
}

pub fn evaluate(filter: &AstFilter, task: &TaskView<'_>, scorer: &dyn FuzzyScorer) -> bool {
    let config = task.config;
    match &filter.kind {
        FilterKind::Any => true,
        FilterKind::Due => config.due.is_some(),
        FilterKind::Done => config.done,
        FilterKind::Pin => config.pin,
        FilterKind::Hide => config.hide,
        FilterKind::Tag { tag: Some(tag) } => config.tags.contains(tag),
        FilterKind::Tag { tag: None } => !config.tags.is_empty(),
        FilterKind::Track { id: Some(id) } => config.track == Some(*id),
        FilterKind::Track { id: None } => config.track.is_some(),
        FilterKind::Priority {
            priority: Some(priority),
        } => config.priority == Some(*priority),
        FilterKind::Priority { priority: None } => config.priority.is_some(),
        FilterKind::String { needle } => task.text.contains(needle.as_str()),
        FilterKind::Fuzzy { needle } => scorer.score(needle, task.text).is_some(),
        FilterKind::Not { op } => !evaluate(op, task, scorer),
        FilterKind::And { op1, op2 } => {
            evaluate(op1, task, scorer) && evaluate(op2, task, scorer)
        }
        FilterKind::Or { op1, op2 } => evaluate(op1, task, scorer) || evaluate(op2, task, scorer),
    }
}

/// Evaluate against a block. Blocks other than meta blocks are tasks with an empty config.
pub fn matches_block(filter: &AstFilter, block: &AstBlock, scorer: &dyn FuzzyScorer) -> bool {
    let empty = MetaConfig::default();
    let config = block.meta_config().unwrap_or(&empty);
    let text = block.plain_text();
    evaluate(filter, &TaskView::new(config, &text), scorer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmark::parsing::parse_filter;
    use rstest::rstest;

    fn task_config() -> MetaConfig {
        MetaConfig {
            priority: Some(1),
            done: true,
            tags: ["work".to_string()].into_iter().collect(),
            ..MetaConfig::default()
        }
    }

    #[rstest]
    #[case("*", true)]
    #[case("x", true)]
    #[case("!x", false)]
    #[case("@work & #1", true)]
    #[case("@home | pin", false)]
    #[case("@", true)]
    #[case("track", false)]
    #[case("#2", false)]
    #[case("'quarterly report'", true)]
    #[case("'Quarterly'", false)]
    #[case("/qrtrp/", true)]
    #[case("/zzz/", false)]
    fn test_evaluate(#[case] query: &str, #[case] expected: bool) {
        let config = task_config();
        let task = TaskView::new(&config, "write the quarterly report");
        let filter = parse_filter(query).unwrap();
        assert_eq!(evaluate(&filter, &task, &SubsequenceScorer), expected);
    }

    #[test]
    fn test_subsequence_scores_streaks_higher() {
        let scorer = SubsequenceScorer;
        let tight = scorer.score("abc", "xabcx").unwrap();
        let loose = scorer.score("abc", "a-b-c").unwrap();
        assert!(tight > loose);
        assert_eq!(scorer.score("", "anything"), Some(0));
        assert_eq!(scorer.score("ABC", "abc"), Some(6));
        assert_eq!(scorer.score("cab", "abc"), None);
    }
}
