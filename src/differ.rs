// WHY: Sentence-sequence diffing behind a closed sum type
// The orchestrator's pointer arithmetic requires maximal runs with no two
// adjacent runs carrying the same tag; merging below enforces that regardless
// of how the underlying algorithm groups its ops

use similar::{capture_diff_slices, Algorithm, DiffOp};

/// A maximal contiguous stretch of sentences tagged against two document versions
///
/// Replaying the runs while dropping `Added` reconstructs the old sequence;
/// dropping `Removed` reconstructs the new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffRun {
    Unchanged(Vec<String>),
    Removed(Vec<String>),
    Added(Vec<String>),
}

impl DiffRun {
    /// Total character count of the sentences in this run
    pub fn span(&self) -> usize {
        let sentences = match self {
            DiffRun::Unchanged(s) | DiffRun::Removed(s) | DiffRun::Added(s) => s,
        };
        sentences.iter().map(|s| s.chars().count()).sum()
    }

    /// Concatenated text of the sentences in this run
    pub fn text(&self) -> String {
        let sentences = match self {
            DiffRun::Unchanged(s) | DiffRun::Removed(s) | DiffRun::Added(s) => s,
        };
        sentences.concat()
    }

    fn same_tag(&self, other: &DiffRun) -> bool {
        matches!(
            (self, other),
            (DiffRun::Unchanged(_), DiffRun::Unchanged(_))
                | (DiffRun::Removed(_), DiffRun::Removed(_))
                | (DiffRun::Added(_), DiffRun::Added(_))
        )
    }

    fn extend(&mut self, sentences: Vec<String>) {
        match self {
            DiffRun::Unchanged(s) | DiffRun::Removed(s) | DiffRun::Added(s) => {
                s.extend(sentences)
            }
        }
    }
}

fn push_run(runs: &mut Vec<DiffRun>, run: DiffRun) {
    match runs.last_mut() {
        Some(last) if last.same_tag(&run) => {
            let (DiffRun::Unchanged(s) | DiffRun::Removed(s) | DiffRun::Added(s)) = run;
            last.extend(s);
        }
        _ => runs.push(run),
    }
}

/// Diff two ordered sentence sequences into ordered, maximal runs
///
/// String-equality based (Myers); sentences carry no identity beyond their
/// content, so a moved-but-identical sentence matches across versions.
pub fn diff_sentences(old: &[String], new: &[String]) -> Vec<DiffRun> {
    let ops = capture_diff_slices(Algorithm::Myers, old, new);
    let mut runs = Vec::new();

    for op in ops {
        match op {
            DiffOp::Equal { old_index, len, .. } => {
                push_run(
                    &mut runs,
                    DiffRun::Unchanged(old[old_index..old_index + len].to_vec()),
                );
            }
            DiffOp::Delete {
                old_index, old_len, ..
            } => {
                push_run(
                    &mut runs,
                    DiffRun::Removed(old[old_index..old_index + old_len].to_vec()),
                );
            }
            DiffOp::Insert {
                new_index, new_len, ..
            } => {
                push_run(
                    &mut runs,
                    DiffRun::Added(new[new_index..new_index + new_len].to_vec()),
                );
            }
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                push_run(
                    &mut runs,
                    DiffRun::Removed(old[old_index..old_index + old_len].to_vec()),
                );
                push_run(
                    &mut runs,
                    DiffRun::Added(new[new_index..new_index + new_len].to_vec()),
                );
            }
        }
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// Replay runs to reconstruct both input sequences
    fn reconstruct(runs: &[DiffRun]) -> (Vec<String>, Vec<String>) {
        let mut old = Vec::new();
        let mut new = Vec::new();
        for run in runs {
            match run {
                DiffRun::Unchanged(s) => {
                    old.extend(s.clone());
                    new.extend(s.clone());
                }
                DiffRun::Removed(s) => old.extend(s.clone()),
                DiffRun::Added(s) => new.extend(s.clone()),
            }
        }
        (old, new)
    }

    #[test]
    fn test_identical_sequences() {
        let a = sentences(&["One.", " Two."]);
        let runs = diff_sentences(&a, &a);
        assert_eq!(runs, vec![DiffRun::Unchanged(a)]);
    }

    #[test]
    fn test_append() {
        let old = sentences(&["One."]);
        let new = sentences(&["One.", " Two."]);
        let runs = diff_sentences(&old, &new);
        assert_eq!(
            runs,
            vec![
                DiffRun::Unchanged(sentences(&["One."])),
                DiffRun::Added(sentences(&[" Two."])),
            ]
        );
    }

    #[test]
    fn test_prefix_insertion() {
        let old = sentences(&[" Two."]);
        let new = sentences(&["One.", " Two."]);
        let runs = diff_sentences(&old, &new);
        assert_eq!(
            runs,
            vec![
                DiffRun::Added(sentences(&["One."])),
                DiffRun::Unchanged(sentences(&[" Two."])),
            ]
        );
    }

    #[test]
    fn test_replace_yields_removed_then_added() {
        let old = sentences(&["One.", " Two.", " Three."]);
        let new = sentences(&["One.", " TWO!", " Three."]);
        let runs = diff_sentences(&old, &new);
        assert_eq!(
            runs,
            vec![
                DiffRun::Unchanged(sentences(&["One."])),
                DiffRun::Removed(sentences(&[" Two."])),
                DiffRun::Added(sentences(&[" TWO!"])),
                DiffRun::Unchanged(sentences(&[" Three."])),
            ]
        );
    }

    #[test]
    fn test_runs_are_maximal_and_reconstruct() {
        let old = sentences(&["A.", " B.", " C.", " D.", " E."]);
        let new = sentences(&["A.", " X.", " Y.", " D.", " E.", " F."]);
        let runs = diff_sentences(&old, &new);

        for pair in runs.windows(2) {
            assert!(
                !pair[0].same_tag(&pair[1]),
                "Adjacent runs must not share a tag: {runs:?}"
            );
        }

        let (rebuilt_old, rebuilt_new) = reconstruct(&runs);
        assert_eq!(rebuilt_old, old);
        assert_eq!(rebuilt_new, new);
    }

    #[test]
    fn test_span_counts_characters() {
        let run = DiffRun::Added(sentences(&["ab.", " cdé."]));
        assert_eq!(run.span(), 8);
        assert_eq!(run.text(), "ab. cdé.");
    }
}
