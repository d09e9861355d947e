//! Branch hierarchy resolution and rebase ordering.
//!
//! A branch's parent branch is the branch whose head is exactly the commit
//! behind this branch's head. Following those links up to a root gives the
//! order in which a stack of branches has to be rebased.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use tracing::debug;

use crate::shell::{quote_branch, quote_revision};
use crate::vcs::BranchRecord;

/// Two branches pointing at the same commit. Only `kept` can be found as a
/// parent through that commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadCollision {
    pub head: String,
    pub kept: String,
    pub shadowed: String,
}

/// Parent links between branches, derived from one snapshot of records.
pub struct Hierarchy<'a> {
    /// branch -> parent branch; every branch is a key, roots map to None
    parents: BTreeMap<&'a str, Option<&'a str>>,
    collisions: Vec<HeadCollision>,
}

impl<'a> Hierarchy<'a> {
    pub fn build(records: &'a [BranchRecord]) -> Self {
        let mut sorted: Vec<&BranchRecord> = records.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));

        // head -> branch; on a shared head the later name wins
        let mut by_head: HashMap<&str, &str> = HashMap::new();
        let mut collisions = Vec::new();
        for &record in &sorted {
            if let Some(previous) = by_head.insert(record.head.as_str(), record.name.as_str())
                && previous != record.name
            {
                collisions.push(HeadCollision {
                    head: record.head.clone(),
                    kept: record.name.clone(),
                    shadowed: previous.to_string(),
                });
            }
        }

        let parents = sorted
            .into_iter()
            .map(|record| {
                let parent = by_head.get(record.parent_commit.as_str()).copied();
                debug!(branch = %record.name, parent = ?parent, "plan:resolve parent");
                (record.name.as_str(), parent)
            })
            .collect();

        Hierarchy {
            parents,
            collisions,
        }
    }

    /// All branches, in name order
    pub fn branches(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.parents.keys().copied()
    }

    pub fn parent_of(&self, branch: &str) -> Option<&'a str> {
        self.parents.get(branch).copied().flatten()
    }

    pub fn collisions(&self) -> &[HeadCollision] {
        &self.collisions
    }

    /// Branches from the root of `branch`'s ancestry down to `branch` itself.
    ///
    /// The walk stops at a branch without a parent, or at the first parent
    /// link that leads back into the chain; that branch becomes the root.
    pub fn chain(&self, branch: &'a str) -> Vec<&'a str> {
        let mut chain = vec![branch];
        let mut visited = HashSet::from([branch]);
        let mut current = branch;

        while let Some(parent) = self.parent_of(current) {
            if !visited.insert(parent) {
                debug!(branch, at = current, "plan:cycle in parent links");
                break;
            }
            chain.push(parent);
            current = parent;
        }

        chain.reverse();
        chain
    }
}

/// Rebase one branch onto its parent branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebaseStep {
    pub branch: String,
    pub parent: String,
}

impl RebaseStep {
    /// The `git rebase` invocation for this step.
    ///
    /// Replays only the branch's own tip commit (`<branch>~1..<branch>`) on
    /// top of wherever the parent branch points now.
    pub fn command(&self, strategy_option: &str) -> String {
        format!(
            "git rebase -X {} {} {} --onto={}",
            quote_branch(strategy_option),
            quote_revision(&self.branch, "~1"),
            quote_branch(&self.branch),
            quote_branch(&self.parent),
        )
    }
}

impl fmt::Display for RebaseStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} onto {}", self.branch, self.parent)
    }
}

/// Ordered steps for a whole repository, plus what resolution had to guess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebasePlan {
    pub steps: Vec<RebaseStep>,
    pub collisions: Vec<HeadCollision>,
}

impl RebasePlan {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Compute the rebase order for every branch in `records`.
///
/// Branches are visited by name; each one's chain is walked root first and
/// every branch below the root is emitted the first time it is reached. A
/// parent's step therefore always precedes its children's, and a branch
/// shared by several chains appears once.
pub fn plan(records: &[BranchRecord]) -> RebasePlan {
    let hierarchy = Hierarchy::build(records);
    let mut emitted: HashSet<&str> = HashSet::new();
    let mut steps = Vec::new();

    for branch in hierarchy.branches() {
        let chain = hierarchy.chain(branch);
        for pair in chain.windows(2) {
            let (parent, child) = (pair[0], pair[1]);
            if emitted.insert(child) {
                steps.push(RebaseStep {
                    branch: child.to_string(),
                    parent: parent.to_string(),
                });
            }
        }
    }

    RebasePlan {
        steps,
        collisions: hierarchy.collisions().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, head: &str, parent_commit: &str) -> BranchRecord {
        BranchRecord::new(name, head, parent_commit)
    }

    fn commands(records: &[BranchRecord]) -> Vec<String> {
        plan(records)
            .steps
            .iter()
            .map(|step| step.command("theirs"))
            .collect()
    }

    #[test]
    fn single_child_is_rebased_onto_parent() {
        let records = vec![rec("main", "c2", "c1"), rec("feature", "c4", "c2")];

        assert_eq!(
            commands(&records),
            vec!["git rebase -X theirs feature~1 feature --onto=main"]
        );
    }

    #[test]
    fn parent_that_moved_on_is_not_detected() {
        // main advanced to c3 after feature branched from c2
        let records = vec![rec("main", "c3", "c2"), rec("feature", "c4", "c2")];

        assert!(plan(&records).is_empty());
    }

    #[test]
    fn three_level_chain_is_ordered_root_first() {
        let records = vec![
            rec("feature2", "c5", "c4"),
            rec("main", "c2", "c1"),
            rec("feature", "c4", "c2"),
        ];

        assert_eq!(
            commands(&records),
            vec![
                "git rebase -X theirs feature~1 feature --onto=main",
                "git rebase -X theirs feature2~1 feature2 --onto=feature",
            ]
        );
    }

    #[test]
    fn independent_roots_produce_nothing() {
        let records = vec![rec("main", "a2", "a1"), rec("other", "b2", "b1")];

        assert!(plan(&records).is_empty());
    }

    #[test]
    fn shared_ancestor_is_emitted_once() {
        // main <- base <- {left, right}
        let records = vec![
            rec("main", "m2", "m1"),
            rec("base", "b1", "m2"),
            rec("left", "l1", "b1"),
            rec("right", "r1", "b1"),
        ];

        let steps = plan(&records).steps;
        let base_steps = steps.iter().filter(|s| s.branch == "base").count();

        assert_eq!(base_steps, 1);
        assert_eq!(
            steps
                .iter()
                .map(|s| (s.branch.as_str(), s.parent.as_str()))
                .collect::<Vec<_>>(),
            vec![("base", "main"), ("left", "base"), ("right", "base")]
        );
    }

    #[test]
    fn parents_always_precede_children() {
        let records = vec![
            rec("a", "a1", "z1"),
            rec("b", "b1", "a1"),
            rec("c", "c1", "b1"),
            rec("d", "d1", "x1"),
            rec("z", "z1", "z0"),
            rec("x", "x1", "c1"),
        ];

        let steps = plan(&records).steps;
        let position = |name: &str| steps.iter().position(|s| s.branch == name);

        for step in &steps {
            if let Some(parent_pos) = position(&step.parent) {
                assert!(parent_pos < position(&step.branch).unwrap());
            }
        }
        // z is the only root
        assert_eq!(steps.len(), 5);
        assert!(position("z").is_none());
    }

    #[test]
    fn output_is_independent_of_record_order() {
        let mut records = vec![
            rec("main", "c2", "c1"),
            rec("feature", "c4", "c2"),
            rec("feature2", "c5", "c4"),
            rec("hotfix", "c6", "c2"),
        ];
        let first = plan(&records);
        records.reverse();
        let second = plan(&records);

        assert_eq!(first, second);
    }

    #[test]
    fn roots_are_never_rebase_targets() {
        let records = vec![
            rec("main", "c2", "c1"),
            rec("feature", "c4", "c2"),
            rec("lonely", "x2", "x1"),
        ];

        let steps = plan(&records).steps;

        assert!(steps.iter().all(|s| s.branch != "main"));
        assert!(steps.iter().all(|s| s.branch != "lonely"));
    }

    #[test]
    fn shared_head_resolves_to_last_name_and_is_reported() {
        let records = vec![
            rec("main", "c2", "c1"),
            rec("mirror", "c2", "c1"),
            rec("feature", "c4", "c2"),
        ];

        let result = plan(&records);

        assert_eq!(
            result.steps,
            vec![RebaseStep {
                branch: "feature".to_string(),
                parent: "mirror".to_string(),
            }]
        );
        assert_eq!(
            result.collisions,
            vec![HeadCollision {
                head: "c2".to_string(),
                kept: "mirror".to_string(),
                shadowed: "main".to_string(),
            }]
        );
    }

    #[test]
    fn self_parent_is_treated_as_root() {
        let records = vec![rec("loop", "c1", "c1"), rec("child", "c2", "c1")];

        let hierarchy = Hierarchy::build(&records);
        assert_eq!(hierarchy.parent_of("loop"), Some("loop"));
        assert_eq!(hierarchy.chain("child"), vec!["loop", "child"]);

        assert_eq!(
            plan(&records).steps,
            vec![RebaseStep {
                branch: "child".to_string(),
                parent: "loop".to_string(),
            }]
        );
    }

    #[test]
    fn longer_cycles_terminate() {
        let records = vec![rec("a", "a1", "b1"), rec("b", "b1", "a1")];

        let hierarchy = Hierarchy::build(&records);
        assert_eq!(hierarchy.chain("a"), vec!["b", "a"]);
        assert_eq!(hierarchy.chain("b"), vec!["a", "b"]);

        let steps = plan(&records).steps;
        assert_eq!(steps.len(), 2);
    }

    #[test]
    fn chain_of_root_is_just_the_root() {
        let records = vec![rec("main", "c2", "c1")];
        let hierarchy = Hierarchy::build(&records);

        assert_eq!(hierarchy.chain("main"), vec!["main"]);
        assert_eq!(hierarchy.parent_of("main"), None);
        assert_eq!(hierarchy.branches().collect::<Vec<_>>(), vec!["main"]);
    }

    #[test]
    fn unusual_branch_names_are_quoted() {
        let step = RebaseStep {
            branch: "fix&go".to_string(),
            parent: "main".to_string(),
        };

        assert_eq!(
            step.command("theirs"),
            "git rebase -X theirs 'fix&go'~1 'fix&go' --onto=main"
        );
        assert_eq!(step.to_string(), "fix&go onto main");
    }
}
