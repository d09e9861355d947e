mod git;

use tracing::debug;

use crate::config::PlanConfig;
use crate::error::QueryError;

pub use self::git::GitVcs;
#[cfg(test)]
pub(crate) use self::git::test_repo;

/// Read-only queries the planner needs from a version-control backend.
///
/// Implementations may batch these into fewer underlying calls; callers only
/// rely on each method's result.
pub trait Vcs {
    /// Return the name of this VCS backend
    fn name(&self) -> &str;

    /// List local branch names, as reported by the backend
    fn list_branches(&self) -> Result<Vec<String>, QueryError>;

    /// Resolve a branch to the identifier of the commit it points at
    fn head_of(&self, branch: &str) -> Result<String, QueryError>;

    /// Resolve a branch to the identifier of its head's first-parent ancestor (`<branch>~1`).
    /// Fails for a branch whose head is a root commit.
    fn first_ancestor_of(&self, branch: &str) -> Result<String, QueryError>;
}

/// Snapshot of a single branch, as read from the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRecord {
    pub name: String,
    /// Commit the branch points at
    pub head: String,
    /// First-parent ancestor of `head`
    pub parent_commit: String,
}

impl BranchRecord {
    pub fn new(
        name: impl Into<String>,
        head: impl Into<String>,
        parent_commit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            head: head.into(),
            parent_commit: parent_commit.into(),
        }
    }
}

/// Read one record per local branch, skipping the excluded ones.
///
/// Queries run one at a time; the first failure aborts the whole read.
pub fn read_records(
    vcs: &dyn Vcs,
    config: &PlanConfig,
) -> Result<Vec<BranchRecord>, QueryError> {
    let mut records = Vec::new();

    for line in vcs.list_branches()? {
        let branch = line.trim();
        if branch.is_empty() {
            continue;
        }
        if config.is_excluded(branch) {
            debug!(branch, "vcs:skip excluded branch");
            continue;
        }

        let head = vcs.head_of(branch)?;
        let parent_commit = vcs.first_ancestor_of(branch)?;
        debug!(branch, head = %head, parent = %parent_commit, "vcs:read branch");

        records.push(BranchRecord::new(branch, head, parent_commit));
    }

    debug!(backend = vcs.name(), count = records.len(), "vcs:read complete");
    Ok(records)
}
