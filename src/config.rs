/// Branches that are never part of a rebase plan, whatever their ancestry.
pub const DEFAULT_EXCLUDED_BRANCHES: &[&str] = &["wikidoc"];

/// Strategy option passed to `git rebase -X` in every emitted command.
pub const DEFAULT_STRATEGY_OPTION: &str = "theirs";

/// Built-in settings for a planning run.
///
/// There is no configuration file; the command layer starts from
/// `PlanConfig::default()` and threads the value down explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanConfig {
    /// Local branch names skipped by the repository reader
    pub excluded_branches: Vec<String>,

    /// Value for `-X` in the rendered rebase commands
    pub strategy_option: String,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            excluded_branches: DEFAULT_EXCLUDED_BRANCHES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            strategy_option: DEFAULT_STRATEGY_OPTION.to_string(),
        }
    }
}

impl PlanConfig {
    pub fn is_excluded(&self, branch: &str) -> bool {
        self.excluded_branches.iter().any(|b| b == branch)
    }
}
