use std::path::{Path, PathBuf};

use crate::cmd::Cmd;
use crate::error::QueryError;

use super::Vcs;

/// Git implementation of the Vcs trait.
///
/// Every query is a separate `git --git-dir=<path> ...` process, so the
/// metadata directory is used directly and no work tree is required.
pub struct GitVcs {
    git_dir: PathBuf,
    git_dir_arg: String,
}

impl GitVcs {
    pub fn new(git_dir: &Path) -> Self {
        GitVcs {
            git_dir: git_dir.to_path_buf(),
            git_dir_arg: format!("--git-dir={}", git_dir.display()),
        }
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    fn git(&self) -> Cmd<'_> {
        Cmd::new("git").arg(&self.git_dir_arg)
    }

    fn rev_parse(&self, rev: &str) -> Result<String, QueryError> {
        self.git().args(&["rev-parse", rev]).run_and_capture_stdout()
    }
}

impl Vcs for GitVcs {
    fn name(&self) -> &str {
        "git"
    }

    fn list_branches(&self) -> Result<Vec<String>, QueryError> {
        let output = self
            .git()
            .args(&["for-each-ref", "refs/heads/", "--format=%(refname:short)"])
            .run_and_capture_stdout()?;

        Ok(output.lines().map(String::from).collect())
    }

    fn head_of(&self, branch: &str) -> Result<String, QueryError> {
        // ^0 peels to the commit even if the ref were to point at a tag object
        self.rev_parse(&format!("{branch}^0"))
    }

    fn first_ancestor_of(&self, branch: &str) -> Result<String, QueryError> {
        self.rev_parse(&format!("{branch}~1"))
    }
}
