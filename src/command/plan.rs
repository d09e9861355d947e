use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

use crate::config::PlanConfig;
use crate::error::QueryError;
use crate::plan;
use crate::vcs::{self, GitVcs, Vcs};

pub fn run(git_dir: &Path) -> Result<()> {
    let vcs = GitVcs::new(git_dir);
    info!(git_dir = %vcs.git_dir().display(), "plan:start");

    for line in plan_commands(&vcs, &PlanConfig::default())? {
        println!("{line}");
    }
    Ok(())
}

/// Read the repository and render the rebase commands, in execution order.
pub fn plan_commands(vcs: &dyn Vcs, config: &PlanConfig) -> Result<Vec<String>> {
    let records = vcs::read_records(vcs, config)
        .inspect_err(|err| {
            if let QueryError::Failed { status, stderr, .. } = err {
                warn!(
                    command = err.command(),
                    status = ?status,
                    stderr = %stderr,
                    "plan:query failed"
                );
            }
        })
        .context("Failed to read branches")?;
    let plan = plan::plan(&records);

    info!(
        branches = records.len(),
        steps = plan.steps.len(),
        collisions = plan.collisions.len(),
        "plan:computed"
    );
    for collision in &plan.collisions {
        warn!(
            head = %collision.head,
            kept = %collision.kept,
            shadowed = %collision.shadowed,
            "plan:branches share a head commit"
        );
    }
    if plan.is_empty() {
        info!("plan:no branch has a parent branch");
    }
    for step in &plan.steps {
        info!(step = %step, "plan:step");
    }

    Ok(plan
        .steps
        .iter()
        .map(|step| step.command(&config.strategy_option))
        .collect())
}
