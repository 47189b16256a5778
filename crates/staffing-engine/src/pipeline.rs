use staffing_solver::{SolveError, SolveStatus, Solver};
use thiserror::Error;

use crate::builder::{BuildError, StaffingModel};
use crate::extract::{self, Assignment};
use crate::roster::{Candidate, Job};
use crate::summary::{self, SummaryRow};

#[derive(Error, Debug)]
pub enum PlanError {
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Solve(#[from] SolveError),
}

/// Everything one solve produces. On a non-Optimal status the record list
/// is empty and the summary rows carry zero fill, so callers can still
/// render the report shell around the status.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct StaffingPlan {
    pub status: SolveStatus,
    pub assignments: Vec<Assignment>,
    pub summary: Vec<SummaryRow>,
    /// Sum of salaries over the assignment records
    pub total_salary: f64,
    /// Per-job Italian shortfall, in job-table order
    pub italian_shortfall: Vec<(String, f64)>,
}

/// Run one build -> solve -> extract -> summarize pass.
///
/// The inputs are immutable snapshots; calling this again with the same
/// tables is an independent solve. Validation and solver execution failures
/// are errors; an infeasible or unbounded model is a status on the returned
/// plan.
pub fn plan(jobs: &[Job], candidates: &[Candidate]) -> Result<StaffingPlan, PlanError> {
    let model = StaffingModel::build(jobs, candidates)?;
    let solution = Solver::new().solve(&model.problem)?;

    let assignments = extract::assignments(&model, &solution, jobs, candidates);
    let summary = summary::summarize(jobs, &assignments);
    let italian_shortfall = extract::italian_shortfall(&model, &solution, jobs);
    let total_salary = assignments.iter().map(|a| a.salary).sum();

    Ok(StaffingPlan {
        status: solution.status,
        assignments,
        summary,
        total_salary,
        italian_shortfall,
    })
}
