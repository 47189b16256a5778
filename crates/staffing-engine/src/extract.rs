use staffing_solver::Solution;

use crate::builder::StaffingModel;
use crate::roster::{Candidate, Job};

/// Smallest solved value treated as an assignment. Binaries come back as 0
/// or 1 up to solver noise, so anything clearly above zero counts.
const ASSIGNED_MIN: f64 = 1e-6;

/// One filled seat, read back from the solved model.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub job: String,
    pub candidate: String,
    pub english: u32,
    pub italian: u32,
    pub salary: f64,
}

/// Read the assignment records out of a solved model, sorted by job name
/// and then candidate name so repeated runs print identically.
pub fn assignments(
    model: &StaffingModel,
    solution: &Solution,
    jobs: &[Job],
    candidates: &[Candidate],
) -> Vec<Assignment> {
    let mut records: Vec<Assignment> = model
        .assignments
        .iter()
        .filter(|av| solution.value(av.var) > ASSIGNED_MIN)
        .map(|av| {
            let candidate = &candidates[av.candidate];
            Assignment {
                job: jobs[av.job].name.clone(),
                candidate: candidate.name.clone(),
                english: candidate.english,
                italian: candidate.italian,
                salary: candidate.salary,
            }
        })
        .collect();
    records.sort_by(|a, b| a.job.cmp(&b.job).then_with(|| a.candidate.cmp(&b.candidate)));
    records
}

/// Per-job Italian shortfall the solver had to spend, in job-table order.
/// Zero everywhere unless no slack-free assignment existed.
pub fn italian_shortfall(
    model: &StaffingModel,
    solution: &Solution,
    jobs: &[Job],
) -> Vec<(String, f64)> {
    model
        .slacks
        .iter()
        .map(|sv| (jobs[sv.job].name.clone(), solution.value(sv.var)))
        .collect()
}
