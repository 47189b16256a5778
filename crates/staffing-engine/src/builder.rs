use std::collections::HashSet;

use staffing_solver::{ConstraintOp, MilpProblem, VarKind};
use thiserror::Error;

use crate::roster::{Candidate, Job};

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Duplicate job: {0}")]
    DuplicateJob(String),
    #[error("Duplicate candidate: {0}")]
    DuplicateCandidate(String),
    #[error("Candidate {0} has a non-positive salary")]
    NonPositiveSalary(String),
    #[error("Proficiency for {0} is outside the 0-100 scale")]
    ScoreOutOfRange(String),
}

/// Index entry tying one binary decision back to its (candidate, job) pair.
///
/// Entries exist only for role-eligible pairs; ineligible pairs have no
/// variable at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentVar {
    pub candidate: usize,
    pub job: usize,
    pub var: usize,
}

/// Index entry for one job's Italian shortfall variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlackVar {
    pub job: usize,
    pub var: usize,
}

/// The built optimization model plus the variable index the extractor reads.
#[derive(Debug, Clone)]
pub struct StaffingModel {
    pub problem: MilpProblem,
    pub assignments: Vec<AssignmentVar>,
    pub slacks: Vec<SlackVar>,
}

impl StaffingModel {
    /// Translate the two input tables into a MILP.
    ///
    /// Variables: one binary per role-eligible (candidate, job) pair, one
    /// non-negative shortfall per job. Objective: minimize total salary plus
    /// the penalized Italian shortfall. Constraints per candidate: at most
    /// one position. Constraints per job: exact headcount, an aggregate
    /// English floor, and an aggregate Italian floor that the shortfall
    /// variable may relax. English deliberately has no shortfall variable;
    /// only the Italian floor is soft.
    pub fn build(jobs: &[Job], candidates: &[Candidate]) -> Result<Self, BuildError> {
        validate(jobs, candidates)?;

        let mut problem = MilpProblem::new();

        let mut assignments = Vec::new();
        for (ci, candidate) in candidates.iter().enumerate() {
            if let Some(ji) = jobs.iter().position(|job| job.name == candidate.role) {
                let var = problem.add_variable(
                    format!("assign:{}:{}", candidate.name, jobs[ji].name),
                    VarKind::Binary,
                );
                assignments.push(AssignmentVar {
                    candidate: ci,
                    job: ji,
                    var,
                });
            }
        }

        let mut slacks = Vec::with_capacity(jobs.len());
        for (ji, job) in jobs.iter().enumerate() {
            let var = problem.add_variable(
                format!("shortfall:{}", job.name),
                VarKind::Continuous { min: 0.0 },
            );
            slacks.push(SlackVar { job: ji, var });
        }

        let n = problem.num_variables();
        let penalty = shortfall_penalty(candidates);

        let mut cost = vec![0.0; n];
        for av in &assignments {
            cost[av.var] = candidates[av.candidate].salary;
        }
        for sv in &slacks {
            cost[sv.var] = penalty;
        }
        problem.set_objective(cost, true);

        // Each candidate holds at most one position.
        for av in &assignments {
            let mut coeffs = vec![0.0; n];
            coeffs[av.var] = 1.0;
            problem.add_constraint(
                format!("one_role:{}", candidates[av.candidate].name),
                coeffs,
                ConstraintOp::Le,
                1.0,
            );
        }

        for (ji, job) in jobs.iter().enumerate() {
            let head = f64::from(job.headcount);
            let mut filled = vec![0.0; n];
            let mut english = vec![0.0; n];
            let mut italian = vec![0.0; n];
            for av in assignments.iter().filter(|av| av.job == ji) {
                let candidate = &candidates[av.candidate];
                filled[av.var] = 1.0;
                english[av.var] = f64::from(candidate.english);
                italian[av.var] = f64::from(candidate.italian);
            }

            // A job with no eligible candidates leaves this row empty; a
            // positive headcount then surfaces as solver infeasibility.
            problem.add_constraint(
                format!("headcount:{}", job.name),
                filled,
                ConstraintOp::Eq,
                head,
            );

            // Floors are aggregate sums over the hired set, so high scorers
            // can carry low ones.
            problem.add_constraint(
                format!("english:{}", job.name),
                english,
                ConstraintOp::Ge,
                f64::from(job.english_min) * head,
            );

            italian[slacks[ji].var] = 1.0;
            problem.add_constraint(
                format!("italian:{}", job.name),
                italian,
                ConstraintOp::Ge,
                f64::from(job.italian_min) * head,
            );
        }

        Ok(Self {
            problem,
            assignments,
            slacks,
        })
    }
}

/// Objective price of one point of Italian shortfall.
///
/// Hiring the entire pool at once is the largest payroll any assignment can
/// reach, and scores are integers, so a positive optimal shortfall is at
/// least one whole point. Pricing that point above the whole pool's salary
/// means shortfall never trades against salary: it is spent only when no
/// slack-free assignment exists.
fn shortfall_penalty(candidates: &[Candidate]) -> f64 {
    candidates.iter().map(|c| c.salary).sum::<f64>() + 1.0
}

/// Reject inputs that break the table invariants. A candidate whose role
/// matches no job is not an error; that candidate is simply never assigned.
pub fn validate(jobs: &[Job], candidates: &[Candidate]) -> Result<(), BuildError> {
    let mut seen = HashSet::new();
    for job in jobs {
        if !seen.insert(job.name.as_str()) {
            return Err(BuildError::DuplicateJob(job.name.clone()));
        }
        if job.english_min > 100 || job.italian_min > 100 {
            return Err(BuildError::ScoreOutOfRange(job.name.clone()));
        }
    }

    let mut seen = HashSet::new();
    for candidate in candidates {
        if !seen.insert(candidate.name.as_str()) {
            return Err(BuildError::DuplicateCandidate(candidate.name.clone()));
        }
        if candidate.salary <= 0.0 {
            return Err(BuildError::NonPositiveSalary(candidate.name.clone()));
        }
        if candidate.english > 100 || candidate.italian > 100 {
            return Err(BuildError::ScoreOutOfRange(candidate.name.clone()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jobs() -> Vec<Job> {
        vec![
            Job::new("Cook", 60, 60, 2),
            Job::new("Waiter", 70, 70, 1),
        ]
    }

    fn candidates() -> Vec<Candidate> {
        vec![
            Candidate::new("Ada", 40_000.0, "Cook", 80, 90),
            Candidate::new("Ben", 35_000.0, "Cook", 70, 60),
            Candidate::new("Cleo", 45_000.0, "Waiter", 75, 80),
            Candidate::new("Dino", 30_000.0, "Gardener", 50, 50),
        ]
    }

    #[test]
    fn test_variables_exist_only_for_eligible_pairs() {
        let jobs = jobs();
        let candidates = candidates();
        let model = StaffingModel::build(&jobs, &candidates).unwrap();

        // Three eligible candidates, two slack variables; Dino's role
        // matches no job and gets nothing.
        assert_eq!(model.assignments.len(), 3);
        assert_eq!(model.slacks.len(), 2);
        assert_eq!(model.problem.num_variables(), 5);
        assert!(
            model
                .assignments
                .iter()
                .all(|av| candidates[av.candidate].role == jobs[av.job].name)
        );
    }

    #[test]
    fn test_constraint_families() {
        let jobs = jobs();
        let model = StaffingModel::build(&jobs, &candidates()).unwrap();

        // One at-most-one row per eligible candidate, three rows per job.
        assert_eq!(model.problem.num_constraints(), 3 + 3 * jobs.len());

        let headcount = model
            .problem
            .constraints
            .iter()
            .find(|c| c.name == "headcount:Cook")
            .unwrap();
        assert_eq!(headcount.op, ConstraintOp::Eq);
        assert_eq!(headcount.rhs, 2.0);

        let english = model
            .problem
            .constraints
            .iter()
            .find(|c| c.name == "english:Waiter")
            .unwrap();
        assert_eq!(english.op, ConstraintOp::Ge);
        assert_eq!(english.rhs, 70.0);
        // No slack coefficient on the English row.
        for sv in &model.slacks {
            assert_eq!(english.coefficients[sv.var], 0.0);
        }

        let italian = model
            .problem
            .constraints
            .iter()
            .find(|c| c.name == "italian:Cook")
            .unwrap();
        assert_eq!(italian.coefficients[model.slacks[0].var], 1.0);
        assert_eq!(italian.rhs, 120.0);
    }

    #[test]
    fn test_objective_prices_shortfall_above_any_payroll() {
        let candidates = candidates();
        let model = StaffingModel::build(&jobs(), &candidates).unwrap();
        let pool: f64 = candidates.iter().map(|c| c.salary).sum();

        for av in &model.assignments {
            assert_eq!(
                model.problem.objective.coefficients[av.var],
                candidates[av.candidate].salary
            );
        }
        for sv in &model.slacks {
            assert!(model.problem.objective.coefficients[sv.var] > pool);
        }
        assert!(model.problem.objective.minimize);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let dup_jobs = vec![Job::new("Cook", 50, 50, 1), Job::new("Cook", 60, 60, 1)];
        assert!(matches!(
            StaffingModel::build(&dup_jobs, &[]),
            Err(BuildError::DuplicateJob(_))
        ));

        let dup_candidates = vec![
            Candidate::new("Ada", 40_000.0, "Cook", 80, 90),
            Candidate::new("Ada", 41_000.0, "Cook", 81, 91),
        ];
        assert!(matches!(
            StaffingModel::build(&jobs(), &dup_candidates),
            Err(BuildError::DuplicateCandidate(_))
        ));
    }

    #[test]
    fn test_invalid_rows_rejected() {
        let free_labor = vec![Candidate::new("Ada", 0.0, "Cook", 80, 90)];
        assert!(matches!(
            StaffingModel::build(&jobs(), &free_labor),
            Err(BuildError::NonPositiveSalary(_))
        ));

        let superhuman = vec![Candidate::new("Ada", 40_000.0, "Cook", 101, 90)];
        assert!(matches!(
            StaffingModel::build(&jobs(), &superhuman),
            Err(BuildError::ScoreOutOfRange(_))
        ));

        let impossible_job = vec![Job::new("Cook", 120, 50, 1)];
        assert!(matches!(
            StaffingModel::build(&impossible_job, &[]),
            Err(BuildError::ScoreOutOfRange(_))
        ));
    }

    #[test]
    fn test_empty_tables_build_empty_models() {
        let model = StaffingModel::build(&[], &[]).unwrap();
        assert_eq!(model.problem.num_variables(), 0);
        assert_eq!(model.problem.num_constraints(), 0);

        // Jobs without candidates still get their rows; the headcount
        // equality is the one that can prove infeasibility later.
        let model = StaffingModel::build(&jobs(), &[]).unwrap();
        assert_eq!(model.assignments.len(), 0);
        assert_eq!(model.problem.num_variables(), 2);
        assert_eq!(model.problem.num_constraints(), 6);
    }
}
