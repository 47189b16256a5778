use good_lp::{
    Expression, ProblemVariables, ResolutionError, Solution as _, SolverModel, Variable,
    constraint, default_solver, variable,
};
use thiserror::Error;

use crate::problem::{Constraint, ConstraintOp, MilpProblem, VarKind};
use crate::solution::{Solution, SolveStatus};

/// Failure of the backing solver itself, as opposed to a proven infeasible
/// or unbounded model (those are [`SolveStatus`] outcomes, not errors).
#[derive(Error, Debug)]
pub enum SolveError {
    #[error("Solver backend failed: {0}")]
    Backend(String),
}

/// Adapter that hands a [`MilpProblem`] to the backing MILP solver.
///
/// One call to [`Solver::solve`] is one blocking solve; the problem is never
/// mutated and carries no state between calls.
pub struct Solver {
    /// Tolerance for deciding constraint rows that carry no variables
    tolerance: f64,
}

impl Default for Solver {
    fn default() -> Self {
        Self { tolerance: 1e-9 }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn solve(&self, problem: &MilpProblem) -> Result<Solution, SolveError> {
        // A row with no variable terms reduces to `0 <op> rhs`; decide it
        // here instead of handing a degenerate row to the backend.
        for c in &problem.constraints {
            if is_constant_row(c) && !self.holds_without_variables(c) {
                return Ok(Solution::infeasible());
            }
        }

        if problem.variables.is_empty() {
            return Ok(Solution {
                status: SolveStatus::Optimal,
                values: Vec::new(),
                objective_value: 0.0,
            });
        }

        let mut vars = ProblemVariables::new();
        let handles: Vec<Variable> = problem
            .variables
            .iter()
            .map(|def| match def.kind {
                VarKind::Binary => vars.add(variable().binary().name(def.name.clone())),
                VarKind::Continuous { min } => vars.add(variable().min(min).name(def.name.clone())),
            })
            .collect();

        let objective = linear_expr(&problem.objective.coefficients, &handles);
        let unsolved = if problem.objective.minimize {
            vars.minimise(objective)
        } else {
            vars.maximise(objective)
        };

        let mut model = unsolved.using(default_solver);
        for c in &problem.constraints {
            if is_constant_row(c) {
                continue;
            }
            let lhs = linear_expr(&c.coefficients, &handles);
            model = model.with(match c.op {
                ConstraintOp::Le => constraint!(lhs <= c.rhs),
                ConstraintOp::Ge => constraint!(lhs >= c.rhs),
                ConstraintOp::Eq => constraint!(lhs == c.rhs),
            });
        }

        match model.solve() {
            Ok(solved) => {
                let values: Vec<f64> = handles.iter().map(|v| solved.value(*v)).collect();
                let objective_value = problem
                    .objective
                    .coefficients
                    .iter()
                    .zip(&values)
                    .map(|(coef, value)| coef * value)
                    .sum();
                Ok(Solution {
                    status: SolveStatus::Optimal,
                    values,
                    objective_value,
                })
            }
            Err(ResolutionError::Infeasible) => Ok(Solution::infeasible()),
            Err(ResolutionError::Unbounded) => Ok(Solution::unbounded()),
            Err(err) => Err(SolveError::Backend(err.to_string())),
        }
    }

    fn holds_without_variables(&self, constraint: &Constraint) -> bool {
        match constraint.op {
            ConstraintOp::Le => 0.0 <= constraint.rhs + self.tolerance,
            ConstraintOp::Ge => 0.0 >= constraint.rhs - self.tolerance,
            ConstraintOp::Eq => constraint.rhs.abs() <= self.tolerance,
        }
    }
}

fn is_constant_row(constraint: &Constraint) -> bool {
    constraint.coefficients.iter().all(|&coef| coef == 0.0)
}

fn linear_expr(coefficients: &[f64], handles: &[Variable]) -> Expression {
    let mut expr = Expression::from(0.0);
    for (coef, var) in coefficients.iter().zip(handles) {
        if *coef != 0.0 {
            expr += *var * *coef;
        }
    }
    expr
}
