pub mod builder;
pub mod extract;
pub mod pipeline;
pub mod roster;
pub mod summary;

pub use builder::{AssignmentVar, BuildError, SlackVar, StaffingModel, validate};
pub use extract::{Assignment, assignments, italian_shortfall};
pub use pipeline::{PlanError, StaffingPlan, plan};
pub use roster::{Candidate, Job};
pub use summary::{SummaryRow, summarize};
