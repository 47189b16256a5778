//! Per-job staffing report plus the derived totals.
//!
//! # Columns
//!
//! | Column | Per-job row | Total row |
//! |--------|-------------|-----------|
//! | required / filled | from the job / record count | sums |
//! | required English/Italian | the job's targets | mean across jobs |
//! | average English/Italian | mean of records, rounded | mean of the per-job values |
//! | total cost | sum of salaries | sum |
//! | average cost | total cost / filled | total cost / total filled |
//! | unfilled, gaps | filled - required, average - target | same formulas |

use crate::extract::Assignment;
use crate::roster::Job;

/// One row of the summary table. The synthetic last row is labelled
/// "Total".
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub job: String,
    pub required: u32,
    pub required_english: f64,
    pub required_italian: f64,
    pub filled: u32,
    pub avg_english: f64,
    pub avg_italian: f64,
    pub total_cost: f64,
    pub avg_cost: f64,
    /// filled - required; negative means understaffed
    pub unfilled: i64,
    pub english_gap: f64,
    pub italian_gap: f64,
}

/// Aggregate the assignment records into one row per job plus a Total row.
///
/// Jobs with no records report zero averages rather than dividing by zero.
/// The Total row sums headcounts and costs but takes unweighted means for
/// the proficiency columns, and its gaps are computed from the
/// already-rounded per-job averages. Reports are compared against those
/// exact figures, so the formulas must not be "corrected" to weighted
/// means.
pub fn summarize(jobs: &[Job], assignments: &[Assignment]) -> Vec<SummaryRow> {
    let mut rows: Vec<SummaryRow> = jobs.iter().map(|job| job_row(job, assignments)).collect();
    let total = total_row(jobs, &rows);
    rows.push(total);
    rows
}

fn job_row(job: &Job, assignments: &[Assignment]) -> SummaryRow {
    let hired: Vec<&Assignment> = assignments.iter().filter(|a| a.job == job.name).collect();
    let filled = hired.len() as u32;
    let total_cost: f64 = hired.iter().map(|a| a.salary).sum();

    let avg_english = mean(hired.iter().map(|a| f64::from(a.english))).round();
    let avg_italian = mean(hired.iter().map(|a| f64::from(a.italian))).round();
    let avg_cost = if filled == 0 {
        0.0
    } else {
        total_cost / f64::from(filled)
    };

    let required_english = f64::from(job.english_min);
    let required_italian = f64::from(job.italian_min);

    SummaryRow {
        job: job.name.clone(),
        required: job.headcount,
        required_english,
        required_italian,
        filled,
        avg_english,
        avg_italian,
        total_cost,
        avg_cost,
        unfilled: i64::from(filled) - i64::from(job.headcount),
        english_gap: avg_english - required_english,
        italian_gap: avg_italian - required_italian,
    }
}

fn total_row(jobs: &[Job], rows: &[SummaryRow]) -> SummaryRow {
    let required: u32 = jobs.iter().map(|j| j.headcount).sum();
    let filled: u32 = rows.iter().map(|r| r.filled).sum();
    let total_cost: f64 = rows.iter().map(|r| r.total_cost).sum();

    let required_english = mean(jobs.iter().map(|j| f64::from(j.english_min)));
    let required_italian = mean(jobs.iter().map(|j| f64::from(j.italian_min)));
    let avg_english = mean(rows.iter().map(|r| r.avg_english));
    let avg_italian = mean(rows.iter().map(|r| r.avg_italian));
    let avg_cost = if filled == 0 {
        0.0
    } else {
        total_cost / f64::from(filled)
    };

    SummaryRow {
        job: "Total".to_string(),
        required,
        required_english,
        required_italian,
        filled,
        avg_english,
        avg_italian,
        total_cost,
        avg_cost,
        unfilled: i64::from(filled) - i64::from(required),
        english_gap: avg_english - required_english,
        italian_gap: avg_italian - required_italian,
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count: u32 = 0;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 { 0.0 } else { sum / f64::from(count) }
}
