//! Cost entry domain entity
//!
//! Actual spending recorded against a project, and the budget-vs-actual
//! summary derived from it.

use chrono::NaiveDate;
use serde::Serialize;

use super::project::{Project, ProjectId};

entity_id!(
    /// Unique identifier for a cost entry
    CostEntryId
);

/// Vendor recorded when the client does not name one
pub const UNKNOWN_VENDOR: &str = "Unknown";

/// Money spent on a project
#[derive(Debug, Clone, Serialize)]
pub struct CostEntry {
    pub id: CostEntryId,
    pub project_id: ProjectId,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub vendor_name: String,
    pub date_incurred: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct NewCostEntry {
    pub project_id: ProjectId,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub vendor_name: String,
    pub date_incurred: NaiveDate,
}

/// One line of the cost breakdown
#[derive(Debug, Clone, Serialize)]
pub struct CostLine {
    pub category: String,
    pub amount: f64,
    pub vendor: String,
    pub description: String,
    pub date: NaiveDate,
}

/// Budget versus actual spending for a project
#[derive(Debug, Clone, Serialize)]
pub struct FinancialSummary {
    pub project_name: String,
    pub total_budget: f64,
    pub total_actual: f64,
    pub budget_remaining: f64,
    pub cost_breakdown: Vec<CostLine>,
}

impl FinancialSummary {
    pub fn compute(project: &Project, costs: &[CostEntry]) -> Self {
        let total_actual: f64 = costs.iter().map(|c| c.amount).sum();

        Self {
            project_name: project.name.clone(),
            total_budget: project.total_budget,
            total_actual,
            budget_remaining: project.total_budget - total_actual,
            cost_breakdown: costs
                .iter()
                .map(|c| CostLine {
                    category: c.category.clone(),
                    amount: c.amount,
                    vendor: c.vendor_name.clone(),
                    description: c.description.clone(),
                    date: c.date_incurred,
                })
                .collect(),
        }
    }
}
