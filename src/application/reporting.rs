use serde::{Deserialize, Serialize};

use crate::domain::{Category, CategoryTotal, Cents};

/// Category breakdown of everything recorded in the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub categories: Vec<CategorySummary>,
    pub total: Cents,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: Category,
    pub total: Cents,
    pub count: usize,
    pub average: Cents,
    /// Share of the report total, 0.0..=100.0
    pub percentage: f64,
}

impl CategoryReport {
    pub fn from_totals(totals: Vec<CategoryTotal>) -> Self {
        let total: Cents = totals.iter().map(|t| t.total).sum();

        let categories = totals
            .into_iter()
            .map(|t| CategorySummary {
                category: t.category,
                total: t.total,
                count: t.count,
                average: if t.count > 0 {
                    t.total / t.count as Cents
                } else {
                    0
                },
                percentage: if total > 0 {
                    t.total as f64 / total as f64 * 100.0
                } else {
                    0.0
                },
            })
            .collect();

        Self { categories, total }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
