// Copyright (c) 2025 Ledgerline.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed category set, in display order.
pub const CATEGORIES: [Category; 6] = [
    Category::Food,
    Category::Books,
    Category::Transport,
    Category::Entertainment,
    Category::Fees,
    Category::Other,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Books,
    Transport,
    Entertainment,
    Fees,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Books => "Books",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Fees => "Fees",
            Category::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Category> {
        CATEGORIES.into_iter().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single transaction. `id` and `created_at` never change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
    pub category: Category,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw form fields as the user typed them, before validation and coercion.
#[derive(Debug, Clone, Default)]
pub struct RecordInput {
    pub description: String,
    pub amount: String,
    pub category: String,
    pub date: String,
}

/// Partial update for an existing record. Absent fields are left as-is;
/// there is deliberately no way to address `id` or `created_at` here.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub description: Option<String>,
    pub amount: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
}

impl RecordPatch {
    pub fn from_input(input: &RecordInput) -> Self {
        RecordPatch {
            description: Some(input.description.clone()),
            amount: Some(input.amount.clone()),
            category: Some(input.category.clone()),
            date: Some(input.date.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyEntry {
    pub code: String,
    pub rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub budget_cap: Decimal,
    pub base_currency: String,
    pub currency2: CurrencyEntry,
    pub currency3: CurrencyEntry,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            budget_cap: Decimal::from(500),
            base_currency: "USD".to_string(),
            currency2: CurrencyEntry {
                code: "EUR".to_string(),
                rate: Decimal::new(92, 2),
            },
            currency3: CurrencyEntry {
                code: "KES".to_string(),
                rate: Decimal::from(130),
            },
        }
    }
}

/// Partial settings as they may appear in an import payload. Absent or
/// invalid sub-fields leave the stored settings untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub budget_cap: Option<Decimal>,
    pub base_currency: Option<String>,
    pub currency2: Option<CurrencyPatch>,
    pub currency3: Option<CurrencyPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CurrencyPatch {
    pub code: Option<String>,
    pub rate: Option<Decimal>,
}

/// The interchange file written by `export` and read back by `import`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFile {
    pub records: Vec<Record>,
    pub settings: Settings,
    pub exported_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum BudgetStatus {
    OverBudget { overage: Decimal },
    WithinBudget { remaining: Decimal },
}

/// Everything the dashboard needs, derived in one pass over the store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_spent: Decimal,
    pub top_category: Option<Category>,
    pub total_count: usize,
    pub budget_cap: Decimal,
    pub settings: Settings,
    pub last7_days_records: Vec<Record>,
    pub budget: BudgetStatus,
}
