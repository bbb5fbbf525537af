//! Per-category aggregation.

use std::collections::BTreeMap;

use crate::{Category, Expense, MoneyCents};

/// Per-category sums plus the grand total.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Totals {
    per_category: BTreeMap<Category, MoneyCents>,
    grand_total: MoneyCents,
}

impl Totals {
    /// Sums every expense into its category bucket.
    ///
    /// All categories are present in the result, with zero when nothing was
    /// spent on them.
    pub fn from_expenses(expenses: &[Expense]) -> Self {
        let mut per_category: BTreeMap<Category, MoneyCents> = Category::ALL
            .into_iter()
            .map(|c| (c, MoneyCents::ZERO))
            .collect();
        let mut grand_total = MoneyCents::ZERO;

        for expense in expenses {
            let bucket = per_category.entry(expense.category).or_default();
            *bucket = saturating(*bucket, expense.amount);
            grand_total = saturating(grand_total, expense.amount);
        }

        Self {
            per_category,
            grand_total,
        }
    }

    pub fn get(&self, category: Category) -> MoneyCents {
        self.per_category
            .get(&category)
            .copied()
            .unwrap_or(MoneyCents::ZERO)
    }

    pub fn grand_total(&self) -> MoneyCents {
        self.grand_total
    }

    /// All categories in display order, zero buckets included.
    pub fn iter(&self) -> impl Iterator<Item = (Category, MoneyCents)> + '_ {
        self.per_category.iter().map(|(c, amount)| (*c, *amount))
    }

    /// Categories with spending, in display order.
    pub fn non_zero(&self) -> impl Iterator<Item = (Category, MoneyCents)> + '_ {
        self.iter().filter(|(_, amount)| !amount.is_zero())
    }

    /// Returns `true` when nothing was spent.
    pub fn is_empty(&self) -> bool {
        self.grand_total.is_zero()
    }
}

// Expenses are capped at `MoneyCents::MAX` on add and load, so only a
// collection of tens of millions of records can reach the clamp.
fn saturating(total: MoneyCents, amount: MoneyCents) -> MoneyCents {
    total.checked_add(amount).unwrap_or_else(|| {
        tracing::warn!("total overflow, clamping to {}", MoneyCents::new(i64::MAX));
        MoneyCents::new(i64::MAX)
    })
}
