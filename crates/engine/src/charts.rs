//! Chart descriptions derived from the totals.
//!
//! These are plain data: front ends decide how to draw them. Categories with
//! no spending never appear in either chart.

use crate::{Category, MoneyCents, Rgb, Totals};

/// Single color of the ranking bars.
pub const RANKING_COLOR: Rgb = Rgb(0x00, 0x80, 0x80);

/// One slice of the proportional breakdown.
#[derive(Clone, Debug, PartialEq)]
pub struct Slice {
    pub category: Category,
    pub amount: MoneyCents,
    /// Share of the grand total, in percent.
    pub share: f64,
    pub color: Rgb,
}

impl Slice {
    /// Tooltip-style label: `Comidas: 15.50 € (27.9%)`.
    pub fn label(&self) -> String {
        format!("{}: {} ({:.1}%)", self.category, self.amount, self.share)
    }
}

/// Proportional breakdown (the doughnut).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Breakdown {
    pub slices: Vec<Slice>,
}

/// One horizontal bar of the ranking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bar {
    pub category: Category,
    pub amount: MoneyCents,
}

/// Ranked-magnitude horizontal bars, largest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ranking {
    pub bars: Vec<Bar>,
}

impl Ranking {
    /// Largest bar value, used to scale the axis.
    pub fn max(&self) -> MoneyCents {
        self.bars
            .iter()
            .map(|b| b.amount)
            .max()
            .unwrap_or(MoneyCents::ZERO)
    }
}

/// Both charts, always built together from the same totals.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartSet {
    pub breakdown: Breakdown,
    pub ranking: Ranking,
}

impl ChartSet {
    pub fn from_totals(totals: &Totals) -> Self {
        let grand_total = totals.grand_total().cents() as f64;
        let spent: Vec<(Category, MoneyCents)> = totals.non_zero().collect();

        let slices = spent
            .iter()
            .map(|&(category, amount)| Slice {
                category,
                amount,
                share: if grand_total > 0.0 {
                    amount.cents() as f64 / grand_total * 100.0
                } else {
                    0.0
                },
                color: category.color(),
            })
            .collect();

        let mut bars: Vec<Bar> = spent
            .into_iter()
            .map(|(category, amount)| Bar { category, amount })
            .collect();
        // stable: equal amounts keep category order
        bars.sort_by(|a, b| b.amount.cmp(&a.amount));

        Self {
            breakdown: Breakdown { slices },
            ranking: Ranking { bars },
        }
    }

    /// Number of series drawn (zero when nothing was spent).
    pub fn series_len(&self) -> usize {
        self.breakdown.slices.len()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::Expense;

    fn totals(items: &[(Category, i64)]) -> Totals {
        let expenses: Vec<Expense> = items
            .iter()
            .map(|&(category, cents)| {
                Expense::new(
                    NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                    category,
                    MoneyCents::new(cents),
                    "",
                )
            })
            .collect();
        Totals::from_expenses(&expenses)
    }

    #[test]
    fn zero_categories_are_omitted() {
        let charts = ChartSet::from_totals(&totals(&[
            (Category::Gasoil, 4000),
            (Category::Comidas, 1550),
        ]));
        let slice_categories: Vec<Category> =
            charts.breakdown.slices.iter().map(|s| s.category).collect();
        assert_eq!(slice_categories, vec![Category::Gasoil, Category::Comidas]);
        assert_eq!(charts.ranking.bars.len(), 2);
        assert_eq!(charts.series_len(), 2);
    }

    #[test]
    fn colors_follow_category_not_position() {
        let charts = ChartSet::from_totals(&totals(&[(Category::Varios, 100)]));
        assert_eq!(charts.breakdown.slices[0].color, Category::Varios.color());
    }

    #[test]
    fn shares_add_up_to_one_hundred() {
        let charts = ChartSet::from_totals(&totals(&[
            (Category::Hoteles, 1000),
            (Category::Parking, 3000),
        ]));
        let sum: f64 = charts.breakdown.slices.iter().map(|s| s.share).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert_eq!(charts.breakdown.slices[1].label(), "Parking: 30.00 € (75.0%)");
    }

    #[test]
    fn ranking_is_largest_first() {
        let charts = ChartSet::from_totals(&totals(&[
            (Category::Hoteles, 100),
            (Category::Gasoil, 900),
            (Category::Salones, 100),
        ]));
        let order: Vec<Category> = charts.ranking.bars.iter().map(|b| b.category).collect();
        assert_eq!(
            order,
            vec![Category::Gasoil, Category::Hoteles, Category::Salones]
        );
        assert_eq!(charts.ranking.max(), MoneyCents::new(900));
    }

    #[test]
    fn nothing_spent_means_no_series() {
        let charts = ChartSet::from_totals(&totals(&[]));
        assert_eq!(charts, ChartSet::default());
        assert_eq!(charts.series_len(), 0);
    }
}
