use super::types::{Breakdown, ChartSlice, ChartSpec, Currency, TableRow};

/// One-off figures feeding the offer summary table, already in the display
/// currency. `sign_on` is zero when the equity option is not selected.
#[derive(Debug, Clone, Copy)]
pub struct OfferFigures {
    pub base: f64,
    pub allowances: f64,
    pub bonus: f64,
    pub total: f64,
    pub relocation: f64,
    pub education: f64,
    pub housing: f64,
    pub sign_on: f64,
}

impl OfferFigures {
    /// Total Compensation plus the one-off items itemized below it.
    pub fn total_package(&self) -> f64 {
        self.total + self.relocation + self.education + self.housing + self.sign_on
    }
}

pub fn build_current_table(after_tax_base: f64, bonus: f64, total: f64) -> Vec<TableRow> {
    vec![
        TableRow::new("Base Salary", after_tax_base),
        // No allowances in current compensation.
        TableRow::new("Allowances", 0.0),
        TableRow::new("Bonus", bonus),
        TableRow::new("Total Compensation", total),
    ]
}

pub fn build_offer_table(figures: &OfferFigures) -> Vec<TableRow> {
    vec![
        TableRow::new("Base Salary", figures.base),
        TableRow::new("Allowances", figures.allowances),
        TableRow::new("Bonus", figures.bonus),
        TableRow::new("Total Compensation", figures.total),
        TableRow::new("Relocation", figures.relocation),
        TableRow::new("Education", figures.education),
        TableRow::new("Housing", figures.housing),
        TableRow::new("Sign On", figures.sign_on),
        TableRow::new("Total Package", figures.total_package()),
    ]
}

/// Slice annotation: percentage to one decimal place over the absolute
/// amount recovered from the full value set, e.g. "25.0%\n(£100)".
pub fn format_proportion_label(percent: f64, values: &[f64], currency: Currency) -> String {
    let total: f64 = values.iter().sum();
    let value = (percent / 100.0 * total).round() as i64;
    format!(
        "{percent:.1}%\n({}{})",
        currency.symbol(),
        group_thousands(value)
    )
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// One slice per breakdown entry in insertion order, annotated with its
/// share of the whole. Rendered equal-aspect from a 90° start angle.
pub fn build_proportion_chart(breakdown: &Breakdown, title: &str, currency: Currency) -> ChartSpec {
    let values: Vec<f64> = breakdown.entries().iter().map(|e| e.amount).collect();
    let total = breakdown.total();

    let slices = breakdown
        .entries()
        .iter()
        .map(|entry| {
            let percent = entry.amount / total * 100.0;
            ChartSlice {
                label: entry.component.clone(),
                value: entry.amount,
                annotation: format_proportion_label(percent, &values, currency),
            }
        })
        .collect();

    ChartSpec {
        title: title.to_string(),
        start_angle: 90.0,
        slices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculator::build_current_breakdown;
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn current_table_has_fixed_rows_with_zero_allowances() {
        let table = build_current_table(113_750.0, 100_000.0, 1_151_250.0);
        let components: Vec<&str> = table.iter().map(|r| r.component.as_str()).collect();
        assert_eq!(
            components,
            ["Base Salary", "Allowances", "Bonus", "Total Compensation"]
        );
        assert_approx(table[1].amount, 0.0);
        assert_approx(table[3].amount, 1_151_250.0);
    }

    #[test]
    fn offer_table_rows_and_total_package() {
        let figures = OfferFigures {
            base: 136_500.0,
            allowances: 202_400.0,
            bonus: 204_750.0,
            total: 1_596_150.0,
            relocation: 15_000.0,
            education: 50_000.0,
            housing: 100_000.0,
            sign_on: 100_000.0,
        };
        let table = build_offer_table(&figures);

        let components: Vec<&str> = table.iter().map(|r| r.component.as_str()).collect();
        assert_eq!(
            components,
            [
                "Base Salary",
                "Allowances",
                "Bonus",
                "Total Compensation",
                "Relocation",
                "Education",
                "Housing",
                "Sign On",
                "Total Package"
            ]
        );
        assert_approx(
            table[8].amount,
            1_596_150.0 + 15_000.0 + 50_000.0 + 100_000.0 + 100_000.0,
        );
    }

    #[test]
    fn proportion_label_recovers_absolute_value() {
        let label = format_proportion_label(25.0, &[100.0, 300.0], Currency::Gbp);
        assert_eq!(label, "25.0%\n(£100)");
    }

    #[test]
    fn proportion_label_groups_thousands_and_uses_currency_code() {
        let values = [937_500.0, 62_500.0];
        let label = format_proportion_label(93.75, &values, Currency::Gbp);
        assert_eq!(label, "93.8%\n(£937,500)");

        let aed = format_proportion_label(100.0, &[4_680.0], Currency::Aed);
        assert_eq!(aed, "100.0%\n(AED4,680)");
    }

    #[test]
    fn group_thousands_handles_signs_and_small_numbers() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(150_000_000), "150,000,000");
        assert_eq!(group_thousands(-56_875), "-56,875");
    }

    #[test]
    fn chart_slices_follow_breakdown_order() {
        let breakdown = build_current_breakdown(175_000.0, 0.35, 100_000.0, 937_500.0);
        let chart = build_proportion_chart(&breakdown, "Current Compensation", Currency::Gbp);

        assert_eq!(chart.title, "Current Compensation");
        assert_approx(chart.start_angle, 90.0);
        let labels: Vec<&str> = chart.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["Base Salary After Tax", "Bonus", "Carried Interest"]);
        assert!(chart.slices[0].annotation.contains('£'));
    }

    #[test]
    fn chart_percentages_cover_the_whole() {
        let breakdown = build_current_breakdown(175_000.0, 0.35, 100_000.0, 937_500.0);
        let total = breakdown.total();
        let chart = build_proportion_chart(&breakdown, "Current Compensation", Currency::Gbp);

        let percent_sum: f64 = chart
            .slices
            .iter()
            .map(|s| s.value / total * 100.0)
            .sum();
        assert_approx(percent_sum, 100.0);
    }

    proptest! {
        #[test]
        fn prop_label_value_tracks_percent_of_sum(
            a in 1u32..1_000_000,
            b in 1u32..1_000_000
        ) {
            let values = [a as f64, b as f64];
            let total = values[0] + values[1];
            let percent = values[0] / total * 100.0;
            let label = format_proportion_label(percent, &values, Currency::Gbp);

            let expected = (percent / 100.0 * total).round() as i64;
            prop_assert!(label.starts_with(&format!("{percent:.1}%")));
            prop_assert!(label.ends_with(&format!("(£{})", group_thousands(expected))));
        }

        #[test]
        fn prop_group_thousands_preserves_digits(value in -2_000_000_000i64..2_000_000_000) {
            let grouped = group_thousands(value);
            let stripped: String = grouped.chars().filter(|c| *c != ',').collect();
            prop_assert!(stripped == value.to_string());
        }
    }
}
