use super::presenter::{self, OfferFigures};
use super::types::{Breakdown, ComparisonResult, Currency, EquityOption, Inputs};

/// Net salary after a flat tax rate. No clamping: a rate outside [0, 1]
/// passes through and produces a negative or super-salary result.
pub fn after_tax(salary: f64, tax_rate: f64) -> f64 {
    salary * (1.0 - tax_rate)
}

/// Carried interest on fund profit, spread evenly over the annualization
/// period. Does not guard `years == 0`; the input boundary rejects it
/// before this is reached.
pub fn annualized_carry(fund_size: f64, expected_multiple: f64, carry_rate: f64, years: u32) -> f64 {
    let profit = fund_size * expected_multiple - fund_size;
    let carried_interest = profit * carry_rate;
    carried_interest / years as f64
}

pub fn convert_currency(amount: f64, rate: f64, currency: Currency) -> f64 {
    match currency {
        Currency::Gbp => amount,
        Currency::Aed => amount * rate,
    }
}

pub fn build_current_breakdown(
    base_salary: f64,
    tax_rate: f64,
    bonus: f64,
    annualized_carry: f64,
) -> Breakdown {
    let mut breakdown = Breakdown::new();
    breakdown.push("Base Salary After Tax", after_tax(base_salary, tax_rate));
    breakdown.push("Bonus", bonus);
    breakdown.push("Carried Interest", annualized_carry);
    breakdown
}

pub fn build_offer_breakdown(
    offer_base: f64,
    offer_bonus: f64,
    allowances_total: f64,
    equity_option: EquityOption,
    offer_equity: f64,
    annualized_carry: f64,
) -> Breakdown {
    let mut breakdown = Breakdown::new();
    breakdown.push("Base Salary", offer_base);
    breakdown.push("Bonus", offer_bonus);
    breakdown.push("Other Allowances", allowances_total);
    if equity_option.is_selected() {
        breakdown.push("Equity", offer_equity);
        breakdown.push("Annualized Carry", annualized_carry);
    }
    breakdown
}

/// Whole-pass recomputation: inputs in, both tables and both charts out.
///
/// Every figure is computed in GBP first, then the complete set is mapped
/// through the currency context in one block before any table or chart is
/// assembled, so a partially converted result cannot be constructed.
pub fn run_comparison(inputs: &Inputs) -> ComparisonResult {
    let ctx = inputs.currency_context();

    let carry = annualized_carry(
        inputs.fund_size,
        inputs.expected_multiple,
        inputs.carry_rate,
        inputs.annualization_years,
    );

    // "Other Allowances" in the breakdown includes relocation; the table's
    // "Allowances" row excludes it because relocation gets its own row.
    let allowances_total = inputs.flight_cost * 4.0
        + inputs.education_cost * 2.0
        + inputs.relocation_cost
        + inputs.housing_allowance;
    let recurring_allowances =
        inputs.flight_cost * 4.0 + inputs.education_cost * 2.0 + inputs.housing_allowance;
    let sign_on = if inputs.equity_option.is_selected() {
        inputs.offer_equity
    } else {
        0.0
    };

    let current = build_current_breakdown(
        inputs.base_salary,
        inputs.tax_rate,
        inputs.bonus,
        carry,
    );
    let offer = build_offer_breakdown(
        inputs.offer_base,
        inputs.offer_bonus,
        allowances_total,
        inputs.equity_option,
        inputs.offer_equity,
        carry,
    );

    // Single conversion point. Everything below is in the display currency.
    let current = current.converted(&ctx);
    let offer = offer.converted(&ctx);
    let current_total = current.total();
    let offer_total = offer.total();
    let after_tax_base = ctx.convert(after_tax(inputs.base_salary, inputs.tax_rate));
    let bonus = ctx.convert(inputs.bonus);
    let offer_figures = OfferFigures {
        base: ctx.convert(inputs.offer_base),
        allowances: ctx.convert(recurring_allowances),
        bonus: ctx.convert(inputs.offer_bonus),
        total: offer_total,
        relocation: ctx.convert(inputs.relocation_cost),
        education: ctx.convert(inputs.education_cost),
        housing: ctx.convert(inputs.housing_allowance),
        sign_on: ctx.convert(sign_on),
    };

    let current_table = presenter::build_current_table(after_tax_base, bonus, current_total);
    let offer_table = presenter::build_offer_table(&offer_figures);

    let current_chart =
        presenter::build_proportion_chart(&current, "Current Compensation", ctx.currency);
    let offer_title = format!(
        "New Offer Compensation - {}",
        inputs.equity_option.label()
    );
    let offer_chart = presenter::build_proportion_chart(&offer, &offer_title, ctx.currency);

    ComparisonResult {
        currency: ctx.currency,
        currency_symbol: ctx.currency.symbol(),
        equity_option: inputs.equity_option,
        current_breakdown: current,
        offer_breakdown: offer,
        current_total,
        offer_total,
        current_table,
        offer_table,
        current_chart,
        offer_chart,
    }
}
