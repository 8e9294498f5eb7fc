use serde::Serialize;

/// Display currency for a computation pass. All arithmetic happens in GBP;
/// AED is a presentation-time conversion by a fixed rate.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Gbp,
    Aed,
}

impl Currency {
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Gbp => "£",
            Currency::Aed => "AED",
        }
    }
}

/// Whether equity and carried interest pay out as part of the offer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum EquityOption {
    Yes,
    No,
}

impl EquityOption {
    pub fn is_selected(self) -> bool {
        self == EquityOption::Yes
    }

    /// Label used in the offer chart title, e.g. "New Offer Compensation - Yes".
    pub fn label(self) -> &'static str {
        match self {
            EquityOption::Yes => "Yes",
            EquityOption::No => "No",
        }
    }
}

/// Selected display currency plus the fixed GBP→AED multiplier.
/// Set once per pass from the inputs; read-only during computation.
#[derive(Copy, Clone, Debug)]
pub struct CurrencyContext {
    pub currency: Currency,
    pub gbp_to_aed_rate: f64,
}

impl CurrencyContext {
    pub fn convert(&self, amount: f64) -> f64 {
        super::calculator::convert_currency(amount, self.gbp_to_aed_rate, self.currency)
    }
}

/// Every scalar input for one computation pass. Constructed fresh per
/// request; nothing here is validated beyond the boundary checks in the API
/// layer, so out-of-range rates pass through arithmetically.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub tax_rate: f64,
    pub base_salary: f64,
    pub bonus: f64,
    pub fund_size: f64,
    pub expected_multiple: f64,
    pub carry_rate: f64,
    pub annualization_years: u32,
    pub equity_option: EquityOption,
    pub offer_base: f64,
    pub offer_bonus: f64,
    pub offer_equity: f64,
    pub flight_cost: f64,
    pub relocation_cost: f64,
    pub education_cost: f64,
    pub housing_allowance: f64,
    pub currency: Currency,
    pub gbp_to_aed_rate: f64,
}

impl Inputs {
    pub fn currency_context(&self) -> CurrencyContext {
        CurrencyContext {
            currency: self.currency,
            gbp_to_aed_rate: self.gbp_to_aed_rate,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownEntry {
    pub component: String,
    pub amount: f64,
}

/// Ordered mapping of compensation component to monetary amount.
/// Insertion order is display order for table rows and chart slices.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Breakdown {
    entries: Vec<BreakdownEntry>,
}

impl Breakdown {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, component: &str, amount: f64) {
        self.entries.push(BreakdownEntry {
            component: component.to_string(),
            amount,
        });
    }

    pub fn entries(&self) -> &[BreakdownEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// Returns a copy with every amount mapped through the currency context.
    pub fn converted(&self, ctx: &CurrencyContext) -> Breakdown {
        Breakdown {
            entries: self
                .entries
                .iter()
                .map(|e| BreakdownEntry {
                    component: e.component.clone(),
                    amount: ctx.convert(e.amount),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub component: String,
    pub amount: f64,
}

impl TableRow {
    pub fn new(component: &str, amount: f64) -> Self {
        Self {
            component: component.to_string(),
            amount,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSlice {
    pub label: String,
    pub value: f64,
    /// Preformatted "{percent}%\n({symbol}{value})" annotation.
    pub annotation: String,
}

/// Input for a circular proportion chart: one slice per breakdown entry,
/// drawn equal-aspect from a fixed start angle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub title: String,
    pub start_angle: f64,
    pub slices: Vec<ChartSlice>,
}

/// Everything one whole-pass recomputation produces. All monetary amounts
/// are denominated in the same display currency.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub currency: Currency,
    pub currency_symbol: &'static str,
    pub equity_option: EquityOption,
    pub current_breakdown: Breakdown,
    pub offer_breakdown: Breakdown,
    pub current_total: f64,
    pub offer_total: f64,
    pub current_table: Vec<TableRow>,
    pub offer_table: Vec<TableRow>,
    pub current_chart: ChartSpec,
    pub offer_chart: ChartSpec,
}
