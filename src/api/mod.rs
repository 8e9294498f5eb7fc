use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{Currency, EquityOption, Inputs, after_tax, run_comparison};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliCurrency {
    Gbp,
    Aed,
}

impl From<CliCurrency> for Currency {
    fn from(value: CliCurrency) -> Self {
        match value {
            CliCurrency::Gbp => Currency::Gbp,
            CliCurrency::Aed => Currency::Aed,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliEquityOption {
    Yes,
    No,
}

impl From<CliEquityOption> for EquityOption {
    fn from(value: CliEquityOption) -> Self {
        match value {
            CliEquityOption::Yes => EquityOption::Yes,
            CliEquityOption::No => EquityOption::No,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiCurrency {
    #[serde(alias = "GBP", alias = "Gbp")]
    Gbp,
    #[serde(alias = "AED", alias = "Aed")]
    Aed,
}

impl From<ApiCurrency> for CliCurrency {
    fn from(value: ApiCurrency) -> Self {
        match value {
            ApiCurrency::Gbp => CliCurrency::Gbp,
            ApiCurrency::Aed => CliCurrency::Aed,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiEquityOption {
    #[serde(alias = "Yes")]
    Yes,
    #[serde(alias = "No")]
    No,
}

impl From<ApiEquityOption> for CliEquityOption {
    fn from(value: ApiEquityOption) -> Self {
        match value {
            ApiEquityOption::Yes => CliEquityOption::Yes,
            ApiEquityOption::No => CliEquityOption::No,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ComparePayload {
    tax_rate: Option<f64>,
    base_current: Option<f64>,
    bonus_current: Option<f64>,

    fund_size: Option<f64>,
    expected_multiple: Option<f64>,
    carry_rate: Option<f64>,
    annualization_years: Option<u32>,

    equity_option: Option<ApiEquityOption>,
    offer_base: Option<f64>,
    offer_bonus: Option<f64>,
    offer_equity: Option<f64>,

    flight_cost: Option<f64>,
    relocation_cost: Option<f64>,
    education_cost: Option<f64>,
    housing_allowance: Option<f64>,

    selected_currency: Option<ApiCurrency>,
    gbp_to_aed_rate: Option<f64>,
}

#[derive(Parser, Debug)]
#[command(
    name = "compviz",
    about = "Compensation package comparison (current vs offer, with fund carry and GBP/AED display)"
)]
struct Cli {
    #[arg(
        long,
        default_value_t = 0.35,
        help = "Tax rate applied to the current base salary, as a fraction"
    )]
    tax_rate: f64,
    #[arg(long, default_value_t = 175_000.0)]
    base_salary: f64,
    #[arg(long, default_value_t = 100_000.0)]
    bonus: f64,
    #[arg(long, default_value_t = 150_000_000.0, help = "Fund size in GBP")]
    fund_size: f64,
    #[arg(
        long,
        default_value_t = 2.0,
        help = "Expected return multiple on the fund"
    )]
    expected_multiple: f64,
    #[arg(
        long,
        default_value_t = 0.05,
        help = "Carried interest rate on fund profit, as a fraction"
    )]
    carry_rate: f64,
    #[arg(
        long,
        default_value_t = 8,
        help = "Years the carried interest is spread over"
    )]
    annualization_years: u32,
    #[arg(
        long,
        value_enum,
        default_value_t = CliEquityOption::Yes,
        help = "Whether equity and carried interest pay out in the offer"
    )]
    equity_option: CliEquityOption,
    #[arg(
        long,
        help = "Offer base salary; defaults to 1.2x the after-tax current base"
    )]
    offer_base: Option<f64>,
    #[arg(long, help = "Offer bonus; defaults to 1.5x the offer base")]
    offer_bonus: Option<f64>,
    #[arg(long, default_value_t = 100_000.0)]
    offer_equity: f64,
    #[arg(long, default_value_t = 600.0, help = "Cost of one flight; four per year")]
    flight_cost: f64,
    #[arg(long, default_value_t = 15_000.0)]
    relocation_cost: f64,
    #[arg(
        long,
        default_value_t = 50_000.0,
        help = "Cost per child in education; two per year"
    )]
    education_cost: f64,
    #[arg(long, default_value_t = 100_000.0)]
    housing_allowance: f64,
    #[arg(long, value_enum, default_value_t = CliCurrency::Gbp)]
    currency: CliCurrency,
    #[arg(
        long,
        default_value_t = 4.68,
        help = "Fixed GBP to AED conversion rate"
    )]
    gbp_to_aed_rate: f64,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_inputs(cli: Cli) -> Result<Inputs, String> {
    if cli.annualization_years == 0 {
        return Err("--annualization-years must be > 0".to_string());
    }

    if !cli.gbp_to_aed_rate.is_finite() || cli.gbp_to_aed_rate <= 0.0 {
        return Err("--gbp-to-aed-rate must be finite and > 0".to_string());
    }

    let offer_base = cli
        .offer_base
        .unwrap_or_else(|| after_tax(cli.base_salary, cli.tax_rate) * 1.20);
    let offer_bonus = cli.offer_bonus.unwrap_or(offer_base * 1.50);

    Ok(Inputs {
        tax_rate: cli.tax_rate,
        base_salary: cli.base_salary,
        bonus: cli.bonus,
        fund_size: cli.fund_size,
        expected_multiple: cli.expected_multiple,
        carry_rate: cli.carry_rate,
        annualization_years: cli.annualization_years,
        equity_option: cli.equity_option.into(),
        offer_base,
        offer_bonus,
        offer_equity: cli.offer_equity,
        flight_cost: cli.flight_cost,
        relocation_cost: cli.relocation_cost,
        education_cost: cli.education_cost,
        housing_allowance: cli.housing_allowance,
        currency: cli.currency.into(),
        gbp_to_aed_rate: cli.gbp_to_aed_rate,
    })
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/compare",
            get(compare_get_handler).post(compare_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    println!("Compensation comparison HTTP API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn compare_get_handler(Query(payload): Query<ComparePayload>) -> Response {
    compare_handler_impl(payload)
}

async fn compare_post_handler(Json(payload): Json<ComparePayload>) -> Response {
    compare_handler_impl(payload)
}

fn compare_handler_impl(payload: ComparePayload) -> Response {
    let inputs = match inputs_from_payload(payload) {
        Ok(inputs) => inputs,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    let result = run_comparison(&inputs);
    json_response(StatusCode::OK, result)
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn inputs_from_json(json: &str) -> Result<Inputs, String> {
    let payload = serde_json::from_str::<ComparePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    inputs_from_payload(payload)
}

fn inputs_from_payload(payload: ComparePayload) -> Result<Inputs, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.tax_rate {
        cli.tax_rate = v;
    }
    if let Some(v) = payload.base_current {
        cli.base_salary = v;
    }
    if let Some(v) = payload.bonus_current {
        cli.bonus = v;
    }

    if let Some(v) = payload.fund_size {
        cli.fund_size = v;
    }
    if let Some(v) = payload.expected_multiple {
        cli.expected_multiple = v;
    }
    if let Some(v) = payload.carry_rate {
        cli.carry_rate = v;
    }
    if let Some(v) = payload.annualization_years {
        cli.annualization_years = v;
    }

    if let Some(v) = payload.equity_option {
        cli.equity_option = v.into();
    }
    if let Some(v) = payload.offer_base {
        cli.offer_base = Some(v);
    }
    if let Some(v) = payload.offer_bonus {
        cli.offer_bonus = Some(v);
    }
    if let Some(v) = payload.offer_equity {
        cli.offer_equity = v;
    }

    if let Some(v) = payload.flight_cost {
        cli.flight_cost = v;
    }
    if let Some(v) = payload.relocation_cost {
        cli.relocation_cost = v;
    }
    if let Some(v) = payload.education_cost {
        cli.education_cost = v;
    }
    if let Some(v) = payload.housing_allowance {
        cli.housing_allowance = v;
    }

    if let Some(v) = payload.selected_currency {
        cli.currency = v.into();
    }
    if let Some(v) = payload.gbp_to_aed_rate {
        cli.gbp_to_aed_rate = v;
    }

    build_inputs(cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        tax_rate: 0.35,
        base_salary: 175_000.0,
        bonus: 100_000.0,
        fund_size: 150_000_000.0,
        expected_multiple: 2.0,
        carry_rate: 0.05,
        annualization_years: 8,
        equity_option: CliEquityOption::Yes,
        offer_base: None,
        offer_bonus: None,
        offer_equity: 100_000.0,
        flight_cost: 600.0,
        relocation_cost: 15_000.0,
        education_cost: 50_000.0,
        housing_allowance: 100_000.0,
        currency: CliCurrency::Gbp,
        gbp_to_aed_rate: 4.68,
    }
}
