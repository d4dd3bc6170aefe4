use napi::Result as NapiResult;
use napi_derive::napi;

/// Surface a core error to the JS side as a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

#[napi]
pub fn project_weight(input_json: String) -> NapiResult<String> {
    let input: livestock_finance_core::projection::weight::WeightProjectionInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = livestock_finance_core::projection::weight::project_weight(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn accrue_feed(input_json: String) -> NapiResult<String> {
    let input: livestock_finance_core::projection::feed::FeedAccrualInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = livestock_finance_core::projection::feed::accrue_feed_investment(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_break_even(input_json: String) -> NapiResult<String> {
    let input: livestock_finance_core::projection::break_even::BreakEvenInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = livestock_finance_core::projection::break_even::analyze_break_even(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn project_billing(input_json: String) -> NapiResult<String> {
    let input: livestock_finance_core::projection::billing::BillingProjectionInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = livestock_finance_core::projection::billing::project_billing(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Cash flow
// ---------------------------------------------------------------------------

#[napi]
pub fn build_cash_flow(input_json: String) -> NapiResult<String> {
    let input: livestock_finance_core::cash_flow::statement::CashFlowInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = livestock_finance_core::cash_flow::statement::build_cash_flow(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
