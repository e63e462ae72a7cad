//! Reporting API Handlers
//!
//! Figures are summed in `Decimal` over the paid bills of the day; nothing
//! is aggregated in SQL so the rounding rules stay in one place.

use std::collections::HashSet;

use axum::{Json, extract::Query, extract::State};
use chrono::NaiveDate;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::billing::round_money;
use crate::core::ServerState;
use crate::db::models::Bill;
use crate::db::money::Money;
use crate::db::repository::{bill, order};
use crate::utils::time::day_range_millis;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct DailySalesQuery {
    /// YYYY-MM-DD (UTC); defaults to today
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DailySalesReport {
    pub date: String,
    pub total_revenue: Money,
    pub total_tax: Money,
    pub bill_count: usize,
    pub order_count: i64,
    pub tables_used: usize,
    pub average_bill: Money,
    pub bills: Vec<Bill>,
}

/// GET /api/reports/daily-sales?date=2026-08-23
pub async fn daily_sales(
    State(state): State<ServerState>,
    Query(query): Query<DailySalesQuery>,
) -> AppResult<Json<DailySalesReport>> {
    let date = match &query.date {
        Some(raw) => raw
            .parse::<NaiveDate>()
            .map_err(|_| AppError::validation(format!("Invalid date '{raw}', expected YYYY-MM-DD")))?,
        None => chrono::Utc::now().date_naive(),
    };

    let (start, end) = day_range_millis(date);
    let bills = bill::find_paid_in_range(&state.pool, start, end).await?;
    let order_count = order::count_in_range(&state.pool, start, end).await?;

    // round_money keeps an empty day reading "0.00" rather than "0"
    let total_revenue = round_money(bills.iter().map(|b| b.total_amount.0).sum());
    let total_tax = round_money(bills.iter().map(|b| b.tax_amount.0).sum());
    let tables_used: HashSet<i64> = bills.iter().map(|b| b.table_id).collect();

    let average_bill = if bills.is_empty() {
        round_money(Decimal::ZERO)
    } else {
        round_money(total_revenue / Decimal::from(bills.len()))
    };

    Ok(Json(DailySalesReport {
        date: date.to_string(),
        total_revenue: Money(total_revenue),
        total_tax: Money(total_tax),
        bill_count: bills.len(),
        order_count,
        tables_used: tables_used.len(),
        average_bill: Money(average_bill),
        bills,
    }))
}
