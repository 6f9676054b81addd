//! Dashboard numbers derived from local state.

use chrono::NaiveDate;

use models::order::{self, STATUS_DELIVERED, STATUS_SHIPPED};

/// Revenue over the last two weeks. `daily` is oldest-first, ending today.
#[derive(Clone, Debug, PartialEq)]
pub struct SalesTrend {
    pub daily: [f64; 7],
    pub last7_total: f64,
    pub previous7_total: f64,
    /// Percent change against the previous week. A week that starts from
    /// zero counts as +100%.
    pub trend_pct: f64,
}

/// Only fulfilled revenue counts: Shipped and Delivered orders. Orders
/// whose date fails to parse are skipped.
pub fn sales_trend(orders: &[order::Dto], today: NaiveDate) -> SalesTrend {
    let mut daily = [0.0; 7];
    let mut last7_total = 0.0;
    let mut previous7_total = 0.0;

    for order in orders {
        if order.status != STATUS_DELIVERED && order.status != STATUS_SHIPPED {
            continue;
        }
        let Some(date) = parse_order_date(&order.order_date) else {
            continue;
        };
        let diff_days = (today - date).num_days();
        if (0..7).contains(&diff_days) {
            daily[(6 - diff_days) as usize] += order.total;
            last7_total += order.total;
        } else if (7..14).contains(&diff_days) {
            previous7_total += order.total;
        }
    }

    let trend_pct = if previous7_total > 0.0 {
        (last7_total - previous7_total) / previous7_total * 100.0
    } else if last7_total > 0.0 {
        100.0
    } else {
        0.0
    };

    SalesTrend { daily, last7_total, previous7_total, trend_pct }
}

/// Orders carry free-form dates: ISO from the API, `Nov 21, 2023` from
/// older local state.
fn parse_order_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%b %d, %Y"))
        .ok()
}
