//! Sales aggregation
//!
//! Read-only views over the order ledger: one business day, per-month totals
//! and the trailing week. Every call recomputes from the ledger.
//!
//! Aggregation loads the whole range into memory (the whole ledger for
//! monthly totals). That is fine for a single store; past a few hundred
//! thousand orders the monthly view needs a database-side GROUP BY.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::order::{LedgerError, Order, OrderLedger};

use crate::utils::time;

/// Orders and totals of one business day
#[derive(Debug, Clone)]
pub struct DailySales {
    pub date: NaiveDate,
    /// Newest first
    pub orders: Vec<Order>,
    pub total_amount: Decimal,
    pub order_count: usize,
    pub item_count: u64,
}

/// Total of one day in the weekly view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTotal {
    pub date: NaiveDate,
    /// Short weekday label ("Mon")
    pub weekday: String,
    pub total: Decimal,
    pub order_count: usize,
}

/// Days covered by [`SalesAggregator::weekly_sales`]
pub const WEEK_DAYS: i64 = 7;

#[derive(Clone)]
pub struct SalesAggregator {
    ledger: Arc<dyn OrderLedger>,
    tz: Tz,
}

impl SalesAggregator {
    pub fn new(ledger: Arc<dyn OrderLedger>, tz: Tz) -> Self {
        Self { ledger, tz }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Orders created within `date` (00:00:00.000 to 23:59:59.999, business timezone)
    pub async fn daily_sales(&self, date: NaiveDate) -> Result<DailySales, LedgerError> {
        let start = time::day_start_millis(date, self.tz);
        let end = time::day_end_inclusive_millis(date, self.tz);
        let orders = self.ledger.find_between(start, end).await?;

        let total_amount = orders.iter().map(|o| o.total).sum();
        let item_count = orders.iter().map(Order::item_count).sum();

        Ok(DailySales {
            date,
            order_count: orders.len(),
            orders,
            total_amount,
            item_count,
        })
    }

    /// Sum of order totals per "YYYY-MM", months ascending
    pub async fn monthly_sales(&self) -> Result<BTreeMap<String, Decimal>, LedgerError> {
        let orders = self.ledger.find_all().await?;
        Ok(group_by_month(&orders, self.tz))
    }

    /// Totals of the seven business days ending at `today`, oldest first
    pub async fn weekly_sales(&self, today: NaiveDate) -> Result<Vec<DayTotal>, LedgerError> {
        let first = today - Duration::days(WEEK_DAYS - 1);
        let start = time::day_start_millis(first, self.tz);
        let end = time::day_end_inclusive_millis(today, self.tz);
        let orders = self.ledger.find_between(start, end).await?;

        let mut days: Vec<DayTotal> = (0..WEEK_DAYS)
            .map(|offset| {
                let date = first + Duration::days(offset);
                DayTotal {
                    date,
                    weekday: date.weekday().to_string(),
                    total: Decimal::ZERO,
                    order_count: 0,
                }
            })
            .collect();

        for order in &orders {
            let date = time::to_local(order.created_at, self.tz).date_naive();
            if let Some(day) = days.iter_mut().find(|d| d.date == date) {
                day.total += order.total;
                day.order_count += 1;
            }
        }

        Ok(days)
    }
}

/// Group order totals by month of `created_at` in `tz`
pub fn group_by_month(orders: &[Order], tz: Tz) -> BTreeMap<String, Decimal> {
    let mut months = BTreeMap::new();
    for order in orders {
        *months
            .entry(time::month_key(order.created_at, tz))
            .or_insert(Decimal::ZERO) += order.total;
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::OrderRepository;
    use chrono_tz::Asia::Manila;
    use shared::order::{OrderDraft, OrderItem};

    const HOUR: i64 = 3_600_000;

    fn draft(total: i64, qty: u32) -> OrderDraft {
        OrderDraft {
            items: vec![OrderItem {
                name: "Beef Pares".into(),
                price: Decimal::from(total) / Decimal::from(qty),
                qty,
            }],
            total: Decimal::from(total),
            cash: Decimal::from(total),
            change: Decimal::ZERO,
            cashier: "ana".into(),
            idempotency_key: None,
        }
    }

    fn millis(date: &str, hours_after_midnight: i64) -> i64 {
        time::day_start_millis(time::parse_date(date).unwrap(), Manila) + hours_after_midnight * HOUR
    }

    /// 120 and 305 on 2024-03-01, 500 on 2024-03-02 (Manila)
    async fn seeded() -> SalesAggregator {
        let repo = OrderRepository::new(DbService::memory().await.unwrap().db);
        repo.insert_at(draft(120, 2), millis("2024-03-01", 10)).await.unwrap();
        repo.insert_at(draft(305, 1), millis("2024-03-01", 18)).await.unwrap();
        repo.insert_at(draft(500, 4), millis("2024-03-02", 12)).await.unwrap();
        SalesAggregator::new(Arc::new(repo), Manila)
    }

    #[tokio::test]
    async fn test_daily_sales() {
        let sales = seeded().await;
        let day = sales
            .daily_sales(time::parse_date("2024-03-01").unwrap())
            .await
            .unwrap();

        assert_eq!(day.total_amount, Decimal::from(425));
        assert_eq!(day.order_count, 2);
        assert_eq!(day.item_count, 3);
        assert_eq!(day.orders[0].total, Decimal::from(305));
    }

    #[tokio::test]
    async fn test_day_boundaries_are_inclusive() {
        let repo = OrderRepository::new(DbService::memory().await.unwrap().db);
        let start = millis("2024-03-01", 0);
        let end = millis("2024-03-02", 0) - 1;
        repo.insert_at(draft(10, 1), start - 1).await.unwrap();
        repo.insert_at(draft(20, 1), start).await.unwrap();
        repo.insert_at(draft(30, 1), end).await.unwrap();
        repo.insert_at(draft(40, 1), end + 1).await.unwrap();

        let sales = SalesAggregator::new(Arc::new(repo), Manila);
        let day = sales
            .daily_sales(time::parse_date("2024-03-01").unwrap())
            .await
            .unwrap();
        assert_eq!(day.total_amount, Decimal::from(50));
    }

    #[tokio::test]
    async fn test_empty_day() {
        let sales = seeded().await;
        let day = sales
            .daily_sales(time::parse_date("2024-05-01").unwrap())
            .await
            .unwrap();
        assert!(day.orders.is_empty());
        assert_eq!(day.total_amount, Decimal::ZERO);
        assert_eq!(day.item_count, 0);
    }

    #[tokio::test]
    async fn test_monthly_sales() {
        let sales = seeded().await;
        let months = sales.monthly_sales().await.unwrap();
        assert_eq!(months.len(), 1);
        assert_eq!(months.get("2024-03"), Some(&Decimal::from(925)));
    }

    #[tokio::test]
    async fn test_weekly_sales() {
        let sales = seeded().await;
        let week = sales
            .weekly_sales(time::parse_date("2024-03-02").unwrap())
            .await
            .unwrap();

        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, time::parse_date("2024-02-25").unwrap());
        assert_eq!(week[5].total, Decimal::from(425));
        assert_eq!(week[5].weekday, "Fri");
        assert_eq!(week[6].total, Decimal::from(500));
        assert_eq!(week[6].order_count, 1);
        assert_eq!(week[0].total, Decimal::ZERO);
    }

    #[test]
    fn test_group_by_month_spans_months() {
        let order = |total: i64, created_at: i64| Order {
            id: String::new(),
            items: vec![],
            total: Decimal::from(total),
            cash: Decimal::from(total),
            change: Decimal::ZERO,
            cashier: "ana".into(),
            created_at,
        };
        let orders = vec![
            order(100, millis("2024-01-15", 9)),
            order(50, millis("2024-03-31", 23)),
            order(25, millis("2024-01-02", 9)),
        ];
        let months = group_by_month(&orders, Manila);
        let keys: Vec<&String> = months.keys().collect();
        assert_eq!(keys, vec!["2024-01", "2024-03"]);
        assert_eq!(months["2024-01"], Decimal::from(125));
    }
}
