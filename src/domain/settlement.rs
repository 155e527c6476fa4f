//! 정산 금액 집계.
//!
//! 한 주문 상품(order item)이 정산 라인 하나가 된다. 라인의 처리 구분은
//! 판매(Sale), 환불(Refund), 취소(Cancel) 세 가지이며, 수수료와 배송비는
//! 판매 라인에만 붙는다.
//!
//! 최종 정산액:
//! `총 주문액 - 수수료 - 배송비 - 환불액 - 취소액 + 조정액`
//! (배송비 차감을 끈 정책에서는 배송비 항이 빠진다)
//!
//! 항상 `최종 정산액 == Σ 라인 정산액 + 조정액` 이 성립한다.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::config::SettlementConfig;
use crate::entities::order_items::{self, OrderItemStatus};
use crate::entities::orders::{self, OrderStatus, PaymentStatus};
use crate::entities::settlement_items::SettlementItemKind;
use crate::error::{AppError, AppResult};

const BP_DENOMINATOR: i64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlementPolicy {
    pub commission_rate_bp: i64,
    pub delivery_fee_per_item: i64,
    pub deduct_delivery_fee: bool,
}

impl Default for SettlementPolicy {
    fn default() -> Self {
        Self {
            commission_rate_bp: 500,
            delivery_fee_per_item: 3_000,
            deduct_delivery_fee: true,
        }
    }
}

impl From<&SettlementConfig> for SettlementPolicy {
    fn from(cfg: &SettlementConfig) -> Self {
        Self {
            commission_rate_bp: cfg.commission_rate_bp,
            delivery_fee_per_item: cfg.delivery_fee_per_item,
            deduct_delivery_fee: cfg.deduct_delivery_fee,
        }
    }
}

impl SettlementPolicy {
    /// 판매자별 수수료율이 있으면 그것으로 덮어쓴 정책
    pub fn for_seller(&self, seller_rate_bp: Option<i32>) -> Self {
        match seller_rate_bp {
            Some(bp) => Self {
                commission_rate_bp: i64::from(bp),
                ..*self
            },
            None => *self,
        }
    }

    pub fn commission_for(&self, item_amount: i64) -> AppResult<i64> {
        item_amount
            .checked_mul(self.commission_rate_bp)
            .map(|v| v.div_euclid(BP_DENOMINATOR))
            .ok_or_else(overflow)
    }
}

/// 집계 전 입력 라인
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineInput {
    pub order_id: i64,
    pub order_item_id: i64,
    pub seller_id: i64,
    pub product_name: String,
    pub unit_price: i64,
    pub quantity: i32,
    pub kind: SettlementItemKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementLine {
    pub order_id: i64,
    pub order_item_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub kind: SettlementItemKind,
    pub item_amount: i64,
    pub commission_amount: i64,
    pub delivery_fee: i64,
    pub settlement_amount: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettlementTotals {
    pub total_order_amount: i64,
    pub total_commission: i64,
    pub total_delivery_fee: i64,
    pub total_refund_amount: i64,
    pub total_cancel_amount: i64,
}

impl SettlementTotals {
    pub fn final_amount(&self, adjustment: i64, deduct_delivery_fee: bool) -> AppResult<i64> {
        let fee = if deduct_delivery_fee {
            self.total_delivery_fee
        } else {
            0
        };
        self.total_order_amount
            .checked_sub(self.total_commission)
            .and_then(|v| v.checked_sub(fee))
            .and_then(|v| v.checked_sub(self.total_refund_amount))
            .and_then(|v| v.checked_sub(self.total_cancel_amount))
            .and_then(|v| v.checked_add(adjustment))
            .ok_or_else(overflow)
    }
}

/// 판매자 한 명의 정산 초안
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementDraft {
    pub seller_id: i64,
    pub commission_rate_bp: i64,
    pub lines: Vec<SettlementLine>,
    pub totals: SettlementTotals,
    pub final_settlement_amount: i64,
}

fn overflow() -> AppError {
    AppError::ValidationError("Settlement amount overflow".to_string())
}

pub fn compute_line(input: &LineInput, policy: &SettlementPolicy) -> AppResult<SettlementLine> {
    if input.unit_price < 0 || input.quantity < 0 {
        return Err(AppError::ValidationError(format!(
            "Order item {} has a negative price or quantity",
            input.order_item_id
        )));
    }
    let item_amount = input
        .unit_price
        .checked_mul(i64::from(input.quantity))
        .ok_or_else(overflow)?;

    let (commission_amount, delivery_fee, settlement_amount) = match input.kind {
        SettlementItemKind::Sale => {
            let commission = policy.commission_for(item_amount)?;
            let fee = policy.delivery_fee_per_item;
            let deducted_fee = if policy.deduct_delivery_fee { fee } else { 0 };
            let net = item_amount
                .checked_sub(commission)
                .and_then(|v| v.checked_sub(deducted_fee))
                .ok_or_else(overflow)?;
            (commission, fee, net)
        }
        SettlementItemKind::Refund | SettlementItemKind::Cancel => (0, 0, 0),
    };

    Ok(SettlementLine {
        order_id: input.order_id,
        order_item_id: input.order_item_id,
        product_name: input.product_name.clone(),
        quantity: input.quantity,
        kind: input.kind,
        item_amount,
        commission_amount,
        delivery_fee,
        settlement_amount,
    })
}

pub fn sum_lines(lines: &[SettlementLine]) -> AppResult<SettlementTotals> {
    let mut t = SettlementTotals::default();
    for line in lines {
        let add = |acc: i64, v: i64| acc.checked_add(v).ok_or_else(overflow);
        t.total_order_amount = add(t.total_order_amount, line.item_amount)?;
        t.total_commission = add(t.total_commission, line.commission_amount)?;
        t.total_delivery_fee = add(t.total_delivery_fee, line.delivery_fee)?;
        match line.kind {
            SettlementItemKind::Refund => {
                t.total_refund_amount = add(t.total_refund_amount, line.item_amount)?;
            }
            SettlementItemKind::Cancel => {
                t.total_cancel_amount = add(t.total_cancel_amount, line.item_amount)?;
            }
            SettlementItemKind::Sale => {}
        }
    }
    Ok(t)
}

/// 주문/주문상품 상태로 라인 구분을 정한다. 상품 상태가 우선한다.
pub fn line_kind(order_status: OrderStatus, item_status: OrderItemStatus) -> SettlementItemKind {
    match item_status {
        OrderItemStatus::Cancelled => SettlementItemKind::Cancel,
        OrderItemStatus::Refunded => SettlementItemKind::Refund,
        OrderItemStatus::Normal => match order_status {
            OrderStatus::Cancelled => SettlementItemKind::Cancel,
            OrderStatus::Returned => SettlementItemKind::Refund,
            _ => SettlementItemKind::Sale,
        },
    }
}

/// 기간 [start 00:00, end 다음날 00:00) 을 UTC 시각으로
pub fn period_bounds(
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let from = start_date
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| AppError::ValidationError("Invalid period start".to_string()))?;
    let until = end_date
        .checked_add_days(Days::new(1))
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| AppError::ValidationError("Invalid period end".to_string()))?;
    Ok((from, until))
}

pub const SETTLEABLE_ORDER_STATUSES: [OrderStatus; 4] = [
    OrderStatus::Delivered,
    OrderStatus::Confirmed,
    OrderStatus::Cancelled,
    OrderStatus::Returned,
];

/// 기간 정산 대상 주문 여부
pub fn is_eligible(order: &orders::Model, from: DateTime<Utc>, until: DateTime<Utc>) -> bool {
    let Some(paid_at) = order.paid_at else {
        return false;
    };
    if paid_at < from || paid_at >= until {
        return false;
    }
    if matches!(
        order.payment_status,
        PaymentStatus::Pending | PaymentStatus::Failed
    ) {
        return false;
    }
    SETTLEABLE_ORDER_STATUSES.contains(&order.order_status)
}

/// 판매자별 정산 초안을 판매자 ID 오름차순으로 만든다.
///
/// `orders` 에 없는 주문의 상품과 `excluded` 에 든 주문상품은 건너뛴다.
pub fn build_drafts(
    orders: &[orders::Model],
    items: &[order_items::Model],
    excluded: &HashSet<i64>,
    policy: &SettlementPolicy,
    seller_rates: &HashMap<i64, i32>,
) -> AppResult<Vec<SettlementDraft>> {
    let order_status: HashMap<i64, OrderStatus> =
        orders.iter().map(|o| (o.id, o.order_status)).collect();

    let mut by_seller: BTreeMap<i64, Vec<&order_items::Model>> = BTreeMap::new();
    for item in items {
        if excluded.contains(&item.id) || !order_status.contains_key(&item.order_id) {
            continue;
        }
        by_seller.entry(item.seller_id).or_default().push(item);
    }

    let mut drafts = Vec::with_capacity(by_seller.len());
    for (seller_id, mut seller_items) in by_seller {
        seller_items.sort_by_key(|i| (i.order_id, i.id));
        let seller_policy = policy.for_seller(seller_rates.get(&seller_id).copied());

        let lines = seller_items
            .into_iter()
            .map(|item| {
                let input = LineInput {
                    order_id: item.order_id,
                    order_item_id: item.id,
                    seller_id,
                    product_name: item.product_name.clone(),
                    unit_price: item.unit_price,
                    quantity: item.quantity,
                    kind: line_kind(order_status[&item.order_id], item.status),
                };
                compute_line(&input, &seller_policy)
            })
            .collect::<AppResult<Vec<_>>>()?;

        let totals = sum_lines(&lines)?;
        let final_settlement_amount = totals.final_amount(0, seller_policy.deduct_delivery_fee)?;
        drafts.push(SettlementDraft {
            seller_id,
            commission_rate_bp: seller_policy.commission_rate_bp,
            lines,
            totals,
            final_settlement_amount,
        });
    }
    Ok(drafts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sale(id: i64, unit_price: i64, quantity: i32) -> LineInput {
        LineInput {
            order_id: 1,
            order_item_id: id,
            seller_id: 7,
            product_name: format!("상품 {id}"),
            unit_price,
            quantity,
            kind: SettlementItemKind::Sale,
        }
    }

    fn order(id: i64, status: OrderStatus, paid_at: Option<DateTime<Utc>>) -> orders::Model {
        let ts = Utc.with_ymd_and_hms(2025, 1, 5, 12, 0, 0).unwrap();
        orders::Model {
            id,
            order_number: format!("ORD{id}"),
            user_id: 1,
            order_status: status,
            payment_status: PaymentStatus::Paid,
            delivery_status: orders::DeliveryStatus::Delivered,
            total_amount: 0,
            shipping_address: "서울".to_string(),
            ordered_at: ts,
            paid_at,
            created_at: ts,
            updated_at: ts,
        }
    }

    fn item(id: i64, order_id: i64, seller_id: i64, unit_price: i64) -> order_items::Model {
        let ts = Utc.with_ymd_and_hms(2025, 1, 5, 12, 0, 0).unwrap();
        order_items::Model {
            id,
            order_id,
            product_id: 100 + id,
            seller_id,
            product_name: format!("상품 {id}"),
            unit_price,
            quantity: 1,
            status: OrderItemStatus::Normal,
            created_at: ts,
            updated_at: ts,
        }
    }

    fn five_lines(policy: &SettlementPolicy) -> Vec<SettlementLine> {
        (1..=5)
            .map(|i| compute_line(&sale(i, 250_000, 1), policy).unwrap())
            .collect()
    }

    #[test]
    fn test_worked_figure_with_delivery_fee_deducted() {
        let policy = SettlementPolicy::default();
        let lines = five_lines(&policy);
        let totals = sum_lines(&lines).unwrap();

        assert_eq!(totals.total_order_amount, 1_250_000);
        assert_eq!(totals.total_commission, 62_500);
        assert_eq!(totals.total_delivery_fee, 15_000);
        assert_eq!(totals.final_amount(0, true).unwrap(), 1_172_500);
    }

    #[test]
    fn test_worked_figure_legacy_without_fee_deduction() {
        let policy = SettlementPolicy {
            deduct_delivery_fee: false,
            ..SettlementPolicy::default()
        };
        let lines = five_lines(&policy);
        let totals = sum_lines(&lines).unwrap();

        assert_eq!(totals.total_delivery_fee, 15_000);
        assert_eq!(totals.final_amount(0, false).unwrap(), 1_187_500);
        let line_sum: i64 = lines.iter().map(|l| l.settlement_amount).sum();
        assert_eq!(line_sum, 1_187_500);
    }

    #[test]
    fn test_commission_floors_per_line() {
        let policy = SettlementPolicy::default();
        // 9_999 * 5% = 499.95
        let line = compute_line(&sale(1, 9_999, 1), &policy).unwrap();
        assert_eq!(line.commission_amount, 499);
        assert_eq!(line.settlement_amount, 9_999 - 499 - 3_000);
    }

    #[test]
    fn test_refund_and_cancel_lines_carry_no_fees() {
        let policy = SettlementPolicy::default();
        let mut refund = sale(2, 40_000, 2);
        refund.kind = SettlementItemKind::Refund;
        let mut cancel = sale(3, 10_000, 1);
        cancel.kind = SettlementItemKind::Cancel;

        let lines = vec![
            compute_line(&sale(1, 100_000, 1), &policy).unwrap(),
            compute_line(&refund, &policy).unwrap(),
            compute_line(&cancel, &policy).unwrap(),
        ];
        assert_eq!(lines[1].commission_amount, 0);
        assert_eq!(lines[1].delivery_fee, 0);
        assert_eq!(lines[1].settlement_amount, 0);

        let totals = sum_lines(&lines).unwrap();
        assert_eq!(totals.total_order_amount, 190_000);
        assert_eq!(totals.total_refund_amount, 80_000);
        assert_eq!(totals.total_cancel_amount, 10_000);
        assert_eq!(totals.final_amount(0, true).unwrap(), 100_000 - 5_000 - 3_000);
    }

    #[test]
    fn test_final_amount_matches_line_sum_plus_adjustment() {
        let policy = SettlementPolicy::default();
        let mut refund = sale(4, 33_333, 3);
        refund.kind = SettlementItemKind::Refund;
        let lines = vec![
            compute_line(&sale(1, 12_345, 3), &policy).unwrap(),
            compute_line(&sale(2, 77_777, 1), &policy).unwrap(),
            compute_line(&refund, &policy).unwrap(),
        ];
        let totals = sum_lines(&lines).unwrap();
        for adjustment in [-20_000, 0, 15_500] {
            let line_sum: i64 = lines.iter().map(|l| l.settlement_amount).sum();
            assert_eq!(
                totals.final_amount(adjustment, true).unwrap(),
                line_sum + adjustment
            );
        }
    }

    #[test]
    fn test_overflow_is_reported() {
        let policy = SettlementPolicy::default();
        assert!(compute_line(&sale(1, i64::MAX, 2), &policy).is_err());
    }

    #[test]
    fn test_line_kind_prefers_item_status() {
        assert_eq!(
            line_kind(OrderStatus::Delivered, OrderItemStatus::Refunded),
            SettlementItemKind::Refund
        );
        assert_eq!(
            line_kind(OrderStatus::Returned, OrderItemStatus::Normal),
            SettlementItemKind::Refund
        );
        assert_eq!(
            line_kind(OrderStatus::Cancelled, OrderItemStatus::Normal),
            SettlementItemKind::Cancel
        );
        assert_eq!(
            line_kind(OrderStatus::Confirmed, OrderItemStatus::Normal),
            SettlementItemKind::Sale
        );
    }

    #[test]
    fn test_eligibility_window_and_statuses() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let (from, until) = period_bounds(start, end).unwrap();

        let last_ms = Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 59).unwrap()
            + chrono::Duration::milliseconds(999);
        assert!(is_eligible(&order(1, OrderStatus::Delivered, Some(last_ms)), from, until));

        let next_day = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        assert!(!is_eligible(&order(2, OrderStatus::Delivered, Some(next_day)), from, until));
        assert!(!is_eligible(&order(3, OrderStatus::Delivered, None), from, until));

        let in_window = Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap();
        assert!(!is_eligible(&order(4, OrderStatus::Shipping, Some(in_window)), from, until));

        let mut failed = order(5, OrderStatus::Delivered, Some(in_window));
        failed.payment_status = PaymentStatus::Failed;
        assert!(!is_eligible(&failed, from, until));
    }

    #[test]
    fn test_build_drafts_groups_by_seller_and_skips_excluded() {
        let paid = Some(Utc.with_ymd_and_hms(2025, 1, 5, 12, 0, 0).unwrap());
        let orders = vec![
            order(1, OrderStatus::Delivered, paid),
            order(2, OrderStatus::Cancelled, paid),
        ];
        let items = vec![
            item(10, 1, 9, 100_000),
            item(11, 1, 3, 50_000),
            item(12, 2, 3, 20_000),
            item(13, 1, 3, 30_000),
            // 목록에 없는 주문
            item(14, 99, 3, 70_000),
        ];
        let excluded: HashSet<i64> = [13].into_iter().collect();
        let seller_rates: HashMap<i64, i32> = [(9, 1_000)].into_iter().collect();

        let drafts = build_drafts(
            &orders,
            &items,
            &excluded,
            &SettlementPolicy::default(),
            &seller_rates,
        )
        .unwrap();

        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].seller_id, 3);
        assert_eq!(drafts[1].seller_id, 9);

        let s3 = &drafts[0];
        assert_eq!(s3.lines.len(), 2);
        assert_eq!(s3.totals.total_order_amount, 70_000);
        assert_eq!(s3.totals.total_cancel_amount, 20_000);
        assert_eq!(s3.final_settlement_amount, 50_000 - 2_500 - 3_000);

        let s9 = &drafts[1];
        assert_eq!(s9.commission_rate_bp, 1_000);
        assert_eq!(s9.totals.total_commission, 10_000);
        assert_eq!(s9.final_settlement_amount, 100_000 - 10_000 - 3_000);
    }
}
