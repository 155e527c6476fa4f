//! 주문 상태 전이와 결제/배송 상태 정합성 규칙.

use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::order_items::OrderItemStatus;
use crate::entities::orders::{DeliveryStatus, OrderStatus, PaymentStatus};
use crate::error::{AppError, AppResult};

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Shipping => "shipping",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::ReturnRequested => "return_requested",
            OrderStatus::Returned => "returned",
        }
    }
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Cancelled => "cancelled",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::PartiallyRefunded => "partially_refunded",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::Preparing => "preparing",
            DeliveryStatus::Shipping => "shipping",
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Returning => "returning",
            DeliveryStatus::Returned => "returned",
            DeliveryStatus::Cancelled => "cancelled",
        }
    }
}

/// 상태 전이에 따라 함께 바뀌는 값들
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTransition {
    pub to: OrderStatus,
    pub payment: Option<PaymentStatus>,
    pub delivery: Option<DeliveryStatus>,
    /// 정상 상품을 이 상태로 일괄 변경
    pub items: Option<OrderItemStatus>,
    pub stamp_paid_at: bool,
}

pub fn plan_transition(from: OrderStatus, to: OrderStatus) -> AppResult<OrderTransition> {
    use DeliveryStatus as D;
    use OrderStatus as O;
    use PaymentStatus as P;

    let (payment, delivery, items) = match (from, to) {
        (O::Pending, O::Paid) => (Some(P::Paid), Some(D::Pending), None),
        (O::Pending, O::Cancelled) => (
            Some(P::Cancelled),
            Some(D::Cancelled),
            Some(OrderItemStatus::Cancelled),
        ),
        (O::Paid, O::Preparing) => (None, Some(D::Preparing), None),
        (O::Paid | O::Preparing, O::Cancelled) => (
            Some(P::Refunded),
            Some(D::Cancelled),
            Some(OrderItemStatus::Cancelled),
        ),
        (O::Preparing, O::Shipping) => (None, Some(D::Shipping), None),
        (O::Shipping, O::Delivered) => (None, Some(D::Delivered), None),
        (O::Delivered, O::Confirmed) => (None, None, None),
        (O::Delivered, O::ReturnRequested) => (None, Some(D::Returning), None),
        (O::ReturnRequested, O::Returned) => (
            Some(P::Refunded),
            Some(D::Returned),
            Some(OrderItemStatus::Refunded),
        ),
        (O::ReturnRequested, O::Delivered) => (None, Some(D::Delivered), None),
        _ => {
            return Err(AppError::InvalidState(format!(
                "Order cannot move from {} to {}",
                from.as_str(),
                to.as_str()
            )));
        }
    };

    Ok(OrderTransition {
        to,
        payment,
        delivery,
        items,
        stamp_paid_at: to == O::Paid,
    })
}

/// 주문 상태별로 허용되는 (결제, 배송) 상태
pub fn allowed_states(status: OrderStatus) -> (&'static [PaymentStatus], &'static [DeliveryStatus]) {
    use DeliveryStatus as D;
    use OrderStatus as O;
    use PaymentStatus as P;

    match status {
        O::Pending => (&[P::Pending, P::Failed], &[D::Pending]),
        O::Paid => (&[P::Paid], &[D::Pending]),
        O::Preparing => (&[P::Paid], &[D::Preparing]),
        O::Shipping => (&[P::Paid], &[D::Shipping]),
        // 상품 단위 환불로 전액 환불된 배송 완료 주문은 refunded
        O::Delivered | O::Confirmed => (
            &[P::Paid, P::PartiallyRefunded, P::Refunded],
            &[D::Delivered],
        ),
        // 과거 시드 데이터는 취소 주문에 returned 를 썼다
        O::Cancelled => (&[P::Cancelled, P::Refunded], &[D::Cancelled, D::Returned]),
        O::ReturnRequested => (
            &[P::Paid, P::PartiallyRefunded, P::Refunded],
            &[D::Returning],
        ),
        O::Returned => (&[P::Refunded], &[D::Returned]),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Inconsistency {
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub delivery_status: DeliveryStatus,
    pub problems: Vec<String>,
}

pub fn check_consistency(
    order_status: OrderStatus,
    payment_status: PaymentStatus,
    delivery_status: DeliveryStatus,
) -> Option<Inconsistency> {
    let (payments, deliveries) = allowed_states(order_status);
    let mut problems = Vec::new();
    if !payments.contains(&payment_status) {
        problems.push(format!(
            "payment status {} is not allowed for {} orders",
            payment_status.as_str(),
            order_status.as_str()
        ));
    }
    if !deliveries.contains(&delivery_status) {
        problems.push(format!(
            "delivery status {} is not allowed for {} orders",
            delivery_status.as_str(),
            order_status.as_str()
        ));
    }
    if problems.is_empty() {
        None
    } else {
        Some(Inconsistency {
            order_status,
            payment_status,
            delivery_status,
            problems,
        })
    }
}

/// 상품 단위 환불 후 결제 상태
pub fn payment_after_item_refund(
    order_status: OrderStatus,
    item_status: OrderItemStatus,
    normal_items_left: usize,
) -> AppResult<PaymentStatus> {
    if !matches!(order_status, OrderStatus::Delivered | OrderStatus::Confirmed) {
        return Err(AppError::InvalidState(format!(
            "Items of {} orders cannot be refunded",
            order_status.as_str()
        )));
    }
    if item_status != OrderItemStatus::Normal {
        return Err(AppError::InvalidState(
            "Order item is already cancelled or refunded".to_string(),
        ));
    }
    Ok(if normal_items_left == 0 {
        PaymentStatus::Refunded
    } else {
        PaymentStatus::PartiallyRefunded
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use DeliveryStatus as D;
    use OrderStatus as O;
    use PaymentStatus as P;

    #[test]
    fn test_happy_path_transitions() {
        let t = plan_transition(O::Pending, O::Paid).unwrap();
        assert_eq!(t.payment, Some(P::Paid));
        assert!(t.stamp_paid_at);

        let t = plan_transition(O::Shipping, O::Delivered).unwrap();
        assert_eq!(t.delivery, Some(D::Delivered));
        assert_eq!(t.payment, None);
        assert!(!t.stamp_paid_at);

        let t = plan_transition(O::Delivered, O::Confirmed).unwrap();
        assert_eq!((t.payment, t.delivery, t.items), (None, None, None));
    }

    #[test]
    fn test_cancellation_refunds_paid_orders() {
        let t = plan_transition(O::Preparing, O::Cancelled).unwrap();
        assert_eq!(t.payment, Some(P::Refunded));
        assert_eq!(t.delivery, Some(D::Cancelled));
        assert_eq!(t.items, Some(OrderItemStatus::Cancelled));

        let t = plan_transition(O::Pending, O::Cancelled).unwrap();
        assert_eq!(t.payment, Some(P::Cancelled));
    }

    #[test]
    fn test_invalid_transitions_rejected() {
        assert!(plan_transition(O::Shipping, O::Cancelled).is_err());
        assert!(plan_transition(O::Pending, O::Delivered).is_err());
        assert!(plan_transition(O::Confirmed, O::ReturnRequested).is_err());
        assert!(plan_transition(O::Paid, O::Paid).is_err());
        let err = plan_transition(O::Returned, O::Paid).unwrap_err();
        assert_eq!(err.to_string(), "Invalid state: Order cannot move from returned to paid");
    }

    #[test]
    fn test_every_transition_lands_in_a_consistent_state() {
        // 각 출발 상태의 대표 (결제, 배송) 조합에서 전이 후 정합성이 유지되는지
        let starts = [
            (O::Pending, P::Pending, D::Pending),
            (O::Paid, P::Paid, D::Pending),
            (O::Preparing, P::Paid, D::Preparing),
            (O::Shipping, P::Paid, D::Shipping),
            (O::Delivered, P::Paid, D::Delivered),
            (O::Delivered, P::Refunded, D::Delivered),
            (O::ReturnRequested, P::Paid, D::Returning),
        ];
        let targets = [
            O::Paid,
            O::Preparing,
            O::Shipping,
            O::Delivered,
            O::Confirmed,
            O::Cancelled,
            O::ReturnRequested,
            O::Returned,
        ];
        for (from, pay, del) in starts {
            assert!(check_consistency(from, pay, del).is_none());
            for to in targets {
                if let Ok(t) = plan_transition(from, to) {
                    let pay = t.payment.unwrap_or(pay);
                    let del = t.delivery.unwrap_or(del);
                    assert!(
                        check_consistency(to, pay, del).is_none(),
                        "{from:?} -> {to:?} left {pay:?}/{del:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_cancelled_accepts_legacy_returned_delivery() {
        assert!(check_consistency(O::Cancelled, P::Refunded, D::Returned).is_none());
        assert!(check_consistency(O::Cancelled, P::Refunded, D::Cancelled).is_none());
    }

    #[test]
    fn test_inconsistency_lists_both_problems() {
        let found = check_consistency(O::Delivered, P::Pending, D::Shipping).unwrap();
        assert_eq!(found.problems.len(), 2);
    }

    #[test]
    fn test_item_refund_payment_status() {
        assert_eq!(
            payment_after_item_refund(O::Delivered, OrderItemStatus::Normal, 2).unwrap(),
            P::PartiallyRefunded
        );
        assert_eq!(
            payment_after_item_refund(O::Confirmed, OrderItemStatus::Normal, 0).unwrap(),
            P::Refunded
        );
        assert!(payment_after_item_refund(O::Shipping, OrderItemStatus::Normal, 1).is_err());
        assert!(payment_after_item_refund(O::Delivered, OrderItemStatus::Refunded, 1).is_err());
    }

    #[test]
    fn test_item_refunds_keep_order_consistent() {
        for status in [O::Delivered, O::Confirmed] {
            for left in [0, 1] {
                let payment =
                    payment_after_item_refund(status, OrderItemStatus::Normal, left).unwrap();
                assert!(
                    check_consistency(status, payment, D::Delivered).is_none(),
                    "{status:?} with {left} items left -> {payment:?}"
                );
            }
        }
    }
}
