use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

use crate::entities::coupons::{self, DiscountType};
use crate::error::{AppError, AppResult};

fn code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z0-9-]{4,20}$").expect("valid coupon code regex"))
}

/// 앞뒤 공백 제거 후 대문자로 바꾸고 형식을 확인한다.
pub fn normalize_coupon_code(raw: &str) -> AppResult<String> {
    let code = raw.trim().to_ascii_uppercase();
    if !code_regex().is_match(&code) {
        return Err(AppError::ValidationError(
            "Coupon code must be 4-20 characters of A-Z, 0-9 or '-'".to_string(),
        ));
    }
    Ok(code)
}

pub fn validate_coupon_rules(
    discount_type: DiscountType,
    discount_value: i64,
    min_order_amount: i64,
    max_discount_amount: Option<i64>,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    total_quantity: Option<i32>,
) -> AppResult<()> {
    let invalid = |msg: &str| Err(AppError::ValidationError(msg.to_string()));
    match discount_type {
        DiscountType::Fixed if discount_value <= 0 => {
            return invalid("Fixed discount must be greater than 0");
        }
        DiscountType::Percent if !(1..=100).contains(&discount_value) => {
            return invalid("Percent discount must be between 1 and 100");
        }
        _ => {}
    }
    if min_order_amount < 0 {
        return invalid("min_order_amount must not be negative");
    }
    if max_discount_amount.is_some_and(|m| m <= 0) {
        return invalid("max_discount_amount must be greater than 0");
    }
    if ends_at <= starts_at {
        return invalid("ends_at must be after starts_at");
    }
    if total_quantity.is_some_and(|q| q < 0) {
        return invalid("total_quantity must not be negative");
    }
    Ok(())
}

/// 주문 금액에 대한 할인액. 주문 금액을 넘지 않는다.
pub fn discount_for(coupon: &coupons::Model, order_amount: i64) -> i64 {
    if order_amount <= 0 || order_amount < coupon.min_order_amount {
        return 0;
    }
    let raw = match coupon.discount_type {
        DiscountType::Fixed => coupon.discount_value,
        DiscountType::Percent => {
            let pct = order_amount.saturating_mul(coupon.discount_value) / 100;
            match coupon.max_discount_amount {
                Some(cap) => pct.min(cap),
                None => pct,
            }
        }
    };
    raw.clamp(0, order_amount)
}

/// 발급 가능 여부. 가능하면 이번에 발급할 수 있는 최대 수량을 돌려준다.
pub fn issuable_quantity(coupon: &coupons::Model, now: DateTime<Utc>) -> AppResult<Option<i32>> {
    if !coupon.is_active {
        return Err(AppError::InvalidState("Coupon is not active".to_string()));
    }
    if now >= coupon.ends_at {
        return Err(AppError::InvalidState("Coupon has expired".to_string()));
    }
    Ok(coupon
        .total_quantity
        .map(|total| (total - coupon.issued_count).max(0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn coupon(discount_type: DiscountType, value: i64) -> coupons::Model {
        let ts = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        coupons::Model {
            id: 1,
            code: "WELCOME-10".to_string(),
            name: "웰컴 쿠폰".to_string(),
            discount_type,
            discount_value: value,
            min_order_amount: 10_000,
            max_discount_amount: None,
            seller_id: None,
            starts_at: ts,
            ends_at: ts + Duration::days(30),
            total_quantity: Some(100),
            issued_count: 98,
            is_active: true,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_normalize_coupon_code() {
        assert_eq!(normalize_coupon_code(" spring-25 ").unwrap(), "SPRING-25");
        assert!(normalize_coupon_code("abc").is_err());
        assert!(normalize_coupon_code("HAS SPACE").is_err());
        assert!(normalize_coupon_code(&"A".repeat(21)).is_err());
    }

    #[test]
    fn test_rules() {
        let s = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let e = s + Duration::days(1);
        assert!(validate_coupon_rules(DiscountType::Fixed, 0, 0, None, s, e, None).is_err());
        assert!(validate_coupon_rules(DiscountType::Percent, 101, 0, None, s, e, None).is_err());
        assert!(validate_coupon_rules(DiscountType::Percent, 100, 0, None, s, e, None).is_ok());
        assert!(validate_coupon_rules(DiscountType::Fixed, 1_000, 0, None, e, s, None).is_err());
        assert!(validate_coupon_rules(DiscountType::Fixed, 1_000, 0, None, s, s, None).is_err());
    }

    #[test]
    fn test_fixed_discount_never_exceeds_order() {
        let mut c = coupon(DiscountType::Fixed, 15_000);
        assert_eq!(discount_for(&c, 9_999), 0);
        assert_eq!(discount_for(&c, 12_000), 12_000);
        assert_eq!(discount_for(&c, 50_000), 15_000);
        c.min_order_amount = 0;
        assert_eq!(discount_for(&c, 0), 0);
    }

    #[test]
    fn test_percent_discount_floors_and_caps() {
        let mut c = coupon(DiscountType::Percent, 15);
        assert_eq!(discount_for(&c, 33_333), 4_999);
        c.max_discount_amount = Some(3_000);
        assert_eq!(discount_for(&c, 33_333), 3_000);
    }

    #[test]
    fn test_issuable_quantity() {
        let mut c = coupon(DiscountType::Fixed, 1_000);
        let now = c.starts_at + Duration::days(1);
        assert_eq!(issuable_quantity(&c, now).unwrap(), Some(2));
        c.total_quantity = None;
        assert_eq!(issuable_quantity(&c, now).unwrap(), None);
        assert!(issuable_quantity(&c, c.ends_at).is_err());
        c.is_active = false;
        assert!(issuable_quantity(&c, now).is_err());
    }
}
