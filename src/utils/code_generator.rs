use chrono::{DateTime, Utc};
use rand::Rng;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// 쿠폰 코드 생성. 헷갈리는 문자(0, O, 1, I)는 쓰지 않는다.
pub fn generate_coupon_code(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// 주문번호: ORD + yyyymmddHHMMSS + 4자리 난수
pub fn generate_order_number(at: DateTime<Utc>) -> String {
    let mut rng = rand::thread_rng();
    format!("ORD{}{:04}", at.format("%Y%m%d%H%M%S"), rng.gen_range(0..10_000))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generate_coupon_code() {
        let code = generate_coupon_code(10);
        assert_eq!(code.len(), 10);
        assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
        assert!(crate::domain::normalize_coupon_code(&code).is_ok());
    }

    #[test]
    fn test_generate_order_number() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();
        let n = generate_order_number(at);
        assert!(n.starts_with("ORD20250301093000"));
        assert_eq!(n.len(), 3 + 14 + 4);
    }
}
