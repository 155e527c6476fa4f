use regex::Regex;
use std::sync::OnceLock;

use crate::error::{AppError, AppResult};

fn business_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{3}-\d{2}-\d{5}$").expect("valid business number regex"))
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
    })
}

/// 사업자등록번호 (000-00-00000)
pub fn validate_business_number(value: &str) -> AppResult<()> {
    if business_number_regex().is_match(value) {
        Ok(())
    } else {
        Err(AppError::ValidationError(
            "사업자등록번호 형식은 000-00-00000 입니다".to_string(),
        ))
    }
}

pub fn validate_email(value: &str) -> AppResult<()> {
    if email_regex().is_match(value) {
        Ok(())
    } else {
        Err(AppError::ValidationError("이메일 형식이 올바르지 않습니다".to_string()))
    }
}

/// 공백만 있는 문자열 거부 후 trim 한 값 반환
pub fn require_text(field: &str, value: &str, max_len: usize) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!("{field} 은(는) 필수입니다")));
    }
    if trimmed.chars().count() > max_len {
        return Err(AppError::ValidationError(format!(
            "{field} 은(는) {max_len}자를 넘을 수 없습니다"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_number() {
        assert!(validate_business_number("123-45-67890").is_ok());
        assert!(validate_business_number("1234567890").is_err());
        assert!(validate_business_number("123-456-7890").is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("seller@example.co.kr").is_ok());
        assert!(validate_email("no-at-sign").is_err());
    }

    #[test]
    fn test_require_text() {
        assert_eq!(require_text("title", "  공지  ", 10).unwrap(), "공지");
        assert!(require_text("title", "   ", 10).is_err());
        assert!(require_text("title", "가나다라마바", 5).is_err());
    }
}
