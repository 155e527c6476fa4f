use chrono::{Datelike, Days, Months, NaiveDate};

use crate::entities::settlement_periods::{PeriodType, SettlementPeriodStatus};
use crate::entities::settlements::SettlementStatus;
use crate::error::{AppError, AppResult};

impl SettlementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettlementStatus::Pending => "pending",
            SettlementStatus::Calculating => "calculating",
            SettlementStatus::Processing => "processing",
            SettlementStatus::Completed => "completed",
            SettlementStatus::Cancelled => "cancelled",
            SettlementStatus::OnHold => "on_hold",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SettlementStatus::Completed | SettlementStatus::Cancelled)
    }

    pub fn can_transition_to(&self, next: SettlementStatus) -> bool {
        use SettlementStatus::*;
        matches!(
            (self, next),
            (Pending, Calculating | OnHold | Cancelled)
                | (Calculating, Processing | OnHold | Cancelled)
                | (Processing, Completed | OnHold | Cancelled)
                | (OnHold, Calculating | Processing | Cancelled)
        )
    }

    /// 재계산/조정이 가능한 상태
    pub fn is_editable(&self) -> bool {
        matches!(
            self,
            SettlementStatus::Pending | SettlementStatus::Calculating | SettlementStatus::OnHold
        )
    }
}

pub fn ensure_settlement_transition(
    from: SettlementStatus,
    to: SettlementStatus,
) -> AppResult<()> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(AppError::InvalidState(format!(
            "Settlement cannot move from {} to {}",
            from.as_str(),
            to.as_str()
        )))
    }
}

pub fn ensure_settlement_editable(status: SettlementStatus) -> AppResult<()> {
    if status.is_editable() {
        Ok(())
    } else {
        Err(AppError::InvalidState(format!(
            "Settlement in {} state cannot be recalculated or adjusted",
            status.as_str()
        )))
    }
}

impl SettlementPeriodStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettlementPeriodStatus::Preparing => "preparing",
            SettlementPeriodStatus::Processing => "processing",
            SettlementPeriodStatus::Completed => "completed",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SettlementPeriodStatus::Preparing => 0,
            SettlementPeriodStatus::Processing => 1,
            SettlementPeriodStatus::Completed => 2,
        }
    }
}

/// 기간 상태는 앞으로만 움직인다. 완료는 모든 정산이 종료 상태일 때만 가능.
pub fn ensure_period_transition(
    from: SettlementPeriodStatus,
    to: SettlementPeriodStatus,
    settlements: &[SettlementStatus],
) -> AppResult<()> {
    if to.rank() <= from.rank() {
        return Err(AppError::InvalidState(format!(
            "Settlement period cannot move from {} to {}",
            from.as_str(),
            to.as_str()
        )));
    }
    if to == SettlementPeriodStatus::Completed && settlements.iter().any(|s| !s.is_terminal()) {
        return Err(AppError::InvalidState(
            "Settlement period still has open settlements".to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodDates {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub settlement_date: NaiveDate,
}

fn last_day_of_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)?
        .checked_add_months(Months::new(1))?
        .checked_sub_days(Days::new(1))
}

/// 기간 생성 입력을 검증하고 빠진 날짜를 채운다.
pub fn resolve_period(
    period_type: PeriodType,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    settlement_date: Option<NaiveDate>,
    payout_delay_days: i64,
) -> AppResult<PeriodDates> {
    let invalid = |msg: &str| AppError::ValidationError(msg.to_string());

    let expected_end = match period_type {
        PeriodType::Monthly => {
            if start_date.day() != 1 {
                return Err(invalid("Monthly periods must start on day 1"));
            }
            last_day_of_month(start_date).ok_or_else(|| invalid("Invalid start date"))?
        }
        PeriodType::Weekly => start_date
            .checked_add_days(Days::new(6))
            .ok_or_else(|| invalid("Invalid start date"))?,
    };

    let end_date = match end_date {
        Some(end) if end != expected_end => {
            return Err(match period_type {
                PeriodType::Monthly => invalid("Monthly periods must end on the last day of the month"),
                PeriodType::Weekly => invalid("Weekly periods must span exactly 7 days"),
            });
        }
        Some(end) => end,
        None => expected_end,
    };

    let delay = u64::try_from(payout_delay_days)
        .map_err(|_| invalid("payout_delay_days must not be negative"))?;
    let settlement_date = match settlement_date {
        Some(d) => d,
        None => end_date
            .checked_add_days(Days::new(delay))
            .ok_or_else(|| invalid("Invalid settlement date"))?,
    };
    if settlement_date < end_date {
        return Err(invalid("settlement_date must not precede end_date"));
    }

    Ok(PeriodDates {
        start_date,
        end_date,
        settlement_date,
    })
}

/// 양 끝을 포함하는 두 날짜 구간이 겹치는지
pub fn periods_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && b_start <= a_end
}

#[cfg(test)]
mod tests {
    use super::*;
    use SettlementStatus::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_settlement_transitions() {
        assert!(Pending.can_transition_to(Calculating));
        assert!(Calculating.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Completed));
        assert!(OnHold.can_transition_to(Processing));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Calculating.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
    }

    #[test]
    fn test_same_state_transition_rejected() {
        for s in [Pending, Calculating, Processing, Completed, Cancelled, OnHold] {
            assert!(ensure_settlement_transition(s, s).is_err());
        }
    }

    #[test]
    fn test_terminal_and_editable_states() {
        assert!(Completed.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(!OnHold.is_terminal());
        assert!(ensure_settlement_editable(OnHold).is_ok());
        assert!(ensure_settlement_editable(Processing).is_err());
        assert!(ensure_settlement_editable(Completed).is_err());
    }

    #[test]
    fn test_period_moves_forward_only() {
        use SettlementPeriodStatus as P;
        assert!(ensure_period_transition(P::Preparing, P::Processing, &[]).is_ok());
        assert!(ensure_period_transition(P::Processing, P::Preparing, &[]).is_err());
        assert!(ensure_period_transition(P::Completed, P::Completed, &[]).is_err());
    }

    #[test]
    fn test_period_completion_requires_terminal_settlements() {
        use SettlementPeriodStatus as P;
        assert!(
            ensure_period_transition(P::Processing, P::Completed, &[Completed, OnHold]).is_err()
        );
        assert!(
            ensure_period_transition(P::Processing, P::Completed, &[Completed, Cancelled]).is_ok()
        );
    }

    #[test]
    fn test_monthly_period_derives_end_and_payout() {
        let p = resolve_period(PeriodType::Monthly, d(2024, 2, 1), None, None, 10).unwrap();
        assert_eq!(p.end_date, d(2024, 2, 29));
        assert_eq!(p.settlement_date, d(2024, 3, 10));

        assert!(resolve_period(PeriodType::Monthly, d(2024, 2, 2), None, None, 10).is_err());
        assert!(
            resolve_period(PeriodType::Monthly, d(2024, 2, 1), Some(d(2024, 2, 28)), None, 10)
                .is_err()
        );
    }

    #[test]
    fn test_weekly_period_spans_seven_days() {
        let p = resolve_period(PeriodType::Weekly, d(2025, 1, 6), None, None, 3).unwrap();
        assert_eq!(p.end_date, d(2025, 1, 12));
        assert_eq!(p.settlement_date, d(2025, 1, 15));
        assert!(
            resolve_period(PeriodType::Weekly, d(2025, 1, 6), Some(d(2025, 1, 13)), None, 3)
                .is_err()
        );
    }

    #[test]
    fn test_settlement_date_cannot_precede_end() {
        let r = resolve_period(
            PeriodType::Weekly,
            d(2025, 1, 6),
            None,
            Some(d(2025, 1, 11)),
            10,
        );
        assert!(r.is_err());
    }

    #[test]
    fn test_overlap() {
        assert!(periods_overlap(d(2025, 1, 1), d(2025, 1, 31), d(2025, 1, 31), d(2025, 2, 6)));
        assert!(!periods_overlap(d(2025, 1, 1), d(2025, 1, 31), d(2025, 2, 1), d(2025, 2, 28)));
    }
}
