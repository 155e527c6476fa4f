use std::collections::{HashMap, HashSet};

use crate::config::SettlementConfig;
use crate::domain::{
    SETTLEABLE_ORDER_STATUSES, SettlementDraft, SettlementPolicy, SettlementTotals, build_drafts,
    ensure_period_transition, ensure_settlement_editable, ensure_settlement_transition,
    is_eligible, period_bounds, periods_overlap, resolve_period,
};
use crate::entities::orders::PaymentStatus;
use crate::entities::settlement_periods::SettlementPeriodStatus;
use crate::entities::settlements::SettlementStatus;
use crate::entities::{
    order_entity as orders, order_item_entity as order_items, seller_entity as sellers,
    settlement_entity as settlements, settlement_item_entity as settlement_items,
    settlement_period_entity as periods,
};
use crate::database::SharedPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::require_text;
use chrono::Utc;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

#[derive(Clone)]
pub struct SettlementService {
    pool: SharedPool,
    policy: SettlementPolicy,
    payout_delay_days: i64,
}

impl SettlementService {
    pub fn new(pool: impl Into<SharedPool>, config: &SettlementConfig) -> Self {
        Self {
            pool: pool.into(),
            policy: SettlementPolicy::from(config),
            payout_delay_days: config.payout_delay_days,
        }
    }

    // ---------------------------------------------------------------
    // 정산
    // ---------------------------------------------------------------

    pub async fn list(
        &self,
        query: &SettlementQuery,
    ) -> AppResult<PaginatedResponse<SettlementResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut select = settlements::Entity::find();
        if let Some(period_id) = query.period_id {
            select = select.filter(settlements::Column::PeriodId.eq(period_id));
        }
        if let Some(seller_id) = query.seller_id {
            select = select.filter(settlements::Column::SellerId.eq(seller_id));
        }
        if let Some(status) = query.status {
            select = select.filter(settlements::Column::Status.eq(status));
        }

        let total = select.clone().count(self.pool.as_ref()).await? as i64;
        let items = select
            .order_by_desc(settlements::Column::PeriodId)
            .order_by_asc(settlements::Column::SellerId)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(self.pool.as_ref())
            .await?;

        Ok(PaginatedResponse::new(
            items.into_iter().map(Into::into).collect(),
            &params,
            total,
        ))
    }

    async fn find<C: ConnectionTrait>(db: &C, id: i64) -> AppResult<settlements::Model> {
        settlements::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Settlement {id} not found")))
    }

    async fn find_period<C: ConnectionTrait>(db: &C, id: i64) -> AppResult<periods::Model> {
        periods::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Settlement period {id} not found")))
    }

    pub async fn get(&self, id: i64) -> AppResult<SettlementDetailResponse> {
        let settlement = Self::find(self.pool.as_ref(), id).await?;
        let items = settlement_items::Entity::find()
            .filter(settlement_items::Column::SettlementId.eq(id))
            .order_by_asc(settlement_items::Column::OrderId)
            .order_by_asc(settlement_items::Column::OrderItemId)
            .all(self.pool.as_ref())
            .await?;

        Ok(SettlementDetailResponse {
            settlement: settlement.into(),
            items: items.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn update_status(
        &self,
        id: i64,
        request: UpdateSettlementStatusRequest,
    ) -> AppResult<SettlementResponse> {
        let settlement = Self::find(self.pool.as_ref(), id).await?;
        let from = settlement.status;
        ensure_settlement_transition(from, request.status)?;

        let now = Utc::now();
        let mut am = settlement.into_active_model();
        am.status = Set(request.status);
        if request.status == SettlementStatus::Completed {
            am.settled_at = Set(Some(now));
        }
        if let Some(memo) = request.memo {
            am.memo = Set(Some(memo));
        }
        am.updated_at = Set(now);
        let updated = am.update(self.pool.as_ref()).await?;

        log::info!(
            "Settlement {id} moved from {} to {}",
            from.as_str(),
            updated.status.as_str()
        );
        Ok(updated.into())
    }

    /// 조정액을 설정하고 최종 정산액을 다시 계산한다 (누적이 아니라 교체)
    pub async fn adjust(
        &self,
        id: i64,
        request: AdjustSettlementRequest,
    ) -> AppResult<SettlementResponse> {
        let reason = require_text("reason", &request.reason, 500)?;
        let settlement = Self::find(self.pool.as_ref(), id).await?;
        ensure_settlement_editable(settlement.status)?;

        let totals = SettlementTotals {
            total_order_amount: settlement.total_order_amount,
            total_commission: settlement.total_commission,
            total_delivery_fee: settlement.total_delivery_fee,
            total_refund_amount: settlement.total_refund_amount,
            total_cancel_amount: settlement.total_cancel_amount,
        };
        let final_amount = totals.final_amount(request.amount, self.policy.deduct_delivery_fee)?;

        let mut am = settlement.into_active_model();
        am.adjustment_amount = Set(request.amount);
        am.adjustment_reason = Set(Some(reason));
        am.final_settlement_amount = Set(final_amount);
        am.updated_at = Set(Utc::now());
        let updated = am.update(self.pool.as_ref()).await?;

        log::info!(
            "Settlement {id} adjusted by {} (final {})",
            request.amount,
            final_amount
        );
        Ok(updated.into())
    }

    /// 한 판매자의 정산을 기간 기준으로 다시 계산한다
    pub async fn recalculate(&self, id: i64) -> AppResult<SettlementDetailResponse> {
        let txn = self.pool.begin().await?;
        let settlement = Self::find(&txn, id).await?;
        ensure_settlement_editable(settlement.status)?;
        let period = Self::find_period(&txn, settlement.period_id).await?;

        let drafts = self
            .draft_period(&txn, &period, Some(settlement.seller_id))
            .await?;
        // 정산 대상이 없으면 기간 계산과 같이 기존 정산을 그대로 둔다
        let Some(draft) = drafts
            .into_iter()
            .find(|d| d.seller_id == settlement.seller_id)
        else {
            txn.commit().await?;
            log::info!("Settlement {id} has no eligible lines; left unchanged");
            return self.get(id).await;
        };

        self.write_draft(&txn, period.id, Some(settlement), &draft)
            .await?;
        txn.commit().await?;

        log::info!("Settlement {id} recalculated");
        self.get(id).await
    }

    // ---------------------------------------------------------------
    // 정산 기간
    // ---------------------------------------------------------------

    pub async fn list_periods(
        &self,
        query: &PeriodQuery,
    ) -> AppResult<PaginatedResponse<PeriodResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut select = periods::Entity::find();
        if let Some(t) = query.period_type {
            select = select.filter(periods::Column::PeriodType.eq(t));
        }
        if let Some(s) = query.status {
            select = select.filter(periods::Column::Status.eq(s));
        }

        let total = select.clone().count(self.pool.as_ref()).await? as i64;
        let items = select
            .order_by_desc(periods::Column::StartDate)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(self.pool.as_ref())
            .await?;

        Ok(PaginatedResponse::new(
            items.into_iter().map(Into::into).collect(),
            &params,
            total,
        ))
    }

    pub async fn get_period(&self, id: i64) -> AppResult<PeriodResponse> {
        Ok(Self::find_period(self.pool.as_ref(), id).await?.into())
    }

    pub async fn create_period(&self, request: CreatePeriodRequest) -> AppResult<PeriodResponse> {
        let dates = resolve_period(
            request.period_type,
            request.start_date,
            request.end_date,
            request.settlement_date,
            self.payout_delay_days,
        )?;

        let candidates = periods::Entity::find()
            .filter(periods::Column::PeriodType.eq(request.period_type))
            .filter(periods::Column::EndDate.gte(dates.start_date))
            .all(self.pool.as_ref())
            .await?;
        if let Some(clash) = candidates.iter().find(|p| {
            periods_overlap(p.start_date, p.end_date, dates.start_date, dates.end_date)
        }) {
            return Err(AppError::Conflict(format!(
                "Overlaps settlement period {} ({} ~ {})",
                clash.id, clash.start_date, clash.end_date
            )));
        }

        let now = Utc::now();
        let period = periods::ActiveModel {
            period_type: Set(request.period_type),
            start_date: Set(dates.start_date),
            end_date: Set(dates.end_date),
            settlement_date: Set(dates.settlement_date),
            status: Set(SettlementPeriodStatus::Preparing),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;

        log::info!(
            "Settlement period {} created ({} ~ {})",
            period.id,
            period.start_date,
            period.end_date
        );
        Ok(period.into())
    }

    pub async fn update_period_status(
        &self,
        id: i64,
        status: SettlementPeriodStatus,
    ) -> AppResult<PeriodResponse> {
        let period = Self::find_period(self.pool.as_ref(), id).await?;
        let statuses: Vec<SettlementStatus> = settlements::Entity::find()
            .filter(settlements::Column::PeriodId.eq(id))
            .all(self.pool.as_ref())
            .await?
            .into_iter()
            .map(|s| s.status)
            .collect();
        ensure_period_transition(period.status, status, &statuses)?;

        let mut am = period.into_active_model();
        am.status = Set(status);
        am.updated_at = Set(Utc::now());
        let updated = am.update(self.pool.as_ref()).await?;
        log::info!("Settlement period {id} is now {}", updated.status.as_str());
        Ok(updated.into())
    }

    /// 기간 전체 정산 계산. 하나의 트랜잭션에서 판매자별 정산을 만들거나 갱신한다.
    pub async fn calculate_period(&self, id: i64) -> AppResult<CalculatePeriodResponse> {
        let txn = self.pool.begin().await?;
        let period = Self::find_period(&txn, id).await?;
        if period.status == SettlementPeriodStatus::Completed {
            return Err(AppError::InvalidState(
                "Completed settlement periods cannot be recalculated".to_string(),
            ));
        }

        let drafts = self.draft_period(&txn, &period, None).await?;
        let mut existing: HashMap<i64, settlements::Model> = settlements::Entity::find()
            .filter(settlements::Column::PeriodId.eq(id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|s| (s.seller_id, s))
            .collect();

        let mut written = Vec::with_capacity(drafts.len());
        let mut skipped = Vec::new();
        for draft in &drafts {
            let current = existing.remove(&draft.seller_id);
            if let Some(s) = &current
                && !s.status.is_editable()
            {
                log::warn!(
                    "Skipping seller {} in period {id}: settlement {} is {}",
                    draft.seller_id,
                    s.id,
                    s.status.as_str()
                );
                skipped.push(draft.seller_id);
                continue;
            }
            written.push(self.write_draft(&txn, id, current, draft).await?);
        }

        let period = if period.status == SettlementPeriodStatus::Preparing {
            let mut am = period.into_active_model();
            am.status = Set(SettlementPeriodStatus::Processing);
            am.updated_at = Set(Utc::now());
            am.update(&txn).await?
        } else {
            period
        };

        txn.commit().await?;
        log::info!(
            "Settlement period {id} calculated: {} settlements, {} skipped",
            written.len(),
            skipped.len()
        );

        Ok(CalculatePeriodResponse {
            period: period.into(),
            settlements: written.into_iter().map(Into::into).collect(),
            skipped_seller_ids: skipped,
        })
    }

    /// 기간의 정산 대상 주문을 모아 판매자별 초안을 만든다
    async fn draft_period<C: ConnectionTrait>(
        &self,
        db: &C,
        period: &periods::Model,
        seller_id: Option<i64>,
    ) -> AppResult<Vec<SettlementDraft>> {
        let (from, until) = period_bounds(period.start_date, period.end_date)?;

        let eligible: Vec<orders::Model> = orders::Entity::find()
            .filter(orders::Column::PaidAt.gte(from))
            .filter(orders::Column::PaidAt.lt(until))
            .filter(orders::Column::OrderStatus.is_in(SETTLEABLE_ORDER_STATUSES))
            .filter(
                orders::Column::PaymentStatus
                    .is_not_in([PaymentStatus::Pending, PaymentStatus::Failed]),
            )
            .all(db)
            .await?
            .into_iter()
            .filter(|o| is_eligible(o, from, until))
            .collect();
        if eligible.is_empty() {
            return Ok(Vec::new());
        }

        let mut item_select = order_items::Entity::find()
            .filter(order_items::Column::OrderId.is_in(eligible.iter().map(|o| o.id)));
        if let Some(seller_id) = seller_id {
            item_select = item_select.filter(order_items::Column::SellerId.eq(seller_id));
        }
        let items = item_select.all(db).await?;
        if items.is_empty() {
            return Ok(Vec::new());
        }

        // 다른 기간의 유효한 정산에 이미 들어간 주문상품
        let excluded: HashSet<i64> = settlement_items::Entity::find()
            .select_only()
            .column(settlement_items::Column::OrderItemId)
            .filter(settlement_items::Column::OrderItemId.is_in(items.iter().map(|i| i.id)))
            .filter(
                settlement_items::Column::SettlementId.in_subquery(
                    Query::select()
                        .column(settlements::Column::Id)
                        .from(settlements::Entity)
                        .and_where(settlements::Column::PeriodId.ne(period.id))
                        .and_where(settlements::Column::Status.ne(SettlementStatus::Cancelled))
                        .to_owned(),
                ),
            )
            .into_tuple::<i64>()
            .all(db)
            .await?
            .into_iter()
            .collect();

        let seller_ids: HashSet<i64> = items.iter().map(|i| i.seller_id).collect();
        let seller_rates: HashMap<i64, i32> = sellers::Entity::find()
            .filter(sellers::Column::Id.is_in(seller_ids))
            .all(db)
            .await?
            .into_iter()
            .filter_map(|s| s.commission_rate_bp.map(|bp| (s.id, bp)))
            .collect();

        build_drafts(&eligible, &items, &excluded, &self.policy, &seller_rates)
    }

    /// 초안을 정산 헤더/상세로 저장한다. 기존 상세는 교체하고 조정액은 유지한다.
    async fn write_draft<C: ConnectionTrait>(
        &self,
        db: &C,
        period_id: i64,
        current: Option<settlements::Model>,
        draft: &SettlementDraft,
    ) -> AppResult<settlements::Model> {
        let now = Utc::now();
        let totals = &draft.totals;

        let saved = match current {
            Some(existing) => {
                let final_amount = totals
                    .final_amount(existing.adjustment_amount, self.policy.deduct_delivery_fee)?;
                settlement_items::Entity::delete_many()
                    .filter(settlement_items::Column::SettlementId.eq(existing.id))
                    .exec(db)
                    .await?;

                let mut am = existing.into_active_model();
                am.total_order_amount = Set(totals.total_order_amount);
                am.total_commission = Set(totals.total_commission);
                am.total_delivery_fee = Set(totals.total_delivery_fee);
                am.total_refund_amount = Set(totals.total_refund_amount);
                am.total_cancel_amount = Set(totals.total_cancel_amount);
                am.final_settlement_amount = Set(final_amount);
                am.status = Set(SettlementStatus::Calculating);
                am.updated_at = Set(now);
                am.update(db).await?
            }
            None => {
                settlements::ActiveModel {
                    seller_id: Set(draft.seller_id),
                    period_id: Set(period_id),
                    total_order_amount: Set(totals.total_order_amount),
                    total_commission: Set(totals.total_commission),
                    total_delivery_fee: Set(totals.total_delivery_fee),
                    total_refund_amount: Set(totals.total_refund_amount),
                    total_cancel_amount: Set(totals.total_cancel_amount),
                    adjustment_amount: Set(0),
                    adjustment_reason: Set(None),
                    final_settlement_amount: Set(draft.final_settlement_amount),
                    status: Set(SettlementStatus::Calculating),
                    settled_at: Set(None),
                    memo: Set(None),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(db)
                .await?
            }
        };

        if !draft.lines.is_empty() {
            let rows = draft.lines.iter().map(|line| settlement_items::ActiveModel {
                settlement_id: Set(saved.id),
                order_id: Set(line.order_id),
                order_item_id: Set(line.order_item_id),
                product_name: Set(line.product_name.clone()),
                quantity: Set(line.quantity),
                kind: Set(line.kind),
                item_amount: Set(line.item_amount),
                commission_amount: Set(line.commission_amount),
                delivery_fee: Set(line.delivery_fee),
                settlement_amount: Set(line.settlement_amount),
                created_at: Set(now),
                ..Default::default()
            });
            settlement_items::Entity::insert_many(rows).exec(db).await?;
        }

        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::settlement_periods::PeriodType;
    use chrono::NaiveDate;
    use crate::entities::order_items::OrderItemStatus;
    use crate::entities::orders::{DeliveryStatus, OrderStatus};
    use crate::entities::settlement_items::SettlementItemKind;
    use chrono::TimeZone;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult, Value};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn settlement(id: i64, status: SettlementStatus) -> settlements::Model {
        let now = Utc::now();
        settlements::Model {
            id,
            seller_id: 3,
            period_id: 1,
            total_order_amount: 1_250_000,
            total_commission: 62_500,
            total_delivery_fee: 15_000,
            total_refund_amount: 0,
            total_cancel_amount: 0,
            adjustment_amount: 0,
            adjustment_reason: None,
            final_settlement_amount: 1_172_500,
            status,
            settled_at: None,
            memo: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn period(id: i64, start: NaiveDate, end: NaiveDate, status: SettlementPeriodStatus) -> periods::Model {
        let now = Utc::now();
        periods::Model {
            id,
            period_type: PeriodType::Monthly,
            start_date: start,
            end_date: end,
            settlement_date: d(2025, 12, 31),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    fn delivered_order(id: i64) -> orders::Model {
        let paid_at = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        orders::Model {
            id,
            order_number: format!("ORD-{id}"),
            user_id: 1,
            order_status: OrderStatus::Delivered,
            payment_status: PaymentStatus::Paid,
            delivery_status: DeliveryStatus::Delivered,
            total_amount: 250_000,
            shipping_address: "서울".to_string(),
            ordered_at: paid_at,
            paid_at: Some(paid_at),
            created_at: paid_at,
            updated_at: paid_at,
        }
    }

    fn order_item(id: i64, order_id: i64) -> order_items::Model {
        let now = Utc::now();
        order_items::Model {
            id,
            order_id,
            product_id: 1,
            seller_id: 3,
            product_name: "무선 키보드".to_string(),
            unit_price: 250_000,
            quantity: 1,
            status: OrderItemStatus::Normal,
            created_at: now,
            updated_at: now,
        }
    }

    fn statements(pool: Arc<DatabaseConnection>) -> Vec<String> {
        Arc::try_unwrap(pool)
            .ok()
            .unwrap()
            .into_transaction_log()
            .iter()
            .map(|t| format!("{t:?}"))
            .collect()
    }

    fn service(db: impl Into<SharedPool>) -> SettlementService {
        SettlementService::new(db, &SettlementConfig::default())
    }

    #[tokio::test]
    async fn test_completed_settlement_rejects_further_transitions() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![settlement(1, SettlementStatus::Completed)]])
            .into_connection();
        let err = service(db)
            .update_status(
                1,
                UpdateSettlementStatusRequest {
                    status: SettlementStatus::Processing,
                    memo: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_completing_stamps_settled_at() {
        let mut done = settlement(1, SettlementStatus::Completed);
        done.settled_at = Some(Utc::now());
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![settlement(1, SettlementStatus::Processing)]])
            .append_query_results([vec![done]])
            .into_connection();
        let updated = service(db)
            .update_status(
                1,
                UpdateSettlementStatusRequest {
                    status: SettlementStatus::Completed,
                    memo: Some("지급 완료".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, SettlementStatus::Completed);
        assert!(updated.settled_at.is_some());
    }

    #[tokio::test]
    async fn test_adjust_recomputes_final_amount() {
        let mut adjusted = settlement(1, SettlementStatus::Calculating);
        adjusted.adjustment_amount = -2_500;
        adjusted.final_settlement_amount = 1_170_000;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![settlement(1, SettlementStatus::Calculating)]])
            .append_query_results([vec![adjusted]])
            .into_connection();
        let updated = service(db)
            .adjust(
                1,
                AdjustSettlementRequest {
                    amount: -2_500,
                    reason: "반품 택배비".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.final_settlement_amount, 1_170_000);
    }

    #[tokio::test]
    async fn test_adjust_rejected_once_processing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![settlement(1, SettlementStatus::Processing)]])
            .into_connection();
        let err = service(db)
            .adjust(
                1,
                AdjustSettlementRequest {
                    amount: 1_000,
                    reason: "보정".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_create_period_rejects_overlap() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![period(
                7,
                d(2025, 3, 1),
                d(2025, 3, 31),
                SettlementPeriodStatus::Preparing,
            )]])
            .into_connection();
        let err = service(db)
            .create_period(CreatePeriodRequest {
                period_type: PeriodType::Monthly,
                start_date: d(2025, 3, 1),
                end_date: None,
                settlement_date: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_period_cannot_complete_with_open_settlements() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![period(
                1,
                d(2025, 3, 1),
                d(2025, 3, 31),
                SettlementPeriodStatus::Processing,
            )]])
            .append_query_results([vec![
                settlement(1, SettlementStatus::Completed),
                settlement(2, SettlementStatus::OnHold),
            ]])
            .into_connection();
        let err = service(db)
            .update_period_status(1, SettlementPeriodStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_calculate_rejects_completed_period() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![period(
                1,
                d(2025, 3, 1),
                d(2025, 3, 31),
                SettlementPeriodStatus::Completed,
            )]])
            .into_connection();
        let err = service(db).calculate_period(1).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_calculate_with_no_orders_moves_period_to_processing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![period(
                1,
                d(2025, 3, 1),
                d(2025, 3, 31),
                SettlementPeriodStatus::Preparing,
            )]])
            .append_query_results([Vec::<orders::Model>::new()])
            .append_query_results([Vec::<settlements::Model>::new()])
            .append_query_results([vec![period(
                1,
                d(2025, 3, 1),
                d(2025, 3, 31),
                SettlementPeriodStatus::Processing,
            )]])
            .into_connection();
        let result = service(db).calculate_period(1).await.unwrap();
        assert_eq!(result.period.status, SettlementPeriodStatus::Processing);
        assert!(result.settlements.is_empty());
        assert!(result.skipped_seller_ids.is_empty());
    }

    #[tokio::test]
    async fn test_recalculate_without_eligible_lines_leaves_settlement_untouched() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![settlement(1, SettlementStatus::Calculating)]])
            .append_query_results([vec![period(
                1,
                d(2025, 3, 1),
                d(2025, 3, 31),
                SettlementPeriodStatus::Processing,
            )]])
            .append_query_results([Vec::<orders::Model>::new()])
            .append_query_results([vec![settlement(1, SettlementStatus::Calculating)]])
            .append_query_results([Vec::<settlement_items::Model>::new()])
            .into_connection();
        let pool = Arc::new(db);
        let svc = service(Arc::clone(&pool));

        let detail = svc.recalculate(1).await.unwrap();
        assert_eq!(detail.settlement.total_order_amount, 1_250_000);
        assert_eq!(detail.settlement.final_settlement_amount, 1_172_500);
        drop(svc);

        let log = statements(pool);
        assert!(
            !log
                .iter()
                .any(|sql| sql.contains("UPDATE") || sql.contains("DELETE")),
            "{log:?}"
        );
    }

    #[tokio::test]
    async fn test_recalculate_rewrites_totals_and_items() {
        let mut recalculated = settlement(1, SettlementStatus::Calculating);
        recalculated.total_order_amount = 250_000;
        recalculated.total_commission = 12_500;
        recalculated.total_delivery_fee = 3_000;
        recalculated.final_settlement_amount = 234_500;
        let line = settlement_items::Model {
            id: 900,
            settlement_id: 1,
            order_id: 100,
            order_item_id: 1000,
            product_name: "무선 키보드".to_string(),
            quantity: 1,
            kind: SettlementItemKind::Sale,
            item_amount: 250_000,
            commission_amount: 12_500,
            delivery_fee: 3_000,
            settlement_amount: 234_500,
            created_at: Utc::now(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![settlement(1, SettlementStatus::Pending)]])
            .append_query_results([vec![period(
                1,
                d(2025, 3, 1),
                d(2025, 3, 31),
                SettlementPeriodStatus::Processing,
            )]])
            .append_query_results([vec![delivered_order(100)]])
            .append_query_results([vec![order_item(1000, 100)]])
            // 다른 기간에 정산된 주문상품 없음
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .append_query_results([Vec::<sellers::Model>::new()])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 2,
            }])
            .append_query_results([vec![recalculated.clone()]])
            // insert_many ... RETURNING id
            .append_query_results([vec![BTreeMap::from([("id", Value::BigInt(Some(900)))])]])
            .append_query_results([vec![recalculated]])
            .append_query_results([vec![line]])
            .into_connection();
        let pool = Arc::new(db);
        let svc = service(Arc::clone(&pool));

        let detail = svc.recalculate(1).await.unwrap();
        assert_eq!(detail.settlement.status, SettlementStatus::Calculating);
        assert_eq!(detail.items.len(), 1);
        drop(svc);

        let log = statements(pool);
        assert!(log.iter().any(|sql| sql.contains("DELETE")));
        assert!(
            log.iter()
                .any(|sql| sql.contains("UPDATE") && sql.contains("234500")),
            "{log:?}"
        );
    }
}
