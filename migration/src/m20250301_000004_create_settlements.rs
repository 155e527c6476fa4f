use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Sellers {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum SettlementPeriods {
    Table,
    Id,
    PeriodType,
    StartDate,
    EndDate,
    SettlementDate,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Settlements {
    Table,
    Id,
    SellerId,
    PeriodId,
    TotalOrderAmount,
    TotalCommission,
    TotalDeliveryFee,
    TotalRefundAmount,
    TotalCancelAmount,
    AdjustmentAmount,
    AdjustmentReason,
    FinalSettlementAmount,
    Status,
    SettledAt,
    Memo,
    CreatedAt,
    UpdatedAt,
}

/// 정산 상세 (주문 상품 1건 = 1행)
#[derive(DeriveIden)]
enum SettlementItems {
    Table,
    Id,
    SettlementId,
    OrderId,
    OrderItemId,
    ProductName,
    Quantity,
    Kind,
    ItemAmount,
    CommissionAmount,
    DeliveryFee,
    SettlementAmount,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SettlementPeriods::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SettlementPeriods::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SettlementPeriods::PeriodType).string_len(16).not_null())
                    .col(ColumnDef::new(SettlementPeriods::StartDate).date().not_null())
                    .col(ColumnDef::new(SettlementPeriods::EndDate).date().not_null())
                    .col(ColumnDef::new(SettlementPeriods::SettlementDate).date().not_null())
                    .col(
                        ColumnDef::new(SettlementPeriods::Status)
                            .string_len(32)
                            .not_null()
                            .default("preparing"),
                    )
                    .col(
                        ColumnDef::new(SettlementPeriods::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(SettlementPeriods::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Settlements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Settlements::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Settlements::SellerId).big_integer().not_null())
                    .col(ColumnDef::new(Settlements::PeriodId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Settlements::TotalOrderAmount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Settlements::TotalCommission)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Settlements::TotalDeliveryFee)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Settlements::TotalRefundAmount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Settlements::TotalCancelAmount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Settlements::AdjustmentAmount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Settlements::AdjustmentReason).string_len(500).null())
                    .col(
                        ColumnDef::new(Settlements::FinalSettlementAmount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Settlements::Status)
                            .string_len(32)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Settlements::SettledAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Settlements::Memo).text().null())
                    .col(
                        ColumnDef::new(Settlements::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Settlements::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_settlements_seller")
                            .from(Settlements::Table, Settlements::SellerId)
                            .to(Sellers::Table, Sellers::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_settlements_period")
                            .from(Settlements::Table, Settlements::PeriodId)
                            .to(SettlementPeriods::Table, SettlementPeriods::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 판매자-기간당 정산 1건
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_settlements_seller_period_unique")
                    .table(Settlements::Table)
                    .col(Settlements::SellerId)
                    .col(Settlements::PeriodId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SettlementItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SettlementItems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SettlementItems::SettlementId).big_integer().not_null())
                    .col(ColumnDef::new(SettlementItems::OrderId).big_integer().not_null())
                    .col(ColumnDef::new(SettlementItems::OrderItemId).big_integer().not_null())
                    .col(ColumnDef::new(SettlementItems::ProductName).string_len(200).not_null())
                    .col(ColumnDef::new(SettlementItems::Quantity).integer().not_null())
                    .col(ColumnDef::new(SettlementItems::Kind).string_len(16).not_null())
                    .col(ColumnDef::new(SettlementItems::ItemAmount).big_integer().not_null())
                    .col(
                        ColumnDef::new(SettlementItems::CommissionAmount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SettlementItems::DeliveryFee).big_integer().not_null())
                    .col(
                        ColumnDef::new(SettlementItems::SettlementAmount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SettlementItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_settlement_items_settlement")
                            .from(SettlementItems::Table, SettlementItems::SettlementId)
                            .to(Settlements::Table, Settlements::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_settlement_items_order_item")
                    .table(SettlementItems::Table)
                    .col(SettlementItems::OrderItemId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(SettlementItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Settlements::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(SettlementPeriods::Table).to_owned())
            .await?;
        Ok(())
    }
}
