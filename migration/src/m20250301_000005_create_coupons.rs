use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Sellers {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Coupons {
    Table,
    Id,
    Code,
    Name,
    DiscountType,
    DiscountValue,
    MinOrderAmount,
    MaxDiscountAmount,
    SellerId,
    StartsAt,
    EndsAt,
    TotalQuantity,
    IssuedCount,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UserCoupons {
    Table,
    Id,
    CouponId,
    UserId,
    IssuedAt,
    UsedAt,
    OrderId,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 쿠폰 정책:
/// - fixed: discount_value = 할인 금액(원)
/// - percent: discount_value = 할인율(1~100), max_discount_amount 로 상한
/// - total_quantity NULL = 무제한 발급
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Coupons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Coupons::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Coupons::Code).string_len(20).not_null().unique_key())
                    .col(ColumnDef::new(Coupons::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Coupons::DiscountType).string_len(16).not_null())
                    .col(ColumnDef::new(Coupons::DiscountValue).big_integer().not_null())
                    .col(
                        ColumnDef::new(Coupons::MinOrderAmount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Coupons::MaxDiscountAmount).big_integer().null())
                    .col(ColumnDef::new(Coupons::SellerId).big_integer().null())
                    .col(ColumnDef::new(Coupons::StartsAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Coupons::EndsAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Coupons::TotalQuantity).integer().null())
                    .col(
                        ColumnDef::new(Coupons::IssuedCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Coupons::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Coupons::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Coupons::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_coupons_seller")
                            .from(Coupons::Table, Coupons::SellerId)
                            .to(Sellers::Table, Sellers::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserCoupons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserCoupons::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserCoupons::CouponId).big_integer().not_null())
                    .col(ColumnDef::new(UserCoupons::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(UserCoupons::IssuedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(ColumnDef::new(UserCoupons::UsedAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(UserCoupons::OrderId).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_coupons_coupon")
                            .from(UserCoupons::Table, UserCoupons::CouponId)
                            .to(Coupons::Table, Coupons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_coupons_user")
                            .from(UserCoupons::Table, UserCoupons::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 사용자당 동일 쿠폰 1회 발급
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_coupons_coupon_user_unique")
                    .table(UserCoupons::Table)
                    .col(UserCoupons::CouponId)
                    .col(UserCoupons::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(UserCoupons::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Coupons::Table).to_owned())
            .await?;
        Ok(())
    }
}
