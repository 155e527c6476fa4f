use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Notices {
    Table,
    Id,
    Title,
    Content,
    IsPinned,
    IsPublished,
    ViewCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Inquiries {
    Table,
    Id,
    UserId,
    SellerId,
    ProductId,
    Category,
    Title,
    Content,
    Status,
    Answer,
    AnsweredAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Faqs {
    Table,
    Id,
    Category,
    Question,
    Answer,
    SortOrder,
    IsPublished,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Guides {
    Table,
    Id,
    Category,
    Title,
    Content,
    SortOrder,
    IsPublished,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ErrorReports {
    Table,
    Id,
    SellerId,
    Title,
    Content,
    Status,
    Reply,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Terms {
    Table,
    Id,
    TermType,
    Version,
    Title,
    Content,
    EffectiveDate,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Banners {
    Table,
    Id,
    Title,
    ImageUrl,
    LinkUrl,
    Position,
    SortOrder,
    StartsAt,
    EndsAt,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Attachments {
    Table,
    Id,
    OriginalName,
    StorageKey,
    ContentType,
    Size,
    Checksum,
    CreatedAt,
}

fn id_col<T: IntoIden + 'static>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn now_col<T: IntoIden + 'static>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::cust("NOW()"))
        .to_owned()
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notices::Table)
                    .if_not_exists()
                    .col(&mut id_col(Notices::Id))
                    .col(ColumnDef::new(Notices::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Notices::Content).text().not_null())
                    .col(ColumnDef::new(Notices::IsPinned).boolean().not_null().default(false))
                    .col(
                        ColumnDef::new(Notices::IsPublished)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Notices::ViewCount).big_integer().not_null().default(0))
                    .col(&mut now_col(Notices::CreatedAt))
                    .col(&mut now_col(Notices::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Inquiries::Table)
                    .if_not_exists()
                    .col(&mut id_col(Inquiries::Id))
                    .col(ColumnDef::new(Inquiries::UserId).big_integer().null())
                    .col(ColumnDef::new(Inquiries::SellerId).big_integer().null())
                    .col(ColumnDef::new(Inquiries::ProductId).big_integer().null())
                    .col(ColumnDef::new(Inquiries::Category).string_len(50).not_null())
                    .col(ColumnDef::new(Inquiries::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Inquiries::Content).text().not_null())
                    .col(
                        ColumnDef::new(Inquiries::Status)
                            .string_len(32)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Inquiries::Answer).text().null())
                    .col(ColumnDef::new(Inquiries::AnsweredAt).timestamp_with_time_zone().null())
                    .col(&mut now_col(Inquiries::CreatedAt))
                    .col(&mut now_col(Inquiries::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Faqs::Table)
                    .if_not_exists()
                    .col(&mut id_col(Faqs::Id))
                    .col(ColumnDef::new(Faqs::Category).string_len(50).not_null())
                    .col(ColumnDef::new(Faqs::Question).string_len(500).not_null())
                    .col(ColumnDef::new(Faqs::Answer).text().not_null())
                    .col(ColumnDef::new(Faqs::SortOrder).integer().not_null().default(0))
                    .col(ColumnDef::new(Faqs::IsPublished).boolean().not_null().default(true))
                    .col(&mut now_col(Faqs::CreatedAt))
                    .col(&mut now_col(Faqs::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Guides::Table)
                    .if_not_exists()
                    .col(&mut id_col(Guides::Id))
                    .col(ColumnDef::new(Guides::Category).string_len(50).not_null())
                    .col(ColumnDef::new(Guides::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Guides::Content).text().not_null())
                    .col(ColumnDef::new(Guides::SortOrder).integer().not_null().default(0))
                    .col(ColumnDef::new(Guides::IsPublished).boolean().not_null().default(true))
                    .col(&mut now_col(Guides::CreatedAt))
                    .col(&mut now_col(Guides::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ErrorReports::Table)
                    .if_not_exists()
                    .col(&mut id_col(ErrorReports::Id))
                    .col(ColumnDef::new(ErrorReports::SellerId).big_integer().null())
                    .col(ColumnDef::new(ErrorReports::Title).string_len(200).not_null())
                    .col(ColumnDef::new(ErrorReports::Content).text().not_null())
                    .col(
                        ColumnDef::new(ErrorReports::Status)
                            .string_len(32)
                            .not_null()
                            .default("received"),
                    )
                    .col(ColumnDef::new(ErrorReports::Reply).text().null())
                    .col(&mut now_col(ErrorReports::CreatedAt))
                    .col(&mut now_col(ErrorReports::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Terms::Table)
                    .if_not_exists()
                    .col(&mut id_col(Terms::Id))
                    .col(ColumnDef::new(Terms::TermType).string_len(50).not_null())
                    .col(ColumnDef::new(Terms::Version).string_len(20).not_null())
                    .col(ColumnDef::new(Terms::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Terms::Content).text().not_null())
                    .col(ColumnDef::new(Terms::EffectiveDate).date().not_null())
                    .col(ColumnDef::new(Terms::IsActive).boolean().not_null().default(false))
                    .col(&mut now_col(Terms::CreatedAt))
                    .col(&mut now_col(Terms::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_terms_type_version_unique")
                    .table(Terms::Table)
                    .col(Terms::TermType)
                    .col(Terms::Version)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Banners::Table)
                    .if_not_exists()
                    .col(&mut id_col(Banners::Id))
                    .col(ColumnDef::new(Banners::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Banners::ImageUrl).string_len(500).not_null())
                    .col(ColumnDef::new(Banners::LinkUrl).string_len(500).null())
                    .col(ColumnDef::new(Banners::Position).string_len(50).not_null())
                    .col(ColumnDef::new(Banners::SortOrder).integer().not_null().default(0))
                    .col(ColumnDef::new(Banners::StartsAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Banners::EndsAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Banners::IsActive).boolean().not_null().default(true))
                    .col(&mut now_col(Banners::CreatedAt))
                    .col(&mut now_col(Banners::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Attachments::Table)
                    .if_not_exists()
                    .col(&mut id_col(Attachments::Id))
                    .col(ColumnDef::new(Attachments::OriginalName).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Attachments::StorageKey)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Attachments::ContentType).string_len(100).not_null())
                    .col(ColumnDef::new(Attachments::Size).big_integer().not_null())
                    .col(ColumnDef::new(Attachments::Checksum).string_len(32).not_null())
                    .col(&mut now_col(Attachments::CreatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(Attachments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Banners::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Terms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(ErrorReports::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Guides::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Faqs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Inquiries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Notices::Table).to_owned())
            .await?;
        Ok(())
    }
}
