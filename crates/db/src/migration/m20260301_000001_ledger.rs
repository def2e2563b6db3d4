//! Ledger schema: accounts, classifications, transactions and tag links.
//!
//! Built with the schema builder so the same migration runs on Postgres and
//! SQLite. Every table is tenant-scoped and soft-deleted via `deactivated_at`.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Accounts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Accounts::TenantId).uuid().not_null())
                    .col(ColumnDef::new(Accounts::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Accounts::Currency).string_len(3).not_null())
                    .col(
                        ColumnDef::new(Accounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Accounts::DeactivatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Categories::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Categories::TenantId).uuid().not_null())
                    .col(ColumnDef::new(Categories::ParentCategoryId).uuid())
                    .col(ColumnDef::new(Categories::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Categories::Color).string().not_null().default(""))
                    .col(ColumnDef::new(Categories::Icon).string().not_null().default(""))
                    .col(ColumnDef::new(Categories::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Categories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Categories::UpdatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Categories::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Categories::DeactivatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_categories_parent")
                            .from(Categories::Table, Categories::ParentCategoryId)
                            .to(Categories::Table, Categories::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tags::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Tags::TenantId).uuid().not_null())
                    .col(ColumnDef::new(Tags::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Tags::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Tags::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Tags::UpdatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Tags::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Tags::DeactivatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Transactions::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Transactions::TenantId).uuid().not_null())
                    .col(ColumnDef::new(Transactions::FromAccountId).uuid().not_null())
                    .col(ColumnDef::new(Transactions::ToAccountId).uuid())
                    .col(ColumnDef::new(Transactions::Amount).string_len(40).not_null())
                    .col(ColumnDef::new(Transactions::Currency).string_len(3).not_null())
                    .col(ColumnDef::new(Transactions::TransactionDate).date().not_null())
                    .col(ColumnDef::new(Transactions::Description).string_len(500))
                    .col(ColumnDef::new(Transactions::CategoryId).uuid())
                    .col(ColumnDef::new(Transactions::CreatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::UpdatedBy).uuid().not_null())
                    .col(
                        ColumnDef::new(Transactions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::DeactivatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_from_account")
                            .from(Transactions::Table, Transactions::FromAccountId)
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_to_account")
                            .from(Transactions::Table, Transactions::ToAccountId)
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_category")
                            .from(Transactions::Table, Transactions::CategoryId)
                            .to(Categories::Table, Categories::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TransactionTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TransactionTags::TransactionId).uuid().not_null())
                    .col(ColumnDef::new(TransactionTags::TagId).uuid().not_null())
                    .col(
                        ColumnDef::new(TransactionTags::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(TransactionTags::TransactionId)
                            .col(TransactionTags::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_tags_transaction")
                            .from(TransactionTags::Table, TransactionTags::TransactionId)
                            .to(Transactions::Table, Transactions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transaction_tags_tag")
                            .from(TransactionTags::Table, TransactionTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Tenant-scoped listing is the hot path for every table.
        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_tenant_date")
                    .table(Transactions::Table)
                    .col(Transactions::TenantId)
                    .col(Transactions::TransactionDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_accounts_tenant")
                    .table(Accounts::Table)
                    .col(Accounts::TenantId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tags_tenant")
                    .table(Tags::Table)
                    .col(Tags::TenantId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_categories_tenant")
                    .table(Categories::Table)
                    .col(Categories::TenantId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transaction_tags_tag")
                    .table(TransactionTags::Table)
                    .col(TransactionTags::TagId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TransactionTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
    TenantId,
    Name,
    Currency,
    CreatedAt,
    DeactivatedAt,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    TenantId,
    ParentCategoryId,
    Name,
    Color,
    Icon,
    CreatedBy,
    CreatedAt,
    UpdatedBy,
    UpdatedAt,
    DeactivatedAt,
}

#[derive(DeriveIden)]
enum Tags {
    Table,
    Id,
    TenantId,
    Name,
    CreatedBy,
    CreatedAt,
    UpdatedBy,
    UpdatedAt,
    DeactivatedAt,
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    TenantId,
    FromAccountId,
    ToAccountId,
    Amount,
    Currency,
    TransactionDate,
    Description,
    CategoryId,
    CreatedBy,
    CreatedAt,
    UpdatedBy,
    UpdatedAt,
    DeactivatedAt,
}

#[derive(DeriveIden)]
enum TransactionTags {
    Table,
    TransactionId,
    TagId,
    CreatedAt,
}
