use sea_orm_migration::prelude::*;

use crate::contract::model::SUPER_TENANT_ID;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Feedback::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Feedback::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Feedback::ExternalId)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Feedback::Message).text().not_null())
                    .col(ColumnDef::new(Feedback::Email).string().null())
                    .col(ColumnDef::new(Feedback::ContactNo).string().null())
                    .col(ColumnDef::new(Feedback::UserId).string().null())
                    .col(
                        ColumnDef::new(Feedback::TenantId)
                            .integer()
                            .not_null()
                            .default(SUPER_TENANT_ID),
                    )
                    .col(
                        ColumnDef::new(Feedback::TimeCreated)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FeedbackTags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeedbackTags::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FeedbackTags::FeedbackId).big_integer().not_null())
                    .col(ColumnDef::new(FeedbackTags::Tag).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedback_tags_feedback")
                            .from(FeedbackTags::Table, FeedbackTags::FeedbackId)
                            .to(Feedback::Table, Feedback::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_feedback_tags_feedback_id")
                    .table(FeedbackTags::Table)
                    .col(FeedbackTags::FeedbackId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_feedback_time_created")
                    .table(Feedback::Table)
                    .col(Feedback::TimeCreated)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FeedbackTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Feedback::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Feedback {
    Table,
    Id,
    ExternalId,
    Message,
    Email,
    ContactNo,
    UserId,
    TenantId,
    TimeCreated,
}

#[derive(DeriveIden)]
enum FeedbackTags {
    Table,
    Id,
    FeedbackId,
    Tag,
}
