use sea_orm_migration::{prelude::*, schema::*};

use super::m20251019_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Gadget::Table)
                    .if_not_exists()
                    .col(pk_uuid(Gadget::Id))
                    .col(string(Gadget::Name))
                    .col(string_uniq(Gadget::Codename))
                    .col(string(Gadget::Status).default("Available"))
                    .col(
                        timestamp_with_time_zone(Gadget::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Gadget::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(Gadget::DecommissionedAt))
                    .col(timestamp_with_time_zone_null(Gadget::DestroyedAt))
                    .col(uuid(Gadget::CreatedBy))
                    .col(uuid(Gadget::UpdatedBy))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gadget_created_by")
                            .from(Gadget::Table, Gadget::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gadget_updated_by")
                            .from(Gadget::Table, Gadget::UpdatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_gadget_status")
                    .table(Gadget::Table)
                    .col(Gadget::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Gadget::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Gadget {
    Table,
    Id,
    Name,
    Codename,
    Status,
    CreatedAt,
    UpdatedAt,
    DecommissionedAt,
    DestroyedAt,
    CreatedBy,
    UpdatedBy,
}
