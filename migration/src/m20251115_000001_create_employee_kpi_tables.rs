use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    FullName,
    TenureYears,
    Age,
    HasSubordinates,
    LastVacationDate,
    TookSickLeave,
    HasDisciplinaryAction,
    ParticipatesInCorporateEvents,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EmployeeKpis {
    Table,
    Id,
    EmployeeId,
    Month,
    Year,
    KpiValue,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Employees::FullName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Employees::TenureYears).double().not_null())
                    .col(ColumnDef::new(Employees::Age).integer())
                    .col(
                        ColumnDef::new(Employees::HasSubordinates)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Employees::LastVacationDate).date())
                    .col(ColumnDef::new(Employees::TookSickLeave).boolean())
                    .col(ColumnDef::new(Employees::HasDisciplinaryAction).boolean())
                    .col(ColumnDef::new(Employees::ParticipatesInCorporateEvents).boolean())
                    .col(
                        ColumnDef::new(Employees::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("now()")),
                    )
                    .col(
                        ColumnDef::new(Employees::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("now()")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("ix_employees_full_name")
                    .table(Employees::Table)
                    .col(Employees::FullName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EmployeeKpis::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmployeeKpis::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EmployeeKpis::EmployeeId).integer().not_null())
                    .col(
                        ColumnDef::new(EmployeeKpis::Month)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmployeeKpis::Year)
                            .integer()
                            .not_null()
                            .default(2025),
                    )
                    .col(ColumnDef::new(EmployeeKpis::KpiValue).double().not_null())
                    .col(
                        ColumnDef::new(EmployeeKpis::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("now()")),
                    )
                    .col(
                        ColumnDef::new(EmployeeKpis::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("now()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_kpis_employee")
                            .from(EmployeeKpis::Table, EmployeeKpis::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_employee_month_year")
                    .table(EmployeeKpis::Table)
                    .col(EmployeeKpis::EmployeeId)
                    .col(EmployeeKpis::Month)
                    .col(EmployeeKpis::Year)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("ix_employee_kpis_employee_id")
                    .table(EmployeeKpis::Table)
                    .col(EmployeeKpis::EmployeeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("ix_employee_kpis_month_year")
                    .table(EmployeeKpis::Table)
                    .col(EmployeeKpis::Month)
                    .col(EmployeeKpis::Year)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmployeeKpis::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;
        Ok(())
    }
}
