use sea_orm::prelude::{DateTimeWithTimeZone, *};

/// One monthly KPI reading for an employee. The store enforces uniqueness
/// of (employee_id, month, year).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "employee_kpis")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub employee_id: i32,
    pub month: KpiMonth,
    pub year: i32,
    pub kpi_value: f64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "i16", db_type = "SmallInteger")]
pub enum KpiMonth {
    #[sea_orm(num_value = 1)]
    January,
    #[sea_orm(num_value = 2)]
    February,
    #[sea_orm(num_value = 3)]
    March,
    #[sea_orm(num_value = 4)]
    April,
    #[sea_orm(num_value = 5)]
    May,
    #[sea_orm(num_value = 6)]
    June,
    #[sea_orm(num_value = 7)]
    July,
    #[sea_orm(num_value = 8)]
    August,
    #[sea_orm(num_value = 9)]
    September,
    #[sea_orm(num_value = 10)]
    October,
    #[sea_orm(num_value = 11)]
    November,
    #[sea_orm(num_value = 12)]
    December,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::EmployeeId",
        to = "super::employees::Column::Id",
        on_delete = "Cascade"
    )]
    Employee,
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
