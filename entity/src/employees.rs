use sea_orm::prelude::{Date, DateTimeWithTimeZone, *};

/// Core employee record assembled from the spreadsheet export.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub full_name: String,
    pub tenure_years: f64,
    pub age: Option<i32>,
    pub has_subordinates: bool,
    pub last_vacation_date: Option<Date>,
    pub took_sick_leave: Option<bool>,
    pub has_disciplinary_action: Option<bool>,
    pub participates_in_corporate_events: Option<bool>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::employee_kpis::Entity")]
    EmployeeKpis,
}

impl Related<super::employee_kpis::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmployeeKpis.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
