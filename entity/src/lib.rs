pub mod employee_kpis;
pub mod employees;

pub use employee_kpis::KpiMonth;
