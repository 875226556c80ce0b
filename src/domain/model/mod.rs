//! Domain model for the `professores` resource.

pub mod professor;
pub mod salary;

pub use professor::{NewProfessor, Professor, SalaryStats};
pub use salary::{parse_salary, SalaryInput};
