pub mod list;
pub mod plan;

pub use list::list_references;
pub use plan::{PlanConfig, plan_query};
