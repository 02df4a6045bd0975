//! Planning collaborator adapters implementing the
//! [`PlanningCollaborator`](huddle_application::PlanningCollaborator) port.

mod catalog;
mod http;

pub use catalog::CatalogPlanner;
pub use http::HttpPlanner;
