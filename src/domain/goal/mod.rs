//! Goals and objectives.
//!
//! A [`Goal`] is the form-fill session for one (room, user, agent)
//! relationship; its [`Objective`]s wrap the line items to collect.

mod aggregate;
mod objective;
mod status;

pub use aggregate::Goal;
pub use objective::{Objective, ResultData};
pub use status::GoalStatus;
