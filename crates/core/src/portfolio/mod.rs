//! Portfolio module - generator input models and the store seam.

mod portfolio_model;
mod portfolio_traits;

pub use portfolio_model::{AccountRoomTarget, RiskAnalysis};
pub use portfolio_traits::PortfolioRepositoryTrait;
