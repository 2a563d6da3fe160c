// State management module
// Handles company records, name lookup, file persistence, and shared handler state

pub mod app_state;
pub mod company;
pub mod persistence;

pub use app_state::AppState;
pub use company::{find_by_name, normalize_name, position_by_name, Company, Dataset};
pub use persistence::{CompanyStore, StoreError};
