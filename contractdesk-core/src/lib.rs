//! ContractDesk core: contract drafting, shared master data, permissions and the
//! audit log of the back-office dashboard, all held in memory for one session.

pub mod admin;
pub mod audit_log;
pub mod auth;
pub mod config;
pub mod contract_form;
pub mod dashboard;
pub mod date_input;
pub mod error;
pub mod master_data;
pub mod models;
pub mod permissions;
pub mod seed;
pub mod session;
pub mod status;
pub mod store;

pub use config::AppConfig;
pub use error::{
    AdminError, AuthError, ConfigError, ContractFormError, ExportError, MasterDataError,
};
pub use session::Session;
pub use store::EntityStore;
