pub mod audit;
pub mod contract;
pub mod master_data;
pub mod permission;
pub mod user;

pub use audit::AuditLogEntry;
pub use contract::{
    Attachment, Contract, Expense, FileInput, InvoiceStatus, PaymentStatus, PaymentTerm,
    ProjectMember, saturating_total, MEMBER_ROLES, STATUS_COMPLETED, STATUS_NOT_STARTED,
};
pub use master_data::{
    Category, Customer, GenericRow, Party, PartyStatus, StatusColor, Supplier,
};
pub use permission::{Capability, PermissionNode};
pub use user::{SystemUser, UserGroup, NO_GROUP_LABEL};
