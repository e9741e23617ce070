//! Login session: the logged-in principal plus the screen controllers whose
//! state lives exactly as long as the session.

use rust_decimal::Decimal;
use tracing::info;

use crate::admin::AdminController;
use crate::auth::Principal;
use crate::contract_form::ContractForm;
use crate::master_data::{MasterDataController, SessionCache};
use crate::models::Category;
use crate::permissions::PermissionMatrix;
use crate::store::EntityStore;

/// Per-login state: the signed-in principal and one controller per screen.
///
/// The master-data session cache lives inside `master_data` and is dropped
/// by [`Session::end`].
pub struct Session {
    pub principal: Principal,
    pub contract_form: ContractForm,
    pub master_data: MasterDataController,
    pub permissions: PermissionMatrix,
    pub admin: AdminController,
}

impl Session {
    /// Starts a session with an empty category cache.
    pub fn start(principal: Principal, store: &EntityStore, default_vat: Decimal) -> Self {
        info!("Session started for {}", principal.username);
        Self {
            principal,
            contract_form: ContractForm::new(default_vat),
            master_data: MasterDataController::new(
                SessionCache::new(),
                Category::Customers,
                &store.master,
            ),
            permissions: PermissionMatrix::new(store.permissions.clone()),
            admin: AdminController::default(),
        }
    }

    /// Ends the session. Unsaved category edits held in the cache are dropped.
    pub fn end(self) {
        let cache = self.master_data.into_cache();
        info!(
            "Session ended for {} ({} cached categories discarded)",
            self.principal.username,
            cache.len()
        );
    }
}
