use crate::service::StringService;
use crate::store::SharedStore;

/// Shared application state / 应用状态
pub struct AppState {
    pub strings: StringService,
}

impl AppState {
    pub fn new(store: SharedStore) -> Self {
        Self {
            strings: StringService::new(store),
        }
    }
}
