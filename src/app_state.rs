use crate::store::CartStore;

/// Shared handler state. Built once in `main` and cloned into each request.
#[derive(Clone)]
pub struct AppState {
    pub cart_store: CartStore,
}

impl AppState {
    pub fn new(cart_store: CartStore) -> Self {
        Self { cart_store }
    }
}
