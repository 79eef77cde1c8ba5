//! The shared data store, wired through the Yew context so every page
//! reads the same cached collections instead of refetching per page.

use client::{HttpApi, Store};
use std::ops::Deref;
use std::rc::Rc;
use yew::prelude::*;

pub type AppStore = Store<HttpApi>;

/// Cheap-to-clone handle placed in the component context.
#[derive(Clone)]
pub struct StoreHandle(Rc<AppStore>);

impl StoreHandle {
    /// Store talking to the serving origin's API.
    pub fn new() -> Self {
        Self(Rc::new(Store::new(HttpApi::new(""))))
    }
}

impl Default for StoreHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for StoreHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for StoreHandle {
    type Target = AppStore;

    fn deref(&self) -> &AppStore {
        &self.0
    }
}

/// The store from the surrounding [`ContextProvider`].
#[hook]
pub fn use_store() -> StoreHandle {
    use_context::<StoreHandle>().expect("no StoreHandle context; wrap pages in App")
}
