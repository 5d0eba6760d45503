// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide set of shown menus.

use std::sync::{Arc, LazyLock, Weak};

use parking_lot::Mutex;

use super::MenuShared;

static SHOWN_MENUS: LazyLock<Mutex<Vec<Weak<MenuShared>>>> =
    LazyLock::new(|| Mutex::new(Vec::new()));

pub(super) fn register(menu: &Arc<MenuShared>) {
    let mut menus = SHOWN_MENUS.lock();
    menus.retain(|weak| weak.strong_count() > 0);
    if !menus.iter().any(|weak| std::ptr::eq(weak.as_ptr(), Arc::as_ptr(menu))) {
        menus.push(Arc::downgrade(menu));
    }
}

pub(super) fn deregister(menu: *const MenuShared) {
    SHOWN_MENUS
        .lock()
        .retain(|weak| weak.strong_count() > 0 && !std::ptr::eq(weak.as_ptr(), menu));
}

/// Upgraded handles of every registered menu, collected under the lock.
pub(super) fn shown() -> Vec<Arc<MenuShared>> {
    SHOWN_MENUS.lock().iter().filter_map(Weak::upgrade).collect()
}
