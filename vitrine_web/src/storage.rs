// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Theme preference storage.

use alloc::string::{String, ToString as _};

use web_sys::{Storage, Window};

use vitrine_core::Error;
use vitrine_core::theme::{MemoryStore, PreferenceStore};

/// Preference storage for the page.
///
/// Uses `localStorage` when the browser grants it (it can be disabled or
/// throw in private modes) and otherwise keeps preferences for the lifetime
/// of the page only.
#[derive(Debug)]
pub enum PageStore {
    /// Durable `localStorage`.
    Local(Storage),
    /// Session-only fallback.
    Memory(MemoryStore),
}

impl PageStore {
    /// Opens `localStorage` for `window`.
    ///
    /// Fails with [`Error::StorageUnavailable`] when the browser has no
    /// storage or refuses access to it.
    pub fn local(window: &Window) -> Result<Self, Error> {
        Self::from_lookup(window.local_storage().ok().flatten())
    }

    fn from_lookup(storage: Option<Storage>) -> Result<Self, Error> {
        storage.map(Self::Local).ok_or(Error::StorageUnavailable)
    }

    /// Returns `true` if preferences survive a reload.
    #[must_use]
    pub fn is_durable(&self) -> bool {
        matches!(self, Self::Local(_))
    }
}

impl PreferenceStore for PageStore {
    fn load(&self, key: &str) -> Option<String> {
        match self {
            Self::Local(storage) => storage.get_item(key).ok().flatten(),
            Self::Memory(memory) => memory.load(key),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), Error> {
        match self {
            Self::Local(storage) => storage.set_item(key, value).map_err(|_| Error::StorageWrite {
                key: key.to_string(),
            }),
            Self::Memory(memory) => memory.save(key, value),
        }
    }
}
