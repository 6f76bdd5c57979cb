// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use thiserror::Error;

/// Errors surfaced by the page controllers.
///
/// None of these stop a controller from making progress: a failed
/// preference write still switches the theme, and an unknown stored mode is
/// treated as "no preference".
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A stored or supplied theme name was neither `light` nor `dark`.
    #[error("unknown theme mode `{0}`")]
    UnknownThemeMode(String),

    /// The preference store cannot be reached at all.
    #[error("preference storage is unavailable")]
    StorageUnavailable,

    /// The preference store rejected a write.
    #[error("failed to write preference `{key}`")]
    StorageWrite {
        /// Key that was being written.
        key: String,
    },
}
