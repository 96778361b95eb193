// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::ItemId;

/// Errors reported by the canvas API seam.
///
/// Gesture handling never fails; these only surface from calls the host makes
/// directly, such as queueing an item for placement or loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    /// The host does not know the item.
    #[error("no item with id {0:?}")]
    UnknownItem(ItemId),
    /// The item has already completed its interactive placement.
    #[error("item {0:?} has already been drawn")]
    AlreadyDrawn(ItemId),
    /// A configuration document could not be parsed.
    #[cfg(feature = "serde")]
    #[error("invalid canvas configuration: {0}")]
    Config(#[from] serde_json::Error),
}
