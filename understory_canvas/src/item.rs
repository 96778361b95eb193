// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canvas items and the host seam through which the engine reaches them.

use kurbo::{Point, Rect, Size, Vec2};
use understory_view2d::{ScaleDirection, is_valid_rect};

/// Opaque handle to an item owned by an [`ItemHost`].
///
/// Handles are resolved through the host on every use; the engine never holds
/// a reference to an item across calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(usize);

impl ItemId {
    /// Creates a handle from a host-defined index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The host-defined index behind this handle.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A positioned, resizable item on the canvas.
///
/// Positions and sizes are in content space. While an item is being drawn,
/// `scale_x`/`scale_y` record whether the pointer sits before the anchor on
/// that axis; the visual rectangle then extends from `left`/`top` towards the
/// origin (see [`Item::bounds`]).
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    /// Left edge (or anchor while drawing with a negative `scale_x`).
    pub left: f64,
    /// Top edge (or anchor while drawing with a negative `scale_y`).
    pub top: f64,
    /// Width; zero or NaN makes the item invalid.
    pub width: f64,
    /// Height; zero or NaN makes the item invalid.
    pub height: f64,
    /// Mirrors membership in the canvas selection.
    pub is_selected: bool,
    /// Whether hit testing may select this item.
    pub is_selectable: bool,
    /// Whether a drag gesture may move this item.
    pub is_draggable: bool,
    /// Horizontal drawing direction.
    pub scale_x: ScaleDirection,
    /// Vertical drawing direction.
    pub scale_y: ScaleDirection,
    /// Set once the initial interactive placement has completed.
    pub is_drawn: bool,
    /// The host positioned the item before drawing; drawing keeps `left`/`top`.
    pub position_preset: bool,
    /// Normalize `left`/`top` after drawing so the rectangle has positive scale.
    pub allow_scale_change_to_update_position: bool,
    /// Render-time translation of an uncommitted drag.
    pub offset: Vec2,
}

impl Item {
    /// A placed item covering `rect`.
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        let rect = rect.abs();
        Self {
            left: rect.x0,
            top: rect.y0,
            width: rect.width(),
            height: rect.height(),
            is_selected: false,
            is_selectable: true,
            is_draggable: true,
            scale_x: ScaleDirection::Positive,
            scale_y: ScaleDirection::Positive,
            is_drawn: true,
            position_preset: false,
            allow_scale_change_to_update_position: true,
            offset: Vec2::ZERO,
        }
    }

    /// An item waiting for interactive placement. Drawing anchors it at the
    /// pointer.
    #[must_use]
    pub fn pending() -> Self {
        Self {
            is_drawn: false,
            ..Self::new(Rect::ZERO)
        }
    }

    /// An item waiting for interactive placement whose position is already
    /// decided. Drawing only sizes it.
    #[must_use]
    pub fn pending_at(position: Point) -> Self {
        Self {
            left: position.x,
            top: position.y,
            position_preset: true,
            ..Self::pending()
        }
    }

    /// Returns the item with selection disabled.
    #[must_use]
    pub fn unselectable(mut self) -> Self {
        self.is_selectable = false;
        self
    }

    /// Returns the item with dragging disabled.
    #[must_use]
    pub fn pinned(mut self) -> Self {
        self.is_draggable = false;
        self
    }

    /// `left`/`top` as a point.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// `width`/`height` as a size.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Committed visual bounds, honoring negative drawing directions and
    /// ignoring any uncommitted drag offset.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        let x0 = if self.scale_x.is_negative() {
            self.left - self.width
        } else {
            self.left
        };
        let y0 = if self.scale_y.is_negative() {
            self.top - self.height
        } else {
            self.top
        };
        Rect::new(x0, y0, x0 + self.width, y0 + self.height)
    }

    /// Returns `false` for zero-sized or non-finite items.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_valid_rect(self.bounds())
    }
}

/// Collection of items the engine operates on.
///
/// The host owns the items; the engine only reads bounds and flags and writes
/// position, size, selection, and drawing state through this trait.
pub trait ItemHost {
    /// Enumerates items in paint order: the first item is drawn at the
    /// bottom, the last on top.
    fn items(&self) -> impl Iterator<Item = (ItemId, &Item)>;

    /// Resolves a handle.
    fn item(&self, id: ItemId) -> Option<&Item>;

    /// Resolves a handle for mutation.
    fn item_mut(&mut self, id: ItemId) -> Option<&mut Item>;
}

/// Flat, slot-based [`ItemHost`].
///
/// Ids are slot indices; removing an item leaves its slot empty so other ids
/// stay valid.
#[derive(Clone, Debug, Default)]
pub struct ItemStore {
    slots: Vec<Option<Item>>,
}

impl ItemStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item on top of the paint order.
    pub fn insert(&mut self, item: Item) -> ItemId {
        self.slots.push(Some(item));
        ItemId::new(self.slots.len() - 1)
    }

    /// Removes an item, returning it if the id was live.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        self.slots.get_mut(id.index()).and_then(Option::take)
    }

    /// Number of live items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Returns `true` if there are no live items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl core::ops::Index<ItemId> for ItemStore {
    type Output = Item;

    fn index(&self, id: ItemId) -> &Item {
        self.item(id).unwrap_or_else(|| panic!("no live item for {id:?}"))
    }
}

impl ItemHost for ItemStore {
    fn items(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|item| (ItemId::new(idx), item)))
    }

    fn item(&self, id: ItemId) -> Option<&Item> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }
}
