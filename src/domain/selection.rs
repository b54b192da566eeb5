// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/selection.rs
//
// Selection state: the committed rectangle list and the drag state machine.

use crate::domain::geometry::{DisplayPoint, DisplayRect};

/// An in-progress drag gesture.
///
/// Anchor is the press point; cursor follows the pointer. Both already
/// normalized into display space.
#[derive(Debug, Clone, Copy)]
struct DragGesture {
    anchor: DisplayPoint,
    cursor: DisplayPoint,
}

/// Owns the committed selection rectangles plus at most one active gesture.
///
/// All mutation goes through the gesture transitions and [`remove`]; the
/// committed list is never handed out mutably. Removal is copy-on-write, so
/// a snapshot taken before a removal stays internally consistent.
///
/// [`remove`]: SelectionSet::remove
#[derive(Debug, Clone)]
pub struct SelectionSet {
    committed: Vec<DisplayRect>,
    drag: Option<DragGesture>,
    min_drag_size: f64,
}

impl SelectionSet {
    pub fn new(min_drag_size: f64) -> Self {
        Self {
            committed: Vec::new(),
            drag: None,
            min_drag_size,
        }
    }

    /// Pointer-down: open a gesture anchored at the press point.
    ///
    /// A press while a gesture is already active restarts it at the new
    /// anchor; the stale gesture is dropped uncommitted.
    pub fn begin_drag(&mut self, point: DisplayPoint) {
        self.drag = Some(DragGesture {
            anchor: point,
            cursor: point,
        });
    }

    /// Pointer-move: advance the candidate's free corner.
    ///
    /// No-op while idle (moves arrive before any press, or after release).
    pub fn update_drag(&mut self, point: DisplayPoint) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        drag.cursor = point;
    }

    /// Pointer-up: close the gesture, committing the candidate if it spans
    /// more than the minimum size on both axes.
    ///
    /// The threshold is strict, so a drag of exactly the minimum extent is
    /// discarded. Returns whether a rectangle was committed.
    pub fn end_drag(&mut self, point: DisplayPoint) -> bool {
        let Some(mut drag) = self.drag.take() else {
            return false;
        };
        drag.cursor = point;

        let dx = drag.cursor.x - drag.anchor.x;
        let dy = drag.cursor.y - drag.anchor.y;

        if dx.abs() > self.min_drag_size && dy.abs() > self.min_drag_size {
            // Stored rectangles are always normalized to positive size,
            // whichever direction the drag ran.
            self.committed
                .push(DisplayRect::from_corners(drag.anchor, drag.cursor));
            true
        } else {
            log::debug!("discarding sub-threshold drag ({dx:.1} x {dy:.1})");
            false
        }
    }

    /// Remove the committed rectangle at `index`.
    ///
    /// Out-of-range indices are a logged no-op. Surviving rectangles keep
    /// their relative order. Returns whether a rectangle was removed.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.committed.len() {
            log::debug!(
                "ignoring removal of selection {index}: only {} committed",
                self.committed.len()
            );
            return false;
        }

        // Rebuild instead of splicing in place: snapshots handed out before
        // this removal must keep seeing the old sequence.
        let mut next = Vec::with_capacity(self.committed.len() - 1);
        next.extend_from_slice(&self.committed[..index]);
        next.extend_from_slice(&self.committed[index + 1..]);
        self.committed = next;
        true
    }

    /// The candidate rectangle of the active gesture, if any.
    ///
    /// Emitted raw: width/height go negative while the pointer sits left or
    /// above the anchor. Normalization happens only on commit.
    #[must_use]
    pub fn candidate(&self) -> Option<DisplayRect> {
        self.drag.map(|drag| DisplayRect {
            left: drag.anchor.x,
            top: drag.anchor.y,
            width: drag.cursor.x - drag.anchor.x,
            height: drag.cursor.y - drag.anchor.y,
        })
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The committed rectangles, in commit (= export) order.
    #[must_use]
    pub fn committed(&self) -> &[DisplayRect] {
        &self.committed
    }

    /// An owned copy of the committed sequence, for export paths that must
    /// not observe later mutation.
    #[must_use]
    pub fn snapshot(&self) -> Vec<DisplayRect> {
        self.committed.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }
}
