//! Pointer-drag reordering of editor rows.
//!
//! While a drag is active only the visual order changes; the tab list is
//! committed once, on drag end, from the final visual order.

use super::tab_list::RowKey;

/// Which half of the hovered row the pointer is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropHalf {
    Upper,
    Lower,
}

impl DropHalf {
    pub fn from_pointer(pointer_y: f64, row_top: f64, row_height: f64) -> Self {
        if pointer_y < row_top + row_height / 2.0 {
            DropHalf::Upper
        } else {
            DropHalf::Lower
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        subject: RowKey,
        /// Order when the drag started
        origin: Vec<RowKey>,
        /// Live visual order
        order: Vec<RowKey>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEnd {
    Unchanged,
    Reordered(Vec<RowKey>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragReorder {
    state: DragState,
}

impl DragReorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn subject(&self) -> Option<RowKey> {
        match &self.state {
            DragState::Dragging { subject, .. } => Some(*subject),
            DragState::Idle => None,
        }
    }

    pub fn visual_order(&self) -> Option<&[RowKey]> {
        match &self.state {
            DragState::Dragging { order, .. } => Some(order),
            DragState::Idle => None,
        }
    }

    /// Begin dragging `subject`. Ignored while another drag is active or when
    /// the subject is not one of the rows.
    pub fn start(&mut self, subject: RowKey, current_order: Vec<RowKey>) -> bool {
        if self.is_dragging() || !current_order.contains(&subject) {
            return false;
        }
        self.state = DragState::Dragging {
            subject,
            origin: current_order.clone(),
            order: current_order,
        };
        true
    }

    /// Place the subject before or after `candidate`. Returns whether the
    /// visual order changed.
    pub fn over(&mut self, candidate: RowKey, half: DropHalf) -> bool {
        let DragState::Dragging { subject, order, .. } = &mut self.state else {
            return false;
        };
        if candidate == *subject {
            return false;
        }
        let mut next: Vec<RowKey> = order.iter().copied().filter(|k| k != subject).collect();
        let Some(pos) = next.iter().position(|k| *k == candidate) else {
            return false;
        };
        let insert_at = match half {
            DropHalf::Upper => pos,
            DropHalf::Lower => pos + 1,
        };
        next.insert(insert_at, *subject);
        if next == *order {
            return false;
        }
        *order = next;
        true
    }

    /// Pointer is over the list container below its last row: the subject
    /// moves to the end.
    pub fn over_list_end(&mut self) -> bool {
        let DragState::Dragging { subject, order, .. } = &mut self.state else {
            return false;
        };
        if order.last() == Some(subject) {
            return false;
        }
        order.retain(|k| k != subject);
        order.push(*subject);
        true
    }

    /// Finish the drag. `dropped` is false when the pointer was released
    /// outside the list, which restores the original order.
    pub fn end(&mut self, dropped: bool) -> DragEnd {
        match std::mem::take(&mut self.state) {
            DragState::Idle => DragEnd::Unchanged,
            DragState::Dragging { origin, order, .. } => {
                if !dropped || order == origin {
                    DragEnd::Unchanged
                } else {
                    DragEnd::Reordered(order)
                }
            }
        }
    }
}

/// Fit a drag result onto the rows that exist now: keys that disappeared are
/// dropped, rows added meanwhile keep their relative order at the end.
pub fn reconcile(order: &[RowKey], current: &[RowKey]) -> Vec<RowKey> {
    let mut result: Vec<RowKey> = order
        .iter()
        .copied()
        .filter(|k| current.contains(k))
        .collect();
    for key in current {
        if !result.contains(key) {
            result.push(*key);
        }
    }
    result
}
