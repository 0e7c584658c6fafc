use std::sync::atomic::{AtomicU32, Ordering};

/// Keys handled while a tab has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Next,
    Previous,
    First,
    Last,
}

impl NavKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" => Some(NavKey::Next),
            "ArrowLeft" => Some(NavKey::Previous),
            "Home" => Some(NavKey::First),
            "End" => Some(NavKey::Last),
            _ => None,
        }
    }
}

/// Selection state of one mounted widget.
///
/// Exactly one tab is selected and reachable with Tab-key navigation at any
/// time; a widget with no pairs has no selection at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabWidgetState {
    count: usize,
    active: Option<usize>,
}

impl TabWidgetState {
    /// `initial` is the pair flagged as initially active, if any and in range.
    pub fn new(count: usize, initial: Option<usize>) -> Self {
        let active = match count {
            0 => None,
            _ => Some(initial.filter(|i| *i < count).unwrap_or(0)),
        };
        Self { count, active }
    }

    /// Only complete tab/panel pairs take part in the widget.
    pub fn for_pairs(tab_count: usize, panel_count: usize, initial: Option<usize>) -> Self {
        Self::new(tab_count.min(panel_count), initial)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// A widget without pairs gets no roles or ARIA attributes at all.
    pub fn needs_wiring(&self) -> bool {
        self.count > 0
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Roving tabindex value for the tab at `index`.
    pub fn tab_index(&self, index: usize) -> i32 {
        if self.is_selected(index) {
            0
        } else {
            -1
        }
    }

    /// Returns `false` (and changes nothing) for an index outside the pairs.
    pub fn activate(&mut self, index: usize) -> bool {
        if index >= self.count {
            return false;
        }
        self.active = Some(index);
        true
    }

    /// Target index for a navigation key; all four wrap around.
    pub fn target_for(&self, key: NavKey) -> Option<usize> {
        let active = self.active?;
        let n = self.count;
        Some(match key {
            NavKey::Next => (active + 1) % n,
            NavKey::Previous => (active + n - 1) % n,
            NavKey::First => 0,
            NavKey::Last => n - 1,
        })
    }

    /// Activate the key's target, returning it for focus handling.
    pub fn navigate(&mut self, key: NavKey) -> Option<usize> {
        let target = self.target_for(key)?;
        self.activate(target);
        Some(target)
    }
}

static NEXT_INSTANCE: AtomicU32 = AtomicU32::new(1);

/// Element ids linking tabs to panels, unique per mounted instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetIds {
    prefix: String,
}

impl WidgetIds {
    /// Allocate ids for a new instance. `base` is a readable stem such as the
    /// container's `data-tabs` value.
    pub fn allocate(base: &str) -> Self {
        let instance = NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed);
        let base = if base.is_empty() { "tabgroup" } else { base };
        Self {
            prefix: format!("{}-{}", base, instance),
        }
    }

    pub fn tab_id(&self, index: usize) -> String {
        format!("{}-tab-{}", self.prefix, index)
    }

    pub fn panel_id(&self, index: usize) -> String {
        format!("{}-panel-{}", self.prefix, index)
    }
}
