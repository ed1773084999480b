use tracing::debug;

/// Drag-to-reorder cursors.
///
/// `source` is captured when a drag begins and `target` follows the pointer
/// across rows; the last target before the drop wins. Neither is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReorderEngine {
    source: Option<usize>,
    target: Option<usize>,
}

impl ReorderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> Option<usize> {
        self.source
    }

    pub fn target(&self) -> Option<usize> {
        self.target
    }

    pub fn is_dragging(&self) -> bool {
        self.source.is_some()
    }

    pub fn drag_start(&mut self, index: usize) {
        self.source = Some(index);
    }

    pub fn drag_enter(&mut self, index: usize) {
        self.target = Some(index);
    }

    /// Moves the source element to the target position and clears both
    /// cursors. The target indexes the sequence after the source is removed;
    /// a target past the end appends.
    ///
    /// Returns whether `items` changed.
    pub fn drag_end<T>(&mut self, items: &mut Vec<T>) -> bool {
        let source = self.source.take();
        let target = self.target.take();
        let (Some(source), Some(target)) = (source, target) else {
            return false;
        };
        if source >= items.len() {
            return false;
        }
        let item = items.remove(source);
        let target = target.min(items.len());
        items.insert(target, item);
        debug!(source, target, "reordered");
        source != target
    }
}
