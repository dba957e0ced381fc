use listflip::{ItemPosition, ListView, Size};

/// Display handles handed out by [`SimulatedList`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewId {
    Container,
    Row(ItemPosition),
}

/// A single-section list with fixed row heights and a scrollable viewport.
///
/// Data changes are staged with [`SimulatedList::set_data_len`] and only become visible on
/// `reload_data`, the way a table view keeps showing stale rows until it is reloaded.
#[derive(Clone, Debug)]
pub struct SimulatedList {
    size: Size,
    row_height: f32,
    scroll_offset: f32,
    displayed: usize,
    staged: usize,
    reloads: usize,
    open_brackets: usize,
    closed_brackets: usize,
}

impl SimulatedList {
    /// `size` is the container's frame; rows span its full width.
    pub fn new(size: Size, row_height: f32) -> Self {
        Self {
            size,
            row_height: row_height.max(1.0),
            scroll_offset: 0.0,
            displayed: 0,
            staged: 0,
            reloads: 0,
            open_brackets: 0,
            closed_brackets: 0,
        }
    }

    /// Convenience: stage `len` rows and reload.
    pub fn with_rows(mut self, len: usize) -> Self {
        self.set_data_len(len);
        self.reload_data();
        self
    }

    pub fn set_data_len(&mut self, len: usize) {
        self.staged = len;
    }

    /// Rows currently displayed (as of the last reload).
    pub fn row_count(&self) -> usize {
        self.displayed
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn content_height(&self) -> f32 {
        self.displayed as f32 * self.row_height
    }

    /// Sets the scroll offset, clamped to the scrollable range.
    pub fn set_scroll_offset(&mut self, offset: f32) {
        let max = (self.content_height() - self.size.height).max(0.0);
        self.scroll_offset = offset.clamp(0.0, max);
    }

    pub fn reload_count(&self) -> usize {
        self.reloads
    }

    /// `(begin_updates, end_updates)` call counts.
    pub fn update_brackets(&self) -> (usize, usize) {
        (self.open_brackets, self.closed_brackets)
    }

    /// Visible row range, end exclusive. A partially visible row counts as visible.
    pub fn visible_rows(&self) -> core::ops::Range<usize> {
        if self.displayed == 0 || self.size.height <= 0.0 {
            return 0..0;
        }
        let start = (self.scroll_offset / self.row_height).floor() as usize;
        let end = ((self.scroll_offset + self.size.height) / self.row_height).ceil() as usize;
        start.min(self.displayed)..end.min(self.displayed)
    }
}

impl ListView for SimulatedList {
    type Handle = ViewId;

    fn visible_positions(&self) -> Vec<ItemPosition> {
        self.visible_rows().map(ItemPosition::row).collect()
    }

    fn item_handle(&self, position: ItemPosition) -> Option<ViewId> {
        let rows = self.visible_rows();
        (position.section == 0 && rows.contains(&position.row)).then_some(ViewId::Row(position))
    }

    fn item_size(&self, handle: &ViewId) -> Size {
        match handle {
            ViewId::Container => self.size,
            ViewId::Row(_) => Size::new(self.size.width, self.row_height),
        }
    }

    fn container_handle(&self) -> ViewId {
        ViewId::Container
    }

    fn container_size(&self) -> Size {
        self.size
    }

    fn reload_data(&mut self) {
        self.displayed = self.staged;
        self.reloads += 1;
        let offset = self.scroll_offset;
        self.set_scroll_offset(offset);
    }

    fn begin_updates(&mut self) {
        self.open_brackets += 1;
    }

    fn end_updates(&mut self) {
        self.closed_brackets += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_rows_follow_scroll_offset() {
        let mut list = SimulatedList::new(Size::new(320.0, 200.0), 64.0).with_rows(20);
        assert_eq!(list.visible_rows(), 0..4);

        list.set_scroll_offset(100.0);
        assert_eq!(list.visible_rows(), 1..5);

        list.set_scroll_offset(1e6);
        assert_eq!(list.scroll_offset(), 20.0 * 64.0 - 200.0);
        assert_eq!(list.visible_rows(), 16..20);
    }

    #[test]
    fn staged_rows_appear_on_reload() {
        let mut list = SimulatedList::new(Size::new(320.0, 200.0), 50.0);
        list.set_data_len(8);
        assert!(list.visible_positions().is_empty());

        list.reload_data();
        assert_eq!(list.reload_count(), 1);
        assert_eq!(list.visible_positions().len(), 4);
        assert_eq!(
            list.item_handle(ItemPosition::row(3)),
            Some(ViewId::Row(ItemPosition::row(3)))
        );
        assert_eq!(list.item_handle(ItemPosition::row(4)), None);
        assert_eq!(list.item_handle(ItemPosition::new(1, 0)), None);
    }
}
