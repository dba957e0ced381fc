use alloc::vec::Vec;

use crate::{ItemPosition, ListView};

/// Resolves the rows a cell-scope batch applies to.
///
/// - `None`: every visible row, in display order.
/// - `Some(filter)`: the filter's positions that are visible right now, in the caller's order.
///   Positions that are off screen or have no handle are dropped, and so are repeats.
pub fn resolve_targets<L: ListView + ?Sized>(
    list: &L,
    filter: Option<&[ItemPosition]>,
) -> Vec<(ItemPosition, L::Handle)> {
    let visible = list.visible_positions();
    let Some(filter) = filter else {
        return visible
            .into_iter()
            .filter_map(|p| list.item_handle(p).map(|h| (p, h)))
            .collect();
    };

    let mut out: Vec<(ItemPosition, L::Handle)> = Vec::with_capacity(filter.len());
    for &position in filter {
        if !visible.contains(&position) {
            ftrace!(
                section = position.section,
                row = position.row,
                "resolve_targets: dropping position that is not visible"
            );
            continue;
        }
        if out.iter().any(|(p, _)| *p == position) {
            continue;
        }
        if let Some(handle) = list.item_handle(position) {
            out.push((position, handle));
        }
    }
    out
}
