//! Stacking order for overlays drawn over the video.

use crate::overlay::Overlay;

/// Visible overlays in paint order: ascending z-index, ties in list order.
pub fn render_order(overlays: &[Overlay]) -> Vec<&Overlay> {
    let mut visible: Vec<&Overlay> = overlays.iter().filter(|o| o.visible).collect();
    // `sort_by_key` is stable, which keeps list order for equal z-indices.
    visible.sort_by_key(|o| o.z_index);
    visible
}

/// z-index for a new overlay: one more than the number of overlays at
/// creation time. After deletions this can repeat an existing z-index.
pub fn next_z_index(existing: usize) -> i64 {
    existing as i64 + 1
}
