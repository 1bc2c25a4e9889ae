use tracing::trace;

/// View sizes at or below this row count render without virtualization.
pub const DEFAULT_VIRTUALIZE_THRESHOLD: usize = 100;
/// Rows materialized beyond each edge of the visible range.
pub const DEFAULT_OVERSCAN: usize = 10;
/// Estimated row height in layout units.
pub const DEFAULT_ROW_HEIGHT: usize = 50;

/// The contiguous run of view rows to materialize, plus the total scroll
/// height the container should report so the scrollbar reflects the full
/// list even though only the window exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualWindow {
    /// First materialized view index, inclusive.
    pub start: usize,
    /// One past the last materialized view index.
    pub end: usize,
    /// `row count × row height`.
    pub total_height: usize,
    /// False when the whole view is materialized.
    pub virtualized: bool,
}

impl VirtualWindow {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}

/// Windowing state and math for the scrollable body.
///
/// Offsets and heights are in abstract layout units; a terminal renderer
/// runs this with `row_height = 1` so units are character cells. The last
/// computed window is cached and only recomputed when the row count, row
/// height, viewport height, or scroll offset actually changed.
#[derive(Debug, Clone)]
pub struct Viewport {
    row_height: usize,
    overscan: usize,
    threshold: usize,
    scroll_offset: usize,
    viewport_height: usize,
    cached: Option<(WindowKey, VirtualWindow)>,
}

type WindowKey = (usize, usize, usize, usize);

impl Default for Viewport {
    fn default() -> Self {
        Self::new(
            DEFAULT_ROW_HEIGHT,
            DEFAULT_OVERSCAN,
            DEFAULT_VIRTUALIZE_THRESHOLD,
        )
    }
}

impl Viewport {
    pub fn new(row_height: usize, overscan: usize, threshold: usize) -> Self {
        Self {
            row_height: row_height.max(1),
            overscan,
            threshold,
            scroll_offset: 0,
            viewport_height: 0,
            cached: None,
        }
    }

    pub fn row_height(&self) -> usize {
        self.row_height
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height;
    }

    pub fn set_scroll_offset(&mut self, offset: usize) {
        self.scroll_offset = offset;
    }

    /// Scroll by a signed number of units, clamped at the top.
    /// The bottom clamp happens against the row count in `window`.
    pub fn scroll_by(&mut self, delta: i64) {
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta as isize);
    }

    /// Layout offset of a row from the top of the scroll container.
    pub fn row_offset(&self, index: usize) -> usize {
        index * self.row_height
    }

    /// How many whole rows fit in the viewport.
    pub fn rows_per_page(&self) -> usize {
        (self.viewport_height / self.row_height).max(1)
    }

    fn max_scroll(&self, row_count: usize) -> usize {
        (row_count * self.row_height).saturating_sub(self.viewport_height)
    }

    /// Adjust the scroll offset so the given view row is fully visible.
    pub fn ensure_row_visible(&mut self, index: usize, row_count: usize) {
        let top = self.row_offset(index);
        let bottom = top + self.row_height;

        if top < self.scroll_offset {
            self.scroll_offset = top;
        } else if bottom > self.scroll_offset + self.viewport_height {
            self.scroll_offset = bottom.saturating_sub(self.viewport_height);
        }
        self.scroll_offset = self.scroll_offset.min(self.max_scroll(row_count));
    }

    /// The window to materialize for a view of `row_count` rows.
    ///
    /// At or below the threshold every row is materialized. Above it, the
    /// visible index range is derived from the scroll offset and padded by
    /// the overscan margin on both sides.
    pub fn window(&mut self, row_count: usize) -> VirtualWindow {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll(row_count));

        let key = (
            row_count,
            self.row_height,
            self.viewport_height,
            self.scroll_offset,
        );
        if let Some((cached_key, window)) = self.cached {
            if cached_key == key {
                return window;
            }
        }

        let window = self.compute(row_count);
        trace!(
            target: "viewport",
            "Window {}..{} of {} rows (offset {})",
            window.start,
            window.end,
            row_count,
            self.scroll_offset
        );
        self.cached = Some((key, window));
        window
    }

    fn compute(&self, row_count: usize) -> VirtualWindow {
        let total_height = row_count * self.row_height;

        if row_count <= self.threshold {
            return VirtualWindow {
                start: 0,
                end: row_count,
                total_height,
                virtualized: false,
            };
        }

        let first_visible = self.scroll_offset / self.row_height;
        let visible_end = (self.scroll_offset + self.viewport_height).div_ceil(self.row_height);

        VirtualWindow {
            start: first_visible.saturating_sub(self.overscan),
            end: (visible_end + self.overscan).min(row_count),
            total_height,
            virtualized: true,
        }
    }
}
