#[cfg(test)]
mod tests {
    use datagrid::ui::viewport::{Viewport, DEFAULT_OVERSCAN};

    fn units_viewport() -> Viewport {
        // Library defaults: 50-unit rows, 10 overscan, threshold 100
        let mut vp = Viewport::default();
        vp.set_viewport_height(500); // 10 visible rows
        vp
    }

    #[test]
    fn test_101_rows_cross_the_threshold() {
        let mut vp = units_viewport();

        let at_threshold = vp.window(100);
        assert!(!at_threshold.virtualized);
        assert_eq!(at_threshold.len(), 100);

        let over_threshold = vp.window(101);
        assert!(over_threshold.virtualized);
        assert_eq!(over_threshold.total_height, 101 * 50);
        assert_eq!(over_threshold.total_height, 5050);
    }

    #[test]
    fn test_window_is_bounded_at_every_scroll_position() {
        let mut vp = units_viewport();
        let rows = 101;
        let max_window = 10 + 2 * DEFAULT_OVERSCAN;

        for step in 0..200 {
            vp.set_scroll_offset(step * 25);
            let window = vp.window(rows);
            assert!(window.virtualized);
            assert!(
                window.len() <= max_window + 1,
                "window {}..{} too large at offset {}",
                window.start,
                window.end,
                step * 25
            );
            assert!(window.end <= rows);
        }
    }

    #[test]
    fn test_materialized_rows_are_positioned_absolutely() {
        let vp = units_viewport();
        for index in [0usize, 1, 50, 100] {
            assert_eq!(vp.row_offset(index), index * 50);
        }
    }

    #[test]
    fn test_window_recompute_only_on_input_change() {
        let mut vp = units_viewport();
        let first = vp.window(150);
        // Same inputs: identical result (served from the cached window)
        assert_eq!(vp.window(150), first);

        vp.set_scroll_offset(1000);
        let scrolled = vp.window(150);
        assert_ne!(scrolled, first);
        assert_eq!(scrolled.start, 20usize.saturating_sub(DEFAULT_OVERSCAN));

        // Row-count change also invalidates
        let shrunk = vp.window(120);
        assert_ne!(shrunk, scrolled);
    }

    #[test]
    fn test_terminal_geometry_row_height_one() {
        // The widget runs the same math with 1-unit rows
        let mut vp = Viewport::new(1, 5, 100);
        vp.set_viewport_height(20);
        vp.set_scroll_offset(40);

        let window = vp.window(1000);
        assert_eq!(window.start, 35);
        assert_eq!(window.end, 65);
        assert_eq!(window.total_height, 1000);
    }
}
