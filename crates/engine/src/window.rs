use std::fmt;

/// A half-open id range `[start, end)` one chunk copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdWindow {
    pub start: u64,
    pub end: u64,
}

impl IdWindow {
    /// The first window of a copy.
    pub fn opening(starting_id: u64, chunk_size: u64) -> Self {
        IdWindow {
            start: starting_id,
            end: starting_id.saturating_add(chunk_size),
        }
    }

    /// The window immediately after this one.
    pub fn advance(&self, chunk_size: u64) -> Self {
        IdWindow {
            start: self.end,
            end: self.end.saturating_add(chunk_size),
        }
    }

    /// The final window, stretched to cover ids up to and including `max_id`.
    pub fn closing(&self, max_id: u64) -> Self {
        IdWindow {
            start: self.start,
            end: max_id.saturating_add(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

impl fmt::Display for IdWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Lays out every window a copy over `[starting_id, max_id]` would process,
/// ending with the closing window. `chunk_size` must be positive.
pub fn plan(starting_id: u64, chunk_size: u64, max_id: u64) -> Vec<IdWindow> {
    let mut windows = Vec::new();
    let mut window = IdWindow::opening(starting_id, chunk_size);
    while window.end <= max_id {
        windows.push(window);
        window = window.advance(chunk_size);
    }
    windows.push(window.closing(max_id));
    windows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: u64, end: u64) -> IdWindow {
        IdWindow { start, end }
    }

    #[test]
    fn test_windows_cover_range_exactly() {
        let windows = plan(1, 100_000, 250_000);
        assert_eq!(
            windows,
            vec![
                window(1, 100_001),
                window(100_001, 200_001),
                window(200_001, 250_001),
            ]
        );

        // Contiguous, non-overlapping, and the last id is inside the final window.
        for pair in windows.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        let last = windows.last().unwrap();
        assert!(250_000 < last.end && 250_000 >= last.start);
    }

    #[test]
    fn test_empty_table_yields_one_empty_window() {
        let windows = plan(1, 100_000, 0);
        assert_eq!(windows, vec![window(1, 1)]);
        assert!(windows[0].is_empty());
    }

    #[test]
    fn test_max_fits_exactly_in_one_chunk() {
        // The opening window ends past max_id, so the main loop never runs
        // and the closing window carries the whole range alone.
        let windows = plan(1, 100_000, 100_000);
        assert_eq!(windows, vec![window(1, 100_001)]);
    }

    #[test]
    fn test_max_just_past_chunk_boundary() {
        let windows = plan(1, 100_000, 100_001);
        assert_eq!(windows, vec![window(1, 100_001), window(100_001, 100_002)]);
    }

    #[test]
    fn test_small_chunks() {
        let windows = plan(1, 100, 400);
        assert_eq!(
            windows,
            vec![
                window(1, 101),
                window(101, 201),
                window(201, 301),
                window(301, 401),
            ]
        );
    }

    #[test]
    fn test_closing_includes_max_id() {
        let windows = plan(1, 100, 250);
        let last = windows.last().unwrap();
        assert_eq!(last.end, 251);
    }

    #[test]
    fn test_display_is_half_open() {
        assert_eq!(window(1, 101).to_string(), "[1, 101)");
    }
}
