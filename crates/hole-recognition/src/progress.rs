/// Receives cosmetic progress updates while faces are scanned.
pub trait ProgressSink {
    /// Called before face `index` (zero-based) of `total` is scanned.
    fn scanning_face(&mut self, index: usize, total: usize);
}

/// Discards progress updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn scanning_face(&mut self, _index: usize, _total: usize) {}
}

/// Whole-number percentage complete before face `index` of `total`.
pub fn percent_complete(index: usize, total: usize) -> usize {
    if total == 0 {
        return 100;
    }
    index * 100 / total
}

/// Title shown while face `index` of `total` is scanned.
pub fn scanning_title(index: usize, total: usize) -> String {
    format!("Scanning face {} of {}", index + 1, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent_complete(0, 3), 0);
        assert_eq!(percent_complete(1, 3), 33);
        assert_eq!(percent_complete(2, 3), 66);
        assert_eq!(percent_complete(0, 0), 100);
    }

    #[test]
    fn test_title_is_one_based() {
        assert_eq!(scanning_title(0, 4), "Scanning face 1 of 4");
    }
}
