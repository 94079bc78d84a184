//! Header regeneration policy.
//!
//! Rebuilding the header row drops the focused filter input, so the table
//! only regenerates it when the visible column count actually changed or the
//! configuration was edited (the force flag).

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderPolicy {
    rendered_columns: Option<usize>,
}

impl HeaderPolicy {
    /// Decide whether the header must be rebuilt for `column_count` visible
    /// columns. Records the count when it answers yes.
    pub fn should_regenerate(&mut self, column_count: usize, force: bool) -> bool {
        let regenerate = force || self.rendered_columns != Some(column_count);
        if regenerate {
            self.rendered_columns = Some(column_count);
        }
        regenerate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_render_always_generates() {
        let mut policy = HeaderPolicy::default();
        assert!(policy.should_regenerate(5, false));
    }

    #[test]
    fn same_column_count_skips_regeneration() {
        let mut policy = HeaderPolicy::default();
        assert!(policy.should_regenerate(5, false));
        assert!(!policy.should_regenerate(5, false));
        assert!(!policy.should_regenerate(5, false));
    }

    #[test]
    fn column_count_change_regenerates() {
        let mut policy = HeaderPolicy::default();
        assert!(policy.should_regenerate(5, false));
        assert!(policy.should_regenerate(6, false));
        assert!(!policy.should_regenerate(6, false));
    }

    #[test]
    fn force_overrides_the_count_check() {
        let mut policy = HeaderPolicy::default();
        assert!(policy.should_regenerate(5, false));
        assert!(policy.should_regenerate(5, true));
        assert!(!policy.should_regenerate(5, false));
    }
}
