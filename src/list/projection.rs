//! Render Projection
//!
//! A finite, non-restartable, read-only view of the loaded items in
//! ascending index order. Purely a projection of the window; presentation
//! is the host's concern.

use crate::domain::ListItem;

/// Snapshot of the loaded window, consumed once in index order
#[derive(Debug)]
pub struct RenderProjection {
    rows: std::vec::IntoIter<(usize, ListItem)>,
}

impl RenderProjection {
    pub(crate) fn new(rows: Vec<(usize, ListItem)>) -> Self {
        Self {
            rows: rows.into_iter(),
        }
    }

    /// Number of rows remaining in the projection
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the projection has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.len() == 0
    }

    /// Consume the projection with indices attached
    pub fn with_indices(self) -> impl Iterator<Item = (usize, ListItem)> {
        self.rows
    }
}

impl Iterator for RenderProjection {
    type Item = ListItem;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next().map(|(_, item)| item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_yields_rows_once() {
        let mut projection = RenderProjection::new(vec![
            (0, ListItem::bare("a")),
            (1, ListItem::bare("b")),
        ]);

        assert_eq!(projection.len(), 2);
        assert_eq!(projection.next().map(|i| i.id.as_str().to_string()), Some("a".into()));
        assert_eq!(projection.next().map(|i| i.id.as_str().to_string()), Some("b".into()));
        assert!(projection.next().is_none());
    }
}
