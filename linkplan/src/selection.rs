use crate::TowerId;

/// Towers picked, in order, while pairing them into a link.
///
/// Holds at most two towers.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection(Vec<TowerId>);

/// What a [`Selection::toggle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Selected,
    Deselected,
    /// The selection is now full with this pair, in selection order.
    Pair(TowerId, TowerId),
}

impl Selection {
    /// Adds `tower` if absent, removes it if present.
    ///
    /// Toggling a third tower into a full selection starts over with
    /// just that tower.
    pub fn toggle(&mut self, tower: TowerId) -> Toggle {
        if let Some(idx) = self.0.iter().position(|&t| t == tower) {
            self.0.remove(idx);
            return Toggle::Deselected;
        }
        if self.0.len() >= 2 {
            self.0.clear();
        }
        self.0.push(tower);
        match self.0[..] {
            [a, b] => Toggle::Pair(a, b),
            _ => Toggle::Selected,
        }
    }

    /// Drops `tower` if selected.
    pub fn remove(&mut self, tower: TowerId) -> bool {
        let before = self.0.len();
        self.0.retain(|&t| t != tower);
        before != self.0.len()
    }

    /// Empties the selection, returning what was in it.
    pub fn clear(&mut self) -> Vec<TowerId> {
        std::mem::take(&mut self.0)
    }

    pub fn as_slice(&self) -> &[TowerId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Selection, Toggle};
    use crate::TowerId;

    #[test]
    fn test_toggle() {
        let mut selection = Selection::default();
        assert_eq!(selection.toggle(TowerId(1)), Toggle::Selected);
        assert_eq!(selection.toggle(TowerId(1)), Toggle::Deselected);
        assert!(selection.is_empty());
        assert_eq!(selection.toggle(TowerId(2)), Toggle::Selected);
        assert_eq!(
            selection.toggle(TowerId(1)),
            Toggle::Pair(TowerId(2), TowerId(1))
        );
        assert_eq!(selection.as_slice(), [TowerId(2), TowerId(1)]);
    }

    #[test]
    fn test_full_selection_starts_over() {
        let mut selection = Selection::default();
        selection.toggle(TowerId(1));
        selection.toggle(TowerId(2));
        assert_eq!(selection.toggle(TowerId(3)), Toggle::Selected);
        assert_eq!(selection.as_slice(), [TowerId(3)]);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut selection = Selection::default();
        selection.toggle(TowerId(1));
        assert!(!selection.remove(TowerId(5)));
        assert!(selection.remove(TowerId(1)));
        selection.toggle(TowerId(3));
        assert_eq!(selection.clear(), [TowerId(3)]);
        assert_eq!(selection.len(), 0);
    }
}
