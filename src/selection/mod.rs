//! Selection model for the location picker.
//!
//! A [`Selection`] captures "what is currently picked": an optional
//! coordinate, an optional human-readable place name, and the provenance of
//! the pick. It exists only while a picker session is open and is discarded
//! on close. All mutation happens through the methods below; the rendered
//! view is a pure projection of this state.

use crate::coord::Coordinate;

/// Which interaction path produced the current selection.
///
/// Used to decide whether a later background name resolution should apply:
/// a reverse-geocoded name is only relevant while the pick still originates
/// from a map click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Nothing picked yet.
    None,
    /// Pin placed by clicking the map (name unknown until resolved).
    MapClick,
    /// Search result chosen (name already known).
    SearchPick,
}

/// The currently picked location, scoped to one picker session.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    coordinate: Option<Coordinate>,
    display_name: Option<String>,
    provenance: Provenance,
}

impl Selection {
    /// An empty selection, as created when the picker opens without a seed.
    pub fn empty() -> Self {
        Self {
            coordinate: None,
            display_name: None,
            provenance: Provenance::None,
        }
    }

    /// A selection seeded from a host-supplied coordinate.
    ///
    /// Seeds behave like a map click: the coordinate is set, no name is
    /// known yet, and a later reverse-geocode resolution may supply one.
    pub fn seeded(coordinate: Coordinate) -> Self {
        Self {
            coordinate: Some(coordinate),
            display_name: None,
            provenance: Provenance::MapClick,
        }
    }

    /// The picked coordinate, if any.
    pub fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }

    /// The resolved place name, if any.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// The interaction path that produced the current pick.
    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Places a pin via map click.
    ///
    /// Sets the coordinate, clears any previously known name (the new spot
    /// has not been resolved yet), and marks the pick as map-click derived.
    pub fn place_pin(&mut self, coordinate: Coordinate) {
        self.coordinate = Some(coordinate);
        self.display_name = None;
        self.provenance = Provenance::MapClick;
    }

    /// Applies a chosen search result, which carries its own name.
    pub fn apply_search_pick(&mut self, coordinate: Coordinate, display_name: String) {
        self.coordinate = Some(coordinate);
        self.display_name = Some(display_name);
        self.provenance = Provenance::SearchPick;
    }

    /// Applies a name resolved by a background reverse lookup.
    ///
    /// Only takes effect while the pick is still map-click derived; a search
    /// pick made in the meantime already carries a name and must not be
    /// overwritten by a stale lookup. Returns whether the name was applied.
    pub fn apply_resolved_name(&mut self, display_name: String) -> bool {
        if self.provenance != Provenance::MapClick {
            return false;
        }
        self.display_name = Some(display_name);
        true
    }

    /// The name handed to the host at save time.
    ///
    /// Falls back to the fixed-precision coordinate label when no place name
    /// was ever resolved. Returns `None` without a coordinate (save is not
    /// permitted in that state).
    pub fn save_label(&self) -> Option<String> {
        let coordinate = self.coordinate?;
        Some(
            self.display_name
                .clone()
                .unwrap_or_else(|| coordinate.label()),
        )
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_has_nothing() {
        let selection = Selection::empty();
        assert!(selection.coordinate().is_none());
        assert!(selection.display_name().is_none());
        assert_eq!(selection.provenance(), Provenance::None);
        assert!(selection.save_label().is_none());
    }

    #[test]
    fn seeded_selection_is_map_click_derived() {
        let selection = Selection::seeded(Coordinate::new(40.0, -75.0));
        assert_eq!(selection.coordinate(), Some(Coordinate::new(40.0, -75.0)));
        assert!(selection.display_name().is_none());
        assert_eq!(selection.provenance(), Provenance::MapClick);
    }

    #[test]
    fn place_pin_clears_previous_name() {
        let mut selection = Selection::empty();
        selection.apply_search_pick(Coordinate::new(48.85, 2.35), "Paris".to_string());
        selection.place_pin(Coordinate::new(40.0, -75.0));

        assert_eq!(selection.coordinate(), Some(Coordinate::new(40.0, -75.0)));
        assert!(selection.display_name().is_none());
        assert_eq!(selection.provenance(), Provenance::MapClick);
    }

    #[test]
    fn resolved_name_applies_to_map_click() {
        let mut selection = Selection::empty();
        selection.place_pin(Coordinate::new(40.0, -75.0));

        assert!(selection.apply_resolved_name("Philadelphia".to_string()));
        assert_eq!(selection.display_name(), Some("Philadelphia"));
        assert_eq!(selection.provenance(), Provenance::MapClick);
    }

    #[test]
    fn resolved_name_ignored_after_search_pick() {
        let mut selection = Selection::empty();
        selection.place_pin(Coordinate::new(40.0, -75.0));
        selection.apply_search_pick(Coordinate::new(48.85, 2.35), "Paris".to_string());

        assert!(!selection.apply_resolved_name("Philadelphia".to_string()));
        assert_eq!(selection.display_name(), Some("Paris"));
    }

    #[test]
    fn resolved_name_ignored_without_pick() {
        let mut selection = Selection::empty();
        assert!(!selection.apply_resolved_name("Nowhere".to_string()));
        assert!(selection.display_name().is_none());
    }

    #[test]
    fn save_label_prefers_resolved_name() {
        let mut selection = Selection::empty();
        selection.place_pin(Coordinate::new(12.345678, -98.765432));
        selection.apply_resolved_name("Somewhere".to_string());
        assert_eq!(selection.save_label(), Some("Somewhere".to_string()));
    }

    #[test]
    fn save_label_falls_back_to_coordinate_label() {
        let mut selection = Selection::empty();
        selection.place_pin(Coordinate::new(12.345678, -98.765432));
        assert_eq!(selection.save_label(), Some("12.3457, -98.7654".to_string()));
    }
}
