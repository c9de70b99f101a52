// src/resolver.rs

use regex::{Regex, RegexBuilder};
use tracing::{debug, trace};

use crate::error::{GeocoderError, Result};
use crate::table::Cell;

/// Header label for the address column, compiled once as a
/// case-insensitive pattern. Matches anywhere inside a cell.
#[derive(Debug, Clone)]
pub struct AddressLabel {
    label: String,
    pattern: Regex,
}

impl AddressLabel {
    pub fn new(label: impl Into<String>) -> Result<Self> {
        let label = label.into();
        let pattern = RegexBuilder::new(&label)
            .case_insensitive(true)
            .build()
            .map_err(|source| GeocoderError::InvalidAddressLabel {
                label: label.clone(),
                source,
            })?;
        Ok(Self { label, pattern })
    }

    pub fn as_str(&self) -> &str {
        &self.label
    }

    pub fn matches(&self, cell: &str) -> bool {
        self.pattern.is_match(cell)
    }
}

/// Index of the first header cell matching `label`, scanning left to right.
pub fn resolve(header: &[Cell], label: &AddressLabel) -> Option<usize> {
    let idx = header.iter().position(|cell| {
        let hit = cell.as_deref().is_some_and(|c| label.matches(c));
        trace!(cell = ?cell, hit, "header cell");
        hit
    });
    debug!(label = label.as_str(), index = ?idx, "resolved address column");
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(cells: &[&str]) -> Vec<Cell> {
        cells.iter().map(|c| Some(c.to_string())).collect()
    }

    #[test]
    fn matches_case_insensitively() {
        let label = AddressLabel::new("Address").unwrap();
        assert_eq!(resolve(&header(&["name", "ADDRESS"]), &label), Some(1));
    }

    #[test]
    fn substring_match_not_equality() {
        let label = AddressLabel::new("address").unwrap();
        assert_eq!(
            resolve(&header(&["Name", "Street Address 1"]), &label),
            Some(1)
        );
    }

    #[test]
    fn first_match_wins() {
        let label = AddressLabel::new("address").unwrap();
        let h = header(&["Id", "Mailing Address", "Billing Address"]);
        assert_eq!(resolve(&h, &label), Some(1));
    }

    #[test]
    fn label_is_a_pattern() {
        let label = AddressLabel::new("^(addr|location)$").unwrap();
        assert_eq!(resolve(&header(&["Address", "Location"]), &label), Some(1));
    }

    #[test]
    fn no_match_is_none() {
        let label = AddressLabel::new("Location").unwrap();
        assert_eq!(resolve(&header(&["Name", "Address"]), &label), None);
        assert_eq!(resolve(&[], &label), None);
    }

    #[test]
    fn absent_cells_never_match() {
        let label = AddressLabel::new("").unwrap();
        assert_eq!(resolve(&[None, Some(String::new())], &label), Some(1));
    }

    #[test]
    fn bad_pattern_is_rejected() {
        let err = AddressLabel::new("Address(").unwrap_err();
        assert!(matches!(err, GeocoderError::InvalidAddressLabel { .. }));
    }
}
