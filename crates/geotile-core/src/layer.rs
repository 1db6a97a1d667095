//! Static layer definitions.
//!
//! A tile is the concatenation of one encoded fragment per layer. The
//! order of the layers in a [`LayerSet`] fixes both the order of the
//! `UNION ALL` branches in the compiled statement and the order fragments
//! are concatenated in, so the set is immutable once built.

use std::collections::BTreeSet;

use crate::error::TileError;

/// Default geometry column name in the source tables.
pub const DEFAULT_GEOMETRY_COLUMN: &str = "geom";

/// A named data layer and the relational source that feeds it.
///
/// The geometry column is kept separate from the attribute columns so
/// the query compiler can wrap it in the tessellation call itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerDefinition {
    /// Layer name written into the encoded fragment.
    pub name: String,
    /// Attribute column expressions, each already aliased.
    pub columns: Vec<String>,
    /// `FROM` clause body (table plus any joins).
    pub from: String,
    /// Geometry column passed to the tessellation call.
    pub geometry_column: String,
}

impl LayerDefinition {
    /// Create a layer over `from` using the default geometry column.
    pub fn new(name: &str, columns: &[&str], from: &str) -> Self {
        Self {
            name: name.to_owned(),
            columns: columns.iter().map(|c| (*c).to_owned()).collect(),
            from: from.to_owned(),
            geometry_column: DEFAULT_GEOMETRY_COLUMN.to_owned(),
        }
    }

    /// Override the geometry column.
    #[must_use]
    pub fn with_geometry_column(mut self, column: &str) -> Self {
        column.clone_into(&mut self.geometry_column);
        self
    }
}

/// Political regions layer.
pub fn political_layer() -> LayerDefinition {
    LayerDefinition::new(
        "political",
        &[
            "gid AS __id__",
            "'political' AS type",
            "name AS title",
            "iso_a2 AS iso_a2",
        ],
        "political",
    )
}

/// Exclusive economic zones layer.
///
/// Territory codes are ISO 3166 alpha-3 in the source table and are
/// mapped back to alpha-2 through `iso_map`.
pub fn eez_layer() -> LayerDefinition {
    LayerDefinition::new(
        "eez",
        &[
            "eez.gid AS __id__",
            "'eez' AS type",
            "geoname AS title",
            "CONCAT(iso_map1.iso2, iso_map2.iso2, iso_map3.iso2) AS iso_a2",
        ],
        "eez \
         LEFT OUTER JOIN iso_map iso_map1 ON eez.iso_ter1 = iso_map1.iso3 \
         LEFT OUTER JOIN iso_map iso_map2 ON eez.iso_ter2 = iso_map2.iso3 \
         LEFT OUTER JOIN iso_map iso_map3 ON eez.iso_ter3 = iso_map3.iso3",
    )
    .with_geometry_column("eez.geom")
}

/// An ordered, non-empty list of layers with unique names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerSet {
    layers: Vec<LayerDefinition>,
}

impl LayerSet {
    /// Validate and wrap a list of layers.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::InvalidLayerSet`] if the list is empty or two
    /// layers share a name.
    pub fn new(layers: Vec<LayerDefinition>) -> Result<Self, TileError> {
        if layers.is_empty() {
            return Err(TileError::InvalidLayerSet(String::from(
                "at least one layer is required",
            )));
        }

        let mut seen = BTreeSet::new();
        for layer in &layers {
            if !seen.insert(layer.name.as_str()) {
                return Err(TileError::InvalidLayerSet(format!(
                    "duplicate layer name '{}'",
                    layer.name
                )));
            }
        }

        Ok(Self { layers })
    }

    /// The layers served by default: political regions, then EEZs.
    pub fn reference() -> Self {
        Self {
            layers: vec![political_layer(), eez_layer()],
        }
    }

    /// Iterate layers in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &LayerDefinition> {
        self.layers.iter()
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Always `false`; a layer set cannot be empty.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layer names in declaration order.
    pub fn names(&self) -> Vec<String> {
        self.layers.iter().map(|l| l.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_set_is_political_then_eez() {
        let set = LayerSet::reference();
        assert_eq!(set.names(), vec!["political", "eez"]);
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
    }

    #[test]
    fn reference_set_passes_validation() {
        let layers: Vec<_> = LayerSet::reference().iter().cloned().collect();
        assert!(LayerSet::new(layers).is_ok());
    }

    #[test]
    fn empty_set_is_rejected() {
        assert!(matches!(
            LayerSet::new(Vec::new()),
            Err(TileError::InvalidLayerSet(_))
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result = LayerSet::new(vec![political_layer(), political_layer()]);
        assert!(matches!(
            result,
            Err(TileError::InvalidLayerSet(msg)) if msg.contains("political")
        ));
    }

    #[test]
    fn eez_joins_iso_map_three_times() {
        let eez = eez_layer();
        assert_eq!(eez.from.matches("LEFT OUTER JOIN iso_map").count(), 3);
        assert_eq!(eez.geometry_column, "eez.geom");
    }
}
