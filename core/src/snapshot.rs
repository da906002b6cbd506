//! Flat JSON snapshot used to persist boards.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{EntityKind, TileKind, MAX_BOARD_DIMENSION};

/// Serializable copy of a board: the on-disk board file format.
///
/// ```json
/// { "rows": 2, "cols": 2,
///   "tiles": [["empty", "wall"], ["spawn", "empty"]],
///   "entities": [{ "type": "player", "r": 1, "c": 1 }] }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Number of rows on the board.
    pub rows: u32,
    /// Number of columns on the board.
    pub cols: u32,
    /// Tile layer, one inner vector per row.
    pub tiles: Vec<Vec<TileKind>>,
    /// Entities in board order.
    pub entities: Vec<EntityRecord>,
}

/// Entity entry stored in a board snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Kind of entity.
    #[serde(rename = "type")]
    pub kind: EntityKind,
    /// Zero-based row of the entity.
    #[serde(rename = "r")]
    pub row: u32,
    /// Zero-based column of the entity.
    #[serde(rename = "c")]
    pub column: u32,
}

impl BoardSnapshot {
    /// Parses a board file, checking the top-level shape before reading elements.
    ///
    /// `rows` and `cols` must be numbers and `tiles` and `entities` arrays;
    /// anything else is reported before inner elements are inspected.
    pub fn from_json_str(input: &str) -> Result<Self, SnapshotError> {
        let value: Value = serde_json::from_str(input).map_err(SnapshotError::Syntax)?;
        Self::from_json_value(value)
    }

    /// Same as [`BoardSnapshot::from_json_str`] for an already parsed document.
    pub fn from_json_value(value: Value) -> Result<Self, SnapshotError> {
        let Value::Object(mut object) = value else {
            return Err(SnapshotError::NotAnObject);
        };

        let rows = dimension_field(&object, "rows")?;
        let cols = dimension_field(&object, "cols")?;
        let tiles = array_field(&mut object, "tiles")?;
        let entities = array_field(&mut object, "entities")?;

        let tiles = tiles
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                serde_json::from_value::<Vec<TileKind>>(row).map_err(|source| {
                    SnapshotError::Element {
                        field: "tiles",
                        index,
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let entities = entities
            .into_iter()
            .enumerate()
            .map(|(index, entity)| {
                serde_json::from_value::<EntityRecord>(entity).map_err(|source| {
                    SnapshotError::Element {
                        field: "entities",
                        index,
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rows,
            cols,
            tiles,
            entities,
        })
    }

    /// Encodes the snapshot as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn dimension_field(object: &Map<String, Value>, field: &'static str) -> Result<u32, SnapshotError> {
    let value = object
        .get(field)
        .filter(|value| value.is_number())
        .ok_or(SnapshotError::InvalidField {
            field,
            expected: "a number",
        })?;

    value
        .as_u64()
        .and_then(|number| u32::try_from(number).ok())
        .filter(|number| (1..=MAX_BOARD_DIMENSION).contains(number))
        .ok_or_else(|| SnapshotError::Dimension {
            field,
            found: value.to_string(),
            max: MAX_BOARD_DIMENSION,
        })
}

fn array_field(object: &mut Map<String, Value>, field: &'static str) -> Result<Vec<Value>, SnapshotError> {
    match object.remove(field) {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(SnapshotError::InvalidField {
            field,
            expected: "an array",
        }),
    }
}

/// Reasons a board file is rejected as an invalid board format.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The input is not valid JSON.
    #[error("failed to parse board JSON: {0}")]
    Syntax(#[source] serde_json::Error),
    /// The document is not a JSON object.
    #[error("invalid board JSON: expected an object at the top level")]
    NotAnObject,
    /// A top-level field is missing or has the wrong JSON type.
    #[error("invalid board JSON: `{field}` must be {expected}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// Description of the expected JSON type.
        expected: &'static str,
    },
    /// A dimension is not a whole number in the supported range.
    #[error("invalid board JSON: `{field}` must be a whole number from 1 to {max}, found {found}")]
    Dimension {
        /// Name of the offending field.
        field: &'static str,
        /// Offending value as written in the document.
        found: String,
        /// Largest accepted dimension.
        max: u32,
    },
    /// An element of `tiles` or `entities` could not be read.
    #[error("invalid board JSON: {field}[{index}] could not be read: {source}")]
    Element {
        /// Array holding the element.
        field: &'static str,
        /// Position of the element in the array.
        index: usize,
        /// Underlying decoding failure.
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_dimension_is_rejected_as_invalid_field() {
        let error = BoardSnapshot::from_json_str(r#"{"rows":"x"}"#).expect_err("must fail");
        assert!(
            matches!(error, SnapshotError::InvalidField { field: "rows", .. }),
            "unexpected error: {error}"
        );
    }

    #[test]
    fn non_array_entities_are_rejected() {
        let error =
            BoardSnapshot::from_json_str(r#"{"rows":1,"cols":1,"tiles":[["empty"]],"entities":{}}"#)
                .expect_err("must fail");
        assert!(matches!(
            error,
            SnapshotError::InvalidField {
                field: "entities",
                ..
            }
        ));
    }

    #[test]
    fn garbage_input_is_a_syntax_error() {
        let error = BoardSnapshot::from_json_str("not json").expect_err("must fail");
        assert!(matches!(error, SnapshotError::Syntax(_)));
    }

    #[test]
    fn zero_and_fractional_dimensions_are_rejected() {
        for input in [
            r#"{"rows":0,"cols":3,"tiles":[],"entities":[]}"#,
            r#"{"rows":2.5,"cols":3,"tiles":[],"entities":[]}"#,
            r#"{"rows":2,"cols":-3,"tiles":[],"entities":[]}"#,
        ] {
            let error = BoardSnapshot::from_json_str(input).expect_err("must fail");
            assert!(
                matches!(error, SnapshotError::Dimension { .. }),
                "{input} produced {error}"
            );
        }
    }

    #[test]
    fn unknown_tile_names_report_their_row() {
        let error = BoardSnapshot::from_json_str(
            r#"{"rows":2,"cols":1,"tiles":[["empty"],["lava"]],"entities":[]}"#,
        )
        .expect_err("must fail");
        assert!(matches!(
            error,
            SnapshotError::Element {
                field: "tiles",
                index: 1,
                ..
            }
        ));
    }

    #[test]
    fn negative_entity_coordinates_are_rejected() {
        let error = BoardSnapshot::from_json_str(
            r#"{"rows":1,"cols":1,"tiles":[["empty"]],"entities":[{"type":"enemy","r":-1,"c":0}]}"#,
        )
        .expect_err("must fail");
        assert!(matches!(
            error,
            SnapshotError::Element {
                field: "entities",
                index: 0,
                ..
            }
        ));
    }

    #[test]
    fn parses_documented_file_format() {
        let snapshot = BoardSnapshot::from_json_str(
            r#"{
                "rows": 2,
                "cols": 2,
                "tiles": [["empty", "wall"], ["spawn", "enterPortal"]],
                "entities": [{ "type": "player", "r": 1, "c": 0 }]
            }"#,
        )
        .expect("valid board");

        assert_eq!(snapshot.rows, 2);
        assert_eq!(snapshot.tiles[1][1], TileKind::EnterPortal);
        assert_eq!(
            snapshot.entities,
            vec![EntityRecord {
                kind: EntityKind::Player,
                row: 1,
                column: 0,
            }]
        );
    }

    #[test]
    fn export_uses_file_field_names() {
        let snapshot = BoardSnapshot {
            rows: 1,
            cols: 1,
            tiles: vec![vec![TileKind::ExitPortal]],
            entities: vec![EntityRecord {
                kind: EntityKind::SmallDot,
                row: 0,
                column: 0,
            }],
        };
        let json = snapshot.to_json_pretty().expect("encode");
        let value: Value = serde_json::from_str(&json).expect("decode");
        assert_eq!(value["tiles"][0][0], "exitPortal");
        assert_eq!(value["entities"][0]["type"], "smallDot");
        assert_eq!(value["entities"][0]["r"], 0);
        assert_eq!(value["entities"][0]["c"], 0);
    }
}
