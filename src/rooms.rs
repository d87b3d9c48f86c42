// Room identifier expansion.
//
// Turns the compact room descriptions accepted on the command line into the
// flat list of room numbers that gets sent to the bulk-generate endpoint.
// Everything in here is pure string work; the only I/O is reading a rooms
// file.
//
// Supported sources, collected in this order:
// - explicit room numbers (`--rooms`)
// - a text file with one room per line (`--rooms-file`)
// - a layout string such as `01:01-20;02:01-20;P:1-2` (`--layout`)
// - a whole building described by floor/room ranges and occupancy
//   (`--building`)

use std::collections::HashSet;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

pub const DEFAULT_FLOOR_RANGE: &str = "00-11";
pub const DEFAULT_ROOM_RANGE: &str = "00-09";
pub const DEFAULT_DOUBLE_OCCUPANCY_ROOMS: &str = "00,01,04,05,08,09";
pub const DEFAULT_OCCUPANT_PADDING: usize = 2;

/// Errors raised while turning room descriptions into room numbers. All of
/// them are caused by user input.
#[derive(Debug, Error)]
pub enum RoomSpecError {
    #[error("{0}")]
    InvalidFormat(String),

    #[error("Invalid number '{token}': {source}")]
    InvalidNumber {
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Failed to read rooms file {}: {source}", .path.display())]
    RoomsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No room numbers were provided. Use --rooms, --rooms-file, --layout, or --building.")]
    NoRoomsProvided,
}

/// Parameters for expanding a whole building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildingSpec {
    pub floor_range: String,
    pub room_range: String,
    pub double_rooms: String,
    pub occupant_padding: usize,
}

impl Default for BuildingSpec {
    fn default() -> Self {
        Self {
            floor_range: DEFAULT_FLOOR_RANGE.to_string(),
            room_range: DEFAULT_ROOM_RANGE.to_string(),
            double_rooms: DEFAULT_DOUBLE_OCCUPANCY_ROOMS.to_string(),
            occupant_padding: DEFAULT_OCCUPANT_PADDING,
        }
    }
}

impl BuildingSpec {
    pub fn expand(&self) -> Result<Vec<String>, RoomSpecError> {
        generate_building_rooms(
            &self.floor_range,
            &self.room_range,
            &self.double_rooms,
            self.occupant_padding,
        )
    }
}

/// Every place room numbers can come from. Unset sources are skipped.
#[derive(Debug, Clone, Default)]
pub struct RoomSources {
    pub rooms: Vec<String>,
    pub rooms_file: Option<PathBuf>,
    pub layout: Option<String>,
    pub building: Option<BuildingSpec>,
}

fn parse_number(token: &str) -> Result<i64, RoomSpecError> {
    token.parse().map_err(|source| RoomSpecError::InvalidNumber {
        token: token.to_string(),
        source,
    })
}

/// Inclusive range walking up or down depending on the endpoint order.
fn inclusive_range(start: i64, end: i64) -> Vec<i64> {
    if end >= start {
        (start..=end).collect()
    } else {
        (end..=start).rev().collect()
    }
}

/// Read room numbers from a text file, one per line. Blank lines and lines
/// starting with `#` are ignored.
pub fn read_rooms_from_file(path: &Path) -> Result<Vec<String>, RoomSpecError> {
    let contents = std::fs::read_to_string(path).map_err(|source| RoomSpecError::RoomsFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

/// Expand a layout string into room numbers.
///
/// Blocks are separated by `;` and look like `floor:units`, where `units`
/// is a comma-separated list of literal suffixes or numeric `start-end`
/// ranges. Range values are zero-padded to the wider endpoint, so
/// `01:01-03` yields `0101`, `0102`, `0103` and `P:1-2` yields `P1`, `P2`.
pub fn expand_layout(spec: &str) -> Result<Vec<String>, RoomSpecError> {
    let mut rooms = Vec::new();
    for block in spec.split(';').map(str::trim).filter(|b| !b.is_empty()) {
        let (floor, units) = block
            .split_once(':')
            .ok_or_else(|| RoomSpecError::InvalidFormat(format!("Invalid layout block: '{block}'")))?;
        let floor = floor.trim();
        if floor.is_empty() {
            return Err(RoomSpecError::InvalidFormat(format!(
                "Invalid floor prefix in block: '{block}'"
            )));
        }

        for part in units.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let Some((start, end)) = part.split_once('-') else {
                rooms.push(format!("{floor}{part}"));
                continue;
            };
            let (start, end) = (start.trim(), end.trim());
            if start.is_empty() || end.is_empty() {
                return Err(RoomSpecError::InvalidFormat(format!(
                    "Invalid range '{part}' in block '{block}'"
                )));
            }
            let width = start.len().max(end.len());
            for value in inclusive_range(parse_number(start)?, parse_number(end)?) {
                rooms.push(format!("{floor}{value:0width$}"));
            }
        }
    }
    Ok(rooms)
}

/// Parse either a single integer or an inclusive `start-end` range.
///
/// Returns the values in walking order together with the display width,
/// which is the longest input token (at least 1).
pub fn parse_numeric_range(spec: &str) -> Result<(Vec<i64>, usize), RoomSpecError> {
    let cleaned = spec.trim();
    if cleaned.is_empty() {
        return Err(RoomSpecError::InvalidFormat(
            "Numeric range cannot be empty.".to_string(),
        ));
    }

    let Some((start, end)) = cleaned.split_once('-') else {
        return Ok((vec![parse_number(cleaned)?], cleaned.len().max(1)));
    };
    let (start, end) = (start.trim(), end.trim());
    if start.is_empty() || end.is_empty() {
        return Err(RoomSpecError::InvalidFormat(format!(
            "Invalid numeric range: '{spec}'"
        )));
    }
    let values = inclusive_range(parse_number(start)?, parse_number(end)?);
    Ok((values, start.len().max(end.len()).max(1)))
}

/// Parse the comma-separated list of rooms that host two residents.
pub fn parse_double_rooms(spec: &str) -> Result<HashSet<i64>, RoomSpecError> {
    spec.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_number)
        .collect()
}

/// Generate `floor-room-occupant` identifiers for a whole building.
///
/// Rooms listed in `double_spec` get occupants 1 and 2, every other room
/// only occupant 1. Each field is padded independently.
pub fn generate_building_rooms(
    floor_spec: &str,
    room_spec: &str,
    double_spec: &str,
    occupant_padding: usize,
) -> Result<Vec<String>, RoomSpecError> {
    let (floors, floor_width) = parse_numeric_range(floor_spec)?;
    let (rooms, room_width) = parse_numeric_range(room_spec)?;
    let doubles = parse_double_rooms(double_spec)?;

    let mut generated = Vec::new();
    for floor in &floors {
        for room in &rooms {
            let occupants = if doubles.contains(room) { 2 } else { 1 };
            for index in 1..=occupants {
                generated.push(format!(
                    "{floor:0floor_width$}-{room:0room_width$}-{index:0occupant_padding$}"
                ));
            }
        }
    }
    Ok(generated)
}

/// Gather rooms from every requested source, trim them, drop blanks and
/// duplicates (first occurrence wins).
pub fn collect_rooms(sources: &RoomSources) -> Result<Vec<String>, RoomSpecError> {
    let mut rooms = sources.rooms.clone();
    if let Some(path) = &sources.rooms_file {
        let from_file = read_rooms_from_file(path)?;
        debug!(path = %path.display(), count = from_file.len(), "read rooms file");
        rooms.extend(from_file);
    }
    if let Some(layout) = &sources.layout {
        let expanded = expand_layout(layout)?;
        debug!(count = expanded.len(), "expanded layout");
        rooms.extend(expanded);
    }
    if let Some(building) = &sources.building {
        let expanded = building.expand()?;
        debug!(count = expanded.len(), "expanded building");
        rooms.extend(expanded);
    }

    let mut seen = HashSet::new();
    let deduplicated: Vec<String> = rooms
        .iter()
        .map(|room| room.trim())
        .filter(|room| !room.is_empty())
        .filter(|room| seen.insert(*room))
        .map(String::from)
        .collect();

    if deduplicated.is_empty() {
        return Err(RoomSpecError::NoRoomsProvided);
    }
    Ok(deduplicated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("01:01-03", &["0101", "0102", "0103"])]
    #[case("P:1-2", &["P1", "P2"])]
    #[case("02:03-01", &["0203", "0202", "0201"])]
    #[case("01:1-10", &["0101", "0102", "0103", "0104", "0105", "0106", "0107", "0108", "0109", "0110"])]
    #[case("EG:A,B", &["EGA", "EGB"])]
    #[case(" 01 : 01 , 05 ;; P:1 ", &["0101", "0105", "P1"])]
    #[case("01:01 - 03", &["0101", "0102", "0103"])]
    fn layout_expands(#[case] spec: &str, #[case] expected: &[&str]) {
        assert_eq!(expand_layout(spec).unwrap(), expected);
    }

    #[test]
    fn layout_keeps_block_order() {
        let rooms = expand_layout("02:01-02;01:01").unwrap();
        assert_eq!(rooms, vec!["0201", "0202", "0101"]);
    }

    #[rstest]
    #[case("0101")]
    #[case(":01-03")]
    #[case("01:01-")]
    #[case("01:-03")]
    fn layout_rejects_malformed_blocks(#[case] spec: &str) {
        assert!(matches!(
            expand_layout(spec),
            Err(RoomSpecError::InvalidFormat(_))
        ));
    }

    #[test]
    fn layout_rejects_non_numeric_range() {
        let err = expand_layout("01:a-c").unwrap_err();
        assert!(matches!(err, RoomSpecError::InvalidNumber { ref token, .. } if token == "a"));
    }

    #[test]
    fn empty_layout_is_empty() {
        assert!(expand_layout(" ; ").unwrap().is_empty());
    }

    #[rstest]
    #[case("05-03", vec![5, 4, 3], 2)]
    #[case("00-11", (0..=11).collect(), 2)]
    #[case("7", vec![7], 1)]
    #[case("007", vec![7], 3)]
    #[case("1-100", (1..=100).collect(), 3)]
    #[case("01 - 03", vec![1, 2, 3], 2)]
    fn numeric_ranges(#[case] spec: &str, #[case] values: Vec<i64>, #[case] width: usize) {
        assert_eq!(parse_numeric_range(spec).unwrap(), (values, width));
    }

    #[rstest]
    #[case("")]
    #[case("  ")]
    #[case("-3")]
    #[case("3-")]
    fn numeric_range_rejects_missing_endpoints(#[case] spec: &str) {
        assert!(matches!(
            parse_numeric_range(spec),
            Err(RoomSpecError::InvalidFormat(_))
        ));
    }

    #[test]
    fn double_rooms_skip_blanks() {
        let doubles = parse_double_rooms("00, 04,,9").unwrap();
        assert_eq!(doubles, HashSet::from([0, 4, 9]));
    }

    #[test]
    fn double_rooms_reject_garbage() {
        assert!(parse_double_rooms("01,x").is_err());
    }

    #[test]
    fn building_rooms_respect_occupancy() {
        let rooms = generate_building_rooms("00-01", "00-01", "00", 2).unwrap();
        assert_eq!(
            rooms,
            vec![
                "00-00-01", "00-00-02", "00-01-01", "01-00-01", "01-00-02", "01-01-01",
            ]
        );
    }

    #[test]
    fn building_occupant_padding_is_independent() {
        let rooms = generate_building_rooms("3", "10-11", "11", 1).unwrap();
        assert_eq!(rooms, vec!["3-10-1", "3-11-1", "3-11-2"]);
    }

    #[test]
    fn default_building_size() {
        // 12 floors, 10 rooms each, 6 of them doubles.
        let rooms = BuildingSpec::default().expand().unwrap();
        assert_eq!(rooms.len(), 12 * (10 + 6));
        assert_eq!(rooms.first().map(String::as_str), Some("00-00-01"));
        assert_eq!(rooms.last().map(String::as_str), Some("11-09-02"));
    }

    #[test]
    fn collect_deduplicates_in_first_seen_order() {
        let sources = RoomSources {
            rooms: vec!["0102".into(), " 0101 ".into(), "".into()],
            layout: Some("01:01-03".into()),
            ..Default::default()
        };
        assert_eq!(
            collect_rooms(&sources).unwrap(),
            vec!["0102", "0101", "0103"]
        );
    }

    #[test]
    fn collect_without_rooms_fails() {
        let sources = RoomSources {
            rooms: vec!["  ".into()],
            ..Default::default()
        };
        assert!(matches!(
            collect_rooms(&sources),
            Err(RoomSpecError::NoRoomsProvided)
        ));
    }
}
