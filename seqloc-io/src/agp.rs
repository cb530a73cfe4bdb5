//! Line-oriented AGP file reading.
//!
//! AGP files describe how an object (scaffold or chromosome) is built
//! from component placements and gaps: nine tab-separated columns, `#`
//! comment lines, optionally gzip-compressed. This reader only populates
//! [`AgpRow`] values; interpreting them (validity, placement length,
//! canonical order) is `seqloc-core`'s job. A malformed line never aborts
//! the file: whatever fields do parse are kept and the row simply reports
//! itself invalid.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::Result;

use seqloc_core::{AgpRow, Sequence};

use crate::utils::get_dynamic_reader;

///
/// AgpFile struct, the representation of one AGP submission file.
///
#[derive(Clone, Debug)]
pub struct AgpFile {
    pub rows: Vec<AgpRow>,
    pub header: Option<String>,
    pub path: Option<PathBuf>,
}

impl TryFrom<&Path> for AgpFile {
    type Error = anyhow::Error;

    ///
    /// Create a new [AgpFile] from an AGP file on disk, plain or gzip'd.
    ///
    /// # Arguments:
    /// - value: path to the AGP file on disk.
    fn try_from(value: &Path) -> Result<Self> {
        let reader = get_dynamic_reader(value)?;
        let mut agp = Self::from_reader(reader)?;
        agp.path = Some(value.to_path_buf());
        Ok(agp)
    }
}

impl TryFrom<&str> for AgpFile {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        AgpFile::try_from(Path::new(value))
    }
}

impl AgpFile {
    /// Reads AGP rows from any buffered source.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut rows: Vec<AgpRow> = Vec::new();
        let mut header = String::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.starts_with('#') {
                header.push_str(&line);
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }
            let row = parse_agp_line(&line);
            if !row.is_valid() {
                log::warn!("invalid AGP row at line {}: {:?}", index + 1, line);
            }
            rows.push(row);
        }

        Ok(AgpFile {
            rows,
            header: (!header.is_empty()).then_some(header),
            path: None,
        })
    }

    /// Hands the rows to the core model as an AGP-backed [`Sequence`].
    pub fn into_sequence(self) -> Sequence {
        Sequence::from_agp_rows(self.rows)
    }
}

/// Parses one non-comment AGP line into a row.
///
/// Columns 1-5 are `object, object_beg, object_end, part_number,
/// component_type`; columns 6-9 are `gap_length, gap_type, linkage,
/// linkage_evidence` for gap rows (type `N`/`U`) and `component_id,
/// component_beg, component_end, orientation` otherwise. Fields that are
/// missing or fail to parse stay unset.
pub fn parse_agp_line(line: &str) -> AgpRow {
    let fields: Vec<&str> = line.trim_end_matches('\r').split('\t').collect();

    let mut row = AgpRow {
        object: text_field(fields.first()),
        object_begin: number_field(fields.get(1)),
        object_end: number_field(fields.get(2)),
        part_number: number_field(fields.get(3)),
        component_type: text_field(fields.get(4)),
        ..AgpRow::default()
    };

    if row.is_gap() {
        row.gap_length = number_field(fields.get(5));
        row.gap_type = text_field(fields.get(6));
        row.linkage = text_field(fields.get(7));
        row.linkage_evidence = text_field(fields.get(8));
    } else {
        row.component_id = text_field(fields.get(5));
        row.component_begin = number_field(fields.get(6));
        row.component_end = number_field(fields.get(7));
        row.orientation = text_field(fields.get(8));
    }

    row
}

fn text_field(field: Option<&&str>) -> Option<String> {
    field
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn number_field(field: Option<&&str>) -> Option<u64> {
    field.and_then(|value| value.trim().parse::<u64>().ok())
}
