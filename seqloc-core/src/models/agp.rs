/// One row of an AGP file: the placement of a component or gap within an
/// assembled object.
///
/// Fields are optional because the surrounding readers populate whatever
/// the file provides; a row missing required fields reports
/// [`is_valid`](AgpRow::is_valid) `== false`, contributes zero length and
/// zero content, and never aborts processing of its siblings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgpRow {
    pub object: Option<String>,
    pub object_accession: Option<String>,
    pub object_begin: Option<u64>,
    pub object_end: Option<u64>,
    /// 1-based placement order within the object.
    pub part_number: Option<u64>,
    /// AGP component type code; `N` and `U` are gap rows.
    pub component_type: Option<String>,

    // gap rows
    pub gap_length: Option<u64>,
    pub gap_type: Option<String>,
    pub linkage: Option<String>,
    pub linkage_evidence: Option<String>,

    // component rows
    pub component_id: Option<String>,
    pub component_begin: Option<u64>,
    pub component_end: Option<u64>,
    pub orientation: Option<String>,
}

impl AgpRow {
    /// True when the row describes a gap rather than a placed component.
    pub fn is_gap(&self) -> bool {
        self.component_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("N") || t.eq_ignore_ascii_case("U"))
    }

    /// A row is valid when the always-required fields (object span, part
    /// number, component type) are present, plus the fields its type
    /// requires: gap length and gap type for gap rows, component id, span
    /// and orientation otherwise.
    pub fn is_valid(&self) -> bool {
        let required = self.object.is_some()
            && self.object_begin.is_some()
            && self.object_end.is_some()
            && self.part_number.is_some()
            && self.component_type.is_some();
        if !required {
            return false;
        }
        if self.is_gap() {
            self.gap_length.is_some() && self.gap_type.is_some()
        } else {
            self.component_id.is_some()
                && self.component_begin.is_some()
                && self.component_end.is_some()
                && self.orientation.is_some()
        }
    }

    /// Bases this row places in the object: the gap length for gap rows,
    /// the component span for component rows, 0 for invalid rows.
    pub fn placement_length(&self) -> u64 {
        if !self.is_valid() {
            return 0;
        }
        if self.is_gap() {
            return self.gap_length.unwrap_or(0);
        }
        match (self.component_begin, self.component_end) {
            (Some(begin), Some(end)) if end >= begin => end - begin + 1,
            _ => 0,
        }
    }
}
