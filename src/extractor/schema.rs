//! Positional field schemas for ARGOS record lines.
//!
//! Header and location lines are split on whitespace and fields are taken
//! from fixed token positions. The tables below are the single source of
//! those positions.

use std::fmt;

/// Fields taken from a header (`Date :`) line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    TagId,
    Date,
    Time,
    LocationClass,
}

/// Fields taken from the location line following a header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationField {
    Latitude,
    Longitude,
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HeaderField::TagId => "tag_id",
            HeaderField::Date => "date",
            HeaderField::Time => "time",
            HeaderField::LocationClass => "location_class",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for LocationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LocationField::Latitude => "latitude",
            LocationField::Longitude => "longitude",
        };
        write!(f, "{}", name)
    }
}

/// Token index to field mapping for one kind of line
#[derive(Debug)]
pub struct LineSchema<F: 'static> {
    pub name: &'static str,
    pub fields: &'static [(usize, F)],
}

/// `<tag> Date : <date> <time> LC : <lc> ...`
pub const HEADER_SCHEMA: LineSchema<HeaderField> = LineSchema {
    name: "header",
    fields: &[
        (0, HeaderField::TagId),
        (3, HeaderField::Date),
        (4, HeaderField::Time),
        (7, HeaderField::LocationClass),
    ],
};

/// `Lat1 : <lat> Lon1 : <lon> ...`
pub const LOCATION_SCHEMA: LineSchema<LocationField> = LineSchema {
    name: "location",
    fields: &[(2, LocationField::Latitude), (5, LocationField::Longitude)],
};

/// Field values pulled out of one line
#[derive(Debug)]
pub struct ExtractedFields<'a, F> {
    values: Vec<(F, &'a str)>,
}

impl<'a, F: Copy + PartialEq + fmt::Display> ExtractedFields<'a, F> {
    /// Value of `field`; every schema field is present after extraction
    pub fn get(&self, field: F) -> &'a str {
        self.values
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| *v)
            .unwrap_or_default()
    }
}

impl<F: Copy + PartialEq + fmt::Display + 'static> LineSchema<F> {
    /// Number of whitespace tokens a line needs to satisfy the schema
    pub fn min_tokens(&self) -> usize {
        self.fields
            .iter()
            .map(|(index, _)| index + 1)
            .max()
            .unwrap_or(0)
    }

    /// Pull every schema field out of `line`
    pub fn extract<'a>(&self, line: &'a str) -> Result<ExtractedFields<'a, F>, String> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        if tokens.len() < self.min_tokens() {
            return Err(format!(
                "{} line has {} tokens, expected at least {}",
                self.name,
                tokens.len(),
                self.min_tokens()
            ));
        }

        let values = self
            .fields
            .iter()
            .map(|&(index, field)| (field, tokens[index]))
            .collect();

        Ok(ExtractedFields { values })
    }
}
