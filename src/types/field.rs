//! Input field names and header normalization

/// A recognized input field.
///
/// The canonical name is the camelCase form used by the example files;
/// headers and JSON keys match through [`normalize_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    ApiNumber,
    WellName,
    WellNumber,
    County,
    Operator,
    WellType,
    WellStatus,
    Section,
    Township,
    Range,
    Meridian,
    Latitude,
    Longitude,
    SpudDate,
    CompletionDate,
}

impl Field {
    /// All fields, in header order
    pub const ALL: [Field; 15] = [
        Field::ApiNumber,
        Field::WellName,
        Field::WellNumber,
        Field::County,
        Field::Operator,
        Field::WellType,
        Field::WellStatus,
        Field::Section,
        Field::Township,
        Field::Range,
        Field::Meridian,
        Field::Latitude,
        Field::Longitude,
        Field::SpudDate,
        Field::CompletionDate,
    ];

    /// camelCase name used in example CSV headers and JSON keys
    pub fn canonical_name(&self) -> &'static str {
        match self {
            Field::ApiNumber => "apiNumber",
            Field::WellName => "wellName",
            Field::WellNumber => "wellNumber",
            Field::County => "county",
            Field::Operator => "operator",
            Field::WellType => "wellType",
            Field::WellStatus => "wellStatus",
            Field::Section => "section",
            Field::Township => "township",
            Field::Range => "range",
            Field::Meridian => "meridian",
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
            Field::SpudDate => "spudDate",
            Field::CompletionDate => "completionDate",
        }
    }

    /// Match a header or JSON key against the known fields.
    pub fn from_key(key: &str) -> Option<Self> {
        let normalized = normalize_key(key);
        Self::ALL
            .into_iter()
            .find(|f| normalize_key(f.canonical_name()) == normalized)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Lower-case a key and drop `_`, `-`, spaces and any other punctuation,
/// so `apiNumber`, `api_number` and `API Number` compare equal.
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
