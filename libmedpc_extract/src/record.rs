use time::{Date, Month, PrimitiveDateTime, Time};

/// A group of up to five sequential timestamp values sharing a reported
/// starting index.
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub index: u32,
    pub values: Vec<f64>,
}

/// A single-letter-named data stream within a record, holding binned
/// timestamp data.
///
/// A block with a label but no bins is a valid, empty variable.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableBlock {
    pub letter: char,
    pub bins: Vec<Bin>,
}

impl VariableBlock {
    pub fn new(letter: char) -> Self {
        Self {
            letter,
            bins: Vec::new(),
        }
    }
}

/// One parsed experimental session.
///
/// Metadata fields which could not be scanned are left as None and rendered
/// with an explicit absent marker by the output sink. Variables are kept in
/// their order of appearance in the data file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub box_number: Option<u32>,
    pub subject: Option<String>,
    pub experiment: Option<String>,
    pub group: Option<String>,
    pub msn: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub variables: Vec<VariableBlock>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a variable by its letter
    pub fn variable(&self, letter: char) -> Option<&VariableBlock> {
        self.variables.iter().find(|block| block.letter == letter)
    }
}

/// Parse a session timestamp of the form `MM/DD/YY HH:MM:SS`.
///
/// MED-PC writes two-digit years; years below 70 are taken as 20xx, the rest
/// as 19xx. Returns None for anything that does not fit the layout.
pub fn parse_session_timestamp(stamp: &str) -> Option<PrimitiveDateTime> {
    let (date_part, time_part) = stamp.split_once(' ')?;

    let mut fields = date_part.split('/');
    let month: u8 = fields.next()?.parse().ok()?;
    let day: u8 = fields.next()?.parse().ok()?;
    let short_year: i32 = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    let year = if short_year < 70 {
        2000 + short_year
    } else {
        1900 + short_year
    };

    let mut fields = time_part.split(':');
    let hour: u8 = fields.next()?.parse().ok()?;
    let minute: u8 = fields.next()?.parse().ok()?;
    let second: u8 = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }

    let date = Date::from_calendar_date(year, Month::try_from(month).ok()?, day).ok()?;
    let time = Time::from_hms(hour, minute, second).ok()?;
    Some(PrimitiveDateTime::new(date, time))
}
