//! Error type for roster configuration and input problems.

use crate::domain::ShiftCode;

/// Errors that stop a roster from being generated or edited.
///
/// Coverage shortfalls are not errors; they are reported by
/// [`analyze`](crate::constraints::analyze).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// No employees were supplied.
    EmptyRoster,
    /// An employee name is empty or whitespace.
    BlankEmployeeName,
    /// Two employees share the same name.
    DuplicateEmployee(String),
    /// A name refers to nobody on the roster.
    UnknownEmployee(String),
    /// An employee's index does not match its position in the list.
    MisplacedEmployee {
        employee: String,
        index: usize,
        position: usize,
    },
    /// Year or month outside the supported range.
    InvalidMonth { year: i32, month: u32 },
    /// A festival, override or leave day outside the month.
    DayOutOfRange { day: u32, days_in_month: u32 },
    /// An employee belongs to two week-off patterns.
    ConflictingWeekOff {
        employee: String,
        first: String,
        second: String,
    },
    /// A week-off pattern could not be parsed.
    InvalidPattern(String),
    /// A shift code could not be parsed.
    InvalidShiftCode(String),
    /// A coverage rule is malformed.
    InvalidCoverage { shift: ShiftCode, reason: String },
    /// The catch-all shift is not usable as a default.
    InvalidDefaultShift(ShiftCode),
    /// An employee's role is malformed.
    InvalidRole { employee: String, reason: String },
    /// A leave edit used a working code.
    InvalidLeaveCode(ShiftCode),
    /// Employee CSV could not be read.
    Csv(String),
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::EmptyRoster => write!(f, "Employee list is empty"),
            RosterError::BlankEmployeeName => write!(f, "Employee name must not be blank"),
            RosterError::DuplicateEmployee(name) => {
                write!(f, "Employee '{}' appears more than once", name)
            }
            RosterError::UnknownEmployee(name) => write!(f, "Unknown employee '{}'", name),
            RosterError::MisplacedEmployee {
                employee,
                index,
                position,
            } => write!(
                f,
                "Employee '{}' has index {} but is listed at position {}",
                employee, index, position
            ),
            RosterError::InvalidMonth { year, month } => {
                write!(f, "Invalid month {}-{:02}", year, month)
            }
            RosterError::DayOutOfRange { day, days_in_month } => write!(
                f,
                "Day {} is outside the month (1..={})",
                day, days_in_month
            ),
            RosterError::ConflictingWeekOff {
                employee,
                first,
                second,
            } => write!(
                f,
                "Employee '{}' is in two week-off groups: {} and {}",
                employee, first, second
            ),
            RosterError::InvalidPattern(text) => write!(f, "Invalid week-off pattern '{}'", text),
            RosterError::InvalidShiftCode(text) => write!(f, "Invalid shift code '{}'", text),
            RosterError::InvalidCoverage { shift, reason } => {
                write!(f, "Invalid coverage rule for {}: {}", shift, reason)
            }
            RosterError::InvalidDefaultShift(code) => {
                write!(f, "Shift {} cannot be used as the default shift", code)
            }
            RosterError::InvalidRole { employee, reason } => {
                write!(f, "Invalid role for '{}': {}", employee, reason)
            }
            RosterError::InvalidLeaveCode(code) => {
                write!(f, "Shift {} is not a leave or rest code", code)
            }
            RosterError::Csv(msg) => write!(f, "CSV error: {}", msg),
        }
    }
}

impl std::error::Error for RosterError {}

impl From<csv::Error> for RosterError {
    fn from(e: csv::Error) -> Self {
        RosterError::Csv(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(RosterError::EmptyRoster.to_string(), "Employee list is empty");
        assert_eq!(
            RosterError::DayOutOfRange {
                day: 31,
                days_in_month: 30
            }
            .to_string(),
            "Day 31 is outside the month (1..=30)"
        );
        assert_eq!(
            RosterError::InvalidDefaultShift(ShiftCode::Night).to_string(),
            "Shift N cannot be used as the default shift"
        );
    }
}
