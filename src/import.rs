//! Employee attribute import from CSV.
//!
//! Columns are matched by header name, ignoring case:
//!
//! | column    | meaning                                          |
//! |-----------|--------------------------------------------------|
//! | `Name`    | required                                         |
//! | `Level`   | team / skill tag                                 |
//! | `Night`   | monthly night cap; `0` marks the employee exempt |
//! | `Weekend` | maximum weekend days worked                      |
//! | `Morning`, `Second`, `General`, `Evening`, `Mid` | monthly caps |
//! | `Role`    | `coverage`, a fixed code such as `G`, or `F>S>N` |
//! | `WeekOff` | week-off pattern such as `Fri-Sat`               |
//!
//! Empty cells mean "not set".

use std::io::Read;

use crate::domain::{Employee, Role, ShiftCode, WeekOffPattern};
use crate::error::RosterError;

const CAP_COLUMNS: [(&str, ShiftCode); 5] = [
    ("morning", ShiftCode::First),
    ("second", ShiftCode::Second),
    ("general", ShiftCode::General),
    ("evening", ShiftCode::Evening),
    ("mid", ShiftCode::Mid),
];

/// Reads employees from CSV, indexing them in file order.
///
/// ```
/// use shift_roster::import::read_employees;
///
/// let csv = "Name,Level,Night\nAmy,L1,5\nBeth,L2,0\n";
/// let employees = read_employees(csv.as_bytes()).unwrap();
/// assert_eq!(employees.len(), 2);
/// assert_eq!(employees[0].night_cap, Some(5));
/// assert!(employees[1].night_exempt);
/// ```
pub fn read_employees<R: Read>(reader: R) -> Result<Vec<Employee>, RosterError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.to_lowercase().replace([' ', '_', '-'], ""))
        .collect();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let name_idx = column("name").ok_or_else(|| RosterError::Csv("missing Name column".into()))?;
    let level_idx = column("level");
    let night_idx = column("night");
    let weekend_idx = column("weekend");
    let role_idx = column("role");
    let week_off_idx = column("weekoff");
    let cap_idx: Vec<(usize, ShiftCode)> = CAP_COLUMNS
        .iter()
        .filter_map(|(name, code)| column(name).map(|i| (i, *code)))
        .collect();

    let mut employees = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        // Header is line 1.
        let line = row + 2;
        let record = result?;
        let field = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .filter(|value| !value.is_empty())
        };
        let number = |idx: Option<usize>, column: &str| -> Result<Option<u32>, RosterError> {
            field(idx)
                .map(|value| {
                    value.parse::<u32>().map_err(|_| {
                        RosterError::Csv(format!(
                            "line {}: {} must be a whole number, got '{}'",
                            line, column, value
                        ))
                    })
                })
                .transpose()
        };

        let name = field(Some(name_idx))
            .ok_or_else(|| RosterError::Csv(format!("line {}: Name is empty", line)))?;
        let mut employee = Employee::new(employees.len(), name);

        if let Some(level) = field(level_idx) {
            employee.team = Some(level.to_string());
        }
        match number(night_idx, "Night")? {
            Some(0) => employee.night_exempt = true,
            Some(cap) => employee.night_cap = Some(cap),
            None => {}
        }
        employee.weekend_cap = number(weekend_idx, "Weekend")?;
        for &(idx, code) in &cap_idx {
            if let Some(cap) = number(Some(idx), code.as_str())? {
                employee.shift_caps.insert(code, cap);
            }
        }
        if let Some(role) = field(role_idx) {
            employee.role = Role::parse(role)
                .map_err(|e| RosterError::Csv(format!("line {}: {}", line, e)))?;
        }
        if let Some(pattern) = field(week_off_idx) {
            employee.week_off = Some(
                pattern
                    .parse::<WeekOffPattern>()
                    .map_err(|e| RosterError::Csv(format!("line {}: {}", line, e)))?,
            );
        }

        employees.push(employee);
    }

    Ok(employees)
}
