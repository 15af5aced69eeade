//! Shift-count summaries per employee and per day.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::{weekday_name, DayKind, Roster, ShiftCode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    pub name: String,
    pub counts: BTreeMap<ShiftCode, u32>,
    /// Days on a working shift.
    pub worked: u32,
    pub weekend_worked: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub day: u32,
    pub date: NaiveDate,
    pub weekday: &'static str,
    pub kind: DayKind,
    pub counts: BTreeMap<ShiftCode, u32>,
    pub on_duty: u32,
}

pub fn employee_summaries(roster: &Roster) -> Vec<EmployeeSummary> {
    roster
        .employees
        .iter()
        .enumerate()
        .map(|(e, name)| {
            let counts = tally(roster.row(e).iter().flatten().copied());
            EmployeeSummary {
                name: name.clone(),
                worked: worked(&counts),
                weekend_worked: roster.weekend_worked(e),
                counts,
            }
        })
        .collect()
}

pub fn day_summaries(roster: &Roster) -> Vec<DaySummary> {
    roster
        .days
        .iter()
        .enumerate()
        .map(|(d, day)| {
            let counts = tally((0..roster.employee_count()).filter_map(|e| roster.get(e, d)));
            DaySummary {
                day: day.number,
                date: day.date,
                weekday: weekday_name(day.weekday),
                kind: day.kind(),
                on_duty: worked(&counts),
                counts,
            }
        })
        .collect()
}

fn tally(codes: impl Iterator<Item = ShiftCode>) -> BTreeMap<ShiftCode, u32> {
    let mut counts = BTreeMap::new();
    for code in codes {
        *counts.entry(code).or_insert(0) += 1;
    }
    counts
}

fn worked(counts: &BTreeMap<ShiftCode, u32>) -> u32 {
    counts
        .iter()
        .filter(|(code, _)| code.is_working())
        .map(|(_, n)| n)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Employee, RosterMonth, RosterProblem};

    fn roster() -> Roster {
        let problem = RosterProblem::new(
            RosterMonth::new(2024, 6).unwrap(),
            vec![Employee::new(0, "Amy"), Employee::new(1, "Beth")],
        );
        let mut roster = Roster::new(
            problem.month,
            vec!["Amy".to_string(), "Beth".to_string()],
            problem.days(),
        );
        for d in 0..roster.day_count() {
            roster.set(0, d, ShiftCode::Night);
            roster.set(1, d, if d % 2 == 0 { ShiftCode::First } else { ShiftCode::Off });
        }
        roster
    }

    #[test]
    fn test_employee_counts() {
        let summaries = employee_summaries(&roster());
        assert_eq!(summaries[0].counts.get(&ShiftCode::Night), Some(&30));
        assert_eq!(summaries[0].worked, 30);
        // June 2024 has 10 weekend days
        assert_eq!(summaries[0].weekend_worked, 10);
        assert_eq!(summaries[1].counts.get(&ShiftCode::First), Some(&15));
        assert_eq!(summaries[1].counts.get(&ShiftCode::Off), Some(&15));
        assert_eq!(summaries[1].worked, 15);
    }

    #[test]
    fn test_day_counts() {
        let summaries = day_summaries(&roster());
        assert_eq!(summaries.len(), 30);
        assert_eq!(summaries[0].weekday, "Saturday");
        assert_eq!(summaries[0].kind, DayKind::Weekend);
        assert_eq!(summaries[0].on_duty, 2);
        assert_eq!(summaries[1].on_duty, 1);
        assert_eq!(summaries[1].counts.get(&ShiftCode::Off), Some(&1));
    }
}
