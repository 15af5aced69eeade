//! DTOs for REST API requests/responses.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constraints::{Analysis, ConstraintReport};
use crate::domain::{
    weekday_name, CellOverride, CoverageRule, CoverageTable, DayKind, Employee, Role, Roster,
    RosterMonth, RosterPolicy, RosterProblem, ShiftCode, WeekOffGroup, WeekOffPattern,
};
use crate::error::RosterError;
use crate::summary::{self, DaySummary, EmployeeSummary};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub night_cap: Option<u32>,
    #[serde(default)]
    pub night_exempt: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub shift_caps: BTreeMap<ShiftCode, u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekend_cap: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_off: Option<WeekOffPattern>,
}

impl From<&Employee> for EmployeeDto {
    fn from(e: &Employee) -> Self {
        Self {
            name: e.name.clone(),
            team: e.team.clone(),
            role: e.role.clone(),
            night_cap: e.night_cap,
            night_exempt: e.night_exempt,
            shift_caps: e.shift_caps.clone(),
            weekend_cap: e.weekend_cap,
            week_off: e.week_off,
        }
    }
}

impl EmployeeDto {
    pub fn to_employee(&self, index: usize) -> Employee {
        Employee {
            index,
            name: self.name.trim().to_string(),
            team: self.team.clone(),
            role: self.role.clone(),
            night_cap: self.night_cap,
            night_exempt: self.night_exempt,
            shift_caps: self.shift_caps.clone(),
            weekend_cap: self.weekend_cap,
            week_off: self.week_off,
        }
    }
}

/// A pre-assigned cell, addressed by employee name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellOverrideDto {
    pub employee: String,
    pub day: u32,
    pub code: ShiftCode,
}

/// Everything needed to generate a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterRequestDto {
    pub year: i32,
    pub month: u32,
    pub employees: Vec<EmployeeDto>,
    #[serde(default)]
    pub coverage: Vec<CoverageRule>,
    #[serde(default)]
    pub festivals: Vec<u32>,
    /// Weekend weekdays; Saturday and Sunday when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekend: Option<Vec<Weekday>>,
    #[serde(default)]
    pub week_off_groups: Vec<WeekOffGroup>,
    #[serde(default)]
    pub overrides: Vec<CellOverrideDto>,
    #[serde(default)]
    pub policy: RosterPolicy,
}

impl RosterRequestDto {
    pub fn from_problem(problem: &RosterProblem) -> Self {
        Self {
            year: problem.month.year,
            month: problem.month.month,
            employees: problem.employees.iter().map(EmployeeDto::from).collect(),
            coverage: problem.coverage.rules.clone(),
            festivals: problem.festivals.iter().copied().collect(),
            weekend: Some(problem.weekend.clone()),
            week_off_groups: problem.week_off_groups.clone(),
            overrides: problem
                .overrides
                .iter()
                .filter_map(|o| {
                    let employee = problem.employees.get(o.employee)?;
                    Some(CellOverrideDto {
                        employee: employee.name.clone(),
                        day: o.day,
                        code: o.code,
                    })
                })
                .collect(),
            policy: problem.policy.clone(),
        }
    }

    pub fn to_domain(&self) -> Result<RosterProblem, RosterError> {
        let month = RosterMonth::new(self.year, self.month)?;
        let employees: Vec<Employee> = self
            .employees
            .iter()
            .enumerate()
            .map(|(i, dto)| dto.to_employee(i))
            .collect();

        let overrides = self
            .overrides
            .iter()
            .map(|o| {
                employees
                    .iter()
                    .position(|e| e.name == o.employee.trim())
                    .map(|employee| CellOverride {
                        employee,
                        day: o.day,
                        code: o.code,
                    })
                    .ok_or_else(|| RosterError::UnknownEmployee(o.employee.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut problem = RosterProblem::new(month, employees);
        problem.coverage = CoverageTable::new(self.coverage.clone());
        problem.festivals = self.festivals.iter().copied().collect();
        if let Some(weekend) = &self.weekend {
            problem.weekend = weekend.clone();
        }
        problem.week_off_groups = self
            .week_off_groups
            .iter()
            .map(|g| WeekOffGroup {
                name: g.name.clone(),
                pattern: g.pattern,
                members: g.members.iter().map(|m| m.trim().to_string()).collect(),
            })
            .collect();
        problem.overrides = overrides;
        problem.policy = self.policy.clone();
        Ok(problem)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayDto {
    pub day: u32,
    pub date: NaiveDate,
    pub weekday: String,
    pub kind: DayKind,
}

/// One employee's shifts for the month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterRowDto {
    pub name: String,
    pub shifts: Vec<Option<ShiftCode>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterDto {
    pub id: String,
    pub year: i32,
    pub month: u32,
    pub days: Vec<DayDto>,
    pub rows: Vec<RosterRowDto>,
    pub score: String,
    pub feasible: bool,
    pub constraints: Vec<ConstraintReport>,
    pub warnings: Vec<String>,
}

impl RosterDto {
    pub fn from_roster(id: &str, roster: &Roster, analysis: &Analysis) -> Self {
        Self {
            id: id.to_string(),
            year: roster.month.year,
            month: roster.month.month,
            days: roster
                .days
                .iter()
                .map(|d| DayDto {
                    day: d.number,
                    date: d.date,
                    weekday: weekday_name(d.weekday).to_string(),
                    kind: d.kind(),
                })
                .collect(),
            rows: rows(roster),
            score: analysis.score.to_string(),
            feasible: analysis.is_feasible(),
            constraints: analysis.constraints.clone(),
            warnings: analysis.warnings(),
        }
    }
}

fn rows(roster: &Roster) -> Vec<RosterRowDto> {
    roster
        .employees
        .iter()
        .enumerate()
        .map(|(e, name)| RosterRowDto {
            name: name.clone(),
            shifts: roster.row(e).to_vec(),
        })
        .collect()
}

/// A roster edited outside the generator, checked against its request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequestDto {
    pub request: RosterRequestDto,
    pub rows: Vec<RosterRowDto>,
}

impl AnalyzeRequestDto {
    /// Builds the problem and a grid whose rows follow the problem's employees.
    pub fn to_domain(&self) -> Result<(RosterProblem, Roster), RosterError> {
        let problem = self.request.to_domain()?;
        problem.validate()?;

        let mut grid: Vec<Vec<Option<ShiftCode>>> = vec![Vec::new(); problem.employees.len()];
        for row in &self.rows {
            let idx = problem
                .employee_index(row.name.trim())
                .ok_or_else(|| RosterError::UnknownEmployee(row.name.clone()))?;
            grid[idx] = row.shifts.clone();
        }

        let names = problem.employees.iter().map(|e| e.name.clone()).collect();
        let roster = Roster::from_rows(problem.month, names, problem.days(), grid);
        Ok((problem, roster))
    }
}

/// Leave edit for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveDto {
    pub employee: String,
    pub days: Vec<u32>,
    #[serde(default = "default_leave_code")]
    pub code: ShiftCode,
}

fn default_leave_code() -> ShiftCode {
    ShiftCode::Leave
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDto {
    pub employees: Vec<EmployeeSummary>,
    pub days: Vec<DaySummary>,
}

impl SummaryDto {
    pub fn from_roster(roster: &Roster) -> Self {
        Self {
            employees: summary::employee_summaries(roster),
            days: summary::day_summaries(roster),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub engine: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub score: String,
    pub feasible: bool,
    pub constraints: Vec<ConstraintReport>,
    pub warnings: Vec<String>,
}

impl From<&Analysis> for AnalyzeResponse {
    fn from(analysis: &Analysis) -> Self {
        Self {
            score: analysis.score.to_string(),
            feasible: analysis.is_feasible(),
            constraints: analysis.constraints.clone(),
            warnings: analysis.warnings(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo_data::{self, DemoData};

    #[test]
    fn test_request_round_trips_through_domain() {
        let problem = demo_data::generate(DemoData::Small);
        let dto = RosterRequestDto::from_problem(&problem);
        let json = serde_json::to_string(&dto).unwrap();
        let parsed: RosterRequestDto = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.to_domain().unwrap(), problem);
    }

    #[test]
    fn test_minimal_request_uses_defaults() {
        let json = r#"{
            "year": 2024,
            "month": 2,
            "employees": [
                {"name": "Amy"},
                {"name": "Beth", "role": {"type": "fixed", "shift": "G"}, "weekOff": "Fri-Sat"}
            ],
            "coverage": [{"shift": "N", "min": 1, "max": 1}],
            "overrides": [{"employee": "Amy", "day": 3, "code": "L"}]
        }"#;
        let dto: RosterRequestDto = serde_json::from_str(json).unwrap();
        let problem = dto.to_domain().unwrap();

        assert_eq!(problem.employees.len(), 2);
        assert!(problem.employees[0].is_coverage());
        assert_eq!(
            problem.employees[1].role,
            Role::Fixed {
                shift: ShiftCode::General
            }
        );
        assert_eq!(problem.policy, RosterPolicy::default());
        assert_eq!(problem.weekend, vec![Weekday::Sat, Weekday::Sun]);
        assert_eq!(problem.overrides[0].employee, 0);
    }

    #[test]
    fn test_names_are_trimmed_everywhere() {
        let json = r#"{
            "year": 2024, "month": 2,
            "employees": [{"name": " Amy "}, {"name": "Beth"}],
            "weekOffGroups": [{"name": "Weekend", "pattern": "Sat-Sun", "members": [" Amy", "Beth "]}],
            "overrides": [{"employee": " Amy", "day": 3, "code": "L"}]
        }"#;
        let dto: RosterRequestDto = serde_json::from_str(json).unwrap();
        let problem = dto.to_domain().unwrap();

        assert_eq!(problem.employees[0].name, "Amy");
        assert_eq!(problem.overrides[0].employee, 0);
        assert_eq!(problem.week_off_groups[0].members, vec!["Amy", "Beth"]);
        assert!(problem.validate().is_ok());
    }

    #[test]
    fn test_unknown_override_employee() {
        let json = r#"{
            "year": 2024, "month": 2,
            "employees": [{"name": "Amy"}],
            "overrides": [{"employee": "Zed", "day": 3, "code": "L"}]
        }"#;
        let dto: RosterRequestDto = serde_json::from_str(json).unwrap();
        assert_eq!(
            dto.to_domain(),
            Err(RosterError::UnknownEmployee("Zed".to_string()))
        );
    }

    #[test]
    fn test_analyze_request_orders_rows_by_employee() {
        let request = RosterRequestDto {
            year: 2024,
            month: 2,
            employees: vec![
                EmployeeDto::from(&Employee::new(0, "Amy")),
                EmployeeDto::from(&Employee::new(1, "Beth")),
            ],
            coverage: vec![],
            festivals: vec![],
            weekend: None,
            week_off_groups: vec![],
            overrides: vec![],
            policy: RosterPolicy::default(),
        };
        let analyze = AnalyzeRequestDto {
            request,
            rows: vec![RosterRowDto {
                name: "Beth".to_string(),
                shifts: vec![Some(ShiftCode::Night); 29],
            }],
        };

        let (_, roster) = analyze.to_domain().unwrap();
        assert_eq!(roster.count_for_employee(1, ShiftCode::Night), 29);
        assert_eq!(roster.row(0).iter().filter(|c| c.is_none()).count(), 29);
    }
}
