//! Post-hoc roster analysis.
//!
//! Each constraint walks the finished grid and reports its violations. Hard
//! constraints make a roster infeasible; soft ones only lower its score.
//! Nothing here changes the roster.

use serde::Serialize;

use crate::domain::{CapPolicy, Roster, RosterProblem, ShiftCode};

pub const MINIMUM_COVERAGE: &str = "Minimum coverage";
pub const MAXIMUM_COVERAGE: &str = "Maximum coverage";
pub const MONTHLY_NIGHT_CAP: &str = "Monthly night cap";
pub const MONTHLY_SHIFT_CAP: &str = "Monthly shift cap";
pub const NIGHT_EXEMPTION: &str = "Night exemption";
pub const UNASSIGNED_CELL: &str = "Unassigned cell";
pub const WEEKEND_CAP: &str = "Weekend cap";
pub const MORNING_AFTER_NIGHT: &str = "Morning after night";
pub const NIGHT_BALANCE: &str = "Night balance";
pub const WEEK_OFF_OVERLAP: &str = "Week-off overlap";

/// Hard/soft penalty totals; both are zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RosterScore {
    pub hard: i64,
    pub soft: i64,
}

impl RosterScore {
    pub const ZERO: RosterScore = RosterScore { hard: 0, soft: 0 };

    pub fn of(hard: i64, soft: i64) -> Self {
        Self { hard, soft }
    }

    pub fn is_feasible(&self) -> bool {
        self.hard == 0
    }
}

impl std::ops::Add for RosterScore {
    type Output = RosterScore;

    fn add(self, rhs: Self) -> Self::Output {
        RosterScore {
            hard: self.hard + rhs.hard,
            soft: self.soft + rhs.soft,
        }
    }
}

impl std::fmt::Display for RosterScore {
    /// ```
    /// use shift_roster::constraints::RosterScore;
    ///
    /// assert_eq!(RosterScore::of(-2, -5).to_string(), "-2hard/-5soft");
    /// assert_eq!(RosterScore::ZERO.to_string(), "0hard/0soft");
    /// ```
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}hard/{}soft", self.hard, self.soft)
    }
}

impl Serialize for RosterScore {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintKind {
    Hard,
    Soft,
}

/// One broken rule on one cell, day or employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift: Option<ShiftCode>,
    /// Magnitude of the violation, always positive.
    pub penalty: i64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintReport {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: ConstraintKind,
    pub violations: Vec<Violation>,
}

impl ConstraintReport {
    fn new(name: &'static str, kind: ConstraintKind) -> Self {
        Self {
            name,
            kind,
            violations: Vec::new(),
        }
    }

    pub fn score(&self) -> RosterScore {
        let total: i64 = self.violations.iter().map(|v| v.penalty).sum();
        match self.kind {
            ConstraintKind::Hard => RosterScore::of(-total, 0),
            ConstraintKind::Soft => RosterScore::of(0, -total),
        }
    }
}

/// Result of checking a roster against its problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub score: RosterScore,
    pub constraints: Vec<ConstraintReport>,
}

impl Analysis {
    pub fn is_feasible(&self) -> bool {
        self.score.is_feasible()
    }

    pub fn violations_of(&self, name: &str) -> Vec<&Violation> {
        self.constraints
            .iter()
            .filter(|c| c.name == name)
            .flat_map(|c| c.violations.iter())
            .collect()
    }

    pub fn violation_count(&self) -> usize {
        self.constraints.iter().map(|c| c.violations.len()).sum()
    }

    /// Human-readable warning lines, hard constraints first.
    pub fn warnings(&self) -> Vec<String> {
        let mut hard: Vec<String> = Vec::new();
        let mut soft: Vec<String> = Vec::new();
        for report in &self.constraints {
            let target = match report.kind {
                ConstraintKind::Hard => &mut hard,
                ConstraintKind::Soft => &mut soft,
            };
            target.extend(report.violations.iter().map(|v| v.message.clone()));
        }
        hard.extend(soft);
        hard
    }
}

/// Checks every constraint; the roster's rows must follow `problem.employees`.
pub fn analyze(problem: &RosterProblem, roster: &Roster) -> Analysis {
    let constraints = vec![
        minimum_coverage(problem, roster),
        maximum_coverage(problem, roster),
        monthly_night_cap(problem, roster),
        monthly_shift_cap(problem, roster),
        night_exemption(problem, roster),
        unassigned_cell(roster),
        weekend_cap(problem, roster),
        morning_after_night(roster),
        night_balance(problem, roster),
        week_off_overlap(problem),
    ];
    let score = constraints
        .iter()
        .fold(RosterScore::ZERO, |acc, c| acc + c.score());
    Analysis { score, constraints }
}

// ============================================================================
// HARD: Daily coverage
// ============================================================================

fn minimum_coverage(problem: &RosterProblem, roster: &Roster) -> ConstraintReport {
    let mut report = ConstraintReport::new(MINIMUM_COVERAGE, ConstraintKind::Hard);
    for (d, day) in roster.days.iter().enumerate() {
        let kind = day.kind();
        for shift in problem.coverage.required_shifts(kind) {
            let Some(bounds) = problem.coverage.bounds(shift, kind) else {
                continue;
            };
            let count = roster.count_on_day(d, shift);
            let missing = bounds.shortfall(count);
            if missing > 0 {
                report.violations.push(Violation {
                    employee: None,
                    day: Some(day.number),
                    shift: Some(shift),
                    penalty: missing as i64,
                    message: format!(
                        "Day {}: {} {} assigned, at least {} required",
                        day.number, count, shift, bounds.min
                    ),
                });
            }
        }
    }
    report
}

fn maximum_coverage(problem: &RosterProblem, roster: &Roster) -> ConstraintReport {
    let mut report = ConstraintReport::new(MAXIMUM_COVERAGE, ConstraintKind::Hard);
    for (d, day) in roster.days.iter().enumerate() {
        let kind = day.kind();
        for shift in problem.coverage.required_shifts(kind) {
            let Some(bounds) = problem.coverage.bounds(shift, kind) else {
                continue;
            };
            let count = roster.count_on_day(d, shift);
            let excess = bounds.excess(count);
            if excess > 0 {
                report.violations.push(Violation {
                    employee: None,
                    day: Some(day.number),
                    shift: Some(shift),
                    penalty: excess as i64,
                    message: format!(
                        "Day {}: {} {} assigned, at most {} allowed",
                        day.number,
                        count,
                        shift,
                        bounds.max.unwrap_or_default()
                    ),
                });
            }
        }
    }
    report
}

// ============================================================================
// HARD: Per-employee caps and exemptions
// ============================================================================

/// Caps are hard limits, except under `CapPolicy::Overflow` where breaches only warn.
fn cap_kind(problem: &RosterProblem) -> ConstraintKind {
    match problem.policy.caps {
        CapPolicy::Strict => ConstraintKind::Hard,
        CapPolicy::Overflow => ConstraintKind::Soft,
    }
}

fn monthly_night_cap(problem: &RosterProblem, roster: &Roster) -> ConstraintReport {
    let mut report = ConstraintReport::new(MONTHLY_NIGHT_CAP, cap_kind(problem));
    for employee in &problem.employees {
        let Some(cap) = employee.cap_for(ShiftCode::Night) else {
            continue;
        };
        let nights = roster.count_for_employee(employee.index, ShiftCode::Night);
        if nights > cap {
            report.violations.push(Violation {
                employee: Some(employee.name.clone()),
                day: None,
                shift: Some(ShiftCode::Night),
                penalty: (nights - cap) as i64,
                message: format!(
                    "{} has {} night shifts, cap is {}",
                    employee.name, nights, cap
                ),
            });
        }
    }
    report
}

fn monthly_shift_cap(problem: &RosterProblem, roster: &Roster) -> ConstraintReport {
    let mut report = ConstraintReport::new(MONTHLY_SHIFT_CAP, cap_kind(problem));
    for employee in &problem.employees {
        for (&shift, &cap) in &employee.shift_caps {
            // Night is reported by the night cap.
            if shift == ShiftCode::Night {
                continue;
            }
            let count = roster.count_for_employee(employee.index, shift);
            if count > cap {
                report.violations.push(Violation {
                    employee: Some(employee.name.clone()),
                    day: None,
                    shift: Some(shift),
                    penalty: (count - cap) as i64,
                    message: format!(
                        "{} has {} {} shifts, cap is {}",
                        employee.name, count, shift, cap
                    ),
                });
            }
        }
    }
    report
}

fn night_exemption(problem: &RosterProblem, roster: &Roster) -> ConstraintReport {
    let mut report = ConstraintReport::new(NIGHT_EXEMPTION, ConstraintKind::Hard);
    for employee in problem.employees.iter().filter(|e| e.night_exempt) {
        for (d, day) in roster.days.iter().enumerate() {
            if roster.get(employee.index, d) == Some(ShiftCode::Night) {
                report.violations.push(Violation {
                    employee: Some(employee.name.clone()),
                    day: Some(day.number),
                    shift: Some(ShiftCode::Night),
                    penalty: 1,
                    message: format!(
                        "{} is exempt from nights but works N on day {}",
                        employee.name, day.number
                    ),
                });
            }
        }
    }
    report
}

fn unassigned_cell(roster: &Roster) -> ConstraintReport {
    let mut report = ConstraintReport::new(UNASSIGNED_CELL, ConstraintKind::Hard);
    for (e, name) in roster.employees.iter().enumerate() {
        for (d, day) in roster.days.iter().enumerate() {
            if roster.is_blank(e, d) {
                report.violations.push(Violation {
                    employee: Some(name.clone()),
                    day: Some(day.number),
                    shift: None,
                    penalty: 1,
                    message: format!("{} has no shift on day {}", name, day.number),
                });
            }
        }
    }
    report
}

// ============================================================================
// SOFT: Fairness and rest
// ============================================================================

fn weekend_cap(problem: &RosterProblem, roster: &Roster) -> ConstraintReport {
    let mut report = ConstraintReport::new(WEEKEND_CAP, ConstraintKind::Soft);
    for employee in &problem.employees {
        let Some(cap) = employee.weekend_cap else {
            continue;
        };
        let worked = roster.weekend_worked(employee.index);
        if worked > cap {
            report.violations.push(Violation {
                employee: Some(employee.name.clone()),
                day: None,
                shift: None,
                penalty: (worked - cap) as i64,
                message: format!(
                    "{} works {} weekend days, cap is {}",
                    employee.name, worked, cap
                ),
            });
        }
    }
    report
}

fn morning_after_night(roster: &Roster) -> ConstraintReport {
    let mut report = ConstraintReport::new(MORNING_AFTER_NIGHT, ConstraintKind::Soft);
    for (e, name) in roster.employees.iter().enumerate() {
        for d in 1..roster.day_count() {
            if roster.get(e, d - 1) == Some(ShiftCode::Night)
                && roster.get(e, d) == Some(ShiftCode::First)
            {
                let day = roster.days[d].number;
                report.violations.push(Violation {
                    employee: Some(name.clone()),
                    day: Some(day),
                    shift: Some(ShiftCode::First),
                    penalty: 1,
                    message: format!("{} works F on day {} right after a night", name, day),
                });
            }
        }
    }
    report
}

/// Spread of night counts across the non-exempt pool; a spread of 1 is fine.
fn night_balance(problem: &RosterProblem, roster: &Roster) -> ConstraintReport {
    let mut report = ConstraintReport::new(NIGHT_BALANCE, ConstraintKind::Soft);
    let nights: Vec<u32> = problem
        .coverage_pool()
        .filter(|e| !e.night_exempt)
        .map(|e| roster.count_for_employee(e.index, ShiftCode::Night))
        .collect();
    if let (Some(min), Some(max)) = (nights.iter().min(), nights.iter().max()) {
        let spread = max - min;
        if spread > 1 {
            report.violations.push(Violation {
                employee: None,
                day: None,
                shift: Some(ShiftCode::Night),
                penalty: (spread - 1) as i64,
                message: format!(
                    "Night shifts range from {} to {} across the pool",
                    min, max
                ),
            });
        }
    }
    report
}

fn week_off_overlap(problem: &RosterProblem) -> ConstraintReport {
    let mut report = ConstraintReport::new(WEEK_OFF_OVERLAP, ConstraintKind::Soft);
    let groups = &problem.week_off_groups;
    for (i, first) in groups.iter().enumerate() {
        for second in &groups[i + 1..] {
            if first.pattern.overlaps(&second.pattern) {
                report.violations.push(Violation {
                    employee: None,
                    day: None,
                    shift: Some(ShiftCode::Off),
                    penalty: 1,
                    message: format!(
                        "Week-off groups {} ({}) and {} ({}) share a weekday",
                        first.name,
                        first.pattern.name(),
                        second.name,
                        second.pattern.name()
                    ),
                });
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CoverageRule, Employee, RosterMonth};

    fn problem() -> RosterProblem {
        let month = RosterMonth::new(2024, 2).unwrap();
        RosterProblem::new(
            month,
            vec![
                Employee::new(0, "Amy").with_night_cap(1),
                Employee::new(1, "Beth").night_exempt(),
                Employee::new(2, "Carl").with_shift_cap(ShiftCode::First, 0),
            ],
        )
        .with_coverage(vec![CoverageRule::new(ShiftCode::Night, 1, Some(1))])
    }

    fn filled(problem: &RosterProblem, code: ShiftCode) -> Roster {
        let names = problem.employees.iter().map(|e| e.name.clone()).collect();
        let mut roster = Roster::new(problem.month, names, problem.days());
        for e in 0..roster.employee_count() {
            for d in 0..roster.day_count() {
                roster.set(e, d, code);
            }
        }
        roster
    }

    #[test]
    fn test_empty_grid_reports_everything_missing() {
        let problem = problem();
        let names = problem.employees.iter().map(|e| e.name.clone()).collect();
        let roster = Roster::new(problem.month, names, problem.days());

        let analysis = analyze(&problem, &roster);
        assert_eq!(analysis.violations_of(UNASSIGNED_CELL).len(), 3 * 29);
        assert_eq!(analysis.violations_of(MINIMUM_COVERAGE).len(), 29);
        assert_eq!(analysis.score.hard, -(3 * 29 + 29));
        assert!(!analysis.is_feasible());
    }

    #[test]
    fn test_all_nights_breaks_caps_and_exemption() {
        let problem = problem();
        let roster = filled(&problem, ShiftCode::Night);

        let analysis = analyze(&problem, &roster);
        assert_eq!(analysis.violations_of(MAXIMUM_COVERAGE).len(), 29);
        assert_eq!(analysis.violations_of(MONTHLY_NIGHT_CAP).len(), 1);
        assert_eq!(analysis.violations_of(MONTHLY_NIGHT_CAP)[0].penalty, 28);
        assert_eq!(analysis.violations_of(NIGHT_EXEMPTION).len(), 29);
        assert!(analysis.violations_of(MINIMUM_COVERAGE).is_empty());
    }

    #[test]
    fn test_shift_cap_and_morning_after_night() {
        let problem = problem();
        let mut roster = filled(&problem, ShiftCode::Second);
        roster.set(2, 0, ShiftCode::Night);
        roster.set(2, 1, ShiftCode::First);

        let analysis = analyze(&problem, &roster);
        let caps = analysis.violations_of(MONTHLY_SHIFT_CAP);
        assert_eq!(caps.len(), 1);
        assert_eq!(caps[0].employee.as_deref(), Some("Carl"));
        assert_eq!(analysis.violations_of(MORNING_AFTER_NIGHT).len(), 1);
        assert_eq!(analysis.violations_of(MORNING_AFTER_NIGHT)[0].day, Some(2));
    }

    #[test]
    fn test_night_balance_ignores_exempt() {
        let problem = problem();
        let mut roster = filled(&problem, ShiftCode::Second);
        for d in 0..4 {
            roster.set(0, d, ShiftCode::Night);
        }

        let analysis = analyze(&problem, &roster);
        let balance = analysis.violations_of(NIGHT_BALANCE);
        assert_eq!(balance.len(), 1);
        // Amy 4, Carl 0
        assert_eq!(balance[0].penalty, 3);
    }

    #[test]
    fn test_week_off_overlap_is_soft() {
        let problem = problem()
            .with_week_off_group("A", "Fri-Sat".parse().unwrap(), ["Amy"])
            .with_week_off_group("B", "Sat-Sun".parse().unwrap(), ["Carl"]);
        let mut roster = filled(&problem, ShiftCode::Second);
        for d in 0..roster.day_count() {
            roster.set(0, d, ShiftCode::Night);
        }
        // Amy 29 nights, Carl none
        let analysis = analyze(&problem, &roster);
        assert_eq!(analysis.violations_of(WEEK_OFF_OVERLAP).len(), 1);
        assert_eq!(analysis.score.soft, -(1 + 28));
    }

    #[test]
    fn test_warnings_put_hard_first() {
        let problem = problem()
            .with_week_off_group("A", "Fri-Sat".parse().unwrap(), ["Amy"])
            .with_week_off_group("B", "Sat-Sun".parse().unwrap(), ["Carl"]);
        let names = problem.employees.iter().map(|e| e.name.clone()).collect();
        let roster = Roster::new(problem.month, names, problem.days());

        let warnings = analyze(&problem, &roster).warnings();
        assert!(warnings.first().is_some_and(|w| w.starts_with("Day 1")));
        assert!(warnings.last().is_some_and(|w| w.starts_with("Week-off groups")));
    }

    #[test]
    fn test_weekend_cap_is_soft() {
        let month = RosterMonth::new(2024, 2).unwrap();
        let problem = RosterProblem::new(
            month,
            vec![
                Employee::new(0, "Amy").with_weekend_cap(5),
                Employee::new(1, "Beth"),
            ],
        );
        let roster = filled(&problem, ShiftCode::Second);

        let analysis = analyze(&problem, &roster);
        // February 2024 has 8 weekend days
        let weekend = analysis.violations_of(WEEKEND_CAP);
        assert_eq!(weekend.len(), 1);
        assert_eq!(weekend[0].employee.as_deref(), Some("Amy"));
        assert_eq!(weekend[0].penalty, 3);
        assert_eq!(analysis.score, RosterScore::of(0, -3));
        assert!(analysis.is_feasible());
    }

    #[test]
    fn test_overflow_policy_makes_caps_soft() {
        let strict = problem();
        let overflow = problem().with_policy(crate::domain::RosterPolicy {
            caps: CapPolicy::Overflow,
            ..Default::default()
        });
        let mut roster = filled(&strict, ShiftCode::Second);
        for d in 0..3 {
            roster.set(0, d, ShiftCode::Night);
        }
        roster.set(2, 10, ShiftCode::First);

        let kind_of = |analysis: &Analysis, name: &str| {
            analysis
                .constraints
                .iter()
                .find(|c| c.name == name)
                .map(|c| c.kind)
        };

        let hard = analyze(&strict, &roster);
        assert_eq!(kind_of(&hard, MONTHLY_NIGHT_CAP), Some(ConstraintKind::Hard));
        assert_eq!(kind_of(&hard, MONTHLY_SHIFT_CAP), Some(ConstraintKind::Hard));

        let soft = analyze(&overflow, &roster);
        assert_eq!(kind_of(&soft, MONTHLY_NIGHT_CAP), Some(ConstraintKind::Soft));
        assert_eq!(kind_of(&soft, MONTHLY_SHIFT_CAP), Some(ConstraintKind::Soft));
        // Amy 2 nights over, Carl 1 morning over; moves from hard to soft
        assert_eq!(hard.score.hard - soft.score.hard, -3);
        assert_eq!(soft.score.soft - hard.score.soft, -3);
    }
}
