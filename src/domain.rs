//! Domain model for the shift roster problem.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::RosterError;

// ============================================================================
// Shift codes
// ============================================================================

/// One cell of the roster grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShiftCode {
    /// Morning / first shift.
    #[serde(rename = "F")]
    First,
    #[serde(rename = "S")]
    Second,
    #[serde(rename = "N")]
    Night,
    #[serde(rename = "G")]
    General,
    #[serde(rename = "E")]
    Evening,
    #[serde(rename = "M")]
    Mid,
    /// Weekly off.
    #[serde(rename = "O")]
    Off,
    /// Festival holiday.
    #[serde(rename = "H")]
    Holiday,
    /// Individual leave.
    #[serde(rename = "L")]
    Leave,
    #[serde(rename = "CO")]
    CompOff,
}

impl ShiftCode {
    /// Working codes in canonical order.
    pub const WORKING: [ShiftCode; 6] = [
        ShiftCode::First,
        ShiftCode::Second,
        ShiftCode::Night,
        ShiftCode::General,
        ShiftCode::Evening,
        ShiftCode::Mid,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ShiftCode::First => "F",
            ShiftCode::Second => "S",
            ShiftCode::Night => "N",
            ShiftCode::General => "G",
            ShiftCode::Evening => "E",
            ShiftCode::Mid => "M",
            ShiftCode::Off => "O",
            ShiftCode::Holiday => "H",
            ShiftCode::Leave => "L",
            ShiftCode::CompOff => "CO",
        }
    }

    /// Returns true for codes that put the employee on duty.
    pub fn is_working(self) -> bool {
        Self::WORKING.contains(&self)
    }

    /// Off and Holiday days; these advance a rotation.
    pub fn is_rest(self) -> bool {
        matches!(self, ShiftCode::Off | ShiftCode::Holiday)
    }
}

impl std::fmt::Display for ShiftCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ShiftCode {
    type Err = RosterError;

    /// Parses a letter code or a long name, ignoring case.
    ///
    /// ```
    /// use shift_roster::domain::ShiftCode;
    ///
    /// assert_eq!("N".parse::<ShiftCode>().unwrap(), ShiftCode::Night);
    /// assert_eq!("morning".parse::<ShiftCode>().unwrap(), ShiftCode::First);
    /// assert_eq!("co".parse::<ShiftCode>().unwrap(), ShiftCode::CompOff);
    /// assert!("X".parse::<ShiftCode>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "F" | "FIRST" | "MORNING" => Ok(ShiftCode::First),
            "S" | "SECOND" => Ok(ShiftCode::Second),
            "N" | "NIGHT" => Ok(ShiftCode::Night),
            "G" | "G1" | "GENERAL" => Ok(ShiftCode::General),
            "E" | "EVENING" => Ok(ShiftCode::Evening),
            "M" | "MID" => Ok(ShiftCode::Mid),
            "O" | "OFF" | "WEEKOFF" | "WEEK-OFF" => Ok(ShiftCode::Off),
            "H" | "HOLIDAY" | "FESTIVAL" => Ok(ShiftCode::Holiday),
            "L" | "LEAVE" => Ok(ShiftCode::Leave),
            "CO" | "COMPOFF" | "COMP-OFF" => Ok(ShiftCode::CompOff),
            _ => Err(RosterError::InvalidShiftCode(s.to_string())),
        }
    }
}

// ============================================================================
// Calendar
// ============================================================================

/// The month being rostered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterMonth {
    pub year: i32,
    pub month: u32,
}

impl RosterMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, RosterError> {
        let candidate = Self { year, month };
        candidate.validate()?;
        Ok(candidate)
    }

    pub fn validate(&self) -> Result<(), RosterError> {
        let valid = (1..=12).contains(&self.month)
            && (1900..=9999).contains(&self.year)
            && self.first_date().is_some();
        if valid {
            Ok(())
        } else {
            Err(RosterError::InvalidMonth {
                year: self.year,
                month: self.month,
            })
        }
    }

    fn first_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Number of days in the month (0 for an invalid month).
    pub fn days_in_month(&self) -> u32 {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        match (
            self.first_date(),
            NaiveDate::from_ymd_opt(next_year, next_month, 1),
        ) {
            (Some(first), Some(next)) => (next - first).num_days() as u32,
            _ => 0,
        }
    }

    /// Date of a 1-based day number.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn weekday(&self, day: u32) -> Option<Weekday> {
        self.date(day).map(|date| date.weekday())
    }

    /// Seed used when the policy does not name one.
    pub fn default_seed(&self) -> u64 {
        (self.year as i64 * 100 + self.month as i64).unsigned_abs()
    }

    pub fn check_day(&self, day: u32) -> Result<(), RosterError> {
        let days_in_month = self.days_in_month();
        if day == 0 || day > days_in_month {
            return Err(RosterError::DayOutOfRange { day, days_in_month });
        }
        Ok(())
    }
}

impl std::fmt::Display for RosterMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Calendar classification used to look up coverage rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayKind {
    Weekday,
    Weekend,
    Festival,
}

/// A single day of the rostered month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Day {
    /// 1-based day of month.
    pub number: u32,
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub weekend: bool,
    pub festival: bool,
}

impl Day {
    /// Festival wins over weekend.
    pub fn kind(&self) -> DayKind {
        if self.festival {
            DayKind::Festival
        } else if self.weekend {
            DayKind::Weekend
        } else {
            DayKind::Weekday
        }
    }
}

/// Returns the English name of a weekday.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// A recurring pair of weekdays off, e.g. "Friday-Saturday".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeekOffPattern {
    first: Weekday,
    second: Weekday,
}

impl WeekOffPattern {
    pub fn new(first: Weekday, second: Weekday) -> Result<Self, RosterError> {
        if first == second {
            return Err(RosterError::InvalidPattern(format!(
                "{}-{}",
                weekday_name(first),
                weekday_name(second)
            )));
        }
        Ok(Self { first, second })
    }

    pub fn days(&self) -> [Weekday; 2] {
        [self.first, self.second]
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.first == weekday || self.second == weekday
    }

    /// True when both patterns share at least one weekday.
    ///
    /// ```
    /// use shift_roster::domain::WeekOffPattern;
    ///
    /// let fri_sat: WeekOffPattern = "Fri-Sat".parse().unwrap();
    /// let sat_sun: WeekOffPattern = "saturday/sunday".parse().unwrap();
    /// let mon_tue: WeekOffPattern = "Mon-Tue".parse().unwrap();
    /// assert!(fri_sat.overlaps(&sat_sun));
    /// assert!(!fri_sat.overlaps(&mon_tue));
    /// assert_eq!(fri_sat.name(), "Friday-Saturday");
    /// ```
    pub fn overlaps(&self, other: &WeekOffPattern) -> bool {
        other.days().iter().any(|d| self.contains(*d))
    }

    pub fn name(&self) -> String {
        format!("{}-{}", weekday_name(self.first), weekday_name(self.second))
    }
}

impl std::str::FromStr for WeekOffPattern {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(|c: char| c == '-' || c == '/' || c == ',' || c == '+' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() != 2 {
            return Err(RosterError::InvalidPattern(s.to_string()));
        }
        let first = parts[0]
            .parse::<Weekday>()
            .map_err(|_| RosterError::InvalidPattern(s.to_string()))?;
        let second = parts[1]
            .parse::<Weekday>()
            .map_err(|_| RosterError::InvalidPattern(s.to_string()))?;
        Self::new(first, second).map_err(|_| RosterError::InvalidPattern(s.to_string()))
    }
}

impl TryFrom<String> for WeekOffPattern {
    type Error = RosterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WeekOffPattern> for String {
    fn from(pattern: WeekOffPattern) -> Self {
        pattern.name()
    }
}

// ============================================================================
// Employees
// ============================================================================

/// How an employee's blank cells are filled.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Role {
    /// Member of the coverage pool.
    #[default]
    Coverage,
    /// Always works the same shift.
    Fixed { shift: ShiftCode },
    /// Cycles through `cycle`, moving on after each block of rest days.
    Rotation {
        cycle: Vec<ShiftCode>,
        #[serde(default)]
        offset: usize,
    },
}

impl Role {
    /// Parses the compact text form used in CSV files:
    /// `coverage`, a single code such as `G`, or a rotation like `F>S>N`.
    pub fn parse(text: &str) -> Result<Self, RosterError> {
        let text = text.trim();
        if text.is_empty() || text.eq_ignore_ascii_case("coverage") || text.eq_ignore_ascii_case("pool")
        {
            return Ok(Role::Coverage);
        }
        if text.contains('>') {
            let cycle = text
                .split('>')
                .map(|p| p.parse::<ShiftCode>())
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Role::Rotation { cycle, offset: 0 });
        }
        Ok(Role::Fixed {
            shift: text.parse()?,
        })
    }
}

/// An employee who can be rostered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    /// Index of this employee in `RosterProblem.employees`.
    pub index: usize,
    pub name: String,
    pub team: Option<String>,
    pub role: Role,
    /// Maximum Night shifts in the month.
    pub night_cap: Option<u32>,
    /// Never (or only reluctantly) given Night.
    pub night_exempt: bool,
    /// Monthly maximum per shift code.
    pub shift_caps: BTreeMap<ShiftCode, u32>,
    /// Maximum weekend days worked in the month.
    pub weekend_cap: Option<u32>,
    pub week_off: Option<WeekOffPattern>,
}

impl Employee {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            team: None,
            role: Role::Coverage,
            night_cap: None,
            night_exempt: false,
            shift_caps: BTreeMap::new(),
            weekend_cap: None,
            week_off: None,
        }
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_night_cap(mut self, cap: u32) -> Self {
        self.night_cap = Some(cap);
        self
    }

    pub fn night_exempt(mut self) -> Self {
        self.night_exempt = true;
        self
    }

    pub fn with_shift_cap(mut self, shift: ShiftCode, cap: u32) -> Self {
        self.shift_caps.insert(shift, cap);
        self
    }

    pub fn with_weekend_cap(mut self, cap: u32) -> Self {
        self.weekend_cap = Some(cap);
        self
    }

    pub fn with_week_off(mut self, pattern: WeekOffPattern) -> Self {
        self.week_off = Some(pattern);
        self
    }

    pub fn is_coverage(&self) -> bool {
        matches!(self.role, Role::Coverage)
    }

    /// Monthly cap for a shift; for Night the tighter of `night_cap` and `shift_caps`.
    pub fn cap_for(&self, shift: ShiftCode) -> Option<u32> {
        let listed = self.shift_caps.get(&shift).copied();
        if shift == ShiftCode::Night {
            match (self.night_cap, listed) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            }
        } else {
            listed
        }
    }

    fn validate(&self) -> Result<(), RosterError> {
        if self.name.trim().is_empty() {
            return Err(RosterError::BlankEmployeeName);
        }
        let invalid = |reason: &str| RosterError::InvalidRole {
            employee: self.name.clone(),
            reason: reason.to_string(),
        };
        match &self.role {
            Role::Coverage => Ok(()),
            Role::Fixed { shift } if !shift.is_working() => {
                Err(invalid(&format!("fixed shift {} is not a working shift", shift)))
            }
            Role::Fixed { .. } => Ok(()),
            Role::Rotation { cycle, .. } if cycle.is_empty() => Err(invalid("rotation is empty")),
            Role::Rotation { cycle, .. } => match cycle.iter().find(|c| !c.is_working()) {
                Some(code) => Err(invalid(&format!(
                    "rotation contains non-working shift {}",
                    code
                ))),
                None => Ok(()),
            },
        }
    }
}

// ============================================================================
// Coverage requirements
// ============================================================================

/// Daily headcount bounds for one shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub min: u32,
    pub max: Option<u32>,
}

impl Bounds {
    pub fn shortfall(&self, count: u32) -> u32 {
        self.min.saturating_sub(count)
    }

    pub fn excess(&self, count: u32) -> u32 {
        self.max.map(|max| count.saturating_sub(max)).unwrap_or(0)
    }

    /// Remaining room under the maximum; `None` means unbounded.
    pub fn headroom(&self, count: u32) -> Option<u32> {
        self.max.map(|max| max.saturating_sub(count))
    }
}

/// Headcount requirement for one shift on one kind of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageRule {
    pub shift: ShiftCode,
    /// `None` applies to every weekday and weekend day.
    #[serde(default)]
    pub day_kind: Option<DayKind>,
    #[serde(default)]
    pub min: u32,
    #[serde(default)]
    pub max: Option<u32>,
}

impl CoverageRule {
    pub fn new(shift: ShiftCode, min: u32, max: Option<u32>) -> Self {
        Self {
            shift,
            day_kind: None,
            min,
            max,
        }
    }

    pub fn on(mut self, day_kind: DayKind) -> Self {
        self.day_kind = Some(day_kind);
        self
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            min: self.min,
            max: self.max,
        }
    }
}

/// All coverage rules of a problem.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoverageTable {
    pub rules: Vec<CoverageRule>,
}

impl CoverageTable {
    pub fn new(rules: Vec<CoverageRule>) -> Self {
        Self { rules }
    }

    /// Bounds for a shift on a kind of day.
    ///
    /// A rule for the specific kind wins over a catch-all rule. Festivals only
    /// use rules written for them.
    pub fn bounds(&self, shift: ShiftCode, kind: DayKind) -> Option<Bounds> {
        let specific = self
            .rules
            .iter()
            .find(|r| r.shift == shift && r.day_kind == Some(kind));
        if let Some(rule) = specific {
            return Some(rule.bounds());
        }
        if kind == DayKind::Festival {
            return None;
        }
        self.rules
            .iter()
            .find(|r| r.shift == shift && r.day_kind.is_none())
            .map(CoverageRule::bounds)
    }

    /// Shifts with a rule for this kind of day, Night first then table order.
    pub fn required_shifts(&self, kind: DayKind) -> Vec<ShiftCode> {
        let mut shifts: Vec<ShiftCode> = Vec::new();
        for rule in &self.rules {
            if !shifts.contains(&rule.shift) && self.bounds(rule.shift, kind).is_some() {
                shifts.push(rule.shift);
            }
        }
        if let Some(pos) = shifts.iter().position(|s| *s == ShiftCode::Night) {
            let night = shifts.remove(pos);
            shifts.insert(0, night);
        }
        shifts
    }

    pub fn validate(&self) -> Result<(), RosterError> {
        let mut seen = BTreeSet::new();
        for rule in &self.rules {
            let invalid = |reason: &str| RosterError::InvalidCoverage {
                shift: rule.shift,
                reason: reason.to_string(),
            };
            if !rule.shift.is_working() {
                return Err(invalid("not a working shift"));
            }
            if let Some(max) = rule.max {
                if rule.min > max {
                    return Err(invalid(&format!("min {} exceeds max {}", rule.min, max)));
                }
            }
            let key = (rule.shift, rule.day_kind.map(|k| k as u8));
            if !seen.insert(key) {
                return Err(invalid("duplicate rule for the same kind of day"));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Policies
// ============================================================================

/// How candidates with equal standing are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TieBreak {
    /// Seeded shuffle, then fewest of this shift so far.
    #[default]
    FewestAssigned,
    /// Seeded shuffle only.
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExemptionPolicy {
    /// Exempt employees never get Night.
    #[default]
    Strict,
    /// Exempt employees get Night only when nobody else is left.
    Preferred,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CapPolicy {
    /// Employees at a cap are skipped.
    #[default]
    Strict,
    /// Employees at a cap are used after everyone else.
    Overflow,
}

/// Knobs of the greedy filler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RosterPolicy {
    pub tie_break: TieBreak,
    pub night_exemption: ExemptionPolicy,
    pub caps: CapPolicy,
    pub default_shift: ShiftCode,
    pub fallback_order: Vec<ShiftCode>,
    /// Do not put someone on First the day after a Night.
    pub rest_after_night: bool,
    pub seed: Option<u64>,
}

impl Default for RosterPolicy {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::default(),
            night_exemption: ExemptionPolicy::default(),
            caps: CapPolicy::default(),
            default_shift: ShiftCode::Second,
            fallback_order: vec![ShiftCode::Second, ShiftCode::First, ShiftCode::General],
            rest_after_night: true,
            seed: None,
        }
    }
}

// ============================================================================
// Problem
// ============================================================================

/// Employees sharing a week-off pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekOffGroup {
    pub name: String,
    pub pattern: WeekOffPattern,
    pub members: Vec<String>,
}

/// A cell fixed before generation, e.g. planned leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellOverride {
    pub employee: usize,
    pub day: u32,
    pub code: ShiftCode,
}

/// Everything the generator needs to fill one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterProblem {
    pub month: RosterMonth,
    pub employees: Vec<Employee>,
    pub coverage: CoverageTable,
    /// Festival day numbers.
    pub festivals: BTreeSet<u32>,
    pub weekend: Vec<Weekday>,
    pub week_off_groups: Vec<WeekOffGroup>,
    pub overrides: Vec<CellOverride>,
    pub policy: RosterPolicy,
}

impl RosterProblem {
    pub fn new(month: RosterMonth, employees: Vec<Employee>) -> Self {
        Self {
            month,
            employees,
            coverage: CoverageTable::default(),
            festivals: BTreeSet::new(),
            weekend: vec![Weekday::Sat, Weekday::Sun],
            week_off_groups: Vec::new(),
            overrides: Vec::new(),
            policy: RosterPolicy::default(),
        }
    }

    pub fn with_coverage(mut self, rules: Vec<CoverageRule>) -> Self {
        self.coverage = CoverageTable::new(rules);
        self
    }

    pub fn with_festivals(mut self, days: impl IntoIterator<Item = u32>) -> Self {
        self.festivals.extend(days);
        self
    }

    pub fn with_week_off_group(
        mut self,
        name: impl Into<String>,
        pattern: WeekOffPattern,
        members: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.week_off_groups.push(WeekOffGroup {
            name: name.into(),
            pattern,
            members: members.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn with_override(mut self, employee: usize, day: u32, code: ShiftCode) -> Self {
        self.overrides.push(CellOverride {
            employee,
            day,
            code,
        });
        self
    }

    pub fn with_policy(mut self, policy: RosterPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn seed(&self) -> u64 {
        self.policy.seed.unwrap_or_else(|| self.month.default_seed())
    }

    /// Calendar of the month with weekend and festival flags.
    pub fn days(&self) -> Vec<Day> {
        (1..=self.month.days_in_month())
            .filter_map(|number| {
                let date = self.month.date(number)?;
                let weekday = date.weekday();
                Some(Day {
                    number,
                    date,
                    weekday,
                    weekend: self.weekend.contains(&weekday),
                    festival: self.festivals.contains(&number),
                })
            })
            .collect()
    }

    pub fn employee_index(&self, name: &str) -> Option<usize> {
        self.employees.iter().position(|e| e.name == name)
    }

    pub fn coverage_pool(&self) -> impl Iterator<Item = &Employee> {
        self.employees.iter().filter(|e| e.is_coverage())
    }

    /// Week-off pattern per employee index, groups first then personal patterns.
    pub fn week_offs(&self) -> Vec<Option<WeekOffPattern>> {
        let mut patterns: Vec<Option<WeekOffPattern>> =
            self.employees.iter().map(|e| e.week_off).collect();
        for group in &self.week_off_groups {
            for member in &group.members {
                if let Some(idx) = self.employee_index(member) {
                    patterns[idx] = Some(group.pattern);
                }
            }
        }
        patterns
    }

    /// Rejects configurations the generator cannot work with.
    pub fn validate(&self) -> Result<(), RosterError> {
        self.month.validate()?;
        if self.employees.is_empty() {
            return Err(RosterError::EmptyRoster);
        }

        let mut names: HashMap<&str, usize> = HashMap::new();
        for (position, employee) in self.employees.iter().enumerate() {
            employee.validate()?;
            // Grid rows are addressed by index.
            if employee.index != position {
                return Err(RosterError::MisplacedEmployee {
                    employee: employee.name.clone(),
                    index: employee.index,
                    position,
                });
            }
            if names.insert(employee.name.as_str(), employee.index).is_some() {
                return Err(RosterError::DuplicateEmployee(employee.name.clone()));
            }
        }

        self.coverage.validate()?;

        let policy = &self.policy;
        if !policy.default_shift.is_working() || policy.default_shift == ShiftCode::Night {
            return Err(RosterError::InvalidDefaultShift(policy.default_shift));
        }
        if let Some(code) = policy.fallback_order.iter().find(|c| !c.is_working()) {
            return Err(RosterError::InvalidDefaultShift(*code));
        }

        for day in &self.festivals {
            self.month.check_day(*day)?;
        }
        for cell in &self.overrides {
            if cell.employee >= self.employees.len() {
                return Err(RosterError::UnknownEmployee(format!("#{}", cell.employee)));
            }
            self.month.check_day(cell.day)?;
        }

        // An employee may follow only one week-off pattern.
        let mut assigned: HashMap<&str, String> = HashMap::new();
        for group in &self.week_off_groups {
            for member in &group.members {
                let idx = self
                    .employee_index(member)
                    .ok_or_else(|| RosterError::UnknownEmployee(member.clone()))?;
                let label = format!("{} ({})", group.name, group.pattern.name());
                if let Some(previous) = assigned.get(member.as_str()) {
                    return Err(RosterError::ConflictingWeekOff {
                        employee: member.clone(),
                        first: previous.clone(),
                        second: label,
                    });
                }
                if let Some(own) = self.employees[idx].week_off {
                    if own != group.pattern {
                        return Err(RosterError::ConflictingWeekOff {
                            employee: member.clone(),
                            first: own.name(),
                            second: label,
                        });
                    }
                }
                assigned.insert(member.as_str(), label);
            }
        }

        Ok(())
    }
}

// ============================================================================
// Roster grid
// ============================================================================

/// The employee × day grid of shift codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    pub month: RosterMonth,
    pub employees: Vec<String>,
    pub days: Vec<Day>,
    cells: Vec<Vec<Option<ShiftCode>>>,
}

impl Roster {
    /// Creates an empty grid.
    pub fn new(month: RosterMonth, employees: Vec<String>, days: Vec<Day>) -> Self {
        let cells = vec![vec![None; days.len()]; employees.len()];
        Self {
            month,
            employees,
            days,
            cells,
        }
    }

    /// Creates a grid from employee-major rows; rows are padded or truncated to the month.
    pub fn from_rows(
        month: RosterMonth,
        employees: Vec<String>,
        days: Vec<Day>,
        rows: Vec<Vec<Option<ShiftCode>>>,
    ) -> Self {
        let mut roster = Self::new(month, employees, days);
        for (e, row) in rows.into_iter().enumerate().take(roster.employees.len()) {
            for (d, code) in row.into_iter().enumerate().take(roster.days.len()) {
                roster.cells[e][d] = code;
            }
        }
        roster
    }

    pub fn employee_count(&self) -> usize {
        self.employees.len()
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Cell at employee index `e` and 0-based day index `d`.
    pub fn get(&self, e: usize, d: usize) -> Option<ShiftCode> {
        self.cells.get(e).and_then(|row| row.get(d)).copied().flatten()
    }

    pub fn set(&mut self, e: usize, d: usize, code: ShiftCode) {
        if let Some(cell) = self.cells.get_mut(e).and_then(|row| row.get_mut(d)) {
            *cell = Some(code);
        }
    }

    pub fn is_blank(&self, e: usize, d: usize) -> bool {
        self.get(e, d).is_none()
    }

    pub fn row(&self, e: usize) -> &[Option<ShiftCode>] {
        self.cells.get(e).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rows(&self) -> &[Vec<Option<ShiftCode>>] {
        &self.cells
    }

    pub fn count_on_day(&self, d: usize, code: ShiftCode) -> u32 {
        self.cells
            .iter()
            .filter(|row| row.get(d).copied().flatten() == Some(code))
            .count() as u32
    }

    pub fn count_for_employee(&self, e: usize, code: ShiftCode) -> u32 {
        self.row(e).iter().filter(|c| **c == Some(code)).count() as u32
    }

    /// Weekend days on which the employee works.
    pub fn weekend_worked(&self, e: usize) -> u32 {
        self.row(e)
            .iter()
            .zip(&self.days)
            .filter(|(cell, day)| day.weekend && cell.is_some_and(ShiftCode::is_working))
            .count() as u32
    }

    pub fn unassigned(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_none()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.unassigned() == 0
    }

    pub fn employee_index(&self, name: &str) -> Option<usize> {
        self.employees.iter().position(|e| e == name)
    }

    /// Marks the given 1-based days as leave for one employee.
    ///
    /// Returns the number of cells that changed.
    pub fn apply_leave(
        &mut self,
        employee: &str,
        days: &[u32],
        code: ShiftCode,
    ) -> Result<usize, RosterError> {
        if code.is_working() {
            return Err(RosterError::InvalidLeaveCode(code));
        }
        let e = self
            .employee_index(employee)
            .ok_or_else(|| RosterError::UnknownEmployee(employee.to_string()))?;
        for day in days {
            self.month.check_day(*day)?;
        }

        let mut changed = 0;
        for day in days {
            let d = (*day - 1) as usize;
            if self.get(e, d) != Some(code) {
                self.set(e, d, code);
                changed += 1;
            }
        }
        Ok(changed)
    }
}
