//! Demo data generators for shift rostering.

use chrono::Weekday;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::domain::{
    CoverageRule, DayKind, Employee, Role, RosterMonth, RosterProblem, ShiftCode, WeekOffPattern,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoData {
    Small,
    Large,
}

impl std::str::FromStr for DemoData {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SMALL" => Ok(DemoData::Small),
            "LARGE" => Ok(DemoData::Large),
            _ => Err(()),
        }
    }
}

impl DemoData {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemoData::Small => "SMALL",
            DemoData::Large => "LARGE",
        }
    }

    fn parameters(&self) -> DemoDataParameters {
        match self {
            DemoData::Small => DemoDataParameters {
                year: 2024,
                month: 6,
                employee_count: 12,
                general_count: 3,
                rotation_count: 1,
                exempt_count: 2,
                night_cap: 8,
                week_offs: vec![("Weekend", "Sat-Sun"), ("Midweek", "Tue-Wed")],
                festivals: vec![17],
                coverage: vec![
                    CoverageRule::new(ShiftCode::First, 2, Some(3)),
                    CoverageRule::new(ShiftCode::Night, 1, Some(2)),
                    CoverageRule::new(ShiftCode::First, 1, Some(2)).on(DayKind::Weekend),
                    CoverageRule::new(ShiftCode::Night, 1, Some(1)).on(DayKind::Festival),
                ],
            },
            DemoData::Large => DemoDataParameters {
                year: 2024,
                month: 3,
                employee_count: 30,
                general_count: 4,
                rotation_count: 2,
                exempt_count: 4,
                night_cap: 7,
                week_offs: vec![
                    ("Weekend", "Sat-Sun"),
                    ("Early week", "Mon-Tue"),
                    ("Late week", "Thu-Fri"),
                ],
                festivals: vec![8, 25],
                coverage: vec![
                    CoverageRule::new(ShiftCode::First, 4, Some(6)),
                    CoverageRule::new(ShiftCode::Second, 4, Some(8)),
                    CoverageRule::new(ShiftCode::Night, 3, Some(3)),
                    CoverageRule::new(ShiftCode::First, 2, Some(3)).on(DayKind::Weekend),
                    CoverageRule::new(ShiftCode::Second, 2, Some(4)).on(DayKind::Weekend),
                    CoverageRule::new(ShiftCode::Night, 2, Some(2)).on(DayKind::Weekend),
                    CoverageRule::new(ShiftCode::Night, 2, Some(2)).on(DayKind::Festival),
                ],
            },
        }
    }
}

struct DemoDataParameters {
    year: i32,
    month: u32,
    employee_count: usize,
    /// Employees fixed on General.
    general_count: usize,
    rotation_count: usize,
    exempt_count: usize,
    night_cap: u32,
    week_offs: Vec<(&'static str, &'static str)>,
    festivals: Vec<u32>,
    coverage: Vec<CoverageRule>,
}

/// List of available demo data sets.
///
/// ```
/// use shift_roster::demo_data::{list_demo_data, DemoData};
///
/// for name in list_demo_data() {
///     let demo: DemoData = name.parse().unwrap();
///     assert_eq!(demo.as_str(), name);
/// }
/// ```
pub fn list_demo_data() -> Vec<&'static str> {
    vec!["SMALL", "LARGE"]
}

/// Generates a demo problem for the given size.
pub fn generate(demo: DemoData) -> RosterProblem {
    let params = demo.parameters();
    let mut rng = StdRng::seed_from_u64(0);
    let month = RosterMonth {
        year: params.year,
        month: params.month,
    };

    let name_permutations = generate_name_permutations(&mut rng);
    let teams = ["L1", "L2", "L3"];

    let mut employees: Vec<Employee> = (0..params.employee_count)
        .map(|i| {
            let name = name_permutations[i % name_permutations.len()].clone();
            let team = teams.choose(&mut rng).copied().unwrap_or("L1");
            Employee::new(i, name).with_team(team)
        })
        .collect();

    // Leading employees get fixed roles, the rest form the coverage pool.
    let rotation_cycle = vec![ShiftCode::First, ShiftCode::Second, ShiftCode::Evening];
    for (i, employee) in employees.iter_mut().enumerate() {
        if i < params.general_count {
            employee.role = Role::Fixed {
                shift: ShiftCode::General,
            };
        } else if i < params.general_count + params.rotation_count {
            employee.role = Role::Rotation {
                cycle: rotation_cycle.clone(),
                offset: i,
            };
            employee.week_off = WeekOffPattern::new(Weekday::Sat, Weekday::Sun).ok();
        } else {
            employee.night_cap = Some(params.night_cap);
        }
    }

    let pool: Vec<usize> = employees
        .iter()
        .filter(|e| e.is_coverage())
        .map(|e| e.index)
        .collect();
    for &idx in pool.choose_multiple(&mut rng, params.exempt_count) {
        employees[idx].night_exempt = true;
        employees[idx].night_cap = None;
    }

    let mut problem = RosterProblem::new(month, employees)
        .with_coverage(params.coverage)
        .with_festivals(params.festivals);

    // Spread the pool round-robin over the week-off groups.
    for (g, (group_name, pattern)) in params.week_offs.iter().enumerate() {
        let Ok(pattern) = pattern.parse::<WeekOffPattern>() else {
            continue;
        };
        let members: Vec<String> = pool
            .iter()
            .skip(g)
            .step_by(params.week_offs.len())
            .map(|&idx| problem.employees[idx].name.clone())
            .collect();
        problem = problem.with_week_off_group(*group_name, pattern, members);
    }

    problem
}

const FIRST_NAMES: &[&str] = &[
    "Amy", "Beth", "Carl", "Dan", "Elsa", "Flo", "Gus", "Hugo", "Ivy", "Jay",
];
const LAST_NAMES: &[&str] = &[
    "Cole", "Fox", "Green", "Jones", "King", "Li", "Poe", "Rye", "Smith", "Watt",
];

fn generate_name_permutations(rng: &mut StdRng) -> Vec<String> {
    let mut names = Vec::with_capacity(FIRST_NAMES.len() * LAST_NAMES.len());
    for first in FIRST_NAMES {
        for last in LAST_NAMES {
            names.push(format!("{} {}", first, last));
        }
    }
    names.shuffle(rng);
    names
}
