//! Greedy day-by-day roster generator.
//!
//! Fills the grid in one pass:
//! 1. pinned overrides, festival holidays and week-offs
//! 2. fixed-shift employees
//! 3. rotation employees
//! 4. per-day coverage from the pool, ordered by the tie-break policy
//! 5. catch-all codes for anyone still blank
//!
//! Requirements that cannot be met are reported by the analysis afterwards;
//! nothing is repaired.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::constraints::{self, Analysis};
use crate::domain::{
    CapPolicy, Day, ExemptionPolicy, Role, Roster, RosterProblem, ShiftCode, TieBreak,
};
use crate::error::RosterError;

/// Counters collected while filling the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Cells set by overrides, festivals and week-offs.
    pub premarked: usize,
    pub fixed: usize,
    pub rotated: usize,
    /// Cells filled to meet a coverage minimum.
    pub covered: usize,
    /// Cells filled from the fallback order or the default shift.
    pub defaulted: usize,
    /// Headcount still missing after the coverage pass, summed over days.
    pub unmet: u32,
    pub duration: Duration,
}

/// A generated roster with its analysis.
#[derive(Debug, Clone)]
pub struct Generated {
    pub roster: Roster,
    pub analysis: Analysis,
    pub stats: GenerationStats,
}

/// Generates a roster for the problem.
///
/// Fails only on configuration errors; coverage shortfalls end up in
/// `Generated.analysis`.
pub fn generate(problem: &RosterProblem) -> Result<Generated, RosterError> {
    problem.validate()?;
    let start = Instant::now();

    info!(
        month = %problem.month,
        employees = problem.employees.len(),
        pool = problem.coverage_pool().count(),
        seed = problem.seed(),
        "Generating roster"
    );

    let mut filler = Filler::new(problem);
    filler.premark();
    filler.assign_fixed();
    filler.assign_rotations();
    for d in 0..filler.days.len() {
        filler.cover_day(d);
        filler.fill_blanks(d);
    }

    let Filler {
        roster, mut stats, ..
    } = filler;
    stats.duration = start.elapsed();

    let analysis = constraints::analyze(problem, &roster);
    for violation in analysis.violations_of(constraints::MINIMUM_COVERAGE) {
        warn!("{}", violation.message);
    }

    info!(
        month = %problem.month,
        score = %analysis.score,
        feasible = analysis.is_feasible(),
        duration_ms = stats.duration.as_millis() as u64,
        "Roster generated"
    );

    #[cfg(feature = "console")]
    crate::console::print_generation_summary(problem, &stats, &analysis);

    Ok(Generated {
        roster,
        analysis,
        stats,
    })
}

/// Working state of one generation run.
struct Filler<'a> {
    problem: &'a RosterProblem,
    days: Vec<Day>,
    roster: Roster,
    /// Cells set by an override; never reassigned.
    pinned: Vec<Vec<bool>>,
    rng: StdRng,
    stats: GenerationStats,
}

impl<'a> Filler<'a> {
    fn new(problem: &'a RosterProblem) -> Self {
        let days = problem.days();
        let names = problem.employees.iter().map(|e| e.name.clone()).collect();
        let roster = Roster::new(problem.month, names, days.clone());
        let pinned = vec![vec![false; days.len()]; problem.employees.len()];
        Self {
            problem,
            days,
            roster,
            pinned,
            rng: StdRng::seed_from_u64(problem.seed()),
            stats: GenerationStats::default(),
        }
    }

    /// Overrides, then festival holidays, then week-offs.
    fn premark(&mut self) {
        for cell in &self.problem.overrides {
            let d = (cell.day - 1) as usize;
            self.roster.set(cell.employee, d, cell.code);
            self.pinned[cell.employee][d] = true;
            self.stats.premarked += 1;
        }

        for (d, day) in self.days.iter().enumerate() {
            if !day.festival {
                continue;
            }
            for e in 0..self.problem.employees.len() {
                if self.roster.is_blank(e, d) {
                    self.roster.set(e, d, ShiftCode::Holiday);
                    self.stats.premarked += 1;
                }
            }
        }

        for (e, pattern) in self.problem.week_offs().into_iter().enumerate() {
            let Some(pattern) = pattern else { continue };
            for (d, day) in self.days.iter().enumerate() {
                if pattern.contains(day.weekday) && self.roster.is_blank(e, d) {
                    self.roster.set(e, d, ShiftCode::Off);
                    self.stats.premarked += 1;
                }
            }
        }
    }

    fn assign_fixed(&mut self) {
        for employee in &self.problem.employees {
            let Role::Fixed { shift } = employee.role else {
                continue;
            };
            for d in 0..self.days.len() {
                if self.roster.is_blank(employee.index, d) {
                    self.roster.set(employee.index, d, shift);
                    self.stats.fixed += 1;
                }
            }
        }
    }

    /// Walks each rotation employee's row; the cycle moves on at the first
    /// working day after a block of Off/Holiday days.
    fn assign_rotations(&mut self) {
        for employee in &self.problem.employees {
            let Role::Rotation { cycle, offset } = &employee.role else {
                continue;
            };
            let e = employee.index;
            let mut pointer = 0usize;
            let mut worked = false;
            let mut advance = false;

            for d in 0..self.days.len() {
                match self.roster.get(e, d) {
                    Some(code) if code.is_rest() => {
                        if worked {
                            advance = true;
                            worked = false;
                        }
                    }
                    Some(code) if !code.is_working() => {}
                    existing => {
                        if advance {
                            pointer += 1;
                            advance = false;
                        }
                        if existing.is_none() {
                            let len = cycle.len();
                            let shift = cycle[(offset % len + pointer % len) % len];
                            self.roster.set(e, d, shift);
                            self.stats.rotated += 1;
                        }
                        worked = true;
                    }
                }
            }
        }
    }

    /// Assigns pool employees to every shift still short of its minimum.
    fn cover_day(&mut self, d: usize) {
        let day = self.days[d];
        let kind = day.kind();

        for shift in self.problem.coverage.required_shifts(kind) {
            let Some(bounds) = self.problem.coverage.bounds(shift, kind) else {
                continue;
            };
            let count = self.roster.count_on_day(d, shift);
            let mut need = bounds.shortfall(count);
            if let Some(headroom) = bounds.headroom(count) {
                need = need.min(headroom);
            }
            if need == 0 {
                continue;
            }

            let (mut preferred, mut reserve) = self.candidates(d, shift);
            self.order(&mut preferred, shift);
            self.order(&mut reserve, shift);

            let picks: Vec<usize> = preferred
                .into_iter()
                .chain(reserve)
                .take(need as usize)
                .collect();
            for &e in &picks {
                self.roster.set(e, d, shift);
                self.stats.covered += 1;
            }

            let missing = need - picks.len() as u32;
            if missing > 0 {
                self.stats.unmet += missing;
                debug!(day = day.number, shift = %shift, missing, "Not enough candidates");
            } else {
                debug!(day = day.number, shift = %shift, picked = picks.len(), "Shift covered");
            }
        }
    }

    /// Pool employees free on day `d`, split into those eligible for `shift`
    /// and those usable only when the policy allows a second pass.
    fn candidates(&self, d: usize, shift: ShiftCode) -> (Vec<usize>, Vec<usize>) {
        let day = self.days[d];
        let policy = &self.problem.policy;
        let mut preferred = Vec::new();
        let mut reserve = Vec::new();

        for employee in self.problem.coverage_pool() {
            let e = employee.index;
            let available = match self.roster.get(e, d) {
                None => true,
                Some(ShiftCode::Holiday) => day.festival && !self.pinned[e][d],
                Some(_) => false,
            };
            if !available {
                continue;
            }

            if shift == ShiftCode::First && policy.rest_after_night && self.follows_night(e, d) {
                continue;
            }

            let mut reserved = false;

            if shift == ShiftCode::Night && employee.night_exempt {
                match policy.night_exemption {
                    ExemptionPolicy::Strict => continue,
                    ExemptionPolicy::Preferred => reserved = true,
                }
            }

            let over_cap = employee
                .cap_for(shift)
                .is_some_and(|cap| self.roster.count_for_employee(e, shift) >= cap);
            let over_weekend = day.weekend
                && employee
                    .weekend_cap
                    .is_some_and(|cap| self.roster.weekend_worked(e) >= cap);
            if over_cap || over_weekend {
                match policy.caps {
                    CapPolicy::Strict => continue,
                    CapPolicy::Overflow => reserved = true,
                }
            }

            if reserved {
                reserve.push(e);
            } else {
                preferred.push(e);
            }
        }

        (preferred, reserve)
    }

    fn follows_night(&self, e: usize, d: usize) -> bool {
        d > 0 && self.roster.get(e, d - 1) == Some(ShiftCode::Night)
    }

    /// Seeded shuffle; with `FewestAssigned` a stable sort by running counts follows.
    fn order(&mut self, candidates: &mut [usize], shift: ShiftCode) {
        candidates.shuffle(&mut self.rng);
        if self.problem.policy.tie_break == TieBreak::FewestAssigned {
            let roster = &self.roster;
            candidates.sort_by_key(|&e| {
                let worked = roster
                    .row(e)
                    .iter()
                    .filter(|c| c.is_some_and(ShiftCode::is_working))
                    .count();
                (roster.count_for_employee(e, shift), worked)
            });
        }
    }

    /// Gives every remaining blank on day `d` a fallback or the default shift,
    /// or Off on a weekend day once the employee's weekend cap is used up.
    fn fill_blanks(&mut self, d: usize) {
        let day = self.days[d];
        let kind = day.kind();
        let policy = &self.problem.policy;

        for employee in &self.problem.employees {
            let e = employee.index;
            if !self.roster.is_blank(e, d) {
                continue;
            }

            // Weekend cap reached: rest instead of a catch-all shift.
            let weekend_full = day.weekend
                && employee
                    .weekend_cap
                    .is_some_and(|cap| self.roster.weekend_worked(e) >= cap);
            if weekend_full {
                self.roster.set(e, d, ShiftCode::Off);
                self.stats.defaulted += 1;
                continue;
            }

            let chosen = policy
                .fallback_order
                .iter()
                .copied()
                .find(|&shift| {
                    let has_room = self
                        .problem
                        .coverage
                        .bounds(shift, kind)
                        .and_then(|b| b.headroom(self.roster.count_on_day(d, shift)))
                        .map_or(true, |room| room > 0);
                    let under_cap = employee
                        .cap_for(shift)
                        .map_or(true, |cap| self.roster.count_for_employee(e, shift) < cap);
                    let allowed = !(shift == ShiftCode::Night && employee.night_exempt)
                        && !(shift == ShiftCode::First
                            && policy.rest_after_night
                            && self.follows_night(e, d));
                    has_room && under_cap && allowed
                })
                .unwrap_or(policy.default_shift);

            self.roster.set(e, d, chosen);
            self.stats.defaulted += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo_data::{self, DemoData};
    use crate::domain::{
        CoverageRule, DayKind, Employee, RosterMonth, RosterPolicy, WeekOffPattern,
    };

    fn pool(count: usize) -> Vec<Employee> {
        (0..count)
            .map(|i| Employee::new(i, format!("Employee {}", i + 1)))
            .collect()
    }

    fn june_2024() -> RosterMonth {
        RosterMonth::new(2024, 6).unwrap()
    }

    #[test]
    fn test_every_cell_filled() {
        let problem = demo_data::generate(DemoData::Small);
        let generated = generate(&problem).unwrap();

        assert!(generated.roster.is_complete());
        assert_eq!(generated.roster.employee_count(), problem.employees.len());
        assert_eq!(
            generated.roster.day_count() as u32,
            problem.month.days_in_month()
        );
    }

    #[test]
    fn test_empty_roster_is_rejected() {
        let problem = RosterProblem::new(june_2024(), vec![]);
        assert!(matches!(generate(&problem), Err(RosterError::EmptyRoster)));
    }

    #[test]
    fn test_general_group_with_morning_and_night_requirement() {
        // 30-day month, 3 fixed General employees, 3 F + 2 N every day.
        let mut employees = pool(12);
        for e in employees.iter_mut().take(3) {
            e.role = Role::Fixed {
                shift: ShiftCode::General,
            };
        }
        let problem = RosterProblem::new(june_2024(), employees).with_coverage(vec![
            CoverageRule::new(ShiftCode::First, 3, None),
            CoverageRule::new(ShiftCode::Night, 2, Some(2)),
        ]);

        let generated = generate(&problem).unwrap();
        let roster = &generated.roster;

        assert_eq!(roster.day_count(), 30);
        for d in 0..roster.day_count() {
            assert!(
                roster.count_on_day(d, ShiftCode::First) >= 3,
                "day {} has fewer than 3 F",
                d + 1
            );
            assert!(
                roster.count_on_day(d, ShiftCode::Night) >= 2,
                "day {} has fewer than 2 N",
                d + 1
            );
            assert_eq!(roster.count_on_day(d, ShiftCode::General), 3);
        }
        assert_eq!(generated.stats.unmet, 0);
    }

    #[test]
    fn test_night_max_is_never_exceeded() {
        let problem = RosterProblem::new(june_2024(), pool(10))
            .with_coverage(vec![CoverageRule::new(ShiftCode::Night, 2, Some(2))])
            .with_policy(RosterPolicy {
                fallback_order: vec![ShiftCode::Night, ShiftCode::Second],
                ..RosterPolicy::default()
            });

        let roster = generate(&problem).unwrap().roster;
        for d in 0..roster.day_count() {
            assert!(roster.count_on_day(d, ShiftCode::Night) <= 2);
        }
    }

    #[test]
    fn test_night_cap_is_respected() {
        let employees: Vec<Employee> = pool(6)
            .into_iter()
            .map(|e| e.with_night_cap(4))
            .collect();
        let problem = RosterProblem::new(june_2024(), employees)
            .with_coverage(vec![CoverageRule::new(ShiftCode::Night, 1, Some(1))]);

        let generated = generate(&problem).unwrap();
        for e in 0..generated.roster.employee_count() {
            assert!(generated.roster.count_for_employee(e, ShiftCode::Night) <= 4);
        }
        // 6 × 4 = 24 nights available for 30 days
        assert_eq!(generated.stats.unmet, 6);
        assert!(!generated.analysis.is_feasible());
    }

    #[test]
    fn test_overflow_policy_uses_capped_employees() {
        let employees: Vec<Employee> = pool(6)
            .into_iter()
            .map(|e| e.with_night_cap(4))
            .collect();
        let problem = RosterProblem::new(june_2024(), employees)
            .with_coverage(vec![CoverageRule::new(ShiftCode::Night, 1, Some(1))])
            .with_policy(RosterPolicy {
                caps: CapPolicy::Overflow,
                ..RosterPolicy::default()
            });

        let generated = generate(&problem).unwrap();
        assert_eq!(generated.stats.unmet, 0);
        let analysis = &generated.analysis;

        // 30 nights over 6 people capped at 4: everyone takes one extra
        let night_cap = analysis
            .constraints
            .iter()
            .find(|c| c.name == constraints::MONTHLY_NIGHT_CAP)
            .unwrap();
        assert_eq!(night_cap.kind, constraints::ConstraintKind::Soft);
        assert_eq!(night_cap.violations.len(), 6);
        assert_eq!(night_cap.score(), constraints::RosterScore::of(0, -6));
        assert!(analysis.is_feasible(), "score {}", analysis.score);
        assert_eq!(analysis.score, constraints::RosterScore::of(0, -6));
    }

    #[test]
    fn test_exempt_employees_never_get_nights() {
        let mut employees = pool(8);
        employees[0].night_exempt = true;
        employees[1].night_exempt = true;
        let problem = RosterProblem::new(june_2024(), employees)
            .with_coverage(vec![CoverageRule::new(ShiftCode::Night, 2, Some(2))]);

        let roster = generate(&problem).unwrap().roster;
        assert_eq!(roster.count_for_employee(0, ShiftCode::Night), 0);
        assert_eq!(roster.count_for_employee(1, ShiftCode::Night), 0);
    }

    #[test]
    fn test_preferred_exemption_only_when_short() {
        let mut employees = pool(3);
        employees[0].night_exempt = true;
        let problem = RosterProblem::new(june_2024(), employees)
            .with_coverage(vec![CoverageRule::new(ShiftCode::Night, 3, Some(3))])
            .with_policy(RosterPolicy {
                night_exemption: ExemptionPolicy::Preferred,
                ..RosterPolicy::default()
            });

        let roster = generate(&problem).unwrap().roster;
        assert_eq!(roster.count_for_employee(0, ShiftCode::Night), 30);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let problem = demo_data::generate(DemoData::Large);
        let first = generate(&problem).unwrap().roster;
        let second = generate(&problem).unwrap().roster;
        assert_eq!(first, second);
    }

    #[test]
    fn test_week_off_and_festival_premarks() {
        let pattern: WeekOffPattern = "Sat-Sun".parse().unwrap();
        let problem = RosterProblem::new(june_2024(), pool(4))
            .with_week_off_group("Weekend", pattern, ["Employee 1", "Employee 2"])
            .with_festivals([17]);

        let roster = generate(&problem).unwrap().roster;
        // 2024-06-01 is a Saturday
        assert_eq!(roster.get(0, 0), Some(ShiftCode::Off));
        assert_eq!(roster.get(1, 1), Some(ShiftCode::Off));
        assert_ne!(roster.get(2, 0), Some(ShiftCode::Off));
        for e in 0..4 {
            assert_eq!(roster.get(e, 16), Some(ShiftCode::Holiday));
        }
    }

    #[test]
    fn test_festival_rules_reclaim_holidays() {
        let problem = RosterProblem::new(june_2024(), pool(5))
            .with_festivals([17])
            .with_coverage(vec![
                CoverageRule::new(ShiftCode::First, 2, None),
                CoverageRule::new(ShiftCode::First, 1, Some(1)).on(DayKind::Festival),
            ]);

        let roster = generate(&problem).unwrap().roster;
        assert_eq!(roster.count_on_day(16, ShiftCode::First), 1);
        assert_eq!(roster.count_on_day(16, ShiftCode::Holiday), 4);
    }

    #[test]
    fn test_overrides_are_kept() {
        let problem = RosterProblem::new(june_2024(), pool(4))
            .with_override(2, 10, ShiftCode::Leave)
            .with_override(3, 11, ShiftCode::Holiday)
            .with_festivals([11])
            .with_coverage(vec![
                CoverageRule::new(ShiftCode::First, 4, None).on(DayKind::Festival),
            ]);

        let roster = generate(&problem).unwrap().roster;
        assert_eq!(roster.get(2, 9), Some(ShiftCode::Leave));
        // pinned holiday is not reclaimed for festival coverage
        assert_eq!(roster.get(3, 10), Some(ShiftCode::Holiday));
        assert_eq!(roster.count_on_day(10, ShiftCode::First), 3);
    }

    #[test]
    fn test_rotation_advances_after_rest_block() {
        let rotation = Employee::new(0, "Rotor").with_role(Role::Rotation {
            cycle: vec![ShiftCode::First, ShiftCode::Second, ShiftCode::Night],
            offset: 0,
        });
        let pattern: WeekOffPattern = "Sat-Sun".parse().unwrap();
        let problem = RosterProblem::new(june_2024(), vec![rotation])
            .with_week_off_group("Weekend", pattern, ["Rotor"]);

        let roster = generate(&problem).unwrap().roster;
        // June 2024: 1-2 Sat/Sun, 3-7 Mon-Fri, 8-9 weekend, 10-14 Mon-Fri
        assert_eq!(roster.get(0, 0), Some(ShiftCode::Off));
        assert_eq!(roster.get(0, 2), Some(ShiftCode::First));
        assert_eq!(roster.get(0, 6), Some(ShiftCode::First));
        assert_eq!(roster.get(0, 9), Some(ShiftCode::Second));
        assert_eq!(roster.get(0, 16), Some(ShiftCode::Night));
        assert_eq!(roster.get(0, 23), Some(ShiftCode::First));
    }

    #[test]
    fn test_rotation_with_huge_offset() {
        let rotation = Employee::new(0, "Rotor").with_role(Role::Rotation {
            cycle: vec![ShiftCode::First, ShiftCode::Second],
            offset: usize::MAX,
        });
        let pattern: WeekOffPattern = "Sat-Sun".parse().unwrap();
        let problem = RosterProblem::new(june_2024(), vec![rotation])
            .with_week_off_group("Weekend", pattern, ["Rotor"]);

        let roster = generate(&problem).unwrap().roster;
        // usize::MAX is odd, so the cycle starts on its second entry
        assert_eq!(roster.get(0, 2), Some(ShiftCode::Second));
        assert_eq!(roster.get(0, 9), Some(ShiftCode::First));
        assert_eq!(roster.get(0, 16), Some(ShiftCode::Second));
    }

    #[test]
    fn test_no_morning_after_night() {
        let problem = RosterProblem::new(june_2024(), pool(8)).with_coverage(vec![
            CoverageRule::new(ShiftCode::Night, 2, Some(2)),
            CoverageRule::new(ShiftCode::First, 3, Some(3)),
        ]);

        let roster = generate(&problem).unwrap().roster;
        for e in 0..roster.employee_count() {
            for d in 1..roster.day_count() {
                assert!(
                    !(roster.get(e, d - 1) == Some(ShiftCode::Night)
                        && roster.get(e, d) == Some(ShiftCode::First)),
                    "employee {} has F after N on day {}",
                    e,
                    d + 1
                );
            }
        }
    }

    #[test]
    fn test_fewest_assigned_balances_nights() {
        let problem = RosterProblem::new(june_2024(), pool(6))
            .with_coverage(vec![CoverageRule::new(ShiftCode::Night, 1, Some(1))]);

        let roster = generate(&problem).unwrap().roster;
        let nights: Vec<u32> = (0..6)
            .map(|e| roster.count_for_employee(e, ShiftCode::Night))
            .collect();
        assert!(nights.iter().all(|&n| n == 5), "nights: {:?}", nights);
    }

    #[test]
    fn test_default_shift_catches_blanks() {
        let problem = RosterProblem::new(june_2024(), pool(3)).with_policy(RosterPolicy {
            fallback_order: vec![],
            default_shift: ShiftCode::General,
            ..RosterPolicy::default()
        });

        let generated = generate(&problem).unwrap();
        assert_eq!(generated.stats.defaulted, 90);
        for e in 0..3 {
            assert_eq!(generated.roster.count_for_employee(e, ShiftCode::General), 30);
        }
    }

    #[test]
    fn test_weekend_cap_limits_weekend_work() {
        let mut employees = pool(4);
        employees[0] = employees[0].clone().with_weekend_cap(2);
        let problem = RosterProblem::new(june_2024(), employees)
            .with_coverage(vec![CoverageRule::new(ShiftCode::First, 1, Some(1))]);

        let generated = generate(&problem).unwrap();
        let roster = &generated.roster;
        // June 2024 has 10 weekend days; the first two use up the cap
        assert_eq!(roster.weekend_worked(0), 2);
        let weekend_offs = roster
            .days
            .iter()
            .enumerate()
            .filter(|(d, day)| day.weekend && roster.get(0, *d) == Some(ShiftCode::Off))
            .count();
        assert_eq!(weekend_offs, 8);
        for d in 0..roster.day_count() {
            assert_eq!(roster.count_on_day(d, ShiftCode::First), 1, "day {}", d + 1);
        }
        assert!(generated
            .analysis
            .violations_of(constraints::WEEKEND_CAP)
            .is_empty());
    }

    #[test]
    fn test_random_tie_break_covers_every_day() {
        let problem = RosterProblem::new(june_2024(), pool(6))
            .with_coverage(vec![CoverageRule::new(ShiftCode::Night, 1, Some(1))])
            .with_policy(RosterPolicy {
                tie_break: TieBreak::Random,
                ..RosterPolicy::default()
            });

        let first = generate(&problem).unwrap();
        assert!(first.roster.is_complete());
        for d in 0..first.roster.day_count() {
            assert_eq!(first.roster.count_on_day(d, ShiftCode::Night), 1);
        }
        let total: u32 = (0..6)
            .map(|e| first.roster.count_for_employee(e, ShiftCode::Night))
            .sum();
        assert_eq!(total, 30);

        let second = generate(&problem).unwrap();
        assert_eq!(first.roster, second.roster);
    }

    #[test]
    fn test_seed_selects_the_grid() {
        let base = RosterProblem::new(june_2024(), pool(8)).with_coverage(vec![
            CoverageRule::new(ShiftCode::Night, 2, Some(2)),
            CoverageRule::new(ShiftCode::First, 3, Some(3)),
        ]);
        let with_seed = |seed: u64| {
            base.clone().with_policy(RosterPolicy {
                seed: Some(seed),
                ..RosterPolicy::default()
            })
        };

        let default_grid = generate(&base).unwrap().roster;
        // year * 100 + month is the default seed
        let same_seed = generate(&with_seed(202406)).unwrap().roster;
        assert_eq!(default_grid, same_seed);

        let other_seed = generate(&with_seed(7)).unwrap().roster;
        assert_ne!(default_grid, other_seed);
    }
}
