//! dispatch-runner: headless scenario runner for the work-distribution core.
//!
//! Generates a deterministic synthetic staff roster and a day-by-day stream
//! of citizen complaints, routes everything through the dispatcher, runs a
//! rebalance pass on a fixed cadence, and records every decision to a
//! SQLite log for inspection.
//!
//! Usage:
//!   dispatch-runner --seed 12345 --days 30 --staff 12 --db run.db

mod names;
mod rng;
mod store;

use anyhow::Result;
use chrono::{DateTime, Duration, TimeZone, Utc};
use dispatch_core::{
    config::DispatchConfig,
    dispatcher::{AssignmentDecision, Dispatcher},
    item::{AssignableItem, Priority},
    staff::{AvailabilityStatus, Seniority, StaffMember},
    types::GeoPoint,
};
use names::NameGenerator;
use rng::{stream, ScenarioRng, StreamSlot};
use std::env;
use store::RunStore;

/// (category, department) pairs a municipal intake actually sees.
const CATEGORIES: &[(&str, &str)] = &[
    ("pothole", "public-works"),
    ("streetlight", "public-works"),
    ("sidewalk", "public-works"),
    ("missed-collection", "sanitation"),
    ("illegal-dumping", "sanitation"),
    ("noise", "enforcement"),
    ("abandoned-vehicle", "enforcement"),
    ("water-leak", "utilities"),
    ("tree-hazard", "parks"),
    ("graffiti", "parks"),
];

const CITY_CENTER: GeoPoint = GeoPoint {
    lat: 40.44,
    lng: -79.99,
};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let days = parse_arg(&args, "--days", 30u64);
    let staff_count = parse_arg(&args, "--staff", 12u64);
    let rebalance_every = parse_arg(&args, "--rebalance-every", 7u64);
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or(":memory:");
    let config = match args.windows(2).find(|w| w[0] == "--config") {
        Some(w) => DispatchConfig::load(&w[1])?,
        None => DispatchConfig::default(),
    };

    println!("dispatch-runner");
    println!("  seed:   {seed}");
    println!("  days:   {days}");
    println!("  staff:  {staff_count}");
    println!("  db:     {db}");
    println!();

    let store = RunStore::open(db)?;
    store.migrate()?;

    let run_id = format!("run-{seed}-{days}d");
    store.insert_run(&run_id, seed, days, staff_count, env!("CARGO_PKG_VERSION"))?;

    let mut dispatcher = Dispatcher::new(config);

    let mut roster_rng = stream(seed, StreamSlot::Roster);
    let roster = build_roster(&mut roster_rng, staff_count);

    let mut arrivals = stream(seed, StreamSlot::Arrivals);
    let mut closures = stream(seed, StreamSlot::Closures);
    let start = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();

    let mut item_seq = 0u64;
    for day in 0..days {
        let day_start = start + Duration::days(day as i64);

        let arriving = 8 + arrivals.next_u64_below(8);
        for _ in 0..arriving {
            item_seq += 1;
            let item = make_item(&mut arrivals, item_seq, day_start);
            match dispatcher.dispatch(&item, &roster, item.submitted_at)? {
                AssignmentDecision::Assigned {
                    assignment_id,
                    staff_id,
                    score,
                } => {
                    store.insert_decision(
                        &run_id,
                        day,
                        &item.item_id,
                        priority_label(item.priority),
                        "assigned",
                        Some(&staff_id),
                        Some(score),
                    )?;
                    // A share of assignments gets picked up right away and
                    // becomes immovable for the rebalancer.
                    if closures.chance(0.4) {
                        dispatcher.start_progress(&assignment_id)?;
                    }
                }
                AssignmentDecision::Declined { reason } => {
                    log::debug!("day={day} item={} declined: {reason:?}", item.item_id);
                    store.insert_decision(
                        &run_id,
                        day,
                        &item.item_id,
                        priority_label(item.priority),
                        "declined",
                        None,
                        None,
                    )?;
                }
            }
        }

        // End-of-day closures.
        let close_at = day_start + Duration::hours(18);
        let open_ids: Vec<String> = dispatcher
            .open_assignments()
            .map(|a| a.assignment.assignment_id.clone())
            .collect();
        for id in open_ids {
            if closures.chance(0.35) {
                dispatcher.close(&id, close_at)?;
            }
        }

        // Periodic rebalance pass.
        if rebalance_every > 0 && (day + 1) % rebalance_every == 0 {
            let moves = dispatcher.propose_rebalance(&roster)?;
            for mv in &moves {
                store.insert_move(&run_id, day, &mv.assignment_id, &mv.from_staff, &mv.to_staff)?;
            }
            let applied = dispatcher.apply_moves(&moves, &roster, close_at)?;
            log::info!(
                "day={day} rebalance: proposed={} applied={applied}",
                moves.len()
            );
        }
    }

    print_summary(&store, &run_id, &dispatcher, days)?;
    Ok(())
}

fn build_roster(rng: &mut ScenarioRng, staff_count: u64) -> Vec<StaffMember> {
    (0..staff_count)
        .map(|i| {
            let mut s = StaffMember::new(
                format!("stf-{i:03}"),
                NameGenerator::full_name(rng),
                4 + rng.next_u64_below(7) as u32,
            );

            let spec_count = 1 + rng.next_u64_below(3) as usize;
            for _ in 0..spec_count {
                let (category, department) =
                    CATEGORIES[rng.next_u64_below(CATEGORIES.len() as u64) as usize];
                if !s.specializes_in(category) {
                    s.specializations.push(category.to_string());
                }
                if s.department.is_none() {
                    s.department = Some(department.to_string());
                }
            }

            s.seniority = match rng.next_u64_below(100) {
                0..=14 => Seniority::Trainee,
                15..=34 => Seniority::Junior,
                35..=79 => Seniority::Standard,
                _ => Seniority::Senior,
            };
            if rng.chance(0.1) {
                s.availability = AvailabilityStatus::OffDuty;
            }
            if rng.chance(0.9) {
                s.position = Some(GeoPoint::new(
                    CITY_CENTER.lat + rng.range_f64(-0.15, 0.15),
                    CITY_CENTER.lng + rng.range_f64(-0.15, 0.15),
                ));
            }
            s.performance_score = rng.range_f64(45.0, 98.0);
            s
        })
        .collect()
}

fn make_item(rng: &mut ScenarioRng, seq: u64, day_start: DateTime<Utc>) -> AssignableItem {
    let (category, department) = CATEGORIES[rng.next_u64_below(CATEGORIES.len() as u64) as usize];
    let priority = match rng.next_u64_below(100) {
        0..=4 => Priority::Critical,
        5..=19 => Priority::High,
        20..=64 => Priority::Medium,
        _ => Priority::Low,
    };
    let submitted_at =
        day_start + Duration::hours(8 + rng.next_u64_below(10) as i64) + Duration::minutes(rng.next_u64_below(60) as i64);

    let mut item = AssignableItem::new(
        format!("itm-{seq:05}"),
        category,
        priority,
        submitted_at,
        &dispatch_core::config::SlaConfig::default(),
    );
    item.department = Some(department.to_string());
    if rng.chance(0.85) {
        item.location = Some(GeoPoint::new(
            CITY_CENTER.lat + rng.range_f64(-0.2, 0.2),
            CITY_CENTER.lng + rng.range_f64(-0.2, 0.2),
        ));
    }
    item
}

fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "low",
        Priority::Medium => "medium",
        Priority::High => "high",
        Priority::Critical => "critical",
    }
}

fn print_summary(store: &RunStore, run_id: &str, dispatcher: &Dispatcher, days: u64) -> Result<()> {
    let assigned = store.decision_count(run_id, "assigned")?;
    let declined = store.decision_count(run_id, "declined")?;
    let moves = store.move_count(run_id)?;
    let still_open = dispatcher.open_assignments().count();

    println!("=== RUN SUMMARY ===");
    println!("  run_id:       {run_id}");
    println!("  days run:     {days}");
    println!("  items routed: {}", assigned + declined);
    println!("  assigned:     {assigned}");
    println!("  declined:     {declined}");
    println!("  moves:        {moves}");
    println!("  still open:   {still_open}");
    Ok(())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
