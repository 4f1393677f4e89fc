//! InvTrack Headless Simulation Harness
//!
//! Validates the inventory pipeline against a grid fixture without a game
//! host. Runs entirely in-process: no game, no networking, no rendering.
//!
//! Usage:
//!   cargo run -p invtrack-simtest
//!   cargo run -p invtrack-simtest -- --verbose

use std::collections::BTreeMap;

use invtrack_core::engine::InventoryEngine;
use invtrack_core::generation::{churn_inventories, generate_grid, GridConfig};
use invtrack_core::grid::{BlockRecord, Grid};
use invtrack_logic::aggregate::{aggregate, ItemCounts};
use invtrack_logic::config::{InventorySelection, ManagerConfig};
use invtrack_logic::host::GridHost;
use invtrack_logic::item::ItemRecord;
use invtrack_logic::quota::parse_quotas;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;

// ── Grid fixture ────────────────────────────────────────────────────────
const FIXTURE_JSON: &str = include_str!("../../../data/sample_grid.json");

#[derive(Debug, Deserialize)]
struct Fixture {
    #[serde(default)]
    config: ManagerConfig,
    grid: GridFixture,
    expected: Expected,
}

#[derive(Debug, Deserialize)]
struct GridFixture {
    name: String,
    blocks: Vec<BlockRecord>,
}

#[derive(Debug, Deserialize)]
struct Expected {
    quotas: BTreeMap<String, f64>,
    rejected_quota_lines: usize,
    counts: BTreeMap<String, f64>,
    /// Panel title -> exact public text after one tick
    panels: BTreeMap<String, String>,
}

impl Fixture {
    fn build_grid(&self) -> Grid {
        Grid::from_records(self.grid.name.clone(), self.grid.blocks.clone())
    }
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    let log_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    println!("=== InvTrack Simulation Harness ===\n");

    let mut results = Vec::new();

    let fixture: Fixture = match serde_json::from_str(FIXTURE_JSON) {
        Ok(f) => f,
        Err(e) => {
            results.push(TestResult {
                name: "fixture_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            report(&results, verbose);
            std::process::exit(1);
        }
    };
    results.push(TestResult {
        name: "fixture_parse".into(),
        passed: true,
        detail: format!("{} blocks loaded", fixture.grid.blocks.len()),
    });

    // 1. Quota parsing
    results.extend(validate_quotas(&fixture, verbose));

    // 2. Aggregation against the fixture
    results.extend(validate_aggregation(&fixture, verbose));

    // 3. Panel output
    results.extend(validate_panels(&fixture, verbose));

    // 4. Graceful degradation (missing master assembler, stub orders)
    results.extend(validate_degradation(&fixture, verbose));

    // 5. Track-all selection
    results.extend(validate_track_all(&fixture, verbose));

    // 6. Order invariance on generated grids
    results.extend(validate_order_invariance(verbose));

    // 7. Save/load round trip
    results.extend(validate_persistence(verbose));

    report(&results, verbose);

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
}

fn report(results: &[TestResult], verbose: bool) {
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );
}

fn counts_match(actual: &ItemCounts, expected: &BTreeMap<String, f64>) -> bool {
    actual.len() == expected.len()
        && expected
            .iter()
            .all(|(name, &want)| actual.get(name).is_some_and(|&got| (got - want).abs() < 1e-9))
}

// ── 1. Quotas ───────────────────────────────────────────────────────────

fn validate_quotas(fixture: &Fixture, verbose: bool) -> Vec<TestResult> {
    println!("--- Quota Table ---");
    let mut results = Vec::new();

    let grid = fixture.build_grid();
    let parse = parse_quotas(&grid.own_config());

    results.push(TestResult {
        name: "quota_table".into(),
        passed: parse.table == fixture.expected.quotas,
        detail: format!("{:?}", parse.table),
    });

    results.push(TestResult {
        name: "quota_rejections".into(),
        passed: parse.rejected.len() == fixture.expected.rejected_quota_lines,
        detail: format!(
            "{} rejected (expected {})",
            parse.rejected.len(),
            fixture.expected.rejected_quota_lines
        ),
    });

    // Duplicates never overwrite the first declaration
    let first_wins = parse_quotas("Gold 5\nGold 7\nGold 9").table.get("Gold") == Some(&5.0);
    results.push(TestResult {
        name: "quota_first_declaration_wins".into(),
        passed: first_wins,
        detail: "Gold 5, Gold 7, Gold 9 → Gold 5".into(),
    });

    if verbose {
        for r in &parse.rejected {
            println!("  rejected line {}: {}", r.line_index, r);
        }
    }

    results
}

// ── 2. Aggregation ──────────────────────────────────────────────────────

fn validate_aggregation(fixture: &Fixture, verbose: bool) -> Vec<TestResult> {
    println!("--- Aggregation ---");
    let mut results = Vec::new();

    let mut engine = InventoryEngine::new(fixture.build_grid(), fixture.config.clone());
    let summary = engine.step();

    results.push(TestResult {
        name: "aggregate_counts".into(),
        passed: counts_match(engine.counts(), &fixture.expected.counts),
        detail: format!("{:?}", engine.counts()),
    });

    results.push(TestResult {
        name: "aggregate_distinct_items".into(),
        passed: summary.distinct_items == fixture.expected.counts.len(),
        detail: format!("{} distinct items", summary.distinct_items),
    });

    // Ore and refined of the same subtype stay separate
    let counts = engine.counts();
    let separate = counts.contains_key("Stone") && counts.contains_key("Stone Ore");
    results.push(TestResult {
        name: "aggregate_ore_disambiguation".into(),
        passed: separate,
        detail: format!(
            "Stone={:?} Stone Ore={:?}",
            counts.get("Stone"),
            counts.get("Stone Ore")
        ),
    });

    // A second tick with unchanged inventories reproduces the same counts
    let first = engine.counts().clone();
    engine.step();
    results.push(TestResult {
        name: "aggregate_stable_across_ticks".into(),
        passed: engine.counts() == &first,
        detail: "two ticks, same counts".into(),
    });

    if verbose {
        println!("  Inventories tracked: {}", engine.manager().inventory_count());
        for (name, amount) in engine.counts() {
            println!("    {:12} {}", name, amount);
        }
    }

    results
}

// ── 3. Panels ───────────────────────────────────────────────────────────

fn validate_panels(fixture: &Fixture, verbose: bool) -> Vec<TestResult> {
    println!("--- Panel Output ---");
    let mut results = Vec::new();

    let mut engine = InventoryEngine::new(fixture.build_grid(), fixture.config.clone());
    engine.step();

    // Every panel on the grid, tagged or not, by title
    let panels: Vec<(String, String, bool)> = engine
        .grid
        .to_records()
        .into_iter()
        .filter_map(|r| r.panel)
        .map(|p| (p.title, p.public_text, p.show_public_text))
        .collect();

    for (title, want) in &fixture.expected.panels {
        let got = panels.iter().find(|(t, _, _)| t == title);
        results.push(TestResult {
            name: format!("panel_{}", title.to_lowercase()),
            passed: got.is_some_and(|(_, text, _)| text == want),
            detail: match got {
                Some((_, text, _)) => format!("{:?}", text),
                None => "panel missing".into(),
            },
        });
    }

    let managed = engine.manager().displays();
    let hidden: Vec<&str> = managed
        .iter()
        .filter(|d| !engine.grid.panel_shows_text(d.panel))
        .map(|d| d.title.as_str())
        .collect();
    results.push(TestResult {
        name: "panel_tagged_shown".into(),
        passed: !managed.is_empty() && hidden.is_empty(),
        detail: format!("{} managed panels, hidden: {:?}", managed.len(), hidden),
    });

    if verbose {
        for display in engine.manager().displays() {
            println!("  [{}] {:?}", display.title, display.mode);
        }
    }

    results
}

// ── 4. Degradation ──────────────────────────────────────────────────────

fn validate_degradation(fixture: &Fixture, _verbose: bool) -> Vec<TestResult> {
    println!("--- Graceful Degradation ---");
    let mut results = Vec::new();

    let mut engine = InventoryEngine::new(fixture.build_grid(), fixture.config.clone());

    let echo = engine.grid.echo();
    let warned = echo.iter().any(|l| l == "No tagged assembler found!");
    results.push(TestResult {
        name: "degrade_missing_master_assembler".into(),
        passed: warned && engine.manager().master_assembler().is_none(),
        detail: format!("warned={} master={:?}", warned, engine.manager().master_assembler()),
    });

    let summary = engine.step();
    engine.place_assembler_orders();
    let stub_reported = engine
        .grid
        .echo()
        .iter()
        .any(|l| l.contains("not implemented"));
    let counts_unchanged = counts_match(engine.counts(), &fixture.expected.counts);
    results.push(TestResult {
        name: "degrade_orders_stub".into(),
        passed: stub_reported && counts_unchanged && summary.panels_written > 0,
        detail: format!(
            "stub reported={} counts intact={} panels={}",
            stub_reported, counts_unchanged, summary.panels_written
        ),
    });

    // Empty programmable block config: no quotas, pipeline still runs
    let mut grid = fixture.build_grid();
    grid.set_own_config("");
    let mut engine = InventoryEngine::new(grid, fixture.config.clone());
    let summary = engine.step();
    results.push(TestResult {
        name: "degrade_no_quotas".into(),
        passed: engine.manager().quotas().is_empty() && summary.distinct_items > 0,
        detail: format!("{} items with 0 quotas", summary.distinct_items),
    });

    results
}

// ── 5. Track-all ────────────────────────────────────────────────────────

fn validate_track_all(fixture: &Fixture, _verbose: bool) -> Vec<TestResult> {
    println!("--- Track-All Selection ---");
    let mut results = Vec::new();

    let config = ManagerConfig {
        track_all: true,
        ..fixture.config.clone()
    };
    let grid = fixture.build_grid();
    let all = grid.inventories(&InventorySelection::All).len();
    let tagged = grid
        .inventories(&InventorySelection::from_config(&fixture.config))
        .len();

    let mut engine = InventoryEngine::new(grid, config);
    engine.step();

    results.push(TestResult {
        name: "track_all_inventories".into(),
        passed: engine.manager().inventory_count() == all && all > tagged,
        detail: format!("all={} tagged={}", all, tagged),
    });

    let tagged_gold = fixture.expected.counts.get("Gold").copied().unwrap_or(0.0);
    let gold = engine.counts().get("Gold").copied().unwrap_or(0.0);
    results.push(TestResult {
        name: "track_all_includes_untagged".into(),
        passed: gold > tagged_gold,
        detail: format!("Gold tagged={} all={}", tagged_gold, gold),
    });

    results
}

// ── 6. Order invariance ─────────────────────────────────────────────────

fn validate_order_invariance(verbose: bool) -> Vec<TestResult> {
    println!("--- Order Invariance ---");
    let mut results = Vec::new();

    let mut rng = StdRng::seed_from_u64(2024);
    let mut mismatches = 0;
    let rounds = 20;

    for round in 0..rounds {
        let mut grid = generate_grid(&GridConfig::default(), &mut rng);
        churn_inventories(&mut grid, &mut rng);

        let mut engine = InventoryEngine::new(grid, ManagerConfig::default());
        engine.step();

        let mut stacks: Vec<ItemRecord> = engine
            .manager()
            .inventories()
            .iter()
            .flat_map(|&inv| engine.grid.stacks(inv))
            .collect();
        stacks.shuffle(&mut rng);
        let shuffled = aggregate(&stacks);

        if &shuffled != engine.counts() {
            mismatches += 1;
            if verbose {
                println!("  round {}: shuffled totals differ", round);
            }
        }
    }

    results.push(TestResult {
        name: "order_invariance_generated".into(),
        passed: mismatches == 0,
        detail: format!("{} / {} rounds matched", rounds - mismatches, rounds),
    });

    results
}

// ── 7. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(_verbose: bool) -> Vec<TestResult> {
    println!("--- Save / Load ---");
    let mut results = Vec::new();

    let mut rng = StdRng::seed_from_u64(7);
    let grid = generate_grid(&GridConfig::default(), &mut rng);
    let mut engine = InventoryEngine::new(grid, ManagerConfig::default());
    engine.step();
    let before = engine.counts().clone();

    let mut buffer = Vec::new();
    if let Err(e) = engine.save(&mut buffer) {
        results.push(TestResult {
            name: "persistence_save".into(),
            passed: false,
            detail: e.to_string(),
        });
        return results;
    }

    let mut restored = InventoryEngine::new(Grid::new("Blank"), ManagerConfig::default());
    match restored.load(&buffer[..]) {
        Ok(()) => {
            restored.step();
            results.push(TestResult {
                name: "persistence_roundtrip".into(),
                passed: restored.counts() == &before,
                detail: format!("{} bytes, {} items", buffer.len(), before.len()),
            });
        }
        Err(e) => results.push(TestResult {
            name: "persistence_roundtrip".into(),
            passed: false,
            detail: e.to_string(),
        }),
    }

    results
}
