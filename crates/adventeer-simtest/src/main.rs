//! Adventeer Headless Trail Harness
//!
//! Validates trail generation and map derivations without a browser or
//! backend, and dumps individual trails for inspection.
//!
//! Usage:
//!   cargo run -p adventeer-simtest
//!   cargo run -p adventeer-simtest -- check --verbose
//!   cargo run -p adventeer-simtest -- generate --identity abc --level 4
//!   cargo run -p adventeer-simtest -- render --identity abc --level 4 --out trail.svg
//!
//! Set `RUST_LOG=debug` to see per-trail generation logs.

use std::path::PathBuf;

use adventeer_logic::config::TrailConfig;
use adventeer_logic::constants::layout;
use adventeer_logic::map::{self, TrailMap, WaypointStatus};
use adventeer_logic::progression::{self, LevelProgress};
use adventeer_logic::render;
use adventeer_logic::trail::{self, TrailPoint};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

// ── Scenario manifest ───────────────────────────────────────────────────
const SCENARIOS_JSON: &str = include_str!("../../../data/trail_scenarios.json");

#[derive(Debug, Deserialize)]
struct Scenario {
    identity: String,
    level: u32,
    #[serde(default)]
    viewport_height: Option<f64>,
}

impl Scenario {
    fn height(&self, config: &TrailConfig) -> f64 {
        self.viewport_height.unwrap_or(config.viewport_height)
    }

    fn label(&self) -> String {
        format!("{:?}@{}", self.identity, self.level)
    }
}

// ── CLI ─────────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "adventeer-simtest", about = "Headless treasure-trail harness")]
struct Cli {
    /// JSON file with `viewport_width` / `viewport_height`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    viewport_width: Option<f64>,

    #[arg(long, global = true)]
    viewport_height: Option<f64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the validation sweep (default).
    Check {
        /// Print passing checks too.
        #[arg(short, long)]
        verbose: bool,

        /// Scenario manifest to use instead of the bundled one.
        #[arg(long)]
        scenarios: Option<PathBuf>,
    },
    /// Print a trail map as JSON.
    Generate {
        #[arg(long, default_value = trail::GUEST_IDENTITY)]
        identity: String,

        #[arg(long, default_value_t = 1)]
        level: u32,

        #[arg(long)]
        pretty: bool,
    },
    /// Write a trail map as SVG.
    Render {
        #[arg(long, default_value = trail::GUEST_IDENTITY)]
        identity: String,

        #[arg(long, default_value_t = 1)]
        level: u32,

        /// Output file; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match resolve_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };

    let command = cli.command.unwrap_or(Command::Check {
        verbose: false,
        scenarios: None,
    });

    let code = match command {
        Command::Check { verbose, scenarios } => run_checks(&config, scenarios, verbose),
        Command::Generate {
            identity,
            level,
            pretty,
        } => run_generate(&config, &identity, level, pretty),
        Command::Render {
            identity,
            level,
            out,
        } => run_render(&config, &identity, level, out),
    };

    if code != 0 {
        std::process::exit(code);
    }
}

fn resolve_config(cli: &Cli) -> Result<TrailConfig, adventeer_logic::config::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => TrailConfig::load(path)?,
        None => TrailConfig::default(),
    };
    if let Some(width) = cli.viewport_width {
        config.viewport_width = width;
    }
    if let Some(height) = cli.viewport_height {
        config.viewport_height = height;
    }
    config.validate()?;
    Ok(config)
}

fn run_generate(config: &TrailConfig, identity: &str, level: u32, pretty: bool) -> i32 {
    let trail_map = TrailMap::build(identity, level, config);
    let json = if pretty {
        serde_json::to_string_pretty(&trail_map)
    } else {
        serde_json::to_string(&trail_map)
    };
    match json {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("error: failed to serialize trail: {}", e);
            2
        }
    }
}

fn run_render(config: &TrailConfig, identity: &str, level: u32, out: Option<PathBuf>) -> i32 {
    let trail_map = TrailMap::build(identity, level, config);
    let svg = render::render_svg(&trail_map, config);
    match out {
        Some(path) => match std::fs::write(&path, svg) {
            Ok(()) => {
                log::info!(
                    "Wrote {} points for {:?} level {} to {}",
                    trail_map.points.len(),
                    identity,
                    level,
                    path.display()
                );
                0
            }
            Err(e) => {
                eprintln!("error: failed to write {}: {}", path.display(), e);
                2
            }
        },
        None => {
            print!("{}", svg);
            0
        }
    }
}

fn run_checks(config: &TrailConfig, scenarios_path: Option<PathBuf>, verbose: bool) -> i32 {
    println!("=== Adventeer Trail Harness ===\n");

    let scenarios_json = match &scenarios_path {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("error: failed to read {}: {}", path.display(), e);
                return 2;
            }
        },
        None => SCENARIOS_JSON.to_string(),
    };

    let mut results = Vec::new();

    // 1. Scenario manifest validation
    let scenarios = validate_scenarios(&scenarios_json, &mut results);

    // 2. Determinism
    results.extend(validate_determinism(&scenarios, config, verbose));

    // 3. Shape: origin, bounds, final point
    results.extend(validate_shape(&scenarios, config, verbose));

    // 4. Growth with level
    results.extend(validate_growth(&scenarios, config));

    // 5. Map markers
    results.extend(validate_markers(&scenarios, config, verbose));

    // 6. XP progression
    results.extend(validate_progression());

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        1
    } else {
        0
    }
}

// ── 1. Scenario Manifest ────────────────────────────────────────────────

fn validate_scenarios(json: &str, results: &mut Vec<TestResult>) -> Vec<Scenario> {
    println!("--- Scenario Manifest ---");

    let scenarios: Vec<Scenario> = match serde_json::from_str(json) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "scenarios_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return Vec::new();
        }
    };

    results.push(TestResult {
        name: "scenarios_not_empty".into(),
        passed: !scenarios.is_empty(),
        detail: format!("{} scenarios loaded", scenarios.len()),
    });

    let bad_level: Vec<_> = scenarios.iter().filter(|s| s.level == 0).collect();
    results.push(TestResult {
        name: "scenarios_levels_positive".into(),
        passed: bad_level.is_empty(),
        detail: if bad_level.is_empty() {
            "all scenarios have level ≥ 1".into()
        } else {
            format!(
                "{} scenarios with level 0: {}",
                bad_level.len(),
                bad_level
                    .iter()
                    .map(|s| s.label())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        },
    });

    let bad_height: Vec<_> = scenarios
        .iter()
        .filter(|s| {
            s.viewport_height
                .is_some_and(|h| !h.is_finite() || h < 2.0 * layout::EDGE_MARGIN)
        })
        .collect();
    results.push(TestResult {
        name: "scenarios_heights_usable".into(),
        passed: bad_height.is_empty(),
        detail: if bad_height.is_empty() {
            "all viewport overrides leave room between margins".into()
        } else {
            format!("{} scenarios with unusable viewport height", bad_height.len())
        },
    });

    scenarios
}

// ── 2. Determinism ──────────────────────────────────────────────────────

fn validate_determinism(scenarios: &[Scenario], config: &TrailConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Determinism ---");
    let mut results = Vec::new();

    let mut mismatched = Vec::new();
    for s in scenarios {
        let height = s.height(config);
        let a = trail::generate(&s.identity, s.level, height);
        let b = trail::generate(&s.identity, s.level, height);
        let identical = a.len() == b.len()
            && a.iter().zip(&b).all(|(p, q)| {
                p.x.to_bits() == q.x.to_bits() && p.y.to_bits() == q.y.to_bits()
            });
        if !identical {
            mismatched.push(s.label());
        }
        if verbose {
            println!("  {}: {} points", s.label(), a.len());
        }
    }
    results.push(TestResult {
        name: "determinism_repeat_calls".into(),
        passed: mismatched.is_empty(),
        detail: if mismatched.is_empty() {
            format!("{} scenarios reproduce bit-for-bit", scenarios.len())
        } else {
            format!("diverged: {}", mismatched.join(", "))
        },
    });

    // Map derivations index into an independently generated copy.
    let mut desynced = 0;
    for s in scenarios {
        let scenario_config = TrailConfig::new(config.viewport_width, s.height(config));
        let trail_map = TrailMap::build(&s.identity, s.level, &scenario_config);
        let points = trail::generate(&s.identity, s.level, scenario_config.viewport_height);
        if trail_map.current_point() != points.get(map::current_index(&points, s.level)).copied() {
            desynced += 1;
        }
    }
    results.push(TestResult {
        name: "determinism_markers_in_sync".into(),
        passed: desynced == 0,
        detail: format!("{} scenarios with desynced current marker", desynced),
    });

    results
}

// ── 3. Shape ────────────────────────────────────────────────────────────

fn validate_shape(scenarios: &[Scenario], config: &TrailConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Shape ---");
    let mut results = Vec::new();

    let origin = TrailPoint::new(layout::START_X, layout::BASE_Y);
    let mut bad_origin = Vec::new();
    let mut out_of_bounds = 0usize;
    let mut bad_final = Vec::new();
    let mut total_points = 0usize;

    for s in scenarios {
        let height = s.height(config);
        let points = trail::generate(&s.identity, s.level, height);
        total_points += points.len();

        if points.first() != Some(&origin) {
            bad_origin.push(s.label());
        }

        out_of_bounds += points
            .iter()
            .skip(1)
            .filter(|p| p.y < layout::EDGE_MARGIN || p.y > height - layout::EDGE_MARGIN)
            .count();

        let expected_x = layout::START_X + layout::total_width(s.level.max(1));
        match points.last() {
            Some(last) if last.x == expected_x => {}
            Some(last) => bad_final.push(format!("{} ends at x={}", s.label(), last.x)),
            None => bad_final.push(format!("{} is empty", s.label())),
        }

        if verbose {
            let (min_y, max_y) = points.iter().fold((f64::MAX, f64::MIN), |(lo, hi), p| {
                (lo.min(p.y), hi.max(p.y))
            });
            println!(
                "  {}: y range {:.1}..{:.1}, width {:.0}",
                s.label(),
                min_y,
                max_y,
                map::map_width(&points)
            );
        }
    }

    results.push(TestResult {
        name: "shape_fixed_origin".into(),
        passed: bad_origin.is_empty(),
        detail: if bad_origin.is_empty() {
            "every trail starts at (100, 250)".into()
        } else {
            format!("wrong origin: {}", bad_origin.join(", "))
        },
    });

    results.push(TestResult {
        name: "shape_y_within_viewport".into(),
        passed: out_of_bounds == 0,
        detail: format!(
            "{} of {} points outside the viewport band",
            out_of_bounds, total_points
        ),
    });

    results.push(TestResult {
        name: "shape_final_x_exact".into(),
        passed: bad_final.is_empty(),
        detail: if bad_final.is_empty() {
            "every trail ends at 100 + 900 + level × 120".into()
        } else {
            bad_final.join("; ")
        },
    });

    results
}

// ── 4. Growth ───────────────────────────────────────────────────────────

fn validate_growth(scenarios: &[Scenario], config: &TrailConfig) -> Vec<TestResult> {
    println!("--- Growth ---");
    let mut results = Vec::new();

    let mut regressions = Vec::new();
    for s in scenarios {
        let height = s.height(config);
        let mut previous = trail::generate(&s.identity, 1, height).len();
        for level in 2..=s.level.max(2) {
            let len = trail::generate(&s.identity, level, height).len();
            if len <= previous {
                regressions.push(format!("{:?} level {}: {} ≤ {}", s.identity, level, len, previous));
            }
            previous = len;
        }
    }
    results.push(TestResult {
        name: "growth_strict_per_level".into(),
        passed: regressions.is_empty(),
        detail: if regressions.is_empty() {
            "point count strictly increases with level".into()
        } else {
            regressions.join("; ")
        },
    });

    let mut over_budget = Vec::new();
    for s in scenarios {
        let len = trail::generate(&s.identity, s.level, s.height(config)).len();
        let steps = trail::segment_count(s.level) as usize;
        if len < steps + 2 || len > 2 * steps + 2 {
            over_budget.push(format!("{} has {} points", s.label(), len));
        }
    }
    results.push(TestResult {
        name: "growth_linear_bounds".into(),
        passed: over_budget.is_empty(),
        detail: if over_budget.is_empty() {
            "point counts within [15L + 2, 30L + 2]".into()
        } else {
            over_budget.join("; ")
        },
    });

    results
}

// ── 5. Map Markers ──────────────────────────────────────────────────────

fn validate_markers(scenarios: &[Scenario], config: &TrailConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Map Markers ---");
    let mut results = Vec::new();

    let mut bad_milestones = Vec::new();
    let mut bad_waypoints = Vec::new();
    let mut current_count = 0usize;

    for s in scenarios {
        let scenario_config = TrailConfig::new(config.viewport_width, s.height(config));
        let trail_map = TrailMap::build(&s.identity, s.level, &scenario_config);
        let len = trail_map.points.len();

        let milestones_ok = trail_map.milestones.iter().all(|m| {
            m.level % 5 == 0
                && m.level > 0
                && m.unlocked == (s.level >= m.level)
                && trail_map.points[(m.level as usize * 15).min(len - 1)] == m.point
        });
        if !milestones_ok {
            bad_milestones.push(s.label());
        }

        let waypoints_ok = trail_map.waypoints.first().map(|w| w.index) == Some(0)
            && trail_map.waypoints.last().map(|w| w.index) == Some(len - 1)
            && trail_map
                .waypoints
                .iter()
                .all(|w| w.index % 15 == 0 || w.index == len - 1);
        if !waypoints_ok {
            bad_waypoints.push(s.label());
        }

        current_count += trail_map
            .waypoints
            .iter()
            .filter(|w| w.status == WaypointStatus::Current)
            .count();

        if verbose {
            println!(
                "  {}: {} milestones ({} unlocked), {} waypoints, current #{}, scroll {:.0}",
                s.label(),
                trail_map.milestones.len(),
                trail_map.unlocked_milestones(),
                trail_map.waypoints.len(),
                trail_map.current_index,
                trail_map.scroll_offset(&scenario_config)
            );
        }
    }

    results.push(TestResult {
        name: "markers_milestones_consistent".into(),
        passed: bad_milestones.is_empty(),
        detail: if bad_milestones.is_empty() {
            "milestones every 5 levels, unlocked at level".into()
        } else {
            format!("inconsistent: {}", bad_milestones.join(", "))
        },
    });

    results.push(TestResult {
        name: "markers_waypoints_cover_trail".into(),
        passed: bad_waypoints.is_empty(),
        detail: if bad_waypoints.is_empty() {
            "waypoints span first to last point every 15 points".into()
        } else {
            format!("inconsistent: {}", bad_waypoints.join(", "))
        },
    });

    // Informational: how many markers land exactly on the user's level.
    results.push(TestResult {
        name: "markers_current_waypoints".into(),
        passed: true,
        detail: format!("{} waypoints marked current", current_count),
    });

    results
}

// ── 6. Progression ──────────────────────────────────────────────────────

fn validate_progression() -> Vec<TestResult> {
    println!("--- Progression ---");
    let mut results = Vec::new();

    let round_trip = (1..=500u32).all(|level| {
        let xp = progression::xp_for_level(level);
        progression::level_for_xp(xp) == level && progression::level_for_xp(xp - 1) == level - 1
    });
    results.push(TestResult {
        name: "progression_level_boundaries".into(),
        passed: round_trip,
        detail: "level_for_xp(5L²) = L and level_for_xp(5L² − 1) = L − 1 for L ≤ 500".into(),
    });

    let p = LevelProgress::from_xp(190);
    results.push(TestResult {
        name: "progression_badge".into(),
        passed: p.level == 6 && p.remaining == 55,
        detail: format!(
            "190 XP → level {}, {} XP to next ({:.0}% through)",
            p.level,
            p.remaining,
            p.fraction * 100.0
        ),
    });

    results
}
