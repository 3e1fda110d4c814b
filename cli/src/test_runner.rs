use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use codespan_reporting::files::{Files, SimpleFile};

use wall::{Structure, Wall};

use crate::fixture::{self, Check};

const SCENARIO_SUFFIX: &str = ".test.toml";

pub enum TestOutcome {
    Pass,
    Fail(String),
}

pub struct TestResult {
    pub path: PathBuf,
    pub description: Option<String>,
    pub outcome: TestOutcome,
}

impl TestResult {
    fn fail(path: &Path, description: Option<String>, reason: String) -> Self {
        TestResult {
            path: path.to_path_buf(),
            description,
            outcome: TestOutcome::Fail(reason),
        }
    }

    fn label(&self) -> &str {
        self.description.as_deref().unwrap_or_else(|| {
            self.path
                .file_name()
                .and_then(|s| s.to_str())
                .and_then(|s| s.strip_suffix(SCENARIO_SUFFIX))
                .unwrap_or("?")
        })
    }
}

fn run_single_test(path: &Path) -> TestResult {
    let source = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => return TestResult::fail(path, None, format!("cannot read file: {}", e)),
    };

    let wall_file = match fixture::parse(&source, 0) {
        Ok(f) => f,
        Err(error) => {
            let file = SimpleFile::new(path.display().to_string(), source.as_str());
            let location = error
                .span
                .as_ref()
                .and_then(|span| file.location((), span.start).ok())
                .map(|loc| format!(" at {}:{}", loc.line_number, loc.column_number))
                .unwrap_or_default();
            return TestResult::fail(path, None, format!("TOML error{}: {}", location, error));
        }
    };

    let description = wall_file.description;
    if wall_file.checks.is_empty() {
        return TestResult::fail(path, description, "no checks defined".into());
    }

    let wall = fixture::build_wall(wall_file.blocks);
    log::debug!("{}: {} top-level blocks", path.display(), wall.count());

    let mismatches: Vec<String> = wall_file
        .checks
        .iter()
        .enumerate()
        .filter_map(|(i, check)| {
            evaluate(&wall, check).map(|reason| format!("check[{}]: {}", i, reason))
        })
        .collect();

    TestResult {
        path: path.to_path_buf(),
        description,
        outcome: if mismatches.is_empty() {
            TestOutcome::Pass
        } else {
            TestOutcome::Fail(mismatches.join("\n"))
        },
    }
}

/// Run one check against the wall. Returns `Some(reason)` on mismatch.
fn evaluate(wall: &Wall, check: &Check) -> Option<String> {
    match check {
        Check::Count { expect } => {
            let actual = wall.count();
            (actual != *expect).then(|| format!("count: expected {}, got {}", expect, actual))
        }
        Check::Color { value, expect } => {
            let actual = wall
                .find_block_by_color(value)
                .and_then(|block| fixture::position_of(wall, block));
            (actual != *expect).then(|| {
                format!(
                    "color \"{}\": expected {}, got {}",
                    value,
                    describe_index(*expect),
                    describe_index(actual)
                )
            })
        }
        Check::Material { value, expect } => {
            let actual: Vec<usize> = wall
                .find_blocks_by_material(value)
                .into_iter()
                .filter_map(|block| fixture::position_of(wall, block))
                .collect();
            (actual != *expect).then(|| {
                format!(
                    "material \"{}\": expected blocks {:?}, got {:?}",
                    value, expect, actual
                )
            })
        }
    }
}

fn describe_index(index: Option<usize>) -> String {
    match index {
        Some(i) => format!("block #{}", i),
        None => "no block".to_string(),
    }
}

/// Find scenario files under `root`, grouped by their folder relative to it.
/// Files directly in `root` get category "" (uncategorized).
fn discover(root: &Path) -> BTreeMap<String, Vec<PathBuf>> {
    let mut categories: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            log::warn!("cannot read directory {}", dir.display());
            continue;
        };
        for path in entries.flatten().map(|entry| entry.path()) {
            if path.is_dir() {
                pending.push(path);
            } else if path.to_string_lossy().ends_with(SCENARIO_SUFFIX) {
                let category = dir
                    .strip_prefix(root)
                    .map(|p| p.to_string_lossy().replace('\\', "/"))
                    .unwrap_or_default();
                categories.entry(category).or_default().push(path);
            }
        }
    }

    for files in categories.values_mut() {
        files.sort();
    }
    categories
}

fn category_label(category: &str) -> &str {
    if category.is_empty() { "(root)" } else { category }
}

fn paint(s: &str, code: &str, no_color: bool) -> String {
    if no_color {
        s.to_string()
    } else {
        format!("\x1b[{}m{}\x1b[0m", code, s)
    }
}

/// Keep only the requested categories (and their subfolders), warning about unknown ones.
fn select_categories(
    all: BTreeMap<String, Vec<PathBuf>>,
    requested: &[String],
) -> BTreeMap<String, Vec<PathBuf>> {
    if requested.is_empty() {
        return all;
    }

    for req in requested {
        let req = req.trim_matches('/');
        let known = all
            .keys()
            .any(|cat| cat == req || cat.starts_with(&format!("{}/", req)));
        if !known {
            eprintln!(
                "warning: category '{}' not found (available: {})",
                req,
                all.keys()
                    .map(|k| category_label(k))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
    }

    all.into_iter()
        .filter(|(cat, _)| {
            requested.iter().any(|req| {
                let req = req.trim_matches('/');
                cat == req || cat.starts_with(&format!("{}/", req))
            })
        })
        .collect()
}

/// Run all scenario files under `path` (or a single file).
/// If `categories` is non-empty, only run scenarios in those categories.
/// Returns exit code: 0 = all pass, 1 = any failure.
pub fn run_tests(path: &Path, no_color: bool, categories: &[String]) -> i32 {
    // A single file forms one unnamed group; categories are ignored.
    let groups: BTreeMap<String, Vec<PathBuf>> = if path.is_file() {
        BTreeMap::from([(String::new(), vec![path.to_path_buf()])])
    } else {
        let all = discover(path);
        if all.is_empty() {
            eprintln!("no {} files found in {}", SCENARIO_SUFFIX, path.display());
            return 1;
        }
        let selected = select_categories(all, categories);
        if selected.is_empty() {
            eprintln!("no matching categories found");
            return 1;
        }
        selected
    };

    let mut passed = 0usize;
    let mut failures: Vec<TestResult> = Vec::new();

    for (cat, files) in &groups {
        if !path.is_file() {
            eprintln!();
            eprintln!("{}", paint(category_label(cat), "1", no_color));
        }

        for file in files {
            let result = run_single_test(file);
            match &result.outcome {
                TestOutcome::Pass => {
                    passed += 1;
                    eprintln!("  {}  {}", paint("PASS", "32", no_color), result.label());
                }
                TestOutcome::Fail(_) => {
                    eprintln!("  {}  {}", paint("FAIL", "31", no_color), result.label());
                    failures.push(result);
                }
            }
        }
    }

    if !failures.is_empty() {
        eprintln!();
        eprintln!("failures:");
        for f in &failures {
            eprintln!();
            eprintln!("  --- {} ---", f.path.display());
            if let TestOutcome::Fail(reason) = &f.outcome {
                for line in reason.lines() {
                    eprintln!("  {}", line);
                }
            }
        }
    }

    eprintln!();
    let failed = failures.len();
    if failed == 0 {
        eprintln!(
            "test result: {}. {} passed, 0 failed",
            paint("ok", "32", no_color),
            passed
        );
        0
    } else {
        eprintln!(
            "test result: {}. {} passed, {} failed (of {})",
            paint("FAILED", "31", no_color),
            passed,
            failed,
            passed + failed
        );
        1
    }
}
