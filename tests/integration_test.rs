//! Integration tests for the fmd library
//!
//! These tests build small note trees in temporary directories and run the
//! complete discovery, evaluation and reporting pipeline over them.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use fmd::discovery::{DEFAULT_GLOB, FileDiscovery, Walker};
use fmd::predicates::{CaseMode, PredicateError};
use fmd::query::{FilterSpec, Query};
use fmd::runner::{self, OutputOrder, Runner};
use tempfile::TempDir;

/// Helper function to create a test file below `root`
fn create_test_file(root: &Path, name: &str, content: &str) -> PathBuf {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// The two-note tree used by most scenarios
fn setup_notes() -> TempDir {
    let dir = TempDir::new().unwrap();
    create_test_file(
        dir.path(),
        "a.md",
        "---\ntitle: Team Meeting\ntags: [work, urgent]\nauthor: John Smith\nstatus: draft\ndate: 2025-03-01\n---\n\nAgenda\n",
    );
    create_test_file(dir.path(), "b.md", "# Weekend\n\ntags: #personal\n");
    dir
}

/// Run `specs` over every markdown file in `dir`, returning file names
fn find(dir: &TempDir, specs: &[FilterSpec]) -> Vec<String> {
    find_with(dir, 10, false, specs)
}

fn find_with(dir: &TempDir, head: usize, full_text: bool, specs: &[FilterSpec]) -> Vec<String> {
    let query = Query::new(head, full_text, specs).unwrap();
    let candidates = Walker::new(DEFAULT_GLOB).unwrap().discover(&[dir.path().to_path_buf()]).unwrap();
    let report = runner::run(&query, candidates).unwrap();
    report
        .matches
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

fn tag(t: &str) -> FilterSpec {
    FilterSpec::Tag(t.to_string())
}

#[test]
fn test_tag_filters_split_notes() {
    let dir = setup_notes();
    assert_eq!(find(&dir, &[tag("work")]), vec!["a.md"]);
    assert_eq!(find(&dir, &[tag("personal")]), vec!["b.md"]);
    assert_eq!(find(&dir, &[]), vec!["a.md", "b.md"]);
}

#[test]
fn test_tag_matching_ignores_case_and_hash() {
    let dir = setup_notes();
    assert_eq!(find(&dir, &[tag("WORK")]), vec!["a.md"]);
    assert_eq!(find(&dir, &[tag("#Personal")]), vec!["b.md"]);
    assert!(find(&dir, &[tag("missing")]).is_empty());
}

#[test]
fn test_title_filter() {
    let dir = setup_notes();
    assert_eq!(find(&dir, &[FilterSpec::Title("meeting".into())]), vec!["a.md"]);
    assert!(find(&dir, &[FilterSpec::Title("standup".into())]).is_empty());
    // Heading fallback for files without frontmatter
    assert_eq!(find(&dir, &[FilterSpec::Title("^week".into())]), vec!["b.md"]);
}

#[test]
fn test_date_window() {
    let dir = setup_notes();
    let inside = [
        FilterSpec::DateAfter("2025-01-01".into()),
        FilterSpec::DateBefore("2025-03-31".into()),
    ];
    assert_eq!(find(&dir, &inside), vec!["a.md"]);
    assert!(find(&dir, &[FilterSpec::DateAfter("2025-04-01".into())]).is_empty());
}

#[test]
fn test_date_bounds_inclusive() {
    let dir = TempDir::new().unwrap();
    create_test_file(dir.path(), "new-year.md", "---\ndate: 2025-01-01\n---\n");

    assert_eq!(find(&dir, &[FilterSpec::DateAfter("2025-01-01".into())]), vec!["new-year.md"]);
    assert_eq!(find(&dir, &[FilterSpec::DateBefore("2025-01-01".into())]), vec!["new-year.md"]);
}

#[test]
fn test_date_fields_fall_back_in_order() {
    let dir = TempDir::new().unwrap();
    create_test_file(dir.path(), "bad-date.md", "---\ndate: someday\nupdated: 2024-06-15\n---\n");
    create_test_file(dir.path(), "undated.md", "---\ntitle: Undated\n---\n");

    let specs = [FilterSpec::DateAfter("2024-06-01".into())];
    assert_eq!(find(&dir, &specs), vec!["bad-date.md"]);
}

#[test]
fn test_field_alternatives_across_keys() {
    let dir = setup_notes();
    create_test_file(dir.path(), "c.md", "---\nstatus: published\n---\n");
    create_test_file(dir.path(), "d.md", "---\nstatus: archived\n---\n");

    let specs = [
        FilterSpec::Field("author:john".into()),
        FilterSpec::Field("status:published".into()),
    ];
    assert_eq!(find(&dir, &specs), vec!["a.md", "c.md"]);
}

#[test]
fn test_author_and_field_must_both_hold() {
    let dir = setup_notes();
    create_test_file(dir.path(), "c.md", "---\nauthor: John Doe\nstatus: published\n---\n");

    let specs = [
        FilterSpec::Author("john".into()),
        FilterSpec::Field("status:draft".into()),
    ];
    assert_eq!(find(&dir, &specs), vec!["a.md"]);
}

#[test]
fn test_same_kind_is_union() {
    let dir = setup_notes();
    create_test_file(dir.path(), "c.md", "---\ntags:\n  - home\n---\n");

    let a: BTreeSet<_> = find(&dir, &[tag("urgent")]).into_iter().collect();
    let b: BTreeSet<_> = find(&dir, &[tag("home")]).into_iter().collect();
    let both: BTreeSet<_> = find(&dir, &[tag("urgent"), tag("home")]).into_iter().collect();

    assert_eq!(both, a.union(&b).cloned().collect());
    assert_eq!(both.len(), 2);
}

#[test]
fn test_different_kinds_are_intersection() {
    let dir = setup_notes();
    create_test_file(dir.path(), "c.md", "---\ntitle: Meeting notes\ntags: [home]\n---\n");

    let by_tag: BTreeSet<_> = find(&dir, &[tag("work")]).into_iter().collect();
    let by_title: BTreeSet<_> = find(&dir, &[FilterSpec::Title("meeting".into())]).into_iter().collect();
    let both: BTreeSet<_> = find(&dir, &[tag("work"), FilterSpec::Title("meeting".into())])
        .into_iter()
        .collect();

    assert_eq!(both, by_tag.intersection(&by_title).cloned().collect());
    assert_eq!(both.into_iter().collect::<Vec<_>>(), vec!["a.md"]);
}

#[test]
fn test_full_text_finds_deep_tags() {
    let dir = TempDir::new().unwrap();
    let filler = "line\n".repeat(20);
    create_test_file(dir.path(), "plain.md", &format!("# Plain\n{filler}#deep\n"));
    create_test_file(dir.path(), "front.md", &format!("---\ntitle: Front\n---\n{filler}#deep\n"));
    create_test_file(dir.path(), "shallow.md", "#deep near the top\n");

    let head = find_with(&dir, 10, false, &[tag("deep")]);
    let full = find_with(&dir, 10, true, &[tag("deep")]);

    assert_eq!(head, vec!["shallow.md"]);
    assert_eq!(full, vec!["front.md", "plain.md", "shallow.md"]);
    assert!(head.iter().all(|name| full.contains(name)));
}

#[test]
fn test_head_limit_widens_scan() {
    let dir = TempDir::new().unwrap();
    create_test_file(dir.path(), "late.md", &format!("{}#late\n", "x\n".repeat(12)));

    assert!(find_with(&dir, 10, false, &[tag("late")]).is_empty());
    assert_eq!(find_with(&dir, 20, false, &[tag("late")]), vec!["late.md"]);
}

#[test]
fn test_name_filter_case_modes() {
    let dir = setup_notes();
    create_test_file(dir.path(), "Agenda.md", "");

    let sensitive = FilterSpec::Name { pattern: "^agenda".into(), case: CaseMode::Sensitive };
    let insensitive = FilterSpec::Name { pattern: "^agenda".into(), case: CaseMode::Insensitive };
    assert!(find(&dir, &[sensitive]).is_empty());
    assert_eq!(find(&dir, &[insensitive]), vec!["Agenda.md"]);
}

#[test]
fn test_name_matches_base_name_only() {
    let dir = TempDir::new().unwrap();
    create_test_file(dir.path(), "journal/today.md", "");
    create_test_file(dir.path(), "other/journal.md", "");

    let specs = [FilterSpec::Name { pattern: "journal".into(), case: CaseMode::Sensitive }];
    assert_eq!(find(&dir, &specs), vec!["journal.md"]);
}

#[test]
fn test_usage_errors_rejected_before_run() {
    let bad = [
        FilterSpec::Title("(".into()),
        FilterSpec::Field("no-colon".into()),
        FilterSpec::DateAfter("01/02/2025".into()),
        FilterSpec::Tag(String::new()),
    ];
    for spec in bad {
        let err = Query::new(10, false, std::slice::from_ref(&spec));
        assert!(err.is_err(), "{spec:?} should be rejected");
    }

    assert!(matches!(
        Query::new(10, false, &[FilterSpec::DateBefore("2025-13-01".into())]),
        Err(PredicateError::InvalidDate { .. })
    ));
}

#[test]
fn test_unreadable_candidate_is_reported_not_fatal() {
    let dir = setup_notes();
    let mut candidates = Walker::new(DEFAULT_GLOB).unwrap().discover(&[dir.path().to_path_buf()]).unwrap();
    candidates.insert(0, dir.path().join("vanished.md"));

    let query = Query::new(10, false, &[tag("work")]).unwrap();
    let report = Runner::new(&query).order(OutputOrder::Walk).run(candidates).unwrap();

    assert_eq!(report.matches, vec![dir.path().join("a.md")]);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.examined, 3);
}

#[test]
fn test_many_files_in_parallel() {
    let dir = TempDir::new().unwrap();
    for i in 0..200 {
        let tags = if i % 3 == 0 { "[fizz]" } else { "[buzz]" };
        create_test_file(dir.path(), &format!("note-{i:03}.md"), &format!("---\ntags: {tags}\n---\n"));
    }

    let query = Query::new(10, false, &[tag("fizz")]).unwrap();
    let candidates = Walker::new(DEFAULT_GLOB).unwrap().discover(&[dir.path().to_path_buf()]).unwrap();
    let report = Runner::new(&query).threads(Some(4)).run(candidates).unwrap();

    assert_eq!(report.matches.len(), 67);
    assert!(report.matches.windows(2).all(|w| w[0] < w[1]));
}
