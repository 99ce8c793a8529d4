use cache_dse::enricher::LookupStatus;
use cache_dse::metrics::{single_level_aat, three_level_with_victim_aat, two_level_aat};
use cache_dse::normalizer::{label_assoc, normalize_assoc};
use cache_dse::pipeline::{load_inputs, preset, run_pipeline, InputPaths, RunResult};
use cache_dse::utils::error::{LoadError, PipelineError};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CHARACTERISTICS: &str = "\
size,assoc,blocksize,at,area
1024,1,32,0.5,0.01
1024,2,32,0.6,0.012
2048,1,32,0.55,0.02
2048,2,32,0.65,0.022
1024,-1,32,0.9,0.03
65536,8,32,2.0,0.5
";

const VICTIMS: &str = "\
vcs,at,area
2,0.08,0.0005
4,0.1,0.001
";

const L1_SAMPLES: &str = "\
 l1a, l1s, l1missrate, l1read, l1write, l1readmiss, l1writemiss
1,1024,0.1,100,50,10,5
2,1024,0.08,100,50,8,4
1,2048,0.06,100,50,6,3
2,2048,0.05,100,50,5,2
64,1024,0.04,100,50,4,2
";

fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn run(preset_name: &str, samples: &Path, chars: Option<&Path>, victim: Option<&Path>) -> RunResult {
    let config = preset(preset_name).unwrap();
    let paths = InputPaths {
        samples,
        characteristics: chars,
        victim,
    };
    let inputs = load_inputs(&config, paths).unwrap();
    run_pipeline(&config, inputs).unwrap()
}

fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("expected a value, found no data");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_formula_properties() {
    assert_eq!(single_level_aat(10.0, 0.0, 100.0), 10.0);
    assert_eq!(two_level_aat(3.0, 0.0, 7.0, 0.5, 100.0), 3.0);
    assert_eq!(
        three_level_with_victim_aat(3.0, 0.0, 7.0, 0.0, 100.0, 0.4, 0.0),
        3.0
    );
}

#[test]
fn test_normalizer_properties() {
    for code in [-1, 1, 2, 3, 4, 8, 16, 128] {
        assert_eq!(normalize_assoc(normalize_assoc(code)), normalize_assoc(code));
    }
    assert_eq!(label_assoc(4), "4-way Set Assoc.");
    assert_eq!(label_assoc(-1), "Fully Assoc.");
}

#[test]
fn test_single_level_aat_figure() {
    let dir = TempDir::new().unwrap();
    let samples = write_fixture(&dir, "l1.csv", L1_SAMPLES);
    let chars = write_fixture(&dir, "cacti.csv", CHARACTERISTICS);

    let result = run("aat-vs-l1", &samples, Some(chars.as_path()), None);

    assert_eq!(result.pivot.rows, vec![10.0, 11.0]);
    assert_eq!(
        result.pivot.columns,
        vec!["Direct Mapped", "2-way Set Assoc.", "Fully Assoc."]
    );
    assert_close(result.pivot.value(10.0, "Direct Mapped"), 0.5 + 0.1 * 20.1);
    assert_close(result.pivot.value(10.0, "2-way Set Assoc."), 0.6 + 0.08 * 20.1);
    assert_close(result.pivot.value(10.0, "Fully Assoc."), 0.9 + 0.04 * 20.1);
    assert_close(result.pivot.value(11.0, "2-way Set Assoc."), 0.65 + 0.05 * 20.1);
    assert_eq!(result.pivot.value(11.0, "Fully Assoc."), None);

    assert_eq!(result.rows[4].l1.status, LookupStatus::Hit);
    assert_eq!(result.rows[4].l1.area, Some(0.03));
    assert!(result.diagnostics.is_clean());
}

#[test]
fn test_miss_rate_figure_needs_no_characteristics() {
    let dir = TempDir::new().unwrap();
    let samples = write_fixture(&dir, "l1.csv", L1_SAMPLES);

    let result = run("miss-rate-vs-l1", &samples, None, None);

    assert_eq!(result.pivot.value(10.0, "Direct Mapped"), Some(0.1));
    assert_eq!(result.pivot.value(11.0, "2-way Set Assoc."), Some(0.05));
    assert!(result.rows.iter().all(|r| r.aat.is_none()));
    assert_eq!(result.diagnostics.rows_without_aat, 0);
}

#[test]
fn test_lookup_miss_is_no_data() {
    let dir = TempDir::new().unwrap();
    let samples = write_fixture(
        &dir,
        "l1.csv",
        " l1a, l1s, l1missrate\n1,1024,0.1\n1,4096,0.02\n",
    );
    let chars = write_fixture(&dir, "cacti.csv", CHARACTERISTICS);

    let result = run("aat-vs-l1", &samples, Some(chars.as_path()), None);

    assert_eq!(result.rows[1].l1.status, LookupStatus::Miss);
    assert_eq!(result.rows[1].l1.access_time_ns, None);
    assert_eq!(result.rows[1].aat, None);
    assert_eq!(result.pivot.value(12.0, "Direct Mapped"), None);
    assert_eq!(result.pivot.cell(12.0, "Direct Mapped").unwrap().observations, 1);
    assert_eq!(result.diagnostics.lookup_misses(), 1);
    assert_eq!(result.diagnostics.rows_without_aat, 1);
}

#[test]
fn test_two_level_figure_with_absent_l2() {
    let dir = TempDir::new().unwrap();
    let samples = write_fixture(
        &dir,
        "l2.csv",
        " l1a, l1s, l1missrate, l2a, l2s, l2missrate\n\
         1,1024,0.1,8,65536,0.5\n\
         1,2048,0.06,0,0,0\n",
    );
    let chars = write_fixture(&dir, "cacti.csv", CHARACTERISTICS);

    let result = run("aat-l1-l2", &samples, Some(chars.as_path()), None);

    assert_close(
        result.pivot.value(10.0, "Direct Mapped"),
        0.5 + 0.1 * (2.0 + 0.5 * 20.1),
    );
    assert_close(result.pivot.value(11.0, "Direct Mapped"), 0.55 + 0.06 * 20.1);

    let absent = result.rows[1].l2.unwrap();
    assert_eq!(absent.status, LookupStatus::Absent);
    assert_close(result.rows[1].total_area, 0.02);
    assert_eq!(result.diagnostics.lookups["l2"].absent, 1);
}

#[test]
fn test_l2_size_columns() {
    let dir = TempDir::new().unwrap();
    let samples = write_fixture(
        &dir,
        "l2.csv",
        " l1a, l1s, l1missrate, l2a, l2s, l2missrate\n\
         1,1024,0.1,8,65536,0.5\n\
         1,1024,0.1,8,262144,0.4\n",
    );
    let chars = write_fixture(&dir, "cacti.csv", CHARACTERISTICS);

    let result = run("aat-vs-l2-size", &samples, Some(chars.as_path()), None);

    assert_eq!(result.pivot.columns, vec!["64KiB", "256KiB"]);
    assert!(result.pivot.value(10.0, "64KiB").is_some());
    assert_eq!(result.pivot.value(10.0, "256KiB"), None);
    assert_eq!(result.diagnostics.lookups["l2"].misses, 1);
}

#[test]
fn test_victim_figure() {
    let dir = TempDir::new().unwrap();
    let samples = write_fixture(
        &dir,
        "vc.csv",
        " l1a, l1s, l1missrate, l2a, l2s, l2missrate, vcs, swapreqs, swapreqrate, swaps\n\
         1,1024,0.1,8,65536,0.5,0,0,0,0\n\
         1,1024,0.08,8,65536,0.5,4,20,0.02,10\n\
         2,1024,0.07,8,65536,0.5,0,0,0,0\n\
         8,1024,0.05,8,65536,0.5,0,0,0,0\n",
    );
    let chars = write_fixture(&dir, "cacti.csv", CHARACTERISTICS);
    let victims = write_fixture(&dir, "vc_cacti.csv", VICTIMS);

    let result = run("aat-victim", &samples, Some(chars.as_path()), Some(victims.as_path()));

    assert_eq!(
        result.pivot.columns,
        vec![
            "Direct Mapped L1 w/ No VC",
            "Direct Mapped L1 w/ 4-entry VC",
            "2-way Set Assoc. L1 w/ No VC",
        ]
    );
    assert_close(
        result.pivot.value(10.0, "Direct Mapped L1 w/ No VC"),
        0.5 + 0.1 * (2.0 + 0.5 * 20.1),
    );
    assert_close(
        result.pivot.value(10.0, "Direct Mapped L1 w/ 4-entry VC"),
        0.5 + 0.02 * 0.1 + 0.08 * (2.0 + 0.5 * 20.1),
    );
    assert_close(result.rows[1].total_area, 0.01 + 0.5 + 0.001);

    // The 8-way row has no label on this axis: kept in long form, left out of the pivot
    assert_eq!(result.rows.len(), 4);
    assert_eq!(result.diagnostics.unplaced_rows, vec![3]);
}

#[test]
fn test_block_size_figure() {
    let dir = TempDir::new().unwrap();
    let samples = write_fixture(
        &dir,
        "bs.csv",
        " l1a, l1s, l1missrate, bs\n\
         1,1024,0.1,16\n\
         1,1024,0.08,32\n\
         1,2048,0.07,16\n\
         1,2048,0.05,64\n",
    );

    let result = run("miss-rate-vs-block", &samples, None, None);

    assert_eq!(result.pivot.rows, vec![4.0, 5.0, 6.0]);
    assert_eq!(result.pivot.columns, vec!["1KiB", "2KiB"]);
    assert_eq!(result.pivot.value(5.0, "1KiB"), Some(0.08));
    assert_eq!(result.pivot.value(6.0, "1KiB"), None);
    assert_eq!(result.pivot.empty_cells(), 2);
}

#[test]
fn test_missing_column_is_fatal() {
    let dir = TempDir::new().unwrap();
    let samples = write_fixture(&dir, "l1.csv", L1_SAMPLES);
    let chars = write_fixture(&dir, "cacti.csv", CHARACTERISTICS);

    let config = preset("aat-l1-l2").unwrap();
    let paths = InputPaths {
        samples: &samples,
        characteristics: Some(chars.as_path()),
        victim: None,
    };

    match load_inputs(&config, paths) {
        Err(PipelineError::Load(LoadError::MissingColumn { column, .. })) => {
            assert!(column.starts_with("l2"));
        }
        other => panic!("expected MissingColumn, got {:?}", other.map(|i| i.samples.len())),
    }
}

#[test]
fn test_long_form_keeps_input_order() {
    let dir = TempDir::new().unwrap();
    let samples = write_fixture(&dir, "l1.csv", L1_SAMPLES);
    let chars = write_fixture(&dir, "cacti.csv", CHARACTERISTICS);

    let result = run("aat-vs-l1", &samples, Some(chars.as_path()), None);

    let order: Vec<(i64, u64)> = result
        .rows
        .iter()
        .map(|r| (r.sample.l1.assoc_code, r.sample.l1.size_bytes))
        .collect();
    assert_eq!(
        order,
        vec![(1, 1024), (2, 1024), (1, 2048), (2, 2048), (64, 1024)]
    );
}
