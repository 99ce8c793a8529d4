use cache_dse::commands::{execute_run, resolve_config, validate_args, ConfigSource, RunArgs};
use cache_dse::output::read_report;
use cache_dse::pipeline::AmbiguityPolicy;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const CHARACTERISTICS: &str = "\
size,assoc,blocksize,at,area
1024,1,32,0.5,0.01
1024,2,32,0.6,0.012
2048,1,32,0.55,0.02
";

const SAMPLES: &str = "\
 l1a, l1s, l1missrate
1,1024,0.1
2,1024,0.08
1,2048,0.06
";

struct Fixture {
    dir: TempDir,
    samples: PathBuf,
    characteristics: PathBuf,
}

impl Fixture {
    fn new(samples: &str, characteristics: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let samples_path = dir.path().join("samples.csv");
        let chars_path = dir.path().join("cacti.csv");
        fs::write(&samples_path, samples).unwrap();
        fs::write(&chars_path, characteristics).unwrap();
        Self {
            dir,
            samples: samples_path,
            characteristics: chars_path,
        }
    }

    fn out(&self, name: &str) -> PathBuf {
        self.dir.path().join("out").join(name)
    }

    fn args(&self) -> RunArgs {
        RunArgs {
            samples: self.samples.clone(),
            characteristics: Some(self.characteristics.clone()),
            source: ConfigSource::Preset("aat-vs-l1".to_string()),
            enriched_csv: Some(self.out("enriched.csv")),
            pivot_csv: Some(self.out("pivot.csv")),
            report_json: Some(self.out("report.json")),
            ..Default::default()
        }
    }
}

#[test]
fn test_execute_run_writes_all_outputs() {
    let fixture = Fixture::new(SAMPLES, CHARACTERISTICS);
    let args = fixture.args();
    validate_args(&args).unwrap();

    let result = execute_run(args).unwrap();
    assert_eq!(result.rows.len(), 3);

    let pivot = fs::read_to_string(fixture.out("pivot.csv")).unwrap();
    let mut lines = pivot.lines();
    assert_eq!(lines.next(), Some("log2l1s,Direct Mapped,2-way Set Assoc."));
    assert!(lines.next().unwrap().starts_with("10,"));
    assert!(lines.next().unwrap().ends_with(","));

    let enriched = fs::read_to_string(fixture.out("enriched.csv")).unwrap();
    assert_eq!(enriched.lines().count(), 4);
    assert!(enriched.lines().next().unwrap().contains("l1lookup"));

    let report = read_report(fixture.out("report.json")).unwrap();
    assert_eq!(report.row_count, 3);
    assert_eq!(report.pivot.columns, vec!["Direct Mapped", "2-way Set Assoc."]);
    assert_eq!(report.pivot.values[1][1], None);
}

#[test]
fn test_execute_run_with_config_file() {
    let fixture = Fixture::new(SAMPLES, CHARACTERISTICS);
    let config_path = fixture.dir.path().join("run.toml");
    fs::write(
        &config_path,
        r#"
formula = "single-level"
mem_penalty_ns = 10.0

[pivot]
row_axis = "log2-l1-size"
column_axis = "l1-assoc"
value = "aat"
"#,
    )
    .unwrap();

    let args = RunArgs {
        source: ConfigSource::File(config_path),
        ..fixture.args()
    };
    let result = execute_run(args).unwrap();

    let value = result.pivot.value(10.0, "Direct Mapped").unwrap();
    assert!((value - 1.5).abs() < 1e-12);
}

#[test]
fn test_strict_run_writes_nothing_on_ambiguity() {
    let duplicated = format!("{}1024,1,32,0.7,0.02\n", CHARACTERISTICS);
    let fixture = Fixture::new(SAMPLES, &duplicated);

    let lenient = execute_run(fixture.args()).unwrap();
    assert_eq!(lenient.diagnostics.ambiguous_lookups(), 1);
    fs::remove_dir_all(fixture.out("")).unwrap();

    let args = RunArgs {
        strict: true,
        ..fixture.args()
    };
    assert!(execute_run(args).is_err());
    assert!(!fixture.out("pivot.csv").exists());
    assert!(!fixture.out("report.json").exists());
}

#[test]
fn test_missing_column_fails_run() {
    let fixture = Fixture::new(" l1a, l1missrate\n1,0.1\n", CHARACTERISTICS);
    let err = execute_run(fixture.args()).unwrap_err();

    assert!(format!("{:#}", err).contains("l1s"));
}

#[test]
fn test_resolve_config_strict_flag() {
    let args = RunArgs {
        strict: true,
        ..Default::default()
    };
    let config = resolve_config(&args).unwrap();
    assert_eq!(config.ambiguity, AmbiguityPolicy::Reject);
}

#[test]
fn test_resolve_config_rejects_bad_override() {
    let args = RunArgs {
        source: ConfigSource::Preset("aat-vs-l1".to_string()),
        mem_penalty: Some(f64::INFINITY),
        ..Default::default()
    };
    assert!(resolve_config(&args).is_err());
    assert!(validate_args(&args).is_err());
}
