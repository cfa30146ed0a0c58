use super::*;
use crate::classify::SkipReason;
use crate::config::PackConfig;
use clap::Parser;
use tempfile::TempDir;

const LOGIN_TABLE: &str = "说明,,,,,,\n\
编号,模块,功能点,预置条件,操作步骤,预期结果,用例等级\n\
TC001,登录,账号登录,\"已安装App\",\"1. 打开App\n2. 输入账号密码\",\"1. 显示首页\n2. 登录成功\",高\n";

fn settings_in(dir: &TempDir, extra: &[&str]) -> Settings {
    let mut argv = vec!["casepack"];
    argv.extend_from_slice(extra);
    let args = RootArgs::parse_from(argv);
    Settings::from_config(PackConfig::default(), &args, dir.path())
}

fn write_source(dir: &Path, name: &str, text: &str) -> PathBuf {
    fs::create_dir_all(dir).expect("create source dir");
    let path = dir.join(name);
    fs::write(&path, text).expect("write source");
    path
}

#[test]
fn converts_login_table_into_package() {
    let dir = TempDir::new().expect("temp dir");
    let settings = settings_in(&dir, &[]);
    let source = write_source(&dir.path().join("cases"), "登录 用例.csv", LOGIN_TABLE);

    let outcome = convert_file(&source, &settings).expect("convert");
    let (package, document, summary) = match outcome {
        FileOutcome::Converted {
            package,
            document,
            summary,
            ..
        } => (package, document, summary),
        other => panic!("expected conversion, got {other:?}"),
    };
    assert_eq!(package, "登录-用例");
    assert_eq!(document, "packages/登录-用例/cases/登录 用例.md");
    assert_eq!(summary.cases, 1);
    assert_eq!(summary.step_rows, 2);

    let markdown = fs::read_to_string(dir.path().join(&document)).expect("read document");
    assert!(markdown.starts_with("# 登录 用例\n"));
    assert!(markdown.contains("## 1. TC001\n"));
    assert!(markdown.contains("| 1 | 打开App | 显示首页 |\n"));
    assert!(markdown.contains("| 2 | 输入账号密码 | 登录成功 |\n"));
    assert!(dir.path().join("packages/登录-用例/package.json").is_file());
}

#[test]
fn crlf_input_converts_like_lf_input() {
    let dir = TempDir::new().expect("temp dir");
    let settings = settings_in(&dir, &[]);
    let lf = write_source(dir.path(), "lf.csv", LOGIN_TABLE);
    let crlf = write_source(dir.path(), "crlf.csv", &LOGIN_TABLE.replace('\n', "\r\n"));

    convert_file(&lf, &settings).expect("convert lf");
    convert_file(&crlf, &settings).expect("convert crlf");
    let read = |name: &str| {
        fs::read_to_string(dir.path().join(format!("packages/{name}/cases/{name}.md")))
            .expect("read document")
    };
    assert_eq!(
        read("lf").replacen("# lf", "", 1),
        read("crlf").replacen("# crlf", "", 1)
    );
}

#[test]
fn structural_problems_are_skips() {
    let dir = TempDir::new().expect("temp dir");
    let settings = settings_in(&dir, &[]);
    let short = write_source(dir.path(), "short.csv", "编号,模块\nTC1,登录\n");
    let headless = write_source(dir.path(), "headless.csv", "a,b\nc,d\ne,f\n");

    assert_eq!(
        convert_file(&short, &settings).expect("convert short"),
        FileOutcome::Skipped {
            reason: SkipReason::TooFewRows
        }
    );
    assert_eq!(
        convert_file(&headless, &settings).expect("convert headless"),
        FileOutcome::Skipped {
            reason: SkipReason::NoHeader
        }
    );
    assert!(!dir.path().join("packages/short").exists());
}

#[test]
fn unterminated_quote_is_lenient_unless_strict() {
    let dir = TempDir::new().expect("temp dir");
    let text = "说明\n编号,模块,操作步骤\nTC1,登录,\"1. 打开\n2. 关闭\n";
    let source = write_source(dir.path(), "open.csv", text);

    let lenient = convert_file(&source, &settings_in(&dir, &[])).expect("lenient convert");
    assert!(matches!(lenient, FileOutcome::Converted { .. }));

    let err = convert_file(&source, &settings_in(&dir, &["--strict-quotes"]))
        .expect_err("strict convert");
    assert!(err.to_string().contains("line 3"));
}

#[test]
fn batch_continues_after_failed_file() {
    let dir = TempDir::new().expect("temp dir");
    let settings = settings_in(&dir, &[]);
    let missing = dir.path().join("missing.csv");
    let good = write_source(dir.path(), "good.csv", LOGIN_TABLE);

    let report = convert_batch(&[missing, good], &settings, &Progress::new(false));
    assert_eq!(report.attempted, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.converted, 1);
    assert_eq!(report.files[0].source, "missing.csv");
    match &report.files[0].outcome {
        FileOutcome::Failed { error } => assert!(error.contains("read ")),
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(dir.path().join("packages/good/cases/good.md").is_file());
}

#[test]
fn discovers_sorted_csv_files_in_cases_dir() {
    let dir = TempDir::new().expect("temp dir");
    let settings = settings_in(&dir, &[]);
    let cases = dir.path().join("cases");
    write_source(&cases, "b.csv", "");
    write_source(&cases, "a.csv", "");
    write_source(&cases, "notes.txt", "");
    fs::create_dir_all(cases.join("dir.csv")).expect("create dir");

    let found = discover_sources(&[], &settings).expect("discover");
    assert_eq!(found, vec![cases.join("a.csv"), cases.join("b.csv")]);
}

#[test]
fn explicit_paths_resolve_against_working_directory() {
    let dir = TempDir::new().expect("temp dir");
    let settings = settings_in(&dir, &[]);
    let found = discover_sources(
        &[PathBuf::from("x.csv"), PathBuf::from("/abs/y.csv")],
        &settings,
    )
    .expect("discover");
    assert_eq!(found, vec![dir.path().join("x.csv"), PathBuf::from("/abs/y.csv")]);
}

#[test]
fn missing_cases_dir_discovers_nothing() {
    let dir = TempDir::new().expect("temp dir");
    let settings = settings_in(&dir, &["--cases-dir", "nowhere"]);
    assert!(discover_sources(&[], &settings).expect("discover").is_empty());
}

#[test]
fn cli_overrides_config_values() {
    let dir = TempDir::new().expect("temp dir");
    let config = PackConfig {
        packages_dir: PathBuf::from("from-config"),
        strict_quotes: true,
        ..PackConfig::default()
    };
    let args = RootArgs::parse_from(["casepack", "--packages-dir", "from-cli"]);
    let settings = Settings::from_config(config, &args, dir.path());
    assert_eq!(settings.packages_dir, dir.path().join("from-cli"));
    assert_eq!(settings.cases_dir, dir.path().join("cases"));
    assert!(settings.strict_quotes);
}

#[test]
fn resolve_reads_default_config_file() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(
        dir.path().join("casepack.json"),
        r#"{"cases_dir": "tables", "runner": "npx midscene"}"#,
    )
    .expect("write config");
    let args = RootArgs::parse_from(["casepack"]);
    let settings = Settings::resolve(&args, dir.path()).expect("resolve settings");
    assert_eq!(settings.cases_dir, dir.path().join("tables"));
    assert_eq!(settings.config.runner, "npx midscene");
}

#[test]
fn explicit_missing_config_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let args = RootArgs::parse_from(["casepack", "--config", "absent.json"]);
    assert!(Settings::resolve(&args, dir.path()).is_err());
}
