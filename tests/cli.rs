use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn ctxdump() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ctxdump"));
    cmd.env_remove("RUST_LOG").arg("--no-color");
    cmd
}

fn file_headers(dump: &str) -> Vec<String> {
    dump.lines()
        .filter_map(|l| l.strip_prefix("FILE: "))
        .map(str::to_string)
        .collect()
}

#[test]
fn dump_writes_single_block_and_prunes_excluded_dir() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.py"), "x=1");
    write_file(&temp.path().join("ignored/b.py"), "y=2");
    let out = tempdir().unwrap();
    let output = out.path().join("dump.txt");

    ctxdump()
        .arg(temp.path())
        .arg("--output")
        .arg(&output)
        .arg("--exclude")
        .arg("ignored")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 1 files"));

    let dump = fs::read_to_string(&output).unwrap();
    let sep = "=".repeat(80);
    assert_eq!(dump, format!("{sep}\nFILE: a.py\n{sep}\n\nx=1\n\n"));
}

#[test]
fn dump_skips_node_modules_by_default() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("index.js"), "main()");
    write_file(&temp.path().join("node_modules/lib/index.js"), "lib()");
    let output = temp.path().join("dump.txt");

    ctxdump()
        .arg(temp.path())
        .arg("-o")
        .arg(&output)
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let dump = fs::read_to_string(&output).unwrap();
    assert_eq!(file_headers(&dump), vec!["index.js"]);
    assert!(!dump.contains("lib()"));
}

#[test]
fn extension_allow_list_filters_files() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.py"), "print(1)");
    write_file(&temp.path().join("a.txt"), "notes");
    let out = tempdir().unwrap();
    let output = out.path().join("dump.txt");

    ctxdump()
        .arg(temp.path())
        .arg("-o")
        .arg(&output)
        .arg("--ext")
        .arg(".py")
        .assert()
        .success();

    let dump = fs::read_to_string(&output).unwrap();
    assert_eq!(file_headers(&dump), vec!["a.py"]);
}

#[test]
fn repeated_runs_are_byte_identical() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("src/lib.rs"), "pub mod a;\n");
    write_file(&temp.path().join("src/a.rs"), "pub fn a() {}\n");
    write_file(&temp.path().join("README.md"), "# readme\n");
    let output = temp.path().join("context.txt");

    let run = || {
        ctxdump()
            .arg(temp.path())
            .arg("-o")
            .arg(&output)
            .assert()
            .success();
        fs::read(&output).unwrap()
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);

    let dump = String::from_utf8(second).unwrap();
    assert_eq!(
        file_headers(&dump),
        vec!["README.md", "src/a.rs", "src/lib.rs"]
    );
}

#[test]
fn invalid_root_fails_without_writing_output() {
    let temp = tempdir().unwrap();
    let output = temp.path().join("dump.txt");

    ctxdump()
        .arg(temp.path().join("missing"))
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a valid directory"));

    assert!(!output.exists());
}

#[test]
fn root_that_is_a_file_is_rejected() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("plain.txt");
    write_file(&file, "hi");

    ctxdump()
        .arg(&file)
        .arg("-o")
        .arg(temp.path().join("dump.txt"))
        .assert()
        .failure();
}

#[test]
fn strict_decoding_writes_inline_placeholder() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("bad.txt"), [0xFF, 0xFE, b'x']).unwrap();
    write_file(&temp.path().join("good.txt"), "ok");
    let out = tempdir().unwrap();
    let output = out.path().join("dump.txt");

    ctxdump()
        .arg(temp.path())
        .arg("-o")
        .arg(&output)
        .arg("--decoding")
        .arg("strict")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 files could not be read"));

    let dump = fs::read_to_string(&output).unwrap();
    assert_eq!(file_headers(&dump), vec!["bad.txt", "good.txt"]);
    assert!(dump.contains("[ERROR READING FILE]"));
}

#[test]
fn text_only_and_max_size_skip_files() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("image.bin"), [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
    write_file(&temp.path().join("huge.log"), &"x".repeat(4096));
    write_file(&temp.path().join("small.md"), "small");
    let out = tempdir().unwrap();
    let output = out.path().join("dump.txt");

    ctxdump()
        .arg(temp.path())
        .arg("-o")
        .arg(&output)
        .arg("--text-only")
        .arg("--max-size")
        .arg("1024")
        .assert()
        .success();

    let dump = fs::read_to_string(&output).unwrap();
    assert_eq!(file_headers(&dump), vec!["small.md"]);
}

#[test]
fn max_depth_limits_descent() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("top.txt"), "0");
    write_file(&temp.path().join("a/one.txt"), "1");
    write_file(&temp.path().join("a/b/two.txt"), "2");
    let out = tempdir().unwrap();
    let output = out.path().join("dump.txt");

    ctxdump()
        .arg(temp.path())
        .arg("-o")
        .arg(&output)
        .arg("--max-depth")
        .arg("1")
        .assert()
        .success();

    let dump = fs::read_to_string(&output).unwrap();
    assert_eq!(file_headers(&dump), vec!["a/one.txt", "top.txt"]);
}

#[test]
fn framed_style_adds_header_and_footers() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("main.c"), "int main() { return 0; }");
    let out = tempdir().unwrap();
    let output = out.path().join("dump.txt");

    ctxdump()
        .arg(temp.path())
        .arg("-o")
        .arg(&output)
        .arg("--style")
        .arg("framed")
        .assert()
        .success();

    let dump = fs::read_to_string(&output).unwrap();
    assert!(dump.starts_with("# Directory Structure Export\n"));
    assert!(dump.contains("# Total files: 1\n"));
    assert!(dump.contains("END OF FILE: main.c\n"));
}

#[test]
fn json_summary_reports_counts() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.txt"), "alpha");
    write_file(&temp.path().join("b.pyc"), "compiled");
    let out = tempdir().unwrap();
    let output = out.path().join("dump.txt");

    let assert = ctxdump()
        .arg(temp.path())
        .arg("-o")
        .arg(&output)
        .arg("--json")
        .arg("--token-model")
        .arg("heuristic")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let summary: Value = serde_json::from_str(stdout.trim()).expect("valid json summary");

    assert_eq!(summary["files"], 1);
    assert_eq!(summary["content_bytes"], 5);
    assert_eq!(summary["skipped"]["excluded"], 1);
    assert_eq!(summary["token_model"], "heuristic");
    assert!(summary["tokens"].as_u64().unwrap() > 0);
    assert_eq!(
        summary["output_bytes"].as_u64().unwrap(),
        fs::metadata(&output).unwrap().len()
    );
}

#[test]
fn env_vars_configure_the_run() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("keep.rs"), "fn keep() {}");
    write_file(&temp.path().join("drop.md"), "drop");
    let out = tempdir().unwrap();
    let output = out.path().join("env.txt");

    ctxdump()
        .env("CTXDUMP_ROOT", temp.path())
        .env("CTXDUMP_OUTPUT", &output)
        .env("CTXDUMP_EXT", "rs")
        .assert()
        .success();

    let dump = fs::read_to_string(&output).unwrap();
    assert_eq!(file_headers(&dump), vec!["keep.rs"]);
}

#[test]
fn unknown_style_is_a_usage_error() {
    ctxdump()
        .arg("--style")
        .arg("fancy")
        .assert()
        .failure()
        .code(2);
}
