use std::fs;
use std::path::{Path, PathBuf};

use twinsum::engine::digest::Digester;
use twinsum::errors::ManifestError;
use twinsum::pipeline::{enumerate, manifest_paths, run_manifest};
use twinsum::{ManifestOpts, RunOutcome, manifest_dir};

fn opts_builtin() -> ManifestOpts {
    ManifestOpts {
        builtin: true,
        ..Default::default()
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|s| s.to_string())
        .collect()
}

fn is_hex(s: &str, len: usize) -> bool {
    s.len() == len && s.chars().all(|c| c.is_ascii_hexdigit())
}

// --- full builtin runs ---

#[test]
fn test_builtin_run_writes_both_manifests_in_sorted_order() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b.txt"), "bee").unwrap();
    fs::write(dir.path().join("A.TXT"), "ay").unwrap();
    fs::write(dir.path().join("1.dat"), "one").unwrap();

    let out = manifest_dir(dir.path(), &opts_builtin()).unwrap();
    let summary = match out {
        RunOutcome::Written(s) => s,
        other => panic!("expected Written, got {other:?}"),
    };
    assert_eq!(summary.file_count, 3);
    assert!(!summary.recursive);

    let b3 = read_lines(&summary.manifest_paths[0]);
    let xxh = read_lines(&summary.manifest_paths[1]);
    assert_eq!(b3.len(), 3);
    assert_eq!(xxh.len(), 3);

    // case-insensitive full-path sort: 1.dat, A.TXT, b.txt
    for (lines, hex_len) in [(&b3, 64), (&xxh, 32)] {
        assert!(lines[0].ends_with("  1.dat"));
        assert!(lines[1].ends_with("  A.TXT"));
        assert!(lines[2].ends_with("  b.txt"));
        for line in lines.iter() {
            let (digest, _) = line.split_once("  ").unwrap();
            assert!(is_hex(digest, hex_len), "bad digest in {line:?}");
        }
    }

    // no temporaries survive a successful run
    assert!(!dir.path().join("CHECKSUMS.b3.tmp").exists());
    assert!(!dir.path().join("CHECKSUMS.xxh128.tmp").exists());
}

#[test]
fn test_two_runs_produce_byte_identical_manifests() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("x.bin"), [0u8, 1, 2, 3]).unwrap();
    fs::write(dir.path().join("y.bin"), "yyy").unwrap();

    manifest_dir(dir.path(), &opts_builtin()).unwrap();
    let b3_first = fs::read(dir.path().join("CHECKSUMS.b3")).unwrap();
    let xxh_first = fs::read(dir.path().join("CHECKSUMS.xxh128")).unwrap();

    manifest_dir(dir.path(), &opts_builtin()).unwrap();
    assert_eq!(fs::read(dir.path().join("CHECKSUMS.b3")).unwrap(), b3_first);
    assert_eq!(
        fs::read(dir.path().join("CHECKSUMS.xxh128")).unwrap(),
        xxh_first
    );
}

#[test]
fn test_prior_manifests_are_excluded_and_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("data.txt"), "payload").unwrap();
    // stale manifests from an earlier run, one of them odd-cased
    fs::write(dir.path().join("CHECKSUMS.b3"), "junk line\n").unwrap();
    fs::write(dir.path().join("checksums.XXH128"), "junk line\n").unwrap();

    let out = manifest_dir(dir.path(), &opts_builtin()).unwrap();
    let summary = match out {
        RunOutcome::Written(s) => s,
        other => panic!("expected Written, got {other:?}"),
    };
    // only data.txt is eligible; neither manifest hashed itself
    assert_eq!(summary.file_count, 1);

    let b3 = read_lines(&dir.path().join("CHECKSUMS.b3"));
    assert_eq!(b3.len(), 1);
    assert!(b3[0].ends_with("  data.txt"));
    assert!(!b3[0].contains("junk"));
}

#[test]
fn test_empty_directory_is_a_distinct_success() {
    let dir = tempfile::tempdir().unwrap();
    let out = manifest_dir(dir.path(), &opts_builtin()).unwrap();
    assert!(matches!(out, RunOutcome::Empty { .. }));
    assert!(!dir.path().join("CHECKSUMS.b3").exists());
    assert!(!dir.path().join("CHECKSUMS.xxh128").exists());
}

#[test]
fn test_non_recursive_lists_immediate_children_only() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("top.txt"), "t").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("inner.txt"), "i").unwrap();

    let out = manifest_dir(dir.path(), &opts_builtin()).unwrap();
    let summary = match out {
        RunOutcome::Written(s) => s,
        other => panic!("expected Written, got {other:?}"),
    };
    assert_eq!(summary.file_count, 1);
    let b3 = read_lines(&summary.manifest_paths[0]);
    assert!(b3[0].ends_with("  top.txt"));
}

#[test]
fn test_recursive_collects_subdirectories() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("top.txt"), "t").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("inner.txt"), "i").unwrap();

    let opts = ManifestOpts {
        recursive: true,
        ..opts_builtin()
    };
    let out = manifest_dir(dir.path(), &opts).unwrap();
    let summary = match out {
        RunOutcome::Written(s) => s,
        other => panic!("expected Written, got {other:?}"),
    };
    assert_eq!(summary.file_count, 2);
    assert!(summary.recursive);
    let b3 = read_lines(&summary.manifest_paths[0]);
    assert!(b3.iter().any(|l| l.ends_with("  sub/inner.txt")));
}

// --- symlink policy ---

#[cfg(unix)]
#[test]
fn test_symlinks_never_traversed_or_hashed() {
    use std::os::unix::fs::symlink;

    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("real.txt"), "real").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("inner.txt"), "i").unwrap();
    // file link, directory link, and a cycle back to the root
    symlink(dir.path().join("real.txt"), dir.path().join("alias.txt")).unwrap();
    symlink(dir.path().join("sub"), dir.path().join("subdir-link")).unwrap();
    symlink(dir.path(), dir.path().join("sub").join("loop")).unwrap();

    let opts = ManifestOpts {
        recursive: true,
        ..opts_builtin()
    };
    let out = manifest_dir(dir.path(), &opts).unwrap();
    let summary = match out {
        RunOutcome::Written(s) => s,
        other => panic!("expected Written, got {other:?}"),
    };
    assert_eq!(summary.file_count, 2);

    let b3 = read_lines(&summary.manifest_paths[0]);
    assert!(b3.iter().all(|l| !l.contains("alias.txt")));
    assert!(b3.iter().all(|l| !l.contains("subdir-link")));
    assert!(b3.iter().all(|l| !l.contains("loop")));
}

#[cfg(unix)]
#[test]
fn test_non_recursive_skips_symlinked_files() {
    use std::os::unix::fs::symlink;

    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("real.txt"), "real").unwrap();
    symlink(dir.path().join("real.txt"), dir.path().join("alias.txt")).unwrap();

    let report = enumerate(dir.path(), "CHECKSUMS", false, false).unwrap();
    let rels: Vec<&str> = report.entries.iter().map(|e| e.rel_path.as_str()).collect();
    assert_eq!(rels, vec!["real.txt"]);
}

// --- failure paths (custom digesters drive run_manifest directly) ---

struct StaticDigester {
    label: &'static str,
    extension: &'static str,
    line: &'static str,
    fail_on: Option<&'static str>,
}

impl Digester for StaticDigester {
    fn label(&self) -> &str {
        self.label
    }

    fn extension(&self) -> &str {
        self.extension
    }

    fn digest_line(&self, _root: &Path, rel: &str) -> Result<String, ManifestError> {
        if let Some(fail_on) = self.fail_on
            && rel == fail_on
        {
            return Err(ManifestError::HashTool {
                tool: self.label.to_string(),
                path: rel.to_string(),
                detail: "exit status: 3".to_string(),
            });
        }
        Ok(format!("{}  {}", self.line, rel))
    }
}

fn static_suite(fail_on: Option<&'static str>, line_b: &'static str) -> [Box<dyn Digester>; 2] {
    [
        Box::new(StaticDigester {
            label: "ALPHA",
            extension: "alpha",
            line: "aaaa",
            fail_on: None,
        }),
        Box::new(StaticDigester {
            label: "BETA",
            extension: "beta",
            line: line_b,
            fail_on,
        }),
    ]
}

#[test]
fn test_failed_hash_discards_temps_and_keeps_prior_manifest() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    fs::write(dir.path().join("b.txt"), "b").unwrap();
    // a manifest from an earlier successful run
    fs::write(dir.path().join("SUMS.alpha"), "old line\n").unwrap();

    let digesters = static_suite(Some("b.txt"), "bbbb");
    let report = enumerate(dir.path(), "SUMS", false, false).unwrap();
    assert_eq!(report.entries.len(), 2);

    let finals = manifest_paths(dir.path(), "SUMS", &digesters);
    let err = run_manifest(dir.path(), &report.entries, &digesters, finals, false, false)
        .expect_err("run must fail when a hasher fails");

    let tool_err = err.downcast_ref::<ManifestError>().unwrap();
    assert!(matches!(
        tool_err,
        ManifestError::HashTool { path, .. } if path.as_str() == "b.txt"
    ));

    assert!(!dir.path().join("SUMS.alpha.tmp").exists());
    assert!(!dir.path().join("SUMS.beta.tmp").exists());
    assert!(!dir.path().join("SUMS.beta").exists());
    // the prior manifest was never touched
    assert_eq!(
        fs::read_to_string(dir.path().join("SUMS.alpha")).unwrap(),
        "old line\n"
    );
}

#[test]
fn test_line_count_mismatch_fails_verification_without_promotion() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("only.txt"), "x").unwrap();

    // second digester smuggles an embedded newline: two lines for one file
    let digesters = static_suite(None, "bb\nbb");
    let report = enumerate(dir.path(), "SUMS", false, false).unwrap();
    let finals = manifest_paths(dir.path(), "SUMS", &digesters);
    let err = run_manifest(dir.path(), &report.entries, &digesters, finals, false, false)
        .expect_err("verification must catch the extra line");

    match err.downcast_ref::<ManifestError>().unwrap() {
        ManifestError::ManifestIntegrity {
            algorithm,
            expected,
            actual,
        } => {
            assert_eq!(algorithm, "BETA");
            assert_eq!(*expected, 1);
            assert_eq!(*actual, 2);
        }
        other => panic!("expected ManifestIntegrity, got {other:?}"),
    }

    assert!(!dir.path().join("SUMS.alpha").exists());
    assert!(!dir.path().join("SUMS.beta").exists());
    assert!(!dir.path().join("SUMS.alpha.tmp").exists());
    assert!(!dir.path().join("SUMS.beta.tmp").exists());
}

#[test]
fn test_stale_temp_from_aborted_run_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    // leftover from a crashed run; also matches the exclusion predicate
    fs::write(dir.path().join("SUMS.alpha.tmp"), "stale\n").unwrap();

    let digesters = static_suite(None, "bbbb");
    let report = enumerate(dir.path(), "SUMS", false, false).unwrap();
    assert_eq!(report.entries.len(), 1, "stale temp must not be hashed");

    let finals = manifest_paths(dir.path(), "SUMS", &digesters);
    run_manifest(dir.path(), &report.entries, &digesters, finals, false, false).unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("SUMS.alpha")).unwrap(),
        "aaaa  a.txt\n"
    );
    assert!(!dir.path().join("SUMS.alpha.tmp").exists());
}

// --- external tool digester (stub scripts) ---

#[cfg(unix)]
fn write_stub_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

#[cfg(unix)]
fn leaked(path: PathBuf) -> &'static str {
    Box::leak(path.to_string_lossy().into_owned().into_boxed_str())
}

#[cfg(unix)]
#[test]
fn test_tool_digester_captures_single_stdout_line() {
    use twinsum::engine::ToolDigester;
    use twinsum::utils::AlgorithmSpec;

    let bin = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    fs::write(root.path().join("a.txt"), "a").unwrap();
    let tool = write_stub_tool(bin.path(), "fakesum", "#!/bin/sh\necho \"feedface  $2\"\n");

    let digester = ToolDigester::new(AlgorithmSpec {
        label: "STUB",
        extension: "stub",
        tool: leaked(tool),
        tool_flags: &[],
    });
    let line = digester.digest_line(root.path(), "a.txt").unwrap();
    assert_eq!(line, "feedface  a.txt");
}

#[cfg(unix)]
#[test]
fn test_tool_digester_nonzero_exit_is_fatal() {
    use twinsum::engine::ToolDigester;
    use twinsum::utils::AlgorithmSpec;

    let bin = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    fs::write(root.path().join("a.txt"), "a").unwrap();
    let tool = write_stub_tool(bin.path(), "failsum", "#!/bin/sh\nexit 3\n");

    let digester = ToolDigester::new(AlgorithmSpec {
        label: "STUB",
        extension: "stub",
        tool: leaked(tool),
        tool_flags: &[],
    });
    let err = digester.digest_line(root.path(), "a.txt").unwrap_err();
    assert!(matches!(
        &err,
        ManifestError::HashTool { path, .. } if path.as_str() == "a.txt"
    ));
}
