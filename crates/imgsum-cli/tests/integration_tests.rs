//! End-to-end tests driving the `imgsum` binary.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const SHA256_ABC: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
const SHA256_EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
const MD5_EMPTY: &str = "d41d8cd98f00b204e9800998ecf8427e";

/// Test context with a scratch directory of image files
struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        std::fs::write(temp_dir.path().join("A"), b"abc").expect("failed to write A");
        std::fs::write(temp_dir.path().join("B"), b"").expect("failed to write B");
        Self { temp_dir }
    }

    fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    fn imgsum_cmd(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_imgsum"));
        cmd.current_dir(self.dir());
        cmd.env_remove("IMGSUM_CHUNK_SIZE");
        cmd.env_remove("IMGSUM_BASE_DIR");
        cmd.env_remove("RUST_LOG");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.imgsum_cmd()
            .args(args)
            .output()
            .expect("failed to run imgsum")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_help_command() {
    let ctx = TestContext::new();
    let output = ctx.run(&["--help"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage:"));
}

#[test]
fn test_print_mode_lists_images_in_order() {
    let ctx = TestContext::new();
    let output = ctx.run(&["sha256sum", "A", "B"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        format!("{SHA256_ABC}  A\n{SHA256_EMPTY}  B\n")
    );
}

#[test]
fn test_print_mode_skips_missing_images() {
    let ctx = TestContext::new();
    let output = ctx.run(&["md5sum", "missing", "B"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), format!("{MD5_EMPTY}  B\n"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing"));
}

#[test]
fn test_verify_match_succeeds_silently() {
    let ctx = TestContext::new();
    let output = ctx.run(&["sha256sum", "--sum", SHA256_ABC, "A", "B"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_verify_mismatch_exits_with_failure() {
    let ctx = TestContext::new();
    let output = ctx.run(&["sha256sum", "-s", SHA256_EMPTY, "A"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_verify_with_no_acquirable_image_fails() {
    let ctx = TestContext::new();
    let output = ctx.run(&["sha256sum", "-s", SHA256_ABC, "nope", "nada"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_malformed_sum_is_a_mismatch() {
    let ctx = TestContext::new();
    let output = ctx.run(&["md5sum", "-s", "not-hex", "A"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_uppercase_sum_is_a_mismatch() {
    let ctx = TestContext::new();
    let upper = MD5_EMPTY.to_ascii_uppercase();
    let output = ctx.run(&["md5sum", "-s", &upper, "B"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_short_sum_is_a_mismatch() {
    let ctx = TestContext::new();
    let output = ctx.run(&["md5sum", "-s", "d41d", "B"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_mismatch_lists_skipped_images() {
    let ctx = TestContext::new();
    let output = ctx.run(&["md5sum", "-s", "d41d", "missing", "B"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing"));
    assert!(stderr.contains("mismatch"));
}

#[test]
fn test_invalid_chunk_size_env_falls_back_to_default() {
    let ctx = TestContext::new();
    let output = ctx
        .imgsum_cmd()
        .env("IMGSUM_CHUNK_SIZE", "0")
        .args(["md5sum", "B"])
        .output()
        .expect("failed to run imgsum");
    assert!(output.status.success());
    assert_eq!(stdout(&output), format!("{MD5_EMPTY}  B\n"));
}

#[test]
fn test_generic_digest_and_chunk_size_agree() {
    let ctx = TestContext::new();
    let data: Vec<u8> = (0..100_000u32).map(|i| (i % 253) as u8).collect();
    std::fs::write(ctx.dir().join("big.img"), &data).unwrap();

    let small = ctx.run(&["--chunk-size", "7", "digest", "-a", "sha1", "big.img"]);
    let large = ctx.run(&["--chunk-size", "65536", "sha1sum", "big.img"]);
    assert!(small.status.success());
    assert_eq!(stdout(&small), stdout(&large));
}

#[test]
fn test_base_dir_resolves_relative_images() {
    let ctx = TestContext::new();
    let output = Command::new(env!("CARGO_BIN_EXE_imgsum"))
        .env_remove("IMGSUM_CHUNK_SIZE")
        .env("IMGSUM_BASE_DIR", ctx.dir())
        .args(["sha256sum", "A"])
        .output()
        .expect("failed to run imgsum");
    assert!(output.status.success());
    assert_eq!(stdout(&output), format!("{SHA256_ABC}  A\n"));
}

#[cfg(unix)]
#[test]
fn test_multicall_name_selects_algorithm() {
    let ctx = TestContext::new();
    let link = ctx.dir().join("sha256sum");
    std::os::unix::fs::symlink(env!("CARGO_BIN_EXE_imgsum"), &link).unwrap();

    let output = Command::new(&link)
        .current_dir(ctx.dir())
        .arg("A")
        .output()
        .expect("failed to run sha256sum link");
    assert!(output.status.success());
    assert_eq!(stdout(&output), format!("{SHA256_ABC}  A\n"));
}

#[test]
fn test_completions_command() {
    let ctx = TestContext::new();
    let output = ctx.run(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("imgsum"));
}
