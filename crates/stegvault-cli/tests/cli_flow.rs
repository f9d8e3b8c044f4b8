use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

use stegvault_core::stego::save_stego;
use stegvault_core::PixelBuffer;

const PASSPHRASE: &str = "Correct-Horse-Battery-42";

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_stegvault"))
}

struct Workspace {
    dir: PathBuf,
}

impl Workspace {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("{}_{}_{}", prefix, std::process::id(), nanos));
        std::fs::create_dir_all(&dir).expect("create workspace");
        std::fs::write(
            dir.join("config.toml"),
            "[crypto]\nargon2_time_cost = 1\nargon2_memory_cost = 64\nargon2_parallelism = 1\n",
        )
        .expect("write config");
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn write_cover(&self, name: &str, width: u32, height: u32) -> PathBuf {
        let data = (0..width as usize * height as usize * 3)
            .map(|i| (i * 53 % 256) as u8)
            .collect();
        let cover = PixelBuffer::rgb(width, height, data).expect("valid layout");
        let path = self.path(name);
        save_stego(&cover, &path).expect("write cover");
        path
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(bin());
        cmd.arg("--config")
            .arg(self.path("config.toml"))
            .env_remove("STEGVAULT_PASSPHRASE")
            .env_remove("STEGVAULT_CONFIG")
            .env_remove("RUST_LOG")
            .env("XDG_CONFIG_HOME", &self.dir)
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

fn assert_success(output: &Output, what: &str) {
    assert!(
        output.status.success(),
        "{} failed: stdout={}, stderr={}",
        what,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn backup_json(ws: &Workspace, cover: &Path, output: &Path, secret: &Path) -> serde_json::Value {
    let out = ws
        .command()
        .arg("--json")
        .arg("backup")
        .arg("-i")
        .arg(cover)
        .arg("-o")
        .arg(output)
        .arg("--secret-file")
        .arg(secret)
        .env("STEGVAULT_PASSPHRASE", PASSPHRASE)
        .output()
        .expect("run backup");
    assert_success(&out, "backup");
    serde_json::from_slice(&out.stdout).expect("parse backup json")
}

#[test]
fn test_cli_backup_restore_round_trip() {
    let ws = Workspace::new("stegvault_cli_flow");
    let cover = ws.write_cover("cover.png", 100, 100);
    let secret = ws.path("secret.txt");
    std::fs::write(&secret, "abandon ability able about above absent").expect("write secret");
    let stego = ws.path("stego.png");

    let value = backup_json(&ws, &cover, &stego, &secret);
    assert_eq!(value["status"], "success");
    let payload_length = value["data"]["payload_length"].as_u64().expect("payload length");
    assert_eq!(payload_length, 39 + 60);
    assert_eq!(value["data"]["capacity"]["capacity_bytes"], 3750);
    assert!(stego.exists());

    let restore = ws
        .command()
        .arg("restore")
        .arg("-i")
        .arg(&stego)
        .arg("--payload-length")
        .arg(payload_length.to_string())
        .env("STEGVAULT_PASSPHRASE", PASSPHRASE)
        .output()
        .expect("run restore");
    assert_success(&restore, "restore");
    assert_eq!(restore.stdout, b"abandon ability able about above absent");
}

#[test]
fn test_cli_secret_from_stdin_and_passphrase_file() {
    let ws = Workspace::new("stegvault_cli_stdin");
    let cover = ws.write_cover("cover.png", 64, 64);
    let stego = ws.path("stego.png");
    let pass_file = ws.path("pass.txt");
    std::fs::write(&pass_file, format!("{}\n", PASSPHRASE)).expect("write passphrase");

    let mut child = ws
        .command()
        .arg("-q")
        .arg("backup")
        .arg("-i")
        .arg(&cover)
        .arg("-o")
        .arg(&stego)
        .arg("--passphrase-file")
        .arg(&pass_file)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn backup");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"piped secret")
        .expect("write stdin");
    let out = child.wait_with_output().expect("wait backup");
    assert_success(&out, "backup");
    let payload_length = String::from_utf8_lossy(&out.stdout).trim().to_string();
    assert_eq!(payload_length, "72");

    let restored_path = ws.path("restored.bin");
    let restore = ws
        .command()
        .arg("restore")
        .arg("-i")
        .arg(&stego)
        .arg("--payload-length")
        .arg(&payload_length)
        .arg("--passphrase")
        .arg(PASSPHRASE)
        .arg("--output")
        .arg(&restored_path)
        .output()
        .expect("run restore");
    assert_success(&restore, "restore");
    assert_eq!(std::fs::read(&restored_path).expect("read restored"), b"piped secret");
}

#[test]
fn test_cli_wrong_passphrase_exit_code() {
    let ws = Workspace::new("stegvault_cli_wrong");
    let cover = ws.write_cover("cover.png", 50, 50);
    let secret = ws.path("secret.txt");
    std::fs::write(&secret, "top secret").expect("write secret");
    let stego = ws.path("stego.png");
    let value = backup_json(&ws, &cover, &stego, &secret);
    let payload_length = value["data"]["payload_length"].as_u64().expect("payload length");

    let restore = ws
        .command()
        .arg("--json")
        .arg("restore")
        .arg("-i")
        .arg(&stego)
        .arg("--payload-length")
        .arg(payload_length.to_string())
        .arg("--passphrase")
        .arg("Wrong-Passphrase-99")
        .output()
        .expect("run restore");
    assert_eq!(restore.status.code(), Some(5));
    let value: serde_json::Value = serde_json::from_slice(&restore.stdout).expect("error json");
    assert_eq!(value["status"], "error");
    assert_eq!(value["error_type"], "decryption_failed");
    assert!(value["message"]
        .as_str()
        .expect("message")
        .contains("Decryption failed"));
}

#[test]
fn test_cli_capacity_exceeded_exit_code() {
    let ws = Workspace::new("stegvault_cli_capacity");
    let cover = ws.write_cover("tiny.png", 10, 10);
    let secret = ws.path("secret.txt");
    std::fs::write(&secret, "this secret is far too long for a ten by ten image")
        .expect("write secret");
    let stego = ws.path("stego.png");

    let out = ws
        .command()
        .arg("backup")
        .arg("-i")
        .arg(&cover)
        .arg("-o")
        .arg(&stego)
        .arg("--secret-file")
        .arg(&secret)
        .arg("--passphrase")
        .arg(PASSPHRASE)
        .output()
        .expect("run backup");
    assert_eq!(out.status.code(), Some(6));
    assert!(String::from_utf8_lossy(&out.stderr).contains("exceeds image capacity"));
    assert!(!stego.exists());
}

#[test]
fn test_cli_check_reports_capacity() {
    let ws = Workspace::new("stegvault_cli_check");
    let cover = ws.write_cover("cover.png", 100, 100);

    let out = ws
        .command()
        .arg("--json")
        .arg("check")
        .arg("-i")
        .arg(&cover)
        .output()
        .expect("run check");
    assert_success(&out, "check");
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("check json");
    assert_eq!(value["data"]["width"], 100);
    assert_eq!(value["data"]["height"], 100);
    assert_eq!(value["data"]["channels"], 3);
    assert_eq!(value["data"]["capacity_bytes"], 3750);
    assert_eq!(value["data"]["max_secret_bytes"], 3690);
    assert!(value["data"]["warnings"].as_array().expect("warnings").is_empty());

    let limited = ws.write_cover("limited.png", 20, 20);
    let out = ws
        .command()
        .arg("check")
        .arg("-i")
        .arg(&limited)
        .output()
        .expect("run check");
    assert_success(&out, "check");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("max_secret=90 bytes"));
    assert!(stdout.contains("Limited capacity"));

    let tiny = ws.write_cover("tiny.png", 10, 10);
    let out = ws
        .command()
        .arg("check")
        .arg("-i")
        .arg(&tiny)
        .output()
        .expect("run check");
    assert_success(&out, "check");
    assert!(String::from_utf8_lossy(&out.stdout).contains("max_secret=0 bytes"));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Very small capacity"));
}

#[test]
fn test_cli_relative_input_uses_default_image_dir() {
    let ws = Workspace::new("stegvault_image_dir");
    ws.write_cover("relative.png", 100, 100);
    std::fs::write(
        ws.path("config.toml"),
        format!(
            "[crypto]\nargon2_time_cost = 1\nargon2_memory_cost = 64\nargon2_parallelism = 1\n\n[cli]\ndefault_image_dir = '{}'\n",
            ws.dir.display()
        ),
    )
    .expect("write config");

    let out = ws
        .command()
        .arg("-q")
        .arg("check")
        .arg("-i")
        .arg("relative.png")
        .output()
        .expect("run check");
    assert_success(&out, "check");
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "3690");
}

#[test]
fn test_cli_missing_input_and_passphrase_sources() {
    let ws = Workspace::new("stegvault_cli_missing");

    let out = ws
        .command()
        .arg("check")
        .arg("-i")
        .arg(ws.path("missing.png"))
        .output()
        .expect("run check");
    assert_eq!(out.status.code(), Some(3));

    let cover = ws.write_cover("cover.png", 50, 50);
    let secret = ws.path("secret.txt");
    std::fs::write(&secret, "secret").expect("write secret");
    let out = ws
        .command()
        .arg("backup")
        .arg("-i")
        .arg(&cover)
        .arg("-o")
        .arg(ws.path("stego.png"))
        .arg("--secret-file")
        .arg(&secret)
        .output()
        .expect("run backup");
    assert_eq!(out.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&out.stderr).contains("No passphrase provided"));
}

#[test]
fn test_cli_completions() {
    let out = Command::new(bin())
        .arg("completions")
        .arg("bash")
        .output()
        .expect("run completions");
    assert_success(&out, "completions");
    assert!(String::from_utf8_lossy(&out.stdout).contains("stegvault"));
}
