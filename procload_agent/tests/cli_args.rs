//! CLI tests for procload_agent (binary)
use std::process::Command;

#[test]
fn test_help_mentions_flags() {
    let output = Command::new(env!("CARGO_BIN_EXE_procload_agent"))
        .arg("--help")
        .output()
        .expect("run procload_agent --help");
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(
        text.contains("Usage:") && text.contains("--port") && text.contains("-p") && text.contains("--location"),
        "help text missing expected flags\n{text}"
    );
}

#[test]
fn test_invalid_argument_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_procload_agent"))
        .args(["--port", "not-a-port"])
        .output()
        .expect("run procload_agent");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid port"));
}

#[test]
fn test_port_short_long_accepted() {
    // The process starts and keeps running; kill it after a moment.
    let exe = env!("CARGO_BIN_EXE_procload_agent");
    for args in [["--port", "0"], ["-p", "0"]] {
        let mut child = Command::new(exe)
            .args(args)
            .args(["--bind", "127.0.0.1"])
            .spawn()
            .expect("spawn agent");
        std::thread::sleep(std::time::Duration::from_millis(150));
        assert!(child.try_wait().expect("poll agent").is_none(), "agent exited early with {args:?}");
        let _ = child.kill();
        let _ = child.wait();
    }
}
