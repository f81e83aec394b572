//! Exit behavior of the binary for invalid invocations.

use std::error::Error;
use std::net::TcpListener;
use std::process::{Command, Output};

use tempfile::TempDir;

type TestResult = Result<(), Box<dyn Error>>;

fn md_preview(args: &[&str]) -> Result<Output, Box<dyn Error>> {
    Ok(Command::new(env!("CARGO_BIN_EXE_md-preview"))
        .args(args)
        .arg("--color=never")
        .output()?)
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn missing_file_argument_exits_1() -> TestResult {
    let output = md_preview(&[])?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("missing markdown file argument"));
    Ok(())
}

#[test]
fn out_of_range_port_exits_1() -> TestResult {
    for port in ["0", "99999", "-1"] {
        let output = md_preview(&["--port", port, "notes.md"])?;
        assert_eq!(output.status.code(), Some(1), "port {port}");
        assert!(stderr(&output).contains("invalid port number"), "port {port}");
    }
    Ok(())
}

#[test]
fn invalid_address_exits_1() -> TestResult {
    let output = md_preview(&["--address", "999.1.1.1", "notes.md"])?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("invalid address: 999.1.1.1"));
    Ok(())
}

#[test]
fn missing_directory_exits_1() -> TestResult {
    let temp = TempDir::new()?;
    let file = temp.path().join("no-such-dir").join("notes.md");
    let output = md_preview(&[file.to_str().ok_or("non-utf8 temp path")?])?;
    assert_eq!(output.status.code(), Some(1));
    Ok(())
}

#[test]
fn port_in_use_exits_1() -> TestResult {
    let temp = TempDir::new()?;
    let file = temp.path().join("notes.md");
    std::fs::write(&file, "# Title")?;

    let taken = TcpListener::bind("127.0.0.1:0")?;
    let port = taken.local_addr()?.port().to_string();

    let output = md_preview(&["--port", &port, file.to_str().ok_or("non-utf8 temp path")?])?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("failed to bind"));
    Ok(())
}
