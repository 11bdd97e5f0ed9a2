//! The `lookup` binary.

use std::process::Command;

use crate::fixtures::write_sources;

fn lookup() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_lookup"));
    command.env("LOOKUP_LOG", "error");
    command
}

#[test]
fn test_generate_then_list() {
    let krate = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_sources(krate.path());

    let status = lookup()
        .arg("generate")
        .arg("--crate-dir")
        .arg(krate.path())
        .arg("--out")
        .arg(out.path())
        .arg("--embed")
        .status()
        .unwrap();
    assert!(status.success());
    assert!(out.path().join("lookup_descriptors.rs").is_file());

    let output = lookup()
        .args(["list", "e2e::Service", "--json", "--search-path"])
        .arg(out.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let listing: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listing["capability"], "e2e.Service");
    assert_eq!(listing["implementations"][0]["implementation"], "e2e.Provider1");
    assert_eq!(listing["implementations"][1]["preference"], "Preferred");
}

#[test]
fn test_rejected_declaration_fails_generate() {
    let krate = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(krate.path().join("src")).unwrap();
    std::fs::write(
        krate.path().join("src/lib.rs"),
        "pub trait Service {}\n#[service_provider(Service)]\npub struct Liar;\n",
    )
    .unwrap();

    let output = lookup()
        .args(["generate", "--crate-name", "bad", "--json", "--crate-dir"])
        .arg(krate.path())
        .arg("--out")
        .arg(out.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["diagnostics"][0]["severity"], "error");
}
