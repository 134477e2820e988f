use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use onc_value::{json, parse_file};
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("fixtures")
        .join(path)
}

fn onc_import() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("onc-import"));
    cmd.env("NO_COLOR", "1").env_remove("ONC_LOG");
    cmd
}

#[test]
fn encrypt_then_import() {
    let dir = tempdir().expect("tempdir");
    let envelope = dir.path().join("wrapped.onc");

    onc_import()
        .arg("encrypt")
        .arg(fixture("toplevel.onc"))
        .args(["--passphrase", "correct horse", "--iterations", "1000"])
        .arg("-o")
        .arg(&envelope)
        .assert()
        .success();

    let wrapped = parse_file(&envelope).expect("envelope");
    assert_eq!(wrapped["Type"], json!("EncryptedConfiguration"));
    assert_eq!(wrapped["Iterations"], json!(1000));

    onc_import()
        .arg("import")
        .arg(&envelope)
        .args(["--passphrase", "correct horse"])
        .assert()
        .success()
        .stdout(predicate::str::contains("result networks=4 certificates=3"));
}

#[test]
fn encrypt_rejects_excessive_iterations() {
    let dir = tempdir().expect("tempdir");
    onc_import()
        .arg("encrypt")
        .arg(fixture("toplevel.onc"))
        .args(["--passphrase", "x", "--iterations", "500001"])
        .arg("-o")
        .arg(dir.path().join("out.onc"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid iteration count"));
}

#[test]
fn mask_replaces_credentials_only() {
    let output = onc_import()
        .arg("mask")
        .arg(fixture("toplevel.onc"))
        .output()
        .expect("run");
    assert!(output.status.success());

    let masked: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let networks = &masked["NetworkConfigurations"];
    assert_eq!(networks[0]["WiFi"]["EAP"]["Password"], json!("********"));
    assert_eq!(
        networks[0]["WiFi"]["EAP"]["Identity"],
        json!("${LOGIN_ID}@corp.example")
    );
    assert_eq!(networks[1]["VPN"]["OpenVPN"]["Password"], json!("********"));
    assert_eq!(networks[3]["VPN"]["IPsec"]["PSK"], json!("********"));
    assert_eq!(networks[3]["VPN"]["L2TP"]["Username"], json!("branch-user"));
    assert_eq!(masked["Certificates"][2]["PKCS12"], json!("********"));
    assert_eq!(masked["Certificates"][0]["GUID"], json!("cert-1"));
}

#[test]
fn mask_writes_custom_mask_to_file() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("masked.onc");
    onc_import()
        .arg("mask")
        .arg(fixture("toplevel.onc"))
        .args(["--mask", "<hidden>"])
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let masked = parse_file(&out).expect("masked");
    assert_eq!(
        masked["NetworkConfigurations"][1]["VPN"]["OpenVPN"]["Password"],
        json!("<hidden>")
    );
}

#[test]
fn proxy_round_trip_through_generic_form() {
    let dir = tempdir().expect("tempdir");
    let onc = dir.path().join("proxy.json");
    fs::write(
        &onc,
        r#"{
            "Type": "Manual",
            "Manual": {
                "HTTPProxy": {"Host": "proxy.example", "Port": 8080},
                "SOCKS": {"Host": "socks.example", "Port": 1080}
            },
            "ExcludeDomains": ["*.corp.example", "<local>"]
        }"#,
    )
    .expect("write");

    let output = onc_import()
        .arg("proxy-to-generic")
        .arg(&onc)
        .output()
        .expect("run");
    assert!(output.status.success());
    let generic: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(generic["mode"], json!("fixed_servers"));
    assert_eq!(generic["bypass_list"], json!("*.corp.example;<local>"));

    let generic_path = dir.path().join("generic.json");
    fs::write(&generic_path, &output.stdout).expect("write");
    let back = onc_import()
        .arg("proxy-from-generic")
        .arg(&generic_path)
        .output()
        .expect("run");
    assert!(back.status.success());
    let settings: serde_json::Value = serde_json::from_slice(&back.stdout).expect("json");
    assert_eq!(settings["Type"], json!("Manual"));
    assert_eq!(
        settings["Manual"]["HTTPProxy"],
        json!({"Host": "proxy.example", "Port": 8080})
    );
    assert_eq!(
        settings["Manual"]["SOCKS"],
        json!({"Host": "socks.example", "Port": 1080})
    );
    assert_eq!(
        settings["ExcludeDomains"],
        json!(["*.corp.example", "<local>"])
    );
}

#[test]
fn proxy_to_generic_rejects_unknown_type() {
    let dir = tempdir().expect("tempdir");
    let onc = dir.path().join("proxy.json");
    fs::write(&onc, r#"{"Type": "Carrier-Pigeon"}"#)
        .expect("write");

    onc_import()
        .arg("proxy-to-generic")
        .arg(&onc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to convert ONC proxy settings"));
}
