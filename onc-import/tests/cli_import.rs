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
fn import_reports_fixture_networks() {
    onc_import()
        .arg("import")
        .arg(fixture("toplevel.onc"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "import source=user import verdict=valid success=true",
        ))
        .stdout(predicate::str::contains(
            "result networks=4 certificates=3 dropped=0",
        ))
        .stdout(predicate::str::contains("- wifi-eap [WiFi] Corp WiFi"))
        .stdout(predicate::str::contains("- vpn-l2tp [VPN] Branch VPN"))
        .stdout(predicate::str::contains("issues\n- none"));
}

#[test]
fn import_json_has_resolved_pems() {
    let output = onc_import()
        .arg("import")
        .arg(fixture("toplevel.onc"))
        .args(["--format", "json"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(report["success"], json!(true));
    assert_eq!(report["verdict"], json!("valid"));
    let ca_pem = fs::read_to_string(fixture("test-ca.pem")).expect("pem");
    assert_eq!(
        report["network_configs"][0]["WiFi"]["EAP"]["ServerCAPEMs"],
        json!([ca_pem])
    );
    assert_eq!(
        report["network_configs"][0]["WiFi"]["HexSSID"],
        json!("54657374")
    );
    let ipsec = &report["network_configs"][3]["VPN"]["IPsec"];
    assert_eq!(ipsec["ServerCAPEMs"], json!([ca_pem]));
    assert!(ipsec.get("ServerCARef").is_none());
}

#[test]
fn unresolved_reference_degrades_and_strict_fails() {
    onc_import()
        .arg("import")
        .arg(fixture("toplevel_unresolved.onc"))
        .assert()
        .success()
        .stdout(predicate::str::contains("success=false"))
        .stdout(predicate::str::contains("dropped\n- wifi-eap"))
        .stdout(predicate::str::contains("unresolved_reference"));

    onc_import()
        .arg("import")
        .arg(fixture("toplevel_unresolved.onc"))
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("import degraded in strict mode"));
}

#[test]
fn encrypted_import_needs_the_passphrase() {
    onc_import()
        .arg("import")
        .arg(fixture("encrypted.onc"))
        .args(["--passphrase", "test0000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- enc-wifi [WiFi] Encrypted WiFi"));

    onc_import()
        .arg("import")
        .arg(fixture("encrypted.onc"))
        .args(["--passphrase", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unable to decrypt"));
}

#[test]
fn passphrase_file_drops_trailing_newline() {
    let dir = tempdir().expect("tempdir");
    let secret = dir.path().join("passphrase.txt");
    fs::write(&secret, "test0000\n").expect("write");

    onc_import()
        .arg("import")
        .arg(fixture("encrypted.onc"))
        .arg("--passphrase-file")
        .arg(&secret)
        .assert()
        .success()
        .stdout(predicate::str::contains("success=true"));
}

#[test]
fn type_filter_limits_reported_networks() {
    onc_import()
        .arg("import")
        .arg(fixture("toplevel.onc"))
        .args(["--type", "Wireless"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- wifi-eap [WiFi]"))
        .stdout(predicate::str::contains("vpn-openvpn").not())
        .stdout(predicate::str::contains("vpn-l2tp").not());

    onc_import()
        .arg("import")
        .arg(fixture("toplevel.onc"))
        .args(["--type", "Bluetooth"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized network type 'Bluetooth'"));
}

#[test]
fn output_document_is_substituted_and_masked() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("processed.onc");

    onc_import()
        .arg("import")
        .arg(fixture("toplevel.onc"))
        .args(["--login-id", "alice", "--email", "alice@example.com"])
        .arg("--mask-credentials")
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let processed = parse_file(&out).expect("processed document");
    assert_eq!(processed["Type"], json!("UnencryptedConfiguration"));
    let eap = &processed["NetworkConfigurations"][0]["WiFi"]["EAP"];
    assert_eq!(eap["Identity"], json!("alice@corp.example"));
    assert_eq!(eap["Password"], json!("********"));
    assert_eq!(
        processed["GlobalNetworkConfiguration"]["AllowOnlyPolicyNetworksToAutoconnect"],
        json!(true)
    );
}

#[test]
fn profile_file_sets_source_and_substitution() {
    let dir = tempdir().expect("tempdir");
    let profile = dir.path().join("policy.toml");
    fs::write(
        &profile,
        r#"
source = "device-policy"

[substitution]
login_id = "bob"
"#,
    )
    .expect("write profile");

    let output = onc_import()
        .arg("import")
        .arg(fixture("toplevel.onc"))
        .arg("--profile")
        .arg(&profile)
        .args(["--format", "json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(report["source"], json!("device-policy"));
    assert_eq!(
        report["network_configs"][0]["WiFi"]["EAP"]["Identity"],
        json!("bob@corp.example")
    );
}

#[test]
fn verbose_shows_profile_source() {
    onc_import()
        .arg("import")
        .arg(fixture("toplevel.onc"))
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains("Using profile: embedded"));
}

#[test]
fn refuses_to_overwrite_input() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("doc.onc");
    fs::copy(fixture("toplevel.onc"), &input).expect("copy");

    onc_import()
        .arg("import")
        .arg(&input)
        .arg("--output")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to overwrite input document"));
}

#[test]
fn malformed_document_fails() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("broken.onc");
    fs::write(&input, "{\"Type\": ").expect("write");

    onc_import()
        .arg("import")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed ONC document"));
}
