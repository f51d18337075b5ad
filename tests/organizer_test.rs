use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

fn vpnport(dir: &assert_fs::TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("vpnport");
    cmd.env_remove("VPNPORT_DIR")
        .env_remove("VPNPORT_PASSPHRASE")
        .env_remove("RUST_LOG")
        .current_dir(dir.path());
    cmd
}

fn setup() -> assert_fs::TempDir {
    let dir = assert_fs::TempDir::new().unwrap();
    vpnport(&dir).arg("init").assert().success();
    dir
}

fn import_host(dir: &assert_fs::TempDir, name: &str, host: &str) {
    let file = format!("{name}.ovpn");
    dir.child(&file)
        .write_str(&format!(
            "client\nremote {host} 443 tcp\n<ca>\n-----BEGIN CERTIFICATE-----\nMIIBtest\n-----END CERTIFICATE-----\n</ca>\n"
        ))
        .unwrap();
    vpnport(dir).args(["import", &file]).assert().success();
}

#[test]
fn list_without_init_fails() {
    let dir = assert_fs::TempDir::new().unwrap();
    vpnport(&dir)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn list_empty() {
    let dir = setup();
    vpnport(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Providers"))
        .stdout(predicate::str::contains("Hosts"))
        .stdout(predicate::str::contains("(none)"));
}

#[test]
fn hosts_are_listed_case_insensitively() {
    let dir = setup();
    import_host(&dir, "zulu", "z.example.com");
    import_host(&dir, "Alpha", "a.example.com");
    import_host(&dir, "bravo", "b.example.com");

    let output = vpnport(&dir).arg("list").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let alpha = stdout.find("Alpha").unwrap();
    let bravo = stdout.find("bravo").unwrap();
    let zulu = stdout.find("zulu").unwrap();
    assert!(alpha < bravo && bravo < zulu, "unexpected order:\n{stdout}");
    assert!(stdout.contains("a.example.com:443/tcp"));
}

#[test]
fn add_provider_without_name_lists_available() {
    let dir = setup();
    vpnport(&dir)
        .arg("add-provider")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mullvad"))
        .stdout(predicate::str::contains("Windscribe"));
}

#[test]
fn add_provider_canonicalizes_name() {
    let dir = setup();
    vpnport(&dir)
        .args(["add-provider", "mullvad"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added provider profile 'Mullvad'"));

    dir.child(".vpnport/profiles/providers/Mullvad.json")
        .assert(predicate::path::exists());

    vpnport(&dir)
        .args(["add-provider", "Mullvad"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn add_unknown_provider_fails() {
    let dir = setup();
    vpnport(&dir)
        .args(["add-provider", "AcmeVPN"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown provider 'AcmeVPN'"))
        .stderr(predicate::str::contains("NordVPN"));
}

#[test]
fn providers_can_be_exhausted() {
    let dir = setup();
    for name in [
        "Mullvad",
        "NordVPN",
        "PIA",
        "ProtonVPN",
        "TunnelBear",
        "VyprVPN",
        "Windscribe",
    ] {
        vpnport(&dir).args(["add-provider", name]).assert().success();
    }

    vpnport(&dir)
        .arg("add-provider")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already been added"));
}

#[test]
fn activate_shows_in_status() {
    let dir = setup();
    import_host(&dir, "office", "vpn.example.com");

    vpnport(&dir)
        .args(["activate", "host", "office"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Activated host/office"));

    vpnport(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("connected"))
        .stdout(predicate::str::contains("host/office"));
}

#[test]
fn activate_missing_profile_fails() {
    let dir = setup();
    vpnport(&dir)
        .args(["activate", "host", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn activate_rejects_unknown_context() {
    let dir = setup();
    vpnport(&dir)
        .args(["activate", "router", "office"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown profile context"));
}

#[test]
fn removing_active_profile_disconnects() {
    let dir = setup();
    import_host(&dir, "office", "vpn.example.com");
    import_host(&dir, "home", "home.example.com");
    vpnport(&dir)
        .args(["activate", "host", "office"])
        .assert()
        .success();

    vpnport(&dir)
        .args(["remove", "host", "office"])
        .assert()
        .success()
        .stdout(predicate::str::contains("VPN disconnected"));

    vpnport(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("disconnected"))
        .stdout(predicate::str::contains("Profile: (none)"));
}

#[test]
fn removing_inactive_profile_keeps_connection() {
    let dir = setup();
    import_host(&dir, "office", "vpn.example.com");
    import_host(&dir, "home", "home.example.com");
    vpnport(&dir)
        .args(["activate", "host", "office"])
        .assert()
        .success();

    vpnport(&dir)
        .args(["remove", "host", "home"])
        .assert()
        .success()
        .stdout(predicate::str::contains("VPN disconnected").not());

    vpnport(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("State:   connected"));
}

#[test]
fn removing_last_profile_disconnects() {
    let dir = setup();
    vpnport(&dir).args(["add-provider", "PIA"]).assert().success();

    vpnport(&dir)
        .args(["remove", "provider", "PIA"])
        .assert()
        .success()
        .stdout(predicate::str::contains("VPN disconnected"));
}

#[test]
fn uninstall_requires_confirmation() {
    let dir = setup();
    import_host(&dir, "office", "vpn.example.com");
    vpnport(&dir)
        .args(["activate", "host", "office"])
        .assert()
        .success();

    vpnport(&dir)
        .arg("uninstall")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Uninstall cancelled"));

    vpnport(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("State:   connected"));

    vpnport(&dir)
        .args(["uninstall", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("VPN configuration erased"));

    vpnport(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("not installed"));

    dir.child(".vpnport/profiles/hosts/office.json")
        .assert(predicate::path::exists());
}
