use std::process::Command;

fn combined_output(output: &std::process::Output) -> String {
    let mut combined = String::new();
    combined.push_str(&String::from_utf8_lossy(&output.stdout));
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    combined
}

fn pulsescope_bin() -> &'static str {
    option_env!("CARGO_BIN_EXE_pulsescope").expect("pulsescope test binary not built")
}

#[test]
fn help_mentions_name_and_flags() {
    let output = Command::new(pulsescope_bin())
        .arg("--help")
        .output()
        .expect("run pulsescope --help");
    assert!(output.status.success());
    let combined = combined_output(&output);
    assert!(combined.contains("pulsescope"));
    assert!(combined.contains("--duration"));
    assert!(combined.contains("--fs"));
    assert!(combined.contains("--interval"));
    assert!(combined.contains("--device"));
}

#[test]
fn list_devices_prints_inventory_or_detection_failure() {
    let output = Command::new(pulsescope_bin())
        .arg("--list-devices")
        .output()
        .expect("run pulsescope --list-devices");
    let combined = combined_output(&output);
    // Hosts without audio hardware either report an empty inventory or fail
    // enumeration; both mention devices and neither enters the scope loop.
    assert!(
        combined.contains("audio input devices")
            || combined.contains("enumerate audio input devices"),
        "unexpected output: {combined}"
    );
}

#[test]
fn out_of_range_device_id_fails_before_any_capture() {
    let output = Command::new(pulsescope_bin())
        .args(["--device", "9999", "--duration", "0.1"])
        .output()
        .expect("run pulsescope with bad device id");
    assert!(!output.status.success());
    let combined = combined_output(&output);
    assert!(combined.contains("device"), "unexpected output: {combined}");
}

#[test]
fn zero_duration_is_rejected_at_startup() {
    let output = Command::new(pulsescope_bin())
        .args(["--duration", "0"])
        .output()
        .expect("run pulsescope with zero duration");
    assert!(!output.status.success());
    let combined = combined_output(&output);
    assert!(combined.contains("--duration"), "unexpected output: {combined}");
}
