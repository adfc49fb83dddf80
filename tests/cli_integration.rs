use assert_cmd::Command;
use tempfile::TempDir;

// Drive the compiled binary end to end. HOME is pointed at a fresh tempdir
// so user-level model/lexicon files cannot leak into the assertions.
fn sayable(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sayable").unwrap();
    cmd.env("HOME", home.path());
    cmd
}

#[test]
fn assesses_a_single_word() {
    let home = TempDir::new().unwrap();

    let output = sayable(&home).arg("hello").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("'hello'"), "unexpected output: {stdout}");
    assert!(stdout.contains("score:"), "unexpected output: {stdout}");
    assert!(
        ["very easy", "easy", "moderate", "hard", "very hard"]
            .iter()
            .any(|category| stdout.contains(category)),
        "no category in output: {stdout}"
    );
}

#[test]
fn json_word_output_has_score_and_category() {
    let home = TempDir::new().unwrap();

    let output = sayable(&home).args(["-j", "hello"]).output().unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid json");
    assert!(parsed["score"].is_f64());
    assert!(parsed["category"].is_string());
    let score = parsed["score"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&score));
}

#[test]
fn json_output_for_several_words_is_an_array() {
    let home = TempDir::new().unwrap();

    let output = sayable(&home).args(["-j", "cat", "dog"]).output().unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let items = parsed.as_array().expect("expected a json array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["word"], "cat");
    assert_eq!(items[1]["word"], "dog");
}

#[test]
fn detailed_json_contains_all_feature_names() {
    let home = TempDir::new().unwrap();

    let output = sayable(&home)
        .args(["-j", "-d", "complicated"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let features = parsed["features"]
        .as_object()
        .expect("detailed output should carry a features object");
    for name in [
        "syllables",
        "consonant_cluster",
        "vowel_ratio",
        "consonant_complexity",
        "diphthongs",
        "stress",
        "length",
        "unusual_sounds",
    ] {
        assert!(features.contains_key(name), "missing feature {name}");
    }
}

#[test]
fn text_mode_reports_average_and_per_word_lines() {
    let home = TempDir::new().unwrap();

    let output = sayable(&home)
        .args(["-t", "The cat sat on the mat."])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Average score:"));
    assert!(stdout.contains("Overall category:"));
    assert!(stdout.contains("Word count: 6"));
    assert!(stdout.contains("'mat'"));
}

#[test]
fn empty_text_is_a_zero_word_result() {
    let home = TempDir::new().unwrap();

    let output = sayable(&home).args(["-j", "-t", ""]).output().unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["word_count"], 0);
    assert!(parsed["average_score"].is_null());
    assert!(parsed["overall_category"].is_null());
}

#[test]
fn words_and_text_flag_conflict() {
    let home = TempDir::new().unwrap();

    let output = sayable(&home)
        .args(["hello", "-t", "some text"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("error:"), "unexpected stderr: {stderr}");
}

#[test]
fn reads_words_from_stdin_when_no_args_given() {
    let home = TempDir::new().unwrap();

    let output = sayable(&home)
        .write_stdin("cat dog\n")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("'cat'"));
    assert!(stdout.contains("'dog'"));
}

#[test]
fn missing_model_artifact_fails_with_exit_one() {
    let home = TempDir::new().unwrap();

    let output = sayable(&home)
        .args(["-m", "/nonexistent/model.json", "hello"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(
        stderr.contains("model artifact"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn corrupt_model_artifact_fails_with_exit_one() {
    let home = TempDir::new().unwrap();
    let model_path = home.path().join("broken.json");
    std::fs::write(&model_path, "{definitely not json").unwrap();

    let output = sayable(&home)
        .args(["-m", model_path.to_str().unwrap(), "hello"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn retrain_stores_an_artifact_in_the_data_dir() {
    let home = TempDir::new().unwrap();

    let output = sayable(&home).args(["-r", "cat"]).output().unwrap();

    assert!(output.status.success());
    let stored = home
        .path()
        .join(".local")
        .join("share")
        .join("sayable")
        .join("model.json");
    assert!(stored.exists(), "retrain should persist a model artifact");

    // The stored artifact must be loadable on a later run.
    let output = sayable(&home).arg("hello").output().unwrap();
    assert!(output.status.success());
}
