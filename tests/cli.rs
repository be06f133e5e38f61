use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const FASTG: &str = "\
>EDGE_1_length_8_cov_3.0:EDGE_2_length_8_cov_2.0;
ACGTACGT
>EDGE_2_length_8_cov_2.0;
GTACGTAC
";

// node 1 ends at 108 on the subject; with an overlap of 3, node 2's
// hit starts two bases earlier
const HITS: &str = "\
# BLASTN 2.12.0+
EDGE_1_length_8_cov_3.0\tchr1\t100.000\t8\t0\t0\t1\t8\t101\t108\t1e-3\t16.4
EDGE_2_length_8_cov_2.0\tchr1\t100.000\t8\t0\t0\t1\t8\t106\t113\t1e-3\t16.4
";

#[test]
fn command_chains_hits() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let fastg = temp.path().join("graph.fastg");
    let hits = temp.path().join("hits.tsv");
    let output = temp.path().join("out.tsv");
    fs::write(&fastg, FASTG)?;
    fs::write(&hits, HITS)?;

    let mut cmd = Command::cargo_bin("fastg-chain")?;
    cmd.arg("-l")
        .arg("3")
        .arg(&fastg)
        .arg(&hits)
        .arg(&output);
    cmd.assert().success();

    let out = fs::read_to_string(&output)?;
    let lines: Vec<_> = HITS.lines().skip(1).collect();
    assert_eq!(
        out,
        format!("{}\t{}\n{}\n", lines[0], lines[1], lines[1])
    );

    Ok(())
}

#[test]
fn command_window_slack() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let fastg = temp.path().join("graph.fastg");
    let hits = temp.path().join("hits.tsv");
    let output = temp.path().join("out.tsv");
    fs::write(&fastg, FASTG)?;
    fs::write(&hits, HITS)?;

    // stop = 108 - 2 + 0 = 106, so the hit at 106 falls outside
    let mut cmd = Command::cargo_bin("fastg-chain")?;
    cmd.arg("-l")
        .arg("3")
        .arg("--window-slack")
        .arg("0")
        .arg(&fastg)
        .arg(&hits)
        .arg(&output);
    cmd.assert().success();

    let out = fs::read_to_string(&output)?;
    assert_eq!(out.lines().count(), 2);
    assert!(out.lines().all(|l| l.split('\t').count() == 12));

    Ok(())
}

#[test]
fn command_requires_overlap() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("fastg-chain")?;
    cmd.arg("graph.fastg").arg("hits.tsv").arg("out.tsv");
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--overlap"));

    Ok(())
}

#[test]
fn command_rejects_zero_overlap() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("fastg-chain")?;
    cmd.arg("-l").arg("0").arg("a").arg("b").arg("c");
    cmd.assert().failure().code(2);

    Ok(())
}

#[test]
fn command_reports_bad_hits() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let fastg = temp.path().join("graph.fastg");
    let hits = temp.path().join("hits.tsv");
    let output = temp.path().join("out.tsv");
    fs::write(&fastg, FASTG)?;
    fs::write(&hits, "EDGE_1_length_8_cov_3.0\tchr1\t100.000\n")?;

    let mut cmd = Command::cargo_bin("fastg-chain")?;
    cmd.arg("-l").arg("3").arg(&fastg).arg(&hits).arg(&output);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read hits"));

    Ok(())
}

#[test]
fn command_rejects_blank_hit_line() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let fastg = temp.path().join("graph.fastg");
    let hits = temp.path().join("hits.tsv");
    let output = temp.path().join("out.tsv");
    fs::write(&fastg, FASTG)?;
    fs::write(&hits, HITS.replacen("\nEDGE_2", "\n\nEDGE_2", 1))?;

    let mut cmd = Command::cargo_bin("fastg-chain")?;
    cmd.arg("-l").arg("3").arg(&fastg).arg(&hits).arg(&output);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read hits"))
        .stderr(predicate::str::contains("line 3"));

    Ok(())
}

#[test]
fn command_reports_unknown_node() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let fastg = temp.path().join("graph.fastg");
    let hits = temp.path().join("hits.tsv");
    let output = temp.path().join("out.tsv");
    fs::write(&fastg, FASTG)?;
    fs::write(
        &hits,
        "EDGE_9_length_8_cov_3.0\tchr1\t100.000\t8\t0\t0\t1\t8\t101\t108\t1e-3\t16.4\n",
    )?;

    let mut cmd = Command::cargo_bin("fastg-chain")?;
    cmd.arg("-l").arg("3").arg(&fastg).arg(&hits).arg(&output);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to chain hits"));

    Ok(())
}

#[test]
fn command_help() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("fastg-chain")?;
    cmd.arg("-h");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("FASTG"));

    Ok(())
}
