use assert_cmd::Command;

#[test]
fn valid_shortcut() -> anyhow::Result<()> {
    Command::cargo_bin("lasttab")?
        .args(&["--check-shortcut", "Ctrl+Shift+1"])
        .assert()
        .success()
        .stdout("Ctrl+Shift+1 is a valid shortcut\n");

    Ok(())
}

#[test]
fn media_key() -> anyhow::Result<()> {
    Command::cargo_bin("lasttab")?
        .args(&["--check-shortcut", "MediaPlayPause"])
        .assert()
        .success();

    Ok(())
}

#[test]
fn invalid_shortcut() -> anyhow::Result<()> {
    Command::cargo_bin("lasttab")?
        .args(&["--check-shortcut", "Ctrl+Alt+Q"])
        .assert()
        .failure();

    Ok(())
}
