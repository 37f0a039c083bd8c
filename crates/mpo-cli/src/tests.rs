use super::*;

#[test]
fn defaults_match_the_standard_setup() {
    let cli = Cli::try_parse_from(["mpo-cli"]).expect("expected valid cli args");

    assert_eq!(cli.file, PathBuf::from("mobile-office.json"));
    assert_eq!(cli.host, "localhost");
    assert_eq!(cli.user, "root");
    assert_eq!(cli.password, "");
    assert_eq!(cli.database, "hkpo_mobile");
    assert!(!cli.dry_run);
}

#[test]
fn short_file_flag_is_accepted() {
    let cli = Cli::try_parse_from(["mpo-cli", "-f", "offices.json"])
        .expect("expected valid cli args");
    assert_eq!(cli.file, PathBuf::from("offices.json"));
}

#[test]
fn all_connection_options_are_recognized() {
    let cli = Cli::try_parse_from([
        "mpo-cli",
        "--file",
        "offices.json",
        "--host",
        "db.internal",
        "--user",
        "importer",
        "--password",
        "secret",
        "--database",
        "postal",
    ])
    .expect("expected valid cli args");

    assert_eq!(cli.file, PathBuf::from("offices.json"));
    assert_eq!(cli.host, "db.internal");
    assert_eq!(cli.user, "importer");
    assert_eq!(cli.password, "secret");
    assert_eq!(cli.database, "postal");
}

#[test]
fn dry_run_is_a_bare_flag() {
    let cli = Cli::try_parse_from(["mpo-cli", "--dry-run"]).expect("expected valid cli args");
    assert!(cli.dry_run);
}

#[test]
fn unknown_flags_are_rejected() {
    assert!(Cli::try_parse_from(["mpo-cli", "--force"]).is_err());
}
