use super::*;

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["wavewatch-cli", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli =
        Cli::try_parse_from(["wavewatch-cli", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["wavewatch-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn logs_list_uses_default_paging() {
    let cli = Cli::try_parse_from(["wavewatch-cli", "logs", "list"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Logs {
            command: logs::LogsCommands::List {
                limit: 20,
                offset: 0
            }
        })
    ));
}

#[test]
fn logs_list_accepts_paging_flags() {
    let cli = Cli::try_parse_from([
        "wavewatch-cli",
        "logs",
        "list",
        "--limit",
        "5",
        "--offset",
        "10",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Logs {
            command: logs::LogsCommands::List {
                limit: 5,
                offset: 10
            }
        })
    ));
}

#[test]
fn recommend_requires_location() {
    assert!(Cli::try_parse_from(["wavewatch-cli", "recommend"]).is_err());
}

#[test]
fn recommend_parses_location_and_json_flag() {
    let cli = Cli::try_parse_from([
        "wavewatch-cli",
        "recommend",
        "--location",
        "Downtown",
        "--json",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Recommend {
            ref location,
            json: true
        }) if location == "Downtown"
    ));
}

#[test]
fn score_defaults_to_all_locations_without_explain() {
    let cli =
        Cli::try_parse_from(["wavewatch-cli", "score", "--input", "samples.json"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Score {
            ref input,
            ref location,
            explain: false
        }) if input == std::path::Path::new("samples.json") && location.is_empty()
    ));
}

#[test]
fn score_parses_location_and_explain() {
    let cli = Cli::try_parse_from([
        "wavewatch-cli",
        "score",
        "--input",
        "samples.json",
        "--location",
        "harbor",
        "--explain",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Score {
            ref location,
            explain: true,
            ..
        }) if location == "harbor"
    ));
}

#[test]
fn score_requires_input() {
    assert!(Cli::try_parse_from(["wavewatch-cli", "score"]).is_err());
}
