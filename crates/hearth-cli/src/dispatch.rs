use hearth_client::commands;
use hearth_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands, ImportCommand};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Import { command } => match command {
            ImportCommand::Create {
                dry_run,
                replace,
                json: _,
                path,
            } => commands::import::run(path.clone(), *dry_run, *replace),
            ImportCommand::List { .. } => commands::import::list(),
        },
        Commands::Insights { from, to, .. } => {
            let from_value = from.as_ref().map(|value| value.as_str());
            let to_value = to.as_ref().map(|value| value.as_str());
            commands::insights::run(from_value, to_value)
        }
        Commands::Summary { from, to, .. } => {
            let from_value = from.as_ref().map(|value| value.as_str());
            let to_value = to.as_ref().map(|value| value.as_str());
            commands::summary::run(from_value, to_value)
        }
        Commands::Trend { from, to, .. } => {
            let from_value = from.as_ref().map(|value| value.as_str());
            let to_value = to.as_ref().map(|value| value.as_str());
            commands::trend::run(from_value, to_value)
        }
        Commands::Recurring { from, to, .. } => {
            let from_value = from.as_ref().map(|value| value.as_str());
            let to_value = to.as_ref().map(|value| value.as_str());
            commands::recurring::run(from_value, to_value)
        }
        Commands::Report { output, .. } => commands::report::run(output.as_deref()),
        Commands::Demo => commands::demo::run(),
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::parse_from;

    use super::dispatch;

    #[test]
    fn demo_dispatches_to_expected_command_name() {
        let parsed = parse_from(["hearth", "demo"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            let response = dispatch(&cli);
            assert!(response.is_ok());
            if let Ok(success) = response {
                assert_eq!(success.command, "demo");
            }
        }
    }

    #[test]
    fn import_list_parses_for_dispatch() {
        let parsed = parse_from(["hearth", "import", "list"]);
        assert!(parsed.is_ok());
    }
}
