use crate::cli::{AccountCommand, Commands};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

impl OutputMode {
    fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    match command {
        Commands::Account {
            command: AccountCommand::List { json },
        }
        | Commands::History { json, .. }
        | Commands::Analytics { json, .. }
        | Commands::Watch { json, .. } => OutputMode::from_flag(*json),
    }
}
