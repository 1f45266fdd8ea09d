use std::fs;
use std::io::{IsTerminal, Read};

use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SourceKind {
    File,
    Stdin,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Stdin => "stdin",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedInput {
    pub kind: SourceKind,
    pub path: Option<String>,
    pub content: String,
}

/// Reads `path`, or stdin when `path` is `-`.
///
/// `stdin_override` stands in for piped stdin in tests.
pub fn resolve_input(
    path: &str,
    stdin_override: Option<String>,
    command: &str,
) -> ClientResult<ResolvedInput> {
    if path == "-" {
        let body = read_stdin(stdin_override)?;
        if let Some(content) = body
            && !content.trim().is_empty()
        {
            return Ok(ResolvedInput {
                kind: SourceKind::Stdin,
                path: None,
                content,
            });
        }

        return Err(ClientError::invalid_argument_for_command(
            "Path `-` means stdin input, but stdin was empty. Pipe JSON/CSV input or pass a file path.",
            Some(command),
        ));
    }

    let content = fs::read_to_string(path).map_err(|error| {
        ClientError::invalid_argument_with_recovery(
            &format!("Could not read input file `{path}`: {error}"),
            vec![
                "Verify the path exists and is readable.".to_string(),
                format!("Rerun `bankdash {command} --input <path> --card <card>`."),
            ],
        )
    })?;

    Ok(ResolvedInput {
        kind: SourceKind::File,
        path: Some(path.to_string()),
        content,
    })
}

fn read_stdin(stdin_override: Option<String>) -> ClientResult<Option<String>> {
    if let Some(value) = stdin_override {
        return Ok(Some(value));
    }

    if std::io::stdin().is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|error| {
            ClientError::invalid_argument_with_recovery(
                &format!("Could not read stdin: {error}"),
                vec![
                    "Retry with an explicit file path.".to_string(),
                    "Or rerun with valid stdin content.".to_string(),
                ],
            )
        })?;

    Ok(Some(buffer))
}
