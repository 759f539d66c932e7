//! USI command parsing.
//!
//! Unlike a GUI protocol with many optional `go` parameters, this engine's
//! source only ever receives three shapes of `go`: a fixed `btime <v> wtime
//! <v> byoyomi <v>` token sequence, `infinite`, or `mate`. Anything else
//! (and any other top-level command this engine doesn't implement) is
//! parsed as [`UsiCommand::Unknown`] and silently ignored by the caller.

#[derive(Debug, Clone)]
pub enum GoMode {
    /// `go btime <btime> wtime <wtime> byoyomi <byoyomi>`, all milliseconds.
    TimeControl { btime: i64, wtime: i64, byoyomi: i64 },
    /// `go infinite`: search until `stop`, printing a static-eval `info`
    /// line first.
    Infinite,
    /// `go mate`: dispatches to the `Mate` option's configured mode
    /// (`Learn`, `Average`, or unimplemented mate search).
    Mate,
}

#[derive(Debug, Clone)]
pub enum UsiCommand {
    Usi,
    IsReady,
    /// Parsed `name`, and `value` as the *raw* remainder of the line after
    /// the literal substring `"value "` — preserving embedded spaces, since
    /// a combo value like `Random(NoSearch)` is a single token but a future
    /// string-typed option might not be.
    SetOption { name: String, value: String },
    /// Raw remainder of the line after `"position "`.
    Position(String),
    Go(GoMode),
    Stop,
    Quit,
    Unknown,
}

/// Parses one line of USI input. Never fails: an unrecognized or malformed
/// command simply becomes [`UsiCommand::Unknown`], matching the source
/// engine's behavior of silently ignoring anything it doesn't recognize.
pub fn parse_line(line: &str) -> UsiCommand {
    let trimmed = line.trim();
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    let Some(&head) = tokens.first() else {
        return UsiCommand::Unknown;
    };

    match head {
        "usi" => UsiCommand::Usi,
        "isready" => UsiCommand::IsReady,
        "quit" => UsiCommand::Quit,
        "stop" => UsiCommand::Stop,
        "position" => {
            let rest = trimmed.strip_prefix("position").unwrap_or(trimmed).trim();
            UsiCommand::Position(rest.to_string())
        }
        "setoption" => parse_setoption(&tokens),
        "go" => parse_go(&tokens),
        _ => UsiCommand::Unknown,
    }
}

fn parse_setoption(tokens: &[&str]) -> UsiCommand {
    // "setoption" "name" <name> "value" <value...>
    if tokens.len() < 4 || tokens[1] != "name" {
        return UsiCommand::Unknown;
    }
    let name = tokens[2].to_string();
    let line = tokens.join(" ");
    let value = match line.find("value ") {
        Some(at) => line[at + "value ".len()..].to_string(),
        None => String::new(),
    };
    UsiCommand::SetOption { name, value }
}

fn parse_go(tokens: &[&str]) -> UsiCommand {
    match tokens.get(1).copied() {
        Some("btime") => {
            if tokens.len() == 7
                && tokens[3] == "wtime"
                && tokens[5] == "byoyomi"
            {
                let parsed = (
                    tokens[2].parse::<i64>(),
                    tokens[4].parse::<i64>(),
                    tokens[6].parse::<i64>(),
                );
                if let (Ok(btime), Ok(wtime), Ok(byoyomi)) = parsed {
                    return UsiCommand::Go(GoMode::TimeControl { btime, wtime, byoyomi });
                }
            }
            UsiCommand::Unknown
        }
        Some("infinite") => UsiCommand::Go(GoMode::Infinite),
        Some("mate") => UsiCommand::Go(GoMode::Mate),
        _ => UsiCommand::Unknown,
    }
}
