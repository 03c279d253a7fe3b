//! Line-based text protocol spoken by the [`crate::Engine`]. Every line is one
//! command, tokens are separated by whitespace:
//!
//! ```text
//! id
//! position startpos moves d3-c4 c6-b5
//! position b-b-b-b-/-b-b-b-b/b-b-b-b-/--------/--------/-w-w-w-w/w-w-w-w-/-w-w-w-w w 0
//! newgame
//! moves
//! destinations d3
//! move d3-c4
//! status
//! perft 4
//! d
//! quit
//! ```

#[derive(Debug, PartialEq)]
pub(super) enum Command {
    Identify,
    SetPosition {
        /// Position encoding, starting position if missing.
        encoding: Option<String>,
        moves: Vec<String>,
    },
    NewGame,
    Moves,
    Destinations {
        square: String,
    },
    Move {
        next_move: String,
    },
    Status,
    Perft {
        depth: u8,
    },
    Display,
    Quit,
    Unknown(String),
}

fn parse_setposition(parts: &[&str]) -> Command {
    let moves_index = parts.iter().position(|&x| x == "moves");
    let setup = &parts[1..moves_index.unwrap_or(parts.len())];
    let encoding = match setup {
        [] | ["startpos"] => None,
        _ => Some(setup.join(" ")),
    };
    let moves = if let Some(moves_index) = moves_index {
        parts[moves_index + 1..]
            .iter()
            .map(|s| (*s).to_string())
            .collect()
    } else {
        vec![]
    };
    Command::SetPosition { encoding, moves }
}

impl Command {
    pub(super) fn parse(input: &str) -> Self {
        let parts: Vec<&str> = input.split_whitespace().collect();

        if parts.is_empty() {
            return Self::Unknown(input.to_string());
        }

        match parts[0] {
            "id" => Self::Identify,
            "position" => parse_setposition(&parts),
            "newgame" => Self::NewGame,
            "moves" => Self::Moves,
            "destinations" if parts.len() == 2 => Self::Destinations {
                square: parts[1].to_string(),
            },
            "move" if parts.len() == 2 => Self::Move {
                next_move: parts[1].to_string(),
            },
            "status" => Self::Status,
            "perft" if parts.len() == 2 => match parts[1].parse() {
                Ok(depth) => Self::Perft { depth },
                Err(_) => Self::Unknown(input.trim().to_string()),
            },
            "d" => Self::Display,
            "quit" => Self::Quit,
            _ => Self::Unknown(input.trim().to_string()),
        }
    }
}
