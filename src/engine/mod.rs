//! The engine puts all pieces together and serves the rules over a simple
//! line-based text protocol (see [`protocol`] for the list of commands). This
//! is how external collaborators (game server, tournament runner, GUI) drive
//! the rules without linking the library.
//!
//! [`Engine::run`] is the "main loop" of the engine which communicates with the
//! environment and executes commands from the input stream.
use std::io::{BufRead, Write};
use std::time::Instant;

use anyhow::Context;
use itertools::Itertools;
use tracing::{debug, info};

use crate::draughts::core::{Move, Square};
use crate::draughts::perft::divide;
use crate::draughts::position::{GameStatus, Position};
use crate::engine::protocol::Command;

mod protocol;

/// The Engine connects everything together: it keeps the current position and
/// handles the commands, including I/O.
pub struct Engine<'a, R: BufRead, W: Write> {
    position: Position,
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> Engine<'a, R, W> {
    /// Creates a new instance of the engine with starting position and provided
    /// I/O.
    #[must_use]
    pub fn new(input: &'a mut R, output: &'a mut W) -> Self {
        Self::with_position(Position::starting(), input, output)
    }

    /// Creates a new instance of the engine that starts from a given position.
    #[must_use]
    pub fn with_position(position: Position, input: &'a mut R, output: &'a mut W) -> Self {
        Self {
            position,
            input,
            output,
        }
    }

    /// Continuously reads the input stream and executes the commands until
    /// "quit" is sent or the input is closed.
    ///
    /// Problems with a single command (unknown command, malformed position or
    /// an illegal move) are reported back as `info string` lines and do not
    /// stop the loop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the input or writing the output fails.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("reading from input")?;
            if read == 0 {
                break;
            }
            debug!(command = line.trim(), "received");
            match Command::parse(&line) {
                Command::Identify => self.handle_identify()?,
                Command::SetPosition { encoding, moves } => {
                    self.handle_position(encoding.as_deref(), &moves)?;
                },
                Command::NewGame => self.position = Position::starting(),
                Command::Moves => self.handle_moves()?,
                Command::Destinations { square } => self.handle_destinations(&square)?,
                Command::Move { next_move } => self.handle_move(&next_move)?,
                Command::Status => self.handle_status()?,
                Command::Perft { depth } => self.handle_perft(depth)?,
                Command::Display => write!(self.output, "{:?}", self.position)?,
                Command::Quit => break,
                Command::Unknown(command) => {
                    writeln!(self.output, "info string Unsupported command: {command}")?;
                },
            }
            self.output.flush()?;
        }
        Ok(())
    }

    /// Identifies the engine.
    fn handle_identify(&mut self) -> anyhow::Result<()> {
        writeln!(
            self.output,
            "id name {} {}",
            env!("CARGO_PKG_NAME"),
            crate::engine_version()
        )?;
        writeln!(self.output, "id author {}", env!("CARGO_PKG_AUTHORS"))?;
        Ok(())
    }

    /// Changes the position to the one specified in the command and plays the
    /// moves on top of it. The current position is kept if the encoding is
    /// incorrect; replaying stops at the first illegal move.
    fn handle_position(&mut self, encoding: Option<&str>, moves: &[String]) -> anyhow::Result<()> {
        self.position = match encoding {
            None => Position::starting(),
            Some(encoding) => match Position::try_from(encoding) {
                Ok(position) => position,
                Err(e) => {
                    writeln!(self.output, "info string Incorrect position: {e:#}")?;
                    return Ok(());
                },
            },
        };
        for next_move in moves {
            if !self.play(next_move)? {
                break;
            }
        }
        Ok(())
    }

    /// Lists all legal moves of the side to move.
    fn handle_moves(&mut self) -> anyhow::Result<()> {
        let moves = self.position.generate_moves();
        writeln!(self.output, "moves {}", moves.iter().join(" "))?;
        Ok(())
    }

    fn handle_destinations(&mut self, square: &str) -> anyhow::Result<()> {
        match Square::try_from(square) {
            Ok(square) => writeln!(
                self.output,
                "destinations {}",
                self.position.legal_destinations(square).iter().join(" ")
            )?,
            Err(e) => writeln!(self.output, "info string Incorrect square: {e:#}")?,
        }
        Ok(())
    }

    /// Plays the move and responds with the encoding of the new position.
    fn handle_move(&mut self, next_move: &str) -> anyhow::Result<()> {
        if self.play(next_move)? {
            writeln!(self.output, "position {}", self.position)?;
        }
        Ok(())
    }

    fn handle_status(&mut self) -> anyhow::Result<()> {
        let status = match self.position.status() {
            GameStatus::InProgress => "in-progress",
            GameStatus::WhiteWon => "white-won",
            GameStatus::BlackWon => "black-won",
        };
        writeln!(self.output, "status {status}")?;
        Ok(())
    }

    /// Prints the node count for every legal move and the total.
    fn handle_perft(&mut self, depth: u8) -> anyhow::Result<()> {
        let start = Instant::now();
        let split = divide(&self.position, depth);
        let nodes: u64 = if depth == 0 {
            1
        } else {
            split.iter().map(|(_, nodes)| nodes).sum()
        };
        let elapsed = start.elapsed();
        for (next_move, nodes) in &split {
            writeln!(self.output, "{next_move}: {nodes}")?;
        }
        writeln!(self.output, "nodes {nodes}")?;
        info!(depth, nodes, ?elapsed, "perft");
        Ok(())
    }

    /// Parses and plays the move, reporting the problem to the output if the
    /// move is illegal. Returns whether the move was played.
    fn play(&mut self, next_move: &str) -> anyhow::Result<bool> {
        let next_move = match Move::try_from(next_move) {
            Ok(next_move) => next_move,
            Err(e) => {
                writeln!(self.output, "info string Incorrect move: {e:#}")?;
                return Ok(false);
            },
        };
        match self.position.make_move(next_move) {
            Ok(position) => {
                self.position = position;
                Ok(true)
            },
            Err(e) => {
                writeln!(self.output, "info string {e}")?;
                Ok(false)
            },
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn run(commands: &str) -> String {
        let mut input = commands.as_bytes();
        let mut output = Vec::new();
        Engine::new(&mut input, &mut output).run().unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn play_moves() {
        assert_eq!(
            run("move d3-c4\nmove c4-d5\nstatus\n"),
            "position b-b-b-b-/-b-b-b-b/b-b-b-b-/--------/--w-----/-w---w-w/w-w-w-w-/-w-w-w-w b 0\n\
             info string illegal move: c4-d5\n\
             status in-progress\n"
        );
    }

    #[test]
    fn list_moves() {
        assert_eq!(
            run("moves\ndestinations d3\ndestinations a1\ndestinations z9\n"),
            "moves b3-a4 b3-c4 d3-c4 d3-e4 f3-e4 f3-g4 h3-g4\n\
             destinations c4 e4\n\
             destinations \n\
             info string Incorrect square: file should be within 'a'..='h', got 'z'\n"
        );
    }

    #[test]
    fn set_position() {
        let output = run(
            "position --------/--------/--------/--------/----b---/---w----/--------/-------- w 0 \
             moves d3-f5\nstatus\nnewgame\nstatus\n",
        );
        assert_eq!(output, "status white-won\nstatus in-progress\n");
        let output = run("position startpos moves d3-c4 e6-f5\nmoves\n");
        assert_eq!(output, "moves c2-d3 e2-d3 b3-a4 f3-e4 f3-g4 h3-g4 c4-b5 c4-d5\n");
    }

    #[test]
    fn stop_on_quit() {
        assert_eq!(run("quit\nstatus\n"), "");
        assert_eq!(run("go\n"), "info string Unsupported command: go\n");
    }
}
