//! Hotseat chess in the terminal.
//!
//! Two players share one keyboard and enter moves in coordinate notation
//! ("e2e4", "e7e8q"). The rules engine decides legality; this binary only
//! reads input and draws the board.

mod config;
mod render;

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chess_rules::{Game, MoveText, Phase, Promotion, Square};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use config::{HotseatConfig, DEFAULT_CONFIG_PATH};
use render::{render_board, status_line};

fn print_usage() {
    println!("Hotseat chess for two players");
    println!();
    println!("Usage:");
    println!("  hotseat [--config <path>] [--json] [--ascii] [--flip]");
    println!();
    println!("Commands during play:");
    println!("  e2e4          - move a piece (append q/r/b/n to promote)");
    println!("  select e2     - select a piece and show where it can go");
    println!("  moves e2      - list legal destinations without selecting");
    println!("  history       - list the moves played so far");
    println!("  help          - show this text");
    println!("  quit          - leave the game");
}

struct Options {
    config_path: PathBuf,
    json: bool,
    ascii: bool,
    flip: bool,
}

/// Returns `None` when only the usage text was requested.
fn parse_args(args: &[String]) -> Option<Options> {
    let mut opts = Options {
        config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        json: false,
        ascii: false,
        flip: false,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    opts.config_path = PathBuf::from(&args[i + 1]);
                    i += 1;
                } else {
                    eprintln!("Error: --config needs a path");
                }
            }
            "--json" => opts.json = true,
            "--ascii" => opts.ascii = true,
            "--flip" => opts.flip = true,
            "help" | "--help" | "-h" => return None,
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }
    Some(opts)
}

fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

enum Flow {
    Continue,
    Quit,
}

struct Session {
    game: Game,
    cfg: HotseatConfig,
}

impl Session {
    fn draw(&self, out: &mut impl Write) -> Result<()> {
        writeln!(out)?;
        write!(out, "{}", render_board(&self.game, &self.cfg))?;
        writeln!(out, "{}", status_line(&self.game))?;
        Ok(())
    }

    fn emit_snapshot(&self, out: &mut impl Write) -> Result<()> {
        if self.cfg.emit_json {
            let json = serde_json::to_string(&self.game.snapshot())
                .context("failed to serialize game snapshot")?;
            writeln!(out, "{}", json)?;
        }
        Ok(())
    }

    fn handle_line(&mut self, line: &str, out: &mut impl Write) -> Result<Flow> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = parts.first() else {
            return Ok(Flow::Continue);
        };

        if let Phase::AwaitingPromotion { .. } = self.game.phase() {
            return self.handle_promotion(command, out);
        }

        match command {
            "quit" | "exit" => return Ok(Flow::Quit),
            "help" => print_usage(),
            "history" => {
                for (ply, record) in self.game.history().iter().enumerate() {
                    writeln!(out, "{:>3}. {}", ply + 1, record)?;
                }
            }
            "moves" | "select" => {
                let Some(sq) = parts.get(1).and_then(|s| s.parse::<Square>().ok()) else {
                    writeln!(out, "Usage: {} <square>", command)?;
                    return Ok(Flow::Continue);
                };
                if command == "moves" {
                    let dests: Vec<String> = self
                        .game
                        .legal_destinations(sq)
                        .iter()
                        .map(|d| d.to_string())
                        .collect();
                    writeln!(out, "{}: {}", sq, dests.join(" "))?;
                } else if let Some(result) = self.game.select(sq) {
                    debug!(applied = result.applied, "move played by selection");
                    self.after_move(out)?;
                } else {
                    self.draw(out)?;
                }
            }
            text => match text.parse::<MoveText>() {
                Ok(mv) => self.play(mv, out)?,
                Err(e) => writeln!(out, "{}", e)?,
            },
        }
        Ok(Flow::Continue)
    }

    fn play(&mut self, mv: MoveText, out: &mut impl Write) -> Result<()> {
        let result = match mv.promotion {
            Some(choice) => self.game.apply_move_with_promotion(mv.from, mv.to, choice),
            None => self.game.apply_move(mv.from, mv.to),
        };
        if !result.applied {
            writeln!(out, "Illegal move: {}", mv)?;
            return Ok(());
        }
        self.after_move(out)
    }

    fn handle_promotion(&mut self, command: &str, out: &mut impl Write) -> Result<Flow> {
        if matches!(command, "quit" | "exit") {
            return Ok(Flow::Quit);
        }
        let mut letters = command.chars();
        let choice = match (letters.next(), letters.next()) {
            (Some(ch), None) => Promotion::from_letter(ch),
            _ => {
                writeln!(out, "Choose q, r, b or n")?;
                return Ok(Flow::Continue);
            }
        };
        match choice {
            Ok(choice) => {
                self.game.resolve_promotion(choice);
                self.after_move(out)?;
            }
            Err(e) => writeln!(out, "{}", e)?,
        }
        Ok(Flow::Continue)
    }

    fn after_move(&mut self, out: &mut impl Write) -> Result<()> {
        self.draw(out)?;
        if !matches!(self.game.phase(), Phase::AwaitingPromotion { .. }) {
            self.emit_snapshot(out)?;
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(opts) = parse_args(&args) else {
        print_usage();
        return Ok(());
    };

    let mut cfg = HotseatConfig::load(&opts.config_path)
        .with_context(|| format!("loading {}", opts.config_path.display()))?;
    cfg.emit_json |= opts.json;
    cfg.unicode_pieces &= !opts.ascii;
    cfg.flip_board |= opts.flip;

    init_logging(&cfg.log_filter);
    info!(config = %opts.config_path.display(), "starting hotseat game");

    let mut session = Session {
        game: Game::new(),
        cfg,
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    session.draw(&mut stdout)?;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!(error = %e, "stdin closed");
                break;
            }
        };
        if let Flow::Quit = session.handle_line(line.trim(), &mut stdout)? {
            break;
        }
        stdout.flush()?;
        if session.game.outcome().is_over() {
            break;
        }
    }

    info!(plies = session.game.history().len(), outcome = ?session.game.outcome(), "game finished");
    Ok(())
}
