//! Line-oriented front-end for playing and sharing a game.
//!
//! Reads one command per line from stdin and writes results to stdout. The
//! session's transport is in memory; `share` prints the current fragment so it
//! can be pasted to the other player, who opens it with `load`.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use tracing::debug;

use crate::config::CliArgs;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::default_placement;
use crate::move_generation::legal_move_apply::MoveOutcome;
use crate::sync::protocol::{ReceiveOutcome, SyncSession};
use crate::sync::transport::{MemoryTransport, Transport};
use crate::utils::notation::{
    parse_destination, parse_position, parse_promotion_kind, position_to_text,
};
use crate::utils::render_game_state::render_game_state;

const HELP: &str = "commands: new [light] [dark], show, moves r,c, move r,c r,c|off, \
promote r,c r,c q|r|b|n, share, load <fragment>, resync, checksum, quit";

pub fn run_stdio_loop(args: &CliArgs) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut cli = CliState::new(args);

    if let Some(fragment) = &args.fragment {
        cli.handle_command(&format!("load {fragment}"), &mut stdout, Instant::now())?;
    }

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = cli.handle_command(&line, &mut stdout, Instant::now())?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

struct CliState {
    session: SyncSession<MemoryTransport>,
    light_name: String,
    dark_name: String,
}

impl CliState {
    fn new(args: &CliArgs) -> Self {
        let mut session = SyncSession::new(MemoryTransport::new(), &args.sync_config());
        if let Some(name) = &args.name {
            session = session.with_player_name(name.clone());
        }
        Self {
            session,
            light_name: args.light.clone(),
            dark_name: args.dark.clone(),
        }
    }

    fn handle_command(&mut self, line: &str, out: &mut impl Write, now: Instant) -> io::Result<bool> {
        if self.session.tick(now) {
            debug!("debounced write released");
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        let result = match cmd {
            "new" => self.handle_new(&args, out),
            "show" => self.handle_show(out),
            "moves" => self.handle_moves(&args, out),
            "move" => self.handle_move(&args, out, now),
            "promote" => self.handle_promote(&args, out, now),
            "share" => self.handle_share(out),
            "load" => self.handle_load(&args, out),
            "resync" => {
                self.session.request_resync();
                self.write_fragment(out)
            }
            "checksum" => match self.session.game_state() {
                Some(state) => writeln!(out, "{}", state.checksum).map_err(|e| e.to_string()),
                None => Err("no game".to_owned()),
            },
            "help" => writeln!(out, "{HELP}").map_err(|e| e.to_string()),
            "quit" => {
                self.session.flush();
                return Ok(true);
            }
            other => Err(format!("unknown command {other:?}")),
        };

        if let Err(err) = result {
            writeln!(out, "error: {err}")?;
        }
        Ok(false)
    }

    fn handle_new(&mut self, args: &[&str], out: &mut impl Write) -> Result<(), String> {
        let light = args.first().copied().unwrap_or(self.light_name.as_str()).to_owned();
        let dark = args.get(1).copied().unwrap_or(self.dark_name.as_str()).to_owned();

        self.session
            .start_game(
                Player::new("light", light),
                Player::new("dark", dark),
                &default_placement(),
            )
            .map_err(|e| e.to_string())?;
        self.handle_show(out)?;
        self.write_fragment(out)
    }

    fn handle_show(&self, out: &mut impl Write) -> Result<(), String> {
        let state = self.session.game_state().ok_or("no game")?;
        writeln!(out, "{}", render_game_state(state)).map_err(|e| e.to_string())
    }

    fn handle_moves(&self, args: &[&str], out: &mut impl Write) -> Result<(), String> {
        let engine = self.session.engine().ok_or("no game")?;
        let from = parse_position(args.first().ok_or("usage: moves r,c")?)?;

        let mut targets: Vec<String> = engine
            .get_valid_moves(from)
            .into_iter()
            .map(position_to_text)
            .collect();
        if engine.can_move_off_board(from) {
            targets.push("off".to_owned());
        }

        if targets.is_empty() {
            writeln!(out, "no moves").map_err(|e| e.to_string())
        } else {
            writeln!(out, "{}", targets.join(" ")).map_err(|e| e.to_string())
        }
    }

    fn handle_move(&mut self, args: &[&str], out: &mut impl Write, now: Instant) -> Result<(), String> {
        let [from, to] = args else {
            return Err("usage: move r,c r,c|off".to_owned());
        };
        let from = parse_position(from)?;
        let to = parse_destination(to)?;

        match self.session.play(from, to, now).map_err(|e| e.to_string())? {
            MoveOutcome::Applied(_) => self.handle_show(out),
            MoveOutcome::PromotionRequired { from, to } => writeln!(
                out,
                "promotion required: promote {} {} q|r|b|n",
                position_to_text(from),
                position_to_text(to)
            )
            .map_err(|e| e.to_string()),
        }
    }

    fn handle_promote(&mut self, args: &[&str], out: &mut impl Write, now: Instant) -> Result<(), String> {
        let [from, to, kind] = args else {
            return Err("usage: promote r,c r,c q|r|b|n".to_owned());
        };
        let from = parse_position(from)?;
        let to = parse_position(to)?;
        let kind = parse_promotion_kind(kind)?;

        self.session
            .promote(from, to, kind, now)
            .map_err(|e| e.to_string())?;
        self.handle_show(out)
    }

    fn handle_share(&mut self, out: &mut impl Write) -> Result<(), String> {
        self.session.flush();
        self.write_fragment(out)
    }

    fn handle_load(&mut self, args: &[&str], out: &mut impl Write) -> Result<(), String> {
        let fragment = args.first().ok_or("usage: load <fragment>")?;
        let outcome = self.session.receive(fragment).map_err(|e| e.to_string())?;

        match outcome {
            ReceiveOutcome::StateReplaced | ReceiveOutcome::MoveApplied => self.handle_show(out),
            ReceiveOutcome::ResyncAnswered => self.write_fragment(out),
            ReceiveOutcome::Empty => writeln!(out, "nothing to load").map_err(|e| e.to_string()),
        }
    }

    fn write_fragment(&self, out: &mut impl Write) -> Result<(), String> {
        let fragment = self
            .session
            .transport()
            .read()
            .ok_or("nothing to share yet")?;
        writeln!(out, "#{fragment}").map_err(|e| e.to_string())
    }
}
