//! Peer-to-peer game sync over a single shared fragment.
//!
//! Each peer keeps its own `GameEngine`. Local moves go out as `delta`
//! payloads through a debounced writer; a new game goes out as `full_state`
//! at once. Incoming deltas are only applied when the sender's pre-move turn
//! and checksum match the local state, otherwise the caller is told to ask for
//! a resync.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::SyncConfig;
use crate::engine::game_engine::GameEngine;
use crate::errors::{SetupError, SyncError};
use crate::game_state::checksum::compute_checksum;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::PieceSetup;
use crate::move_generation::legal_move_apply::MoveOutcome;
use crate::sync::codec::{compress, decompress};
use crate::sync::debounce::Debouncer;
use crate::sync::payload::SyncPayload;
use crate::sync::transport::Transport;

/// What `receive` or `load` did with a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiveOutcome {
    /// The transport held nothing.
    Empty,
    /// A `full_state` replaced the local game.
    StateReplaced,
    /// A `delta` was applied to the local game.
    MoveApplied,
    /// The peer asked for our state and it has been written.
    ResyncAnswered,
}

pub struct SyncSession<T: Transport> {
    transport: T,
    engine: Option<GameEngine>,
    outbox: Debouncer<SyncPayload>,
    player_name: Option<String>,
}

impl<T: Transport> SyncSession<T> {
    pub fn new(transport: T, config: &SyncConfig) -> Self {
        Self {
            transport,
            engine: None,
            outbox: Debouncer::new(config.debounce),
            player_name: None,
        }
    }

    /// Name attached to every payload this session writes.
    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = Some(name.into());
        self
    }

    /// Create a game and publish it immediately, dropping any pending write.
    pub fn start_game(
        &mut self,
        light_player: Player,
        dark_player: Player,
        placement: &[PieceSetup],
    ) -> Result<&GameState, SetupError> {
        let engine = GameEngine::with_placement(light_player, dark_player, placement)?;
        info!(game_id = %engine.game_state().game_id, "new game");

        self.outbox.cancel();
        let payload = SyncPayload::full_state(engine.game_state().clone(), self.player_name.clone());
        self.write_now(&payload);

        Ok(self.engine.insert(engine).game_state())
    }

    /// Play a local move and queue its delta.
    pub fn play(
        &mut self,
        from: Position,
        to: impl Into<Destination>,
        now: Instant,
    ) -> Result<MoveOutcome, SyncError> {
        let to = to.into();
        let engine = self.engine.as_mut().ok_or(SyncError::NoLocalGame)?;
        let (turn, checksum) = pre_move(engine);

        let outcome = engine.make_move(from, to)?;
        if matches!(outcome, MoveOutcome::Applied(_)) {
            self.queue_delta(MoveRequest::new(from, to), turn, checksum, now);
        }
        Ok(outcome)
    }

    /// Finish a local promotion and queue its delta.
    pub fn promote(
        &mut self,
        from: Position,
        to: Position,
        kind: PieceKind,
        now: Instant,
    ) -> Result<GameState, SyncError> {
        let engine = self.engine.as_mut().ok_or(SyncError::NoLocalGame)?;
        let (turn, checksum) = pre_move(engine);

        let next = engine.promote_pawn(from, to, kind)?;
        self.queue_delta(MoveRequest::promoting(from, to, kind), turn, checksum, now);
        Ok(next)
    }

    /// Handle one fragment from the peer.
    pub fn receive(&mut self, fragment: &str) -> Result<ReceiveOutcome, SyncError> {
        let Some(payload) = decompress(fragment) else {
            warn!("corrupt link");
            return Err(SyncError::CorruptLink);
        };
        debug!(kind = payload.kind(), "payload received");

        match payload {
            SyncPayload::FullState { game_state, player_name } => {
                info!(
                    game_id = %game_state.game_id,
                    turn = game_state.current_turn,
                    peer = player_name.as_deref().unwrap_or("unknown"),
                    "replacing local state"
                );
                self.outbox.cancel();
                self.engine = Some(GameEngine::from_state(*game_state));
                Ok(ReceiveOutcome::StateReplaced)
            }
            SyncPayload::Delta { mv, turn, checksum, .. } => self.apply_delta(mv, turn, &checksum),
            SyncPayload::ResyncRequest {} => {
                let state = self
                    .engine
                    .as_ref()
                    .ok_or(SyncError::NoLocalGame)?
                    .game_state()
                    .clone();
                self.outbox.cancel();
                self.write_now(&SyncPayload::full_state(state, self.player_name.clone()));
                Ok(ReceiveOutcome::ResyncAnswered)
            }
        }
    }

    /// Read the transport and handle whatever it holds.
    pub fn load(&mut self) -> Result<ReceiveOutcome, SyncError> {
        match self.transport.read() {
            Some(fragment) if !fragment.trim().trim_start_matches('#').is_empty() => {
                self.receive(&fragment)
            }
            _ => Ok(ReceiveOutcome::Empty),
        }
    }

    /// Ask the peer for its full state.
    pub fn request_resync(&mut self) {
        self.outbox.cancel();
        self.write_now(&SyncPayload::ResyncRequest {});
    }

    /// Write the pending payload if its delay has elapsed. Returns whether a
    /// write happened.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.outbox.poll(now) {
            Some(payload) => self.write_now(&payload),
            None => false,
        }
    }

    /// Write the pending payload now.
    pub fn flush(&mut self) -> bool {
        match self.outbox.flush() {
            Some(payload) => self.write_now(&payload),
            None => false,
        }
    }

    /// Flush and hand back the transport. A session dropped without `close`
    /// discards its pending write.
    pub fn close(mut self) -> T {
        self.flush();
        self.transport
    }

    pub fn engine(&self) -> Option<&GameEngine> {
        self.engine.as_ref()
    }

    pub fn game_state(&self) -> Option<&GameState> {
        self.engine.as_ref().map(GameEngine::game_state)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn has_pending_write(&self) -> bool {
        self.outbox.is_pending()
    }

    fn apply_delta(
        &mut self,
        request: MoveRequest,
        turn: u32,
        checksum: &str,
    ) -> Result<ReceiveOutcome, SyncError> {
        let engine = self.engine.as_mut().ok_or(SyncError::NoLocalGame)?;

        let local_turn = engine.game_state().current_turn;
        if local_turn != turn {
            warn!(peer_turn = turn, local_turn, "delta for a different turn");
            return Err(SyncError::TurnMismatch {
                expected: turn,
                actual: local_turn,
            });
        }
        // Recomputed so a snapshot whose stored checksum is stale still diverges.
        let local = compute_checksum(engine.game_state());
        if local != checksum {
            warn!(peer = checksum, %local, "game state diverged");
            return Err(SyncError::Divergence {
                expected: checksum.to_owned(),
                actual: local,
            });
        }

        match engine.apply_request(request)? {
            MoveOutcome::Applied(_) => {
                debug!(%request, "peer move applied");
                Ok(ReceiveOutcome::MoveApplied)
            }
            MoveOutcome::PromotionRequired { from, to } => {
                Err(SyncError::PromotionInDelta { from, to })
            }
        }
    }

    /// Queue a delta. If a write is already pending, the URL can only carry
    /// one payload, so the write becomes a `full_state` that includes every
    /// move made since the last write.
    fn queue_delta(&mut self, request: MoveRequest, turn: u32, checksum: String, now: Instant) {
        let payload = match (&self.engine, self.outbox.is_pending()) {
            (Some(engine), true) => {
                debug!("coalescing pending write into full state");
                SyncPayload::full_state(engine.game_state().clone(), self.player_name.clone())
            }
            _ => SyncPayload::Delta {
                mv: request,
                turn,
                checksum,
                player_name: self.player_name.clone(),
            },
        };
        self.outbox.schedule(payload, now);
    }

    fn write_now(&mut self, payload: &SyncPayload) -> bool {
        match compress(payload) {
            Some(fragment) => {
                debug!(kind = payload.kind(), len = fragment.len(), "writing fragment");
                self.transport.write(&fragment);
                true
            }
            None => false,
        }
    }
}

fn pre_move(engine: &GameEngine) -> (u32, String) {
    (engine.game_state().current_turn, engine.checksum().to_owned())
}
