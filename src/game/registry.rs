use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use uuid::Uuid;

use crate::{
    error::GameError,
    game::{
        results::{Created, GameView, MoveResult, Pairing, RegistryStats},
        session::{GameSession, MoveOutcome},
        MatchmakingQueue,
    },
    models::{Outcome, PlayerId, SessionStatus},
};

/// Everything guarded by the registry lock.
///
/// Each session is stored exactly once, keyed by game id. Both participants
/// map to that id, so a move by either player mutates the same session.
#[derive(Debug, Default)]
struct RegistryState {
    queue: MatchmakingQueue,
    sessions: HashMap<Uuid, GameSession>,
    players: HashMap<PlayerId, Uuid>,
}

impl RegistryState {
    /// Session a registered player points at. A dangling entry is a
    /// programming error, not a user error.
    fn session_mut(&mut self, game_id: Uuid) -> &mut GameSession {
        match self.sessions.get_mut(&game_id) {
            Some(session) => session,
            None => panic!("registry entry points at missing session {}", game_id),
        }
    }
}

/// Authoritative map from player to their current session, plus the
/// matchmaking queue.
///
/// A single mutex covers the queue, the sessions and the player index. It is
/// only held for the synchronous state transition of one call; callers
/// deliver the returned notifications after the call has returned, so no
/// I/O ever happens under the lock.
#[derive(Debug, Default)]
pub struct GameRegistry {
    state: Mutex<RegistryState>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        // Poisoned means a transition panicked halfway through
        self.state.lock().expect("game registry lock poisoned")
    }

    /// Open a session for `player` and put them in the matchmaking queue
    pub fn create_game(&self, player: PlayerId) -> Result<Created, GameError> {
        let mut state = self.lock();
        if state.players.contains_key(&player) {
            return Err(GameError::AlreadyInGame);
        }

        state.queue.enqueue(player)?;
        let session = GameSession::new(player);
        let game_id = session.game_id();
        state.sessions.insert(game_id, session);
        state.players.insert(player, game_id);

        tracing::info!(
            "Player {} created game {} ({} waiting)",
            player,
            game_id,
            state.queue.len()
        );

        Ok(Created {
            game_id,
            host: player,
        })
    }

    /// Pair `player` with the longest-waiting host.
    ///
    /// Dequeue, pairing and registration happen under one lock acquisition,
    /// so two concurrent finds can never claim the same host.
    pub fn find_game(&self, player: PlayerId) -> Result<Pairing, GameError> {
        let mut state = self.lock();
        if state.players.contains_key(&player) {
            return Err(GameError::AlreadyInGame);
        }

        let host = state.queue.dequeue().ok_or(GameError::NoGameAvailable)?;
        let game_id = match state.players.get(&host) {
            Some(game_id) => *game_id,
            None => panic!("queued player {} has no registry entry", host),
        };

        let session = state.session_mut(game_id);
        if let Err(e) = session.pair_with(player) {
            panic!("queued player {} had an unpairable session: {}", host, e);
        }
        let board = session.board().clone();
        state.players.insert(player, game_id);

        tracing::info!(
            "Player {} joined game {} hosted by {}",
            player,
            game_id,
            host
        );

        Ok(Pairing {
            game_id,
            host,
            guest: player,
            board,
        })
    }

    /// Apply a move for `player`. A finishing move removes the session and
    /// both registry entries in the same critical section.
    pub fn make_move(&self, player: PlayerId, index: usize) -> Result<MoveResult, GameError> {
        let mut state = self.lock();
        let game_id = *state.players.get(&player).ok_or(GameError::NotInGame)?;

        let session = state.session_mut(game_id);
        let outcome = session.apply_move(player, index)?;
        let board = session.board().clone();
        let seq = session.history().len();

        match outcome {
            MoveOutcome::Continue { next } => {
                let Some(opponent) = session.opponent_of(player) else {
                    panic!("game {} is in progress without an opponent", game_id);
                };
                tracing::debug!(
                    "Game {}: player {} marked cell {}, {:?} to move",
                    game_id,
                    player,
                    index,
                    next
                );

                Ok(MoveResult::Accepted {
                    game_id,
                    mover: player,
                    opponent,
                    index,
                    next,
                    board,
                    seq,
                })
            }
            MoveOutcome::Finished(outcome) => {
                let player_x = session.player_x();
                let Some(player_o) = session.player_o() else {
                    panic!("game {} finished without a second player", game_id);
                };
                let winner = match outcome {
                    Outcome::Win(mark) => session.player_for(mark),
                    Outcome::Draw => None,
                };
                let duration = session.created_at().elapsed();

                state.sessions.remove(&game_id);
                state.players.remove(&player_x);
                state.players.remove(&player_o);

                tracing::info!(
                    "Game {} finished with {:?} after {:?}",
                    game_id,
                    outcome,
                    duration
                );

                Ok(MoveResult::Finished {
                    game_id,
                    players: [player_x, player_o],
                    outcome,
                    winner,
                    board,
                    seq,
                })
            }
        }
    }

    /// Snapshot of the session `player` is in
    pub fn view(&self, player: PlayerId) -> Result<GameView, GameError> {
        let mut state = self.lock();
        let game_id = *state.players.get(&player).ok_or(GameError::NotInGame)?;
        let session = state.session_mut(game_id);

        let Some(mark) = session.mark_of(player) else {
            panic!("player {} is registered to game {} without a seat", player, game_id);
        };

        Ok(GameView {
            game_id,
            mark,
            opponent: session.opponent_of(player),
            board: session.board().clone(),
            turn: session.turn(),
            status: session.status(),
            your_turn: session.turn_owner() == Some(player),
            moves: session.history().to_vec(),
        })
    }

    pub fn is_registered(&self, player: PlayerId) -> bool {
        self.lock().players.contains_key(&player)
    }

    pub fn stats(&self) -> RegistryStats {
        let state = self.lock();
        let active_games = state
            .sessions
            .values()
            .filter(|session| session.status() == SessionStatus::InProgress)
            .count();

        RegistryStats {
            waiting_players: state.queue.len(),
            active_games,
        }
    }
}
