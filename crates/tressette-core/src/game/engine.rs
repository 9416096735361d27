use crate::game::config::EngineConfig;
use crate::game::deal::deal;
use crate::game::error::{EngineError, PlayRejection};
use crate::game::events::{EngineEvent, SubscriptionId, Subscribers};
use crate::game::roster::{RosterEntry, seat_roster};
use crate::game::schedule::{Deferred, Scheduler, TaskId};
use crate::model::board::{BoardState, PlayedCard};
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::participant::{Participant, ParticipantView};
use crate::model::points::Points;
use crate::model::trick::{TrickOutcome, resolve_trick};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RoundPhase {
    /// Nobody has played to the current trick yet.
    AwaitingPlay { seat: usize },
    TrickInProgress { seat: usize },
    /// Board is full; resolution is pending and plays are refused.
    TrickComplete,
    /// Every hand is empty; the restart is pending.
    RoundComplete,
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOutcome {
    /// The card that left the hand and went on the board.
    pub played: Card,
    pub next_turn: usize,
    pub trick_complete: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreLine {
    pub name: String,
    pub score: Points,
    pub rounds_won: u32,
}

/// Frozen standings of a finished round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: u32,
    pub winner: String,
    pub scores: Vec<ScoreLine>,
    pub tricks: usize,
}

/// Turn coordinator for one table.
///
/// Plays come in through [`play_card`]; everything the engine does on its
/// own (bot plays, trick resolution, round restart) is queued as a deferred
/// task on an internal clock that only moves when the host calls
/// [`advance`] or [`step`].
///
/// [`play_card`]: RoundEngine::play_card
/// [`advance`]: RoundEngine::advance
/// [`step`]: RoundEngine::step
#[derive(Debug)]
pub struct RoundEngine {
    config: EngineConfig,
    participants: Vec<Participant>,
    deck: Deck,
    board: BoardState,
    rng: StdRng,
    seed: u64,
    current_turn: usize,
    turn_active: bool,
    round_number: u32,
    round_complete: bool,
    aborted: bool,
    tricks: Vec<TrickOutcome>,
    last_round: Option<RoundSummary>,
    scheduler: Scheduler,
    subscribers: Subscribers,
}

impl RoundEngine {
    pub fn new(roster: &[RosterEntry], config: EngineConfig) -> Result<Self, EngineError> {
        let seed: u64 = rand::random();
        Self::with_seed(roster, config, seed)
    }

    pub fn with_seed(
        roster: &[RosterEntry],
        config: EngineConfig,
        seed: u64,
    ) -> Result<Self, EngineError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let deck = Deck::shuffled(&mut rng);
        Self::build(roster, config, deck, rng, seed)
    }

    /// Deals the first round from `deck` as given; later rounds reshuffle
    /// from `seed`.
    pub fn with_deck(
        roster: &[RosterEntry],
        config: EngineConfig,
        deck: Deck,
        seed: u64,
    ) -> Result<Self, EngineError> {
        let rng = StdRng::seed_from_u64(seed);
        Self::build(roster, config, deck, rng, seed)
    }

    fn build(
        roster: &[RosterEntry],
        config: EngineConfig,
        mut deck: Deck,
        rng: StdRng,
        seed: u64,
    ) -> Result<Self, EngineError> {
        let mut participants = seat_roster(roster)?;
        deal(&mut deck, &mut participants)?;
        let board = BoardState::new(participants.len());

        let mut engine = Self {
            config,
            participants,
            deck,
            board,
            rng,
            seed,
            current_turn: 0,
            turn_active: true,
            round_number: 1,
            round_complete: false,
            aborted: false,
            tricks: Vec::new(),
            last_round: None,
            scheduler: Scheduler::new(),
            subscribers: Subscribers::new(),
        };
        info!(
            players = engine.participants.len(),
            seed,
            "round 1 dealt"
        );
        engine.schedule_bot_turn(0);
        Ok(engine)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&EngineEvent) + 'static) -> SubscriptionId {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Commits `card` for the participant called `name`.
    ///
    /// Out-of-turn plays, plays while a trick is being resolved and cards
    /// the participant does not hold are refused without touching state.
    pub fn play_card(&mut self, name: &str, card: Card) -> Result<PlayOutcome, PlayRejection> {
        let outcome = self.try_play(name, card);
        if let Err(rejection) = &outcome {
            debug!(player = name, card = %card, %rejection, "play refused");
        }
        outcome
    }

    fn try_play(&mut self, name: &str, card: Card) -> Result<PlayOutcome, PlayRejection> {
        if !self.turn_active || self.aborted {
            return Err(PlayRejection::TurnInactive);
        }

        let seat = self
            .seat_of(name)
            .ok_or_else(|| PlayRejection::UnknownParticipant(name.to_string()))?;
        if seat != self.current_turn {
            return Err(PlayRejection::NotYourTurn {
                expected: self.participants[self.current_turn].name().to_string(),
                actual: name.to_string(),
            });
        }

        let participant = &mut self.participants[seat];
        if !participant.hand().contains(card) {
            return Err(PlayRejection::CardNotInHand {
                participant: name.to_string(),
                card,
            });
        }
        if !self.board.accepts(name) {
            return Err(PlayRejection::TurnInactive);
        }

        let Some(played) = participant.discard(card).first().copied() else {
            return Err(PlayRejection::CardNotInHand {
                participant: name.to_string(),
                card,
            });
        };
        let added = self.board.add(PlayedCard::new(name, played));
        debug_assert!(added, "board refused a play it had accepted");
        debug!(player = name, card = %played, seat, "card played");

        let count = self.participants.len();
        self.current_turn = (self.current_turn + 1) % count;

        let trick_complete = self.board.len() == count;
        if trick_complete {
            self.turn_active = false;
            self.scheduler
                .schedule(self.config.trick_resolution_delay(), Deferred::ResolveTrick);
        } else {
            self.schedule_bot_turn(self.current_turn);
        }

        self.subscribers.notify(&EngineEvent::Changed);

        Ok(PlayOutcome {
            played,
            next_turn: self.current_turn,
            trick_complete,
        })
    }

    /// Runs every deferred task due within the next `elapsed` of engine time,
    /// including tasks scheduled along the way. Zero-delay tasks scheduled
    /// during the call are left for the next call, so this always returns.
    /// Returns how many ran.
    pub fn advance(&mut self, elapsed: Duration) -> Result<usize, EngineError> {
        if self.aborted {
            return Err(EngineError::Aborted);
        }
        let until = self.scheduler.now() + elapsed;
        let boundary = self.scheduler.next_task_id();
        let mut ran = 0;
        while let Some((_, task)) = self.scheduler.pop_due_before(until, boundary) {
            self.run_task(task)?;
            ran += 1;
        }
        self.scheduler.advance_to(until);
        Ok(ran)
    }

    /// Jumps the clock to the next deferred task and runs it.
    pub fn step(&mut self) -> Result<Option<Deferred>, EngineError> {
        if self.aborted {
            return Err(EngineError::Aborted);
        }
        let Some(due) = self.scheduler.next_due() else {
            return Ok(None);
        };
        let Some((_, task)) = self.scheduler.pop_due(due) else {
            return Ok(None);
        };
        self.run_task(task)?;
        Ok(Some(task))
    }

    /// Steps until nothing is pending or `limit` tasks have run.
    pub fn run_pending(&mut self, limit: usize) -> Result<usize, EngineError> {
        let mut ran = 0;
        while ran < limit && self.step()?.is_some() {
            ran += 1;
        }
        Ok(ran)
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_due()
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn pending_tasks(&self) -> Vec<(TaskId, Deferred)> {
        self.scheduler.pending().collect()
    }

    pub fn cancel_task(&mut self, id: TaskId) -> bool {
        self.scheduler.cancel(id)
    }

    fn run_task(&mut self, task: Deferred) -> Result<(), EngineError> {
        if self.aborted {
            return Err(EngineError::Aborted);
        }
        match task {
            Deferred::BotPlay { seat, card } => {
                self.fire_bot_play(seat, card);
                Ok(())
            }
            Deferred::ResolveTrick => self.resolve_current_trick(),
            Deferred::RestartRound => self.restart_round(),
        }
    }

    fn fire_bot_play(&mut self, seat: usize, scheduled: Card) {
        let still_due = self.turn_active && self.current_turn == seat;
        let Some(card) = self
            .participants
            .get(seat)
            .filter(|_| still_due)
            .and_then(Participant::auto_pick)
        else {
            debug!(seat, card = %scheduled, "stale bot play skipped");
            return;
        };
        let name = self.participants[seat].name().to_string();
        if let Err(rejection) = self.play_card(&name, card) {
            debug!(player = %name, %rejection, "bot play refused");
        }
    }

    fn resolve_current_trick(&mut self) -> Result<(), EngineError> {
        if !self.board.is_full() {
            debug!(cards = self.board.len(), "trick resolution skipped, board not full");
            return Ok(());
        }

        let outcome = match resolve_trick(&mut self.board, &mut self.participants) {
            Ok(outcome) => outcome,
            Err(err) => return Err(self.abort(err.into())),
        };

        self.current_turn = outcome.winner;
        self.turn_active = true;
        self.tricks.push(outcome);
        self.subscribers.notify(&EngineEvent::Changed);

        if self.participants.iter().all(|p| p.hand().is_empty()) {
            self.finish_round();
        } else {
            self.schedule_bot_turn(self.current_turn);
        }
        Ok(())
    }

    fn finish_round(&mut self) {
        self.round_complete = true;

        let mut winner = 0;
        for (index, participant) in self.participants.iter().enumerate() {
            if participant.score() > self.participants[winner].score() {
                winner = index;
            }
        }
        self.participants[winner].record_round_win();

        let summary = RoundSummary {
            round: self.round_number,
            winner: self.participants[winner].name().to_string(),
            scores: self
                .participants
                .iter()
                .map(|p| ScoreLine {
                    name: p.name().to_string(),
                    score: p.score(),
                    rounds_won: p.rounds_won(),
                })
                .collect(),
            tricks: self.tricks.len(),
        };
        info!(
            round = summary.round,
            winner = %summary.winner,
            score = %self.participants[winner].score(),
            "round won"
        );

        let name = summary.winner.clone();
        self.last_round = Some(summary);
        self.subscribers
            .notify(&EngineEvent::RoundWinner { name });
        self.scheduler
            .schedule(self.config.round_restart_delay(), Deferred::RestartRound);
    }

    /// Starts a fresh round: pending tasks are dropped, scores and hands are
    /// cleared, the deck is rebuilt and dealt, and seat 0 leads.
    pub fn restart_round(&mut self) -> Result<(), EngineError> {
        let dropped = self.scheduler.invalidate_all();
        for participant in self.participants.iter_mut() {
            participant.reset_for_round();
        }
        self.board.clear();
        self.tricks.clear();
        self.deck.reset(&mut self.rng);
        deal(&mut self.deck, &mut self.participants)?;

        self.current_turn = 0;
        self.turn_active = true;
        self.round_complete = false;
        self.aborted = false;
        self.round_number += 1;
        info!(
            round = self.round_number,
            dropped_tasks = dropped,
            "round dealt"
        );

        self.subscribers.notify(&EngineEvent::Changed);
        self.schedule_bot_turn(0);
        Ok(())
    }

    fn abort(&mut self, err: EngineError) -> EngineError {
        self.aborted = true;
        self.turn_active = false;
        self.scheduler.invalidate_all();
        error!(round = self.round_number, error = %err, "round aborted");
        self.subscribers.notify(&EngineEvent::Changed);
        err
    }

    fn schedule_bot_turn(&mut self, seat: usize) {
        let Some(participant) = self.participants.get(seat) else {
            return;
        };
        if !participant.role().is_bot() {
            return;
        }
        match participant.auto_pick() {
            Some(card) => {
                self.scheduler
                    .schedule(self.config.bot_play_delay(), Deferred::BotPlay { seat, card });
            }
            None => debug!(player = participant.name(), "bot has no cards, nothing scheduled"),
        }
    }

    fn seat_of(&self, name: &str) -> Option<usize> {
        self.participants.iter().position(|p| p.name() == name)
    }

    pub fn current_turn(&self) -> usize {
        self.current_turn
    }

    pub fn current_participant(&self) -> Option<ParticipantView> {
        self.participants.get(self.current_turn).map(Participant::view)
    }

    pub fn is_turn_active(&self) -> bool {
        self.turn_active
    }

    pub fn phase(&self) -> RoundPhase {
        if self.aborted {
            RoundPhase::Aborted
        } else if self.round_complete {
            RoundPhase::RoundComplete
        } else if !self.turn_active {
            RoundPhase::TrickComplete
        } else if self.board.is_empty() {
            RoundPhase::AwaitingPlay {
                seat: self.current_turn,
            }
        } else {
            RoundPhase::TrickInProgress {
                seat: self.current_turn,
            }
        }
    }

    pub fn participants(&self) -> Vec<ParticipantView> {
        self.participants.iter().map(Participant::view).collect()
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn hand(&self, name: &str) -> Option<Vec<Card>> {
        self.seat_of(name)
            .map(|seat| self.participants[seat].hand().cards().to_vec())
    }

    pub fn board(&self) -> &[PlayedCard] {
        self.board.cards()
    }

    pub fn trick_history(&self) -> &[TrickOutcome] {
        &self.tricks
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    /// Cards already collected in resolved tricks this round.
    pub fn resolved_cards(&self) -> usize {
        self.tricks.iter().map(|t| t.cards.len()).sum()
    }

    pub fn points_awarded(&self) -> Points {
        self.tricks.iter().map(|t| t.points).sum()
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn last_round_summary(&self) -> Option<&RoundSummary> {
        self.last_round.as_ref()
    }
}
