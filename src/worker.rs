//! Search worker: one engine per color on its own thread, driven by messages
//!
//! The worker mirrors the game board from `observe-move` requests and keeps
//! answering requests while a search runs on a separate thread, so `cancel`
//! reaches a search in progress. A search thread that panics is reported as
//! the fallback heuristic move instead.
//!
//! # Example
//!
//! ```
//! use gomoku::board::Stone;
//! use gomoku::protocol::{Event, Request};
//! use gomoku::worker::Worker;
//!
//! let worker = Worker::spawn().unwrap();
//! worker.send(Request::Init { color: Stone::Black, config: None }).unwrap();
//! assert_eq!(worker.recv(), Some(Event::Initialized { color: Stone::Black }));
//!
//! worker.send(Request::Compute).unwrap();
//! assert_eq!(worker.recv(), Some(Event::SearchStarted));
//! match worker.recv() {
//!     Some(Event::Decision(mv)) => assert_eq!((mv.row, mv.col), (7, 7)),
//!     other => panic!("unexpected {other:?}"),
//! }
//! worker.shutdown();
//! ```

use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::board::{Board, BoardState, Pos, Stone};
use crate::engine::{GameSearchEngine, MoveResult};
use crate::error::{EngineError, EngineResult, ProtocolError, ProtocolResult};
use crate::protocol::{CellChange, Event, Request};
use crate::search::CancelToken;

/// How often an idle worker checks on its running search
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Handle to a worker thread.
pub struct Worker {
    requests: Sender<Request>,
    events: Receiver<Event>,
    thread: Option<JoinHandle<()>>,
}

impl Worker {
    /// Start a worker thread; it waits for `init` before doing anything else.
    pub fn spawn() -> std::io::Result<Self> {
        let (request_tx, request_rx) = channel();
        let (event_tx, event_rx) = channel();
        let thread = thread::Builder::new()
            .name("gomoku-worker".into())
            .spawn(move || WorkerLoop::new(event_tx).run(&request_rx))?;
        Ok(Self {
            requests: request_tx,
            events: event_rx,
            thread: Some(thread),
        })
    }

    pub fn send(&self, request: Request) -> ProtocolResult<()> {
        self.requests.send(request).map_err(|_| ProtocolError::Disconnected)
    }

    /// Another sender into this worker, for a reader on a different thread
    pub fn requester(&self) -> Sender<Request> {
        self.requests.clone()
    }

    /// Next event, blocking. `None` once the worker has exited and drained.
    pub fn recv(&self) -> Option<Event> {
        self.events.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<Event> {
        self.events.recv_timeout(timeout).ok()
    }

    /// Iterate events until the worker exits.
    pub fn events(&self) -> impl Iterator<Item = Event> + '_ {
        self.events.iter()
    }

    /// Ask the worker to stop and wait for it. A running search is allowed to
    /// finish and its decision is still delivered.
    pub fn shutdown(mut self) {
        let _ = self.requests.send(Request::Shutdown);
        self.join();
    }

    /// Wait for the worker thread to exit.
    pub fn join(&mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("worker thread panicked");
            }
        }
    }
}

/// A search running on its own thread
struct RunningSearch {
    token: CancelToken,
    handle: JoinHandle<EngineResult<Option<MoveResult>>>,
    state: BoardState,
}

impl RunningSearch {
    fn start(engine: Arc<GameSearchEngine>, state: BoardState, side: Stone) -> std::io::Result<Self> {
        let token = CancelToken::new();
        let handle = {
            let token = token.clone();
            let state = state.clone();
            thread::Builder::new()
                .name("gomoku-search".into())
                .spawn(move || engine.find_best_move_with_token(&state, side, &token))?
        };
        Ok(Self { token, handle, state })
    }

    fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the search and turn its outcome into an event.
    fn finish(self, engine: &GameSearchEngine) -> Event {
        match self.handle.join() {
            Ok(Ok(Some(mv))) => Event::Decision(mv),
            Ok(Ok(None)) => Event::NoMove,
            Ok(Err(err)) => Event::error(err),
            Err(_) => {
                warn!("search thread panicked, answering with the fallback move");
                match engine.fallback_move(&self.state) {
                    Ok(Some(mv)) => Event::Decision(mv),
                    Ok(None) => Event::NoMove,
                    Err(err) => Event::error(err),
                }
            }
        }
    }
}

/// State owned by the worker thread
struct WorkerLoop {
    events: Sender<Event>,
    engine: Option<Arc<GameSearchEngine>>,
    color: Stone,
    board: Board,
    search: Option<RunningSearch>,
}

impl WorkerLoop {
    fn new(events: Sender<Event>) -> Self {
        Self {
            events,
            engine: None,
            color: Stone::Empty,
            board: Board::new(),
            search: None,
        }
    }

    fn run(mut self, requests: &Receiver<Request>) {
        loop {
            let request = if self.search.is_some() {
                match requests.recv_timeout(POLL_INTERVAL) {
                    Ok(request) => Some(request),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            } else {
                match requests.recv() {
                    Ok(request) => Some(request),
                    Err(_) => break,
                }
            };

            if let Some(request) = request {
                debug!(?request, "worker request");
                if request == Request::Shutdown {
                    break;
                }
                if let Err(err) = self.handle(request) {
                    self.emit(Event::error(err));
                }
            }
            self.poll_search();
        }

        // a search in flight still gets its answer; `cancel` first to cut it short
        if let (Some(search), Some(engine)) = (self.search.take(), self.engine.clone()) {
            debug!("waiting for the running search before stopping");
            let event = search.finish(&engine);
            self.emit(event);
        }
        debug!(color = %self.color, "worker stopped");
    }

    fn emit(&self, event: Event) {
        let _ = self.events.send(event);
    }

    fn engine(&self) -> ProtocolResult<&Arc<GameSearchEngine>> {
        self.engine.as_ref().ok_or(ProtocolError::NotInitialized)
    }

    fn handle(&mut self, request: Request) -> ProtocolResult<()> {
        match request {
            Request::Init { color, config } => {
                if color == Stone::Empty {
                    return Err(EngineError::InvalidSide.into());
                }
                let config = config.unwrap_or_default();
                config.validate()?;
                self.abandon_search();
                info!(%color, depth = config.max_depth, "worker initialized");
                self.engine = Some(Arc::new(GameSearchEngine::with_config(config)));
                self.color = color;
                self.board = Board::new();
                self.emit(Event::Initialized { color });
            }
            Request::ObserveMove { r, c, color } => {
                self.engine()?;
                let pos = Pos::try_new(r, c).ok_or(EngineError::InvalidCoordinate { row: r, col: c })?;
                match color.stone() {
                    Some(stone) => {
                        if !self.board.is_empty(pos) {
                            return Err(ProtocolError::OccupiedCell { row: pos.row, col: pos.col });
                        }
                        self.board.place_stone(pos, stone);
                    }
                    None => {
                        if self.board.is_empty(pos) {
                            return Err(ProtocolError::EmptyCell { row: pos.row, col: pos.col });
                        }
                        self.board.remove_stone(pos);
                    }
                }
                self.emit(Event::MoveObserved { r: pos.row, c: pos.col });
            }
            Request::Compute => {
                let engine = Arc::clone(self.engine()?);
                self.abandon_search();
                let state = BoardState::from_board(&self.board);
                self.search = Some(RunningSearch::start(engine, state, self.color)?);
                self.emit(Event::SearchStarted);
            }
            Request::Evaluate => {
                let engine = self.engine()?;
                let state = BoardState::from_board(&self.board);
                let probability = engine.evaluate_win_probability(&state, self.color)?;
                self.emit(Event::Evaluation(probability));
            }
            Request::Cancel => {
                if let Some(search) = &self.search {
                    search.token.cancel();
                }
            }
            Request::Shutdown => {}
        }
        Ok(())
    }

    /// Report a finished search, if any.
    fn poll_search(&mut self) {
        if !self.search.as_ref().is_some_and(RunningSearch::is_finished) {
            return;
        }
        let (Some(search), Some(engine)) = (self.search.take(), self.engine.clone()) else {
            return;
        };
        let event = search.finish(&engine);
        self.emit(event);
    }

    /// Stop a superseded search without reporting it.
    fn abandon_search(&mut self) {
        if let Some(search) = self.search.take() {
            debug!("abandoning running search");
            search.token.cancel();
            let _ = search.handle.join();
        }
    }
}
