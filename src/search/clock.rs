//! Time-budget allocation for a single `go` call.
//!
//! Mirrors the allocation policy used by [`crate::search::search`]'s
//! iterative deepening loop: a single up-front budget plus one optional
//! mid-search extension, rather than per-move re-planning.

use std::time::{Duration, Instant};

/// Side-agnostic snapshot of the `go` command's time-control fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct UciOptions {
    pub wtime_ms: Option<u64>,
    pub btime_ms: Option<u64>,
    pub winc_ms: u64,
    pub binc_ms: u64,
    pub movestogo: Option<u64>,
    pub movetime_ms: Option<u64>,
    pub depth: Option<u32>,
    pub nodes: Option<u64>,
    pub mate: Option<u32>,
    pub infinite: bool,
    pub ponder: bool,
}

/// Which side's clock `alloc_time` should read from `UciOptions`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SideToMove {
    White,
    Black,
}

/// Time budget for one search, plus the single-shot extension flag.
///
/// `allocated_ms == None` means unlimited (depth/nodes/infinite/ponder
/// search): the caller stops on depth or an external `stop`, never on
/// the clock.
pub struct Clock {
    start: Instant,
    allocated_ms: Option<u64>,
    extensible: bool,
}

const TIME_DENOMINATOR: u64 = 50;
const EXTENSIBLE_FLOOR_MS: u64 = 15_000;

impl Clock {
    /// Allocate a time budget for the side to move, per §4.8.
    pub fn alloc_time(options: &UciOptions, stm: SideToMove) -> Self {
        let (allocated_ms, extensible) = if options.depth.is_some()
            || options.nodes.is_some()
            || options.ponder
            || options.infinite
        {
            (None, false)
        } else if let Some(secs) = options.movetime_ms {
            (Some(secs), false)
        } else {
            let side_time = match stm {
                SideToMove::White => options.wtime_ms,
                SideToMove::Black => options.btime_ms,
            };

            match side_time {
                // allocated_time = side_time_ms / 50, extensible iff >= 15000ms.
                // movestogo and the increment do not enter the formula: the source
                // reallocates every move from whatever time remains rather than
                // planning a schedule across the rest of the game.
                Some(t) => {
                    let allocated = t / TIME_DENOMINATOR;
                    let extensible = allocated >= EXTENSIBLE_FLOOR_MS;
                    (Some(allocated), extensible)
                }
                None => (None, false),
            }
        };

        Clock {
            start: Instant::now(),
            allocated_ms,
            extensible,
        }
    }

    /// Grant a one-time extension of `n * 100` ms. No-op once already used
    /// or if the budget was never extensible.
    pub fn extend_time(&mut self, n: u64) {
        if self.extensible {
            if let Some(ms) = self.allocated_ms.as_mut() {
                *ms += n * 100;
            }
            self.extensible = false;
        }
    }

    /// True once elapsed time has reached the allocated budget. An
    /// unlimited clock (`allocated_ms == None`) never reports exceeded.
    pub fn has_exceeded_time(&self) -> bool {
        match self.allocated_ms {
            Some(ms) => self.start.elapsed() >= Duration::from_millis(ms),
            None => false,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn allocated(&self) -> Option<Duration> {
        self.allocated_ms.map(Duration::from_millis)
    }

    pub fn is_extensible(&self) -> bool {
        self.extensible
    }
}
