//! Crawl session: the frontier of a single crawl run
//!
//! The session owns the pending queue and the visited set and is the only
//! place where they are mutated. Every mutation goes through `enqueue` or
//! `next_location`, which between them uphold the dedupe invariants:
//!
//! - a Location is visited at most once per run
//! - a Location is pending at most once at any instant
//! - the page counter grows by one per newly visited Location
//! - nothing is dequeued once the counter has reached the budget

use crate::url::Location;
use std::collections::{HashSet, VecDeque};
use std::fmt;

/// Why a crawl run stopped
///
/// Neither variant is an error; these are the two normal ends of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// The pending queue emptied before the budget was reached
    ExhaustedFrontier,

    /// The page counter reached the configured budget
    BudgetReached,
}

impl Termination {
    /// Returns a short machine-friendly name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExhaustedFrontier => "exhausted_frontier",
            Self::BudgetReached => "budget_reached",
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExhaustedFrontier => write!(f, "frontier exhausted"),
            Self::BudgetReached => write!(f, "page budget reached"),
        }
    }
}

/// Result of asking the session for the next page to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextLocation {
    /// A Location that has just been claimed (marked visited and counted)
    Fetch(Location),

    /// The run is over
    Done(Termination),
}

/// Frontier bookkeeping for one crawl run
///
/// A session is created per run and discarded at the end; nothing in it is
/// persisted. It is passed explicitly to the crawl loop, so tests can build
/// a fresh one per case.
#[derive(Debug, Clone)]
pub struct CrawlSession {
    /// Locations waiting to be fetched, in discovery order
    pending: VecDeque<Location>,

    /// Membership index mirroring `pending`
    queued: HashSet<Location>,

    /// Locations that have been claimed for fetching
    visited: HashSet<Location>,

    /// Visited Locations in the order they were claimed
    visit_order: Vec<Location>,

    /// Number of pages claimed so far
    pages_visited: usize,

    /// Maximum number of pages to claim
    budget: usize,
}

impl CrawlSession {
    /// Creates a session seeded with a single Location
    ///
    /// # Arguments
    ///
    /// * `seed` - The Location to start from
    /// * `budget` - Maximum number of pages to fetch; zero ends the run immediately
    pub fn new(seed: Location, budget: usize) -> Self {
        Self::with_seeds([seed], budget)
    }

    /// Creates a session seeded with several Locations
    ///
    /// Seeds are queued in the given order. Repeated seeds collapse into one
    /// pending entry.
    ///
    /// # Arguments
    ///
    /// * `seeds` - The Locations to start from
    /// * `budget` - Maximum number of pages to fetch
    pub fn with_seeds<I>(seeds: I, budget: usize) -> Self
    where
        I: IntoIterator<Item = Location>,
    {
        let mut session = Self {
            pending: VecDeque::new(),
            queued: HashSet::new(),
            visited: HashSet::new(),
            visit_order: Vec::new(),
            pages_visited: 0,
            budget,
        };

        for seed in seeds {
            session.enqueue(seed);
        }

        session
    }

    /// Claims the next Location to fetch
    ///
    /// The budget is checked before anything is popped, so once the counter
    /// reaches the budget the queue is left untouched. A popped Location that
    /// is already visited is discarded without being counted.
    ///
    /// # Returns
    ///
    /// * `NextLocation::Fetch(location)` - `location` is now visited and counted
    /// * `NextLocation::Done(termination)` - The run is over
    pub fn next_location(&mut self) -> NextLocation {
        loop {
            if self.budget_reached() {
                return NextLocation::Done(Termination::BudgetReached);
            }

            let Some(location) = self.pending.pop_front() else {
                return NextLocation::Done(Termination::ExhaustedFrontier);
            };
            self.queued.remove(&location);

            if self.visited.contains(&location) {
                tracing::debug!("Skipping already visited {}", location);
                continue;
            }

            self.visited.insert(location.clone());
            self.visit_order.push(location.clone());
            self.pages_visited += 1;

            return NextLocation::Fetch(location);
        }
    }

    /// Appends a Location to the back of the pending queue
    ///
    /// The Location is ignored if it has been visited or is already pending.
    ///
    /// # Returns
    ///
    /// `true` if the Location was queued
    pub fn enqueue(&mut self, location: Location) -> bool {
        if self.visited.contains(&location) || self.queued.contains(&location) {
            tracing::trace!("Already known: {}", location);
            return false;
        }

        tracing::trace!("Queued {}", location);
        self.queued.insert(location.clone());
        self.pending.push_back(location);
        true
    }

    /// Returns whether the page counter has reached the budget
    pub fn budget_reached(&self) -> bool {
        self.pages_visited >= self.budget
    }

    /// Returns whether a Location has been claimed in this run
    pub fn is_visited(&self, location: &Location) -> bool {
        self.visited.contains(location)
    }

    /// Returns whether a Location is currently waiting in the queue
    pub fn is_pending(&self, location: &Location) -> bool {
        self.queued.contains(location)
    }

    /// Returns the pending queue, front first
    pub fn pending(&self) -> impl ExactSizeIterator<Item = &Location> + '_ {
        self.pending.iter()
    }

    /// Returns the number of Locations waiting in the queue
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Returns the visited set
    pub fn visited(&self) -> &HashSet<Location> {
        &self.visited
    }

    /// Returns visited Locations in the order they were claimed
    pub fn visit_order(&self) -> &[Location] {
        &self.visit_order
    }

    /// Returns the number of pages claimed so far
    pub fn pages_visited(&self) -> usize {
        self.pages_visited
    }

    /// Returns the page budget
    pub fn budget(&self) -> usize {
        self.budget
    }
}
