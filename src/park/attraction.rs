use crate::config::{AttractionConfig, AttractionKind, CoasterSpec, Money};
use crate::park::visitor::{Visitor, VisitorId};
use serde::{Deserialize, Serialize};
use std::collections::vec_deque::VecDeque;
use std::fmt;

pub const CHILD_MAX_AGE: u8 = 10;
pub const COASTER_MIN_HEIGHT: u16 = 140;

/// 1. Attraction when
///     * `Active`
///         * Should accept visitors into the queue while `queue.len() < capacity`
///         * Should accept `start_round`
///             1) Take `min(queue.len(), capacity)` visitors from the front of the queue
///             2) Count VIPs waiting, at most 40% of capacity (`vip_share`)
///             3) Keep the rest of the queue in arrival order
///         * Should accept `begin_maintenance`
///             1) Transition to `UnderMaintenance`
///     * `UnderMaintenance`
///         * Should still accept visitors into the queue
///         * Should refuse `start_round`, queue is left untouched
///         * Should accept `end_maintenance`
///             1) Transition to `Active`

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Status {
    Active,
    UnderMaintenance,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Maintenance {
    Started,
    Ended,
    Unchanged(Status),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Restriction {
    None,
    MaxAge(u8),
    MinHeight(u16),
}

impl Restriction {
    pub fn check(&self, visitor: &Visitor) -> Result<(), Rejection> {
        match *self {
            Restriction::MaxAge(max_age) if visitor.age() > max_age => Err(Rejection::TooOld {
                age: visitor.age(),
                max_age,
            }),
            Restriction::MinHeight(min_height) if visitor.height() < min_height => {
                Err(Rejection::TooShort {
                    height: visitor.height(),
                    min_height,
                })
            }
            _ => Ok(()),
        }
    }
}

impl From<&AttractionKind> for Restriction {
    fn from(kind: &AttractionKind) -> Restriction {
        match kind {
            AttractionKind::Standard => Restriction::None,
            AttractionKind::Child => Restriction::MaxAge(CHILD_MAX_AGE),
            AttractionKind::Coaster(_) => Restriction::MinHeight(COASTER_MIN_HEIGHT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    TooOld { age: u8, max_age: u8 },
    TooShort { height: u16, min_height: u16 },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Rejection::TooOld { age, max_age } => {
                write!(f, "being {}, older than {} years", age, max_age)
            }
            Rejection::TooShort { height, min_height } => write!(
                f,
                "being {} cm, below the minimum height of {} cm",
                height, min_height
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueuedVisitor {
    pub id: VisitorId,
    pub vip: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Round {
    OutOfService,
    Dispatched {
        riders: Vec<QueuedVisitor>,
        /// VIPs waiting that fit into the priority share, riders are still taken in arrival order
        vip_share: usize,
    },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Attraction {
    pub config: AttractionConfig,
    status: Status,
    queue: VecDeque<QueuedVisitor>,
    rounds: u64,
    riders_total: u64,
}

impl Attraction {
    pub fn new(config: AttractionConfig) -> Attraction {
        Attraction {
            config,
            status: Status::Active,
            queue: VecDeque::new(),
            rounds: 0,
            riders_total: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn capacity(&self) -> u32 {
        self.config.capacity
    }

    pub fn price(&self) -> Money {
        self.config.price
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }

    pub fn coaster_spec(&self) -> Option<&CoasterSpec> {
        match &self.config.kind {
            AttractionKind::Coaster(spec) => Some(spec),
            _ => None,
        }
    }

    pub fn restriction(&self) -> Restriction {
        Restriction::from(&self.config.kind)
    }

    pub fn verify_restrictions(&self, visitor: &Visitor) -> Result<(), Rejection> {
        self.restriction().check(visitor)
    }

    pub fn queue(&self) -> impl Iterator<Item = &QueuedVisitor> {
        self.queue.iter()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_queue_full(&self) -> bool {
        self.queue.len() >= self.config.capacity as usize
    }

    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    pub fn riders_total(&self) -> u64 {
        self.riders_total
    }

    /// Returns the 1-based position in the queue, `None` when the queue is full
    pub(crate) fn enqueue(&mut self, visitor: QueuedVisitor) -> Option<usize> {
        if self.is_queue_full() {
            return None;
        }

        self.queue.push_back(visitor);

        Some(self.queue.len())
    }

    pub fn start_round(&mut self) -> Round {
        if !self.is_active() {
            return Round::OutOfService;
        }

        let participants = self.queue.len().min(self.config.capacity as usize);

        let vips_waiting = self.queue.iter().filter(|visitor| visitor.vip).count();
        let vip_share = vips_waiting.min((self.config.capacity as usize) * 2 / 5);

        let riders: Vec<QueuedVisitor> = self.queue.drain(..participants).collect();

        self.rounds = self.rounds.saturating_add(1);
        self.riders_total = self.riders_total.saturating_add(riders.len() as u64);

        debug!(attraction = %self.config.name, riders = riders.len(), vip_share, left = self.queue.len(), "round started");

        Round::Dispatched { riders, vip_share }
    }

    pub fn begin_maintenance(&mut self) -> Maintenance {
        if self.set_status(Status::UnderMaintenance) {
            Maintenance::Started
        } else {
            Maintenance::Unchanged(Status::UnderMaintenance)
        }
    }

    pub fn end_maintenance(&mut self) -> Maintenance {
        if self.set_status(Status::Active) {
            Maintenance::Ended
        } else {
            Maintenance::Unchanged(Status::Active)
        }
    }

    fn set_status(&mut self, status: Status) -> bool {
        if self.status == status {
            return false;
        }

        debug!(attraction = %self.config.name, from = ?self.status, to = ?status, "status changed");

        self.status = status;

        true
    }
}
