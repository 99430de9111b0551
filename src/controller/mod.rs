pub mod archive;
pub mod generator;

use serde::Serialize;

pub use archive::{ArchiveCard, ArchiveController, ArchiveView};
pub use generator::{FailurePolicy, GeneratorController, GeneratorView};

/// `Idle → Loading → {Success, Failure}`; re-entered only by triggering again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Failure,
}

/// Sequence number handed out when a fetch is triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing tickets; only the latest one may update the view.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}

/// Result of handing a response back to a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Applied {
    Applied,
    /// A newer request was issued after this one; the response was dropped.
    Stale,
}
