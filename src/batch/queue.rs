/// Work queue between the worker thread and the UI poller
///
/// Single producer, single consumer, FIFO. The producer is consumed when
/// it pushes the end-of-batch sentinel, so no record can follow it.

use tokio::sync::mpsc::{self, error::TryRecvError};

use crate::state::data::ResultRecord;

/// One entry on the queue
#[derive(Debug)]
pub enum WorkItem {
    Record(ResultRecord),
    /// Sentinel: every record of the batch has been pushed
    Done,
}

/// Create a connected producer/consumer pair
pub fn work_queue() -> (QueueProducer, QueueConsumer) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        QueueProducer { tx },
        QueueConsumer {
            rx,
            state: QueueState::Open,
        },
    )
}

/// Worker side of the queue
#[derive(Debug)]
pub struct QueueProducer {
    tx: mpsc::UnboundedSender<WorkItem>,
}

impl QueueProducer {
    /// Push a result record.
    /// A closed consumer is not an error for the worker; the record is dropped.
    pub fn push(&self, record: ResultRecord) {
        if self.tx.send(WorkItem::Record(record)).is_err() {
            log::warn!("Result dropped: the poller is gone");
        }
    }

    /// Push the sentinel and close the producer
    pub fn finish(self) {
        let _ = self.tx.send(WorkItem::Done);
    }
}

/// State of the queue as seen by the consumer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    /// More records may still arrive
    Open,
    /// The sentinel has been observed
    Finished,
    /// The producer went away without pushing the sentinel
    Disconnected,
}

/// Everything currently available on the queue
#[derive(Debug)]
pub struct Drained {
    pub records: Vec<ResultRecord>,
    pub state: QueueState,
}

/// UI side of the queue
#[derive(Debug)]
pub struct QueueConsumer {
    rx: mpsc::UnboundedReceiver<WorkItem>,
    state: QueueState,
}

impl QueueConsumer {
    /// Take every available entry without blocking.
    ///
    /// Stops at the sentinel; once finished or disconnected, further
    /// calls return no records and the same terminal state.
    pub fn drain(&mut self) -> Drained {
        let mut records = Vec::new();

        while self.state == QueueState::Open {
            match self.rx.try_recv() {
                Ok(WorkItem::Record(record)) => records.push(record),
                Ok(WorkItem::Done) => self.state = QueueState::Finished,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => self.state = QueueState::Disconnected,
            }
        }

        Drained {
            records,
            state: self.state,
        }
    }
}
