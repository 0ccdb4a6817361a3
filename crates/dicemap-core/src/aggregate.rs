//! Aggregate root abstraction.

use uuid::Uuid;

use crate::event::DomainEvent;

/// An aggregate whose state is the fold of the events it records.
pub trait AggregateRoot: Send + Sync {
    /// The event type this aggregate produces and consumes.
    type Event: DomainEvent;

    /// Returns the aggregate identifier.
    fn aggregate_id(&self) -> Uuid;

    /// Returns the current version (number of events applied).
    fn version(&self) -> i64;

    /// Folds one event into the aggregate's state.
    fn apply(&mut self, event: &Self::Event);

    /// Returns events recorded since the last drain.
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Forgets the recorded events once they have been handed out.
    fn clear_uncommitted_events(&mut self);

    /// Hands out the recorded events and clears them.
    fn take_uncommitted_events(&mut self) -> Vec<Self::Event>
    where
        Self::Event: Clone,
    {
        let events = self.uncommitted_events().to_vec();
        self.clear_uncommitted_events();
        events
    }
}
