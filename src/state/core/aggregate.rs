// ============================================================================
// Aggregate Pattern - State Container Core
// ============================================================================
//
// Key Principles:
// 1. Commands are validated against current state before anything changes
// 2. Validation emits events; events are facts and cannot fail to apply
// 3. All state changes flow through `apply_event`
//
// Generic over the aggregate; no domain types live here.
//
// ============================================================================

/// Reducer-style aggregate: `handle_command` decides, `apply_event` mutates
pub trait Aggregate: Sized + Send + Sync {
    type Event;
    type Command;
    type Error;

    /// Apply an event to update state
    fn apply_event(&mut self, event: &Self::Event);

    /// Validate a command and emit the events it produces
    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;

    /// Handle a command and apply its events in one step
    fn execute(&mut self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let events = self.handle_command(command)?;
        for event in &events {
            self.apply_event(event);
        }
        Ok(events)
    }
}
