use crate::event::EventKind;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Capture,
    Bubble,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerTarget {
    Document,
    Window,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    pub id: ListenerId,
    pub target: ListenerTarget,
    pub kind: EventKind,
    pub phase: Phase,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListenerError {
    #[error("listener {0:?} is not registered")]
    NotRegistered(ListenerId),
}

/// Process-wide listener table.
///
/// The registry only records listeners. Callers walk `listeners_for` in
/// order and run page handlers afterwards, so capture listeners see an
/// event before page content does.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    next_id: u64,
    registrations: Vec<Registration>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, target: ListenerTarget, kind: EventKind, phase: Phase) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.registrations.push(Registration {
            id,
            target,
            kind,
            phase,
        });
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> Result<Registration, ListenerError> {
        let idx = self
            .registrations
            .iter()
            .position(|r| r.id == id)
            .ok_or(ListenerError::NotRegistered(id))?;
        Ok(self.registrations.remove(idx))
    }

    pub fn get(&self, id: ListenerId) -> Option<&Registration> {
        self.registrations.iter().find(|r| r.id == id)
    }

    /// Listeners for `kind`, capture phase first, registration order within
    /// a phase.
    pub fn listeners_for(&self, kind: EventKind) -> Vec<Registration> {
        let mut matching: Vec<Registration> = self
            .registrations
            .iter()
            .filter(|r| r.kind == kind)
            .copied()
            .collect();
        matching.sort_by_key(|r| match r.phase {
            Phase::Capture => 0,
            Phase::Bubble => 1,
        });
        matching
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}
