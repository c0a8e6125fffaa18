//! Narrative queue.
//!
//! Four append-only channels (scenes, atmosphere, clues, revelations).
//! Elements are never removed and `delivered` only ever goes from `false`
//! to `true`. Retention is the host's problem: the queue grows for the
//! life of the campaign.

use blackfile_types::{Intensity, NarrativeElement, NarrativeId, NarrativeKind, NarrativeState};
use chrono::Utc;
use tracing::debug;

use crate::error::CoreError;

/// The four narrative channels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NarrativeQueue {
    scenes: Vec<NarrativeElement>,
    atmosphere: Vec<NarrativeElement>,
    clues: Vec<NarrativeElement>,
    revelations: Vec<NarrativeElement>,
}

impl NarrativeQueue {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            scenes: Vec::new(),
            atmosphere: Vec::new(),
            clues: Vec::new(),
            revelations: Vec::new(),
        }
    }

    const fn channel_mut(&mut self, kind: NarrativeKind) -> &mut Vec<NarrativeElement> {
        match kind {
            NarrativeKind::Scene => &mut self.scenes,
            NarrativeKind::Atmosphere => &mut self.atmosphere,
            NarrativeKind::Clue => &mut self.clues,
            NarrativeKind::Revelation => &mut self.revelations,
        }
    }

    /// Elements of one channel, in injection order.
    pub fn channel(&self, kind: NarrativeKind) -> &[NarrativeElement] {
        match kind {
            NarrativeKind::Scene => &self.scenes,
            NarrativeKind::Atmosphere => &self.atmosphere,
            NarrativeKind::Clue => &self.clues,
            NarrativeKind::Revelation => &self.revelations,
        }
    }

    /// Append an undelivered element; intensity is clamped to `[1, 10]`.
    ///
    /// Returns a copy of the stored element.
    pub fn inject(
        &mut self,
        kind: NarrativeKind,
        content: impl Into<String>,
        intensity: i64,
    ) -> NarrativeElement {
        let element = NarrativeElement {
            id: NarrativeId::generate(),
            kind,
            content: content.into(),
            intensity: Intensity::clamped(intensity),
            delivered: false,
            created_at: Utc::now(),
        };
        debug!(
            narrative_id = %element.id,
            ?kind,
            intensity = element.intensity.get(),
            "narrative injected"
        );
        self.channel_mut(kind).push(element.clone());
        element
    }

    /// Latch an element as delivered. Delivering twice is a no-op.
    pub fn mark_delivered(&mut self, id: &NarrativeId) -> Result<&NarrativeElement, CoreError> {
        let element = self
            .scenes
            .iter_mut()
            .chain(self.atmosphere.iter_mut())
            .chain(self.clues.iter_mut())
            .chain(self.revelations.iter_mut())
            .find(|e| &e.id == id)
            .ok_or_else(|| CoreError::NarrativeNotFound(id.clone()))?;
        element.delivered = true;
        Ok(element)
    }

    /// Counts, latest scene, and undelivered elements in channel order.
    pub fn state(&self) -> NarrativeState {
        let pending_narrative = self
            .scenes
            .iter()
            .chain(&self.atmosphere)
            .chain(&self.clues)
            .chain(&self.revelations)
            .filter(|e| !e.delivered)
            .cloned()
            .collect();

        NarrativeState {
            scenes: self.scenes.len(),
            atmosphere: self.atmosphere.len(),
            clues: self.clues.len(),
            revelations: self.revelations.len(),
            recent_scene: self.scenes.last().cloned(),
            pending_narrative,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn routes_by_kind_and_clamps_intensity() {
        let mut queue = NarrativeQueue::new();
        let clue = queue.inject(NarrativeKind::Clue, "a torn page", 40);
        queue.inject(NarrativeKind::Scene, "the docks at night", 0);

        assert_eq!(clue.intensity.get(), 10);
        assert_eq!(queue.channel(NarrativeKind::Clue).len(), 1);
        assert_eq!(queue.channel(NarrativeKind::Scene)[0].intensity.get(), 1);
        assert!(queue.channel(NarrativeKind::Revelation).is_empty());
    }

    #[test]
    fn pending_is_in_channel_order() {
        let mut queue = NarrativeQueue::new();
        queue.inject(NarrativeKind::Revelation, "r1", 5);
        queue.inject(NarrativeKind::Clue, "c1", 5);
        queue.inject(NarrativeKind::Scene, "s1", 5);
        queue.inject(NarrativeKind::Atmosphere, "a1", 5);
        queue.inject(NarrativeKind::Scene, "s2", 5);

        let state = queue.state();
        let order: Vec<_> = state.pending_narrative.iter().map(|e| e.content.as_str()).collect();
        assert_eq!(order, vec!["s1", "s2", "a1", "c1", "r1"]);
        assert_eq!(state.recent_scene.map(|e| e.content), Some(String::from("s2")));
        assert_eq!(state.scenes, 2);
        assert_eq!(state.revelations, 1);
    }

    #[test]
    fn delivered_is_a_one_way_latch() {
        let mut queue = NarrativeQueue::new();
        let id = queue.inject(NarrativeKind::Scene, "s1", 5).id.clone();

        assert!(queue.mark_delivered(&id).unwrap().delivered);
        assert!(queue.mark_delivered(&id).unwrap().delivered);

        let state = queue.state();
        assert!(state.pending_narrative.is_empty());
        // Delivered elements still count and still surface as the recent scene.
        assert_eq!(state.scenes, 1);
        assert!(state.recent_scene.unwrap().delivered);
    }

    #[test]
    fn unknown_element_is_not_found() {
        let mut queue = NarrativeQueue::new();
        let result = queue.mark_delivered(&NarrativeId::new("missing"));
        assert!(matches!(result, Err(CoreError::NarrativeNotFound(_))));
    }
}
