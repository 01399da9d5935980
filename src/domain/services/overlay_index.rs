#[cfg(test)]
#[path = "overlay_index_test.rs"]
mod tests;

use std::collections::HashMap;

use crate::domain::models::BridgeError;
use crate::domain::models::OverlayGraphic;
use crate::domain::models::OverlayProjection;
use crate::domain::models::OverlaySlot;
use crate::domain::models::StoryProjection;
use crate::domain::models::CURRENT_STORY_SLOTS;

/// Overlay graphics grouped by story, with a navigable story cursor and the
/// most recently taken overlay. Rebuilt wholesale on every refresh, never
/// merged with the previous snapshot.
///
/// Story order is the order of first appearance in the feed, tracked in an
/// explicit list rather than map iteration order.
#[derive(Default)]
pub struct OverlayIndex {
    by_story: HashMap<String, Vec<OverlayGraphic>>,
    story_list: Vec<String>,
    current_story_id: String,
    last_taken_overlay_id: String,
}

impl OverlayIndex {
    pub fn story_list(&self) -> &[String] {
        return &self.story_list;
    }

    pub fn current_story_id(&self) -> &str {
        return &self.current_story_id;
    }

    pub fn last_taken_overlay_id(&self) -> &str {
        return &self.last_taken_overlay_id;
    }

    pub fn overlays_for(&self, story_id: &str) -> &[OverlayGraphic] {
        return self
            .by_story
            .get(story_id)
            .map(|overlays| return overlays.as_slice())
            .unwrap_or(&[]);
    }

    /// Overlays of the story under the cursor. A cursor left pointing at a
    /// story that dropped out of the feed yields an empty slice; the cursor
    /// itself is deliberately not reset on refresh.
    pub fn current_overlays(&self) -> &[OverlayGraphic] {
        return self.overlays_for(&self.current_story_id);
    }

    /// Folds a completed overlay fetch into the index. A failed fetch keeps
    /// the existing index, stale data beats no data.
    pub fn apply_refresh(&mut self, outcome: Result<Vec<OverlayGraphic>, BridgeError>) -> bool {
        match outcome {
            Ok(overlays) => {
                self.rebuild(overlays);
                return true;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Overlay refresh failed, keeping previous index");
                return false;
            }
        }
    }

    pub fn rebuild(&mut self, overlays: Vec<OverlayGraphic>) {
        self.by_story.clear();
        self.story_list.clear();

        for overlay in overlays {
            if !self.by_story.contains_key(&overlay.story_id) {
                self.story_list.push(overlay.story_id.to_string());
            }

            self.by_story
                .entry(overlay.story_id.to_string())
                .or_default()
                .push(overlay);
        }

        if self.current_story_id.is_empty() {
            if let Some(first) = self.story_list.first() {
                self.current_story_id = first.to_string();
            }
        }
    }

    pub fn select_story(&mut self, story_id: &str) {
        if !self.story_list.iter().any(|id| return id == story_id) {
            return;
        }

        self.current_story_id = story_id.to_string();
    }

    pub fn next_story(&mut self) {
        self.rotate(1);
    }

    pub fn previous_story(&mut self) {
        self.rotate(-1);
    }

    pub fn record_take(&mut self, overlay_id: &str) {
        self.last_taken_overlay_id = overlay_id.to_string();
    }

    pub fn projection(&self) -> OverlayProjection {
        let stories = self
            .story_list
            .iter()
            .enumerate()
            .map(|(index, story_id)| {
                let overlays = self.overlays_for(story_id);

                return StoryProjection {
                    story_id: story_id.to_string(),
                    index,
                    overlay_count: overlays.len(),
                    overlays: overlays.iter().map(OverlaySlot::from).collect(),
                };
            })
            .collect();

        let current_story = self
            .current_overlays()
            .iter()
            .take(CURRENT_STORY_SLOTS)
            .map(OverlaySlot::from)
            .collect();

        return OverlayProjection {
            stories,
            current_story_id: self.current_story_id.to_string(),
            current_story,
            last_taken_overlay_id: self.last_taken_overlay_id.to_string(),
        };
    }

    fn rotate(&mut self, step: i64) {
        if self.story_list.is_empty() {
            return;
        }

        let len = self.story_list.len() as i64;
        let position = self
            .story_list
            .iter()
            .position(|id| return id == &self.current_story_id)
            .unwrap_or(0) as i64;

        let next = (position + step).rem_euclid(len) as usize;
        self.current_story_id = self.story_list[next].to_string();
    }
}
