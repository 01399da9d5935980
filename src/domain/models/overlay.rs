#[cfg(test)]
#[path = "overlay_test.rs"]
mod tests;

use serde::Deserialize;
use serde::Serialize;

/// Variables are only published for the first slots of the current story.
pub const CURRENT_STORY_SLOTS: usize = 20;

const GRAPHICS_ID_FIELD: &str = "graphics_id";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayField {
    pub name: String,
    pub value: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

/// A single overlay graphic as returned by the overlay list endpoint. The
/// `slug` is a composite "type/name" (older servers send "type_name")
/// identifier, decomposed with [`split_slug`] wherever it is projected.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayGraphic {
    pub id: String,
    pub story_id: String,
    pub slug: String,
    pub variant: String,
    pub handler_name: String,
    pub description: String,
    #[serde(rename = "in")]
    pub in_time: f64,
    pub duration: f64,
    pub planned_duration: f64,
    pub actual_duration: f64,
    pub fields: Vec<OverlayField>,
}

impl OverlayGraphic {
    pub fn graphics_id(&self) -> String {
        return self
            .fields
            .iter()
            .find(|field| return field.name == GRAPHICS_ID_FIELD)
            .map(|field| return field.value.to_string())
            .unwrap_or_default();
    }
}

/// Splits a template slug into its type and name components. The separator
/// is the first `/`, falling back to the first `_`. A slug with neither
/// separator is all name, no type.
pub fn split_slug(slug: &str) -> (String, String) {
    for separator in ['/', '_'] {
        if let Some((template_type, template_name)) = slug.split_once(separator) {
            return (template_type.to_string(), template_name.to_string());
        }
    }

    return ("".to_string(), slug.to_string());
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlaySlot {
    pub id: String,
    pub template_type: String,
    pub template_name: String,
    pub variant: String,
    pub handler_name: String,
    pub description: String,
    pub graphics_id: String,
    pub duration: f64,
    pub planned_duration: f64,
    pub actual_duration: f64,
}

impl From<&OverlayGraphic> for OverlaySlot {
    fn from(overlay: &OverlayGraphic) -> OverlaySlot {
        let (template_type, template_name) = split_slug(&overlay.slug);

        return OverlaySlot {
            id: overlay.id.to_string(),
            template_type,
            template_name,
            variant: overlay.variant.to_string(),
            handler_name: overlay.handler_name.to_string(),
            description: overlay.description.to_string(),
            graphics_id: overlay.graphics_id(),
            duration: overlay.duration,
            planned_duration: overlay.planned_duration,
            actual_duration: overlay.actual_duration,
        };
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StoryProjection {
    pub story_id: String,
    pub index: usize,
    pub overlay_count: usize,
    pub overlays: Vec<OverlaySlot>,
}

/// What the UI layer receives after every rebuild or take. The current story
/// view is capped at [`CURRENT_STORY_SLOTS`] entries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayProjection {
    pub stories: Vec<StoryProjection>,
    pub current_story_id: String,
    pub current_story: Vec<OverlaySlot>,
    pub last_taken_overlay_id: String,
}
