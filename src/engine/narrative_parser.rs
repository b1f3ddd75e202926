use serde::Deserialize;

use crate::engine::error::AdventureError;
use crate::model::scene::SceneUpdate;

pub const MAX_ACTIONS: usize = 4;

/// Wire shape of a scene response. Every field is required.
#[derive(Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct RawScene {
    description: String,
    actions: Vec<String>,
    new_inventory_items: Vec<String>,
    image_prompt: String,
}

/// Decode the scene service's JSON into a `SceneUpdate`.
///
/// The service is untrusted: anything outside the agreed shape is rejected
/// rather than patched up.
pub fn parse_scene_response(raw: &str) -> Result<SceneUpdate, AdventureError> {
    let scene: RawScene = serde_json::from_str(raw.trim())?;

    let narration = required_text("description", scene.description)?;
    let image_prompt = required_text("imagePrompt", scene.image_prompt)?;

    if scene.actions.len() > MAX_ACTIONS {
        return Err(AdventureError::MalformedResponse(format!(
            "expected at most {MAX_ACTIONS} actions, got {}",
            scene.actions.len()
        )));
    }

    let actions = scene
        .actions
        .into_iter()
        .map(|a| required_text("actions", a))
        .collect::<Result<Vec<_>, _>>()?;

    let new_inventory_items = scene
        .new_inventory_items
        .into_iter()
        .map(|i| required_text("newInventoryItems", i))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SceneUpdate {
        narration,
        actions,
        new_inventory_items,
        image_prompt,
    })
}

fn required_text(field: &str, value: String) -> Result<String, AdventureError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AdventureError::MalformedResponse(format!(
            "`{field}` contains a blank string"
        )));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_malformed(result: Result<SceneUpdate, AdventureError>) -> bool {
        matches!(result, Err(AdventureError::MalformedResponse(_)))
    }

    #[test]
    fn parses_a_well_formed_scene() {
        let raw = r#"{
            "description": "You wake up...",
            "actions": ["Look around", " Check pockets "],
            "newInventoryItems": ["note"],
            "imagePrompt": "A dim tavern at dawn"
        }"#;

        let update = parse_scene_response(raw).unwrap();
        assert_eq!(update.narration, "You wake up...");
        assert_eq!(update.actions, vec!["Look around", "Check pockets"]);
        assert_eq!(update.new_inventory_items, vec!["note"]);
        assert_eq!(update.image_prompt, "A dim tavern at dawn");
    }

    #[test]
    fn empty_lists_are_allowed() {
        let raw = r#"{"description":"The end.","actions":[],"newInventoryItems":[],"imagePrompt":"A closing door"}"#;
        let update = parse_scene_response(raw).unwrap();
        assert!(update.actions.is_empty());
        assert!(update.new_inventory_items.is_empty());
    }

    #[test]
    fn missing_field_is_malformed() {
        let raw = r#"{"description":"x","actions":[],"imagePrompt":"y"}"#;
        assert!(is_malformed(parse_scene_response(raw)));
    }

    #[test]
    fn unknown_field_is_malformed() {
        let raw = r#"{"description":"x","actions":[],"newInventoryItems":[],"imagePrompt":"y","mood":"grim"}"#;
        assert!(is_malformed(parse_scene_response(raw)));
    }

    #[test]
    fn wrong_types_are_malformed() {
        let raw = r#"{"description":"x","actions":"run","newInventoryItems":[],"imagePrompt":"y"}"#;
        assert!(is_malformed(parse_scene_response(raw)));
        assert!(is_malformed(parse_scene_response("not json at all")));
        assert!(is_malformed(parse_scene_response("[]")));
    }

    #[test]
    fn too_many_actions_is_malformed() {
        let raw = r#"{"description":"x","actions":["a","b","c","d","e"],"newInventoryItems":[],"imagePrompt":"y"}"#;
        assert!(is_malformed(parse_scene_response(raw)));
    }

    #[test]
    fn blank_strings_are_malformed() {
        let blank_narration = r#"{"description":"  ","actions":[],"newInventoryItems":[],"imagePrompt":"y"}"#;
        let blank_action = r#"{"description":"x","actions":[""],"newInventoryItems":[],"imagePrompt":"y"}"#;
        let blank_item = r#"{"description":"x","actions":[],"newInventoryItems":[" "],"imagePrompt":"y"}"#;

        assert!(is_malformed(parse_scene_response(blank_narration)));
        assert!(is_malformed(parse_scene_response(blank_action)));
        assert!(is_malformed(parse_scene_response(blank_item)));
    }
}
