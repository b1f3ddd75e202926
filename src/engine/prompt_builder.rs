use serde_json::{json, Value};

use crate::engine::narrative_parser::MAX_ACTIONS;
use crate::model::inventory::Inventory;
use crate::model::setup::{Genre, SetupConfig};

/// How many story-log entries a turn request carries.
pub const HISTORY_WINDOW: usize = 5;

pub const IMAGE_STYLE_SUFFIX: &str = "cinematic, ultra detailed, atmospheric lighting";

/// Text sent to the scene service for one request.
///
/// Only formats text. No networking, no parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPayload {
    pub system_instruction: String,
    pub user_content: String,
}

pub fn build_initial_request(config: &SetupConfig) -> RequestPayload {
    let mut user_content = String::new();
    user_content.push_str(&format!(
        "Start a new {} adventure for the player based on the following premise: \"{}\"",
        config.genre, config.premise
    ));

    RequestPayload {
        system_instruction: narrator_instruction(config.genre),
        user_content,
    }
}

/// `story_log` is the log as it stood before the player acted.
pub fn build_turn_request(
    genre: Genre,
    story_log: &[String],
    inventory: &Inventory,
    action: &str,
) -> RequestPayload {
    let mut user_content = String::new();

    push_recent_story(&mut user_content, story_log);
    push_inventory(&mut user_content, inventory);
    push_chosen_action(&mut user_content, action);
    user_content.push_str(&format!(
        "Generate the next scene based on this context, continuing the {genre} adventure.\n"
    ));

    RequestPayload {
        system_instruction: narrator_instruction(genre),
        user_content,
    }
}

pub fn build_image_prompt(image_prompt: &str) -> String {
    format!("{}, {}", image_prompt.trim(), IMAGE_STYLE_SUFFIX)
}

fn narrator_instruction(genre: Genre) -> String {
    format!(
        "You are a master storyteller and game master for a dynamic text-based adventure game. \
Your goal is to create immersive, engaging, and coherent scenarios in a {genre} setting. \
The player is an adventurer. For each turn, you must provide a scene description, \
a list of possible actions, any new inventory items they find, and a descriptive prompt \
for an image generation model to visualize the scene. Respond ONLY in the requested JSON format. \
Keep the story moving and introduce challenges, mysteries, and interesting characters."
    )
}

fn push_recent_story(prompt: &mut String, story_log: &[String]) {
    let start = story_log.len().saturating_sub(HISTORY_WINDOW);
    let recent: Vec<&str> = story_log[start..]
        .iter()
        .rev()
        .map(String::as_str)
        .collect();

    prompt.push_str("STORY SO FAR (most recent events first):\n");
    prompt.push_str(&recent.join("\n---\n"));
    prompt.push_str("\n\n");
}

fn push_inventory(prompt: &mut String, inventory: &Inventory) {
    prompt.push_str("PLAYER INVENTORY:\n");
    prompt.push_str(&format!("[{}]", inventory.as_slice().join(", ")));
    prompt.push_str("\n\n");
}

fn push_chosen_action(prompt: &mut String, action: &str) {
    prompt.push_str("PLAYER'S CHOSEN ACTION:\n");
    prompt.push_str(&format!("\"{action}\""));
    prompt.push_str("\n\n");
}

/// Response schema attached to every scene request.
pub fn scene_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "description": {
                "type": "STRING",
                "description": "A detailed, atmospheric description of the current scene and the outcome of the player's last action, 2-4 sentences."
            },
            "actions": {
                "type": "ARRAY",
                "description": "3-4 concise, compelling actions the player can take next. Each is a short string.",
                "items": { "type": "STRING" },
                "maxItems": MAX_ACTIONS
            },
            "newInventoryItems": {
                "type": "ARRAY",
                "description": "Items the player acquired in this scene. Empty if nothing was found.",
                "items": { "type": "STRING" }
            },
            "imagePrompt": {
                "type": "STRING",
                "description": "A detailed, dramatic prompt for an image generator visualising the scene. Focus on mood, lighting and key elements."
            }
        },
        "required": ["description", "actions", "newInventoryItems", "imagePrompt"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(entries: &[&str]) -> Vec<String> {
        entries.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn initial_request_embeds_genre_and_premise() {
        let config = SetupConfig::new(Genre::Cyberpunk, "Rain sizzles on the asphalt").unwrap();
        let payload = build_initial_request(&config);

        assert!(payload.system_instruction.contains("in a Cyberpunk setting"));
        assert!(payload.user_content.contains("Cyberpunk adventure"));
        assert!(payload.user_content.contains("\"Rain sizzles on the asphalt\""));
    }

    #[test]
    fn turn_request_shows_last_five_entries_newest_first() {
        let story = log(&["one", "> two", "three", "> four", "five", "> six", "seven"]);
        let inventory = Inventory::from_items(log(&["note", "lamp"]));
        let payload = build_turn_request(Genre::Mystery, &story, &inventory, "Open the door");

        let content = &payload.user_content;
        assert!(content.starts_with(
            "STORY SO FAR (most recent events first):\nseven\n---\n> six\n---\nfive\n---\n> four\n---\nthree\n\n"
        ));
        assert!(!content.contains("> two"));
        assert!(content.contains("[note, lamp]"));
        assert!(content.contains("\"Open the door\""));
        assert!(content.contains("continuing the Mystery adventure"));
        assert_eq!(payload.system_instruction, narrator_instruction(Genre::Mystery));
    }

    #[test]
    fn short_history_is_sent_whole() {
        let story = log(&["You wake up..."]);
        let payload = build_turn_request(Genre::Fantasy, &story, &Inventory::default(), "Look around");

        assert!(payload.user_content.contains("first):\nYou wake up...\n\n"));
        assert!(payload.user_content.contains("PLAYER INVENTORY:\n[]"));
    }

    #[test]
    fn image_prompt_gets_style_suffix() {
        assert_eq!(
            build_image_prompt("A misty gate "),
            "A misty gate, cinematic, ultra detailed, atmospheric lighting"
        );
    }

    #[test]
    fn schema_requires_all_four_fields() {
        let schema = scene_response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(required, ["description", "actions", "newInventoryItems", "imagePrompt"]);
        assert_eq!(schema["properties"]["actions"]["maxItems"], 4);
    }
}
