//! Prompt text sent to the model.

use bitlings_core::creature::CreatureType;

/// Comma-separated list of the types the model may assign.
fn type_list() -> String {
    CreatureType::ALL
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// System prompt for stats generation.
pub fn stats_system_prompt() -> String {
    format!(
        "You are a game designer specializing in creating fantasy creature stats and abilities \
         for a creature-collection game called Bitlings. Generate balanced stats and thematically \
         appropriate abilities based on the creature's appearance and description.\n\n\
         Available types: {types}.\n\n\
         Each Bitling must have:\n\
         1. One or two types\n\
         2. Base stats for a level 1 creature\n\
         3. Moves learned at increasing levels (at least 4 moves)\n\n\
         For each move specify name, type, power (0 for status moves, 40-120 for damage moves), \
         accuracy (0-100), pp (5-30), maxPp (same as pp), description, category \
         (\"physical\", \"special\" or \"status\") and levelLearned (1 to 36).",
        types = type_list()
    )
}

/// User prompt for stats generation. The image is attached separately.
pub fn stats_user_prompt(name: &str, description: &str) -> String {
    format!(
        r#"Create detailed stats and abilities for a Bitling named "{name}" with this description: "{description}".

Analyze the image carefully and answer with a single JSON object in this format:
{{
  "types": ["primary_type", "secondary_type"],
  "stats": {{ "hp": 30-80, "attack": 30-80, "defense": 30-80, "speed": 30-80 }},
  "description": "A brief description based on appearance (1-2 sentences)",
  "behavior": "How the Bitling behaves in its natural habitat",
  "moves": [
    {{
      "name": "Move Name",
      "type": "one of the available types",
      "power": 0-120,
      "accuracy": 0-100,
      "pp": 5-30,
      "maxPp": 5-30,
      "description": "Brief description of the move",
      "category": "physical/special/status",
      "levelLearned": 1-36
    }}
  ]
}}

Choose types from: {types}. Learn moves at increasing levels (1, 5, 10, 15, ...)."#,
        types = type_list()
    )
}

/// Wrap a user's image prompt with the house art direction.
pub fn enhance_image_prompt(prompt: &str) -> String {
    format!(
        "A cute fantasy creature character design: {}. Pixel art style, game sprite, vibrant \
         colors, white background, centered composition.",
        prompt.trim()
    )
}
