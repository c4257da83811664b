//! Fixed instructions and the sample prompts shown at startup.

use tracing::info;

/// System-level instruction sent at the start of every turn.
pub const SYSTEM_PROMPT: &str = "You are a assistant who can use tools to answer user questions.";

/// Prompts that exercise each tool family.
pub const EXAMPLE_PROMPTS: [&str; 4] = [
    "what is 3 plus 8",
    "there were 2 apples in the box, then 10 more apples were added, and then 3 apples were stolen twice. how many apples are left in the box in total",
    "how many days until the new year",
    "what was the total damage in the first quarter of 2025",
];

pub fn log_example_prompts() {
    for prompt in EXAMPLE_PROMPTS {
        info!("{}", prompt);
    }
}
