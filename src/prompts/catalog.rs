//! Built-in writing prompts, three per category.

use crate::journal::types::{JournalPrompt, PromptCategory};

const CATALOG: &[(&str, &str, PromptCategory)] = &[
    ("proud", "What are you most proud of today?", PromptCategory::Reflection),
    ("learned", "What's something new you learned recently?", PromptCategory::Reflection),
    ("challenge", "What challenge did you overcome this week?", PromptCategory::Reflection),
    ("grateful", "List three things you're grateful for today.", PromptCategory::Gratitude),
    ("person", "Who made a positive impact on your life recently and why?", PromptCategory::Gratitude),
    ("simple", "What simple pleasure brought you joy today?", PromptCategory::Gratitude),
    ("improve", "What's one thing you'd like to improve about yourself?", PromptCategory::Growth),
    ("boundary", "Have you set any new boundaries recently? How did it feel?", PromptCategory::Growth),
    ("comfort", "What took you out of your comfort zone recently?", PromptCategory::Growth),
    ("achievement", "What's one small win you had today?", PromptCategory::Goals),
    ("next-step", "What's the next step towards your biggest goal?", PromptCategory::Goals),
    ("future", "Where do you see yourself in 6 months? What can you do today to get there?", PromptCategory::Goals),
    ("create", "What did you create or express recently?", PromptCategory::Creativity),
    ("inspire", "What's inspiring you lately?", PromptCategory::Creativity),
    ("dream", "If you had unlimited resources, what would you create?", PromptCategory::Creativity),
];

fn to_prompt(&(id, question, category): &(&str, &str, PromptCategory)) -> JournalPrompt {
    JournalPrompt {
        id: id.to_string(),
        question: question.to_string(),
        category,
    }
}

/// Every built-in prompt, grouped by category in [`PromptCategory::ALL`] order.
pub fn all() -> Vec<JournalPrompt> {
    CATALOG.iter().map(to_prompt).collect()
}

pub fn for_category(category: PromptCategory) -> Vec<JournalPrompt> {
    CATALOG
        .iter()
        .filter(|(_, _, c)| *c == category)
        .map(to_prompt)
        .collect()
}

/// Deterministic pick: the `seed`-th prompt of `category`, wrapping around.
pub fn select(category: PromptCategory, seed: usize) -> JournalPrompt {
    let matching: Vec<_> = CATALOG.iter().filter(|(_, _, c)| *c == category).collect();
    to_prompt(matching[seed % matching.len()])
}
