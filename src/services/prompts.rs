//! Prompt templates for every assistant use case.
//!
//! All functions are pure: the same inputs always produce the same prompt, so
//! they double as cache-key material and can be tested without a provider.

use crate::models::{Goal, JournalEntry, Todo};
use serde_json::{json, Value};

pub const TODO_SYSTEM_PROMPT: &str = "You are a productivity assistant.";
pub const JOURNAL_SYSTEM_PROMPT: &str = "You are an empathetic journal analyzer.";
pub const GOAL_SYSTEM_PROMPT: &str = "You are a goal-setting expert.";
pub const INSIGHTS_SYSTEM_PROMPT: &str = "You are a productivity analyst.";

const NO_DESCRIPTION: &str = "No description provided";

fn describe(description: Option<&str>) -> &str {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(NO_DESCRIPTION)
}

pub fn todo_suggestions_prompt(title: &str, description: Option<&str>) -> String {
    format!(
        "Given this todo item:
Title: {title}
Description: {description}

Please provide 3 smart suggestions to enhance this todo item, considering:
1. Priority and urgency
2. Potential subtasks
3. Related resources or contacts

Format the response as a list of suggestions, one per line.",
        description = describe(description),
    )
}

pub fn journal_analysis_prompt(content: &str) -> String {
    format!(
        "Analyze this journal entry and provide insights:
{content}

Please provide:
1. Overall mood
2. Key themes
3. Action items or follow-ups
4. Emotional patterns

Respond ONLY with a JSON object with the keys \"mood\", \"themes\", \"action_items\" and \"emotional_patterns\"."
    )
}

pub fn goal_improvements_prompt(title: &str, description: Option<&str>) -> String {
    format!(
        "Analyze this goal and provide improvement suggestions:
Title: {title}
Description: {description}

Please provide:
1. SMART criteria analysis
2. Potential milestones
3. Resource recommendations
4. Risk factors

Respond ONLY with a JSON object with the keys \"smart_criteria\", \"milestones\", \"resources\" and \"risks\".",
        description = describe(description),
    )
}

fn flatten_todos(todos: &[Todo]) -> Value {
    todos
        .iter()
        .map(|t| {
            json!({
                "title": t.title,
                "description": t.description,
                "priority": t.priority,
                "due_date": t.due_date,
                "completed": t.completed,
            })
        })
        .collect()
}

fn flatten_entries(entries: &[JournalEntry]) -> Value {
    entries
        .iter()
        .map(|e| {
            json!({
                "content": e.content,
                "mood": e.mood,
                "tags": e.tags,
                "created_at": e.created_at,
            })
        })
        .collect()
}

fn flatten_goals(goals: &[Goal]) -> Value {
    goals
        .iter()
        .map(|g| {
            json!({
                "title": g.title,
                "description": g.description,
                "target_date": g.target_date,
                "progress": g.progress,
                "status": g.status,
            })
        })
        .collect()
}

pub fn productivity_insights_prompt(
    todos: &[Todo],
    journal_entries: &[JournalEntry],
    goals: &[Goal],
) -> String {
    format!(
        "Analyze this user's productivity data and provide insights:

Todos: {todos}
Journal Entries: {journal_entries}
Goals: {goals}

Please provide:
1. Productivity patterns
2. Areas for improvement
3. Achievement highlights
4. Recommended next steps

Respond ONLY with a JSON object with the keys \"patterns\", \"improvements\", \"highlights\" and \"next_steps\".",
        todos = flatten_todos(todos),
        journal_entries = flatten_entries(journal_entries),
        goals = flatten_goals(goals),
    )
}
