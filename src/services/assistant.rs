use super::cache::ResponseCache;
use super::completion::{CompletionClient, CompletionError};
use super::prompts;
use crate::models::{Goal, JournalEntry, Todo};
use serde_json::{json, Map, Value};

pub type AiResult<T> = Result<T, CompletionError>;
pub type AiObject = Map<String, Value>;

pub const SUGGESTIONS_UNAVAILABLE: &str = "Unable to generate suggestions at this time.";
const UNABLE_TO_ANALYZE: &str = "Unable to analyze";
const ERROR_IN_ANALYSIS: &str = "Error in analysis";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseCase {
    TodoSuggestions,
    JournalAnalysis,
    GoalImprovements,
    ProductivityInsights,
}

impl UseCase {
    pub fn name(self) -> &'static str {
        match self {
            Self::TodoSuggestions => "todo_suggestions",
            Self::JournalAnalysis => "journal_analysis",
            Self::GoalImprovements => "goal_improvements",
            Self::ProductivityInsights => "productivity_insights",
        }
    }

    fn system_prompt(self) -> &'static str {
        match self {
            Self::TodoSuggestions => prompts::TODO_SYSTEM_PROMPT,
            Self::JournalAnalysis => prompts::JOURNAL_SYSTEM_PROMPT,
            Self::GoalImprovements => prompts::GOAL_SYSTEM_PROMPT,
            Self::ProductivityInsights => prompts::INSIGHTS_SYSTEM_PROMPT,
        }
    }

    /// Canned "unable to analyze" value. Parse failures and call failures are
    /// worded differently so a reader of the response can tell them apart.
    pub fn placeholder(self, error: &CompletionError) -> Value {
        let reason = if error.is_parse() {
            UNABLE_TO_ANALYZE
        } else {
            ERROR_IN_ANALYSIS
        };
        match self {
            Self::TodoSuggestions => json!([SUGGESTIONS_UNAVAILABLE]),
            Self::JournalAnalysis => json!({
                "mood": "neutral",
                "themes": [reason],
                "action_items": [],
                "emotional_patterns": [],
            }),
            Self::GoalImprovements => json!({
                "smart_criteria": reason,
                "milestones": [],
                "resources": [],
                "risks": [],
            }),
            Self::ProductivityInsights => json!({
                "patterns": [reason],
                "improvements": [],
                "highlights": [],
                "next_steps": [],
            }),
        }
    }
}

/// One suggestion per non-blank line, in order.
pub fn parse_suggestions(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strict JSON object parse, tolerating a surrounding markdown code fence.
pub fn parse_json_object(raw: &str) -> AiResult<AiObject> {
    let cleaned = raw
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    match serde_json::from_str::<Value>(cleaned) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(CompletionError::Parse(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(CompletionError::Parse(e.to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub fn resolve_suggestions(result: AiResult<Vec<String>>) -> Vec<String> {
    result.unwrap_or_else(|e| {
        log::warn!("Error generating todo suggestions: {}", e);
        vec![SUGGESTIONS_UNAVAILABLE.to_string()]
    })
}

pub fn resolve_object(use_case: UseCase, result: AiResult<AiObject>) -> Value {
    match result {
        Ok(map) => Value::Object(map),
        Err(e) => {
            log::warn!("AI {} failed, using placeholder: {}", use_case.name(), e);
            use_case.placeholder(&e)
        }
    }
}

/// Prompt construction, provider call, optional caching and parsing for every use case.
#[derive(Debug, Clone)]
pub struct Assistant {
    client: CompletionClient,
    cache: Option<ResponseCache>,
}

impl Assistant {
    pub fn new(client: CompletionClient, cache: Option<ResponseCache>) -> Self {
        Self { client, cache }
    }

    pub async fn todo_suggestions(
        &self,
        title: &str,
        description: Option<&str>,
    ) -> AiResult<Vec<String>> {
        let prompt = prompts::todo_suggestions_prompt(title, description);
        self.run(UseCase::TodoSuggestions, &prompt, |raw| Ok(parse_suggestions(raw)))
            .await
    }

    pub async fn journal_analysis(&self, content: &str) -> AiResult<AiObject> {
        let prompt = prompts::journal_analysis_prompt(content);
        self.run(UseCase::JournalAnalysis, &prompt, parse_json_object)
            .await
    }

    pub async fn goal_improvements(
        &self,
        title: &str,
        description: Option<&str>,
    ) -> AiResult<AiObject> {
        let prompt = prompts::goal_improvements_prompt(title, description);
        self.run(UseCase::GoalImprovements, &prompt, parse_json_object)
            .await
    }

    pub async fn productivity_insights(
        &self,
        todos: &[Todo],
        journal_entries: &[JournalEntry],
        goals: &[Goal],
    ) -> AiResult<AiObject> {
        let prompt = prompts::productivity_insights_prompt(todos, journal_entries, goals);
        self.run(UseCase::ProductivityInsights, &prompt, parse_json_object)
            .await
    }

    async fn run<T>(
        &self,
        use_case: UseCase,
        prompt: &str,
        parse: impl Fn(&str) -> AiResult<T>,
    ) -> AiResult<T> {
        // Entries are scoped to the endpoint, model and system prompt.
        let key = ResponseCache::key(
            use_case.name(),
            &format!(
                "{}\n{}\n{}\n{}",
                self.client.endpoint(),
                self.client.model(),
                use_case.system_prompt(),
                prompt
            ),
        );

        if let Some(cache) = &self.cache {
            if let Some(raw) = cache.get(&key).await {
                match parse(&raw) {
                    Ok(value) => {
                        log::debug!("AI {} served from cache", use_case.name());
                        return Ok(value);
                    }
                    Err(e) => log::warn!("Discarding unparseable cached {}: {}", use_case.name(), e),
                }
            }
        }

        let raw = self
            .client
            .complete(use_case.system_prompt(), prompt)
            .await?;
        let value = parse(&raw)?;

        if let Some(cache) = &self.cache {
            cache.put(&key, &raw).await;
        }

        Ok(value)
    }
}
