// The element-generation flow: a two-step structured-JSON contract against
// the Gemini API (validate the free-text input, then fetch shell data for
// the canonical element). The request runs on the async compute task pool
// and is polled once per frame; the UI keeps at most one request in flight.

use crate::resources::{CurrentElement, ElementShellData, GenerationState};
use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use futures_lite::future;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const GEMINI_MODEL: &str = "gemini-2.5-flash";
const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Request a diagram for a free-text element query (name, symbol, or atomic
/// number).
#[derive(Event, Debug)]
pub struct GenerateElementEvent(pub String);

#[derive(Component)]
struct GenerationTask(Task<Result<ElementShellData, GenerationError>>);

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("element input is empty")]
    EmptyInput,
    #[error("\"{0}\" is not a recognized chemical element")]
    NotAnElement(String),
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl GenerationError {
    /// The user-facing message. Transport and parse failures collapse into
    /// one generic line; the invalid-input and not-an-element cases stay
    /// distinct.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyInput => {
                "Please enter an element name, symbol, or atomic number.".to_string()
            }
            Self::NotAnElement(input) => format!(
                "\"{input}\" is not a recognized chemical element. Please try again."
            ),
            Self::MissingApiKey | Self::Transport(_) | Self::Malformed(_) => {
                "Could not generate diagram. There might have been an API error. Please try again."
                    .to_string()
            }
        }
    }
}

pub struct GenerationPlugin;

impl Plugin for GenerationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<GenerateElementEvent>()
            .add_systems(Update, (trigger_generation, poll_generation_task));
    }
}

/// GEMINI_API_KEY from the process environment, falling back to a value
/// baked in at build time. The web target has no process environment, so
/// the baked-in value is the only option there.
fn resolve_api_key() -> Option<String> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.is_empty() => Some(key),
        _ => option_env!("GEMINI_API_KEY").map(str::to_string),
    }
}

fn trigger_generation(
    mut commands: Commands,
    mut events: EventReader<GenerateElementEvent>,
    mut state: ResMut<GenerationState>,
    mut current: ResMut<CurrentElement>,
) {
    let Some(event) = events.read().last() else {
        return;
    };
    if state.in_flight {
        // The Generate control is disabled while a request is outstanding,
        // so this only happens if two triggers race within one frame.
        warn!("Ignoring generation request while another is in flight.");
        return;
    }

    // No partial state: the previous result is gone before the attempt starts.
    current.0 = None;
    state.error = None;

    let query = event.0.trim().to_string();
    if query.is_empty() {
        state.error = Some(GenerationError::EmptyInput.user_message());
        return;
    }

    let Some(api_key) = resolve_api_key() else {
        error!("{API_KEY_ENV} is not set; cannot call the generation API.");
        state.error = Some(GenerationError::MissingApiKey.user_message());
        return;
    };

    info!("Requesting Bohr diagram data for '{}'", query);
    state.in_flight = true;
    let task = AsyncComputeTaskPool::get().spawn(async move {
        #[cfg(not(target_arch = "wasm32"))]
        {
            generate_element(&api_key, &query)
        }
        #[cfg(target_arch = "wasm32")]
        {
            generate_element(&api_key, &query).await
        }
    });
    commands.spawn(GenerationTask(task));
}

fn poll_generation_task(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut GenerationTask)>,
    mut state: ResMut<GenerationState>,
    mut current: ResMut<CurrentElement>,
) {
    for (entity, mut task) in &mut tasks {
        let Some(result) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };
        commands.entity(entity).despawn();
        state.in_flight = false;
        match result {
            Ok(data) => {
                info!(
                    "Generated shell data for {} ({}): [{}]",
                    data.name,
                    data.symbol,
                    data.configuration_string()
                );
                current.0 = Some(data);
            }
            Err(err) => {
                error!("Element generation failed: {err}");
                state.error = Some(err.user_message());
            }
        }
    }
}

// --- Wire types ---

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ValidationVerdict {
    is_valid: bool,
    canonical_name: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ElementResponse {
    name: String,
    symbol: String,
    atomic_number: i64,
    electrons_per_shell: Vec<i64>,
}

impl TryFrom<ElementResponse> for ElementShellData {
    type Error = GenerationError;

    fn try_from(response: ElementResponse) -> Result<Self, Self::Error> {
        if let Some(count) = response.electrons_per_shell.iter().find(|&&c| c < 0) {
            return Err(GenerationError::Malformed(format!(
                "negative electron count {count} for {}",
                response.name
            )));
        }
        Ok(Self {
            name: response.name,
            symbol: response.symbol,
            atomic_number: response.atomic_number,
            electrons_per_shell: response.electrons_per_shell,
        })
    }
}

// --- Gemini structured-JSON calls ---

fn endpoint_url(api_key: &str) -> String {
    format!("{GEMINI_API_BASE}/{GEMINI_MODEL}:generateContent?key={api_key}")
}

fn request_body(prompt: &str, response_schema: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema,
        }
    })
}

fn validation_prompt(query: &str) -> String {
    format!(
        "Is \"{query}\" a valid chemical element from the periodic table? \
         If so, provide its canonical name."
    )
}

fn diagram_prompt(canonical_name: &str) -> String {
    format!(
        "Generate the data for a Bohr diagram for the element \"{canonical_name}\". \
         Provide the element name, symbol, atomic number, and an array of the number \
         of electrons in each shell for a neutral atom, starting with the innermost \
         shell."
    )
}

fn parse_structured<T: DeserializeOwned>(
    response: &serde_json::Value,
) -> Result<T, GenerationError> {
    let text = extract_text(response)?;
    serde_json::from_str(&text).map_err(|e| GenerationError::Malformed(e.to_string()))
}

// The blocking client carries its own internal runtime, so the request can
// run directly on a compute-pool thread; the async client needs an external
// reactor this binary does not have.
#[cfg(not(target_arch = "wasm32"))]
fn generate_element(api_key: &str, query: &str) -> Result<ElementShellData, GenerationError> {
    let client = reqwest::blocking::Client::new();

    // Step 1: is this a real element?
    let verdict: ValidationVerdict = call_structured(
        &client,
        api_key,
        &validation_prompt(query),
        validation_schema(),
    )?;
    if !verdict.is_valid {
        return Err(GenerationError::NotAnElement(query.to_string()));
    }

    // Step 2: shell data for the validated element.
    let response: ElementResponse = call_structured(
        &client,
        api_key,
        &diagram_prompt(&verdict.canonical_name),
        diagram_schema(),
    )?;
    response.try_into()
}

#[cfg(not(target_arch = "wasm32"))]
fn call_structured<T: DeserializeOwned>(
    client: &reqwest::blocking::Client,
    api_key: &str,
    prompt: &str,
    response_schema: serde_json::Value,
) -> Result<T, GenerationError> {
    let response = client
        .post(endpoint_url(api_key))
        .json(&request_body(prompt, response_schema))
        .send()?
        .error_for_status()?
        .json::<serde_json::Value>()?;
    parse_structured(&response)
}

#[cfg(target_arch = "wasm32")]
async fn generate_element(
    api_key: &str,
    query: &str,
) -> Result<ElementShellData, GenerationError> {
    let client = reqwest::Client::new();

    // Step 1: is this a real element?
    let verdict: ValidationVerdict = call_structured(
        &client,
        api_key,
        &validation_prompt(query),
        validation_schema(),
    )
    .await?;
    if !verdict.is_valid {
        return Err(GenerationError::NotAnElement(query.to_string()));
    }

    // Step 2: shell data for the validated element.
    let response: ElementResponse = call_structured(
        &client,
        api_key,
        &diagram_prompt(&verdict.canonical_name),
        diagram_schema(),
    )
    .await?;
    response.try_into()
}

#[cfg(target_arch = "wasm32")]
async fn call_structured<T: DeserializeOwned>(
    client: &reqwest::Client,
    api_key: &str,
    prompt: &str,
    response_schema: serde_json::Value,
) -> Result<T, GenerationError> {
    let response = client
        .post(endpoint_url(api_key))
        .json(&request_body(prompt, response_schema))
        .send()
        .await?
        .error_for_status()?
        .json::<serde_json::Value>()
        .await?;
    parse_structured(&response)
}

/// Pulls the concatenated text parts out of the first candidate.
fn extract_text(response: &serde_json::Value) -> Result<String, GenerationError> {
    let parts = response["candidates"]
        .get(0)
        .and_then(|candidate| candidate["content"]["parts"].as_array())
        .ok_or_else(|| GenerationError::Malformed("no candidates in response".to_string()))?;

    let mut text = String::new();
    for part in parts {
        if let Some(fragment) = part["text"].as_str() {
            text.push_str(fragment);
        }
    }
    if text.is_empty() {
        return Err(GenerationError::Malformed("empty candidate text".to_string()));
    }
    Ok(text)
}

fn validation_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "isValid": {
                "type": "BOOLEAN",
                "description": "Whether the input corresponds to a valid chemical element."
            },
            "canonicalName": {
                "type": "STRING",
                "description": "The canonical name of the element (e.g., 'Carbon', \
                    'Hydrogen'). Returns an empty string if not valid."
            }
        },
        "required": ["isValid", "canonicalName"]
    })
}

fn diagram_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "symbol": { "type": "STRING" },
            "atomicNumber": { "type": "INTEGER" },
            "electronsPerShell": {
                "type": "ARRAY",
                "items": { "type": "INTEGER" }
            }
        },
        "required": ["name", "symbol", "atomicNumber", "electronsPerShell"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<GenerateElementEvent>()
            .init_resource::<CurrentElement>()
            .init_resource::<GenerationState>()
            .add_systems(Update, trigger_generation);
        app
    }

    #[test]
    fn extracts_text_from_candidates() {
        let response = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "{\"isValid\": " },
                        { "text": "true, \"canonicalName\": \"Carbon\"}" }
                    ]
                }
            }]
        });
        let text = extract_text(&response).unwrap();
        let verdict: ValidationVerdict = serde_json::from_str(&text).unwrap();
        assert!(verdict.is_valid);
        assert_eq!(verdict.canonical_name, "Carbon");
    }

    #[test]
    fn missing_candidates_is_malformed() {
        let response = serde_json::json!({ "error": { "code": 400 } });
        assert!(matches!(
            extract_text(&response),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[test]
    fn parse_structured_reads_a_full_response() {
        let response = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": "{\"isValid\": false, \"canonicalName\": \"\"}" }]
                }
            }]
        });
        let verdict: ValidationVerdict = parse_structured(&response).unwrap();
        assert!(!verdict.is_valid);
        assert!(verdict.canonical_name.is_empty());
    }

    #[test]
    fn request_body_carries_prompt_and_schema() {
        let body = request_body("is carbon real?", validation_schema());
        assert_eq!(body["contents"][0]["parts"][0]["text"], "is carbon real?");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn element_response_parses_camel_case() {
        let json = r#"{
            "name": "Carbon",
            "symbol": "C",
            "atomicNumber": 6,
            "electronsPerShell": [2, 4]
        }"#;
        let response: ElementResponse = serde_json::from_str(json).unwrap();
        let data = ElementShellData::try_from(response).unwrap();
        assert_eq!(data.atomic_number, 6);
        assert_eq!(data.electrons_per_shell, vec![2, 4]);
        assert_eq!(data.configuration_string(), "2, 4");
    }

    #[test]
    fn negative_shell_count_is_rejected() {
        let response = ElementResponse {
            name: "Bogus".to_string(),
            symbol: "Bg".to_string(),
            atomic_number: 1,
            electrons_per_shell: vec![2, -3],
        };
        assert!(matches!(
            ElementShellData::try_from(response),
            Err(GenerationError::Malformed(_))
        ));
    }

    #[test]
    fn request_while_in_flight_is_ignored() {
        let mut app = minimal_app();
        app.world_mut().resource_mut::<GenerationState>().in_flight = true;
        app.world_mut()
            .send_event(GenerateElementEvent("Carbon".to_string()));
        app.update();

        // No second task, and the outstanding request's state is untouched.
        let mut tasks = app.world_mut().query::<&GenerationTask>();
        assert_eq!(tasks.iter(app.world()).count(), 0);
        let state = app.world().resource::<GenerationState>();
        assert!(state.in_flight);
        assert!(state.error.is_none());
    }

    #[test]
    fn empty_input_fails_without_spawning_a_task() {
        let mut app = minimal_app();
        app.world_mut()
            .send_event(GenerateElementEvent("   ".to_string()));
        app.update();

        let mut tasks = app.world_mut().query::<&GenerationTask>();
        assert_eq!(tasks.iter(app.world()).count(), 0);
        let state = app.world().resource::<GenerationState>();
        assert!(!state.in_flight);
        assert_eq!(
            state.error.as_deref(),
            Some(GenerationError::EmptyInput.user_message().as_str())
        );
        assert!(app.world().resource::<CurrentElement>().0.is_none());
    }

    #[test]
    fn user_messages_follow_the_taxonomy() {
        assert!(
            GenerationError::NotAnElement("bogus".to_string())
                .user_message()
                .contains("bogus")
        );
        // Transport and parse failures collapse into one generic message.
        let parse = GenerationError::Malformed("oops".to_string()).user_message();
        let key = GenerationError::MissingApiKey.user_message();
        assert_eq!(parse, key);
        assert!(parse.starts_with("Could not generate diagram."));
    }
}
