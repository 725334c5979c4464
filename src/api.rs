// API client module: a small blocking HTTP client for the three public
// lookup services (dictionary, recipes, books). Each call is one GET; the
// JSON body is decoded into the few fields the scripts print.

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::config::Settings;

/// The lookups the scripts need. `ApiClient` is the real implementation;
/// tests substitute canned answers.
pub trait Lookup {
    /// First definition of `word`, or `None` when the service has no entry.
    fn define(&self, word: &str) -> Result<Option<String>>;

    /// First meal matching `dish`, or `None` when nothing matched.
    fn find_recipe(&self, dish: &str) -> Result<Option<Meal>>;

    fn search_books(&self, query: &str) -> Result<VolumeSearch>;
}

/// Holds a reqwest blocking client and the endpoints from `Settings`.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    settings: Settings,
}

/// One dictionary entry. Only the path to the first definition is kept.
#[derive(Deserialize, Debug)]
pub struct DictionaryEntry {
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

#[derive(Deserialize, Debug)]
pub struct Meaning {
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

#[derive(Deserialize, Debug)]
pub struct Definition {
    #[serde(default)]
    pub definition: Option<String>,
}

/// Recipe search response. `meals` is `null` when nothing matched. Meals
/// stay raw JSON so only the first one has to decode.
#[derive(Deserialize, Debug, Default)]
pub struct MealSearch {
    #[serde(default)]
    pub meals: Option<Vec<serde_json::Value>>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Meal {
    #[serde(rename = "strMeal", default)]
    pub name: Option<String>,
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
}

/// Book search response. `items` is absent when the query matched nothing.
#[derive(Deserialize, Debug, Default)]
pub struct VolumeSearch {
    #[serde(default)]
    pub items: Option<Vec<Volume>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Volume {
    #[serde(rename = "volumeInfo", default)]
    pub volume_info: Option<VolumeInfo>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub publisher: Option<String>,
    pub description: Option<String>,
}

/// Pull the first definition out of a dictionary response body.
///
/// The service answers a known word with a list of entries and an unknown
/// one with an object, so anything that is not a non-empty list with at
/// least one definition counts as not found. Only the first entry is
/// decoded; later entries may be any shape.
pub fn first_definition(body: serde_json::Value) -> Option<String> {
    let serde_json::Value::Array(entries) = body else {
        return None;
    };
    let entry: DictionaryEntry = serde_json::from_value(entries.into_iter().next()?).ok()?;
    entry
        .meanings
        .into_iter()
        .next()?
        .definitions
        .into_iter()
        .next()?
        .definition
}

/// First meal of a recipe search, treating `null` and `[]` alike.
pub fn first_meal(search: MealSearch) -> Option<Meal> {
    let first = search.meals?.into_iter().next()?;
    serde_json::from_value(first).ok()
}

impl ApiClient {
    /// Create an ApiClient for the endpoints in `settings`.
    pub fn new(settings: Settings) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient { client, settings })
    }

    /// `{dictionary_url}/{word}` with the word percent-encoded as a single
    /// path segment.
    pub fn dictionary_url(&self, word: &str) -> Result<Url> {
        let mut url = Url::parse(&self.settings.dictionary_url)
            .with_context(|| format!("Invalid dictionary url {}", self.settings.dictionary_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Dictionary url cannot take a path: {}", self.settings.dictionary_url))?
            .pop_if_empty()
            .push(word);
        Ok(url)
    }

    fn recipe_url(&self) -> String {
        format!("{}/search.php", self.settings.recipe_url.trim_end_matches('/'))
    }
}

impl Lookup for ApiClient {
    fn define(&self, word: &str) -> Result<Option<String>> {
        let url = self.dictionary_url(word)?;
        debug!(%url, "dictionary lookup");
        let body: serde_json::Value = self
            .client
            .get(url)
            .send()
            .context("Failed to send dictionary request")?
            .json()
            .context("Parsing dictionary response json")?;
        Ok(first_definition(body))
    }

    fn find_recipe(&self, dish: &str) -> Result<Option<Meal>> {
        let url = self.recipe_url();
        debug!(%url, dish, "recipe search");
        let search: MealSearch = self
            .client
            .get(&url)
            .query(&[("s", dish)])
            .send()
            .context("Failed to send recipe request")?
            .json()
            .context("Parsing recipe response json")?;
        Ok(first_meal(search))
    }

    fn search_books(&self, query: &str) -> Result<VolumeSearch> {
        let url = &self.settings.books_url;
        debug!(%url, query, max = self.settings.books_max_results, "book search");
        let res = self
            .client
            .get(url)
            .query(&[("q", query)])
            .query(&[("maxResults", self.settings.books_max_results)])
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .context("Failed to send book search request")?;
        if !res.status().is_success() {
            anyhow::bail!("HTTP error: {}", res.status());
        }
        let search: VolumeSearch = res.json().context("Parsing book search response json")?;
        Ok(search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Answer one request on a local port with a canned status and JSON
    /// body. The handle yields the request head, lowercased.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).to_lowercase()
        });
        (base, handle)
    }

    /// Client aimed at a local server, ignoring any proxy in the environment.
    fn client_for(base: &str) -> ApiClient {
        ApiClient {
            client: Client::builder().no_proxy().build().unwrap(),
            settings: Settings {
                dictionary_url: format!("{}/api/v2/entries/en", base),
                recipe_url: base.to_string(),
                books_url: format!("{}/volumes", base),
                books_max_results: 5,
            },
        }
    }

    #[test]
    fn test_define_reads_body_whatever_the_status() {
        let (base, server) = serve_once(
            "404 Not Found",
            r#"{"title":"No Definitions Found","message":"Sorry pal"}"#,
        );
        let definition = client_for(&base).define("ice cream").unwrap();

        assert_eq!(definition, None);
        let request = server.join().unwrap();
        assert!(request.starts_with("get /api/v2/entries/en/ice%20cream http/1.1"));
    }

    #[test]
    fn test_define_found() {
        let (base, server) = serve_once(
            "200 OK",
            r#"[{"word":"hello","meanings":[{"definitions":[{"definition":"A greeting."}]}]}]"#,
        );
        let definition = client_for(&base).define("hello").unwrap();

        assert_eq!(definition.as_deref(), Some("A greeting."));
        server.join().unwrap();
    }

    #[test]
    fn test_find_recipe_encodes_query() {
        let (base, server) = serve_once("200 OK", r#"{"meals":null}"#);
        let meal = client_for(&base).find_recipe("mac & cheese").unwrap();

        assert_eq!(meal, None);
        let request = server.join().unwrap();
        assert!(request.starts_with("get /search.php?s=mac+%26+cheese http/1.1"));
    }

    #[test]
    fn test_find_recipe_found() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"meals":[{"strMeal":"Arrabiata","strInstructions":"Boil pasta."}]}"#,
        );
        let meal = client_for(&base).find_recipe("arrabiata").unwrap().unwrap();

        assert_eq!(meal.name.as_deref(), Some("Arrabiata"));
        assert_eq!(meal.instructions.as_deref(), Some("Boil pasta."));
        server.join().unwrap();
    }

    #[test]
    fn test_search_books_sends_accept_and_limit() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"items":[{"volumeInfo":{"title":"Dune Messiah"}}]}"#,
        );
        let search = client_for(&base).search_books("dune messiah").unwrap();

        let items = search.items.unwrap();
        assert_eq!(
            items[0].volume_info.as_ref().unwrap().title.as_deref(),
            Some("Dune Messiah")
        );
        let request = server.join().unwrap();
        assert!(request.starts_with("get /volumes?q=dune+messiah&maxresults=5 http/1.1"));
        assert!(request.contains("\r\naccept: application/json\r\n"));
    }

    #[test]
    fn test_search_books_rejects_error_status() {
        let (base, server) = serve_once("500 Internal Server Error", "{}");
        let err = client_for(&base).search_books("dune").unwrap_err();

        assert!(err.to_string().contains("HTTP error: 500"), "{err:#}");
        server.join().unwrap();
    }

    #[test]
    fn test_only_first_entry_needs_to_decode() {
        let body = json!([
            {"meanings": [{"definitions": [{"definition": "first"}]}]},
            {"meanings": "not a list"}
        ]);
        assert_eq!(first_definition(body).as_deref(), Some("first"));

        let search: MealSearch = serde_json::from_value(json!({
            "meals": [{"strMeal": "Good"}, {"strMeal": 42}]
        }))
        .unwrap();
        assert_eq!(first_meal(search).unwrap().name.as_deref(), Some("Good"));

        let nameless: MealSearch =
            serde_json::from_value(json!({"meals": [{"strInstructions": "Stir."}]})).unwrap();
        assert_eq!(first_meal(nameless).unwrap().name, None);
    }

    #[test]
    fn test_definition_missing_text() {
        let body = json!([{"meanings": [{"definitions": [{"example": "no text"}]}]}]);
        assert_eq!(first_definition(body), None);
    }

    #[test]
    fn test_first_definition_found() {
        let body = json!([{
            "word": "hello",
            "meanings": [{
                "partOfSpeech": "noun",
                "definitions": [
                    {"definition": "\"Hello!\" or an equivalent greeting.", "synonyms": []},
                    {"definition": "second"}
                ]
            }]
        }]);
        assert_eq!(
            first_definition(body).as_deref(),
            Some("\"Hello!\" or an equivalent greeting.")
        );
    }

    #[test]
    fn test_first_definition_not_found() {
        let missing = json!({
            "title": "No Definitions Found",
            "message": "Sorry pal, we couldn't find definitions for the word you were looking for."
        });
        assert_eq!(first_definition(missing), None);
        assert_eq!(first_definition(json!([])), None);
        assert_eq!(first_definition(json!([{"meanings": []}])), None);
        assert_eq!(first_definition(json!([{"meanings": [{"definitions": []}]}])), None);
        assert_eq!(first_definition(json!(null)), None);
    }

    #[test]
    fn test_first_meal() {
        let search: MealSearch = serde_json::from_value(json!({
            "meals": [
                {"idMeal": "52772", "strMeal": "Teriyaki Chicken Casserole", "strInstructions": "Preheat oven."},
                {"strMeal": "Other", "strInstructions": null}
            ]
        }))
        .unwrap();
        let meal = first_meal(search).unwrap();
        assert_eq!(meal.name.as_deref(), Some("Teriyaki Chicken Casserole"));
        assert_eq!(meal.instructions.as_deref(), Some("Preheat oven."));
    }

    #[test]
    fn test_no_meals() {
        let null: MealSearch = serde_json::from_value(json!({"meals": null})).unwrap();
        assert_eq!(first_meal(null), None);
        let empty: MealSearch = serde_json::from_value(json!({"meals": []})).unwrap();
        assert_eq!(first_meal(empty), None);
        let absent: MealSearch = serde_json::from_value(json!({})).unwrap();
        assert_eq!(first_meal(absent), None);
    }

    #[test]
    fn test_volume_search_decoding() {
        let search: VolumeSearch = serde_json::from_value(json!({
            "kind": "books#volumes",
            "totalItems": 2,
            "items": [
                {"volumeInfo": {"title": "Dune", "authors": ["Frank Herbert"]}},
                {"id": "no-info"}
            ]
        }))
        .unwrap();
        let items = search.items.unwrap();
        assert_eq!(items.len(), 2);
        let info = items[0].volume_info.as_ref().unwrap();
        assert_eq!(info.title.as_deref(), Some("Dune"));
        assert!(info.publisher.is_none());
        assert!(items[1].volume_info.is_none());

        let empty: VolumeSearch = serde_json::from_value(json!({"totalItems": 0})).unwrap();
        assert!(empty.items.is_none());
    }

    #[test]
    fn test_dictionary_url_encodes_word() {
        let api = ApiClient::new(Settings::default()).unwrap();
        assert_eq!(
            api.dictionary_url("hello").unwrap().as_str(),
            "https://api.dictionaryapi.dev/api/v2/entries/en/hello"
        );
        assert_eq!(
            api.dictionary_url("ice cream").unwrap().as_str(),
            "https://api.dictionaryapi.dev/api/v2/entries/en/ice%20cream"
        );

        let trailing = Settings {
            dictionary_url: "http://localhost:8080/entries/".into(),
            ..Settings::default()
        };
        let api = ApiClient::new(trailing).unwrap();
        assert_eq!(
            api.dictionary_url("word").unwrap().as_str(),
            "http://localhost:8080/entries/word"
        );
    }

    #[test]
    fn test_recipe_url() {
        let api = ApiClient::new(Settings {
            recipe_url: "http://localhost:9000/".into(),
            ..Settings::default()
        })
        .unwrap();
        assert_eq!(api.recipe_url(), "http://localhost:9000/search.php");
    }
}
