//! [`PageAccessor`] implementation speaking the W3C WebDriver protocol.
//!
//! The page talks JSON over HTTP to a WebDriver server (chromedriver by default)
//! and drives one Chrome session for its whole lifetime. Element lookups rely on
//! the session's implicit wait, which is configured once when connecting.

use crate::page::accessor::{ElementRef, Locator, PageAccessor};
use crate::page::error::PageError;
use async_trait::async_trait;
use bon::bon;
use log::{debug, info};
use reqwest::{Client, Method};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Key under which W3C WebDriver serializes element references.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";
const NO_SUCH_ELEMENT: &str = "no such element";

#[derive(Deserialize)]
struct Envelope<T> {
    value: T,
}

#[derive(Deserialize)]
struct ErrorValue {
    error: String,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewSession {
    session_id: String,
}

/// A live Chrome session driven through a WebDriver server.
///
/// # Example (conceptual)
///
/// ```ignore
/// let page = WebDriverPage::connect()
///     .server_url("http://localhost:9515")
///     .headless(true)
///     .call()
///     .await?;
/// page.navigate("https://www.eltiempo.es/madrid.html").await?;
/// ```
pub struct WebDriverPage {
    client: Client,
    server_url: String,
    session_id: String,
    released: AtomicBool,
}

#[bon]
impl WebDriverPage {
    /// Opens a new browser session and configures its implicit element wait.
    ///
    /// # Arguments
    ///
    /// * `.server_url(&str)`: **Required.** Base URL of the WebDriver server.
    /// * `.headless(bool)`: Optional. Run Chrome without a window. Defaults to `false`.
    /// * `.implicit_wait(Duration)`: Optional. How long lookups wait for an element to appear.
    ///   Defaults to 5 seconds.
    ///
    /// # Errors
    ///
    /// Returns [`PageError`] if the server is unreachable or refuses to create the session.
    #[builder]
    pub async fn connect(
        server_url: &str,
        headless: Option<bool>,
        implicit_wait: Option<Duration>,
    ) -> Result<Self, PageError> {
        let headless = headless.unwrap_or(false);
        let implicit_wait = implicit_wait.unwrap_or(Duration::from_secs(5));
        let server_url = server_url.trim_end_matches('/').to_string();
        let client = Client::new();

        let mut args = vec!["--start-maximized".to_string()];
        if headless {
            args.push("--headless=new".to_string());
        }
        let capabilities = json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "chrome",
                    "acceptInsecureCerts": true,
                    "goog:chromeOptions": {
                        "args": args,
                        "excludeSwitches": ["enable-logging"],
                    },
                }
            }
        });

        let value = send(
            &client,
            Method::POST,
            &format!("{server_url}/session"),
            Some(capabilities),
            "new session",
        )
        .await?;
        let session: NewSession =
            serde_json::from_value(value).map_err(|source| PageError::Decode {
                command: "new session".to_string(),
                source,
            })?;
        info!(
            "Started WebDriver session {} on {}",
            session.session_id, server_url
        );

        let page = Self {
            client,
            server_url,
            session_id: session.session_id,
            released: AtomicBool::new(false),
        };
        page.session_command(
            Method::POST,
            "/timeouts",
            Some(json!({ "implicit": implicit_wait.as_millis() as u64 })),
            "set timeouts",
        )
        .await?;
        Ok(page)
    }
}

impl WebDriverPage {
    async fn session_command(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        command: &str,
    ) -> Result<Value, PageError> {
        if self.released.load(Ordering::SeqCst) {
            return Err(PageError::SessionReleased);
        }
        let url = format!("{}/session/{}{}", self.server_url, self.session_id, path);
        send(&self.client, method, &url, body, command).await
    }

    fn search_path(scope: Option<&ElementRef>, endpoint: &str) -> String {
        match scope {
            Some(element) => format!("/element/{}/{}", element.id(), endpoint),
            None => format!("/{endpoint}"),
        }
    }
}

/// Sends one WebDriver command and unwraps the `value` envelope of the reply.
async fn send(
    client: &Client,
    method: Method,
    url: &str,
    body: Option<Value>,
    command: &str,
) -> Result<Value, PageError> {
    let request = client.request(method, url);
    let request = match body {
        Some(body) => request.json(&body),
        None => request,
    };
    let response = request
        .send()
        .await
        .map_err(|e| PageError::NetworkRequest(url.to_string(), e))?;
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| PageError::NetworkRequest(url.to_string(), e))?;

    if status.is_success() {
        let envelope: Envelope<Value> =
            serde_json::from_slice(&bytes).map_err(|source| PageError::Decode {
                command: command.to_string(),
                source,
            })?;
        return Ok(envelope.value);
    }

    match serde_json::from_slice::<Envelope<ErrorValue>>(&bytes) {
        Ok(envelope) => Err(PageError::WebDriver {
            command: command.to_string(),
            error: envelope.value.error,
            message: envelope.value.message,
        }),
        Err(_) => Err(PageError::HttpStatus {
            url: url.to_string(),
            status,
        }),
    }
}

fn element_from_value(value: &Value) -> Result<ElementRef, PageError> {
    value
        .get(ELEMENT_KEY)
        .and_then(|id| id.as_str())
        .map(ElementRef::new)
        .ok_or_else(|| PageError::Protocol {
            detail: format!("response does not carry an element reference: {value}"),
        })
}

fn is_no_such_element(error: &PageError) -> bool {
    matches!(error, PageError::WebDriver { error: code, .. } if code == NO_SUCH_ELEMENT)
}

#[async_trait]
impl PageAccessor for WebDriverPage {
    async fn navigate(&self, url: &str) -> Result<(), PageError> {
        info!("Navigating to {}", url);
        self.session_command(Method::POST, "/url", Some(json!({ "url": url })), "navigate")
            .await?;
        Ok(())
    }

    async fn find(
        &self,
        scope: Option<&ElementRef>,
        locator: &Locator,
    ) -> Result<Option<ElementRef>, PageError> {
        let result = self
            .session_command(
                Method::POST,
                &Self::search_path(scope, "element"),
                Some(json!({ "using": "xpath", "value": locator.as_str() })),
                "find element",
            )
            .await;

        match result {
            Ok(value) => element_from_value(&value).map(Some),
            Err(e) if is_no_such_element(&e) => {
                debug!("No element matches {}", locator);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn find_all(
        &self,
        scope: Option<&ElementRef>,
        locator: &Locator,
    ) -> Result<Vec<ElementRef>, PageError> {
        let value = self
            .session_command(
                Method::POST,
                &Self::search_path(scope, "elements"),
                Some(json!({ "using": "xpath", "value": locator.as_str() })),
                "find elements",
            )
            .await?;

        value
            .as_array()
            .ok_or_else(|| PageError::Protocol {
                detail: format!("find elements did not return an array: {value}"),
            })?
            .iter()
            .map(element_from_value)
            .collect()
    }

    async fn text(&self, element: &ElementRef) -> Result<String, PageError> {
        let value = self
            .session_command(
                Method::GET,
                &format!("/element/{}/text", element.id()),
                None,
                "element text",
            )
            .await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn click(&self, element: &ElementRef) -> Result<(), PageError> {
        self.session_command(
            Method::POST,
            &format!("/element/{}/click", element.id()),
            Some(json!({})),
            "element click",
        )
        .await?;
        Ok(())
    }

    async fn scroll(&self, dx: i64, dy: i64) -> Result<(), PageError> {
        let actions = json!({
            "actions": [{
                "type": "wheel",
                "id": "wheel",
                "actions": [{
                    "type": "scroll",
                    "x": 0,
                    "y": 0,
                    "deltaX": dx,
                    "deltaY": dy,
                    "duration": 0,
                    "origin": "viewport",
                }],
            }]
        });
        self.session_command(Method::POST, "/actions", Some(actions), "perform actions")
            .await?;
        Ok(())
    }

    async fn release(&self) -> Result<(), PageError> {
        if self.released.load(Ordering::SeqCst) {
            return Ok(());
        }
        self.session_command(Method::DELETE, "", None, "delete session")
            .await?;
        self.released.store(true, Ordering::SeqCst);
        info!("Closed WebDriver session {}", self.session_id);
        Ok(())
    }
}
