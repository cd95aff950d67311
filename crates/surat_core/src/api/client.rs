//! Blocking JSON client for the office backend.

use super::employee::{classify_query, EmployeeRecord};
use super::{ApiError, ApiResult};
use crate::model::person::Person;
use log::{info, warn};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, PoisonError};

const LOGIN_PATH: &str = "api/auth/login";
const LETTERS_PATH: &str = "api/letters";
const EMPLOYEE_SEARCH_PATH: &str = "api/pegawai/search-surat";

/// Body of `POST /api/letters`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveLetterRequest {
    /// `SURAT_TUGAS`, `NOTA_DINAS` or `SURAT_KEPUTUSAN`.
    pub letter_type: String,
    pub nomor_surat: String,
    /// `YYYY-MM-01`, built from the letter's month and year.
    pub tanggal_surat: String,
    pub perihal: String,
    /// JSON-encoded letter record.
    pub content: String,
    pub created_by: i64,
}

/// Backend identifier; the API may return numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RemoteId {
    Number(i64),
    Text(String),
}

impl Display for RemoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// Letter row returned by the letter API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteLetter {
    pub id: RemoteId,
    #[serde(default)]
    pub letter_type: String,
    #[serde(default)]
    pub nomor_surat: String,
    #[serde(default)]
    pub tanggal_surat: Option<String>,
    #[serde(default)]
    pub perihal: String,
    /// Either a JSON-encoded string or an already-decoded object.
    #[serde(default)]
    pub content: serde_json::Value,
    #[serde(default)]
    pub created_by: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl RemoteLetter {
    /// Decodes `content` regardless of whether it was sent encoded.
    pub fn decode_content<T: DeserializeOwned>(&self) -> ApiResult<T> {
        match &self.content {
            serde_json::Value::String(encoded) => Ok(serde_json::from_str(encoded)?),
            other => Ok(serde_json::from_value(other.clone())?),
        }
    }
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Session-holding client for auth, letters and employee search.
#[derive(Debug)]
pub struct ApiClient {
    base_url: Url,
    http: Client,
    token: Mutex<Option<String>>,
}

impl ApiClient {
    /// Creates a client for `base_url`, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url =
            Url::parse(&normalized).map_err(|_| ApiError::InvalidUrl(base_url.to_string()))?;
        let http = Client::builder().build()?;

        Ok(Self {
            base_url,
            http,
            token: Mutex::new(None),
        })
    }

    /// Reuses a token obtained earlier, e.g. restored from disk.
    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.set_token(Some(token.into()));
        self
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    pub fn clear_token(&self) {
        self.set_token(None);
    }

    fn set_token(&self, token: Option<String>) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// Logs in and keeps the returned bearer token for later calls.
    pub fn login(&self, username: &str, password: &str) -> ApiResult<()> {
        let response = self
            .http
            .post(self.endpoint(LOGIN_PATH)?)
            .json(&LoginRequest { username, password })
            .send()?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                "event=auth_login module=api status=error http_status={}",
                status.as_u16()
            );
            return Err(http_error(status, response));
        }

        let body: LoginResponse = decode(response)?;
        self.set_token(Some(body.token));
        info!("event=auth_login module=api status=ok");
        Ok(())
    }

    /// Stores one letter remotely and returns the backend row.
    pub fn save_letter(&self, request: &SaveLetterRequest) -> ApiResult<RemoteLetter> {
        let builder = self.http.post(self.endpoint(LETTERS_PATH)?).json(request);
        let response = self.send_authorized(builder)?;
        decode(response)
    }

    pub fn list_letters(&self) -> ApiResult<Vec<RemoteLetter>> {
        let builder = self.http.get(self.endpoint(LETTERS_PATH)?);
        let response = self.send_authorized(builder)?;
        decode(response)
    }

    /// Fetches one letter; a 404 is reported as `Ok(None)`.
    ///
    /// `id` is sent as a single escaped path segment. Ids that cannot name a
    /// segment (`""`, `.`, `..`) are unknown without a request.
    pub fn get_letter(&self, id: &str) -> ApiResult<Option<RemoteLetter>> {
        let Some(url) = self.letter_endpoint(id)? else {
            return Ok(None);
        };
        let builder = self.http.get(url);
        match self.send_authorized(builder) {
            Ok(response) => decode(response).map(Some),
            Err(ApiError::Http { status: 404, .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Searches employees by NIP or name.
    ///
    /// Queries too short to classify return an empty list without a request.
    pub fn search_employees(&self, input: &str) -> ApiResult<Vec<Person>> {
        let Some(query) = classify_query(input) else {
            return Ok(Vec::new());
        };

        let (param, value) = query.as_param();
        let builder = self
            .http
            .get(self.endpoint(EMPLOYEE_SEARCH_PATH)?)
            .query(&[(param, value)]);
        let response = self.send_authorized(builder)?;
        let records: Vec<EmployeeRecord> = decode(response)?;
        info!(
            "event=employee_search module=api status=ok by={param} hits={}",
            records.len()
        );
        Ok(records.into_iter().map(Person::from).collect())
    }

    fn letter_endpoint(&self, id: &str) -> ApiResult<Option<Url>> {
        if matches!(id, "" | "." | "..") {
            return Ok(None);
        }
        let mut url = self.endpoint(LETTERS_PATH)?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(id);
        Ok(Some(url))
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path)
            .map_err(|_| ApiError::InvalidUrl(format!("{}{path}", self.base_url)))
    }

    fn send_authorized(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let token = self.token().ok_or(ApiError::NotLoggedIn)?;
        let response = builder.bearer_auth(token).send()?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            self.clear_token();
            warn!(
                "event=auth_rejected module=api status=error http_status={}",
                status.as_u16()
            );
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            return Err(http_error(status, response));
        }
        Ok(response)
    }
}

fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let body = response.text()?;
    Ok(serde_json::from_str(&body)?)
}

fn http_error(status: StatusCode, response: Response) -> ApiError {
    let message = response.text().unwrap_or_default();
    ApiError::Http {
        status: status.as_u16(),
        message,
    }
}
