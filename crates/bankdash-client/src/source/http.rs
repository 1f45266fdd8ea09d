use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::model::{Customer, Page, Transaction};
use crate::source::BankSource;
use crate::{ClientError, ClientResult};

const CUSTOMER_PATH: &str = "/api/customers/customer";
const TRANSACTIONS_PATH: &str = "/api/transactions/transactions";

/// Reads from the bank backend's REST API.
#[derive(Debug, Clone)]
pub struct HttpBankSource {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBankSource {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> ClientResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| ClientError::backend_unreachable(&base_url, &error.to_string()))?;

        Ok(Self {
            client,
            base_url,
            token: token.filter(|value| !value.trim().is_empty()),
        })
    }

    pub fn customer_request(&self) -> RequestBuilder {
        self.authorize(self.client.get(format!("{}{CUSTOMER_PATH}", self.base_url)))
    }

    pub fn transactions_request(&self, account_number: &str, page: u32, size: u32) -> RequestBuilder {
        let page = page.to_string();
        let size = size.to_string();
        self.authorize(
            self.client
                .get(format!("{}{TRANSACTIONS_PATH}", self.base_url))
                .query(&[
                    ("accountNumber", account_number),
                    ("page", page.as_str()),
                    ("size", size.as_str()),
                ]),
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn fetch_json<T>(&self, request: RequestBuilder) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let request = request
            .build()
            .map_err(|error| ClientError::backend_unreachable(&self.base_url, &error.to_string()))?;
        let url = request.url().to_string();
        tracing::debug!(url, "requesting bank backend");

        let response = self
            .client
            .execute(request)
            .map_err(|error| ClientError::backend_unreachable(&url, &error.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|error| ClientError::backend_unreachable(&url, &error.to_string()))?;

        if !status.is_success() {
            return Err(map_status_error(&url, status, &body));
        }
        decode_body(&url, &body)
    }
}

impl BankSource for HttpBankSource {
    fn customer(&self) -> ClientResult<Customer> {
        self.fetch_json(self.customer_request())
    }

    fn transactions_page(
        &self,
        account_number: &str,
        page: u32,
        size: u32,
    ) -> ClientResult<Page<Transaction>> {
        self.fetch_json(self.transactions_request(account_number, page, size))
    }
}

pub(crate) fn map_status_error(url: &str, status: StatusCode, body: &str) -> ClientError {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        tracing::warn!(url, status = status.as_u16(), "bank backend rejected credentials");
        return ClientError::backend_unauthorized(url, status.as_u16());
    }

    let detail = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
    });
    ClientError::backend_request_failed(url, status.as_u16(), detail.as_deref())
}

pub(crate) fn decode_body<T>(url: &str, body: &str) -> ClientResult<T>
where
    T: DeserializeOwned,
{
    serde_json::from_str::<T>(body)
        .map_err(|error| ClientError::backend_decode_failed(url, &error.to_string()))
}
