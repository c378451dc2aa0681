/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! `reqwest`-backed REST capability.

use crate::config::RestConfig;
use async_trait::async_trait;
use mq2rest::{Method, RestClient, RestRequest, RestResponse, TransportError};
use std::time::Duration;

pub struct HttpRestClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRestClient {
    pub fn new(config: &RestConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.clone(),
            client,
        })
    }

    fn url_for(&self, endpoint: &str) -> String {
        join_url(&self.base_url, endpoint)
    }
}

/// `base_url + "/" + endpoint` without doubled slashes at the seam.
fn join_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl RestClient for HttpRestClient {
    async fn invoke(&self, request: RestRequest) -> Result<RestResponse, TransportError> {
        let url = self.url_for(&request.endpoint);

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            if !request
                .headers
                .keys()
                .any(|name| name.eq_ignore_ascii_case("content-type"))
            {
                builder = builder.header("Content-Type", "application/json");
            }
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| TransportError::Connect {
            endpoint: url.clone(),
            detail: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                endpoint: url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| TransportError::Connect {
            endpoint: url,
            detail: e.to_string(),
        })?;

        Ok(RestResponse {
            status: status.as_u16(),
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::join_url;

    #[test]
    fn join_url_trims_slashes_at_the_seam() {
        assert_eq!(
            join_url("http://localhost:8000/api/", "/users"),
            "http://localhost:8000/api/users"
        );
        assert_eq!(
            join_url("http://localhost:8000", "devices/gain/value"),
            "http://localhost:8000/devices/gain/value"
        );
    }
}
