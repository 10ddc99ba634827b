//! HTTP client utilities for testing.
//!
//! Thin wrappers over reqwest that build the point and grid query strings and
//! split error responses into their status and `kind`.

use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::error::Error;
use std::net::SocketAddr;
use std::time::Duration;

/// Default timeout for HTTP requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a default test client
pub fn create_test_client() -> Client {
    Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .expect("Failed to build test HTTP client")
}

/// Build a URL for a server endpoint
pub fn build_url(addr: &SocketAddr, path: &str) -> Url {
    format!("http://{}{}", addr, path)
        .parse()
        .expect("Failed to parse URL")
}

/// Path of a `/point` query
pub fn point_path(x: f64, y: f64) -> String {
    format!("/point?x={}&y={}", x, y)
}

/// Path of a `/grid` query with `nx` by `ny` points
pub fn grid_path(origin: [f64; 2], cell: [f64; 2], nx: usize, ny: usize) -> String {
    format!(
        "/grid?x0={}&y0={}&dx={}&dy={}&nx={}&ny={}",
        origin[0], origin[1], cell[0], cell[1], nx, ny
    )
}

/// Make a GET request
pub async fn get(addr: &SocketAddr, path: &str) -> Result<Response, Box<dyn Error>> {
    let client = create_test_client();
    Ok(client.get(build_url(addr, path)).send().await?)
}

/// Make a GET request and parse the JSON body of a 200 response
pub async fn get_json<T: DeserializeOwned>(
    addr: &SocketAddr,
    path: &str,
) -> Result<T, Box<dyn Error>> {
    let response = get(addr, path).await?;

    if response.status() != StatusCode::OK {
        return Err(format!(
            "Unexpected status code: {}, body: {:?}",
            response.status(),
            response.text().await
        )
        .into());
    }

    Ok(response.json::<T>().await?)
}

/// Make a GET request expected to fail; returns the status and the JSON error body
pub async fn get_error(
    addr: &SocketAddr,
    path: &str,
) -> Result<(StatusCode, serde_json::Value), Box<dyn Error>> {
    let response = get(addr, path).await?;
    let status = response.status();

    if status.is_success() {
        return Err(format!("Expected an error for {}, got {}", path, status).into());
    }

    Ok((status, response.json().await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let addr: SocketAddr = ([127, 0, 0, 1], 8000).into();
        let url = build_url(&addr, &point_path(0.5, -1.0));
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/point?x=0.5&y=-1");
    }

    #[test]
    fn test_grid_path() {
        assert_eq!(
            grid_path([0.5, 0.5], [0.3, 4.5], 2, 3),
            "/grid?x0=0.5&y0=0.5&dx=0.3&dy=4.5&nx=2&ny=3"
        );
    }
}
