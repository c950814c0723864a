use std::time::Instant;

use reqwest::{Client, Url};
use tracing::debug;

use crate::error::{ChangelogError, Result};

const USER_AGENT: &str = concat!("release_notes/", env!("CARGO_PKG_VERSION"));

/// Plain page fetcher. No retries; the transport's own defaults apply.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    /// Fetch the raw markup of one listing page.
    pub async fn fetch_page(&self, url: &Url) -> Result<String> {
        let start = Instant::now();
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChangelogError::Status {
                url: url.to_string(),
                status,
            });
        }

        let html = response.text().await?;
        debug!(
            "Fetched {} ({} bytes in {}ms)",
            url,
            html.len(),
            start.elapsed().as_millis()
        );
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/releases"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/releases", server.uri())).unwrap();
        let html = Fetcher::new().unwrap().fetch_page(&url).await.unwrap();
        assert_eq!(html, "<html>ok</html>");
    }

    #[tokio::test]
    async fn error_status_surfaces() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/missing", server.uri())).unwrap();
        let err = Fetcher::new().unwrap().fetch_page(&url).await.unwrap_err();
        match err {
            ChangelogError::Status { status, .. } => assert_eq!(status.as_u16(), 404),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_refused_is_transport_error() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = Url::parse(&format!("http://127.0.0.1:{}/releases", port)).unwrap();
        let err = Fetcher::new().unwrap().fetch_page(&url).await.unwrap_err();
        assert!(matches!(err, ChangelogError::Http(_)));
    }
}
