use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper::Uri;
use hyper_tls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client as HyperClient;
use hyper_util::rt::TokioExecutor;
use tracing::debug;

use crate::error::BenchResult;
use crate::request::RequestDescriptor;
use crate::stats::Kpi;

type Client = HyperClient<HttpsConnector<HttpConnector>, Empty<Bytes>>;

/// Issues one slice of requests strictly in order and counts the outcome.
pub struct Worker {
    client: Client,
    name: String,
    thresholds: Arc<[Duration]>,
}

impl Worker {
    pub fn new(name: impl Into<String>, thresholds: Arc<[Duration]>) -> Self {
        let mut http = HttpConnector::new();
        http.enforce_http(false);
        let https = HttpsConnector::new_with_connector(http);
        // No idle pooling: every request opens and closes its own connection.
        let client = HyperClient::builder(TokioExecutor::new())
            .pool_max_idle_per_host(0)
            .build(https);

        Worker {
            client,
            name: name.into(),
            thresholds,
        }
    }

    pub async fn run(&self, requests: &[RequestDescriptor]) -> BenchResult<Kpi> {
        let mut kpi = Kpi::new(self.name.clone(), self.thresholds.len())?;

        for request in requests {
            let start = Instant::now();
            match self.get(request.url()).await {
                Ok(()) => kpi.record_success(start.elapsed(), &self.thresholds),
                Err(err) => {
                    debug!(url = request.url(), "request failed: {}", err);
                    kpi.record_failure();
                }
            }
        }

        debug!(
            name = %self.name,
            success = kpi.success,
            fail = kpi.fail,
            "worker finished"
        );
        Ok(kpi)
    }

    /// Any response counts, whatever the status. The body is drained and dropped.
    async fn get(&self, url: &str) -> anyhow::Result<()> {
        let uri = url.parse::<Uri>()?;
        let req = hyper::Request::builder()
            .method(hyper::Method::GET)
            .uri(uri)
            .body(Empty::<Bytes>::new())?;

        let resp = self.client.request(req).await?;
        let status = resp.status();
        if let Err(err) = resp.into_body().collect().await {
            debug!(url, %status, "response body ended early: {}", err);
        }
        Ok(())
    }
}
