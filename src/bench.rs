//! Run orchestration: partition the workload, fan it out to workers, then
//! fold their records once every worker is done.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::info;

use crate::error::{BenchError, BenchResult};
use crate::partition::slice_bounds;
use crate::report::Report;
use crate::request::RequestDescriptor;
use crate::stats::{Aggregator, Kpi};
use crate::worker::Worker;

pub const DEFAULT_NAME: &str = "http";
pub const DEFAULT_WORKERS: usize = 3;

pub fn default_thresholds() -> Vec<Duration> {
    [50, 100, 200, 300, 500]
        .into_iter()
        .map(Duration::from_millis)
        .collect()
}

#[derive(Debug, Clone)]
pub struct BenchmarkerBuilder {
    workers: usize,
    thresholds: Vec<Duration>,
    name: String,
    requests: Vec<RequestDescriptor>,
}

impl Default for BenchmarkerBuilder {
    fn default() -> Self {
        BenchmarkerBuilder {
            workers: DEFAULT_WORKERS,
            thresholds: default_thresholds(),
            name: DEFAULT_NAME.to_string(),
            requests: Vec::new(),
        }
    }
}

impl BenchmarkerBuilder {
    pub fn worker_count(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Bucket boundaries; sorted ascending on `build`.
    pub fn thresholds(mut self, thresholds: Vec<Duration>) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Workload label used to key the aggregated records.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn requests(mut self, requests: Vec<RequestDescriptor>) -> Self {
        self.requests = requests;
        self
    }

    pub fn build(mut self) -> BenchResult<Benchmarker> {
        if self.workers == 0 {
            return Err(BenchError::InvalidWorkerCount(self.workers));
        }
        // Cumulative buckets only stay monotonic over ascending thresholds.
        self.thresholds.sort_unstable();
        Ok(Benchmarker {
            workers: self.workers,
            thresholds: self.thresholds.into(),
            name: self.name,
            requests: self.requests.into(),
        })
    }
}

pub struct Benchmarker {
    workers: usize,
    thresholds: Arc<[Duration]>,
    name: String,
    requests: Arc<[RequestDescriptor]>,
}

impl Benchmarker {
    pub fn builder() -> BenchmarkerBuilder {
        BenchmarkerBuilder::default()
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn thresholds(&self) -> &[Duration] {
        &self.thresholds
    }

    /// Runs every request once and returns the aggregated report.
    pub async fn run(&self) -> BenchResult<Report> {
        let bounds = slice_bounds(self.requests.len(), self.workers)?;
        info!(
            workers = self.workers,
            requests = self.requests.len(),
            "starting benchmark"
        );
        let started = Instant::now();

        // Capacity equals the worker count so no worker waits to hand off.
        let (tx, mut rx) = mpsc::channel::<Kpi>(self.workers);
        let mut handles = Vec::with_capacity(self.workers);

        for range in bounds {
            let tx = tx.clone();
            let requests = Arc::clone(&self.requests);
            let worker = Worker::new(self.name.clone(), Arc::clone(&self.thresholds));

            handles.push(tokio::spawn(async move {
                let kpi = worker.run(&requests[range]).await?;
                // The receiver outlives every sender; a closed channel means
                // the run itself was dropped.
                let _ = tx.send(kpi).await;
                Ok::<(), BenchError>(())
            }));
        }
        drop(tx);

        // Completion barrier: nothing is folded until every worker is done.
        for result in futures::future::try_join_all(handles).await? {
            result?;
        }

        let mut aggregator = Aggregator::new(self.thresholds.len());
        while let Some(kpi) = rx.recv().await {
            aggregator.merge(&kpi)?;
        }

        info!(elapsed = ?started.elapsed(), "benchmark finished");
        Ok(aggregator.finish(self.workers, self.thresholds.to_vec()))
    }

    /// Runs the benchmark and prints the summary table to stdout.
    pub async fn benchmark(&self) -> BenchResult<Report> {
        let report = self.run().await?;
        print!("{}", report);
        Ok(report)
    }
}
