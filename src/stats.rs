use std::collections::BTreeMap;
use std::time::Duration;

use hdrhistogram::Histogram;

use crate::error::BenchResult;
use crate::report::Report;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Key performance indicators for one workload name.
///
/// `buckets[i]` counts successes faster than `thresholds[i]`. Buckets are
/// cumulative: a 10ms response lands in every bucket whose threshold is
/// above 10ms.
#[derive(Debug, Clone)]
pub struct Kpi {
    pub name: String,
    pub success: u64,
    pub fail: u64,
    /// Sum of elapsed time over successful requests only.
    pub total_elapsed: Duration,
    /// Throughput multiplier, 1 per raw worker record.
    pub count: u64,
    pub buckets: Vec<u64>,
    /// Successful request latencies in microseconds.
    pub latency: Histogram<u64>,
}

impl Kpi {
    pub fn new(name: impl Into<String>, bucket_len: usize) -> BenchResult<Self> {
        Ok(Kpi {
            name: name.into(),
            success: 0,
            fail: 0,
            total_elapsed: Duration::ZERO,
            count: 1,
            buckets: vec![0; bucket_len],
            latency: Histogram::<u64>::new(3)?,
        })
    }

    pub fn record_success(&mut self, elapsed: Duration, thresholds: &[Duration]) {
        self.success += 1;
        self.total_elapsed += elapsed;
        for (bucket, threshold) in self.buckets.iter_mut().zip(thresholds) {
            if elapsed < *threshold {
                *bucket += 1;
            }
        }
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.latency.saturating_record(micros);
    }

    pub fn record_failure(&mut self) {
        self.fail += 1;
    }

    /// Adds another record into this one. Order of accumulation does not matter.
    pub fn accumulate(&mut self, other: &Kpi) -> BenchResult<()> {
        self.success += other.success;
        self.fail += other.fail;
        self.total_elapsed += other.total_elapsed;
        self.count += other.count;
        if self.buckets.len() < other.buckets.len() {
            self.buckets.resize(other.buckets.len(), 0);
        }
        for (mine, theirs) in self.buckets.iter_mut().zip(&other.buckets) {
            *mine += theirs;
        }
        self.latency.add(&other.latency)?;
        Ok(())
    }

    pub fn total(&self) -> u64 {
        self.success + self.fail
    }

    /// Requests per second with integer semantics, `None` without any
    /// successful time recorded.
    pub fn qps(&self) -> Option<u128> {
        let nanos = self.total_elapsed.as_nanos();
        if nanos == 0 {
            return None;
        }
        Some(u128::from(self.success) * u128::from(self.count) * NANOS_PER_SEC / nanos)
    }

    pub fn mean_latency(&self) -> Option<Duration> {
        if self.success == 0 {
            return None;
        }
        let mean = self.total_elapsed.as_nanos() / u128::from(self.success);
        Some(Duration::from_nanos(u64::try_from(mean).unwrap_or(u64::MAX)))
    }

    /// Share of all requests (successes and failures) under each threshold.
    pub fn bucket_ratios(&self) -> Vec<Option<f64>> {
        let total = self.total();
        self.buckets
            .iter()
            .map(|&bucket| ratio(bucket, total))
            .collect()
    }

    pub fn success_ratio(&self) -> Option<f64> {
        ratio(self.success, self.total())
    }

    /// Latency at `quantile` in [0, 1], `None` when nothing succeeded.
    pub fn latency_at(&self, quantile: f64) -> Option<Duration> {
        if self.latency.len() == 0 {
            return None;
        }
        Some(Duration::from_micros(self.latency.value_at_quantile(quantile)))
    }
}

fn ratio(part: u64, total: u64) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(part as f64 / total as f64)
    }
}

/// Folds worker records into one record per workload name.
///
/// Runs single-threaded after every worker has finished.
pub struct Aggregator {
    bucket_len: usize,
    kpis: BTreeMap<String, Kpi>,
}

impl Aggregator {
    pub fn new(bucket_len: usize) -> Self {
        Aggregator {
            bucket_len,
            kpis: BTreeMap::new(),
        }
    }

    pub fn merge(&mut self, kpi: &Kpi) -> BenchResult<()> {
        if !self.kpis.contains_key(&kpi.name) {
            let mut zeroed = Kpi::new(kpi.name.clone(), self.bucket_len)?;
            zeroed.count = 0;
            self.kpis.insert(kpi.name.clone(), zeroed);
        }
        if let Some(acc) = self.kpis.get_mut(&kpi.name) {
            acc.accumulate(kpi)?;
        }
        Ok(())
    }

    /// Closes the fold. Display names embed the worker count, e.g. `http-3`.
    pub fn finish(self, workers: usize, thresholds: Vec<Duration>) -> Report {
        let kpis = self
            .kpis
            .into_values()
            .map(|mut kpi| {
                kpi.name = format!("{}-{}", kpi.name, workers);
                kpi
            })
            .collect();
        Report::new(workers, thresholds, kpis)
    }
}
