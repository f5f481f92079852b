use std::fmt;
use std::time::Duration;

use crate::stats::Kpi;

const NOT_AVAILABLE: &str = "n/a";
const PERCENTILES: [(&str, f64); 3] = [("p50", 0.50), ("p90", 0.90), ("p99", 0.99)];

/// Aggregated result of a run, rendered as a tab-separated table.
#[derive(Debug, Clone)]
pub struct Report {
    pub workers: usize,
    pub thresholds: Vec<Duration>,
    pub kpis: Vec<Kpi>,
}

impl Report {
    pub fn new(workers: usize, thresholds: Vec<Duration>, kpis: Vec<Kpi>) -> Self {
        Report {
            workers,
            thresholds,
            kpis,
        }
    }

    pub fn kpi(&self, name: &str) -> Option<&Kpi> {
        self.kpis.iter().find(|kpi| kpi.name == name)
    }

    pub fn header(&self) -> String {
        let thresholds: Vec<String> = self.thresholds.iter().map(|t| format!("{:?}", t)).collect();
        format!(
            "\tsucc\tfail\ttotalTime\t{:>8}\t{:>8}\t{:>8}\tsucc%",
            "qps",
            "res_time",
            thresholds.join("\t")
        )
    }

    pub fn row(kpi: &Kpi) -> String {
        let qps = kpi
            .qps()
            .map_or_else(|| NOT_AVAILABLE.to_string(), |qps| qps.to_string());
        let ratios: Vec<String> = kpi.bucket_ratios().into_iter().map(fmt_ratio).collect();
        format!(
            "{}\t{}\t{}\t{:?}\t{:>8}\t{:>8}\t{:>8}\t{}",
            kpi.name,
            kpi.success,
            kpi.fail,
            kpi.total_elapsed,
            qps,
            fmt_duration(kpi.mean_latency()),
            ratios.join("\t"),
            kpi.success_ratio()
                .map_or_else(|| NOT_AVAILABLE.to_string(), |r| r.to_string()),
        )
    }

    /// Latency percentiles per record, taken from the merged histograms.
    pub fn percentiles(&self) -> Percentiles<'_> {
        Percentiles(self)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header())?;
        for kpi in &self.kpis {
            writeln!(f, "{}", Report::row(kpi))?;
        }
        Ok(())
    }
}

pub struct Percentiles<'a>(&'a Report);

impl fmt::Display for Percentiles<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\t{:>8}\t{:>8}", "min", "max")?;
        for (label, _) in PERCENTILES {
            write!(f, "\t{:>8}", label)?;
        }
        writeln!(f)?;
        for kpi in &self.0.kpis {
            write!(
                f,
                "{}\t{:>8}\t{:>8}",
                kpi.name,
                fmt_duration(kpi.latency_at(0.0)),
                fmt_duration(kpi.latency_at(1.0))
            )?;
            for (_, quantile) in PERCENTILES {
                write!(f, "\t{:>8}", fmt_duration(kpi.latency_at(quantile)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn fmt_duration(value: Option<Duration>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |d| format!("{:?}", d))
}

fn fmt_ratio(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |r| format!("{:.5}", r))
}
