mod support;

use std::time::Duration;

use anyhow::Result;
use httpbench::{BenchError, Benchmarker, RequestDescriptor};

use support::{refused_url, spawn_http_server};

// Generous thresholds keep the bucket assertions independent of machine load.
fn wide_thresholds() -> Vec<Duration> {
    vec![Duration::from_secs(10), Duration::from_secs(20)]
}

#[tokio::test]
async fn all_requests_succeed_across_three_workers() -> Result<()> {
    let server = spawn_http_server().await?;
    let requests: Vec<RequestDescriptor> = (0..6)
        .map(|i| RequestDescriptor::new(server.url(&format!("/item/{}", i))))
        .collect();

    let report = Benchmarker::builder()
        .worker_count(3)
        .thresholds(wide_thresholds())
        .requests(requests)
        .build()?
        .run()
        .await?;

    assert_eq!(report.kpis.len(), 1);
    let kpi = report.kpi("http-3").expect("aggregated record");
    assert_eq!(kpi.success, 6);
    assert_eq!(kpi.fail, 0);
    assert_eq!(kpi.count, 3);
    assert_eq!(kpi.buckets, vec![6, 6]);
    assert_eq!(kpi.bucket_ratios(), vec![Some(1.0), Some(1.0)]);
    assert_eq!(kpi.success_ratio(), Some(1.0));
    assert!(kpi.total_elapsed > Duration::ZERO);
    assert!(kpi.qps().is_some());
    Ok(())
}

#[tokio::test]
async fn refused_connections_count_as_failures() -> Result<()> {
    let server = spawn_http_server().await?;
    let refused = refused_url().await?;
    let requests = vec![
        RequestDescriptor::new(server.url("/a")),
        RequestDescriptor::new(refused.clone()),
        RequestDescriptor::new(server.url("/b")),
        RequestDescriptor::new(refused),
    ];

    let report = Benchmarker::builder()
        .worker_count(1)
        .thresholds(wide_thresholds())
        .requests(requests)
        .build()?
        .run()
        .await?;

    let kpi = report.kpi("http-1").expect("aggregated record");
    assert_eq!(kpi.success, 2);
    assert_eq!(kpi.fail, 2);
    assert_eq!(kpi.success_ratio(), Some(0.5));
    assert_eq!(kpi.bucket_ratios(), vec![Some(0.5), Some(0.5)]);
    Ok(())
}

#[tokio::test]
async fn server_errors_still_count_as_responses() -> Result<()> {
    let server = spawn_http_server().await?;
    let requests = vec![
        RequestDescriptor::new(server.url("/error")),
        RequestDescriptor::new(server.url("/error")),
    ];

    let report = Benchmarker::builder()
        .worker_count(2)
        .requests(requests)
        .build()?
        .run()
        .await?;

    let kpi = report.kpi("http-2").expect("aggregated record");
    assert_eq!((kpi.success, kpi.fail), (2, 0));
    Ok(())
}

#[tokio::test]
async fn zero_workers_is_rejected_before_any_request() -> Result<()> {
    let result = Benchmarker::builder()
        .worker_count(0)
        .requests(vec![RequestDescriptor::new("http://127.0.0.1:9/")])
        .build();
    assert!(matches!(result, Err(BenchError::InvalidWorkerCount(0))));
    Ok(())
}

#[tokio::test]
async fn empty_workload_takes_the_guarded_path() -> Result<()> {
    let report = Benchmarker::builder().worker_count(3).build()?.run().await?;

    let kpi = report.kpi("http-3").expect("aggregated record");
    assert_eq!((kpi.success, kpi.fail), (0, 0));
    assert_eq!(kpi.qps(), None);
    assert_eq!(kpi.mean_latency(), None);

    let rendered = report.to_string();
    let row = rendered.lines().nth(1).expect("kpi row");
    assert!(row.starts_with("http-3\t0\t0\t0ns\t"));
    assert!(row.contains("n/a"));
    Ok(())
}

#[tokio::test]
async fn custom_workload_label_names_the_record() -> Result<()> {
    let server = spawn_http_server().await?;
    let report = Benchmarker::builder()
        .worker_count(2)
        .name("search")
        .requests(vec![RequestDescriptor::new(server.url("/q"))])
        .build()?
        .run()
        .await?;

    let kpi = report.kpi("search-2").expect("aggregated record");
    assert_eq!(kpi.success, 1);
    assert!(kpi.latency_at(0.99).is_some());
    Ok(())
}
