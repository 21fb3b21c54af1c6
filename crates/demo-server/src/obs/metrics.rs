//! Metrics registry for the demo server.
//!
//! Counter and histogram types with dynamic labels backed by `DashMap`. Labels
//! are flattened into sorted key vectors to keep deterministic ordering.
//! Histogram buckets are fixed in milliseconds; sums are accumulated in
//! nanoseconds and rendered as fractional milliseconds.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Service name attached to every request duration sample.
pub const SERVER_NAME: &str = "http-server-demo";

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

type LabelKey = Vec<(String, String)>;

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn label_str(key: &[(String, String)]) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>().join(",")
}

fn write_header(out: &mut String, name: &str, help: &str, kind: &str) {
    let _ = writeln!(out, "# HELP {} {}", name, help);
    let _ = writeln!(out, "# TYPE {} {}", name, kind);
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self.map.entry(label_key(labels)).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for a label set (0 when never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, help: &str, out: &mut String) {
        write_header(out, name, help, "counter");
        for r in self.map.iter() {
            let val = r.value().load(Ordering::Relaxed);
            let labels = label_str(r.key());
            if labels.is_empty() {
                let _ = writeln!(out, "{} {}", name, val);
            } else {
                let _ = writeln!(out, "{}{{{}}} {}", name, labels, val);
            }
        }
    }
}

/// Request latency buckets, in milliseconds.
pub const BUCKETS_MILLIS: [f64; 11] = [0.5, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 300.0, 500.0, 1000.0, 5000.0];

#[derive(Default)]
struct AtomicHistogram {
    count: AtomicU64,
    sum_nanos: AtomicU64,
    buckets: [AtomicU64; BUCKETS_MILLIS.len()],
}

pub struct HistogramVec {
    const_labels: Vec<(String, String)>,
    map: DashMap<LabelKey, AtomicHistogram>,
}

impl HistogramVec {
    /// Histogram whose samples all carry `const_labels` in addition to their own.
    pub fn with_const_labels(const_labels: &[(&str, &str)]) -> Self {
        Self { const_labels: label_key(const_labels), map: DashMap::new() }
    }

    /// Observe a duration and increment cumulative buckets (millisecond scale).
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let hist = self.map.entry(label_key(labels)).or_insert_with(AtomicHistogram::default);
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        let millis = duration.as_secs_f64() * 1_000.0;

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum_nanos.fetch_add(nanos, Ordering::Relaxed);

        for (i, &b) in BUCKETS_MILLIS.iter().enumerate() {
            if millis <= b {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Number of samples observed for a label set.
    pub fn sample_count(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|h| h.count.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format (unit: milliseconds).
    fn render(&self, name: &str, help: &str, out: &mut String) {
        write_header(out, name, help, "histogram");
        for r in self.map.iter() {
            let hist = r.value();

            let mut key = r.key().clone();
            key.extend(self.const_labels.iter().cloned());
            key.sort();
            let labels = label_str(&key);
            let prefix = if labels.is_empty() { String::new() } else { format!("{},", labels) };

            for (i, &le) in BUCKETS_MILLIS.iter().enumerate() {
                let count = hist.buckets[i].load(Ordering::Relaxed);
                let _ = writeln!(out, "{}_bucket{{{}le=\"{}\"}} {}", name, prefix, le, count);
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, count);

            let sum = hist.sum_nanos.load(Ordering::Relaxed) as f64 / 1_000_000.0;
            let _ = writeln!(out, "{}_sum{{{}}} {}", name, labels, sum);
            let _ = writeln!(out, "{}_count{{{}}} {}", name, labels, count);
        }
    }
}

pub struct DemoMetrics {
    pub hello_requests: CounterVec,
    pub http_server_duration: HistogramVec, // In Milliseconds
    started_at: f64,
}

impl Default for DemoMetrics {
    fn default() -> Self {
        let started_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        // exported as 0 before the first call
        let hello_requests = CounterVec::default();
        hello_requests.add(&[], 0);

        Self {
            hello_requests,
            http_server_duration: HistogramVec::with_const_labels(&[("http_scheme", "http")]),
            started_at,
        }
    }
}

impl DemoMetrics {
    /// Record one routed request.
    pub fn observe_request(&self, route: &str, method: &str, status: u16, elapsed: Duration) {
        let status = status.to_string();
        self.http_server_duration.observe(
            &[
                ("http_server_name", SERVER_NAME),
                ("http_route", route),
                ("http_method", method),
                ("http_status_code", &status),
            ],
            elapsed,
        );
    }

    /// Render all registered metrics.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.hello_requests.render("hello_request_total", "Number of requests", &mut out);
        self.http_server_duration.render(
            "http_server_duration",
            "HTTP server request duration histogram in milliseconds",
            &mut out,
        );

        write_header(
            &mut out,
            "process_start_time_seconds",
            "Start time of the process since unix epoch in seconds.",
            "gauge",
        );
        let _ = writeln!(out, "process_start_time_seconds {}", self.started_at);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_without_labels_renders_bare_name() {
        let m = DemoMetrics::default();
        m.hello_requests.inc(&[]);
        m.hello_requests.inc(&[]);
        assert_eq!(m.hello_requests.get(&[]), 2);

        let out = m.render();
        assert!(out.contains("# TYPE hello_request_total counter\n"));
        assert!(out.contains("\nhello_request_total 2\n"));
    }

    #[test]
    fn hello_counter_is_exported_from_startup() {
        let out = DemoMetrics::default().render();
        assert!(out.contains("\nhello_request_total 0\n"));
    }

    #[test]
    fn histogram_buckets_are_cumulative_in_millis() {
        let h = HistogramVec::with_const_labels(&[("http_scheme", "http")]);
        h.observe(&[("http_route", "/hello")], Duration::from_micros(700));
        h.observe(&[("http_route", "/hello")], Duration::from_millis(20));

        let mut out = String::new();
        h.render("d", "help", &mut out);

        assert!(out.contains(r#"d_bucket{http_route="/hello",http_scheme="http",le="0.5"} 0"#));
        assert!(out.contains(r#"d_bucket{http_route="/hello",http_scheme="http",le="1"} 1"#));
        assert!(out.contains(r#"d_bucket{http_route="/hello",http_scheme="http",le="25"} 2"#));
        assert!(out.contains(r#"d_bucket{http_route="/hello",http_scheme="http",le="+Inf"} 2"#));
        assert!(out.contains(r#"d_sum{http_route="/hello",http_scheme="http"} 20.7"#));
        assert!(out.contains(r#"d_count{http_route="/hello",http_scheme="http"} 2"#));
    }

    #[test]
    fn request_samples_carry_all_labels() {
        let m = DemoMetrics::default();
        m.observe_request("/redis/get/demo", "GET", 404, Duration::from_millis(3));

        let labels = [
            ("http_server_name", SERVER_NAME),
            ("http_route", "/redis/get/demo"),
            ("http_method", "GET"),
            ("http_status_code", "404"),
        ];
        assert_eq!(m.http_server_duration.sample_count(&labels), 1);

        let out = m.render();
        assert!(out.contains(r#"http_server_name="http-server-demo""#));
        assert!(out.contains(r#"http_status_code="404""#));
        assert!(out.contains("process_start_time_seconds "));
    }

    #[test]
    fn label_values_are_escaped() {
        assert_eq!(escape_label("a\"b\\c\nd"), "a\\\"b\\\\c\\nd");
    }
}
