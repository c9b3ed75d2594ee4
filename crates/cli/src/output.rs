use chrono::{DateTime, Local};
use rootwalk_domain::{DnsAnswer, DomainError};
use std::fmt::Write;
use std::time::Duration;

const CTIME_LAYOUT: &str = "%a %b %e %H:%M:%S %Y";

/// dig-style result block.
pub fn render_answer(answer: &DnsAnswer, elapsed: Duration, when: DateTime<Local>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "QUESTION SECTION:");
    let _ = writeln!(out, "{}", answer.question);
    let _ = writeln!(out);
    let _ = writeln!(out, "ANSWER SECTION:");
    for record in &answer.answers {
        let _ = writeln!(out, "{}", record);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Query time: {:.2} msec", elapsed.as_secs_f64() * 1000.0);
    let _ = writeln!(out, "WHEN: {}", when.format(CTIME_LAYOUT));
    let _ = writeln!(out, "MSG SIZE rcvd: {}", answer.wire_size);
    out
}

pub fn failure_message(error: &DomainError) -> &'static str {
    if error.is_dnssec_unsupported() {
        "DNSSEC not supported"
    } else if error.is_dnssec_bogus() {
        "DNSSec verification failed"
    } else {
        "DNS Resolving Unsuccessful"
    }
}
