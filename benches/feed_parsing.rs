//! Benchmarks for podcast feed parsing
//!
//! Tests parsing speed for feeds of increasing episode counts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mediabridge::embed::feed::parse_feed;

/// Build an RSS document with `episodes` items, each carrying the usual
/// itunes extension noise.
fn feed_with(episodes: usize) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
<channel>
  <title>Benchmark Radio</title>
  <description><![CDATA[A show about <em>speed</em>.]]></description>
  <itunes:author>Bench</itunes:author>
"#,
    );

    for i in 0..episodes {
        xml.push_str(&format!(
            r#"  <item>
    <title>Episode {i}: Tides &amp; Currents</title>
    <itunes:duration>00:42:{:02}</itunes:duration>
    <description><![CDATA[<p>Notes for episode {i}</p>]]></description>
    <enclosure url="https://cdn.bench.test/ep{i}.mp3" length="40000000" type="audio/mpeg"/>
    <guid isPermaLink="false">bench-{i}</guid>
  </item>
"#,
            i % 60
        ));
    }

    xml.push_str("</channel>\n</rss>\n");
    xml
}

fn bench_parse_feed(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_feed");

    for episodes in [10, 100, 1000] {
        let xml = feed_with(episodes);
        group.throughput(Throughput::Bytes(xml.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(episodes), &xml, |b, xml| {
            b.iter(|| parse_feed(black_box(xml.as_bytes())))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_feed);
criterion_main!(benches);
