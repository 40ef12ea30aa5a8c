//! Classifier tests: rule ordering, quality precedence, provider attachment.

use super::*;
use crate::media::ContainerFormat;

const MIB: u64 = 1024 * 1024;

fn headers(ct: &str, len: u64) -> ResponseHeaders {
    ResponseHeaders::from_pairs([
        ("Content-Type", ct.to_string()),
        ("Content-Length", len.to_string()),
    ])
}

fn accept(v: Verdict) -> MediaDescriptor {
    match v {
        Verdict::Accept(d) => d,
        Verdict::Reject { rule } => panic!("expected accept, rejected by {rule}"),
    }
}

#[test]
fn master_playlist_is_adaptive_regardless_of_size() {
    let c = Classifier::default();
    let d = accept(c.classify("https://cdn.example.com/stream/master.m3u8", None));
    assert_eq!(d.resource_type, ResourceType::HlsMaster);
    assert_eq!(d.quality, Quality::Adaptive);
    assert_eq!(d.container_format, ContainerFormat::M3u8);
    assert_eq!(d.origin, Origin::NetworkUrlOnly);

    let small = headers("application/vnd.apple.mpegurl", 512);
    let d = accept(c.classify("https://cdn.example.com/stream/master.m3u8", Some(&small)));
    assert_eq!(d.resource_type, ResourceType::HlsMaster);
    assert_eq!(d.quality, Quality::Adaptive);
    assert_eq!(d.origin, Origin::NetworkHeaders);
}

#[test]
fn other_playlists_take_quality_from_url() {
    let c = Classifier::default();
    let d = accept(c.classify("https://cdn.example.com/hls/720p/index.m3u8", None));
    assert_eq!(d.resource_type, ResourceType::HlsPlaylist);
    assert_eq!(d.quality, Quality::P720);

    let h = headers("application/x-mpegurl", 2048);
    let d = accept(c.classify("https://cdn.example.com/hls/720p/index.m3u8", Some(&h)));
    assert_eq!(d.quality, Quality::P720, "playlist length must not bucket");
}

#[test]
fn dash_is_adaptive() {
    let d = accept(Classifier::default().classify("https://cdn.example.com/a/stream.mpd?x=1", None));
    assert_eq!(d.resource_type, ResourceType::Dash);
    assert_eq!(d.quality, Quality::Adaptive);
}

#[test]
fn blacklisted_urls_reject_regardless_of_headers() {
    let c = Classifier::default();
    let header_sets = [
        None,
        Some(headers("video/mp4", 900 * MIB)),
        Some(headers("application/vnd.apple.mpegurl", 1000)),
        Some(headers("application/dash+xml", 1000)),
    ];
    for url in [
        "https://cdn.example.com/player.js",
        "https://cdn.example.com/poster.png",
        "https://www.googletagmanager.com/gtm.mp4",
        "https://ads.example.net/preroll.mp4",
        "https://cdn.example.com/pixel/video.m3u8",
        "https://cdn.example.com/hls/seg1.ts",
    ] {
        for h in &header_sets {
            assert_eq!(
                c.classify(url, h.as_ref()),
                Verdict::Reject {
                    rule: "noise-blacklist"
                },
                "{url} with {h:?}"
            );
        }
    }
}

#[test]
fn content_length_beats_url_token() {
    let c = Classifier::default();
    let h = headers("video/mp4", 250 * MIB);
    let d = accept(c.classify("https://cdn.example.com/movie_480p.mp4", Some(&h)));
    assert_eq!(d.quality, Quality::P1080);
    assert_eq!(d.byte_size, Some(250 * MIB));

    let d = accept(c.classify("https://cdn.example.com/movie_480p.mp4", None));
    assert_eq!(d.quality, Quality::P480);
}

#[test]
fn small_known_length_is_unknown_even_with_token() {
    let c = Classifier::default();
    let h = headers("video/mp4", 5 * MIB);
    let d = accept(c.classify("https://cdn.example.com/movie_1080p.mp4", Some(&h)));
    assert_eq!(d.quality, Quality::Unknown);
}

#[test]
fn global_floor_rejects_tiny_video() {
    let c = Classifier::default();
    let h = headers("video/mp4", 20_000);
    assert_eq!(
        c.classify("https://cdn.example.com/get?id=1", Some(&h)),
        Verdict::Reject { rule: "min-size" }
    );
}

#[test]
fn direct_file_floor_is_higher_without_content_type() {
    let c = Classifier::default();
    let octet = ResponseHeaders::from_pairs([
        ("Content-Type", "application/octet-stream"),
        ("Content-Length", "500000"),
    ]);
    assert_eq!(
        c.classify("https://cdn.example.com/clip.mp4", Some(&octet)),
        Verdict::Reject { rule: "url-pattern" }
    );
    // Confirmed video only needs the global floor.
    let video = headers("video/mp4", 500_000);
    assert!(c.classify("https://cdn.example.com/clip.mp4", Some(&video)).is_accept());
}

#[test]
fn content_type_accepts_opaque_urls() {
    let c = Classifier::default();
    assert_eq!(
        c.classify("https://cdn.example.com/stream?id=7", None),
        Verdict::Reject { rule: NO_MATCH }
    );
    let h = headers("video/webm", 40 * MIB);
    let d = accept(c.classify("https://cdn.example.com/stream?id=7", Some(&h)));
    assert_eq!(d.resource_type, ResourceType::DirectFile(ContainerFormat::Webm));
    assert_eq!(d.quality, Quality::P480);
}

#[test]
fn provider_attached_without_changing_decision() {
    let c = Classifier::default();
    let d = accept(c.classify("https://dv97.sibnet.ru/v/abc/123.mp4", None));
    assert_eq!(d.provider.as_deref(), Some(provider::SIBNET));
    assert_eq!(d.url, "https://video.sibnet.ru/shell.php?videoid=123");
    assert_eq!(
        d.original_url.as_deref(),
        Some("https://dv97.sibnet.ru/v/abc/123.mp4")
    );

    let d = accept(c.classify("https://cdn.example.com/v.mp4", None));
    assert!(d.provider.is_none());
    assert!(d.original_url.is_none());
}

#[test]
fn vidmoly_segment_playlist_is_promoted_to_master() {
    let c = Classifier::default();
    let d = accept(c.classify(
        "https://box.vidmoly.me/hls/x,.urlset/index-v1-a1.m3u8?t=abc",
        None,
    ));
    assert_eq!(d.url, "https://box.vidmoly.me/hls/x,.urlset/master.m3u8?t=abc");
    assert_eq!(d.resource_type, ResourceType::HlsMaster);
    assert_eq!(d.quality, Quality::Adaptive);
    assert!(d.original_url.is_some());
}

#[test]
fn provider_suppressions_run_before_acceptance() {
    let c = Classifier::default();
    assert_eq!(
        c.classify("https://video.sibnet.ru/v/abc/123.mp4", None),
        Verdict::Reject {
            rule: "sibnet-placeholder"
        }
    );
    assert_eq!(
        c.classify("https://vd1.mycdn.me/x/thumbs/index.m3u8", None),
        Verdict::Reject {
            rule: "okru-thumbnail-playlist"
        }
    );
}

#[test]
fn standard_rule_order() {
    assert_eq!(
        Classifier::default().rule_names(),
        vec![
            "noise-blacklist",
            "sibnet-placeholder",
            "okru-thumbnail-playlist",
            "mailru-trimmed-clip",
            "doodstream-ad-small-file",
            "min-size",
            "content-type",
            "url-pattern",
        ]
    );
}

#[test]
fn custom_rule_list_is_respected() {
    struct RejectAll;
    impl Rule for RejectAll {
        fn name(&self) -> &'static str {
            "reject-all"
        }
        fn evaluate(&self, _: &RuleInput<'_>) -> RuleOutcome {
            RuleOutcome::Reject
        }
    }
    let c = Classifier::with_rules(
        vec![Box::new(RejectAll), Box::new(ContentType)],
        QualityBuckets::default(),
    );
    let h = headers("video/mp4", 900 * MIB);
    assert_eq!(
        c.classify("https://cdn.example.com/v.mp4", Some(&h)),
        Verdict::Reject { rule: "reject-all" }
    );
}

#[test]
fn configured_buckets_are_used() {
    let cfg = ClassifierConfig {
        quality_buckets: QualityBuckets {
            uhd_4k_bytes: 4 * MIB,
            p1080_bytes: 3 * MIB,
            p720_bytes: 2 * MIB,
            p480_bytes: MIB,
            p360_bytes: 1,
        },
        ..ClassifierConfig::default()
    };
    let c = Classifier::new(&cfg);
    let h = headers("video/mp4", 5 * MIB);
    let d = accept(c.classify("https://cdn.example.com/v.mp4", Some(&h)));
    assert_eq!(d.quality, Quality::Uhd4k);
}
