//! HAR (HTTP Archive) input: recorded traffic replayed through the engine
//! for offline analysis.

mod parse;
mod replay;

pub use replay::{replay_har, ReplaySummary};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::exchange::ContextId;
    use crate::media::{Origin, Quality, ResourceType};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn har_file(json: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(json.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn replay_classifies_with_headers() {
        let f = har_file(
            r#"{
            "log": {
                "version": "1.2",
                "entries": [
                    {
                        "request": { "url": "https://site.example/app.js" },
                        "response": { "status": 200, "headers": [
                            { "name": "Content-Type", "value": "text/javascript" }
                        ] }
                    },
                    {
                        "request": { "url": "https://cdn.example.com/hls/master.m3u8?t=1" },
                        "response": { "status": 200, "headers": [
                            { "name": "Content-Type", "value": "application/vnd.apple.mpegurl" }
                        ] },
                        "time": 120
                    },
                    {
                        "request": { "url": "https://cdn.example.com/get?id=9" },
                        "response": { "status": 200, "headers": [
                            { "name": "content-type", "value": "video/mp4" },
                            { "name": "content-length", "value": "104857600" }
                        ] }
                    }
                ]
            }
        }"#,
        );
        let engine = Engine::default();
        let ctx = ContextId::new("har");
        let summary = replay_har(f.path(), &engine, &ctx).unwrap();
        assert_eq!(summary, ReplaySummary { entries: 3, added: 2 });

        let list = engine.list(&ctx);
        assert_eq!(list[0].descriptor.resource_type, ResourceType::HlsMaster);
        assert_eq!(list[0].descriptor.origin, Origin::NetworkHeaders);
        assert_eq!(list[1].descriptor.quality, Quality::P720);
        assert_eq!(engine.pending_count(&ctx), 0);
    }

    #[test]
    fn replay_uses_content_mime_when_headers_missing() {
        let f = har_file(
            r#"{"log":{"entries":[{
                "request": { "url": "https://cdn.example.com/stream?v=3" },
                "response": { "status": 200, "headers": [],
                    "content": { "size": 41943040, "mimeType": "video/webm" } }
            }]}}"#,
        );
        let engine = Engine::default();
        let ctx = ContextId::new("har");
        replay_har(f.path(), &engine, &ctx).unwrap();
        let list = engine.list(&ctx);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].descriptor.quality, Quality::P480);
    }

    #[test]
    fn unanswered_request_falls_back_to_url() {
        let f = har_file(
            r#"{"log":{"entries":[
                { "request": { "url": "https://cdn.example.com/v/movie.mpd" },
                  "response": { "status": 0 }, "time": 30 },
                { "request": { "url": "https://cdn.example.com/v/slow.mpd" },
                  "response": { "status": 0 }, "time": 9000 }
            ]}}"#,
        );
        let engine = Engine::default();
        let ctx = ContextId::new("har");
        let summary = replay_har(f.path(), &engine, &ctx).unwrap();
        assert_eq!(summary.added, 1);
        let list = engine.list(&ctx);
        assert_eq!(list[0].descriptor.origin, Origin::ManifestFallback);
        assert_eq!(list[0].descriptor.url, "https://cdn.example.com/v/movie.mpd");
    }

    #[test]
    fn absurd_entry_time_counts_as_expired() {
        let f = har_file(
            r#"{"log":{"entries":[
                { "request": { "url": "https://cdn.example.com/v/huge.mpd" },
                  "response": { "status": 0 }, "time": 1e300 },
                { "request": { "url": "https://cdn.example.com/v/fine.mpd" },
                  "response": { "status": 0 }, "time": 10 }
            ]}}"#,
        );
        let engine = Engine::default();
        let ctx = ContextId::new("har");
        let summary = replay_har(f.path(), &engine, &ctx).unwrap();
        assert_eq!(summary, ReplaySummary { entries: 2, added: 1 });
        assert_eq!(engine.list(&ctx)[0].descriptor.url, "https://cdn.example.com/v/fine.mpd");
    }

    #[test]
    fn invalid_json_is_an_error() {
        let f = har_file("{ not json");
        let engine = Engine::default();
        let err = replay_har(f.path(), &engine, &ContextId::new("x")).unwrap_err();
        assert!(format!("{err:#}").contains("parse HAR JSON"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let engine = Engine::default();
        let err = replay_har(
            std::path::Path::new("/nonexistent/capture.har"),
            &engine,
            &ContextId::new("x"),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("read HAR file"));
    }
}
