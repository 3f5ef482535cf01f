mod common;

use common::mock_backend::{playlist_json, song_json, MockBackend};
use playshift_core::model::{ConversionRequest, Platform, PlaylistDraft, SongDraft, SongQuery};
use playshift_core::Error;
use serde_json::json;

#[tokio::test]
async fn health_and_auth_url() {
    let backend = MockBackend::start().await;
    let api = backend.client();

    api.health().await.expect("health");
    let url = api.auth_url(Platform::Youtube).await.expect("auth url");
    assert_eq!(url, "https://auth.example/youtube?state=xyz");
    assert_eq!(backend.count("GET", "/auth/youtube"), 1);
}

#[tokio::test]
async fn list_endpoints_decode_envelope_and_bare_array() {
    let backend = MockBackend::start().await;
    backend.seed_playlist(playlist_json("p1", "spotify", &["s1", "s2", "s1"]));
    backend.seed_playlist(playlist_json("p2", "youtube", &[]));
    backend.seed_song(song_json("s1", "Heroes"));
    let api = backend.client();

    let playlists = api.list_playlists().await.expect("playlists");
    assert_eq!(playlists.len(), 2);
    // duplicate song id dropped on decode
    assert_eq!(playlists[0].songs.len(), 2);
    assert_eq!(playlists[1].platform, Platform::Youtube);

    let songs = api.list_songs().await.expect("songs");
    assert_eq!(songs.len(), 1);
    assert_eq!(songs[0].spotify_id.as_deref(), Some("sp-s1"));
    assert!(songs[0].youtube_id.is_none());
    assert!(songs[0].created_at <= songs[0].updated_at);
}

#[tokio::test]
async fn create_update_delete_playlist() {
    let backend = MockBackend::start().await;
    let api = backend.client();

    let created = api
        .create_playlist(&PlaylistDraft {
            name: Some("Road trip".into()),
            platform: Some(Platform::Spotify),
            external_id: Some("XYZ".into()),
            ..Default::default()
        })
        .await
        .expect("create");
    assert_eq!(created.name, "Road trip");
    assert_eq!(created.external_id, "XYZ");

    let sent = backend.requests().last().cloned().unwrap();
    assert_eq!(
        sent.body,
        json!({"name": "Road trip", "platform": "spotify", "external_id": "XYZ"})
    );

    let updated = api
        .update_playlist(
            &created.id,
            &PlaylistDraft {
                description: Some("summer".into()),
                ..Default::default()
            },
        )
        .await
        .expect("update")
        .expect("entity in reply");
    assert_eq!(updated.description, "summer");
    assert_eq!(api.get_playlist(&created.id).await.unwrap().description, "summer");

    api.delete_playlist(&created.id).await.expect("delete");
    assert_eq!(backend.playlist_count(), 0);
}

#[tokio::test]
async fn update_accepts_message_only_reply() {
    let backend = MockBackend::start().await;
    backend.seed_playlist(playlist_json("p1", "spotify", &[]));
    backend.seed_song(song_json("s1", "Heroes"));
    backend.ack_updates();
    let api = backend.client();

    let reply = api
        .update_playlist(
            "p1",
            &PlaylistDraft {
                name: Some("Renamed".into()),
                ..Default::default()
            },
        )
        .await
        .expect("acknowledged update is not an error");
    assert!(reply.is_none());
    assert_eq!(api.get_playlist("p1").await.unwrap().name, "Renamed");

    let reply = api
        .update_song(
            "s1",
            &SongDraft {
                album: Some("Low".into()),
                ..Default::default()
            },
        )
        .await
        .expect("acknowledged update is not an error");
    assert!(reply.is_none());
    assert_eq!(backend.count("PUT", "/songs/s1"), 1);
}

#[tokio::test]
async fn search_query_with_spaces_round_trips() {
    let backend = MockBackend::start().await;
    backend.seed_song(song_json("s1", "Heroes"));
    backend.seed_song(song_json("s2", "Ashes to Ashes"));
    let api = backend.client();

    let hits = api
        .search_songs(&SongQuery {
            query: "ashes to".into(),
            limit: None,
        })
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "s2");
}

#[tokio::test]
async fn convert_reply_can_report_failure() {
    let backend = MockBackend::start().await;
    backend.seed_playlist(playlist_json("p1", "spotify", &["s1"]));
    backend.refuse_conversions("YouTube quota exceeded");
    let api = backend.client();
    let playlist = api.get_playlist("p1").await.unwrap();

    let result = api
        .convert_playlist("p1", &ConversionRequest::for_playlist(&playlist))
        .await
        .expect("2xx reply decodes");
    assert!(!result.success);
    assert_eq!(result.message, "YouTube quota exceeded");
    assert_eq!(backend.playlist_count(), 1);
}

#[tokio::test]
async fn missing_playlist_maps_to_status_error() {
    let backend = MockBackend::start().await;
    let api = backend.client();

    match api.get_playlist("nope").await {
        Err(Error::Status { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Playlist not found");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn injected_failure_carries_backend_message() {
    let backend = MockBackend::start().await;
    backend.fail("GET", "/api/v1/songs", 500);
    let api = backend.client();

    let err = api.list_songs().await.unwrap_err();
    assert!(err.is_network());
    assert_eq!(err.to_string(), "HTTP 500: injected failure");
    // only the first call fails
    assert!(api.list_songs().await.is_ok());
}

#[tokio::test]
async fn convert_and_sync() {
    let backend = MockBackend::start().await;
    backend.seed_playlist(playlist_json("p1", "spotify", &["s1", "s2"]));
    let api = backend.client();
    let playlist = api.get_playlist("p1").await.unwrap();

    let req = ConversionRequest::for_playlist(&playlist);
    let result = api.convert_playlist("p1", &req).await.expect("convert");
    assert!(result.success);
    assert_eq!(result.converted_songs, 2);
    assert!(result.failed_songs.is_empty());

    let sent = backend
        .requests()
        .into_iter()
        .find(|r| r.path.ends_with("/convert"))
        .unwrap();
    assert_eq!(
        sent.body,
        json!({"playlist_id": "p1", "source_platform": "spotify", "target_platform": "youtube"})
    );

    let all = api.list_playlists().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].platform, Platform::Youtube);

    api.sync_playlist("p1").await.expect("sync");
    assert!(api.sync_playlist("missing").await.is_err());
}

#[tokio::test]
async fn song_crud_and_search() {
    let backend = MockBackend::start().await;
    backend.seed_song(song_json("s1", "Heroes"));
    backend.seed_song(song_json("s2", "Ashes to Ashes"));
    let api = backend.client();

    let created = api
        .create_song(&SongDraft {
            title: Some("Life on Mars".into()),
            duration: Some(233),
            ..Default::default()
        })
        .await
        .expect("create song");
    assert_eq!(created.duration, 233);

    let renamed = api
        .update_song(
            "s1",
            &SongDraft {
                title: Some("Heroes (2017)".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.title, "Heroes (2017)");
    assert_eq!(api.get_song("s1").await.unwrap().title, "Heroes (2017)");

    let hits = api
        .search_songs(&SongQuery {
            query: "ashes".into(),
            limit: Some(10),
        })
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "s2");
    let sent = backend
        .requests()
        .into_iter()
        .find(|r| r.path.ends_with("/songs/search"))
        .unwrap();
    assert_eq!(sent.query.as_deref(), Some("q=ashes&limit=10"));
    assert_eq!(sent.body, json!({"query": "ashes", "limit": 10}));

    api.delete_song("s2").await.unwrap();
    assert_eq!(backend.song_count(), 2);
}

#[tokio::test]
async fn unreachable_backend_is_network_error() {
    let backend = MockBackend::start().await;
    let api = backend.client();
    drop(backend);
    // give the aborted server a moment to release the socket
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let err = api.health().await.unwrap_err();
    assert!(err.is_network());
}
