mod support;

use flickr_gallery::app::{Gallery, Key, LightboxController, LightboxState, RenderOutcome};
use flickr_gallery::common::constants::{
    COVER_LOAD_FAILED, EMPTY_RESULT, LOAD_TIMED_OUT, PHOTO_UNAVAILABLE_TITLE, PHOTO_UNAVAILABLE_URL,
};
use flickr_gallery::{GalleryConfig, GalleryError, PhotoRecord};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use support::{ok_envelope, photo_json, photo_url, FakeFlickr, RecordingView, ViewEvent, API_URL};

fn config() -> GalleryConfig {
    let mut config = GalleryConfig::with_api_key("key");
    config.api_url = API_URL.to_string();
    config
}

fn records(ids: &[&str]) -> Vec<PhotoRecord> {
    ids.iter()
        .map(|id| serde_json::from_value(photo_json(id)).unwrap())
        .collect()
}

fn controller(http: FakeFlickr) -> (LightboxController, Arc<RecordingView>) {
    let view = Arc::new(RecordingView::default());
    let lightbox = LightboxController::new(Arc::new(http), view.clone(), PHOTO_UNAVAILABLE_URL);
    (lightbox, view)
}

#[tokio::test]
async fn test_next_saturates_at_last_photo() {
    let ids = ["a", "b", "c", "d"];
    let (mut lightbox, view) = controller(FakeFlickr::answering(json!({})));
    lightbox.on_photos_fetched(records(&ids)).unwrap();
    assert_eq!(lightbox.cursor(), Some(0));

    for _ in 0..ids.len() {
        assert_eq!(lightbox.next().await, Some(RenderOutcome::Shown));
    }
    assert_eq!(lightbox.cursor(), Some(ids.len() - 1));
    assert_eq!(view.last().await, Some(ViewEvent::Photo("d".to_string())));

    lightbox.next().await;
    assert_eq!(lightbox.cursor(), Some(3));
}

#[tokio::test]
async fn test_prev_at_first_photo_is_a_no_op() {
    let (mut lightbox, _view) = controller(FakeFlickr::answering(json!({})));
    lightbox.on_photos_fetched(records(&["a", "b"])).unwrap();

    lightbox.prev().await;
    lightbox.prev().await;
    assert_eq!(lightbox.cursor(), Some(0));
    assert_eq!(lightbox.current().map(|p| p.id.as_str()), Some("a"));

    lightbox.next().await;
    lightbox.prev().await;
    assert_eq!(lightbox.cursor(), Some(0));
}

#[tokio::test]
async fn test_single_photo_list_never_moves() {
    let (mut lightbox, _view) = controller(FakeFlickr::answering(json!({})));
    lightbox.on_photos_fetched(records(&["only"])).unwrap();

    lightbox.next().await;
    lightbox.prev().await;
    assert_eq!(lightbox.cursor(), Some(0));
}

#[tokio::test]
async fn test_empty_list_is_refused() {
    let (mut lightbox, view) = controller(FakeFlickr::answering(json!({})));

    let err = lightbox.on_photos_fetched(Vec::new()).unwrap_err();
    assert!(matches!(err, GalleryError::EmptyResult));
    assert_eq!(lightbox.state(), &LightboxState::Empty);
    assert_eq!(lightbox.render().await, None);
    assert_eq!(lightbox.next().await, None);
    assert!(view.events().await.is_empty());
}

#[tokio::test]
async fn test_list_is_populated_only_once() {
    let (mut lightbox, _view) = controller(FakeFlickr::answering(json!({})));
    lightbox.on_photos_fetched(records(&["a", "b"])).unwrap();
    lightbox.next().await;

    lightbox.on_photos_fetched(records(&["x"])).unwrap();
    assert_eq!(lightbox.len(), 2);
    assert_eq!(lightbox.cursor(), Some(1));
}

#[tokio::test]
async fn test_broken_image_shows_placeholder_and_navigation_continues() {
    let http = FakeFlickr::answering(json!({})).breaking(photo_url("b"));
    let (mut lightbox, view) = controller(http);
    lightbox.on_photos_fetched(records(&["a", "b", "c"])).unwrap();

    assert_eq!(lightbox.next().await, Some(RenderOutcome::Unavailable));
    assert_eq!(lightbox.cursor(), Some(1));
    assert_eq!(
        view.last().await,
        Some(ViewEvent::Unavailable {
            image_url: PHOTO_UNAVAILABLE_URL.to_string(),
            title: PHOTO_UNAVAILABLE_TITLE.to_string(),
        })
    );

    assert_eq!(lightbox.next().await, Some(RenderOutcome::Shown));
    assert_eq!(view.last().await, Some(ViewEvent::Photo("c".to_string())));
    assert_eq!(lightbox.len(), 3);
}

#[tokio::test]
async fn test_load_renders_cover_and_first_photo() {
    let http = Arc::new(FakeFlickr::answering(ok_envelope(&["a", "b"])));
    let view = Arc::new(RecordingView::default());
    let mut gallery = Gallery::new(&config(), http, view.clone());

    assert_eq!(gallery.load().await.unwrap(), 2);
    assert_eq!(
        view.events().await,
        vec![ViewEvent::Cover("a".to_string()), ViewEvent::Photo("a".to_string())]
    );
    assert!(!gallery.is_lightbox_visible());
}

#[tokio::test]
async fn test_cover_failure_is_reported_in_the_cover_region() {
    let http = Arc::new(FakeFlickr::answering(ok_envelope(&["a"])).breaking(photo_url("a")));
    let view = Arc::new(RecordingView::default());
    let mut gallery = Gallery::new(&config(), http, view.clone());

    gallery.load().await.unwrap();
    let events = view.events().await;
    assert_eq!(events[0], ViewEvent::CoverFailed(COVER_LOAD_FAILED.to_string()));
    assert!(view.errors().await.is_empty());
}

#[tokio::test]
async fn test_api_failure_reports_mapped_message() {
    let http = Arc::new(FakeFlickr::answering(json!({ "stat": "fail", "code": 100 })));
    let view = Arc::new(RecordingView::default());
    let mut gallery = Gallery::new(&config(), http, view.clone());

    let err = gallery.load().await.unwrap_err();
    assert!(matches!(err, GalleryError::Api { code: Some(100), .. }));
    assert_eq!(
        view.errors().await,
        vec!["Invalid API Key. The API key passed was not valid or has expired.".to_string()]
    );
    assert!(!gallery.lightbox().is_loaded());
}

#[tokio::test]
async fn test_empty_response_reports_empty_result() {
    let http = Arc::new(FakeFlickr::answering(ok_envelope(&[])));
    let view = Arc::new(RecordingView::default());
    let mut gallery = Gallery::new(&config(), http, view.clone());

    let err = gallery.load().await.unwrap_err();
    assert!(matches!(err, GalleryError::EmptyResult));
    assert_eq!(view.events().await, vec![ViewEvent::Error(EMPTY_RESULT.to_string())]);
    assert!(!gallery.open_lightbox().await);
}

#[tokio::test(start_paused = true)]
async fn test_deadline_wins_and_late_response_is_ignored() {
    let http = Arc::new(FakeFlickr::answering(ok_envelope(&["a"])).delayed(Duration::from_secs(10)));
    let view = Arc::new(RecordingView::default());
    let mut gallery = Gallery::new(&config(), http.clone(), view.clone());

    let err = gallery.load().await.unwrap_err();
    assert!(matches!(err, GalleryError::Timeout(d) if d == Duration::from_secs(5)));

    // Let the would-be response time pass; nothing else may reach the view
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(view.events().await, vec![ViewEvent::Error(LOAD_TIMED_OUT.to_string())]);
    assert!(!gallery.lightbox().is_loaded());
    assert_eq!(http.requests.lock().await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_response_before_deadline_cancels_the_timer() {
    let http = Arc::new(FakeFlickr::answering(ok_envelope(&["a"])).delayed(Duration::from_secs(1)));
    let view = Arc::new(RecordingView::default());
    let mut gallery = Gallery::new(&config(), http, view.clone());

    assert_eq!(gallery.load().await.unwrap(), 1);
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(view.errors().await.is_empty());
}

#[tokio::test]
async fn test_keys_only_act_while_lightbox_is_visible() {
    let http = Arc::new(FakeFlickr::answering(ok_envelope(&["a", "b", "c"])));
    let view = Arc::new(RecordingView::default());
    let mut gallery = Gallery::new(&config(), http, view.clone());
    gallery.load().await.unwrap();

    assert_eq!(gallery.handle_key(Key::Right).await, None);
    assert_eq!(gallery.lightbox().cursor(), Some(0));

    assert!(gallery.open_lightbox().await);
    assert_eq!(gallery.handle_key(Key::Right).await, Some(RenderOutcome::Shown));
    assert_eq!(gallery.handle_key(Key::Right).await, Some(RenderOutcome::Shown));
    assert_eq!(gallery.handle_key(Key::Left).await, Some(RenderOutcome::Shown));
    assert_eq!(gallery.lightbox().cursor(), Some(1));
    assert_eq!(gallery.handle_key(Key::Other).await, None);

    assert_eq!(gallery.handle_key(Key::Escape).await, None);
    assert!(!gallery.is_lightbox_visible());
    assert_eq!(view.last().await, Some(ViewEvent::Visible(false)));

    assert_eq!(gallery.handle_key(Key::Right).await, None);
    assert_eq!(gallery.lightbox().cursor(), Some(1));
}

#[tokio::test]
async fn test_buttons_navigate_regardless_of_keyboard_state() {
    let http = Arc::new(FakeFlickr::answering(ok_envelope(&["a", "b"])));
    let view = Arc::new(RecordingView::default());
    let mut gallery = Gallery::new(&config(), http, view.clone());
    gallery.load().await.unwrap();

    gallery.next().await;
    gallery.next().await;
    assert_eq!(gallery.lightbox().cursor(), Some(1));
    gallery.prev().await;
    assert_eq!(gallery.lightbox().cursor(), Some(0));
}
