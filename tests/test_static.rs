mod common;

use std::io::Read;

use flate2::read::GzDecoder;
use hearth::error::ServerError;
use hearth::http::request::{Request, RequestBuilder};
use hearth::http::response::Response;
use hearth::http::static_files::{StaticFiles, is_static_path};

fn request(path: &str, range: Option<&str>) -> Request {
    let mut builder = RequestBuilder::new().path(path);
    if let Some(range) = range {
        builder = builder.header("Range", range);
    }
    builder.build().unwrap()
}

async fn body_of(res: &mut Response) -> Vec<u8> {
    let mut out = Vec::new();
    res.stream_body(&mut out).await;
    out
}

#[test]
fn test_static_prefix_detection() {
    assert!(is_static_path(&request("/static/a.js", None)));
    assert!(is_static_path(&request("/static", None)));
    assert!(!is_static_path(&request("/staticfiles/a.js", None)));
    assert!(!is_static_path(&request("/assets/static/a.js", None)));
}

#[tokio::test]
async fn test_plain_file_headers_and_body() {
    let dir = common::scratch_dir("plain");
    std::fs::write(dir.join("static/notes.txt"), b"just text").unwrap();
    let files = StaticFiles::new(&dir);

    let mut res = Response::new();
    files
        .prepare(&request("/static/notes.txt", None), &mut res)
        .await
        .unwrap();

    assert_eq!(res.header("Content-Length"), Some("9"));
    assert_eq!(res.header("Accept-Ranges"), Some("bytes"));
    assert_eq!(res.header("Content-Type"), None);
    assert!(res.status().is_none());
    assert_eq!(body_of(&mut res).await, b"just text");
}

#[tokio::test]
async fn test_js_file_is_not_compressed() {
    let dir = common::scratch_dir("js");
    std::fs::write(dir.join("static/app.js"), b"console.log(1);").unwrap();
    let files = StaticFiles::new(&dir);

    let mut res = Response::new();
    files.prepare(&request("/static/app.js", None), &mut res).await.unwrap();

    assert_eq!(res.header("Content-Type"), Some("application/javascript"));
    assert_eq!(res.header("Content-Encoding"), None);
    assert_eq!(body_of(&mut res).await, b"console.log(1);");
}

#[tokio::test]
async fn test_html_file_is_gzipped() {
    let dir = common::scratch_dir("html");
    let page = "<html><body>".to_string() + &"hello ".repeat(500) + "</body></html>";
    std::fs::write(dir.join("static/index.html"), &page).unwrap();
    let files = StaticFiles::new(&dir);

    let mut res = Response::new();
    files
        .prepare(&request("/static/index.html", None), &mut res)
        .await
        .unwrap();
    let body = body_of(&mut res).await;

    assert_eq!(res.header("Content-Type"), Some("text/html"));
    assert_eq!(res.header("Content-Encoding"), Some("gzip"));
    assert_eq!(res.header("Content-Length"), Some(body.len().to_string().as_str()));
    assert_ne!(body.len(), page.len());

    let mut decoded = String::new();
    GzDecoder::new(&body[..]).read_to_string(&mut decoded).unwrap();
    assert_eq!(decoded, page);
}

#[tokio::test]
async fn test_mp4_range_is_partial_content() {
    let dir = common::scratch_dir("mp4-range");
    let video = common::sample_bytes(1000);
    std::fs::write(dir.join("static/clip.mp4"), &video).unwrap();
    let files = StaticFiles::new(&dir);

    let mut res = Response::new();
    files
        .prepare(&request("/static/clip.mp4", Some("bytes=100-")), &mut res)
        .await
        .unwrap();

    let status = res.status().unwrap();
    assert_eq!((status.code, status.reason.as_str()), (206, "Partial Content"));
    assert_eq!(res.header("Content-Type"), Some("video/mp4"));
    assert_eq!(res.header("Content-Length"), Some("900"));
    assert_eq!(res.header("Content-Range"), Some("bytes 100-999/1000"));
    assert_eq!(body_of(&mut res).await, &video[100..]);
}

#[tokio::test]
async fn test_mp4_closed_range_serves_from_start_offset() {
    let dir = common::scratch_dir("mp4-closed");
    let video = common::sample_bytes(500);
    std::fs::write(dir.join("static/clip.mp4"), &video).unwrap();
    let files = StaticFiles::new(&dir);

    let mut res = Response::new();
    files
        .prepare(&request("/static/clip.mp4", Some("bytes=10-19")), &mut res)
        .await
        .unwrap();

    assert_eq!(res.header("Content-Range"), Some("bytes 10-499/500"));
    assert_eq!(body_of(&mut res).await, &video[10..]);
}

#[tokio::test]
async fn test_mp4_without_range_is_full_content() {
    let dir = common::scratch_dir("mp4-full");
    std::fs::write(dir.join("static/clip.mp4"), common::sample_bytes(64)).unwrap();
    let files = StaticFiles::new(&dir);

    let mut res = Response::new();
    files.prepare(&request("/static/clip.mp4", None), &mut res).await.unwrap();

    assert!(res.status().is_none());
    assert_eq!(res.header("Content-Type"), Some("video/mp4"));
    assert_eq!(res.header("Content-Length"), Some("64"));
    assert_eq!(res.header("Content-Range"), None);
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let dir = common::scratch_dir("missing");
    let files = StaticFiles::new(&dir);

    let result = files.prepare(&request("/static/missing.html", None), &mut Response::new()).await;

    assert!(matches!(result, Err(ServerError::ResourceNotFound(_))));
}

#[tokio::test]
async fn test_directory_is_not_found() {
    let dir = common::scratch_dir("directory");
    let files = StaticFiles::new(&dir);

    let result = files.prepare(&request("/static", None), &mut Response::new()).await;

    assert!(matches!(result, Err(ServerError::ResourceNotFound(_))));
}

#[tokio::test]
async fn test_parent_segments_are_refused() {
    let dir = common::scratch_dir("traversal");
    std::fs::write(dir.join("secret.txt"), b"top secret").unwrap();
    let files = StaticFiles::new(&dir);

    let result = files.prepare(&request("/static/../secret.txt", None), &mut Response::new()).await;

    assert!(matches!(result, Err(ServerError::ResourceNotFound(_))));
}

#[tokio::test]
async fn test_malformed_range_is_rejected() {
    let dir = common::scratch_dir("bad-range");
    std::fs::write(dir.join("static/clip.mp4"), common::sample_bytes(10)).unwrap();
    let files = StaticFiles::new(&dir);

    let result = files.prepare(
        &request("/static/clip.mp4", Some("bytes=oops")),
        &mut Response::new(),
    )
    .await;

    assert!(matches!(result, Err(ServerError::InvalidRange(_))));
}

#[tokio::test]
async fn test_range_past_end_is_not_satisfiable() {
    let dir = common::scratch_dir("past-end");
    std::fs::write(dir.join("static/clip.mp4"), common::sample_bytes(10)).unwrap();
    let files = StaticFiles::new(&dir);

    let result = files.prepare(
        &request("/static/clip.mp4", Some("bytes=10-")),
        &mut Response::new(),
    )
    .await;

    assert!(matches!(result, Err(ServerError::RangeNotSatisfiable(10))));
}

#[tokio::test]
async fn test_ranged_plain_file_counts_sent_bytes() {
    let dir = common::scratch_dir("js-range");
    let script = common::sample_bytes(1000);
    std::fs::write(dir.join("static/app.js"), &script).unwrap();
    let files = StaticFiles::new(&dir);

    let mut res = Response::new();
    files
        .prepare(&request("/static/app.js", Some("bytes=100-")), &mut res)
        .await
        .unwrap();
    let body = body_of(&mut res).await;

    assert!(res.status().is_none());
    assert_eq!(body, &script[100..]);
    assert_eq!(res.header("Content-Length"), Some("900"));
    assert_eq!(res.header("Content-Range"), None);
}

#[tokio::test]
async fn test_file_body_rejects_writes() {
    let dir = common::scratch_dir("read-only");
    std::fs::write(dir.join("static/notes.txt"), b"fixed").unwrap();
    let files = StaticFiles::new(&dir);

    let mut res = Response::new();
    files
        .prepare(&request("/static/notes.txt", None), &mut res)
        .await
        .unwrap();

    assert!(res.write_body(b"more").is_err());
    assert_eq!(body_of(&mut res).await, b"fixed");
}
