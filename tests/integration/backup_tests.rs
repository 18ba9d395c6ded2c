use crate::support::*;
use teletype_backup::crawler::run_backup;
use teletype_backup::renderer::ScriptedRenderer;
use teletype_backup::{BlogIdentity, PostRecord, RunSummary, Section, TeletypeError};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_two_post_backup_end_to_end() {
    let server = MockServer::start().await;
    let blog = server.uri();
    let dir = TempDir::new().unwrap();
    let ctx = create_context(&dir, &blog);
    let run_root = ctx.layout.root().to_path_buf();

    let post_b = r#"<html><head><title>Foo — BlogName</title></head><body>
        <div class="article__content"><p>Second</p></div></body></html>"#;

    let mut renderer = ScriptedRenderer::new()
        .with_page(&blog, home_page("Titanida", 2, &[], &["/post-a", "/post-b"]))
        .with_page(format!("{}/post-a", blog), full_post("Post A", "<p>First</p>"))
        .with_page(format!("{}/post-b", blog), post_b);

    let summary = run_backup(ctx, &mut renderer, &test_fetcher(), false)
        .await
        .unwrap();

    assert_eq!(summary.total_posts, 2);
    assert_eq!(summary.successful_downloads, 2);
    assert_eq!(summary.failed_downloads, 0);
    assert_eq!(renderer.closes(), 1);

    let written: RunSummary = read_json(&run_root.join("backup_summary.json"));
    assert_eq!(written, summary);
    assert_eq!(written.blog_url, blog);

    let info: BlogIdentity = read_json(&run_root.join("blog_info.json"));
    assert_eq!(info.title.as_deref(), Some("Titanida"));
    assert_eq!(info.username.as_deref(), Some("titanida"));
    assert_eq!(info.post_count, Some(2));
    assert_eq!(info.bio.as_deref(), Some("Notes and poems"));

    let post_a: PostRecord = read_json(&post_path(&run_root, "post-a").join("post.json"));
    assert_eq!(post_a.title.as_deref(), Some("Post A"));
    assert_eq!(post_a.date.as_deref(), Some("March 3, 2024"));
    assert_eq!(post_a.author.as_deref(), Some("Anna"));

    let post_b: PostRecord = read_json(&post_path(&run_root, "post-b").join("post.json"));
    assert_eq!(post_b.title.as_deref(), Some("Foo"));
    assert_eq!(post_b.author.as_deref(), Some("Titanida"));
    assert_eq!(post_b.date, None);

    let document = std::fs::read_to_string(post_path(&run_root, "post-b").join("index.md")).unwrap();
    assert!(document.starts_with("---\ntitle: \"Foo\"\n"));
    assert!(!document.contains("date:"));
    assert!(document.contains("slug: \"post-b\""));

    assert!(run_root.join("homepage.html").exists());
    assert!(run_root.join("sections.json").exists());
}

#[tokio::test]
async fn test_failed_image_keeps_remote_reference() {
    let server = MockServer::start().await;
    let blog = server.uri();

    Mock::given(method("GET"))
        .and(path("/images/one.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"first".to_vec()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/images/two.png"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/images/three.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"third".to_vec()))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let ctx = create_context(&dir, &blog);
    let run_root = ctx.layout.root().to_path_buf();

    let failing_src = format!("{}/images/two.png", blog);
    let body = format!(
        r#"<p>Gallery</p><img src="/images/one.png"><img src="{}"><img src="images/three.png">"#,
        failing_src
    );
    let mut renderer = ScriptedRenderer::new()
        .with_page(&blog, home_page("Titanida", 1, &[], &["/gallery"]))
        .with_page(format!("{}/gallery", blog), full_post("Gallery", &body));

    let summary = run_backup(ctx, &mut renderer, &test_fetcher(), false)
        .await
        .unwrap();
    assert_eq!(summary.successful_downloads, 1);

    let post_dir = post_path(&run_root, "gallery");
    let record: PostRecord = read_json(&post_dir.join("post.json"));
    let content = record.content.unwrap();

    assert!(content.contains(r#"src="assets/one.png""#));
    assert!(content.contains(r#"src="assets/three.png""#));
    assert!(content.contains(&format!(r#"src="{}""#, failing_src)));

    assert_eq!(std::fs::read(post_dir.join("assets/one.png")).unwrap(), b"first");
    assert_eq!(std::fs::read(post_dir.join("assets/three.png")).unwrap(), b"third");
    assert!(!post_dir.join("assets/two.png").exists());
}

#[tokio::test]
async fn test_escaped_and_unwritable_images_keep_post_saved() {
    let server = MockServer::start().await;
    let blog = server.uri();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"pixels".to_vec()))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let ctx = create_context(&dir, &blog);
    let run_root = ctx.layout.root().to_path_buf();

    let long_src = format!("/images/{}.png", "y".repeat(300));
    let body = format!(
        r#"<img src="/images/photo.png?w=1&amp;h=2"><img src="{}"><img src="/images/plain.png">"#,
        long_src
    );
    let mut renderer = ScriptedRenderer::new()
        .with_page(&blog, home_page("Titanida", 1, &[], &["/photos"]))
        .with_page(format!("{}/photos", blog), full_post("Photos", &body));

    let summary = run_backup(ctx, &mut renderer, &test_fetcher(), false)
        .await
        .unwrap();
    assert_eq!(summary.successful_downloads, 1);
    assert_eq!(summary.failed_downloads, 0);

    let post_dir = post_path(&run_root, "photos");
    let record: PostRecord = read_json(&post_dir.join("post.json"));
    let content = record.content.unwrap();

    assert!(content.contains(r#"src="assets/photo.png""#));
    assert!(content.contains(r#"src="assets/plain.png""#));
    assert!(content.contains(&format!(r#"src="{}""#, long_src)));
    assert_eq!(std::fs::read(post_dir.join("assets/photo.png")).unwrap(), b"pixels");
}

#[tokio::test]
async fn test_post_failure_does_not_stop_run() {
    let server = MockServer::start().await;
    let blog = server.uri();
    let dir = TempDir::new().unwrap();
    let ctx = create_context(&dir, &blog);
    let run_root = ctx.layout.root().to_path_buf();

    // post.json cannot be written where a directory already sits
    std::fs::create_dir_all(post_path(&run_root, "second").join("post.json")).unwrap();

    let mut renderer = ScriptedRenderer::new()
        .with_page(
            &blog,
            home_page("Titanida", 3, &[], &["/first", "/second", "/third"]),
        )
        .with_page(format!("{}/first", blog), full_post("First", "<p>1</p>"))
        .with_page(format!("{}/second", blog), full_post("Second", "<p>2</p>"))
        .with_page(format!("{}/third", blog), full_post("Third", "<p>3</p>"));

    let summary = run_backup(ctx, &mut renderer, &test_fetcher(), false)
        .await
        .unwrap();

    assert_eq!(summary.total_posts, 3);
    assert_eq!(summary.successful_downloads, 2);
    assert_eq!(summary.failed_downloads, 1);

    assert!(post_path(&run_root, "second").join("original.html").exists());
    assert!(post_path(&run_root, "third").join("post.json").is_file());
}

#[tokio::test]
async fn test_section_posts_are_merged_without_duplicates() {
    let server = MockServer::start().await;
    let blog = server.uri();
    let dir = TempDir::new().unwrap();
    let ctx = create_context(&dir, &blog);
    let run_root = ctx.layout.root().to_path_buf();

    let mut renderer = ScriptedRenderer::new()
        .with_page(
            &blog,
            home_page("Titanida", 3, &[("Poems", "/poems")], &["/a", "/b"]),
        )
        .with_page(format!("{}/poems", blog), section_page(&["/b", "/c"]))
        .with_page(format!("{}/a", blog), full_post("A", "<p>a</p>"))
        .with_page(format!("{}/b", blog), full_post("B", "<p>b</p>"))
        .with_page(format!("{}/c", blog), full_post("C", "<p>c</p>"));

    let summary = run_backup(ctx, &mut renderer, &test_fetcher(), false)
        .await
        .unwrap();

    assert_eq!(summary.sections, 1);
    assert_eq!(summary.total_posts, 3);
    assert_eq!(summary.successful_downloads, 3);

    let sections: Vec<Section> = read_json(&run_root.join("sections.json"));
    assert_eq!(sections[0].name, "Poems");
    assert_eq!(sections[0].url, format!("{}/poems", blog));

    let urls: Vec<String> = read_json(&run_root.join("post_urls.json"));
    assert_eq!(
        urls,
        vec![
            format!("{}/a", blog),
            format!("{}/b", blog),
            format!("{}/c", blog)
        ]
    );

    let post_visits = renderer
        .navigations()
        .iter()
        .filter(|url| url.ends_with("/b"))
        .count();
    assert_eq!(post_visits, 1);
}

#[tokio::test]
async fn test_colliding_slugs_get_distinct_directories() {
    let server = MockServer::start().await;
    let blog = server.uri();
    let dir = TempDir::new().unwrap();
    let ctx = create_context(&dir, &blog);
    let run_root = ctx.layout.root().to_path_buf();

    let mut renderer = ScriptedRenderer::new()
        .with_page(&blog, home_page("Titanida", 2, &[], &["/notes.v2", "/notes_v2"]))
        .with_page(format!("{}/notes.v2", blog), full_post("Dot", "<p>.</p>"))
        .with_page(format!("{}/notes_v2", blog), full_post("Underscore", "<p>_</p>"));

    let summary = run_backup(ctx, &mut renderer, &test_fetcher(), false)
        .await
        .unwrap();
    assert_eq!(summary.successful_downloads, 2);

    let mut slugs: Vec<String> = std::fs::read_dir(run_root.join("posts"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    slugs.sort();

    assert_eq!(slugs.len(), 2);
    assert!(slugs.contains(&"notes_v2".to_string()));
}

#[tokio::test]
async fn test_home_page_failure_ends_run_and_closes_renderer() {
    let server = MockServer::start().await;
    let blog = server.uri();
    let dir = TempDir::new().unwrap();
    let ctx = create_context(&dir, &blog);
    let run_root = ctx.layout.root().to_path_buf();

    let mut renderer = ScriptedRenderer::new().with_failure(&blog);

    let result = run_backup(ctx, &mut renderer, &test_fetcher(), false).await;

    assert!(matches!(result, Err(TeletypeError::Render(_))));
    assert_eq!(renderer.closes(), 1);
    assert!(!run_root.join("backup_summary.json").exists());
}

#[tokio::test]
async fn test_skip_sections_targets_advertised_count() {
    let server = MockServer::start().await;
    let blog = server.uri();
    let dir = TempDir::new().unwrap();
    let ctx = create_context(&dir, &blog);
    let run_root = ctx.layout.root().to_path_buf();

    let mut renderer = ScriptedRenderer::new()
        .with_frames(
            &blog,
            vec![
                home_page("Titanida", 2, &[("Poems", "/poems")], &["/a"]),
                home_page("Titanida", 2, &[("Poems", "/poems")], &["/a", "/b"]),
            ],
        )
        .with_page(format!("{}/a", blog), full_post("A", "<p>a</p>"))
        .with_page(format!("{}/b", blog), full_post("B", "<p>b</p>"));

    let summary = run_backup(ctx, &mut renderer, &test_fetcher(), true)
        .await
        .unwrap();

    assert_eq!(summary.total_posts, 2);
    assert_eq!(summary.sections, 0);
    assert!(!run_root.join("sections.json").exists());
    assert!(!renderer.navigations().iter().any(|url| url.ends_with("/poems")));

    let urls: Vec<String> = read_json(&run_root.join("post_urls.json"));
    assert_eq!(urls, vec![format!("{}/a", blog), format!("{}/b", blog)]);
}
