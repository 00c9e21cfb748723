//! Post and comment collection.

use std::path::Path;

use crate::api::ProfileSource;
use crate::config::Config;
use crate::error::Result;
use crate::model::{Post, Profile};
use crate::output::{print_info, print_warning};
use crate::report::{CommentRecord, PostRecord};
use crate::scan::state::{InterruptFlag, ScanState};

/// Iterate the profile's posts newest-first up to the configured cap.
///
/// For each post the media is downloaded and up to the comment cap of
/// comments is captured. A failure inside a single post is logged and
/// counted; the partial record is still appended and iteration continues
/// with the next post. Only a failure to fetch the next page is fatal.
pub async fn collect_posts<S: ProfileSource>(
    source: &S,
    config: &Config,
    profile: &Profile,
    out_dir: &Path,
    state: &mut ScanState,
    interrupt: &InterruptFlag,
) -> Result<Vec<PostRecord>> {
    let cap = config.limits.max_posts as usize;
    let mut records: Vec<PostRecord> = Vec::new();
    let mut cursor: Option<String> = None;

    print_info(&format!("Scanning posts (up to {})...", cap));

    'pages: loop {
        if records.len() >= cap || interrupt.is_set() {
            break;
        }

        let page = source.posts_page(profile.user_id, cursor.as_deref()).await?;
        if page.posts.is_empty() {
            break;
        }

        for post in page.posts {
            if records.len() >= cap || interrupt.is_set() {
                break 'pages;
            }

            state.posts_scanned += 1;
            if config.options.show_downloads {
                print_info(&format!(
                    "Post {}/{} - {} ({})",
                    state.posts_scanned,
                    cap,
                    post.shortcode,
                    post.taken_at.format("%d/%m/%Y")
                ));
            }

            let record = scan_post(source, config, &post, out_dir, state).await;
            records.push(record);

            if state.posts_scanned % 10 == 0 {
                print_info(&format!("Completed {} posts", state.posts_scanned));
            }
        }

        cursor = page.end_cursor;
        if cursor.is_none() {
            break;
        }
    }

    print_info(&format!("Scanned {} post(s)", records.len()));
    Ok(records)
}

/// Process one post: media download, then comments.
///
/// Never fails; whatever was gathered before a fault is kept.
async fn scan_post<S: ProfileSource>(
    source: &S,
    config: &Config,
    post: &Post,
    out_dir: &Path,
    state: &mut ScanState,
) -> PostRecord {
    let mut record = PostRecord::from(post);

    if let Err(e) = download_post_media(source, config, post, out_dir).await {
        state.post_failures += 1;
        print_warning(&format!("Post {} download failed: {}", post.shortcode, e));
        return record;
    }

    let comment_cap = config.limits.max_comments_per_post as usize;
    match collect_post_comments(source, &post.shortcode, comment_cap).await {
        Ok(comments) => record.comments = comments,
        Err(e) => {
            state.comment_failures += 1;
            print_warning(&format!(
                "Comments for {} failed: {}",
                post.shortcode, e
            ));
        }
    }

    record
}

/// Download a post's media files per configuration.
async fn download_post_media<S: ProfileSource>(
    source: &S,
    config: &Config,
    post: &Post,
    out_dir: &Path,
) -> Result<()> {
    if post.is_video {
        if config.options.download_videos {
            if let Some(video_url) = &post.video_url {
                source
                    .download_media(video_url, out_dir, &post.shortcode)
                    .await?;
            }
        }
        if config.options.download_video_thumbnails {
            let stem = format!("{}_thumb", post.shortcode);
            source
                .download_media(&post.display_url, out_dir, &stem)
                .await?;
        }
    } else {
        source
            .download_media(&post.display_url, out_dir, &post.shortcode)
            .await?;
    }

    Ok(())
}

/// Capture up to `cap` comments, first by the source's iteration order.
pub async fn collect_post_comments<S: ProfileSource>(
    source: &S,
    shortcode: &str,
    cap: usize,
) -> Result<Vec<CommentRecord>> {
    let mut records: Vec<CommentRecord> = Vec::new();
    let mut cursor: Option<String> = None;

    while records.len() < cap {
        let page = source.comments_page(shortcode, cursor.as_deref()).await?;
        if page.comments.is_empty() {
            break;
        }

        for comment in &page.comments {
            if records.len() >= cap {
                break;
            }
            records.push(CommentRecord::from(comment));
        }

        cursor = page.end_cursor;
        if cursor.is_none() {
            break;
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::source::fake::{make_comment, make_post, make_profile, FakeSource};
    use std::sync::atomic::Ordering;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.target.username = "demo".to_string();
        config
    }

    async fn run_collect(
        source: &FakeSource,
        config: &Config,
        state: &mut ScanState,
    ) -> Vec<PostRecord> {
        collect_posts(
            source,
            config,
            &make_profile("demo"),
            Path::new("out"),
            state,
            &InterruptFlag::default(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_post_cap_limits_iteration_and_requests() {
        let mut source = FakeSource::with_profile(make_profile("demo"));
        // Three pages of two posts each, cap of 2: only one page needed
        source.post_pages = vec![
            vec![make_post("p1", false), make_post("p2", false)],
            vec![make_post("p3", false), make_post("p4", false)],
            vec![make_post("p5", false), make_post("p6", false)],
        ];
        let mut config = test_config();
        config.limits.max_posts = 2;

        let mut state = ScanState::default();
        let records = run_collect(&source, &config, &mut state).await;

        assert_eq!(records.len(), 2);
        assert_eq!(state.posts_scanned, 2);
        assert_eq!(source.post_page_requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_iteration_ends_at_natural_end() {
        let mut source = FakeSource::with_profile(make_profile("demo"));
        source.post_pages = vec![vec![make_post("p1", false)]];
        let config = test_config(); // cap 150

        let mut state = ScanState::default();
        let records = run_collect(&source, &config, &mut state).await;

        assert_eq!(records.len(), 1);
        assert_eq!(source.post_page_requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_comment_cap_is_min_of_cap_and_available() {
        let comments = run_comments("p1", &[1, 2, 3, 4, 5], 3).await;
        assert_eq!(comments.iter().map(|c| c.id).collect::<Vec<_>>(), [1, 2, 3]);

        let comments = run_comments("p2", &[9], 3).await;
        assert_eq!(comments.len(), 1);
    }

    async fn run_comments(shortcode: &str, ids: &[u64], cap: usize) -> Vec<CommentRecord> {
        let mut source = FakeSource::with_profile(make_profile("demo"));
        source.comments.insert(
            shortcode.to_string(),
            ids.iter().map(|id| make_comment(*id, "someone")).collect(),
        );
        collect_post_comments(&source, shortcode, cap).await.unwrap()
    }

    #[tokio::test]
    async fn test_zero_comment_cap_makes_no_requests() {
        let mut source = FakeSource::with_profile(make_profile("demo"));
        source
            .comments
            .insert("p1".to_string(), vec![make_comment(1, "someone")]);

        let comments = collect_post_comments(&source, "p1", 0).await.unwrap();
        assert!(comments.is_empty());
        assert_eq!(source.comment_page_requests.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_comment_cap_stops_paging_early() {
        let mut source = FakeSource::with_profile(make_profile("demo"));
        source.comment_page_size = 2;
        source.comments.insert(
            "p1".to_string(),
            (1..=10).map(|id| make_comment(id, "someone")).collect(),
        );

        let comments = collect_post_comments(&source, "p1", 3).await.unwrap();
        assert_eq!(comments.len(), 3);
        // Two pages of two comments cover the cap of three
        assert_eq!(source.comment_page_requests.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_download_keeps_partial_record_and_continues() {
        let mut source = FakeSource::with_profile(make_profile("demo"));
        source.post_pages = vec![vec![make_post("p1", false), make_post("p2", false)]];
        source.failing_downloads.insert("p1".to_string());
        source
            .comments
            .insert("p2".to_string(), vec![make_comment(1, "someone")]);
        let config = test_config();

        let mut state = ScanState::default();
        let records = run_collect(&source, &config, &mut state).await;

        // Exactly one record per iterated post, failed or not
        assert_eq!(records.len(), 2);
        assert_eq!(state.posts_scanned, 2);
        assert_eq!(state.post_failures, 1);
        // The failed post keeps its metadata but has no comments
        assert_eq!(records[0].shortcode, "p1");
        assert!(records[0].comments.is_empty());
        assert_eq!(records[1].comments.len(), 1);
    }

    #[tokio::test]
    async fn test_video_post_downloads_video_and_thumbnail() {
        let mut source = FakeSource::with_profile(make_profile("demo"));
        source.post_pages = vec![vec![make_post("v1", true)]];
        let config = test_config();

        let mut state = ScanState::default();
        run_collect(&source, &config, &mut state).await;

        assert_eq!(source.downloaded_stems(), vec!["v1", "v1_thumb"]);
    }

    #[tokio::test]
    async fn test_video_downloads_respect_options() {
        let mut source = FakeSource::with_profile(make_profile("demo"));
        source.post_pages = vec![vec![make_post("v1", true)]];
        let mut config = test_config();
        config.options.download_videos = false;
        config.options.download_video_thumbnails = false;

        let mut state = ScanState::default();
        run_collect(&source, &config, &mut state).await;

        assert!(source.downloaded_stems().is_empty());
    }

    #[tokio::test]
    async fn test_interrupt_stops_before_next_post() {
        let mut source = FakeSource::with_profile(make_profile("demo"));
        source.post_pages = vec![vec![make_post("p1", false), make_post("p2", false)]];
        let config = test_config();

        let interrupt = InterruptFlag::default();
        interrupt.set();

        let mut state = ScanState::default();
        let records = collect_posts(
            &source,
            &config,
            &make_profile("demo"),
            Path::new("out"),
            &mut state,
            &interrupt,
        )
        .await
        .unwrap();

        assert!(records.is_empty());
        assert_eq!(source.post_page_requests.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_demo_scenario() {
        // Profile "demo" with 2 posts (one video, one image), comment cap 3.
        // Post A has 5 comments (3 retained), post B has 1 (1 retained).
        let mut source = FakeSource::with_profile(make_profile("demo"));
        source.post_pages = vec![vec![make_post("postA", true), make_post("postB", false)]];
        source.comments.insert(
            "postA".to_string(),
            (1..=5).map(|id| make_comment(id, "alice")).collect(),
        );
        source
            .comments
            .insert("postB".to_string(), vec![make_comment(6, "bob")]);
        let config = test_config();

        let mut state = ScanState::default();
        let records = run_collect(&source, &config, &mut state).await;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].comments.len(), 3);
        assert_eq!(
            records[0].comments.iter().map(|c| c.id).collect::<Vec<_>>(),
            [1, 2, 3]
        );
        assert_eq!(records[1].comments.len(), 1);
        assert_eq!(state.stats().total_posts_scanned, 2);
    }
}
