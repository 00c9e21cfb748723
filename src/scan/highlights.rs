//! Highlight collection.

use std::path::Path;

use crate::api::ProfileSource;
use crate::error::Result;
use crate::fs::paths::highlight_dir;
use crate::model::Profile;
use crate::output::{print_info, print_warning};
use crate::scan::state::{InterruptFlag, ScanState};

/// Download all highlight reels into `<out_dir>/highlights/<title>/`.
///
/// Only attempted when authenticated. Failures are isolated per item and
/// per reel; an empty tray is a normal result.
pub async fn collect_highlights<S: ProfileSource>(
    source: &S,
    profile: &Profile,
    out_dir: &Path,
    state: &mut ScanState,
    interrupt: &InterruptFlag,
) -> Result<()> {
    if !source.is_logged_in() {
        print_info("Skipping highlights (login required)");
        return Ok(());
    }

    print_info("Checking highlights...");

    let highlights = match source.highlights(profile.user_id).await {
        Ok(highlights) => highlights,
        Err(e) => {
            print_warning(&format!("Could not fetch highlights: {}", e));
            return Ok(());
        }
    };

    if highlights.is_empty() {
        print_info("No highlights found");
        return Ok(());
    }

    for highlight in &highlights {
        if interrupt.is_set() {
            break;
        }

        let items = match source.highlight_items(highlight.id).await {
            Ok(items) => items,
            Err(e) => {
                state.story_failures += 1;
                print_warning(&format!("Highlight '{}' failed: {}", highlight.title, e));
                continue;
            }
        };

        print_info(&format!(
            "Highlight '{}' ({} item(s))",
            highlight.title,
            items.len()
        ));

        let target = match highlight_dir(out_dir, &highlight.title) {
            Ok(target) => target,
            Err(e) => {
                state.story_failures += 1;
                print_warning(&format!(
                    "Skipping highlight '{}': {}",
                    highlight.title, e
                ));
                continue;
            }
        };

        for item in &items {
            if interrupt.is_set() {
                break;
            }

            match source
                .download_media(&item.media_url, &target, &item.id.to_string())
                .await
            {
                Ok(_) => state.highlights_downloaded += 1,
                Err(e) => {
                    state.story_failures += 1;
                    print_warning(&format!("Highlight item {} failed: {}", item.id, e));
                }
            }
        }
    }

    if state.highlights_downloaded > 0 {
        print_info(&format!(
            "Downloaded {} highlight item(s)",
            state.highlights_downloaded
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::source::fake::{make_profile, make_story_item, FakeSource};
    use crate::model::Highlight;

    fn highlight(id: u64, title: &str) -> Highlight {
        Highlight {
            id,
            title: title.to_string(),
        }
    }

    #[tokio::test]
    async fn test_skipped_when_not_logged_in() {
        let mut source = FakeSource::with_profile(make_profile("demo"));
        source.highlight_reels = vec![(highlight(1, "Trips"), vec![make_story_item(10)])];

        let mut state = ScanState::default();
        collect_highlights(
            &source,
            &make_profile("demo"),
            Path::new("out"),
            &mut state,
            &InterruptFlag::default(),
        )
        .await
        .unwrap();

        assert_eq!(state.highlights_downloaded, 0);
    }

    #[tokio::test]
    async fn test_all_reels_downloaded() {
        let mut source = FakeSource::with_profile(make_profile("demo"));
        source.logged_in = true;
        source.highlight_reels = vec![
            (highlight(1, "Trips"), vec![make_story_item(10), make_story_item(11)]),
            (highlight(2, "Food"), vec![make_story_item(20)]),
        ];

        let mut state = ScanState::default();
        collect_highlights(
            &source,
            &make_profile("demo"),
            Path::new("out"),
            &mut state,
            &InterruptFlag::default(),
        )
        .await
        .unwrap();

        assert_eq!(state.highlights_downloaded, 3);
        assert_eq!(source.downloaded_stems(), vec!["10", "11", "20"]);
    }

    #[tokio::test]
    async fn test_unsafe_title_is_skipped_not_fatal() {
        let mut source = FakeSource::with_profile(make_profile("demo"));
        source.logged_in = true;
        source.highlight_reels = vec![
            (highlight(1, "../escape"), vec![make_story_item(10)]),
            (highlight(2, "Food"), vec![make_story_item(20)]),
        ];

        let mut state = ScanState::default();
        collect_highlights(
            &source,
            &make_profile("demo"),
            Path::new("out"),
            &mut state,
            &InterruptFlag::default(),
        )
        .await
        .unwrap();

        // The traversal-named reel is skipped, the next one still processed
        assert_eq!(state.highlights_downloaded, 1);
        assert_eq!(state.story_failures, 1);
        assert_eq!(source.downloaded_stems(), vec!["20"]);
    }

    #[tokio::test]
    async fn test_item_failure_counted_and_continues() {
        let mut source = FakeSource::with_profile(make_profile("demo"));
        source.logged_in = true;
        source.highlight_reels = vec![(
            highlight(1, "Trips"),
            vec![make_story_item(10), make_story_item(11)],
        )];
        source.failing_downloads.insert("10".to_string());

        let mut state = ScanState::default();
        collect_highlights(
            &source,
            &make_profile("demo"),
            Path::new("out"),
            &mut state,
            &InterruptFlag::default(),
        )
        .await
        .unwrap();

        assert_eq!(state.highlights_downloaded, 1);
        assert_eq!(state.story_failures, 1);
    }
}
