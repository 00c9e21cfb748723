//! Story collection.

use std::path::Path;

use crate::api::ProfileSource;
use crate::error::Result;
use crate::fs::paths::stories_dir;
use crate::model::Profile;
use crate::output::{print_info, print_warning};
use crate::scan::state::{InterruptFlag, ScanState};

/// Download the profile's active story items into `<out_dir>/stories/`.
///
/// Only attempted when authenticated. An absent reel is a normal empty
/// result (stories expire after ~24 hours); a failed item is counted and
/// skipped, never fatal.
pub async fn collect_stories<S: ProfileSource>(
    source: &S,
    profile: &Profile,
    out_dir: &Path,
    state: &mut ScanState,
    interrupt: &InterruptFlag,
) -> Result<()> {
    if !source.is_logged_in() {
        print_info("Skipping stories (login required)");
        return Ok(());
    }

    print_info("Checking stories...");

    let reel = match source.story_reel(profile.user_id).await {
        Ok(reel) => reel,
        Err(e) => {
            print_warning(&format!("Could not fetch stories: {}", e));
            return Ok(());
        }
    };

    let Some(reel) = reel else {
        print_info("No active stories (stories expire after 24 hours)");
        return Ok(());
    };

    print_info(&format!("Found a story with {} item(s)", reel.items.len()));
    let target = stories_dir(out_dir);

    for item in &reel.items {
        if interrupt.is_set() {
            break;
        }

        match source
            .download_media(&item.media_url, &target, &item.id.to_string())
            .await
        {
            Ok(path) => {
                state.stories_downloaded += 1;
                tracing::debug!("Story item saved: {}", path.display());
            }
            Err(e) => {
                state.story_failures += 1;
                print_warning(&format!("Story item {} failed: {}", item.id, e));
            }
        }
    }

    if state.stories_downloaded > 0 {
        print_info(&format!(
            "Downloaded {} story item(s)",
            state.stories_downloaded
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::source::fake::{make_profile, make_story_item, FakeSource};
    use crate::model::StoryReel;

    #[tokio::test]
    async fn test_skipped_when_not_logged_in() {
        let mut source = FakeSource::with_profile(make_profile("demo"));
        source.story = Some(StoryReel {
            owner_id: 777,
            items: vec![make_story_item(1)],
        });

        let mut state = ScanState::default();
        collect_stories(
            &source,
            &make_profile("demo"),
            Path::new("out"),
            &mut state,
            &InterruptFlag::default(),
        )
        .await
        .unwrap();

        assert_eq!(state.stories_downloaded, 0);
        assert!(source.downloaded_stems().is_empty());
    }

    #[tokio::test]
    async fn test_items_downloaded_and_counted() {
        let mut source = FakeSource::with_profile(make_profile("demo"));
        source.logged_in = true;
        source.story = Some(StoryReel {
            owner_id: 777,
            items: vec![make_story_item(1), make_story_item(2)],
        });

        let mut state = ScanState::default();
        collect_stories(
            &source,
            &make_profile("demo"),
            Path::new("out"),
            &mut state,
            &InterruptFlag::default(),
        )
        .await
        .unwrap();

        assert_eq!(state.stories_downloaded, 2);
        assert_eq!(source.downloaded_stems(), vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_item_failure_does_not_abort_reel() {
        let mut source = FakeSource::with_profile(make_profile("demo"));
        source.logged_in = true;
        source.story = Some(StoryReel {
            owner_id: 777,
            items: vec![make_story_item(1), make_story_item(2), make_story_item(3)],
        });
        source.failing_downloads.insert("2".to_string());

        let mut state = ScanState::default();
        collect_stories(
            &source,
            &make_profile("demo"),
            Path::new("out"),
            &mut state,
            &InterruptFlag::default(),
        )
        .await
        .unwrap();

        assert_eq!(state.stories_downloaded, 2);
        assert_eq!(state.story_failures, 1);
        assert_eq!(source.downloaded_stems(), vec!["1", "3"]);
    }

    #[tokio::test]
    async fn test_no_reel_is_normal() {
        let mut source = FakeSource::with_profile(make_profile("demo"));
        source.logged_in = true;

        let mut state = ScanState::default();
        collect_stories(
            &source,
            &make_profile("demo"),
            Path::new("out"),
            &mut state,
            &InterruptFlag::default(),
        )
        .await
        .unwrap();

        assert_eq!(state.stories_downloaded, 0);
        assert_eq!(state.story_failures, 0);
    }
}
