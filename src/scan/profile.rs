//! Profile resolution and profile picture download.

use std::path::{Path, PathBuf};

use crate::api::ProfileSource;
use crate::error::{Error, Result};
use crate::model::Profile;
use crate::report::ProfileRecord;

/// Resolve a username and apply the private-profile policy.
///
/// A private profile is only scannable when the session is authenticated
/// and follows it; otherwise the run terminates before any report exists.
pub async fn resolve_profile<S: ProfileSource>(source: &S, username: &str) -> Result<Profile> {
    let profile = source.resolve_profile(username).await?;

    if profile.is_private && !(source.is_logged_in() && profile.followed_by_viewer) {
        return Err(Error::PrivateProfile(profile.username));
    }

    Ok(profile)
}

/// Snapshot the profile into its report record.
pub fn build_profile_record(profile: &Profile) -> ProfileRecord {
    ProfileRecord::from(profile)
}

/// Download the profile picture into the output directory.
pub async fn download_profile_pic<S: ProfileSource>(
    source: &S,
    profile: &Profile,
    out_dir: &Path,
) -> Result<PathBuf> {
    let stem = format!("{}_profile_pic", profile.username);
    source
        .download_media(&profile.profile_pic_url, out_dir, &stem)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::source::fake::{make_profile, FakeSource};

    #[tokio::test]
    async fn test_unknown_profile_is_not_found() {
        let source = FakeSource::with_profile(make_profile("demo"));
        let err = resolve_profile(&source, "someone_else").await.unwrap_err();
        assert!(matches!(err, Error::ProfileNotFound(_)));
    }

    #[tokio::test]
    async fn test_private_profile_unauthenticated_is_fatal() {
        let mut profile = make_profile("demo");
        profile.is_private = true;
        let source = FakeSource::with_profile(profile);

        let err = resolve_profile(&source, "demo").await.unwrap_err();
        assert!(matches!(err, Error::PrivateProfile(_)));
    }

    #[tokio::test]
    async fn test_private_profile_followed_by_viewer_is_allowed() {
        let mut profile = make_profile("demo");
        profile.is_private = true;
        profile.followed_by_viewer = true;
        let mut source = FakeSource::with_profile(profile);
        source.logged_in = true;

        assert!(resolve_profile(&source, "demo").await.is_ok());
    }

    #[tokio::test]
    async fn test_profile_pic_download_stem() {
        let source = FakeSource::with_profile(make_profile("demo"));
        let path = download_profile_pic(
            &source,
            &make_profile("demo"),
            Path::new("out"),
        )
        .await
        .unwrap();

        assert_eq!(path, Path::new("out").join("demo_profile_pic.bin"));
        assert_eq!(source.downloaded_stems(), vec!["demo_profile_pic"]);
    }
}
