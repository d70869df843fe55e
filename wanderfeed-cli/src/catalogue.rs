//! Loading post catalogues and preference models from JSON documents.

use camino::Utf8Path;
use wanderfeed_core::{Post, PostRecord, PreferenceModel};

use crate::CliError;

/// Load the post catalogue at `path`.
///
/// Records without a tag collection are skipped with a warning so a single
/// malformed item does not sink a whole batch.
pub(crate) fn load_posts(path: &Utf8Path) -> Result<Vec<Post>, CliError> {
    let records: Vec<PostRecord> = wanderfeed_fs::read_json(path)?;
    let total = records.len();
    let posts: Vec<Post> = records
        .into_iter()
        .filter_map(|record| match Post::try_from(record) {
            Ok(post) => Some(post),
            Err(err) => {
                log::warn!("skipping post in {path}: {err}");
                None
            }
        })
        .collect();
    log::debug!("loaded {} of {total} posts from {path}", posts.len());
    Ok(posts)
}

/// Load the preference model stored at `path`.
pub(crate) fn load_model(path: &Utf8Path) -> Result<PreferenceModel, CliError> {
    Ok(wanderfeed_fs::read_json(path)?)
}

/// Load the preference model at `path`, starting from an empty model when
/// the file does not exist yet.
pub(crate) fn load_model_or_empty(path: &Utf8Path) -> Result<PreferenceModel, CliError> {
    Ok(wanderfeed_fs::read_json_if_exists(path)?.unwrap_or_default())
}
