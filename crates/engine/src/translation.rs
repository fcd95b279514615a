//! Fail-soft translation boundary.
//!
//! [`translate_fragment`] is the only caller of [`Translator::translate`]. It
//! never returns an error: an unconfigured backend, an empty fragment, or a
//! backend failure all come back as [`Translation::Unavailable`].

use domain::{Translation, Translator};
use tracing::{debug, warn};

/// Translates one text fragment, absorbing every failure.
///
/// No backend call is made when `translator` is `None` or `text` is empty.
pub async fn translate_fragment(
    translator: Option<&dyn Translator>,
    text: Option<&str>,
) -> Translation {
    let Some(translator) = translator else {
        return Translation::Unavailable;
    };
    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        return Translation::Unavailable;
    };

    match translator.translate(text).await {
        Ok(translated) => {
            debug!(chars = text.chars().count(), "fragment translated");
            Translation::Translated(translated)
        }
        Err(error) => {
            warn!(%error, "translation failed; continuing without it");
            Translation::Unavailable
        }
    }
}
