/// Share-or-copy fallback for the page link.
///
/// Hosts implement [`ShareTarget`] over their native share capability and
/// [`Clipboard`] over their clipboard. [`share_or_copy`] never fails: every
/// error is logged and folded into the returned [`ShareOutcome`].

use crate::error::{AtomiumError, Result};

/// Confirmation shown after the link was copied instead of shared.
pub const COPIED_MESSAGE: &str = "Link copied to clipboard!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl ShareRequest {
    pub fn new(title: impl Into<String>, text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            url: url.into(),
        }
    }
}

/// Native share sheet.
pub trait ShareTarget {
    fn share(&self, request: &ShareRequest) -> Result<()>;
}

/// Text clipboard.
pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShareOutcome {
    Shared,
    /// The URL went to the clipboard; show `message` to the user.
    Copied { message: &'static str },
    Failed(AtomiumError),
}

/// Share through `native` when present, otherwise copy the URL.
pub fn share_or_copy(
    native: Option<&dyn ShareTarget>,
    clipboard: &dyn Clipboard,
    request: &ShareRequest,
) -> ShareOutcome {
    let attempt = match native {
        Some(target) => target.share(request).map(|()| ShareOutcome::Shared),
        None => Err(AtomiumError::EnvironmentUnavailable("native share".into())),
    };

    match attempt {
        Ok(outcome) => outcome,
        Err(AtomiumError::EnvironmentUnavailable(what)) => {
            tracing::info!(%what, "share unavailable, copying link instead");
            match clipboard.write_text(&request.url) {
                Ok(()) => ShareOutcome::Copied {
                    message: COPIED_MESSAGE,
                },
                Err(err) => {
                    tracing::error!(%err, "error sharing");
                    ShareOutcome::Failed(err)
                }
            }
        }
        Err(err) => {
            tracing::error!(%err, "error sharing");
            ShareOutcome::Failed(err)
        }
    }
}
