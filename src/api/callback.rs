use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::{Mutex, oneshot};

use crate::types::CallbackResult;

pub const SUCCESS_PAGE: &str =
    "<html><body>Authentication successful! You can close this window.</body></html>";
pub const FAILURE_PAGE: &str = "<html><body>Authentication failed!</body></html>";

/// State shared with the callback handler.
///
/// The sender is taken by the first request on the redirect path, so only
/// that request is ever reported back to the waiting flow.
#[derive(Clone)]
pub struct CallbackContext {
    pub expected_state: String,
    pub sender: Arc<Mutex<Option<oneshot::Sender<CallbackResult>>>>,
}

/// Handles the OAuth redirect.
///
/// Reads `code`, `state` and `error` from the query string and hands them to
/// the waiting flow through the context's sender. The browser gets
/// [`SUCCESS_PAGE`] when the state matches and a code is present, otherwise
/// [`FAILURE_PAGE`]. The code exchange itself happens later, outside the
/// handler.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(ctx): Extension<CallbackContext>,
) -> Html<&'static str> {
    let result = CallbackResult {
        code: params.get("code").filter(|c| !c.is_empty()).cloned(),
        state: params.get("state").cloned().unwrap_or_default(),
        error: params.get("error").cloned(),
    };
    let accepted = result.is_valid(&ctx.expected_state);

    let Some(sender) = ctx.sender.lock().await.take() else {
        // a late duplicate, the flow has moved on already
        return Html(FAILURE_PAGE);
    };
    let _ = sender.send(result);

    if accepted {
        Html(SUCCESS_PAGE)
    } else {
        Html(FAILURE_PAGE)
    }
}
