/// Share button support: `navigator.share` with a clipboard fallback
use atomium_core::{share_or_copy, AtomiumError, Clipboard, ShareOutcome, ShareRequest, ShareTarget};
use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::console;

/// Look up a callable property, if the browser provides one
fn method(target: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn js_error(err: JsValue) -> AtomiumError {
    AtomiumError::ShareFailed(describe(&err))
}

/// Await a browser promise without blocking the frame loop
fn detach(promise: JsValue) -> Result<(), AtomiumError> {
    let promise: Promise = promise.dyn_into().map_err(js_error)?;
    spawn_local(async move {
        if let Err(err) = JsFuture::from(promise).await {
            console::error_2(&JsValue::from_str("Error sharing:"), &err);
        }
    });
    Ok(())
}

struct NavigatorShare {
    navigator: JsValue,
    share: Function,
}

impl NavigatorShare {
    fn detect(navigator: &JsValue) -> Option<Self> {
        method(navigator, "share").map(|share| Self {
            navigator: navigator.clone(),
            share,
        })
    }
}

impl ShareTarget for NavigatorShare {
    fn share(&self, request: &ShareRequest) -> Result<(), AtomiumError> {
        let data = Object::new();
        for (key, value) in [
            ("title", &request.title),
            ("text", &request.text),
            ("url", &request.url),
        ] {
            Reflect::set(&data, &JsValue::from_str(key), &JsValue::from_str(value)).map_err(js_error)?;
        }
        let promise = self.share.call1(&self.navigator, &data).map_err(js_error)?;
        detach(promise)
    }
}

struct NavigatorClipboard {
    navigator: JsValue,
}

impl Clipboard for NavigatorClipboard {
    fn write_text(&self, text: &str) -> Result<(), AtomiumError> {
        let clipboard = Reflect::get(&self.navigator, &JsValue::from_str("clipboard"))
            .ok()
            .filter(|c| !c.is_undefined() && !c.is_null())
            .ok_or_else(|| AtomiumError::EnvironmentUnavailable("navigator.clipboard".into()))?;
        let write_text = method(&clipboard, "writeText")
            .ok_or_else(|| AtomiumError::EnvironmentUnavailable("clipboard.writeText".into()))?;
        let promise = write_text
            .call1(&clipboard, &JsValue::from_str(text))
            .map_err(js_error)?;
        detach(promise)
    }
}

/// Share the page, falling back to copying its URL.
///
/// Returns `"shared"`, `"copied"` or `"failed"`; never throws.
#[wasm_bindgen]
pub fn share_page(title: &str, text: &str, url: &str) -> String {
    let Some(window) = web_sys::window() else {
        return "failed".into();
    };
    let navigator: JsValue = window.navigator().into();
    let native = NavigatorShare::detect(&navigator);
    let clipboard = NavigatorClipboard { navigator };
    let request = ShareRequest::new(title, text, url);

    let outcome = share_or_copy(
        native.as_ref().map(|n| n as &dyn ShareTarget),
        &clipboard,
        &request,
    );
    settle(
        outcome,
        |message| window.alert_with_message(message).map_err(|err| describe(&err)),
        |context, detail| console::error_2(&JsValue::from_str(context), &JsValue::from_str(&detail)),
    )
    .into()
}

/// Label for the page. Failures, including a failed notice, go to `report`
fn settle(
    outcome: ShareOutcome,
    notify: impl FnOnce(&str) -> Result<(), String>,
    report: impl FnOnce(&'static str, String),
) -> &'static str {
    match outcome {
        ShareOutcome::Shared => "shared",
        ShareOutcome::Copied { message } => {
            if let Err(detail) = notify(message) {
                report("Error showing share notice:", detail);
            }
            "copied"
        }
        ShareOutcome::Failed(err) => {
            report("Error sharing:", err.to_string());
            "failed"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atomium_core::share::COPIED_MESSAGE;
    use std::cell::RefCell;

    #[test]
    fn test_copied_shows_notice() {
        let shown = RefCell::new(Vec::new());
        let reported = RefCell::new(Vec::new());
        let label = settle(
            ShareOutcome::Copied {
                message: COPIED_MESSAGE,
            },
            |message| {
                shown.borrow_mut().push(message.to_string());
                Ok(())
            },
            |context, detail| reported.borrow_mut().push((context, detail)),
        );
        assert_eq!(label, "copied");
        assert_eq!(*shown.borrow(), vec![COPIED_MESSAGE.to_string()]);
        assert!(reported.borrow().is_empty());
    }

    #[test]
    fn test_failed_notice_is_reported() {
        let reported = RefCell::new(Vec::new());
        let label = settle(
            ShareOutcome::Copied {
                message: COPIED_MESSAGE,
            },
            |_| Err("alerts blocked".to_string()),
            |context, detail| reported.borrow_mut().push((context, detail)),
        );
        assert_eq!(label, "copied");
        assert_eq!(
            *reported.borrow(),
            vec![("Error showing share notice:", "alerts blocked".to_string())]
        );
    }

    #[test]
    fn test_failed_share_is_reported() {
        let reported = RefCell::new(Vec::new());
        let label = settle(
            ShareOutcome::Failed(AtomiumError::EnvironmentUnavailable("navigator.clipboard".into())),
            |_| Ok(()),
            |context, detail| reported.borrow_mut().push((context, detail)),
        );
        assert_eq!(label, "failed");
        assert_eq!(reported.borrow().len(), 1);
        assert_eq!(reported.borrow()[0].0, "Error sharing:");
    }

    #[test]
    fn test_shared_is_quiet() {
        let label = settle(ShareOutcome::Shared, |_| Ok(()), |_, _| panic!("nothing to report"));
        assert_eq!(label, "shared");
    }
}
