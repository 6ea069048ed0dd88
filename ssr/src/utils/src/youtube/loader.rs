//! One-shot loading of the YouTube IFrame API script.
//!
//! Every player mounted in this page shares a single load. The first
//! [`IframeApiLoader::acquire`] injects the script and installs the global
//! `onYouTubeIframeAPIReady` hook; later callers just clone the shared
//! readiness future. A failed or timed out load is retried by the next
//! acquisition.

use std::cell::RefCell;
use std::rc::Rc;

use consts::youtube::{IFRAME_API_READY_HOOK, IFRAME_API_URL};
use futures::channel::oneshot;
use futures::future::Shared;
use futures::FutureExt;
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::PlayerInitError;

type LoadResult = Result<(), PlayerInitError>;
type ReadyFuture = Shared<oneshot::Receiver<LoadResult>>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Reference count and load progress, free of any browser state.
#[derive(Debug, Default)]
pub struct LoaderState {
    refs: usize,
    phase: LoadPhase,
}

impl LoaderState {
    /// Registers a user. Returns `true` when the script has to be injected.
    pub fn acquire(&mut self) -> bool {
        self.refs += 1;
        match self.phase {
            LoadPhase::Idle | LoadPhase::Failed => {
                self.phase = LoadPhase::Loading;
                true
            }
            LoadPhase::Loading | LoadPhase::Ready => false,
        }
    }

    /// Drops a user. Returns `true` once nobody holds the loader any more.
    pub fn release(&mut self) -> bool {
        self.refs = self.refs.saturating_sub(1);
        self.refs == 0
    }

    pub fn complete(&mut self, ok: bool) {
        self.phase = if ok {
            LoadPhase::Ready
        } else {
            LoadPhase::Failed
        };
    }

    /// Gives up on an in-flight load so the next acquisition starts over.
    pub fn time_out(&mut self) {
        if self.phase == LoadPhase::Loading {
            self.phase = LoadPhase::Failed;
        }
    }

    pub fn refs(&self) -> usize {
        self.refs
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }
}

struct LoaderHooks {
    _on_ready: Closure<dyn FnMut()>,
    _on_error: Closure<dyn FnMut()>,
}

#[derive(Default)]
struct Loader {
    state: LoaderState,
    ready: Option<ReadyFuture>,
    // kept alive until the page is done with the API, stale scripts may still fire
    hooks: Vec<LoaderHooks>,
}

thread_local! {
    static LOADER: RefCell<Loader> = RefCell::new(Loader::default());
}

impl Loader {
    fn acquire(&mut self) -> ReadyFuture {
        if !self.state.acquire() {
            if let Some(ready) = &self.ready {
                return ready.clone();
            }
        }
        self.start_load()
    }

    fn start_load(&mut self) -> ReadyFuture {
        let (tx, rx) = oneshot::channel();
        let ready = rx.shared();
        self.ready = Some(ready.clone());

        if api_available() {
            self.state.complete(true);
            let _ = tx.send(Ok(()));
            return ready;
        }

        let tx = Rc::new(RefCell::new(Some(tx)));
        let tx_inject = tx.clone();
        let on_ready = {
            let tx = tx.clone();
            Closure::<dyn FnMut()>::new(move || settle(&tx, Ok(())))
        };
        let on_error =
            Closure::<dyn FnMut()>::new(move || settle(&tx, Err(PlayerInitError::ScriptLoad)));

        if let Err(e) = inject_script(&on_ready, &on_error) {
            log::error!("watch_log: failed to inject IFrame API script: {e:?}");
            self.state.complete(false);
            if let Some(tx) = tx_inject.borrow_mut().take() {
                let _ = tx.send(Err(PlayerInitError::ScriptLoad));
            }
        }

        self.hooks.push(LoaderHooks {
            _on_ready: on_ready,
            _on_error: on_error,
        });
        ready
    }

    fn release(&mut self) {
        if !self.state.release() || self.state.phase() != LoadPhase::Ready {
            return;
        }
        if let Some(window) = web_sys::window() {
            let _ = js_sys::Reflect::delete_property(&window, &IFRAME_API_READY_HOOK.into());
        }
        self.hooks.clear();
    }
}

fn settle(tx: &Rc<RefCell<Option<oneshot::Sender<LoadResult>>>>, result: LoadResult) {
    let Some(tx) = tx.borrow_mut().take() else {
        return;
    };
    let _ = LOADER.try_with(|loader| {
        if let Ok(mut loader) = loader.try_borrow_mut() {
            loader.state.complete(result.is_ok());
        }
    });
    let _ = tx.send(result);
}

fn api_available() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    js_sys::Reflect::get(&window, &"YT".into())
        .ok()
        .filter(|yt| yt.is_object())
        .and_then(|yt| js_sys::Reflect::get(&yt, &"Player".into()).ok())
        .is_some_and(|player| player.is_function())
}

fn inject_script(
    on_ready: &Closure<dyn FnMut()>,
    on_error: &Closure<dyn FnMut()>,
) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    js_sys::Reflect::set(&window, &IFRAME_API_READY_HOOK.into(), on_ready.as_ref())?;

    let tag = document
        .create_element("script")?
        .dyn_into::<web_sys::HtmlScriptElement>()?;
    tag.set_src(IFRAME_API_URL);
    tag.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    let first_script = document.get_elements_by_tag_name("script").item(0);
    match first_script.as_ref().and_then(|s| s.parent_node()) {
        Some(parent) => {
            parent.insert_before(&tag, first_script.as_deref())?;
        }
        None => {
            let body = document
                .body()
                .ok_or_else(|| JsValue::from_str("no body"))?;
            body.append_child(&tag)?;
        }
    }
    Ok(())
}

pub struct IframeApiLoader;

impl IframeApiLoader {
    pub fn acquire() -> IframeApiLease {
        let ready = LOADER.with_borrow_mut(|loader| loader.acquire());
        IframeApiLease { ready }
    }
}

/// A registered user of the IFrame API. Dropping it releases the loader.
pub struct IframeApiLease {
    ready: ReadyFuture,
}

impl IframeApiLease {
    /// Resolves once `YT.Player` can be constructed, or fails after `timeout_ms`.
    pub async fn ready_within(&self, timeout_ms: u32) -> Result<(), PlayerInitError> {
        let mut ready = self.ready.clone().fuse();
        let mut timeout = TimeoutFuture::new(timeout_ms).fuse();

        futures::select! {
            res = ready => res.unwrap_or(Err(PlayerInitError::ScriptLoad)),
            _ = timeout => {
                LOADER.with_borrow_mut(|loader| loader.state.time_out());
                Err(PlayerInitError::LoadTimeout)
            }
        }
    }
}

impl Drop for IframeApiLease {
    fn drop(&mut self) {
        let _ = LOADER.try_with(|loader| {
            if let Ok(mut loader) = loader.try_borrow_mut() {
                loader.release();
            }
        });
    }
}
