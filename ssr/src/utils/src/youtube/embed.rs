use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use super::{PlayerInitError, PlayerState};

#[wasm_bindgen(js_namespace = YT)]
extern "C" {
    #[wasm_bindgen(js_name = Player)]
    type YtPlayer;

    #[wasm_bindgen(constructor, js_class = "Player", catch)]
    fn new(element: &HtmlElement, options: &JsValue) -> Result<YtPlayer, JsValue>;

    #[wasm_bindgen(method, catch, js_name = pauseVideo)]
    fn pause_video(this: &YtPlayer) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn destroy(this: &YtPlayer) -> Result<(), JsValue>;
}

/// A live `YT.Player` mounted inside a host element.
///
/// The IFrame API replaces the element it is given with an iframe, so the
/// player gets a child node of its own and the host stays owned by the view.
pub struct EmbedHandle {
    player: YtPlayer,
    mount: HtmlElement,
    _on_state_change: Closure<dyn FnMut(JsValue)>,
}

impl EmbedHandle {
    pub fn mount(
        host: &HtmlElement,
        video_id: &str,
        mut on_state: impl FnMut(PlayerState) + 'static,
    ) -> Result<Self, PlayerInitError> {
        let embed_err = |e: JsValue| PlayerInitError::Embed(format!("{e:?}"));

        let document = host
            .owner_document()
            .ok_or_else(|| PlayerInitError::Embed("host is detached".to_string()))?;
        let mount = document
            .create_element("div")
            .and_then(|el| el.dyn_into::<HtmlElement>().map_err(JsValue::from))
            .map_err(embed_err)?;
        mount.set_class_name("w-full h-full");
        host.append_child(&mount).map_err(embed_err)?;

        let on_state_change = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            let code = Reflect::get(&event, &"data".into())
                .ok()
                .and_then(|data| data.as_f64());
            match code.and_then(|c| PlayerState::from_code(c as i32)) {
                Some(state) => on_state(state),
                None => log::debug!("watch_log: ignoring player state {code:?}"),
            }
        });

        let events = Object::new();
        Reflect::set(
            &events,
            &"onStateChange".into(),
            on_state_change.as_ref(),
        )
        .map_err(embed_err)?;
        let options = Object::new();
        Reflect::set(&options, &"videoId".into(), &video_id.into()).map_err(embed_err)?;
        Reflect::set(&options, &"events".into(), &events).map_err(embed_err)?;

        let player = YtPlayer::new(&mount, &options).map_err(|e| {
            mount.remove();
            embed_err(e)
        })?;

        Ok(Self {
            player,
            mount,
            _on_state_change: on_state_change,
        })
    }

    pub fn pause(&self) {
        // pauseVideo only exists once the iframe has finished booting
        if let Err(e) = self.player.pause_video() {
            log::warn!("watch_log: pauseVideo failed: {e:?}");
        }
    }
}

impl Drop for EmbedHandle {
    fn drop(&mut self) {
        if let Err(e) = self.player.destroy() {
            log::warn!("watch_log: failed to destroy player: {e:?}");
        }
        self.mount.remove();
    }
}
