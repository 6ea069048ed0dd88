use codee::string::FromToStringCodec;
use leptos::prelude::*;
use leptos_use::storage::use_local_storage;

pub struct LocalStorage;

impl LocalStorage {
    /// Setter for a string entry. Writes before hydration are dropped.
    pub fn string_writer(key: &str) -> WriteSignal<String> {
        let (_, set_value, _) = use_local_storage::<String, FromToStringCodec>(key);
        set_value
    }
}
