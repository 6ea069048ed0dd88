use gloo::history::{BrowserHistory, History};
use http::status::StatusCode;
use leptos::prelude::*;
use thiserror::Error;

#[cfg(feature = "ssr")]
use leptos_axum::ResponseOptions;

#[derive(Clone, Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            AppError::NotFound => "There's nothing to watch here.",
        }
    }
}

#[component]
pub fn ErrorTemplate(
    #[prop(optional)] outside_errors: Option<Errors>,
    #[prop(optional)] errors: Option<RwSignal<Errors>>,
) -> impl IntoView {
    let errors = match (outside_errors, errors) {
        (Some(e), _) => e,
        (None, Some(e)) => e.get_untracked(),
        (None, None) => Errors::default(),
    };

    let errors: Vec<AppError> = errors
        .into_iter()
        .filter_map(|(_k, v)| v.downcast_ref::<AppError>().cloned())
        .collect();
    log::warn!("rendering app errors: {errors:?}");

    let message = errors
        .first()
        .map(AppError::message)
        .unwrap_or("Something went wrong.");

    // only the first error's status reaches the response
    #[cfg(feature = "ssr")]
    {
        let response = use_context::<ResponseOptions>();
        if let (Some(response), Some(err)) = (response, errors.first()) {
            response.set_status(err.status_code());
        }
    }

    let go_back = move || {
        let history = BrowserHistory::new();
        history.back();
    };

    view! {
        <div class="flex flex-col justify-center items-center bg-black w-dvw h-dvh">
            <h1 class="p-2 text-2xl font-bold text-white md:text-3xl">"oh no!"</h1>
            <div class="px-8 mb-4 w-full text-xs text-center md:w-2/3 md:text-sm lg:w-1/3 text-white/60">
                {message}
            </div>
            <button
                on:click=move |_| go_back()
                class="py-4 px-12 mt-6 max-w-full text-lg text-white rounded-full md:text-xl bg-primary-600"
            >
                Go back
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::NotFound.message(), "There's nothing to watch here.");
    }
}
