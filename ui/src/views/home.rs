use api::{format_birthdate, format_birthtime, normalize_name, CompatibilityRequest, GenerateRequest};
use dioxus::logger::tracing;
use dioxus::prelude::*;

use crate::core::config::AppConfig;
use crate::core::format::local_now;
use crate::core::platform;
use crate::core::storage::{session_store, COMPATIBILITY_RESULT_KEY, RESULT_KEY};
use crate::t;

/// Raw values of one person's form fields.
#[derive(Debug, Clone, PartialEq)]
pub struct BirthInput {
    pub name: String,
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl Default for BirthInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            year: 1990,
            month: 1,
            day: 1,
            hour: 12,
            minute: 0,
        }
    }
}

impl BirthInput {
    pub fn birthdate(&self) -> String {
        format_birthdate(self.year, self.month, self.day)
    }

    pub fn birthtime(&self) -> String {
        format_birthtime(self.hour, self.minute)
    }

    pub fn to_request(&self) -> GenerateRequest {
        GenerateRequest {
            name: normalize_name(&self.name),
            birthdate: self.birthdate(),
            birthtime: self.birthtime(),
        }
    }
}

pub fn compatibility_request(p1: &BirthInput, p2: &BirthInput) -> CompatibilityRequest {
    CompatibilityRequest {
        person1_name: normalize_name(&p1.name),
        person1_birthdate: p1.birthdate(),
        person1_birthtime: p1.birthtime(),
        person2_name: normalize_name(&p2.name),
        person2_birthdate: p2.birthdate(),
        person2_birthtime: p2.birthtime(),
    }
}

/// Selectable years, newest first.
pub fn year_options(current_year: i32) -> Vec<i32> {
    (1900..=current_year.max(1900)).rev().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Single,
    Compatibility,
}

/// Entry page. The platform decides where to go once a result is stored.
#[component]
pub fn Home(on_single: EventHandler<()>, on_compatibility: EventHandler<()>) -> Element {
    let mut mode = use_signal(|| Mode::Single);
    let single = use_signal(BirthInput::default);
    let person1 = use_signal(BirthInput::default);
    let person2 = use_signal(BirthInput::default);
    let mut loading = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let years = use_hook(|| year_options(local_now().year()));

    let submit_single = move |evt: FormEvent| {
        evt.prevent_default();
        if loading() {
            return;
        }
        loading.set(true);
        error.set(None);
        let request = single.read().to_request();
        platform::spawn_future(async move {
            let outcome = generate_single(request).await;
            loading.set(false);
            match outcome {
                Ok(()) => on_single.call(()),
                Err(message) => error.set(Some(message)),
            }
        });
    };

    let submit_compatibility = move |evt: FormEvent| {
        evt.prevent_default();
        if loading() {
            return;
        }
        loading.set(true);
        error.set(None);
        let request = compatibility_request(&person1.read(), &person2.read());
        platform::spawn_future(async move {
            let outcome = generate_compatibility(request).await;
            loading.set(false);
            match outcome {
                Ok(()) => on_compatibility.call(()),
                Err(message) => error.set(Some(message)),
            }
        });
    };

    let tab_class = |tab: Mode| {
        if mode() == tab {
            "tabs__tab tabs__tab--active"
        } else {
            "tabs__tab"
        }
    };

    rsx! {
        section { class: "page page-home",
            h1 { {t!("home-title")} }
            p { class: "page-home__intro", {t!("home-intro")} }

            div { class: "tabs", role: "tablist",
                button {
                    r#type: "button",
                    class: tab_class(Mode::Single),
                    onclick: move |_| mode.set(Mode::Single),
                    {t!("tab-single")}
                }
                button {
                    r#type: "button",
                    class: tab_class(Mode::Compatibility),
                    onclick: move |_| mode.set(Mode::Compatibility),
                    {t!("tab-compatibility")}
                }
            }

            if mode() == Mode::Single {
                form { class: "entry-form", onsubmit: submit_single,
                    BirthFields { legend: t!("form-you"), input: single, years: years.clone() }
                    button {
                        r#type: "submit",
                        class: "button button--primary",
                        disabled: loading(),
                        {t!("form-submit")}
                    }
                }
            } else {
                form { class: "entry-form", onsubmit: submit_compatibility,
                    BirthFields { legend: t!("form-person1"), input: person1, years: years.clone() }
                    BirthFields { legend: t!("form-person2"), input: person2, years: years.clone() }
                    button {
                        r#type: "submit",
                        class: "button button--primary",
                        disabled: loading(),
                        {t!("form-submit-compatibility")}
                    }
                }
            }

            if loading() {
                p { class: "entry-form__loading", {t!("form-loading")} }
            }
            if let Some(message) = error() {
                p { class: "entry-form__error", role: "alert", "{message}" }
            }
        }
    }
}

async fn generate_single(request: GenerateRequest) -> Result<(), String> {
    let fallback = t!("error-generate-failed");
    let client = AppConfig::resolve()
        .client()
        .map_err(|err| err.user_message(&fallback))?;
    let result = client.generate(&request).await.map_err(|err| {
        tracing::warn!("Generate request failed: {err}");
        err.user_message(&fallback)
    })?;
    session_store().save(RESULT_KEY, &result).map_err(|err| {
        tracing::warn!("Unable to store result: {err}");
        fallback.clone()
    })
}

async fn generate_compatibility(request: CompatibilityRequest) -> Result<(), String> {
    let fallback = t!("error-compatibility-failed");
    let client = AppConfig::resolve()
        .client()
        .map_err(|err| err.user_message(&fallback))?;
    let result = client
        .generate_compatibility(&request)
        .await
        .map_err(|err| {
            tracing::warn!("Compatibility request failed: {err}");
            err.user_message(&fallback)
        })?;
    session_store()
        .save(COMPATIBILITY_RESULT_KEY, &result)
        .map_err(|err| {
            tracing::warn!("Unable to store compatibility result: {err}");
            fallback.clone()
        })
}

#[component]
fn BirthFields(legend: String, input: Signal<BirthInput>, years: Vec<i32>) -> Element {
    let mut input = input;
    let current = input();

    rsx! {
        fieldset { class: "entry-form__person",
            legend { "{legend}" }
            label { class: "entry-form__field",
                span { {t!("form-name")} }
                input {
                    r#type: "text",
                    value: "{current.name}",
                    placeholder: t!("form-name-placeholder"),
                    oninput: move |evt| input.write().name = evt.value(),
                }
            }
            div { class: "entry-form__row",
                span { class: "entry-form__label", {t!("form-birthdate")} }
                NumberSelect {
                    options: years.clone(),
                    selected: current.year,
                    suffix: t!("form-year"),
                    onpick: move |v: i32| input.write().year = v,
                }
                NumberSelect {
                    options: (1..=12).collect::<Vec<i32>>(),
                    selected: i32::from(current.month),
                    suffix: t!("form-month"),
                    onpick: move |v: i32| input.write().month = v as u8,
                }
                NumberSelect {
                    options: (1..=31).collect::<Vec<i32>>(),
                    selected: i32::from(current.day),
                    suffix: t!("form-day"),
                    onpick: move |v: i32| input.write().day = v as u8,
                }
            }
            div { class: "entry-form__row",
                span { class: "entry-form__label", {t!("form-birthtime")} }
                NumberSelect {
                    options: (0..=23).collect::<Vec<i32>>(),
                    selected: i32::from(current.hour),
                    suffix: t!("form-hour"),
                    onpick: move |v: i32| input.write().hour = v as u8,
                }
                NumberSelect {
                    options: (0..=59).collect::<Vec<i32>>(),
                    selected: i32::from(current.minute),
                    suffix: t!("form-minute"),
                    onpick: move |v: i32| input.write().minute = v as u8,
                }
            }
        }
    }
}

#[component]
fn NumberSelect(options: Vec<i32>, selected: i32, suffix: String, onpick: EventHandler<i32>) -> Element {
    rsx! {
        label { class: "entry-form__select",
            select {
                value: "{selected}",
                onchange: move |evt: FormEvent| {
                    if let Ok(value) = evt.value().parse::<i32>() {
                        onpick.call(value);
                    }
                },
                for choice in options.iter() {
                    option { key: "{choice}", value: "{choice}", selected: *choice == selected, "{choice}" }
                }
            }
            span { "{suffix}" }
        }
    }
}
