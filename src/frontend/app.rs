use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::window;
use yew::prelude::*;

use crate::content::GalleryImage;
use crate::i18n::{Dictionary, Language, Translations, FALLBACK_LANGUAGE, LANGUAGE_KEY};
use crate::nav::LightboxState;

use super::lightbox::{Lightbox, LightboxAction, LightboxHandle};
use super::lists::{Contacts, Education, Positions};
use super::projects::ProjectBrowser;
use super::{document, fetch_json, local_storage};

async fn load_dictionary(lang: Language) -> Rc<Dictionary> {
    Rc::new(
        fetch_json::<Dictionary>(&lang.dictionary_path())
            .await
            .unwrap_or_default(),
    )
}

fn stored_language() -> Option<Language> {
    let value = local_storage()?.get_item(LANGUAGE_KEY).ok().flatten()?;
    Language::from_str(&value)
}

fn browser_language() -> Option<Language> {
    window()?
        .navigator()
        .language()
        .map(|hint| Language::from_hint(&hint))
}

fn resolve_language() -> Language {
    stored_language()
        .or_else(browser_language)
        .unwrap_or(FALLBACK_LANGUAGE)
}

fn persist_language(lang: Language) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(LANGUAGE_KEY, lang.as_str());
    }
}

fn apply_document_language(lang: Language) {
    if let Some(root) = document().and_then(|d| d.document_element()) {
        let _ = root.set_attribute("lang", lang.as_str());
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let translations = use_state(|| Option::<Translations>::None);
    // Monotonic ticket so the latest language request wins even when an
    // earlier dictionary fetch finishes after it.
    let load_epoch = use_mut_ref(|| 0u32);
    let lightbox = use_reducer(LightboxState::default);

    {
        let translations = translations.clone();
        let load_epoch = load_epoch.clone();
        use_effect_with((), move |_| {
            *load_epoch.borrow_mut() += 1;
            let ticket = *load_epoch.borrow();
            spawn_local(async move {
                let fallback = load_dictionary(FALLBACK_LANGUAGE).await;
                let start = resolve_language();
                let current = if start == FALLBACK_LANGUAGE {
                    fallback.clone()
                } else {
                    load_dictionary(start).await
                };
                if *load_epoch.borrow() == ticket {
                    apply_document_language(start);
                    translations.set(Some(Translations::new(start, current, fallback)));
                }
            });
            || ()
        });
    }

    let on_select_language = {
        let translations = translations.clone();
        let load_epoch = load_epoch.clone();
        Callback::from(move |lang: Language| {
            persist_language(lang);
            let Some(active) = (*translations).clone() else {
                return;
            };
            if active.lang == lang {
                return;
            }
            *load_epoch.borrow_mut() += 1;
            let ticket = *load_epoch.borrow();
            let translations = translations.clone();
            let load_epoch = load_epoch.clone();
            spawn_local(async move {
                let current = if lang == FALLBACK_LANGUAGE {
                    active.fallback_dictionary()
                } else {
                    load_dictionary(lang).await
                };
                if *load_epoch.borrow() == ticket {
                    apply_document_language(lang);
                    translations.set(Some(Translations::new(
                        lang,
                        current,
                        active.fallback_dictionary(),
                    )));
                }
            });
        })
    };

    let open_lightbox = {
        let lightbox = lightbox.clone();
        LightboxHandle::new(Callback::from(
            move |(images, index): (Vec<GalleryImage>, usize)| {
                lightbox.dispatch(LightboxAction::Open(images, index));
            },
        ))
    };

    // Views never render against an uninitialized dictionary.
    let Some(active) = (*translations).clone() else {
        return html! {};
    };

    let language_buttons = Language::ALL.iter().map(|lang| {
        let lang = *lang;
        let selected = lang == active.lang;
        let onclick = {
            let on_select_language = on_select_language.clone();
            Callback::from(move |_: MouseEvent| on_select_language.emit(lang))
        };
        html! {
            <button
                type="button"
                id={format!("btn-{}", lang.as_str())}
                class={classes!("lang-btn", selected.then_some("active"))}
                aria-pressed={selected.to_string()}
                onclick={onclick}
            >
                {lang.switch_label()}
            </button>
        }
    });

    html! {
        <ContextProvider<Translations> context={active.clone()}>
        <ContextProvider<LightboxHandle> context={open_lightbox}>
            <a class="skip-link" href="#content">{active.t("skip_to_content")}</a>
            <header class="site-header">
                <h1>{active.t("site_title")}</h1>
                <nav class="lang-switch" aria-label="Language">
                    {for language_buttons}
                </nav>
            </header>
            <main id="content">
                <section id="contact" class="section-block" aria-labelledby="contacts-heading">
                    <h2 id="contacts-heading">{active.t("contacts_title")}</h2>
                    <Contacts />
                </section>
                <section id="cv" class="section-block" aria-labelledby="education-heading">
                    <h2 id="education-heading">{active.t("education_title")}</h2>
                    <Education />
                    <h2 id="positions-heading">{active.t("positions_title")}</h2>
                    <Positions />
                </section>
                <section id="projects" class="section-block" aria-labelledby="projects-heading">
                    <h2 id="projects-heading">{active.t("projects_title")}</h2>
                    <ProjectBrowser />
                </section>
            </main>
            <Lightbox state={lightbox} />
        </ContextProvider<LightboxHandle>>
        </ContextProvider<Translations>>
    }
}
