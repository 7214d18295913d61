use yew::prelude::*;

use crate::content::{
    ContactRecord, EducationRecord, PositionRecord, SkillRef, CONTACTS_PATH, EDUCATION_PATH,
    PLACEHOLDER_IMAGE, POSITIONS_PATH,
};
use crate::i18n::Translations;

use super::fetch_json;

pub(crate) fn skill_chips(
    skills: &[SkillRef],
    translations: &Translations,
    extra_class: &'static str,
) -> Html {
    if skills.is_empty() {
        return html! {};
    }
    html! {
        <ul class={classes!("skills", extra_class)}>
            {for skills.iter().map(|skill| html! { <li>{skill.display(translations)}</li> })}
        </ul>
    }
}

// Shared fetch-once pattern: `None` while loading, `Some(vec)` afterwards,
// empty vec when the file failed to load or parse.
#[hook]
fn use_fetched<T>(path: &'static str) -> UseStateHandle<Option<Vec<T>>>
where
    T: serde::de::DeserializeOwned + 'static,
{
    let records = use_state(|| Option::<Vec<T>>::None);
    {
        let records = records.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let fetched = fetch_json::<Vec<T>>(path).await.unwrap_or_default();
                records.set(Some(fetched));
            });
            || ()
        });
    }
    records
}

#[function_component(Contacts)]
pub fn contacts() -> Html {
    let translations = use_context::<Translations>();
    let records = use_fetched::<ContactRecord>(CONTACTS_PATH);
    let Some(_translations) = translations else {
        return html! {};
    };
    let Some(records) = (*records).clone() else {
        return html! {};
    };

    html! {
        <div class="contacts">
            {for records.iter().map(|contact| {
                let graphic_style = format!("background-image: url({})", contact.icon);
                html! {
                    <div class="contact-item">
                        <a
                            class="contact-icon"
                            href={contact.target()}
                            target="_blank"
                            rel="noopener noreferrer"
                            aria-label={contact.aria_label()}
                            title={contact.display_label().to_string()}
                        >
                            <span class="contact-graphic" style={graphic_style} aria-hidden="true" />
                        </a>
                        <span class="contact-label">{contact.display_label()}</span>
                    </div>
                }
            })}
        </div>
    }
}

fn meta_row(translations: &Translations, left_key: &str, years_key: &str) -> Html {
    html! {
        <div class="item-meta">
            <span>{translations.t(left_key)}</span>
            <span class="sep">{"\u{2022}"}</span>
            <span>{translations.t(years_key)}</span>
        </div>
    }
}

#[function_component(Education)]
pub fn education() -> Html {
    let translations = use_context::<Translations>();
    let records = use_fetched::<EducationRecord>(EDUCATION_PATH);
    let Some(translations) = translations else {
        return html! {};
    };
    let Some(records) = (*records).clone() else {
        return html! {};
    };

    html! {
        <div class="education-list">
            {for records.iter().map(|item| {
                html! {
                    <article class="edu-item">
                        <img
                            class="edu-logo"
                            src={item.image.clone().unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())}
                            alt={translations.t(&item.degree_key)}
                        />
                        <div class="edu-right">
                            <h3>{translations.t(&item.degree_key)}</h3>
                            {meta_row(&translations, &item.institution_key, &item.years_key)}
                            {
                                match &item.desc_key {
                                    Some(key) => html! { <p>{translations.t(key)}</p> },
                                    None => html! {},
                                }
                            }
                            {skill_chips(&item.skills, &translations, "edu-skills")}
                        </div>
                    </article>
                }
            })}
        </div>
    }
}

#[function_component(Positions)]
pub fn positions() -> Html {
    let translations = use_context::<Translations>();
    let records = use_fetched::<PositionRecord>(POSITIONS_PATH);
    let Some(translations) = translations else {
        return html! {};
    };
    let Some(records) = (*records).clone() else {
        return html! {};
    };

    html! {
        <div class="positions-list">
            {for records.iter().map(|item| {
                html! {
                    <article class="pos-item">
                        <img
                            class="pos-logo"
                            src={item.image.clone().unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())}
                            alt={translations.t(&item.title_key)}
                        />
                        <div class="pos-right">
                            <h3>{translations.t(&item.title_key)}</h3>
                            {meta_row(&translations, &item.company_key, &item.years_key)}
                            {
                                match &item.desc_key {
                                    Some(key) => html! { <p>{translations.t(key)}</p> },
                                    None => html! {},
                                }
                            }
                        </div>
                    </article>
                }
            })}
        </div>
    }
}
