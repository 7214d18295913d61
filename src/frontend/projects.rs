use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, HtmlElement};
use yew::prelude::*;

use crate::content::{ProjectRecord, PROJECTS_PATH};
use crate::i18n::Translations;
use crate::nav::{fragment_for, projects_for, step_clamped, BrowseState, Tab};

use super::details::DetailBlocks;
use super::lists::skill_chips;
use super::{current_fragment_id, document, fetch_json};

pub enum BrowseAction {
    ActivateTab(Tab),
    Toggle(String),
    Open(String),
    CloseAll,
    Reset,
}

impl Reducible for BrowseState {
    type Action = BrowseAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            BrowseAction::ActivateTab(tab) => Rc::new(self.with_tab(tab)),
            BrowseAction::Toggle(id) => Rc::new(self.toggled(&id)),
            BrowseAction::Open(id) => Rc::new(self.opened(&id)),
            BrowseAction::CloseAll => Rc::new(self.closed()),
            BrowseAction::Reset => Rc::new(Self::default()),
        }
    }
}

fn write_fragment(id: &str) {
    let Some(win) = window() else {
        return;
    };
    if let Ok(history) = win.history() {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&fragment_for(id)));
    }
}

// Clears only a fragment that still names the entry being closed, so a
// fragment written by a subsequently opened entry is never clobbered.
fn clear_fragment_if(id: &str) {
    let Some(win) = window() else {
        return;
    };
    let location = win.location();
    if location.hash().unwrap_or_default() != fragment_for(id) {
        return;
    }
    let path = location.pathname().unwrap_or_default();
    let search = location.search().unwrap_or_default();
    if let Ok(history) = win.history() {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&format!("{path}{search}")));
    }
}

fn editing_target() -> bool {
    let Some(active) = document().and_then(|d| d.active_element()) else {
        return false;
    };
    if matches!(active.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT") {
        return true;
    }
    active
        .dyn_ref::<HtmlElement>()
        .is_some_and(HtmlElement::is_content_editable)
}

fn focus_tab(tab: Tab) {
    if let Some(element) = document().and_then(|d| d.get_element_by_id(&tab.dom_id())) {
        if let Some(element) = element.dyn_ref::<HtmlElement>() {
            let _ = element.focus();
        }
    }
}

#[function_component(ProjectBrowser)]
pub fn project_browser() -> Html {
    let translations = use_context::<Translations>();
    let projects = use_state(|| Option::<Rc<Vec<ProjectRecord>>>::None);
    let browse = use_reducer(BrowseState::default);
    let last_open = use_mut_ref(|| Option::<String>::None);

    // One fetch per page load; a deep link in the address fragment opens its
    // entry as soon as the records arrive.
    {
        let projects = projects.clone();
        let browse = browse.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let fetched = fetch_json::<Vec<ProjectRecord>>(PROJECTS_PATH)
                    .await
                    .unwrap_or_default();
                if let Some(id) = current_fragment_id() {
                    if fetched.iter().any(|record| record.id == id) {
                        browse.dispatch(BrowseAction::Open(id));
                    }
                }
                projects.set(Some(Rc::new(fetched)));
            });
            || ()
        });
    }

    // Language change keeps the cached records but drops tab/open state,
    // rebuilding the whole structure at its defaults.
    {
        let browse = browse.clone();
        let lang = translations.as_ref().map(|t| t.lang);
        use_effect_with(lang, move |_| {
            browse.dispatch(BrowseAction::Reset);
            || ()
        });
    }

    // Mirror the open entry into the address fragment. `open_id` is the only
    // writer; the hashchange listener below only ever reads.
    {
        let last_open = last_open.clone();
        use_effect_with(browse.open_id.clone(), move |open_id| {
            match open_id {
                Some(id) => {
                    write_fragment(id);
                    *last_open.borrow_mut() = Some(id.clone());
                }
                None => {
                    if let Some(previous) = last_open.borrow_mut().take() {
                        clear_fragment_if(&previous);
                    }
                }
            }
            || ()
        });
    }

    let ids: Rc<Vec<String>> = Rc::new(
        (*projects)
            .as_ref()
            .map(|records| records.iter().map(|record| record.id.clone()).collect())
            .unwrap_or_default(),
    );

    // Page-level keys: Escape collapses everything, arrows walk the fetched
    // id order (clamped at the ends). Events a widget already consumed, or
    // typed into a form control, are ignored.
    {
        let browse = browse.clone();
        use_effect_with(
            (ids.clone(), browse.open_id.clone()),
            move |(ids, open_id)| {
                let ids = ids.clone();
                let open_id = open_id.clone();
                let listener = window().map(|win| {
                    EventListener::new(&win, "keydown", move |event| {
                        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                            return;
                        };
                        if event.default_prevented() {
                            return;
                        }
                        match event.key().as_str() {
                            "Escape" => browse.dispatch(BrowseAction::CloseAll),
                            key @ ("ArrowLeft" | "ArrowRight") => {
                                if editing_target() {
                                    return;
                                }
                                let delta = if key == "ArrowRight" { 1 } else { -1 };
                                let Some(current) =
                                    open_id.clone().or_else(current_fragment_id)
                                else {
                                    return;
                                };
                                if let Some(next) = step_clamped(&ids, &current, delta) {
                                    browse.dispatch(BrowseAction::Open(next.to_string()));
                                }
                            }
                            _ => {}
                        }
                    })
                });
                move || drop(listener)
            },
        );
    }

    // Back/forward navigation re-runs the deep-link open logic.
    {
        let browse = browse.clone();
        use_effect_with(ids.clone(), move |ids| {
            let ids = ids.clone();
            let listener = window().map(|win| {
                EventListener::new(&win, "hashchange", move |_| {
                    let Some(id) = current_fragment_id() else {
                        return;
                    };
                    if ids.contains(&id) {
                        browse.dispatch(BrowseAction::Open(id));
                    }
                })
            });
            move || drop(listener)
        });
    }

    let Some(translations) = translations else {
        return html! {};
    };
    let Some(records) = (*projects).clone() else {
        return html! { <div class="projects-loading" aria-hidden="true" /> };
    };

    let tabs = Tab::ORDER.iter().map(|tab| {
        let tab = *tab;
        let selected = tab == browse.tab;
        let onclick = {
            let browse = browse.clone();
            Callback::from(move |_: MouseEvent| browse.dispatch(BrowseAction::ActivateTab(tab)))
        };
        let onkeydown = {
            let browse = browse.clone();
            Callback::from(move |event: KeyboardEvent| {
                let delta = match event.key().as_str() {
                    "ArrowLeft" => -1,
                    "ArrowRight" => 1,
                    _ => return,
                };
                event.prevent_default();
                let next = tab.neighbor(delta);
                browse.dispatch(BrowseAction::ActivateTab(next));
                focus_tab(next);
            })
        };
        html! {
            <button
                type="button"
                role="tab"
                id={tab.dom_id()}
                class={classes!("project-tab", selected.then_some("active"))}
                aria-selected={selected.to_string()}
                aria-controls={tab.panel_dom_id()}
                tabindex={if selected { "0" } else { "-1" }}
                onclick={onclick}
                onkeydown={onkeydown}
            >
                {translations.t(tab.label_key())}
            </button>
        }
    });

    let on_toggle = {
        let browse = browse.clone();
        Callback::from(move |id: String| browse.dispatch(BrowseAction::Toggle(id)))
    };

    let panel_records = projects_for(browse.tab, &records);

    html! {
        <div class="project-browser">
            <div class="project-tabs" role="tablist" aria-label={translations.t("projects_title")}>
                {for tabs}
            </div>
            <div
                class="project-panel"
                role="tabpanel"
                id={browse.tab.panel_dom_id()}
                aria-labelledby={browse.tab.dom_id()}
            >
                <div class="project-accordion">
                    {for panel_records.into_iter().map(|record| {
                        html! {
                            <ProjectEntry
                                key={record.id.clone()}
                                record={record.clone()}
                                open={browse.open_id.as_deref() == Some(record.id.as_str())}
                                on_toggle={on_toggle.clone()}
                            />
                        }
                    })}
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectEntryProps {
    record: ProjectRecord,
    open: bool,
    on_toggle: Callback<String>,
}

#[function_component(ProjectEntry)]
fn project_entry(props: &ProjectEntryProps) -> Html {
    let translations = use_context::<Translations>();
    let Some(translations) = translations else {
        return html! {};
    };
    let record = &props.record;

    let toggle = {
        let on_toggle = props.on_toggle.clone();
        let id = record.id.clone();
        Callback::from(move |_: ()| on_toggle.emit(id.clone()))
    };
    let onclick = {
        let toggle = toggle.clone();
        Callback::from(move |_: MouseEvent| toggle.emit(()))
    };
    let onkeydown = {
        let toggle = toggle.clone();
        Callback::from(move |event: KeyboardEvent| {
            if matches!(event.key().as_str(), "Enter" | " ") {
                event.prevent_default();
                toggle.emit(());
            }
        })
    };

    html! {
        <article
            class={classes!("accordion-item", "card", "project-card", props.open.then_some("open"))}
            data-project-id={record.id.clone()}
        >
            <header class="accordion-header" tabindex="0" onclick={onclick} onkeydown={onkeydown}>
                <div class="accordion-title">
                    <h3>{translations.t(&record.title_key)}</h3>
                    <p class="summary-short">{translations.t(&record.summary_key)}</p>
                    {skill_chips(&record.skills, &translations, "header-skills")}
                </div>
                <button type="button" class="accordion-toggle" aria-expanded={props.open.to_string()}>
                    <span class="chev">{"\u{25BE}"}</span>
                </button>
            </header>
            {
                if props.open {
                    html! {
                        <div class="accordion-body">
                            <div class="acc-details">
                                <DetailBlocks
                                    details={record.details.clone()}
                                    details_key={record.details_key.clone().map(AttrValue::from)}
                                />
                            </div>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </article>
    }
}
