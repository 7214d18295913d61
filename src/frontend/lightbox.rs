use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;

use crate::content::GalleryImage;
use crate::nav::LightboxState;

use super::document;

pub enum LightboxAction {
    Open(Vec<GalleryImage>, usize),
    Step(isize),
    Close,
}

impl Reducible for LightboxState {
    type Action = LightboxAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            LightboxAction::Open(images, index) => Rc::new(Self::opened(images, index)),
            LightboxAction::Step(delta) => Rc::new(self.stepped(delta)),
            LightboxAction::Close => Rc::new(self.closed()),
        }
    }
}

// Injected through context so any image-bearing block can open the overlay
// without reaching for a global.
#[derive(Clone, PartialEq)]
pub struct LightboxHandle {
    open: Callback<(Vec<GalleryImage>, usize)>,
}

impl LightboxHandle {
    pub fn new(open: Callback<(Vec<GalleryImage>, usize)>) -> Self {
        Self { open }
    }

    pub fn show(&self, images: Vec<GalleryImage>, index: usize) {
        self.open.emit((images, index));
    }
}

#[derive(Properties, PartialEq)]
pub struct LightboxProps {
    pub state: UseReducerHandle<LightboxState>,
}

#[function_component(Lightbox)]
pub fn lightbox(props: &LightboxProps) -> Html {
    // Capture-phase handler: keys consumed here are defaulted before the
    // project browser's window listener sees them.
    {
        let state = props.state.clone();
        use_effect_with(props.state.visible, move |visible| {
            let listener = (*visible)
                .then(document)
                .flatten()
                .map(|target| {
                    EventListener::new_with_options(
                        &target,
                        "keydown",
                        EventListenerOptions {
                            phase: EventListenerPhase::Capture,
                            passive: false,
                        },
                        move |event| {
                            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                                return;
                            };
                            match event.key().as_str() {
                                "Escape" => {
                                    event.prevent_default();
                                    state.dispatch(LightboxAction::Close);
                                }
                                "ArrowLeft" => {
                                    event.prevent_default();
                                    state.dispatch(LightboxAction::Step(-1));
                                }
                                "ArrowRight" => {
                                    event.prevent_default();
                                    state.dispatch(LightboxAction::Step(1));
                                }
                                _ => {}
                            }
                        },
                    )
                });
            move || drop(listener)
        });
    }

    if !props.state.visible {
        return html! {};
    }

    let on_backdrop_click = {
        let state = props.state.clone();
        Callback::from(move |event: MouseEvent| {
            // Only a click on the backdrop itself dismisses.
            if event.target() == event.current_target() {
                state.dispatch(LightboxAction::Close);
            }
        })
    };
    let on_close = {
        let state = props.state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(LightboxAction::Close))
    };
    let step = |delta: isize| {
        let state = props.state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(LightboxAction::Step(delta)))
    };

    let image = props.state.current();
    let caption = image.map(|image| image.caption.clone()).unwrap_or_default();
    let navigable = props.state.images.len() > 1;

    html! {
        <div class="lightbox-backdrop open" role="dialog" aria-modal="true" onclick={on_backdrop_click}>
            <figure class="lightbox-figure">
                {
                    if let Some(image) = image {
                        html! {
                            <img
                                class="lightbox-image"
                                src={image.src.clone()}
                                alt={image.alt.clone()}
                            />
                        }
                    } else {
                        html! {}
                    }
                }
                <figcaption class="lightbox-caption">{caption}</figcaption>
            </figure>
            {
                if navigable {
                    html! {
                        <>
                            <button type="button" class="lightbox-prev" aria-label="Previous image" onclick={step(-1)}>{"\u{276E}"}</button>
                            <button type="button" class="lightbox-next" aria-label="Next image" onclick={step(1)}>{"\u{276F}"}</button>
                        </>
                    }
                } else {
                    html! {}
                }
            }
            <button type="button" class="lightbox-close" aria-label="Close" onclick={on_close}>{"\u{00D7}"}</button>
        </div>
    }
}
