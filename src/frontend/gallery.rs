use std::rc::Rc;

use gloo_timers::callback::Interval;
use yew::prelude::*;

use crate::content::GalleryImage;
use crate::i18n::Translations;
use crate::nav::{gallery_interval, GalleryPosition};

use super::lightbox::LightboxHandle;

pub enum GalleryAction {
    Prev,
    Next,
    Jump(usize),
    Reset(usize),
}

impl Reducible for GalleryPosition {
    type Action = GalleryAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            GalleryAction::Prev => Rc::new(self.stepped(-1)),
            GalleryAction::Next => Rc::new(self.stepped(1)),
            GalleryAction::Jump(index) => Rc::new(self.jumped(index)),
            GalleryAction::Reset(len) => Rc::new(Self::new(len)),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct GalleryProps {
    pub images: Vec<GalleryImage>,
    #[prop_or_default]
    pub interval: Option<u32>,
    #[prop_or_default]
    pub alt_prefix: AttrValue,
}

#[function_component(GalleryCarousel)]
pub fn gallery_carousel(props: &GalleryProps) -> Html {
    let len = props.images.len();
    let position = use_reducer(|| GalleryPosition::new(len));
    let hovered = use_state(|| false);
    let interval_ms = gallery_interval(props.interval);

    {
        let position = position.clone();
        use_effect_with(len, move |len| {
            position.dispatch(GalleryAction::Reset(*len));
            || ()
        });
    }

    // Auto-advance runs only while unhovered; dropping the Interval on
    // cleanup tears the timer down with the widget.
    {
        let position = position.clone();
        use_effect_with(
            (*hovered, len, interval_ms),
            move |(hovered, len, interval_ms)| {
                let interval_ms = *interval_ms;
                let timer = (!*hovered && *len > 1)
                    .then(move || Interval::new(interval_ms, move || {
                        position.dispatch(GalleryAction::Next);
                    }));
                move || drop(timer)
            },
        );
    }

    let lightbox = use_context::<LightboxHandle>();
    let translations = use_context::<Translations>();

    if len == 0 {
        return html! {};
    }

    let index = position.index.min(len - 1);
    let current = &props.images[index];
    let alt = if current.alt.is_empty() {
        props.alt_prefix.clone()
    } else {
        AttrValue::from(current.alt.clone())
    };

    let onkeydown = {
        let position = position.clone();
        Callback::from(move |event: KeyboardEvent| match event.key().as_str() {
            "ArrowLeft" => {
                event.prevent_default();
                position.dispatch(GalleryAction::Prev);
            }
            "ArrowRight" => {
                event.prevent_default();
                position.dispatch(GalleryAction::Next);
            }
            _ => {}
        })
    };
    let on_prev = {
        let position = position.clone();
        Callback::from(move |_: MouseEvent| position.dispatch(GalleryAction::Prev))
    };
    let on_next = {
        let position = position.clone();
        Callback::from(move |_: MouseEvent| position.dispatch(GalleryAction::Next))
    };
    let on_enter = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(true))
    };
    let on_leave = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(false))
    };
    let on_image_click = {
        let images = props.images.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(lightbox) = &lightbox {
                lightbox.show(images.clone(), index);
            }
        })
    };

    let dots = (0..len).map(|dot| {
        let onclick = {
            let position = position.clone();
            Callback::from(move |_: MouseEvent| position.dispatch(GalleryAction::Jump(dot)))
        };
        let number = (dot + 1).to_string();
        let label = match &translations {
            Some(translations) => translations.t_with("gallery_dot_label", &[("n", &number)]),
            None => format!("Show image {number}"),
        };
        html! {
            <button
                type="button"
                class={classes!("slideshow-dot", (dot == index).then_some("active"))}
                aria-label={label}
                onclick={onclick}
            />
        }
    });

    html! {
        <div
            class="slideshow-wrap"
            tabindex="0"
            onkeydown={onkeydown}
            onmouseenter={on_enter}
            onmouseleave={on_leave}
        >
            <div class="slideshow-stage">
                <img
                    class="slideshow-main"
                    src={current.src.clone()}
                    alt={alt}
                    loading="lazy"
                    onclick={on_image_click}
                />
            </div>
            <button type="button" class="slideshow-prev" aria-label="Previous image" onclick={on_prev}>{"\u{276E}"}</button>
            <button type="button" class="slideshow-next" aria-label="Next image" onclick={on_next}>{"\u{276F}"}</button>
            <div class="slideshow-dots">
                {for dots}
            </div>
        </div>
    }
}
