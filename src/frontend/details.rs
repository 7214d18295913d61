use gloo_console::warn;
use yew::prelude::*;

use crate::content::{
    file_label, normalize_gallery_images, video_embed_url, DetailBlock, GalleryImage,
    ProjectDetails,
};
use crate::i18n::Translations;

use super::gallery::GalleryCarousel;
use super::lightbox::LightboxHandle;

#[derive(Properties, PartialEq)]
pub struct DetailBlocksProps {
    #[prop_or_default]
    pub details: Option<ProjectDetails>,
    #[prop_or_default]
    pub details_key: Option<AttrValue>,
}

/// Interprets a project's declarative content blocks. Each block renders
/// independently; a malformed block is skipped without aborting the rest.
#[function_component(DetailBlocks)]
pub fn detail_blocks(props: &DetailBlocksProps) -> Html {
    let translations = use_context::<Translations>();
    let lightbox = use_context::<LightboxHandle>();
    let Some(translations) = translations else {
        return html! {};
    };

    match &props.details {
        Some(ProjectDetails::Blocks(blocks)) => html! {
            <>
                {for blocks
                    .iter()
                    .filter_map(|block| render_block(block, &translations, lightbox.as_ref()))}
            </>
        },
        // Legacy single-string path: the string is a translation key, and an
        // unknown key degrades to the literal string.
        Some(ProjectDetails::Key(key)) => html! { <p>{translations.t(key)}</p> },
        None => match &props.details_key {
            Some(key) => html! { <p>{translations.t(key)}</p> },
            None => html! {},
        },
    }
}

fn render_block(
    block: &DetailBlock,
    translations: &Translations,
    lightbox: Option<&LightboxHandle>,
) -> Option<Html> {
    match block {
        DetailBlock::Paragraph { text, text_key } => {
            let content = match (text_key, text) {
                (Some(key), _) => translations.t(key),
                (None, Some(text)) => text.clone(),
                (None, None) => {
                    warn!("skipping paragraph block with neither text nor text_key");
                    return None;
                }
            };
            Some(html! { <p>{content}</p> })
        }
        DetailBlock::Html { html } => {
            if html.is_empty() {
                warn!("skipping html block with empty markup");
                return None;
            }
            let markup = Html::from_html_unchecked(AttrValue::from(html.as_raw().to_string()));
            Some(html! { <div class="detail-html">{markup}</div> })
        }
        DetailBlock::Video {
            provider,
            id,
            src,
            title,
        } => {
            let Some(embed) = video_embed_url(*provider, id.as_deref(), src.as_deref()) else {
                warn!("skipping video block with no source and no provider/id");
                return None;
            };
            let title = title.clone().unwrap_or_else(|| "Embedded video".to_string());
            Some(html! {
                <div class="video-wrap">
                    <iframe
                        src={embed}
                        title={title}
                        loading="lazy"
                        frameborder="0"
                        allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture"
                        allowfullscreen=""
                    />
                </div>
            })
        }
        DetailBlock::Image { src, alt, caption } => {
            let Some(src) = src.clone() else {
                warn!("skipping img block without src");
                return None;
            };
            let alt = alt.clone().unwrap_or_default();
            let image = GalleryImage {
                src: src.clone(),
                alt: alt.clone(),
                caption: caption.clone().unwrap_or_default(),
            };
            let onclick = lightbox.cloned().map(|lightbox| {
                Callback::from(move |_: MouseEvent| lightbox.show(vec![image.clone()], 0))
            });
            Some(html! {
                <figure class="detail-figure">
                    <img src={src} alt={alt} loading="lazy" onclick={onclick} />
                    {
                        match caption {
                            Some(caption) => html! { <figcaption>{caption.clone()}</figcaption> },
                            None => html! {},
                        }
                    }
                </figure>
            })
        }
        DetailBlock::File {
            src,
            label,
            label_key,
            download,
        } => {
            let Some(src) = src.clone() else {
                warn!("skipping file block without src");
                return None;
            };
            let label = file_label(label.as_deref(), label_key.as_deref(), &src, translations);
            let download_attr = (*download).then(|| AttrValue::from(""));
            Some(html! {
                <div class="detail-file">
                    <a
                        class="file-btn btn"
                        href={src}
                        target="_blank"
                        rel="noopener noreferrer"
                        download={download_attr}
                    >
                        {label}
                    </a>
                </div>
            })
        }
        DetailBlock::Gallery {
            images,
            alt,
            interval,
        } => {
            let images = normalize_gallery_images(images);
            if images.is_empty() {
                return None;
            }
            let alt_prefix = AttrValue::from(alt.clone().unwrap_or_default());
            Some(html! {
                <GalleryCarousel images={images} interval={*interval} alt_prefix={alt_prefix} />
            })
        }
        // Unrecognized tags degrade silently so newer content files keep
        // rendering on older builds.
        DetailBlock::Unknown => None,
    }
}
