use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use crate::i18n::Translations;

pub const CONTACTS_PATH: &str = "data/contacts.json";
pub const EDUCATION_PATH: &str = "data/education.json";
pub const POSITIONS_PATH: &str = "data/positions.json";
pub const PROJECTS_PATH: &str = "data/projects.json";

// Inline SVG stand-in for images that are missing or fail to load.
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' width='800' height='450'><rect width='100%25' height='100%25' fill='%230f1724'/><text x='50%25' y='50%25' fill='%239aa6b2' font-size='20' text-anchor='middle' dy='7'>Image placeholder</text></svg>";

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ContactRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub href: Option<String>,
}

impl ContactRecord {
    pub fn target(&self) -> String {
        if let Some(href) = &self.href {
            return href.clone();
        }
        if self.kind == "email" {
            format!("mailto:{}", self.value)
        } else {
            self.value.clone()
        }
    }

    pub fn aria_label(&self) -> String {
        if self.value.is_empty() {
            self.kind.clone()
        } else {
            format!("{}: {}", self.kind, self.value)
        }
    }

    pub fn display_label(&self) -> &str {
        if self.value.is_empty() {
            &self.kind
        } else {
            &self.value
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EducationRecord {
    #[serde(default)]
    pub image: Option<String>,
    pub degree_key: String,
    pub institution_key: String,
    pub years_key: String,
    #[serde(default)]
    pub desc_key: Option<String>,
    #[serde(default, deserialize_with = "lenient_skills")]
    pub skills: Vec<SkillRef>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PositionRecord {
    #[serde(default)]
    pub image: Option<String>,
    pub title_key: String,
    pub company_key: String,
    pub years_key: String,
    #[serde(default)]
    pub desc_key: Option<String>,
}

// A skill chip is either a literal label or a reference into the dictionaries.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SkillRef {
    Literal(String),
    Keyed { key: String },
}

impl SkillRef {
    pub fn display(&self, translations: &Translations) -> String {
        match self {
            Self::Literal(label) => label.clone(),
            Self::Keyed { key } => translations.t(key),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SkillSpec {
    Known(SkillRef),
    Invalid(IgnoredAny),
}

// An entry that is neither a string nor a `{key}` object costs only itself.
fn lenient_skills<'de, D>(deserializer: D) -> Result<Vec<SkillRef>, D::Error>
where
    D: Deserializer<'de>,
{
    let specs = Vec::<SkillSpec>::deserialize(deserializer)?;
    let mut skills = Vec::with_capacity(specs.len());
    let mut dropped = 0usize;
    for spec in specs {
        match spec {
            SkillSpec::Known(skill) => skills.push(skill),
            SkillSpec::Invalid(_) => dropped += 1,
        }
    }
    if dropped > 0 {
        #[cfg(target_arch = "wasm32")]
        gloo_console::warn!(format!("dropped {dropped} malformed skill entries"));
    }
    Ok(skills)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Category {
    Academic,
    Professional,
    #[default]
    Personal,
}

// A category value outside the known set files under the default; it must
// never reject the record, let alone the whole records array.
impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "academic" => Self::Academic,
            "professional" => Self::Professional,
            _ => Self::Personal,
        })
    }
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Academic => "academic",
            Self::Professional => "professional",
            Self::Personal => "personal",
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Self::Academic => "cat_academic",
            Self::Professional => "cat_professional",
            Self::Personal => "cat_personal",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    #[serde(default)]
    pub category: Category,
    pub title_key: String,
    pub summary_key: String,
    #[serde(default, deserialize_with = "lenient_skills")]
    pub skills: Vec<SkillRef>,
    #[serde(default)]
    pub details: Option<ProjectDetails>,
    #[serde(default)]
    pub details_key: Option<String>,
}

// Older records carried a single translation key instead of a block list.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "DetailsSpec")]
pub enum ProjectDetails {
    Key(String),
    Blocks(Vec<DetailBlock>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DetailsSpec {
    Key(String),
    Blocks(Vec<BlockSpec>),
}

// An element that does not even look like a block (no `type` key, wrong JSON
// shape) is dropped here; a well-formed block with bad fields still reaches
// the renderer, which skips it with a diagnostic.
#[derive(Deserialize)]
#[serde(untagged)]
enum BlockSpec {
    Known(DetailBlock),
    Invalid(IgnoredAny),
}

impl From<DetailsSpec> for ProjectDetails {
    fn from(spec: DetailsSpec) -> Self {
        match spec {
            DetailsSpec::Key(key) => Self::Key(key),
            DetailsSpec::Blocks(specs) => {
                let mut blocks = Vec::with_capacity(specs.len());
                let mut dropped = 0usize;
                for spec in specs {
                    match spec {
                        BlockSpec::Known(block) => blocks.push(block),
                        BlockSpec::Invalid(_) => dropped += 1,
                    }
                }
                if dropped > 0 {
                    #[cfg(target_arch = "wasm32")]
                    gloo_console::warn!(format!(
                        "dropped {dropped} detail elements with no recognizable shape"
                    ));
                }
                Self::Blocks(blocks)
            }
        }
    }
}

/// Raw markup rendered without sanitization. Only ever fed from the site
/// owner's own content files, never from end-user input.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct TrustedMarkup(String);

impl TrustedMarkup {
    pub fn as_raw(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoProvider {
    Youtube,
    Vimeo,
}

// Fields stay optional so a malformed block degrades to a skipped block
// instead of failing the whole details array during deserialization.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum DetailBlock {
    #[serde(rename = "p")]
    Paragraph {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        text_key: Option<String>,
    },
    #[serde(rename = "html")]
    Html {
        #[serde(default)]
        html: TrustedMarkup,
    },
    #[serde(rename = "video")]
    Video {
        #[serde(default)]
        provider: Option<VideoProvider>,
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        src: Option<String>,
        #[serde(default)]
        title: Option<String>,
    },
    #[serde(rename = "img")]
    Image {
        #[serde(default)]
        src: Option<String>,
        #[serde(default)]
        alt: Option<String>,
        #[serde(default)]
        caption: Option<String>,
    },
    #[serde(rename = "file")]
    File {
        #[serde(default)]
        src: Option<String>,
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        label_key: Option<String>,
        #[serde(default)]
        download: bool,
    },
    #[serde(rename = "gallery")]
    Gallery {
        #[serde(default)]
        images: Vec<GalleryImageSpec>,
        #[serde(default)]
        alt: Option<String>,
        #[serde(default)]
        interval: Option<u32>,
    },
    #[serde(other)]
    Unknown,
}

pub fn video_embed_url(
    provider: Option<VideoProvider>,
    id: Option<&str>,
    src: Option<&str>,
) -> Option<String> {
    if let Some(src) = src {
        return Some(src.to_string());
    }
    match (provider, id) {
        (Some(VideoProvider::Youtube), Some(id)) => {
            Some(format!("https://www.youtube.com/embed/{id}?rel=0"))
        }
        (Some(VideoProvider::Vimeo), Some(id)) => {
            Some(format!("https://player.vimeo.com/video/{id}"))
        }
        _ => None,
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum GalleryImageSpec {
    Bare(String),
    Detailed {
        #[serde(default)]
        src: Option<String>,
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        alt: Option<String>,
        #[serde(default)]
        caption: Option<String>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct GalleryImage {
    pub src: String,
    pub alt: String,
    pub caption: String,
}

// Entries without a usable source are dropped.
pub fn normalize_gallery_images(specs: &[GalleryImageSpec]) -> Vec<GalleryImage> {
    specs
        .iter()
        .filter_map(|spec| match spec {
            GalleryImageSpec::Bare(src) if !src.is_empty() => Some(GalleryImage {
                src: src.clone(),
                alt: String::new(),
                caption: String::new(),
            }),
            GalleryImageSpec::Bare(_) => None,
            GalleryImageSpec::Detailed {
                src,
                url,
                alt,
                caption,
            } => {
                let src = src.clone().or_else(|| url.clone())?;
                if src.is_empty() {
                    return None;
                }
                Some(GalleryImage {
                    src,
                    alt: alt.clone().unwrap_or_default(),
                    caption: caption.clone().unwrap_or_default(),
                })
            }
        })
        .collect()
}

pub fn file_label(
    label: Option<&str>,
    label_key: Option<&str>,
    src: &str,
    translations: &Translations,
) -> String {
    if let Some(key) = label_key {
        return translations.t(key);
    }
    if let Some(label) = label {
        return label.to_string();
    }
    src.rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or("Download")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Language, Translations};
    use std::collections::HashMap;
    use std::rc::Rc;

    fn empty_translations() -> Translations {
        Translations::new(
            Language::En,
            Rc::new(HashMap::new()),
            Rc::new(HashMap::new()),
        )
    }

    #[test]
    fn project_record_defaults_category_to_personal() {
        let record: ProjectRecord = serde_json::from_str(
            r#"{"id":"x","title_key":"t","summary_key":"s"}"#,
        )
        .expect("record parses");
        assert_eq!(record.category, Category::Personal);
        assert!(record.skills.is_empty());
        assert!(record.details.is_none());
    }

    #[test]
    fn unknown_category_maps_to_personal_without_rejecting_neighbors() {
        let records: Vec<ProjectRecord> = serde_json::from_str(
            r#"[{"id":"a","category":"research","title_key":"t","summary_key":"s"},
                {"id":"b","category":"academic","title_key":"t","summary_key":"s"}]"#,
        )
        .expect("array parses");
        assert_eq!(records[0].category, Category::Personal);
        assert_eq!(records[1].category, Category::Academic);
    }

    #[test]
    fn untyped_details_element_costs_only_itself() {
        let record: ProjectRecord = serde_json::from_str(
            r#"{"id":"x","title_key":"t","summary_key":"s",
                "details":[{"type":"p","text":"a"},{"text":"no tag"},{"type":"p","text":"b"}]}"#,
        )
        .expect("record parses");
        let Some(ProjectDetails::Blocks(blocks)) = record.details else {
            panic!("expected block details");
        };
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[1], DetailBlock::Paragraph { .. }));
    }

    #[test]
    fn malformed_skill_entry_is_dropped_not_fatal() {
        let record: ProjectRecord = serde_json::from_str(
            r#"{"id":"x","title_key":"t","summary_key":"s",
                "skills":["Rust",7,{"key":"skill_ml"},{"label":"no key"}]}"#,
        )
        .expect("record parses");
        assert_eq!(record.skills.len(), 2);
        assert_eq!(record.skills[1], SkillRef::Keyed { key: "skill_ml".to_string() });
    }

    #[test]
    fn unknown_block_tag_is_tolerated() {
        let blocks: Vec<DetailBlock> = serde_json::from_str(
            r#"[{"type":"p","text":"a"},{"type":"holo","spin":3},{"type":"p","text":"b"}]"#,
        )
        .expect("list parses");
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1], DetailBlock::Unknown);
    }

    #[test]
    fn legacy_string_details_parse_as_key() {
        let record: ProjectRecord = serde_json::from_str(
            r#"{"id":"x","title_key":"t","summary_key":"s","details":"proj_x_details"}"#,
        )
        .expect("record parses");
        assert_eq!(
            record.details,
            Some(ProjectDetails::Key("proj_x_details".to_string()))
        );
    }

    #[test]
    fn video_without_source_or_provider_is_malformed() {
        let block: DetailBlock =
            serde_json::from_str(r#"{"type":"video"}"#).expect("block parses");
        let DetailBlock::Video {
            provider, id, src, ..
        } = block
        else {
            panic!("expected video block");
        };
        assert_eq!(
            video_embed_url(provider, id.as_deref(), src.as_deref()),
            None
        );
    }

    #[test]
    fn video_provider_builds_embed_url() {
        assert_eq!(
            video_embed_url(Some(VideoProvider::Youtube), Some("abc"), None).as_deref(),
            Some("https://www.youtube.com/embed/abc?rel=0")
        );
        assert_eq!(
            video_embed_url(Some(VideoProvider::Vimeo), Some("123"), None).as_deref(),
            Some("https://player.vimeo.com/video/123")
        );
        assert_eq!(
            video_embed_url(None, None, Some("https://example.com/v.mp4")).as_deref(),
            Some("https://example.com/v.mp4")
        );
    }

    #[test]
    fn skills_accept_strings_and_key_objects() {
        let skills: Vec<SkillRef> =
            serde_json::from_str(r#"["Rust",{"key":"skill_ml"}]"#).expect("skills parse");
        let t = empty_translations();
        assert_eq!(skills[0].display(&t), "Rust");
        assert_eq!(skills[1].display(&t), "skill_ml");
    }

    #[test]
    fn gallery_images_normalize_both_shapes_and_drop_srcless() {
        let specs: Vec<GalleryImageSpec> = serde_json::from_str(
            r#"["a.png",{"src":"b.png","alt":"B","caption":"c"},{"alt":"broken"},{"url":"d.png"}]"#,
        )
        .expect("specs parse");
        let images = normalize_gallery_images(&specs);
        assert_eq!(images.len(), 3);
        assert_eq!(images[0].src, "a.png");
        assert_eq!(images[1].alt, "B");
        assert_eq!(images[2].src, "d.png");
    }

    #[test]
    fn file_label_prefers_key_then_label_then_filename() {
        let t = empty_translations();
        assert_eq!(
            file_label(Some("Thesis"), Some("thesis_label"), "docs/t.pdf", &t),
            "thesis_label"
        );
        assert_eq!(file_label(Some("Thesis"), None, "docs/t.pdf", &t), "Thesis");
        assert_eq!(file_label(None, None, "docs/t.pdf", &t), "t.pdf");
        assert_eq!(file_label(None, None, "", &t), "Download");
    }

    #[test]
    fn email_contact_gets_mailto_target() {
        let contact: ContactRecord = serde_json::from_str(
            r#"{"type":"email","value":"me@example.com","icon":"icons/mail.svg"}"#,
        )
        .expect("contact parses");
        assert_eq!(contact.target(), "mailto:me@example.com");
        assert_eq!(contact.aria_label(), "email: me@example.com");
    }

    #[test]
    fn explicit_href_overrides_derived_target() {
        let contact: ContactRecord = serde_json::from_str(
            r#"{"type":"github","value":"@me","icon":"i.svg","href":"https://github.com/me"}"#,
        )
        .expect("contact parses");
        assert_eq!(contact.target(), "https://github.com/me");
    }
}
