use std::fs;
use std::path::Path;

use axum::Router;
use serde::de::DeserializeOwned;
use tower_http::services::{ServeDir, ServeFile};

use crate::content::{
    normalize_gallery_images, video_embed_url, DetailBlock, EducationRecord, PositionRecord,
    ProjectDetails, ProjectRecord, SkillRef, EDUCATION_PATH, POSITIONS_PATH, PROJECTS_PATH,
};
use crate::i18n::{Dictionary, Language, FALLBACK_LANGUAGE};
use crate::nav::Tab;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SITE_ROOT: &str = "dist";

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let port = resolve_port(std::env::var("PORT").ok().as_deref());
    let site_root = std::env::var("SITE_ROOT").unwrap_or_else(|_| DEFAULT_SITE_ROOT.to_string());

    // Surface broken content files and unresolved translation keys before
    // they degrade to empty sections in the browser.
    let report = audit_content(Path::new(&site_root));
    for problem in &report.problems {
        eprintln!("content audit: {problem}");
    }
    if report.problems.is_empty() {
        println!("content audit: ok");
    }

    let static_service = ServeDir::new(&site_root)
        .not_found_service(ServeFile::new(format!("{site_root}/index.html")));
    let app = Router::new().fallback_service(static_service);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    println!("server listening on http://127.0.0.1:{port}");
    axum::serve(listener, app).await?;
    Ok(())
}

fn resolve_port(value: Option<&str>) -> u16 {
    value
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

pub(crate) struct AuditReport {
    pub(crate) problems: Vec<String>,
}

fn read_json<T: DeserializeOwned>(
    root: &Path,
    relative: &str,
    problems: &mut Vec<String>,
) -> Option<T> {
    let path = root.join(relative);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(error) => {
            problems.push(format!("could not read {relative}: {error}"));
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(error) => {
            problems.push(format!("could not parse {relative}: {error}"));
            None
        }
    }
}

pub(crate) fn audit_content(root: &Path) -> AuditReport {
    let mut problems = Vec::new();

    let mut fallback = Dictionary::new();
    for lang in Language::ALL {
        let dictionary = read_json::<Dictionary>(root, &lang.dictionary_path(), &mut problems);
        if lang == FALLBACK_LANGUAGE {
            fallback = dictionary.unwrap_or_default();
        }
    }

    let projects =
        read_json::<Vec<ProjectRecord>>(root, PROJECTS_PATH, &mut problems).unwrap_or_default();
    let education =
        read_json::<Vec<EducationRecord>>(root, EDUCATION_PATH, &mut problems).unwrap_or_default();
    let positions =
        read_json::<Vec<PositionRecord>>(root, POSITIONS_PATH, &mut problems).unwrap_or_default();

    // Rendering guarantees current-or-fallback resolution, so a key absent
    // from the fallback dictionary is the one that shows up as raw text.
    for key in referenced_keys(&projects, &education, &positions) {
        if !fallback.contains_key(&key) {
            problems.push(format!("unresolved translation key '{key}'"));
        }
    }

    for record in &projects {
        for problem in malformed_blocks(record) {
            problems.push(problem);
        }
    }

    AuditReport { problems }
}

// Blocks the renderer would skip: authors get told at serve time instead of
// noticing a hole in the page.
pub(crate) fn malformed_blocks(record: &ProjectRecord) -> Vec<String> {
    let Some(ProjectDetails::Blocks(blocks)) = &record.details else {
        return Vec::new();
    };
    let mut problems = Vec::new();
    for (position, block) in blocks.iter().enumerate() {
        let skipped = match block {
            DetailBlock::Paragraph {
                text: None,
                text_key: None,
            } => Some("paragraph block has neither text nor text_key"),
            DetailBlock::Html { html } if html.is_empty() => Some("html block has empty markup"),
            DetailBlock::Video {
                provider, id, src, ..
            } if video_embed_url(*provider, id.as_deref(), src.as_deref()).is_none() => {
                Some("video block has no source and no provider/id")
            }
            DetailBlock::Image { src: None, .. } => Some("img block has no src"),
            DetailBlock::File { src: None, .. } => Some("file block has no src"),
            DetailBlock::Gallery { images, .. }
                if !images.is_empty() && normalize_gallery_images(images).is_empty() =>
            {
                Some("gallery block has no usable images")
            }
            _ => None,
        };
        if let Some(reason) = skipped {
            problems.push(format!(
                "project '{}': block {position} will be skipped: {reason}",
                record.id
            ));
        }
    }
    problems
}

fn collect_skill_keys(skills: &[SkillRef], keys: &mut Vec<String>) {
    for skill in skills {
        if let SkillRef::Keyed { key } = skill {
            keys.push(key.clone());
        }
    }
}

pub(crate) fn referenced_keys(
    projects: &[ProjectRecord],
    education: &[EducationRecord],
    positions: &[PositionRecord],
) -> Vec<String> {
    let mut keys = Vec::new();

    for record in projects {
        keys.push(record.title_key.clone());
        keys.push(record.summary_key.clone());
        collect_skill_keys(&record.skills, &mut keys);
        match &record.details {
            Some(ProjectDetails::Key(key)) => keys.push(key.clone()),
            Some(ProjectDetails::Blocks(blocks)) => {
                for block in blocks {
                    match block {
                        DetailBlock::Paragraph {
                            text_key: Some(key),
                            ..
                        } => keys.push(key.clone()),
                        DetailBlock::File {
                            label_key: Some(key),
                            ..
                        } => keys.push(key.clone()),
                        _ => {}
                    }
                }
            }
            None => {}
        }
        if let Some(key) = &record.details_key {
            keys.push(key.clone());
        }
    }
    if !projects.is_empty() {
        keys.extend(Tab::ORDER.iter().map(|tab| tab.label_key().to_string()));
    }

    for record in education {
        keys.push(record.degree_key.clone());
        keys.push(record.institution_key.clone());
        keys.push(record.years_key.clone());
        if let Some(key) = &record.desc_key {
            keys.push(key.clone());
        }
        collect_skill_keys(&record.skills, &mut keys);
    }

    for record in positions {
        keys.push(record.title_key.clone());
        keys.push(record.company_key.clone());
        keys.push(record.years_key.clone());
        if let Some(key) = &record.desc_key {
            keys.push(key.clone());
        }
    }

    keys.sort();
    keys.dedup();
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_falls_back_on_missing_or_invalid_values() {
        assert_eq!(resolve_port(None), 8080);
        assert_eq!(resolve_port(Some("not-a-port")), 8080);
        assert_eq!(resolve_port(Some("3000")), 3000);
    }

    #[test]
    fn referenced_keys_cover_nested_blocks_and_skills() {
        let projects: Vec<ProjectRecord> = serde_json::from_str(
            r#"[{
                "id": "x",
                "title_key": "proj_x_title",
                "summary_key": "proj_x_summary",
                "skills": ["Rust", {"key": "skill_ml"}],
                "details": [
                    {"type": "p", "text_key": "proj_x_p1"},
                    {"type": "file", "src": "docs/x.pdf", "label_key": "proj_x_file"},
                    {"type": "p", "text": "plain"}
                ]
            }]"#,
        )
        .expect("projects parse");
        let education: Vec<EducationRecord> = serde_json::from_str(
            r#"[{"degree_key": "edu_deg", "institution_key": "edu_inst", "years_key": "edu_years"}]"#,
        )
        .expect("education parses");

        let keys = referenced_keys(&projects, &education, &[]);
        for expected in [
            "proj_x_title",
            "proj_x_summary",
            "skill_ml",
            "proj_x_p1",
            "proj_x_file",
            "cat_all",
            "cat_academic",
            "edu_deg",
            "edu_inst",
            "edu_years",
        ] {
            assert!(keys.contains(&expected.to_string()), "missing {expected}");
        }
        assert!(!keys.contains(&"Rust".to_string()));
        assert!(!keys.contains(&"plain".to_string()));
    }

    #[test]
    fn malformed_blocks_flag_only_unrenderable_entries() {
        let record: ProjectRecord = serde_json::from_str(
            r#"{
                "id": "x",
                "title_key": "t",
                "summary_key": "s",
                "details": [
                    {"type": "p", "text": "a"},
                    {"type": "video"},
                    {"type": "img"},
                    {"type": "gallery", "images": [{"alt": "no src"}]},
                    {"type": "p", "text": "b"}
                ]
            }"#,
        )
        .expect("record parses");

        let problems = malformed_blocks(&record);
        assert_eq!(problems.len(), 3);
        assert!(problems[0].contains("block 1"));
        assert!(problems[1].contains("block 2"));
        assert!(problems[2].contains("block 3"));
    }

    #[test]
    fn audit_reports_parse_failures_and_unresolved_keys() {
        let root = std::env::temp_dir().join(format!("folio-audit-{}", std::process::id()));
        fs::create_dir_all(root.join("lang")).expect("lang dir");
        fs::create_dir_all(root.join("data")).expect("data dir");
        fs::write(root.join("lang/en.json"), r#"{"proj_x_title": "X"}"#).expect("en.json");
        fs::write(root.join("lang/pt.json"), r#"{"proj_x_title": "X"}"#).expect("pt.json");
        fs::write(
            root.join("data/projects.json"),
            r#"[{"id": "x", "title_key": "proj_x_title", "summary_key": "proj_x_summary"}]"#,
        )
        .expect("projects.json");
        fs::write(root.join("data/education.json"), "not json").expect("education.json");
        fs::write(root.join("data/positions.json"), "[]").expect("positions.json");

        let report = audit_content(&root);
        fs::remove_dir_all(&root).ok();

        assert!(report
            .problems
            .iter()
            .any(|problem| problem.contains("could not parse data/education.json")));
        assert!(report
            .problems
            .iter()
            .any(|problem| problem.contains("unresolved translation key 'proj_x_summary'")));
        assert!(!report
            .problems
            .iter()
            .any(|problem| problem.contains("'proj_x_title'")));
    }
}
