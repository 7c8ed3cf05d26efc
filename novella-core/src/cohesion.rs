//! Story cohesion validation.
//!
//! A pre-flight check over the authored graph: it must run before a build
//! ships and runs again when a session starts. Pure function, no side
//! effects.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::story::{ChoiceTarget, StoryGraph};

/// Ways a story graph fails the cohesion check. Fatal to packaging and to
/// session startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CohesionError {
    #[error("story has no scenes")]
    NoScenes,

    #[error("story has no choices")]
    NoChoices,

    #[error("scene coverage differs between languages: \"{scene}\" is missing in \"{language}\"")]
    UnevenCoverage { language: String, scene: String },

    #[error("scene \"{scene}\" ({language}) has {count} choice(s); every scene with choices needs at least 2")]
    InsufficientChoices {
        language: String,
        scene: String,
        count: usize,
    },

    #[error("no choice leads to an ending")]
    NoEnding,

    #[error("no choice leads back to the start scene \"{0}\"")]
    NoPathToStart(String),
}

/// Validate the graph: non-empty scenes and choices, uniform per-language
/// scene coverage, minimum branching everywhere, a reachable ending, and a
/// path back to `start_scene`.
///
/// All languages are scanned together; one failing scene in any language
/// fails the whole run.
///
/// Note the start condition checks that some choice *targets* the start id,
/// not that a scene with that id exists. That asymmetry is intentional:
/// cohesion demands a loop back to the beginning.
pub fn validate(graph: &StoryGraph, start_scene: &str) -> Result<(), CohesionError> {
    if !graph.has_scenes() {
        return Err(CohesionError::NoScenes);
    }
    if !graph.has_choices() {
        return Err(CohesionError::NoChoices);
    }

    check_uniform_coverage(graph)?;

    let mut has_start = false;
    let mut has_end = false;

    for (language, scene, choices) in graph.all_choice_lists() {
        if choices.len() < 2 {
            return Err(CohesionError::InsufficientChoices {
                language: language.to_string(),
                scene: scene.to_string(),
                count: choices.len(),
            });
        }
        for choice in choices {
            match &choice.target {
                ChoiceTarget::End => has_end = true,
                ChoiceTarget::Scene(id) if id == start_scene => has_start = true,
                ChoiceTarget::Scene(_) => {}
            }
        }
    }

    if !has_end {
        return Err(CohesionError::NoEnding);
    }
    if !has_start {
        return Err(CohesionError::NoPathToStart(start_scene.to_string()));
    }

    Ok(())
}

/// Every language must carry the same scene-id set; translation has to cover
/// all scenes uniformly.
fn check_uniform_coverage(graph: &StoryGraph) -> Result<(), CohesionError> {
    let mut languages: Vec<&str> = graph.languages().collect();
    languages.sort_unstable();

    let Some((first, rest)) = languages.split_first() else {
        return Ok(());
    };

    let reference: BTreeSet<&str> = graph.scene_ids(first).collect();
    for language in rest {
        let ids: BTreeSet<&str> = graph.scene_ids(language).collect();
        if let Some(missing) = reference.difference(&ids).next() {
            return Err(CohesionError::UnevenCoverage {
                language: language.to_string(),
                scene: missing.to_string(),
            });
        }
        if let Some(extra) = ids.difference(&reference).next() {
            return Err(CohesionError::UnevenCoverage {
                language: first.to_string(),
                scene: extra.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::story::StoryBuilder;
    use crate::testing::sample_story;

    #[tokio::test]
    async fn test_well_formed_story_validates() {
        let graph = sample_story().await;
        assert_eq!(validate(&graph, "start"), Ok(()));
    }

    #[test]
    fn test_empty_graph_has_no_scenes() {
        let graph = StoryGraph::default();
        assert_eq!(validate(&graph, "start"), Err(CohesionError::NoScenes));
    }

    #[tokio::test]
    async fn test_scenes_without_choices_fail() {
        let mut builder = StoryBuilder::new(&EngineConfig::default());
        builder.add_scene("start", "Alone.", "", None).await;
        let graph = builder.build();
        assert_eq!(validate(&graph, "start"), Err(CohesionError::NoChoices));
    }

    #[tokio::test]
    async fn test_single_choice_scene_fails() {
        let mut builder = StoryBuilder::new(&EngineConfig::default());
        builder.add_scene("start", "Alone.", "", None).await;
        builder
            .add_choice("start", "leave", ChoiceTarget::End)
            .await;
        let graph = builder.build();
        assert_eq!(
            validate(&graph, "start"),
            Err(CohesionError::InsufficientChoices {
                language: "en".to_string(),
                scene: "start".to_string(),
                count: 1,
            })
        );
    }

    #[tokio::test]
    async fn test_missing_ending_fails() {
        let mut builder = StoryBuilder::new(&EngineConfig::default());
        builder.add_scene("start", "Loop.", "", None).await;
        builder
            .add_choice("start", "again", ChoiceTarget::scene("start"))
            .await;
        builder
            .add_choice("start", "still again", ChoiceTarget::scene("start"))
            .await;
        let graph = builder.build();
        assert_eq!(validate(&graph, "start"), Err(CohesionError::NoEnding));
    }

    #[tokio::test]
    async fn test_missing_path_back_to_start_fails() {
        let mut builder = StoryBuilder::new(&EngineConfig::default());
        builder.add_scene("start", "Beginning.", "", None).await;
        // A scene named "start" exists, but nothing targets it
        builder
            .add_choice("start", "leave", ChoiceTarget::End)
            .await;
        builder
            .add_choice("start", "leave anyway", ChoiceTarget::End)
            .await;
        let graph = builder.build();
        assert_eq!(
            validate(&graph, "start"),
            Err(CohesionError::NoPathToStart("start".to_string()))
        );
    }

    #[tokio::test]
    async fn test_uneven_language_coverage_fails() {
        use crate::story::{Choice, Scene};

        let mut graph = StoryGraph::default();
        let scene = Scene {
            description: "Scene.".to_string(),
            character_name: String::new(),
            image: None,
        };
        let loop_back = Choice {
            label: "again".to_string(),
            target: ChoiceTarget::scene("start"),
        };
        let leave = Choice {
            label: "leave".to_string(),
            target: ChoiceTarget::End,
        };

        graph.insert_scene("en", "start", scene.clone());
        graph.insert_scene("en", "extra", scene.clone());
        graph.insert_scene("pt", "start", scene);
        for lang in ["en", "pt"] {
            graph.push_choice(lang, "start", loop_back.clone());
            graph.push_choice(lang, "start", leave.clone());
        }

        assert_eq!(
            validate(&graph, "start"),
            Err(CohesionError::UnevenCoverage {
                language: "pt".to_string(),
                scene: "extra".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_one_bad_scene_in_any_language_fails_everything() {
        use crate::story::Choice;

        let mut graph = sample_story().await;
        // The English graph is fine; a single under-branched scene added to a
        // second language fails the combined scan.
        graph.insert_scene(
            "pt",
            "start",
            crate::story::Scene {
                description: "Cena.".to_string(),
                character_name: String::new(),
                image: None,
            },
        );
        graph.push_choice(
            "pt",
            "start",
            Choice {
                label: "sair".to_string(),
                target: ChoiceTarget::End,
            },
        );

        assert!(validate(&graph, "start").is_err());
    }
}
