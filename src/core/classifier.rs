//! Sentence classification into temporal classes.
//!
//! Classification runs before any date work. The rules, in order:
//! future auxiliaries or modal constructions make a forecast; an
//! intention or goal verb as the main predicate makes a forecast; the
//! main-clause verb's tense decides past versus current; a sentence with
//! no event predicate is a non-event. Mixed cues without a decisive main
//! verb default to non_event and are surfaced as a recovered ambiguity,
//! never a failure.
//!
//! Present tense reads as current_event whether or not an explicit
//! "today"/"now" marker is present: narrative present ("the trial
//! begins") describes something happening at the narrated moment, and
//! demanding the marker would silently drop those events.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use tracing::warn;

use crate::domain::{
    ClassifiedSentence, Condition, RawSentence, TemporalClass, Tense, TokenAnnotation, TokenKind,
};

/// Capability interface for sentence classification.
///
/// The concrete tagging model behind the annotations is injected
/// elsewhere; implementations here only interpret the annotations.
pub trait Classifier: Send + Sync {
    /// Classify one sentence given its linguistic annotations.
    ///
    /// Returns the class and, when the decision fell back to the
    /// conservative default, the surfaced ambiguity condition.
    fn classify(
        &self,
        sentence: &RawSentence,
        annotations: &[TokenAnnotation],
    ) -> (TemporalClass, Option<Condition>);
}

/// Stative verbs do not describe an occurrence and never carry an event
static STATIVE_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["be", "get", "see", "locate", "include", "note", "have", "base", "mean"]
        .into_iter()
        .collect()
});

/// Verbs of intention or goal; forward-looking even in past tense
/// ("a follow-up was scheduled")
static INTENTION_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "predict", "indicate", "forecast", "target", "plan", "aim", "intend", "expect", "hope",
        "propose", "commit", "promise", "signal", "project", "schedule", "decide", "consider",
        "believe",
    ]
    .into_iter()
    .collect()
});

/// Rule-based classifier over tagger annotations
pub struct RuleClassifier;

impl RuleClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RuleClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for RuleClassifier {
    fn classify(
        &self,
        sentence: &RawSentence,
        annotations: &[TokenAnnotation],
    ) -> (TemporalClass, Option<Condition>) {
        let event_verbs: Vec<&TokenAnnotation> = annotations
            .iter()
            .filter(|t| {
                matches!(t.kind, TokenKind::Verb { .. })
                    && !STATIVE_VERBS.contains(t.lemma.as_str())
            })
            .collect();

        // No verb of occurrence: pure description
        if event_verbs.is_empty() {
            return (TemporalClass::NonEvent, None);
        }

        // Future auxiliaries or modal constructions win outright
        let forward_aux = annotations.iter().any(|t| {
            matches!(
                t.kind,
                TokenKind::Aux { future: true, .. } | TokenKind::Aux { modal: true, .. }
            )
        });
        if forward_aux {
            return (TemporalClass::FutureForecast, None);
        }

        let main_verb = event_verbs.iter().find(|t| t.is_main).copied();

        if let Some(main) = main_verb {
            if INTENTION_VERBS.contains(main.lemma.as_str()) {
                return (TemporalClass::FutureForecast, None);
            }

            let tense = match main.kind {
                TokenKind::Verb { tense } => tense,
                _ => unreachable!("event_verbs only holds Verb tokens"),
            };

            return (class_for_tense(tense), None);
        }

        // Event verbs exist but none is the main predicate: fall back to
        // their shared tense, or concede ambiguity on a tie.
        let tenses: HashSet<Tense> = event_verbs
            .iter()
            .map(|t| match t.kind {
                TokenKind::Verb { tense } => tense,
                _ => unreachable!("event_verbs only holds Verb tokens"),
            })
            .collect();

        if tenses.len() == 1 {
            let tense = *tenses.iter().next().expect("non-empty tense set");
            return (class_for_tense(tense), None);
        }

        warn!(
            index = sentence.index,
            "mixed tense cues without a main verb, defaulting to non_event"
        );
        (
            TemporalClass::NonEvent,
            Some(Condition::ClassificationAmbiguous),
        )
    }
}

fn class_for_tense(tense: Tense) -> TemporalClass {
    match tense {
        Tense::Past => TemporalClass::PastEvent,
        Tense::Future => TemporalClass::FutureForecast,
        // An explicit "today"/"now" marker and plain narrative present
        // both read as current
        Tense::Present => TemporalClass::CurrentEvent,
    }
}

/// Classify every sentence of a segmented document.
///
/// Returns the classified sentences in order plus any surfaced
/// ambiguity conditions paired with their sentence indices.
pub fn classify_all(
    classifier: &dyn Classifier,
    tagger: &dyn crate::adapters::LinguisticTagger,
    sentences: &[RawSentence],
) -> (Vec<ClassifiedSentence>, Vec<(usize, Condition)>) {
    let mut classified = Vec::with_capacity(sentences.len());
    let mut conditions = Vec::new();

    for sentence in sentences {
        let annotations = tagger.annotate(sentence);
        let (class, condition) = classifier.classify(sentence, &annotations);

        if let Some(c) = condition {
            conditions.push((sentence.index, c));
        }

        classified.push(ClassifiedSentence::new(sentence.clone(), class));
    }

    (classified, conditions)
}

/// Render a passage with `<EVENT>` markers around event and forecast
/// sentences, one sentence per line. Non-events pass through unmarked.
pub fn tag_passage(sentences: &[ClassifiedSentence]) -> String {
    let mut out = String::new();
    for cs in sentences {
        if cs.class.is_event() {
            out.push_str("<EVENT> ");
            out.push_str(&cs.sentence.text);
            out.push_str(" </EVENT>");
        } else {
            out.push_str(&cs.sentence.text);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::LexiconTagger;
    use crate::adapters::LinguisticTagger;

    fn classify(text: &str) -> (TemporalClass, Option<Condition>) {
        let sentence = RawSentence::new(0, text);
        let annotations = LexiconTagger::new().annotate(&sentence);
        RuleClassifier::new().classify(&sentence, &annotations)
    }

    #[test]
    fn test_past_event() {
        let (class, cond) = classify("The meeting was held on March 10, 2024.");
        assert_eq!(class, TemporalClass::PastEvent);
        assert!(cond.is_none());
    }

    #[test]
    fn test_future_modal_is_forecast() {
        let (class, _) = classify("The committee will meet next month.");
        assert_eq!(class, TemporalClass::FutureForecast);
    }

    #[test]
    fn test_intention_verb_is_forecast() {
        // Past tense, but "schedule" is an intention verb
        let (class, _) = classify("A follow-up was scheduled a week later.");
        assert_eq!(class, TemporalClass::FutureForecast);
    }

    #[test]
    fn test_pure_description_is_non_event() {
        let (class, cond) = classify("The bank is on 5th Avenue.");
        assert_eq!(class, TemporalClass::NonEvent);
        assert!(cond.is_none());
    }

    #[test]
    fn test_no_verb_is_non_event() {
        let (class, _) = classify("A quick and influential robbery.");
        assert_eq!(class, TemporalClass::NonEvent);
    }

    #[test]
    fn test_present_with_marker_is_current() {
        let (class, _) = classify("The trial begins today.");
        assert_eq!(class, TemporalClass::CurrentEvent);
    }

    #[test]
    fn test_plain_narrative_present_is_current() {
        let (class, _) = classify("The ceremony starts at noon.");
        assert_eq!(class, TemporalClass::CurrentEvent);
    }

    #[test]
    fn test_mixed_tense_without_main_verb_is_ambiguous() {
        // Two event verbs in different tenses, neither marked as the
        // main predicate: conservative default with a surfaced condition
        let sentence = RawSentence::new(0, "Launched while launching.");
        let annotations = vec![
            TokenAnnotation::new("Launched", "launch", TokenKind::Verb { tense: Tense::Past }),
            TokenAnnotation::new("while", "while", TokenKind::Other),
            TokenAnnotation::new(
                "launching",
                "launch",
                TokenKind::Verb { tense: Tense::Present },
            ),
        ];

        let (class, cond) = RuleClassifier::new().classify(&sentence, &annotations);
        assert_eq!(class, TemporalClass::NonEvent);
        assert_eq!(cond, Some(Condition::ClassificationAmbiguous));
    }

    #[test]
    fn test_classify_all_surfaces_ambiguity_with_index() {
        struct MixedTenseTagger;

        impl LinguisticTagger for MixedTenseTagger {
            fn name(&self) -> &str {
                "mixed"
            }

            fn annotate(&self, _sentence: &RawSentence) -> Vec<TokenAnnotation> {
                vec![
                    TokenAnnotation::new("arrived", "arrive", TokenKind::Verb { tense: Tense::Past }),
                    TokenAnnotation::new(
                        "departing",
                        "depart",
                        TokenKind::Verb { tense: Tense::Present },
                    ),
                ]
            }
        }

        let sentences = vec![RawSentence::new(0, "Arrived while departing.")];
        let (classified, conditions) =
            classify_all(&RuleClassifier::new(), &MixedTenseTagger, &sentences);

        assert_eq!(classified[0].class, TemporalClass::NonEvent);
        assert_eq!(conditions, vec![(0, Condition::ClassificationAmbiguous)]);
    }

    #[test]
    fn test_tag_passage() {
        let sentences = vec![
            ClassifiedSentence::new(
                RawSentence::new(0, "The meeting was held."),
                TemporalClass::PastEvent,
            ),
            ClassifiedSentence::new(
                RawSentence::new(1, "The room was large."),
                TemporalClass::NonEvent,
            ),
        ];

        let tagged = tag_passage(&sentences);
        assert_eq!(
            tagged,
            "<EVENT> The meeting was held. </EVENT>\nThe room was large.\n"
        );
    }
}
