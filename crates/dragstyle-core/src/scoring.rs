//! Rule-based layout scoring.
//!
//! Rules run in a fixed order and add up without a cap, so a perfect layout
//! totals 120 even though the game displays scores out of [`DISPLAY_MAX`].

use crate::element::{CanvasElement, ElementKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Denominator used when a score is shown to the player.
pub const DISPLAY_MAX: u32 = 100;

const HEADER_TOP_LIMIT: f64 = 100.0;
const FOOTER_BOTTOM_LIMIT: f64 = 400.0;
const POINTS_PER_PARAGRAPH: u32 = 10;
const PARAGRAPH_CAP: u32 = 30;
const VARIETY_THRESHOLD: usize = 5;
const CUSTOMIZED_THRESHOLD: usize = 3;

/// How a feedback line should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackLevel {
    Pass,
    Warning,
    Missing,
}

impl FeedbackLevel {
    pub fn icon(self) -> &'static str {
        match self {
            FeedbackLevel::Pass => "✅",
            FeedbackLevel::Warning => "⚠️",
            FeedbackLevel::Missing => "❌",
        }
    }
}

/// One line of scoring feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub level: FeedbackLevel,
    pub message: String,
}

impl Feedback {
    fn new(level: FeedbackLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level.icon(), self.message)
    }
}

/// Result of scoring a layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub total: u32,
    pub feedback: Vec<Feedback>,
}

impl ScoreReport {
    /// Feedback rendered as display strings, in rule order.
    pub fn feedback_lines(&self) -> Vec<String> {
        self.feedback.iter().map(ToString::to_string).collect()
    }

    pub fn grade(&self) -> Grade {
        Grade::from_total(self.total)
    }
}

/// Coarse verdict shown next to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    Excellent,
    Great,
    Good,
    KeepTrying,
}

impl Grade {
    pub fn from_total(total: u32) -> Self {
        match total {
            90.. => Grade::Excellent,
            70..=89 => Grade::Great,
            50..=69 => Grade::Good,
            _ => Grade::KeepTrying,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Grade::Excellent => "🌟 Excellent!",
            Grade::Great => "👍 Great!",
            Grade::Good => "😊 Good!",
            Grade::KeepTrying => "💪 Keep trying!",
        })
    }
}

/// The elements each rule looks at. The first element of a kind is the one judged.
#[derive(Default)]
struct Tally<'a> {
    header: Option<&'a CanvasElement>,
    nav: Option<&'a CanvasElement>,
    h1: Option<&'a CanvasElement>,
    footer: Option<&'a CanvasElement>,
    paragraphs: u32,
    customized: usize,
}

impl<'a> Tally<'a> {
    fn collect(elements: &'a [CanvasElement]) -> Self {
        let mut tally = Tally::default();
        for element in elements {
            if element.has_content() {
                tally.customized += 1;
            }
            match element.kind {
                ElementKind::Header => {
                    tally.header.get_or_insert(element);
                }
                ElementKind::Nav => {
                    tally.nav.get_or_insert(element);
                }
                ElementKind::H1 => {
                    tally.h1.get_or_insert(element);
                }
                ElementKind::Paragraph => tally.paragraphs += 1,
                ElementKind::Footer => {
                    tally.footer.get_or_insert(element);
                }
                ElementKind::H2
                | ElementKind::H3
                | ElementKind::Button
                | ElementKind::Link
                | ElementKind::Image
                | ElementKind::Section
                | ElementKind::Container => {}
            }
        }
        tally
    }
}

/// Score a layout. Pure: equal inputs always produce equal reports.
#[must_use]
pub fn score(elements: &[CanvasElement]) -> ScoreReport {
    use FeedbackLevel::{Missing, Pass, Warning};

    let tally = Tally::collect(elements);
    let mut total = 0;
    let mut feedback = Vec::with_capacity(7);

    match tally.header {
        Some(header) if header.position.y < HEADER_TOP_LIMIT => {
            total += 20;
            feedback.push(Feedback::new(Pass, "Header at top (+20 points)"));
        }
        Some(_) => feedback.push(Feedback::new(Warning, "Header should be at the top")),
        None => feedback.push(Feedback::new(Missing, "Missing header element")),
    }

    if tally.nav.is_some() {
        total += 15;
        feedback.push(Feedback::new(Pass, "Navigation included (+15 points)"));
    } else {
        feedback.push(Feedback::new(Missing, "Missing navigation"));
    }

    match tally.h1 {
        Some(h1) if h1.has_content() => {
            total += 15;
            feedback.push(Feedback::new(Pass, "Main heading with content (+15 points)"));
        }
        Some(_) => {
            total += 5;
            feedback.push(Feedback::new(Warning, "Main heading needs content (+5 points)"));
        }
        None => feedback.push(Feedback::new(Missing, "Missing main heading (h1)")),
    }

    if tally.paragraphs > 0 {
        let points = (tally.paragraphs * POINTS_PER_PARAGRAPH).min(PARAGRAPH_CAP);
        total += points;
        feedback.push(Feedback::new(Pass, format!("Content paragraphs (+{points} points)")));
    } else {
        feedback.push(Feedback::new(Missing, "Missing content paragraphs"));
    }

    match tally.footer {
        Some(footer) if footer.position.y > FOOTER_BOTTOM_LIMIT => {
            total += 20;
            feedback.push(Feedback::new(Pass, "Footer at bottom (+20 points)"));
        }
        Some(_) => {
            total += 10;
            feedback.push(Feedback::new(
                Warning,
                "Footer should be at the bottom (+10 points)",
            ));
        }
        None => feedback.push(Feedback::new(Missing, "Missing footer")),
    }

    if elements.len() >= VARIETY_THRESHOLD {
        total += 10;
        feedback.push(Feedback::new(Pass, "Good content variety (+10 points)"));
    }

    if tally.customized >= CUSTOMIZED_THRESHOLD {
        total += 10;
        feedback.push(Feedback::new(Pass, "Customized content (+10 points)"));
    }

    ScoreReport { total, feedback }
}
