use crate::image_classifier::response::ClassificationResult;
use std::cmp::Ordering;

pub const KNOWN_CLASSES: [&str; 7] = [
    "plastic",
    "metal",
    "paper",
    "glass",
    "cardboard",
    "trash",
    "compost",
];

pub const DEFAULT_RECOMMENDATIONS: [&str; 3] = [
    "Rinse the item before recycling",
    "Check local recycling guidelines",
    "Remove any non-recyclable components",
];

pub const NO_DETAILED_PREDICTIONS: &str = "No detailed predictions available";

pub const CONFIDENCE_PLACEHOLDER: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassIcon {
    Bottle,
    Utensils,
    Note,
    Glass,
    Archive,
    Trash,
    Leaf,
    Unknown,
}

impl ClassIcon {
    pub fn for_class(class: &str) -> Self {
        match class.to_lowercase().as_str() {
            "plastic" => ClassIcon::Bottle,
            "metal" => ClassIcon::Utensils,
            "paper" => ClassIcon::Note,
            "glass" => ClassIcon::Glass,
            "cardboard" => ClassIcon::Archive,
            "trash" => ClassIcon::Trash,
            "compost" => ClassIcon::Leaf,
            _ => ClassIcon::Unknown,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            ClassIcon::Bottle => "🍾",
            ClassIcon::Utensils => "🍴",
            ClassIcon::Note => "📝",
            ClassIcon::Glass => "🍸",
            ClassIcon::Archive => "📦",
            ClassIcon::Trash => "🗑",
            ClassIcon::Leaf => "🍃",
            ClassIcon::Unknown => "❓",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRow {
    pub class: String,
    pub icon: ClassIcon,
    pub confidence: f64,
    pub percentage: String,
    pub highest: bool,
}

/// What the results panel shows for one successful classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub label: String,
    pub icon: ClassIcon,
    /// Percentage without the `%` sign, or [`CONFIDENCE_PLACEHOLDER`].
    pub confidence_text: String,
    /// Fill ratio for a confidence bar, when the raw confidence is known.
    pub confidence_fraction: Option<f64>,
    /// Highest confidence first; equal confidences keep the server's order.
    pub predictions: Vec<PredictionRow>,
    pub recommendations: Vec<String>,
}

impl ResultView {
    pub fn from_result(result: &ClassificationResult) -> Self {
        let prediction = &result.prediction;

        let confidence_text = match (&prediction.confidence_percentage, prediction.confidence) {
            (Some(provided), _) => provided.to_string(),
            (None, Some(confidence)) => format_percentage(confidence),
            (None, None) => CONFIDENCE_PLACEHOLDER.to_string(),
        };

        let mut sorted = result.all_predictions.clone();
        sorted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        let predictions = sorted
            .into_iter()
            .enumerate()
            .map(|(index, (class, confidence))| PredictionRow {
                icon: ClassIcon::for_class(&class),
                percentage: format_percentage(confidence),
                highest: index == 0,
                class,
                confidence,
            })
            .collect();

        let recommendations = match &result.recommendations {
            Some(supplied) if !supplied.is_empty() => supplied.clone(),
            _ => DEFAULT_RECOMMENDATIONS
                .iter()
                .map(|r| r.to_string())
                .collect(),
        };

        Self {
            label: prediction.class.to_uppercase(),
            icon: ClassIcon::for_class(&prediction.class),
            confidence_text,
            confidence_fraction: prediction.confidence.map(|c| c.clamp(0.0, 1.0)),
            predictions,
            recommendations,
        }
    }

    pub fn confidence_label(&self) -> String {
        if self.confidence_text == CONFIDENCE_PLACEHOLDER {
            self.confidence_text.clone()
        } else {
            format!("{}%", self.confidence_text)
        }
    }

    pub fn has_detailed_predictions(&self) -> bool {
        !self.predictions.is_empty()
    }
}

/// `0.9` becomes `"90.0"`.
pub fn format_percentage(confidence: f64) -> String {
    format!("{:.1}", confidence * 100.0)
}
