use crate::image_classifier::interface::ClassifyError;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

/// Pre-computed percentage sent by the server, either as a number or text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ConfidencePercentage {
    Number(f64),
    Text(String),
}

impl fmt::Display for ConfidencePercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidencePercentage::Number(n) => write!(f, "{}", n),
            ConfidencePercentage::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WirePrediction {
    pub class: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub confidence_percentage: Option<ConfidencePercentage>,
}

/// The two shapes the classification endpoint has answered with over time.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ClassificationResponse {
    Current {
        prediction: WirePrediction,
        #[serde(default)]
        all_predictions: Option<Map<String, Value>>,
        #[serde(default)]
        recommendations: Option<Vec<String>>,
    },
    /// Older servers returned the prediction fields at the top level.
    Legacy {
        class: String,
        #[serde(default)]
        confidence: Option<f64>,
        #[serde(default)]
        confidence_percentage: Option<ConfidencePercentage>,
        #[serde(default)]
        all_predictions: Option<Map<String, Value>>,
        #[serde(default)]
        recommendations: Option<Vec<String>>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub class: String,
    pub confidence: Option<f64>,
    pub confidence_percentage: Option<ConfidencePercentage>,
}

/// Normalized outcome of one classification, whatever shape the server used.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub prediction: Prediction,
    /// In the order the server listed them.
    pub all_predictions: Vec<(String, f64)>,
    pub recommendations: Option<Vec<String>>,
}

impl ClassificationResult {
    pub fn parse(body: &str) -> Result<Self, ClassifyError> {
        let response: ClassificationResponse = serde_json::from_str(body)
            .map_err(|e| ClassifyError::MalformedResponse(e.to_string()))?;
        Ok(response.into())
    }

    /// Confidence of the top prediction, zero when the server left it out.
    pub fn top_confidence(&self) -> f64 {
        self.prediction.confidence.unwrap_or(0.0)
    }
}

impl From<ClassificationResponse> for ClassificationResult {
    fn from(response: ClassificationResponse) -> Self {
        let (prediction, all_predictions, recommendations) = match response {
            ClassificationResponse::Current {
                prediction,
                all_predictions,
                recommendations,
            } => (
                Prediction {
                    class: prediction.class,
                    confidence: prediction.confidence,
                    confidence_percentage: prediction.confidence_percentage,
                },
                all_predictions,
                recommendations,
            ),
            ClassificationResponse::Legacy {
                class,
                confidence,
                confidence_percentage,
                all_predictions,
                recommendations,
            } => (
                Prediction {
                    class,
                    confidence,
                    confidence_percentage,
                },
                all_predictions,
                recommendations,
            ),
        };

        let all_predictions = all_predictions
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(class, value)| value.as_f64().map(|confidence| (class, confidence)))
            .collect();

        Self {
            prediction,
            all_predictions,
            recommendations,
        }
    }
}
