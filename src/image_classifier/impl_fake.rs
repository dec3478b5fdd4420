use crate::image_classifier::interface::{ClassifyError, ImageClassifier, ImageFile};
use crate::image_classifier::response::{ClassificationResult, Prediction};
use crate::library::logger::interface::Logger;
use crate::result_view::KNOWN_CLASSES;
use rand::distr::{Distribution, Uniform};
use std::sync::Arc;

/// Offline stand-in for the classification service.
pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
        }
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(
        &self,
        _base_url: &str,
        image: &ImageFile,
    ) -> Result<ClassificationResult, ClassifyError> {
        let _ = self
            .logger
            .info(&format!("Classifying {} with fake classifier...", image.name));

        let mut rng = rand::rng();
        let weight_dist = Uniform::new(0.0f64, 1.0)
            .map_err(|e| ClassifyError::InvalidRequest(e.to_string()))?;

        let weights: Vec<f64> = KNOWN_CLASSES
            .iter()
            .map(|_| weight_dist.sample(&mut rng).powi(3))
            .collect();
        let total: f64 = weights.iter().sum::<f64>().max(f64::EPSILON);

        let all_predictions: Vec<(String, f64)> = KNOWN_CLASSES
            .iter()
            .zip(weights)
            .map(|(class, weight)| (class.to_string(), weight / total))
            .collect();

        let (class, confidence) = all_predictions
            .iter()
            .fold(("", 0.0f64), |best, (class, confidence)| {
                if *confidence > best.1 {
                    (class.as_str(), *confidence)
                } else {
                    best
                }
            });
        let class = class.to_string();

        Ok(ClassificationResult {
            prediction: Prediction {
                class,
                confidence: Some(confidence),
                confidence_percentage: None,
            },
            all_predictions,
            recommendations: None,
        })
    }

    fn check_connection(&self, base_url: &str) -> Result<(), ClassifyError> {
        let _ = self
            .logger
            .info(&format!("Pretending {} is reachable", base_url));
        Ok(())
    }
}
