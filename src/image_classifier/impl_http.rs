use crate::image_classifier::interface::{endpoint, ClassifyError, ImageClassifier, ImageFile};
use crate::image_classifier::response::ClassificationResult;
use crate::library::logger::interface::Logger;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::sync::Arc;

/// Talks to the remote classification service. One request per call, no retries.
pub struct ImageClassifierHttp {
    client: Client,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierHttp {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Result<Self, ClassifyError> {
        let client = Client::builder()
            .user_agent(concat!("waste-classifier/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClassifyError::InvalidRequest(e.to_string()))?;

        Ok(Self {
            client,
            logger: logger.with_namespace("image_classifier").with_namespace("http"),
        })
    }
}

impl ImageClassifier for ImageClassifierHttp {
    fn classify(
        &self,
        base_url: &str,
        image: &ImageFile,
    ) -> Result<ClassificationResult, ClassifyError> {
        let url = endpoint(base_url, "classify");
        let _ = self.logger.info(&format!(
            "POST {} ({}, {} bytes)",
            url,
            image.name,
            image.bytes.len()
        ));

        let part = Part::bytes(image.bytes.to_vec())
            .file_name(image.name.clone())
            .mime_str(&image.mime)
            .map_err(|e| ClassifyError::InvalidRequest(e.to_string()))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| ClassifyError::Connection {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().map_err(|e| ClassifyError::Connection {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        if !status.is_success() {
            let _ = self
                .logger
                .warn(&format!("{} answered {}: {}", url, status.as_u16(), body));
            return Err(ClassifyError::Server {
                status: status.as_u16(),
                body,
            });
        }

        ClassificationResult::parse(&body)
    }

    fn check_connection(&self, base_url: &str) -> Result<(), ClassifyError> {
        let url = endpoint(base_url, "");
        let _ = self.logger.info(&format!("GET {}", url));

        let response = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .map_err(|e| ClassifyError::Connection {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ClassifyError::Status {
                status: response.status().as_u16(),
            })
        }
    }
}
