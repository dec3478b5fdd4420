use crate::classify_app::main::ClassifyApp;
use crate::classify_app::preview::Preview;
use crate::config::Config;
use crate::display::impl_fake::{DisplayFake, DisplayFakeHandle};
use crate::history::store::HistoryStore;
use crate::image_classifier::interface::{ClassifyError, ImageClassifier, ImageFile};
use crate::image_classifier::response::{ClassificationResult, Prediction};
use crate::library::logger::impl_fake::LoggerFake;
use crate::storage::impl_memory::StorageMemory;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn preview(name: &str) -> Preview {
    Preview {
        path: PathBuf::from(name),
        file: ImageFile {
            name: name.to_string(),
            mime: "image/png".to_string(),
            bytes: Arc::from(vec![1u8, 2, 3]),
        },
        dimensions: Some((4, 4)),
        thumbnail: None,
    }
}

pub fn result(class: &str, confidence: f64) -> ClassificationResult {
    ClassificationResult {
        prediction: Prediction {
            class: class.to_string(),
            confidence: Some(confidence),
            confidence_percentage: None,
        },
        all_predictions: vec![(class.to_string(), confidence)],
        recommendations: None,
    }
}

#[derive(Debug, Clone)]
pub enum StubOutcome {
    Success(ClassificationResult),
    ServerError { status: u16, body: String },
}

/// Answers every request with the same outcome and counts the calls.
pub struct ImageClassifierStub {
    outcome: StubOutcome,
    pub calls: AtomicUsize,
    pub last_base_url: Mutex<Option<String>>,
}

impl ImageClassifierStub {
    pub fn new(outcome: StubOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_base_url: Mutex::new(None),
        }
    }
}

impl ImageClassifier for ImageClassifierStub {
    fn classify(
        &self,
        base_url: &str,
        _image: &ImageFile,
    ) -> Result<ClassificationResult, ClassifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_base_url.lock().unwrap() = Some(base_url.to_string());
        match &self.outcome {
            StubOutcome::Success(result) => Ok(result.clone()),
            StubOutcome::ServerError { status, body } => Err(ClassifyError::Server {
                status: *status,
                body: body.clone(),
            }),
        }
    }

    fn check_connection(&self, _base_url: &str) -> Result<(), ClassifyError> {
        Ok(())
    }
}

pub struct Fixture {
    pub config: Config,
    pub logger: LoggerFake,
    pub storage: Arc<StorageMemory>,
    pub history: Arc<Mutex<HistoryStore>>,
    pub image_classifier: Arc<ImageClassifierStub>,
    pub display: DisplayFakeHandle,
    pub app: ClassifyApp,
    pub image_path: PathBuf,
    _dir: tempfile::TempDir,
}

impl Fixture {
    pub fn new(outcome: StubOutcome) -> Self {
        Self::with_storage(outcome, StorageMemory::new())
    }

    pub fn with_storage(outcome: StubOutcome, storage: StorageMemory) -> Self {
        let config = Config {
            api_base_url: "http://classifier.test/".to_string(),
            ..Config::default()
        };
        let logger = LoggerFake::new();
        let storage = Arc::new(storage);
        let mut history = HistoryStore::new(
            storage.clone(),
            config.history_key.clone(),
            config.history_capacity,
            Arc::new(logger.clone()),
        );
        history.load();
        let history = Arc::new(Mutex::new(history));
        let image_classifier = Arc::new(ImageClassifierStub::new(outcome));
        let display = DisplayFake::new();
        let handle = display.handle();
        let app = ClassifyApp::new(
            config.clone(),
            Arc::new(logger.clone()),
            image_classifier.clone(),
            history.clone(),
            Arc::new(Mutex::new(display)),
        );

        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("bottle.png");
        image::RgbaImage::from_pixel(8, 8, image::Rgba([0, 120, 255, 255]))
            .save(&image_path)
            .unwrap();

        Self {
            config,
            logger,
            storage,
            history,
            image_classifier,
            display: handle,
            app,
            image_path,
            _dir: dir,
        }
    }
}
