use crate::classify_app::preview::{Preview, PreviewError};
use crate::config::Config;
use crate::display::interface::InputEvent;
use crate::history::record::ClassificationRecord;
use crate::history::statistics::{compute_snapshot, StatisticsSnapshot};
use crate::image_classifier::interface::{ClassifyError, ImageFile};
use crate::image_classifier::response::ClassificationResult;
use chrono::Utc;
use std::path::PathBuf;

pub const BUSY_NOTICE: &str = "A classification is already in progress";

/// One classification attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Attempt {
    Idle,
    Previewing {
        path: PathBuf,
    },
    Submitting {
        preview: Preview,
        base_url: String,
    },
    Succeeded {
        preview: Preview,
        result: ClassificationResult,
    },
    /// The chosen file could not be read; nothing was sent.
    Unreadable {
        path: PathBuf,
        message: String,
    },
    Failed {
        preview: Preview,
        base_url: String,
        message: String,
    },
}

impl Attempt {
    pub fn is_busy(&self) -> bool {
        matches!(self, Attempt::Previewing { .. } | Attempt::Submitting { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionStatus {
    Unknown,
    Testing { url: String },
    Connected { url: String },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub attempt: Attempt,
    pub api_base_url: String,
    /// Last statistics shown; an empty history never clears it.
    pub statistics: Option<StatisticsSnapshot>,
    /// Most recent successful result; stays on screen after the image is cleared.
    pub last_result: Option<ClassificationResult>,
    pub connection: ConnectionStatus,
    pub notice: Option<String>,
}

#[derive(Debug)]
pub enum Event {
    Input(InputEvent),
    HistoryLoaded(Vec<ClassificationRecord>),
    PreviewDone(Result<Preview, PreviewError>),
    ClassifyDone(Result<ClassificationResult, ClassifyError>),
    HistoryRecorded(Vec<ClassificationRecord>),
    ProbeDone {
        url: String,
        result: Result<(), ClassifyError>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SubscribeToInput,
    LoadHistory,
    ReadPreview { path: PathBuf },
    Classify { base_url: String, image: ImageFile },
    RecordHistory { record: ClassificationRecord },
    Celebrate { confidence: f64 },
    ProbeConnection { base_url: String },
}

pub fn init(config: &Config) -> (Model, Vec<Effect>) {
    (
        Model {
            attempt: Attempt::Idle,
            api_base_url: config.api_base_url.clone(),
            statistics: None,
            last_result: None,
            connection: ConnectionStatus::Unknown,
            notice: None,
        },
        vec![Effect::SubscribeToInput, Effect::LoadHistory],
    )
}

pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

pub fn transition(config: &Config, model: Model, event: Event) -> (Model, Vec<Effect>) {
    match (model.attempt.clone(), event) {
        // Single flight: nothing new starts while an attempt is running.
        (attempt, Event::Input(InputEvent::FileChosen(_)))
        | (attempt, Event::Input(InputEvent::ClearImage))
            if attempt.is_busy() =>
        {
            (
                Model {
                    notice: Some(BUSY_NOTICE.to_string()),
                    ..model
                },
                vec![],
            )
        }
        (_, Event::Input(InputEvent::FileChosen(path))) => (
            Model {
                attempt: Attempt::Previewing { path: path.clone() },
                notice: None,
                ..model
            },
            vec![Effect::ReadPreview { path }],
        ),
        (_, Event::Input(InputEvent::ClearImage)) => (
            Model {
                attempt: Attempt::Idle,
                notice: None,
                ..model
            },
            vec![],
        ),

        (Attempt::Previewing { .. }, Event::PreviewDone(Ok(preview))) => {
            let base_url = normalize_base_url(&model.api_base_url);
            let image = preview.file.clone();
            (
                Model {
                    attempt: Attempt::Submitting {
                        preview,
                        base_url: base_url.clone(),
                    },
                    ..model
                },
                vec![Effect::Classify { base_url, image }],
            )
        }
        (Attempt::Previewing { path }, Event::PreviewDone(Err(error))) => (
            Model {
                attempt: Attempt::Unreadable {
                    path,
                    message: error.to_string(),
                },
                ..model
            },
            vec![],
        ),

        (Attempt::Submitting { preview, .. }, Event::ClassifyDone(Ok(result))) => {
            let record = ClassificationRecord::new(
                result.prediction.class.clone(),
                result.top_confidence(),
                Utc::now(),
            );
            (
                Model {
                    attempt: Attempt::Succeeded {
                        preview,
                        result: result.clone(),
                    },
                    last_result: Some(result),
                    notice: None,
                    ..model
                },
                vec![Effect::RecordHistory { record }],
            )
        }
        (Attempt::Submitting { preview, base_url }, Event::ClassifyDone(Err(error))) => (
            Model {
                attempt: Attempt::Failed {
                    preview,
                    base_url,
                    message: error.to_string(),
                },
                last_result: None,
                notice: None,
                ..model
            },
            vec![],
        ),

        (attempt, Event::HistoryRecorded(records)) => {
            let statistics = compute_snapshot(&records).or(model.statistics.clone());
            let effects = match attempt {
                Attempt::Succeeded { result, .. }
                    if result.top_confidence() > config.celebrate_min_confidence =>
                {
                    vec![Effect::Celebrate {
                        confidence: result.top_confidence(),
                    }]
                }
                _ => vec![],
            };
            (Model { statistics, ..model }, effects)
        }
        (_, Event::HistoryLoaded(records)) => {
            let statistics = compute_snapshot(&records).or(model.statistics.clone());
            (Model { statistics, ..model }, vec![])
        }

        (_, Event::Input(InputEvent::ApiUrlChanged(url))) => (
            Model {
                api_base_url: url,
                ..model
            },
            vec![],
        ),
        (_, Event::Input(InputEvent::TestConnection)) => {
            let base_url = normalize_base_url(&model.api_base_url);
            (
                Model {
                    connection: ConnectionStatus::Testing {
                        url: base_url.clone(),
                    },
                    ..model
                },
                vec![Effect::ProbeConnection { base_url }],
            )
        }
        (_, Event::ProbeDone { url, result }) => {
            let connection = match result {
                Ok(()) => ConnectionStatus::Connected { url },
                Err(error) => ConnectionStatus::Failed {
                    message: format!(
                        "Connection failed: {}. Make sure your backend is running at {}",
                        error, url
                    ),
                },
            };
            (Model { connection, ..model }, vec![])
        }

        // Quit is handled by the event loop; stale completions are dropped.
        _ => (model, vec![]),
    }
}
