use super::core::{Attempt, ConnectionStatus, Model};
use super::main::ClassifyApp;
use super::preview::Preview;
use crate::history::statistics::StatisticsSnapshot;
use crate::result_view::{format_percentage, ResultView};
use std::error::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum StatusLine {
    None,
    Loading(String),
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultsPanel {
    Empty,
    Processing,
    Result(ResultView),
    Failure { hints: Vec<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsView {
    pub total: String,
    pub average_confidence: String,
    pub most_common_class: String,
}

impl StatisticsView {
    pub fn from_snapshot(snapshot: Option<&StatisticsSnapshot>) -> Self {
        match snapshot {
            Some(snapshot) => Self {
                total: snapshot.total_count.to_string(),
                average_confidence: format!("{}%", format_percentage(snapshot.average_confidence)),
                most_common_class: if snapshot.most_common_class.is_empty() {
                    "-".to_string()
                } else {
                    snapshot.most_common_class.clone()
                },
            },
            None => Self {
                total: "0".to_string(),
                average_confidence: "0.0%".to_string(),
                most_common_class: "-".to_string(),
            },
        }
    }
}

/// Everything a front end needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub api_base_url: String,
    pub connection: StatusLine,
    pub busy: bool,
    pub preview: Option<Preview>,
    pub status: StatusLine,
    pub results: ResultsPanel,
    pub statistics: StatisticsView,
    pub notice: Option<String>,
}

pub fn build_screen(model: &Model) -> Screen {
    let connection = match &model.connection {
        ConnectionStatus::Unknown => StatusLine::None,
        ConnectionStatus::Testing { .. } => StatusLine::Loading("Testing connection...".to_string()),
        ConnectionStatus::Connected { .. } => {
            StatusLine::Success("Connected successfully! Backend is running.".to_string())
        }
        ConnectionStatus::Failed { message } => StatusLine::Error(message.clone()),
    };

    let last_result = || match &model.last_result {
        Some(result) => ResultsPanel::Result(ResultView::from_result(result)),
        None => ResultsPanel::Empty,
    };

    let (preview, status, results) = match &model.attempt {
        Attempt::Idle => (None, StatusLine::None, last_result()),
        Attempt::Previewing { .. } => (
            None,
            StatusLine::Loading("Reading image...".to_string()),
            last_result(),
        ),
        Attempt::Unreadable { message, .. } => (
            None,
            StatusLine::Error(format!("Error: {}", message)),
            last_result(),
        ),
        Attempt::Submitting { preview, .. } => (
            Some(preview.clone()),
            StatusLine::Loading("Classifying image...".to_string()),
            ResultsPanel::Processing,
        ),
        Attempt::Succeeded { preview, result } => (
            Some(preview.clone()),
            StatusLine::Success("Classification completed!".to_string()),
            ResultsPanel::Result(ResultView::from_result(result)),
        ),
        Attempt::Failed {
            preview,
            base_url,
            message,
        } => (
            Some(preview.clone()),
            StatusLine::Error(format!("Error: {}", message)),
            ResultsPanel::Failure {
                hints: vec![
                    format!("Your backend is running at {}", base_url),
                    "The /classify endpoint exists".to_string(),
                    "The endpoint accepts a multipart upload in a `file` field".to_string(),
                ],
            },
        ),
    };

    Screen {
        api_base_url: model.api_base_url.clone(),
        connection,
        busy: model.attempt.is_busy(),
        preview,
        status,
        results,
        statistics: StatisticsView::from_snapshot(model.statistics.as_ref()),
        notice: model.notice.clone(),
    }
}

impl ClassifyApp {
    pub fn render(&self, model: &Model) -> Result<(), Box<dyn Error + Send + Sync>> {
        let screen = build_screen(model);
        let mut display = self
            .display
            .lock()
            .map_err(|_| "display lock poisoned")?;
        display.present(&screen)
    }
}
