use chrono::NaiveDate;
use mls_model::AssetClass;

/// Per-batch classification settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifyOptions {
    /// As-of date stamped on every record.
    pub snapshot_date: NaiveDate,
    /// Bypass inference and bind this class to the dataset.
    pub asset_class: Option<AssetClass>,
    /// Overrides the table name in outcomes and logs.
    pub dataset_label: Option<String>,
    /// Worker threads for [`RecordClassifier::classify`](crate::RecordClassifier::classify).
    pub workers: usize,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }
}

impl ClassifyOptions {
    pub fn new(snapshot_date: NaiveDate) -> Self {
        Self {
            snapshot_date,
            asset_class: None,
            dataset_label: None,
            workers: 1,
        }
    }

    pub fn with_asset_class(mut self, asset_class: AssetClass) -> Self {
        self.asset_class = Some(asset_class);
        self
    }

    pub fn with_dataset_label(mut self, label: impl Into<String>) -> Self {
        self.dataset_label = Some(label.into());
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }
}
