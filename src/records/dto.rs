use std::fmt;

use time::{macros::format_description, PrimitiveDateTime};

use crate::records::bmi::{derive_bmi, Bmi};
use crate::records::repo_types::HealthRecord;

/// Placeholder shown for an absent memo.
pub const NO_MEMO: &str = "-";

/// A stored record plus its BMI, recomputed on every read.
#[derive(Debug, Clone)]
pub struct RecordView {
    pub record: HealthRecord,
    pub bmi: Bmi,
}

impl From<HealthRecord> for RecordView {
    fn from(record: HealthRecord) -> Self {
        let bmi = derive_bmi(f64::from(record.height), f64::from(record.weight));
        Self { record, bmi }
    }
}

impl RecordView {
    pub fn memo_text(&self) -> &str {
        self.record.memo.as_deref().unwrap_or(NO_MEMO)
    }

    /// One-line summary used by the update prompt.
    pub fn current_values(&self) -> String {
        format!(
            "Current values - Height: {}cm, Weight: {}kg, Memo: {}, BMI: {}, Category: {}",
            self.record.height,
            self.record.weight,
            self.memo_text(),
            self.bmi,
            self.bmi.category,
        )
    }
}

/// Listing line.
impl fmt::Display for RecordView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] Height: {}cm | Weight: {}kg | Memo: {} | Created: {} | BMI: {} | Category: {}",
            self.record.id,
            self.record.height,
            self.record.weight,
            self.memo_text(),
            format_timestamp(self.record.created_at),
            self.bmi,
            self.bmi.category,
        )
    }
}

pub fn format_timestamp(ts: PrimitiveDateTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    ts.format(format).unwrap_or_else(|_| ts.to_string())
}
