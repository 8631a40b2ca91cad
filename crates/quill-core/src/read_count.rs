//! Per-post read counters and their display formatting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The persisted counter for one post.
///
/// `count` is monotonically non-decreasing; the record is created lazily on
/// the first increment for a slug and never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadCount {
  pub slug:       String,
  pub count:      u64,
  pub updated_at: DateTime<Utc>,
}

/// Format a read count for display.
///
/// Values below 1000 render verbatim, values below 10000 as one-decimal
/// thousands ("1.5K"), and everything above as one-decimal ten-thousands
/// with the 万-derived "W" suffix.
pub fn format_read_count(count: u64) -> String {
  if count < 1_000 {
    count.to_string()
  } else if count < 10_000 {
    format!("{:.1}K", count as f64 / 1_000.0)
  } else {
    format!("{:.1}W", count as f64 / 10_000.0)
  }
}
