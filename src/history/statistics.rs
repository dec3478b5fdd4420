use crate::history::record::ClassificationRecord;

/// Summary derived from the history; never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsSnapshot {
    pub total_count: usize,
    pub average_confidence: f64,
    pub most_common_class: String,
}

/// `None` for an empty history, so callers keep whatever they displayed before.
///
/// Ties for the most common class go to the class that occurred first.
pub fn compute_snapshot<'a, I>(records: I) -> Option<StatisticsSnapshot>
where
    I: IntoIterator<Item = &'a ClassificationRecord>,
{
    let mut total_count = 0usize;
    let mut confidence_sum = 0.0f64;
    // Ordered by first occurrence.
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for record in records {
        total_count += 1;
        confidence_sum += record.confidence;
        match counts.iter_mut().find(|(class, _)| *class == record.class) {
            Some((_, count)) => *count += 1,
            None => counts.push((record.class.as_str(), 1)),
        }
    }

    if total_count == 0 {
        return None;
    }

    let mut most_common: (&str, usize) = ("", 0);
    for (class, count) in counts {
        if count > most_common.1 {
            most_common = (class, count);
        }
    }

    Some(StatisticsSnapshot {
        total_count,
        average_confidence: confidence_sum / total_count as f64,
        most_common_class: most_common.0.to_string(),
    })
}
