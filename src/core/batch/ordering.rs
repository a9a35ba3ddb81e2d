//! Rule based reordering

use super::types::EditableEntity;
use std::cmp::Ordering;

/// Recognized ordering rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderRule {
    /// By baseline name
    Alphabetical,
    /// By creation timestamp, oldest first
    ByDate,
}

const ALPHABETICAL_KEYWORDS: [&str; 2] = ["alfab", "alphab"];
const DATE_KEYWORDS: [&str; 4] = ["fecha", "date", "cronol", "chronol"];

impl OrderRule {
    /// Classify free text by case-insensitive keyword containment.
    /// Alphabetical wins when both kinds of keyword appear.
    pub fn classify(text: &str) -> Option<Self> {
        let text = text.to_lowercase();
        if ALPHABETICAL_KEYWORDS.iter().any(|k| text.contains(k)) {
            Some(OrderRule::Alphabetical)
        } else if DATE_KEYWORDS.iter().any(|k| text.contains(k)) {
            Some(OrderRule::ByDate)
        } else {
            None
        }
    }

    pub(crate) fn compare(self, a: &EditableEntity, b: &EditableEntity) -> Ordering {
        match self {
            OrderRule::Alphabetical => compare_names(&a.baseline.name, &b.baseline.name),
            OrderRule::ByDate => match (a.created_at, b.created_at) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

/// Case and accent insensitive comparison, raw text as tiebreak
fn compare_names(a: &str, b: &str) -> Ordering {
    fold(a).cmp(&fold(b)).then_with(|| a.cmp(b))
}

fn fold(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            'ç' => 'c',
            other => other,
        })
        .collect()
}
