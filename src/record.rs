use serde::{Deserialize, Serialize};

/// One finished match as persisted in a stats file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: u64,
    pub score: u32,
    pub moves: u32,
    pub time_seconds: u64,
}

/// Match outcome before it has been assigned an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchStats {
    pub score: u32,
    pub moves: u32,
    pub time_seconds: u64,
}

impl MatchStats {
    pub fn with_id(self, id: u64) -> MatchRecord {
        MatchRecord {
            id,
            score: self.score,
            moves: self.moves,
            time_seconds: self.time_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_uses_plain_field_names() {
        let rec = MatchStats {
            score: 4,
            moves: 71,
            time_seconds: 30,
        }
        .with_id(9);
        let v = serde_json::to_value(rec).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"id": 9, "score": 4, "moves": 71, "time_seconds": 30})
        );
    }

    #[test]
    fn negative_score_is_rejected() {
        let res: Result<MatchRecord, _> =
            serde_json::from_str(r#"{"id": 1, "score": -1, "moves": 0, "time_seconds": 0}"#);
        assert!(res.is_err());
    }
}
