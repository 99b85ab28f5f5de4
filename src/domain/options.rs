use crate::domain::timestamp::Timestamp;
use crate::domain::value::AccountReference;

#[derive(Debug, Clone, PartialEq, Eq)]
enum OptionKind {
    Page { start_index: u32, count: u32 },
    Between { start: Timestamp, finish: Timestamp },
    SentByAccount(AccountReference),
    BatchesByAccount(AccountReference),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A query-string delta applied to a listing request.
///
/// Options are applied in the order given. Keys are never de-duplicated:
/// passing two `page` options sends both `startindex` values and leaves the
/// choice to the server.
pub struct ListOption(OptionKind);

impl ListOption {
    /// Request the window starting at `start_index` (zero based) holding `count` items.
    pub fn page(start_index: u32, count: u32) -> Self {
        Self(OptionKind::Page { start_index, count })
    }

    /// Restrict the listing to items between `start` and `finish`.
    pub fn between(start: impl Into<Timestamp>, finish: impl Into<Timestamp>) -> Self {
        Self(OptionKind::Between {
            start: start.into(),
            finish: finish.into(),
        })
    }

    pub(crate) fn sent_by_account(reference: AccountReference) -> Self {
        Self(OptionKind::SentByAccount(reference))
    }

    pub(crate) fn batches_by_account(reference: AccountReference) -> Self {
        Self(OptionKind::BatchesByAccount(reference))
    }

    pub(crate) fn push_query_pairs(&self, pairs: &mut Vec<(String, String)>) {
        match &self.0 {
            OptionKind::Page { start_index, count } => {
                pairs.push(("startindex".to_owned(), start_index.to_string()));
                pairs.push(("count".to_owned(), count.to_string()));
            }
            OptionKind::Between { start, finish } => {
                pairs.push(("start".to_owned(), start.to_rfc3339()));
                pairs.push(("finish".to_owned(), finish.to_rfc3339()));
            }
            OptionKind::SentByAccount(reference) => {
                pairs.push(("accountReference".to_owned(), reference.as_str().to_owned()));
            }
            OptionKind::BatchesByAccount(reference) => {
                pairs.push(("filterBy".to_owned(), "account".to_owned()));
                pairs.push(("filterValue".to_owned(), reference.as_str().to_owned()));
            }
        }
    }
}

/// Encode options, in order, into query pairs.
pub(crate) fn encode_query(options: &[ListOption]) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for option in options {
        option.push_query_pairs(&mut pairs);
    }
    pairs
}
