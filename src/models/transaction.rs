use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One historical transaction touching a queried address.
///
/// `amount` is the signed net effect on that specific address, in whole units
/// of the asset - when a transaction has several outputs, only those
/// addressed to the queried address count. Fields the upstream API does not
/// report stay `None`; they are never fabricated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Upstream transaction id (hash).
    pub txid: String,

    /// Signed net value moved in (+) or out (-) of the queried address,
    /// in whole units of the asset.
    pub amount: Decimal,

    /// When the transaction happened, if the upstream reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,

    /// Confirmation count, if the upstream reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u32>,
}

impl Transaction {
    /// Order a transaction list most-recent-first.
    ///
    /// Every provider returns through this, whatever its upstream's native
    /// order (several APIs hand back oldest-first). The sort is stable;
    /// entries without a date sink to the end.
    pub fn sort_most_recent_first(transactions: &mut [Transaction]) {
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn tx(txid: &str, date: Option<DateTime<Utc>>) -> Transaction {
        Transaction {
            txid: txid.to_string(),
            amount: dec!(1),
            date,
            confirmations: None,
        }
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2015, 6, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_sort_most_recent_first() {
        let mut txs = vec![
            tx("a", Some(day(1))),
            tx("b", Some(day(20))),
            tx("c", Some(day(7))),
        ];
        Transaction::sort_most_recent_first(&mut txs);
        let order: Vec<&str> = txs.iter().map(|t| t.txid.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_undated_entries_sink_to_end() {
        let mut txs = vec![
            tx("undated", None),
            tx("dated", Some(day(3))),
        ];
        Transaction::sort_most_recent_first(&mut txs);
        assert_eq!(txs[0].txid, "dated");
        assert_eq!(txs[1].txid, "undated");
    }

    #[test]
    fn test_sort_is_stable_for_equal_dates() {
        let mut txs = vec![
            tx("first", Some(day(5))),
            tx("second", Some(day(5))),
        ];
        Transaction::sort_most_recent_first(&mut txs);
        assert_eq!(txs[0].txid, "first");
        assert_eq!(txs[1].txid, "second");
    }
}
